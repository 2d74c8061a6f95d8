use ratatui::style::Color;
use ratatui::symbols::border;

/// Cells per side of the square play grid.
pub const TILE_COUNT: i32 = 20;

/// Snake spawn cell after every reset.
pub const START_X: i32 = 10;
pub const START_Y: i32 = 10;

/// Tick interval at level 1, in milliseconds.
pub const INITIAL_SPEED_MS: u64 = 250;

/// Fastest allowed tick interval.
pub const MIN_SPEED_MS: u64 = 70;

/// Tick interval reduction per level.
pub const SPEED_STEP_MS: u64 = 20;

pub const NORMAL_FOOD_POINTS: u32 = 10;
pub const ENERGY_FOOD_POINTS: u32 = 30;

/// Score step for a level increase.
pub const POINTS_PER_LEVEL: u32 = 50;

/// Score step for a new static wall group.
pub const POINTS_PER_WALL: u32 = 100;

/// Level at which the lobe teleporters open.
pub const LOBE_LEVEL: u32 = 5;

pub const ENERGY_SPAWN_INTERVAL_MS: u64 = 25_000;
pub const BOMB_SPAWN_INTERVAL_MS: u64 = 40_000;
pub const MOVING_WALL_INTERVAL_MS: u64 = 10_000;

/// Lifetime of energy and bomb food.
pub const TRANSIENT_FOOD_LIFETIME_MS: u64 = 5_000;

pub const TONGUE_DURATION_MS: u64 = 300;
pub const UNLOCK_MESSAGE_DURATION_MS: u64 = 4_000;
pub const POPUP_DURATION_MS: u64 = 2_000;

/// Upper bound on re-rolls for wall placement.
pub const MAX_PLACEMENT_ATTEMPTS: usize = 10_000;

/// Terminal columns used for one grid cell.
pub const CELL_WIDTH: u16 = 2;

/// Frame pacing of the terminal loop.
pub const FRAME_INTERVAL_MS: u64 = 16;

/// Colors for every drawn entity.
#[derive(Debug)]
pub struct Theme {
    pub snake_head: Color,
    pub snake_body: Color,
    pub tongue: Color,
    pub food: Color,
    pub energy_food: Color,
    pub bomb_food: Color,
    pub static_wall: Color,
    pub moving_wall: Color,
    pub lobe: Color,
    pub play_bg: Color,
    pub border_fg: Color,
    pub hud_value: Color,
    pub hud_label: Color,
    pub popup: Color,
    pub menu_title: Color,
}

pub const THEME: Theme = Theme {
    snake_head: Color::LightGreen,
    snake_body: Color::Green,
    tongue: Color::Red,
    food: Color::Rgb(255, 165, 0),
    energy_food: Color::Magenta,
    bomb_food: Color::DarkGray,
    static_wall: Color::Rgb(210, 180, 140),
    moving_wall: Color::Rgb(255, 77, 77),
    lobe: Color::Rgb(0, 204, 255),
    play_bg: Color::Black,
    border_fg: Color::Gray,
    hud_value: Color::White,
    hud_label: Color::DarkGray,
    popup: Color::Yellow,
    menu_title: Color::Green,
};

pub const BORDER_HALF_BLOCK: border::Set = border::Set {
    top_left: "▄",
    top_right: "▄",
    bottom_left: "▀",
    bottom_right: "▀",
    vertical_left: "█",
    vertical_right: "█",
    horizontal_top: "▄",
    horizontal_bottom: "▀",
};

pub const GLYPH_SNAKE_HEAD: &str = "██";
pub const GLYPH_SNAKE_BODY: &str = "▓▓";
pub const GLYPH_FOOD: &str = "●";
pub const GLYPH_ENERGY_FOOD: &str = "◆";
pub const GLYPH_BOMB_FOOD: &str = "✹";
pub const GLYPH_WALL: &str = "▒▒";
pub const GLYPH_LOBE: &str = "◎";
pub const GLYPH_TONGUE_RIGHT: &str = "█<";
pub const GLYPH_TONGUE_LEFT: &str = ">█";
pub const GLYPH_TONGUE_UP: &str = "╽█";
pub const GLYPH_TONGUE_DOWN: &str = "╿█";
