use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::Block;
use ratatui::Frame;

use crate::config::{
    Theme, BORDER_HALF_BLOCK, CELL_WIDTH, GLYPH_BOMB_FOOD, GLYPH_ENERGY_FOOD, GLYPH_FOOD,
    GLYPH_LOBE, GLYPH_SNAKE_BODY, GLYPH_SNAKE_HEAD, GLYPH_TONGUE_DOWN, GLYPH_TONGUE_LEFT,
    GLYPH_TONGUE_RIGHT, GLYPH_TONGUE_UP, GLYPH_WALL, THEME, TILE_COUNT,
};
use crate::game::Snapshot;
use crate::input::{Direction, Velocity};
use crate::lobes::lobe_sources;
use crate::session::Overlay;
use crate::snake::Position;
use crate::ui::hud::render_hud;
use crate::ui::menu::{render_game_over_menu, render_popup, render_unlock_message};

/// Renders the full game frame from an immutable snapshot.
pub fn render(frame: &mut Frame<'_>, snapshot: &Snapshot<'_>, overlay: &Overlay) {
    let area = frame.area();
    let play_area = render_hud(frame, area, snapshot, &THEME);

    let board = board_rect(play_area);
    let block = Block::bordered()
        .border_set(BORDER_HALF_BLOCK)
        .border_style(Style::new().fg(THEME.border_fg));
    let inner = block.inner(board);
    frame.render_widget(block, board);

    render_board(frame, inner, snapshot, &THEME);

    if let Some(message) = overlay.popup {
        render_popup(frame, inner, message, &THEME);
    }
    if overlay.unlock_message {
        render_unlock_message(frame, inner, &THEME);
    }
    if let Some(info) = overlay.game_over {
        render_game_over_menu(frame, board, info, &THEME);
    }
}

/// Draws every entity in back-to-front order.
fn render_board(frame: &mut Frame<'_>, inner: Rect, snapshot: &Snapshot<'_>, theme: &Theme) {
    let buffer = frame.buffer_mut();
    buffer.set_style(inner, Style::new().bg(theme.play_bg));

    let mut draw = |position: Position, glyph: &str, style: Style| {
        if let Some((x, y)) = logical_to_terminal(inner, position) {
            buffer.set_string(x, y, glyph, style);
        }
    };

    if let Some(energy) = snapshot.foods.energy {
        draw(energy, GLYPH_ENERGY_FOOD, Style::new().fg(theme.energy_food));
    }
    if let Some(bomb) = snapshot.foods.bomb {
        draw(
            bomb,
            GLYPH_BOMB_FOOD,
            Style::new().fg(theme.bomb_food).add_modifier(Modifier::BOLD),
        );
    }

    for cell in snapshot.static_walls.cells() {
        draw(cell, GLYPH_WALL, Style::new().fg(theme.static_wall));
    }
    for cell in snapshot.moving_wall {
        draw(*cell, GLYPH_WALL, Style::new().fg(theme.moving_wall));
    }

    let head = snapshot.snake.head();
    for segment in snapshot.snake.segments().skip(1) {
        draw(*segment, GLYPH_SNAKE_BODY, Style::new().fg(theme.snake_body));
    }
    let head_style = Style::new()
        .fg(theme.snake_head)
        .add_modifier(Modifier::BOLD);
    match tongue_glyph(snapshot.show_tongue, snapshot.velocity) {
        Some(glyph) => draw(head, glyph, head_style.bg(theme.tongue)),
        None => draw(head, GLYPH_SNAKE_HEAD, head_style),
    }

    draw(snapshot.foods.normal, GLYPH_FOOD, Style::new().fg(theme.food));

    if snapshot.lobes_active {
        for source in lobe_sources() {
            draw(
                source,
                GLYPH_LOBE,
                Style::new().fg(theme.lobe).add_modifier(Modifier::BOLD),
            );
        }
    }
}

/// The tongue only shows while the snake is moving.
fn tongue_glyph(show_tongue: bool, velocity: Velocity) -> Option<&'static str> {
    if !show_tongue {
        return None;
    }

    velocity.direction().map(|direction| match direction {
        Direction::Up => GLYPH_TONGUE_UP,
        Direction::Down => GLYPH_TONGUE_DOWN,
        Direction::Left => GLYPH_TONGUE_LEFT,
        Direction::Right => GLYPH_TONGUE_RIGHT,
    })
}

/// Centers the bordered board inside `area`, clamped to what fits.
fn board_rect(area: Rect) -> Rect {
    let grid = u16::try_from(TILE_COUNT).unwrap_or(u16::MAX);
    let width = grid.saturating_mul(CELL_WIDTH).saturating_add(2).min(area.width);
    let height = grid.saturating_add(2).min(area.height);

    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

fn logical_to_terminal(inner: Rect, position: Position) -> Option<(u16, u16)> {
    if !position.is_within_bounds() {
        return None;
    }

    let x_offset = u16::try_from(position.x).ok()?.saturating_mul(CELL_WIDTH);
    let y_offset = u16::try_from(position.y).ok()?;

    let x = inner.x.saturating_add(x_offset);
    let y = inner.y.saturating_add(y_offset);
    if x >= inner.right() || y >= inner.bottom() {
        return None;
    }

    Some((x, y))
}
