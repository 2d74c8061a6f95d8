use log::{debug, info};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::{
    INITIAL_SPEED_MS, MIN_SPEED_MS, POINTS_PER_LEVEL, POINTS_PER_WALL, SPEED_STEP_MS, START_X,
    START_Y,
};
use crate::food::{FoodKind, Foods};
use crate::input::{Direction, Velocity};
use crate::lobes::{lobe_sources, lobes_active, teleport};
use crate::snake::{Position, Snake};
use crate::spawn::{spawn_position, Exclusions, SpawnError};
use crate::walls::{generate_block_avoiding, generate_small_wall, StaticWalls, WallGroup};

/// Walls placed by every reset.
const INITIAL_WALL_COUNT: usize = 2;

/// Current high-level gameplay state.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameStatus {
    Running,
    GameOver,
}

/// What ended the game.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum DeathReason {
    OutOfBounds,
    SelfCollision,
    WallCollision,
}

/// Notifications for the presentation layer, in the order they happened.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameEvent {
    ScoreChanged(u32),
    LevelChanged { level: u32, speed_ms: u64 },
    LobesUnlocked,
    TongueShown,
    WallAdded,
    EnergyConsumed,
    WallDestroyed { removed: bool },
    GameOver {
        final_score: u32,
        high_score: u32,
        new_high_score: bool,
        cause: DeathReason,
    },
}

/// Read-only view of everything the renderer draws.
#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'a> {
    pub snake: &'a Snake,
    pub velocity: Velocity,
    pub foods: Foods,
    pub static_walls: &'a StaticWalls,
    pub moving_wall: &'a [Position],
    pub score: u32,
    pub level: u32,
    pub speed_ms: u64,
    pub high_score: u32,
    pub show_tongue: bool,
    pub lobes_active: bool,
    pub status: GameStatus,
    pub death_reason: Option<DeathReason>,
}

/// Complete mutable game state for one session.
#[derive(Debug, Clone)]
pub struct GameState {
    pub snake: Snake,
    pub velocity: Velocity,
    pub foods: Foods,
    pub static_walls: StaticWalls,
    pub moving_wall: WallGroup,
    pub score: u32,
    pub level: u32,
    pub speed_ms: u64,
    pub high_score: u32,
    pub show_tongue: bool,
    pub lobes_unlocked: bool,
    pub tick_count: u64,
    pub status: GameStatus,
    pub death_reason: Option<DeathReason>,
    next_wall_at: u32,
    rng: StdRng,
}

impl GameState {
    /// Creates a fresh game seeded from OS entropy.
    pub fn new(high_score: u32) -> Result<Self, SpawnError> {
        Self::with_rng(StdRng::from_entropy(), high_score)
    }

    /// Creates a deterministic state for tests and reproducible simulations.
    pub fn new_with_seed(seed: u64, high_score: u32) -> Result<Self, SpawnError> {
        Self::with_rng(StdRng::seed_from_u64(seed), high_score)
    }

    fn with_rng(rng: StdRng, high_score: u32) -> Result<Self, SpawnError> {
        let start = Position::new(START_X, START_Y);
        let mut state = Self {
            snake: Snake::new(start),
            velocity: Velocity::IDLE,
            foods: Foods::new(start),
            static_walls: StaticWalls::new(),
            moving_wall: Vec::new(),
            score: 0,
            level: 1,
            speed_ms: INITIAL_SPEED_MS,
            high_score,
            show_tongue: false,
            lobes_unlocked: false,
            tick_count: 0,
            status: GameStatus::Running,
            death_reason: None,
            next_wall_at: POINTS_PER_WALL,
            rng,
        };
        state.reset()?;
        Ok(state)
    }

    /// Starts a new game. The high score and the RNG stream carry over.
    pub fn reset(&mut self) -> Result<(), SpawnError> {
        self.snake = Snake::new(Position::new(START_X, START_Y));
        self.velocity = Velocity::IDLE;
        self.foods.energy = None;
        self.foods.bomb = None;
        self.static_walls = StaticWalls::new();
        self.moving_wall = Vec::new();
        self.score = 0;
        self.level = 1;
        self.speed_ms = INITIAL_SPEED_MS;
        self.show_tongue = false;
        self.lobes_unlocked = false;
        self.tick_count = 0;
        self.status = GameStatus::Running;
        self.death_reason = None;
        self.next_wall_at = POINTS_PER_WALL;

        for _ in 0..INITIAL_WALL_COUNT {
            let exclusions = Exclusions::new()
                .with_cells(self.snake.segments().copied())
                .with_cells(lobe_sources());
            let wall = generate_block_avoiding(&mut self.rng, &exclusions)?;
            self.static_walls.push(wall);
        }

        self.respawn_moving_wall()?;
        let exclusions = self.normal_food_exclusions();
        self.foods.normal = spawn_position(&mut self.rng, &exclusions)?;

        info!("new game started");
        Ok(())
    }

    /// Applies a direction key under the axis lock.
    pub fn set_direction(&mut self, direction: Direction) {
        if self.status == GameStatus::Running {
            self.velocity = self.velocity.turned(direction);
        }
    }

    /// Advances simulation by one gameplay tick.
    pub fn tick(&mut self) -> Result<Vec<GameEvent>, SpawnError> {
        let mut events = Vec::new();
        if self.status != GameStatus::Running {
            return Ok(events);
        }

        self.tick_count += 1;

        let mut head = self.snake.head().stepped(self.velocity);
        if lobes_active(self.level) {
            if let Some(destination) = teleport(head) {
                debug!("lobe teleport {head:?} -> {destination:?}");
                head = destination;
            }
        }
        self.snake.push_head(head);

        match self.foods.eaten_at(head) {
            Some(FoodKind::Normal) => self.eat_normal_food(&mut events)?,
            Some(FoodKind::Energy) => {
                self.score += FoodKind::Energy.points();
                self.foods.clear(FoodKind::Energy);
                events.push(GameEvent::ScoreChanged(self.score));
                events.push(GameEvent::EnergyConsumed);
            }
            Some(FoodKind::Bomb) => {
                self.foods.clear(FoodKind::Bomb);
                let removed = self.static_walls.pop_latest().is_some();
                debug!("bomb eaten, wall removed: {removed}");
                events.push(GameEvent::WallDestroyed { removed });
            }
            None => self.snake.drop_tail(),
        }

        if let Some(cause) = self.collision() {
            events.push(self.finish(cause));
        }

        Ok(events)
    }

    fn eat_normal_food(&mut self, events: &mut Vec<GameEvent>) -> Result<(), SpawnError> {
        self.score += FoodKind::Normal.points();
        events.push(GameEvent::ScoreChanged(self.score));

        self.show_tongue = true;
        events.push(GameEvent::TongueShown);

        let exclusions = self.normal_food_exclusions();
        self.foods.normal = spawn_position(&mut self.rng, &exclusions)?;

        if self.score >= self.next_wall_at {
            self.static_walls.push(generate_small_wall(&mut self.rng));
            self.next_wall_at = self.score - self.score % POINTS_PER_WALL + POINTS_PER_WALL;
            debug!("wall added at score {}", self.score);
            events.push(GameEvent::WallAdded);
        }

        if self.score % POINTS_PER_LEVEL == 0 {
            self.level += 1;
            self.speed_ms = self.speed_ms.saturating_sub(SPEED_STEP_MS).max(MIN_SPEED_MS);
            info!("level {} reached, tick every {} ms", self.level, self.speed_ms);
            events.push(GameEvent::LevelChanged {
                level: self.level,
                speed_ms: self.speed_ms,
            });

            if lobes_active(self.level) && !self.lobes_unlocked {
                self.lobes_unlocked = true;
                info!("lobes unlocked");
                events.push(GameEvent::LobesUnlocked);
            }
        }

        Ok(())
    }

    fn collision(&self) -> Option<DeathReason> {
        let head = self.snake.head();
        if !head.is_within_bounds() {
            Some(DeathReason::OutOfBounds)
        } else if self.snake.head_overlaps_body() {
            Some(DeathReason::SelfCollision)
        } else if self.static_walls.contains(head) || self.moving_wall.contains(&head) {
            Some(DeathReason::WallCollision)
        } else {
            None
        }
    }

    fn finish(&mut self, cause: DeathReason) -> GameEvent {
        self.status = GameStatus::GameOver;
        self.death_reason = Some(cause);

        let new_high_score = self.score > self.high_score;
        if new_high_score {
            self.high_score = self.score;
        }
        info!("game over ({cause:?}), score {}", self.score);

        GameEvent::GameOver {
            final_score: self.score,
            high_score: self.high_score,
            new_high_score,
            cause,
        }
    }

    /// Places energy food on a free cell, replacing any shown one.
    pub fn spawn_energy_food(&mut self) -> Result<Position, SpawnError> {
        let exclusions = self
            .board_exclusions()
            .with_optional(Some(self.foods.normal))
            .with_optional(self.foods.bomb);
        let position = spawn_position(&mut self.rng, &exclusions)?;
        self.foods.energy = Some(position);
        Ok(position)
    }

    /// Places bomb food on a free cell, replacing any shown one.
    pub fn spawn_bomb_food(&mut self) -> Result<Position, SpawnError> {
        let exclusions = self
            .board_exclusions()
            .with_optional(Some(self.foods.normal))
            .with_optional(self.foods.energy);
        let position = spawn_position(&mut self.rng, &exclusions)?;
        self.foods.bomb = Some(position);
        Ok(position)
    }

    /// Replaces the moving wall with a fresh 3-cell block.
    pub fn respawn_moving_wall(&mut self) -> Result<(), SpawnError> {
        let exclusions = Exclusions::new()
            .with_cells(self.snake.segments().copied())
            .with_cells(self.static_walls.cells())
            .with_optional(Some(self.foods.normal))
            .with_optional(self.foods.energy)
            .with_optional(self.foods.bomb)
            .with_cells(lobe_sources());
        self.moving_wall = generate_block_avoiding(&mut self.rng, &exclusions)?;
        Ok(())
    }

    pub fn expire_energy_food(&mut self) {
        self.foods.energy = None;
    }

    pub fn expire_bomb_food(&mut self) {
        self.foods.bomb = None;
    }

    pub fn hide_tongue(&mut self) {
        self.show_tongue = false;
    }

    /// Returns the score at which the next static wall group appears.
    #[must_use]
    pub fn next_wall_at(&self) -> u32 {
        self.next_wall_at
    }

    #[must_use]
    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            snake: &self.snake,
            velocity: self.velocity,
            foods: self.foods,
            static_walls: &self.static_walls,
            moving_wall: &self.moving_wall,
            score: self.score,
            level: self.level,
            speed_ms: self.speed_ms,
            high_score: self.high_score,
            show_tongue: self.show_tongue,
            lobes_active: lobes_active(self.level),
            status: self.status,
            death_reason: self.death_reason,
        }
    }

    /// Snake, walls, moving wall and lobe sources.
    fn board_exclusions(&self) -> Exclusions {
        Exclusions::new()
            .with_cells(self.snake.segments().copied())
            .with_cells(self.static_walls.cells())
            .with_cells(self.moving_wall.iter().copied())
            .with_cells(lobe_sources())
    }

    fn normal_food_exclusions(&self) -> Exclusions {
        self.board_exclusions()
            .with_optional(self.foods.energy)
            .with_optional(self.foods.bomb)
    }
}

#[cfg(test)]
mod tests {
    use crate::config::{MIN_SPEED_MS, TILE_COUNT};
    use crate::food::Foods;
    use crate::input::{Direction, Velocity};
    use crate::lobes::lobe_sources;
    use crate::snake::{Position, Snake};
    use crate::walls::StaticWalls;

    use super::{DeathReason, GameEvent, GameState, GameStatus};

    /// A running game with an empty board and the snake at `head`, moving right.
    fn open_board(seed: u64, head: Position) -> GameState {
        let mut state = GameState::new_with_seed(seed, 0).expect("fresh board has room");
        state.snake = Snake::new(head);
        state.velocity = Velocity::from_direction(Direction::Right);
        state.static_walls = StaticWalls::new();
        state.moving_wall = Vec::new();
        state.foods = Foods::new(Position::new(0, TILE_COUNT - 2));
        state
    }

    fn tick(state: &mut GameState) -> Vec<GameEvent> {
        state.tick().expect("placement succeeds")
    }

    #[test]
    fn reset_builds_the_opening_board() {
        let state = GameState::new_with_seed(1, 40).expect("fresh board has room");

        assert_eq!(state.snake.len(), 1);
        assert_eq!(state.snake.head(), Position::new(10, 10));
        assert_eq!(state.velocity, Velocity::IDLE);
        assert_eq!(state.static_walls.len(), 2);
        assert!(state.static_walls.groups().iter().all(|wall| wall.len() == 3));
        assert_eq!(state.moving_wall.len(), 3);
        assert_eq!((state.score, state.level, state.speed_ms), (0, 1, 250));
        assert_eq!(state.high_score, 40);
        assert_eq!(state.foods.energy, None);
        assert_eq!(state.foods.bomb, None);
        assert!(!state.static_walls.contains(state.snake.head()));
        assert!(!state.moving_wall.contains(&state.foods.normal));
    }

    #[test]
    fn idle_snake_stays_put() {
        let mut state = GameState::new_with_seed(2, 0).expect("fresh board has room");

        for _ in 0..5 {
            assert!(tick(&mut state).is_empty());
        }

        assert_eq!(state.status, GameStatus::Running);
        assert_eq!(state.snake.head(), Position::new(10, 10));
    }

    #[test]
    fn length_is_constant_without_food() {
        let mut state = open_board(3, Position::new(2, 5));
        state.snake = Snake::from_segments(vec![
            Position::new(4, 5),
            Position::new(3, 5),
            Position::new(2, 5),
        ]);

        for _ in 0..5 {
            tick(&mut state);
            assert_eq!(state.snake.len(), 3);
        }
        assert_eq!(state.snake.head(), Position::new(9, 5));
    }

    #[test]
    fn normal_food_grows_and_scores() {
        let mut state = open_board(4, Position::new(5, 5));
        state.foods.normal = Position::new(6, 5);

        let events = tick(&mut state);

        assert_eq!(state.snake.len(), 2);
        assert_eq!(state.score, 10);
        assert!(state.show_tongue);
        assert!(events.contains(&GameEvent::ScoreChanged(10)));
        assert!(events.contains(&GameEvent::TongueShown));
        assert_ne!(state.foods.normal, Position::new(6, 5));
        assert!(!state.snake.occupies(state.foods.normal));
    }

    #[test]
    fn energy_food_scores_thirty_and_disappears() {
        let mut state = open_board(5, Position::new(5, 5));
        state.foods.energy = Some(Position::new(6, 5));

        let events = tick(&mut state);

        assert_eq!(state.score, 30);
        assert_eq!(state.snake.len(), 2);
        assert_eq!(state.foods.energy, None);
        assert_eq!(
            events,
            vec![GameEvent::ScoreChanged(30), GameEvent::EnergyConsumed]
        );
    }

    #[test]
    fn bomb_food_removes_latest_wall_without_scoring() {
        let mut state = open_board(6, Position::new(5, 5));
        state.static_walls.push(vec![Position::new(1, 1), Position::new(1, 2)]);
        state.static_walls.push(vec![Position::new(15, 15), Position::new(16, 15)]);
        state.foods.bomb = Some(Position::new(6, 5));

        let events = tick(&mut state);

        assert_eq!(state.score, 0);
        assert_eq!(state.snake.len(), 2);
        assert_eq!(state.foods.bomb, None);
        assert_eq!(state.static_walls.len(), 1);
        assert!(state.static_walls.contains(Position::new(1, 2)));
        assert_eq!(events, vec![GameEvent::WallDestroyed { removed: true }]);
    }

    #[test]
    fn bomb_food_with_no_walls_is_harmless() {
        let mut state = open_board(7, Position::new(5, 5));
        state.foods.bomb = Some(Position::new(6, 5));

        let events = tick(&mut state);

        assert_eq!(events, vec![GameEvent::WallDestroyed { removed: false }]);
        assert_eq!(state.status, GameStatus::Running);
    }

    #[test]
    fn normal_food_wins_over_energy_on_the_same_cell() {
        let mut state = open_board(8, Position::new(5, 5));
        state.foods.normal = Position::new(6, 5);
        state.foods.energy = Some(Position::new(6, 5));

        tick(&mut state);

        assert_eq!(state.score, 10);
        assert_eq!(state.snake.len(), 2);
    }

    #[test]
    fn level_rises_on_multiples_of_fifty() {
        let mut state = open_board(9, Position::new(5, 5));
        state.score = 40;
        state.foods.normal = Position::new(6, 5);

        let events = tick(&mut state);

        assert_eq!(state.score, 50);
        assert_eq!(state.level, 2);
        assert_eq!(state.speed_ms, 230);
        assert!(events.contains(&GameEvent::LevelChanged {
            level: 2,
            speed_ms: 230
        }));
    }

    #[test]
    fn speed_is_floored() {
        let mut state = open_board(10, Position::new(2, 5));
        state.next_wall_at = u32::MAX;
        state.speed_ms = 80;

        for step in 0..3 {
            state.foods.normal = state.snake.head().stepped(state.velocity);
            state.score = 40 + 50 * step;
            tick(&mut state);
        }

        assert_eq!(state.speed_ms, MIN_SPEED_MS);
    }

    #[test]
    fn crossing_one_hundred_adds_a_wall_but_no_level() {
        let mut state = open_board(11, Position::new(5, 5));
        state.score = 95;
        state.foods.normal = Position::new(6, 5);

        let events = tick(&mut state);

        assert_eq!(state.score, 105);
        assert_eq!(state.level, 1);
        assert_eq!(state.static_walls.len(), 1);
        assert_eq!(state.static_walls.groups()[0].len(), 2);
        assert_eq!(state.next_wall_at(), 200);
        assert!(events.contains(&GameEvent::WallAdded));
        assert!(!events
            .iter()
            .any(|event| matches!(event, GameEvent::LevelChanged { .. })));
    }

    #[test]
    fn wall_threshold_fires_once() {
        let mut state = open_board(12, Position::new(2, 5));
        state.score = 90;
        let mut walls_added = 0;

        for _ in 0..3 {
            state.foods.normal = state.snake.head().stepped(state.velocity);
            let events = tick(&mut state);
            walls_added += events
                .iter()
                .filter(|event| **event == GameEvent::WallAdded)
                .count();
            // Keep the random wall out of the snake's way.
            state.static_walls = StaticWalls::new();
        }

        assert_eq!(walls_added, 1);
        assert_eq!(state.next_wall_at(), 200);
    }

    #[test]
    fn energy_jumps_do_not_stack_walls() {
        let mut state = open_board(29, Position::new(2, 5));
        state.score = 90;
        let mut walls_at = Vec::new();
        let far_away = Position::new(0, TILE_COUNT - 2);

        let mut step = |state: &mut GameState, energy: bool| {
            let next = state.snake.head().stepped(state.velocity);
            if energy {
                state.foods.normal = far_away;
                state.foods.energy = Some(next);
            } else {
                state.foods.normal = next;
            }
            let events = tick(state);
            if events.contains(&GameEvent::WallAdded) {
                walls_at.push(state.score);
            }
            state.static_walls = StaticWalls::new();
        };

        for _ in 0..5 {
            step(&mut state, false);
        }
        for _ in 0..6 {
            step(&mut state, true);
        }
        assert_eq!(state.score, 320);
        for _ in 0..2 {
            step(&mut state, false);
        }

        assert_eq!(state.status, GameStatus::Running);
        assert_eq!(walls_at, vec![100, 330]);
        assert_eq!(state.next_wall_at(), 400);
    }

    #[test]
    fn reaching_level_five_unlocks_lobes_once() {
        let mut state = open_board(13, Position::new(2, 5));
        state.next_wall_at = u32::MAX;
        state.level = 4;
        state.score = 190;

        state.foods.normal = Position::new(3, 5);
        let events = tick(&mut state);
        assert_eq!(state.level, 5);
        assert!(state.lobes_unlocked);
        assert!(events.contains(&GameEvent::LobesUnlocked));

        state.score = 240;
        state.foods.normal = Position::new(4, 5);
        let events = tick(&mut state);
        assert_eq!(state.level, 6);
        assert!(!events.contains(&GameEvent::LobesUnlocked));
    }

    #[test]
    fn lobe_teleports_once_at_level_five() {
        let mut state = open_board(14, Position::new(10, 1));
        state.level = 5;
        state.velocity = Velocity::from_direction(Direction::Up);

        tick(&mut state);

        assert_eq!(state.status, GameStatus::Running);
        assert_eq!(state.snake.head(), Position::new(10, 19));
    }

    #[test]
    fn lobes_are_plain_cells_below_level_five() {
        let mut state = open_board(15, Position::new(10, 1));
        state.velocity = Velocity::from_direction(Direction::Up);

        tick(&mut state);

        assert_eq!(state.snake.head(), Position::new(10, 0));
    }

    #[test]
    fn leaving_the_grid_ends_the_game() {
        let mut state = open_board(16, Position::new(0, 0));
        state.velocity = Velocity::from_direction(Direction::Left);

        let events = tick(&mut state);

        assert_eq!(state.status, GameStatus::GameOver);
        assert_eq!(state.death_reason, Some(DeathReason::OutOfBounds));
        assert!(matches!(
            events.last(),
            Some(GameEvent::GameOver {
                cause: DeathReason::OutOfBounds,
                ..
            })
        ));
    }

    #[test]
    fn biting_the_body_ends_the_game() {
        let mut state = open_board(17, Position::new(2, 2));
        state.snake = Snake::from_segments(vec![
            Position::new(2, 2),
            Position::new(3, 2),
            Position::new(3, 3),
            Position::new(2, 3),
            Position::new(1, 3),
            Position::new(1, 2),
        ]);
        state.velocity = Velocity::from_direction(Direction::Down);

        tick(&mut state);

        assert_eq!(state.death_reason, Some(DeathReason::SelfCollision));
    }

    #[test]
    fn moving_into_the_vacated_tail_is_safe() {
        let mut state = open_board(18, Position::new(2, 2));
        state.snake = Snake::from_segments(vec![
            Position::new(2, 2),
            Position::new(3, 2),
            Position::new(3, 3),
            Position::new(2, 3),
        ]);
        state.velocity = Velocity::from_direction(Direction::Down);

        tick(&mut state);

        assert_eq!(state.status, GameStatus::Running);
    }

    #[test]
    fn hitting_a_wall_ends_the_game() {
        let mut state = open_board(19, Position::new(5, 5));
        state.moving_wall = vec![Position::new(6, 4), Position::new(6, 5), Position::new(6, 6)];

        tick(&mut state);
        assert_eq!(state.death_reason, Some(DeathReason::WallCollision));

        let mut state = open_board(19, Position::new(5, 5));
        state.static_walls.push(vec![Position::new(6, 5), Position::new(7, 5)]);

        tick(&mut state);
        assert_eq!(state.death_reason, Some(DeathReason::WallCollision));
    }

    #[test]
    fn death_wins_over_food_on_the_same_cell() {
        let mut state = open_board(20, Position::new(5, 5));
        state.foods.normal = Position::new(6, 5);
        state.moving_wall = vec![Position::new(6, 5)];

        tick(&mut state);

        assert_eq!(state.score, 10);
        assert_eq!(state.status, GameStatus::GameOver);
    }

    #[test]
    fn game_over_updates_high_score_only_when_beaten() {
        let mut state = open_board(21, Position::new(19, 5));
        state.score = 70;
        state.high_score = 50;

        let events = tick(&mut state);

        assert_eq!(state.high_score, 70);
        assert!(events.contains(&GameEvent::GameOver {
            final_score: 70,
            high_score: 70,
            new_high_score: true,
            cause: DeathReason::OutOfBounds,
        }));

        let mut state = open_board(21, Position::new(19, 5));
        state.score = 20;
        state.high_score = 50;
        tick(&mut state);
        assert_eq!(state.high_score, 50);
    }

    #[test]
    fn game_over_is_terminal_until_reset() {
        let mut state = open_board(22, Position::new(19, 5));
        tick(&mut state);
        let head = state.snake.head();

        state.set_direction(Direction::Up);
        assert!(tick(&mut state).is_empty());
        assert_eq!(state.snake.head(), head);

        state.reset().expect("reset succeeds");
        assert_eq!(state.status, GameStatus::Running);
        assert_eq!(state.death_reason, None);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn reset_keeps_high_score() {
        let mut state = open_board(23, Position::new(19, 5));
        state.score = 90;
        tick(&mut state);

        state.reset().expect("reset succeeds");

        assert_eq!(state.high_score, 90);
        assert_eq!(state.next_wall_at(), 100);
        assert!(!state.lobes_unlocked);
    }

    #[test]
    fn axis_lock_blocks_reversal() {
        let mut state = open_board(24, Position::new(5, 5));

        state.set_direction(Direction::Left);
        assert_eq!(state.velocity, Velocity::from_direction(Direction::Right));

        state.set_direction(Direction::Up);
        assert_eq!(state.velocity, Velocity::from_direction(Direction::Up));
    }

    #[test]
    fn transient_food_never_lands_on_occupied_cells() {
        let mut state = GameState::new_with_seed(25, 0).expect("fresh board has room");
        state.snake = Snake::from_segments((2..12).map(|x| Position::new(x, 4)).collect());

        for _ in 0..300 {
            let energy = state.spawn_energy_food().expect("room for energy food");
            let bomb = state.spawn_bomb_food().expect("room for bomb food");

            for cell in [energy, bomb] {
                assert!(cell.is_within_bounds());
                assert!(!state.snake.occupies(cell));
                assert!(!state.static_walls.contains(cell));
                assert!(!state.moving_wall.contains(&cell));
                assert!(lobe_sources().all(|source| source != cell));
                assert_ne!(cell, state.foods.normal);
            }
            assert_ne!(energy, bomb);
        }
    }

    #[test]
    fn moving_wall_avoids_everything_else() {
        let mut state = GameState::new_with_seed(26, 0).expect("fresh board has room");
        state.spawn_energy_food().expect("room for energy food");
        state.spawn_bomb_food().expect("room for bomb food");

        for _ in 0..300 {
            state.respawn_moving_wall().expect("room for the moving wall");

            assert_eq!(state.moving_wall.len(), 3);
            for cell in &state.moving_wall {
                assert!(cell.is_inside_margin());
                assert!(!state.snake.occupies(*cell));
                assert!(!state.static_walls.contains(*cell));
                assert_ne!(Some(*cell), state.foods.energy);
                assert_ne!(Some(*cell), state.foods.bomb);
                assert_ne!(*cell, state.foods.normal);
            }
        }
    }

    #[test]
    fn normal_food_respawn_avoids_occupied_cells() {
        let mut state = open_board(27, Position::new(0, 7));
        state.next_wall_at = u32::MAX;
        state.static_walls.push(vec![Position::new(4, 4), Position::new(5, 4)]);
        state.moving_wall = vec![Position::new(8, 8), Position::new(8, 9), Position::new(8, 10)];
        state.foods.energy = Some(Position::new(12, 12));
        state.foods.bomb = Some(Position::new(13, 13));

        for _ in 0..TILE_COUNT - 2 {
            state.foods.normal = state.snake.head().stepped(state.velocity);
            tick(&mut state);
            let food = state.foods.normal;

            assert!(!state.snake.occupies(food));
            assert!(!state.static_walls.contains(food));
            assert!(!state.moving_wall.contains(&food));
            assert_ne!(Some(food), state.foods.energy);
            assert_ne!(Some(food), state.foods.bomb);
            assert!(lobe_sources().all(|source| source != food));
        }
    }

    #[test]
    fn expiry_and_tongue_helpers_clear_flags() {
        let mut state = open_board(28, Position::new(5, 5));
        state.spawn_energy_food().expect("room for energy food");
        state.spawn_bomb_food().expect("room for bomb food");
        state.show_tongue = true;

        state.expire_energy_food();
        state.expire_bomb_food();
        state.hide_tongue();

        assert_eq!(state.foods.energy, None);
        assert_eq!(state.foods.bomb, None);
        assert!(!state.show_tongue);
    }
}
