//! Glue between the engine, its timers and the presentation state.

use log::{debug, info, warn};

use crate::config::{
    BOMB_SPAWN_INTERVAL_MS, ENERGY_SPAWN_INTERVAL_MS, MOVING_WALL_INTERVAL_MS, POPUP_DURATION_MS,
    TONGUE_DURATION_MS, TRANSIENT_FOOD_LIFETIME_MS, UNLOCK_MESSAGE_DURATION_MS,
};
use crate::game::{DeathReason, GameEvent, GameState, GameStatus};
use crate::input::GameInput;
use crate::score::HighScoreStore;
use crate::spawn::SpawnError;
use crate::timers::{Scheduler, Task, TimerId};

pub const POPUP_ENERGY: &str = "⚡ Energy Boost! +30";
pub const POPUP_WALL_DESTROYED: &str = "💣 Wall Destroyed!";

/// Final numbers shown on the game-over screen.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct GameOverInfo {
    pub final_score: u32,
    pub high_score: u32,
    pub new_high_score: bool,
    pub cause: DeathReason,
}

/// Transient presentation state driven by engine events and timers.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct Overlay {
    pub popup: Option<&'static str>,
    pub unlock_message: bool,
    pub game_over: Option<GameOverInfo>,
}

/// Timers that belong to one game and die with it on reset.
#[derive(Debug, Clone, Copy, Default)]
struct GameTimers {
    tick: Option<TimerId>,
    energy_expiry: Option<TimerId>,
    bomb_expiry: Option<TimerId>,
    tongue: Option<TimerId>,
    unlock_message: Option<TimerId>,
    popup: Option<TimerId>,
}

/// One running game plus everything scheduled around it.
pub struct Session<S> {
    game: GameState,
    scheduler: Scheduler,
    timers: GameTimers,
    overlay: Overlay,
    store: S,
}

impl<S: HighScoreStore> Session<S> {
    /// Wraps a freshly reset `game` and starts its timers at virtual time 0.
    pub fn new(game: GameState, store: S) -> Self {
        let mut scheduler = Scheduler::new();
        scheduler.schedule_repeating(Task::SpawnEnergyFood, ENERGY_SPAWN_INTERVAL_MS);
        scheduler.schedule_repeating(Task::SpawnBombFood, BOMB_SPAWN_INTERVAL_MS);
        scheduler.schedule_repeating(Task::RespawnMovingWall, MOVING_WALL_INTERVAL_MS);

        let mut session = Self {
            game,
            scheduler,
            timers: GameTimers::default(),
            overlay: Overlay::default(),
            store,
        };
        session.start_tick();
        session
    }

    #[must_use]
    pub fn game(&self) -> &GameState {
        &self.game
    }

    #[must_use]
    pub fn overlay(&self) -> &Overlay {
        &self.overlay
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    #[must_use]
    pub fn now_ms(&self) -> u64 {
        self.scheduler.now_ms()
    }

    /// Runs every task due up to `now_ms`, one at a time.
    pub fn advance_to(&mut self, now_ms: u64) -> Result<(), SpawnError> {
        while let Some((id, task)) = self.scheduler.pop_due(now_ms) {
            self.run_task(id, task)?;
        }
        self.scheduler.advance_to(now_ms);
        Ok(())
    }

    /// Applies one input. `Quit` is left to the caller.
    pub fn handle_input(&mut self, input: GameInput) -> Result<(), SpawnError> {
        match input {
            GameInput::Direction(direction) => {
                self.game.set_direction(direction);
                Ok(())
            }
            GameInput::Restart => self.restart(),
            GameInput::Confirm if self.game.status == GameStatus::GameOver => self.restart(),
            GameInput::Confirm | GameInput::Quit => Ok(()),
        }
    }

    /// Starts a new game. Every per-game timer is cancelled first, so nothing
    /// scheduled by the previous game can touch the new one.
    pub fn restart(&mut self) -> Result<(), SpawnError> {
        let timers = std::mem::take(&mut self.timers);
        for id in [
            timers.tick,
            timers.energy_expiry,
            timers.bomb_expiry,
            timers.tongue,
            timers.unlock_message,
            timers.popup,
        ]
        .into_iter()
        .flatten()
        {
            let _ = self.scheduler.cancel(id);
        }

        self.overlay = Overlay::default();
        self.game.reset()?;
        self.start_tick();
        Ok(())
    }

    fn start_tick(&mut self) {
        self.scheduler.cancel_slot(&mut self.timers.tick);
        self.timers.tick = Some(
            self.scheduler
                .schedule_repeating(Task::Tick, self.game.speed_ms),
        );
    }

    fn run_task(&mut self, id: TimerId, task: Task) -> Result<(), SpawnError> {
        match task {
            Task::Tick => {
                let events = self.game.tick()?;
                for event in events {
                    self.apply_event(event);
                }
            }
            Task::SpawnEnergyFood => {
                let position = self.game.spawn_energy_food()?;
                debug!("energy food at {position:?}");
                self.rearm(ExpirySlot::Energy);
            }
            Task::SpawnBombFood => {
                let position = self.game.spawn_bomb_food()?;
                debug!("bomb food at {position:?}");
                self.rearm(ExpirySlot::Bomb);
            }
            Task::RespawnMovingWall => self.game.respawn_moving_wall()?,
            Task::ExpireEnergyFood => {
                clear_fired(&mut self.timers.energy_expiry, id);
                self.game.expire_energy_food();
            }
            Task::ExpireBombFood => {
                clear_fired(&mut self.timers.bomb_expiry, id);
                self.game.expire_bomb_food();
            }
            Task::HideTongue => {
                clear_fired(&mut self.timers.tongue, id);
                self.game.hide_tongue();
            }
            Task::HideUnlockMessage => {
                clear_fired(&mut self.timers.unlock_message, id);
                self.overlay.unlock_message = false;
            }
            Task::HidePopup => {
                clear_fired(&mut self.timers.popup, id);
                self.overlay.popup = None;
            }
        }
        Ok(())
    }

    fn apply_event(&mut self, event: GameEvent) {
        match event {
            GameEvent::ScoreChanged(score) => debug!("score {score}"),
            GameEvent::WallAdded => debug!("static wall added"),
            GameEvent::LevelChanged { level, speed_ms } => {
                debug!("level {level}, restarting tick at {speed_ms} ms");
                self.start_tick();
            }
            GameEvent::LobesUnlocked => {
                self.overlay.unlock_message = true;
                self.scheduler.cancel_slot(&mut self.timers.unlock_message);
                self.timers.unlock_message = Some(
                    self.scheduler
                        .schedule_once(Task::HideUnlockMessage, UNLOCK_MESSAGE_DURATION_MS),
                );
            }
            GameEvent::TongueShown => {
                self.scheduler.cancel_slot(&mut self.timers.tongue);
                self.timers.tongue = Some(
                    self.scheduler
                        .schedule_once(Task::HideTongue, TONGUE_DURATION_MS),
                );
            }
            GameEvent::EnergyConsumed => {
                self.scheduler.cancel_slot(&mut self.timers.energy_expiry);
                self.show_popup(POPUP_ENERGY);
            }
            GameEvent::WallDestroyed { .. } => {
                self.scheduler.cancel_slot(&mut self.timers.bomb_expiry);
                self.show_popup(POPUP_WALL_DESTROYED);
            }
            GameEvent::GameOver {
                final_score,
                high_score,
                new_high_score,
                cause,
            } => {
                self.scheduler.cancel_slot(&mut self.timers.tick);
                if new_high_score {
                    match self.store.save(high_score) {
                        Ok(()) => info!("new high score {high_score} saved"),
                        Err(error) => warn!("failed to save high score: {error}"),
                    }
                }
                self.overlay.game_over = Some(GameOverInfo {
                    final_score,
                    high_score,
                    new_high_score,
                    cause,
                });
            }
        }
    }

    fn show_popup(&mut self, message: &'static str) {
        self.overlay.popup = Some(message);
        self.scheduler.cancel_slot(&mut self.timers.popup);
        self.timers.popup = Some(
            self.scheduler
                .schedule_once(Task::HidePopup, POPUP_DURATION_MS),
        );
    }

    fn rearm(&mut self, slot: ExpirySlot) {
        let (timer, task) = match slot {
            ExpirySlot::Energy => (&mut self.timers.energy_expiry, Task::ExpireEnergyFood),
            ExpirySlot::Bomb => (&mut self.timers.bomb_expiry, Task::ExpireBombFood),
        };
        self.scheduler.cancel_slot(timer);
        *timer = Some(
            self.scheduler
                .schedule_once(task, TRANSIENT_FOOD_LIFETIME_MS),
        );
    }
}

#[derive(Debug, Clone, Copy)]
enum ExpirySlot {
    Energy,
    Bomb,
}

/// Forgets a one-shot handle once its timer has fired.
fn clear_fired(slot: &mut Option<TimerId>, fired: TimerId) {
    if *slot == Some(fired) {
        *slot = None;
    }
}
