//! Grid snake with teleporting lobes, bombs and moving walls.
//!
//! [`game::GameState`] is the pure simulation; [`session::Session`] drives it
//! from a virtual-clock [`timers::Scheduler`] and turns its events into
//! presentation state for [`renderer`].

pub mod config;
pub mod food;
pub mod game;
pub mod input;
pub mod lobes;
pub mod renderer;
pub mod score;
pub mod session;
pub mod snake;
pub mod spawn;
pub mod terminal_runtime;
pub mod timers;
pub mod ui;
pub mod walls;
