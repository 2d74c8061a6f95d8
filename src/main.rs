use std::fs::{self, File};
use std::io;
use std::path::PathBuf;
use std::thread;
use std::time::{Duration, Instant};

use clap::Parser;
use log::{LevelFilter, error, info, warn};
use simplelog::{Config, WriteLogger};

use lobe_snake::config::FRAME_INTERVAL_MS;
use lobe_snake::game::GameState;
use lobe_snake::input::{GameInput, InputHandler};
use lobe_snake::score::{FileScoreStore, HighScoreStore, data_dir};
use lobe_snake::session::Session;
use lobe_snake::terminal_runtime::TerminalSession;

const LOG_FILE_NAME: &str = "lobe-snake.log";

#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Seed the game RNG for a reproducible run.
    #[arg(long)]
    seed: Option<u64>,

    /// Write the log here instead of the data directory.
    #[arg(long = "log-file")]
    log_file: Option<PathBuf>,

    /// Log verbosity (off, error, warn, info, debug, trace).
    #[arg(long = "log-level", default_value = "info")]
    log_level: LevelFilter,
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();
    init_logging(&cli);

    let store = FileScoreStore::default_location();
    let high_score = store.load().unwrap_or_else(|error| {
        warn!(
            "could not read high score from {}: {error}",
            store.path().display()
        );
        0
    });

    let game = match cli.seed {
        Some(seed) => GameState::new_with_seed(seed, high_score),
        None => GameState::new(high_score),
    }
    .map_err(io::Error::other)?;
    info!("starting, high score {high_score}");

    let result = run(Session::new(game, store));
    if let Err(error) = &result {
        error!("stopped: {error}");
    }
    result
}

fn run<S: HighScoreStore>(mut session: Session<S>) -> io::Result<()> {
    let mut terminal = TerminalSession::enter()?;
    let mut input = InputHandler::new();
    let started = Instant::now();

    loop {
        terminal.draw(&session.game().snapshot(), session.overlay())?;

        if let Some(game_input) = input.poll_input()? {
            if game_input == GameInput::Quit {
                break;
            }
            session
                .handle_input(game_input)
                .map_err(io::Error::other)?;
        }

        let now_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
        session.advance_to(now_ms).map_err(io::Error::other)?;

        thread::sleep(Duration::from_millis(FRAME_INTERVAL_MS));
    }

    info!("quit at score {}", session.game().score);
    Ok(())
}

/// Logs go to a file: the terminal is owned by the game screen.
fn init_logging(cli: &Cli) {
    let path = cli.log_file.clone().unwrap_or_else(|| {
        let dir = data_dir();
        let _ = fs::create_dir_all(&dir);
        dir.join(LOG_FILE_NAME)
    });

    let Ok(file) = File::create(&path) else {
        return;
    };
    let _ = WriteLogger::init(cli.log_level, Config::default(), file);
}
