use std::io::{self, Write};

use clap::Parser;
use crossterm::{
    cursor::{Hide, Show},
    terminal::{disable_raw_mode, enable_raw_mode, size},
};
use log::{error, info, warn};
use rand::Rng;

use ouroboros::app::App;
use ouroboros::config::Args;
use ouroboros::game::Game;
use ouroboros::rendering::{GameGrid, OutputTarget};
use ouroboros::terminal_io::{InputSource, SimulatedInput};

const DEBUG_QUIT_FRAME: u64 = 2000;

fn main() -> io::Result<()> {
    let args = Args::parse();
    simple_logging::log_to_file(&args.log_file, args.log_level)?;
    info!("Starting Ouroboros.");

    let seed = args.seed.unwrap_or_else(|| rand::thread_rng().r#gen());
    info!("Seed: {}", seed);
    let mut game = Game::new(seed);

    if args.debug {
        info!("Debug mode enabled.");
        let input = InputSource::Simulated(SimulatedInput::demo_script(DEBUG_QUIT_FRAME));
        let mut app = App::new(App::debug_target(), input, true, args.frames);
        let frames = app.run(&mut game)?;
        info!("Debug run finished after {} frames, score {}, best {}", frames, game.score, game.best_score);
        return Ok(());
    }

    let (terminal_width, terminal_height) = size().map_err(|e| { error!("Failed to get terminal size: {}", e); e })?;
    info!("Attempting to enable raw mode.");
    enable_raw_mode().map_err(|e| { error!("Failed to enable raw mode: {}", e); e })?;
    info!("Terminal size: {}x{}", terminal_width, terminal_height);
    let (needed_width, needed_height) = App::screen_size();
    if terminal_width < needed_width || terminal_height < needed_height {
        warn!("Terminal is smaller than the {}x{} the board needs", needed_width, needed_height);
    }

    let mut app = App::new(OutputTarget::Stdout(io::stdout()), InputSource::Terminal, false, args.frames);
    let result = prepare_screen(&mut app.stdout_target, terminal_width, terminal_height)
        .and_then(|_| app.run(&mut game));
    // Restore the terminal before reporting anything.
    let restored = restore_terminal(&mut app.stdout_target, terminal_width, terminal_height);

    match result {
        Ok(frames) => info!("Exited after {} frames.", frames),
        Err(ref e) => error!("Game loop failed: {}", e),
    }
    restored?;
    println!("Best score this session: {}", game.best_score.max(game.score));
    result.map(|_| ())
}

fn prepare_screen(stdout_target: &mut OutputTarget, terminal_width: u16, terminal_height: u16) -> io::Result<()> {
    GameGrid::clear_screen_manual(stdout_target, terminal_width, terminal_height)
        .map_err(|e| { error!("Failed to clear screen: {}", e); e })?;
    stdout_target.execute_other_command(Hide).map_err(|e| { error!("Failed to hide cursor: {}", e); e })?;
    stdout_target.flush()
}

fn restore_terminal(stdout_target: &mut OutputTarget, terminal_width: u16, terminal_height: u16) -> io::Result<()> {
    GameGrid::clear_screen_manual(stdout_target, terminal_width, terminal_height)?;
    stdout_target.execute_other_command(Show)?;
    stdout_target.flush()?;
    disable_raw_mode().map_err(|e| { error!("Failed to disable raw mode: {}", e); e })
}
