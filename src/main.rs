use std::fs::File;
use std::io;
use std::panic;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Parser;
use crossterm::{
    cursor, execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use ascii_breakout::app::App;
use ascii_breakout::event::TerminalInput;

#[derive(Parser, Debug)]
#[command(name = "ascii-breakout", version)]
#[command(about = "Breakout in the terminal, with endless random levels", long_about = None)]
struct Args {
    /// Level to start on
    #[arg(default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    level: u32,

    /// Seed for a reproducible game (random by default)
    #[arg(long)]
    seed: Option<u64>,

    /// Milliseconds per frame. Ball and paddle speeds are counted in frames.
    #[arg(long, default_value_t = 5, value_parser = clap::value_parser!(u64).range(1..))]
    frame_ms: u64,

    /// Write a log to this file (filter with RUST_LOG, default info)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> io::Result<()> {
    let args = Args::parse();
    init_logging(args.log_file.as_deref())?;

    let rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    log::info!("Starting at level {} (seed {:?})", args.level, args.seed);

    // Setup terminal
    install_panic_hook();
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let mut app = App::new(args.level, rng, Duration::from_millis(args.frame_ms));
    let result = app.run(&mut terminal, &mut TerminalInput);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    let outcome = result?;
    println!("Final score: {} (level {})", outcome.score, outcome.level);
    Ok(())
}

/// The terminal belongs to the game, so logs only go to a file when asked for.
fn init_logging(path: Option<&Path>) -> io::Result<()> {
    let Some(path) = path else { return Ok(()) };
    let file = File::create(path)?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

/// Put the terminal back before the panic message prints.
fn install_panic_hook() {
    let default_hook = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, cursor::Show);
        default_hook(info);
    }));
}
