//! Poke Quizz — guess-the-creature trivia in the terminal
//!
//! Identify creatures from a blurred sprite, a cry, or stat clues,
//! with data fetched live from PokeAPI.

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use poke_quizz::tui::App;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io::{self, stdout};
use tracing_subscriber::filter::EnvFilter;

/// Initialize logging, writing to POKE_QUIZZ_LOG if set.
///
/// The TUI owns the terminal, so without a log path events are dropped
/// rather than scribbled over the screen.
fn init_logging() {
    let Ok(path) = std::env::var("POKE_QUIZZ_LOG") else {
        return;
    };
    let filter = EnvFilter::builder()
        .with_default_directive(tracing::Level::INFO.into())
        .from_env_lossy();

    if let Ok(file) = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
    {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .with_ansi(false)
            .with_writer(file)
            .init();
    }
}

fn main() -> io::Result<()> {
    init_logging();

    // Create app (builds the PokeAPI client and its fetch worker)
    let mut app = match App::new() {
        Ok(app) => app,
        Err(err) => {
            eprintln!("failed to start: {}", err);
            return Ok(());
        }
    };

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Main loop
    while app.running {
        // Deliver fetch completions and timer ticks
        app.tick();

        // Draw
        terminal.draw(|frame| {
            app.render(frame);
        })?;

        // Handle input
        if !app.handle_input()? {
            break;
        }
    }

    // Cleanup
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    println!("\nThanks for playing Poke Quizz. See you next round!\n");

    Ok(())
}
