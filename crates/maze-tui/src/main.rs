#![allow(clippy::format_in_format_args)]

mod animations;
mod app;
mod render;
mod theme;

use app::App;
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use maze_engine::{HttpSolverService, ServiceConfig, SolverService};
use std::io::{self, Write};
use std::time::{Duration, Instant};

/// Terminal maze game backed by an external solver service
#[derive(Parser, Debug)]
#[command(name = "maze", version, about)]
struct Args {
    /// Base URL of the solver service (overrides MAZE_SOLVER_URL)
    #[arg(long)]
    server_url: Option<String>,

    /// Maze rows for the first generated maze
    #[arg(long, default_value_t = 25)]
    rows: usize,

    /// Maze columns for the first generated maze
    #[arg(long, default_value_t = 35)]
    cols: usize,

    /// HTTP timeout in seconds
    #[arg(long, default_value_t = 10)]
    timeout: u64,
}

fn main() -> io::Result<()> {
    let args = Args::parse();

    let mut config = ServiceConfig::from_env();
    if let Some(url) = args.server_url {
        config.base_url = url;
    }
    config.timeout_secs = args.timeout;

    let service: Box<dyn SolverService> = Box::new(HttpSolverService::new(config));

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    // Run the app
    let result = run_app(&mut stdout, service, args.rows, args.cols);

    // Restore terminal
    disable_raw_mode()?;
    execute!(stdout, LeaveAlternateScreen)?;

    if let Err(e) = result {
        eprintln!("Error: {}", e);
    }

    Ok(())
}

fn run_app(
    stdout: &mut io::Stdout,
    service: Box<dyn SolverService>,
    rows: usize,
    cols: usize,
) -> io::Result<()> {
    let mut app = App::new(service, rows, cols);
    app.generate();

    let mut last_tick = Instant::now();

    loop {
        let tick_rate = app.tick_rate();

        render::render(stdout, &app)?;
        stdout.flush()?;

        // Handle input with timeout for animation updates
        let timeout = tick_rate.saturating_sub(last_tick.elapsed());
        if event::poll(timeout.min(Duration::from_millis(33)))? {
            match event::read()? {
                Event::Key(key) => {
                    if key.modifiers.contains(KeyModifiers::CONTROL)
                        && key.code == KeyCode::Char('c')
                    {
                        break;
                    }
                    match app.handle_key(key) {
                        app::AppAction::Continue => {}
                        app::AppAction::Quit => break,
                    }
                }
                // A resize is handled by the next frame.
                Event::Resize(_, _) => {}
                _ => {}
            }
        }

        if last_tick.elapsed() >= tick_rate {
            app.tick();
            last_tick = Instant::now();
        }
    }

    Ok(())
}
