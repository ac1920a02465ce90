//! TCART - Terminal Shopping Cart
//!
//! Runs the interactive cart UI, or with `--script` replays a file of
//! actions against the cart and prints the result.

use std::io;
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use tracing::info;

use tcart::application::{replay, App, AppMode, CartStore};
use tcart::domain::{seed_items, AppResult};
use tcart::infrastructure::{init_tracing, Cli, Config, FileRepository};
use tcart::presentation::{render_text, render_ui, HitMap, InputHandler};

/// Entry point for the terminal cart.
fn main() {
    if let Err(err) = run(Config::from(Cli::parse())) {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

/// Loads the cart and runs either the headless replay or the UI.
///
/// # Errors
///
/// Returns an error if the catalog or script cannot be read, or if
/// terminal setup fails.
fn run(config: Config) -> AppResult<()> {
    init_tracing(config.log_file.as_deref());

    let items = match config.catalog {
        Some(ref path) => FileRepository::load_catalog(path)?,
        None => seed_items(),
    };
    let mut store = CartStore::new(items);

    if let Some(ref script) = config.script {
        let actions = FileRepository::load_script(script)?;
        replay(&mut store, &actions);
        print!("{}", render_text(store.state(), &config.currency));
        return Ok(());
    }

    info!("starting interactive session");
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(store, config.currency);
    let res = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    res?;
    Ok(())
}

/// Main application event loop.
///
/// Redraws only when the store or UI state asked for it. Continues until
/// the user presses 'q' in normal mode.
fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    let mut hits = HitMap::default();

    loop {
        if app.take_redraw() {
            terminal.draw(|f| hits = render_ui(f, app))?;
        }

        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                KeyCode::Char('q') if app.mode == AppMode::Normal => return Ok(()),
                _ => InputHandler::handle_key_event(app, key.code, key.modifiers),
            },
            Event::Mouse(mouse) => InputHandler::handle_mouse_event(app, mouse, &hits),
            Event::Resize(_, _) => app.request_redraw(),
            _ => {}
        }
    }
}
