// ============================================================================
// StockGrid - Grille de cotations dans le terminal
// ============================================================================
// Monte la vue (un seul fetch de GET /api/stocks/), puis fait tourner la
// boucle d'événements jusqu'à ce que l'utilisateur quitte.
//
// CONCEPTS RUST CLÉS :
// 1. Runtime tokio + Runtime::enter : lancer la tâche async depuis un main sync
// 2. Event loop : résultat du worker -> rendu -> entrée clavier
// 3. Restauration du terminal même en cas d'erreur
// ============================================================================

use std::io;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{debug, error, info};

use stockgrid::api::BackendClient;
use stockgrid::app::App;
use stockgrid::config::{Args, Config};
use stockgrid::logging::init_logging;
use stockgrid::ui::{events::action_for, grid, render, Action, Event, EventHandler};

fn main() -> Result<()> {
    let config = Config::from_args(Args::parse())?;

    // Logging avant tout le reste ; en cas d'échec on continue sans logs
    init_logging(&config.log_dir).unwrap_or_else(|e| {
        eprintln!("⚠️  Warning: Failed to initialize logging: {:#}", e);
        eprintln!("   Continuing without logging...");
    });

    info!(base_url = %config.base_url, locale = ?config.locale, "StockGrid starting up");

    let client = BackendClient::new(&config.base_url, config.timeout)?;
    debug!(endpoint = %client.endpoint(), "Backend client ready");

    // CONCEPT : le runtime vit dans main, la boucle UI reste synchrone
    // - enter() permet à App::mount de faire tokio::spawn
    // - le fetch tourne sur les workers du runtime
    let runtime = tokio::runtime::Runtime::new().context("Échec de la création du runtime tokio")?;
    let _guard = runtime.enter();

    let mut terminal = setup_terminal()?;

    let mut app = App::mount(Arc::new(client), config.locale);
    let events = EventHandler::default();

    info!("Starting event loop");
    let result = run(&mut terminal, &mut app, &events);

    app.unmount();

    debug!("Restoring terminal");
    restore_terminal(&mut terminal)?;

    match &result {
        Ok(_) => info!("Application exited normally"),
        Err(e) => error!(error = ?e, "Application exited with error"),
    }

    result
}

// ============================================================================
// Event Loop Principal
// ============================================================================
// À chaque itération :
//   0. récupère le résultat du fetch s'il est arrivé (App::poll)
//   1. borne le défilement puis dessine
//   2. traite le clavier (ou un Tick après 250ms)
// ============================================================================

fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &EventHandler,
) -> Result<()> {
    while app.is_running() {
        if app.poll() {
            info!(
                loading = app.state().is_loading(),
                error = app.state().error().unwrap_or(""),
                stocks = app.state().stocks().len(),
                "View settled"
            );
        }

        let size = terminal.size()?;
        app.clamp_scroll(grid::max_scroll_row(size, app.state().stocks().len()));

        terminal.draw(|frame| render(frame, app))?;

        let event = events.next()?;
        handle_event(app, &event, grid::page_rows(size));
    }

    Ok(())
}

/// Traite un événement et met à jour l'état de l'application
fn handle_event(app: &mut App, event: &Event, page: usize) {
    match action_for(event) {
        Some(Action::Quit) => {
            info!("User quit");
            app.quit();
        }
        Some(Action::ScrollUp) => app.scroll_up(1),
        Some(Action::ScrollDown) => app.scroll_down(1),
        Some(Action::PageUp) => app.scroll_up(page),
        Some(Action::PageDown) => app.scroll_down(page),
        Some(Action::Top) => app.scroll_to_top(),
        None => {}
    }
}

// ============================================================================
// Setup et restauration du terminal
// ============================================================================

/// Configure le terminal en mode TUI (raw mode + alternate screen)
fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode().context("Échec de l'activation du raw mode")?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend).map_err(|e| e.into())
}

/// Restaure le terminal à son état normal
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}
