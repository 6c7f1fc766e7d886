mod app;
mod ui;

use anyhow::Result;
use app::{App, Panel};
use chrono::Utc;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use crossterm::{execute, terminal};
use quantum_clicker::config::load_config_from_env;
use quantum_clicker::persist::RonFileStore;
use quantum_clicker::sim::format::{format_duration, format_number};
use quantum_clicker::sim::game::Game;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use std::fs::OpenOptions;
use std::io;
use std::sync::Mutex;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tokio::task;
use tracing_subscriber::EnvFilter;

const LOG_FILE: &str = "quantum_clicker.log";

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing()?;

    let config = load_config_from_env();
    let store = RonFileStore::new(config.save_path.clone());
    let mut game = Game::load(config, Box::new(store))?;
    let report = game.resume(Utc::now());
    if report.time_away > Duration::ZERO && report.bits + report.qubits <= 0.0 {
        game.add_message(format!(
            "Away for {}. Nothing was running.",
            format_duration(report.time_away)
        ));
    }

    let mut terminal = setup_terminal()?;
    let result = run(&mut terminal, &mut game).await;
    restore_terminal(&mut terminal)?;

    game.mark_active(Utc::now());
    game.save()?;
    result
}

fn init_tracing() -> Result<()> {
    let file = OpenOptions::new().create(true).append(true).open(LOG_FILE)?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .compact()
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

async fn run(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, game: &mut Game) -> Result<()> {
    let mut app = App::new();
    clamp_selections(&mut app, game);

    let (input_tx, mut input_rx) = mpsc::unbounded_channel();
    task::spawn(async move {
        loop {
            match task::spawn_blocking(crossterm::event::read).await {
                Ok(Ok(event)) => {
                    if input_tx.send(event).is_err() {
                        break;
                    }
                }
                Ok(Err(_)) => break,
                Err(_) => break,
            }
        }
    });

    let mut last_tick = Instant::now();
    let frame_rate = Duration::from_millis(100);
    let mut should_quit = false;

    loop {
        terminal.draw(|f| ui::render(f, &app, game))?;
        if should_quit {
            break;
        }

        let timeout = frame_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));
        tokio::select! {
            Some(event) = input_rx.recv() => {
                if handle_event(event, &mut app, game) {
                    should_quit = true;
                }
                clamp_selections(&mut app, game);
            }
            _ = tokio::time::sleep(timeout) => {
                let delta = last_tick.elapsed();
                last_tick = Instant::now();
                game.mark_active(Utc::now());
                game.update(delta);
                clamp_selections(&mut app, game);
            }
        }
    }

    Ok(())
}

fn clamp_selections(app: &mut App, game: &Game) {
    let state = game.state();
    app.clamp_selections(
        state.visible_factories().len(),
        state.visible_upgrades().len(),
        state.prestige_upgrades.len(),
    );
}

fn handle_event(event: Event, app: &mut App, game: &mut Game) -> bool {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => handle_key_event(key, app, game),
        _ => false,
    }
}

fn handle_key_event(key: KeyEvent, app: &mut App, game: &mut Game) -> bool {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return true;
    }

    if app.confirm_prestige {
        app.confirm_prestige = false;
        if matches!(key.code, KeyCode::Char('y') | KeyCode::Char('Y')) {
            let summary = game.perform_prestige();
            app.clamp_selections(0, 0, 0);
            if summary.points_gained == 0 {
                game.add_message("Rebooted without earning prestige points.");
            }
        } else {
            game.add_message("Prestige cancelled.");
        }
        return false;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') => return true,
        KeyCode::Char(' ') | KeyCode::Char('c') | KeyCode::Char('C') => game.click(),
        KeyCode::Tab | KeyCode::Right => app.next_panel(),
        KeyCode::BackTab | KeyCode::Left => app.previous_panel(),
        KeyCode::Up | KeyCode::Char('k') | KeyCode::Char('K') => {
            let len = panel_len(app.panel(), game);
            app.move_selection(-1, len);
        }
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('J') => {
            let len = panel_len(app.panel(), game);
            app.move_selection(1, len);
        }
        KeyCode::Char('+') | KeyCode::Char('=') => app.raise_quantity(),
        KeyCode::Char('-') | KeyCode::Char('_') => app.lower_quantity(),
        KeyCode::Enter => handle_enter(app, game),
        KeyCode::Char('p') | KeyCode::Char('P') => {
            app.confirm_prestige = true;
            game.add_message(format!(
                "Prestige now for {} points? [Y] to confirm.",
                format_number(game.available_prestige_points() as f64)
            ));
        }
        _ => {}
    }
    false
}

fn panel_len(panel: Panel, game: &Game) -> usize {
    let state = game.state();
    match panel {
        Panel::Computers => state.visible_factories().len(),
        Panel::Upgrades => state.visible_upgrades().len(),
        Panel::Prestige => state.prestige_upgrades.len(),
    }
}

fn selected_id(app: &App, game: &Game) -> Option<String> {
    let state = game.state();
    match app.panel() {
        Panel::Computers => state
            .visible_factories()
            .get(app.selected_factory)
            .map(|factory| factory.id.clone()),
        Panel::Upgrades => state
            .visible_upgrades()
            .get(app.selected_upgrade)
            .map(|upgrade| upgrade.id.clone()),
        Panel::Prestige => state
            .prestige_upgrades
            .get(app.selected_prestige)
            .map(|upgrade| upgrade.id.clone()),
    }
}

fn handle_enter(app: &App, game: &mut Game) {
    let Some(id) = selected_id(app, game) else {
        if app.panel() == Panel::Upgrades {
            game.add_message("No upgrades available yet.");
        }
        return;
    };
    let result = match app.panel() {
        Panel::Computers => game.buy_factory(&id, app.quantity()),
        Panel::Upgrades => game.buy_upgrade(&id),
        Panel::Prestige => game.buy_prestige_upgrade(&id),
    };
    if let Err(err) = result {
        game.add_message(format!("Purchase failed: {err}"));
    }
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, terminal::EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    Ok(Terminal::new(backend)?)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), terminal::LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}
