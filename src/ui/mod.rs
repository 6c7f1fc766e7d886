use crate::app::{App, Panel};
use quantum_clicker::sim::format::format_number;
use quantum_clicker::sim::game::Game;
use quantum_clicker::sim::resources::ResourceKind;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Tabs, Wrap};

pub mod factories_view;
pub mod prestige_view;
pub mod stats_view;
pub mod upgrades_view;

const PANELS: [Panel; 3] = [Panel::Computers, Panel::Upgrades, Panel::Prestige];

pub fn render(frame: &mut Frame, app: &App, game: &Game) {
    let size = frame.size();
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Min(0),
            Constraint::Length(2),
        ])
        .split(size);

    render_header(frame, layout[0], game);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(layout[1]);

    let left = Layout::vertical([Constraint::Length(3), Constraint::Min(0)]).split(columns[0]);
    render_tabs(frame, left[0], app);
    match app.panel() {
        Panel::Computers => factories_view::render(frame, left[1], app, game),
        Panel::Upgrades => upgrades_view::render(frame, left[1], app, game),
        Panel::Prestige => prestige_view::render(frame, left[1], app, game),
    }
    stats_view::render(frame, columns[1], game);

    render_footer(frame, layout[2]);

    if app.confirm_prestige {
        prestige_view::render_confirm(frame, game);
    }
}

fn render_header(frame: &mut Frame, area: Rect, game: &Game) {
    let state = game.state();
    let bits = state.resource(ResourceKind::Bits);
    let qubits = state.resource(ResourceKind::Qubits);

    let mut resources = vec![
        Span::styled(
            "Quantum Clicker",
            Style::default()
                .fg(Color::LightBlue)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  •  Bits: "),
        Span::styled(format_number(bits.amount), Style::default().fg(Color::Yellow)),
        Span::raw(format!(
            " (+{}/s, +{}/click)",
            format_number(bits.per_second * state.prestige_multiplier),
            format_number(bits.per_click)
        )),
    ];
    if state.quantum_unlocked {
        resources.push(Span::raw("  •  Qubits: "));
        resources.push(Span::styled(
            format_number(qubits.amount),
            Style::default().fg(Color::Magenta),
        ));
        resources.push(Span::raw(format!(
            " (+{}/s, +{}/click)",
            format_number(qubits.per_second * state.prestige_multiplier),
            format_number(qubits.per_click)
        )));
    }

    let lines = vec![
        Line::from(resources),
        Line::from(vec![
            Span::raw("Prestige points: "),
            Span::styled(
                state.prestige_points.to_string(),
                Style::default().fg(Color::Cyan),
            ),
            Span::raw(format!(
                "  •  multiplier x{:.2}  •  next tick {:.0}%",
                state.prestige_multiplier,
                game.tick_progress() * 100.0
            )),
        ]),
    ];

    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(paragraph, area);
}

fn render_tabs(frame: &mut Frame, area: Rect, app: &App) {
    let titles: Vec<&str> = PANELS.iter().map(|panel| panel.title()).collect();
    let selected = PANELS
        .iter()
        .position(|panel| *panel == app.panel())
        .unwrap_or(0);
    let tabs = Tabs::new(titles)
        .select(selected)
        .block(Block::default().borders(Borders::ALL))
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        );
    frame.render_widget(tabs, area);
}

fn render_footer(frame: &mut Frame, area: Rect) {
    let instructions = Paragraph::new(Line::from(vec![
        Span::raw("Hotkeys: "),
        Span::styled("[Space]", Style::default().fg(Color::Yellow)),
        Span::raw(" click  •  "),
        Span::styled("[J/K]", Style::default().fg(Color::Yellow)),
        Span::raw(" navigate  •  "),
        Span::styled("[Tab]", Style::default().fg(Color::Yellow)),
        Span::raw(" switch panel  •  "),
        Span::styled("[+/-]", Style::default().fg(Color::Yellow)),
        Span::raw(" quantity  •  "),
        Span::styled("[Enter]", Style::default().fg(Color::Yellow)),
        Span::raw(" buy  •  "),
        Span::styled("[P]", Style::default().fg(Color::Yellow)),
        Span::raw(" prestige  •  "),
        Span::styled("[Q]", Style::default().fg(Color::Yellow)),
        Span::raw(" save & quit"),
    ]))
    .wrap(Wrap { trim: true })
    .block(Block::default().borders(Borders::TOP));
    frame.render_widget(instructions, area);
}
