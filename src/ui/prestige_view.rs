use crate::app::App;
use quantum_clicker::sim::format::format_number;
use quantum_clicker::sim::game::Game;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap};

pub fn render(frame: &mut Frame, area: Rect, app: &App, game: &Game) {
    let state = game.state();
    let sections = Layout::vertical([Constraint::Length(5), Constraint::Min(3)]).split(area);

    let summary = vec![
        Line::from(vec![
            Span::raw("Lifetime Qubits: "),
            Span::styled(
                format_number(state.total_qubits_earned),
                Style::default().fg(Color::Magenta),
            ),
            Span::raw(format!(
                "  •  1 point per {} Qubits",
                format_number(game.prestige_threshold())
            )),
        ]),
        Line::from(vec![
            Span::raw("Prestige now for "),
            Span::styled(
                game.available_prestige_points().to_string(),
                Style::default().fg(Color::Cyan),
            ),
            Span::raw(" points. Press [P] to reset."),
        ]),
    ];
    let paragraph = Paragraph::new(summary)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title("Prestige"));
    frame.render_widget(paragraph, sections[0]);

    let items: Vec<ListItem> = state
        .prestige_upgrades
        .iter()
        .map(|upgrade| {
            let (tag, color) = if upgrade.bought {
                ("  [OWNED]".to_string(), Color::Green)
            } else if game.can_buy_prestige_upgrade(&upgrade.id) {
                (format!("  [{} pts]", upgrade.cost), Color::Yellow)
            } else {
                (format!("  [{} pts]", upgrade.cost), Color::DarkGray)
            };
            let line = Line::from(vec![
                Span::styled(
                    upgrade.name.clone(),
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                ),
                Span::raw(tag),
            ]);
            ListItem::new(vec![line, Line::from(upgrade.overview.clone())])
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title("Prestige Upgrades"),
        )
        .highlight_symbol("▶ ")
        .highlight_style(Style::default().bg(Color::DarkGray).fg(Color::White));
    let mut list_state = ListState::default();
    if !state.prestige_upgrades.is_empty() {
        list_state.select(Some(
            app.selected_prestige.min(state.prestige_upgrades.len() - 1),
        ));
    }
    frame.render_stateful_widget(list, sections[1], &mut list_state);
}

pub fn render_confirm(frame: &mut Frame, game: &Game) {
    let area = centered_rect(50, 30, frame.size());
    frame.render_widget(Clear, area);
    let points = game.available_prestige_points();
    let lines = vec![
        Line::from(Span::styled(
            format!("Reset for {points} prestige points?"),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from("Resources, computers and upgrades start over."),
        Line::from("Prestige upgrades and achievements are kept."),
        Line::from(""),
        Line::from("[Y] confirm  •  any other key cancels"),
    ];
    let popup = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(Block::default().title("Prestige").borders(Borders::ALL));
    frame.render_widget(popup, area);
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
