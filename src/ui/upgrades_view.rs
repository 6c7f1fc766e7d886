use crate::app::App;
use quantum_clicker::sim::format::format_number;
use quantum_clicker::sim::game::Game;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap};

pub fn render(frame: &mut Frame, area: Rect, app: &App, game: &Game) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title("Upgrades");
    let upgrades = game.state().visible_upgrades();

    if upgrades.is_empty() {
        let empty = Paragraph::new("Nothing to install yet. Keep computing.")
            .wrap(Wrap { trim: true })
            .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = upgrades
        .iter()
        .map(|upgrade| {
            let affordable = game.can_afford_upgrade(&upgrade.id);
            let name_style = Style::default()
                .fg(if affordable {
                    Color::Yellow
                } else {
                    Color::DarkGray
                })
                .add_modifier(Modifier::BOLD);
            let line = Line::from(vec![
                Span::styled(upgrade.name.clone(), name_style),
                Span::raw(format!(
                    "  [{} {}]",
                    format_number(upgrade.cost),
                    upgrade.cost_resource
                )),
            ]);
            ListItem::new(vec![line, Line::from(upgrade.overview.clone())])
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_symbol("▶ ")
        .highlight_style(Style::default().bg(Color::DarkGray).fg(Color::White));
    let mut state = ListState::default();
    state.select(Some(app.selected_upgrade.min(upgrades.len() - 1)));
    frame.render_stateful_widget(list, area, &mut state);
}
