use crate::app::App;
use quantum_clicker::sim::format::format_number;
use quantum_clicker::sim::game::Game;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, List, ListItem, ListState};

pub fn render(frame: &mut Frame, area: Rect, app: &App, game: &Game) {
    let quantity = app.quantity();
    let factories = game.state().visible_factories();

    let items: Vec<ListItem> = factories
        .iter()
        .map(|factory| {
            let total = game
                .factory_total_cost(&factory.id, quantity)
                .unwrap_or(factory.cost);
            let affordable = game.can_afford_factory(&factory.id, quantity);
            let name_style = Style::default()
                .fg(if affordable {
                    Color::Yellow
                } else {
                    Color::DarkGray
                })
                .add_modifier(Modifier::BOLD);
            let header = Line::from(vec![
                Span::styled(factory.name.clone(), name_style),
                Span::raw(format!("  x{}", factory.count)),
                Span::raw(format!(
                    "  [{} {} for {quantity}]",
                    format_number(total),
                    factory.cost_resource
                )),
            ]);
            let detail = Line::from(Span::styled(
                factory.overview.clone(),
                Style::default().fg(Color::Gray),
            ));
            ListItem::new(vec![header, detail])
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(format!("Computers (buy x{quantity})")),
        )
        .highlight_symbol("▶ ")
        .highlight_style(Style::default().bg(Color::DarkGray).fg(Color::White));
    let mut state = ListState::default();
    if !factories.is_empty() {
        state.select(Some(app.selected_factory.min(factories.len() - 1)));
    }
    frame.render_stateful_widget(list, area, &mut state);
}
