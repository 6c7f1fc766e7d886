use quantum_clicker::sim::format::format_number;
use quantum_clicker::sim::game::Game;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph, Wrap};

pub fn render(frame: &mut Frame, area: Rect, game: &Game) {
    let sections = Layout::vertical([
        Constraint::Length(7),
        Constraint::Min(4),
        Constraint::Length(10),
    ])
    .split(area);

    let state = game.state();
    let unlocked = state.achievements.iter().filter(|a| a.is_unlocked).count();
    let stats_lines = vec![
        Line::from(vec![
            Span::styled("Bits earned", Style::default().fg(Color::Yellow)),
            Span::raw(format!(": {}", format_number(state.total_bits_earned))),
        ]),
        Line::from(vec![
            Span::styled("Qubits earned", Style::default().fg(Color::Magenta)),
            Span::raw(format!(": {}", format_number(state.total_qubits_earned))),
        ]),
        Line::from(format!(
            "Computers owned: {}  •  grid x{:.2}",
            state.total_factory_count(),
            state.factory_efficiency_multiplier
        )),
        Line::from(format!(
            "Prestiged {} times  •  achievements {unlocked}/{}",
            state.times_prestiged,
            state.achievements.len()
        )),
    ];
    let stats = Paragraph::new(stats_lines)
        .wrap(Wrap { trim: true })
        .block(Block::default().title("Stats").borders(Borders::ALL));
    frame.render_widget(stats, sections[0]);

    let mut achievements: Vec<_> = state.achievements.iter().collect();
    achievements.sort_by_key(|a| a.order);
    let items: Vec<ListItem> = achievements
        .iter()
        .map(|achievement| {
            let (mark, style) = if achievement.is_unlocked {
                ("✓", Style::default().fg(Color::LightGreen))
            } else {
                ("·", Style::default().fg(Color::DarkGray))
            };
            ListItem::new(Line::from(vec![
                Span::styled(format!("{mark} {}", achievement.title), style),
                Span::styled(
                    format!("  {}", achievement.overview),
                    Style::default().fg(Color::Gray),
                ),
            ]))
        })
        .collect();
    frame.render_widget(
        List::new(items).block(Block::default().title("Achievements").borders(Borders::ALL)),
        sections[1],
    );

    let log_block = Block::default().title("Event Log").borders(Borders::ALL);
    let log_area = log_block.inner(sections[2]);
    frame.render_widget(log_block, sections[2]);

    let mut items: Vec<ListItem> = game
        .messages()
        .map(|msg| ListItem::new(msg.clone()))
        .collect();
    if items.is_empty() {
        items.push(ListItem::new("No events yet. Start clicking."));
    }
    frame.render_widget(List::new(items), log_area);
}
