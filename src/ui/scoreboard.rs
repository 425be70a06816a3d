use ratatui::prelude::*;
use ratatui::widgets::*;

use super::{centered, hints, panel, ACCENT, DIM, KEY};
use crate::app::{GameOver, Scoreboard};
use crate::difficulty::Difficulty;
use crate::scores::{MAX_NAME_LEN, TOP_SCORES};

const MEDAL_COLORS: [Color; 3] = [
    Color::Rgb(255, 215, 0),   // Gold
    Color::Rgb(192, 192, 192), // Silver
    Color::Rgb(205, 127, 50),  // Bronze
];

pub fn render_scoreboard(frame: &mut Frame, area: Rect, board: &Scoreboard) {
    let outer = centered(area, 50, TOP_SCORES as u16 + 10);
    let inner = panel(frame, outer, "🏆 Scoreboard", Color::Rgb(255, 200, 80));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(TOP_SCORES as u16 + 1),
            Constraint::Length(1),
        ])
        .split(inner);

    let titles: Vec<Line> = Difficulty::all()
        .iter()
        .map(|d| Line::from(format!(" {} ", d.title())))
        .collect();
    let tabs = Tabs::new(titles)
        .select(board.difficulty.index())
        .style(Style::default().fg(Color::Rgb(120, 120, 140)))
        .highlight_style(Style::default().fg(ACCENT).add_modifier(Modifier::BOLD))
        .divider(Span::styled(" │ ", Style::default().fg(Color::Rgb(60, 60, 80))));
    frame.render_widget(tabs, chunks[0]);

    let mut lines: Vec<Line> = Vec::new();
    if let Some(error) = &board.error {
        lines.push(Line::from(Span::styled(
            format!("  {error}"),
            Style::default().fg(Color::Rgb(230, 80, 80)),
        )));
        lines.push(Line::from(""));
    }

    // Pad to a full table so the layout doesn't jump between tiers
    for rank in 0..TOP_SCORES {
        let line = match board.entries.get(rank) {
            Some(entry) => {
                let color = MEDAL_COLORS.get(rank).copied().unwrap_or(Color::Rgb(200, 200, 220));
                Line::from(vec![
                    Span::styled(format!("  {:>2}. ", rank + 1), Style::default().fg(DIM)),
                    Span::styled(
                        format!("{:<20} ", truncate(&entry.name, 20)),
                        Style::default().fg(Color::Rgb(200, 200, 220)),
                    ),
                    Span::styled(
                        format!("{:>6} s", entry.seconds),
                        Style::default().fg(color).add_modifier(Modifier::BOLD),
                    ),
                ])
            }
            None => Line::from(Span::styled(
                format!("  {:>2}. ---", rank + 1),
                Style::default().fg(Color::Rgb(60, 60, 80)),
            )),
        };
        lines.push(line);
    }
    frame.render_widget(Paragraph::new(lines), chunks[1]);

    frame.render_widget(
        Paragraph::new(hints(&[("←→", "difficulty"), ("Esc", "menu")])),
        chunks[2],
    );
}

fn truncate(name: &str, max: usize) -> String {
    if name.chars().count() <= max {
        name.to_string()
    } else {
        let mut short: String = name.chars().take(max - 1).collect();
        short.push('…');
        short
    }
}

pub fn render_game_over(frame: &mut Frame, area: Rect, over: &GameOver) {
    let inner = panel(frame, centered(area, 60, 15), "💀 Game over", Color::Rgb(230, 80, 80));

    // Show the tail of long names so the cursor stays visible
    let shown: String = {
        let count = over.name.chars().count();
        over.name.chars().skip(count.saturating_sub(40)).collect()
    };

    let mut lines = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled("  You lasted ", Style::default().fg(Color::Rgb(180, 180, 200))),
            Span::styled(
                format!("{} s", over.elapsed.as_secs()),
                Style::default().fg(MEDAL_COLORS[0]).add_modifier(Modifier::BOLD),
            ),
            Span::styled(" on ", Style::default().fg(Color::Rgb(180, 180, 200))),
            Span::styled(over.difficulty.title(), Style::default().fg(KEY).add_modifier(Modifier::BOLD)),
            Span::styled(format!(" as {}", over.character.name()), Style::default().fg(DIM)),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            format!("  Enter your name (letters, up to {MAX_NAME_LEN}):"),
            Style::default().fg(Color::Rgb(180, 180, 200)),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("    [ ", Style::default().fg(DIM)),
            Span::styled(
                format!("{shown}_"),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            ),
            Span::styled(" ]", Style::default().fg(DIM)),
        ]),
        Line::from(""),
    ];
    if let Some(message) = &over.message {
        lines.push(Line::from(Span::styled(
            format!("  {message}"),
            Style::default().fg(Color::Rgb(255, 140, 80)),
        )));
        lines.push(Line::from(""));
    }
    lines.push(hints(&[("Enter", "save"), ("Esc", "skip")]));

    frame.render_widget(Paragraph::new(lines), inner);
}
