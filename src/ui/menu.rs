use ratatui::prelude::*;
use ratatui::widgets::*;

use super::{centered, choice_line, hints, panel, ACCENT, DIM, KEY};
use crate::app::MenuItem;
use crate::characters::{Character, PER_ROW, ROSTER};
use crate::difficulty::Difficulty;

const BANNER: &str = r#"
 ╔══════════════════════════════════════════╗
 ║   ●   D O D G E B A L L   ●              ║
 ║        survive the bouncing balls        ║
 ╚══════════════════════════════════════════╝"#;

fn tier_color(difficulty: Difficulty) -> Color {
    match difficulty {
        Difficulty::Easy => Color::Rgb(80, 220, 80),
        Difficulty::Medium => Color::Rgb(255, 170, 60),
        Difficulty::Hard => Color::Rgb(230, 70, 70),
    }
}

pub fn render_menu(frame: &mut Frame, area: Rect, cursor: MenuItem) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6),
            Constraint::Min(5),
            Constraint::Length(1),
        ])
        .split(area);

    let banner = Paragraph::new(BANNER)
        .style(Style::default().fg(Color::Rgb(200, 120, 255)).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center);
    frame.render_widget(banner, chunks[0]);

    let mut lines = vec![Line::from("")];
    for item in MenuItem::all() {
        lines.push(choice_line(item.label(), *item == cursor));
        lines.push(Line::from(""));
    }
    let inner = panel(frame, centered(chunks[1], 30, 9), "Menu", Color::Rgb(60, 150, 200));
    frame.render_widget(Paragraph::new(lines), inner);

    let footer = Paragraph::new(hints(&[("↑↓", "choose"), ("Enter", "select"), ("q", "quit")]))
        .alignment(Alignment::Center);
    frame.render_widget(footer, chunks[2]);
}

pub fn render_character_select(frame: &mut Frame, area: Rect, cursor: usize) {
    let rows = ROSTER.len().div_ceil(PER_ROW);
    let outer = centered(area, 68, rows as u16 * 2 + 6);
    let inner = panel(frame, outer, "Choose your character", Color::Rgb(60, 150, 200));

    let mut lines = vec![Line::from("")];
    for row in 0..rows {
        let mut spans = vec![Span::raw("  ")];
        for col in 0..PER_ROW {
            let idx = row * PER_ROW + col;
            let Some(name) = ROSTER.get(idx) else { break };
            let cell = format!(" {name:<12}");
            let style = if idx == cursor {
                Style::default().fg(Color::Black).bg(ACCENT).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Rgb(180, 180, 200))
            };
            spans.push(Span::styled(cell, style));
            spans.push(Span::raw("  "));
        }
        lines.push(Line::from(spans));
        lines.push(Line::from(""));
    }
    lines.push(hints(&[("←↑↓→", "browse"), ("Enter", "continue"), ("Esc", "back")]));
    frame.render_widget(Paragraph::new(lines), inner);
}

pub fn render_difficulty_select(
    frame: &mut Frame,
    area: Rect,
    character: Character,
    cursor: Difficulty,
) {
    let inner = panel(frame, centered(area, 48, 14), "Choose a difficulty", Color::Rgb(60, 150, 200));

    let mut lines = vec![
        Line::from(vec![
            Span::styled("  Playing as ", Style::default().fg(DIM)),
            Span::styled(character.name(), Style::default().fg(KEY).add_modifier(Modifier::BOLD)),
        ]),
        Line::from(""),
    ];
    for &tier in Difficulty::all() {
        let mut line = choice_line(tier.title(), tier == cursor);
        line.spans.push(Span::styled(
            format!("   {} balls, speed {}", tier.ball_count(), tier.ball_speed()),
            Style::default().fg(tier_color(tier)),
        ));
        lines.push(line);
        lines.push(Line::from(""));
    }
    lines.push(hints(&[("↑↓", "choose"), ("Enter", "select"), ("Esc", "back")]));
    frame.render_widget(Paragraph::new(lines), inner);
}

pub fn render_tutorial(frame: &mut Frame, area: Rect, character: Character, difficulty: Difficulty) {
    let inner = panel(frame, centered(area, 56, 16), "How to play", Color::Rgb(60, 150, 200));

    let key = |k: &'static str| Span::styled(format!("    {k:<12}"), Style::default().fg(KEY));
    let what = |w: &'static str| Span::styled(w, Style::default().fg(Color::Rgb(140, 140, 140)));

    let lines = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled("  Dodge every ball for as long as you can.", Style::default().fg(Color::White)),
        ]),
        Line::from(vec![
            Span::styled("  One touch and the run is over.", Style::default().fg(Color::White)),
        ]),
        Line::from(""),
        Line::from(vec![key("↑ ↓ ← →"), what("Move")]),
        Line::from(vec![key("Esc / P"), what("Pause")]),
        Line::from(vec![key("q"), what("Quit")]),
        Line::from(""),
        Line::from(vec![
            Span::styled("  ", Style::default()),
            Span::styled(character.name(), Style::default().fg(KEY).add_modifier(Modifier::BOLD)),
            Span::styled(" on ", Style::default().fg(DIM)),
            Span::styled(
                difficulty.title(),
                Style::default().fg(tier_color(difficulty)).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!(" ({} balls)", difficulty.ball_count()),
                Style::default().fg(DIM),
            ),
        ]),
        Line::from(""),
        hints(&[("Enter", "start"), ("Esc", "back")]),
    ];
    frame.render_widget(Paragraph::new(lines), inner);
}
