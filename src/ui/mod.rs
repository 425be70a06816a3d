pub mod arena;
pub mod menu;
pub mod scoreboard;

use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::app::{App, Screen};

pub const ACCENT: Color = Color::Rgb(255, 220, 80);
pub const DIM: Color = Color::Rgb(100, 100, 130);
pub const KEY: Color = Color::Rgb(80, 200, 255);
pub const PANEL_BG: Color = Color::Rgb(15, 15, 25);

pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();
    match &app.screen {
        Screen::Menu { cursor } => menu::render_menu(frame, area, *cursor),
        Screen::CharacterSelect { cursor } => menu::render_character_select(frame, area, *cursor),
        Screen::DifficultySelect { character, cursor } => {
            menu::render_difficulty_select(frame, area, *character, *cursor)
        }
        Screen::Tutorial {
            character,
            difficulty,
        } => menu::render_tutorial(frame, area, *character, *difficulty),
        Screen::Playing(session) => arena::render_playing(frame, area, session),
        Screen::Paused { session, cursor } => {
            arena::render_playing(frame, area, session);
            arena::render_pause_overlay(frame, area, *cursor);
        }
        Screen::GameOver(over) => scoreboard::render_game_over(frame, area, over),
        Screen::Scoreboard(board) => scoreboard::render_scoreboard(frame, area, board),
    }
}

/// A `w`×`h` rectangle centred in `area`, shrunk to fit.
pub fn centered(area: Rect, w: u16, h: u16) -> Rect {
    let w = w.min(area.width.saturating_sub(2));
    let h = h.min(area.height.saturating_sub(2));
    let x = area.x + area.width.saturating_sub(w) / 2;
    let y = area.y + area.height.saturating_sub(h) / 2;
    Rect::new(x, y, w, h)
}

/// Bordered panel with a title; returns the inner area.
pub fn panel(frame: &mut Frame, area: Rect, title: &str, color: Color) -> Rect {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(color))
        .title(format!(" {title} "))
        .title_style(Style::default().fg(ACCENT).add_modifier(Modifier::BOLD))
        .style(Style::default().bg(PANEL_BG));
    let inner = block.inner(area);
    frame.render_widget(Clear, area);
    frame.render_widget(block, area);
    inner
}

/// One line of a cursor-driven list.
pub fn choice_line(label: &str, selected: bool) -> Line<'static> {
    if selected {
        Line::from(vec![
            Span::styled("▶ ", Style::default().fg(ACCENT)),
            Span::styled(
                label.to_string(),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            ),
        ])
    } else {
        Line::from(Span::styled(format!("  {label}"), Style::default().fg(DIM)))
    }
}

/// Footer of key hints, e.g. `[("Enter", "select"), ("Esc", "back")]`.
pub fn hints(pairs: &[(&str, &str)]) -> Line<'static> {
    let mut spans = Vec::new();
    for (i, (key, what)) in pairs.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled("  │  ", Style::default().fg(Color::Rgb(60, 60, 80))));
        }
        spans.push(Span::styled(
            key.to_string(),
            Style::default().fg(KEY).add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::styled(format!(" {what}"), Style::default().fg(DIM)));
    }
    Line::from(spans)
}
