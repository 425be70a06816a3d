use ratatui::prelude::*;
use ratatui::widgets::*;

use super::{centered, choice_line, panel, ACCENT, DIM};
use crate::app::PauseItem;
use crate::physics::{Arena, Ball, PlayerBox};
use crate::session::SessionContext;

const FIELD_BG: Color = Color::Rgb(5, 5, 15);

const BALL_COLORS: [Color; 9] = [
    Color::Rgb(255, 80, 80),
    Color::Rgb(80, 255, 80),
    Color::Rgb(80, 80, 255),
    Color::Rgb(255, 255, 80),
    Color::Rgb(255, 80, 255),
    Color::Rgb(80, 255, 255),
    Color::Rgb(255, 160, 80),
    Color::Rgb(200, 200, 200),
    Color::Rgb(160, 120, 255),
];

/// Arena coordinates of the centre of cell (cx, cy) in a `w`×`h` grid.
fn cell_center(arena: Arena, cx: usize, cy: usize, w: usize, h: usize) -> (f32, f32) {
    let ax = (cx as f32 + 0.5) * arena.width as f32 / w as f32;
    let ay = (cy as f32 + 0.5) * arena.height as f32 / h as f32;
    (ax, ay)
}

fn to_cell(arena: Arena, x: i32, y: i32, w: usize, h: usize) -> (usize, usize) {
    let cx = (x.max(0) as f32 * w as f32 / arena.width as f32) as usize;
    let cy = (y.max(0) as f32 * h as f32 / arena.height as f32) as usize;
    (cx.min(w - 1), cy.min(h - 1))
}

fn draw_player(grid: &mut [Vec<(char, Style)>], arena: Arena, player: &PlayerBox, glyph: char) {
    let h = grid.len();
    let w = grid[0].len();
    let (x0, y0) = to_cell(arena, player.x, player.y, w, h);
    let (x1, y1) = to_cell(arena, player.x + player.w - 1, player.y + player.h - 1, w, h);
    let style = Style::default()
        .fg(Color::Rgb(255, 255, 255))
        .bg(Color::Rgb(40, 110, 200))
        .add_modifier(Modifier::BOLD);
    for row in grid.iter_mut().take(y1 + 1).skip(y0) {
        for cell in row.iter_mut().take(x1 + 1).skip(x0) {
            *cell = (' ', style);
        }
    }
    grid[(y0 + y1) / 2][(x0 + x1) / 2] = (glyph, style);
}

fn draw_ball(grid: &mut [Vec<(char, Style)>], arena: Arena, ball: &Ball, radius: i32, color: Color) {
    let h = grid.len();
    let w = grid[0].len();
    let style = Style::default().fg(color).bg(FIELD_BG).add_modifier(Modifier::BOLD);
    let (x0, y0) = to_cell(arena, ball.x - radius, ball.y - radius, w, h);
    let (x1, y1) = to_cell(arena, ball.x + radius, ball.y + radius, w, h);
    let r2 = (radius * radius) as f32;
    let mut drawn = false;

    for cy in y0..=y1 {
        for cx in x0..=x1 {
            let (ax, ay) = cell_center(arena, cx, cy, w, h);
            let dx = ax - ball.x as f32;
            let dy = ay - ball.y as f32;
            if dx * dx + dy * dy <= r2 {
                grid[cy][cx] = ('●', style);
                drawn = true;
            }
        }
    }
    // Cells can be larger than the ball on small terminals
    if !drawn {
        let (cx, cy) = to_cell(arena, ball.x, ball.y, w, h);
        grid[cy][cx] = ('●', style);
    }
}

fn render_field(session: &SessionContext, width: usize, height: usize) -> Vec<Line<'static>> {
    let arena = session.rules.arena;
    let mut grid: Vec<Vec<(char, Style)>> =
        vec![vec![(' ', Style::default().bg(FIELD_BG)); width]; height];

    draw_player(&mut grid, arena, &session.player, session.character.glyph());
    for (i, ball) in session.balls.active().iter().enumerate() {
        let color = BALL_COLORS[i % BALL_COLORS.len()];
        draw_ball(&mut grid, arena, ball, session.rules.ball_radius, color);
    }

    grid.into_iter()
        .map(|row| {
            let spans: Vec<Span<'static>> = row
                .into_iter()
                .map(|(ch, style)| Span::styled(String::from(ch), style))
                .collect();
            Line::from(spans)
        })
        .collect()
}

pub fn render_playing(frame: &mut Frame, area: Rect, session: &SessionContext) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Rgb(80, 150, 220)))
        .title(" ● Dodgeball ")
        .title_style(Style::default().fg(Color::Rgb(100, 180, 255)).add_modifier(Modifier::BOLD));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(4),
            Constraint::Length(1),
        ])
        .split(inner);

    let status = Line::from(vec![
        Span::styled(
            format!(" Time: {} s ", session.clock.seconds()),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ),
        Span::styled(" │ ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            format!("{} ", session.difficulty.title()),
            Style::default().fg(Color::Cyan),
        ),
        Span::styled(" │ ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            format!("Balls: {} ", session.balls.len()),
            Style::default().fg(Color::Rgb(255, 120, 120)),
        ),
        Span::styled(" │ ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            session.character.name(),
            Style::default().fg(Color::Rgb(150, 200, 255)),
        ),
    ]);
    frame.render_widget(Paragraph::new(status), chunks[0]);

    let fw = chunks[1].width as usize;
    let fh = chunks[1].height as usize;
    if fw > 0 && fh > 0 {
        let lines = render_field(session, fw, fh);
        frame.render_widget(Paragraph::new(lines), chunks[1]);
    }

    let help = Paragraph::new(Line::from(vec![
        Span::styled(" ←↑↓→ Move ", Style::default().fg(Color::DarkGray)),
        Span::styled("│ ", Style::default().fg(Color::Rgb(60, 60, 60))),
        Span::styled("Esc Pause ", Style::default().fg(Color::DarkGray)),
        Span::styled("│ ", Style::default().fg(Color::Rgb(60, 60, 60))),
        Span::styled("q Quit", Style::default().fg(Color::DarkGray)),
    ]));
    frame.render_widget(help, chunks[2]);
}

pub fn render_pause_overlay(frame: &mut Frame, area: Rect, cursor: PauseItem) {
    let inner = panel(frame, centered(area, 30, 9), "⏸ Paused", ACCENT);
    let lines = vec![
        Line::from(""),
        choice_line(PauseItem::Resume.label(), cursor == PauseItem::Resume),
        Line::from(""),
        choice_line(PauseItem::Quit.label(), cursor == PauseItem::Quit),
        Line::from(""),
        Line::from(Span::styled("  Esc to resume", Style::default().fg(DIM))),
    ];
    frame.render_widget(Paragraph::new(lines), inner);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::characters::Character;
    use crate::difficulty::Difficulty;
    use crate::session::Rules;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_field_has_requested_size_and_shows_everything() {
        let mut rng = StdRng::seed_from_u64(3);
        let session =
            SessionContext::start(Difficulty::Easy, Character::default(), Rules::default(), &mut rng);
        let lines = render_field(&session, 80, 30);
        assert_eq!(lines.len(), 30);
        assert!(lines.iter().all(|l| l.spans.len() == 80));

        let text: String = lines
            .iter()
            .flat_map(|l| l.spans.iter().map(|s| s.content.to_string()))
            .collect();
        assert!(text.contains('●'));
        assert!(text.contains('P'));
    }

    #[test]
    fn test_tiny_field_still_draws_balls() {
        let mut rng = StdRng::seed_from_u64(3);
        let session =
            SessionContext::start(Difficulty::Hard, Character::default(), Rules::default(), &mut rng);
        let lines = render_field(&session, 4, 3);
        assert_eq!(lines.len(), 3);
    }
}
