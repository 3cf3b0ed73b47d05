//! Maze viewport rendering.
//!
//! Each grid cell takes two terminal columns. Only cells that are
//! currently glowing are drawn; everything else stays dark.

use crate::app::App;
use crate::maze::{Cell, Position};
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use super::arrow_for_bearing;

/// Floor tint per level, index 0 = level 1.
const LEVEL_FLOOR_COLORS: [(u8, u8, u8); 10] = [
    (200, 190, 170),
    (185, 170, 150),
    (160, 200, 180),
    (200, 160, 200),
    (220, 200, 140),
    (140, 180, 220),
    (200, 120, 100),
    (120, 200, 160),
    (180, 140, 200),
    (210, 210, 150),
];

const WALL_COLOR: Color = Color::Rgb(70, 70, 85);
const PLAYER_COLOR: Color = Color::Rgb(80, 200, 120);
const EXIT_COLOR: Color = Color::Rgb(220, 60, 60);
const ARROW_COLOR: Color = Color::Rgb(220, 40, 40);

fn floor_color(level: u32) -> Color {
    let (r, g, b) = level
        .checked_sub(1)
        .and_then(|i| LEVEL_FLOOR_COLORS.get(i as usize))
        .copied()
        .unwrap_or(LEVEL_FLOOR_COLORS[0]);
    Color::Rgb(r, g, b)
}

/// First visible index along one axis, keeping `focus` centred where the
/// grid allows.
fn viewport_start(focus: usize, view: usize, total: usize) -> usize {
    focus.saturating_sub(view / 2).min(total.saturating_sub(view))
}

/// Renders the maze around the player.
pub fn render_maze(frame: &mut Frame, area: Rect, app: &App) {
    let session = app.session();
    let grid = session.grid();
    let now = app.now();

    let block = Block::default()
        .title(format!(" Maze Dungeon - Level {} ", session.level()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Gray));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let view_w = (inner.width as usize / 2).min(grid.width());
    let view_h = (inner.height as usize).min(grid.height());
    let player = session.player();
    let x0 = viewport_start(player.x, view_w, grid.width());
    let y0 = viewport_start(player.y, view_h, grid.height());

    let floor = Style::default().bg(floor_color(session.level()));
    let wall = Style::default().bg(WALL_COLOR);

    // Hint arrow sits on the neighbouring cell in the exit's direction
    let arrow = session.pinger_active(now).then(|| {
        let bearing = session.exit_bearing();
        let dx = bearing.cos().round() as isize;
        let dy = bearing.sin().round() as isize;
        (player.offset(dx, dy), arrow_for_bearing(bearing))
    });

    let lines: Vec<Line> = (y0..y0 + view_h)
        .map(|y| {
            let spans: Vec<Span> = (x0..x0 + view_w)
                .map(|x| {
                    let pos = Position::new(x, y);
                    if pos == player {
                        return Span::styled(
                            "@@",
                            floor.fg(PLAYER_COLOR).add_modifier(Modifier::BOLD),
                        );
                    }
                    if let Some((Some(at), glyph)) = arrow {
                        if at == pos {
                            return Span::styled(
                                format!("{glyph} "),
                                Style::default().fg(ARROW_COLOR).add_modifier(Modifier::BOLD),
                            );
                        }
                    }
                    if app.show_exit && pos == session.exit() {
                        return Span::styled("[]", Style::default().fg(EXIT_COLOR));
                    }
                    if !session.is_visible(pos, now) {
                        return Span::raw("  ");
                    }
                    match grid.get(pos) {
                        Some(Cell::Open) => Span::styled("  ", floor),
                        _ => Span::styled("  ", wall),
                    }
                })
                .collect();
            Line::from(spans)
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), inner);
}
