//! Terminal user interface components.
//!
//! This module draws the maze viewport, the side HUD, and the modal
//! overlays (help, level cleared).

mod help;
mod hud;
mod maze_view;
mod overlay;

use crate::app::App;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::Frame;
use std::f64::consts::FRAC_PI_4;

pub use help::render_help;
pub use hud::render_hud;
pub use maze_view::render_maze;
pub use overlay::render_level_cleared;

/// Width of the side panel in columns.
const HUD_WIDTH: u16 = 34;

/// Arrows for the eight compass directions, clockwise from east
/// (screen coordinates, y down).
const ARROWS: [&str; 8] = ["→", "↘", "↓", "↙", "←", "↖", "↑", "↗"];

/// Picks the arrow closest to a bearing in radians.
pub fn arrow_for_bearing(bearing: f64) -> &'static str {
    let step = (bearing / FRAC_PI_4).round() as i64;
    ARROWS[step.rem_euclid(8) as usize]
}

/// Renders the main screen.
///
/// # Arguments
///
/// * `frame` - The frame to render to
/// * `app` - Application state
pub fn render(frame: &mut Frame, app: &App) {
    let size = frame.area();

    if app.hud_visible {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(20), Constraint::Length(HUD_WIDTH)])
            .split(size);
        render_maze(frame, chunks[0], app);
        render_hud(frame, chunks[1], app);
    } else {
        render_maze(frame, size, app);
    }

    render_level_cleared(frame, app);

    if app.show_help {
        render_help(frame, app.help_scroll);
    }
}

/// Helper function to create a centered rect.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
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
