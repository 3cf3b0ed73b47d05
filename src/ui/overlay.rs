//! Level-cleared overlay.

use crate::app::App;
use ratatui::layout::Alignment;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use super::centered_rect;

/// Renders the summary shown after reaching the exit, if any.
pub fn render_level_cleared(frame: &mut Frame, app: &App) {
    let Some(cleared) = app.level_cleared() else {
        return;
    };
    let summary = &cleared.summary;

    let area = centered_rect(40, 30, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(format!(" Level {} cleared! ", summary.level))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green));

    let mut lines = vec![
        Line::from(""),
        Line::from(format!("Time: {:.2}s", summary.elapsed_secs)),
        Line::from(format!("Moves: {}", summary.moves)),
        Line::from(format!("Hints used: {}", summary.hints_used)),
        Line::from(""),
    ];

    let record = &cleared.record;
    let note = if record.new_record {
        match record.previous {
            Some(previous) => format!("New personal best! (was {previous:.2}s)"),
            None => "Personal fastest!".to_string(),
        }
    } else {
        record
            .previous
            .map(|best| format!("Best: {best:.2}s"))
            .unwrap_or_default()
    };
    lines.push(Line::from(Span::styled(
        note,
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    )));

    let paragraph = Paragraph::new(lines)
        .block(block)
        .alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}
