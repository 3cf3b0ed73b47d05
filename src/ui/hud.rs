//! Side panel with level stats, audio state, and controls.

use crate::app::App;
use crate::config::MAX_LEVEL;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use super::arrow_for_bearing;

fn stat(label: &'static str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{label:<10}"), Style::default().fg(Color::DarkGray)),
        Span::styled(value, Style::default().fg(Color::White)),
    ])
}

fn sound_label(app: &App) -> String {
    if !app.audio_enabled() {
        return "off".to_string();
    }
    match app.loaded_tier() {
        Some(tier) if tier == app.session().tier() => tier.to_string(),
        _ => "loading...".to_string(),
    }
}

/// Renders the HUD.
pub fn render_hud(frame: &mut Frame, area: Rect, app: &App) {
    let session = app.session();
    let now = app.now();

    let block = Block::default()
        .title(" Status ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Gray));

    let heading = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);

    let best = app
        .records()
        .records()
        .best(session.level())
        .map(|secs| format!("{secs:.2}s"))
        .unwrap_or_else(|| "-".to_string());

    let mut lines = vec![
        Line::from(Span::styled("MAZE DUNGEON", heading)),
        Line::from(""),
        stat("Level", format!("{} / {}", session.level(), MAX_LEVEL)),
        stat("Time", format!("{:.1}s", session.elapsed(now))),
        stat("Best", best),
        stat("Moves", session.moves().to_string()),
        stat("Hints", session.hints_used().to_string()),
        stat("Radius", session.reveal_radius().to_string()),
        stat("Seed", session.seed().to_string()),
        stat("Sound", sound_label(app)),
        Line::from(""),
    ];

    if session.pinger_active(now) {
        lines.push(Line::from(vec![
            Span::styled("Exit  ", heading),
            Span::styled(
                arrow_for_bearing(session.exit_bearing()),
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!("  ({:.1}s)", session.pinger_remaining(now))),
        ]));
    } else {
        lines.push(Line::from(Span::styled(
            "Press h to ping the exit",
            Style::default().fg(Color::DarkGray),
        )));
    }
    lines.push(Line::from(""));

    lines.push(Line::from(Span::styled(
        "WASD/arrows move  ? help  q quit",
        Style::default().fg(Color::DarkGray),
    )));

    if let Some(message) = app.status() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            message.to_string(),
            Style::default().fg(Color::Cyan),
        )));
    }

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}
