//! Help overlay rendering.
//!
//! Lists the game's key bindings in a scrollable modal.

use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use super::centered_rect;

/// Key binding entry for the help display.
struct KeyBinding {
    key: &'static str,
    description: &'static str,
}

const MOVEMENT_BINDINGS: &[KeyBinding] = &[
    KeyBinding {
        key: "W / Up",
        description: "Move up",
    },
    KeyBinding {
        key: "A / Left",
        description: "Move left",
    },
    KeyBinding {
        key: "S / Down",
        description: "Move down",
    },
    KeyBinding {
        key: "D / Right",
        description: "Move right",
    },
];

const LEVEL_BINDINGS: &[KeyBinding] = &[
    KeyBinding {
        key: "h",
        description: "Ping the exit (shows its direction)",
    },
    KeyBinding {
        key: "r",
        description: "New random maze for this level",
    },
    KeyBinding {
        key: "n",
        description: "Skip to the next level",
    },
];

const VIEW_BINDINGS: &[KeyBinding] = &[
    KeyBinding {
        key: "m",
        description: "Toggle side panel",
    },
    KeyBinding {
        key: "x",
        description: "Toggle exit marker (debug)",
    },
    KeyBinding {
        key: "?",
        description: "Toggle this help",
    },
    KeyBinding {
        key: "q / Esc",
        description: "Quit",
    },
    KeyBinding {
        key: "Ctrl+C",
        description: "Force quit",
    },
];

/// Renders the help overlay.
///
/// # Arguments
///
/// * `frame` - The frame to render to
/// * `scroll` - Vertical scroll offset
pub fn render_help(frame: &mut Frame, scroll: u16) {
    let area = centered_rect(60, 70, frame.area());

    // Clear the area behind the popup
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(" Help - Keyboard Shortcuts ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),    // Scrollable content
            Constraint::Length(1), // Fixed footer
        ])
        .split(inner);

    let section_style = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
    let key_style = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    let desc_style = Style::default().fg(Color::White);

    let add_section = |lines: &mut Vec<Line<'static>>, title: &'static str, bindings: &[KeyBinding]| {
        lines.push(Line::from(Span::styled(title, section_style)));
        for binding in bindings {
            lines.push(Line::from(vec![
                Span::styled(format!("{:12}", binding.key), key_style),
                Span::styled(binding.description, desc_style),
            ]));
        }
        lines.push(Line::from(""));
    };

    let mut lines: Vec<Line<'static>> = vec![
        Line::from(Span::styled(
            "Find the exit. Only cells near you are lit, and they fade once you leave.",
            desc_style,
        )),
        Line::from(""),
    ];
    add_section(&mut lines, "Movement", MOVEMENT_BINDINGS);
    add_section(&mut lines, "Level", LEVEL_BINDINGS);
    add_section(&mut lines, "View", VIEW_BINDINGS);

    let help_text = Paragraph::new(lines).scroll((scroll, 0));
    frame.render_widget(help_text, chunks[0]);

    let footer = Paragraph::new(Line::from(Span::styled(
        "Scroll: Up/Down  |  Close: ?/Esc",
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::ITALIC),
    )));
    frame.render_widget(footer, chunks[1]);
}
