use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line as TextLine, Span, Text};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use crate::cli::CliArgs;

const KEYS: [(&str, &str); 7] = [
    ("space", "start / stop the sweep"),
    ("+ / -", "beam speed"),
    ("[ / ]", "beam field of view"),
    ("r", "re-measure and regenerate"),
    ("m", "toggle reduced motion"),
    ("?", "toggle this help"),
    ("q / Esc", "quit"),
];

pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let [_, middle, _] = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .areas(area);

    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .areas(middle);

    center
}

pub fn help_lines() -> Vec<TextLine<'static>> {
    let bold = Style::default().add_modifier(Modifier::BOLD);
    let mut lines = vec![TextLine::from(Span::styled("Keys:", bold))];
    for (key, action) in KEYS {
        lines.push(TextLine::from(format!("  {key:<8} {action}")));
    }

    lines.push(TextLine::from(""));
    lines.push(TextLine::from(Span::styled("CLI Options:", bold)));
    let help_text = CliArgs::help_text();
    for line in help_text.lines() {
        if line.starts_with("Usage") || line.starts_with("Options") || line.trim().is_empty() {
            continue;
        }
        lines.push(TextLine::from(line.to_string()));
    }

    lines
}

pub fn render_help(frame: &mut Frame<'_>, area: Rect) {
    let popup = centered_rect(70, 80, area);
    frame.render_widget(Clear, popup);
    frame.render_widget(
        Paragraph::new(Text::from(help_lines()))
            .block(Block::default().title("Help").borders(Borders::ALL)),
        popup,
    );
}
