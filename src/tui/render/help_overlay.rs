use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tui::app::App;

use super::helpers::centered_rect;

/// Render the help overlay (toggled with ?)
pub fn render_help_overlay(frame: &mut Frame, app: &App, area: Rect) {
    let overlay_area = centered_rect(70, 90, area);
    frame.render_widget(Clear, overlay_area);

    let bg = app.theme.background;
    let key_style = Style::default()
        .fg(app.theme.highlight)
        .bg(bg)
        .add_modifier(Modifier::BOLD);
    let desc_style = Style::default().fg(app.theme.text).bg(bg);
    let header_style = Style::default()
        .fg(app.theme.text_bright)
        .bg(bg)
        .add_modifier(Modifier::BOLD);

    let mut lines: Vec<Line> = Vec::new();

    lines.push(Line::from(Span::styled(" Navigation", header_style)));
    add_binding(&mut lines, " \u{2191}\u{2193}/jk", "Move cursor", key_style, desc_style);
    add_binding(&mut lines, " g/G", "Jump to top/bottom", key_style, desc_style);
    add_binding(&mut lines, " r", "Filter / report prompt", key_style, desc_style);
    add_binding(&mut lines, " R", "Refresh", key_style, desc_style);
    lines.push(Line::from(""));

    lines.push(Line::from(Span::styled(" Selection", header_style)));
    add_binding(&mut lines, " Tab/m", "Toggle task", key_style, desc_style);
    add_binding(&mut lines, " A", "Select all", key_style, desc_style);
    add_binding(&mut lines, " x", "Clear selection", key_style, desc_style);
    lines.push(Line::from(""));

    lines.push(Line::from(Span::styled(" Scheduling", header_style)));
    add_binding(&mut lines, " s/d/w", "Toggle scheduled/due/wait", key_style, desc_style);
    let hotkeys: Vec<(char, &str)> = app.session.hotkeys().iter().collect();
    for (key, value) in hotkeys {
        lines.push(Line::from(vec![
            Span::styled(format!("{:<16}", format!(" {}", key)), key_style),
            Span::styled(format!("Set to {}", value), desc_style),
        ]));
    }
    add_binding(&mut lines, " 0", "Clear active fields", key_style, desc_style);
    lines.push(Line::from(""));

    lines.push(Line::from(Span::styled(" View", header_style)));
    add_binding(&mut lines, " o/O", "Cycle sort / reverse", key_style, desc_style);
    add_binding(&mut lines, " t", "Absolute/relative dates", key_style, desc_style);
    add_binding(&mut lines, " ?", "Toggle this help", key_style, desc_style);
    add_binding(&mut lines, " q", "Quit", key_style, desc_style);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(" Key Bindings ", header_style))
        .border_style(Style::default().fg(app.theme.dim).bg(bg))
        .style(Style::default().bg(bg));

    let paragraph = Paragraph::new(lines)
        .block(block)
        .style(Style::default().bg(bg));

    frame.render_widget(paragraph, overlay_area);
}

fn add_binding<'a>(
    lines: &mut Vec<Line<'a>>,
    key: &'a str,
    desc: &'a str,
    key_style: Style,
    desc_style: Style,
) {
    let key_width = 16;
    let padded_key = format!("{:<width$}", key, width = key_width);
    lines.push(Line::from(vec![
        Span::styled(padded_key, key_style),
        Span::styled(desc, desc_style),
    ]));
}
