use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::tui::app::App;

use super::helpers::centered_rect_fixed;

/// Render the y/n popup for the batch waiting in `app.pending_plan`
pub fn render_confirm_popup(frame: &mut Frame, app: &App, area: Rect) {
    let Some(plan) = &app.pending_plan else {
        return;
    };

    let bg = app.theme.background;
    let header_style = Style::default()
        .fg(app.theme.highlight)
        .bg(bg)
        .add_modifier(Modifier::BOLD);
    let text_style = Style::default().fg(app.theme.text).bg(bg);
    let bright_style = Style::default()
        .fg(app.theme.text_bright)
        .bg(bg)
        .add_modifier(Modifier::BOLD);
    let dim_style = Style::default().fg(app.theme.dim).bg(bg);

    let action = if plan.is_clear() {
        "Clear".to_string()
    } else {
        format!("Set to '{}'", plan.value)
    };
    let fields = plan
        .fields
        .iter()
        .map(|f| f.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    let count = plan.targets.len();

    let lines = vec![
        Line::from(Span::styled(" Confirm", header_style)),
        Line::from(""),
        Line::from(vec![
            Span::styled("  ", text_style),
            Span::styled(action, bright_style),
        ]),
        Line::from(Span::styled(format!("  fields: {}", fields), text_style)),
        Line::from(Span::styled(
            format!("  tasks:  {} task{}", count, if count == 1 { "" } else { "s" }),
            text_style,
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("  ", text_style),
            Span::styled("y", dim_style),
            Span::styled(" confirm  ", text_style),
            Span::styled("n", dim_style),
            Span::styled(" cancel", text_style),
        ]),
    ];

    let popup_h = lines.len() as u16 + 2;
    let overlay_area = centered_rect_fixed(48, popup_h, area);
    frame.render_widget(Clear, overlay_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.highlight).bg(bg))
        .style(Style::default().bg(bg));

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false })
        .style(Style::default().bg(bg));

    frame.render_widget(paragraph, overlay_area);
}
