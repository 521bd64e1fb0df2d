use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::App;
use crate::util::unicode;

use super::helpers::spans_width;

/// Render the two header rows: title with counts, then the status line
/// (`Filter: …   Active: …   Sort: …   Date: …`).
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;
    let label_style = Style::default().fg(app.theme.dim).bg(bg);
    let value_style = Style::default().fg(app.theme.text_bright).bg(bg);

    // Title row: name on the left, counts on the right
    let mut title = vec![Span::styled(
        " schedule",
        Style::default()
            .fg(app.theme.highlight)
            .bg(bg)
            .add_modifier(Modifier::BOLD),
    )];
    let total = app.session.tasks().len();
    let selected = app.session.selection.len();
    let counts = if selected > 0 {
        format!("{} tasks \u{b7} {} selected ", total, selected)
    } else {
        format!("{} tasks ", total)
    };
    let used = spans_width(&title) + unicode::display_width(&counts);
    if used < width {
        title.push(Span::styled(" ".repeat(width - used), Style::default().bg(bg)));
        title.push(Span::styled(counts, label_style));
    }

    let active = app.session.date_fields.label();
    let active_style = if app.session.date_fields.is_empty() {
        Style::default().fg(app.theme.red).bg(bg)
    } else {
        Style::default().fg(app.theme.cyan).bg(bg)
    };
    let status = vec![
        Span::styled(" Filter: ", label_style),
        Span::styled(app.session.filter_label(), value_style),
        Span::styled("   Active: ", label_style),
        Span::styled(active, active_style),
        Span::styled("   Sort: ", label_style),
        Span::styled(app.session.sort.label(), value_style),
        Span::styled("   Date: ", label_style),
        Span::styled(
            if app.relative_dates { "relative" } else { "absolute" },
            value_style,
        ),
    ];

    let paragraph =
        Paragraph::new(vec![Line::from(title), Line::from(status)]).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}
