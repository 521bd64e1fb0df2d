use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, Mode};
use crate::util::unicode;

use super::helpers::spans_width;

/// Render the status row (bottom of screen)
pub fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;
    let dim = Style::default().fg(app.theme.dim).bg(bg);

    let mut spans = if let Some(busy) = app.busy_label() {
        vec![Span::styled(
            format!(" {}", busy),
            Style::default().fg(app.theme.yellow).bg(bg),
        )]
    } else if let Some(msg) = &app.status_message {
        let fg = if app.status_is_error {
            app.theme.red
        } else {
            app.theme.green
        };
        // Only the first line fits; the table shows multi-line load errors
        let first = msg.lines().next().unwrap_or_default();
        vec![Span::styled(
            unicode::truncate_to_width(&format!(" {}", first), width),
            Style::default().fg(fg).bg(bg),
        )]
    } else {
        Vec::new()
    };

    let hint = match app.mode {
        Mode::Navigate => "? help  r filter  1-9 schedule  0 clear  q quit ",
        Mode::Prompt => "Enter apply  Esc cancel ",
        Mode::Confirm => "y confirm  n cancel ",
    };
    let used = spans_width(&spans);
    let hint_w = unicode::display_width(hint);
    if used + hint_w < width {
        spans.push(Span::styled(" ".repeat(width - used - hint_w), Style::default().bg(bg)));
        spans.push(Span::styled(hint, dim));
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::app::Work;
    use crate::tui::render::test_helpers::*;

    fn status_text(app: &App) -> String {
        render_to_string(TERM_W, 1, |frame, area| render_status_row(frame, app, area))
    }

    #[test]
    fn idle_shows_hints() {
        let (app, _) = app_with_tasks(vec![]);
        let out = status_text(&app);
        assert!(out.ends_with("? help  r filter  1-9 schedule  0 clear  q quit"));
    }

    #[test]
    fn busy_label_wins_over_message() {
        let (mut app, _) = app_with_tasks(vec![]);
        app.set_message("Loaded 3 tasks");
        app.pending_work = Some(Work::Refresh);
        let out = status_text(&app);
        assert!(out.starts_with(" Refreshing\u{2026}"));
        assert!(!out.contains("Loaded"));
    }

    #[test]
    fn error_shows_first_line_only() {
        let (mut app, _) = app_with_tasks(vec![]);
        app.set_error("task exited with status 2\nUnknown report");
        let out = status_text(&app);
        assert!(out.starts_with(" task exited with status 2"));
        assert!(!out.contains("Unknown report"));
    }

    #[test]
    fn prompt_mode_hint() {
        let (mut app, _) = app_with_tasks(vec![]);
        app.mode = Mode::Prompt;
        assert!(status_text(&app).ends_with("Enter apply  Esc cancel"));
    }
}
