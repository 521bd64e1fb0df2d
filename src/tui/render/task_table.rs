use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::model::{DateField, Task};
use crate::tui::app::App;
use crate::util::dates::format_date;
use crate::util::unicode::fit_to_width;

const ID_W: usize = 6;
const PROJECT_W: usize = 12;
const DATE_W: usize = 14;
const MIN_DESC_W: usize = 8;

/// Column order of the date fields in the table
const DATE_COLUMNS: [DateField; 3] = [DateField::Scheduled, DateField::Due, DateField::Wait];

fn description_width(total: usize) -> usize {
    let fixed = ID_W + (1 + PROJECT_W) + DATE_COLUMNS.len() * (1 + DATE_W);
    total.saturating_sub(fixed).max(MIN_DESC_W)
}

/// Render the task table: a header row, then one row per visible task.
/// Keeps `app.scroll_offset` such that the cursor row is on screen.
pub fn render_task_table(frame: &mut Frame, app: &mut App, area: Rect) {
    let bg = app.theme.background;
    let desc_w = description_width(area.width as usize);
    let body_height = (area.height as usize).saturating_sub(1).max(1);

    if app.cursor < app.scroll_offset {
        app.scroll_offset = app.cursor;
    } else if app.cursor >= app.scroll_offset + body_height {
        app.scroll_offset = app.cursor + 1 - body_height;
    }

    let mut lines: Vec<Line> = vec![header_row(app, desc_w)];

    if let Some(err) = app.session.load_error() {
        for (i, text) in err.lines().enumerate() {
            let prefix = if i == 0 { " Error: " } else { "        " };
            lines.push(Line::from(Span::styled(
                format!("{}{}", prefix, text),
                Style::default().fg(app.theme.red).bg(bg),
            )));
        }
    } else if app.session.tasks().is_empty() {
        lines.push(Line::from(Span::styled(
            " No tasks",
            Style::default().fg(app.theme.dim).bg(bg),
        )));
    } else {
        let visible = app.session.visible();
        for (idx, task) in visible
            .iter()
            .enumerate()
            .skip(app.scroll_offset)
            .take(body_height)
        {
            lines.push(task_row(app, task, idx == app.cursor, desc_w));
        }
    }

    let paragraph = Paragraph::new(lines).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}

fn header_row(app: &App, desc_w: usize) -> Line<'static> {
    let bg = app.theme.background;
    let base = Style::default()
        .fg(app.theme.dim)
        .bg(bg)
        .add_modifier(Modifier::BOLD);
    let active = Style::default()
        .fg(app.theme.cyan)
        .bg(bg)
        .add_modifier(Modifier::BOLD | Modifier::UNDERLINED);

    let mut spans = vec![
        Span::styled(format!("{:>4}  ", "ID"), base),
        Span::styled(fit_to_width("Description", desc_w), base),
        Span::styled(" ", base),
        Span::styled(fit_to_width("Project", PROJECT_W), base),
    ];
    for field in DATE_COLUMNS {
        spans.push(Span::styled(" ", base));
        let style = if app.session.date_fields.is_active(field) {
            active
        } else {
            base
        };
        spans.push(Span::styled(fit_to_width(field.label(), DATE_W), style));
    }
    Line::from(spans)
}

fn task_row(app: &App, task: &Task, is_cursor: bool, desc_w: usize) -> Line<'static> {
    let theme = &app.theme;
    let row_bg = if is_cursor { theme.cursor_bg } else { theme.background };
    let text = Style::default().fg(theme.text).bg(row_bg);
    let dim = Style::default().fg(theme.dim).bg(row_bg);

    let marker = if app.session.selection.contains(&task.uuid) {
        Span::styled("\u{25CF}", Style::default().fg(theme.selected).bg(row_bg))
    } else {
        Span::styled(" ", text)
    };
    let desc_style = if is_cursor {
        Style::default().fg(theme.text_bright).bg(row_bg)
    } else {
        text
    };

    let mut spans = vec![
        marker,
        Span::styled(format!("{:>4} ", task.id), dim),
        Span::styled(fit_to_width(&task.description, desc_w), desc_style),
        Span::styled(" ", text),
        Span::styled(fit_to_width(task.project().unwrap_or("-"), PROJECT_W), dim),
    ];
    for field in DATE_COLUMNS {
        let value = task
            .date(field)
            .map(|raw| format_date(raw, app.relative_dates))
            .unwrap_or_else(|| "-".to_string());
        let style = if app.session.date_fields.is_active(field) {
            Style::default().fg(theme.cyan).bg(row_bg)
        } else {
            text
        };
        spans.push(Span::styled(" ", text));
        spans.push(Span::styled(fit_to_width(&value, DATE_W), style));
    }
    Line::from(spans)
}
