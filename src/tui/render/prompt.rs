use ratatui::Frame;
use ratatui::layout::{Position, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use unicode_segmentation::UnicodeSegmentation;

use crate::tui::app::App;
use crate::util::unicode;

use super::helpers::centered_rect_fixed;

/// Render the filter/report prompt as a small modal with a live cursor.
pub fn render_prompt(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let popup = centered_rect_fixed(64, 5, area);
    frame.render_widget(Clear, popup);

    let inner_w = popup.width.saturating_sub(4) as usize;
    let (visible, cursor_col) = scrolled_view(&app.prompt_buffer, app.prompt_cursor, inner_w);

    let lines = vec![
        Line::from(vec![
            Span::styled(" ", Style::default().bg(bg)),
            Span::styled(visible, Style::default().fg(app.theme.text_bright).bg(bg)),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled(" Enter", Style::default().fg(app.theme.dim).bg(bg)),
            Span::styled(" apply  ", Style::default().fg(app.theme.text).bg(bg)),
            Span::styled("Esc", Style::default().fg(app.theme.dim).bg(bg)),
            Span::styled(" cancel  ", Style::default().fg(app.theme.text).bg(bg)),
            Span::styled("empty", Style::default().fg(app.theme.dim).bg(bg)),
            Span::styled(" all tasks", Style::default().fg(app.theme.text).bg(bg)),
        ]),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(
            " Filter / report ",
            Style::default()
                .fg(app.theme.highlight)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ))
        .border_style(Style::default().fg(app.theme.highlight).bg(bg))
        .style(Style::default().bg(bg));

    frame.render_widget(Paragraph::new(lines).block(block), popup);

    // Border (1) + leading space (1)
    frame.set_cursor_position(Position::new(
        popup.x + 2 + cursor_col as u16,
        popup.y + 1,
    ));
}

/// The part of `text` that fits in `width` cells with the cursor on screen,
/// and the cursor's column within it.
fn scrolled_view(text: &str, cursor: usize, width: usize) -> (String, usize) {
    let width = width.max(1);
    let cursor_col = unicode::byte_offset_to_display_col(text, cursor);
    // Keep one cell free for the cursor at the end of the text
    let skip_cols = (cursor_col + 1).saturating_sub(width);

    let mut col = 0;
    let mut out = String::new();
    let mut out_w = 0;
    for g in text.graphemes(true) {
        let gw = unicode::display_width(g);
        if col < skip_cols {
            col += gw;
            continue;
        }
        if out_w + gw > width {
            break;
        }
        out.push_str(g);
        out_w += gw;
    }
    (out, cursor_col - col.min(cursor_col))
}
