pub mod confirm_popup;
pub mod header;
pub mod help_overlay;
mod helpers;
pub mod prompt;
pub mod status_row;
pub mod task_table;
#[cfg(test)]
pub mod test_helpers;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::Style;
use ratatui::widgets::Block;

use super::app::{App, Mode};

/// Main render function, dispatches to sub-renderers
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    // Background fill
    let bg_style = Style::default().bg(app.theme.background);
    frame.render_widget(Block::default().style(bg_style), area);

    // Layout: header (2 rows) | task table | status row (1 row)
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(area);

    header::render_header(frame, app, chunks[0]);
    task_table::render_task_table(frame, app, chunks[1]);
    status_row::render_status_row(frame, app, chunks[2]);

    // Overlays, rendered on top of everything
    match app.mode {
        Mode::Prompt => prompt::render_prompt(frame, app, area),
        Mode::Confirm => confirm_popup::render_confirm_popup(frame, app, area),
        Mode::Navigate => {}
    }
    if app.show_help {
        help_overlay::render_help_overlay(frame, app, area);
    }
}
