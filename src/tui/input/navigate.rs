use crossterm::event::{KeyCode, KeyEvent};

use crate::model::DateField;
use crate::tui::app::{App, Mode, Work};

pub(super) fn handle_navigate(app: &mut App, key: KeyEvent) {
    // Help overlay intercepts everything; ? or Esc closes it
    if app.show_help {
        if matches!(key.code, KeyCode::Char('?') | KeyCode::Esc | KeyCode::Char('q')) {
            app.show_help = false;
        }
        return;
    }

    match key.code {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Char('?') => app.show_help = true,
        KeyCode::Esc => app.clear_message(),

        // Movement
        KeyCode::Char('j') | KeyCode::Down => move_cursor(app, 1),
        KeyCode::Char('k') | KeyCode::Up => move_cursor(app, -1),
        KeyCode::PageDown => move_cursor(app, 10),
        KeyCode::PageUp => move_cursor(app, -10),
        KeyCode::Char('g') | KeyCode::Home => app.cursor = 0,
        KeyCode::Char('G') | KeyCode::End => {
            app.cursor = app.row_count().saturating_sub(1);
        }

        // Selection
        KeyCode::Tab | KeyCode::Char('m') => toggle_cursor_selection(app),
        KeyCode::Char('A') => {
            app.session.select_all_visible();
            let n = app.session.selection.len();
            app.set_message(format!("{} selected", n));
        }
        KeyCode::Char('x') => {
            app.session.clear_selection();
            app.set_message("Selection cleared");
        }

        // Date fields
        KeyCode::Char('s') => toggle_field(app, DateField::Scheduled),
        KeyCode::Char('d') => toggle_field(app, DateField::Due),
        KeyCode::Char('w') => toggle_field(app, DateField::Wait),

        // Batch operations
        KeyCode::Char(c @ '1'..='9') => {
            let cursor = app.cursor_uuid();
            let plan = app.session.plan_schedule(c, cursor.as_deref());
            app.begin_batch(plan);
        }
        KeyCode::Char('0') => {
            let cursor = app.cursor_uuid();
            let plan = app.session.plan_clear(cursor.as_deref());
            app.begin_batch(plan);
        }

        // View
        KeyCode::Char('r') => open_prompt(app),
        KeyCode::Char('o') => {
            app.session.cycle_sort();
            app.set_message(format!("Sort: {}", app.session.sort.label()));
        }
        KeyCode::Char('O') => {
            app.session.flip_sort_direction();
            app.set_message(format!("Sort: {}", app.session.sort.label()));
        }
        KeyCode::Char('t') => app.relative_dates = !app.relative_dates,
        KeyCode::Char('R') => app.pending_work = Some(Work::Refresh),
        _ => {}
    }
}

fn move_cursor(app: &mut App, delta: isize) {
    let count = app.row_count();
    if count == 0 {
        app.cursor = 0;
        return;
    }
    app.cursor = app.cursor.saturating_add_signed(delta).min(count - 1);
}

fn toggle_cursor_selection(app: &mut App) {
    if let Some(uuid) = app.cursor_uuid() {
        app.session.toggle_selected(&uuid);
        move_cursor(app, 1);
    }
}

fn toggle_field(app: &mut App, field: DateField) {
    let now_active = app.session.toggle_field(field);
    app.set_message(format!(
        "{} {}; active: {}",
        field,
        if now_active { "on" } else { "off" },
        app.session.date_fields.label()
    ));
}

/// Enter prompt mode pre-filled with the current filter string.
fn open_prompt(app: &mut App) {
    app.prompt_buffer = app.session.filter().unwrap_or_default().to_string();
    app.prompt_cursor = app.prompt_buffer.len();
    app.mode = Mode::Prompt;
}
