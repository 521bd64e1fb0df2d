use crossterm::event::{KeyCode, KeyEvent};

use crate::tui::app::{App, Mode, Work};

pub(super) fn handle_confirm(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
            app.mode = Mode::Navigate;
            if let Some(plan) = app.pending_plan.take() {
                app.pending_work = Some(Work::Batch(plan));
            }
        }
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            app.pending_plan = None;
            app.mode = Mode::Navigate;
            app.set_message("Cancelled");
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Task;
    use crate::tui::input::handle_key;
    use crate::tui::input::test_keys::*;
    use crate::tui::render::test_helpers::app_with_tasks;

    fn confirming() -> (App, crate::engine::fake::FakeEngine) {
        let (mut app, engine) = app_with_tasks(vec![Task::new(1, "a", "one")]);
        app.confirm_before_schedule = true;
        handle_key(&mut app, ch('1'));
        assert_eq!(app.mode, Mode::Confirm);
        (app, engine)
    }

    #[test]
    fn yes_runs_the_batch() {
        let (mut app, engine) = confirming();
        handle_key(&mut app, ch('y'));
        assert_eq!(app.mode, Mode::Navigate);
        assert!(app.perform_pending());
        assert_eq!(engine.modify_count(), 1);
    }

    #[test]
    fn no_discards_the_plan() {
        let (mut app, engine) = confirming();
        handle_key(&mut app, key(KeyCode::Esc));
        assert!(app.pending_plan.is_none());
        assert!(!app.perform_pending());
        assert_eq!(engine.modify_count(), 0);
        assert_eq!(app.status_message.as_deref(), Some("Cancelled"));
    }

    #[test]
    fn other_keys_keep_waiting() {
        let (mut app, _) = confirming();
        handle_key(&mut app, ch('j'));
        assert_eq!(app.mode, Mode::Confirm);
        assert!(app.pending_plan.is_some());
    }
}
