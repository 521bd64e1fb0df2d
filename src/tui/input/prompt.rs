use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::tui::app::{App, Mode, Work};
use crate::util::unicode;

/// Filter/report prompt. Enter hands the raw text to the engine (empty means
/// every task); Esc leaves the current filter unchanged.
pub(super) fn handle_prompt(app: &mut App, key: KeyEvent) {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Enter => {
            let filter = std::mem::take(&mut app.prompt_buffer);
            app.prompt_cursor = 0;
            app.mode = Mode::Navigate;
            app.pending_work = Some(Work::SetFilter(filter));
        }
        KeyCode::Esc => {
            app.prompt_buffer.clear();
            app.prompt_cursor = 0;
            app.mode = Mode::Navigate;
        }
        KeyCode::Char('u') if ctrl => {
            app.prompt_buffer.drain(..app.prompt_cursor);
            app.prompt_cursor = 0;
        }
        KeyCode::Char('w') if ctrl => {
            let start = unicode::word_boundary_left(&app.prompt_buffer, app.prompt_cursor);
            app.prompt_buffer.drain(start..app.prompt_cursor);
            app.prompt_cursor = start;
        }
        KeyCode::Char('a') if ctrl => app.prompt_cursor = 0,
        KeyCode::Char('e') if ctrl => app.prompt_cursor = app.prompt_buffer.len(),
        KeyCode::Char(c) if !ctrl => {
            app.prompt_buffer.insert(app.prompt_cursor, c);
            app.prompt_cursor += c.len_utf8();
        }
        KeyCode::Backspace => {
            if let Some(prev) =
                unicode::prev_grapheme_boundary(&app.prompt_buffer, app.prompt_cursor)
            {
                app.prompt_buffer.drain(prev..app.prompt_cursor);
                app.prompt_cursor = prev;
            }
        }
        KeyCode::Delete => {
            if let Some(next) =
                unicode::next_grapheme_boundary(&app.prompt_buffer, app.prompt_cursor)
            {
                app.prompt_buffer.drain(app.prompt_cursor..next);
            }
        }
        KeyCode::Left => {
            if let Some(prev) =
                unicode::prev_grapheme_boundary(&app.prompt_buffer, app.prompt_cursor)
            {
                app.prompt_cursor = prev;
            }
        }
        KeyCode::Right => {
            if let Some(next) =
                unicode::next_grapheme_boundary(&app.prompt_buffer, app.prompt_cursor)
            {
                app.prompt_cursor = next;
            }
        }
        KeyCode::Home => app.prompt_cursor = 0,
        KeyCode::End => app.prompt_cursor = app.prompt_buffer.len(),
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
    use pretty_assertions::assert_eq;

    fn type_str(app: &mut App, s: &str) {
        for c in s.chars() {
            handle_key(app, ch(c));
        }
    }

    fn prompting() -> (App, crate::engine::fake::FakeEngine) {
        let (mut app, engine) = app_with_tasks(vec![Task::new(1, "a", "one")]);
        handle_key(&mut app, ch('r'));
        handle_key(&mut app, ctrl('u'));
        (app, engine)
    }

    #[test]
    fn enter_fetches_raw_text() {
        let (mut app, engine) = prompting();
        type_str(&mut app, "project:work overdue");
        handle_key(&mut app, key(KeyCode::Enter));
        assert_eq!(app.mode, Mode::Navigate);
        app.perform_pending();
        assert_eq!(
            engine.state.borrow().fetches.last().cloned(),
            Some(Some("project:work overdue".to_string()))
        );
    }

    #[test]
    fn empty_submit_means_all_tasks() {
        let (mut app, engine) = prompting();
        handle_key(&mut app, key(KeyCode::Enter));
        app.perform_pending();
        assert_eq!(
            engine.state.borrow().fetches.last().cloned(),
            Some(Some(String::new()))
        );
        assert_eq!(app.session.filter_label(), "(all)");
    }

    #[test]
    fn escape_changes_nothing() {
        let (mut app, engine) = prompting();
        type_str(&mut app, "+home");
        handle_key(&mut app, key(KeyCode::Esc));
        assert_eq!(app.mode, Mode::Navigate);
        assert!(app.pending_work.is_none());
        assert_eq!(engine.fetch_count(), 1);
        assert_eq!(app.session.filter(), Some("next"));
    }

    #[test]
    fn editing_is_grapheme_aware() {
        let (mut app, _) = prompting();
        type_str(&mut app, "caf\u{e9}x");
        handle_key(&mut app, key(KeyCode::Left));
        handle_key(&mut app, key(KeyCode::Backspace));
        assert_eq!(app.prompt_buffer, "cafx");
        assert_eq!(app.prompt_cursor, 3);
        handle_key(&mut app, key(KeyCode::Delete));
        assert_eq!(app.prompt_buffer, "caf");
        handle_key(&mut app, key(KeyCode::Home));
        type_str(&mut app, ">");
        assert_eq!(app.prompt_buffer, ">caf");
    }

    #[test]
    fn ctrl_w_deletes_previous_word() {
        let (mut app, _) = prompting();
        type_str(&mut app, "project:home next");
        handle_key(&mut app, ctrl('w'));
        assert_eq!(app.prompt_buffer, "project:home ");
        assert_eq!(app.prompt_cursor, 13);
    }
}
