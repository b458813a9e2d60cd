use crate::app::{AppState, FormField};
use crate::domain::UiMode;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Handle keyboard input events; returns true when the app should quit
pub fn handle_key(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match app.ui_mode {
        UiMode::Normal => handle_normal_mode(app, key),
        UiMode::EditingTask => handle_form_mode(app, key),
        UiMode::PickingSuggestions => handle_picker_mode(app, key),
        UiMode::ConfirmDelete => handle_confirm_delete_mode(app, key),
    }
}

/// Handle keys in normal mode
fn handle_normal_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        // Navigation
        KeyCode::Up => {
            app.move_selection_up();
            Ok(false)
        }
        KeyCode::Down => {
            app.move_selection_down();
            Ok(false)
        }

        // Add task
        KeyCode::Char('a') => {
            app.start_add_task();
            Ok(false)
        }

        // Edit selected task
        KeyCode::Char('e') | KeyCode::Char('E') => {
            app.start_edit_task();
            Ok(false)
        }

        // Delete (asks first)
        KeyCode::Char('x') | KeyCode::Char('X') | KeyCode::Delete => {
            app.request_delete();
            Ok(false)
        }

        // Cycle status
        KeyCode::Char('s') | KeyCode::Char('S') => {
            app.cycle_selected_status();
            Ok(false)
        }

        KeyCode::Char('r') => {
            app.reload();
            Ok(false)
        }

        // Focus timer
        KeyCode::Char('t') | KeyCode::Char('T') => {
            app.toggle_timer();
            Ok(false)
        }
        KeyCode::Char('R') => {
            app.reset_timer();
            Ok(false)
        }

        // Quit
        KeyCode::Char('q') | KeyCode::Char('Q') => Ok(true),

        _ => Ok(false),
    }
}

/// Handle keys in the task form
fn handle_form_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    let field = match &app.form {
        Some(form) => form.field,
        None => {
            app.ui_mode = UiMode::Normal;
            return Ok(false);
        }
    };
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
        KeyCode::Esc => app.cancel_form(),

        // Submit from any field
        KeyCode::Char('s') if ctrl => app.submit_form(),

        // AI suggestions
        KeyCode::Char('g') if ctrl => app.request_suggestions(),

        KeyCode::Tab => app.form_next_field(),
        KeyCode::BackTab => app.form_previous_field(),

        KeyCode::Left => app.form_cycle(false),
        KeyCode::Right => app.form_cycle(true),

        KeyCode::Up if field == FormField::Pool => app.form_pool_up(),
        KeyCode::Down if field == FormField::Pool => app.form_pool_down(),

        KeyCode::Enter => app.form_enter(),
        KeyCode::Backspace => app.form_backspace(),

        KeyCode::Char(c) if !ctrl => app.form_add_char(c),

        _ => {}
    }
    Ok(false)
}

/// Handle keys while picking AI suggestions
fn handle_picker_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Up => app.picker_up(),
        KeyCode::Down => app.picker_down(),
        KeyCode::Char(' ') => app.picker_toggle(),
        KeyCode::Enter => app.picker_confirm(),
        KeyCode::Esc => app.picker_cancel(),
        _ => {}
    }
    Ok(false)
}

/// Handle the y/n delete confirmation
fn handle_confirm_delete_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => app.confirm_delete_yes(),
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => app.cancel_delete(),
        _ => {}
    }
    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::test_support::{sample_subtask, sample_task};
    use crate::domain::{Priority, Status, SubtaskSuggestion};
    use crate::gateway::fake::FakeGateway;
    use crate::timer::TimerConfig;
    use std::rc::Rc;

    fn create_test_app() -> (AppState, Rc<FakeGateway>) {
        let gateway = Rc::new(FakeGateway::with_data(
            vec![
                sample_task("t1", vec![sample_subtask("s1")]),
                sample_task("t2", Vec::new()),
            ],
            vec![sample_subtask("s1"), sample_subtask("s2")],
        ));
        let mut app = AppState::new(gateway.clone(), TimerConfig::default());
        app.reload();
        (app, gateway)
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::empty())
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn type_text(app: &mut AppState, text: &str) {
        for c in text.chars() {
            handle_key(app, key(KeyCode::Char(c))).unwrap();
        }
    }

    #[test]
    fn test_handle_navigation() {
        let (mut app, _) = create_test_app();
        assert_eq!(app.selected_index, 0);

        // t1, s1, t2
        handle_key(&mut app, key(KeyCode::Down)).unwrap();
        assert_eq!(app.selected_subtask().map(|s| s.id.as_str()), Some("s1"));

        handle_key(&mut app, key(KeyCode::Down)).unwrap();
        handle_key(&mut app, key(KeyCode::Down)).unwrap();
        assert_eq!(app.selected_index, 2);

        handle_key(&mut app, key(KeyCode::Up)).unwrap();
        assert_eq!(app.selected_index, 1);
    }

    #[test]
    fn test_handle_quit() {
        let (mut app, _) = create_test_app();
        let should_quit = handle_key(&mut app, key(KeyCode::Char('q'))).unwrap();
        assert!(should_quit);
    }

    #[test]
    fn test_handle_add_task() {
        let (mut app, gateway) = create_test_app();

        handle_key(&mut app, key(KeyCode::Char('a'))).unwrap();
        assert_eq!(app.ui_mode, UiMode::EditingTask);
        assert!(app.form.is_some());

        type_text(&mut app, "New");
        handle_key(&mut app, key(KeyCode::Tab)).unwrap();
        type_text(&mut app, "Details");
        handle_key(&mut app, key(KeyCode::Tab)).unwrap();
        handle_key(&mut app, key(KeyCode::Right)).unwrap();

        handle_key(&mut app, ctrl('s')).unwrap();
        assert_eq!(app.ui_mode, UiMode::Normal);
        assert!(app.form.is_none());
        assert_eq!(app.task_list.tasks().len(), 3);

        let sent = &gateway.created_tasks()[0];
        assert_eq!(sent.title, "New");
        assert_eq!(sent.priority, Priority::High);
        assert_eq!(app.selected_task().map(|t| t.title.as_str()), Some("New"));
    }

    #[test]
    fn test_form_stays_open_on_validation_error() {
        let (mut app, gateway) = create_test_app();

        handle_key(&mut app, key(KeyCode::Char('a'))).unwrap();
        type_text(&mut app, "No description");
        handle_key(&mut app, key(KeyCode::Enter)).unwrap();

        assert_eq!(app.ui_mode, UiMode::EditingTask);
        assert!(app.status_message.as_ref().map_or(false, |m| m.is_error));
        assert_eq!(gateway.call_count("create_task"), 0);
    }

    #[test]
    fn test_manual_subtask_and_link_from_pool() {
        let (mut app, gateway) = create_test_app();
        handle_key(&mut app, key(KeyCode::Char('e'))).unwrap();

        // Jump to the new-subtask title field
        for _ in 0..4 {
            handle_key(&mut app, key(KeyCode::Tab)).unwrap();
        }
        type_text(&mut app, "Call supplier");
        handle_key(&mut app, key(KeyCode::Enter)).unwrap();
        assert_eq!(gateway.created_subtasks().len(), 1);

        // Pool: s1 (linked), s2, new one
        handle_key(&mut app, key(KeyCode::BackTab)).unwrap();
        assert_eq!(app.form.as_ref().map(|f| f.field), Some(FormField::Status));
        for _ in 0..3 {
            handle_key(&mut app, key(KeyCode::Tab)).unwrap();
        }
        handle_key(&mut app, key(KeyCode::Down)).unwrap();
        handle_key(&mut app, key(KeyCode::Down)).unwrap();
        handle_key(&mut app, key(KeyCode::Char(' '))).unwrap();

        let form = app.form.as_ref().unwrap();
        assert_eq!(form.session.pool().len(), 3);
        assert_eq!(form.session.draft.subtasks.len(), 2);
    }

    #[test]
    fn test_suggestion_picker_links_selected() {
        let (mut app, gateway) = create_test_app();
        gateway.set_suggestions(vec![
            SubtaskSuggestion {
                title: "Outline".to_string(),
                description: "List sections".to_string(),
            },
            SubtaskSuggestion {
                title: "Review".to_string(),
                description: "Read it twice".to_string(),
            },
        ]);

        handle_key(&mut app, key(KeyCode::Char('e'))).unwrap();
        handle_key(&mut app, ctrl('g')).unwrap();
        assert_eq!(app.ui_mode, UiMode::PickingSuggestions);

        handle_key(&mut app, key(KeyCode::Down)).unwrap();
        handle_key(&mut app, key(KeyCode::Char(' '))).unwrap();
        handle_key(&mut app, key(KeyCode::Enter)).unwrap();

        assert_eq!(app.ui_mode, UiMode::EditingTask);
        let form = app.form.as_ref().unwrap();
        assert!(form.session.draft.has_pending());
        assert_eq!(form.session.draft.subtasks.len(), 2);

        handle_key(&mut app, ctrl('s')).unwrap();
        assert_eq!(app.ui_mode, UiMode::Normal);
        let titles: Vec<String> = app.task_list.get("t1").unwrap().subtasks.iter().map(|s| s.title.clone()).collect();
        assert_eq!(titles, vec!["Subtask s1".to_string(), "Review".to_string()]);
    }

    #[test]
    fn test_suggestions_need_description() {
        let (mut app, gateway) = create_test_app();
        handle_key(&mut app, key(KeyCode::Char('a'))).unwrap();
        type_text(&mut app, "Only a title");
        handle_key(&mut app, ctrl('g')).unwrap();

        assert_eq!(app.ui_mode, UiMode::EditingTask);
        assert_eq!(gateway.call_count("suggest_subtasks"), 0);
    }

    #[test]
    fn test_delete_asks_for_confirmation() {
        let (mut app, gateway) = create_test_app();

        handle_key(&mut app, key(KeyCode::Char('x'))).unwrap();
        assert_eq!(app.ui_mode, UiMode::ConfirmDelete);
        handle_key(&mut app, key(KeyCode::Char('n'))).unwrap();
        assert_eq!(app.task_list.tasks().len(), 2);
        assert_eq!(gateway.call_count("delete_task"), 0);

        handle_key(&mut app, key(KeyCode::Delete)).unwrap();
        handle_key(&mut app, key(KeyCode::Char('y'))).unwrap();
        assert_eq!(app.ui_mode, UiMode::Normal);
        assert_eq!(app.task_list.tasks().len(), 1);
    }

    #[test]
    fn test_cycle_status_on_task_and_subtask() {
        let (mut app, _) = create_test_app();

        handle_key(&mut app, key(KeyCode::Char('s'))).unwrap();
        assert_eq!(app.task_list.get("t1").unwrap().status, Status::InProgress);

        handle_key(&mut app, key(KeyCode::Down)).unwrap();
        handle_key(&mut app, key(KeyCode::Char('s'))).unwrap();
        assert_eq!(app.task_list.get("t1").unwrap().subtasks[0].status, Status::InProgress);
    }

    #[test]
    fn test_reload_failure_keeps_tasks() {
        let (mut app, gateway) = create_test_app();
        gateway.go_offline();

        handle_key(&mut app, key(KeyCode::Char('r'))).unwrap();
        assert_eq!(app.task_list.tasks().len(), 2);
        assert!(app.status_message.as_ref().map_or(false, |m| m.is_error));
    }

    #[test]
    fn test_timer_keys() {
        let (mut app, _) = create_test_app();

        handle_key(&mut app, key(KeyCode::Char('t'))).unwrap();
        assert!(app.timer.is_running());
        app.on_seconds(5);
        assert_eq!(app.timer.remaining_secs(), 25 * 60 - 5);

        handle_key(&mut app, key(KeyCode::Char('R'))).unwrap();
        assert!(!app.timer.is_running());
        assert_eq!(app.timer.remaining_secs(), 25 * 60);
    }
}
