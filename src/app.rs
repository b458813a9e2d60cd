use crate::domain::{flatten_tasks, FlatRow, Subtask, SubtaskSuggestion, Task, UiMode};
use crate::error::ClientError;
use crate::gateway::Gateway;
use crate::notifications;
use crate::session::EditSession;
use crate::task_list::TaskList;
use crate::timer::{FocusTimer, TimerConfig, TimerEvent};
use std::rc::Rc;
use tracing::info;

/// One-line feedback shown under the panes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub is_error: bool,
}

/// Focusable fields of the task form, in Tab order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Title,
    Description,
    Priority,
    Status,
    SubtaskTitle,
    SubtaskDescription,
    Pool,
}

impl FormField {
    const ORDER: [FormField; 7] = [
        FormField::Title,
        FormField::Description,
        FormField::Priority,
        FormField::Status,
        FormField::SubtaskTitle,
        FormField::SubtaskDescription,
        FormField::Pool,
    ];

    fn position(&self) -> usize {
        Self::ORDER.iter().position(|f| f == self).unwrap_or(0)
    }

    pub fn next(&self) -> Self {
        Self::ORDER[(self.position() + 1) % Self::ORDER.len()]
    }

    pub fn previous(&self) -> Self {
        Self::ORDER[(self.position() + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }
}

/// Create/edit form: an edit session plus the widgets around it
pub struct TaskForm {
    pub session: EditSession,
    pub field: FormField,
    pub subtask_title: String,
    pub subtask_description: String,
    pub pool_cursor: usize,
}

impl TaskForm {
    fn new(session: EditSession) -> Self {
        Self {
            session,
            field: FormField::Title,
            subtask_title: String::new(),
            subtask_description: String::new(),
            pool_cursor: 0,
        }
    }

    fn current_text_mut(&mut self) -> Option<&mut String> {
        match self.field {
            FormField::Title => Some(&mut self.session.draft.title),
            FormField::Description => Some(&mut self.session.draft.description),
            FormField::SubtaskTitle => Some(&mut self.subtask_title),
            FormField::SubtaskDescription => Some(&mut self.subtask_description),
            _ => None,
        }
    }

    fn clamp_pool_cursor(&mut self) {
        let len = self.session.pool().len();
        if self.pool_cursor >= len {
            self.pool_cursor = len.saturating_sub(1);
        }
    }
}

/// AI suggestions waiting for the user to pick
#[derive(Debug, Clone)]
pub struct SuggestionPicker {
    pub suggestions: Vec<SubtaskSuggestion>,
    pub selected: Vec<bool>,
    pub cursor: usize,
}

impl SuggestionPicker {
    fn new(suggestions: Vec<SubtaskSuggestion>) -> Self {
        let selected = vec![false; suggestions.len()];
        Self {
            suggestions,
            selected,
            cursor: 0,
        }
    }

    fn chosen(&self) -> Vec<SubtaskSuggestion> {
        self.suggestions
            .iter()
            .zip(&self.selected)
            .filter(|(_, picked)| **picked)
            .map(|(s, _)| s.clone())
            .collect()
    }
}

/// Main application state
pub struct AppState {
    pub task_list: TaskList,
    pub timer: FocusTimer,
    pub selected_index: usize,
    pub ui_mode: UiMode,
    pub form: Option<TaskForm>,
    pub picker: Option<SuggestionPicker>,
    /// Task awaiting y/n before deletion
    pub confirm_delete: Option<String>,
    pub status_message: Option<StatusMessage>,
}

impl AppState {
    pub fn new(gateway: Rc<dyn Gateway>, timer_config: TimerConfig) -> Self {
        Self {
            task_list: TaskList::new(gateway),
            timer: FocusTimer::new(timer_config),
            selected_index: 0,
            ui_mode: UiMode::Normal,
            form: None,
            picker: None,
            confirm_delete: None,
            status_message: None,
        }
    }

    fn set_info(&mut self, text: impl Into<String>) {
        self.status_message = Some(StatusMessage {
            text: text.into(),
            is_error: false,
        });
    }

    fn set_error(&mut self, context: &str, err: &ClientError) {
        self.status_message = Some(StatusMessage {
            text: format!("{}: {}", context, err),
            is_error: true,
        });
    }

    /// Fetch tasks again; on failure the stale list stays on screen
    pub fn reload(&mut self) {
        match self.task_list.load() {
            Ok(()) => self.set_info(format!("{} tasks loaded", self.task_list.tasks().len())),
            Err(e) => self.set_error("Could not load tasks", &e),
        }
        self.clamp_selection();
    }

    pub fn rows(&self) -> Vec<FlatRow> {
        flatten_tasks(self.task_list.tasks())
    }

    fn clamp_selection(&mut self) {
        let len = self.rows().len();
        if self.selected_index >= len {
            self.selected_index = len.saturating_sub(1);
        }
    }

    fn select_task(&mut self, id: &str) {
        let tasks = self.task_list.tasks();
        if let Some(index) = tasks.iter().position(|t| t.id == id) {
            let rows = flatten_tasks(tasks);
            if let Some(row) = rows
                .iter()
                .position(|r| r.task_index == index && r.subtask_index.is_none())
            {
                self.selected_index = row;
            }
        }
    }

    pub fn selected_row(&self) -> Option<FlatRow> {
        self.rows().get(self.selected_index).cloned()
    }

    pub fn selected_task(&self) -> Option<&Task> {
        let row = self.selected_row()?;
        self.task_list.tasks().get(row.task_index)
    }

    /// The selected subtask, when a subtask row is selected
    pub fn selected_subtask(&self) -> Option<&Subtask> {
        let row = self.selected_row()?;
        let task = self.task_list.tasks().get(row.task_index)?;
        task.subtasks.get(row.subtask_index?)
    }

    pub fn move_selection_up(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
        }
    }

    pub fn move_selection_down(&mut self) {
        if self.selected_index + 1 < self.rows().len() {
            self.selected_index += 1;
        }
    }

    /// Open the form for a new task
    pub fn start_add_task(&mut self) {
        let session = EditSession::for_new_task(self.task_list.gateway());
        self.open_form(session);
    }

    /// Open the form for the selected task
    pub fn start_edit_task(&mut self) {
        let Some(task) = self.selected_task().cloned() else {
            return;
        };
        let session = EditSession::for_task(self.task_list.gateway(), &task);
        self.open_form(session);
    }

    fn open_form(&mut self, session: EditSession) {
        if let Some(e) = session.load_error() {
            self.set_error("Subtask pool unavailable", e);
        }
        self.form = Some(TaskForm::new(session));
        self.ui_mode = UiMode::EditingTask;
    }

    pub fn cancel_form(&mut self) {
        self.form = None;
        self.picker = None;
        self.ui_mode = UiMode::Normal;
    }

    /// Create or update the task; the form stays open on failure
    pub fn submit_form(&mut self) {
        let Some(form) = self.form.as_mut() else {
            return;
        };

        let result = match form.session.editing_task_id().map(str::to_string) {
            Some(id) => self
                .task_list
                .update(&id, &mut form.session)
                .map(|t| t.id.clone()),
            None => self
                .task_list
                .create(&mut form.session)
                .map(|t| t.id.clone()),
        };

        match result {
            Ok(id) => {
                self.form = None;
                self.ui_mode = UiMode::Normal;
                self.select_task(&id);
                self.set_info("Task saved");
            }
            Err(e) => self.set_error("Could not save task", &e),
        }
    }

    pub fn form_next_field(&mut self) {
        if let Some(form) = &mut self.form {
            form.field = form.field.next();
        }
    }

    pub fn form_previous_field(&mut self) {
        if let Some(form) = &mut self.form {
            form.field = form.field.previous();
        }
    }

    pub fn form_add_char(&mut self, c: char) {
        let Some(form) = &mut self.form else {
            return;
        };
        match form.field {
            FormField::Pool => match c {
                ' ' => self.form_toggle_link(),
                'd' => self.form_delete_pool_entry(),
                _ => {}
            },
            _ => {
                if let Some(text) = form.current_text_mut() {
                    text.push(c);
                }
            }
        }
    }

    pub fn form_backspace(&mut self) {
        if let Some(text) = self.form.as_mut().and_then(TaskForm::current_text_mut) {
            text.pop();
        }
    }

    /// ←/→ on the priority or status field
    pub fn form_cycle(&mut self, forward: bool) {
        let Some(form) = &mut self.form else {
            return;
        };
        let draft = &mut form.session.draft;
        match (form.field, forward) {
            (FormField::Priority, true) => draft.priority = draft.priority.next(),
            (FormField::Priority, false) => draft.priority = draft.priority.previous(),
            (FormField::Status, true) => draft.status = draft.status.next(),
            (FormField::Status, false) => draft.status = draft.status.previous(),
            _ => {}
        }
    }

    pub fn form_pool_up(&mut self) {
        if let Some(form) = &mut self.form {
            form.pool_cursor = form.pool_cursor.saturating_sub(1);
        }
    }

    pub fn form_pool_down(&mut self) {
        if let Some(form) = &mut self.form {
            if form.pool_cursor + 1 < form.session.pool().len() {
                form.pool_cursor += 1;
            }
        }
    }

    /// Enter inside the form; what it does depends on the focused field
    pub fn form_enter(&mut self) {
        let Some(field) = self.form.as_ref().map(|f| f.field) else {
            return;
        };
        match field {
            FormField::SubtaskTitle | FormField::SubtaskDescription => self.form_create_subtask(),
            FormField::Pool => self.form_toggle_link(),
            _ => self.submit_form(),
        }
    }

    pub fn form_create_subtask(&mut self) {
        let Some(form) = &mut self.form else {
            return;
        };
        let result = form
            .session
            .create_manual(&form.subtask_title, &form.subtask_description)
            .map(|entry| entry.title.clone());

        match result {
            Ok(title) => {
                form.subtask_title.clear();
                form.subtask_description.clear();
                form.field = FormField::SubtaskTitle;
                self.set_info(format!("Subtask \"{}\" added to the pool", title));
            }
            Err(e) => self.set_error("Could not create subtask", &e),
        }
    }

    pub fn form_toggle_link(&mut self) {
        if let Some(form) = &mut self.form {
            if let Some(entry) = form.session.pool().get(form.pool_cursor).cloned() {
                form.session.toggle_link(&entry.reference);
            }
        }
    }

    pub fn form_delete_pool_entry(&mut self) {
        if let Some(form) = &mut self.form {
            if let Some(entry) = form.session.pool().get(form.pool_cursor).cloned() {
                form.session.delete(&entry.reference);
                form.clamp_pool_cursor();
                info!(title = %entry.title, "Subtask removed from pool");
            }
        }
    }

    /// Ask the AI endpoint and open the picker
    pub fn request_suggestions(&mut self) {
        let Some(form) = &self.form else {
            return;
        };
        match form.session.generate_with_ai() {
            Ok(suggestions) if suggestions.is_empty() => self.set_info("No suggestions returned"),
            Ok(suggestions) => {
                self.picker = Some(SuggestionPicker::new(suggestions));
                self.ui_mode = UiMode::PickingSuggestions;
            }
            Err(e) => self.set_error("Could not get suggestions", &e),
        }
    }

    pub fn picker_up(&mut self) {
        if let Some(picker) = &mut self.picker {
            picker.cursor = picker.cursor.saturating_sub(1);
        }
    }

    pub fn picker_down(&mut self) {
        if let Some(picker) = &mut self.picker {
            if picker.cursor + 1 < picker.suggestions.len() {
                picker.cursor += 1;
            }
        }
    }

    pub fn picker_toggle(&mut self) {
        if let Some(picker) = &mut self.picker {
            if let Some(flag) = picker.selected.get_mut(picker.cursor) {
                *flag = !*flag;
            }
        }
    }

    /// Add the picked suggestions to the pool and link them
    pub fn picker_confirm(&mut self) {
        let chosen = self.picker.take().map(|p| p.chosen()).unwrap_or_default();
        self.ui_mode = UiMode::EditingTask;
        if let Some(form) = &mut self.form {
            let linked = form.session.accept_suggestions(&chosen);
            self.set_info(format!("{} suggested subtasks linked", linked));
        }
    }

    pub fn picker_cancel(&mut self) {
        self.picker = None;
        self.ui_mode = UiMode::EditingTask;
    }

    /// Ask for confirmation before deleting the selected task
    pub fn request_delete(&mut self) {
        if self.selected_subtask().is_some() {
            self.set_info("Select a task row to delete it");
            return;
        }
        if let Some(id) = self.selected_task().map(|t| t.id.clone()) {
            self.confirm_delete = Some(id);
            self.ui_mode = UiMode::ConfirmDelete;
        }
    }

    pub fn confirm_delete_yes(&mut self) {
        if let Some(id) = self.confirm_delete.take() {
            self.task_list.delete(&id);
            self.clamp_selection();
            self.set_info("Task deleted");
        }
        self.ui_mode = UiMode::Normal;
    }

    pub fn cancel_delete(&mut self) {
        self.confirm_delete = None;
        self.ui_mode = UiMode::Normal;
    }

    /// Advance the selected task or subtask to its next status
    pub fn cycle_selected_status(&mut self) {
        let result = if let Some(subtask) = self.selected_subtask() {
            let (id, next) = (subtask.id.clone(), subtask.status.next());
            self.task_list.change_subtask_status(&id, next.label())
        } else if let Some(task) = self.selected_task() {
            let (id, next) = (task.id.clone(), task.status.next());
            self.task_list.change_task_status(&id, next.label()).map(|_| ())
        } else {
            return;
        };

        if let Err(e) = result {
            self.set_error("Could not change status", &e);
        }
    }

    pub fn toggle_timer(&mut self) {
        self.timer.toggle();
    }

    pub fn reset_timer(&mut self) {
        self.timer.reset();
        self.set_info("Timer reset");
    }

    /// Feed elapsed seconds to the timer
    pub fn on_seconds(&mut self, seconds: usize) {
        for _ in 0..seconds {
            match self.timer.tick() {
                Some(TimerEvent::PhaseComplete(phase)) => {
                    let config = self.timer.config();
                    notifications::notify_phase_complete(phase, &config);
                    let (_, body) = notifications::phase_message(phase, &config);
                    self.set_info(body);
                }
                Some(TimerEvent::PhaseStarted(phase)) => {
                    info!(phase = phase.label(), "Timer phase started");
                }
                None => {}
            }
        }
    }
}
