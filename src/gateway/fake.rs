//! In-memory stand-in for the task API used by component tests.

use super::Gateway;
use crate::domain::{
    CreateSubtaskDto, CreateTaskDto, Priority, Status, Subtask, SubtaskSuggestion,
    SuggestionRequest, Task, UpdateSubtaskDto, UpdateTaskDto,
};
use crate::error::{ClientError, Result};
use chrono::{TimeZone, Utc};
use std::cell::RefCell;
use std::collections::HashMap;

/// How a failing operation fails
#[derive(Debug, Clone, Copy)]
enum Failure {
    Status(u16),
    Offline,
}

#[derive(Default)]
struct FakeState {
    tasks: Vec<Task>,
    subtasks: Vec<Subtask>,
    suggestions: Vec<SubtaskSuggestion>,
    calls: Vec<String>,
    /// op name -> (successes left before failing, failure)
    failures: HashMap<String, (usize, Failure)>,
    offline: bool,
    next_id: usize,
    created_tasks: Vec<CreateTaskDto>,
    created_subtasks: Vec<CreateSubtaskDto>,
    task_patches: Vec<(String, UpdateTaskDto)>,
}

/// Behaves like a tiny server: stores tasks and subtasks, assigns ids,
/// resolves `subtaskIds` into nested subtasks, and records every call.
#[derive(Default)]
pub struct FakeGateway {
    state: RefCell<FakeState>,
}

impl FakeGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_data(tasks: Vec<Task>, subtasks: Vec<Subtask>) -> Self {
        let fake = Self::new();
        {
            let mut state = fake.state.borrow_mut();
            state.tasks = tasks;
            state.subtasks = subtasks;
        }
        fake
    }

    pub fn set_suggestions(&self, suggestions: Vec<SubtaskSuggestion>) {
        self.state.borrow_mut().suggestions = suggestions;
    }

    /// Make `op` fail with a 500 from now on
    pub fn fail(&self, op: &str) {
        self.fail_after(op, 0);
    }

    /// Let `op` succeed `successes` more times, then fail with a 500
    pub fn fail_after(&self, op: &str, successes: usize) {
        self.state
            .borrow_mut()
            .failures
            .insert(op.to_string(), (successes, Failure::Status(500)));
    }

    /// Make `op` answer with the given status
    pub fn fail_with_status(&self, op: &str, status: u16) {
        self.state
            .borrow_mut()
            .failures
            .insert(op.to_string(), (0, Failure::Status(status)));
    }

    /// Make `op` fail as a transport error
    pub fn fail_unreachable(&self, op: &str) {
        self.state
            .borrow_mut()
            .failures
            .insert(op.to_string(), (0, Failure::Offline));
    }

    /// Every operation fails as a transport error
    pub fn go_offline(&self) {
        self.state.borrow_mut().offline = true;
    }

    pub fn go_online(&self) {
        let mut state = self.state.borrow_mut();
        state.offline = false;
        state.failures.clear();
    }

    pub fn calls(&self) -> Vec<String> {
        self.state.borrow().calls.clone()
    }

    pub fn call_count(&self, op: &str) -> usize {
        self.state.borrow().calls.iter().filter(|c| c.as_str() == op).count()
    }

    pub fn created_tasks(&self) -> Vec<CreateTaskDto> {
        self.state.borrow().created_tasks.clone()
    }

    pub fn created_subtasks(&self) -> Vec<CreateSubtaskDto> {
        self.state.borrow().created_subtasks.clone()
    }

    pub fn task_patches(&self) -> Vec<(String, UpdateTaskDto)> {
        self.state.borrow().task_patches.clone()
    }

    pub fn stored_tasks(&self) -> Vec<Task> {
        self.state.borrow().tasks.clone()
    }

    pub fn stored_subtasks(&self) -> Vec<Subtask> {
        self.state.borrow().subtasks.clone()
    }

    /// Record the call and apply any configured failure
    fn enter(&self, op: &str) -> Result<()> {
        let mut state = self.state.borrow_mut();
        state.calls.push(op.to_string());

        if state.offline {
            return Err(ClientError::RemoteUnavailable("connection refused".to_string()));
        }

        if let Some((remaining, failure)) = state.failures.get_mut(op) {
            if *remaining > 0 {
                *remaining -= 1;
                return Ok(());
            }
            return Err(match *failure {
                Failure::Status(status) => ClientError::RemoteRequestFailed {
                    status,
                    body: format!("{} failed", op),
                },
                Failure::Offline => ClientError::RemoteUnavailable("connection refused".to_string()),
            });
        }

        Ok(())
    }

    fn not_found(what: &str, id: &str) -> ClientError {
        ClientError::RemoteRequestFailed {
            status: 404,
            body: format!("{} {} not found", what, id),
        }
    }
}

impl FakeState {
    /// Fresh ids start at 100 so they never collide with fixture ids
    fn next_id(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{}{}", prefix, 100 + self.next_id)
    }

    fn resolve_subtasks(&self, ids: &[String]) -> Vec<Subtask> {
        ids.iter()
            .filter_map(|id| self.subtasks.iter().find(|s| &s.id == id).cloned())
            .collect()
    }
}

fn fixed_time() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 19, 12, 0, 0).unwrap()
}

impl Gateway for FakeGateway {
    fn list_tasks(&self) -> Result<Vec<Task>> {
        self.enter("list_tasks")?;
        Ok(self.state.borrow().tasks.clone())
    }

    fn get_task(&self, id: &str) -> Result<Task> {
        self.enter("get_task")?;
        let state = self.state.borrow();
        state
            .tasks
            .iter()
            .find(|t| t.id == id)
            .cloned()
            .ok_or_else(|| Self::not_found("task", id))
    }

    fn create_task(&self, task: &CreateTaskDto) -> Result<Task> {
        self.enter("create_task")?;
        let mut state = self.state.borrow_mut();
        state.created_tasks.push(task.clone());

        let created = Task {
            id: state.next_id("t"),
            title: task.title.clone(),
            description: task.description.clone(),
            priority: task.priority,
            status: task.status,
            subtasks: state.resolve_subtasks(&task.subtask_ids),
            created_at: fixed_time(),
            updated_at: fixed_time(),
        };
        state.tasks.insert(0, created.clone());
        Ok(created)
    }

    fn update_task(&self, id: &str, patch: &UpdateTaskDto) -> Result<Task> {
        self.enter("update_task")?;
        let mut state = self.state.borrow_mut();
        state.task_patches.push((id.to_string(), patch.clone()));

        let subtasks = patch
            .subtask_ids
            .as_ref()
            .map(|ids| state.resolve_subtasks(ids));
        let task = state
            .tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| Self::not_found("task", id))?;

        if let Some(title) = &patch.title {
            task.title = title.clone();
        }
        if let Some(description) = &patch.description {
            task.description = description.clone();
        }
        if let Some(priority) = patch.priority {
            task.priority = priority;
        }
        if let Some(status) = patch.status {
            task.status = status;
        }
        if let Some(subtasks) = subtasks {
            task.subtasks = subtasks;
        }
        task.updated_at = fixed_time();
        Ok(task.clone())
    }

    fn delete_task(&self, id: &str) -> Result<()> {
        self.enter("delete_task")?;
        let mut state = self.state.borrow_mut();
        let before = state.tasks.len();
        state.tasks.retain(|t| t.id != id);
        if state.tasks.len() == before {
            return Err(Self::not_found("task", id));
        }
        Ok(())
    }

    fn tasks_by_status(&self, status: Status) -> Result<Vec<Task>> {
        self.enter("tasks_by_status")?;
        let state = self.state.borrow();
        Ok(state.tasks.iter().filter(|t| t.status == status).cloned().collect())
    }

    fn tasks_by_priority(&self, priority: Priority) -> Result<Vec<Task>> {
        self.enter("tasks_by_priority")?;
        let state = self.state.borrow();
        Ok(state
            .tasks
            .iter()
            .filter(|t| t.priority == priority)
            .cloned()
            .collect())
    }

    fn link_subtask(&self, task_id: &str, subtask_id: &str) -> Result<()> {
        self.enter("link_subtask")?;
        let mut state = self.state.borrow_mut();
        let subtask = state
            .subtasks
            .iter()
            .find(|s| s.id == subtask_id)
            .cloned()
            .ok_or_else(|| Self::not_found("subtask", subtask_id))?;
        let task = state
            .tasks
            .iter_mut()
            .find(|t| t.id == task_id)
            .ok_or_else(|| Self::not_found("task", task_id))?;
        task.subtasks.push(subtask);
        Ok(())
    }

    fn unlink_subtask(&self, task_id: &str) -> Result<()> {
        self.enter("unlink_subtask")?;
        let mut state = self.state.borrow_mut();
        let task = state
            .tasks
            .iter_mut()
            .find(|t| t.id == task_id)
            .ok_or_else(|| Self::not_found("task", task_id))?;
        task.subtasks.clear();
        Ok(())
    }

    fn list_subtasks(&self) -> Result<Vec<Subtask>> {
        self.enter("list_subtasks")?;
        Ok(self.state.borrow().subtasks.clone())
    }

    fn get_subtask(&self, id: &str) -> Result<Subtask> {
        self.enter("get_subtask")?;
        let state = self.state.borrow();
        state
            .subtasks
            .iter()
            .find(|s| s.id == id)
            .cloned()
            .ok_or_else(|| Self::not_found("subtask", id))
    }

    fn create_subtask(&self, subtask: &CreateSubtaskDto) -> Result<Subtask> {
        self.enter("create_subtask")?;
        let mut state = self.state.borrow_mut();
        state.created_subtasks.push(subtask.clone());

        let created = Subtask {
            id: state.next_id("s"),
            title: subtask.title.clone(),
            description: subtask.description.clone(),
            status: subtask.status.unwrap_or_default(),
            created_at: fixed_time(),
            updated_at: fixed_time(),
        };
        state.subtasks.push(created.clone());
        Ok(created)
    }

    fn update_subtask(&self, id: &str, patch: &UpdateSubtaskDto) -> Result<Subtask> {
        self.enter("update_subtask")?;
        let mut state = self.state.borrow_mut();
        let subtask = state
            .subtasks
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| Self::not_found("subtask", id))?;

        if let Some(title) = &patch.title {
            subtask.title = title.clone();
        }
        if let Some(description) = &patch.description {
            subtask.description = Some(description.clone());
        }
        if let Some(status) = patch.status {
            subtask.status = status;
        }
        subtask.updated_at = fixed_time();
        Ok(subtask.clone())
    }

    fn delete_subtask(&self, id: &str) -> Result<()> {
        self.enter("delete_subtask")?;
        let mut state = self.state.borrow_mut();
        let before = state.subtasks.len();
        state.subtasks.retain(|s| s.id != id);
        if state.subtasks.len() == before {
            return Err(Self::not_found("subtask", id));
        }
        Ok(())
    }

    fn subtasks_by_status(&self, status: Status) -> Result<Vec<Subtask>> {
        self.enter("subtasks_by_status")?;
        let state = self.state.borrow();
        Ok(state
            .subtasks
            .iter()
            .filter(|s| s.status == status)
            .cloned()
            .collect())
    }

    fn suggest_subtasks(&self, _request: &SuggestionRequest) -> Result<Vec<SubtaskSuggestion>> {
        self.enter("suggest_subtasks")?;
        Ok(self.state.borrow().suggestions.clone())
    }
}
