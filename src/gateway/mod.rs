//! Boundary to the task API.
//!
//! Every component receives a `Gateway` explicitly so that tests can swap the
//! HTTP client for an in-memory fake.

pub mod http;

#[cfg(test)]
pub mod fake;

pub use http::HttpGateway;

use crate::domain::{
    CreateSubtaskDto, CreateTaskDto, Priority, Status, Subtask, SubtaskSuggestion,
    SuggestionRequest, Task, UpdateSubtaskDto, UpdateTaskDto,
};
use crate::error::Result;

/// One method per API operation. Each call issues exactly one request and
/// blocks until it completes; there is no retry, caching or batching.
pub trait Gateway {
    fn list_tasks(&self) -> Result<Vec<Task>>;
    fn get_task(&self, id: &str) -> Result<Task>;
    fn create_task(&self, task: &CreateTaskDto) -> Result<Task>;
    fn update_task(&self, id: &str, patch: &UpdateTaskDto) -> Result<Task>;
    fn delete_task(&self, id: &str) -> Result<()>;
    fn tasks_by_status(&self, status: Status) -> Result<Vec<Task>>;
    fn tasks_by_priority(&self, priority: Priority) -> Result<Vec<Task>>;

    /// `POST /api/tasks/{id}/subtask`
    fn link_subtask(&self, task_id: &str, subtask_id: &str) -> Result<()>;
    /// `DELETE /api/tasks/{id}/subtask`
    fn unlink_subtask(&self, task_id: &str) -> Result<()>;

    fn list_subtasks(&self) -> Result<Vec<Subtask>>;
    fn get_subtask(&self, id: &str) -> Result<Subtask>;
    fn create_subtask(&self, subtask: &CreateSubtaskDto) -> Result<Subtask>;
    fn update_subtask(&self, id: &str, patch: &UpdateSubtaskDto) -> Result<Subtask>;
    fn delete_subtask(&self, id: &str) -> Result<()>;
    fn subtasks_by_status(&self, status: Status) -> Result<Vec<Subtask>>;

    /// Ask the AI endpoint for subtask ideas; nothing is stored
    fn suggest_subtasks(&self, request: &SuggestionRequest) -> Result<Vec<SubtaskSuggestion>>;
}
