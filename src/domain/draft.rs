use super::enums::{Priority, Status};
use super::task::Task;
use crate::error::{ClientError, Result};
use uuid::Uuid;

/// Reserved prefix for identities that only exist on this client
pub const PENDING_PREFIX: &str = "ai-";

/// Reference to a subtask from a draft or the subtask pool.
///
/// Server identities and client-only identities live in separate variants so
/// that a pending id can never be sent where the API expects a stored one.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SubtaskRef {
    /// Identity assigned by the API
    Persisted(String),
    /// Temporary identity of an AI suggestion not saved yet
    Pending(String),
}

impl SubtaskRef {
    /// Fresh pending identity (`ai-<uuid>`)
    pub fn new_pending() -> Self {
        Self::Pending(format!("{}{}", PENDING_PREFIX, Uuid::new_v4()))
    }

    pub fn id(&self) -> &str {
        match self {
            Self::Persisted(id) | Self::Pending(id) => id,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending(_))
    }

    pub fn persisted_id(&self) -> Option<&str> {
        match self {
            Self::Persisted(id) => Some(id),
            Self::Pending(_) => None,
        }
    }
}

/// Form-scoped working copy of a task being created or edited
#[derive(Debug, Clone, PartialEq)]
pub struct TaskDraft {
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub status: Status,
    /// Linked subtasks, in link order
    pub subtasks: Vec<SubtaskRef>,
}

impl TaskDraft {
    /// Empty draft for a new task (Media / pendiente)
    pub fn new() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            priority: Priority::Medium,
            status: Status::Pending,
            subtasks: Vec::new(),
        }
    }

    /// Draft pre-filled from an existing task
    pub fn from_task(task: &Task) -> Self {
        Self {
            title: task.title.clone(),
            description: task.description.clone(),
            priority: task.priority,
            status: task.status,
            subtasks: task
                .subtask_ids()
                .map(|id| SubtaskRef::Persisted(id.to_string()))
                .collect(),
        }
    }

    pub fn is_linked(&self, subtask: &SubtaskRef) -> bool {
        self.subtasks.contains(subtask)
    }

    /// Link a subtask; returns false if it was already linked
    pub fn link(&mut self, subtask: SubtaskRef) -> bool {
        if self.is_linked(&subtask) {
            return false;
        }
        self.subtasks.push(subtask);
        true
    }

    /// Unlink a subtask; returns false if it was not linked
    pub fn unlink(&mut self, subtask: &SubtaskRef) -> bool {
        let before = self.subtasks.len();
        self.subtasks.retain(|s| s != subtask);
        self.subtasks.len() != before
    }

    /// Swap one reference for another wherever it appears
    pub fn replace(&mut self, from: &SubtaskRef, to: SubtaskRef) {
        for subtask in &mut self.subtasks {
            if subtask == from {
                *subtask = to.clone();
            }
        }
    }

    pub fn has_pending(&self) -> bool {
        self.subtasks.iter().any(SubtaskRef::is_pending)
    }

    /// Linked ids, or None while any linked subtask is still pending
    pub fn persisted_ids(&self) -> Option<Vec<String>> {
        self.subtasks
            .iter()
            .map(|s| s.persisted_id().map(str::to_string))
            .collect()
    }

    /// Title and description are both required before submit
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(ClientError::Validation("task title is required".to_string()));
        }
        if self.description.trim().is_empty() {
            return Err(ClientError::Validation(
                "task description is required".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for TaskDraft {
    fn default() -> Self {
        Self::new()
    }
}
