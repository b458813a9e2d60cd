//! In-memory task list kept in step with the API.

use crate::domain::{CreateTaskDto, Status, Task, UpdateSubtaskDto, UpdateTaskDto};
use crate::error::{ClientError, Result};
use crate::gateway::Gateway;
use crate::session::EditSession;
use std::rc::Rc;
use tracing::{debug, info, warn};

/// Owns the authoritative list of tasks shown to the user
pub struct TaskList {
    gateway: Rc<dyn Gateway>,
    tasks: Vec<Task>,
    /// Deletes that did not reach the API yet; retried on every load
    pending_deletes: Vec<String>,
}

fn parse_status(label: &str) -> Result<Status> {
    Status::from_label(label).ok_or_else(|| ClientError::InvalidStatus(label.to_string()))
}

impl TaskList {
    pub fn new(gateway: Rc<dyn Gateway>) -> Self {
        Self {
            gateway,
            tasks: Vec::new(),
            pending_deletes: Vec::new(),
        }
    }

    pub fn gateway(&self) -> Rc<dyn Gateway> {
        Rc::clone(&self.gateway)
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn pending_deletes(&self) -> &[String] {
        &self.pending_deletes
    }

    /// Replace the list with the server's. On failure the current list stays.
    ///
    /// Deletes that failed earlier are re-sent first; tasks whose delete is
    /// still unsettled stay hidden.
    pub fn load(&mut self) -> Result<()> {
        let fetched = self.gateway.list_tasks().map_err(|e| {
            warn!(error = %e, "Could not load tasks, keeping current list");
            e
        })?;

        let intents = self.pending_deletes.clone();
        self.settle_pending_deletes();

        self.tasks = fetched
            .into_iter()
            .filter(|t| !intents.contains(&t.id))
            .collect();
        debug!(count = self.tasks.len(), "Tasks loaded");
        Ok(())
    }

    fn settle_pending_deletes(&mut self) {
        let gateway = Rc::clone(&self.gateway);
        self.pending_deletes.retain(|id| match gateway.delete_task(id) {
            Ok(()) => {
                info!(%id, "Queued delete settled");
                false
            }
            Err(e) if e.is_status(404) => {
                debug!(%id, "Queued delete already gone");
                false
            }
            Err(e) => {
                warn!(%id, error = %e, "Queued delete still failing");
                true
            }
        });
    }

    /// Submit a new task from an edit session and prepend the result
    pub fn create(&mut self, session: &mut EditSession) -> Result<&Task> {
        session.draft.validate()?;
        let subtask_ids = session.promote_and_resolve()?;

        let draft = &session.draft;
        let created = self.gateway.create_task(&CreateTaskDto {
            title: draft.title.trim().to_string(),
            description: draft.description.trim().to_string(),
            priority: draft.priority,
            status: draft.status,
            subtask_ids,
        })?;
        info!(id = %created.id, "Task created");

        self.tasks.insert(0, created);
        Ok(&self.tasks[0])
    }

    /// Submit edits to an existing task and replace it in place.
    ///
    /// Returns the server's copy, which is only stored when the task is
    /// already listed.
    pub fn update(&mut self, id: &str, session: &mut EditSession) -> Result<Task> {
        session.draft.validate()?;
        let subtask_ids = session.promote_and_resolve()?;

        let draft = &session.draft;
        let patch = UpdateTaskDto {
            title: Some(draft.title.trim().to_string()),
            description: Some(draft.description.trim().to_string()),
            priority: Some(draft.priority),
            status: Some(draft.status),
            subtask_ids: Some(subtask_ids),
        };
        let updated = self.gateway.update_task(id, &patch)?;
        info!(%id, "Task updated");

        self.replace(&updated);
        Ok(updated)
    }

    /// Remove a task from the list right away, then delete it remotely.
    ///
    /// The removal is never rolled back. A failed delete is queued and
    /// retried on the next `load`.
    pub fn delete(&mut self, id: &str) {
        self.tasks.retain(|t| t.id != id);

        match self.gateway.delete_task(id) {
            Ok(()) => info!(%id, "Task deleted"),
            Err(e) if e.is_status(404) => debug!(%id, "Task already deleted"),
            Err(e) => {
                warn!(%id, error = %e, "Task delete failed, queued for retry");
                if !self.pending_deletes.iter().any(|p| p == id) {
                    self.pending_deletes.push(id.to_string());
                }
            }
        }
    }

    /// Set a task's status from its protocol label
    pub fn change_task_status(&mut self, id: &str, label: &str) -> Result<Task> {
        let status = parse_status(label)?;
        let updated = self
            .gateway
            .update_task(id, &UpdateTaskDto::status_only(status))?;
        debug!(%id, status = status.label(), "Task status changed");
        self.replace(&updated);
        Ok(updated)
    }

    /// Set a subtask's status and refresh it inside the task that holds it
    pub fn change_subtask_status(&mut self, subtask_id: &str, label: &str) -> Result<()> {
        let status = parse_status(label)?;
        let updated = self.gateway.update_subtask(
            subtask_id,
            &UpdateSubtaskDto {
                status: Some(status),
                ..UpdateSubtaskDto::default()
            },
        )?;

        let owner = self
            .tasks
            .iter_mut()
            .find(|t| t.has_subtask(subtask_id));
        match owner {
            Some(task) => {
                for subtask in task.subtasks.iter_mut().filter(|s| s.id == subtask_id) {
                    *subtask = updated.clone();
                }
            }
            None => debug!(%subtask_id, "Updated subtask is not linked to a listed task"),
        }
        Ok(())
    }

    pub fn count_by_status(&self, status: Status) -> usize {
        self.tasks.iter().filter(|t| t.status == status).count()
    }

    pub fn tasks_with_status(&self, status: Status) -> Vec<&Task> {
        self.tasks.iter().filter(|t| t.status == status).collect()
    }

    /// Swap in a task returned by the API, matching by id.
    /// Tasks that are not listed, or are queued for delete, stay out.
    fn replace(&mut self, task: &Task) {
        if self.pending_deletes.iter().any(|p| *p == task.id) {
            debug!(id = %task.id, "Ignoring update for a task queued for delete");
            return;
        }
        match self.tasks.iter_mut().find(|t| t.id == task.id) {
            Some(slot) => *slot = task.clone(),
            None => debug!(id = %task.id, "Updated task is not listed"),
        }
    }
}
