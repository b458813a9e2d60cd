//! Subtask pool reconciliation for one create/edit session.
//!
//! A session owns the task draft and the pool of subtasks that may be linked
//! to it. The pool mixes subtasks already stored by the API with pending AI
//! suggestions that only exist locally until the draft is submitted.

use crate::domain::{
    CreateSubtaskDto, Status, Subtask, SubtaskRef, SubtaskSuggestion, SuggestionRequest, Task,
    TaskDraft,
};
use crate::error::{ClientError, Result};
use crate::gateway::Gateway;
use std::collections::{HashMap, HashSet};
use std::rc::Rc;
use tracing::{debug, info, warn};

/// One subtask offered for linking
#[derive(Debug, Clone, PartialEq)]
pub struct PoolEntry {
    pub reference: SubtaskRef,
    pub title: String,
    pub description: Option<String>,
    pub status: Status,
}

impl PoolEntry {
    fn persisted(subtask: &Subtask) -> Self {
        Self {
            reference: SubtaskRef::Persisted(subtask.id.clone()),
            title: subtask.title.clone(),
            description: subtask.description.clone(),
            status: subtask.status,
        }
    }

    fn pending(suggestion: &SubtaskSuggestion) -> Self {
        Self {
            reference: SubtaskRef::new_pending(),
            title: suggestion.title.clone(),
            description: Some(suggestion.description.clone()),
            status: Status::Pending,
        }
    }

    /// Exact title + description match against a suggestion
    fn matches(&self, suggestion: &SubtaskSuggestion) -> bool {
        self.title == suggestion.title
            && self.description.as_deref().unwrap_or("") == suggestion.description
    }

    pub fn is_pending(&self) -> bool {
        self.reference.is_pending()
    }
}

/// Subtasks that may be offered to the task being edited: everything not
/// linked to some *other* task.
pub fn available_subtasks(subtasks: &[Subtask], tasks: &[Task], editing: Option<&str>) -> Vec<Subtask> {
    let assigned: HashSet<&str> = tasks
        .iter()
        .filter(|t| Some(t.id.as_str()) != editing)
        .flat_map(|t| t.subtask_ids())
        .collect();

    subtasks
        .iter()
        .filter(|s| !assigned.contains(s.id.as_str()))
        .cloned()
        .collect()
}

/// Draft plus subtask pool for one form session
pub struct EditSession {
    gateway: Rc<dyn Gateway>,
    editing: Option<String>,
    pub draft: TaskDraft,
    pool: Vec<PoolEntry>,
    /// Pending subtasks saved by an earlier submit attempt that failed later on
    promoted: HashMap<SubtaskRef, Subtask>,
    load_error: Option<ClientError>,
}

impl EditSession {
    /// Session for a brand new task
    pub fn for_new_task(gateway: Rc<dyn Gateway>) -> Self {
        Self::initialize(gateway, None, TaskDraft::new())
    }

    /// Session editing an existing task
    pub fn for_task(gateway: Rc<dyn Gateway>, task: &Task) -> Self {
        Self::initialize(gateway, Some(task.id.clone()), TaskDraft::from_task(task))
    }

    /// Fetch subtasks and tasks and build the pool. A fetch failure leaves the
    /// pool empty; the session stays usable for manual entry.
    fn initialize(gateway: Rc<dyn Gateway>, editing: Option<String>, draft: TaskDraft) -> Self {
        let fetched = gateway
            .list_subtasks()
            .and_then(|subtasks| gateway.list_tasks().map(|tasks| (subtasks, tasks)));

        let (pool, load_error) = match fetched {
            Ok((subtasks, tasks)) => {
                let available = available_subtasks(&subtasks, &tasks, editing.as_deref());
                debug!(
                    total = subtasks.len(),
                    available = available.len(),
                    "Subtask pool loaded"
                );
                (available.iter().map(PoolEntry::persisted).collect(), None)
            }
            Err(e) => {
                warn!(error = %e, "Could not load subtask pool, starting empty");
                (Vec::new(), Some(e))
            }
        };

        Self {
            gateway,
            editing,
            draft,
            pool,
            promoted: HashMap::new(),
            load_error,
        }
    }

    /// Id of the task being edited (None for a new task)
    pub fn editing_task_id(&self) -> Option<&str> {
        self.editing.as_deref()
    }

    pub fn pool(&self) -> &[PoolEntry] {
        &self.pool
    }

    /// Why the pool could not be loaded, if it could not
    pub fn load_error(&self) -> Option<&ClientError> {
        self.load_error.as_ref()
    }

    pub fn is_linked(&self, subtask: &SubtaskRef) -> bool {
        self.draft.is_linked(subtask)
    }

    /// Create a subtask right away and add it to the pool, unlinked
    pub fn create_manual(&mut self, title: &str, description: &str) -> Result<&PoolEntry> {
        let title = title.trim();
        if title.is_empty() {
            return Err(ClientError::Validation("subtask title is required".to_string()));
        }
        let description = description.trim();

        let created = self.gateway.create_subtask(&CreateSubtaskDto {
            title: title.to_string(),
            description: (!description.is_empty()).then(|| description.to_string()),
            status: Some(Status::Pending),
        })?;
        info!(id = %created.id, "Subtask created");

        self.pool.push(PoolEntry::persisted(&created));
        Ok(&self.pool[self.pool.len() - 1])
    }

    /// Ask the AI endpoint for ideas based on the draft. The pool is untouched.
    pub fn generate_with_ai(&self) -> Result<Vec<SubtaskSuggestion>> {
        if self.draft.title.trim().is_empty() || self.draft.description.trim().is_empty() {
            return Err(ClientError::Validation(
                "fill in the task title and description before asking for suggestions".to_string(),
            ));
        }

        let suggestions = self.gateway.suggest_subtasks(&SuggestionRequest {
            title: self.draft.title.clone(),
            description: self.draft.description.clone(),
            priority: self.draft.priority,
        })?;
        debug!(count = suggestions.len(), "AI suggestions received");
        Ok(suggestions)
    }

    /// Add chosen suggestions to the pool as pending subtasks.
    ///
    /// Returns the reference for every selection; a selection that already
    /// exists in the pool (same title and description) maps to that entry.
    pub fn confirm_selections(&mut self, selections: &[SubtaskSuggestion]) -> Vec<SubtaskRef> {
        let mut refs = Vec::with_capacity(selections.len());

        for suggestion in selections {
            if let Some(existing) = self.pool.iter().find(|e| e.matches(suggestion)) {
                refs.push(existing.reference.clone());
                continue;
            }
            let entry = PoolEntry::pending(suggestion);
            debug!(local_id = %entry.reference.id(), "Pending subtask added");
            refs.push(entry.reference.clone());
            self.pool.push(entry);
        }

        refs
    }

    /// Confirm selections and link them to the draft
    pub fn accept_suggestions(&mut self, selections: &[SubtaskSuggestion]) -> usize {
        let refs = self.confirm_selections(selections);
        refs.into_iter().filter(|r| self.draft.link(r.clone())).count()
    }

    /// Link a subtask to the draft; already linked is a no-op
    pub fn link(&mut self, subtask: &SubtaskRef) -> bool {
        self.draft.link(subtask.clone())
    }

    /// Unlink a subtask from the draft; not linked is a no-op
    pub fn unlink(&mut self, subtask: &SubtaskRef) -> bool {
        self.draft.unlink(subtask)
    }

    pub fn toggle_link(&mut self, subtask: &SubtaskRef) {
        if !self.unlink(subtask) {
            self.link(subtask);
        }
    }

    /// Remove a subtask from the pool and the draft, then delete it remotely.
    ///
    /// Local state wins for the rest of the session: a failed remote delete is
    /// only logged. Pending subtasks were never stored, so no request is sent.
    pub fn delete(&mut self, subtask: &SubtaskRef) {
        self.pool.retain(|e| &e.reference != subtask);
        self.draft.unlink(subtask);

        let id = match subtask {
            SubtaskRef::Persisted(id) => id.clone(),
            SubtaskRef::Pending(local_id) => {
                if let Some(saved) = self.promoted.remove(subtask) {
                    saved.id
                } else {
                    debug!(%local_id, "Dropped pending subtask");
                    return;
                }
            }
        };

        if let Err(e) = self.gateway.delete_subtask(&id) {
            warn!(%id, error = %e, "Subtask delete failed, keeping it removed locally");
        }
    }

    /// Persist every pending subtask linked to the draft and return the
    /// fully resolved id list.
    ///
    /// Any create failure aborts with `SubtaskPersistFailed` and leaves the
    /// draft untouched. Subtasks saved before the failure are remembered so a
    /// retry does not create them twice.
    pub fn promote_and_resolve(&mut self) -> Result<Vec<String>> {
        let pending: Vec<SubtaskRef> = self
            .draft
            .subtasks
            .iter()
            .filter(|s| s.is_pending())
            .cloned()
            .collect();

        for reference in &pending {
            if self.promoted.contains_key(reference) {
                continue;
            }

            let entry = self
                .pool
                .iter()
                .find(|e| &e.reference == reference)
                .ok_or_else(|| {
                    ClientError::Validation(format!("unknown pending subtask {}", reference.id()))
                })?;

            let dto = CreateSubtaskDto {
                title: entry.title.clone(),
                description: entry.description.clone().filter(|d| !d.is_empty()),
                status: Some(Status::Pending),
            };

            match self.gateway.create_subtask(&dto) {
                Ok(created) => {
                    info!(local_id = %reference.id(), id = %created.id, "Pending subtask saved");
                    self.promoted.insert(reference.clone(), created);
                }
                Err(e) => {
                    warn!(title = %dto.title, error = %e, "Could not save pending subtask");
                    return Err(ClientError::SubtaskPersistFailed {
                        title: dto.title,
                        source: Box::new(e),
                    });
                }
            }
        }

        for reference in pending {
            if let Some(created) = self.promoted.remove(&reference) {
                let persisted = SubtaskRef::Persisted(created.id.clone());
                self.draft.replace(&reference, persisted);
                if let Some(entry) = self.pool.iter_mut().find(|e| e.reference == reference) {
                    *entry = PoolEntry::persisted(&created);
                }
            }
        }

        self.draft.persisted_ids().ok_or_else(|| {
            ClientError::Validation("draft still references unsaved subtasks".to_string())
        })
    }
}
