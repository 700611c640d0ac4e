pub mod view;

use crate::io::storage::{Storage, StorageError};
use crate::model::task::{Priority, Task, TaskDraft};

/// Storage slot holding the task list.
pub const TASKS_KEY: &str = "tasks";

/// Error type for store operations. Only persisting can fail; loading is
/// fail-soft.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("could not encode tasks: {0}")]
    Encode(#[from] serde_json::Error),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

// ---------------------------------------------------------------------------
// List operations
// ---------------------------------------------------------------------------

/// Read the persisted task list. An absent or malformed slot loads as an
/// empty list; this never errors and never panics.
pub fn load_tasks(storage: &impl Storage) -> Vec<Task> {
    storage
        .get(TASKS_KEY)
        .and_then(|raw| serde_json::from_str(&raw).ok())
        .unwrap_or_default()
}

/// Serialize the full list into the slot, overwriting prior content.
pub fn persist_tasks(storage: &mut impl Storage, tasks: &[Task]) -> Result<(), StoreError> {
    let raw = serde_json::to_string(tasks)?;
    storage.set(TASKS_KEY, &raw)?;
    Ok(())
}

/// Append the task a draft describes, returning the new list.
///
/// Drafts whose text is empty after trimming are rejected (`None`). The
/// stored text is the draft text as given; trimming only applies to the
/// emptiness check. The priority label maps High→3, Medium→2, and anything
/// else (including unrecognized labels) to Low.
pub fn add_task(tasks: &[Task], draft: &TaskDraft) -> Option<Vec<Task>> {
    if draft.text.trim().is_empty() {
        return None;
    }
    let task = Task {
        text: draft.text.clone(),
        priority: Priority::from_label(&draft.priority),
        due_date: draft.due_date.clone(),
        due_time: draft.due_time.clone(),
        category: draft.category.clone(),
    };
    let mut next = tasks.to_vec();
    next.push(task);
    Some(next)
}

/// Remove the task at `index`, preserving the relative order of the rest.
/// An out-of-range index returns the list unchanged.
pub fn remove_task(tasks: &[Task], index: usize) -> Vec<Task> {
    let mut next = tasks.to_vec();
    if index < next.len() {
        next.remove(index);
    }
    next
}

// ---------------------------------------------------------------------------
// TaskStore
// ---------------------------------------------------------------------------

/// Owner of the canonical in-memory task list.
///
/// Write-through: every mutation persists the new list before replacing the
/// in-memory one, so storage and memory are identical whenever a mutation
/// returns. On a failed write both keep the old list.
pub struct TaskStore<S: Storage> {
    storage: S,
    tasks: Vec<Task>,
}

impl<S: Storage> TaskStore<S> {
    /// Open the store, loading whatever the slot currently holds.
    pub fn open(storage: S) -> TaskStore<S> {
        let tasks = load_tasks(&storage);
        TaskStore { storage, tasks }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Add the task described by `draft`. Returns `Ok(false)` when the
    /// draft is rejected (empty text) and the list is left untouched.
    pub fn add(&mut self, draft: &TaskDraft) -> Result<bool, StoreError> {
        match add_task(&self.tasks, draft) {
            Some(next) => {
                persist_tasks(&mut self.storage, &next)?;
                self.tasks = next;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Remove the task at `index`. Returns `Ok(false)` for an out-of-range
    /// index; nothing is removed and nothing is written.
    pub fn remove(&mut self, index: usize) -> Result<bool, StoreError> {
        if index >= self.tasks.len() {
            return Ok(false);
        }
        let next = remove_task(&self.tasks, index);
        persist_tasks(&mut self.storage, &next)?;
        self.tasks = next;
        Ok(true)
    }
}
