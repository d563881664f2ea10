//! Client-side todo state manager.
//!
//! # Overview
//! `TodoStore` owns the local copy of the task list together with the loading
//! flag, the last error, and the input buffer. Its async methods are the only
//! mutators; callers observe state through `snapshot()` and the accessors.
//!
//! # Design
//! - Pessimistic updates: every mutator issues the remote call first and
//!   touches `tasks` only with the resolved result. A failed call leaves
//!   `tasks` exactly as it was.
//! - Each result is applied to whatever `tasks` looks like when the response
//!   lands, by replacing, removing, or appending only the affected entries.
//!   Operations on different ids therefore commute.
//! - Two in-flight operations on the same id are not serialized; the response
//!   that lands last wins.
//! - The session mutex is only held for short synchronous sections and never
//!   across an `.await`, so operations can run concurrently on one task.
//! - Remaining and completed counts are computed from `tasks` on every read.

use parking_lot::Mutex;
use tracing::{debug, info, warn};

use crate::error::{ApiError, Mutation, StoreError};
use crate::resource::TaskResource;
use crate::types::{Task, TaskId, UpdateTask};

#[derive(Debug, Default)]
struct Session {
    tasks: Vec<Task>,
    loads_in_flight: usize,
    last_error: Option<StoreError>,
    input: String,
}

/// Point-in-time copy of the store's state, suitable for rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoSnapshot {
    pub tasks: Vec<Task>,
    pub pending: bool,
    pub last_error: Option<StoreError>,
    pub input: String,
}

impl TodoSnapshot {
    pub fn remaining(&self) -> usize {
        remaining(&self.tasks)
    }

    pub fn completed_count(&self) -> usize {
        completed_count(&self.tasks)
    }

    /// Whether a clear-completed action should be offered.
    pub fn can_clear_completed(&self) -> bool {
        self.completed_count() > 0
    }

    /// "1 task remaining", "3 tasks remaining".
    pub fn remaining_label(&self) -> String {
        let n = self.remaining();
        let noun = if n == 1 { "task" } else { "tasks" };
        format!("{n} {noun} remaining")
    }
}

fn remaining(tasks: &[Task]) -> usize {
    tasks.iter().filter(|t| !t.completed).count()
}

fn completed_count(tasks: &[Task]) -> usize {
    tasks.iter().filter(|t| t.completed).count()
}

/// Holds `pending` up for as long as it lives.
struct PendingGuard<'a> {
    session: &'a Mutex<Session>,
}

impl<'a> PendingGuard<'a> {
    fn acquire(session: &'a Mutex<Session>) -> Self {
        session.lock().loads_in_flight += 1;
        Self { session }
    }
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        let mut session = self.session.lock();
        session.loads_in_flight = session.loads_in_flight.saturating_sub(1);
    }
}

/// The todo state manager.
pub struct TodoStore<R> {
    resource: R,
    session: Mutex<Session>,
}

impl<R: TaskResource> TodoStore<R> {
    /// Create an empty store. Call [`TodoStore::load`] to populate it.
    pub fn new(resource: R) -> Self {
        Self {
            resource,
            session: Mutex::new(Session::default()),
        }
    }

    pub fn resource(&self) -> &R {
        &self.resource
    }

    pub fn snapshot(&self) -> TodoSnapshot {
        let session = self.session.lock();
        TodoSnapshot {
            tasks: session.tasks.clone(),
            pending: session.loads_in_flight > 0,
            last_error: session.last_error,
            input: session.input.clone(),
        }
    }

    pub fn tasks(&self) -> Vec<Task> {
        self.session.lock().tasks.clone()
    }

    pub fn pending(&self) -> bool {
        self.session.lock().loads_in_flight > 0
    }

    pub fn last_error(&self) -> Option<StoreError> {
        self.session.lock().last_error
    }

    pub fn input(&self) -> String {
        self.session.lock().input.clone()
    }

    pub fn remaining(&self) -> usize {
        remaining(&self.session.lock().tasks)
    }

    pub fn completed_count(&self) -> usize {
        completed_count(&self.session.lock().tasks)
    }

    /// Replace the input buffer.
    pub fn set_input(&self, text: &str) {
        let mut session = self.session.lock();
        session.input.clear();
        session.input.push_str(text);
    }

    /// Fetch the full list from the server and replace local `tasks` with it.
    pub async fn load(&self) {
        let _pending = PendingGuard::acquire(&self.session);
        match self.resource.list().await {
            Ok(tasks) => {
                info!(count = tasks.len(), "loaded todos");
                let mut session = self.session.lock();
                session.tasks = tasks;
                session.last_error = None;
            }
            Err(err) => self.fail(StoreError::LoadFailure, &err),
        }
    }

    /// Put `text` in the input buffer and submit it.
    pub async fn add(&self, text: &str) {
        self.set_input(text);
        self.submit().await;
    }

    /// Create a task from the input buffer. Blank input is ignored without a
    /// network call. On failure the buffer is kept so the user can retry.
    pub async fn submit(&self) {
        let text = self.session.lock().input.clone();
        if text.trim().is_empty() {
            debug!("ignoring blank input");
            return;
        }

        match self.resource.create(&text).await {
            Ok(task) => {
                info!(id = %task.id, "added todo");
                let mut session = self.session.lock();
                session.tasks.push(task);
                session.input.clear();
                session.last_error = None;
            }
            Err(err) => self.fail(StoreError::MutationFailure(Mutation::Add), &err),
        }
    }

    /// Flip `completed` relative to the current local value of `id`.
    pub async fn toggle(&self, id: &TaskId) {
        let current = self
            .session
            .lock()
            .tasks
            .iter()
            .find(|t| &t.id == id)
            .map(|t| t.completed);
        let Some(completed) = current else {
            debug!(%id, "toggle of unknown todo ignored");
            return;
        };

        match self.resource.update(id, &UpdateTask::completed(!completed)).await {
            Ok(updated) => {
                info!(%id, completed = updated.completed, "toggled todo");
                let mut session = self.session.lock();
                if let Some(slot) = session.tasks.iter_mut().find(|t| &t.id == id) {
                    *slot = updated;
                }
                session.last_error = None;
            }
            Err(err) => self.fail(StoreError::MutationFailure(Mutation::Toggle), &err),
        }
    }

    pub async fn delete(&self, id: &TaskId) {
        match self.resource.delete(id).await {
            Ok(()) => {
                info!(%id, "deleted todo");
                let mut session = self.session.lock();
                session.tasks.retain(|t| &t.id != id);
                session.last_error = None;
            }
            Err(err) => self.fail(StoreError::MutationFailure(Mutation::Delete), &err),
        }
    }

    /// Clear completed tasks on the server, then drop every locally completed
    /// entry without refetching.
    pub async fn clear_completed(&self) {
        match self.resource.clear_completed().await {
            Ok(()) => {
                let mut session = self.session.lock();
                let before = session.tasks.len();
                session.tasks.retain(|t| !t.completed);
                info!(cleared = before - session.tasks.len(), "cleared completed todos");
                session.last_error = None;
            }
            Err(err) => self.fail(StoreError::MutationFailure(Mutation::ClearCompleted), &err),
        }
    }

    fn fail(&self, error: StoreError, cause: &ApiError) {
        warn!(cause = %cause, "{error}");
        self.session.lock().last_error = Some(error);
    }
}
