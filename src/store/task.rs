//! Background tasks ("sagas") driven by dispatched actions.
//!
//! The [`TaskRunner`] sits first in the store's middleware chain. Once an
//! action has gone through the reducer it is broadcast to every running
//! task, so a task always observes the state the action produced.

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use serde_json::Value;
use tokio::runtime::Handle;
use tokio::sync::broadcast::{self, error::RecvError};

use crate::action::Action;
use crate::store::dynamic::WeakStore;
use crate::store::error::StoreError;
use crate::store::middleware::Middleware;

pub type TaskFuture = Pin<Box<dyn Future<Output = ()> + Send + 'static>>;

type StartFn = dyn Fn(TaskContext) -> TaskFuture + Send + Sync;

/// A background task body, started once per namespace path.
#[derive(Clone)]
pub struct Task {
    start: Arc<StartFn>,
}

impl Task {
    pub fn new<F, Fut>(body: F) -> Self
    where
        F: Fn(TaskContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        Self {
            start: Arc::new(move |ctx| Box::pin(body(ctx))),
        }
    }

    fn start(&self, ctx: TaskContext) -> TaskFuture {
        (self.start)(ctx)
    }
}

impl fmt::Debug for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Task")
    }
}

/// What a running task sees of the store.
pub struct TaskContext {
    path: String,
    store: WeakStore,
    actions: broadcast::Receiver<Action>,
}

impl TaskContext {
    /// Namespace path the task was registered under.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Waits for the next dispatched action.
    ///
    /// Returns `None` once the store is gone.
    pub async fn take_any(&mut self) -> Option<Action> {
        loop {
            match self.actions.recv().await {
                Ok(action) => return Some(action),
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(
                        path = %self.path,
                        skipped,
                        "Task fell behind, skipping actions"
                    );
                }
                Err(RecvError::Closed) => return None,
            }
        }
    }

    /// Waits for the next action of the given type.
    pub async fn take(&mut self, kind: &str) -> Option<Action> {
        loop {
            let action = self.take_any().await?;
            if action.is(kind) {
                return Some(action);
            }
        }
    }

    /// Dispatches an action into the store.
    pub fn put(&self, action: Action) -> Result<Action, StoreError> {
        self.store
            .upgrade()
            .ok_or(StoreError::StoreDropped)?
            .dispatch(action)
    }

    /// Current state of the store, if it still exists.
    pub fn state(&self) -> Option<Value> {
        self.store.upgrade().map(|store| store.state())
    }
}

/// Starts tasks and feeds them dispatched actions.
pub struct TaskRunner {
    sender: broadcast::Sender<Action>,
}

impl TaskRunner {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Spawns `task` on the current tokio runtime.
    ///
    /// The task's receiver is subscribed before spawning, so it sees every
    /// action dispatched after this call returns.
    pub(crate) fn run(&self, path: &str, task: &Task, store: WeakStore) -> Result<(), StoreError> {
        let runtime = Handle::try_current().map_err(|_| StoreError::NoRuntime {
            path: path.to_string(),
        })?;

        let ctx = TaskContext {
            path: path.to_string(),
            store,
            actions: self.sender.subscribe(),
        };
        let body = task.start(ctx);
        let path = path.to_string();
        runtime.spawn(async move {
            body.await;
            tracing::debug!(path = %path, "Task finished");
        });
        Ok(())
    }
}

impl Middleware for TaskRunner {
    fn name(&self) -> &'static str {
        "tasks"
    }

    fn after(&self, action: &Action, _state: &Value) {
        // Err only means no task is listening right now.
        let _ = self.sender.send(action.clone());
    }
}
