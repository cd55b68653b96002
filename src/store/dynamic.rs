//! State container that accepts reducers and tasks after creation.
//!
//! Reducers are kept in a registry keyed by namespace path. Injecting one
//! recombines the whole registry and swaps the active reducer in place,
//! so slices that already exist keep their state.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};
use std::thread::{self, ThreadId};

use parking_lot::Mutex;
use serde_json::{json, Value};

use crate::action::Action;
use crate::config::StoreConfig;
use crate::store::error::StoreError;
use crate::store::middleware::{LoggingMiddleware, Middleware};
use crate::store::reducer::{combine_reducers, Reducer};
use crate::store::task::{Task, TaskRunner};

/// Dispatched when the store is created.
pub const INIT_ACTION: &str = "@@ducks/INIT";
/// Dispatched whenever the active reducer is replaced.
pub const REPLACE_ACTION: &str = "@@ducks/REPLACE";

pub type Listener = Arc<dyn Fn() + Send + Sync>;

/// Handle returned by [`DynamicStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// A shared, cloneable store handle.
#[derive(Clone)]
pub struct DynamicStore {
    inner: Arc<StoreInner>,
}

/// Weak store reference held by running tasks.
#[derive(Clone)]
pub(crate) struct WeakStore {
    inner: Weak<StoreInner>,
}

impl WeakStore {
    pub(crate) fn upgrade(&self) -> Option<DynamicStore> {
        self.inner.upgrade().map(|inner| DynamicStore { inner })
    }
}

struct StoreInner {
    config: StoreConfig,
    core: Mutex<Core>,
    registry: Mutex<Registry>,
    middleware: Vec<Arc<dyn Middleware>>,
    runner: Arc<TaskRunner>,
    listeners: Mutex<Vec<(SubscriptionId, Listener)>>,
    next_listener: AtomicU64,
    reducing_on: Mutex<Option<ThreadId>>,
}

/// State and the reducer that produces it change together.
struct Core {
    state: Value,
    reducer: Reducer,
}

#[derive(Default)]
struct Registry {
    reducers: BTreeMap<String, Reducer>,
    tasks: BTreeMap<String, Task>,
}

/// Marks the current thread as running a reducer until dropped.
struct ReducingGuard<'a> {
    slot: &'a Mutex<Option<ThreadId>>,
}

impl<'a> ReducingGuard<'a> {
    fn enter(slot: &'a Mutex<Option<ThreadId>>) -> Self {
        *slot.lock() = Some(thread::current().id());
        Self { slot }
    }
}

impl Drop for ReducingGuard<'_> {
    fn drop(&mut self) {
        *self.slot.lock() = None;
    }
}

impl DynamicStore {
    /// Creates a store with default configuration.
    pub fn new(reducers: BTreeMap<String, Reducer>, middleware: Vec<Arc<dyn Middleware>>) -> Self {
        Self::with_config(StoreConfig::default(), reducers, middleware)
    }

    /// Creates a store whose task middleware runs ahead of `middleware`.
    pub fn with_config(
        config: StoreConfig,
        reducers: BTreeMap<String, Reducer>,
        middleware: Vec<Arc<dyn Middleware>>,
    ) -> Self {
        let runner = Arc::new(TaskRunner::new(config.task_channel_capacity));

        let mut chain: Vec<Arc<dyn Middleware>> = Vec::with_capacity(middleware.len() + 2);
        chain.push(runner.clone());
        if config.log_actions {
            chain.push(Arc::new(LoggingMiddleware));
        }
        chain.extend(middleware);

        let reducer = combine_reducers(&reducers);
        let state = reducer.reduce(Some(&json!({})), &Action::new(INIT_ACTION));

        tracing::debug!(
            reducers = reducers.len(),
            middleware = chain.len(),
            "Store created"
        );

        Self {
            inner: Arc::new(StoreInner {
                config,
                core: Mutex::new(Core { state, reducer }),
                registry: Mutex::new(Registry {
                    reducers,
                    tasks: BTreeMap::new(),
                }),
                middleware: chain,
                runner,
                listeners: Mutex::new(Vec::new()),
                next_listener: AtomicU64::new(0),
                reducing_on: Mutex::new(None),
            }),
        }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.inner.config
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> Value {
        self.inner.core.lock().state.clone()
    }

    /// Runs `action` through the middleware chain and the active reducer.
    ///
    /// Returns the action back, like a redux dispatch. Only the reducer
    /// step holds the state lock; middleware hooks and subscribers run
    /// without it and may call back into the store.
    pub fn dispatch(&self, action: Action) -> Result<Action, StoreError> {
        self.ensure_not_reducing()?;

        let previous = self.state();
        for middleware in &self.inner.middleware {
            if !middleware.before(&action, &previous) {
                tracing::trace!(
                    middleware = middleware.name(),
                    action = %action.kind,
                    "Action swallowed"
                );
                return Ok(action);
            }
        }

        let next = {
            let mut core = self.inner.core.lock();
            self.reduce_locked(&mut core, &action);
            core.state.clone()
        };

        for middleware in self.inner.middleware.iter().rev() {
            middleware.after(&action, &next);
        }
        self.notify();
        Ok(action)
    }

    /// Swaps the active reducer and lets it compute state for new slices.
    ///
    /// The internal replace action goes straight to the reducer; middleware
    /// and tasks do not see it.
    pub fn replace_reducer(&self, reducer: Reducer) -> Result<(), StoreError> {
        self.ensure_not_reducing()?;
        self.replace_locked(reducer);
        self.notify();
        Ok(())
    }

    /// Registers `reducer` under `path` and activates the recombined reducer.
    ///
    /// A reducer already registered under `path` is replaced. The registry
    /// stays locked until the recombined reducer is active; subscribers are
    /// notified after it is released.
    pub fn inject_reducer(&self, path: &str, reducer: Reducer) -> Result<(), StoreError> {
        self.ensure_not_reducing()?;
        {
            let mut registry = self.inner.registry.lock();

            let overwritten = registry
                .reducers
                .insert(path.to_string(), reducer)
                .is_some();
            if overwritten && self.inner.config.warn_on_reducer_overwrite {
                tracing::warn!(path = %path, "Reducer already registered, overwriting");
            }

            self.replace_locked(combine_reducers(&registry.reducers));

            tracing::info!(
                path = %path,
                reducers = registry.reducers.len(),
                "Reducer injected"
            );
        }
        self.notify();
        Ok(())
    }

    /// Registers and starts `task` under `path`, once.
    ///
    /// Returns `Ok(false)` without doing anything if a task is already
    /// registered under `path`. Must be called from within a tokio runtime.
    pub fn inject_task(&self, path: &str, task: Task) -> Result<bool, StoreError> {
        self.ensure_not_reducing()?;
        let mut registry = self.inner.registry.lock();
        if registry.tasks.contains_key(path) {
            tracing::debug!(path = %path, "Task already running, ignoring");
            return Ok(false);
        }

        self.inner.runner.run(path, &task, self.downgrade())?;
        registry.tasks.insert(path.to_string(), task);

        tracing::info!(path = %path, "Task started");
        Ok(true)
    }

    /// Calls `listener` after every dispatch and reducer replacement.
    pub fn subscribe<F>(&self, listener: F) -> SubscriptionId
    where
        F: Fn() + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.inner.next_listener.fetch_add(1, Ordering::Relaxed));
        self.inner.listeners.lock().push((id, Arc::new(listener)));
        id
    }

    /// Returns `false` if `id` was not subscribed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut listeners = self.inner.listeners.lock();
        let before = listeners.len();
        listeners.retain(|(existing, _)| *existing != id);
        listeners.len() != before
    }

    pub fn has_reducer(&self, path: &str) -> bool {
        self.inner.registry.lock().reducers.contains_key(path)
    }

    pub fn has_task(&self, path: &str) -> bool {
        self.inner.registry.lock().tasks.contains_key(path)
    }

    /// Paths with a registered reducer, in sorted order.
    pub fn reducer_paths(&self) -> Vec<String> {
        self.inner.registry.lock().reducers.keys().cloned().collect()
    }

    /// Paths with a registered task, in sorted order.
    pub fn task_paths(&self) -> Vec<String> {
        self.inner.registry.lock().tasks.keys().cloned().collect()
    }

    pub(crate) fn downgrade(&self) -> WeakStore {
        WeakStore {
            inner: Arc::downgrade(&self.inner),
        }
    }

    fn replace_locked(&self, reducer: Reducer) {
        let mut core = self.inner.core.lock();
        core.reducer = reducer;
        self.reduce_locked(&mut core, &Action::new(REPLACE_ACTION));
    }

    fn reduce_locked(&self, core: &mut Core, action: &Action) {
        let _reducing = ReducingGuard::enter(&self.inner.reducing_on);
        core.state = core.reducer.reduce(Some(&core.state), action);
    }

    fn ensure_not_reducing(&self) -> Result<(), StoreError> {
        if *self.inner.reducing_on.lock() == Some(thread::current().id()) {
            return Err(StoreError::DispatchWhileReducing);
        }
        Ok(())
    }

    fn notify(&self) {
        // Snapshot so listeners may (un)subscribe while being called.
        let listeners: Vec<Listener> = self
            .inner
            .listeners
            .lock()
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect();
        for listener in listeners {
            listener();
        }
    }
}

impl Default for DynamicStore {
    fn default() -> Self {
        Self::new(BTreeMap::new(), Vec::new())
    }
}

/// Creates a dynamic store from initial reducers and middleware.
pub fn create_dynamic_store(
    reducers: BTreeMap<String, Reducer>,
    middleware: Vec<Arc<dyn Middleware>>,
) -> DynamicStore {
    DynamicStore::new(reducers, middleware)
}
