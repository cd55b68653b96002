//! Views that register their module with a store when constructed.

use std::sync::Arc;

use crate::store::{Injector, Reducer, StoreError, Task};

/// A presentational component: turns props into output.
pub trait View: Send + Sync {
    type Props;
    type Output;

    fn render(&self, props: &Self::Props) -> Self::Output;
}

/// A module's view bundled with the registrations it needs.
///
/// Every [`mount`](Container::mount) re-issues the registrations. The store
/// ignores a task path it already knows and overwrites a reducer path.
pub struct Container<V> {
    path: Arc<str>,
    reducer: Option<Reducer>,
    task: Option<Task>,
    view: Arc<V>,
}

impl<V> Clone for Container<V> {
    fn clone(&self) -> Self {
        Self {
            path: Arc::clone(&self.path),
            reducer: self.reducer.clone(),
            task: self.task.clone(),
            view: Arc::clone(&self.view),
        }
    }
}

impl<V: View> Container<V> {
    pub(crate) fn new(path: &str, reducer: Option<Reducer>, task: Option<Task>, view: Arc<V>) -> Self {
        Self {
            path: Arc::from(path),
            reducer,
            task,
            view,
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Constructs an instance, registering reducer and task with `injector`
    /// before the instance can render.
    pub fn mount<I>(&self, injector: &I) -> Result<Mounted<V>, StoreError>
    where
        I: Injector + ?Sized,
    {
        if let Some(reducer) = &self.reducer {
            injector.inject_reducer(&self.path, reducer.clone())?;
        }
        if let Some(task) = &self.task {
            injector.inject_task(&self.path, task.clone())?;
        }
        tracing::debug!(path = %self.path, "Container mounted");

        Ok(Mounted {
            path: Arc::clone(&self.path),
            view: Arc::clone(&self.view),
        })
    }
}

/// A constructed container; renders the wrapped view with the same props.
pub struct Mounted<V> {
    path: Arc<str>,
    view: Arc<V>,
}

impl<V> Mounted<V> {
    pub fn path(&self) -> &str {
        &self.path
    }
}

impl<V: View> View for Mounted<V> {
    type Props = V::Props;
    type Output = V::Output;

    fn render(&self, props: &Self::Props) -> Self::Output {
        self.view.render(props)
    }
}
