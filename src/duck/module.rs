use std::sync::Arc;

use crate::duck::bundle::Duck;
use crate::duck::container::{Container, View};
use crate::duck::namespace::{
    namespace_actions, namespace_reducer, namespace_selectors, namespace_types, ActionCreators,
    Selectors, Types,
};
use crate::store::{Reducer, Task};

/// A duck placed under a namespace path, together with its view.
pub struct Module<V> {
    path: String,
    duck: Duck,
    view: Arc<V>,
    reducer: Option<Reducer>,
    task: Option<Task>,
}

impl<V: View> Module<V> {
    pub fn new(path: impl Into<String>, duck: Duck, view: V) -> Self {
        Self {
            path: path.into(),
            duck,
            view: Arc::new(view),
            reducer: None,
            task: None,
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Attaches the module's reducer, written against local type names.
    pub fn with_reducer(mut self, reducer: Reducer) -> Self {
        self.reducer = Some(namespace_reducer(&self.path, reducer));
        self
    }

    /// Attaches the module's background task.
    pub fn with_saga(mut self, task: Task) -> Self {
        self.task = Some(task);
        self
    }

    /// The attached reducer, already namespaced.
    pub fn reducer(&self) -> Option<&Reducer> {
        self.reducer.as_ref()
    }

    pub fn task(&self) -> Option<&Task> {
        self.task.as_ref()
    }

    pub fn actions(&self) -> ActionCreators {
        namespace_actions(&self.path, &self.duck.actions)
    }

    pub fn selectors(&self) -> Selectors {
        namespace_selectors(&self.path, &self.duck.selectors)
    }

    pub fn types(&self) -> Types {
        namespace_types(&self.path, &self.duck.types)
    }

    pub fn container(&self) -> Container<V> {
        Container::new(
            &self.path,
            self.reducer.clone(),
            self.task.clone(),
            Arc::clone(&self.view),
        )
    }
}

/// Places `duck` under `path` with `view` as its presentational component.
pub fn create_module<V: View>(path: impl Into<String>, duck: Duck, view: V) -> Module<V> {
    Module::new(path, duck, view)
}
