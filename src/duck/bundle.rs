//! The un-namespaced building blocks of a module.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::action::Action;

type CreateFn = dyn Fn(Value) -> Action + Send + Sync;
type SelectFn = dyn Fn(&Value) -> Value + Send + Sync;

/// Builds an action from a payload (`Value::Null` when there is none).
#[derive(Clone)]
pub struct ActionCreator {
    inner: Arc<CreateFn>,
}

impl ActionCreator {
    pub fn new<F>(create: F) -> Self
    where
        F: Fn(Value) -> Action + Send + Sync + 'static,
    {
        Self {
            inner: Arc::new(create),
        }
    }

    pub fn create(&self, payload: Value) -> Action {
        (self.inner)(payload)
    }
}

impl fmt::Debug for ActionCreator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ActionCreator")
    }
}

/// Reads a value out of a state tree.
#[derive(Clone)]
pub struct Selector {
    inner: Arc<SelectFn>,
}

impl Selector {
    pub fn new<F>(select: F) -> Self
    where
        F: Fn(&Value) -> Value + Send + Sync + 'static,
    {
        Self {
            inner: Arc::new(select),
        }
    }

    pub fn select(&self, state: &Value) -> Value {
        (self.inner)(state)
    }
}

impl fmt::Debug for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Selector")
    }
}

/// Action creators, selectors and type constants for one feature,
/// written against local (un-namespaced) names.
#[derive(Debug, Clone, Default)]
pub struct Duck {
    pub actions: BTreeMap<String, ActionCreator>,
    pub selectors: BTreeMap<String, Selector>,
    pub types: BTreeMap<String, String>,
}

impl Duck {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn action<F>(mut self, name: impl Into<String>, create: F) -> Self
    where
        F: Fn(Value) -> Action + Send + Sync + 'static,
    {
        self.actions.insert(name.into(), ActionCreator::new(create));
        self
    }

    pub fn selector<F>(mut self, name: impl Into<String>, select: F) -> Self
    where
        F: Fn(&Value) -> Value + Send + Sync + 'static,
    {
        self.selectors.insert(name.into(), Selector::new(select));
        self
    }

    pub fn constant(mut self, name: impl Into<String>, kind: impl Into<String>) -> Self {
        self.types.insert(name.into(), kind.into());
        self
    }
}
