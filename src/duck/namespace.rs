//! Moving a duck's local names under a namespace path.
//!
//! Outgoing names (action types, type constants) gain a `path/` prefix,
//! selectors are pointed at `state[path]`, and reducers have the prefix
//! removed again before they see an action.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::action::{local_type, namespaced_type, Action};
use crate::duck::bundle::{ActionCreator, Selector};
use crate::store::Reducer;

/// Namespaced action creators, looked up by name.
#[derive(Debug, Clone, Default)]
pub struct ActionCreators {
    creators: BTreeMap<String, ActionCreator>,
}

impl ActionCreators {
    pub fn get(&self, name: &str) -> Option<&ActionCreator> {
        self.creators.get(name)
    }

    /// Runs the creator called `name`, if there is one.
    pub fn create(&self, name: &str, payload: Value) -> Option<Action> {
        self.get(name).map(|creator| creator.create(payload))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.creators.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.creators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.creators.is_empty()
    }
}

/// Namespaced selectors, looked up by name.
#[derive(Debug, Clone, Default)]
pub struct Selectors {
    selectors: BTreeMap<String, Selector>,
}

impl Selectors {
    pub fn get(&self, name: &str) -> Option<&Selector> {
        self.selectors.get(name)
    }

    /// Runs the selector called `name` against the root state.
    pub fn select(&self, name: &str, state: &Value) -> Option<Value> {
        self.get(name).map(|selector| selector.select(state))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.selectors.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.selectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selectors.is_empty()
    }
}

/// Namespaced type constants, looked up by name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Types {
    types: BTreeMap<String, String>,
}

impl Types {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.types.get(name).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.types.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

pub fn namespace_actions(path: &str, creators: &BTreeMap<String, ActionCreator>) -> ActionCreators {
    let creators = creators
        .iter()
        .map(|(name, creator)| {
            let path = path.to_string();
            let creator = creator.clone();
            let wrapped = ActionCreator::new(move |payload| {
                let action = creator.create(payload);
                let kind = namespaced_type(&path, &action.kind);
                Action { kind, ..action }
            });
            (name.clone(), wrapped)
        })
        .collect();
    ActionCreators { creators }
}

pub fn namespace_selectors(path: &str, selectors: &BTreeMap<String, Selector>) -> Selectors {
    let selectors = selectors
        .iter()
        .map(|(name, selector)| {
            let path = path.to_string();
            let selector = selector.clone();
            let wrapped = Selector::new(move |state| {
                let slice = state.get(&path).unwrap_or(&Value::Null);
                selector.select(slice)
            });
            (name.clone(), wrapped)
        })
        .collect();
    Selectors { selectors }
}

pub fn namespace_types(path: &str, types: &BTreeMap<String, String>) -> Types {
    let types = types
        .iter()
        .map(|(name, kind)| (name.clone(), namespaced_type(path, kind)))
        .collect();
    Types { types }
}

/// Lets `reducer` match on local type names.
///
/// Actions under `path/` reach it with the prefix stripped; everything
/// else reaches it untouched.
pub fn namespace_reducer(path: &str, reducer: Reducer) -> Reducer {
    let path = path.to_string();
    Reducer::new(move |state, action| match local_type(&path, &action.kind) {
        Some(local) => reducer.reduce(state, &action.with_kind(local)),
        None => reducer.reduce(state, action),
    })
}
