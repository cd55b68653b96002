//! Reducer functions and reducer composition.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde_json::{Map, Value};

use crate::action::Action;

type ReduceFn = dyn Fn(Option<&Value>, &Action) -> Value + Send + Sync;

/// A shared reducer: `(previous state, action) -> next state`.
///
/// `None` means the reducer has not produced a state yet and must
/// return its initial state.
///
/// Reducers run under the store's state lock. They must not call back
/// into the store; dispatching or registering from a reducer returns
/// `StoreError::DispatchWhileReducing`.
#[derive(Clone)]
pub struct Reducer {
    inner: Arc<ReduceFn>,
}

impl Reducer {
    pub fn new<F>(reduce: F) -> Self
    where
        F: Fn(Option<&Value>, &Action) -> Value + Send + Sync + 'static,
    {
        Self {
            inner: Arc::new(reduce),
        }
    }

    pub fn reduce(&self, state: Option<&Value>, action: &Action) -> Value {
        (self.inner)(state, action)
    }
}

impl fmt::Debug for Reducer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Reducer")
    }
}

/// Combines keyed reducers into one reducer over a JSON object.
///
/// Every key gets its own slice, computed from that key's previous slice.
/// Keys without a reducer are not carried into the next state.
/// The map is copied, so later changes to it do not leak into the result.
pub fn combine_reducers(reducers: &BTreeMap<String, Reducer>) -> Reducer {
    let reducers = reducers.clone();
    Reducer::new(move |state, action| {
        let mut next = Map::with_capacity(reducers.len());
        for (key, reducer) in &reducers {
            let previous = state.and_then(|state| state.get(key));
            next.insert(key.clone(), reducer.reduce(previous, action));
        }
        Value::Object(next)
    })
}
