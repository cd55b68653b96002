//! Shared test utilities: a recording injector and a counter duck.

#![allow(dead_code, unused_imports)]

use ducks::{Action, Duck, Injector, Reducer, StoreError, Task, View};
use parking_lot::Mutex;
use serde_json::{json, Value};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

/// One registration seen by [`RecordingInjector`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Injection {
    Reducer(String),
    Task(String),
}

/// Injector stub that records every call and keeps the reducers it got.
#[derive(Default)]
pub struct RecordingInjector {
    calls: Mutex<Vec<Injection>>,
    reducers: Mutex<Vec<(String, Reducer)>>,
}

impl RecordingInjector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<Injection> {
        self.calls.lock().clone()
    }

    /// The most recent reducer injected under `path`.
    pub fn reducer(&self, path: &str) -> Option<Reducer> {
        self.reducers
            .lock()
            .iter()
            .rev()
            .find(|(p, _)| p == path)
            .map(|(_, reducer)| reducer.clone())
    }
}

impl Injector for RecordingInjector {
    fn inject_reducer(&self, path: &str, reducer: Reducer) -> Result<(), StoreError> {
        self.calls.lock().push(Injection::Reducer(path.to_string()));
        self.reducers.lock().push((path.to_string(), reducer));
        Ok(())
    }

    fn inject_task(&self, path: &str, _task: Task) -> Result<bool, StoreError> {
        self.calls.lock().push(Injection::Task(path.to_string()));
        Ok(true)
    }
}

/// A view that echoes its props.
pub struct EchoView;

impl View for EchoView {
    type Props = String;
    type Output = String;

    fn render(&self, props: &String) -> String {
        format!("<{}>", props)
    }
}

/// `{actions: {inc}, selectors: {count}, types: {INC}}`
pub fn counter_duck() -> Duck {
    Duck::new()
        .action("inc", |_| Action::new("INC"))
        .action("add", |payload| Action::new("ADD").with("amount", payload))
        .selector("count", |slice| slice["count"].clone())
        .constant("INC", "INC")
        .constant("ADD", "ADD")
}

/// Reducer over `{count}` that understands local `INC` and `ADD`.
pub fn counter_reducer() -> Reducer {
    Reducer::new(|state, action| {
        let count = state
            .and_then(|state| state.get("count"))
            .and_then(Value::as_i64)
            .unwrap_or(0);
        match action.kind.as_str() {
            "INC" => json!({ "count": count + 1 }),
            "ADD" => {
                let amount = action.get("amount").and_then(Value::as_i64).unwrap_or(0);
                json!({ "count": count + amount })
            }
            _ => json!({ "count": count }),
        }
    })
}

/// Polls `condition` for up to a second.
pub async fn wait_for<F: Fn() -> bool>(condition: F) -> bool {
    for _ in 0..200 {
        if condition() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    condition()
}

/// Runs `f` on a worker thread, giving up after five seconds.
///
/// Returns `None` if `f` did not finish in time, i.e. it is stuck.
pub fn run_with_timeout<F, R>(f: F) -> Option<R>
where
    F: FnOnce() -> R + Send + 'static,
    R: Send + 'static,
{
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let _ = tx.send(f());
    });
    rx.recv_timeout(Duration::from_secs(5)).ok()
}
