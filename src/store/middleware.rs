//! Middleware hooks around the store's reducer.
//!
//! For a chain `[m1, m2]` a dispatch runs `m1.before`, `m2.before`, the
//! reducer, then `m2.after`, `m1.after`.
//!
//! Hooks run without any store lock held, so they may read the store or
//! dispatch follow-up actions. A dispatch made from `after` completes,
//! subscribers included, before the outer dispatch notifies its own.

use serde_json::Value;

use crate::action::Action;

/// A hook around every dispatched action.
pub trait Middleware: Send + Sync {
    /// Returns the name of this middleware for logging.
    fn name(&self) -> &'static str;

    /// Called before the reducer with the current state.
    ///
    /// Returning `false` swallows the action: the reducer, the remaining
    /// middleware and the subscribers never see it.
    fn before(&self, _action: &Action, _state: &Value) -> bool {
        true
    }

    /// Called after the reducer with the new state.
    fn after(&self, _action: &Action, _state: &Value) {}
}

/// Traces every action that passes through the store.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingMiddleware;

impl Middleware for LoggingMiddleware {
    fn name(&self) -> &'static str {
        "logging"
    }

    fn before(&self, action: &Action, _state: &Value) -> bool {
        tracing::debug!(action = %action.kind, "Dispatching action");
        true
    }

    fn after(&self, action: &Action, state: &Value) {
        tracing::trace!(action = %action.kind, state = %state, "Action reduced");
    }
}
