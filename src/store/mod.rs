//! Dynamic store: a redux-style state container whose reducers and
//! background tasks can be registered after it has been created.
//!
//! ```text
//! dispatch ──→ middleware.before ──→ reducer ──→ middleware.after ──→ listeners
//!                                                     │
//!                                                     └──→ running tasks
//! ```

mod dynamic;
mod error;
mod injector;
mod middleware;
mod reducer;
mod task;

pub use dynamic::{
    create_dynamic_store, DynamicStore, Listener, SubscriptionId, INIT_ACTION, REPLACE_ACTION,
};
pub use error::StoreError;
pub use injector::Injector;
pub use middleware::{LoggingMiddleware, Middleware};
pub use reducer::{combine_reducers, Reducer};
pub use task::{Task, TaskContext, TaskFuture};
