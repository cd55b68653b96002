//! Namespaced redux-style modules ("ducks") and a store that accepts new
//! reducers and background tasks while it is running.

pub mod action;
pub mod config;
pub mod duck;
pub mod logging;
pub mod store;

pub use action::Action;
pub use config::{ConfigError, StoreConfig};
pub use duck::{create_module, Container, Duck, Module, Mounted, View};
pub use store::{
    create_dynamic_store, DynamicStore, Injector, Middleware, Reducer, StoreError, Task,
    TaskContext,
};
