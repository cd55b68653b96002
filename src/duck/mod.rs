//! Ducks: feature modules whose action types, selectors and reducer live
//! under a namespace path.
//!
//! ```text
//! Duck (local names) ──create_module(path)──→ Module
//!                                              ├─ actions()/selectors()/types()  namespaced
//!                                              └─ container().mount(&store)      injects reducer + task
//! ```

mod bundle;
mod container;
mod module;
mod namespace;

pub use bundle::{ActionCreator, Duck, Selector};
pub use container::{Container, Mounted, View};
pub use module::{create_module, Module};
pub use namespace::{
    namespace_actions, namespace_reducer, namespace_selectors, namespace_types, ActionCreators,
    Selectors, Types,
};
