use thiserror::Error;

/// Errors raised by the dynamic store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// A reducer tried to dispatch, replace the reducer or register a
    /// reducer or task while it was itself being run by the store.
    #[error("Reducers may not dispatch actions or register with the store")]
    DispatchWhileReducing,

    /// A task was injected outside of a tokio runtime.
    #[error("No tokio runtime available to start task '{path}'")]
    NoRuntime { path: String },

    /// A task tried to reach a store that no longer exists.
    #[error("Store has been dropped")]
    StoreDropped,
}
