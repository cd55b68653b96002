use crate::store::dynamic::DynamicStore;
use crate::store::error::StoreError;
use crate::store::reducer::Reducer;
use crate::store::task::Task;

/// The registration surface a module container needs from a store.
///
/// [`DynamicStore`] is the normal implementation; tests can supply a stub
/// that records the calls instead.
pub trait Injector {
    /// Registers `reducer` under `path`, replacing any previous one.
    fn inject_reducer(&self, path: &str, reducer: Reducer) -> Result<(), StoreError>;

    /// Registers and starts `task` under `path` unless one is already
    /// registered there. Returns whether the task was started.
    fn inject_task(&self, path: &str, task: Task) -> Result<bool, StoreError>;
}

impl Injector for DynamicStore {
    fn inject_reducer(&self, path: &str, reducer: Reducer) -> Result<(), StoreError> {
        DynamicStore::inject_reducer(self, path, reducer)
    }

    fn inject_task(&self, path: &str, task: Task) -> Result<bool, StoreError> {
        DynamicStore::inject_task(self, path, task)
    }
}
