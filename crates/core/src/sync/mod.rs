//! State synchronization layer
//!
//! Exclusive owner of the shared snapshots: the task list, the current
//! selection and the category cache. Everything else in the process
//! reads the derived streams or calls the mutation operations here;
//! nothing mutates shared state directly.

mod categories;
mod scope;
mod service;

pub use categories::CategoryService;
pub use scope::SubscriptionScope;
pub use service::TaskSyncService;
