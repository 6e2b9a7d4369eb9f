//! Task module
//!
//! Task and subtask models shared by the API clients and the
//! synchronization service.

mod model;

pub use model::*;
