//! Core library for taskdeck
//!
//! This crate contains the client-side core logic, including:
//! - Task and category models
//! - The retrying HTTP transport and resource API clients
//! - The state synchronization service that owns the cached snapshots

pub mod api;
pub mod category;
pub mod error;
pub mod sync;
pub mod task;
pub mod transport;

pub use error::Error;
pub type Result<T> = std::result::Result<T, Error>;
