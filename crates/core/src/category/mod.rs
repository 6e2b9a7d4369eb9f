//! Category module

mod model;

pub use model::*;
