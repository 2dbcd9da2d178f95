//! Utility modules: the saved-defaults store.

pub mod persistence;

pub use persistence::*;
