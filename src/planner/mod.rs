//! Upgrade planning: per-item policy and whole-character aggregation.

pub mod aggregate;
pub mod policy;
pub mod types;

pub use aggregate::*;
pub use policy::*;
pub use types::*;
