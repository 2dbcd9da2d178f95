//! Crest currencies: tiers, totals and cost helpers.

pub mod logic;
pub mod types;

pub use logic::*;
pub use types::*;
