//! Season configuration: tracks, crest currencies, bonus ids and policy knobs.

pub mod index;
pub mod loader;
pub mod types;

pub use index::*;
pub use loader::*;
pub use types::*;
