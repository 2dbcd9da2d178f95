//! Item system: slots, parsed items, track resolution.

pub mod bonus_ids;
pub mod equipment;
pub mod state;
pub mod types;

pub use bonus_ids::*;
pub use equipment::*;
pub use state::*;
pub use types::*;
