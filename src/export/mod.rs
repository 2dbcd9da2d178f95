//! Character export text: parsed items, wallet, watermarks and metadata.

pub mod parser;
pub mod types;

pub use parser::*;
pub use types::*;
