//! crestplan - gear upgrade planner library
//!
//! Parses a character export, resolves each equipped item's upgrade track and
//! rank, and plans crest spending under a per-track policy.

pub mod build_info;
pub mod constants;
pub mod crests;
pub mod export;
pub mod items;
pub mod pipeline;
pub mod planner;
pub mod report;
pub mod season;
pub mod share;
pub mod utils;

pub use pipeline::{plan_export, PlanReport};
pub use planner::PlanOptions;
pub use season::{IndexCache, Season, SeasonError};
