//! End-to-end planning: export text in, report out.

use crate::crests::CrestTotals;
use crate::export::{parse_export, CharacterMeta};
use crate::items::{build_item_state, BonusIdDecoder, ItemState, Slot};
use crate::planner::{plan_all, PlanOptions, PlanSummary, UpgradeContext};
use crate::season::{IndexCache, Season};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanReport {
    pub meta: CharacterMeta,
    pub states: Vec<ItemState>,
    /// Equipped slots whose track could not be resolved.
    pub dropped: Vec<Slot>,
    pub summary: PlanSummary,
    pub stock: CrestTotals,
    pub catalyst_charges: u32,
    pub shortfall: CrestTotals,
    /// Malformed lines and sub-records the parser skipped.
    pub skipped: usize,
}

pub fn plan_export(
    text: &str,
    season: &Season,
    options: &PlanOptions,
    cache: &mut IndexCache,
) -> PlanReport {
    let export = parse_export(text);
    let ctx = UpgradeContext::from_export(season, &export);
    let decoder = BonusIdDecoder::new(season);
    let index = cache.index_for(season);

    let mut states = Vec::with_capacity(export.items.len());
    let mut dropped = Vec::new();
    for item in &export.items {
        match build_item_state(item, &decoder, &index) {
            Some(state) => states.push(state),
            None => {
                log::warn!("{}: could not resolve upgrade track for item {}", item.slot, item.id);
                dropped.push(item.slot);
            }
        }
    }

    let summary = plan_all(&states, season, &ctx, options);
    let shortfall = summary.shortfall(&ctx.stock);
    log::info!(
        "planned {} items ({} upgrading): {}",
        summary.plans.len(),
        summary.plans.iter().filter(|plan| !plan.is_hold()).count(),
        summary.totals
    );

    PlanReport {
        meta: export.meta,
        states,
        dropped,
        summary,
        stock: ctx.stock,
        catalyst_charges: ctx.catalyst_charges,
        shortfall,
        skipped: export.skipped,
    }
}
