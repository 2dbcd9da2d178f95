use super::policy::plan_item;
use super::types::{ItemPlan, PlanOptions, PlanSummary, ReserveSummary, UpgradeContext};
use crate::crests::{Crest, CrestTotals};
use crate::items::ItemState;
use crate::season::{Season, TrackKey};
use std::cmp::Reverse;

/// Crest tier held back for Hero items still below the natural-drop level.
pub const RESERVE_CREST: Crest = Crest::Runed;

/// Baseline reserve of Hero-track crests: one step's cost for every Hero item
/// still below the natural-drop level. Stock above that is surplus.
///
/// Only the Hero/Runed pairing is modelled.
pub fn compute_reserve(
    states: &[ItemState],
    season: &Season,
    ctx: &UpgradeContext,
) -> ReserveSummary {
    let track = season.track(TrackKey::Hero);
    let Some(per_step_cost) = track
        .steps
        .iter()
        .find(|step| step.crest == RESERVE_CREST)
        .map(|step| step.cost)
    else {
        return ReserveSummary::default();
    };

    let threshold = season.hero_policy.natural_drop_ilvl;
    let held_items = states
        .iter()
        .filter(|state| state.track == TrackKey::Hero)
        .filter(|state| !state.crafted && !season.is_excluded(state.item_id))
        .filter(|state| track.ilvl_at(state.rank).is_some_and(|ilvl| ilvl < threshold))
        .count() as u32;

    let baseline = held_items.saturating_mul(per_step_cost);
    let stock = ctx.stock.get(RESERVE_CREST);
    ReserveSummary {
        crest: Some(RESERVE_CREST),
        held_items,
        per_step_cost,
        baseline,
        stock,
        surplus: stock.saturating_sub(baseline),
    }
}

/// Plans every item and sums the result. Items that buy something come before
/// holds; within each group higher tracks lead and ties go by slot.
pub fn plan_all(
    states: &[ItemState],
    season: &Season,
    ctx: &UpgradeContext,
    options: &PlanOptions,
) -> PlanSummary {
    let reserve = compute_reserve(states, season, ctx);
    let mut plans: Vec<ItemPlan> = states
        .iter()
        .map(|state| plan_item(state, season, ctx, options, &reserve))
        .collect();
    plans.sort_by_key(|plan| (plan.is_hold(), Reverse(plan.track), plan.slot));

    let totals = plans
        .iter()
        .fold(CrestTotals::new(), |acc, plan| acc + plan.totals);
    PlanSummary {
        plans,
        totals,
        reserve,
    }
}
