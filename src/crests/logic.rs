use super::types::{Crest, CrestTotals, ScheduleBucket};
use crate::export::{CatalystEntry, WalletEntry, Watermark};
use crate::items::Slot;
use crate::season::Season;

pub fn currency_id(season: &Season, crest: Crest) -> u32 {
    season.crest_currency_id(crest)
}

/// Crest stock held in the wallet. Item entries and currencies that are not
/// crests of this season are ignored.
pub fn stock_from_wallet(season: &Season, entries: &[WalletEntry]) -> CrestTotals {
    let mut stock = CrestTotals::new();
    for entry in entries {
        if let WalletEntry::Currency { id, quantity } = *entry {
            if let Some(crest) = season.crest_for_currency(id) {
                stock.credit(crest, quantity);
            }
        }
    }
    stock
}

pub fn catalyst_charges(season: &Season, entries: &[CatalystEntry]) -> u32 {
    let Some(catalyst_id) = season.currencies.catalyst else {
        return 0;
    };
    entries
        .iter()
        .filter(|entry| entry.currency_id == catalyst_id)
        .map(|entry| entry.quantity)
        .sum()
}

/// Highest item level unlocked for free in `slot`, if the export recorded one.
pub fn free_ceiling(watermarks: &[Watermark], slot: Slot) -> Option<u32> {
    watermarks
        .iter()
        .filter(|mark| mark.slot == slot)
        .map(Watermark::free_ilvl)
        .max()
}

/// Crest cost of raising an item from `start` to `target` item level.
///
/// Anything at or below `free_ceiling` was already unlocked and is not billed.
/// Each bucket overlapping the billable range charges its per-step cost once
/// per started `step_size`.
pub fn cost_for_ilvl_range(
    start: u32,
    target: u32,
    free_ceiling: Option<u32>,
    schedule: &[ScheduleBucket],
) -> CrestTotals {
    let mut cost = CrestTotals::new();
    if target <= start {
        return cost;
    }
    let billable_from = start.max(free_ceiling.unwrap_or(0));
    for bucket in schedule {
        let lo = billable_from.max(bucket.from_ilvl);
        let hi = target.min(bucket.to_ilvl);
        if hi <= lo {
            continue;
        }
        let span = hi - lo;
        let steps = span.div_ceil(bucket.step_size.max(1));
        cost.credit(bucket.crest, steps.saturating_mul(bucket.cost_per_step));
    }
    cost
}

/// Per-step cost after an achievement discount, rounded up.
pub fn discounted_cost(base: u32, percent: u8) -> u32 {
    let percent = u32::from(percent.min(100));
    let scaled = (u64::from(base) * u64::from(100 - percent)).div_ceil(100);
    u32::try_from(scaled).unwrap_or(u32::MAX)
}

/// Crests still missing to pay for `needed` out of `stock`.
pub fn shortfall(needed: &CrestTotals, stock: &CrestTotals) -> CrestTotals {
    let mut missing = CrestTotals::new();
    for crest in Crest::all() {
        missing.set(crest, needed.get(crest).saturating_sub(stock.get(crest)));
    }
    missing
}
