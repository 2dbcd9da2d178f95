use crate::crests::{
    catalyst_charges, discounted_cost, free_ceiling, stock_from_wallet, Crest, CrestTotals,
    NUM_CRESTS,
};
use crate::export::{ParsedExport, Watermark};
use crate::items::Slot;
use crate::season::{Season, TrackKey};
use serde::{Deserialize, Serialize};

/// Caller-controlled planning knobs. Persisted as the CLI's defaults.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanOptions {
    /// Highest item level the player can get for free; `None` uses the season default.
    pub drop_ceiling: Option<u32>,
    /// Ignore Hero threshold gating and plan every Hero item to max rank.
    pub maximal: bool,
}

impl PlanOptions {
    pub fn effective_drop_ceiling(&self, season: &Season) -> u32 {
        self.drop_ceiling.unwrap_or(season.default_drop_ceiling)
    }
}

/// Player-specific constraints decoded from the export.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpgradeContext {
    pub stock: CrestTotals,
    pub watermarks: Vec<Watermark>,
    /// Achievement discount percent per crest tier.
    pub discounts: [u8; NUM_CRESTS],
    pub catalyst_charges: u32,
}

impl UpgradeContext {
    pub fn from_export(season: &Season, export: &ParsedExport) -> Self {
        let mut discounts = [0u8; NUM_CRESTS];
        for discount in &season.discounts {
            if export.achievements.contains(&discount.achievement_id) {
                let entry = &mut discounts[discount.crest.index()];
                *entry = (*entry).max(discount.percent.min(100));
            }
        }
        Self {
            stock: stock_from_wallet(season, &export.wallet),
            watermarks: export.watermarks.clone(),
            discounts,
            catalyst_charges: catalyst_charges(season, &export.catalyst),
        }
    }

    pub fn free_ceiling(&self, slot: Slot) -> Option<u32> {
        free_ceiling(&self.watermarks, slot)
    }

    pub fn step_cost(&self, crest: Crest, base: u32) -> u32 {
        discounted_cost(base, self.discounts[crest.index()])
    }
}

/// One rank transition the player should buy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    pub from_rank: u8,
    pub to_rank: u8,
    pub crest: Crest,
    /// Listed cost of the step.
    pub base_cost: u32,
    /// What the player actually pays after watermark and discounts.
    pub cost: u32,
    /// Item level after the step.
    pub ilvl: u32,
    /// Covered by the slot's watermark.
    pub free: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemPlan {
    pub slot: Slot,
    pub item_id: u32,
    pub name: Option<String>,
    pub track: TrackKey,
    pub max_rank: u8,
    pub from_rank: u8,
    pub to_rank: u8,
    pub from_ilvl: u32,
    pub to_ilvl: u32,
    pub steps: Vec<Step>,
    pub totals: CrestTotals,
    /// Why the item stops short of max rank. Always set when nothing is bought.
    pub note: Option<String>,
}

impl ItemPlan {
    pub fn is_hold(&self) -> bool {
        self.to_rank == self.from_rank
    }
}

/// Hero-track crests a conservative player keeps back for items that a free
/// drop is about to replace, and how much of the stock exceeds that.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReserveSummary {
    pub crest: Option<Crest>,
    pub held_items: u32,
    pub per_step_cost: u32,
    pub baseline: u32,
    pub stock: u32,
    pub surplus: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanSummary {
    pub plans: Vec<ItemPlan>,
    pub totals: CrestTotals,
    pub reserve: ReserveSummary,
}

impl PlanSummary {
    pub fn plan_for(&self, slot: Slot) -> Option<&ItemPlan> {
        self.plans.iter().find(|plan| plan.slot == slot)
    }

    pub fn steps_total(&self) -> usize {
        self.plans.iter().map(|plan| plan.steps.len()).sum()
    }

    pub fn shortfall(&self, stock: &CrestTotals) -> CrestTotals {
        crate::crests::shortfall(&self.totals, stock)
    }
}
