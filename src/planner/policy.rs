//! Per-item upgrade policy.
//!
//! Rank is the only state: an item moves from its current rank to a target
//! rank chosen by its track's policy, one fixed step at a time.

use super::types::{ItemPlan, PlanOptions, ReserveSummary, Step, UpgradeContext};
use crate::crests::{cost_for_ilvl_range, Crest, CrestTotals, ScheduleBucket};
use crate::items::ItemState;
use crate::season::{Season, Track, TrackTier};

/// Why an item stops short of its track's max rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    Crafted,
    Excluded,
    AtMaxRank,
    /// Hero item below the natural-drop item level.
    AwaitingDrop {
        threshold: u32,
        crest: Option<Crest>,
        surplus: u32,
    },
    /// Hero item at the breakpoint; the next step costs top-tier crests.
    HeroBreakpoint { rank: u8, next: Option<Crest> },
    /// Champion item out of cheap-crest steps.
    CheapCrestLimit { next: Option<Crest> },
    /// Target lands at or below the free drop level using scarce crests.
    DropCeiling { ceiling: u32, target_ilvl: u32 },
}

impl StopReason {
    pub fn note(&self) -> String {
        match *self {
            StopReason::Crafted => {
                "Crafted item; upgrade it by recrafting, not with crests.".to_string()
            }
            StopReason::Excluded => "This item cannot be upgraded with crests.".to_string(),
            StopReason::AtMaxRank => "Already at max rank.".to_string(),
            StopReason::AwaitingDrop {
                threshold,
                crest,
                surplus,
            } => {
                let crest = crest.map_or("high-tier", |c| c.name());
                let mut note = format!(
                    "Below item level {threshold}; a free drop is likely to replace it, \
                     so {crest} crests stay in reserve."
                );
                if surplus > 0 {
                    note.push_str(&format!(
                        " You hold {surplus} {crest} crests beyond that reserve \
                         if you want to upgrade anyway."
                    ));
                }
                note
            }
            StopReason::HeroBreakpoint { rank, next } => match next {
                Some(crest) => format!(
                    "Stops at rank {rank}; the next step costs {crest} crests \
                     kept for top-track items."
                ),
                None => format!("Stops at rank {rank}."),
            },
            StopReason::CheapCrestLimit { next } => match next {
                Some(crest) => format!(
                    "Stops before {crest} crests; spend those on higher tracks instead."
                ),
                None => "No cheap-crest steps left.".to_string(),
            },
            StopReason::DropCeiling {
                ceiling,
                target_ilvl,
            } => format!(
                "Upgrading to {target_ilvl} would spend scarce crests \
                 to stay at or below the free drop level ({ceiling})."
            ),
        }
    }
}

/// Target rank from the track policy alone, before the drop-ceiling check.
pub fn policy_target(
    state: &ItemState,
    track: &Track,
    season: &Season,
    options: &PlanOptions,
    reserve: &ReserveSummary,
) -> (u8, Option<StopReason>) {
    let rank = state.rank.clamp(1, track.max_rank);
    if state.crafted {
        return (rank, Some(StopReason::Crafted));
    }
    if season.is_excluded(state.item_id) {
        return (rank, Some(StopReason::Excluded));
    }
    if rank >= track.max_rank {
        return (rank, Some(StopReason::AtMaxRank));
    }

    match track.key.tier() {
        TrackTier::Top | TrackTier::Lower => (track.max_rank, None),
        TrackTier::Second if options.maximal => (track.max_rank, None),
        TrackTier::Second => {
            let policy = season.hero_policy;
            let ilvl = track.ilvl_at(rank).unwrap_or(0);
            if ilvl < policy.natural_drop_ilvl {
                return (
                    rank,
                    Some(StopReason::AwaitingDrop {
                        threshold: policy.natural_drop_ilvl,
                        crest: reserve.crest,
                        surplus: reserve.surplus,
                    }),
                );
            }
            let breakpoint = policy.breakpoint_rank.min(track.max_rank);
            let target = rank.max(breakpoint);
            if target >= track.max_rank {
                return (track.max_rank, None);
            }
            let next = track.step_from(target).map(|step| step.crest);
            (
                target,
                Some(StopReason::HeroBreakpoint {
                    rank: target,
                    next,
                }),
            )
        }
        TrackTier::Mid => {
            let limit = cheap_step_limit(track, rank);
            if limit >= track.max_rank {
                return (track.max_rank, None);
            }
            let next = track.step_from(limit).map(|step| step.crest);
            (limit, Some(StopReason::CheapCrestLimit { next }))
        }
    }
}

/// Highest rank reachable from `rank` through consecutive cheap-crest steps.
fn cheap_step_limit(track: &Track, rank: u8) -> u8 {
    let mut limit = rank;
    while let Some(step) = track.step_from(limit) {
        if !step.crest.is_cheap() {
            break;
        }
        limit = step.to;
    }
    limit
}

/// Returns a stop reason when the upgrade lands at or below the drop ceiling
/// and any step on the way costs more than the two cheapest crest tiers.
pub fn drop_ceiling_override(
    track: &Track,
    from: u8,
    target: u8,
    ceiling: u32,
) -> Option<StopReason> {
    if target <= from {
        return None;
    }
    let target_ilvl = track.ilvl_at(target)?;
    if target_ilvl > ceiling {
        return None;
    }
    let all_cheap = track
        .steps_between(from, target)
        .all(|step| step.crest.is_cheap());
    if all_cheap {
        None
    } else {
        Some(StopReason::DropCeiling {
            ceiling,
            target_ilvl,
        })
    }
}

pub fn plan_item(
    state: &ItemState,
    season: &Season,
    ctx: &UpgradeContext,
    options: &PlanOptions,
    reserve: &ReserveSummary,
) -> ItemPlan {
    let track = season.track(state.track);
    let from_rank = state.rank.clamp(1, track.max_rank);
    let (mut to_rank, mut reason) = policy_target(state, track, season, options, reserve);

    let ceiling = options.effective_drop_ceiling(season);
    if let Some(stop) = drop_ceiling_override(track, from_rank, to_rank, ceiling) {
        to_rank = from_rank;
        reason = Some(stop);
    }

    let free_up_to = ctx.free_ceiling(state.slot);
    let mut steps = Vec::new();
    let mut totals = CrestTotals::new();
    for (def, bucket) in track.steps.iter().zip(track.schedule()) {
        if def.from < from_rank || def.to > to_rank {
            continue;
        }
        let bucket = ScheduleBucket {
            cost_per_step: ctx.step_cost(def.crest, def.cost),
            ..bucket
        };
        let cost = cost_for_ilvl_range(bucket.from_ilvl, bucket.to_ilvl, free_up_to, &[bucket])
            .get(def.crest);
        totals.credit(def.crest, cost);
        steps.push(Step {
            from_rank: def.from,
            to_rank: def.to,
            crest: def.crest,
            base_cost: def.cost,
            cost,
            ilvl: bucket.to_ilvl,
            free: free_up_to.is_some_and(|free| free >= bucket.to_ilvl),
        });
    }

    ItemPlan {
        slot: state.slot,
        item_id: state.item_id,
        name: state.name.clone(),
        track: state.track,
        max_rank: track.max_rank,
        from_rank,
        to_rank,
        from_ilvl: track.ilvl_at(from_rank).unwrap_or(0),
        to_ilvl: track.ilvl_at(to_rank).unwrap_or(0),
        steps,
        totals,
        note: reason.map(|r| r.note()),
    }
}
