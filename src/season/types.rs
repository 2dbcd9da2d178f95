use crate::crests::{Crest, ScheduleBucket, NUM_CRESTS};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const NUM_TRACKS: usize = 6;

/// Upgrade tracks, lowest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrackKey {
    Explorer,
    Adventurer,
    Veteran,
    Champion,
    Hero,
    Myth,
}

/// Which spending policy a track falls under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackTier {
    /// Always upgraded to max rank.
    Top,
    /// Gated by the natural-drop threshold and the breakpoint rank.
    Second,
    /// Upgraded only through its cheap-crest steps.
    Mid,
    /// Always upgraded to max rank; only ever costs cheap crests.
    Lower,
}

impl TrackKey {
    pub fn all() -> [TrackKey; NUM_TRACKS] {
        [
            TrackKey::Explorer,
            TrackKey::Adventurer,
            TrackKey::Veteran,
            TrackKey::Champion,
            TrackKey::Hero,
            TrackKey::Myth,
        ]
    }

    pub fn index(&self) -> usize {
        match self {
            TrackKey::Explorer => 0,
            TrackKey::Adventurer => 1,
            TrackKey::Veteran => 2,
            TrackKey::Champion => 3,
            TrackKey::Hero => 4,
            TrackKey::Myth => 5,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            TrackKey::Explorer => "Explorer",
            TrackKey::Adventurer => "Adventurer",
            TrackKey::Veteran => "Veteran",
            TrackKey::Champion => "Champion",
            TrackKey::Hero => "Hero",
            TrackKey::Myth => "Myth",
        }
    }

    pub fn tier(&self) -> TrackTier {
        match self {
            TrackKey::Myth => TrackTier::Top,
            TrackKey::Hero => TrackTier::Second,
            TrackKey::Champion => TrackTier::Mid,
            TrackKey::Explorer | TrackKey::Adventurer | TrackKey::Veteran => TrackTier::Lower,
        }
    }
}

impl fmt::Display for TrackKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One rank transition on a track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepDef {
    pub from: u8,
    pub to: u8,
    pub crest: Crest,
    pub cost: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    pub key: TrackKey,
    pub max_rank: u8,
    /// Item level per rank; index 0 is rank 1.
    pub ilvl_by_rank: Vec<u32>,
    pub steps: Vec<StepDef>,
}

impl Track {
    pub fn ilvl_at(&self, rank: u8) -> Option<u32> {
        if rank == 0 {
            return None;
        }
        self.ilvl_by_rank.get(rank as usize - 1).copied()
    }

    pub fn min_ilvl(&self) -> u32 {
        self.ilvl_by_rank.first().copied().unwrap_or(0)
    }

    pub fn max_ilvl(&self) -> u32 {
        self.ilvl_by_rank.last().copied().unwrap_or(0)
    }

    /// The step leaving `rank`, if any.
    pub fn step_from(&self, rank: u8) -> Option<&StepDef> {
        self.steps.iter().find(|step| step.from == rank)
    }

    /// Steps with `from >= from_rank` and `to <= to_rank`, in order.
    pub fn steps_between(&self, from_rank: u8, to_rank: u8) -> impl Iterator<Item = &StepDef> {
        self.steps
            .iter()
            .filter(move |step| step.from >= from_rank && step.to <= to_rank)
    }

    /// Highest rank whose item level is at or below `ilvl`.
    pub fn rank_at_or_below(&self, ilvl: u32) -> Option<u8> {
        self.ilvl_by_rank
            .iter()
            .rposition(|&rank_ilvl| rank_ilvl <= ilvl)
            .map(|idx| idx as u8 + 1)
    }

    /// Rank whose item level is exactly `ilvl`.
    pub fn rank_of_exact(&self, ilvl: u32) -> Option<u8> {
        self.ilvl_by_rank
            .iter()
            .position(|&rank_ilvl| rank_ilvl == ilvl)
            .map(|idx| idx as u8 + 1)
    }

    pub fn spans(&self, ilvl: u32) -> bool {
        !self.ilvl_by_rank.is_empty() && self.min_ilvl() <= ilvl && ilvl <= self.max_ilvl()
    }

    /// One cost bucket per step, spanning the step's item-level gain.
    pub fn schedule(&self) -> Vec<ScheduleBucket> {
        self.steps
            .iter()
            .filter_map(|step| {
                let from_ilvl = self.ilvl_at(step.from)?;
                let to_ilvl = self.ilvl_at(step.to)?;
                Some(ScheduleBucket {
                    from_ilvl,
                    to_ilvl,
                    crest: step.crest,
                    step_size: to_ilvl.saturating_sub(from_ilvl).max(1),
                    cost_per_step: step.cost,
                })
            })
            .collect()
    }

    pub fn label(&self, rank: u8) -> String {
        format!("{} {}/{}", self.key.name(), rank, self.max_rank)
    }
}

/// Currency ids for the season. Kept optional so a missing id is reported as a
/// configuration error rather than a parse error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurrencyIds {
    pub weathered: Option<u32>,
    pub carved: Option<u32>,
    pub runed: Option<u32>,
    pub gilded: Option<u32>,
    pub catalyst: Option<u32>,
}

impl CurrencyIds {
    pub fn crest(&self, crest: Crest) -> Option<u32> {
        match crest {
            Crest::Weathered => self.weathered,
            Crest::Carved => self.carved,
            Crest::Runed => self.runed,
            Crest::Gilded => self.gilded,
        }
    }
}

/// Bonus id table row: which track group and rank a bonus id encodes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BonusIdEntry {
    pub bonus_id: u32,
    pub group: u32,
    pub rank: u8,
    pub max_rank: u8,
    pub label: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackGroup {
    pub group: u32,
    pub track: TrackKey,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeroPolicy {
    /// Hero items below this item level are expected to be replaced by a drop.
    pub natural_drop_ilvl: u32,
    /// Highest Hero rank reachable without touching top-tier crests.
    pub breakpoint_rank: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AchievementDiscount {
    pub achievement_id: u32,
    pub crest: Crest,
    pub percent: u8,
}

/// A validated season configuration. Build it with `Season::builtin`,
/// `Season::from_json_str` or `Season::from_file`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Season {
    pub id: String,
    pub name: String,
    pub currencies: CurrencyIds,
    pub tracks: Vec<Track>,
    #[serde(default)]
    pub track_groups: Vec<TrackGroup>,
    #[serde(default)]
    pub bonus_ids: Vec<BonusIdEntry>,
    #[serde(default)]
    pub excluded_item_ids: Vec<u32>,
    pub default_drop_ceiling: u32,
    pub hero_policy: HeroPolicy,
    #[serde(default)]
    pub discounts: Vec<AchievementDiscount>,
    #[serde(skip)]
    pub(super) crest_ids: [u32; NUM_CRESTS],
    #[serde(skip)]
    pub(super) fingerprint: String,
}

impl Season {
    /// Tracks are sorted and complete after validation.
    pub fn track(&self, key: TrackKey) -> &Track {
        &self.tracks[key.index()]
    }

    pub fn crest_currency_id(&self, crest: Crest) -> u32 {
        self.crest_ids[crest.index()]
    }

    pub fn crest_for_currency(&self, currency_id: u32) -> Option<Crest> {
        Crest::all()
            .into_iter()
            .find(|&crest| self.crest_currency_id(crest) == currency_id)
    }

    pub fn track_for_group(&self, group: u32) -> Option<TrackKey> {
        self.track_groups
            .iter()
            .find(|entry| entry.group == group)
            .map(|entry| entry.track)
    }

    pub fn is_excluded(&self, item_id: u32) -> bool {
        self.excluded_item_ids.contains(&item_id)
    }

    /// SHA-256 of the season's canonical JSON; identifies the season in caches.
    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }
}
