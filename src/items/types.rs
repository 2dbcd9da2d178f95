use crate::season::TrackKey;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const NUM_SLOTS: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Slot {
    Head,
    Neck,
    Shoulder,
    Back,
    Chest,
    Wrist,
    Hands,
    Waist,
    Legs,
    Feet,
    Finger1,
    Finger2,
    Trinket1,
    Trinket2,
    MainHand,
    OffHand,
}

impl Slot {
    pub fn all() -> [Slot; NUM_SLOTS] {
        [
            Slot::Head,
            Slot::Neck,
            Slot::Shoulder,
            Slot::Back,
            Slot::Chest,
            Slot::Wrist,
            Slot::Hands,
            Slot::Waist,
            Slot::Legs,
            Slot::Feet,
            Slot::Finger1,
            Slot::Finger2,
            Slot::Trinket1,
            Slot::Trinket2,
            Slot::MainHand,
            Slot::OffHand,
        ]
    }

    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Key used on equipped-item lines of the export.
    pub fn key(&self) -> &'static str {
        match self {
            Slot::Head => "head",
            Slot::Neck => "neck",
            Slot::Shoulder => "shoulder",
            Slot::Back => "back",
            Slot::Chest => "chest",
            Slot::Wrist => "wrist",
            Slot::Hands => "hands",
            Slot::Waist => "waist",
            Slot::Legs => "legs",
            Slot::Feet => "feet",
            Slot::Finger1 => "finger1",
            Slot::Finger2 => "finger2",
            Slot::Trinket1 => "trinket1",
            Slot::Trinket2 => "trinket2",
            Slot::MainHand => "main_hand",
            Slot::OffHand => "off_hand",
        }
    }

    pub fn from_key(key: &str) -> Option<Slot> {
        Slot::all().into_iter().find(|slot| slot.key() == key)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Slot::Head => "Head",
            Slot::Neck => "Neck",
            Slot::Shoulder => "Shoulder",
            Slot::Back => "Back",
            Slot::Chest => "Chest",
            Slot::Wrist => "Wrist",
            Slot::Hands => "Hands",
            Slot::Waist => "Waist",
            Slot::Legs => "Legs",
            Slot::Feet => "Feet",
            Slot::Finger1 => "Ring 1",
            Slot::Finger2 => "Ring 2",
            Slot::Trinket1 => "Trinket 1",
            Slot::Trinket2 => "Trinket 2",
            Slot::MainHand => "Main Hand",
            Slot::OffHand => "Off Hand",
        }
    }

    /// Slot for a 0-based inventory index as used by watermark records.
    /// Index 3 (shirt) and anything past off hand have no upgradable slot.
    pub fn from_inventory_index(index: u32) -> Option<Slot> {
        match index {
            0 => Some(Slot::Head),
            1 => Some(Slot::Neck),
            2 => Some(Slot::Shoulder),
            4 => Some(Slot::Chest),
            5 => Some(Slot::Waist),
            6 => Some(Slot::Legs),
            7 => Some(Slot::Feet),
            8 => Some(Slot::Wrist),
            9 => Some(Slot::Hands),
            10 => Some(Slot::Finger1),
            11 => Some(Slot::Finger2),
            12 => Some(Slot::Trinket1),
            13 => Some(Slot::Trinket2),
            14 => Some(Slot::Back),
            15 => Some(Slot::MainHand),
            16 => Some(Slot::OffHand),
            _ => None,
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Name and item level as announced by a `# Name (ilvl)` comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemLabel {
    pub name: String,
    pub ilvl: u32,
}

/// One equipped item as read from the export, before track resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedItem {
    pub slot: Slot,
    pub id: u32,
    pub label: Option<ItemLabel>,
    /// Inline `ilevel=` value, used when no label was announced.
    pub inline_ilvl: Option<u32>,
    pub enchant_id: Option<u32>,
    pub gem_ids: Vec<u32>,
    pub bonus_ids: Vec<u32>,
    pub crafted: bool,
}

impl ParsedItem {
    pub fn new(slot: Slot, id: u32) -> Self {
        Self {
            slot,
            id,
            label: None,
            inline_ilvl: None,
            enchant_id: None,
            gem_ids: Vec::new(),
            bonus_ids: Vec::new(),
            crafted: false,
        }
    }

    pub fn ilvl(&self) -> Option<u32> {
        self.label.as_ref().map(|l| l.ilvl).or(self.inline_ilvl)
    }

    pub fn name(&self) -> Option<&str> {
        self.label.as_ref().map(|l| l.name.as_str())
    }
}

/// How an item's track and rank were determined.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrackSource {
    BonusId { bonus_id: u32, label: String },
    IlvlFallback { ilvl: u32 },
}

/// Normalized per-slot state consumed by the planner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemState {
    pub slot: Slot,
    pub item_id: u32,
    pub name: Option<String>,
    pub ilvl: Option<u32>,
    pub track: TrackKey,
    pub rank: u8,
    pub source: TrackSource,
    pub crafted: bool,
}

impl ItemState {
    pub fn display_name(&self) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => format!("item {}", self.item_id),
        }
    }
}
