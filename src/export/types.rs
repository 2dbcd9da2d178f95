use crate::items::{ParsedItem, Slot};
use serde::{Deserialize, Serialize};

/// One `c:<id>:<qty>` or `i:<id>:<qty>` record from the upgrade wallet line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WalletEntry {
    Currency { id: u32, quantity: u32 },
    Item { id: u32, quantity: u32 },
}

impl WalletEntry {
    pub fn quantity(&self) -> u32 {
        match self {
            WalletEntry::Currency { quantity, .. } | WalletEntry::Item { quantity, .. } => {
                *quantity
            }
        }
    }
}

/// Per-slot catch-up record: item levels up to the watermark upgrade for free.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Watermark {
    pub slot: Slot,
    pub current: u32,
    pub max: u32,
}

impl Watermark {
    pub fn free_ilvl(&self) -> u32 {
        self.current.max(self.max)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalystEntry {
    pub currency_id: u32,
    pub quantity: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterMeta {
    pub name: Option<String>,
    pub class: Option<String>,
    pub spec: Option<String>,
    pub race: Option<String>,
    pub region: Option<String>,
    pub server: Option<String>,
    pub level: Option<u32>,
    pub professions: Option<String>,
    pub talents: Option<String>,
}

/// Everything the parser recovered from one export.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedExport {
    pub meta: CharacterMeta,
    /// One item per slot, in canonical slot order.
    pub items: Vec<ParsedItem>,
    /// Commented slot lines from the bag section, in export order. Never planned.
    pub bag_items: Vec<ParsedItem>,
    pub wallet: Vec<WalletEntry>,
    pub watermarks: Vec<Watermark>,
    pub achievements: Vec<u32>,
    pub catalyst: Vec<CatalystEntry>,
    /// Lines and sub-records that looked like data but could not be used.
    pub skipped: usize,
}

impl ParsedExport {
    pub fn item(&self, slot: Slot) -> Option<&ParsedItem> {
        self.items.iter().find(|item| item.slot == slot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_watermark_free_ilvl_is_higher_value() {
        let mark = Watermark {
            slot: Slot::Head,
            current: 704,
            max: 710,
        };
        assert_eq!(mark.free_ilvl(), 710);
        let mark = Watermark {
            slot: Slot::Head,
            current: 713,
            max: 710,
        };
        assert_eq!(mark.free_ilvl(), 713);
    }

    #[test]
    fn test_wallet_quantity() {
        assert_eq!(WalletEntry::Currency { id: 3284, quantity: 40 }.quantity(), 40);
        assert_eq!(WalletEntry::Item { id: 1, quantity: 2 }.quantity(), 2);
    }
}
