//! Bonus id → upgrade track decoding.

use crate::season::{BonusIdEntry, Season, TrackKey};
use std::collections::HashMap;

/// Decoded bonus id hit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackHit {
    pub bonus_id: u32,
    pub group: u32,
    pub rank: u8,
    pub max_rank: u8,
    pub label: String,
}

/// Reverse lookup over a season's bonus id table.
#[derive(Debug, Clone)]
pub struct BonusIdDecoder<'a> {
    season: &'a Season,
    by_id: HashMap<u32, &'a BonusIdEntry>,
}

impl<'a> BonusIdDecoder<'a> {
    pub fn new(season: &'a Season) -> Self {
        let by_id = season
            .bonus_ids
            .iter()
            .map(|entry| (entry.bonus_id, entry))
            .collect();
        Self { season, by_id }
    }

    /// First bonus id, in export order, present in the table.
    pub fn decode(&self, bonus_ids: &[u32]) -> Option<TrackHit> {
        bonus_ids.iter().find_map(|id| {
            self.by_id.get(id).map(|entry| TrackHit {
                bonus_id: entry.bonus_id,
                group: entry.group,
                rank: entry.rank,
                max_rank: entry.max_rank,
                label: entry.label.clone(),
            })
        })
    }

    pub fn track_for_group(&self, group: u32) -> Option<TrackKey> {
        self.season.track_for_group(group)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_first_known_id() {
        let season = Season::builtin().unwrap();
        let decoder = BonusIdDecoder::new(&season);
        // 6652 and 10354 are unrelated stat/socket ids.
        let hit = decoder.decode(&[6652, 10354, 12351, 12290]).unwrap();
        assert_eq!(hit.bonus_id, 12351);
        assert_eq!(hit.rank, 2);
        assert_eq!(hit.max_rank, 6);
        assert_eq!(hit.label, "Hero 2/6");
        assert_eq!(decoder.track_for_group(hit.group), Some(TrackKey::Hero));
    }

    #[test]
    fn test_decode_miss() {
        let season = Season::builtin().unwrap();
        let decoder = BonusIdDecoder::new(&season);
        assert_eq!(decoder.decode(&[]), None);
        assert_eq!(decoder.decode(&[1, 2, 3]), None);
    }

    #[test]
    fn test_table_agrees_with_registry() {
        let season = Season::builtin().unwrap();
        for entry in &season.bonus_ids {
            let key = season
                .track_for_group(entry.group)
                .expect("every builtin group maps to a track");
            assert_eq!(season.track(key).max_rank, entry.max_rank);
        }
    }
}
