//! Item level → (track, rank) reverse lookup, cached per season.

use super::types::{Season, Track, TrackKey};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

/// Reverse index over every track ladder of one season.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IlvlIndex {
    /// Exact ilvl hits. When ladders overlap the highest track wins.
    exact: BTreeMap<u32, (TrackKey, u8)>,
    /// Highest track first.
    ladders: Vec<Track>,
}

impl IlvlIndex {
    pub fn build(season: &Season) -> Self {
        let mut exact = BTreeMap::new();
        // Ascending track order so higher tracks overwrite shared values.
        for track in &season.tracks {
            for (idx, &ilvl) in track.ilvl_by_rank.iter().enumerate() {
                exact.insert(ilvl, (track.key, idx as u8 + 1));
            }
        }
        let mut ladders = season.tracks.clone();
        ladders.sort_by(|a, b| b.key.cmp(&a.key));
        Self { exact, ladders }
    }

    /// Exact ladder value first; otherwise the highest ladder spanning `ilvl`,
    /// at the highest rank whose ilvl is at or below it.
    pub fn lookup(&self, ilvl: u32) -> Option<(TrackKey, u8)> {
        if let Some(&hit) = self.exact.get(&ilvl) {
            return Some(hit);
        }
        let track = self.ladders.iter().find(|track| track.spans(ilvl))?;
        track.rank_at_or_below(ilvl).map(|rank| (track.key, rank))
    }

    pub fn len(&self) -> usize {
        self.exact.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exact.is_empty()
    }
}

/// Lazily built indices keyed by season fingerprint. Nothing is evicted
/// implicitly; call `invalidate` or `clear` when a season is swapped out.
#[derive(Debug, Default)]
pub struct IndexCache {
    entries: HashMap<String, Arc<IlvlIndex>>,
    builds: u32,
}

impl IndexCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn index_for(&mut self, season: &Season) -> Arc<IlvlIndex> {
        if let Some(index) = self.entries.get(season.fingerprint()) {
            return Arc::clone(index);
        }
        let index = Arc::new(IlvlIndex::build(season));
        self.builds += 1;
        log::debug!("built ilvl index for season {} ({} values)", season.id, index.len());
        self.entries
            .insert(season.fingerprint().to_string(), Arc::clone(&index));
        index
    }

    /// Drops the index for one season. Returns whether anything was cached.
    pub fn invalidate(&mut self, fingerprint: &str) -> bool {
        self.entries.remove(fingerprint).is_some()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// How many indices have been built over the cache's lifetime.
    pub fn builds(&self) -> u32 {
        self.builds
    }
}
