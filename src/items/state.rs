//! ParsedItem → ItemState resolution.

use super::bonus_ids::BonusIdDecoder;
use super::types::{ItemState, ParsedItem, TrackSource};
use crate::season::{IlvlIndex, TrackKey};

/// Resolves an item's track and rank from its bonus ids, falling back to its
/// item level. Returns `None` when neither resolves; the item is then left out
/// of planning rather than guessed at.
pub fn build_item_state(
    item: &ParsedItem,
    decoder: &BonusIdDecoder<'_>,
    index: &IlvlIndex,
) -> Option<ItemState> {
    let (track, rank, source) = resolve_by_bonus_id(item, decoder)
        .or_else(|| resolve_by_ilvl(item, index))?;

    Some(ItemState {
        slot: item.slot,
        item_id: item.id,
        name: item.name().map(str::to_string),
        ilvl: item.ilvl(),
        track,
        rank,
        source,
        crafted: item.crafted,
    })
}

fn resolve_by_bonus_id(
    item: &ParsedItem,
    decoder: &BonusIdDecoder<'_>,
) -> Option<(TrackKey, u8, TrackSource)> {
    let hit = decoder.decode(&item.bonus_ids)?;
    let track = decoder.track_for_group(hit.group)?;
    Some((
        track,
        hit.rank,
        TrackSource::BonusId {
            bonus_id: hit.bonus_id,
            label: hit.label,
        },
    ))
}

fn resolve_by_ilvl(item: &ParsedItem, index: &IlvlIndex) -> Option<(TrackKey, u8, TrackSource)> {
    let ilvl = item.ilvl()?;
    let (track, rank) = index.lookup(ilvl)?;
    Some((track, rank, TrackSource::IlvlFallback { ilvl }))
}
