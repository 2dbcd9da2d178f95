//! Export text parser.
//!
//! The format is line oriented and only loosely specified, so nothing here
//! fails: a line that cannot be read is skipped and counted. The first line
//! for a slot wins. Bag contents follow the worn set as commented slot lines;
//! from the first of those on, slot lines are kept as bag items and never fill
//! an equipped slot.

use super::types::{CatalystEntry, CharacterMeta, ParsedExport, WalletEntry, Watermark};
use crate::constants::{
    BONUS_ID_KEY, CATALYST_CURRENCIES_KEY, CLASS_KEYS, CRAFTED_MARKERS, ENCHANT_ID_KEY,
    GEM_ID_KEY, ILEVEL_KEY, ITEM_ID_KEY, SLOT_WATERMARKS_KEY, UPGRADE_ACHIEVEMENTS_KEY,
    UPGRADE_CURRENCIES_KEY,
};
use crate::items::{ItemLabel, Loadout, ParsedItem, Slot};

pub fn parse_export(text: &str) -> ParsedExport {
    let mut export = ParsedExport::default();
    let mut loadout = Loadout::new();
    let mut pending_label: Option<ItemLabel> = None;
    let mut in_bags = false;

    for raw in text.lines() {
        let line = raw.trim();
        if let Some(label) = parse_item_label(line) {
            pending_label = Some(label);
            continue;
        }
        // A label only ever applies to the line right after it.
        let label = pending_label.take();
        if line.is_empty() {
            continue;
        }

        let commented = line.starts_with('#');
        let body = line.trim_start_matches('#').trim_start();
        let Some((key, value)) = body.split_once('=') else {
            continue;
        };
        let key = key.trim();

        if let Some(slot) = Slot::from_key(key) {
            in_bags |= commented;
            match parse_item_line(slot, value, label) {
                Some(item) if in_bags => export.bag_items.push(item),
                Some(item) => {
                    if !loadout.equip_if_empty(item) {
                        log::trace!("ignoring later {} line", key);
                    }
                }
                None => export.skipped += 1,
            }
            continue;
        }

        match key {
            UPGRADE_CURRENCIES_KEY => {
                let entries = parse_records(value, parse_wallet_entry, &mut export.skipped);
                export.wallet.extend(entries);
            }
            SLOT_WATERMARKS_KEY => {
                let marks = parse_records(value, parse_watermark, &mut export.skipped);
                export.watermarks.extend(marks);
            }
            UPGRADE_ACHIEVEMENTS_KEY => {
                let ids = parse_records(value, |r| r.parse::<u32>().ok(), &mut export.skipped);
                export.achievements.extend(ids);
            }
            CATALYST_CURRENCIES_KEY => {
                let entries = parse_records(value, parse_catalyst_entry, &mut export.skipped);
                export.catalyst.extend(entries);
            }
            // Free-form comments may contain '=' anywhere.
            _ if commented => {}
            _ => apply_meta(&mut export.meta, key, value),
        }
    }

    export.items = loadout.into_items();
    if export.skipped > 0 {
        log::debug!("skipped {} unreadable export records", export.skipped);
    }
    export
}

/// `# Name (ilvl)` comment preceding an item line.
fn parse_item_label(line: &str) -> Option<ItemLabel> {
    let rest = line.strip_prefix('#')?.trim();
    let inner = rest.strip_suffix(')')?;
    let open = inner.rfind('(')?;
    let ilvl = inner[open + 1..].trim().parse().ok()?;
    let name = inner[..open].trim();
    if name.is_empty() || name.contains('=') {
        return None;
    }
    Some(ItemLabel {
        name: name.to_string(),
        ilvl,
    })
}

/// `<id>,key=value,...` or `,id=<id>,key=value,...`.
fn parse_item_line(slot: Slot, value: &str, label: Option<ItemLabel>) -> Option<ParsedItem> {
    let mut id = None;
    let mut enchant_id = None;
    let mut inline_ilvl = None;
    let mut gem_ids = Vec::new();
    let mut bonus_ids = Vec::new();

    for (index, field) in value.split(',').enumerate() {
        let Some((key, val)) = field.split_once('=') else {
            if index == 0 {
                id = field.trim().parse().ok();
            }
            continue;
        };
        let val = val.trim();
        match key.trim() {
            ITEM_ID_KEY => id = val.parse().ok(),
            ENCHANT_ID_KEY => enchant_id = val.parse().ok(),
            ILEVEL_KEY => inline_ilvl = val.parse().ok(),
            GEM_ID_KEY => gem_ids = parse_id_list(val),
            BONUS_ID_KEY => bonus_ids = parse_id_list(val),
            _ => {}
        }
    }

    let mut item = ParsedItem::new(slot, id?);
    item.label = label;
    item.inline_ilvl = inline_ilvl;
    item.enchant_id = enchant_id;
    item.gem_ids = gem_ids;
    item.bonus_ids = bonus_ids;
    item.crafted = CRAFTED_MARKERS.iter().any(|marker| value.contains(marker));
    Some(item)
}

fn parse_id_list(value: &str) -> Vec<u32> {
    value
        .split('/')
        .filter_map(|id| id.trim().parse().ok())
        .collect()
}

fn parse_records<T>(
    value: &str,
    parse: impl Fn(&str) -> Option<T>,
    skipped: &mut usize,
) -> Vec<T> {
    let mut out = Vec::new();
    for record in value.split('/').map(str::trim).filter(|r| !r.is_empty()) {
        match parse(record) {
            Some(parsed) => out.push(parsed),
            None => *skipped += 1,
        }
    }
    out
}

/// Reads exactly `N` numeric fields of an `a:b:c`-style record.
fn numeric_fields<const N: usize>(parts: &[&str]) -> Option<[u32; N]> {
    if parts.len() != N {
        return None;
    }
    let mut out = [0u32; N];
    for (field, part) in out.iter_mut().zip(parts) {
        *field = part.trim().parse().ok()?;
    }
    Some(out)
}

fn parse_wallet_entry(record: &str) -> Option<WalletEntry> {
    let parts: Vec<&str> = record.split(':').collect();
    let (kind, rest) = parts.split_first()?;
    let [id, quantity] = numeric_fields::<2>(rest)?;
    match kind.trim() {
        "c" => Some(WalletEntry::Currency { id, quantity }),
        "i" => Some(WalletEntry::Item { id, quantity }),
        _ => None,
    }
}

fn parse_watermark(record: &str) -> Option<Watermark> {
    let parts: Vec<&str> = record.split(':').collect();
    let [index, current, max] = numeric_fields::<3>(&parts)?;
    Some(Watermark {
        slot: Slot::from_inventory_index(index)?,
        current,
        max,
    })
}

fn parse_catalyst_entry(record: &str) -> Option<CatalystEntry> {
    let parts: Vec<&str> = record.split(':').collect();
    let [currency_id, quantity] = numeric_fields::<2>(&parts)?;
    Some(CatalystEntry {
        currency_id,
        quantity,
    })
}

fn apply_meta(meta: &mut CharacterMeta, key: &str, value: &str) {
    let value = value.trim().trim_matches('"').trim();
    if value.is_empty() {
        return;
    }
    if CLASS_KEYS.contains(&key) {
        meta.class = Some(key.to_string());
        meta.name = Some(value.to_string());
        return;
    }
    let field = match key {
        "spec" => &mut meta.spec,
        "race" => &mut meta.race,
        "region" => &mut meta.region,
        "server" => &mut meta.server,
        "professions" => &mut meta.professions,
        "talents" => &mut meta.talents,
        "level" => {
            meta.level = value.parse().ok();
            return;
        }
        _ => return,
    };
    *field = Some(value.to_string());
}
