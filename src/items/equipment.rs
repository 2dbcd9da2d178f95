use super::types::{ParsedItem, Slot, NUM_SLOTS};

/// Equipped items keyed by slot. The first item seen for a slot is kept:
/// exports list the worn set before bag contents.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Loadout {
    slots: [Option<ParsedItem>; NUM_SLOTS],
}

impl Loadout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, slot: Slot) -> Option<&ParsedItem> {
        self.slots[slot.index()].as_ref()
    }

    /// Stores `item` if its slot is still empty. Returns whether it was kept.
    pub fn equip_if_empty(&mut self, item: ParsedItem) -> bool {
        let entry = &mut self.slots[item.slot.index()];
        if entry.is_some() {
            return false;
        }
        *entry = Some(item);
        true
    }

    /// Equipped items in canonical slot order.
    pub fn iter_equipped(&self) -> impl Iterator<Item = &ParsedItem> {
        self.slots.iter().filter_map(|item| item.as_ref())
    }

    pub fn into_items(self) -> Vec<ParsedItem> {
        self.slots.into_iter().flatten().collect()
    }

    pub fn len(&self) -> usize {
        self.iter_equipped().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loadout_starts_empty() {
        let loadout = Loadout::new();
        assert!(loadout.is_empty());
        assert!(loadout.get(Slot::Head).is_none());
    }

    #[test]
    fn test_first_item_per_slot_wins() {
        let mut loadout = Loadout::new();
        assert!(loadout.equip_if_empty(ParsedItem::new(Slot::Head, 100)));
        assert!(!loadout.equip_if_empty(ParsedItem::new(Slot::Head, 200)));
        assert_eq!(loadout.get(Slot::Head).map(|i| i.id), Some(100));
        assert_eq!(loadout.len(), 1);
    }

    #[test]
    fn test_iter_equipped_in_slot_order() {
        let mut loadout = Loadout::new();
        loadout.equip_if_empty(ParsedItem::new(Slot::OffHand, 3));
        loadout.equip_if_empty(ParsedItem::new(Slot::Head, 1));
        loadout.equip_if_empty(ParsedItem::new(Slot::Back, 2));

        let ids: Vec<u32> = loadout.iter_equipped().map(|i| i.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(loadout.into_items().len(), 3);
    }

    #[test]
    fn test_fill_all_sixteen_slots() {
        let mut loadout = Loadout::new();
        for (idx, slot) in Slot::all().into_iter().enumerate() {
            assert!(loadout.equip_if_empty(ParsedItem::new(slot, idx as u32)));
        }
        assert_eq!(loadout.len(), NUM_SLOTS);
        for slot in Slot::all() {
            assert!(loadout.get(slot).is_some(), "Slot {:?} should be equipped", slot);
        }
    }
}
