use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign};

pub const NUM_CRESTS: usize = 4;

/// Upgrade currency tiers, cheapest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Crest {
    Weathered,
    Carved,
    Runed,
    Gilded,
}

impl Crest {
    pub fn all() -> [Crest; NUM_CRESTS] {
        [Crest::Weathered, Crest::Carved, Crest::Runed, Crest::Gilded]
    }

    pub fn index(&self) -> usize {
        match self {
            Crest::Weathered => 0,
            Crest::Carved => 1,
            Crest::Runed => 2,
            Crest::Gilded => 3,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Crest::Weathered => "Weathered",
            Crest::Carved => "Carved",
            Crest::Runed => "Runed",
            Crest::Gilded => "Gilded",
        }
    }

    /// The two cheapest tiers. Spending these is never gated by the drop ceiling.
    pub fn is_cheap(&self) -> bool {
        matches!(self, Crest::Weathered | Crest::Carved)
    }
}

impl fmt::Display for Crest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Per-tier crest amounts, used both for wallet stock and for plan costs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrestTotals {
    amounts: [u32; NUM_CRESTS],
}

impl CrestTotals {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, crest: Crest) -> u32 {
        self.amounts[crest.index()]
    }

    pub fn set(&mut self, crest: Crest, amount: u32) {
        self.amounts[crest.index()] = amount;
    }

    pub fn credit(&mut self, crest: Crest, amount: u32) {
        let slot = &mut self.amounts[crest.index()];
        *slot = slot.saturating_add(amount);
    }

    pub fn total(&self) -> u32 {
        self.amounts
            .iter()
            .fold(0, |acc: u32, &amount| acc.saturating_add(amount))
    }

    pub fn is_zero(&self) -> bool {
        self.amounts.iter().all(|&a| a == 0)
    }

    /// Non-zero tiers in tier order.
    pub fn iter_nonzero(&self) -> impl Iterator<Item = (Crest, u32)> + '_ {
        Crest::all()
            .into_iter()
            .map(|crest| (crest, self.get(crest)))
            .filter(|&(_, amount)| amount > 0)
    }
}

impl Add for CrestTotals {
    type Output = CrestTotals;

    fn add(mut self, rhs: CrestTotals) -> CrestTotals {
        self += rhs;
        self
    }
}

impl AddAssign for CrestTotals {
    fn add_assign(&mut self, rhs: CrestTotals) {
        for crest in Crest::all() {
            self.credit(crest, rhs.get(crest));
        }
    }
}

impl fmt::Display for CrestTotals {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            return f.write_str("free");
        }
        let parts: Vec<String> = self
            .iter_nonzero()
            .map(|(crest, amount)| format!("{} {}", amount, crest.name()))
            .collect();
        f.write_str(&parts.join(", "))
    }
}

/// One cost bucket of an item-level schedule: every `step_size` ilvls inside
/// `[from_ilvl, to_ilvl)` cost `cost_per_step` crests of one tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduleBucket {
    pub from_ilvl: u32,
    pub to_ilvl: u32,
    pub crest: Crest,
    pub step_size: u32,
    pub cost_per_step: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crest_ordering() {
        assert!(Crest::Weathered < Crest::Carved);
        assert!(Crest::Carved < Crest::Runed);
        assert!(Crest::Runed < Crest::Gilded);
    }

    #[test]
    fn test_only_two_cheapest_tiers_are_cheap() {
        let cheap: Vec<Crest> = Crest::all().into_iter().filter(Crest::is_cheap).collect();
        assert_eq!(cheap, vec![Crest::Weathered, Crest::Carved]);
    }

    #[test]
    fn test_totals_add_and_sum() {
        let mut a = CrestTotals::new();
        a.credit(Crest::Runed, 15);
        a.credit(Crest::Runed, 15);
        let mut b = CrestTotals::new();
        b.credit(Crest::Gilded, 30);

        let sum = a + b;
        assert_eq!(sum.get(Crest::Runed), 30);
        assert_eq!(sum.get(Crest::Gilded), 30);
        assert_eq!(sum.total(), 60);
    }

    #[test]
    fn test_totals_display() {
        let mut totals = CrestTotals::new();
        assert_eq!(totals.to_string(), "free");
        totals.credit(Crest::Carved, 45);
        totals.credit(Crest::Weathered, 15);
        assert_eq!(totals.to_string(), "15 Weathered, 45 Carved");
    }
}
