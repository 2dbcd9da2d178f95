//! Integration test: full export -> PlanReport flow
//!
//! One realistic character exercising every track policy, a watermark, an
//! achievement discount, an excluded item, a crafted item and an unresolvable
//! slot, planned end to end.

use crestplan::crests::Crest;
use crestplan::items::Slot;
use crestplan::report::render_report;
use crestplan::season::TrackKey;
use crestplan::{plan_export, IndexCache, PlanOptions, PlanReport, Season};

const EXPORT: &str = r#"mage="Jaina"
level=80
region=eu
server=silvermoon
spec=frost

# upgrade_currencies=c:3284:100/c:3286:50/c:3288:40/c:3290:90
# upgrade_achievements=41887
# slot_high_watermarks=7:714:714

# Cowl of the Archmage (710)
head=,id=237718,bonus_id=6652/12802/1540
# Mantle of the Archmage (694)
shoulder=,id=237716,bonus_id=12350/6652
# Loa Worshiper's Band (684)
back=,id=235499,bonus_id=12291
# Robes of the Archmage (697)
chest=,id=237721,bonus_id=12351
# Bindings of Lost Tides (675)
wrist=,id=221083,bonus_id=6652
# Gloves of Frozen Wind (681)
hands=,id=221100,bonus_id=12290
# Woven Dusk Leggings (720)
legs=,id=219334,bonus_id=10421/9633,crafted_stats=36/49,crafting_quality=5
# Treads of the Archmage (707)
feet=,id=237720,bonus_id=12801
trinket1=,id=242395
"#;

fn plan(options: &PlanOptions) -> PlanReport {
    let season = Season::builtin().unwrap();
    let mut cache = IndexCache::new();
    plan_export(EXPORT, &season, options, &mut cache)
}

// =========================================================================
// Per-item outcomes
// =========================================================================

#[test]
fn test_item_outcomes() {
    let report = plan(&PlanOptions::default());
    let summary = &report.summary;
    let ranks = |slot: Slot| {
        let p = summary.plan_for(slot).unwrap();
        (p.track, p.from_rank, p.to_rank)
    };

    assert_eq!(ranks(Slot::Head), (TrackKey::Myth, 2, 6));
    assert_eq!(ranks(Slot::Feet), (TrackKey::Myth, 1, 6));
    assert_eq!(ranks(Slot::Chest), (TrackKey::Hero, 2, 4));
    assert_eq!(ranks(Slot::Shoulder), (TrackKey::Hero, 1, 1));
    assert_eq!(ranks(Slot::Hands), (TrackKey::Champion, 1, 4));
    assert_eq!(ranks(Slot::Wrist), (TrackKey::Veteran, 3, 8));
    assert_eq!(ranks(Slot::Back), (TrackKey::Champion, 2, 2));
    assert_eq!(ranks(Slot::Legs), (TrackKey::Myth, 5, 5));
}

#[test]
fn test_every_hold_explains_itself() {
    let report = plan(&PlanOptions::default());
    for plan in report.summary.plans.iter().filter(|p| p.is_hold()) {
        assert!(plan.note.is_some(), "{} has no note", plan.slot);
    }
    let note = |slot: Slot| report.summary.plan_for(slot).unwrap().note.clone().unwrap();
    assert!(note(Slot::Legs).contains("Crafted"));
    assert!(note(Slot::Back).contains("cannot be upgraded"));
    assert!(note(Slot::Shoulder).contains("reserve"));
}

#[test]
fn test_unresolvable_slot_reported() {
    let report = plan(&PlanOptions::default());
    assert_eq!(report.dropped, vec![Slot::Trinket1]);
    assert!(report.summary.plan_for(Slot::Trinket1).is_none());
}

#[test]
fn test_bag_item_for_empty_slot_is_not_billed() {
    let season = Season::builtin().unwrap();
    let mut cache = IndexCache::new();
    let text = "main_hand=,id=100,bonus_id=12801\n\
                ### Gear from Bags\n\
                # Spare Shield (707)\n\
                # off_hand=,id=200,bonus_id=12801\n";
    let report = plan_export(text, &season, &PlanOptions::default(), &mut cache);
    let slots: Vec<Slot> = report.summary.plans.iter().map(|p| p.slot).collect();
    assert_eq!(slots, vec![Slot::MainHand]);
    assert_eq!(report.summary.totals.get(Crest::Gilded), 75);
}

#[test]
fn test_bare_id_slot_lines_are_planned() {
    let season = Season::builtin().unwrap();
    let mut cache = IndexCache::new();
    let text = "# Hood (701)\nhead=237704,bonus_id=12352\n";
    let report = plan_export(text, &season, &PlanOptions::default(), &mut cache);
    assert_eq!(report.summary.plans.len(), 1);
    let head = report.summary.plan_for(Slot::Head).unwrap();
    assert_eq!((head.track, head.from_rank, head.to_rank), (TrackKey::Hero, 3, 4));
    assert_eq!(report.skipped, 0);
}

// =========================================================================
// Totals, discounts and watermarks
// =========================================================================

#[test]
fn test_totals_and_shortfall() {
    let report = plan(&PlanOptions::default());
    let totals = &report.summary.totals;
    assert_eq!(totals.get(Crest::Gilded), 105);
    assert_eq!(totals.get(Crest::Runed), 30);
    assert_eq!(totals.get(Crest::Carved), 84);
    assert_eq!(totals.get(Crest::Weathered), 15);

    assert_eq!(report.shortfall.get(Crest::Gilded), 15);
    assert_eq!(report.shortfall.get(Crest::Carved), 34);
    assert_eq!(report.shortfall.get(Crest::Runed), 0);
    assert_eq!(report.shortfall.get(Crest::Weathered), 0);
}

#[test]
fn test_watermarked_feet_skip_unlocked_steps() {
    let report = plan(&PlanOptions::default());
    let feet = report.summary.plan_for(Slot::Feet).unwrap();
    assert_eq!(feet.steps.iter().filter(|s| s.free).count(), 2);
    assert_eq!(feet.totals.get(Crest::Gilded), 45);
}

#[test]
fn test_carved_discount_applied() {
    let report = plan(&PlanOptions::default());
    let hands = report.summary.plan_for(Slot::Hands).unwrap();
    assert!(hands.steps.iter().all(|s| s.cost == 12 && s.base_cost == 15));
    assert_eq!(hands.totals.get(Crest::Carved), 36);
}

#[test]
fn test_reserve_summary() {
    let report = plan(&PlanOptions::default());
    let reserve = &report.summary.reserve;
    assert_eq!(reserve.crest, Some(Crest::Runed));
    assert_eq!(reserve.held_items, 1);
    assert_eq!(reserve.baseline, 15);
    assert_eq!(reserve.surplus, 25);
}

#[test]
fn test_plan_order() {
    let report = plan(&PlanOptions::default());
    let order: Vec<Slot> = report.summary.plans.iter().map(|p| p.slot).collect();
    assert_eq!(
        order,
        vec![
            Slot::Head,
            Slot::Feet,
            Slot::Chest,
            Slot::Hands,
            Slot::Wrist,
            Slot::Legs,
            Slot::Shoulder,
            Slot::Back,
        ]
    );
}

// =========================================================================
// Options
// =========================================================================

#[test]
fn test_maximal_upgrades_all_hero_items() {
    let report = plan(&PlanOptions {
        drop_ceiling: None,
        maximal: true,
    });
    for slot in [Slot::Chest, Slot::Shoulder] {
        assert_eq!(report.summary.plan_for(slot).unwrap().to_rank, 6, "{slot}");
    }
}

#[test]
fn test_raised_ceiling_reverts_hero_breakpoint() {
    let report = plan(&PlanOptions {
        drop_ceiling: Some(704),
        maximal: false,
    });
    assert!(report.summary.plan_for(Slot::Chest).unwrap().is_hold());
    assert_eq!(report.summary.totals.get(Crest::Runed), 0);
}

#[test]
fn test_report_is_deterministic_and_renders() {
    let first = plan(&PlanOptions::default());
    let second = plan(&PlanOptions::default());
    assert_eq!(first, second);

    let text = render_report(&first);
    assert!(text.starts_with("Jaina (mage) - eu/silvermoon"));
    assert!(text.contains("Not affordable with the crests held."));
    assert!(text.contains("Still needed: 34 Carved, 15 Gilded"));
    assert!(text.contains("Unresolved slots: Trinket 1"));
}
