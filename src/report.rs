//! Plain-text rendering of a plan report for the terminal.

use crate::pipeline::PlanReport;
use crate::planner::ItemPlan;
use std::fmt::{self, Write};

pub fn render_report(report: &PlanReport) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = write_report(&mut out, report);
    out
}

pub fn write_report(out: &mut impl Write, report: &PlanReport) -> fmt::Result {
    let meta = &report.meta;
    if let Some(name) = &meta.name {
        write!(out, "{}", name)?;
        if let Some(class) = &meta.class {
            write!(out, " ({})", class)?;
        }
        if let (Some(region), Some(server)) = (&meta.region, &meta.server) {
            write!(out, " - {}/{}", region, server)?;
        }
        writeln!(out)?;
    }
    writeln!(out, "Crests held: {}", stock_line(report))?;

    let (buying, holding): (Vec<&ItemPlan>, Vec<&ItemPlan>) =
        report.summary.plans.iter().partition(|plan| !plan.is_hold());

    if !buying.is_empty() {
        writeln!(out, "\nUpgrades")?;
        for plan in buying {
            write_upgrade(out, plan)?;
        }
    }
    if !holding.is_empty() {
        writeln!(out, "\nHolding")?;
        for plan in holding {
            writeln!(
                out,
                "  {:<10} {} {}/{}  {}",
                plan.slot.name(),
                plan.track,
                plan.from_rank,
                plan.max_rank,
                plan.note.as_deref().unwrap_or("")
            )?;
        }
    }

    writeln!(out, "\nTotal cost: {}", report.summary.totals)?;
    if !report.shortfall.is_zero() {
        writeln!(
            out,
            "Not affordable with the crests held. Still needed: {}",
            report.shortfall
        )?;
    } else if !report.summary.totals.is_zero() {
        writeln!(out, "Affordable with the crests held.")?;
    }

    let reserve = &report.summary.reserve;
    if let Some(crest) = reserve.crest {
        if reserve.held_items > 0 {
            writeln!(
                out,
                "Reserve: {} {} crests for {} held Hero item(s); {} beyond that.",
                reserve.baseline, crest, reserve.held_items, reserve.surplus
            )?;
        }
    }

    if !report.dropped.is_empty() {
        let slots: Vec<&str> = report.dropped.iter().map(|slot| slot.name()).collect();
        writeln!(out, "Unresolved slots: {}", slots.join(", "))?;
    }
    Ok(())
}

fn stock_line(report: &PlanReport) -> String {
    let stock = if report.stock.is_zero() {
        "none".to_string()
    } else {
        report.stock.to_string()
    };
    if report.catalyst_charges > 0 {
        format!("{} | catalyst charges: {}", stock, report.catalyst_charges)
    } else {
        stock
    }
}

fn write_upgrade(out: &mut impl Write, plan: &ItemPlan) -> fmt::Result {
    let name = plan
        .name
        .clone()
        .unwrap_or_else(|| format!("item {}", plan.item_id));
    writeln!(
        out,
        "  {:<10} {}  {} {}/{} -> {}/{}  ({} -> {})  {}",
        plan.slot.name(),
        name,
        plan.track,
        plan.from_rank,
        plan.max_rank,
        plan.to_rank,
        plan.max_rank,
        plan.from_ilvl,
        plan.to_ilvl,
        plan.totals
    )?;
    for step in &plan.steps {
        let cost = if step.free {
            "free (unlocked)".to_string()
        } else if step.cost < step.base_cost {
            format!("{} {} (discounted from {})", step.cost, step.crest, step.base_cost)
        } else {
            format!("{} {}", step.cost, step.crest)
        };
        writeln!(
            out,
            "      {} -> {}  {}  {}",
            step.from_rank, step.to_rank, step.ilvl, cost
        )?;
    }
    if let Some(note) = &plan.note {
        writeln!(out, "      {}", note)?;
    }
    Ok(())
}
