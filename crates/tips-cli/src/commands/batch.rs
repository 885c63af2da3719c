use super::common::{load_entries, Context};
use crate::{print_info, print_success};
use serde::Serialize;
use std::collections::BTreeSet;
use std::io::Write;
use std::path::Path;
use tips_core::{
    compute_tip_state, Balance, TipEndorsement, TipEntry, TipHash, TipSelections, TipSelector,
};

/// Batch endorsement plan as written to disk / stdout
#[derive(Debug, Serialize)]
pub struct BatchPlan {
    pub endorsements: Vec<TipEndorsement>,
    pub total: Balance,
    /// Selected tips that nobody has endorsed yet (planned at a zero median)
    #[serde(skip)]
    pub unendorsed: Vec<TipHash>,
}

pub fn handle(
    ctx: &Context,
    file: &Path,
    select: &[String],
    all_tipped: bool,
    output: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let entries = load_entries(file)?;
    let wanted = select
        .iter()
        .map(|s| s.parse::<TipHash>())
        .collect::<Result<BTreeSet<_>, _>>()?;

    let plan = build_plan(ctx, &entries, &wanted, all_tipped)?;

    match output {
        Some(path) => {
            let mut file = std::fs::File::create(path)?;
            write_plan(&plan, &mut file)?;
            for hash in &plan.unendorsed {
                print_info(&format!(
                    "Tip {} has no endorsements yet; its median is zero",
                    hash
                ));
            }
            print_success(&format!(
                "Plan with {} endorsement(s), total {}, written to {}",
                plan.endorsements.len(),
                ctx.fmt_balance(plan.total),
                path.display()
            ));
        }
        None => {
            // stdout carries only the plan
            for hash in &plan.unendorsed {
                log::warn!("tip {} has no endorsements yet; its median is zero", hash);
            }
            write_plan(&plan, &mut std::io::stdout().lock())?;
        }
    }
    Ok(())
}

/// Write the plan as pretty JSON followed by a newline
pub fn write_plan(plan: &BatchPlan, out: &mut impl Write) -> Result<(), Box<dyn std::error::Error>> {
    writeln!(out, "{}", serde_json::to_string_pretty(plan)?)?;
    Ok(())
}

pub fn build_plan(
    ctx: &Context,
    entries: &[TipEntry],
    wanted: &BTreeSet<TipHash>,
    all_tipped: bool,
) -> Result<BatchPlan, Box<dyn std::error::Error>> {
    let known: BTreeSet<TipHash> = entries.iter().map(|e| e.hash).collect();
    if let Some(missing) = wanted.difference(&known).next() {
        return Err(format!("Tip {} is not in the input", missing).into());
    }

    let mut selections = TipSelections::new();
    let mut unendorsed = Vec::new();
    for entry in entries {
        let state = compute_tip_state(&entry.tip, &ctx.locals);
        let pick = wanted.contains(&entry.hash) || (all_tipped && state.is_tipped);
        if !pick {
            continue;
        }
        if !state.is_tipped {
            unendorsed.push(entry.hash);
        }
        let mut selector = TipSelector::new(entry.hash, state);
        selector.set_selected(true, &mut selections);
    }

    Ok(BatchPlan {
        endorsements: selections.batch(),
        total: selections.total(),
        unendorsed,
    })
}
