use super::common::{load_entries, Context};
use crate::print_info;
use colored::*;
use std::path::Path;
use tips_core::{compute_tip_state, TipEntry, TipHash, TipPhase, TipState};

pub fn handle(
    ctx: &Context,
    file: &Path,
    hash: Option<&str>,
    best_block: Option<u32>,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut entries = load_entries(file)?;

    if let Some(raw) = hash {
        let wanted: TipHash = raw.parse()?;
        entries.retain(|e| e.hash == wanted);
        if entries.is_empty() {
            return Err(format!("Tip {} not found in {}", wanted, file.display()).into());
        }
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&states_json(ctx, &entries, best_block))?);
        return Ok(());
    }

    print_info(&format!("{} tip(s) from {}", entries.len(), file.display()));
    for entry in &entries {
        let state = compute_tip_state(&entry.tip, &ctx.locals);
        print_tip(ctx, entry, &state, best_block);
    }
    Ok(())
}

/// `[{ hash, state, phase }]` for every entry; `phase` is null without a best block
pub fn states_json(
    ctx: &Context,
    entries: &[TipEntry],
    best_block: Option<u32>,
) -> serde_json::Value {
    entries
        .iter()
        .map(|entry| {
            let state = compute_tip_state(&entry.tip, &ctx.locals);
            let phase = best_block.map(|b| TipPhase::of(&state, b));
            serde_json::json!({
                "hash": entry.hash,
                "state": state,
                "phase": phase,
            })
        })
        .collect()
}

fn print_tip(ctx: &Context, entry: &TipEntry, state: &TipState, best_block: Option<u32>) {
    println!();
    println!("{} {}", "Tip:".bold(), entry.hash.to_string().cyan());
    println!("{} {}", "Beneficiary:".bold(), entry.tip.who().to_string().green());
    println!("{} {}", "Reason:".bold(), entry.tip.reason());

    match &state.finder {
        Some(finder) => {
            let mine = if state.is_finder { " (you)".yellow().to_string() } else { String::new() };
            println!("{} {}{}", "Finder:".bold(), finder, mine);
        }
        None => println!("{} -", "Finder:".bold()),
    }
    if let Some(deposit) = state.deposit {
        println!("{} {}", "Deposit:".bold(), ctx.fmt_balance(deposit));
    }

    println!("{} {}", "Endorsements:".bold(), entry.tip.tips().len());
    println!(
        "{} {}",
        "Median:".bold(),
        if state.is_tipped {
            ctx.fmt_balance(state.median).green().to_string()
        } else {
            "none yet".dimmed().to_string()
        }
    );
    if state.is_tipper {
        println!("{} {}", "Endorsed by you:".bold(), "yes".yellow());
    }

    match best_block.map(|b| TipPhase::of(state, b)) {
        Some(phase) => println!("{} {}", "Status:".bold(), describe_phase(&phase)),
        None => {
            if let Some(closes) = state.closes_at {
                println!("{} #{}", "Closes at:".bold(), closes);
            }
        }
    }
}

pub fn describe_phase(phase: &TipPhase) -> String {
    match phase {
        TipPhase::Open => "open".normal().to_string(),
        TipPhase::Closing {
            closes_at,
            remaining,
        } => format!("closing at #{} ({} blocks left)", closes_at, remaining)
            .yellow()
            .to_string(),
        TipPhase::Closeable { closes_at } => format!("closeable since #{}", closes_at)
            .green()
            .bold()
            .to_string(),
    }
}
