use super::common::{load_entries, Context};
use super::show::describe_phase;
use crate::print_info;
use colored::*;
use std::path::Path;
use tips_core::summarize;

pub fn handle(
    ctx: &Context,
    file: &Path,
    best_block: u32,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let entries = load_entries(file)?;
    let rows = summarize(&entries, &ctx.locals, best_block);

    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    print_info(&format!("{} tip(s) at block #{}", rows.len(), best_block));
    println!();

    for row in &rows {
        let mut flags = Vec::new();
        if row.state.is_finder {
            flags.push("finder");
        }
        if row.state.is_tipper {
            flags.push("endorsed");
        }
        let flags = if flags.is_empty() {
            String::new()
        } else {
            format!(" [{}]", flags.join(", ")).yellow().to_string()
        };

        println!(
            "{} {} → {}{}",
            "•".cyan(),
            short_hash(&row.hash.to_string()),
            row.who.short().green(),
            flags
        );
        println!(
            "    median {}  |  {}",
            if row.state.is_tipped {
                ctx.fmt_balance(row.state.median)
            } else {
                "-".to_string()
            },
            describe_phase(&row.phase)
        );
    }

    let closeable = rows.iter().filter(|r| r.phase.is_closeable()).count();
    if closeable > 0 {
        println!();
        print_info(&format!("{} tip(s) can be closed now", closeable));
    }
    Ok(())
}

fn short_hash(hash: &str) -> String {
    if hash.len() <= 14 {
        return hash.to_string();
    }
    format!("{}…{}", &hash[..8], &hash[hash.len() - 4..])
}
