use super::common::{config_path, Context};
use crate::{print_info, print_success};
use colored::*;
use std::path::Path;
use tips_core::TipsConfig;

pub fn init(config_dir: &Path, force: bool) -> Result<(), Box<dyn std::error::Error>> {
    let path = config_path(config_dir);
    if path.exists() && !force {
        return Err(format!(
            "Config already exists at {} (use --force to overwrite)",
            path.display()
        )
        .into());
    }

    std::fs::create_dir_all(config_dir)?;
    TipsConfig::default().save_to_file(&path)?;
    print_success(&format!("Config written to {}", path.display()));
    print_info("Add your accounts under `accounts = [...]`");
    Ok(())
}

pub fn show(ctx: &Context) -> Result<(), Box<dyn std::error::Error>> {
    let config = &ctx.config;
    println!("{} {}", "SS58 prefix:".bold(), config.ss58_prefix);
    println!("{} {}", "Decimals:".bold(), config.decimals);
    println!("{} {}", "Token:".bold(), config.token.cyan());
    println!("{} {}", "Accounts:".bold(), config.accounts.len());
    for account in &config.accounts {
        println!("  {} {}", "•".cyan(), account.to_string().green());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_init_then_refuse_overwrite() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("nested");

        init(&nested, false).unwrap();
        let loaded = TipsConfig::load_from_file(&config_path(&nested)).unwrap();
        assert_eq!(loaded, TipsConfig::default());

        assert!(init(&nested, false).is_err());
        assert!(init(&nested, true).is_ok());
    }
}
