use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tips_core::config::parse_accounts;
use tips_core::{format_balance, parse_entries, AccountId, Balance, TipEntry, TipsConfig};

pub const CONFIG_FILE: &str = "config.toml";

pub fn config_path(config_dir: &Path) -> PathBuf {
    config_dir.join(CONFIG_FILE)
}

/// Effective settings for one invocation: config file, then TIPS_* env,
/// then the --accounts flag (highest precedence).
pub struct Context {
    pub config: TipsConfig,
    pub locals: BTreeSet<AccountId>,
}

impl Context {
    pub fn load(config_dir: &Path, cli_accounts: &[String]) -> Result<Self, Box<dyn std::error::Error>> {
        let mut config = TipsConfig::load_or_default(&config_path(config_dir))?;
        config.apply_env()?;
        if !cli_accounts.is_empty() {
            config.accounts = parse_accounts(cli_accounts.iter().map(String::as_str))?;
        }
        config.validate()?;

        let locals = config.local_accounts();
        log::debug!("{} local account(s)", locals.len());
        Ok(Self { config, locals })
    }

    pub fn fmt_balance(&self, amount: Balance) -> String {
        format!(
            "{} {}",
            format_balance(amount, self.config.decimals),
            self.config.token
        )
    }
}

/// Read tip entries from a JSON file (single entry or array)
pub fn load_entries(path: &Path) -> Result<Vec<TipEntry>, Box<dyn std::error::Error>> {
    let data = std::fs::read_to_string(path)
        .map_err(|e| format!("Cannot read {}: {}", path.display(), e))?;
    let entries = parse_entries(&data)?;
    log::debug!("loaded {} tip(s) from {}", entries.len(), path.display());
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn account(seed: u8) -> AccountId {
        AccountId::from_public_key(42, &[seed; 32]).unwrap()
    }

    #[test]
    fn test_context_flag_overrides_config() {
        let dir = TempDir::new().unwrap();
        let config = TipsConfig {
            accounts: vec![account(1)],
            ..TipsConfig::default()
        };
        config.save_to_file(&config_path(dir.path())).unwrap();

        let from_file = Context::load(dir.path(), &[]).unwrap();
        // TIPS_ACCOUNTS may be set in the environment; only check when it is not
        if std::env::var(tips_core::config::ENV_ACCOUNTS).is_err() {
            assert!(from_file.locals.contains(&account(1)));
        }

        let flagged = Context::load(dir.path(), &[account(2).to_string()]).unwrap();
        assert_eq!(flagged.locals.len(), 1);
        assert!(flagged.locals.contains(&account(2)));
    }

    #[test]
    fn test_context_rejects_bad_flag() {
        let dir = TempDir::new().unwrap();
        assert!(Context::load(dir.path(), &["garbage".to_string()]).is_err());
    }

    #[test]
    fn test_load_entries_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = load_entries(&dir.path().join("nope.json")).unwrap_err();
        assert!(err.to_string().contains("Cannot read"));
    }
}
