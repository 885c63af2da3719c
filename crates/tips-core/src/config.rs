use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use tips_crypto::{AccountId, AddressError, MAX_SIMPLE_PREFIX};

pub const ENV_ACCOUNTS: &str = "TIPS_ACCOUNTS";
pub const ENV_SS58_PREFIX: &str = "TIPS_SS58_PREFIX";
pub const ENV_DECIMALS: &str = "TIPS_DECIMALS";
pub const ENV_TOKEN: &str = "TIPS_TOKEN";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Cannot read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid config TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Cannot encode config: {0}")]
    Encode(#[from] toml::ser::Error),
    #[error("Invalid account '{account}': {source}")]
    Address {
        account: String,
        #[source]
        source: AddressError,
    },
    #[error("Invalid value for {0}")]
    Invalid(&'static str),
}

/// Local client settings: which accounts are "mine" and how to display balances
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TipsConfig {
    /// Accounts held locally (the finder / tipper checks run against these)
    #[serde(default)]
    pub accounts: Vec<AccountId>,
    #[serde(default = "default_ss58_prefix")]
    pub ss58_prefix: u16,
    #[serde(default = "default_decimals")]
    pub decimals: u8,
    #[serde(default = "default_token")]
    pub token: String,
}

fn default_ss58_prefix() -> u16 {
    tips_crypto::GENERIC_PREFIX
}

fn default_decimals() -> u8 {
    12
}

fn default_token() -> String {
    "UNIT".to_string()
}

impl Default for TipsConfig {
    fn default() -> Self {
        Self {
            accounts: Vec::new(),
            ss58_prefix: default_ss58_prefix(),
            decimals: default_decimals(),
            token: default_token(),
        }
    }
}

impl TipsConfig {
    /// Load config from TOML file
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: TipsConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load from `path` if it exists, otherwise start from defaults
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            log::debug!("no config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Save config to TOML file
    pub fn save_to_file(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Apply TIPS_* environment overrides
    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from any key → value lookup (environment in production).
    /// Every value is parsed before any is assigned, so a bad one leaves the
    /// config untouched.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let accounts = lookup(ENV_ACCOUNTS)
            .map(|raw| parse_accounts(raw.split(',')))
            .transpose()?;
        let ss58_prefix = lookup(ENV_SS58_PREFIX)
            .map(|raw| raw.trim().parse::<u16>())
            .transpose()
            .map_err(|_| ConfigError::Invalid(ENV_SS58_PREFIX))?;
        let decimals = lookup(ENV_DECIMALS)
            .map(|raw| raw.trim().parse::<u8>())
            .transpose()
            .map_err(|_| ConfigError::Invalid(ENV_DECIMALS))?;
        let token = lookup(ENV_TOKEN).map(|raw| raw.trim().to_string());

        if let Some(accounts) = accounts {
            self.accounts = accounts;
        }
        if let Some(prefix) = ss58_prefix {
            self.ss58_prefix = prefix;
        }
        if let Some(decimals) = decimals {
            self.decimals = decimals;
        }
        if let Some(token) = token {
            self.token = token;
        }
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.ss58_prefix > MAX_SIMPLE_PREFIX {
            return Err(ConfigError::Invalid("ss58_prefix"));
        }
        if self.token.is_empty() {
            return Err(ConfigError::Invalid("token"));
        }
        for account in &self.accounts {
            if account.prefix() != self.ss58_prefix {
                // Still usable, but it will never match on-chain records of this network
                log::warn!(
                    "account {} uses prefix {}, network prefix is {}",
                    account.short(),
                    account.prefix(),
                    self.ss58_prefix
                );
            }
        }
        Ok(())
    }

    pub fn local_accounts(&self) -> BTreeSet<AccountId> {
        self.accounts.iter().cloned().collect()
    }
}

/// Parse address strings, skipping blanks
pub fn parse_accounts<'a, I>(raw: I) -> Result<Vec<AccountId>, ConfigError>
where
    I: IntoIterator<Item = &'a str>,
{
    raw.into_iter()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse().map_err(|source| ConfigError::Address {
                account: s.to_string(),
                source,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::account;
    use std::collections::HashMap;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = TipsConfig::default();
        assert_eq!(config.ss58_prefix, 42);
        assert_eq!(config.decimals, 12);
        assert!(config.local_accounts().is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");

        let config = TipsConfig {
            accounts: vec![account(1), account(2)],
            ss58_prefix: 42,
            decimals: 10,
            token: "DOT".to_string(),
        };
        config.save_to_file(&path).unwrap();

        let loaded = TipsConfig::load_from_file(&path).unwrap();
        assert_eq!(loaded, config);
        assert_eq!(loaded.local_accounts().len(), 2);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let toml = format!("accounts = [\"{}\"]\n", account(3));
        let config: TipsConfig = toml::from_str(&toml).unwrap();
        assert_eq!(config.accounts, vec![account(3)]);
        assert_eq!(config.decimals, 12);
        assert_eq!(config.token, "UNIT");
    }

    #[test]
    fn test_invalid_account_in_toml() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "accounts = [\"not-an-address\"]\n").unwrap();
        assert!(matches!(
            TipsConfig::load_from_file(&path),
            Err(ConfigError::Toml(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("absent.toml");
        assert!(matches!(
            TipsConfig::load_from_file(&path),
            Err(ConfigError::Io { .. })
        ));
        assert_eq!(TipsConfig::load_or_default(&path).unwrap(), TipsConfig::default());
    }

    #[test]
    fn test_overrides() {
        let env: HashMap<&str, String> = HashMap::from([
            (ENV_ACCOUNTS, format!("{}, ,{}", account(4), account(5))),
            (ENV_DECIMALS, "10".to_string()),
            (ENV_TOKEN, "KSM".to_string()),
        ]);
        let mut config = TipsConfig::default();
        config
            .apply_overrides(|key| env.get(key).cloned())
            .unwrap();
        assert_eq!(config.accounts, vec![account(4), account(5)]);
        assert_eq!(config.decimals, 10);
        assert_eq!(config.token, "KSM");
        assert_eq!(config.ss58_prefix, 42);
    }

    #[test]
    fn test_bad_overrides_rejected() {
        let mut config = TipsConfig::default();
        let err = config
            .apply_overrides(|key| (key == ENV_DECIMALS).then(|| "many".to_string()))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(ENV_DECIMALS)));

        let err = config
            .apply_overrides(|key| (key == ENV_ACCOUNTS).then(|| "bogus".to_string()))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Address { .. }));
    }

    #[test]
    fn test_failed_override_leaves_config_untouched() {
        let env: HashMap<&str, String> = HashMap::from([
            (ENV_ACCOUNTS, account(4).to_string()),
            (ENV_TOKEN, "KSM".to_string()),
            (ENV_DECIMALS, "many".to_string()),
        ]);
        let mut config = TipsConfig {
            accounts: vec![account(1)],
            ..TipsConfig::default()
        };
        let before = config.clone();

        assert!(config.apply_overrides(|key| env.get(key).cloned()).is_err());
        assert_eq!(config, before);
    }

    #[test]
    fn test_validate_prefix_range() {
        let config = TipsConfig {
            ss58_prefix: 64,
            ..TipsConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
