//! Config - Persisted player settings
//!
//! Settings live as pretty JSON in `config.json` under the config directory.
//! Loading never fails: a missing or unreadable file means defaults.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::engine::RaceSeed;
use crate::game::betting::{Wallet, STARTING_BALANCE};

/// Overrides the config directory
pub const CONFIG_DIR_ENV: &str = "HIPODROMO_CONFIG_DIR";

pub const DEFAULT_HORSES: usize = 5;
pub const MIN_HORSES: usize = 2;

const CONFIG_FILE: &str = "config.json";
const LOG_FILE: &str = "hipodromo.log";

/// Player settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub balance: i64,
    pub fast: bool,
    pub horses: usize,
    pub seed: Option<RaceSeed>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            balance: STARTING_BALANCE as i64,
            fast: false,
            horses: DEFAULT_HORSES,
            seed: None,
        }
    }
}

impl Settings {
    /// Replace out-of-range values with their defaults
    pub fn sanitized(mut self) -> Self {
        if self.balance < 0 {
            log::warn!("Negative balance {} in config, resetting", self.balance);
            self.balance = STARTING_BALANCE as i64;
        }
        if self.horses < MIN_HORSES {
            log::warn!("Horse count {} in config is too small, resetting", self.horses);
            self.horses = DEFAULT_HORSES;
        }
        self
    }

    pub fn wallet(&self) -> Wallet {
        Wallet::new(u64::try_from(self.balance).unwrap_or(STARTING_BALANCE))
    }

    pub fn record(&mut self, wallet: &Wallet) {
        self.balance = i64::try_from(wallet.balance()).unwrap_or(i64::MAX);
    }
}

/// `$HIPODROMO_CONFIG_DIR`, else `$HOME/.config/hipodromo`, else `.`
pub fn config_dir() -> PathBuf {
    if let Ok(dir) = std::env::var(CONFIG_DIR_ENV) {
        return PathBuf::from(dir);
    }
    match std::env::var("HOME") {
        Ok(home) => PathBuf::from(home).join(".config").join("hipodromo"),
        Err(_) => PathBuf::from("."),
    }
}

/// Reads and writes [`Settings`] in a config directory
#[derive(Debug, Clone)]
pub struct ConfigStore {
    dir: PathBuf,
}

impl ConfigStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Store rooted at [`config_dir`]
    pub fn from_env() -> Self {
        Self::new(config_dir())
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn config_path(&self) -> PathBuf {
        self.dir.join(CONFIG_FILE)
    }

    pub fn log_path(&self) -> PathBuf {
        self.dir.join(LOG_FILE)
    }

    /// Load settings, falling back to defaults on any problem
    pub fn load(&self) -> Settings {
        let path = self.config_path();
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No config at {}, using defaults", path.display());
                return Settings::default();
            }
            Err(err) => {
                log::warn!("Could not read {}: {}", path.display(), err);
                return Settings::default();
            }
        };
        match serde_json::from_str::<Settings>(&text) {
            Ok(settings) => settings.sanitized(),
            Err(err) => {
                log::warn!("Corrupt config at {}: {}", path.display(), err);
                Settings::default()
            }
        }
    }

    pub fn save(&self, settings: &Settings) -> anyhow::Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("creating config directory {}", self.dir.display()))?;
        let path = self.config_path();
        let json = serde_json::to_string_pretty(settings).context("serializing settings")?;
        fs::write(&path, json).with_context(|| format!("writing {}", path.display()))?;
        log::debug!("Saved settings to {}", path.display());
        Ok(())
    }

    /// Save, logging instead of failing
    pub fn save_or_warn(&self, settings: &Settings) {
        if let Err(err) = self.save(settings) {
            log::warn!("Could not save settings: {:#}", err);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch(name: &str) -> ConfigStore {
        let dir = std::env::temp_dir().join(format!("hipodromo-{}-{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        ConfigStore::new(dir)
    }

    #[test]
    fn missing_file_gives_defaults() {
        let store = scratch("missing");
        assert_eq!(store.load(), Settings::default());
    }

    #[test]
    fn save_then_load() {
        let store = scratch("roundtrip");
        let settings = Settings {
            balance: 1234,
            fast: true,
            horses: 7,
            seed: Some(RaceSeed::from("derby")),
        };
        store.save(&settings).unwrap();
        assert_eq!(store.load(), settings);
        fs::remove_dir_all(store.dir()).unwrap();
    }

    #[test]
    fn corrupt_file_gives_defaults() {
        let store = scratch("corrupt");
        fs::create_dir_all(store.dir()).unwrap();
        fs::write(store.config_path(), "{ not json").unwrap();
        assert_eq!(store.load(), Settings::default());
        fs::remove_dir_all(store.dir()).unwrap();
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let store = scratch("partial");
        fs::create_dir_all(store.dir()).unwrap();
        fs::write(store.config_path(), r#"{ "balance": 42, "seed": 7 }"#).unwrap();
        let settings = store.load();
        assert_eq!(settings.balance, 42);
        assert_eq!(settings.seed, Some(RaceSeed::Number(7)));
        assert_eq!(settings.horses, DEFAULT_HORSES);
        assert!(!settings.fast);
        fs::remove_dir_all(store.dir()).unwrap();
    }

    #[test]
    fn sanitize_resets_bad_values() {
        let settings = Settings {
            balance: -5,
            horses: 1,
            ..Settings::default()
        }
        .sanitized();
        assert_eq!(settings.balance, STARTING_BALANCE as i64);
        assert_eq!(settings.horses, DEFAULT_HORSES);
    }

    #[test]
    fn wallet_round_trips_balance() {
        let mut settings = Settings::default();
        let mut wallet = settings.wallet();
        wallet.place(1, 300, 2).unwrap();
        settings.record(&wallet);
        assert_eq!(settings.balance, STARTING_BALANCE as i64 - 300);
    }
}
