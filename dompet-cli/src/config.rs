use anyhow::{Context, Result};
use chrono::{DateTime, FixedOffset, Utc};
use chrono_tz::Tz;
use dompet_finance::Wallet;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub general: GeneralSection,
    pub chat: ChatSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSection {
    /// IANA zone that "today" and relative dates are resolved in.
    pub timezone: String,
    /// Wallet for manual entries made without `--wallet`.
    pub default_wallet: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ChatSection {
    /// Pause before each reply in `dompet chat`.
    pub typing_delay_ms: u64,
}

impl Default for GeneralSection {
    fn default() -> Self {
        Self {
            timezone: "Asia/Jakarta".to_string(),
            default_wallet: Wallet::Bank.to_string(),
        }
    }
}

impl Config {
    pub fn tz(&self) -> Result<Tz> {
        self.general
            .timezone
            .parse::<Tz>()
            .map_err(|e| anyhow::anyhow!("invalid timezone '{}': {e}", self.general.timezone))
    }

    /// Current time in the configured zone, as a fixed offset.
    pub fn now(&self) -> Result<DateTime<FixedOffset>> {
        Ok(Utc::now().with_timezone(&self.tz()?).fixed_offset())
    }

    pub fn default_wallet(&self) -> Result<Wallet> {
        self.general
            .default_wallet
            .parse()
            .map_err(|e: String| anyhow::anyhow!("config general.default_wallet: {e}"))
    }
}

pub fn config_path(home: &Path) -> PathBuf {
    home.join("config.toml")
}

pub fn load_config(home: &Path) -> Result<Config> {
    let p = config_path(home);
    if !p.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(&p).with_context(|| format!("read {}", p.display()))?;
    toml::from_str(&s).context("parse config.toml")
}

pub fn save_config(home: &Path, cfg: &Config) -> Result<()> {
    let p = config_path(home);
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(&p, s).with_context(|| format!("write {}", p.display()))?;
    Ok(())
}

pub fn init_config(home: &Path) -> Result<()> {
    let p = config_path(home);
    if p.exists() {
        println!("Config already exists: {}", p.display());
        return Ok(());
    }
    save_config(home, &Config::default())?;
    println!("Wrote {}", p.display());
    Ok(())
}
