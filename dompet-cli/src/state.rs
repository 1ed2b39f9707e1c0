use anyhow::{Context, Result};
use dompet_core::{AiStats, STATS_FILE, StatsStore};
use dompet_finance::Ledger;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};

pub const LEDGER_FILE: &str = "ledger.json";

/// `$DOMPET_HOME`, or `~/.dompet`.
pub fn dompet_home() -> Result<PathBuf> {
    if let Some(dir) = std::env::var_os("DOMPET_HOME") {
        return Ok(PathBuf::from(dir));
    }
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".dompet"))
}

pub fn ensure_dompet_home() -> Result<PathBuf> {
    let dir = dompet_home()?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}

pub fn load_ledger(home: &Path) -> Result<Ledger> {
    read_json_or_default(&home.join(LEDGER_FILE))
}

pub fn save_ledger(home: &Path, ledger: &Ledger) -> Result<()> {
    write_json(&home.join(LEDGER_FILE), ledger)
}

/// Clear the ledger and the chat counters.
pub fn reset_all(home: &Path) -> Result<()> {
    let mut ledger = load_ledger(home)?;
    ledger.reset();
    save_ledger(home, &ledger)?;
    JsonStatsStore::in_home(home).save(&AiStats::default())
}

/// `ai_stats.json` next to the ledger.
#[derive(Debug, Clone)]
pub struct JsonStatsStore {
    path: PathBuf,
}

impl JsonStatsStore {
    pub fn in_home(home: &Path) -> Self {
        Self {
            path: home.join(STATS_FILE),
        }
    }
}

impl StatsStore for JsonStatsStore {
    type Error = anyhow::Error;

    fn load(&self) -> Result<AiStats> {
        read_json_or_default(&self.path)
    }

    fn save(&self, stats: &AiStats) -> Result<()> {
        write_json(&self.path, stats)
    }
}

fn read_json_or_default<T: DeserializeOwned + Default>(p: &Path) -> Result<T> {
    if !p.exists() {
        return Ok(T::default());
    }
    let s = fs::read_to_string(p).with_context(|| format!("read {}", p.display()))?;
    serde_json::from_str(&s).with_context(|| format!("parse {}", p.display()))
}

fn write_json<T: Serialize>(p: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    fs::write(p, json).with_context(|| format!("write {}", p.display()))?;
    Ok(())
}
