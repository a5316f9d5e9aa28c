use anyhow::{Context, Result};
use kopeck_finance::EngineSettings;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::state::{ensure_kopeck_home, kopeck_home};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub engine: EngineSettings,
    #[serde(default)]
    pub locale: LocaleSection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocaleSection {
    /// IANA name used to decide what "today" is
    pub timezone: String,
}

impl Default for LocaleSection {
    fn default() -> Self {
        Self {
            timezone: "Europe/Moscow".to_string(),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    Ok(kopeck_home()?.join("config.toml"))
}

fn resolve(path: Option<&Path>) -> Result<PathBuf> {
    match path {
        Some(p) => Ok(p.to_path_buf()),
        None => config_path(),
    }
}

pub fn parse_config(s: &str) -> Result<Config> {
    toml::from_str(s).context("parse config.toml")
}

/// Load from `path`, or from `~/.kopeck/config.toml`. A missing file yields defaults.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let p = resolve(path)?;
    if !p.exists() {
        tracing::debug!(path = %p.display(), "no config file, using defaults");
        return Ok(Config::default());
    }
    let s = fs::read_to_string(&p).with_context(|| format!("read {}", p.display()))?;
    parse_config(&s)
}

pub fn save_config(cfg: &Config, path: Option<&Path>) -> Result<PathBuf> {
    let p = match path {
        Some(p) => p.to_path_buf(),
        None => ensure_kopeck_home()?.join("config.toml"),
    };
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(&p, s).with_context(|| format!("write {}", p.display()))?;
    Ok(p)
}

pub fn init_config(path: Option<&Path>) -> Result<()> {
    let p = resolve(path)?;
    if p.exists() {
        println!("Config already exists: {}", p.display());
        return Ok(());
    }
    let written = save_config(&Config::default(), path)?;
    println!("Wrote {}", written.display());
    Ok(())
}
