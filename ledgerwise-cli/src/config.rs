use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::state::{ensure_ledgerwise_home, ledgerwise_home};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub llm: LlmSection,
    #[serde(default)]
    pub statements: StatementsSection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmSection {
    pub model: String,
    pub base_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatementsSection {
    /// Folder scanned (non-recursively) for `*.pdf` statements.
    pub dir: PathBuf,
}

impl Default for LlmSection {
    fn default() -> Self {
        Self {
            model: "gpt-3.5-turbo".to_string(),
            base_url: "https://api.openai.com".to_string(),
        }
    }
}

impl Default for StatementsSection {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("./statements"),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    Ok(ledgerwise_home()?.join("config.toml"))
}

/// Load `~/.ledgerwise/config.toml`, falling back to defaults when it is absent.
pub fn load_config() -> Result<Config> {
    let p = config_path()?;
    if !p.exists() {
        return Ok(Config::default());
    }
    load_config_from(&p)
}

pub fn load_config_from(path: &Path) -> Result<Config> {
    let s = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    toml::from_str(&s).with_context(|| format!("parse {}", path.display()))
}

pub fn save_config(cfg: &Config) -> Result<()> {
    ensure_ledgerwise_home()?;
    let p = config_path()?;
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(&p, s).with_context(|| format!("write {}", p.display()))?;
    Ok(())
}

pub fn init_config() -> Result<()> {
    let p = config_path()?;
    if p.exists() {
        println!("Config already exists: {}", p.display());
        return Ok(());
    }
    save_config(&Config::default())?;
    println!("Wrote {}", p.display());
    Ok(())
}

pub fn show_config(cfg: &Config) -> Result<()> {
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    println!("# {}", config_path()?.display());
    print!("{s}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_advisor_contract() {
        let cfg = Config::default();
        assert_eq!(cfg.llm.model, "gpt-3.5-turbo");
        assert_eq!(cfg.llm.base_url, "https://api.openai.com");
        assert_eq!(cfg.statements.dir, PathBuf::from("./statements"));
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("config.toml");
        fs::write(&p, "[llm]\nmodel = \"gpt-4o-mini\"\n").unwrap();

        let cfg = load_config_from(&p).unwrap();
        assert_eq!(cfg.llm.model, "gpt-4o-mini");
        assert_eq!(cfg.llm.base_url, "https://api.openai.com");
        assert_eq!(cfg.statements, StatementsSection::default());
    }

    #[test]
    fn test_round_trips_through_toml() {
        let mut cfg = Config::default();
        cfg.statements.dir = PathBuf::from("/tmp/bank");
        let s = toml::to_string_pretty(&cfg).unwrap();
        assert_eq!(toml::from_str::<Config>(&s).unwrap(), cfg);
    }

    #[test]
    fn test_malformed_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("config.toml");
        fs::write(&p, "[llm\nmodel = ").unwrap();
        assert!(load_config_from(&p).is_err());
    }
}
