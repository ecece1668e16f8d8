use anyhow::{Context, Result};
use prodawn_core::{ModelArtifacts, Strategy, WeightTable};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::state::{default_columns_path, default_model_path, ensure_prodawn_home, expand_home};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub engine: EngineSection,
    pub model: ModelSection,
    pub scoring: WeightTable,
    pub presentation: PresentationSection,
    pub logging: LoggingSection,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSection {
    pub strategy: Strategy,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelSection {
    /// JSON model export (defaults to `<home>/model.json`). A leading `~`
    /// means `$HOME`.
    pub model_path: Option<PathBuf>,
    /// JSON array of training columns (defaults to `<home>/columns.json`).
    pub columns_path: Option<PathBuf>,
}

impl ModelSection {
    pub fn artifacts(&self) -> Result<ModelArtifacts> {
        let model = match &self.model_path {
            Some(p) => expand_home(p)?,
            None => default_model_path()?,
        };
        let columns = match &self.columns_path {
            Some(p) => expand_home(p)?,
            None => default_columns_path()?,
        };
        Ok(ModelArtifacts::new(model, columns))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PresentationSection {
    /// Seed for the momentum quote pick; random when unset.
    pub quote_seed: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// `tracing_subscriber::EnvFilter` directive; `RUST_LOG` wins when set.
    pub filter: String,
    pub json: bool,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            filter: "warn".to_string(),
            json: false,
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    Ok(ensure_prodawn_home()?.join("config.toml"))
}

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

pub fn save_config(cfg: &Config) -> Result<PathBuf> {
    let p = config_path()?;
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(&p, s).with_context(|| format!("write {}", p.display()))?;
    Ok(p)
}

pub fn init_config() -> Result<()> {
    let p = config_path()?;
    if p.exists() {
        println!("Config already exists: {}", p.display());
        return Ok(());
    }
    let written = save_config(&Config::default())?;
    println!("Wrote {}", written.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_fills_defaults() {
        let cfg: Config = toml::from_str(
            r#"
[engine]
strategy = "heuristic"

[scoring]
baseline = 50
"#,
        )
        .unwrap();
        assert_eq!(cfg.engine.strategy, Strategy::Heuristic);
        assert_eq!(cfg.scoring.baseline, 50);
        assert_eq!(cfg.scoring.creative_good_mood, 4);
        assert_eq!(cfg.logging.filter, "warn");
        assert_eq!(cfg.presentation.quote_seed, None);
    }

    #[test]
    fn default_config_round_trips_through_toml() {
        let cfg = Config::default();
        let s = toml::to_string_pretty(&cfg).unwrap();
        let back: Config = toml::from_str(&s).unwrap();
        assert_eq!(back, cfg);
    }

    #[test]
    fn explicit_model_paths_are_kept() {
        let section = ModelSection {
            model_path: Some(PathBuf::from("/tmp/m.json")),
            columns_path: Some(PathBuf::from("/tmp/c.json")),
        };
        let a = section.artifacts().unwrap();
        assert_eq!(a.model_path, PathBuf::from("/tmp/m.json"));
        assert_eq!(a.columns_path, PathBuf::from("/tmp/c.json"));
    }
}
