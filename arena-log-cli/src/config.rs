//! Configuration loading and merging
//!
//! The optional `config.toml` supplies defaults; command-line flags win.

use anyhow::{Context, Result};
use arena_log_analyzer::{AnalyzerConfig, ArityPolicy};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Brain-summary log read when no file is given
pub const DEFAULT_BRAIN_FILE: &str = "reaper_stats.csv";

/// Run table read when no file is given
pub const DEFAULT_RUNS_FILE: &str = "reaper_only_stats.csv";

/// Main application configuration (loaded from config.toml)
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub brain: BrainConfig,
    #[serde(default)]
    pub runs: RunsConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct BrainConfig {
    pub file: Option<PathBuf>,
    pub tag: Option<String>,
    pub arity: Option<ArityPolicy>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct RunsConfig {
    pub file: Option<PathBuf>,
    pub alive_sentinel: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Txt,
    Json,
}

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<AppConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let config: AppConfig = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    Ok(config)
}

impl AppConfig {
    /// Analyzer settings for the brain-summary pass
    pub fn brain_analyzer(&self, tag: Option<&str>, strict_arity: bool) -> AnalyzerConfig {
        let mut config = AnalyzerConfig::new();
        if let Some(tag) = tag.or(self.brain.tag.as_deref()) {
            config = config.with_brain_tag(tag);
        }
        let arity = if strict_arity {
            ArityPolicy::Strict
        } else {
            self.brain.arity.unwrap_or_default()
        };
        config.with_arity_policy(arity)
    }

    /// Analyzer settings for the run-table pass
    pub fn runs_analyzer(&self, alive_sentinel: Option<&str>) -> AnalyzerConfig {
        let config = AnalyzerConfig::new();
        match alive_sentinel.or(self.runs.alive_sentinel.as_deref()) {
            Some(sentinel) => config.with_alive_sentinel(sentinel),
            None => config,
        }
    }

    pub fn brain_file(&self, arg: Option<&Path>) -> PathBuf {
        arg.map(Path::to_path_buf)
            .or_else(|| self.brain.file.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_BRAIN_FILE))
    }

    pub fn runs_file(&self, arg: Option<&Path>) -> PathBuf {
        arg.map(Path::to_path_buf)
            .or_else(|| self.runs.file.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_RUNS_FILE))
    }

    pub fn format(&self, arg: Option<OutputFormat>) -> OutputFormat {
        arg.unwrap_or(self.output.format)
    }
}
