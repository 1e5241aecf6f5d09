//! Configuration for the linter
//!
//! Reads configuration from:
//! - `.altlintrc.yaml` / `.altlintrc.json` (project-level)
//! - `~/.altlintrc.yaml` (user-level)
//!
//! and is then overlaid with command-line flags.

use crate::diagnostic::Severity;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File names searched by [`Config::load_default`], in order
pub const CONFIG_NAMES: [&str; 5] = [
    ".altlintrc.yaml",
    ".altlintrc.yml",
    ".altlintrc.json",
    "altlint.yaml",
    "altlint.json",
];

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Engine settings
///
/// Fields left unset in a file fall back to whatever the file extends, then
/// to the built-in default.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Lint files in parallel (default: true)
    pub parallel: Option<bool>,

    /// Number of parallel jobs (default: 0 = auto-detect)
    pub jobs: Option<usize>,
}

impl EngineConfig {
    pub fn parallel(&self) -> bool {
        self.parallel.unwrap_or(true)
    }

    pub fn jobs(&self) -> usize {
        self.jobs.unwrap_or(0)
    }

    fn merge(&mut self, other: Self) {
        self.parallel = other.parallel.or(self.parallel);
        self.jobs = other.jobs.or(self.jobs);
    }
}

/// Output settings, layered like [`EngineConfig`]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: Option<OutputFormat>,
    pub color: Option<ColorMode>,
    pub verbose: Option<bool>,
    /// Print the summary line (default: true)
    pub statistics: Option<bool>,
}

impl OutputConfig {
    pub fn format(&self) -> OutputFormat {
        self.format.unwrap_or_default()
    }

    pub fn color(&self) -> ColorMode {
        self.color.unwrap_or_default()
    }

    pub fn verbose(&self) -> bool {
        self.verbose.unwrap_or(false)
    }

    pub fn statistics(&self) -> bool {
        self.statistics.unwrap_or(true)
    }

    fn merge(&mut self, other: Self) {
        self.format = other.format.or(self.format);
        self.color = other.color.or(self.color);
        self.verbose = other.verbose.or(self.verbose);
        self.statistics = other.statistics.or(self.statistics);
    }
}

/// Output format options
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Compact,
}

/// Color mode options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    #[default]
    Auto,
    Always,
    Never,
}

/// Options of the `img-has-alt` rule
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImgHasAltOptions {
    /// Component names that render an image; replaces the `img` default when set
    pub components: Vec<String>,
}

/// Rule configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    /// Disabled rules
    pub disabled: Vec<String>,

    /// Enabled rules (empty = all)
    pub enabled: Vec<String>,

    /// Severity overrides (rule_id -> severity)
    pub severity: HashMap<String, Severity>,

    #[serde(rename = "img-has-alt")]
    pub img_has_alt: ImgHasAltOptions,
}

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Other configuration files this one builds on
    pub extends: Vec<String>,

    pub engine: EngineConfig,

    pub output: OutputConfig,

    pub rules: RulesConfig,
}

impl Config {
    /// Create default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        Self::load_with_depth(path, 0)
    }

    /// Load with recursion depth limit (to prevent infinite loops)
    fn load_with_depth(path: &Path, depth: usize) -> Result<Self, ConfigError> {
        const MAX_DEPTH: usize = 10;
        if depth >= MAX_DEPTH {
            return Err(ConfigError::Invalid(
                "Maximum config inheritance depth exceeded".to_string(),
            ));
        }

        log::debug!("Loading config from {}", path.display());
        let content = std::fs::read_to_string(path)?;

        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");

        let mut config: Self = match ext {
            "yaml" | "yml" => serde_yaml::from_str(&content)?,
            "json" => serde_json::from_str(&content)?,
            _ => {
                return Err(ConfigError::Invalid(format!(
                    "Unknown config file format: {}",
                    ext
                )))
            }
        };

        if !config.extends.is_empty() {
            let base_dir = path.parent().unwrap_or(Path::new("."));
            let mut base_config = Self::default();

            for extend in &config.extends {
                let extend_path = if Path::new(extend).is_absolute() {
                    PathBuf::from(extend)
                } else {
                    base_dir.join(extend)
                };
                base_config.merge(Self::load_with_depth(&extend_path, depth + 1)?);
            }

            base_config.merge(config);
            config = base_config;
        }

        Ok(config)
    }

    /// Merge another config into this one (other takes precedence)
    pub fn merge(&mut self, other: Self) {
        // Extends are not inherited

        self.engine.merge(other.engine);
        self.output.merge(other.output);

        self.rules.disabled.extend(other.rules.disabled);
        if !other.rules.enabled.is_empty() {
            self.rules.enabled = other.rules.enabled;
        }
        self.rules.severity.extend(other.rules.severity);
        if !other.rules.img_has_alt.components.is_empty() {
            self.rules.img_has_alt = other.rules.img_has_alt;
        }
    }

    /// Load configuration from default locations
    pub fn load_default() -> Result<Self, ConfigError> {
        for name in &CONFIG_NAMES {
            let path = PathBuf::from(name);
            if path.exists() {
                return Self::load(&path);
            }
        }

        if let Some(home) = dirs::home_dir() {
            for name in &CONFIG_NAMES {
                let path = home.join(name);
                if path.exists() {
                    return Self::load(&path);
                }
            }
        }

        log::debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Merge CLI arguments into configuration
    pub fn merge_cli(
        &mut self,
        format: Option<OutputFormat>,
        verbose: Option<bool>,
        jobs: Option<usize>,
        disabled_rules: Option<Vec<String>>,
        components: Option<Vec<String>>,
    ) {
        if format.is_some() {
            self.output.format = format;
        }
        if verbose.is_some() {
            self.output.verbose = verbose;
        }
        if jobs.is_some() {
            self.engine.jobs = jobs;
        }
        if let Some(disabled) = disabled_rules {
            self.rules.disabled.extend(disabled);
        }
        if let Some(components) = components {
            self.rules.img_has_alt.components = components;
        }
    }

    /// Check if a rule is enabled
    pub fn is_rule_enabled(&self, rule_id: &str) -> bool {
        if self.rules.disabled.iter().any(|r| r == rule_id) {
            return false;
        }

        if !self.rules.enabled.is_empty() {
            return self.rules.enabled.iter().any(|r| r == rule_id);
        }

        true
    }

    /// Get severity override for a rule
    pub fn get_severity_override(&self, rule_id: &str) -> Option<Severity> {
        self.rules.severity.get(rule_id).copied()
    }
}
