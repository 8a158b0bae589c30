// SPDX-License-Identifier: PMPL-1.0-or-later
//! Configuration handling.
//!
//! The engine owns no global settings: a [`Config`] is built (or loaded)
//! by the caller and passed into the executor, validator and calculator
//! constructors.

use crate::error::{EngineError, Result};
use crate::issue::{Impact, WcagLevel};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use tracing::{debug, warn};

static CRITERION_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+\.\d+\.\d+$").expect("valid criterion id pattern"));

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// WCAG evaluation settings
    #[serde(default)]
    pub wcag: WcagConfig,

    /// ARIA validation settings
    #[serde(default)]
    pub aria: AriaConfig,

    /// Merge issues from an automated rule engine when one is supplied
    #[serde(default = "default_true")]
    pub run_axe: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            wcag: WcagConfig::default(),
            aria: AriaConfig::default(),
            run_axe: true,
        }
    }
}

/// WCAG evaluation configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WcagConfig {
    /// Target conformance level
    #[serde(default)]
    pub level: WcagLevel,

    /// Drop issues below this impact
    #[serde(default)]
    pub min_impact: Option<Impact>,

    /// Allowlist of criterion ids (empty = all)
    #[serde(default)]
    pub enabled_criteria: Vec<String>,

    /// Criterion ids never run or reported
    #[serde(default)]
    pub disabled_criteria: Vec<String>,
}

/// ARIA validation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AriaConfig {
    /// Warn about `aria-*` attributes outside the known vocabulary
    #[serde(default = "default_true")]
    pub unknown_attributes: bool,

    /// Warn when a role's required owned elements are missing
    #[serde(default = "default_true")]
    pub required_children: bool,
}

impl Default for AriaConfig {
    fn default() -> Self {
        Self {
            unknown_attributes: true,
            required_children: true,
        }
    }
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Whether a WCAG criterion should be run and reported.
    ///
    /// A disabled id always loses; a non-empty enabled list acts as an
    /// allowlist.
    pub fn is_criterion_enabled(&self, id: &str) -> bool {
        if self.wcag.disabled_criteria.iter().any(|c| c == id) {
            return false;
        }
        self.wcag.enabled_criteria.is_empty() || self.wcag.enabled_criteria.iter().any(|c| c == id)
    }

    /// Check criterion ids for the `major.minor.patch` form.
    ///
    /// Malformed ids are not fatal; each one yields a warning.
    pub fn validate(&self) -> Vec<String> {
        let warnings: Vec<String> = self
            .wcag
            .enabled_criteria
            .iter()
            .map(|id| ("enabled_criteria", id))
            .chain(self.wcag.disabled_criteria.iter().map(|id| ("disabled_criteria", id)))
            .filter(|(_, id)| !CRITERION_ID.is_match(id))
            .map(|(list, id)| {
                format!("{}: '{}' is not a valid WCAG criterion id (expected e.g. 1.4.3)", list, id)
            })
            .collect();

        for w in &warnings {
            warn!("{}", w);
        }
        warnings
    }
}

/// Load configuration from a path. A missing file yields the defaults.
pub fn load_config(path: &Path) -> Result<Config> {
    if !path.exists() {
        debug!("Config file not found at {}, using defaults", path.display());
        return Ok(Config::default());
    }

    let content = std::fs::read_to_string(path)?;

    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    let config: Config = match ext {
        "toml" => toml::from_str(&content)?,
        "yaml" | "yml" => serde_yaml::from_str(&content)?,
        other => {
            return Err(EngineError::Config(format!(
                "unsupported config format '{}' for {} (expected .toml, .yaml or .yml)",
                other,
                path.display()
            )))
        }
    };

    config.validate();
    debug!(?config, "Loaded configuration");
    Ok(config)
}

/// Default per-user config location
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("a11y-engine")
        .join("config.toml")
}
