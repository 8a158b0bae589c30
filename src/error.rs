// SPDX-License-Identifier: PMPL-1.0-or-later
//! Error types for the accessibility engine

use thiserror::Error;

pub type Result<T> = std::result::Result<T, EngineError>;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Document error: {0}")]
    Document(String),

    #[error("Invalid WCAG level '{0}': expected one of A, AA, AAA")]
    InvalidLevel(String),

    #[error("Invalid selector '{0}'")]
    Selector(String),

    #[error("Rule '{rule}' failed: {message}")]
    Rule { rule: String, message: String },

    #[error("Automated engine '{engine}' failed: {message}")]
    Engine { engine: String, message: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}
