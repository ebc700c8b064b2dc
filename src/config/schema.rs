use serde::{Deserialize, Serialize};

use crate::scoring::ScoreLabel;

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub sources: Vec<SourceConfig>,

    /// Hide listings labelled below this
    #[serde(default)]
    pub min_label: Option<ScoreLabel>,

    /// Log filter used when RUST_LOG is unset (default: "warn")
    #[serde(default)]
    pub log_level: Option<String>,
}

/// A set of listing export files.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct SourceConfig {
    pub name: Option<String>,
    /// Glob pattern, e.g. "exports/expired-*.json"
    pub path: String,
}

impl SourceConfig {
    pub fn from_path(path: impl Into<String>) -> Self {
        Self {
            name: None,
            path: path.into(),
        }
    }

    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.path)
    }
}
