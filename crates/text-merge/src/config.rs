use crate::error::{MergeError, Result};
use crate::join::Conjunction;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default fraction of a sentence that a fuzzy merge may parameterize
pub const DEFAULT_MAX_REPLACEMENT_FRACTION: f64 = 0.1;

const DEFAULT_INCREMENTAL_INTRO: &str =
    "Higher tiers of this blessing grant all lower tiers' effects as well.";

/// Configuration for merge behavior
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MergeConfig {
    /// Share of word positions a fuzzy merge may replace (at least one is always allowed)
    pub max_replacement_fraction: f64,

    /// Final conjunction used when listing differing cores
    pub conjunction: Conjunction,

    /// Separator between tier cores in a wordwise tier merge
    pub tier_separator: String,

    /// Separator between tooltip lines
    pub line_separator: String,

    /// Markup placed before each per-subject section heading
    pub section_prefix: String,

    /// First line emitted by the incremental tier strategy
    pub incremental_intro: String,
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            max_replacement_fraction: DEFAULT_MAX_REPLACEMENT_FRACTION,
            conjunction: Conjunction::Or,
            tier_separator: "/".to_string(),
            line_separator: "\n".to_string(),
            section_prefix: String::new(),
            incremental_intro: DEFAULT_INCREMENTAL_INTRO.to_string(),
        }
    }
}

impl MergeConfig {
    /// Create config for text written into game string tables, where line
    /// breaks are stored escaped and section headings carry a markup tag
    pub fn for_string_table() -> Self {
        Self {
            line_separator: "\\n".to_string(),
            section_prefix: "<tth>".to_string(),
            ..Default::default()
        }
    }

    /// Parse and validate a TOML document
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: Self = toml::from_str(source)?;
        config.validate().map_err(MergeError::invalid_config)?;
        Ok(config)
    }

    /// Load and validate a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    /// Validate configuration
    pub fn validate(&self) -> std::result::Result<(), String> {
        let fraction = self.max_replacement_fraction;
        if !fraction.is_finite() || !(0.0..=1.0).contains(&fraction) {
            return Err(format!(
                "max_replacement_fraction ({fraction}) must be within 0.0..=1.0"
            ));
        }

        if self.tier_separator.is_empty() {
            return Err("tier_separator must not be empty".to_string());
        }

        if self.line_separator.is_empty() {
            return Err("line_separator must not be empty".to_string());
        }

        Ok(())
    }
}
