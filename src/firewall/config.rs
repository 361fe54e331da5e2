//! Firewall configuration types.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::{Error, Result};

/// Rule file formats.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleFormat {
    /// One rule per line, comma or whitespace separated
    #[default]
    Text,
    /// YAML policy document
    Yaml,
}

impl RuleFormat {
    /// Infer the format from a file extension.
    ///
    /// `.yml` and `.yaml` are YAML, anything else is text.
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_lowercase())
            .as_deref()
        {
            Some("yml") | Some("yaml") => RuleFormat::Yaml,
            _ => RuleFormat::Text,
        }
    }

    /// Parse a format name.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "text" | "txt" | "csv" => Some(RuleFormat::Text),
            "yaml" | "yml" => Some(RuleFormat::Yaml),
            _ => None,
        }
    }
}

impl std::str::FromStr for RuleFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        RuleFormat::parse(s)
            .ok_or_else(|| Error::Config(format!("unknown rule format: {}", s)))
    }
}

/// How rule sets that the index cannot order are handled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverlapPolicy {
    /// Refuse to build the firewall
    #[default]
    Reject,
    /// Build anyway; the caller vouches for the rule set
    Trust,
}

/// Configuration for a Firewall.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FirewallConfig {
    /// Name used in log messages
    #[serde(default = "default_name")]
    pub name: String,
    /// Rule file format
    #[serde(default)]
    pub format: RuleFormat,
    /// Overlap handling
    #[serde(default)]
    pub overlap: OverlapPolicy,
}

fn default_name() -> String {
    "default".to_string()
}

impl FirewallConfig {
    /// Create a new FirewallConfig.
    pub fn new(name: impl Into<String>, format: RuleFormat, overlap: OverlapPolicy) -> Self {
        Self {
            name: name.into(),
            format,
            overlap,
        }
    }

    /// Config for a rule file, with the format taken from its extension.
    pub fn for_path(path: &Path) -> Self {
        let name = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .map(str::to_string)
            .unwrap_or_else(default_name);
        Self::new(name, RuleFormat::from_path(path), OverlapPolicy::default())
    }

    pub fn with_overlap(mut self, overlap: OverlapPolicy) -> Self {
        self.overlap = overlap;
        self
    }
}

impl Default for FirewallConfig {
    fn default() -> Self {
        Self::new(default_name(), RuleFormat::default(), OverlapPolicy::default())
    }
}
