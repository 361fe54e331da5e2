//! YAML rule policy format.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::Read;

use crate::{RawRule, Result};

/// YAML policy document.
///
/// ```yaml
/// name: edge
/// rules:
///   - direction: inbound
///     protocol: tcp
///     port: 80
///     ip: 192.168.1.2
///   - direction: outbound
///     protocol: udp
///     port: 1000-2000
///     ip: 52.12.48.92
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct YamlPolicy {
    /// Optional policy name
    #[serde(default)]
    pub name: Option<String>,
    /// Rule list
    #[serde(default)]
    pub rules: Vec<YamlRule>,
}

/// One rule entry of a YAML policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct YamlRule {
    pub direction: String,
    pub protocol: String,
    /// Port number or `start-end` range
    #[serde(alias = "ports")]
    pub port: FieldSpec,
    /// IP address or `start-end` range
    #[serde(alias = "ips")]
    pub ip: String,
}

/// A field written either as a bare number or as text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldSpec {
    Number(u64),
    Text(String),
}

impl fmt::Display for FieldSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldSpec::Number(n) => write!(f, "{}", n),
            FieldSpec::Text(s) => write!(f, "{}", s),
        }
    }
}

impl YamlPolicy {
    /// Parse a policy from YAML text.
    pub fn parse(content: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Parse a policy from a reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Ok(serde_yaml::from_reader(reader)?)
    }

    /// Convert the policy entries into raw rule records.
    pub fn raw_rules(&self) -> Vec<RawRule> {
        self.rules
            .iter()
            .map(|rule| {
                RawRule::new(
                    rule.direction.as_str(),
                    rule.protocol.as_str(),
                    rule.port.to_string(),
                    rule.ip.as_str(),
                )
            })
            .collect()
    }
}
