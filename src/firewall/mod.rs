//! Firewall facade over a rule index.

mod config;

pub use config::{FirewallConfig, OverlapPolicy, RuleFormat};

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::converter::{TextParser, YamlPolicy};
use crate::{Category, Query, Result, Rule, RuleIndex, Verdict};

/// Firewall owns a rule index and answers accept/deny for packets.
///
/// Packets that match no rule are denied.
#[derive(Debug, Clone)]
pub struct Firewall {
    index: RuleIndex,
    config: FirewallConfig,
}

impl Firewall {
    /// Create a Firewall from an already built index.
    pub fn new(index: RuleIndex, config: FirewallConfig) -> Self {
        Self { index, config }
    }

    /// Build a Firewall from normalized rules, honoring the overlap policy.
    pub fn from_rules<I: IntoIterator<Item = Rule>>(
        rules: I,
        config: FirewallConfig,
    ) -> Result<Self> {
        let index = match config.overlap {
            OverlapPolicy::Reject => RuleIndex::build(rules)?,
            OverlapPolicy::Trust => RuleIndex::build_unchecked(rules),
        };
        log::info!("Loaded firewall {} with {} rules", config.name, index.len());
        Ok(Self::new(index, config))
    }

    /// Build a Firewall by parsing rules from a reader.
    ///
    /// The reader is interpreted according to `config.format`.
    pub fn from_reader<R: Read>(reader: R, config: FirewallConfig) -> Result<Self> {
        let rules = match config.format {
            RuleFormat::Text => TextParser::parse_rules(reader)?,
            RuleFormat::Yaml => {
                let policy = YamlPolicy::from_reader(reader)?;
                policy
                    .raw_rules()
                    .iter()
                    .map(Rule::from_raw)
                    .collect::<Result<Vec<_>>>()?
            }
        };
        Self::from_rules(rules, config)
    }

    /// Build a Firewall from a rule file.
    pub fn from_path(path: &Path, config: FirewallConfig) -> Result<Self> {
        let file = File::open(path)?;
        Self::from_reader(file, config)
    }

    /// Decide whether a packet is accepted.
    ///
    /// Unknown direction, protocol or IP text is an error, not a denial.
    pub fn accept_packet(
        &self,
        direction: &str,
        protocol: &str,
        port: u16,
        ip: &str,
    ) -> Result<bool> {
        let query = Query::parse(direction, protocol, port, ip)?;
        Ok(self.index.matches(&query))
    }

    /// Decide the verdict for a parsed packet.
    pub fn evaluate(&self, query: &Query) -> Verdict {
        let verdict = Verdict::from(self.index.matches(query));
        log::trace!("{}: {} -> {}", self.config.name, query, verdict);
        verdict
    }

    pub fn index(&self) -> &RuleIndex {
        &self.index
    }

    pub fn config(&self) -> &FirewallConfig {
        &self.config
    }

    /// Get the number of rules.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Rule counts per category, in index order.
    pub fn summary(&self) -> Vec<(Category, usize)> {
        Category::ALL
            .iter()
            .map(|&category| (category, self.index.count(category)))
            .collect()
    }
}
