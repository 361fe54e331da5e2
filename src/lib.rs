//! rangewall - A static packet filter over sorted range rules.
//!
//! A rule allows packets of one category (direction × protocol) whose port
//! and IPv4 address fall inside inclusive ranges. Rules are sorted once into
//! an immutable [`RuleIndex`] and every packet is decided by a single binary
//! search over it. Packets matching no rule are denied.
//!
//! # Quick Start
//!
//! ```
//! use rangewall::{accept_packet, build_index, RawRule};
//!
//! let index = build_index([
//!     RawRule::new("inbound", "tcp", "80", "192.168.1.2"),
//!     RawRule::new("outbound", "udp", "1000-2000", "52.12.48.92"),
//! ])
//! .unwrap();
//!
//! assert!(accept_packet(&index, "inbound", "tcp", 80, "192.168.1.2").unwrap());
//! assert!(accept_packet(&index, "outbound", "udp", 2000, "52.12.48.92").unwrap());
//! assert!(!accept_packet(&index, "outbound", "udp", 2001, "52.12.48.92").unwrap());
//! ```
//!
//! # Rule Files
//!
//! [`Firewall`] loads rules from a text file (one `direction,protocol,ports,ips`
//! rule per line) or a YAML policy and wraps the index with its configuration:
//!
//! ```ignore
//! use rangewall::{Firewall, FirewallConfig};
//! use std::path::Path;
//!
//! let path = Path::new("fw.csv");
//! let fw = Firewall::from_path(path, FirewallConfig::for_path(path))?;
//! let accepted = fw.accept_packet("inbound", "udp", 53, "192.168.2.1")?;
//! ```
//!
//! # Ordering
//!
//! Rules sort by category, then port-range start, then IP-range start. IP
//! addresses compare numerically. Within a category, port ranges must be
//! either identical or disjoint, and rules sharing a port range must have
//! disjoint IP ranges; [`RuleIndex::build`] rejects anything else.
//!
//! The index is immutable after construction and can be shared across
//! threads without locking.

mod category;
mod error;
mod verdict;

pub mod converter;
pub mod firewall;
pub mod index;
pub mod rule;

// Re-export core types
pub use category::{Category, Direction, Protocol};
pub use error::{Error, RangeError, Result};
pub use verdict::Verdict;

pub use firewall::{Firewall, FirewallConfig, OverlapPolicy, RuleFormat};
pub use index::RuleIndex;
pub use rule::{IpRange, PortRange, Query, RawRule, Rule};

/// Normalize raw rule records and build a validated index.
///
/// Fails on the first malformed record, or when the rules overlap.
pub fn build_index<I: IntoIterator<Item = RawRule>>(raw_rules: I) -> Result<RuleIndex> {
    let rules = raw_rules
        .into_iter()
        .map(|raw| Rule::from_raw(&raw))
        .collect::<Result<Vec<_>>>()?;
    RuleIndex::build(rules)
}

/// Decide whether a packet is accepted by the index.
///
/// Unknown direction or protocol text and unparsable IPs are errors.
pub fn accept_packet(
    index: &RuleIndex,
    direction: &str,
    protocol: &str,
    port: u16,
    ip: &str,
) -> Result<bool> {
    let query = Query::parse(direction, protocol, port, ip)?;
    Ok(index.matches(&query))
}
