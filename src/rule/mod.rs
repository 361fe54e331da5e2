//! Rule and query types.

mod range;

pub use range::{InclusiveRange, IpRange, PortRange};

use std::cmp::Ordering;
use std::fmt;
use std::net::Ipv4Addr;
use std::str::FromStr;

use crate::error::RangeError;
use crate::{Category, Error, Result};

/// Unparsed rule record as produced by a loader.
///
/// `ports` and `ips` are either a single value or a `start-end` range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRule {
    pub direction: String,
    pub protocol: String,
    pub ports: String,
    pub ips: String,
}

impl RawRule {
    pub fn new(
        direction: impl Into<String>,
        protocol: impl Into<String>,
        ports: impl Into<String>,
        ips: impl Into<String>,
    ) -> Self {
        Self {
            direction: direction.into(),
            protocol: protocol.into(),
            ports: ports.into(),
            ips: ips.into(),
        }
    }
}

/// Rule is one allow-entry covering a category, a port range and an IP range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rule {
    pub category: Category,
    pub ports: PortRange,
    pub ips: IpRange,
}

impl Rule {
    pub fn new(category: Category, ports: PortRange, ips: IpRange) -> Self {
        Self {
            category,
            ports,
            ips,
        }
    }

    /// Normalize a raw record into a rule.
    pub fn from_raw(raw: &RawRule) -> Result<Self> {
        let category = Category::of(&raw.direction, &raw.protocol)?;
        let ports = raw
            .ports
            .parse::<PortRange>()
            .map_err(|e| range_error(e, &raw.ports, Error::InvalidPort))?;
        let ips = raw
            .ips
            .parse::<IpRange>()
            .map_err(|e| range_error(e, &raw.ips, Error::InvalidIpAddress))?;
        Ok(Self::new(category, ports, ips))
    }

    /// Key of the index order: category, port start, IP start.
    pub fn sort_key(&self) -> (Category, u16, Ipv4Addr) {
        (self.category, self.ports.start(), self.ips.start())
    }

    /// Three-way comparison of this rule against a query point.
    ///
    /// `Less` means the rule sorts before every rule that could match the
    /// query, `Greater` means it sorts after, `Equal` means it matches.
    /// Dimensions are checked in sort-key order.
    pub fn compare(&self, query: &Query) -> Ordering {
        self.category
            .cmp(&query.category)
            .then_with(|| self.ports.locate(query.port))
            .then_with(|| self.ips.locate(query.ip))
    }

    /// Whether the query lies inside all three dimensions of this rule.
    pub fn contains(&self, query: &Query) -> bool {
        self.category == query.category
            && self.ports.contains(query.port)
            && self.ips.contains(query.ip)
    }

    /// Whether some packet is matched by both rules.
    pub fn overlaps(&self, other: &Rule) -> bool {
        self.category == other.category
            && self.ports.intersects(&other.ports)
            && self.ips.intersects(&other.ips)
    }
}

fn range_error(err: RangeError, field: &str, invalid: fn(String) -> Error) -> Error {
    match err {
        RangeError::Reversed { .. } => Error::InvalidRange(field.to_string()),
        RangeError::Empty | RangeError::InvalidEndpoint(_) => invalid(field.to_string()),
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.category, self.ports, self.ips)
    }
}

/// Query is a single packet description checked against the index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Query {
    pub category: Category,
    pub port: u16,
    pub ip: Ipv4Addr,
}

impl Query {
    pub fn new(category: Category, port: u16, ip: Ipv4Addr) -> Self {
        Self { category, port, ip }
    }

    /// Build a query from packet header text.
    pub fn parse(direction: &str, protocol: &str, port: u16, ip: &str) -> Result<Self> {
        let category = Category::of(direction, protocol)?;
        let ip = ip
            .trim()
            .parse::<Ipv4Addr>()
            .map_err(|_| Error::InvalidIpAddress(ip.to_string()))?;
        Ok(Self::new(category, port, ip))
    }
}

impl FromStr for Query {
    type Err = Error;

    /// Parse `direction protocol port ip`, separated by commas or whitespace.
    fn from_str(line: &str) -> Result<Self> {
        match split_fields(line).as_slice() {
            [direction, protocol, port, ip] => {
                let port = port
                    .parse::<u16>()
                    .map_err(|_| Error::InvalidPort(port.to_string()))?;
                Query::parse(direction, protocol, port, ip)
            }
            fields => Err(Error::InvalidPacket(format!(
                "expected 4 fields, got {}",
                fields.len()
            ))),
        }
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.category, self.port, self.ip)
    }
}

/// Split a rule or packet line on commas and whitespace.
pub(crate) fn split_fields(line: &str) -> Vec<&str> {
    line.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|field| !field.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(direction: &str, protocol: &str, ports: &str, ips: &str) -> Rule {
        Rule::from_raw(&RawRule::new(direction, protocol, ports, ips)).unwrap()
    }

    fn query(direction: &str, protocol: &str, port: u16, ip: &str) -> Query {
        Query::parse(direction, protocol, port, ip).unwrap()
    }

    #[test]
    fn test_from_raw_single_values() {
        let r = rule("inbound", "tcp", "80", "192.168.1.2");
        assert_eq!(r.category, Category::InboundTcp);
        assert_eq!(r.ports, PortRange::single(80));
        assert_eq!(r.ips, IpRange::single(Ipv4Addr::new(192, 168, 1, 2)));
    }

    #[test]
    fn test_from_raw_errors() {
        let bad = |d: &str, p: &str, ports: &str, ips: &str| {
            Rule::from_raw(&RawRule::new(d, p, ports, ips))
        };
        assert!(matches!(
            bad("forward", "tcp", "80", "1.1.1.1"),
            Err(Error::InvalidDirection(_))
        ));
        assert!(matches!(
            bad("inbound", "icmp", "80", "1.1.1.1"),
            Err(Error::InvalidProtocol(_))
        ));
        assert!(matches!(
            bad("inbound", "tcp", "eighty", "1.1.1.1"),
            Err(Error::InvalidPort(_))
        ));
        assert!(matches!(
            bad("inbound", "tcp", "80", "1.1.1"),
            Err(Error::InvalidIpAddress(_))
        ));
        assert!(matches!(
            bad("inbound", "tcp", "90-80", "1.1.1.1"),
            Err(Error::InvalidRange(_))
        ));
        assert!(matches!(
            bad("inbound", "tcp", "80", "2.0.0.0-1.0.0.0"),
            Err(Error::InvalidRange(_))
        ));
    }

    #[test]
    fn test_compare_category_first() {
        let r = rule("inbound", "udp", "53", "10.0.0.1");
        assert_eq!(
            r.compare(&query("inbound", "tcp", 53, "10.0.0.1")),
            Ordering::Less
        );
        assert_eq!(
            r.compare(&query("outbound", "udp", 53, "10.0.0.1")),
            Ordering::Greater
        );
    }

    #[test]
    fn test_compare_port_before_ip() {
        let r = rule("outbound", "udp", "1000-2000", "52.12.48.92");
        // port miss dominates even when the ip would match
        assert_eq!(
            r.compare(&query("outbound", "udp", 999, "52.12.48.92")),
            Ordering::Greater
        );
        assert_eq!(
            r.compare(&query("outbound", "udp", 2001, "1.1.1.1")),
            Ordering::Less
        );
        assert_eq!(
            r.compare(&query("outbound", "udp", 1500, "52.12.48.92")),
            Ordering::Equal
        );
    }

    #[test]
    fn test_compare_ip_bounds() {
        let r = rule("inbound", "udp", "53", "192.168.1.1-192.168.2.5");
        let at = |ip| r.compare(&query("inbound", "udp", 53, ip));
        assert_eq!(at("192.168.1.0"), Ordering::Greater);
        assert_eq!(at("192.168.1.1"), Ordering::Equal);
        assert_eq!(at("192.168.2.5"), Ordering::Equal);
        assert_eq!(at("192.168.2.6"), Ordering::Less);
    }

    #[test]
    fn test_compare_agrees_with_contains() {
        let r = rule("outbound", "tcp", "10000-20000", "192.168.10.11");
        for port in [0, 9999, 10000, 10234, 20000, 20001, u16::MAX] {
            for ip in ["192.168.10.10", "192.168.10.11", "192.168.10.12"] {
                let q = query("outbound", "tcp", port, ip);
                assert_eq!(r.compare(&q) == Ordering::Equal, r.contains(&q));
            }
        }
    }

    #[test]
    fn test_overlaps() {
        let a = rule("inbound", "tcp", "1-10", "10.0.0.0-10.0.0.255");
        assert!(a.overlaps(&rule("inbound", "tcp", "10", "10.0.0.255")));
        assert!(!a.overlaps(&rule("inbound", "tcp", "11", "10.0.0.1")));
        assert!(!a.overlaps(&rule("inbound", "tcp", "5", "10.0.1.0")));
        assert!(!a.overlaps(&rule("outbound", "tcp", "5", "10.0.0.1")));
    }

    #[test]
    fn test_query_from_str() {
        let q: Query = "inbound,tcp,80,192.168.1.2".parse().unwrap();
        assert_eq!(q, query("inbound", "tcp", 80, "192.168.1.2"));

        let q: Query = "outbound udp  53 8.8.8.8".parse().unwrap();
        assert_eq!(q.category, Category::OutboundUdp);

        assert!(matches!(
            "inbound,tcp,99999,1.1.1.1".parse::<Query>(),
            Err(Error::InvalidPort(_))
        ));
        assert!("inbound,tcp,80".parse::<Query>().is_err());
        assert!(matches!(
            "inbound,tcp,80,not-an-ip".parse::<Query>(),
            Err(Error::InvalidIpAddress(_))
        ));
    }

    #[test]
    fn test_rule_display() {
        let r = rule("inbound", "udp", "53", "192.168.1.1-192.168.2.5");
        assert_eq!(r.to_string(), "inbound udp 53 192.168.1.1-192.168.2.5");
    }
}
