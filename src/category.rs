//! Packet category definitions.

use std::fmt;

use crate::{Error, Result};

/// Traffic direction relative to the protected host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Inbound,
    Outbound,
}

impl Direction {
    /// Parse a direction from a string (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "inbound" => Some(Direction::Inbound),
            "outbound" => Some(Direction::Outbound),
            _ => None,
        }
    }

    /// Get the canonical string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Inbound => "inbound",
            Direction::Outbound => "outbound",
        }
    }
}

impl std::str::FromStr for Direction {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Direction::parse(s).ok_or_else(|| Error::InvalidDirection(s.to_string()))
    }
}

/// Transport protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Protocol {
    Tcp,
    Udp,
}

impl Protocol {
    /// Parse a protocol from a string (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "tcp" => Some(Protocol::Tcp),
            "udp" => Some(Protocol::Udp),
            _ => None,
        }
    }

    /// Get the canonical string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Protocol::Tcp => "tcp",
            Protocol::Udp => "udp",
        }
    }
}

impl std::str::FromStr for Protocol {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Protocol::parse(s).ok_or_else(|| Error::InvalidProtocol(s.to_string()))
    }
}

/// Category is the exact-match dimension of a rule: direction × protocol.
///
/// The declaration order is the primary sort key of the rule index.
/// Inbound contributes the high bit and tcp the low bit of the ordinal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Category {
    OutboundUdp = 0,
    OutboundTcp = 1,
    InboundUdp = 2,
    InboundTcp = 3,
}

impl Category {
    /// All categories in sort order.
    pub const ALL: [Category; 4] = [
        Category::OutboundUdp,
        Category::OutboundTcp,
        Category::InboundUdp,
        Category::InboundTcp,
    ];

    /// Build the category for a direction and protocol.
    ///
    /// Rules and queries both go through this function.
    pub fn new(direction: Direction, protocol: Protocol) -> Self {
        match (direction, protocol) {
            (Direction::Outbound, Protocol::Udp) => Category::OutboundUdp,
            (Direction::Outbound, Protocol::Tcp) => Category::OutboundTcp,
            (Direction::Inbound, Protocol::Udp) => Category::InboundUdp,
            (Direction::Inbound, Protocol::Tcp) => Category::InboundTcp,
        }
    }

    /// Build the category from raw direction and protocol text.
    ///
    /// Unknown text is rejected rather than mapped to a default category.
    pub fn of(direction: &str, protocol: &str) -> Result<Self> {
        Ok(Self::new(direction.parse()?, protocol.parse()?))
    }

    pub fn direction(&self) -> Direction {
        match self {
            Category::OutboundUdp | Category::OutboundTcp => Direction::Outbound,
            Category::InboundUdp | Category::InboundTcp => Direction::Inbound,
        }
    }

    pub fn protocol(&self) -> Protocol {
        match self {
            Category::OutboundUdp | Category::InboundUdp => Protocol::Udp,
            Category::OutboundTcp | Category::InboundTcp => Protocol::Tcp,
        }
    }

    /// Convert to a u8 value.
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Convert from a u8 value.
    pub fn from_u8(v: u8) -> Option<Self> {
        Category::ALL.get(v as usize).copied()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.direction().as_str(), self.protocol().as_str())
    }
}
