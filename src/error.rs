//! Error types for rangewall.

use thiserror::Error;

use crate::rule::Rule;

/// Error type for rangewall operations.
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Direction is neither inbound nor outbound
    #[error("invalid direction: {0}")]
    InvalidDirection(String),

    /// Protocol is neither tcp nor udp
    #[error("invalid protocol: {0}")]
    InvalidProtocol(String),

    /// A port field or range endpoint could not be parsed
    #[error("invalid port: {0}")]
    InvalidPort(String),

    /// An IP field or range endpoint could not be parsed
    #[error("invalid IP address: {0}")]
    InvalidIpAddress(String),

    /// Range with start greater than end
    #[error("invalid range: {0}")]
    InvalidRange(String),

    /// Packet description with the wrong shape
    #[error("invalid packet: {0}")]
    InvalidPacket(String),

    /// Rule file line that could not be turned into a rule
    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },

    /// Two rules cover at least one common packet
    #[error("overlapping rules: {first} and {second}")]
    OverlappingRules { first: Rule, second: Rule },

    /// Two rules have partially overlapping port ranges and cannot be
    /// ordered for search even though they never match the same packet
    #[error("rules straddle each other's port range: {first} and {second}")]
    StraddlingRules { first: Rule, second: Rule },

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),
}

/// Result type alias for rangewall operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for normalizing a single range field.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RangeError {
    /// Empty field
    #[error("empty range")]
    Empty,

    /// Endpoint that does not parse
    #[error("invalid endpoint: {0}")]
    InvalidEndpoint(String),

    /// Start greater than end
    #[error("range start {start} is greater than end {end}")]
    Reversed { start: String, end: String },
}
