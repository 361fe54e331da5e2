//! Packet decision types.

use std::fmt;

/// Verdict is the decision for a single packet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum Verdict {
    /// Reject the packet
    #[default]
    Deny = 0,
    /// Let the packet through
    Accept = 1,
}

impl Verdict {
    /// Whether the packet is let through.
    pub fn is_accept(self) -> bool {
        self == Verdict::Accept
    }

    /// Get the string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Deny => "DENY",
            Verdict::Accept => "ACCEPT",
        }
    }
}

impl From<bool> for Verdict {
    fn from(matched: bool) -> Self {
        if matched {
            Verdict::Accept
        } else {
            Verdict::Deny
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
