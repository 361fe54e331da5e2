//! Inclusive range over ports or IPv4 addresses.

use std::cmp::Ordering;
use std::fmt;
use std::net::Ipv4Addr;
use std::str::FromStr;

use crate::error::RangeError;

/// Inclusive `[start, end]` interval with `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InclusiveRange<T> {
    start: T,
    end: T,
}

/// Port range of a rule.
pub type PortRange = InclusiveRange<u16>;

/// IPv4 address range of a rule, ordered numerically.
pub type IpRange = InclusiveRange<Ipv4Addr>;

impl<T: Copy + Ord> InclusiveRange<T> {
    /// Range covering exactly one value.
    pub fn single(value: T) -> Self {
        Self {
            start: value,
            end: value,
        }
    }

    pub fn start(&self) -> T {
        self.start
    }

    pub fn end(&self) -> T {
        self.end
    }

    pub fn is_single(&self) -> bool {
        self.start == self.end
    }

    pub fn contains(&self, value: T) -> bool {
        self.start <= value && value <= self.end
    }

    /// Position of this range relative to `value`.
    ///
    /// `Less` when the whole range lies below `value`, `Greater` when it
    /// lies above, `Equal` when it contains `value`.
    pub fn locate(&self, value: T) -> Ordering {
        if self.end < value {
            Ordering::Less
        } else if self.start > value {
            Ordering::Greater
        } else {
            Ordering::Equal
        }
    }

    pub fn intersects(&self, other: &Self) -> bool {
        self.start <= other.end && other.start <= self.end
    }
}

impl<T: Copy + Ord + fmt::Display> InclusiveRange<T> {
    /// Create a range, rejecting `start > end`.
    pub fn new(start: T, end: T) -> Result<Self, RangeError> {
        if start > end {
            return Err(RangeError::Reversed {
                start: start.to_string(),
                end: end.to_string(),
            });
        }
        Ok(Self { start, end })
    }
}

impl<T> FromStr for InclusiveRange<T>
where
    T: Copy + Ord + fmt::Display + FromStr,
{
    type Err = RangeError;

    /// Parse `value` or `start-end`.
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let text = text.trim();
        if text.is_empty() {
            return Err(RangeError::Empty);
        }

        let endpoint = |s: &str| {
            let s = s.trim();
            s.parse::<T>()
                .map_err(|_| RangeError::InvalidEndpoint(s.to_string()))
        };

        match text.split_once('-') {
            Some((start, end)) => Self::new(endpoint(start)?, endpoint(end)?),
            None => Ok(Self::single(endpoint(text)?)),
        }
    }
}

impl<T: fmt::Display + PartialEq> fmt::Display for InclusiveRange<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start == self.end {
            write!(f, "{}", self.start)
        } else {
            write!(f, "{}-{}", self.start, self.end)
        }
    }
}
