//! Address ranges.
//!
//! Reserved entries in the input document are written either as a single
//! address (`192.168.123.10`) or as an inclusive pair (`10.0.0.5-10.0.0.9`).
//! Allocation results are rendered the same way, with a spaced dash
//! (`192.168.123.0 - 192.168.123.1`) and single-address ranges collapsed.

use ipnetwork::IpNetwork;
use serde::Deserialize;
use std::fmt;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::str::FromStr;

/// Errors raised while parsing range text
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RangeParseError {
    #[error("Invalid address '{value}' in range '{range}'")]
    InvalidAddress { value: String, range: String },

    #[error("Range '{0}' mixes IPv4 and IPv6 addresses")]
    MixedFamilies(String),

    #[error("Range '{0}' ends before it starts")]
    Reversed(String),
}

/// Numeric value of an address, wide enough for both families
pub(crate) fn to_bits(addr: IpAddr) -> u128 {
    match addr {
        IpAddr::V4(v4) => u128::from(u32::from(v4)),
        IpAddr::V6(v6) => u128::from(v6),
    }
}

/// Inverse of [`to_bits`]; `bits` must fit the chosen family.
pub(crate) fn from_bits(ipv4: bool, bits: u128) -> IpAddr {
    if ipv4 {
        IpAddr::V4(Ipv4Addr::from(bits as u32))
    } else {
        IpAddr::V6(Ipv6Addr::from(bits))
    }
}

/// A closed interval of addresses of a single family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub struct AddressRange {
    first: IpAddr,
    last: IpAddr,
}

impl AddressRange {
    /// Build a range from two endpoints given in either order.
    pub fn new(a: IpAddr, b: IpAddr) -> Self {
        if a <= b {
            Self { first: a, last: b }
        } else {
            Self { first: b, last: a }
        }
    }

    pub fn single(addr: IpAddr) -> Self {
        Self { first: addr, last: addr }
    }

    /// Every address of a CIDR block, network and broadcast included.
    pub fn of_network(network: &IpNetwork) -> Self {
        let ipv4 = network.is_ipv4();
        let width: u32 = if ipv4 { 32 } else { 128 };
        let host_bits = width - u32::from(network.prefix());
        let span = if host_bits >= 128 {
            u128::MAX
        } else {
            (1u128 << host_bits) - 1
        };
        let first = to_bits(network.ip()) & !span;
        Self {
            first: from_bits(ipv4, first),
            last: from_bits(ipv4, first | span),
        }
    }

    /// Host addresses of a CIDR block.
    ///
    /// Blocks of four or more addresses lose their first address, and IPv4
    /// blocks also lose the broadcast address. Smaller blocks (/31, /32,
    /// /127, /128) keep every address, so the result is never empty.
    pub fn hosts_of(network: &IpNetwork) -> Self {
        let bounds = Self::of_network(network);
        let ipv4 = bounds.is_ipv4();
        let first = to_bits(bounds.first);
        let last = to_bits(bounds.last);

        if last - first >= 3 {
            Self::from_bits(ipv4, first + 1, if ipv4 { last - 1 } else { last })
        } else {
            bounds
        }
    }

    pub(crate) fn from_bits(ipv4: bool, first: u128, last: u128) -> Self {
        Self::new(from_bits(ipv4, first), from_bits(ipv4, last))
    }

    pub fn first(&self) -> IpAddr {
        self.first
    }

    pub fn last(&self) -> IpAddr {
        self.last
    }

    pub fn is_ipv4(&self) -> bool {
        self.first.is_ipv4()
    }

    pub fn is_single(&self) -> bool {
        self.first == self.last
    }

    /// The part of this range lying strictly below `addr`.
    pub fn below(&self, addr: IpAddr) -> Option<Self> {
        if addr.is_ipv4() != self.is_ipv4() || addr <= self.first {
            return None;
        }
        let end = if addr > self.last {
            to_bits(self.last)
        } else {
            to_bits(addr) - 1
        };
        Some(Self::from_bits(self.is_ipv4(), to_bits(self.first), end))
    }

    /// The part of this range lying strictly above `addr`.
    pub fn above(&self, addr: IpAddr) -> Option<Self> {
        if addr.is_ipv4() != self.is_ipv4() || addr >= self.last {
            return None;
        }
        let start = if addr < self.first {
            to_bits(self.first)
        } else {
            to_bits(addr) + 1
        };
        Some(Self::from_bits(self.is_ipv4(), start, to_bits(self.last)))
    }
}

impl fmt::Display for AddressRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_single() {
            write!(f, "{}", self.first)
        } else {
            write!(f, "{} - {}", self.first, self.last)
        }
    }
}

fn parse_endpoint(value: &str, range: &str) -> Result<IpAddr, RangeParseError> {
    value
        .trim()
        .parse::<IpAddr>()
        .map_err(|_| RangeParseError::InvalidAddress {
            value: value.trim().to_string(),
            range: range.to_string(),
        })
}

impl FromStr for AddressRange {
    type Err = RangeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        let (first, last) = match text.split_once('-') {
            Some((first, last)) => (parse_endpoint(first, text)?, parse_endpoint(last, text)?),
            None => {
                let addr = parse_endpoint(text, text)?;
                (addr, addr)
            }
        };

        if first.is_ipv4() != last.is_ipv4() {
            return Err(RangeParseError::MixedFamilies(text.to_string()));
        }
        if first > last {
            return Err(RangeParseError::Reversed(text.to_string()));
        }
        Ok(Self { first, last })
    }
}

impl TryFrom<String> for AddressRange {
    type Error = RangeParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Render the span between two addresses, smaller endpoint first.
pub fn format_range(start: IpAddr, end: IpAddr) -> String {
    AddressRange::new(start, end).to_string()
}
