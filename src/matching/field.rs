//! Per-field match specifications.
//!
//! # Responsibilities
//! - Represent one field of a match pattern: wildcard, exact value, or
//!   (for IPv4 fields) an address prefix
//! - Answer the field-level covering question used by pattern comparison
//! - Canonicalize prefixes at construction so structural equality is
//!   semantic equality
//!
//! # Design Decisions
//! - Wildcard is a distinct variant, never a sentinel value or an Option
//! - Prefix lengths are validated at construction; tables never see a
//!   malformed spec
//! - /0 collapses to Wildcard and /32 to Exact, host bits are zeroed

use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::Ipv4Addr;
use std::str::FromStr;
use thiserror::Error;

/// Errors raised while constructing match fields.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MatchError {
    /// IPv4 prefix length exceeds 32 bits.
    #[error("prefix length {0} exceeds 32 bits")]
    PrefixTooLong(u8),

    /// MAC address text is not six colon-separated hex octets.
    #[error("invalid MAC address: {0}")]
    InvalidMacAddr(String),

    /// CIDR text is not `a.b.c.d` or `a.b.c.d/len`.
    #[error("invalid CIDR: {0}")]
    InvalidCidr(String),
}

/// Result type for match construction.
pub type MatchResult<T> = Result<T, MatchError>;

/// An Ethernet MAC address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MacAddr(pub [u8; 6]);

impl fmt::Display for MacAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let b = &self.0;
        write!(
            f,
            "{:02x}:{:02x}:{:02x}:{:02x}:{:02x}:{:02x}",
            b[0], b[1], b[2], b[3], b[4], b[5]
        )
    }
}

impl FromStr for MacAddr {
    type Err = MatchError;

    fn from_str(s: &str) -> MatchResult<Self> {
        let mut bytes = [0u8; 6];
        let mut parts = s.split(':');
        for byte in bytes.iter_mut() {
            let part = parts
                .next()
                .ok_or_else(|| MatchError::InvalidMacAddr(s.to_string()))?;
            *byte = u8::from_str_radix(part, 16)
                .map_err(|_| MatchError::InvalidMacAddr(s.to_string()))?;
        }
        if parts.next().is_some() {
            return Err(MatchError::InvalidMacAddr(s.to_string()));
        }
        Ok(MacAddr(bytes))
    }
}

/// A non-address match field: either anything, or one exact value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldSpec<T> {
    /// Matches any value of the field.
    Wildcard,
    /// Matches exactly this value.
    Exact(T),
}

// Hand-rolled so the wildcard default does not demand T: Default.
impl<T> Default for FieldSpec<T> {
    fn default() -> Self {
        FieldSpec::Wildcard
    }
}

impl<T: Eq> FieldSpec<T> {
    /// Field-level covering: a wildcard covers everything; an exact value
    /// covers only the identical exact value. A wildcard on the other side
    /// is not covered by an exact value, since "any" is not one value.
    pub fn covers(&self, other: &Self) -> bool {
        match (self, other) {
            (FieldSpec::Wildcard, _) => true,
            (FieldSpec::Exact(a), FieldSpec::Exact(b)) => a == b,
            (FieldSpec::Exact(_), FieldSpec::Wildcard) => false,
        }
    }

    /// True if the field is wildcarded.
    pub fn is_wildcard(&self) -> bool {
        matches!(self, FieldSpec::Wildcard)
    }
}

/// An IPv4 match field: anything, one exact address, or a subnet prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum IpSpec {
    /// Matches any address.
    #[default]
    Wildcard,
    /// Matches exactly this address.
    Exact(Ipv4Addr),
    /// Matches every address sharing the leading `len` bits.
    Prefix(Ipv4Addr, u8),
}

impl IpSpec {
    /// Build a prefix spec, canonicalizing degenerate lengths: /0 is a
    /// wildcard, /32 is an exact match, and host bits below the prefix are
    /// zeroed so equal prefixes compare equal.
    pub fn prefix(addr: Ipv4Addr, len: u8) -> MatchResult<Self> {
        match len {
            0 => Ok(IpSpec::Wildcard),
            32 => Ok(IpSpec::Exact(addr)),
            1..=31 => {
                let mask = u32::MAX << (32 - len);
                Ok(IpSpec::Prefix(Ipv4Addr::from(u32::from(addr) & mask), len))
            }
            _ => Err(MatchError::PrefixTooLong(len)),
        }
    }

    /// Parse `"a.b.c.d"` or `"a.b.c.d/len"` CIDR text.
    pub fn from_cidr(s: &str) -> MatchResult<Self> {
        match s.split_once('/') {
            None => {
                let addr: Ipv4Addr =
                    s.parse().map_err(|_| MatchError::InvalidCidr(s.to_string()))?;
                Ok(IpSpec::Exact(addr))
            }
            Some((addr, len)) => {
                let addr: Ipv4Addr =
                    addr.parse().map_err(|_| MatchError::InvalidCidr(s.to_string()))?;
                let len: u8 =
                    len.parse().map_err(|_| MatchError::InvalidCidr(s.to_string()))?;
                IpSpec::prefix(addr, len)
            }
        }
    }

    // Tolerates degenerate lengths from directly-built variants.
    fn leading_bits(addr: Ipv4Addr, len: u8) -> u32 {
        match len {
            0 => 0,
            1..=31 => u32::from(addr) >> (32 - len),
            _ => u32::from(addr),
        }
    }

    /// Field-level covering for addresses. A prefix of length L covers an
    /// exact address, or a prefix of length >= L, whose leading L bits equal
    /// its own. Nothing but a wildcard covers a wildcard.
    pub fn covers(&self, other: &Self) -> bool {
        match (self, other) {
            (IpSpec::Wildcard, _) => true,
            (_, IpSpec::Wildcard) => false,
            (IpSpec::Exact(a), IpSpec::Exact(b)) => a == b,
            (IpSpec::Exact(_), IpSpec::Prefix(..)) => false,
            (IpSpec::Prefix(p, l), IpSpec::Exact(b)) => {
                Self::leading_bits(*b, *l) == Self::leading_bits(*p, *l)
            }
            (IpSpec::Prefix(p, l), IpSpec::Prefix(q, m)) => {
                m >= l && Self::leading_bits(*q, *l) == Self::leading_bits(*p, *l)
            }
        }
    }

    /// True if the field is wildcarded.
    pub fn is_wildcard(&self) -> bool {
        matches!(self, IpSpec::Wildcard)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mac_parse_roundtrip() {
        let mac: MacAddr = "00:00:00:00:00:01".parse().unwrap();
        assert_eq!(mac, MacAddr([0, 0, 0, 0, 0, 1]));
        assert_eq!(mac.to_string(), "00:00:00:00:00:01");

        assert!("00:00:00:00:01".parse::<MacAddr>().is_err());
        assert!("zz:00:00:00:00:01".parse::<MacAddr>().is_err());
        assert!("00:00:00:00:00:01:02".parse::<MacAddr>().is_err());
    }

    #[test]
    fn test_field_spec_covering() {
        let any: FieldSpec<u16> = FieldSpec::Wildcard;
        let one = FieldSpec::Exact(1u16);
        let two = FieldSpec::Exact(2u16);

        assert!(any.covers(&one));
        assert!(any.covers(&any));
        assert!(one.covers(&one));
        assert!(!one.covers(&two));
        // "any" is not guaranteed equal to one value
        assert!(!one.covers(&any));
    }

    #[test]
    fn test_prefix_canonicalization() {
        let addr: Ipv4Addr = "1.2.3.4".parse().unwrap();
        assert_eq!(IpSpec::prefix(addr, 0).unwrap(), IpSpec::Wildcard);
        assert_eq!(IpSpec::prefix(addr, 32).unwrap(), IpSpec::Exact(addr));
        // host bits are zeroed
        assert_eq!(
            IpSpec::prefix(addr, 24).unwrap(),
            IpSpec::Prefix("1.2.3.0".parse().unwrap(), 24)
        );
        assert_eq!(
            IpSpec::prefix(addr, 33),
            Err(MatchError::PrefixTooLong(33))
        );
    }

    #[test]
    fn test_cidr_parsing() {
        assert_eq!(
            IpSpec::from_cidr("1.2.3.4").unwrap(),
            IpSpec::Exact("1.2.3.4".parse().unwrap())
        );
        assert_eq!(
            IpSpec::from_cidr("1.2.3.0/24").unwrap(),
            IpSpec::Prefix("1.2.3.0".parse().unwrap(), 24)
        );
        assert!(IpSpec::from_cidr("1.2.3.0/40").is_err());
    }

    #[test]
    fn test_ip_covering() {
        let slash16 = IpSpec::from_cidr("1.2.0.0/16").unwrap();
        let slash24 = IpSpec::from_cidr("1.2.3.0/24").unwrap();
        let host = IpSpec::from_cidr("1.2.3.4").unwrap();
        let other = IpSpec::from_cidr("2.2.3.4").unwrap();

        assert!(slash16.covers(&slash24));
        assert!(slash16.covers(&host));
        assert!(slash24.covers(&host));
        assert!(!slash24.covers(&slash16));
        assert!(!slash24.covers(&other));
        assert!(!host.covers(&slash24));
        assert!(!host.covers(&IpSpec::Wildcard));
        assert!(IpSpec::Wildcard.covers(&slash24));
    }
}
