//! # Scan Range Model
//!
//! A sweep targets a contiguous block of IPv4 addresses inside one
//! /24-equivalent subnet, named by its two boundary addresses. Construction
//! validates the boundaries; expansion is a lazy, restartable walk of the
//! last octet.

use std::fmt;
use std::net::Ipv4Addr;
use std::str::FromStr;

use thiserror::Error;

/// Errors produced while validating or parsing a scan range.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RangeError {
    #[error("{start} and {end} differ above the last octet; a range may only span one /24 block")]
    SubnetMismatch { start: Ipv4Addr, end: Ipv4Addr },
    #[error("start address {start} is above end address {end}")]
    Inverted { start: Ipv4Addr, end: Ipv4Addr },
    #[error("'{0}' is not an IPv4 address or last octet")]
    BadAddress(String),
    #[error("expected START-END, got '{0}'")]
    BadFormat(String),
}

/// A validated, inclusive block of IPv4 addresses.
///
/// The first three octets of both boundaries must match and the fourth
/// octet of `start` must not exceed `end`'s. Cross-octet ranges are
/// rejected outright instead of being truncated or wrapped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ipv4Range {
    start_addr: Ipv4Addr,
    end_addr: Ipv4Addr,
}

impl Ipv4Range {
    pub fn new(start_addr: Ipv4Addr, end_addr: Ipv4Addr) -> Result<Self, RangeError> {
        if start_addr.octets()[..3] != end_addr.octets()[..3] {
            return Err(RangeError::SubnetMismatch {
                start: start_addr,
                end: end_addr,
            });
        }
        if start_addr.octets()[3] > end_addr.octets()[3] {
            return Err(RangeError::Inverted {
                start: start_addr,
                end: end_addr,
            });
        }
        Ok(Self {
            start_addr,
            end_addr,
        })
    }

    pub fn start(&self) -> Ipv4Addr {
        self.start_addr
    }

    pub fn end(&self) -> Ipv4Addr {
        self.end_addr
    }

    /// Number of addresses in the range, end inclusive. Never zero.
    pub fn len(&self) -> usize {
        (self.end_addr.octets()[3] - self.start_addr.octets()[3]) as usize + 1
    }

    /// Walks the last octet from start to end, ascending. Nothing is
    /// precomputed, so the iterator is cheap to re-create.
    pub fn iter(&self) -> impl Iterator<Item = Ipv4Addr> {
        let [a, b, c, start] = self.start_addr.octets();
        let end = self.end_addr.octets()[3];
        (start..=end).map(move |d| Ipv4Addr::new(a, b, c, d))
    }
}

impl fmt::Display for Ipv4Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start_addr, self.end_addr)
    }
}

impl FromStr for Ipv4Range {
    type Err = RangeError;

    /// Parses `START-END` where END is a full dotted quad or a bare last
    /// octet (`192.168.1.10-50` means `192.168.1.10-192.168.1.50`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (start_str, end_str) = s
            .split_once('-')
            .ok_or_else(|| RangeError::BadFormat(s.to_string()))?;

        let start_str = start_str.trim();
        let start_addr = start_str
            .parse::<Ipv4Addr>()
            .map_err(|_| RangeError::BadAddress(start_str.to_string()))?;

        let end_str = end_str.trim();
        let end_addr = if let Ok(addr) = end_str.parse::<Ipv4Addr>() {
            addr
        } else {
            let last = end_str
                .parse::<u8>()
                .map_err(|_| RangeError::BadAddress(end_str.to_string()))?;
            let [a, b, c, _] = start_addr.octets();
            Ipv4Addr::new(a, b, c, last)
        };

        Self::new(start_addr, end_addr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expansion_is_exact_and_ascending() {
        let range = Ipv4Range::new(
            Ipv4Addr::new(192, 168, 0, 1),
            Ipv4Addr::new(192, 168, 0, 5),
        )
        .unwrap();

        let addrs: Vec<Ipv4Addr> = range.iter().collect();
        assert_eq!(addrs.len(), range.len());
        assert_eq!(addrs.len(), 5);
        for (i, addr) in addrs.iter().enumerate() {
            assert_eq!(*addr, Ipv4Addr::new(192, 168, 0, 1 + i as u8));
        }

        // Restartable: a second walk sees the same sequence.
        assert_eq!(range.iter().collect::<Vec<_>>(), addrs);
    }

    #[test]
    fn single_address_range() {
        let addr = Ipv4Addr::new(10, 0, 0, 7);
        let range = Ipv4Range::new(addr, addr).unwrap();
        assert_eq!(range.len(), 1);
        assert_eq!(range.iter().collect::<Vec<_>>(), vec![addr]);
    }

    #[test]
    fn full_last_octet_span() {
        let range = Ipv4Range::new(Ipv4Addr::new(10, 0, 0, 0), Ipv4Addr::new(10, 0, 0, 255)).unwrap();
        assert_eq!(range.len(), 256);
    }

    #[test]
    fn mismatched_subnet_is_rejected() {
        let err = Ipv4Range::new(Ipv4Addr::new(10, 0, 0, 5), Ipv4Addr::new(10, 0, 1, 9)).unwrap_err();
        assert!(matches!(err, RangeError::SubnetMismatch { .. }));
    }

    #[test]
    fn inverted_octets_are_rejected() {
        let err = Ipv4Range::new(Ipv4Addr::new(10, 0, 0, 9), Ipv4Addr::new(10, 0, 0, 5)).unwrap_err();
        assert!(matches!(err, RangeError::Inverted { .. }));
    }

    #[test]
    fn from_str_variants() {
        let full: Ipv4Range = "192.168.1.10-192.168.1.50".parse().unwrap();
        let short: Ipv4Range = "192.168.1.10-50".parse().unwrap();
        assert_eq!(full, short);

        assert!("192.168.1.10".parse::<Ipv4Range>().is_err());
        assert!("garbage-50".parse::<Ipv4Range>().is_err());
        assert!("192.168.1.10-192.168.2.50".parse::<Ipv4Range>().is_err());
    }
}
