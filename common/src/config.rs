//! # Operator Configuration
//!
//! A plain-text file of named scan ranges plus an optional `PingTimeout`
//! key. The format is line-oriented: a name line opens a range and the two
//! following non-blank lines are its boundary addresses; a `PingTimeout`
//! line is followed by the timeout in milliseconds.
//!
//! ```text
//! Range1
//! 192.168.0.1
//! 192.168.0.254
//! PingTimeout
//! 1000
//! ```
//!
//! Malformed entries are configuration errors surfaced before any probing.

use std::net::Ipv4Addr;
use std::path::Path;
use std::time::Duration;

use thiserror::Error;

use crate::network::range::{Ipv4Range, RangeError};

pub const DEFAULT_TIMEOUT_MS: u64 = 1000;

/// Starter file written when none exists; the operator is expected to edit
/// it and rerun.
const DEFAULT_CONFIG: &str = "\
Range1
192.168.0.1
192.168.0.254
Range2
192.168.3.1
192.168.3.254
PingTimeout
1000
";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("'{key}' is missing its value lines")]
    MissingValue { key: String },
    #[error("line {line}: expected an IPv4 address, got '{value}'")]
    BadAddress { line: usize, value: String },
    #[error("range '{name}' is invalid: {source}")]
    BadRange { name: String, source: RangeError },
    #[error("line {line}: PingTimeout must be a positive integer, got '{value}'")]
    BadTimeout { line: usize, value: String },
}

/// One named scan boundary from the config file.
#[derive(Debug, Clone)]
pub struct NamedRange {
    pub name: String,
    pub range: Ipv4Range,
}

/// Operator configuration: named ranges plus the per-probe echo timeout.
#[derive(Debug, Clone)]
pub struct Config {
    pub ranges: Vec<NamedRange>,
    pub ping_timeout: Duration,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::parse(&text)
    }

    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        let mut ranges = Vec::new();
        let mut ping_timeout = Duration::from_millis(DEFAULT_TIMEOUT_MS);

        let mut lines = text
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty());

        while let Some((_, raw)) = lines.next() {
            let line = raw.trim();

            if line.eq_ignore_ascii_case("PingTimeout") {
                let (value_idx, value_raw) = lines.next().ok_or_else(|| ConfigError::MissingValue {
                    key: "PingTimeout".to_string(),
                })?;
                let value = value_raw.trim();
                let ms: u64 = value
                    .parse()
                    .ok()
                    .filter(|ms| *ms > 0)
                    .ok_or_else(|| ConfigError::BadTimeout {
                        line: value_idx + 1,
                        value: value.to_string(),
                    })?;
                ping_timeout = Duration::from_millis(ms);
                continue;
            }

            let name = line.to_string();
            let start = next_addr(&mut lines, &name)?;
            let end = next_addr(&mut lines, &name)?;
            let range = Ipv4Range::new(start, end).map_err(|source| ConfigError::BadRange {
                name: name.clone(),
                source,
            })?;
            ranges.push(NamedRange { name, range });
        }

        Ok(Self {
            ranges,
            ping_timeout,
        })
    }

    /// Writes the starter config.
    pub fn write_default(path: &Path) -> std::io::Result<()> {
        std::fs::write(path, DEFAULT_CONFIG)
    }

    pub fn find_range(&self, name: &str) -> Option<&NamedRange> {
        self.ranges.iter().find(|named| named.name == name)
    }
}

fn next_addr<'a, I>(lines: &mut I, name: &str) -> Result<Ipv4Addr, ConfigError>
where
    I: Iterator<Item = (usize, &'a str)>,
{
    let (idx, raw) = lines.next().ok_or_else(|| ConfigError::MissingValue {
        key: name.to_string(),
    })?;
    let value = raw.trim();
    value.parse().map_err(|_| ConfigError::BadAddress {
        line: idx + 1,
        value: value.to_string(),
    })
}
