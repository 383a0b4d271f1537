//! # Vendor Table
//!
//! Immutable OUI prefix to manufacturer mapping, loaded once before a sweep
//! starts and shared read-only with every probe. Lookups are pure and
//! total: an unknown prefix yields an empty name, never an error.

use std::collections::HashMap;
use std::path::Path;

use mac_oui::Oui;
use pnet::util::MacAddr;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::network::mac;

#[derive(Debug, Error)]
pub enum VendorDbError {
    #[error("failed to read vendor file: {0}")]
    Io(#[from] std::io::Error),
}

/// The vendor database backing [`VendorDb::lookup`].
pub enum VendorDb {
    /// Parsed from an operator-supplied prefix file.
    Table(HashMap<String, String>),
    /// The database shipped inside `mac_oui`.
    Embedded(Box<Oui>),
    /// No vendor data available; every lookup yields "".
    Empty,
}

impl VendorDb {
    /// Loads the vendor table, preferring the on-disk file. A missing file
    /// is not an error: the embedded database takes over, and if that is
    /// unavailable too, lookups silently yield empty names.
    pub fn load(path: &Path) -> Self {
        if path.exists() {
            match Self::from_file(path) {
                Ok(db) => return db,
                Err(e) => warn!("ignoring vendor file {}: {e}", path.display()),
            }
        } else {
            info!(
                "{} not found, falling back to the embedded OUI database",
                path.display()
            );
        }

        match Oui::default() {
            Ok(oui) => VendorDb::Embedded(Box::new(oui)),
            Err(e) => {
                warn!("embedded OUI database unavailable: {e}");
                VendorDb::Empty
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, VendorDbError> {
        let text = std::fs::read_to_string(path)?;
        Ok(Self::from_lines(&text))
    }

    /// One mapping per line: a 6-hex-digit prefix (separators tolerated,
    /// case ignored), whitespace, then the manufacturer name. Lines that do
    /// not fit are skipped rather than rejected.
    pub fn from_lines(text: &str) -> Self {
        let mut entries = HashMap::new();
        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((key, name)) = line.split_once(char::is_whitespace) else {
                continue;
            };
            let Some(prefix) = normalize_prefix(key) else {
                debug!("skipping malformed OUI line: {line}");
                continue;
            };
            entries.insert(prefix, name.trim().to_string());
        }
        VendorDb::Table(entries)
    }

    /// Pure prefix lookup; a miss is a normal, silent outcome.
    pub fn lookup_prefix(&self, prefix: &str) -> String {
        let Some(prefix) = normalize_prefix(prefix) else {
            return String::new();
        };
        match self {
            VendorDb::Table(entries) => entries.get(&prefix).cloned().unwrap_or_default(),
            VendorDb::Embedded(oui) => {
                // mac_oui only resolves full addresses; pad the prefix out.
                let padded = format!(
                    "{}:{}:{}:00:00:00",
                    &prefix[0..2],
                    &prefix[2..4],
                    &prefix[4..6]
                );
                match oui.lookup_by_mac(&padded) {
                    Ok(Some(entry)) => entry.company_name.clone(),
                    _ => String::new(),
                }
            }
            VendorDb::Empty => String::new(),
        }
    }

    /// Vendor of a resolved hardware address.
    pub fn lookup(&self, mac_addr: MacAddr) -> String {
        self.lookup_prefix(&mac::vendor_prefix(mac_addr))
    }
}

/// Uppercases a prefix key and strips `:`/`-`/`.`; anything that does not
/// leave exactly six hex digits is rejected.
fn normalize_prefix(key: &str) -> Option<String> {
    let digits: String = key
        .chars()
        .filter(|ch| !matches!(ch, ':' | '-' | '.'))
        .collect();
    if digits.len() != 6 || !digits.chars().all(|ch| ch.is_ascii_hexdigit()) {
        return None;
    }
    Some(digits.to_ascii_uppercase())
}
