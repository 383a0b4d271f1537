//! A single probe: one reachability check plus one neighbor resolution,
//! behind the [`ProbeBackend`] seam so the engine runs against stub
//! backends in tests.

use std::net::Ipv4Addr;
use std::time::Duration;

use async_trait::async_trait;
use pnet::util::MacAddr;
use sweepr_common::vendors::VendorDb;
use tracing::error;

use crate::report::ProbeReport;

pub mod arp;
pub mod icmp;

/// The network seam of a single probe. Implemented by the ICMP/ARP stack in
/// production and by deterministic stubs in tests.
#[async_trait]
pub trait ProbeBackend: Send + Sync {
    /// One echo request against `addr`, waiting up to `timeout`.
    ///
    /// `Ok(None)` means the host never answered (or the transport errored
    /// mid-flight) and is simply treated as unreachable. `Err` is reserved
    /// for failing to acquire the probing handle in the first place.
    async fn echo(&self, addr: Ipv4Addr, timeout: Duration) -> anyhow::Result<Option<Duration>>;

    /// Neighbor resolution for `addr`; `None` when the hardware address
    /// cannot be determined.
    async fn resolve_mac(&self, addr: Ipv4Addr) -> Option<MacAddr>;
}

/// Reachability and identity for exactly one address.
///
/// A live host always yields a report: failed neighbor resolution degrades
/// the hardware address to "not available" rather than dropping the host.
/// A probe that cannot open its handle is logged and skipped without
/// touching its siblings. No retries anywhere.
pub async fn probe(
    backend: &dyn ProbeBackend,
    vendors: &VendorDb,
    addr: Ipv4Addr,
    timeout: Duration,
) -> Option<ProbeReport> {
    let rtt = match backend.echo(addr, timeout).await {
        Ok(Some(rtt)) => rtt,
        Ok(None) => return None,
        Err(e) => {
            error!("skipping {addr}: {e:#}");
            return None;
        }
    };

    let mac_addr = backend.resolve_mac(addr).await;
    let vendor = mac_addr
        .map(|mac_addr| vendors.lookup(mac_addr))
        .unwrap_or_default();

    Some(ProbeReport {
        addr,
        rtt_ms: rtt.as_millis() as u64,
        mac: mac_addr,
        vendor,
    })
}
