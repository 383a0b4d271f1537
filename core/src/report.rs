use std::net::Ipv4Addr;

use pnet::util::MacAddr;
use sweepr_common::network::mac;

/// One reachable address, as shown in the final table. Addresses that never
/// answered the echo have no report at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeReport {
    pub addr: Ipv4Addr,
    /// Echo round trip, rounded down to whole milliseconds.
    pub rtt_ms: u64,
    /// `None` when neighbor resolution failed for an otherwise live host.
    pub mac: Option<MacAddr>,
    /// Manufacturer derived from the OUI prefix; "" when unknown.
    pub vendor: String,
}

impl ProbeReport {
    /// The hardware address column value: formatted MAC or the `N/A` marker.
    pub fn mac_display(&self) -> String {
        match self.mac {
            Some(mac_addr) => mac::format_mac(mac_addr),
            None => mac::MAC_UNAVAILABLE.to_string(),
        }
    }
}

/// Orders reports by the numeric value of the address, so `10.0.0.9` comes
/// before `10.0.0.10`. `Ipv4Addr` already compares its four octets as
/// integers, which is exactly the order the table wants.
pub fn sort_reports(reports: &mut [ProbeReport]) {
    reports.sort_by_key(|report| report.addr);
}
