use pnet::util::MacAddr;

/// Rendered in place of a hardware address that could not be resolved.
pub const MAC_UNAVAILABLE: &str = "N/A";

/// Formats a MAC the way the report table expects it: uppercase hex pairs
/// joined by dashes (`AA-BB-CC-DD-EE-FF`).
pub fn format_mac(mac: MacAddr) -> String {
    let MacAddr(a, b, c, d, e, f) = mac;
    format!("{a:02X}-{b:02X}-{c:02X}-{d:02X}-{e:02X}-{f:02X}")
}

/// The OUI part of a MAC: its first three bytes as six uppercase hex digits.
pub fn vendor_prefix(mac: MacAddr) -> String {
    let MacAddr(a, b, c, ..) = mac;
    format!("{a:02X}{b:02X}{c:02X}")
}
