//! ARP neighbor resolution over a raw `pnet` datalink channel.
//!
//! One request is broadcast on the interface that shares a subnet with the
//! target, then the channel is read until the matching reply or a fixed
//! deadline. An unresolved MAC is a normal outcome, not an error.

use std::net::Ipv4Addr;
use std::time::{Duration, Instant};

use anyhow::{Context, bail};
use pnet::datalink::{self, Channel, NetworkInterface};
use pnet::packet::arp::{ArpHardwareTypes, ArpOperations, ArpPacket, MutableArpPacket};
use pnet::packet::ethernet::{EtherTypes, EthernetPacket, MutableEthernetPacket};
use pnet::packet::{MutablePacket, Packet};
use pnet::util::MacAddr;
use tracing::debug;

const RESOLVE_TIMEOUT: Duration = Duration::from_secs(2);
/// Channel read timeout, so the reply loop can observe the deadline.
const READ_TIMEOUT: Duration = Duration::from_millis(100);

/// Resolves the hardware address behind `target`, or `None` when the host
/// does not answer or no local interface shares its subnet.
pub fn resolve(target: Ipv4Addr) -> Option<MacAddr> {
    match try_resolve(target) {
        Ok(mac_addr) => mac_addr,
        Err(e) => {
            debug!("ARP resolution for {target} failed: {e:#}");
            None
        }
    }
}

fn try_resolve(target: Ipv4Addr) -> anyhow::Result<Option<MacAddr>> {
    let intf = subnet_interface(target)
        .with_context(|| format!("no interface shares a subnet with {target}"))?;
    let source_mac = intf.mac.context("interface has no MAC address")?;
    let source_ip = interface_ipv4(&intf).context("interface has no IPv4 address")?;

    let config = datalink::Config {
        read_timeout: Some(READ_TIMEOUT),
        ..Default::default()
    };
    let (mut tx, mut rx) = match datalink::channel(&intf, config) {
        Ok(Channel::Ethernet(tx, rx)) => (tx, rx),
        Ok(_) => bail!("unsupported datalink channel type"),
        Err(e) => return Err(e).context("opening datalink channel"),
    };

    let request = build_request(source_mac, source_ip, target)?;
    match tx.send_to(&request, None) {
        Some(Ok(())) => {}
        Some(Err(e)) => return Err(e).context("sending ARP request"),
        None => bail!("datalink sender refused the frame"),
    }

    let deadline = Instant::now() + RESOLVE_TIMEOUT;
    while Instant::now() < deadline {
        match rx.next() {
            Ok(frame) => {
                if let Some(mac_addr) = reply_from(frame, target, source_mac) {
                    return Ok(Some(mac_addr));
                }
            }
            // A read timeout just means nothing has arrived yet.
            Err(e) if matches!(e.kind(), std::io::ErrorKind::TimedOut | std::io::ErrorKind::WouldBlock) => {
                continue;
            }
            Err(e) => return Err(e).context("reading from datalink channel"),
        }
    }
    Ok(None)
}

fn build_request(
    source_mac: MacAddr,
    source_ip: Ipv4Addr,
    target: Ipv4Addr,
) -> anyhow::Result<Vec<u8>> {
    let mut ethernet_buffer = [0u8; 42];
    let mut ethernet_packet =
        MutableEthernetPacket::new(&mut ethernet_buffer).context("ethernet buffer too small")?;
    ethernet_packet.set_destination(MacAddr::broadcast());
    ethernet_packet.set_source(source_mac);
    ethernet_packet.set_ethertype(EtherTypes::Arp);

    let mut arp_buffer = [0u8; 28];
    let mut arp_packet =
        MutableArpPacket::new(&mut arp_buffer).context("arp buffer too small")?;
    arp_packet.set_hardware_type(ArpHardwareTypes::Ethernet);
    arp_packet.set_protocol_type(EtherTypes::Ipv4);
    arp_packet.set_hw_addr_len(6);
    arp_packet.set_proto_addr_len(4);
    arp_packet.set_operation(ArpOperations::Request);
    arp_packet.set_sender_hw_addr(source_mac);
    arp_packet.set_sender_proto_addr(source_ip);
    arp_packet.set_target_hw_addr(MacAddr::zero());
    arp_packet.set_target_proto_addr(target);

    ethernet_packet.set_payload(arp_packet.packet_mut());
    Ok(ethernet_packet.packet().to_vec())
}

fn reply_from(frame: &[u8], target: Ipv4Addr, our_mac: MacAddr) -> Option<MacAddr> {
    let ethernet_packet = EthernetPacket::new(frame)?;
    if ethernet_packet.get_ethertype() != EtherTypes::Arp {
        return None;
    }
    let arp_packet = ArpPacket::new(ethernet_packet.payload())?;
    if arp_packet.get_operation() == ArpOperations::Reply
        && arp_packet.get_sender_proto_addr() == target
        && arp_packet.get_target_hw_addr() == our_mac
    {
        return Some(arp_packet.get_sender_hw_addr());
    }
    None
}

fn subnet_interface(target: Ipv4Addr) -> Option<NetworkInterface> {
    datalink::interfaces()
        .into_iter()
        .filter(|intf| intf.is_up() && !intf.is_loopback() && intf.mac.is_some())
        .find(|intf| intf.ips.iter().any(|net| net.contains(target.into())))
}

fn interface_ipv4(intf: &NetworkInterface) -> Option<Ipv4Addr> {
    intf.ips.iter().find_map(|net| match net.ip() {
        std::net::IpAddr::V4(addr) => Some(addr),
        _ => None,
    })
}
