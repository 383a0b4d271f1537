//! Production probe backend: `surge-ping` echoes plus raw ARP resolution.

use std::net::{IpAddr, Ipv4Addr};
use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use pnet::util::MacAddr;
use rand::random;
use surge_ping::{Client, Config, IcmpPacket, PingIdentifier, PingSequence};

use super::{ProbeBackend, arp};

/// The classic fixed 32-byte echo payload.
const ECHO_PAYLOAD: [u8; 32] = [0; 32];

/// Probes with one raw ICMP socket per call; handles are not pooled, so a
/// probe that fails to open one never affects another.
pub struct IcmpBackend;

#[async_trait]
impl ProbeBackend for IcmpBackend {
    async fn echo(&self, addr: Ipv4Addr, timeout: Duration) -> anyhow::Result<Option<Duration>> {
        let client = Client::new(&Config::default())
            .with_context(|| format!("opening ICMP socket for {addr}"))?;

        let mut pinger = client.pinger(IpAddr::V4(addr), PingIdentifier(random())).await;
        pinger.timeout(timeout);

        match pinger.ping(PingSequence(0), &ECHO_PAYLOAD).await {
            Ok((IcmpPacket::V4(_), rtt)) => Ok(Some(rtt)),
            // Timeouts, odd replies and transport errors all read as "not
            // alive"; there is no retry.
            Ok(_) | Err(_) => Ok(None),
        }
    }

    async fn resolve_mac(&self, addr: Ipv4Addr) -> Option<MacAddr> {
        // pnet datalink channels are synchronous; keep them off the runtime.
        tokio::task::spawn_blocking(move || arp::resolve(addr))
            .await
            .ok()
            .flatten()
    }
}
