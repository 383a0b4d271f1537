#![cfg(test)]
//! Engine-level tests against a deterministic stub backend: no sockets, no
//! privileges, reproducible interleavings.

use std::collections::HashMap;
use std::net::Ipv4Addr;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use pnet::util::MacAddr;
use sweepr_common::network::range::{Ipv4Range, RangeError};
use sweepr_common::vendors::VendorDb;
use sweepr_core::probe::ProbeBackend;
use sweepr_core::{report, scanner};

/// Fixed reachability map; counts echoes so tests can assert exactly one
/// probe per address.
struct StubBackend {
    alive: HashMap<Ipv4Addr, (Duration, Option<MacAddr>)>,
    echoes: AtomicUsize,
}

impl StubBackend {
    fn new(alive: impl IntoIterator<Item = (Ipv4Addr, (Duration, Option<MacAddr>))>) -> Self {
        Self {
            alive: alive.into_iter().collect(),
            echoes: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl ProbeBackend for StubBackend {
    async fn echo(&self, addr: Ipv4Addr, _timeout: Duration) -> anyhow::Result<Option<Duration>> {
        self.echoes.fetch_add(1, Ordering::Relaxed);
        Ok(self.alive.get(&addr).map(|(rtt, _)| *rtt))
    }

    async fn resolve_mac(&self, addr: Ipv4Addr) -> Option<MacAddr> {
        self.alive.get(&addr).and_then(|(_, mac)| *mac)
    }
}

/// Stub whose probing handle cannot be opened for one address.
struct FaultyBackend {
    inner: StubBackend,
    broken: Ipv4Addr,
}

#[async_trait]
impl ProbeBackend for FaultyBackend {
    async fn echo(&self, addr: Ipv4Addr, timeout: Duration) -> anyhow::Result<Option<Duration>> {
        if addr == self.broken {
            anyhow::bail!("no raw socket for {addr}");
        }
        self.inner.echo(addr, timeout).await
    }

    async fn resolve_mac(&self, addr: Ipv4Addr) -> Option<MacAddr> {
        self.inner.resolve_mac(addr).await
    }
}

fn addr(d: u8) -> Ipv4Addr {
    Ipv4Addr::new(192, 168, 0, d)
}

#[tokio::test]
async fn end_to_end_example_sweep() {
    let vendors = Arc::new(VendorDb::from_lines("AA0000 Acme\nBB0000 Beta\n"));
    let backend = Arc::new(StubBackend::new([
        (
            addr(1),
            (Duration::from_millis(5), Some(MacAddr::new(0xAA, 0, 0, 0, 0, 1))),
        ),
        (
            addr(3),
            (Duration::from_millis(7), Some(MacAddr::new(0xBB, 0, 0, 0, 0, 3))),
        ),
    ]));

    let range = Ipv4Range::new(addr(1), addr(3)).unwrap();
    let mut reports = scanner::sweep(range, Duration::from_millis(500), vendors, backend).await;
    report::sort_reports(&mut reports);

    assert_eq!(reports.len(), 2, "unreachable .2 must not appear");
    assert_eq!(reports[0].addr, addr(1));
    assert_eq!(reports[0].rtt_ms, 5);
    assert_eq!(reports[0].vendor, "Acme");
    assert_eq!(reports[1].addr, addr(3));
    assert_eq!(reports[1].rtt_ms, 7);
    assert_eq!(reports[1].vendor, "Beta");
}

#[tokio::test]
async fn concurrent_fanout_loses_nothing() {
    // Even last octets answer, odd ones never do.
    let alive: Vec<_> = (0u8..=255)
        .filter(|d| d % 2 == 0)
        .map(|d| {
            (
                Ipv4Addr::new(10, 0, 0, d),
                (Duration::from_millis(d as u64), None),
            )
        })
        .collect();
    let backend = Arc::new(StubBackend::new(alive));
    let vendors = Arc::new(VendorDb::Empty);

    let range = Ipv4Range::new(Ipv4Addr::new(10, 0, 0, 0), Ipv4Addr::new(10, 0, 0, 255)).unwrap();
    let mut reports = scanner::sweep(
        range,
        Duration::from_millis(100),
        vendors,
        backend.clone(),
    )
    .await;

    assert_eq!(
        backend.echoes.load(Ordering::Relaxed),
        256,
        "exactly one echo per address"
    );
    assert_eq!(reports.len(), 128, "no lost or duplicated results");

    report::sort_reports(&mut reports);
    for (i, probe_report) in reports.iter().enumerate() {
        assert_eq!(probe_report.addr, Ipv4Addr::new(10, 0, 0, (i * 2) as u8));
        assert_eq!(probe_report.rtt_ms, (i * 2) as u64);
    }
}

#[tokio::test]
async fn repeated_failing_probes_never_surface() {
    let backend = Arc::new(StubBackend::new([]));
    let vendors = Arc::new(VendorDb::Empty);
    let range = Ipv4Range::new(addr(1), addr(20)).unwrap();

    for _ in 0..3 {
        let reports = scanner::sweep(
            range,
            Duration::from_millis(50),
            vendors.clone(),
            backend.clone(),
        )
        .await;
        assert!(reports.is_empty());
    }
}

#[tokio::test]
async fn handle_failure_skips_only_that_address() {
    let inner = StubBackend::new([
        (addr(1), (Duration::from_millis(2), None)),
        (addr(2), (Duration::from_millis(3), None)),
        (addr(3), (Duration::from_millis(4), None)),
    ]);
    let backend = Arc::new(FaultyBackend {
        inner,
        broken: addr(2),
    });
    let vendors = Arc::new(VendorDb::Empty);

    let range = Ipv4Range::new(addr(1), addr(3)).unwrap();
    let mut reports = scanner::sweep(range, Duration::from_millis(100), vendors, backend).await;
    report::sort_reports(&mut reports);

    let addrs: Vec<Ipv4Addr> = reports.iter().map(|r| r.addr).collect();
    assert_eq!(addrs, [addr(1), addr(3)]);
}

#[tokio::test]
async fn live_host_without_mac_is_reported_as_unavailable() {
    let backend = Arc::new(StubBackend::new([(
        addr(9),
        (Duration::from_millis(11), None),
    )]));
    let vendors = Arc::new(VendorDb::from_lines("AA0000 Acme\n"));

    let range = Ipv4Range::new(addr(9), addr(9)).unwrap();
    let reports = scanner::sweep(range, Duration::from_millis(100), vendors, backend).await;

    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].mac, None);
    assert_eq!(reports[0].mac_display(), "N/A");
    assert_eq!(reports[0].vendor, "");
}

#[test]
fn malformed_range_never_reaches_the_scanner() {
    // Range validation happens before a sweep can be constructed, so a
    // cross-octet boundary means zero probes and zero network calls.
    let err = Ipv4Range::new(Ipv4Addr::new(10, 0, 0, 5), Ipv4Addr::new(10, 0, 1, 9)).unwrap_err();
    assert!(matches!(err, RangeError::SubnetMismatch { .. }));
}
