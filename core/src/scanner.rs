//! Range orchestration: one probe task per address, a shared result store,
//! and a join-all barrier before anything is returned.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use sweepr_common::network::range::Ipv4Range;
use sweepr_common::vendors::VendorDb;
use tokio::task::JoinSet;
use tracing::{debug, error};

use crate::probe::{self, ProbeBackend};
use crate::report::ProbeReport;

/// Probes every address in `range` concurrently and returns the unordered
/// set of reports for the hosts that answered.
///
/// Every address gets its own task and all of them are spawned before any
/// is awaited; the runtime multiplexes them over its worker threads, which
/// keeps per-address independence without a thread per address. The result
/// vector is the only shared mutable state, and its lock is held just for
/// the push. Probes race freely; ordering is imposed afterwards by
/// [`crate::report::sort_reports`].
///
/// The sweep returns only once every probe has finished. There is no
/// overall deadline and no way to abort in flight; a probe's own timeout is
/// the only timeout in play.
pub async fn sweep(
    range: Ipv4Range,
    timeout: Duration,
    vendors: Arc<VendorDb>,
    backend: Arc<dyn ProbeBackend>,
) -> Vec<ProbeReport> {
    let results: Arc<Mutex<Vec<ProbeReport>>> = Arc::new(Mutex::new(Vec::new()));
    let mut tasks = JoinSet::new();

    debug!("sweeping {} addresses in {range}", range.len());
    for addr in range.iter() {
        let vendors = Arc::clone(&vendors);
        let backend = Arc::clone(&backend);
        let results = Arc::clone(&results);
        tasks.spawn(async move {
            if let Some(report) = probe::probe(backend.as_ref(), &vendors, addr, timeout).await {
                results.lock().unwrap().push(report);
            }
        });
    }

    // Join-all barrier: once this loop ends there are no writers left.
    while let Some(joined) = tasks.join_next().await {
        if let Err(e) = joined {
            error!("probe task failed: {e}");
        }
    }

    let mut results = results.lock().unwrap();
    std::mem::take(&mut *results)
}
