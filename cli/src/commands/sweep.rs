use std::sync::Arc;
use std::time::{Duration, Instant};

use colored::*;
use sweepr_common::config::NamedRange;
use sweepr_common::vendors::VendorDb;
use sweepr_core::probe::icmp::IcmpBackend;
use sweepr_core::{report, scanner};

use crate::terminal::{print, spinner, table};

/// One full sweep of a named range: probe, order, render.
pub async fn run(
    named: &NamedRange,
    timeout: Duration,
    vendors: Arc<VendorDb>,
) -> anyhow::Result<()> {
    print::header(&format!("sweeping {}", named.name));

    let spinner = spinner::start(format!(
        "probing {} addresses in {}",
        named.range.len(),
        named.range
    ));

    let started = Instant::now();
    let backend = Arc::new(IcmpBackend);
    let mut reports = scanner::sweep(named.range, timeout, vendors, backend).await;
    let elapsed = started.elapsed();

    spinner.finish_and_clear();

    if reports.is_empty() {
        print::status("no hosts answered");
        return Ok(());
    }

    report::sort_reports(&mut reports);
    table::render(&reports);
    print_summary(reports.len(), elapsed);
    Ok(())
}

fn print_summary(count: usize, elapsed: Duration) {
    let hosts = format!("{count} live hosts").green().bold();
    let took = format!("{:.2}s", elapsed.as_secs_f64()).yellow();
    println!();
    println!("Sweep complete: {hosts} in {took}");
}
