mod commands;
mod terminal;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use sweepr_common::config::{Config, ConfigError};
use sweepr_common::success;
use sweepr_common::vendors::VendorDb;
use tracing::warn;

use commands::{CommandLine, sweep};
use terminal::{logging, prompt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = CommandLine::parse_args();
    logging::init();

    if !is_root::is_root() {
        warn!("not running as root; raw ICMP and ARP sockets will likely be refused");
    }

    let config = match Config::load(&args.config) {
        Ok(config) => config,
        Err(ConfigError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
            Config::write_default(&args.config)
                .with_context(|| format!("writing {}", args.config.display()))?;
            success!(
                "default config written to {}; edit it and rerun",
                args.config.display()
            );
            return Ok(());
        }
        Err(e) => return Err(e).context("loading config"),
    };

    let timeout = match args.timeout {
        Some(ms) => {
            anyhow::ensure!(ms > 0, "--timeout must be a positive number of milliseconds");
            Duration::from_millis(ms)
        }
        None => config.ping_timeout,
    };

    let named = match &args.range {
        Some(name) => config
            .find_range(name)
            .cloned()
            .with_context(|| format!("range '{name}' not found in config file"))?,
        None => prompt::choose_range(&config)?,
    };

    let vendors = Arc::new(VendorDb::load(&args.oui));

    sweep::run(&named, timeout, vendors).await
}
