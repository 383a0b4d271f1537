use std::io::{self, Write};

use anyhow::{Context, bail};
use sweepr_common::config::{Config, NamedRange};

/// Lists the configured ranges and reads the operator's pick from stdin.
pub fn choose_range(config: &Config) -> anyhow::Result<NamedRange> {
    if config.ranges.is_empty() {
        bail!("config file defines no ranges");
    }

    println!("Configured ranges:");
    for named in &config.ranges {
        println!("  {} ({})", named.name, named.range);
    }
    print!("Enter the range name to ping: ");
    io::stdout().flush().context("flushing stdout")?;

    let mut line = String::new();
    io::stdin()
        .read_line(&mut line)
        .context("reading range name")?;
    let name = line.trim();

    config
        .find_range(name)
        .cloned()
        .with_context(|| format!("range '{name}' not found in config file"))
}
