pub mod sweep;

use std::path::PathBuf;

use clap::Parser;

#[derive(Parser)]
#[command(name = "sweepr")]
#[command(about = "Sweep a configured IPv4 range and identify what answered.")]
pub struct CommandLine {
    /// Name of the configured range to sweep; prompted for when omitted.
    pub range: Option<String>,

    /// Range definition file.
    #[arg(long, default_value = "config.txt", value_name = "PATH")]
    pub config: PathBuf,

    /// OUI prefix to manufacturer table.
    #[arg(long, default_value = "oui.txt", value_name = "PATH")]
    pub oui: PathBuf,

    /// Per-probe echo timeout in milliseconds; overrides the config value.
    #[arg(long, value_name = "MS")]
    pub timeout: Option<u64>,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
