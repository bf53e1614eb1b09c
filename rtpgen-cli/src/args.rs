//! CLI argument parsing

use clap::Parser;
use rtpgen_core::{DEFAULT_DESTINATION_PORT, DEFAULT_MAX_COUNT, DEFAULT_MIN_COUNT};
use std::net::Ipv4Addr;

#[derive(Parser, Debug)]
#[command(name = "rtpgen")]
#[command(version, about = "Synthetic RTP traffic generator", long_about = None)]
pub struct Cli {
    /// Destination hostname or IP for the RTP stream
    #[arg(short = 'H', long)]
    pub destination_host: String,

    /// Destination port for the RTP stream
    #[arg(long, default_value_t = DEFAULT_DESTINATION_PORT)]
    pub destination_port: u16,

    /// Source IP for the RTP stream. If not specified, the kernel will
    /// auto-select.
    #[arg(short = 'S', long)]
    pub source_ip: Option<Ipv4Addr>,

    /// Source port for the RTP stream. If not specified, one random port
    /// is drawn for the whole run.
    #[arg(long)]
    pub source_port: Option<u16>,

    /// Source interface for the RTP stream; enables the link-layer send
    /// path. If not specified, the kernel routes normally.
    #[arg(long)]
    pub source_interface: Option<String>,

    /// Minimum number of packets to send
    #[arg(short = 'C', long, default_value_t = DEFAULT_MIN_COUNT)]
    pub min_count: u64,

    /// Maximum number of packets to send
    #[arg(long, default_value_t = DEFAULT_MAX_COUNT)]
    pub max_count: u64,

    /// Verbose output (-v, -vv for increasing verbosity)
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
