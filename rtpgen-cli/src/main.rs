//! rtpgen binary
//!
//! Parses arguments, resolves the destination once, wires SIGINT to the
//! generator's stop token and runs the stream to completion.

mod args;

use args::Cli;
use rtpgen_core::{resolve_destination, Result, StreamConfig};
use rtpgen_stream::StreamGenerator;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse_args();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        error!("{}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let destination = resolve_destination(&cli.destination_host)?;

    let mut config = StreamConfig::new(destination)
        .with_destination_port(cli.destination_port)
        .with_count_bounds(cli.min_count, cli.max_count);
    if let Some(ip) = cli.source_ip {
        config = config.with_source_ip(ip);
    }
    if let Some(port) = cli.source_port {
        config = config.with_source_port(port);
    }
    if let Some(ref name) = cli.source_interface {
        config = config.with_interface(name.clone());
    }
    config.validate()?;

    let stop = install_sigint_token();

    let mut generator = StreamGenerator::new(config);
    let stats = generator.run(&stop)?;

    info!(
        "Done: {} packets ({} bytes) in {:.1}s",
        stats.packets_sent,
        stats.bytes_sent,
        stats.duration.as_secs_f64()
    );
    Ok(())
}

/// Install a SIGINT handler that flips the stop token
///
/// The send loop checks the token once per iteration, so Ctrl+C ends the
/// run cleanly after the in-flight packet.
fn install_sigint_token() -> Arc<AtomicBool> {
    let stop = Arc::new(AtomicBool::new(false));

    let handler_stop = stop.clone();
    std::thread::spawn(move || {
        let mut signals = match signal_hook::iterator::Signals::new([signal_hook::consts::SIGINT])
        {
            Ok(signals) => signals,
            Err(e) => {
                error!("Failed to register signal handler: {}", e);
                return;
            }
        };
        if signals.forever().next().is_some() {
            info!("Received Ctrl+C, stopping after current packet");
            handler_stop.store(true, Ordering::Relaxed);
        }
    });

    stop
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();
}
