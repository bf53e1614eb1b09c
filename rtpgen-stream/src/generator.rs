//! Packet stream generator
//!
//! Owns the run's random state, the shared payload buffer and the send
//! loop. One generator produces one bounded stream: a randomized total
//! number of packets, paced at a fixed 30ms interval, all sharing one
//! payload and one source port.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rtpgen_core::{Error, MacAddr, Result, StreamConfig};
use rtpgen_packet::PacketBuilder;
use std::net::Ipv4Addr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};
use tracing::{debug, info};

use crate::transport::{routed_source, LinkTransport, RawIpTransport, Transport};

/// Payload buffer size in bytes
pub const PAYLOAD_LEN: usize = 200;

/// Declared IPv4 total-length field value, independent of actual size
pub const DECLARED_IP_LENGTH: u16 = 240;

/// Declared UDP length field value, independent of actual size
pub const DECLARED_UDP_LENGTH: u16 = 220;

/// RTP payload type (8 = PCMA, a generic audio payload)
pub const RTP_PAYLOAD_TYPE: u8 = 8;

/// Fixed synchronization source identifier
pub const RTP_SSRC: u32 = 1;

/// Fixed inter-packet interval (caps throughput at ~33 packets/sec)
pub const SEND_INTERVAL: Duration = Duration::from_millis(30);

/// Random source-port range when no fixed port is configured
const SOURCE_PORT_RANGE: std::ops::Range<u16> = 10000..65535;

/// Statistics for a completed (or interrupted) run
#[derive(Debug, Clone, Default)]
pub struct StreamStats {
    /// Packets sent
    pub packets_sent: u64,
    /// Bytes sent
    pub bytes_sent: u64,
    /// Wall-clock duration of the send loop
    pub duration: Duration,
}

/// RTP packet stream generator
///
/// The generator owns its random source so runs can be made
/// deterministic in tests via [`with_rng`] and a seeded generator.
///
/// [`with_rng`]: StreamGenerator::with_rng
pub struct StreamGenerator<R: Rng = StdRng> {
    config: StreamConfig,
    rng: R,
}

impl StreamGenerator<StdRng> {
    /// Create a generator with entropy-seeded random state
    pub fn new(config: StreamConfig) -> Self {
        Self {
            config,
            rng: StdRng::from_entropy(),
        }
    }
}

impl<R: Rng> StreamGenerator<R> {
    /// Create a generator with an injected random source
    pub fn with_rng(config: StreamConfig, rng: R) -> Self {
        Self { config, rng }
    }

    /// Run the stream against the configured transport
    ///
    /// Opens a link-layer channel when an egress interface is configured,
    /// a raw IP socket otherwise, and drives the send loop until the
    /// drawn total is reached or `stop` goes true. The transport is
    /// released when this returns, on every path.
    pub fn run(&mut self, stop: &AtomicBool) -> Result<StreamStats> {
        match self.config.interface.clone() {
            Some(ref name) => {
                let mut transport = LinkTransport::new(name)?;
                let mac = transport.mac();
                debug!("Using link-layer path on '{}' ({})", name, mac);
                // The datalink channel bypasses routing, so nothing fills
                // in an unspecified IP source; use the interface's own.
                if self.config.source_ip.is_none() {
                    self.config.source_ip = transport.source_ipv4();
                }
                self.run_with(Some(mac), |packet| transport.send(packet), stop)
            }
            None => {
                // The kernel rewrites an unspecified source after our
                // checksum is already in the packet, so pin the routed
                // source before building anything.
                let source_ip = match self.config.source_ip {
                    Some(ip) => ip,
                    None => routed_source(self.config.destination, self.config.destination_port)?,
                };
                self.config.source_ip = Some(source_ip);

                let mut transport = RawIpTransport::new(self.config.destination)?;
                debug!("Using network-layer path via raw socket, source {}", source_ip);
                self.run_with(None, |packet| transport.send(packet), stop)
            }
        }
    }

    /// Run the stream against an arbitrary send function
    ///
    /// `link_source` switches on the link-layer framing: when set, every
    /// packet is wrapped in an Ethernet II frame sourced from that MAC
    /// and addressed to broadcast. A send failure aborts the remaining
    /// run; a stop-token interruption returns normally with the partial
    /// count.
    pub fn run_with<F>(
        &mut self,
        link_source: Option<MacAddr>,
        mut send: F,
        stop: &AtomicBool,
    ) -> Result<StreamStats>
    where
        F: FnMut(&[u8]) -> Result<()>,
    {
        self.config.validate()?;

        // Drawn once, reused unmodified for every packet of the run.
        let payload = self.draw_payload();
        let total = self.draw_total();
        let source_port = match self.config.source_port {
            Some(port) => port,
            None => self.rng.gen_range(SOURCE_PORT_RANGE),
        };

        info!(
            "Sending {} packets to {}:{}",
            total, self.config.destination, self.config.destination_port
        );

        let source_ip = self.config.source_ip.unwrap_or(Ipv4Addr::UNSPECIFIED);
        let start = Instant::now();
        let mut stats = StreamStats::default();

        for i in 1..=total {
            if stop.load(Ordering::Relaxed) {
                info!("Stream interrupted after {} packets", stats.packets_sent);
                break;
            }

            let mut builder = PacketBuilder::new();
            if let Some(mac) = link_source {
                builder = builder.ethernet(mac, MacAddr::broadcast());
            }

            let packet = builder
                .ipv4(source_ip, self.config.destination)
                .ip_total_length(DECLARED_IP_LENGTH)
                .udp(source_port, self.config.destination_port)
                .udp_length(DECLARED_UDP_LENGTH)
                .rtp(RTP_PAYLOAD_TYPE, sequence_number(i), wall_clock(), RTP_SSRC)
                .payload(payload.clone())
                .build()?;

            send(&packet)
                .map_err(|e| Error::Transmission(format!("packet {}: {}", i, e)))?;

            stats.packets_sent += 1;
            stats.bytes_sent += packet.len() as u64;

            std::thread::sleep(SEND_INTERVAL);
        }

        stats.duration = start.elapsed();
        Ok(stats)
    }

    /// Draw the run's payload buffer: independently random bytes
    fn draw_payload(&mut self) -> Vec<u8> {
        let mut payload = vec![0u8; PAYLOAD_LEN];
        self.rng.fill(&mut payload[..]);
        payload
    }

    /// Draw the total packet count from the half-open configured range
    fn draw_total(&mut self) -> u64 {
        self.rng.gen_range(self.config.min_count..self.config.max_count)
    }
}

/// RTP sequence number for a 1-based packet index, wrapping modulo 65536
fn sequence_number(index: u64) -> u16 {
    (index & 0xFFFF) as u16
}

/// Current wall-clock time in whole seconds, as the RTP timestamp
fn wall_clock() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as u32)
        .unwrap_or(0)
}
