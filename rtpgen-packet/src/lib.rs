//! Packet construction library for rtpgen
//!
//! This crate builds the three protocol layers a generated RTP packet is
//! made of, plus the optional link-layer frame:
//!
//! - **Ethernet II frames** for the link-layer send path
//! - **IPv4** packets with header construction and checksum calculation
//! - **UDP** datagrams with pseudo-header checksum
//! - **RTP** fixed 12-byte headers (RFC 3550, header fields only)
//!
//! Length fields on the IPv4 and UDP layers can be pinned to declared
//! values independent of the actual encoded size, which the generator
//! relies on. Checksums are always computed fresh over the assembled
//! bytes.
//!
//! # Quick Start
//!
//! ```rust
//! use std::net::Ipv4Addr;
//! use rtpgen_packet::PacketBuilder;
//!
//! let packet = PacketBuilder::new()
//!     .ipv4(Ipv4Addr::new(192, 168, 1, 1), Ipv4Addr::new(192, 168, 1, 2))
//!     .udp(10500, 6100)
//!     .rtp(8, 1, 0x1122_3344, 1)
//!     .payload(vec![0xab; 200])
//!     .build()
//!     .unwrap();
//! ```

pub mod builder;
pub mod checksum;
pub mod ethernet;
pub mod ip;
pub mod rtp;
pub mod udp;

// Re-export commonly used types for convenience
pub use builder::PacketBuilder;
pub use checksum::{internet_checksum, transport_checksum};
pub use ethernet::{EtherType, EthernetFrame};
pub use ip::{IpProtocol, Ipv4Packet};
pub use rtp::RtpHeader;
pub use udp::UdpDatagram;
