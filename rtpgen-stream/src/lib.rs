//! RTP stream generation for rtpgen
//!
//! The [`StreamGenerator`] owns the packet template parameters, the
//! random state and the send loop; [`transport`] provides the two egress
//! paths (network-layer raw socket and link-layer channel).

pub mod generator;
pub mod transport;

pub use generator::{
    StreamGenerator, StreamStats, DECLARED_IP_LENGTH, DECLARED_UDP_LENGTH, PAYLOAD_LEN,
    RTP_PAYLOAD_TYPE, RTP_SSRC, SEND_INTERVAL,
};
pub use transport::{routed_source, LinkTransport, RawIpTransport, Transport};
