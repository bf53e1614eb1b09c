//! Packet builder for stacking protocol layers with a fluent API
//!
//! Composes the generator's three protocol layers (IPv4, UDP, RTP) plus
//! the optional Ethernet frame into wire bytes, recomputing checksums
//! over the assembled packet. The Ethernet layer is optional: the
//! network-layer send path hands IP-level bytes to a raw socket.

use crate::ethernet::{EtherType, EthernetFrame};
use crate::ip::{IpProtocol, Ipv4Packet};
use crate::rtp::RtpHeader;
use crate::udp::UdpDatagram;
use rtpgen_core::{Error, MacAddr, Result};
use std::net::Ipv4Addr;

#[derive(Debug, Clone, Copy)]
struct Layer2 {
    src: MacAddr,
    dst: MacAddr,
}

#[derive(Debug, Clone, Copy)]
struct Layer3 {
    src: Ipv4Addr,
    dst: Ipv4Addr,
    ttl: u8,
    identification: u16,
    /// Declared total-length override
    total_length: Option<u16>,
}

#[derive(Debug, Clone, Copy)]
struct Layer4 {
    src_port: u16,
    dst_port: u16,
    /// Declared length override
    length: Option<u16>,
}

/// Packet builder with fluent API
///
/// # Examples
///
/// ```
/// use std::net::Ipv4Addr;
/// use rtpgen_packet::PacketBuilder;
///
/// let packet = PacketBuilder::new()
///     .ipv4(Ipv4Addr::UNSPECIFIED, Ipv4Addr::new(10, 0, 0, 5))
///     .ip_total_length(240)
///     .udp(10500, 6100)
///     .udp_length(220)
///     .rtp(8, 1, 0, 1)
///     .payload(vec![0u8; 200])
///     .build()
///     .unwrap();
/// ```
pub struct PacketBuilder {
    layer2: Option<Layer2>,
    layer3: Option<Layer3>,
    layer4: Option<Layer4>,
    rtp: Option<RtpHeader>,
    payload: Vec<u8>,
}

impl PacketBuilder {
    /// Create a new packet builder
    pub fn new() -> Self {
        Self {
            layer2: None,
            layer3: None,
            layer4: None,
            rtp: None,
            payload: Vec::new(),
        }
    }

    /// Add an Ethernet layer (link-layer send path only)
    pub fn ethernet(mut self, src: MacAddr, dst: MacAddr) -> Self {
        self.layer2 = Some(Layer2 { src, dst });
        self
    }

    /// Add an IPv4 layer
    ///
    /// Use `Ipv4Addr::UNSPECIFIED` as the source to let the kernel fill
    /// it in on the raw-socket path.
    pub fn ipv4(mut self, src: Ipv4Addr, dst: Ipv4Addr) -> Self {
        self.layer3 = Some(Layer3 {
            src,
            dst,
            ttl: 64,
            identification: 0,
            total_length: None,
        });
        self
    }

    /// Pin the IPv4 total-length field to a declared value
    ///
    /// Must be called after `ipv4()`.
    pub fn ip_total_length(mut self, length: u16) -> Self {
        if let Some(ref mut layer3) = self.layer3 {
            layer3.total_length = Some(length);
        }
        self
    }

    /// Set the TTL for the IPv4 layer
    ///
    /// Must be called after `ipv4()`.
    pub fn ttl(mut self, new_ttl: u8) -> Self {
        if let Some(ref mut layer3) = self.layer3 {
            layer3.ttl = new_ttl;
        }
        self
    }

    /// Set the identification for the IPv4 layer
    ///
    /// Must be called after `ipv4()`.
    pub fn identification(mut self, id: u16) -> Self {
        if let Some(ref mut layer3) = self.layer3 {
            layer3.identification = id;
        }
        self
    }

    /// Add a UDP layer
    pub fn udp(mut self, src_port: u16, dst_port: u16) -> Self {
        self.layer4 = Some(Layer4 {
            src_port,
            dst_port,
            length: None,
        });
        self
    }

    /// Pin the UDP length field to a declared value
    ///
    /// Must be called after `udp()`.
    pub fn udp_length(mut self, length: u16) -> Self {
        if let Some(ref mut layer4) = self.layer4 {
            layer4.length = Some(length);
        }
        self
    }

    /// Add an RTP fixed header
    pub fn rtp(mut self, payload_type: u8, sequence: u16, timestamp: u32, ssrc: u32) -> Self {
        self.rtp = Some(RtpHeader::new(payload_type, sequence, timestamp, ssrc));
        self
    }

    /// Set the payload data
    pub fn payload(mut self, data: Vec<u8>) -> Self {
        self.payload = data;
        self
    }

    /// Build the packet bytes
    ///
    /// Checksums are computed fresh over the assembled layers. Declared
    /// length overrides are encoded as given.
    ///
    /// # Errors
    ///
    /// Returns an error if the layer stacking is invalid: RTP requires
    /// UDP, UDP requires IPv4, and at least one layer must be present.
    pub fn build(self) -> Result<Vec<u8>> {
        let mut packet_data = self.payload.clone();

        // RTP header prepends onto the payload
        if let Some(rtp) = self.rtp {
            if self.layer4.is_none() {
                return Err(Error::PacketConstruction("RTP requires a UDP layer".into()));
            }
            let mut data = rtp.to_bytes();
            data.extend_from_slice(&packet_data);
            packet_data = data;
        }

        // UDP
        if let Some(layer4) = self.layer4 {
            let layer3 = self
                .layer3
                .ok_or_else(|| Error::PacketConstruction("UDP requires an IPv4 layer".into()))?;

            let mut udp = UdpDatagram::new(layer4.src_port, layer4.dst_port, packet_data);
            if let Some(length) = layer4.length {
                udp = udp.with_length(length);
            }
            udp.calculate_checksum(layer3.src, layer3.dst);
            packet_data = udp.to_bytes();
        }

        // IPv4
        if let Some(layer3) = self.layer3 {
            let protocol = if self.layer4.is_some() {
                IpProtocol::UDP
            } else {
                IpProtocol::Custom(0)
            };

            let mut ip = Ipv4Packet::new(layer3.src, layer3.dst, protocol, packet_data)
                .with_ttl(layer3.ttl)
                .with_identification(layer3.identification);
            if let Some(length) = layer3.total_length {
                ip = ip.with_total_length(length);
            }

            packet_data = ip.to_bytes();
        }

        // Ethernet
        if let Some(layer2) = self.layer2 {
            let frame = EthernetFrame::new(layer2.dst, layer2.src, EtherType::IPv4, packet_data);
            packet_data = frame.to_bytes();
        }

        if packet_data.is_empty() {
            return Err(Error::PacketConstruction("no layers configured".into()));
        }

        Ok(packet_data)
    }
}

impl Default for PacketBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_ip_udp_rtp_without_ethernet() {
        let packet = PacketBuilder::new()
            .ipv4(Ipv4Addr::new(10, 0, 0, 1), Ipv4Addr::new(10, 0, 0, 5))
            .udp(10500, 6100)
            .rtp(8, 1, 42, 1)
            .payload(vec![0xab; 200])
            .build()
            .unwrap();

        // IP at the very front, no Ethernet header
        let ip = Ipv4Packet::from_bytes(&packet).unwrap();
        assert_eq!(ip.destination, Ipv4Addr::new(10, 0, 0, 5));
        assert_eq!(ip.protocol, IpProtocol::UDP);

        let udp = UdpDatagram::from_bytes(&ip.payload).unwrap();
        assert_eq!(udp.source_port, 10500);
        assert_eq!(udp.destination_port, 6100);

        let rtp = RtpHeader::from_bytes(&udp.payload).unwrap();
        assert_eq!(rtp.payload_type, 8);
        assert_eq!(rtp.sequence, 1);
        assert_eq!(rtp.timestamp, 42);
        assert_eq!(rtp.ssrc, 1);
        assert_eq!(&udp.payload[RtpHeader::SIZE..], &[0xab; 200][..]);
    }

    #[test]
    fn test_builder_with_ethernet() {
        let src_mac = MacAddr([0x00, 0x11, 0x22, 0x33, 0x44, 0x55]);

        let packet = PacketBuilder::new()
            .ethernet(src_mac, MacAddr::broadcast())
            .ipv4(Ipv4Addr::new(10, 0, 0, 1), Ipv4Addr::new(10, 0, 0, 5))
            .udp(10500, 6100)
            .payload(vec![0x01, 0x02])
            .build()
            .unwrap();

        let frame = EthernetFrame::from_bytes(&packet).unwrap();
        assert_eq!(frame.source, src_mac);
        assert_eq!(frame.destination, MacAddr::broadcast());
        assert_eq!(frame.ethertype, EtherType::IPv4);

        let ip = Ipv4Packet::from_bytes(&frame.payload).unwrap();
        assert_eq!(ip.destination, Ipv4Addr::new(10, 0, 0, 5));
    }

    #[test]
    fn test_builder_declared_lengths() {
        let packet = PacketBuilder::new()
            .ipv4(Ipv4Addr::new(10, 0, 0, 1), Ipv4Addr::new(10, 0, 0, 5))
            .ip_total_length(240)
            .udp(10500, 6100)
            .udp_length(220)
            .rtp(8, 1, 0, 1)
            .payload(vec![0u8; 200])
            .build()
            .unwrap();

        let ip = Ipv4Packet::from_bytes(&packet).unwrap();
        assert_eq!(ip.total_length, 240);

        let udp = UdpDatagram::from_bytes(&ip.payload).unwrap();
        assert_eq!(udp.length, 220);

        // Actual encoded size: 20 IP + 8 UDP + 12 RTP + 200 payload
        assert_eq!(packet.len(), 240);
    }

    #[test]
    fn test_builder_udp_without_ip_errors() {
        let result = PacketBuilder::new().udp(1, 2).payload(vec![0x00]).build();
        assert!(result.is_err());
    }

    #[test]
    fn test_builder_rtp_without_udp_errors() {
        let result = PacketBuilder::new()
            .ipv4(Ipv4Addr::new(10, 0, 0, 1), Ipv4Addr::new(10, 0, 0, 5))
            .rtp(8, 1, 0, 1)
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn test_builder_empty_errors() {
        assert!(PacketBuilder::new().build().is_err());
    }

    #[test]
    fn test_checksums_differ_between_sequences() {
        let build = |seq: u16| {
            PacketBuilder::new()
                .ipv4(Ipv4Addr::new(10, 0, 0, 1), Ipv4Addr::new(10, 0, 0, 5))
                .udp(10500, 6100)
                .rtp(8, seq, 7, 1)
                .payload(vec![0xcd; 16])
                .build()
                .unwrap()
        };

        let a = Ipv4Packet::from_bytes(&build(1)).unwrap();
        let b = Ipv4Packet::from_bytes(&build(2)).unwrap();

        let udp_a = UdpDatagram::from_bytes(&a.payload).unwrap();
        let udp_b = UdpDatagram::from_bytes(&b.payload).unwrap();
        assert_ne!(udp_a.checksum, udp_b.checksum);
    }
}
