//! IPv4 packet construction and parsing
//!
//! Minimal-header IPv4 (IHL 5, no options). The total-length field can be
//! pinned to a declared value independent of the real encoded size; the
//! header checksum is always computed over the bytes as they will appear
//! on the wire.

use crate::checksum::internet_checksum;
use bytes::{BufMut, BytesMut};
use std::net::Ipv4Addr;

/// IP Protocol numbers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IpProtocol {
    /// UDP (17)
    UDP,
    /// Custom protocol number
    Custom(u8),
}

impl IpProtocol {
    pub fn to_u8(self) -> u8 {
        match self {
            IpProtocol::UDP => 17,
            IpProtocol::Custom(val) => val,
        }
    }

    pub fn from_u8(value: u8) -> Self {
        match value {
            17 => IpProtocol::UDP,
            val => IpProtocol::Custom(val),
        }
    }
}

/// IPv4 packet (version 4, IHL 5, no options)
#[derive(Debug, Clone)]
pub struct Ipv4Packet {
    /// Type of Service / DSCP
    pub tos: u8,
    /// Total length field as it will be encoded
    ///
    /// Defaults to header + payload size but may be overridden with a
    /// declared value that differs from the actual encoded size.
    pub total_length: u16,
    /// Identification
    pub identification: u16,
    /// Time to Live
    pub ttl: u8,
    /// Protocol
    pub protocol: IpProtocol,
    /// Header checksum
    pub checksum: u16,
    /// Source IP address
    pub source: Ipv4Addr,
    /// Destination IP address
    pub destination: Ipv4Addr,
    /// Payload data
    pub payload: Vec<u8>,
}

impl Ipv4Packet {
    /// IPv4 header size without options
    pub const HEADER_SIZE: usize = 20;

    /// Create a new IPv4 packet with default values
    pub fn new(source: Ipv4Addr, destination: Ipv4Addr, protocol: IpProtocol, payload: Vec<u8>) -> Self {
        let total_length = (Self::HEADER_SIZE + payload.len()) as u16;

        Self {
            tos: 0,
            total_length,
            identification: 0,
            ttl: 64,
            protocol,
            checksum: 0, // Will be calculated
            source,
            destination,
            payload,
        }
    }

    /// Pin the total-length field to a declared value
    ///
    /// The value is encoded as-is even when it does not match the actual
    /// packet size.
    pub fn with_total_length(mut self, length: u16) -> Self {
        self.total_length = length;
        self
    }

    /// Set the Time to Live
    pub fn with_ttl(mut self, ttl: u8) -> Self {
        self.ttl = ttl;
        self
    }

    /// Set the identification field
    pub fn with_identification(mut self, id: u16) -> Self {
        self.identification = id;
        self
    }

    /// Calculate and update the header checksum
    ///
    /// The checksum field is zeroed first so a stale value never feeds
    /// back into the sum.
    pub fn calculate_checksum(&mut self) {
        self.checksum = 0;
        let header = self.header_bytes();
        self.checksum = internet_checksum(&header);
    }

    /// Build the 20 header bytes with the current field values
    fn header_bytes(&self) -> Vec<u8> {
        let mut buffer = BytesMut::with_capacity(Self::HEADER_SIZE);

        buffer.put_u8(0x45); // Version 4, IHL 5
        buffer.put_u8(self.tos);
        buffer.put_u16(self.total_length);
        buffer.put_u16(self.identification);
        buffer.put_u16(0); // Flags and fragment offset
        buffer.put_u8(self.ttl);
        buffer.put_u8(self.protocol.to_u8());
        buffer.put_u16(self.checksum);
        buffer.put_slice(&self.source.octets());
        buffer.put_slice(&self.destination.octets());

        buffer.to_vec()
    }

    /// Convert the packet to bytes, computing the checksum fresh
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut packet = self.clone();
        packet.calculate_checksum();

        let mut buffer = BytesMut::with_capacity(Self::HEADER_SIZE + packet.payload.len());
        buffer.put_slice(&packet.header_bytes());
        buffer.put_slice(&packet.payload);
        buffer.to_vec()
    }

    /// Parse an IPv4 packet from bytes
    pub fn from_bytes(data: &[u8]) -> Option<Self> {
        if data.len() < Self::HEADER_SIZE {
            return None;
        }

        let version_ihl = data[0];
        if version_ihl >> 4 != 4 {
            return None;
        }
        let header_len = ((version_ihl & 0x0F) as usize) * 4;
        if data.len() < header_len {
            return None;
        }

        Some(Self {
            tos: data[1],
            total_length: u16::from_be_bytes([data[2], data[3]]),
            identification: u16::from_be_bytes([data[4], data[5]]),
            ttl: data[8],
            protocol: IpProtocol::from_u8(data[9]),
            checksum: u16::from_be_bytes([data[10], data[11]]),
            source: Ipv4Addr::new(data[12], data[13], data[14], data[15]),
            destination: Ipv4Addr::new(data[16], data[17], data[18], data[19]),
            payload: data[header_len..].to_vec(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checksum::validate_checksum;

    #[test]
    fn test_ip_protocol_conversion() {
        assert_eq!(IpProtocol::UDP.to_u8(), 17);
        assert_eq!(IpProtocol::from_u8(17), IpProtocol::UDP);
        assert_eq!(IpProtocol::from_u8(6), IpProtocol::Custom(6));
    }

    #[test]
    fn test_packet_default_length() {
        let packet = Ipv4Packet::new(
            Ipv4Addr::new(192, 168, 1, 1),
            Ipv4Addr::new(192, 168, 1, 2),
            IpProtocol::UDP,
            vec![0x01, 0x02, 0x03, 0x04],
        );
        assert_eq!(packet.total_length, 24);
    }

    #[test]
    fn test_declared_length_survives_encoding() {
        // The declared value must land on the wire even though the actual
        // packet is smaller.
        let packet = Ipv4Packet::new(
            Ipv4Addr::new(10, 0, 0, 1),
            Ipv4Addr::new(10, 0, 0, 2),
            IpProtocol::UDP,
            vec![0u8; 8],
        )
        .with_total_length(240);

        let bytes = packet.to_bytes();
        assert_eq!(u16::from_be_bytes([bytes[2], bytes[3]]), 240);
        assert_eq!(bytes.len(), 28);
    }

    #[test]
    fn test_to_bytes_checksum_is_valid() {
        let packet = Ipv4Packet::new(
            Ipv4Addr::new(192, 168, 1, 1),
            Ipv4Addr::new(192, 168, 1, 2),
            IpProtocol::UDP,
            vec![0x01, 0x02],
        );

        let bytes = packet.to_bytes();
        assert!(validate_checksum(&bytes[..Ipv4Packet::HEADER_SIZE]));
    }

    #[test]
    fn test_checksum_never_reuses_stale_value() {
        let mut packet = Ipv4Packet::new(
            Ipv4Addr::new(192, 168, 1, 1),
            Ipv4Addr::new(192, 168, 1, 2),
            IpProtocol::UDP,
            vec![],
        );

        packet.calculate_checksum();
        let first = packet.checksum;

        // Recomputing over unchanged fields must give the same result,
        // meaning the previous checksum did not feed into the new one.
        packet.calculate_checksum();
        assert_eq!(packet.checksum, first);

        packet.identification = 0x1234;
        packet.calculate_checksum();
        assert_ne!(packet.checksum, first);
    }

    #[test]
    fn test_packet_roundtrip() {
        let packet = Ipv4Packet::new(
            Ipv4Addr::new(192, 168, 1, 1),
            Ipv4Addr::new(192, 168, 1, 2),
            IpProtocol::UDP,
            vec![0x01, 0x02, 0x03, 0x04],
        )
        .with_ttl(128)
        .with_identification(7);

        let parsed = Ipv4Packet::from_bytes(&packet.to_bytes()).unwrap();
        assert_eq!(parsed.source, packet.source);
        assert_eq!(parsed.destination, packet.destination);
        assert_eq!(parsed.ttl, 128);
        assert_eq!(parsed.identification, 7);
        assert_eq!(parsed.protocol, IpProtocol::UDP);
        assert_eq!(parsed.payload, packet.payload);
    }
}
