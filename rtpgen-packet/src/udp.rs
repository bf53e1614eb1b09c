//! UDP datagram construction and parsing
//!
//! Header construction with the pseudo-header checksum. Like the IPv4
//! layer, the length field can be pinned to a declared value.

use crate::checksum::transport_checksum;
use bytes::{BufMut, BytesMut};
use std::net::Ipv4Addr;

/// UDP datagram
#[derive(Debug, Clone)]
pub struct UdpDatagram {
    /// Source port
    pub source_port: u16,
    /// Destination port
    pub destination_port: u16,
    /// Length field as it will be encoded (header + data by default)
    pub length: u16,
    /// Checksum
    pub checksum: u16,
    /// Payload data
    pub payload: Vec<u8>,
}

impl UdpDatagram {
    /// UDP header size in bytes
    pub const HEADER_SIZE: usize = 8;

    /// Create a new UDP datagram
    ///
    /// The checksum is left at 0; call [`calculate_checksum`] with the
    /// enclosing addresses before encoding.
    ///
    /// [`calculate_checksum`]: UdpDatagram::calculate_checksum
    pub fn new(source_port: u16, destination_port: u16, payload: Vec<u8>) -> Self {
        let length = (Self::HEADER_SIZE + payload.len()) as u16;

        Self {
            source_port,
            destination_port,
            length,
            checksum: 0,
            payload,
        }
    }

    /// Pin the length field to a declared value
    ///
    /// Encoded as-is even when it does not match the actual datagram size.
    pub fn with_length(mut self, length: u16) -> Self {
        self.length = length;
        self
    }

    /// Calculate and set the UDP checksum
    ///
    /// The checksum covers a pseudo-header built from the source and
    /// destination addresses, so they must be supplied here. The field is
    /// zeroed before summation; a computed value of 0 is transmitted as
    /// 0xFFFF per RFC 768.
    pub fn calculate_checksum(&mut self, src_ip: Ipv4Addr, dst_ip: Ipv4Addr) {
        self.checksum = 0;
        let data = self.encode();

        let checksum = transport_checksum(&src_ip.octets(), &dst_ip.octets(), 17, &data);
        self.checksum = if checksum == 0 { 0xFFFF } else { checksum };
    }

    /// Encode header and payload with the current field values
    fn encode(&self) -> Vec<u8> {
        let mut buffer = BytesMut::with_capacity(Self::HEADER_SIZE + self.payload.len());

        buffer.put_u16(self.source_port);
        buffer.put_u16(self.destination_port);
        buffer.put_u16(self.length);
        buffer.put_u16(self.checksum);
        buffer.put_slice(&self.payload);

        buffer.to_vec()
    }

    /// Convert the datagram to bytes
    ///
    /// Does not touch the checksum; call [`calculate_checksum`] first for
    /// a valid one.
    ///
    /// [`calculate_checksum`]: UdpDatagram::calculate_checksum
    pub fn to_bytes(&self) -> Vec<u8> {
        self.encode()
    }

    /// Parse a UDP datagram from bytes
    pub fn from_bytes(data: &[u8]) -> Option<Self> {
        if data.len() < Self::HEADER_SIZE {
            return None;
        }

        Some(Self {
            source_port: u16::from_be_bytes([data[0], data[1]]),
            destination_port: u16::from_be_bytes([data[2], data[3]]),
            length: u16::from_be_bytes([data[4], data[5]]),
            checksum: u16::from_be_bytes([data[6], data[7]]),
            payload: data[Self::HEADER_SIZE..].to_vec(),
        })
    }
}
