//! Ethernet frame construction and parsing
//!
//! Only what the link-layer send path needs: Ethernet II framing of an
//! IPv4 payload. The FCS is appended by the NIC, not built here.

use bytes::{BufMut, BytesMut};
use rtpgen_core::MacAddr;

/// EtherType values used in Ethernet II frames
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EtherType {
    /// IPv4 (0x0800)
    IPv4,
    /// Custom EtherType
    Custom(u16),
}

impl EtherType {
    /// Convert EtherType to u16 value
    pub fn to_u16(self) -> u16 {
        match self {
            EtherType::IPv4 => 0x0800,
            EtherType::Custom(val) => val,
        }
    }

    /// Create EtherType from u16 value
    pub fn from_u16(value: u16) -> Self {
        match value {
            0x0800 => EtherType::IPv4,
            val => EtherType::Custom(val),
        }
    }
}

/// Ethernet II frame
#[derive(Debug, Clone)]
pub struct EthernetFrame {
    /// Destination MAC address
    pub destination: MacAddr,
    /// Source MAC address
    pub source: MacAddr,
    /// EtherType of the payload
    pub ethertype: EtherType,
    /// Payload data
    pub payload: Vec<u8>,
}

impl EthernetFrame {
    /// Ethernet II header size in bytes
    pub const HEADER_SIZE: usize = 14;

    /// Create a new Ethernet frame
    pub fn new(destination: MacAddr, source: MacAddr, ethertype: EtherType, payload: Vec<u8>) -> Self {
        Self {
            destination,
            source,
            ethertype,
            payload,
        }
    }

    /// Convert the frame to bytes
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buffer = BytesMut::with_capacity(Self::HEADER_SIZE + self.payload.len());

        buffer.put_slice(self.destination.as_bytes());
        buffer.put_slice(self.source.as_bytes());
        buffer.put_u16(self.ethertype.to_u16());
        buffer.put_slice(&self.payload);

        buffer.to_vec()
    }

    /// Parse an Ethernet frame from bytes
    pub fn from_bytes(data: &[u8]) -> Option<Self> {
        if data.len() < Self::HEADER_SIZE {
            return None;
        }

        let mut dst = [0u8; 6];
        let mut src = [0u8; 6];
        dst.copy_from_slice(&data[0..6]);
        src.copy_from_slice(&data[6..12]);

        let ethertype = EtherType::from_u16(u16::from_be_bytes([data[12], data[13]]));

        Some(Self {
            destination: MacAddr(dst),
            source: MacAddr(src),
            ethertype,
            payload: data[Self::HEADER_SIZE..].to_vec(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ethertype_conversion() {
        assert_eq!(EtherType::IPv4.to_u16(), 0x0800);
        assert_eq!(EtherType::from_u16(0x0800), EtherType::IPv4);
        assert_eq!(EtherType::from_u16(0x86DD), EtherType::Custom(0x86DD));
    }

    #[test]
    fn test_frame_to_bytes() {
        let frame = EthernetFrame::new(
            MacAddr::broadcast(),
            MacAddr([0x00, 0x11, 0x22, 0x33, 0x44, 0x55]),
            EtherType::IPv4,
            vec![0x45, 0x00],
        );

        let bytes = frame.to_bytes();
        assert_eq!(&bytes[0..6], &[0xff; 6]);
        assert_eq!(&bytes[6..12], &[0x00, 0x11, 0x22, 0x33, 0x44, 0x55]);
        assert_eq!(&bytes[12..14], &[0x08, 0x00]);
        assert_eq!(&bytes[14..], &[0x45, 0x00]);
    }

    #[test]
    fn test_frame_roundtrip() {
        let frame = EthernetFrame::new(
            MacAddr([0xaa, 0xbb, 0xcc, 0xdd, 0xee, 0xff]),
            MacAddr([0x00, 0x11, 0x22, 0x33, 0x44, 0x55]),
            EtherType::IPv4,
            vec![0x01, 0x02, 0x03, 0x04],
        );

        let parsed = EthernetFrame::from_bytes(&frame.to_bytes()).unwrap();
        assert_eq!(parsed.destination, frame.destination);
        assert_eq!(parsed.source, frame.source);
        assert_eq!(parsed.ethertype, frame.ethertype);
        assert_eq!(parsed.payload, frame.payload);
    }

    #[test]
    fn test_frame_too_short() {
        assert!(EthernetFrame::from_bytes(&[0x00; 10]).is_none());
    }
}
