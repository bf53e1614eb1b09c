//! RTP fixed header construction and parsing
//!
//! Implements the RFC 3550 fixed 12-byte header only: no extensions, no
//! CSRC list, no padding. Session semantics (RTCP, SSRC negotiation) are
//! out of scope.

use bytes::{BufMut, BytesMut};

/// RTP protocol version (RFC 3550)
pub const RTP_VERSION: u8 = 2;

/// RTP fixed header
///
/// # Wire Format
///
/// ```text
///  0                   1                   2                   3
///  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |V=2|P|X|  CC   |M|     PT      |       sequence number         |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |                           timestamp                           |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |           synchronization source (SSRC) identifier            |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RtpHeader {
    /// Payload type (7 bits)
    pub payload_type: u8,
    /// Sequence number (wraps at 65536)
    pub sequence: u16,
    /// Timestamp
    pub timestamp: u32,
    /// Synchronization source identifier
    pub ssrc: u32,
}

impl RtpHeader {
    /// Fixed header size in bytes
    pub const SIZE: usize = 12;

    /// Create a new RTP header
    pub fn new(payload_type: u8, sequence: u16, timestamp: u32, ssrc: u32) -> Self {
        Self {
            payload_type,
            sequence,
            timestamp,
            ssrc,
        }
    }

    /// Convert the header to bytes
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buffer = BytesMut::with_capacity(Self::SIZE);

        // V=2, P=0, X=0, CC=0
        buffer.put_u8(RTP_VERSION << 6);
        // M=0, PT
        buffer.put_u8(self.payload_type & 0x7F);
        buffer.put_u16(self.sequence);
        buffer.put_u32(self.timestamp);
        buffer.put_u32(self.ssrc);

        buffer.to_vec()
    }

    /// Parse an RTP header from bytes
    ///
    /// Returns None if the buffer is too short or the version is not 2.
    pub fn from_bytes(data: &[u8]) -> Option<Self> {
        if data.len() < Self::SIZE {
            return None;
        }
        if data[0] >> 6 != RTP_VERSION {
            return None;
        }

        Some(Self {
            payload_type: data[1] & 0x7F,
            sequence: u16::from_be_bytes([data[2], data[3]]),
            timestamp: u32::from_be_bytes([data[4], data[5], data[6], data[7]]),
            ssrc: u32::from_be_bytes([data[8], data[9], data[10], data[11]]),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_wire_format() {
        let header = RtpHeader::new(8, 0x0102, 0x0304_0506, 1);
        let bytes = header.to_bytes();

        assert_eq!(bytes.len(), RtpHeader::SIZE);
        assert_eq!(bytes[0], 0x80); // V=2, no padding/extension/CSRC
        assert_eq!(bytes[1], 8); // PT 8, marker clear
        assert_eq!(&bytes[2..4], &[0x01, 0x02]);
        assert_eq!(&bytes[4..8], &[0x03, 0x04, 0x05, 0x06]);
        assert_eq!(&bytes[8..12], &[0x00, 0x00, 0x00, 0x01]);
    }

    #[test]
    fn test_header_roundtrip() {
        let header = RtpHeader::new(8, 65535, 0xDEAD_BEEF, 1);
        let parsed = RtpHeader::from_bytes(&header.to_bytes()).unwrap();
        assert_eq!(parsed, header);
    }

    #[test]
    fn test_rejects_wrong_version() {
        let mut bytes = RtpHeader::new(8, 1, 0, 1).to_bytes();
        bytes[0] = 0x40; // version 1
        assert!(RtpHeader::from_bytes(&bytes).is_none());
    }

    #[test]
    fn test_rejects_short_buffer() {
        assert!(RtpHeader::from_bytes(&[0x80; 8]).is_none());
    }
}
