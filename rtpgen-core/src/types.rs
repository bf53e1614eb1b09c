//! Common types used throughout rtpgen

use std::fmt;
use std::str::FromStr;

/// MAC Address (6 bytes)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MacAddr(pub [u8; 6]);

impl MacAddr {
    /// Create a new MAC address
    pub const fn new(bytes: [u8; 6]) -> Self {
        Self(bytes)
    }

    /// Broadcast MAC address (ff:ff:ff:ff:ff:ff)
    pub const fn broadcast() -> Self {
        Self([0xff, 0xff, 0xff, 0xff, 0xff, 0xff])
    }

    /// Zero MAC address (00:00:00:00:00:00)
    pub const fn zero() -> Self {
        Self([0x00, 0x00, 0x00, 0x00, 0x00, 0x00])
    }

    /// Get bytes as slice
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Convert to array
    pub fn octets(&self) -> [u8; 6] {
        self.0
    }

    /// Check if this is the broadcast address
    pub fn is_broadcast(&self) -> bool {
        self.0 == [0xff; 6]
    }
}

impl fmt::Display for MacAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02x}:{:02x}:{:02x}:{:02x}:{:02x}:{:02x}",
            self.0[0], self.0[1], self.0[2], self.0[3], self.0[4], self.0[5]
        )
    }
}

impl FromStr for MacAddr {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(':').collect();
        if parts.len() != 6 {
            return Err(crate::Error::PacketConstruction(
                "Invalid MAC address format".into(),
            ));
        }

        let mut bytes = [0u8; 6];
        for (i, part) in parts.iter().enumerate() {
            bytes[i] = u8::from_str_radix(part, 16).map_err(|_| {
                crate::Error::PacketConstruction("Invalid MAC address hex".into())
            })?;
        }

        Ok(MacAddr(bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mac_addr_display() {
        let mac = MacAddr([0x00, 0x11, 0x22, 0xaa, 0xbb, 0xcc]);
        assert_eq!(mac.to_string(), "00:11:22:aa:bb:cc");
    }

    #[test]
    fn test_mac_addr_from_str() {
        let mac: MacAddr = "00:11:22:aa:bb:cc".parse().unwrap();
        assert_eq!(mac.octets(), [0x00, 0x11, 0x22, 0xaa, 0xbb, 0xcc]);

        assert!("00:11:22".parse::<MacAddr>().is_err());
        assert!("zz:11:22:aa:bb:cc".parse::<MacAddr>().is_err());
    }

    #[test]
    fn test_mac_addr_broadcast() {
        assert!(MacAddr::broadcast().is_broadcast());
        assert!(!MacAddr::zero().is_broadcast());
    }
}
