//! Stream configuration
//!
//! A [`StreamConfig`] describes one generator run. It is built once from the
//! CLI arguments (or programmatically in tests) and stays immutable for the
//! lifetime of the run.

use crate::{Error, Result};
use std::net::Ipv4Addr;

/// Default destination UDP port for the RTP stream
pub const DEFAULT_DESTINATION_PORT: u16 = 6100;

/// Default lower bound of the randomized packet count
pub const DEFAULT_MIN_COUNT: u64 = 4500;

/// Default upper bound of the randomized packet count
pub const DEFAULT_MAX_COUNT: u64 = 90000;

/// Configuration for a single stream run
#[derive(Debug, Clone)]
pub struct StreamConfig {
    /// Resolved destination address
    pub destination: Ipv4Addr,
    /// Destination UDP port
    pub destination_port: u16,
    /// Source address override (None = kernel selects)
    pub source_ip: Option<Ipv4Addr>,
    /// Fixed source port (None = one random port per run)
    pub source_port: Option<u16>,
    /// Egress interface name; presence switches to the link-layer send path
    pub interface: Option<String>,
    /// Lower bound of the randomized packet count (inclusive)
    pub min_count: u64,
    /// Upper bound of the randomized packet count (exclusive)
    pub max_count: u64,
}

impl StreamConfig {
    /// Create a configuration for the given destination with default values
    pub fn new(destination: Ipv4Addr) -> Self {
        Self {
            destination,
            destination_port: DEFAULT_DESTINATION_PORT,
            source_ip: None,
            source_port: None,
            interface: None,
            min_count: DEFAULT_MIN_COUNT,
            max_count: DEFAULT_MAX_COUNT,
        }
    }

    /// Set the destination port
    pub fn with_destination_port(mut self, port: u16) -> Self {
        self.destination_port = port;
        self
    }

    /// Set the source address
    pub fn with_source_ip(mut self, ip: Ipv4Addr) -> Self {
        self.source_ip = Some(ip);
        self
    }

    /// Fix the source port for the whole run
    pub fn with_source_port(mut self, port: u16) -> Self {
        self.source_port = Some(port);
        self
    }

    /// Select the egress interface (enables the link-layer send path)
    pub fn with_interface<S: Into<String>>(mut self, name: S) -> Self {
        self.interface = Some(name.into());
        self
    }

    /// Set the packet-count bounds
    pub fn with_count_bounds(mut self, min: u64, max: u64) -> Self {
        self.min_count = min;
        self.max_count = max;
        self
    }

    /// Validate the configuration
    ///
    /// The count bounds feed a half-open random range, so the lower bound
    /// must be strictly below the upper bound.
    pub fn validate(&self) -> Result<()> {
        if self.min_count >= self.max_count {
            return Err(Error::config(
                "count bounds".into(),
                format!(
                    "min-count ({}) must be below max-count ({})",
                    self.min_count, self.max_count
                ),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = StreamConfig::new(Ipv4Addr::new(10, 0, 0, 5));

        assert_eq!(config.destination, Ipv4Addr::new(10, 0, 0, 5));
        assert_eq!(config.destination_port, 6100);
        assert_eq!(config.min_count, 4500);
        assert_eq!(config.max_count, 90000);
        assert!(config.source_ip.is_none());
        assert!(config.source_port.is_none());
        assert!(config.interface.is_none());
    }

    #[test]
    fn test_config_builders() {
        let config = StreamConfig::new(Ipv4Addr::new(10, 0, 0, 5))
            .with_destination_port(9000)
            .with_source_ip(Ipv4Addr::new(192, 168, 1, 10))
            .with_source_port(20000)
            .with_interface("eth0")
            .with_count_bounds(1, 10);

        assert_eq!(config.destination_port, 9000);
        assert_eq!(config.source_ip, Some(Ipv4Addr::new(192, 168, 1, 10)));
        assert_eq!(config.source_port, Some(20000));
        assert_eq!(config.interface.as_deref(), Some("eth0"));
        assert_eq!(config.min_count, 1);
        assert_eq!(config.max_count, 10);
    }

    #[test]
    fn test_config_validate_bounds() {
        let config = StreamConfig::new(Ipv4Addr::new(10, 0, 0, 5)).with_count_bounds(1, 2);
        assert!(config.validate().is_ok());

        let config = StreamConfig::new(Ipv4Addr::new(10, 0, 0, 5)).with_count_bounds(10, 10);
        assert!(config.validate().is_err());

        let config = StreamConfig::new(Ipv4Addr::new(10, 0, 0, 5)).with_count_bounds(10, 5);
        assert!(config.validate().is_err());
    }
}
