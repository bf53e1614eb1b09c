//! Error types for rtpgen

use thiserror::Error;

/// Result type alias for rtpgen operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for rtpgen
#[derive(Error, Debug)]
pub enum Error {
    /// Network I/O error
    #[error("Network I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Destination name lookup failed
    #[error("Failed to resolve '{host}': {reason}")]
    Resolution { host: String, reason: String },

    /// Invalid configuration
    #[error("Invalid configuration '{name}': {reason}")]
    Config { name: String, reason: String },

    /// A packet send call failed
    #[error("Transmission failed: {0}")]
    Transmission(String),

    /// Interface not found
    #[error("Interface '{0}' not found")]
    InterfaceNotFound(String),

    /// Interface error
    #[error("Interface error: {0}")]
    Interface(String),

    /// Packet construction error
    #[error("Packet construction error: {0}")]
    PacketConstruction(String),
}

impl Error {
    /// Create a resolution error for the given host
    pub fn resolution<S: Into<String>>(host: S, reason: S) -> Self {
        Error::Resolution {
            host: host.into(),
            reason: reason.into(),
        }
    }

    /// Create a configuration error
    pub fn config<S: Into<String>>(name: S, reason: S) -> Self {
        Error::Config {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Create a transmission error with a custom message
    pub fn transmission<S: Into<String>>(msg: S) -> Self {
        Error::Transmission(msg.into())
    }
}
