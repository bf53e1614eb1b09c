//! rtpgen core library
//!
//! This crate provides the fundamental types shared by the rtpgen
//! workspace: the error enum, stream configuration, destination
//! resolution and network interface handling.

pub mod config;
pub mod error;
pub mod interface;
pub mod resolver;
pub mod types;

// Re-export commonly used types
pub use config::{StreamConfig, DEFAULT_DESTINATION_PORT, DEFAULT_MAX_COUNT, DEFAULT_MIN_COUNT};
pub use error::{Error, Result};
pub use interface::{Interface, LinkSender};
pub use resolver::resolve_destination;
pub use types::MacAddr;
