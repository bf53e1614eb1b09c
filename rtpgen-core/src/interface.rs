//! Network interface types
//!
//! Thin wrapper over `pnet_datalink` for the link-layer send path: looking
//! up a named interface, reading its MAC and first IPv4 address, and
//! opening an exclusive sender channel for the run.

use crate::{Error, MacAddr, Result};
use pnet_datalink::{self, Channel, DataLinkSender};
use std::fmt;

/// Network interface
#[derive(Debug, Clone)]
pub struct Interface {
    /// Interface name (e.g., "eth0", "en0")
    pub name: String,
    /// MAC address
    pub mac_address: MacAddr,
}

impl Interface {
    /// Get interface by name
    pub fn by_name(name: &str) -> Result<Self> {
        let interfaces = pnet_datalink::interfaces();
        let iface = interfaces
            .into_iter()
            .find(|i| i.name == name)
            .ok_or_else(|| Error::InterfaceNotFound(name.to_string()))?;

        let mac_bytes = if let Some(mac) = iface.mac {
            [mac.0, mac.1, mac.2, mac.3, mac.4, mac.5]
        } else {
            [0, 0, 0, 0, 0, 0]
        };

        Ok(Self {
            name: iface.name.clone(),
            mac_address: MacAddr(mac_bytes),
        })
    }

    /// Get the first IPv4 address of this interface, if any
    pub fn ipv4(&self) -> Option<std::net::Ipv4Addr> {
        let interfaces = pnet_datalink::interfaces();
        let interface = interfaces
            .into_iter()
            .find(|iface| iface.name == self.name)?;

        for ip_network in interface.ips {
            if let ipnetwork::IpNetwork::V4(ipv4_net) = ip_network {
                return Some(ipv4_net.ip());
            }
        }

        None
    }

    /// Open a sender channel for this interface
    ///
    /// The returned [`LinkSender`] owns the channel exclusively; dropping
    /// it releases the underlying handle.
    pub fn open_sender(&self) -> Result<LinkSender> {
        let interfaces = pnet_datalink::interfaces();
        let interface = interfaces
            .into_iter()
            .find(|iface| iface.name == self.name)
            .ok_or_else(|| Error::InterfaceNotFound(self.name.clone()))?;

        let (tx, _) = match pnet_datalink::channel(&interface, Default::default()) {
            Ok(Channel::Ethernet(tx, rx)) => (tx, rx),
            Ok(_) => return Err(Error::Interface("Unsupported channel type".to_string())),
            Err(e) => return Err(Error::Interface(format!("Failed to open channel: {}", e))),
        };

        Ok(LinkSender { tx })
    }
}

impl fmt::Display for Interface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.mac_address)
    }
}

/// Exclusive link-layer sender bound to one interface
pub struct LinkSender {
    tx: Box<dyn DataLinkSender>,
}

impl LinkSender {
    /// Send one raw frame (including the Ethernet header)
    pub fn send(&mut self, frame: &[u8]) -> Result<()> {
        self.tx
            .send_to(frame, None)
            .ok_or_else(|| Error::transmission("link channel closed"))?
            .map_err(|e| Error::Transmission(format!("link send failed: {}", e)))
    }
}
