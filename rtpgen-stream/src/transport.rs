//! Egress transports
//!
//! Two ways a generated packet leaves the process:
//!
//! - [`RawIpTransport`] hands IP-level bytes to a header-included raw
//!   socket and lets the kernel route them (network-layer send).
//! - [`LinkTransport`] writes full Ethernet frames to a datalink channel
//!   bound to one named interface, bypassing routing (link-layer send).
//!
//! A transport is exclusively owned by one run and releases its socket
//! or channel when dropped.

use rtpgen_core::{Error, Interface, LinkSender, MacAddr, Result};
use socket2::{Domain, Protocol, SockAddr, Socket, Type};
use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4, UdpSocket};

/// Local IPv4 address the kernel routes toward the given destination
///
/// Connecting a UDP socket transmits nothing; it only pins the route,
/// after which `local_addr` reports the source the kernel picked. The
/// raw-socket path needs this up front because its checksums must cover
/// the source address that actually goes out.
pub fn routed_source(destination: Ipv4Addr, port: u16) -> Result<Ipv4Addr> {
    let socket = UdpSocket::bind((Ipv4Addr::UNSPECIFIED, 0))?;
    socket.connect((destination, port))?;

    match socket.local_addr()? {
        SocketAddr::V4(addr) => Ok(*addr.ip()),
        SocketAddr::V6(addr) => Err(Error::transmission(format!(
            "IPv4 socket reported IPv6 local address {}",
            addr
        ))),
    }
}

/// One-way packet egress
pub trait Transport {
    /// Transmit one packet
    fn send(&mut self, packet: &[u8]) -> Result<()>;
}

/// Network-layer transport over a raw IPv4 socket
///
/// The socket is opened with header-included mode so the IPv4 header
/// built by the packet layer goes out as-is. Requires CAP_NET_RAW (or
/// root) on Linux.
pub struct RawIpTransport {
    socket: Socket,
    destination: SockAddr,
}

impl RawIpTransport {
    /// Open a raw socket toward the given destination
    pub fn new(destination: Ipv4Addr) -> Result<Self> {
        let socket = Socket::new(Domain::IPV4, Type::RAW, Some(Protocol::UDP))?;
        socket.set_header_included(true)?;

        Ok(Self {
            socket,
            // Port is carried in the UDP header we build ourselves.
            destination: SockAddr::from(SocketAddrV4::new(destination, 0)),
        })
    }
}

impl Transport for RawIpTransport {
    fn send(&mut self, packet: &[u8]) -> Result<()> {
        self.socket.send_to(packet, &self.destination)?;
        Ok(())
    }
}

/// Link-layer transport bound to a named interface
pub struct LinkTransport {
    sender: LinkSender,
    interface: Interface,
}

impl LinkTransport {
    /// Open a datalink channel on the named interface
    pub fn new(interface_name: &str) -> Result<Self> {
        let interface = Interface::by_name(interface_name)?;
        let sender = interface.open_sender()?;

        Ok(Self { sender, interface })
    }

    /// MAC address of the bound interface (frame source address)
    pub fn mac(&self) -> MacAddr {
        self.interface.mac_address
    }

    /// First IPv4 address of the bound interface
    ///
    /// No routing decision happens on this path, so the kernel never
    /// fills in an IP source; callers without an explicit source address
    /// take the interface's own.
    pub fn source_ipv4(&self) -> Option<std::net::Ipv4Addr> {
        self.interface.ipv4()
    }
}

impl Transport for LinkTransport {
    fn send(&mut self, packet: &[u8]) -> Result<()> {
        self.sender.send(packet)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_routed_source_toward_loopback() {
        let source = routed_source(Ipv4Addr::LOCALHOST, 6100).unwrap();
        assert_eq!(source, Ipv4Addr::LOCALHOST);
    }
}
