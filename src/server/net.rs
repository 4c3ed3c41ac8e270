use std::net::{IpAddr, UdpSocket};

/// Discovers a non-loopback IPv4 address of this machine, for printing a
/// browsable URL when binding the wildcard address.
///
/// Uses a connected UDP socket to learn the outbound interface address;
/// no packet is actually sent.
pub fn local_ipv4() -> Option<IpAddr> {
    let socket = UdpSocket::bind("0.0.0.0:0").ok()?;
    socket.connect("8.8.8.8:80").ok()?;

    let addr = socket.local_addr().ok()?.ip();
    match addr {
        IpAddr::V4(v4) if !v4.is_loopback() && !v4.is_unspecified() => Some(addr),
        _ => None,
    }
}
