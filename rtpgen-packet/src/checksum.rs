//! Checksum calculations for network packets
//!
//! Internet Checksum (RFC 1071) as used in the IPv4 header, plus the
//! pseudo-header variant for UDP.

/// Calculates the Internet Checksum as defined in RFC 1071.
///
/// The data is treated as a sequence of big-endian 16-bit words which are
/// summed with end-around carry; the result is the one's complement of
/// the folded sum. A trailing odd byte is padded with zero.
pub fn internet_checksum(data: &[u8]) -> u16 {
    let mut sum: u32 = 0;

    let mut words = data.chunks_exact(2);
    for word in &mut words {
        sum += u16::from_be_bytes([word[0], word[1]]) as u32;
    }

    if let Some(&last) = words.remainder().first() {
        sum += (last as u32) << 8;
    }

    while (sum >> 16) != 0 {
        sum = (sum & 0xFFFF) + (sum >> 16);
    }

    !sum as u16
}

/// Calculates the checksum for a UDP datagram including the pseudo-header.
///
/// The pseudo-header carries the source and destination addresses, the
/// protocol number and the transport length, guarding against misdelivered
/// packets.
///
/// # Arguments
///
/// * `src_ip` - Source IP address (4 bytes)
/// * `dst_ip` - Destination IP address (4 bytes)
/// * `protocol` - IP protocol number (17 for UDP)
/// * `data` - The transport header and payload bytes
pub fn transport_checksum(src_ip: &[u8; 4], dst_ip: &[u8; 4], protocol: u8, data: &[u8]) -> u16 {
    let mut pseudo = Vec::with_capacity(12 + data.len());

    pseudo.extend_from_slice(src_ip);
    pseudo.extend_from_slice(dst_ip);
    pseudo.push(0);
    pseudo.push(protocol);
    pseudo.extend_from_slice(&(data.len() as u16).to_be_bytes());
    pseudo.extend_from_slice(data);

    internet_checksum(&pseudo)
}

/// Validates an Internet checksum.
///
/// Checksumming data that already contains its checksum field yields 0
/// (or the one's complement equivalent 0xFFFF) when the checksum is valid.
pub fn validate_checksum(data: &[u8]) -> bool {
    let result = internet_checksum(data);
    result == 0 || result == 0xFFFF
}
