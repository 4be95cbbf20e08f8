//! Host address discovery.

use std::net::IpAddr;

use crate::error::CollectionError;

/// The first non-loopback IPv4 address among the host's interfaces.
pub fn host_ipv4() -> Result<String, CollectionError> {
    let interfaces =
        local_ip_address::list_afinet_netifas().map_err(|e| CollectionError::HostIp(e.to_string()))?;

    for (_name, address) in interfaces {
        if let IpAddr::V4(v4) = address
            && !v4.is_loopback()
        {
            return Ok(v4.to_string());
        }
    }

    Err(CollectionError::HostIp(
        "no non-loopback ipv4 interface address".to_string(),
    ))
}
