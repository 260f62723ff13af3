//! Typed network addresses.

use std::fmt;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use serde::{Serialize, Serializer};

use super::services;
use crate::error::{Error, Result};

// ============================================================================
// Network
// ============================================================================

/// Transport protocol of an address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    Tcp,
    Udp,
}

impl Network {
    /// Derive the network from a protocol token such as `TCP`, `UDP` or `tcp6`.
    ///
    /// Matching is a case-insensitive substring test, so version suffixes are
    /// accepted. Anything that mentions neither protocol is rejected.
    pub fn from_kind(kind: &str) -> Result<Self> {
        let lower = kind.to_lowercase();
        if lower.contains("tcp") {
            Ok(Network::Tcp)
        } else if lower.contains("udp") {
            Ok(Network::Udp)
        } else {
            Err(Error::UnsupportedNetwork(lower))
        }
    }

    /// Canonical lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Network::Tcp => "tcp",
            Network::Udp => "udp",
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// NetAddr
// ============================================================================

/// A host/port pair bound to a transport protocol.
///
/// The host is kept as written by the listing tool (IP literal, hostname or
/// the `*` wildcard) and never resolved. Ports are numeric: a `*` port is
/// stored as 0 and a service name as its registered port, so `*:*` displays
/// as `*:0` and `host:https` as `host:443`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NetAddr {
    network: Network,
    host: String,
    port: u16,
}

impl NetAddr {
    /// Create an address from already validated parts.
    pub fn new(network: Network, host: impl Into<String>, port: u16) -> Self {
        Self {
            network,
            host: host.into(),
            port,
        }
    }

    /// Parse `host:port`, `[v6]:port` or `hostname:port`.
    pub fn parse(network: Network, addr: &str) -> Result<Self> {
        let (host, port) = match addr.strip_prefix('[') {
            Some(rest) => {
                let (host, tail) = rest
                    .split_once(']')
                    .ok_or_else(|| invalid(addr, "missing ']' in address"))?;
                let port = tail
                    .strip_prefix(':')
                    .ok_or_else(|| invalid(addr, "missing port in address"))?;
                let ip = host.split('%').next().unwrap_or_default();
                if ip.parse::<Ipv6Addr>().is_err() {
                    return Err(invalid(addr, "bracketed host is not an IPv6 address"));
                }
                (host, port)
            }
            None => {
                let (host, port) = addr
                    .rsplit_once(':')
                    .ok_or_else(|| invalid(addr, "missing port in address"))?;
                if host.contains(':') {
                    return Err(invalid(addr, "too many colons in address"));
                }
                validate_host(addr, host)?;
                (host, port)
            }
        };

        Ok(Self::new(network, host, parse_port(addr, port)?))
    }

    /// Canonical network name, `"tcp"` or `"udp"`.
    pub fn network(&self) -> &'static str {
        self.network.as_str()
    }

    pub fn kind(&self) -> Network {
        self.network
    }

    /// Host without brackets.
    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// Whether the host stands for any address (`*`, `0.0.0.0`, `::`).
    pub fn is_wildcard(&self) -> bool {
        self.host == "*"
            || self
                .host
                .parse::<IpAddr>()
                .map(|ip| ip.is_unspecified())
                .unwrap_or(false)
    }
}

impl fmt::Display for NetAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.host.contains(':') {
            write!(f, "[{}]:{}", self.host, self.port)
        } else {
            write!(f, "{}:{}", self.host, self.port)
        }
    }
}

impl Serialize for NetAddr {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Parse `addr` as an address of the network named by `kind`.
///
/// `kind` may be in any case and carry extra characters (`TCP`, `udp6`).
pub fn parse_net_addr(kind: &str, addr: &str) -> Result<NetAddr> {
    NetAddr::parse(Network::from_kind(kind)?, addr)
}

fn validate_host(addr: &str, host: &str) -> Result<()> {
    if host.is_empty() {
        return Err(invalid(addr, "missing host in address"));
    }
    if host == "*" || host.parse::<Ipv4Addr>().is_ok() {
        return Ok(());
    }
    let hostname = host
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '.' | '_'));
    if !hostname {
        return Err(invalid(addr, "host is neither an IP address nor a hostname"));
    }
    Ok(())
}

fn parse_port(addr: &str, port: &str) -> Result<u16> {
    if port.is_empty() {
        return Err(invalid(addr, "missing port in address"));
    }
    if port == "*" {
        return Ok(0);
    }
    if let Ok(port) = port.parse::<u16>() {
        return Ok(port);
    }
    services::port_by_name(port).ok_or_else(|| invalid(addr, "unknown port"))
}

fn invalid(addr: &str, reason: &str) -> Error {
    Error::InvalidAddress {
        addr: addr.to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ipv4_address() {
        let addr = parse_net_addr("TCP", "192.168.0.61:51291").unwrap();
        assert_eq!(addr.host(), "192.168.0.61");
        assert_eq!(addr.port(), 51291);
        assert_eq!(addr.network(), "tcp");
        assert_eq!(addr.to_string(), "192.168.0.61:51291");
    }

    #[test]
    fn test_parse_ipv6_address() {
        let addr = parse_net_addr("UDP", "[::1]:60051").unwrap();
        assert_eq!(addr.host(), "::1");
        assert_eq!(addr.port(), 60051);
        assert_eq!(addr.network(), "udp");
        assert_eq!(addr.to_string(), "[::1]:60051");

        let scoped = parse_net_addr("tcp", "[fe80::1%en0]:8080").unwrap();
        assert_eq!(scoped.host(), "fe80::1%en0");
    }

    #[test]
    fn test_parse_hostname_and_service() {
        let addr = parse_net_addr("tcp", "localhost:https").unwrap();
        assert_eq!(addr.host(), "localhost");
        assert_eq!(addr.port(), 443);
        assert_eq!(addr.to_string(), "localhost:443");
    }

    #[test]
    fn test_parse_wildcard() {
        let addr = parse_net_addr("UDP", "*:*").unwrap();
        assert_eq!(addr.host(), "*");
        assert_eq!(addr.port(), 0);
        assert!(addr.is_wildcard());

        assert_eq!(addr.to_string(), "*:0");

        assert!(parse_net_addr("tcp", "[::]:445").unwrap().is_wildcard());
        assert!(parse_net_addr("tcp", "0.0.0.0:0").unwrap().is_wildcard());
        assert!(!parse_net_addr("tcp", "127.0.0.1:80").unwrap().is_wildcard());
    }

    #[test]
    fn test_network_kind_suffix() {
        assert_eq!(Network::from_kind("TCP6").unwrap(), Network::Tcp);
        assert_eq!(Network::from_kind("udp4").unwrap(), Network::Udp);
    }

    #[test]
    fn test_unsupported_network() {
        let err = parse_net_addr("SCTP", "127.0.0.1:80").unwrap_err();
        assert!(matches!(err, Error::UnsupportedNetwork(ref kind) if kind == "sctp"));
    }

    #[test]
    fn test_invalid_addresses() {
        for addr in ["127.0.0.1", "::1:60051", ":80", "127.0.0.1:", "[::1]", "[nope]:80", "host:notaport"] {
            let result = parse_net_addr("tcp", addr);
            assert!(
                matches!(result, Err(Error::InvalidAddress { .. })),
                "{} should not parse",
                addr
            );
        }
    }
}
