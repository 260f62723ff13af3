//! Caller-facing connection records.

use serde::Serialize;

use super::addr::NetAddr;
use super::open_file::OpenFile;
use crate::error::Result;

/// A network connection owned by a process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NetFile {
    /// Command owning the file.
    pub command: String,
    /// Source (local) address.
    pub src: NetAddr,
    /// Destination address, absent for listening and unconnected sockets.
    pub dst: Option<NetAddr>,
}

impl NetFile {
    /// Build a record from a decoded open file, resolving its addresses.
    pub fn from_open_file(file: &OpenFile) -> Result<Self> {
        let (src, dst) = file.addresses()?;
        Ok(Self {
            command: file.command.clone(),
            src,
            dst,
        })
    }

    /// Source and destination, in that order, skipping a missing peer.
    pub fn addrs(&self) -> impl Iterator<Item = &NetAddr> {
        std::iter::once(&self.src).chain(self.dst.as_ref())
    }
}

/// Source and destination addresses of `files`, index-aligned.
pub fn hosts(files: &[NetFile]) -> (Vec<NetAddr>, Vec<Option<NetAddr>>) {
    files
        .iter()
        .map(|f| (f.src.clone(), f.dst.clone()))
        .unzip()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Network;

    #[test]
    fn test_from_open_file() {
        let file = OpenFile {
            command: "postgres".to_string(),
            node: "UDP".to_string(),
            name: "[::1]:60051->[::1]:60051".to_string(),
            ..Default::default()
        };

        let net_file = NetFile::from_open_file(&file).unwrap();
        assert_eq!(net_file.command, "postgres");
        assert_eq!(net_file.src, NetAddr::new(Network::Udp, "::1", 60051));
        assert_eq!(net_file.dst, Some(NetAddr::new(Network::Udp, "::1", 60051)));
        assert_eq!(net_file.addrs().count(), 2);
    }

    #[test]
    fn test_hosts() {
        let files = vec![
            NetFile {
                command: "a".to_string(),
                src: NetAddr::new(Network::Tcp, "127.0.0.1", 5432),
                dst: None,
            },
            NetFile {
                command: "b".to_string(),
                src: NetAddr::new(Network::Tcp, "10.0.0.2", 40000),
                dst: Some(NetAddr::new(Network::Tcp, "10.0.0.1", 443)),
            },
        ];

        let (src, dst) = hosts(&files);
        assert_eq!(src.len(), 2);
        assert_eq!(dst[0], None);
        assert_eq!(dst[1].as_ref().map(|a| a.port()), Some(443));
    }

    #[test]
    fn test_serialize() {
        let file = NetFile {
            command: "Spotify".to_string(),
            src: NetAddr::new(Network::Tcp, "192.168.0.61", 51291),
            dst: None,
        };
        let json = serde_json::to_string(&file).unwrap();
        assert_eq!(json, r#"{"command":"Spotify","src":"192.168.0.61:51291","dst":null}"#);
    }
}
