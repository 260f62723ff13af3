//! Decoded open network files.

use super::addr::{NetAddr, Network};
use crate::error::Result;

/// Separator between the local and the remote end in a file name.
const DIRECTION_SEPARATOR: &str = "->";

/// One socket owned by one process, as reported by a listing tool.
///
/// Fields are kept as raw text. Columns a tool does not report are empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OpenFile {
    /// Command owning the file.
    pub command: String,
    pub pid: String,
    pub user: String,
    /// File descriptor with access mode, e.g. `128u`.
    pub fd: String,
    /// Address family, e.g. `IPv4`.
    pub r#type: String,
    pub device: String,
    /// Protocol, e.g. `TCP` or `UDP`.
    pub node: String,
    /// `src->dst` for connected sockets, `src` otherwise.
    pub name: String,
    /// Connection state, e.g. `(ESTABLISHED)`. Empty when not reported.
    pub state: String,
}

impl OpenFile {
    /// Split `name` into typed source and destination addresses.
    ///
    /// The network comes from `node`. A name without `->` has no remote
    /// peer and yields `None` as destination.
    pub fn addresses(&self) -> Result<(NetAddr, Option<NetAddr>)> {
        let network = Network::from_kind(&self.node)?;
        match self.name.split_once(DIRECTION_SEPARATOR) {
            Some((src, dst)) => Ok((
                NetAddr::parse(network, src)?,
                Some(NetAddr::parse(network, dst)?),
            )),
            None => Ok((NetAddr::parse(network, &self.name)?, None)),
        }
    }
}
