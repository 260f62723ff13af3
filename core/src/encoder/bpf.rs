//! Packet-filter (BPF) expression encoder.

use std::collections::HashSet;
use std::io::Write;

use super::Encoder;
use crate::domain::{NetAddr, NetFile};
use crate::error::Result;

/// Writes one expression matching every unique address of the list:
///
/// ```text
/// host 192.168.0.61 and port 54104 or host ::1 and port 60051
/// ```
///
/// Terms are deduplicated in order of first appearance (source, then
/// destination, connection by connection), so wildcard hosts of either
/// family listening on one port collapse into a single `port N`.
pub struct BpfEncoder<W: Write> {
    writer: W,
}

impl<W: Write> BpfEncoder<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> Encoder for BpfEncoder<W> {
    fn encode(&mut self, files: &[NetFile]) -> Result<()> {
        let mut seen = HashSet::new();
        let terms: Vec<String> = files
            .iter()
            .flat_map(|f| f.addrs())
            .filter_map(term)
            .filter(|t| seen.insert(t.clone()))
            .collect();

        writeln!(self.writer, "{}", terms.join(" or "))?;
        Ok(())
    }
}

/// Filter term for one address.
///
/// A wildcard host only constrains the port; a wildcard host without a
/// port (an unconnected peer such as `0.0.0.0:0`) matches nothing useful.
fn term(addr: &NetAddr) -> Option<String> {
    match (addr.is_wildcard(), addr.port()) {
        (true, 0) => None,
        (true, port) => Some(format!("port {}", port)),
        (false, port) => Some(format!("host {} and port {}", addr.host(), port)),
    }
}
