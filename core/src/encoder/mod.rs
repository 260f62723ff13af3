//! Encoders serializing lookup results.

mod bpf;
mod csv;
mod json;

pub use self::bpf::BpfEncoder;
pub use self::csv::CsvEncoder;
pub use self::json::JsonEncoder;

use std::fmt;
use std::io::Write;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::NetFile;
use crate::error::{Error, Result};

/// Serializes a list of network files into a byte sink.
pub trait Encoder {
    fn encode(&mut self, files: &[NetFile]) -> Result<()>;
}

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One `command,src,dst` row per connection.
    #[default]
    Csv,
    /// A packet-filter expression over all unique addresses.
    Bpf,
    /// Pretty-printed JSON array.
    Json,
}

impl OutputFormat {
    pub const ALL: [OutputFormat; 3] = [OutputFormat::Csv, OutputFormat::Bpf, OutputFormat::Json];

    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Bpf => "bpf",
            OutputFormat::Json => "json",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        OutputFormat::ALL
            .into_iter()
            .find(|format| format.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::Config(format!("unknown output format \"{}\"", s)))
    }
}

/// Encode `files` as `format` into `writer`.
pub fn encode<W: Write>(format: OutputFormat, files: &[NetFile], writer: W) -> Result<()> {
    match format {
        OutputFormat::Csv => CsvEncoder::new(writer).encode(files),
        OutputFormat::Bpf => BpfEncoder::new(writer).encode(files),
        OutputFormat::Json => JsonEncoder::new(writer).encode(files),
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::domain::{NetAddr, NetFile, Network};

    /// Two connections sharing the `[::1]:60051` address.
    pub fn net_files() -> Vec<NetFile> {
        vec![
            NetFile {
                command: "Spotify".to_string(),
                src: NetAddr::new(Network::Tcp, "192.168.0.61", 54104),
                dst: Some(NetAddr::new(Network::Tcp, "::1", 60051)),
            },
            NetFile {
                command: "postgres".to_string(),
                src: NetAddr::new(Network::Udp, "::1", 60051),
                dst: Some(NetAddr::new(Network::Udp, "::1", 60051)),
            },
        ]
    }
}
