//! Decoders turning listing tool output into [`OpenFile`] records.
//!
//! One decoder exists per listing tool; [`Decoder`] picks the one matching
//! the tool used on the host platform.

mod lsof;
mod netstat;
mod utils;

pub use lsof::{decode_lsof_output, parse_lsof_line};
pub use netstat::{decode_netstat_output, is_netstat_row, parse_netstat_line};
pub use utils::{chunk_fields, chunk_line, scan_lines};

use crate::domain::{OpenFile, Platform};
use crate::error::Result;

/// Output format of the listing tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decoder {
    /// `lsof -i -n -P`
    Lsof,
    /// `netstat -nabo`
    Netstat,
}

impl Decoder {
    /// Decoder for the listing tool used on `platform`.
    pub fn for_platform(platform: Platform) -> Self {
        if platform.uses_netstat() {
            Decoder::Netstat
        } else {
            Decoder::Lsof
        }
    }

    /// Decode raw tool output. Fails on the first malformed line.
    pub fn decode(&self, output: &[u8]) -> Result<Vec<OpenFile>> {
        match self {
            Decoder::Lsof => decode_lsof_output(output),
            Decoder::Netstat => decode_netstat_output(output),
        }
    }

    /// Whether `line` starts a new record.
    ///
    /// Lines that are not records either belong to the record above them
    /// (netstat owner annotations) or are noise.
    pub fn is_record_line(&self, line: &str) -> bool {
        match self {
            Decoder::Lsof => !line.trim().is_empty(),
            Decoder::Netstat => is_netstat_row(line),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_platform() {
        assert_eq!(Decoder::for_platform(Platform::MacOs), Decoder::Lsof);
        assert_eq!(Decoder::for_platform(Platform::Linux), Decoder::Lsof);
        assert_eq!(Decoder::for_platform(Platform::Windows), Decoder::Netstat);
    }

    #[test]
    fn test_record_lines() {
        assert!(Decoder::Lsof.is_record_line("nginx 1 root 6u IPv4 0x1 0t0 TCP *:80 (LISTEN)"));
        assert!(!Decoder::Lsof.is_record_line("   "));
        assert!(!Decoder::Netstat.is_record_line(" [nginx.exe]"));
    }
}
