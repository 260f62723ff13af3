//! netstat output decoder.
//!
//! Expected format (`netstat -nabo`):
//! ```text
//! Active Connections
//!
//!   Proto  Local Address          Foreign Address        State           PID
//!   TCP    0.0.0.0:135            0.0.0.0:0              LISTENING       748
//!   RpcSs
//!  [svchost.exe]
//!   UDP    [::1]:62261            *:*                                    1036
//! ```
//! Data rows are interleaved with annotations. The bracketed executable
//! name belongs to the data row above it.

use std::io::BufRead;
use std::net::IpAddr;

use super::utils::{chunk_fields, scan_lines};
use crate::domain::OpenFile;
use crate::error::Result;

/// PROTO LOCAL FOREIGN PID (UDP rows have no STATE)
const MIN_FIELDS: usize = 4;

const BANNER: &str = "Active Connections";
const OWNERSHIP_NOTICE: &str = "Can not obtain ownership information";
const WILDCARD_PEER: &str = "*:*";

/// Kind of a netstat output line.
#[derive(Debug, PartialEq, Eq)]
enum Line<'a> {
    Blank,
    Banner,
    /// `[svchost.exe]`, carries the executable name.
    Owner(&'a str),
    OwnershipUnavailable,
    Row,
    /// Column header, service names and anything else.
    Other,
}

fn classify(line: &str) -> Line<'_> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Line::Blank;
    }
    if trimmed.starts_with(BANNER) {
        return Line::Banner;
    }
    if let Some(owner) = trimmed.strip_prefix('[').and_then(|s| s.strip_suffix(']')) {
        return Line::Owner(owner);
    }
    if trimmed.starts_with(OWNERSHIP_NOTICE) {
        return Line::OwnershipUnavailable;
    }
    match trimmed.split_whitespace().next() {
        Some(proto) if is_protocol(proto) => Line::Row,
        _ => Line::Other,
    }
}

fn is_protocol(token: &str) -> bool {
    matches!(
        token.to_ascii_uppercase().as_str(),
        "TCP" | "UDP" | "TCPV6" | "UDPV6"
    )
}

/// Whether `line` is a connection row, as opposed to noise or annotations.
pub fn is_netstat_row(line: &str) -> bool {
    classify(line) == Line::Row
}

/// Decode a whole netstat listing, skipping everything but data rows.
///
/// A malformed data row aborts the decode.
pub fn decode_netstat_output<R: BufRead>(reader: R) -> Result<Vec<OpenFile>> {
    let mut files: Vec<OpenFile> = Vec::new();
    // Index of the row that may still receive an owner annotation.
    let mut awaiting_owner: Option<usize> = None;

    scan_lines(reader, |line| {
        match classify(line) {
            Line::Row => {
                files.push(parse_netstat_line(line)?);
                awaiting_owner = Some(files.len() - 1);
            }
            Line::Owner(owner) => {
                if let Some(i) = awaiting_owner.take() {
                    files[i].command = owner.to_string();
                }
            }
            Line::OwnershipUnavailable => awaiting_owner = None,
            Line::Blank | Line::Banner | Line::Other => {}
        }
        Ok(())
    })?;

    Ok(files)
}

/// Whether a foreign address stands for "no remote end".
///
/// UDP rows print `*:*`; TCP listeners print `0.0.0.0:0` or `[::]:0`.
fn is_unconnected_peer(foreign: &str) -> bool {
    if foreign == WILDCARD_PEER {
        return true;
    }
    match foreign.rsplit_once(':') {
        Some((host, "0")) => host
            .trim_start_matches('[')
            .trim_end_matches(']')
            .parse::<IpAddr>()
            .map(|ip| ip.is_unspecified())
            .unwrap_or(false),
        _ => false,
    }
}

/// Decode a single netstat data row.
pub fn parse_netstat_line(line: &str) -> Result<OpenFile> {
    let fields = chunk_fields(line, MIN_FIELDS)?;

    let (state, pid) = if fields.len() > MIN_FIELDS {
        (fields[3], fields[fields.len() - 1])
    } else {
        ("", fields[3])
    };

    let (local, foreign) = (fields[1], fields[2]);
    let name = if is_unconnected_peer(foreign) {
        local.to_string()
    } else {
        format!("{}->{}", local, foreign)
    };
    let family = if local.starts_with('[') { "IPv6" } else { "IPv4" };

    Ok(OpenFile {
        pid: pid.to_string(),
        r#type: family.to_string(),
        node: fields[0].to_string(),
        name,
        state: state.to_string(),
        ..Default::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    const NETSTAT_EXAMPLE: &str = "
Active Connections

  Proto  Local Address          Foreign Address        State           PID
  TCP    0.0.0.0:135            0.0.0.0:0              LISTENING       748
  RpcSs
 [svchost.exe]
  TCP    0.0.0.0:445            0.0.0.0:0              LISTENING       4
 Can not obtain ownership information
  TCP    0.0.0.0:5357           0.0.0.0:0              LISTENING       4
 [svchost.exe]
  UDP    [::1]:62261            *:*                                    1036
";

    #[test]
    fn test_decode_netstat_output() {
        let files = decode_netstat_output(NETSTAT_EXAMPLE.as_bytes()).unwrap();
        assert_eq!(files.len(), 4);

        assert_eq!(files[0].command, "svchost.exe");
        assert_eq!(files[0].pid, "748");
        assert_eq!(files[0].name, "0.0.0.0:135");
        assert_eq!(files[0].state, "LISTENING");

        assert_eq!(files[1].command, "");
        assert_eq!(files[2].command, "svchost.exe");
    }

    #[test]
    fn test_udp_row_without_state() {
        let f = parse_netstat_line("  UDP    [::1]:62261            *:*                                    1036").unwrap();
        assert_eq!(f.node, "UDP");
        assert_eq!(f.pid, "1036");
        assert_eq!(f.state, "");
        assert_eq!(f.name, "[::1]:62261");
        assert_eq!(f.r#type, "IPv6");
    }

    #[test]
    fn test_listener_has_no_peer() {
        let v4 = parse_netstat_line("  TCP    0.0.0.0:135    0.0.0.0:0    LISTENING    748").unwrap();
        assert_eq!(v4.name, "0.0.0.0:135");

        let v6 = parse_netstat_line("  TCP    [::]:135    [::]:0    LISTENING    748").unwrap();
        assert_eq!(v6.name, "[::]:135");

        let connected =
            parse_netstat_line("  TCP    127.0.0.1:3000    127.0.0.1:51000    ESTABLISHED    5432").unwrap();
        assert_eq!(connected.name, "127.0.0.1:3000->127.0.0.1:51000");

        let peer_port_zero = parse_netstat_line("  TCP    10.0.0.2:5000    10.0.0.1:0    SYN_SENT    9").unwrap();
        assert_eq!(peer_port_zero.name, "10.0.0.2:5000->10.0.0.1:0");
    }

    #[test]
    fn test_classify() {
        assert_eq!(classify(""), Line::Blank);
        assert_eq!(classify("Active Connections"), Line::Banner);
        assert_eq!(classify(" [svchost.exe]"), Line::Owner("svchost.exe"));
        assert_eq!(
            classify(" Can not obtain ownership information"),
            Line::OwnershipUnavailable
        );
        assert_eq!(classify("  RpcSs"), Line::Other);
        assert_eq!(classify("  Proto  Local Address  Foreign Address  State  PID"), Line::Other);
        assert!(is_netstat_row("  TCP    0.0.0.0:135  0.0.0.0:0  LISTENING  748"));
    }

    #[test]
    fn test_malformed_row_aborts() {
        let err = decode_netstat_output("  TCP    0.0.0.0:135\n".as_bytes()).unwrap_err();
        assert!(matches!(err, Error::MalformedLine { expected: 4, found: 2, .. }));
    }
}
