//! lsof output decoder.
//!
//! Expected format (`lsof -i -n -P`, header already removed):
//! ```text
//! Spotify   11778 danielmorandini  128u  IPv4 0x25c5bf09993eff03      0t0  TCP 192.168.0.61:51291->35.186.224.47:443 (ESTABLISHED)
//! postgres    676 danielmorandini   10u  IPv6 0x25c5bf0997ca88e3      0t0  UDP [::1]:60051->[::1]:60051
//! ```

use std::io::BufRead;

use super::utils::{chunk_fields, scan_lines};
use crate::domain::OpenFile;
use crate::error::Result;

/// COMMAND PID USER FD TYPE DEVICE SIZE/OFF NODE NAME
const MIN_FIELDS: usize = 9;

const NAME_INDEX: usize = 8;

/// Decode a whole lsof listing. The first malformed line aborts the decode.
pub fn decode_lsof_output<R: BufRead>(reader: R) -> Result<Vec<OpenFile>> {
    let mut files = Vec::new();
    scan_lines(reader, |line| {
        if line.trim().is_empty() {
            return Ok(());
        }
        files.push(parse_lsof_line(line)?);
        Ok(())
    })?;
    Ok(files)
}

/// Decode a single lsof data line.
///
/// STATE is only reported for TCP sockets and is recognised by its
/// parentheses, not by the column count.
pub fn parse_lsof_line(line: &str) -> Result<OpenFile> {
    let fields = chunk_fields(line, MIN_FIELDS)?;

    let (name, state) = match fields.last() {
        Some(last) if fields.len() > MIN_FIELDS && is_state(last) => {
            (&fields[NAME_INDEX..fields.len() - 1], *last)
        }
        _ => (&fields[NAME_INDEX..], ""),
    };

    Ok(OpenFile {
        command: unescape(fields[0]),
        pid: fields[1].to_string(),
        user: fields[2].to_string(),
        fd: fields[3].to_string(),
        r#type: fields[4].to_string(),
        device: fields[5].to_string(),
        node: fields[7].to_string(),
        name: name.join(" "),
        state: state.to_string(),
    })
}

fn is_state(token: &str) -> bool {
    token.len() > 2 && token.starts_with('(') && token.ends_with(')')
}

/// Undo lsof's escaping of spaces and slashes in command names.
fn unescape(command: &str) -> String {
    command.replace("\\x20", " ").replace("\\x2f", "/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_parse_lsof_line() {
        let line = "Spotify   11778 danielmorandini  128u  IPv4 0x25c5bf09993eff03      0t0  TCP 192.168.0.61:51291->35.186.224.47:https (ESTABLISHED)";
        let f = parse_lsof_line(line).unwrap();

        assert_eq!(f.command, "Spotify");
        assert_eq!(f.pid, "11778");
        assert_eq!(f.user, "danielmorandini");
        assert_eq!(f.fd, "128u");
        assert_eq!(f.r#type, "IPv4");
        assert_eq!(f.device, "0x25c5bf09993eff03");
        assert_eq!(f.node, "TCP");
        assert_eq!(f.name, "192.168.0.61:51291->35.186.224.47:https");
        assert_eq!(f.state, "(ESTABLISHED)");
    }

    #[test]
    fn test_parse_lsof_line_without_state() {
        let line = "postgres    676 danielmorandini   10u  IPv6 0x25c5bf0997ca88e3      0t0  UDP [::1]:60051->[::1]:60051";
        let f = parse_lsof_line(line).unwrap();

        assert_eq!(f.node, "UDP");
        assert_eq!(f.name, "[::1]:60051->[::1]:60051");
        assert_eq!(f.state, "");
    }

    #[test]
    fn test_unescape_command() {
        let line = r"Code\x20Helper  1234  user   10u  IPv4 0x1234567890abcdef      0t0  TCP *:3000 (LISTEN)";
        let f = parse_lsof_line(line).unwrap();
        assert_eq!(f.command, "Code Helper");
        assert_eq!(f.name, "*:3000");
        assert_eq!(f.state, "(LISTEN)");
    }

    const LSOF_EXAMPLE: &str = "Dropbox     614 danielmorandini  236u  IPv4 0x25c5bf09a4161583      0t0  TCP 192.168.0.61:58122->162.125.66.7:https (ESTABLISHED)
Dropbox     614 danielmorandini  247u  IPv4 0x25c5bf09a393d583      0t0  TCP 192.168.0.61:58282->162.125.18.133:https (ESTABLISHED)
postgres    676 danielmorandini   10u  IPv6 0x25c5bf0997ca88e3      0t0  UDP [::1]:60051->[::1]:60051
";

    #[test]
    fn test_decode_lsof_output() {
        let files = decode_lsof_output(LSOF_EXAMPLE.as_bytes()).unwrap();
        assert_eq!(files.len(), 3);
        assert_eq!(files[0].command, "Dropbox");
        assert_eq!(files[2].command, "postgres");
    }

    #[test]
    fn test_decode_aborts_on_malformed_line() {
        let output = format!("{}Dropbox 614 short line\n", LSOF_EXAMPLE);
        let err = decode_lsof_output(output.as_bytes()).unwrap_err();
        assert!(matches!(err, Error::MalformedLine { expected: 9, found: 4, .. }));
    }
}
