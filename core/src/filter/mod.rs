//! Filter building: selector resolution and line prefiltering.

mod bundle;

pub use bundle::{BundleResolver, BUNDLE_SUFFIX};

use regex::bytes::Regex;

use crate::decoder::Decoder;
use crate::error::Result;
use crate::ports::SelectorResolver;

/// Resolver that uses the selector verbatim.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughResolver;

impl SelectorResolver for PassthroughResolver {
    async fn resolve(&self, selector: &str) -> String {
        selector.to_string()
    }
}

/// Compiled pattern selecting the lines that belong to the target process.
#[derive(Debug, Clone)]
pub struct FilterPattern {
    regex: Regex,
}

impl FilterPattern {
    /// Compile `expr` as a regular expression.
    pub fn compile(expr: &str) -> Result<Self> {
        Ok(Self {
            regex: Regex::new(expr)?,
        })
    }

    /// Source expression.
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    pub fn is_match(&self, line: &[u8]) -> bool {
        self.regex.is_match(line)
    }

    /// Drop the records of `output` that do not match.
    ///
    /// A record is a line `decoder` recognises as one, followed by the
    /// lines that belong to it. It is kept when any of its lines matches.
    /// Lines before the first record are dropped. Matching works on raw
    /// bytes, so output in a legacy codepage is still filtered.
    pub fn filter_output(&self, output: &[u8], decoder: Decoder) -> Result<Vec<u8>> {
        let body = output.strip_suffix(b"\n").unwrap_or(output);

        let mut kept = Vec::with_capacity(output.len());
        let mut record: Vec<&[u8]> = Vec::new();

        for line in body.split(|&b| b == b'\n') {
            let line = line.strip_suffix(b"\r").unwrap_or(line);
            if decoder.is_record_line(&String::from_utf8_lossy(line)) {
                self.flush(&mut record, &mut kept);
                record.push(line);
            } else if !record.is_empty() {
                record.push(line);
            }
        }
        self.flush(&mut record, &mut kept);

        Ok(kept)
    }

    fn flush(&self, record: &mut Vec<&[u8]>, kept: &mut Vec<u8>) {
        if record.iter().any(|line| self.is_match(line)) {
            for line in record.iter() {
                kept.extend_from_slice(line);
                kept.push(b'\n');
            }
        }
        record.clear();
    }
}

/// Resolve `selector` and compile the result.
pub async fn build_filter<R: SelectorResolver>(resolver: &R, selector: &str) -> Result<FilterPattern> {
    let expr = resolver.resolve(selector).await;
    FilterPattern::compile(&expr)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[tokio::test]
    async fn test_passthrough() {
        let pattern = build_filter(&PassthroughResolver, "Spotify").await.unwrap();
        assert_eq!(pattern.as_str(), "Spotify");
    }

    #[test]
    fn test_filter_non_utf8_output() {
        // executable name in a legacy codepage
        let mut output = b"  TCP    0.0.0.0:3000           0.0.0.0:0              LISTENING       5432\n [n\xf6de.exe]\n".to_vec();
        output.extend_from_slice(b"  TCP    0.0.0.0:445            0.0.0.0:0              LISTENING       4\n");

        let pattern = FilterPattern::compile("5432").unwrap();
        let kept = pattern.filter_output(&output, Decoder::Netstat).unwrap();
        assert_eq!(kept.split(|&b| b == b'\n').filter(|l| !l.is_empty()).count(), 2);

        let files = Decoder::Netstat.decode(&kept).unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].pid, "5432");
        assert!(files[0].command.ends_with("de.exe"));
    }

    #[tokio::test]
    async fn test_invalid_pattern() {
        let result = build_filter(&PassthroughResolver, "Spotify(").await;
        assert!(matches!(result, Err(Error::InvalidPattern(_))));
    }

    #[test]
    fn test_filter_lsof_output() {
        let output = "Dropbox     614 dm  236u  IPv4 0x25c5bf09a4161583      0t0  TCP 192.168.0.61:58122->162.125.66.7:443 (ESTABLISHED)
postgres    676 dm   10u  IPv6 0x25c5bf0997ca88e3      0t0  UDP [::1]:60051->[::1]:60051
Dropbox     614 dm  247u  IPv4 0x25c5bf09a393d583      0t0  TCP 192.168.0.61:58282->162.125.18.133:443 (ESTABLISHED)
";
        let pattern = FilterPattern::compile("Dropbox").unwrap();
        let kept = pattern.filter_output(output.as_bytes(), Decoder::Lsof).unwrap();
        let kept = String::from_utf8(kept).unwrap();

        assert_eq!(kept.lines().count(), 2);
        assert!(kept.lines().all(|l| l.starts_with("Dropbox")));
    }

    #[test]
    fn test_filter_keeps_netstat_annotations() {
        let output = "
Active Connections

  Proto  Local Address          Foreign Address        State           PID
  TCP    0.0.0.0:135            0.0.0.0:0              LISTENING       748
  RpcSs
 [svchost.exe]
  TCP    0.0.0.0:3000           0.0.0.0:0              LISTENING       5432
 [node.exe]
";
        let pattern = FilterPattern::compile("node").unwrap();
        let kept = pattern.filter_output(output.as_bytes(), Decoder::Netstat).unwrap();
        let kept = String::from_utf8(kept).unwrap();

        assert_eq!(
            kept,
            "  TCP    0.0.0.0:3000           0.0.0.0:0              LISTENING       5432\n [node.exe]\n"
        );
    }

    #[test]
    fn test_filter_by_pid_disjunction() {
        let output = "  TCP    0.0.0.0:135            0.0.0.0:0              LISTENING       748
  TCP    0.0.0.0:445            0.0.0.0:0              LISTENING       4
  UDP    [::1]:62261            *:*                                    1036
";
        let pattern = FilterPattern::compile("748|1036").unwrap();
        let kept = pattern.filter_output(output.as_bytes(), Decoder::Netstat).unwrap();
        assert_eq!(String::from_utf8(kept).unwrap().lines().count(), 2);
    }
}
