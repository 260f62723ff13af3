//! Process lookup adapter using `pgrep`.

use std::process::Stdio;

use tokio::process::Command;

use crate::error::{Error, Result};
use crate::ports::ProcessLookup;

/// Finds PIDs by process name with `pgrep <name>`.
#[derive(Debug, Clone)]
pub struct PgrepLookup {
    program: String,
}

impl PgrepLookup {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for PgrepLookup {
    fn default() -> Self {
        Self::new("pgrep")
    }
}

impl ProcessLookup for PgrepLookup {
    async fn pids_by_name(&self, name: &str) -> Result<Vec<String>> {
        let output = Command::new(&self.program)
            .arg(name)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| Error::CommandFailed(format!("Failed to run {}: {}", self.program, e)))?;

        match output.status.code() {
            Some(0) => Ok(parse_pgrep_output(&String::from_utf8_lossy(&output.stdout))),
            // pgrep exits with 1 when no process matched
            Some(1) => Ok(Vec::new()),
            _ => Err(Error::CommandFailed(format!(
                "{} {} failed: {}",
                self.program,
                name,
                String::from_utf8_lossy(&output.stderr).trim()
            ))),
        }
    }
}

/// One PID per line.
fn parse_pgrep_output(output: &str) -> Vec<String> {
    output
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_pgrep_output() {
        assert_eq!(parse_pgrep_output("11778\n11790\n"), vec!["11778", "11790"]);
        assert!(parse_pgrep_output("\n").is_empty());
    }
}
