//! Listing tool adapter using tokio subprocesses.

use std::process::Stdio;

use tokio::process::Command;

use crate::config::ToolCommand;
use crate::error::{Error, Result};
use crate::ports::LineSource;

/// Runs listing tools as child processes and buffers their output.
#[derive(Debug, Clone, Copy, Default)]
pub struct CommandLineSource;

impl CommandLineSource {
    pub fn new() -> Self {
        Self
    }
}

impl LineSource for CommandLineSource {
    /// Run the tool and wait for it to exit.
    ///
    /// Any exit status the command does not accept fails the read, even
    /// when the tool printed something to stdout.
    async fn read(&self, command: &ToolCommand) -> Result<Vec<u8>> {
        let output = Command::new(&command.program)
            .args(&command.args)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| Error::CommandFailed(format!("Failed to run {}: {}", command.program, e)))?;

        let accepted = output
            .status
            .code()
            .map(|code| command.accepts_exit_code(code))
            .unwrap_or(false);
        if !accepted {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let stdout = String::from_utf8_lossy(&output.stdout);
            let reason = if stderr.trim().is_empty() {
                stdout.trim()
            } else {
                stderr.trim()
            };
            return Err(Error::CommandFailed(format!(
                "{} failed ({}): {}",
                command.display(),
                output.status,
                reason
            )));
        }

        Ok(skip_lines(output.stdout, command.skip_lines))
    }
}

/// Drop the first `n` lines of `output`.
fn skip_lines(mut output: Vec<u8>, n: usize) -> Vec<u8> {
    let mut start = 0;
    for _ in 0..n {
        match output[start..].iter().position(|&b| b == b'\n') {
            Some(i) => start += i + 1,
            None => return Vec::new(),
        }
    }
    output.drain(..start);
    output
}
