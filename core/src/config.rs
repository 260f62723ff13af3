//! Configuration management for the listing tools and output defaults.
//!
//! Stores configuration in JSON format at `~/.lsaddr/config.json`.
//! Every field is optional; missing ones fall back to the built-in defaults.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::domain::Platform;
use crate::encoder::OutputFormat;
use crate::error::{Error, Result};

/// An external listing tool invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolCommand {
    /// Program name or path.
    pub program: String,

    /// Fixed arguments.
    #[serde(default)]
    pub args: Vec<String>,

    /// Number of leading output lines to drop (column headers).
    #[serde(default, rename = "skipLines")]
    pub skip_lines: usize,

    /// Non-zero exit statuses that still count as a successful listing.
    #[serde(default, rename = "toleratedExitCodes")]
    pub tolerated_exit_codes: Vec<i32>,
}

impl ToolCommand {
    pub fn new(program: &str, args: &[&str], skip_lines: usize) -> Self {
        Self {
            program: program.to_string(),
            args: args.iter().map(|a| a.to_string()).collect(),
            skip_lines,
            tolerated_exit_codes: Vec::new(),
        }
    }

    /// Accept `codes` as successful exits besides 0.
    pub fn with_tolerated_exit_codes(mut self, codes: &[i32]) -> Self {
        self.tolerated_exit_codes = codes.to_vec();
        self
    }

    /// Whether an exit with `code` produced a usable listing.
    pub fn accepts_exit_code(&self, code: i32) -> bool {
        code == 0 || self.tolerated_exit_codes.contains(&code)
    }

    /// Command line as typed in a shell, for diagnostics.
    pub fn display(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

fn default_lsof() -> ToolCommand {
    // -i: network files only, -n: no host names, -P: no port names.
    // lsof exits with 1 when no network file is open.
    ToolCommand::new("lsof", &["-i", "-n", "-P"], 1).with_tolerated_exit_codes(&[1])
}

fn default_netstat() -> ToolCommand {
    // -b adds the owning executable on a line after each row
    ToolCommand::new("netstat", &["-n", "-a", "-b", "-o"], 0)
}

fn default_pgrep() -> String {
    "pgrep".to_string()
}

fn default_defaults() -> String {
    "defaults".to_string()
}

/// Configuration data stored in JSON format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LookupConfig {
    /// Listing tool used on macOS and Linux.
    #[serde(default = "default_lsof")]
    pub lsof: ToolCommand,

    /// Listing tool used on Windows.
    #[serde(default = "default_netstat")]
    pub netstat: ToolCommand,

    /// Program used to find PIDs by process name.
    #[serde(default = "default_pgrep", rename = "pgrepProgram")]
    pub pgrep_program: String,

    /// Program used to read bundle property lists.
    #[serde(default = "default_defaults", rename = "defaultsProgram")]
    pub defaults_program: String,

    /// Output format used when none is requested explicitly.
    #[serde(default, rename = "outputFormat")]
    pub output_format: OutputFormat,
}

impl LookupConfig {
    /// Listing tool for `platform`.
    pub fn tool_command(&self, platform: Platform) -> &ToolCommand {
        if platform.uses_netstat() {
            &self.netstat
        } else {
            &self.lsof
        }
    }
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            lsof: default_lsof(),
            netstat: default_netstat(),
            pgrep_program: default_pgrep(),
            defaults_program: default_defaults(),
            output_format: OutputFormat::default(),
        }
    }
}

/// Configuration store.
///
/// Handles reading and writing configuration to `~/.lsaddr/config.json`.
pub struct ConfigStore {
    /// Path to the configuration file.
    config_path: PathBuf,
}

impl ConfigStore {
    /// Create a new config store with the default path.
    ///
    /// Default path: `~/.lsaddr/config.json`
    pub fn new() -> Result<Self> {
        let home = dirs::home_dir()
            .ok_or_else(|| Error::Config("Could not determine home directory".to_string()))?;

        let config_path = home.join(".lsaddr").join("config.json");

        Ok(Self { config_path })
    }

    /// Create a config store with a custom path.
    pub fn with_path(config_path: PathBuf) -> Self {
        Self { config_path }
    }

    pub fn path(&self) -> &PathBuf {
        &self.config_path
    }

    /// Load configuration from disk.
    ///
    /// Returns default config if the file doesn't exist.
    pub async fn load(&self) -> Result<LookupConfig> {
        if !self.config_path.exists() {
            return Ok(LookupConfig::default());
        }

        let content = fs::read_to_string(&self.config_path)
            .await
            .map_err(|e| Error::Config(format!("Failed to read config: {}", e)))?;

        serde_json::from_str(&content)
            .map_err(|e| Error::Config(format!("Failed to parse config: {}", e)))
    }

    /// Save configuration to disk.
    ///
    /// Creates the config directory if it doesn't exist.
    pub async fn save(&self, config: &LookupConfig) -> Result<()> {
        if let Some(config_dir) = self.config_path.parent() {
            if !config_dir.exists() {
                fs::create_dir_all(config_dir).await.map_err(|e| {
                    Error::Config(format!("Failed to create config directory: {}", e))
                })?;
            }
        }

        let content = serde_json::to_string_pretty(config)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;

        // Write atomically by writing to temp file then renaming
        let temp_path = self.config_path.with_extension("json.tmp");

        let mut file = fs::File::create(&temp_path)
            .await
            .map_err(|e| Error::Config(format!("Failed to create temp config file: {}", e)))?;

        file.write_all(content.as_bytes())
            .await
            .map_err(|e| Error::Config(format!("Failed to write config: {}", e)))?;

        file.sync_all()
            .await
            .map_err(|e| Error::Config(format!("Failed to sync config: {}", e)))?;

        fs::rename(&temp_path, &self.config_path)
            .await
            .map_err(|e| Error::Config(format!("Failed to rename config file: {}", e)))?;

        Ok(())
    }
}
