//! Bundle metadata adapter using macOS `defaults`.

use std::path::Path;
use std::process::Stdio;

use tokio::process::Command;

use crate::error::{Error, Result};
use crate::ports::BundleMetadata;

/// Reads property list values with `defaults read <plist> <key>`.
///
/// `defaults` understands both XML and binary property lists.
#[derive(Debug, Clone)]
pub struct DefaultsMetadata {
    program: String,
}

impl DefaultsMetadata {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for DefaultsMetadata {
    fn default() -> Self {
        Self::new("defaults")
    }
}

impl BundleMetadata for DefaultsMetadata {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    async fn read_string(&self, plist: &Path, key: &str) -> Result<String> {
        if !plist.is_file() {
            return Err(Error::BundleMetadata(format!(
                "{} not found",
                plist.display()
            )));
        }

        // defaults takes the domain path without its extension
        let domain = plist.with_extension("");
        let output = Command::new(&self.program)
            .arg("read")
            .arg(&domain)
            .arg(key)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| Error::BundleMetadata(format!("Failed to run {}: {}", self.program, e)))?;

        if !output.status.success() {
            return Err(Error::BundleMetadata(format!(
                "unable to read {} from {}: {}",
                key,
                plist.display(),
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        let value = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if value.is_empty() {
            return Err(Error::BundleMetadata(format!(
                "{} is empty in {}",
                key,
                plist.display()
            )));
        }
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_missing_plist() {
        let dir = tempdir().unwrap();
        let plist = dir.path().join("Spotify.app/Contents/Info.plist");

        let metadata = DefaultsMetadata::default();
        assert!(metadata.exists(dir.path()));
        assert!(!metadata.exists(&plist));

        let result = metadata.read_string(&plist, "CFBundleExecutable").await;
        assert!(matches!(result, Err(Error::BundleMetadata(_))));
    }
}
