//! Configuration file loading for the BQAT adapter
//!
//! TOML model plus read/write helpers. Resolution priority (ENV over TOML over
//! compiled defaults) lives in the adapter crate; this module only knows how
//! to find, parse, and write the file.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// On-disk configuration (all fields optional; absent fields fall back to the
/// adapter's compiled defaults)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    /// Scoring engine host
    pub server_host: Option<String>,
    /// Scoring engine port
    pub server_port: Option<u16>,
    /// Scoring engine request path
    pub server_path: Option<String>,
    /// Engine request timeout in seconds
    pub timeout_secs: Option<u64>,
    /// Results-object key override in the engine reply
    pub results_key: Option<String>,
    /// Score key override for fingerprint segments
    pub finger_score_key: Option<String>,
    /// Score key override for iris segments
    pub iris_score_key: Option<String>,
    /// Score key override for face segments
    pub face_score_key: Option<String>,
}

/// Default configuration file path for the platform
/// (`~/.config/bqat-sdk/config.toml` or the OS equivalent)
pub fn default_config_path() -> Result<PathBuf> {
    dirs::config_dir()
        .map(|d| d.join("bqat-sdk").join("config.toml"))
        .ok_or_else(|| Error::Config("Could not determine config directory".to_string()))
}

/// Read and parse a TOML config file
pub fn read_toml_config(path: &Path) -> Result<TomlConfig> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("Read TOML failed: {}", e)))?;
    toml::from_str(&content).map_err(|e| Error::Config(format!("Parse TOML failed: {}", e)))
}

/// Write a TOML config file (write to a sibling temp file, then rename)
pub fn write_toml_config(config: &TomlConfig, path: &Path) -> Result<()> {
    let content = toml::to_string_pretty(config)
        .map_err(|e| Error::Config(format!("Serialize TOML failed: {}", e)))?;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let tmp_path = path.with_extension("toml.tmp");
    std::fs::write(&tmp_path, content)?;
    std::fs::rename(&tmp_path, path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_roundtrip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let config = TomlConfig {
            server_host: Some("scoring.internal".to_string()),
            server_port: Some(9090),
            finger_score_key: Some("NFIQ2".to_string()),
            ..Default::default()
        };

        write_toml_config(&config, &path).unwrap();
        let back = read_toml_config(&path).unwrap();

        assert_eq!(back.server_host.as_deref(), Some("scoring.internal"));
        assert_eq!(back.server_port, Some(9090));
        assert_eq!(back.finger_score_key.as_deref(), Some("NFIQ2"));
        assert!(back.server_path.is_none());
    }

    #[test]
    fn test_read_missing_file() {
        let dir = tempdir().unwrap();
        let result = read_toml_config(&dir.path().join("absent.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_partial_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "server_port = 8848\n").unwrap();

        let config = read_toml_config(&path).unwrap();
        assert_eq!(config.server_port, Some(8848));
        assert!(config.server_host.is_none());
    }
}
