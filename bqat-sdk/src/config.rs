//! Settings resolution for the BQAT adapter
//!
//! Provides tiered resolution with ENV → TOML → compiled-default priority.
//! Environment variables cover the engine endpoint (the knobs deployments
//! actually turn); the TOML file additionally covers the reply-shape keys.

use crate::error::{SdkError, SdkResult};
use bqat_common::config::{default_config_path, read_toml_config, TomlConfig};
use bqat_common::types::BiometricType;
use std::time::Duration;
use tracing::{info, warn};

/// Default scoring engine endpoint
const DEFAULT_SERVER_HOST: &str = "127.0.0.1";
const DEFAULT_SERVER_PORT: u16 = 8848;
const DEFAULT_SERVER_PATH: &str = "/v1/scan";

/// Default engine request timeout
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Default reply-shape keys in the engine's JSON
const DEFAULT_RESULTS_KEY: &str = "results";
const DEFAULT_ENGINE_KEY: &str = "engine";
const DEFAULT_TIMESTAMP_KEY: &str = "timestamp";

/// Default per-modality score keys inside the results object
const DEFAULT_FINGER_SCORE_KEY: &str = "NFIQ2";
const DEFAULT_IRIS_SCORE_KEY: &str = "quality";
const DEFAULT_FACE_SCORE_KEY: &str = "confidence";

/// Resolved adapter settings
///
/// Everything the quality-check path needs to know about the engine and the
/// shape of its reply, plus the descriptor fields for [`info`](crate::info).
#[derive(Debug, Clone)]
pub struct SdkSettings {
    /// Scoring engine host
    pub server_host: String,
    /// Scoring engine port
    pub server_port: u16,
    /// Scoring engine request path
    pub server_path: String,
    /// Request content type
    pub content_type: String,
    /// Request charset
    pub content_charset: String,
    /// Engine request timeout
    pub timeout: Duration,

    /// Key of the results object in the engine reply
    pub results_key: String,
    /// Key of the engine tag in the engine reply
    pub engine_key: String,
    /// Key of the reply timestamp in the engine reply
    pub timestamp_key: String,
    /// Score key inside the results object, fingerprint segments
    pub finger_score_key: String,
    /// Score key inside the results object, iris segments
    pub iris_score_key: String,
    /// Score key inside the results object, face segments
    pub face_score_key: String,

    /// Descriptor fields
    pub api_version: String,
    pub sdk_version: String,
    pub organization: String,
    pub sdk_type: String,
}

impl Default for SdkSettings {
    fn default() -> Self {
        Self {
            server_host: DEFAULT_SERVER_HOST.to_string(),
            server_port: DEFAULT_SERVER_PORT,
            server_path: DEFAULT_SERVER_PATH.to_string(),
            content_type: "application/json".to_string(),
            content_charset: "utf-8".to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            results_key: DEFAULT_RESULTS_KEY.to_string(),
            engine_key: DEFAULT_ENGINE_KEY.to_string(),
            timestamp_key: DEFAULT_TIMESTAMP_KEY.to_string(),
            finger_score_key: DEFAULT_FINGER_SCORE_KEY.to_string(),
            iris_score_key: DEFAULT_IRIS_SCORE_KEY.to_string(),
            face_score_key: DEFAULT_FACE_SCORE_KEY.to_string(),
            api_version: "0.9".to_string(),
            sdk_version: env!("CARGO_PKG_VERSION").to_string(),
            organization: "BQAT".to_string(),
            sdk_type: "Quality".to_string(),
        }
    }
}

impl SdkSettings {
    /// Resolve settings from ENV → TOML → defaults
    ///
    /// Missing TOML file is not an error; a present-but-unparseable one is.
    pub fn resolve() -> SdkResult<Self> {
        let toml_config = match default_config_path() {
            Ok(path) if path.exists() => Some(
                read_toml_config(&path)
                    .map_err(|e| SdkError::Internal(format!("Config load failed: {}", e)))?,
            ),
            _ => None,
        };
        Ok(Self::resolve_from(toml_config.as_ref()))
    }

    /// Resolve settings against an already-loaded TOML config
    pub fn resolve_from(toml_config: Option<&TomlConfig>) -> Self {
        let mut settings = Self::default();
        let mut endpoint_sources = Vec::new();

        // Tier 2: TOML config
        if let Some(config) = toml_config {
            if config.server_host.is_some() || config.server_port.is_some() {
                endpoint_sources.push("TOML");
            }
            if let Some(host) = &config.server_host {
                settings.server_host = host.clone();
            }
            if let Some(port) = config.server_port {
                settings.server_port = port;
            }
            if let Some(path) = &config.server_path {
                settings.server_path = path.clone();
            }
            if let Some(secs) = config.timeout_secs {
                settings.timeout = Duration::from_secs(secs);
            }
            if let Some(key) = &config.results_key {
                settings.results_key = key.clone();
            }
            if let Some(key) = &config.finger_score_key {
                settings.finger_score_key = key.clone();
            }
            if let Some(key) = &config.iris_score_key {
                settings.iris_score_key = key.clone();
            }
            if let Some(key) = &config.face_score_key {
                settings.face_score_key = key.clone();
            }
        }

        // Tier 1: Environment variables (highest priority)
        let mut env_seen = false;
        if let Some(host) = env_string("BQAT_SDK_SERVER_HOST") {
            settings.server_host = host;
            env_seen = true;
        }
        if let Some(port) = env_string("BQAT_SDK_SERVER_PORT") {
            match port.parse::<u16>() {
                Ok(port) => {
                    settings.server_port = port;
                    env_seen = true;
                }
                Err(_) => warn!(value = %port, "Ignoring unparseable BQAT_SDK_SERVER_PORT"),
            }
        }
        if let Some(path) = env_string("BQAT_SDK_SERVER_PATH") {
            settings.server_path = path;
            env_seen = true;
        }
        if let Some(secs) = env_string("BQAT_SDK_TIMEOUT_SECS") {
            match secs.parse::<u64>() {
                Ok(secs) => settings.timeout = Duration::from_secs(secs),
                Err(_) => warn!(value = %secs, "Ignoring unparseable BQAT_SDK_TIMEOUT_SECS"),
            }
        }
        if env_seen {
            endpoint_sources.push("environment");
        }

        if endpoint_sources.len() > 1 {
            warn!(
                "Engine endpoint configured in multiple sources: {}. Using environment (highest priority).",
                endpoint_sources.join(", ")
            );
        }

        info!(
            endpoint = %settings.base_url(),
            "BQAT engine endpoint resolved"
        );
        settings
    }

    /// Full engine URL for the scoring request
    pub fn base_url(&self) -> String {
        format!(
            "http://{}:{}{}",
            self.server_host, self.server_port, self.server_path
        )
    }

    /// Score key for a modality, if this SDK scores it
    pub fn score_key(&self, modality: &BiometricType) -> Option<&str> {
        match modality {
            BiometricType::Finger => Some(&self.finger_score_key),
            BiometricType::Iris => Some(&self.iris_score_key),
            BiometricType::Face => Some(&self.face_score_key),
            BiometricType::Other(_) => None,
        }
    }
}

/// Non-empty environment variable lookup
fn env_string(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}
