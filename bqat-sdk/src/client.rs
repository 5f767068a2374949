//! BQAT scoring engine client
//!
//! One segment, one POST, one JSON reply. The request shape is fixed; the
//! reply shape is configuration-driven (see [`SdkSettings`]) because the
//! engine's results object is a flat, heterogeneous metric map whose key
//! names vary between engine builds.
//!
//! # Request
//! ```json
//! { "modality": "fingerprint", "id": "<uuid>", "type": "wsq",
//!   "data": "<base64>", "requestTime": "<rfc3339>", "version": "1.0.0" }
//! ```

use crate::config::SdkSettings;
use crate::error::{SdkError, SdkResult};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use bqat_common::types::{Bir, SegmentFormat};
use chrono::{SecondsFormat, Utc};
use reqwest::header::CONTENT_TYPE;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;
use uuid::Uuid;

/// Request schema version sent to the engine
const REQUEST_VERSION: &str = "1.0.0";

/// Scoring request body
#[derive(Debug, Serialize)]
pub struct ScoringRequest {
    /// Segment modality wire name
    pub modality: String,
    /// Fresh request id
    pub id: String,
    /// Segment data format ("jp2" / "wsq")
    #[serde(rename = "type")]
    pub data_type: String,
    /// Base64 of the raw segment bytes
    pub data: String,
    #[serde(rename = "requestTime")]
    pub request_time: String,
    pub version: String,
}

impl ScoringRequest {
    /// Build a request for one segment
    pub fn for_segment(bir: &Bir, format: SegmentFormat) -> Self {
        Self {
            modality: bir.bdb_info.modality.to_string(),
            id: Uuid::new_v4().to_string(),
            data_type: format.as_str().to_string(),
            data: STANDARD.encode(&bir.bdb),
            request_time: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            version: REQUEST_VERSION.to_string(),
        }
    }
}

/// Normalized engine reply
///
/// `results` keeps the raw JSON values; score extraction and stringification
/// happen in the quality-check path where the modality is known.
#[derive(Debug, Clone)]
pub struct EngineReply {
    /// Engine tag from the reply envelope, when present
    pub engine: Option<String>,
    /// Reply timestamp from the reply envelope, when present
    pub timestamp: Option<String>,
    /// The flat metric map (metric name → value)
    pub results: serde_json::Map<String, Value>,
}

/// HTTP client for the BQAT scoring engine
pub struct ScoringClient {
    http_client: reqwest::Client,
    settings: SdkSettings,
}

impl ScoringClient {
    /// Create a client from resolved settings
    pub fn new(settings: SdkSettings) -> SdkResult<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(settings.timeout)
            .build()
            .map_err(|e| SdkError::Internal(format!("Failed to create HTTP client: {}", e)))?;
        Ok(Self {
            http_client,
            settings,
        })
    }

    pub fn settings(&self) -> &SdkSettings {
        &self.settings
    }

    /// Score one segment: single POST-and-parse against the engine
    ///
    /// # Errors
    /// - `Network` if the request cannot be sent
    /// - `Api` if the engine answers non-2xx
    /// - `Parse` if the reply is not the expected JSON shape
    pub async fn score_segment(
        &self,
        bir: &Bir,
        format: SegmentFormat,
    ) -> SdkResult<EngineReply> {
        let request = ScoringRequest::for_segment(bir, format);
        let url = self.settings.base_url();

        debug!(
            url = %url,
            modality = %request.modality,
            data_type = %request.data_type,
            data_length = request.data.len(),
            "Posting segment to scoring engine"
        );

        let response = self
            .http_client
            .post(&url)
            .header(
                CONTENT_TYPE,
                format!(
                    "{}; charset={}",
                    self.settings.content_type, self.settings.content_charset
                ),
            )
            .json(&request)
            .send()
            .await
            .map_err(|e| SdkError::Network(format!("Engine request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SdkError::Api(format!(
                "Engine returned error {}: {}",
                status, body
            )));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| SdkError::Parse(format!("Failed to parse engine reply: {}", e)))?;

        debug!(reply = %body, "Scoring engine reply");

        parse_reply(&body, &self.settings)
    }
}

/// Normalize a raw engine reply using the configured reply-shape keys
///
/// A missing or non-object results entry is a `Parse` error; missing engine
/// tag or timestamp is tolerated.
pub fn parse_reply(body: &Value, settings: &SdkSettings) -> SdkResult<EngineReply> {
    let results = body
        .get(&settings.results_key)
        .ok_or_else(|| {
            SdkError::Parse(format!(
                "Engine reply has no '{}' object",
                settings.results_key
            ))
        })?
        .as_object()
        .ok_or_else(|| {
            SdkError::Parse(format!(
                "Engine reply '{}' entry is not an object",
                settings.results_key
            ))
        })?
        .clone();

    Ok(EngineReply {
        engine: body.get(&settings.engine_key).map(stringify),
        timestamp: body.get(&settings.timestamp_key).map(stringify),
        results,
    })
}

/// Render a JSON value the way it goes into the analytics map: strings keep
/// their content, everything else keeps its JSON rendering
pub fn stringify(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
