//! Host-platform contract types
//!
//! Data model the platform hands to (and expects back from) a quality SDK:
//! - **Input:** `BiometricRecord` holding one `Bir` per captured segment
//! - **Output:** `PlatformResponse<QualityCheck>` with per-modality scores
//! - **Capabilities:** `SdkInfo` descriptor
//!
//! Wire names are lowercase (`"fingerprint"`, `"face"`, `"iris"`) to match the
//! scoring engine's request vocabulary.

use crate::status::ResponseStatus;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

// ============================================================================
// Modalities and Functions
// ============================================================================

/// Biometric sample type.
///
/// `Other` preserves modality strings this SDK does not recognize so they can
/// be reported back verbatim in error entries.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BiometricType {
    #[serde(rename = "fingerprint")]
    Finger,
    Face,
    Iris,
    #[serde(untagged)]
    Other(String),
}

impl BiometricType {
    /// Wire name used in engine requests and error messages
    pub fn as_str(&self) -> &str {
        match self {
            BiometricType::Finger => "fingerprint",
            BiometricType::Face => "face",
            BiometricType::Iris => "iris",
            BiometricType::Other(name) => name,
        }
    }

    /// Parse a wire name; unrecognized names land in `Other`
    pub fn from_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "fingerprint" | "finger" => BiometricType::Finger,
            "face" => BiometricType::Face,
            "iris" => BiometricType::Iris,
            _ => BiometricType::Other(name.to_string()),
        }
    }
}

impl fmt::Display for BiometricType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Biometric function a SDK can advertise in its descriptor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BiometricFunction {
    QualityCheck,
    Segment,
    Extract,
    Match,
}

impl fmt::Display for BiometricFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BiometricFunction::QualityCheck => "quality_check",
            BiometricFunction::Segment => "segment",
            BiometricFunction::Extract => "extract",
            BiometricFunction::Match => "match",
        };
        f.write_str(name)
    }
}

// ============================================================================
// Segments and Records
// ============================================================================

/// Segment data formats the scoring engine accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentFormat {
    /// JPEG 2000 (face, iris)
    Jp2,
    /// Wavelet Scalar Quantization (fingerprint)
    Wsq,
}

impl SegmentFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            SegmentFormat::Jp2 => "jp2",
            SegmentFormat::Wsq => "wsq",
        }
    }

    /// Parse a format label; `None` means the format is malformed input
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "jp2" => Some(SegmentFormat::Jp2),
            "wsq" => Some(SegmentFormat::Wsq),
            _ => None,
        }
    }
}

impl fmt::Display for SegmentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-segment descriptor block
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BdbInfo {
    /// Modality of the segment data
    pub modality: BiometricType,
    /// Data format label as captured (may be a format this SDK rejects)
    pub format: String,
    /// Optional subtype label (e.g. "Left IndexFinger")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtype: Option<String>,
}

/// One biometric data unit: raw image bytes plus its descriptor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bir {
    /// Biometric data block (raw image bytes)
    #[serde(with = "serde_bytes_b64")]
    pub bdb: Vec<u8>,
    pub bdb_info: BdbInfo,
}

impl Bir {
    pub fn new(modality: BiometricType, format: impl Into<String>, bdb: Vec<u8>) -> Self {
        Self {
            bdb,
            bdb_info: BdbInfo {
                modality,
                format: format.into(),
                subtype: None,
            },
        }
    }
}

/// A full biometric sample: zero or more segments
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BiometricRecord {
    pub segments: Vec<Bir>,
}

impl BiometricRecord {
    pub fn new(segments: Vec<Bir>) -> Self {
        Self { segments }
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

// ============================================================================
// Quality Results
// ============================================================================

/// Quality result for one modality
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QualityScore {
    /// Numeric goodness measure (0-100)
    pub score: f32,
    /// Per-metric analytics relayed from the engine (metric name → value)
    #[serde(default)]
    pub analytics_info: HashMap<String, String>,
    /// Accumulated partial errors; non-empty does not mean the record failed
    #[serde(default)]
    pub errors: Vec<String>,
}

/// Quality results for all checked modalities
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QualityCheck {
    pub scores: HashMap<BiometricType, QualityScore>,
}

// ============================================================================
// Capability Descriptor
// ============================================================================

/// Static capability descriptor a SDK exposes to the host
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SdkInfo {
    pub api_version: String,
    pub sdk_version: String,
    pub organization: String,
    /// SDK category (e.g. "Quality")
    #[serde(rename = "type")]
    pub sdk_type: String,
    pub supported_modalities: Vec<BiometricType>,
    pub supported_methods: HashMap<BiometricFunction, Vec<BiometricType>>,
}

// ============================================================================
// Response Envelope
// ============================================================================

/// Response envelope every SDK operation returns to the host
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlatformResponse<T> {
    pub status_code: u32,
    pub status_message: String,
    pub response: Option<T>,
}

impl<T> PlatformResponse<T> {
    /// Success envelope wrapping a payload
    pub fn ok(payload: T) -> Self {
        Self {
            status_code: ResponseStatus::Success.code(),
            status_message: ResponseStatus::Success.message().to_string(),
            response: Some(payload),
        }
    }

    /// Error envelope with the status' own message
    pub fn error(status: ResponseStatus) -> Self {
        Self {
            status_code: status.code(),
            status_message: status.message().to_string(),
            response: None,
        }
    }

    /// Error envelope with a suffix appended to the status message
    /// (e.g. "Missing Input Parameter sample")
    pub fn error_with_suffix(status: ResponseStatus, suffix: &str) -> Self {
        Self {
            status_code: status.code(),
            status_message: format!("{} {}", status.message(), suffix),
            response: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status_code == ResponseStatus::Success.code()
    }
}

/// Base64 (de)serialization for raw segment bytes
mod serde_bytes_b64 {
    use base64::{engine::general_purpose::STANDARD, Engine};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        STANDARD
            .decode(encoded.as_bytes())
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modality_wire_names() {
        assert_eq!(BiometricType::Finger.as_str(), "fingerprint");
        assert_eq!(BiometricType::Face.as_str(), "face");
        assert_eq!(BiometricType::Iris.as_str(), "iris");
    }

    #[test]
    fn test_modality_parse() {
        assert_eq!(BiometricType::from_name("FINGERPRINT"), BiometricType::Finger);
        assert_eq!(BiometricType::from_name("finger"), BiometricType::Finger);
        assert_eq!(BiometricType::from_name("Iris"), BiometricType::Iris);
        assert_eq!(
            BiometricType::from_name("voice"),
            BiometricType::Other("voice".to_string())
        );
    }

    #[test]
    fn test_format_parse() {
        assert_eq!(SegmentFormat::from_name("JP2"), Some(SegmentFormat::Jp2));
        assert_eq!(SegmentFormat::from_name("wsq"), Some(SegmentFormat::Wsq));
        assert_eq!(SegmentFormat::from_name("png"), None);
    }

    #[test]
    fn test_response_envelope_ok() {
        let response = PlatformResponse::ok(QualityCheck::default());
        assert!(response.is_success());
        assert_eq!(response.status_code, 200);
        assert_eq!(response.status_message, "OK");
        assert!(response.response.is_some());
    }

    #[test]
    fn test_response_envelope_error_suffix() {
        let response: PlatformResponse<QualityCheck> =
            PlatformResponse::error_with_suffix(ResponseStatus::MissingInput, "sample");
        assert!(!response.is_success());
        assert_eq!(response.status_code, 402);
        assert_eq!(response.status_message, "Missing Input Parameter sample");
        assert!(response.response.is_none());
    }

    #[test]
    fn test_bir_roundtrip_base64() {
        let bir = Bir::new(BiometricType::Finger, "wsq", vec![1, 2, 3, 255]);
        let json = serde_json::to_string(&bir).unwrap();
        assert!(json.contains("AQID/w=="), "bdb should serialize as base64: {}", json);

        let back: Bir = serde_json::from_str(&json).unwrap();
        assert_eq!(back.bdb, vec![1, 2, 3, 255]);
        assert_eq!(back.bdb_info.modality, BiometricType::Finger);
    }

    #[test]
    fn test_record_empty() {
        assert!(BiometricRecord::default().is_empty());
        let record = BiometricRecord::new(vec![Bir::new(BiometricType::Face, "jp2", vec![0])]);
        assert!(!record.is_empty());
    }
}
