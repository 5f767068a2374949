//! Platform wire status codes
//!
//! Every adapter operation resolves to one of these codes; the host reads them
//! off the [`PlatformResponse`](crate::types::PlatformResponse) envelope.

use serde::{Deserialize, Serialize};

/// Status codes the platform understands on the response envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResponseStatus {
    /// Operation completed
    Success,
    /// A supplied parameter failed validation
    InvalidInput,
    /// A required parameter was absent
    MissingInput,
    /// The quality engine could not score the data
    QualityCheckFailed,
    /// Requested biometrics not present in the CBEFF record
    BiometricNotFound,
    /// Biometric matching failed
    MatchingFailed,
    /// Data quality below usable threshold
    PoorDataQuality,
    /// Anything not covered above
    UnknownError,
}

impl ResponseStatus {
    /// Numeric wire code
    pub fn code(&self) -> u32 {
        match self {
            ResponseStatus::Success => 200,
            ResponseStatus::InvalidInput => 401,
            ResponseStatus::MissingInput => 402,
            ResponseStatus::QualityCheckFailed => 403,
            ResponseStatus::BiometricNotFound => 404,
            ResponseStatus::MatchingFailed => 405,
            ResponseStatus::PoorDataQuality => 406,
            ResponseStatus::UnknownError => 500,
        }
    }

    /// Human-readable wire message
    pub fn message(&self) -> &'static str {
        match self {
            ResponseStatus::Success => "OK",
            ResponseStatus::InvalidInput => "Invalid Input Parameter",
            ResponseStatus::MissingInput => "Missing Input Parameter",
            ResponseStatus::QualityCheckFailed => "Quality check of Biometric data failed",
            ResponseStatus::BiometricNotFound => "Biometrics not found in CBEFF",
            ResponseStatus::MatchingFailed => "Matching of Biometric data failed",
            ResponseStatus::PoorDataQuality => "Data provided is of poor quality",
            ResponseStatus::UnknownError => "UNKNOWN_ERROR",
        }
    }

    /// Map a numeric code back to a status; unrecognized codes collapse to
    /// `UnknownError`.
    pub fn from_code(code: u32) -> Self {
        match code {
            200 => ResponseStatus::Success,
            401 => ResponseStatus::InvalidInput,
            402 => ResponseStatus::MissingInput,
            403 => ResponseStatus::QualityCheckFailed,
            404 => ResponseStatus::BiometricNotFound,
            405 => ResponseStatus::MatchingFailed,
            406 => ResponseStatus::PoorDataQuality,
            _ => ResponseStatus::UnknownError,
        }
    }
}
