//! Adapter error type and status classification
//!
//! Every failure inside the adapter becomes an [`SdkError`]; the services map
//! it onto the platform's [`ResponseStatus`] envelope instead of letting it
//! escape to the host.

use bqat_common::status::ResponseStatus;
use bqat_common::types::PlatformResponse;
use thiserror::Error;

/// Result type for adapter-internal operations
pub type SdkResult<T> = Result<T, SdkError>;

/// Errors raised inside the adapter
#[derive(Debug, Error)]
pub enum SdkError {
    /// Engine request could not be sent or the connection failed
    #[error("Network error: {0}")]
    Network(String),

    /// Engine answered with a non-success HTTP status
    #[error("Engine error: {0}")]
    Api(String),

    /// Engine reply was not the JSON shape we expect
    #[error("Parse error: {0}")]
    Parse(String),

    /// Required input absent (e.g. sample with no segments)
    #[error("Missing input: {0}")]
    MissingInput(String),

    /// Supplied input malformed (e.g. unrecognized segment format)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Requested biometrics absent from the record
    #[error("Biometric not found: {0}")]
    BiometricNotFound(String),

    /// Anything else
    #[error("Internal error: {0}")]
    Internal(String),
}

impl SdkError {
    /// Platform status this error classifies to
    pub fn status(&self) -> ResponseStatus {
        match self {
            SdkError::Network(_) | SdkError::Api(_) | SdkError::Parse(_) => {
                ResponseStatus::QualityCheckFailed
            }
            SdkError::MissingInput(_) => ResponseStatus::MissingInput,
            SdkError::InvalidInput(_) => ResponseStatus::InvalidInput,
            SdkError::BiometricNotFound(_) => ResponseStatus::BiometricNotFound,
            SdkError::Internal(_) => ResponseStatus::UnknownError,
        }
    }

    /// Build the platform error envelope for this error.
    ///
    /// Input-parameter statuses carry a " sample" suffix on the wire message;
    /// the rest use the status' own message. Statuses outside the classified
    /// set collapse to `UnknownError`.
    pub fn to_response<T>(&self) -> PlatformResponse<T> {
        match self.status() {
            ResponseStatus::InvalidInput => {
                PlatformResponse::error_with_suffix(ResponseStatus::InvalidInput, "sample")
            }
            ResponseStatus::MissingInput => {
                PlatformResponse::error_with_suffix(ResponseStatus::MissingInput, "sample")
            }
            status @ (ResponseStatus::QualityCheckFailed
            | ResponseStatus::BiometricNotFound
            | ResponseStatus::MatchingFailed
            | ResponseStatus::PoorDataQuality) => PlatformResponse::error(status),
            _ => PlatformResponse::error(ResponseStatus::UnknownError),
        }
    }
}

impl From<bqat_common::Error> for SdkError {
    fn from(err: bqat_common::Error) -> Self {
        match err {
            bqat_common::Error::InvalidInput(msg) => SdkError::InvalidInput(msg),
            bqat_common::Error::MissingInput(msg) => SdkError::MissingInput(msg),
            bqat_common::Error::NotFound(msg) => SdkError::BiometricNotFound(msg),
            other => SdkError::Internal(other.to_string()),
        }
    }
}
