//! Plugin contract the host platform calls through
//!
//! A quality SDK implements [`BiometricSdk`]; the host only ever sees this
//! trait plus the types in [`crate::types`]. Every operation returns a
//! [`PlatformResponse`](crate::types::PlatformResponse) — errors are carried
//! as status codes on the envelope, never as panics or transport errors.

use crate::types::{BiometricRecord, BiometricType, PlatformResponse, QualityCheck, SdkInfo};
use async_trait::async_trait;
use std::collections::HashMap;

/// Contract between the host platform and a quality-scoring SDK
#[async_trait]
pub trait BiometricSdk: Send + Sync {
    /// Static capability descriptor (no IO)
    fn info(&self) -> SdkInfo;

    /// Score the requested modalities of a sample via the quality engine
    ///
    /// # Arguments
    /// * `sample` - biometric record to score
    /// * `modalities` - modalities the host wants checked
    /// * `flags` - opaque host-supplied key/value hints
    async fn check_quality(
        &self,
        sample: &BiometricRecord,
        modalities: &[BiometricType],
        flags: &HashMap<String, String>,
    ) -> PlatformResponse<QualityCheck>;

    /// Check a sample for unsupported-modality and malformed-input errors
    /// without contacting the engine
    fn check_sample(
        &self,
        sample: &BiometricRecord,
        modalities: &[BiometricType],
    ) -> PlatformResponse<QualityCheck>;
}
