//! Sample validation
//!
//! Segment-level checks shared by the quality path, plus the engine-free
//! `check_sample` operation: walk the requested modalities and report
//! unsupported-modality and malformed-input errors without a single engine
//! call.

use crate::error::{SdkError, SdkResult};
use bqat_common::status::ResponseStatus;
use bqat_common::types::{
    BiometricRecord, BiometricType, Bir, PlatformResponse, QualityCheck, QualityScore,
    SegmentFormat,
};
use std::collections::HashMap;
use tracing::debug;

/// Whether this SDK can score a modality at all
pub fn is_supported_modality(modality: &BiometricType) -> bool {
    matches!(
        modality,
        BiometricType::Finger | BiometricType::Face | BiometricType::Iris
    )
}

/// Group a record's segments under the requested modalities.
///
/// Every requested modality gets an entry, empty when the record carries no
/// matching segments; segments of unrequested modalities are dropped.
pub fn segment_map<'a>(
    sample: &'a BiometricRecord,
    modalities: &[BiometricType],
) -> HashMap<BiometricType, Vec<&'a Bir>> {
    let mut map: HashMap<BiometricType, Vec<&Bir>> = HashMap::new();
    for modality in modalities {
        map.entry(modality.clone()).or_default();
    }
    for segment in &sample.segments {
        if let Some(segments) = map.get_mut(&segment.bdb_info.modality) {
            segments.push(segment);
        }
    }
    map
}

/// Validate one segment of a modality.
///
/// Callers hand in segments already grouped by [`segment_map`], so the
/// modality only feeds the error messages.
///
/// Returns the recognized data format on success.
///
/// # Errors
/// - `MissingInput` for an empty data block
/// - `InvalidInput` for an unrecognized format
pub fn validate_segment(bir: &Bir, modality: &BiometricType) -> SdkResult<SegmentFormat> {
    if bir.bdb.is_empty() {
        return Err(SdkError::MissingInput(format!(
            "{} segment has empty data block",
            modality
        )));
    }
    SegmentFormat::from_name(&bir.bdb_info.format).ok_or_else(|| {
        SdkError::InvalidInput(format!(
            "{} segment has unsupported format '{}'",
            modality, bir.bdb_info.format
        ))
    })
}

/// Check a sample for unsupported-modality and malformed-input errors.
///
/// Same envelope shape as the quality path, but scores stay at zero and no
/// analytics are produced; only the per-modality error lists are filled in.
pub fn check_sample(
    sample: &BiometricRecord,
    modalities: &[BiometricType],
) -> PlatformResponse<QualityCheck> {
    if sample.is_empty() {
        return PlatformResponse::error_with_suffix(ResponseStatus::MissingInput, "sample");
    }

    let segment_map = segment_map(sample, modalities);
    let mut scores = HashMap::new();

    for (modality, segments) in segment_map {
        let mut score = QualityScore::default();

        if !is_supported_modality(&modality) {
            score
                .errors
                .push(format!("Modality {} is not supported", modality));
            scores.insert(modality, score);
            continue;
        }

        if segments.is_empty() {
            score
                .errors
                .push(format!("No {} segments found in sample", modality));
        }
        for segment in segments {
            if let Err(err) = validate_segment(segment, &modality) {
                score.errors.push(err.to_string());
            }
        }

        debug!(
            modality = %modality,
            error_count = score.errors.len(),
            "Sample check complete for modality"
        );
        scores.insert(modality, score);
    }

    PlatformResponse::ok(QualityCheck { scores })
}
