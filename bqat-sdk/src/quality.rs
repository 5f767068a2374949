//! Quality-check orchestrator
//!
//! Walks the requested modalities of a sample, sends one segment per modality
//! to the scoring engine, and normalizes the heterogeneous reply into the
//! platform's `QualityCheck`:
//!
//! - every key of the engine's results object lands in the analytics map,
//! - the modality-specific configured key supplies the numeric score,
//! - errors accumulate per entry; a bad value never aborts the record.

use crate::client::{stringify, EngineReply, ScoringClient};
use crate::config::SdkSettings;
use crate::error::SdkResult;
use crate::validate::{is_supported_modality, segment_map, validate_segment};
use bqat_common::types::{
    BiometricRecord, BiometricType, Bir, PlatformResponse, QualityCheck, QualityScore,
};
use serde_json::Value;
use std::collections::HashMap;
use tracing::{debug, error};

/// Quality-check service over one scoring client
pub struct CheckQualityService {
    client: ScoringClient,
}

impl CheckQualityService {
    pub fn new(client: ScoringClient) -> Self {
        Self { client }
    }

    fn settings(&self) -> &SdkSettings {
        self.client.settings()
    }

    /// Score the requested modalities of a sample.
    ///
    /// Never panics and never surfaces a raw error: every failure becomes a
    /// status-coded envelope with `response: None`.
    pub async fn check_quality(
        &self,
        sample: &BiometricRecord,
        modalities: &[BiometricType],
        flags: &HashMap<String, String>,
    ) -> PlatformResponse<QualityCheck> {
        debug!(
            segment_count = sample.segments.len(),
            modality_count = modalities.len(),
            flag_count = flags.len(),
            "checkQuality requested"
        );

        match self.check_quality_inner(sample, modalities).await {
            Ok(check) => PlatformResponse::ok(check),
            Err(err) => {
                error!(error = %err, "checkQuality failed");
                err.to_response()
            }
        }
    }

    async fn check_quality_inner(
        &self,
        sample: &BiometricRecord,
        modalities: &[BiometricType],
    ) -> SdkResult<QualityCheck> {
        if sample.is_empty() {
            return Err(crate::error::SdkError::MissingInput(
                "sample has no segments".to_string(),
            ));
        }

        let segment_map = segment_map(sample, modalities);
        let mut scores = HashMap::new();
        for (modality, segments) in segment_map {
            let score = self.evaluate_modality(&modality, &segments).await?;
            debug!(
                modality = %modality,
                score = score.score,
                analytics_count = score.analytics_info.len(),
                error_count = score.errors.len(),
                "Modality evaluated"
            );
            scores.insert(modality, score);
        }

        Ok(QualityCheck { scores })
    }

    /// Evaluate one modality's segments.
    ///
    /// Unsupported modalities and modalities without segments get a zero
    /// score carrying an error entry instead of failing the record.
    async fn evaluate_modality(
        &self,
        modality: &BiometricType,
        segments: &[&Bir],
    ) -> SdkResult<QualityScore> {
        let mut score = QualityScore::default();

        if !is_supported_modality(modality) {
            score
                .errors
                .push(format!("Modality {} is not supported", modality));
            return Ok(score);
        }
        if segments.is_empty() {
            score
                .errors
                .push(format!("No {} segments found in sample", modality));
            return Ok(score);
        }

        self.score_first_segment(modality, segments, &mut score)
            .await?;
        Ok(score)
    }

    /// Score the first valid segment of a modality (one segment at a time).
    ///
    /// An invalid segment stops the scan with an error entry; engine-call
    /// failures propagate for status classification at the top.
    async fn score_first_segment(
        &self,
        modality: &BiometricType,
        segments: &[&Bir],
        score: &mut QualityScore,
    ) -> SdkResult<()> {
        for segment in segments.iter().copied() {
            let format = match validate_segment(segment, modality) {
                Ok(format) => format,
                Err(err) => {
                    score.errors.push(err.to_string());
                    break;
                }
            };

            let reply = self.client.score_segment(segment, format).await?;
            apply_engine_reply(self.settings(), modality, &reply, score);
            break; // one segment data at a time
        }
        Ok(())
    }
}

/// Fold a normalized engine reply into a quality score.
///
/// Engine tag and timestamp go into the analytics map under their configured
/// key names; then every results entry is copied (stringified) and the
/// modality's configured score key (case-insensitive) supplies the numeric
/// score. A non-numeric score value appends an error and leaves the score
/// untouched.
pub fn apply_engine_reply(
    settings: &SdkSettings,
    modality: &BiometricType,
    reply: &EngineReply,
    score: &mut QualityScore,
) {
    if let Some(engine) = &reply.engine {
        score
            .analytics_info
            .insert(settings.engine_key.clone(), engine.clone());
    }
    if let Some(timestamp) = &reply.timestamp {
        score
            .analytics_info
            .insert(settings.timestamp_key.clone(), timestamp.clone());
    }

    let score_key = settings.score_key(modality);
    for (key, value) in &reply.results {
        score.analytics_info.insert(key.clone(), stringify(value));

        let Some(score_key) = score_key else { continue };
        if !key.eq_ignore_ascii_case(score_key) {
            continue;
        }
        match numeric_value(value) {
            Some(number) => score.score = number,
            None => score.errors.push(format!(
                "Score key '{}' value '{}' is not numeric",
                key,
                stringify(value)
            )),
        }
    }
}

/// Numeric reading of a metric value (numbers directly, strings parsed)
fn numeric_value(value: &Value) -> Option<f32> {
    match value {
        Value::Number(n) => n.as_f64().map(|n| n as f32),
        Value::String(s) => s.trim().parse::<f32>().ok(),
        _ => None,
    }
}
