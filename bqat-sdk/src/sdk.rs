//! `BiometricSdk` contract implementation
//!
//! Wires settings, the scoring client, and the services into the single
//! object a host loads.

use crate::client::ScoringClient;
use crate::config::SdkSettings;
use crate::error::SdkResult;
use crate::quality::CheckQualityService;
use crate::{info, validate};
use async_trait::async_trait;
use bqat_common::sdk::BiometricSdk;
use bqat_common::types::{BiometricRecord, BiometricType, PlatformResponse, QualityCheck, SdkInfo};
use std::collections::HashMap;
use tracing::info as log_info;

/// The BQAT quality SDK
pub struct BqatSdk {
    settings: SdkSettings,
    quality: CheckQualityService,
}

impl BqatSdk {
    /// Build the SDK from resolved settings
    pub fn new(settings: SdkSettings) -> SdkResult<Self> {
        let client = ScoringClient::new(settings.clone())?;
        log_info!(
            endpoint = %settings.base_url(),
            sdk_version = %settings.sdk_version,
            "BQAT SDK initialized"
        );
        Ok(Self {
            quality: CheckQualityService::new(client),
            settings,
        })
    }

    /// Build the SDK with ENV → TOML → defaults settings resolution
    pub fn from_env() -> SdkResult<Self> {
        Self::new(SdkSettings::resolve()?)
    }

    pub fn settings(&self) -> &SdkSettings {
        &self.settings
    }
}

#[async_trait]
impl BiometricSdk for BqatSdk {
    fn info(&self) -> SdkInfo {
        info::sdk_info(&self.settings)
    }

    async fn check_quality(
        &self,
        sample: &BiometricRecord,
        modalities: &[BiometricType],
        flags: &HashMap<String, String>,
    ) -> PlatformResponse<QualityCheck> {
        self.quality.check_quality(sample, modalities, flags).await
    }

    fn check_sample(
        &self,
        sample: &BiometricRecord,
        modalities: &[BiometricType],
    ) -> PlatformResponse<QualityCheck> {
        validate::check_sample(sample, modalities)
    }
}
