//! Capability descriptor
//!
//! Static per settings: no IO, no engine contact.

use crate::config::SdkSettings;
use bqat_common::types::{BiometricFunction, BiometricType, SdkInfo};
use std::collections::HashMap;

/// Modalities this SDK scores
const SUPPORTED_MODALITIES: [BiometricType; 3] = [
    BiometricType::Finger,
    BiometricType::Face,
    BiometricType::Iris,
];

/// Build the descriptor the host reads at plugin load
pub fn sdk_info(settings: &SdkSettings) -> SdkInfo {
    let supported_modalities = SUPPORTED_MODALITIES.to_vec();
    let mut supported_methods = HashMap::new();
    supported_methods.insert(BiometricFunction::QualityCheck, supported_modalities.clone());

    SdkInfo {
        api_version: settings.api_version.clone(),
        sdk_version: settings.sdk_version.clone(),
        organization: settings.organization.clone(),
        sdk_type: settings.sdk_type.clone(),
        supported_modalities,
        supported_methods,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptor_contents() {
        let info = sdk_info(&SdkSettings::default());

        assert_eq!(info.sdk_type, "Quality");
        assert_eq!(info.organization, "BQAT");
        assert_eq!(info.supported_modalities.len(), 3);
        assert!(info.supported_modalities.contains(&BiometricType::Finger));
        assert!(info.supported_modalities.contains(&BiometricType::Face));
        assert!(info.supported_modalities.contains(&BiometricType::Iris));

        let quality = &info.supported_methods[&BiometricFunction::QualityCheck];
        assert_eq!(quality, &info.supported_modalities);
    }

    #[test]
    fn test_descriptor_follows_settings() {
        let settings = SdkSettings {
            organization: "ACME".to_string(),
            api_version: "1.1".to_string(),
            ..SdkSettings::default()
        };
        let info = sdk_info(&settings);
        assert_eq!(info.organization, "ACME");
        assert_eq!(info.api_version, "1.1");
    }
}
