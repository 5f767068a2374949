//! bqat-sdk - BQAT quality-scoring adapter
//!
//! Plugs the BQAT scoring engine into the platform's quality-SDK contract:
//! segments go out to the engine one HTTP POST at a time, the engine's JSON
//! reply comes back as a per-modality [`QualityScore`] with a per-metric
//! analytics map and an accumulated error list.
//!
//! The engine itself is opaque to this crate; all it assumes is the request
//! shape in [`client`] and a reply whose results object is a flat map of
//! metric name to value.
//!
//! [`QualityScore`]: bqat_common::types::QualityScore

pub mod client;
pub mod config;
pub mod error;
pub mod info;
pub mod quality;
pub mod sdk;
pub mod validate;

pub use crate::config::SdkSettings;
pub use crate::error::{SdkError, SdkResult};
pub use crate::sdk::BqatSdk;
