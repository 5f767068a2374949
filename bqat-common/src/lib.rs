//! # BQAT Common Library
//!
//! Shared code between the BQAT adapter and hosts embedding it, including:
//! - Biometric record model (records, segments, modalities, formats)
//! - Platform response envelope and status codes
//! - SDK capability descriptor
//! - The `BiometricSdk` plugin contract trait
//! - Configuration loading

pub mod config;
pub mod error;
pub mod sdk;
pub mod status;
pub mod types;

pub use error::{Error, Result};
pub use sdk::BiometricSdk;
pub use status::ResponseStatus;
