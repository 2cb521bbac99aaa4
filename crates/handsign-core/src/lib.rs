//! Handsign Core - Fundamental types and primitives
//!
//! This crate defines the core types used throughout the recognizer:
//! - Hand anatomy (keypoint indices, keypoint count)
//! - Poses, feature vectors and frame geometry
//! - Predictions and the closed label set
//! - Recognizer configuration and the error taxonomy

pub mod config;
pub mod error;
pub mod pose;
pub mod prediction;

pub use config::*;
pub use error::*;
pub use pose::*;
pub use prediction::*;
