//! Handsign Landmark - from detector keypoints to classifier input
//!
//! This crate implements the Landmark Normalizer:
//! - Wrist-relative translation and per-axis rescaling to [-1, 1]
//! - Feature vector validity checks
//! - Hand region of interest in frame pixels
//! - Detector coordinate conversion and hand area
//! - Moving-average smoothing of feature vectors

pub mod convert;
pub mod normalizer;
pub mod smoothing;

pub use convert::*;
pub use normalizer::*;
pub use smoothing::*;
