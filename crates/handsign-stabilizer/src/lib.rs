//! Handsign Stabilizer - temporal smoothing of classifier output
//!
//! This crate implements the Prediction Stabilizer:
//! - Bounded history window of accepted predictions
//! - Majority vote with a first-seen tie-break
//! - Mean window confidence
//! - Confidence gate and arg-max decoding of class distributions
//! - Lock-wrapped stabilizer for multi-threaded frame pipelines

pub mod gate;
pub mod shared;
pub mod stabilizer;
pub mod window;

pub use gate::*;
pub use shared::*;
pub use stabilizer::*;
pub use window::*;
