//! Handsign Runtime - per-frame recognition loop
//!
//! This crate wires the core to its external collaborators:
//! 1. Detect a hand (external detector)
//! 2. Convert to a pixel-space pose
//! 3. Normalize and validate the feature vector
//! 4. Classify (external classifier)
//! 5. Gate on confidence
//! 6. Stabilize
//! 7. Hand the stabilized prediction to a renderer (optional)
//!
//! It also carries configuration loading and tracing setup.

pub mod collaborators;
pub mod config_file;
pub mod recognizer;
pub mod telemetry;

pub use collaborators::*;
pub use config_file::*;
pub use recognizer::*;
pub use telemetry::*;
