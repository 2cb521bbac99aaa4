//! Handsign Test Harness - simulated hands and gesture scenarios
//!
//! This crate provides:
//! - Synthetic hand poses, one template shape per label
//! - Frame noise (keypoint jitter, dropped and partial hands, pose flips)
//! - A simulated camera/detector pair and a nearest-template classifier
//! - Scripted end-to-end scenarios with flicker and accuracy reports

pub mod noise;
pub mod scenario;
pub mod simulator;
pub mod synth;

pub use noise::*;
pub use scenario::*;
pub use simulator::*;
pub use synth::*;
