//! Shared stabilizer for multi-threaded frame pipelines
//!
//! The normalizer is reentrant; the stabilizer is not. Capture threads that
//! feed one stabilizer go through this handle, which serializes every call
//! behind a single lock.

use std::sync::Arc;

use handsign_core::{HandsignResult, Prediction, RecognizerConfig};
use parking_lot::Mutex;

use crate::{PredictionStabilizer, StabilizerPhase};

/// Cloneable, lock-protected handle to one [`PredictionStabilizer`]
#[derive(Debug, Clone)]
pub struct SharedStabilizer {
    inner: Arc<Mutex<PredictionStabilizer>>,
}

impl SharedStabilizer {
    pub fn new(config: &RecognizerConfig) -> HandsignResult<Self> {
        Ok(Self::from_stabilizer(PredictionStabilizer::new(config)?))
    }

    pub fn from_stabilizer(stabilizer: PredictionStabilizer) -> Self {
        SharedStabilizer {
            inner: Arc::new(Mutex::new(stabilizer)),
        }
    }

    pub fn accept(&self, label: &str, confidence: f32) -> HandsignResult<Prediction> {
        self.inner.lock().accept(label, confidence)
    }

    pub fn reset(&self) {
        self.inner.lock().reset();
    }

    /// Snapshot of the current stabilized prediction
    pub fn current(&self) -> Prediction {
        self.inner.lock().current().clone()
    }

    pub fn phase(&self) -> StabilizerPhase {
        self.inner.lock().phase()
    }

    /// Run `f` with exclusive access
    pub fn with<R>(&self, f: impl FnOnce(&mut PredictionStabilizer) -> R) -> R {
        f(&mut self.inner.lock())
    }
}
