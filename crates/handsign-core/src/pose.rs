//! Hand pose - detector keypoints and the feature vectors derived from them
//!
//! A pose is always complete: either the detector saw a hand and reported all
//! 21 keypoints, or there is no pose at all (`Option::None`).

use crate::{HandsignError, HandsignResult};

/// Number of keypoints reported per detected hand
pub const HAND_KEYPOINT_COUNT: usize = 21;

/// Scalars per keypoint (x, y, z)
pub const KEYPOINT_DIMENSIONS: usize = 3;

/// Length of a flattened feature vector
pub const FEATURE_VECTOR_LEN: usize = HAND_KEYPOINT_COUNT * KEYPOINT_DIMENSIONS;

/// Hand keypoint identifier, in detector order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandJoint {
    Wrist,

    ThumbCmc,
    ThumbMcp,
    ThumbIp,
    ThumbTip,

    IndexMcp,
    IndexPip,
    IndexDip,
    IndexTip,

    MiddleMcp,
    MiddlePip,
    MiddleDip,
    MiddleTip,

    RingMcp,
    RingPip,
    RingDip,
    RingTip,

    PinkyMcp,
    PinkyPip,
    PinkyDip,
    PinkyTip,
}

impl HandJoint {
    /// All joints in order
    pub fn all() -> &'static [HandJoint] {
        &[
            HandJoint::Wrist,
            HandJoint::ThumbCmc,
            HandJoint::ThumbMcp,
            HandJoint::ThumbIp,
            HandJoint::ThumbTip,
            HandJoint::IndexMcp,
            HandJoint::IndexPip,
            HandJoint::IndexDip,
            HandJoint::IndexTip,
            HandJoint::MiddleMcp,
            HandJoint::MiddlePip,
            HandJoint::MiddleDip,
            HandJoint::MiddleTip,
            HandJoint::RingMcp,
            HandJoint::RingPip,
            HandJoint::RingDip,
            HandJoint::RingTip,
            HandJoint::PinkyMcp,
            HandJoint::PinkyPip,
            HandJoint::PinkyDip,
            HandJoint::PinkyTip,
        ]
    }

    /// Number of joints
    pub fn count() -> usize {
        HAND_KEYPOINT_COUNT
    }

    /// Position of this joint in a pose
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }
}

/// One detector keypoint: x, y in frame pixels, z in detector-relative depth
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Keypoint {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Keypoint {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn zero() -> Self {
        Self::default()
    }

    /// Component-wise difference
    pub fn offset_from(&self, origin: &Keypoint) -> Keypoint {
        Keypoint {
            x: self.x - origin.x,
            y: self.y - origin.y,
            z: self.z - origin.z,
        }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

/// A complete hand pose (exactly 21 keypoints)
#[derive(Debug, Clone, PartialEq)]
pub struct HandPose {
    keypoints: [Keypoint; HAND_KEYPOINT_COUNT],
}

impl HandPose {
    /// Wrap an already complete keypoint array
    pub fn new(keypoints: [Keypoint; HAND_KEYPOINT_COUNT]) -> Self {
        Self { keypoints }
    }

    /// Build a pose from detector output, rejecting partial hands
    pub fn from_keypoints(keypoints: &[Keypoint]) -> HandsignResult<Self> {
        let keypoints: [Keypoint; HAND_KEYPOINT_COUNT] =
            keypoints
                .try_into()
                .map_err(|_| HandsignError::InvalidKeypointCount {
                    expected: HAND_KEYPOINT_COUNT,
                    actual: keypoints.len(),
                })?;
        Ok(Self { keypoints })
    }

    /// Build a pose from a flat `x0, y0, z0, x1, ...` sequence
    pub fn from_flat(values: &[f32]) -> HandsignResult<Self> {
        if values.len() != FEATURE_VECTOR_LEN {
            return Err(HandsignError::InvalidKeypointCount {
                expected: HAND_KEYPOINT_COUNT,
                actual: values.len() / KEYPOINT_DIMENSIONS,
            });
        }

        let mut keypoints = [Keypoint::zero(); HAND_KEYPOINT_COUNT];
        for (kp, chunk) in keypoints
            .iter_mut()
            .zip(values.chunks_exact(KEYPOINT_DIMENSIONS))
        {
            *kp = Keypoint::new(chunk[0], chunk[1], chunk[2]);
        }
        Ok(Self { keypoints })
    }

    /// All keypoints in detector order
    pub fn keypoints(&self) -> &[Keypoint; HAND_KEYPOINT_COUNT] {
        &self.keypoints
    }

    /// Keypoint for a given joint
    pub fn joint(&self, joint: HandJoint) -> &Keypoint {
        &self.keypoints[joint.index()]
    }

    pub fn wrist(&self) -> &Keypoint {
        self.joint(HandJoint::Wrist)
    }

    /// Flatten to `x0, y0, z0, x1, ...`
    pub fn to_flat(&self) -> Vec<f32> {
        self.keypoints
            .iter()
            .flat_map(|kp| [kp.x, kp.y, kp.z])
            .collect()
    }
}

/// Flat classifier input, `x0, y0, z0, x1, y1, z1, ...`
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FeatureVector(Vec<f32>);

impl FeatureVector {
    /// Wrap raw values; use the normalizer's validity check before trusting them
    pub fn from_vec(values: Vec<f32>) -> Self {
        FeatureVector(values)
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// `[x, y, z]` of the i-th keypoint, if present
    pub fn keypoint(&self, index: usize) -> Option<[f32; KEYPOINT_DIMENSIONS]> {
        let start = index.checked_mul(KEYPOINT_DIMENSIONS)?;
        let end = start.checked_add(KEYPOINT_DIMENSIONS)?;
        let chunk = self.0.get(start..end)?;
        Some([chunk[0], chunk[1], chunk[2]])
    }

    pub fn into_inner(self) -> Vec<f32> {
        self.0
    }
}

impl AsRef<[f32]> for FeatureVector {
    fn as_ref(&self) -> &[f32] {
        &self.0
    }
}

/// Size of the frame a pose was detected in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameBounds {
    pub width: u32,
    pub height: u32,
}

impl FrameBounds {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }
}

/// Axis-aligned pixel rectangle, always inside its frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl PixelRect {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Exclusive right edge, saturating at `u32::MAX`
    pub fn right(&self) -> u32 {
        self.x.saturating_add(self.width)
    }

    /// Exclusive bottom edge, saturating at `u32::MAX`
    pub fn bottom(&self) -> u32 {
        self.y.saturating_add(self.height)
    }

    pub fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }
}
