//! Synthetic hand poses
//!
//! Each label gets a distinct five-finger shape: finger `f` of label `i` is
//! extended when bit `f` of `i + 1` is set, curled otherwise.

use handsign_core::{Keypoint, HAND_KEYPOINT_COUNT, LABEL_COUNT};

/// Finger direction, degrees clockwise from straight up (thumb .. pinky)
const FINGER_ANGLES_DEG: [f32; 5] = [-60.0, -20.0, 0.0, 20.0, 40.0];

/// Joint distance from the wrist for an extended finger, in hand-size units
const EXTENDED_REACH: [f32; 4] = [0.35, 0.53, 0.71, 0.89];

/// Joint distance from the wrist for a curled finger
const CURLED_REACH: [f32; 4] = [0.35, 0.42, 0.38, 0.30];

/// Where and how large a hand appears in the frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandPlacement {
    /// Wrist position in pixels
    pub wrist_x: f32,
    pub wrist_y: f32,
    /// Hand size in pixels
    pub size: f32,
}

impl Default for HandPlacement {
    fn default() -> Self {
        HandPlacement {
            wrist_x: 320.0,
            wrist_y: 360.0,
            size: 120.0,
        }
    }
}

/// Whether finger `finger` is extended in the shape for `label_index`
pub fn finger_extended(label_index: usize, finger: usize) -> bool {
    ((label_index + 1) >> finger) & 1 == 1
}

/// Pixel-space keypoints for a label's template shape
pub fn template_pose(label_index: usize, placement: HandPlacement) -> Vec<Keypoint> {
    debug_assert!(label_index < LABEL_COUNT);

    let mut keypoints = Vec::with_capacity(HAND_KEYPOINT_COUNT);
    keypoints.push(Keypoint::new(placement.wrist_x, placement.wrist_y, 0.0));

    for (finger, angle) in FINGER_ANGLES_DEG.iter().enumerate() {
        let reach = if finger_extended(label_index, finger) {
            &EXTENDED_REACH
        } else {
            &CURLED_REACH
        };
        let (sin, cos) = angle.to_radians().sin_cos();
        for (joint, r) in reach.iter().enumerate() {
            let r = placement.size * r;
            keypoints.push(Keypoint::new(
                placement.wrist_x + r * sin,
                placement.wrist_y - r * cos,
                -0.01 * (joint as f32 + 1.0),
            ));
        }
    }

    keypoints
}

#[cfg(test)]
mod tests {
    use super::*;
    use handsign_core::HandJoint;

    #[test]
    fn test_template_shape() {
        let pose = template_pose(0, HandPlacement::default());
        assert_eq!(pose.len(), HAND_KEYPOINT_COUNT);
        assert_eq!(pose[0], Keypoint::new(320.0, 360.0, 0.0));

        // Label 0 -> pattern 0b00001: thumb out, everything else curled
        assert!(finger_extended(0, 0));
        assert!(!finger_extended(0, 1));

        // Middle finger points straight up
        let middle_tip = pose[HandJoint::MiddleTip.index()];
        assert!((middle_tip.x - 320.0).abs() < 1e-3);
        assert!((middle_tip.y - (360.0 - 120.0 * 0.30)).abs() < 1e-3);
    }

    #[test]
    fn test_templates_distinct() {
        for a in 0..LABEL_COUNT {
            for b in (a + 1)..LABEL_COUNT {
                let differs = (0..5).any(|f| finger_extended(a, f) != finger_extended(b, f));
                assert!(differs, "labels {} and {} share a shape", a, b);
            }
        }
    }
}
