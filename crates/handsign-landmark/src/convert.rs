//! Detector coordinate conversion and simple pose measurements

use handsign_core::{FrameBounds, HandPose, HandsignResult, Keypoint};

/// Convert detector keypoints (x, y in [0, 1] of the frame) to pixel space
///
/// x and y are scaled by the frame size and truncated to whole pixels; z is
/// passed through.
pub fn to_pixel_pose(keypoints: &[Keypoint], frame: FrameBounds) -> HandsignResult<HandPose> {
    let width = frame.width as f32;
    let height = frame.height as f32;

    let pixels: Vec<Keypoint> = keypoints
        .iter()
        .map(|kp| Keypoint::new((kp.x * width).trunc(), (kp.y * height).trunc(), kp.z))
        .collect();

    HandPose::from_keypoints(&pixels)
}

/// Area of the x/y bounding box of a pose, 0 when absent
pub fn hand_area(pose: Option<&HandPose>) -> f32 {
    let Some(pose) = pose else {
        return 0.0;
    };

    let (mut x_lo, mut x_hi) = (f32::INFINITY, f32::NEG_INFINITY);
    let (mut y_lo, mut y_hi) = (f32::INFINITY, f32::NEG_INFINITY);
    for kp in pose.keypoints() {
        x_lo = x_lo.min(kp.x);
        x_hi = x_hi.max(kp.x);
        y_lo = y_lo.min(kp.y);
        y_hi = y_hi.max(kp.y);
    }

    (x_hi - x_lo) * (y_hi - y_lo)
}
