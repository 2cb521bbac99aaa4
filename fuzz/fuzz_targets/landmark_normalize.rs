#![no_main]

use arbitrary::Arbitrary;
use handsign_core::{FrameBounds, Keypoint, FEATURE_VECTOR_LEN};
use handsign_landmark::{to_pixel_pose, LandmarkNormalizer};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct Input {
    width: u16,
    height: u16,
    normalized: bool,
    points: Vec<(f32, f32, f32)>,
}

fuzz_target!(|input: Input| {
    let normalizer = LandmarkNormalizer::default();
    let frame = FrameBounds::new(input.width as u32, input.height as u32);
    let keypoints: Vec<Keypoint> = input
        .points
        .iter()
        .map(|&(x, y, z)| Keypoint::new(x, y, z))
        .collect();

    let features = if input.normalized {
        match to_pixel_pose(&keypoints, frame) {
            Ok(pose) => {
                if let Some(rect) = normalizer.region_of_interest(frame, Some(&pose)) {
                    assert!(rect.right() <= frame.width);
                    assert!(rect.bottom() <= frame.height);
                }
                normalizer.normalize(Some(&pose))
            }
            Err(_) => return,
        }
    } else {
        match normalizer.normalize_keypoints(Some(&keypoints)) {
            Ok(features) => features,
            Err(_) => return,
        }
    };

    if let Some(features) = features {
        assert_eq!(features.len(), FEATURE_VECTOR_LEN);
        // Must never panic, whatever the coordinates were
        let _ = normalizer.validate(features.as_slice());
    }
});
