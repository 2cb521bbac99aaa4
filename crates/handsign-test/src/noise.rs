//! Frame noise for simulated detection
//!
//! Models what a real detector does to a steady hand:
//! - Keypoint jitter
//! - Lost hands (no detection)
//! - Partial hands (too few keypoints)
//! - Transient pose flips (a different shape for one frame)

use rand::rngs::StdRng;
use rand::Rng;

/// Detection noise configuration
#[derive(Clone, Debug, PartialEq)]
pub struct NoiseConfig {
    /// Max absolute keypoint offset in pixels (uniform)
    pub keypoint_jitter_px: f32,
    /// Probability a frame has no hand (0.0 - 1.0)
    pub drop_rate: f64,
    /// Probability a frame reports a partial hand
    pub partial_rate: f64,
    /// Probability a frame shows some other label's shape
    pub flip_rate: f64,
}

impl Default for NoiseConfig {
    fn default() -> Self {
        NoiseConfig {
            keypoint_jitter_px: 2.0,
            drop_rate: 0.05,
            partial_rate: 0.01,
            flip_rate: 0.05,
        }
    }
}

impl NoiseConfig {
    /// No noise at all
    pub fn clean() -> Self {
        NoiseConfig {
            keypoint_jitter_px: 0.0,
            drop_rate: 0.0,
            partial_rate: 0.0,
            flip_rate: 0.0,
        }
    }

    /// Shaky hand, poor lighting
    pub fn noisy() -> Self {
        NoiseConfig {
            keypoint_jitter_px: 3.0,
            drop_rate: 0.1,
            partial_rate: 0.05,
            flip_rate: 0.2,
        }
    }

    /// Offset for one coordinate
    pub fn jitter(&self, rng: &mut StdRng) -> f32 {
        if self.keypoint_jitter_px <= 0.0 {
            return 0.0;
        }
        rng.gen_range(-self.keypoint_jitter_px..=self.keypoint_jitter_px)
    }
}

/// What happened to a simulated frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameFate {
    Intact,
    Dropped,
    Partial,
    Flipped,
}

impl FrameFate {
    /// Roll the fate of the next frame
    pub fn roll(config: &NoiseConfig, rng: &mut StdRng) -> Self {
        let u: f64 = rng.gen();
        if u < config.drop_rate {
            FrameFate::Dropped
        } else if u < config.drop_rate + config.partial_rate {
            FrameFate::Partial
        } else if u < config.drop_rate + config.partial_rate + config.flip_rate {
            FrameFate::Flipped
        } else {
            FrameFate::Intact
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_clean_is_always_intact() {
        let config = NoiseConfig::clean();
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..1000 {
            assert_eq!(FrameFate::roll(&config, &mut rng), FrameFate::Intact);
            assert_eq!(config.jitter(&mut rng), 0.0);
        }
    }

    #[test]
    fn test_fate_rates() {
        let config = NoiseConfig::noisy();
        let mut rng = StdRng::seed_from_u64(42);
        let n = 20_000;
        let dropped = (0..n)
            .filter(|_| FrameFate::roll(&config, &mut rng) == FrameFate::Dropped)
            .count();
        let rate = dropped as f64 / n as f64;
        assert!((rate - config.drop_rate).abs() < 0.02, "drop rate {}", rate);
    }

    #[test]
    fn test_jitter_bounds() {
        let config = NoiseConfig::noisy();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1000 {
            let j = config.jitter(&mut rng);
            assert!(j.abs() <= config.keypoint_jitter_px);
        }
    }
}
