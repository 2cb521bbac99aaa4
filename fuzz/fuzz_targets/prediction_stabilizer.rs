#![no_main]

use arbitrary::Arbitrary;
use handsign_core::{RecognizerConfig, LABEL_COUNT};
use handsign_stabilizer::{ConfidenceGate, PredictionStabilizer};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
enum Op {
    Accept { label: u8, confidence: f32 },
    Decode { scores: Vec<f32> },
    Reset,
}

#[derive(Debug, Arbitrary)]
struct Input {
    window: u8,
    ops: Vec<Op>,
}

fuzz_target!(|input: Input| {
    let config = RecognizerConfig {
        history_window_capacity: (input.window as usize % 16) + 1,
        ..RecognizerConfig::default()
    };
    let Ok(mut stabilizer) = PredictionStabilizer::new(&config) else {
        return;
    };
    let Ok(gate) = ConfidenceGate::new(&config) else {
        return;
    };

    for op in input.ops {
        match op {
            Op::Accept { label, confidence } => {
                let label = config
                    .label_set
                    .get(label as usize % LABEL_COUNT)
                    .unwrap_or("A")
                    .to_string();
                if let Ok(p) = stabilizer.accept(&label, confidence) {
                    assert!(config.label_set.contains(&p.label));
                    assert!((0.0..=1.0).contains(&p.confidence));
                }
            }
            Op::Decode { scores } => {
                if let Ok(Some(p)) = gate.decode(&scores) {
                    assert!(p.confidence > gate.threshold());
                    if let Ok(s) = stabilizer.accept_prediction(&p) {
                        assert!(!s.is_none());
                    }
                }
            }
            Op::Reset => {
                stabilizer.reset();
                assert!(stabilizer.current().is_none());
            }
        }
        assert!(stabilizer.window().len() <= config.history_window_capacity);
    }
});
