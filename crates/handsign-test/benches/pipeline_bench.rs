//! Benchmarks for the full per-frame pipeline

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use handsign_core::RecognizerConfig;
use handsign_landmark::LandmarkNormalizer;
use handsign_runtime::Recognizer;
use handsign_test::{
    run_scenario, GestureScript, NoiseConfig, ScenarioConfig, SimulatedCamera, SimulatedDetector,
    TemplateClassifier,
};

fn bench_process_frame(c: &mut Criterion) {
    let config = RecognizerConfig::default();
    let classifier = TemplateClassifier::new(
        &LandmarkNormalizer::default(),
        TemplateClassifier::DEFAULT_TEMPERATURE,
    )
    .unwrap();
    let mut recognizer =
        Recognizer::new(&config, SimulatedDetector::default(), classifier).unwrap();
    let mut camera = SimulatedCamera::new(NoiseConfig::default(), 1);
    let frames: Vec<_> = (0..64).map(|i| camera.capture(i % 26)).collect();
    let mut i = 0;

    c.bench_function("recognizer_process_frame", |b| {
        b.iter(|| {
            i = (i + 1) % frames.len();
            black_box(recognizer.process_frame(black_box(&frames[i])))
        })
    });
}

fn bench_classify(c: &mut Criterion) {
    use handsign_core::HandPose;
    use handsign_runtime::GestureClassifier;
    use handsign_test::{template_pose, HandPlacement};

    let normalizer = LandmarkNormalizer::default();
    let mut classifier =
        TemplateClassifier::new(&normalizer, TemplateClassifier::DEFAULT_TEMPERATURE).unwrap();
    let pose = HandPose::from_keypoints(&template_pose(3, HandPlacement::default())).unwrap();
    let features = normalizer.normalize(Some(&pose)).unwrap();

    c.bench_function("template_classify", |b| {
        b.iter(|| black_box(classifier.classify(black_box(&features))))
    });
}

fn bench_scenario(c: &mut Criterion) {
    let config = ScenarioConfig::default();
    let script = GestureScript::spell("RUST", 25, &config.recognizer.label_set).unwrap();

    c.bench_function("scenario_100_frames", |b| {
        b.iter(|| black_box(run_scenario(black_box(&script), &config)))
    });
}

criterion_group!(benches, bench_process_frame, bench_classify, bench_scenario);

criterion_main!(benches);
