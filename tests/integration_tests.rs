//! Integration tests for deltagrid.

use deltagrid::{
    first_primes, frame_count, iterate_rule, primes_up_to, som_to_image, Config, DeltaGridError,
    DiffRule, FrameWriter, RenderConfig, ScatterPlot, Som, SomConfig, SomTrainer, StopReason,
};
use num_bigint::BigInt;
use tempfile::tempdir;

fn small_render() -> RenderConfig {
    RenderConfig {
        width: 160,
        height: 90,
        margin: 8,
        marker_radius: 1,
    }
}

fn big_primes(limit: u64) -> Vec<BigInt> {
    primes_up_to(limit).into_iter().map(BigInt::from).collect()
}

#[test]
fn test_first_primes_collapse_to_three() {
    let frames: Vec<Vec<BigInt>> = iterate_rule(big_primes(11), DiffRule::Plain).collect();
    assert_eq!(frames.len(), 5);
    assert_eq!(frames[1], vec![1, 2, 2, 4].into_iter().map(BigInt::from).collect::<Vec<_>>());
    assert_eq!(frames[4], vec![BigInt::from(3)]);
}

#[test]
fn test_frames_written_for_every_iteration() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("frames");

    let primes = big_primes(100);
    let expected = frame_count(primes.len(), DiffRule::Plain);
    let plot = ScatterPlot::new(small_render()).unwrap();
    let mut writer = FrameWriter::new(&out).unwrap();

    for seq in iterate_rule(primes, DiffRule::Plain) {
        writer.write(&plot.render(&seq).unwrap()).unwrap();
    }

    assert_eq!(writer.frames_written(), expected);
    assert_eq!(expected, 25);
    for i in 0..expected {
        assert!(out.join(format!("{}.png", i)).is_file());
    }
    assert!(!out.join(format!("{}.png", expected)).exists());
}

#[test]
fn test_symmetric_rule_on_even_prime_count() {
    // 25 primes below 100: odd length, ends at one value.
    let lengths: Vec<usize> = iterate_rule(big_primes(100), DiffRule::Symmetric)
        .map(|s| s.len())
        .collect();
    assert_eq!(lengths.first(), Some(&25));
    assert_eq!(lengths.last(), Some(&1));

    // 26 primes below 102: even length, ends empty and can still be drawn.
    let primes: Vec<BigInt> = first_primes(26).into_iter().map(BigInt::from).collect();
    let frames: Vec<Vec<BigInt>> = iterate_rule(primes, DiffRule::Symmetric).collect();
    assert_eq!(frames.len(), 14);
    assert!(frames.last().unwrap().is_empty());

    let plot = ScatterPlot::new(small_render()).unwrap();
    assert!(plot.render(frames.last().unwrap()).is_ok());
}

#[test]
fn test_rendering_fails_once_values_leave_float_range() {
    let plot = ScatterPlot::new(small_render()).unwrap();

    // Differences of the primes up to 10,000 grow past 1e308 well before the end.
    let mut rendered = 0;
    let mut failure = None;
    for seq in iterate_rule(big_primes(10_000), DiffRule::Plain) {
        match plot.render(&seq) {
            Ok(_) => rendered += 1,
            Err(e) => {
                failure = Some(e);
                break;
            }
        }
    }

    assert!(rendered > 100);
    assert!(matches!(failure, Some(DeltaGridError::Render(_))));
}

#[test]
fn test_som_training_with_history_frames() {
    let dir = tempdir().unwrap();
    let config = SomConfig {
        height: 4,
        width: 6,
        sigma0: 2.0,
        initial_learning_rate: 0.3,
        lambda: 10.0,
        keep_history: true,
        print_progress: false,
        seed: Some(11),
        ..Default::default()
    };
    let data = vec![
        vec![1.0, 0.0, 0.0],
        vec![0.0, 1.0, 0.0],
        vec![0.0, 0.0, 1.0],
        vec![1.0, 1.0, 0.0],
    ];

    let mut som = Som::from_config(&config);
    let outcome = SomTrainer::new(config).train(&mut som, &data).unwrap();
    assert_eq!(outcome.stop, StopReason::Converged);
    // 10 * ln(2) = 6.93...
    assert_eq!(outcome.steps, 7);
    assert_eq!(outcome.history.len(), 8);
    assert_eq!(outcome.history.last(), Some(&som.snapshot()));

    let mut writer = FrameWriter::new(dir.path().join("som")).unwrap();
    for snapshot in &outcome.history {
        writer.write(&som_to_image(snapshot, 5).unwrap()).unwrap();
    }
    assert_eq!(writer.frames_written(), 8);

    let last = image::open(dir.path().join("som").join("7.png")).unwrap().to_rgb8();
    assert_eq!(last.dimensions(), (30, 20));
}

#[test]
fn test_som_budget_guards_against_slow_decay() {
    let config = SomConfig {
        height: 3,
        width: 3,
        sigma0: 50.0,
        lambda: 1e9,
        max_steps: 200,
        print_progress: false,
        seed: Some(5),
        ..Default::default()
    };
    let mut som = Som::from_config(&config);
    let outcome = SomTrainer::new(config)
        .train(&mut som, &[vec![0.2, 0.4, 0.6]])
        .unwrap();
    assert_eq!(outcome.stop, StopReason::StepBudgetExhausted);
    assert_eq!(outcome.steps, 200);
}

#[test]
fn test_config_file_drives_training() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("deltagrid.json");
    std::fs::write(
        &path,
        r#"{
            "som": {
                "height": 2,
                "width": 2,
                "feature_dim": 2,
                "sigma0": 1.5,
                "lambda": 4.0,
                "init": { "kind": "zeros" },
                "seed": 1
            }
        }"#,
    )
    .unwrap();

    let config = Config::from_file(&path).unwrap();
    let mut som = Som::from_config(&config.som);
    let outcome = SomTrainer::new(config.som)
        .train(&mut som, &[vec![1.0, 1.0]])
        .unwrap();

    // 4 * ln(1.5) = 1.62...
    assert_eq!(outcome.steps, 2);
    assert!(som.neurons.iter().all(|n| n.weights[0] > 0.0 && n.weights[0] < 1.0));
}
