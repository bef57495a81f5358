use super::*;
use crate::curve::CurveError;
use crate::metric::{MetricKind, SchemaError};
use crate::synthetic::{demo_batch, Pulse, SyntheticTrial};
use crate::table::{ColumnKey, TableError};

const CHAIN_GROUPS: [(&str, &str); 4] = [
    ("RPelvisAngles", "Z'"),
    ("RThoraxAngles", "Z'"),
    ("RShoulderAngles", "Z'"),
    ("RElbowAngles", "X'"),
];

fn tent(t: f64, center: f64) -> f64 {
    (100.0 * (1.0 - (t - center).abs() / 0.2)).max(0.0)
}

/// Kinetic-chain table of `samples` rows whose four segments peak at the
/// given fractions of the motion
fn chain_csv(samples: usize, peaks: [f64; 4]) -> Vec<u8> {
    let mut text = String::new();
    text.push_str(&CHAIN_GROUPS.iter().map(|(g, _)| *g).collect::<Vec<_>>().join(","));
    text.push('\n');
    text.push_str(&CHAIN_GROUPS.iter().map(|(_, a)| *a).collect::<Vec<_>>().join(","));
    text.push('\n');
    text.push_str(&vec!["deg/s"; 4].join(","));
    text.push('\n');
    for i in 0..samples {
        let t = i as f64 / (samples - 1) as f64;
        let row: Vec<String> = peaks.iter().map(|&c| format!("{:.6}", tent(t, c))).collect();
        text.push_str(&row.join(","));
        text.push('\n');
    }
    text.into_bytes()
}

fn trials(batch: &[(usize, [f64; 4])]) -> Vec<TrialInput> {
    batch
        .iter()
        .enumerate()
        .map(|(i, (n, peaks))| TrialInput::new(format!("trial_{}.csv", i + 1), chain_csv(*n, *peaks)))
        .collect()
}

fn run(config: AnalysisConfig, inputs: &[TrialInput]) -> Result<AnalysisReport, PipelineError> {
    Pipeline::new(config).run(inputs, &mut TrialCache::new())
}

#[test]
fn test_three_trials_of_different_length_align() {
    let centered = [0.5; 4];
    let inputs = trials(&[(150, centered), (160, centered), (140, centered)]);
    let report = run(AnalysisConfig::default(), &inputs).unwrap();

    assert_eq!(report.trial_count(), 3);
    assert_eq!(report.metrics().len(), 4);

    let pelvis = report.metric(MetricId::PelvisVelocity).unwrap();
    assert_eq!(pelvis.aggregate.len(), 101);
    assert!((49..=51).contains(&pelvis.peak.index));
    assert!((pelvis.peak.normalized_time - 50.0).abs() <= 1.0);
    assert!(pelvis.peak.value > 95.0);

    let spread = pelvis.aggregate.spread().unwrap();
    assert!(spread.iter().all(|s| *s < 1.0), "trials should overlap closely");
    assert_eq!(pelvis.series.len(), 3);
    assert_eq!(pelvis.series[1].len(), 160);
}

#[test]
fn test_firing_order_proximal_to_distal() {
    let inputs = trials(&[(120, [0.20, 0.35, 0.50, 0.65])]);
    let report = run(AnalysisConfig::default(), &inputs).unwrap();

    let order = report.firing_order().unwrap();
    let names: Vec<&str> = order.ranked.iter().map(|p| p.metric.as_str()).collect();
    assert_eq!(
        names,
        vec!["pelvis_velocity", "thorax_velocity", "shoulder_velocity", "elbow_velocity"]
    );
    assert!(order.proximal_to_distal);

    let times: Vec<f64> = order.ranked.iter().map(|p| p.normalized_time).collect();
    assert!((times[0] - 20.0).abs() <= 1.0);
    assert!((times[3] - 65.0).abs() <= 1.0);
}

#[test]
fn test_firing_order_out_of_sequence() {
    // Elbow peaks before the shoulder
    let inputs = trials(&[(120, [0.20, 0.35, 0.65, 0.50])]);
    let report = run(AnalysisConfig::default(), &inputs).unwrap();

    let order = report.firing_order().unwrap();
    assert_eq!(order.ranked[2].metric, "elbow_velocity");
    assert_eq!(order.ranked[3].metric, "shoulder_velocity");
    assert!(!order.proximal_to_distal);
}

#[test]
fn test_batch_size_checked_before_parsing() {
    let garbage = vec![
        TrialInput::new("a.csv", b"not a table".to_vec()),
        TrialInput::new("b.csv", Vec::new()),
    ];
    match run(AnalysisConfig::default(), &garbage).unwrap_err() {
        PipelineError::InputCount { actual, allowed } => {
            assert_eq!(actual, 2);
            assert_eq!(allowed, vec![1, 3]);
        }
        other => panic!("Expected InputCount, got {other:?}"),
    }

    assert!(matches!(
        run(AnalysisConfig::default(), &[]),
        Err(PipelineError::InputCount { actual: 0, .. })
    ));

    let four = trials(&[(50, [0.5; 4]); 4]);
    assert!(matches!(
        run(AnalysisConfig::default(), &four),
        Err(PipelineError::InputCount { actual: 4, .. })
    ));
}

#[test]
fn test_input_count_message() {
    let err = Pipeline::new(AnalysisConfig::default()).check_batch(2).unwrap_err();
    assert_eq!(err.to_string(), "Expected 1 or 3 trial files, got 2");
}

#[test]
fn test_single_trial_has_no_spread() {
    let inputs = trials(&[(80, [0.3, 0.4, 0.5, 0.6])]);
    let report = run(AnalysisConfig::default(), &inputs).unwrap();

    assert!(report.is_single_trial());
    for metric in report.metrics() {
        assert_eq!(metric.aggregate.trial_count(), 1);
        assert!(metric.aggregate.spread().is_none());
    }
}

#[test]
fn test_missing_column_names_file() {
    let good = SyntheticTrial::proximal_to_distal(100, Side::Right);
    let inputs = vec![
        TrialInput::new("first.csv", good.to_csv_bytes().unwrap()),
        TrialInput::new(
            "second.csv",
            good.clone()
                .without_metric(MetricId::ThoraxVelocity)
                .without_metric(MetricId::ElbowVelocity)
                .to_csv_bytes()
                .unwrap(),
        ),
        TrialInput::new("third.csv", good.to_csv_bytes().unwrap()),
    ];

    match run(AnalysisConfig::default(), &inputs).unwrap_err() {
        PipelineError::Schema { file, source } => {
            assert_eq!(file, "second.csv");
            match source {
                SchemaError::MissingColumns(keys) => assert_eq!(keys.len(), 2),
                other => panic!("Expected MissingColumns, got {other:?}"),
            }
        }
        other => panic!("Expected Schema error, got {other:?}"),
    }
}

#[test]
fn test_wrong_side_is_schema_error() {
    let inputs = vec![TrialInput::new(
        "lefty.csv",
        SyntheticTrial::proximal_to_distal(60, Side::Left).to_csv_bytes().unwrap(),
    )];
    let config = AnalysisConfig::default().with_side(Side::Right);
    assert!(matches!(run(config, &inputs), Err(PipelineError::Schema { .. })));

    let config = AnalysisConfig::default().with_side(Side::Left);
    assert!(run(config, &inputs).is_ok());
}

#[test]
fn test_invalid_cell_is_reported() {
    let mut bytes = chain_csv(10, [0.5; 4]);
    bytes.extend_from_slice(b"1,2,oops,4\n5,6,7,8\n");
    let inputs = vec![TrialInput::new("bad.csv", bytes)];

    match run(AnalysisConfig::default(), &inputs).unwrap_err() {
        PipelineError::Schema { file, source } => {
            assert_eq!(file, "bad.csv");
            assert!(matches!(source, SchemaError::Table(TableError::InvalidValue { .. })));
        }
        other => panic!("Expected Schema error, got {other:?}"),
    }
}

/// Blank out the last column from sample row `from` onwards
fn blank_elbow_from(bytes: Vec<u8>, from: usize) -> Vec<u8> {
    let text = String::from_utf8(bytes).unwrap();
    let mut out = String::new();
    for (i, line) in text.lines().enumerate() {
        if i >= 3 + from {
            let kept: Vec<&str> = line.split(',').take(3).collect();
            out.push_str(&kept.join(","));
            out.push(',');
        } else {
            out.push_str(line);
        }
        out.push('\n');
    }
    out.into_bytes()
}

#[test]
fn test_column_ending_early_fails_the_run() {
    let bytes = blank_elbow_from(chain_csv(100, [0.5; 4]), 50);
    let inputs = vec![TrialInput::new("ragged.csv", bytes)];

    match run(AnalysisConfig::default(), &inputs).unwrap_err() {
        PipelineError::Schema { file, source } => {
            assert_eq!(file, "ragged.csv");
            match source {
                SchemaError::Table(TableError::InvalidValue { line, column, value }) => {
                    assert_eq!(line, 54);
                    assert_eq!(column, ColumnKey::new("RElbowAngles", "X'", "deg/s"));
                    assert_eq!(value, "");
                }
                other => panic!("Expected invalid value, got {other:?}"),
            }
        }
        other => panic!("Expected Schema error, got {other:?}"),
    }
}

#[test]
fn test_blank_padding_rows_keep_a_shared_time_base() {
    let mut bytes = chain_csv(100, [0.5; 4]);
    bytes.extend_from_slice(b",,,\n,,,\n");
    let inputs = vec![TrialInput::new("padded.csv", bytes)];
    let report = run(AnalysisConfig::default(), &inputs).unwrap();

    for metric in report.metrics() {
        assert_eq!(metric.series[0].len(), 100);
        assert!((metric.peak.normalized_time - 50.0).abs() <= 1.0);
    }
}

#[test]
fn test_unparseable_file_is_table_error() {
    let inputs = vec![TrialInput::new("short.csv", b"RPelvisAngles\nZ'\n".to_vec())];
    match run(AnalysisConfig::default(), &inputs).unwrap_err() {
        PipelineError::Table { file, source } => {
            assert_eq!(file, "short.csv");
            assert!(matches!(source, TableError::MissingHeader { .. }));
        }
        other => panic!("Expected Table error, got {other:?}"),
    }
}

#[test]
fn test_single_sample_trial_is_too_short() {
    let inputs = trials(&[(2, [0.5; 4])]);
    assert!(run(AnalysisConfig::default(), &inputs).is_ok());

    let one_row = b"RPelvisAngles,RThoraxAngles,RShoulderAngles,RElbowAngles\nZ',Z',Z',X'\ndeg/s,deg/s,deg/s,deg/s\n1,2,3,4\n";
    let inputs = vec![TrialInput::new("one.csv", one_row.to_vec())];
    match run(AnalysisConfig::default(), &inputs).unwrap_err() {
        PipelineError::TooShort { file, metric, samples } => {
            assert_eq!(file, "one.csv");
            assert_eq!(metric, MetricId::PelvisVelocity);
            assert_eq!(samples, 1);
        }
        other => panic!("Expected TooShort, got {other:?}"),
    }
}

#[test]
fn test_display_mode_rectification() {
    let bytes = SyntheticTrial::proximal_to_distal(120, Side::Right).to_csv_bytes().unwrap();
    let inputs = vec![TrialInput::new("sign.csv", bytes)];

    let absolute = run(AnalysisConfig::default(), &inputs).unwrap();
    let pelvis = absolute.metric(MetricId::PelvisVelocity).unwrap();
    assert!(pelvis.spec.rectify);
    assert!(pelvis.aggregate.mean().iter().all(|v| *v >= 0.0));

    let raw = run(AnalysisConfig::default().with_display(DisplayMode::Raw), &inputs).unwrap();
    let pelvis = raw.metric(MetricId::PelvisVelocity).unwrap();
    assert!(!pelvis.spec.rectify);
    assert!(pelvis.aggregate.mean().iter().any(|v| *v < 0.0));
    assert!(pelvis.peak.value > 0.0);
}

#[test]
fn test_dashboard_keeps_moment_sign() {
    let bytes = SyntheticTrial::proximal_to_distal(120, Side::Right).to_csv_bytes().unwrap();
    let inputs = vec![TrialInput::new("dash.csv", bytes)];
    let config = AnalysisConfig::default().with_mode(AnalysisMode::Dashboard);
    let report = run(config, &inputs).unwrap();

    assert_eq!(report.metrics().len(), 6);

    let rotation = report.metric(MetricId::ShoulderRotationTorque).unwrap();
    assert_eq!(rotation.spec.kind, MetricKind::Moment);
    assert!(!rotation.spec.rectify);
    assert!(rotation.peak.value < -0.8, "signed peak of a negative torque");

    let valgus = report.metric(MetricId::ElbowValgusTorque).unwrap();
    assert!((valgus.peak.value - 0.95).abs() < 0.01, "N.mm/kg converted to N.m/kg");

    let order = report.firing_order().unwrap();
    assert_eq!(order.ranked.len(), 4);
    assert!(order.ranked.iter().all(|p| p.metric.ends_with("_velocity")));
    assert!(order.proximal_to_distal);
}

#[test]
fn test_valgus_mode_has_no_firing_order() {
    let bytes = SyntheticTrial::proximal_to_distal(90, Side::Right)
        .without_metric(MetricId::PelvisVelocity)
        .to_csv_bytes()
        .unwrap();
    let inputs = vec![TrialInput::new("valgus.csv", bytes)];
    let config = AnalysisConfig::default().with_mode(AnalysisMode::ValgusTorque);
    let report = run(config, &inputs).unwrap();

    assert_eq!(report.metrics().len(), 1);
    assert_eq!(report.metrics()[0].id(), MetricId::ElbowValgusTorque);
    assert!(report.firing_order().is_none());
}

#[test]
fn test_demo_batch_fires_in_order() {
    let inputs: Vec<TrialInput> = demo_batch("demo", Side::Right)
        .into_iter()
        .map(|(name, trial)| TrialInput::new(name, trial.to_csv_bytes().unwrap()))
        .collect();
    let report = run(AnalysisConfig::default(), &inputs).unwrap();

    assert_eq!(report.sources(), &["demo_01.csv", "demo_02.csv", "demo_03.csv"]);
    assert!(report.firing_order().unwrap().proximal_to_distal);
}

#[test]
fn test_custom_point_count() {
    let inputs = trials(&[(60, [0.5; 4])]);
    let config = AnalysisConfig {
        points: 51,
        ..AnalysisConfig::default()
    };
    let report = run(config, &inputs).unwrap();

    assert_eq!(report.time_axis().len(), 51);
    assert_eq!(report.time_axis()[50], 100.0);
    assert_eq!(report.metrics()[0].aggregate.len(), 51);
    assert_eq!(report.metrics()[0].peak.index, 25);
}

#[test]
fn test_zero_points_is_a_defect() {
    let inputs = trials(&[(60, [0.5; 4])]);
    let config = AnalysisConfig {
        points: 0,
        ..AnalysisConfig::default()
    };
    assert!(matches!(
        run(config, &inputs),
        Err(PipelineError::Defect(CurveError::InvalidTargetLength(0)))
    ));
}

#[test]
fn test_cache_parses_identical_files_once() {
    let bytes = chain_csv(40, [0.2, 0.4, 0.6, 0.8]);
    let inputs = vec![
        TrialInput::new("a.csv", bytes.clone()),
        TrialInput::new("b.csv", bytes.clone()),
        TrialInput::new("c.csv", chain_csv(45, [0.2, 0.4, 0.6, 0.8])),
    ];
    let mut cache = TrialCache::new();
    let pipeline = Pipeline::new(AnalysisConfig::default());

    let first = pipeline.run(&inputs, &mut cache).unwrap();
    assert_eq!(cache.len(), 2);
    assert_eq!(cache.misses(), 2);
    assert_eq!(cache.hits(), 1);
    // Names follow the inputs, not the first table parsed from those bytes
    assert_eq!(first.sources()[1], "b.csv");

    let second = pipeline.run(&inputs, &mut cache).unwrap();
    assert_eq!(cache.hits(), 4);
    assert_eq!(first, second);

    cache.clear();
    assert!(cache.is_empty());
    assert_eq!(cache.hits(), 0);
}

#[test]
fn test_cache_separates_delimiters() {
    let bytes = b"RPelvisAngles\tRThoraxAngles\nZ'\tZ'\ndeg/s\tdeg/s\n1\t2\n".to_vec();
    let mut cache = TrialCache::new();
    let tsv = cache.get_or_parse(&TrialInput::new("x.tsv", bytes.clone())).unwrap();
    let csv = cache.get_or_parse(&TrialInput::new("x.csv", bytes)).unwrap();

    assert_eq!(cache.len(), 2);
    assert_eq!(tsv.columns().len(), 2);
    assert_eq!(csv.columns().len(), 1);
}

#[test]
fn test_fingerprint_hex() {
    let fp = Fingerprint::of(b"abc");
    assert_eq!(
        fp.to_hex(),
        "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
    );
    assert_eq!(fp.to_string(), fp.to_hex());
    assert_ne!(Fingerprint::of(b"abd"), fp);
}

#[test]
fn test_trial_from_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ono_01.csv");
    std::fs::write(&path, chain_csv(20, [0.5; 4])).unwrap();

    let trial = TrialInput::from_path(&path).unwrap();
    assert_eq!(trial.name(), "ono_01.csv");
    assert_eq!(trial.bytes(), chain_csv(20, [0.5; 4]).as_slice());
}

#[test]
fn test_unreadable_trial_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing_01.csv");

    let err = TrialInput::from_path(&path).unwrap_err();
    match &err {
        PipelineError::Io { file, source } => {
            assert_eq!(file, &path.display().to_string());
            assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
        }
        other => panic!("Expected Io error, got {other:?}"),
    }
    assert!(err.to_string().contains("missing_01.csv"));
}

#[test]
fn test_run_tables_uses_table_sources() {
    let tables: Vec<RawTrialTable> = (0..3)
        .map(|i| RawTrialTable::from_bytes(&chain_csv(50 + i, [0.3, 0.4, 0.5, 0.6]), &format!("t{i}.csv")).unwrap())
        .collect();
    let report = Pipeline::new(AnalysisConfig::default()).run_tables(&tables).unwrap();
    assert_eq!(report.sources(), &["t0.csv", "t1.csv", "t2.csv"]);
}

#[test]
fn test_time_axis_seconds() {
    assert_eq!(time_axis_seconds(3, 200.0), vec![0.0, 0.005, 0.01]);
    assert!(time_axis_seconds(0, DEFAULT_SAMPLING_RATE_HZ).is_empty());
}

#[test]
fn test_mode_parsing_and_tags() {
    assert_eq!("kinetic-chain".parse::<AnalysisMode>().unwrap(), AnalysisMode::KineticChain);
    assert_eq!("valgus_torque".parse::<AnalysisMode>().unwrap(), AnalysisMode::ValgusTorque);
    assert_eq!("Dashboard".parse::<AnalysisMode>().unwrap(), AnalysisMode::Dashboard);
    assert!("spin".parse::<AnalysisMode>().is_err());
    assert_eq!(AnalysisMode::ValgusTorque.file_tag(), "valgus_torque");
    assert_eq!("raw".parse::<DisplayMode>().unwrap(), DisplayMode::Raw);
}

#[test]
fn test_peak_policy() {
    assert!(!DisplayMode::Absolute.absolute_peak(MetricKind::AngularVelocity));
    assert!(DisplayMode::Absolute.absolute_peak(MetricKind::Moment));
    assert!(DisplayMode::Raw.absolute_peak(MetricKind::AngularVelocity));
    assert!(DisplayMode::Raw.absolute_peak(MetricKind::Moment));
    assert!(!DisplayMode::Raw.rectifies(MetricKind::AngularVelocity));
    assert!(!DisplayMode::Absolute.rectifies(MetricKind::Moment));
}

#[test]
fn test_pulse_amplitude_in_raw_mode() {
    // A large negative lobe wins the signed peak in raw mode
    let trial = SyntheticTrial::new(101, Side::Right)
        .with_pulse(Pulse::new(MetricId::PelvisVelocity, 0.3, 200.0))
        .with_pulse(Pulse::new(MetricId::PelvisVelocity, 0.7, -500.0))
        .with_pulse(Pulse::new(MetricId::ThoraxVelocity, 0.4, 100.0))
        .with_pulse(Pulse::new(MetricId::ShoulderVelocity, 0.5, 100.0))
        .with_pulse(Pulse::new(MetricId::ElbowVelocity, 0.6, 100.0));
    let inputs = vec![TrialInput::new("neg.csv", trial.to_csv_bytes().unwrap())];

    let raw = run(AnalysisConfig::default().with_display(DisplayMode::Raw), &inputs).unwrap();
    let pelvis = raw.metric(MetricId::PelvisVelocity).unwrap();
    assert_eq!(pelvis.peak.index, 70);
    assert!((pelvis.peak.value + 500.0).abs() < 1e-3);
    assert!(!raw.firing_order().unwrap().proximal_to_distal);
}
