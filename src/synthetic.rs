//! # Synthetic Module
//!
//! Deterministic trial tables for demos, tests and benchmarks.
//!
//! A [`SyntheticTrial`] lays out the same three-row header a motion-capture
//! export carries: one group per joint, three axes per group with the group
//! label only on the first axis. Each metric column holds a smooth pulse
//! peaking at a chosen fraction of the motion, so the expected peak timing of
//! the generated data is known exactly.

use std::io::Write;
use std::path::Path;

use crate::metric::{MetricId, MetricKind, MetricRegistry, MetricSpec, Side};

const VELOCITY_AXES: [&str; 3] = ["X'", "Y'", "Z'"];
const MOMENT_AXES: [&str; 3] = ["X", "Y", "Z"];

/// Sample counts of the demo batch
pub const DEMO_SAMPLE_COUNTS: [usize; 3] = [150, 160, 140];

/// A Gaussian pulse in one metric's column
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pulse {
    /// Metric receiving the pulse
    pub metric: MetricId,
    /// Peak position as a fraction of the motion, `0.0..=1.0`
    pub peak_at: f64,
    /// Peak value in the table's recorded unit
    pub amplitude: f64,
    /// Standard deviation of the pulse as a fraction of the motion
    pub width: f64,
}

impl Pulse {
    /// Pulse with the default width
    pub fn new(metric: MetricId, peak_at: f64, amplitude: f64) -> Self {
        Self {
            metric,
            peak_at,
            amplitude,
            width: 0.06,
        }
    }

    fn value_at(&self, t: f64) -> f64 {
        let z = (t - self.peak_at) / self.width;
        self.amplitude * (-0.5 * z * z).exp()
    }
}

/// Generator for one trial table.
#[derive(Debug, Clone)]
pub struct SyntheticTrial {
    samples: usize,
    side: Side,
    pulses: Vec<Pulse>,
    counter_rotation: f64,
    omitted: Vec<MetricId>,
}

impl SyntheticTrial {
    /// Trial with no pulses: every metric column is zero
    pub fn new(samples: usize, side: Side) -> Self {
        Self {
            samples,
            side,
            pulses: Vec::new(),
            counter_rotation: 0.0,
            omitted: Vec::new(),
        }
    }

    /// Trial whose segments peak pelvis, thorax, shoulder, then elbow.
    ///
    /// Velocities carry a small opposite-sign lobe before the main peak and
    /// the shoulder rotation torque is negative, so signed and rectified
    /// displays differ.
    pub fn proximal_to_distal(samples: usize, side: Side) -> Self {
        Self::new(samples, side)
            .with_pulse(Pulse::new(MetricId::PelvisVelocity, 0.35, 650.0))
            .with_pulse(Pulse::new(MetricId::ThoraxVelocity, 0.45, 950.0))
            .with_pulse(Pulse::new(MetricId::ShoulderVelocity, 0.60, 4800.0))
            .with_pulse(Pulse::new(MetricId::ElbowVelocity, 0.70, 2300.0))
            .with_pulse(Pulse::new(MetricId::ElbowValgusTorque, 0.58, 950.0))
            .with_pulse(Pulse::new(MetricId::ShoulderRotationTorque, 0.60, -820.0))
            .with_counter_rotation(0.2)
    }

    /// Add a pulse; pulses on the same metric are summed
    pub fn with_pulse(mut self, pulse: Pulse) -> Self {
        self.pulses.push(pulse);
        self
    }

    /// Add an opposite-sign lobe of `ratio` times each velocity pulse,
    /// centered 0.15 earlier in the motion
    pub fn with_counter_rotation(mut self, ratio: f64) -> Self {
        self.counter_rotation = ratio;
        self
    }

    /// Leave the columns of `metric` out of the table
    pub fn without_metric(mut self, metric: MetricId) -> Self {
        self.omitted.push(metric);
        self
    }

    /// Number of sample rows
    pub fn samples(&self) -> usize {
        self.samples
    }

    /// Side prefix of the generated groups
    pub fn side(&self) -> Side {
        self.side
    }

    /// Samples of one metric in the table's recorded unit
    pub fn values(&self, spec: &MetricSpec) -> Vec<f64> {
        (0..self.samples)
            .map(|i| {
                let t = if self.samples > 1 {
                    i as f64 / (self.samples - 1) as f64
                } else {
                    0.0
                };
                self.pulses
                    .iter()
                    .filter(|p| p.metric == spec.id)
                    .map(|p| {
                        let lobe = match spec.kind {
                            MetricKind::AngularVelocity if self.counter_rotation != 0.0 => {
                                let early = Pulse {
                                    peak_at: p.peak_at - 0.15,
                                    amplitude: -p.amplitude * self.counter_rotation,
                                    ..*p
                                };
                                early.value_at(t)
                            }
                            _ => 0.0,
                        };
                        p.value_at(t) + lobe
                    })
                    .sum()
            })
            .collect()
    }

    /// Write the table as comma-separated text
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<(), csv::Error> {
        let registry = MetricRegistry::builtin();
        let specs: Vec<&MetricSpec> = registry
            .specs()
            .iter()
            .filter(|s| !self.omitted.contains(&s.id))
            .collect();

        let mut groups = vec!["Frame".to_string()];
        let mut axes = vec![String::new()];
        let mut units = vec![String::new()];
        let mut columns: Vec<Vec<f64>> = vec![(0..self.samples).map(|i| i as f64).collect()];

        for spec in &specs {
            let signal = self.values(spec);
            let axis_set = match spec.kind {
                MetricKind::AngularVelocity => VELOCITY_AXES,
                MetricKind::Moment => MOMENT_AXES,
            };
            for (n, axis) in axis_set.iter().enumerate() {
                groups.push(if n == 0 {
                    spec.key(self.side).group
                } else {
                    String::new()
                });
                axes.push(axis.to_string());
                units.push(spec.unit.to_string());
                if *axis == spec.axis {
                    columns.push(signal.clone());
                } else {
                    columns.push(signal.iter().map(|v| v * 0.25).collect());
                }
            }
        }

        let mut out = csv::Writer::from_writer(writer);
        out.write_record(&groups)?;
        out.write_record(&axes)?;
        out.write_record(&units)?;
        for row in 0..self.samples {
            out.write_record(columns.iter().map(|c| format!("{:.6}", c[row])))?;
        }
        out.flush()?;
        Ok(())
    }

    /// Table as an in-memory CSV byte buffer
    pub fn to_csv_bytes(&self) -> Result<Vec<u8>, csv::Error> {
        let mut buf = Vec::new();
        self.write_csv(&mut buf)?;
        Ok(buf)
    }

    /// Write the table to `path`
    pub fn write_to_path<P: AsRef<Path>>(&self, path: P) -> Result<(), csv::Error> {
        let file = std::fs::File::create(path)?;
        self.write_csv(std::io::BufWriter::new(file))
    }
}

/// Three proximal-to-distal trials of 150, 160 and 140 samples, with file
/// names for `subject`
pub fn demo_batch(subject: &str, side: Side) -> Vec<(String, SyntheticTrial)> {
    DEMO_SAMPLE_COUNTS
        .iter()
        .enumerate()
        .map(|(i, &n)| {
            (
                format!("{}_{:02}.csv", subject, i + 1),
                SyntheticTrial::proximal_to_distal(n, side),
            )
        })
        .collect()
}
