//! Point-wise aggregation of normalized curves across trials.

use serde::Serialize;

use super::{CurveError, NormalizedCurve};

/// Mean curve and population standard deviation envelope for one metric.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregatedMetric {
    mean: Vec<f64>,
    std: Vec<f64>,
    trial_count: usize,
}

impl AggregatedMetric {
    /// Mean value at every normalized time point
    pub fn mean(&self) -> &[f64] {
        &self.mean
    }

    /// Population standard deviation at every point.
    ///
    /// All zeros in single-trial mode; prefer [`AggregatedMetric::spread`] when
    /// deciding whether to draw an uncertainty band.
    pub fn std(&self) -> &[f64] {
        &self.std
    }

    /// Standard deviation envelope, `None` when only one trial was aggregated
    pub fn spread(&self) -> Option<&[f64]> {
        if self.is_single_trial() {
            None
        } else {
            Some(&self.std)
        }
    }

    /// Number of trials that contributed to the mean
    pub fn trial_count(&self) -> usize {
        self.trial_count
    }

    /// True when the mean is a single trial's curve
    pub fn is_single_trial(&self) -> bool {
        self.trial_count == 1
    }

    /// Number of points on the normalized axis
    pub fn len(&self) -> usize {
        self.mean.len()
    }

    /// True when the aggregate has no points
    pub fn is_empty(&self) -> bool {
        self.mean.is_empty()
    }

    /// Mean curve as a [`NormalizedCurve`], for peak analysis
    pub fn mean_curve(&self) -> NormalizedCurve {
        NormalizedCurve::from_values(self.mean.clone())
    }

    /// Lower and upper band edges (`mean - std`, `mean + std`)
    pub fn band(&self) -> Option<(Vec<f64>, Vec<f64>)> {
        let spread = self.spread()?;
        let lower = self.mean.iter().zip(spread).map(|(m, s)| m - s).collect();
        let upper = self.mean.iter().zip(spread).map(|(m, s)| m + s).collect();
        Some((lower, upper))
    }
}

/// Aggregate equal-length curves into a mean and population std per point.
///
/// `min_count` is the minimum number of curves the caller requires; it is
/// clamped to at least one. Each output point `i` is computed only from
/// `curves[k][i]` for every `k`.
pub fn aggregate(curves: &[NormalizedCurve], min_count: usize) -> Result<AggregatedMetric, CurveError> {
    let first = curves.first().ok_or(CurveError::EmptyCurveSet)?;
    let required = min_count.max(1);
    if curves.len() < required {
        return Err(CurveError::TooFewCurves {
            required,
            actual: curves.len(),
        });
    }

    let points = first.len();
    if let Some((index, curve)) = curves
        .iter()
        .enumerate()
        .find(|(_, c)| c.len() != points)
    {
        return Err(CurveError::LengthMismatch {
            expected: points,
            index,
            actual: curve.len(),
        });
    }

    if curves.len() == 1 {
        return Ok(AggregatedMetric {
            mean: first.values().to_vec(),
            std: vec![0.0; points],
            trial_count: 1,
        });
    }

    let n = curves.len() as f64;
    let mut mean = vec![0.0; points];
    for curve in curves {
        for (acc, v) in mean.iter_mut().zip(curve.values()) {
            *acc += v;
        }
    }
    for m in &mut mean {
        *m /= n;
    }

    let mut std = vec![0.0; points];
    for curve in curves {
        for ((acc, v), m) in std.iter_mut().zip(curve.values()).zip(&mean) {
            let d = v - m;
            *acc += d * d;
        }
    }
    for s in &mut std {
        *s = (*s / n).sqrt();
    }

    Ok(AggregatedMetric {
        mean,
        std,
        trial_count: curves.len(),
    })
}
