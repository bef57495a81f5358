//! Time normalization onto the shared percent-of-motion axis.

use std::ops::Index;

use super::CurveError;

/// Number of points on the normalized 0-100 axis
pub const NORMALIZED_POINTS: usize = 101;

/// Upper bound of the normalized time domain, in percent of motion
pub const DOMAIN_END: f64 = 100.0;

/// Evenly spaced points spanning `[0, 100]`, endpoints included.
///
/// The last point is pinned to exactly `100.0` so that resampling never
/// reaches past the end of the source domain.
pub fn normalized_time_axis(len: usize) -> Vec<f64> {
    match len {
        0 => Vec::new(),
        1 => vec![0.0],
        _ => {
            let step = DOMAIN_END / (len - 1) as f64;
            let mut axis: Vec<f64> = (0..len).map(|i| i as f64 * step).collect();
            axis[len - 1] = DOMAIN_END;
            axis
        }
    }
}

/// Resample `series` onto `target_len` evenly spaced points over `[0, 100]`.
///
/// Both the source and the target span the same closed interval, so every
/// target point is bracketed by two source points and no extrapolation happens.
/// A target point that lands exactly on a source point reproduces that source
/// value bit for bit.
pub fn resample(series: &[f64], target_len: usize) -> Result<Vec<f64>, CurveError> {
    if series.len() < 2 {
        return Err(CurveError::InsufficientSamples(series.len()));
    }
    if target_len == 0 {
        return Err(CurveError::InvalidTargetLength(target_len));
    }

    let source_axis = normalized_time_axis(series.len());
    let last = series.len() - 1;

    let resampled = normalized_time_axis(target_len)
        .into_iter()
        .map(|x| {
            debug_assert!((0.0..=DOMAIN_END).contains(&x));
            // Largest j with source_axis[j] <= x
            let j = source_axis.partition_point(|&s| s <= x).saturating_sub(1);
            if j >= last || source_axis[j] == x {
                series[j.min(last)]
            } else {
                let slope = (series[j + 1] - series[j]) / (source_axis[j + 1] - source_axis[j]);
                slope * (x - source_axis[j]) + series[j]
            }
        })
        .collect();

    Ok(resampled)
}

/// One signal resampled onto the normalized time axis.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedCurve {
    values: Vec<f64>,
}

impl NormalizedCurve {
    /// Resample a raw series onto the default 101-point axis
    pub fn from_series(series: &[f64]) -> Result<Self, CurveError> {
        Self::with_points(series, NORMALIZED_POINTS)
    }

    /// Resample a raw series onto a custom number of points
    pub fn with_points(series: &[f64], points: usize) -> Result<Self, CurveError> {
        Ok(Self {
            values: resample(series, points)?,
        })
    }

    /// Wrap values that already live on a normalized axis
    pub fn from_values(values: Vec<f64>) -> Self {
        Self { values }
    }

    /// Curve values, one per normalized time point
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Number of points on the curve
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True when the curve has no points
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Normalized time (percent) of every point
    pub fn time_axis(&self) -> Vec<f64> {
        normalized_time_axis(self.values.len())
    }

    /// Consume the curve and return its values
    pub fn into_values(self) -> Vec<f64> {
        self.values
    }
}

impl Index<usize> for NormalizedCurve {
    type Output = f64;

    fn index(&self, index: usize) -> &f64 {
        &self.values[index]
    }
}

impl AsRef<[f64]> for NormalizedCurve {
    fn as_ref(&self) -> &[f64] {
        &self.values
    }
}
