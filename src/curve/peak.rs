//! Peak location and firing-order ranking.

use serde::Serialize;

use super::{normalized_time_axis, CurveError, NormalizedCurve};

/// Peak of one metric's curve on the normalized time axis
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeakRecord {
    /// Metric identifier (e.g. `pelvis_velocity`)
    pub metric: String,
    /// Signed curve value at the peak
    pub value: f64,
    /// Index of the peak point on the curve
    pub index: usize,
    /// Normalized time of the peak, in percent of motion
    pub normalized_time: f64,
}

/// Locate the maximum of `curve`, or the maximum absolute value when
/// `use_absolute` is set.
///
/// Plateaus resolve to the first (earliest) index holding the maximum. NaN
/// points never win.
pub fn find_peak(
    metric: impl Into<String>,
    curve: &NormalizedCurve,
    use_absolute: bool,
) -> Result<PeakRecord, CurveError> {
    if curve.is_empty() {
        return Err(CurveError::EmptyCurve);
    }

    let mut best: Option<(usize, f64)> = None;
    for (i, &v) in curve.values().iter().enumerate() {
        let key = if use_absolute { v.abs() } else { v };
        if key.is_nan() {
            continue;
        }
        match best {
            Some((_, top)) if key <= top => {}
            _ => best = Some((i, key)),
        }
    }

    let index = best.map(|(i, _)| i).unwrap_or(0);
    let axis = normalized_time_axis(curve.len());

    Ok(PeakRecord {
        metric: metric.into(),
        value: curve[index],
        index,
        normalized_time: axis[index],
    })
}

/// Sort peak records by ascending normalized time (earliest first).
///
/// Records peaking at the same time keep their input order.
pub fn rank_segments(records: &[PeakRecord]) -> Vec<PeakRecord> {
    let mut ranked = records.to_vec();
    ranked.sort_by(|a, b| a.normalized_time.total_cmp(&b.normalized_time));
    ranked
}

/// True when `ranked` fires in exactly the order given by `expected` metric ids.
///
/// Metrics absent from `expected` are ignored.
pub fn follows_sequence(ranked: &[PeakRecord], expected: &[&str]) -> bool {
    let observed: Vec<&str> = ranked
        .iter()
        .map(|r| r.metric.as_str())
        .filter(|m| expected.contains(m))
        .collect();
    observed == expected
}
