/// Precondition violations raised by the resampling, aggregation and peak stages.
///
/// These indicate mismatched pipeline wiring rather than bad input data.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CurveError {
    /// A series needs at least two samples to span the 0-100 domain
    #[error("insufficient samples: need at least 2 to form a domain, got {0}")]
    InsufficientSamples(usize),

    /// Target length must be at least one point
    #[error("invalid target length: {0}")]
    InvalidTargetLength(usize),

    /// Curves handed to the aggregator differ in length
    #[error("curve length mismatch: expected {expected} points, curve {index} has {actual}")]
    LengthMismatch {
        /// Length of the first curve
        expected: usize,
        /// Position of the offending curve in the input
        index: usize,
        /// Length of the offending curve
        actual: usize,
    },

    /// No curves were supplied to the aggregator
    #[error("cannot aggregate an empty curve set")]
    EmptyCurveSet,

    /// Fewer curves than the caller required
    #[error("too few curves: {required} required, {actual} supplied")]
    TooFewCurves {
        /// Minimum count requested by the caller
        required: usize,
        /// Number of curves supplied
        actual: usize,
    },

    /// Peak search over a curve with no points
    #[error("cannot locate a peak on an empty curve")]
    EmptyCurve,
}
