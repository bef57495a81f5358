//! # Curve Module
//!
//! Time normalization and cross-trial statistics for biomechanical curves.
//!
//! ## Stages
//!
//! 1. **Resampling**: a trial's series of any length is linearly interpolated
//!    onto 101 evenly spaced points over 0-100 % of the motion.
//!
//! 2. **Aggregation**: equal-length curves from several trials are combined
//!    point by point into a mean and a population standard deviation.
//!
//! 3. **Peak analysis**: the peak of each aggregated curve is located (first
//!    occurrence wins on plateaus), and segment peaks are ranked by time to
//!    expose the kinetic-chain firing order.
//!
//! Every function here is pure and deterministic.

mod aggregate;
mod error;
mod peak;
mod resample;

pub use aggregate::{aggregate, AggregatedMetric};
pub use error::CurveError;
pub use peak::{find_peak, follows_sequence, rank_segments, PeakRecord};
pub use resample::{normalized_time_axis, resample, NormalizedCurve, DOMAIN_END, NORMALIZED_POINTS};
