//! Irregular-to-regular alignment of a session's two series.
//!
//! The two series come off the extractor with different lengths and
//! cadences and no guarantee of a shared timestamp. Alignment restricts
//! both to the window where they overlap and samples them on one regular
//! grid, after which index `i` of both outputs refers to the same instant
//! and the timestamps themselves can be dropped.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::series::{SampleError, TimeSeries};
use crate::session::Session;

/// Default sampling interval in milliseconds.
pub const DEFAULT_INTERVAL_MS: i64 = 50;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResampleError {
    /// The two series share no time window; the session carries no usable
    /// data and is dropped.
    #[error("bandwidth and signal-strength series never overlap in time")]
    EmptyOverlap,

    /// Same window, same interval, different lengths. A defect in the
    /// sampler, never bad input; aborts the batch instead of truncating.
    #[error("sampled lengths diverged: {bandwidth} bandwidth vs {rsrp} rsrp points")]
    LengthMismatch { bandwidth: usize, rsrp: usize },

    /// Sampling failed inside the overlap window. The window bounds the
    /// grid, so this cannot be triggered by input data either.
    #[error("sampling failed inside the overlap window: {0}")]
    Sample(#[from] SampleError),
}

/// Aligned, regularly-sampled output of one session.
///
/// Index `i` of both sequences refers to the same synthetic timestamp.
/// Bandwidth stays integral (bytes per record interval); signal strength
/// stays fractional dBm.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegularPair {
    pub bandwidth: Vec<i64>,
    pub rsrp: Vec<f64>,
}

impl RegularPair {
    /// Number of grid points (both sequences always agree).
    pub fn len(&self) -> usize {
        self.bandwidth.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bandwidth.is_empty()
    }
}

/// The window where both series have coverage: `[max(first keys),
/// min(last keys)]`. `None` when either series is empty or the spans are
/// disjoint.
pub fn overlap_window(a: &TimeSeries, b: &TimeSeries) -> Option<(i64, i64)> {
    let start = a.first_key()?.max(b.first_key()?);
    let end = a.last_key()?.min(b.last_key()?);
    (start <= end).then_some((start, end))
}

/// Align a session's two irregular series onto a shared regular grid.
///
/// Non-positive bandwidth deltas (cold-start zeros, idle intervals, counter
/// resets) are discarded first. The rsrp series is left untouched: negative
/// dBm is a valid reading, not an error value. Both series are then sampled
/// over the overlapping window at `interval_ms`.
pub fn resample(session: Session, interval_ms: i64) -> Result<RegularPair, ResampleError> {
    let Session {
        rsrp,
        mut bandwidth,
        ..
    } = session;
    bandwidth.retain_positive();

    let (start, end) =
        overlap_window(&bandwidth, &rsrp).ok_or(ResampleError::EmptyOverlap)?;

    let bandwidth_points = bandwidth.sample(interval_ms, start, end)?;
    let rsrp_points = rsrp.sample(interval_ms, start, end)?;
    if bandwidth_points.len() != rsrp_points.len() {
        return Err(ResampleError::LengthMismatch {
            bandwidth: bandwidth_points.len(),
            rsrp: rsrp_points.len(),
        });
    }

    Ok(RegularPair {
        bandwidth: bandwidth_points
            .into_iter()
            .map(|(_, value)| value as i64)
            .collect(),
        rsrp: rsrp_points.into_iter().map(|(_, value)| value).collect(),
    })
}
