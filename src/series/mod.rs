//! Ordered, timestamp-keyed series with regular-grid sampling.
//!
//! A [`TimeSeries`] holds the irregular points recovered from one session's
//! records. It supports the three operations the resampler needs: dropping
//! physically invalid readings, querying the observed span, and sampling a
//! regular grid of synthetic points via linear interpolation.

use std::collections::BTreeMap;

use thiserror::Error;

/// Errors from regular-grid sampling.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SampleError {
    /// The requested timestamp lies before the first or after the last point.
    #[error("timestamp {timestamp} ms outside the series span [{first}, {last}] ms")]
    OutOfRange {
        timestamp: i64,
        first: i64,
        last: i64,
    },

    /// The series has no points left to sample from.
    #[error("cannot sample an empty series")]
    Empty,

    #[error("sampling interval must be positive (got {0} ms)")]
    NonPositiveInterval(i64),
}

/// An irregular time series keyed by milliseconds since midnight.
///
/// Points stay sorted by timestamp regardless of insertion order. Inserting
/// a point at a timestamp that is already present overwrites the earlier
/// value: when two records resolve to the same millisecond, the later record
/// wins.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TimeSeries {
    points: BTreeMap<i64, f64>,
}

impl TimeSeries {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_points(points: impl IntoIterator<Item = (i64, f64)>) -> Self {
        Self {
            points: points.into_iter().collect(),
        }
    }

    /// Insert a point, returning the value it displaced if the timestamp was
    /// already present.
    pub fn insert(&mut self, timestamp: i64, value: f64) -> Option<f64> {
        self.points.insert(timestamp, value)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Timestamp of the earliest point.
    pub fn first_key(&self) -> Option<i64> {
        self.points.keys().next().copied()
    }

    /// Timestamp of the latest point.
    pub fn last_key(&self) -> Option<i64> {
        self.points.keys().next_back().copied()
    }

    /// Points in timestamp order.
    pub fn iter(&self) -> impl Iterator<Item = (i64, f64)> + '_ {
        self.points.iter().map(|(&t, &v)| (t, v))
    }

    /// Drop every point whose value is zero or negative.
    ///
    /// A non-positive throughput reading is not a valid instantaneous rate,
    /// so the point is removed outright rather than clamped.
    pub fn retain_positive(&mut self) {
        self.points.retain(|_, value| *value > 0.0);
    }

    /// Value at `timestamp`, linearly interpolated between the two bracketing
    /// points. A timestamp that coincides with an existing point returns that
    /// point's value unchanged.
    pub fn interpolate(&self, timestamp: i64) -> Result<f64, SampleError> {
        let (first, last) = match (self.first_key(), self.last_key()) {
            (Some(first), Some(last)) => (first, last),
            _ => return Err(SampleError::Empty),
        };
        if timestamp < first || timestamp > last {
            return Err(SampleError::OutOfRange {
                timestamp,
                first,
                last,
            });
        }

        let (&t0, &v0) = match self.points.range(..=timestamp).next_back() {
            Some(point) => point,
            None => {
                return Err(SampleError::OutOfRange {
                    timestamp,
                    first,
                    last,
                })
            }
        };
        if t0 == timestamp {
            return Ok(v0);
        }
        let (&t1, &v1) = match self.points.range(timestamp..).next() {
            Some(point) => point,
            None => {
                return Err(SampleError::OutOfRange {
                    timestamp,
                    first,
                    last,
                })
            }
        };

        let fraction = (timestamp - t0) as f64 / (t1 - t0) as f64;
        Ok(v0 + (v1 - v0) * fraction)
    }

    /// Sample the series at `start, start+interval, ...` up to and including
    /// `end`, producing one interpolated point per grid timestamp.
    ///
    /// The caller is responsible for choosing `[start, end]` inside the
    /// series span; a grid point outside it fails with
    /// [`SampleError::OutOfRange`].
    pub fn sample(
        &self,
        interval: i64,
        start: i64,
        end: i64,
    ) -> Result<Vec<(i64, f64)>, SampleError> {
        if interval <= 0 {
            return Err(SampleError::NonPositiveInterval(interval));
        }

        let capacity = if end >= start {
            ((end - start) / interval + 1) as usize
        } else {
            0
        };
        let mut sampled = Vec::with_capacity(capacity);
        let mut timestamp = start;
        while timestamp <= end {
            sampled.push((timestamp, self.interpolate(timestamp)?));
            timestamp += interval;
        }
        Ok(sampled)
    }
}

impl FromIterator<(i64, f64)> for TimeSeries {
    fn from_iter<I: IntoIterator<Item = (i64, f64)>>(iter: I) -> Self {
        Self::from_points(iter)
    }
}
