//! Session types shared between the extraction and resampling stages.

use serde::{Deserialize, Serialize};

use crate::series::TimeSeries;

/// Network technology a trial session was recorded on.
///
/// Selects which signal-strength extraction rule applies: LTE sessions carry
/// 4G-style measurement records, SA and NSA sessions carry 5G-style records.
/// Throughput extraction is the same for all three.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    clap::ValueEnum,
)]
pub enum Technology {
    #[serde(rename = "LTE")]
    #[value(name = "LTE")]
    Lte,
    #[serde(rename = "SA")]
    #[value(name = "SA")]
    Sa,
    #[serde(rename = "NSA")]
    #[value(name = "NSA")]
    Nsa,
}

impl Technology {
    /// Uppercase tag used in file paths and output keys.
    pub fn as_str(&self) -> &'static str {
        match self {
            Technology::Lte => "LTE",
            Technology::Sa => "SA",
            Technology::Nsa => "NSA",
        }
    }
}

impl std::fmt::Display for Technology {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One trial session: the unit of independent processing.
///
/// Holds the two irregular series recovered from a single dump. The series
/// usually have different lengths and cadences; aligning them is the
/// resampler's job.
#[derive(Debug, Clone)]
pub struct Session {
    pub technology: Technology,
    /// Signal-strength readings in dBm, irregular cadence.
    pub rsrp: TimeSeries,
    /// Delivered-byte deltas per delivery record, irregular cadence.
    pub bandwidth: TimeSeries,
}

impl Session {
    /// Empty session for the given technology.
    pub fn new(technology: Technology) -> Self {
        Self {
            technology,
            rsrp: TimeSeries::new(),
            bandwidth: TimeSeries::new(),
        }
    }
}
