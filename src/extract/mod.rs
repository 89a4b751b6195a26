//! Record classification and per-session series extraction.
//!
//! A diagnostic dump is a sequence of text blocks separated by blank lines.
//! Every block carries a `HH:MM:SS.mmm` timestamp in its header line;
//! classification is by marker substring, and a block that matches no marker
//! is irrelevant and silently ignored.
//!
//! Signal-strength and throughput extraction run independently on every
//! record: a block can fail one and still contribute to the other. A failed
//! extraction never aborts the session; it degrades to a skipped datapoint
//! and a warning carrying the record index.

mod counter;
mod metric;
mod timestamp;

pub use counter::CounterDifferencer;
pub use metric::{
    delivered_bytes_candidates, lte_rsrp_candidates, nr_rsrp_candidates, strongest,
};
pub use timestamp::timestamp_ms;

use thiserror::Error;
use tracing::warn;

use crate::session::{Session, Technology};

/// Marker for 5G-style signal-strength records (SA and NSA sessions).
pub const NR_MEAS_MARKER: &str = "NR5G ML1 Searcher Measurement";

/// Marker for 4G-style signal-strength records (LTE sessions).
pub const LTE_MEAS_MARKER: &str = "LTE ML1 Connected Mode Meas";

/// Marker for delivery-status (throughput) records, any technology.
pub const DELIVERY_MARKER: &str = "MAC DLSCH Delivery Status";

/// Per-record extraction failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractError {
    /// The record carries no parseable `HH:MM:SS.mmm` timestamp.
    #[error("no HH:MM:SS.mmm timestamp in record")]
    MalformedTimestamp,

    /// The record matched a marker but its value rule found no candidates.
    #[error("record matched {kind} marker but yielded no value")]
    NoMetricMatch { kind: &'static str },
}

/// Which of the session's two series a datapoint belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesKind {
    Rsrp,
    Bandwidth,
}

impl SeriesKind {
    pub fn name(&self) -> &'static str {
        match self {
            SeriesKind::Rsrp => "rsrp",
            SeriesKind::Bandwidth => "bandwidth",
        }
    }
}

/// A skipped datapoint: the record at `record_index` matched a marker but
/// its extraction failed. The session continued without it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractWarning {
    pub record_index: usize,
    pub series: SeriesKind,
    pub error: ExtractError,
}

/// What happened while extracting one session.
#[derive(Debug, Clone, Default)]
pub struct ExtractionReport {
    pub warnings: Vec<ExtractWarning>,
}

impl ExtractionReport {
    pub fn skipped(&self) -> usize {
        self.warnings.len()
    }

    fn skip(&mut self, record_index: usize, series: SeriesKind, error: ExtractError) {
        warn!(record_index, series = series.name(), %error, "skipping datapoint");
        self.warnings.push(ExtractWarning {
            record_index,
            series,
            error,
        });
    }
}

/// Split a raw dump into record blocks at blank-line boundaries.
///
/// Lines are joined back with `\n`, so `\r\n` dumps come out normalized.
pub fn split_records(raw: &str) -> Vec<String> {
    let mut records = Vec::new();
    let mut current = String::new();
    for line in raw.lines() {
        if line.trim().is_empty() {
            if !current.is_empty() {
                records.push(std::mem::take(&mut current));
            }
        } else {
            if !current.is_empty() {
                current.push('\n');
            }
            current.push_str(line);
        }
    }
    if !current.is_empty() {
        records.push(current);
    }
    records
}

/// Does `record` carry a signal-strength measurement for this technology?
///
/// LTE sessions read 4G-style measurement records; SA and NSA sessions read
/// 5G-style records. Records of the other family are irrelevant noise for
/// the session at hand.
pub fn is_signal_record(technology: Technology, record: &str) -> bool {
    match technology {
        Technology::Lte => record.contains(LTE_MEAS_MARKER),
        Technology::Sa | Technology::Nsa => record.contains(NR_MEAS_MARKER),
    }
}

/// Does `record` carry a delivery-status table?
pub fn is_delivery_record(record: &str) -> bool {
    record.contains(DELIVERY_MARKER)
}

fn signal_point(technology: Technology, record: &str) -> Result<(i64, f64), ExtractError> {
    let timestamp = timestamp::timestamp_ms(record)?;
    let candidates = match technology {
        Technology::Lte => metric::lte_rsrp_candidates(record),
        Technology::Sa | Technology::Nsa => metric::nr_rsrp_candidates(record),
    };
    let value = metric::strongest(&candidates).ok_or(ExtractError::NoMetricMatch {
        kind: "signal-strength",
    })?;
    Ok((timestamp, value))
}

fn delivery_total(record: &str) -> Result<(i64, i64), ExtractError> {
    let timestamp = timestamp::timestamp_ms(record)?;
    let candidates = metric::delivered_bytes_candidates(record);
    let total = metric::strongest(&candidates).ok_or(ExtractError::NoMetricMatch {
        kind: "delivery",
    })?;
    Ok((timestamp, total))
}

/// Build the two irregular series for one session.
///
/// Records are visited in source order, which is chronological. The counter
/// baseline lives inside this call, so concurrent sessions cannot leak
/// baselines into each other.
pub fn extract_session<S: AsRef<str>>(
    technology: Technology,
    records: &[S],
) -> (Session, ExtractionReport) {
    let mut session = Session::new(technology);
    let mut report = ExtractionReport::default();
    let mut counter = CounterDifferencer::new();

    for (index, record) in records.iter().enumerate() {
        let record = record.as_ref();

        if is_signal_record(technology, record) {
            match signal_point(technology, record) {
                Ok((timestamp, value)) => {
                    session.rsrp.insert(timestamp, value);
                }
                Err(error) => report.skip(index, SeriesKind::Rsrp, error),
            }
        }

        if is_delivery_record(record) {
            match delivery_total(record) {
                Ok((timestamp, total)) => {
                    let delta = counter.observe(total);
                    session.bandwidth.insert(timestamp, delta as f64);
                }
                Err(error) => report.skip(index, SeriesKind::Bandwidth, error),
            }
        }
    }

    (session, report)
}
