//! Metric candidate scanning rules.
//!
//! Each rule is a pure function from record text to the list of raw numeric
//! candidates it contains. Picking the representative value out of the
//! candidates is a separate, named policy ([`strongest`]) so the
//! max-of-all-matches choice stays visible at every call site.

use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

/// `SS-RSRP : -85.5` labelled fields in 5G measurement records. One record
/// may report several beam/branch readings.
static SS_RSRP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"SS-RSRP\s*:\s*(-?\d+(?:\.\d+)?)").unwrap());

/// `Inst RSRP : -92.3` labelled fields in LTE measurement records.
static INST_RSRP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Inst\s+RSRP\s*:\s*(-?\d+(?:\.\d+)?)").unwrap());

/// `| idx | size | total |` rows of the delivery-status table. The third
/// column is the cumulative delivered-byte count.
static DELIVERY_ROW: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\|\s*\d+\s*\|\s*\d+\s*\|\s*(\d+)\s*\|").unwrap());

fn captures<T: FromStr>(pattern: &Regex, record: &str) -> Vec<T> {
    pattern
        .captures_iter(record)
        .filter_map(|captured| captured.get(1))
        .filter_map(|group| group.as_str().parse().ok())
        .collect()
}

/// All 5G-style signal-strength readings in `record`, in dBm.
pub fn nr_rsrp_candidates(record: &str) -> Vec<f64> {
    captures(&SS_RSRP, record)
}

/// All 4G-style signal-strength readings in `record`, in dBm.
pub fn lte_rsrp_candidates(record: &str) -> Vec<f64> {
    captures(&INST_RSRP, record)
}

/// All cumulative delivered-byte counts in `record`'s delivery table.
pub fn delivered_bytes_candidates(record: &str) -> Vec<i64> {
    captures(&DELIVERY_ROW, record)
}

/// Representative-reading policy: the maximum over all candidates.
///
/// For signal strength, a record's branches report the same cell and the
/// strongest reading (highest RSRP, even though typically negative) stands
/// for the record. For delivered bytes, table rows describe the same
/// delivery event and the largest accumulated count is authoritative.
pub fn strongest<T: PartialOrd + Copy>(candidates: &[T]) -> Option<T> {
    candidates.iter().copied().fold(None, |best, value| match best {
        Some(current) if current >= value => Some(current),
        _ => Some(value),
    })
}
