//! Batch processing across independent sessions.
//!
//! Sessions share no state (each owns its series and counter baseline), so
//! the batch fans out across a rayon pool with no locking. Per-session
//! failures drop that session and leave the rest of the batch alone; the
//! only error that aborts a batch is a sampled-length divergence, which
//! means the sampler itself is broken.

use std::collections::BTreeMap;
use std::fmt;

use rayon::prelude::*;
use tracing::{debug, warn};

use crate::config::Config;
use crate::extract;
use crate::resample::{self, RegularPair, ResampleError};
use crate::session::{Session, Technology};

/// Input boundary: one session's raw records plus its technology tag.
///
/// Records must be in chronological order, the order they appear in the
/// dump. The label only feeds log output (usually the source file name).
#[derive(Debug, Clone)]
pub struct RawSession {
    pub technology: Technology,
    pub records: Vec<String>,
    pub label: String,
}

/// Aligned pairs grouped by technology, ready for the modeling stage.
pub type ProcessedData = BTreeMap<Technology, Vec<RegularPair>>;

/// What a batch run did, reported once at the end.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchStats {
    pub sessions_in: usize,
    pub sessions_out: usize,
    pub dropped_short: usize,
    pub dropped_no_overlap: usize,
    /// Individual datapoints skipped inside surviving and dropped sessions.
    pub records_skipped: usize,
}

impl fmt::Display for BatchStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "kept {} of {} sessions ({} too short, {} without overlap), skipped {} records",
            self.sessions_out,
            self.sessions_in,
            self.dropped_short,
            self.dropped_no_overlap,
            self.records_skipped
        )
    }
}

enum SessionOutcome {
    Pair(Technology, RegularPair),
    TooShort,
    NoOverlap,
}

/// Both raw series must clear the minimum length before resampling is worth
/// doing; short trials are statistically meaningless.
pub fn is_long_enough(session: &Session, min_points: usize) -> bool {
    session.rsrp.len() >= min_points && session.bandwidth.len() >= min_points
}

fn process_session(
    raw: &RawSession,
    config: &Config,
) -> (usize, Result<SessionOutcome, ResampleError>) {
    let (session, report) = extract::extract_session(raw.technology, &raw.records);
    let skipped = report.skipped();

    if !is_long_enough(&session, config.min_points) {
        warn!(
            session = %raw.label,
            rsrp = session.rsrp.len(),
            bandwidth = session.bandwidth.len(),
            "dropping session: too few raw points"
        );
        return (skipped, Ok(SessionOutcome::TooShort));
    }

    let technology = session.technology;
    match resample::resample(session, config.interval_ms) {
        Ok(pair) => {
            debug!(session = %raw.label, points = pair.len(), "session resampled");
            (skipped, Ok(SessionOutcome::Pair(technology, pair)))
        }
        Err(ResampleError::EmptyOverlap) => {
            warn!(session = %raw.label, "dropping session: series never overlap");
            (skipped, Ok(SessionOutcome::NoOverlap))
        }
        Err(error) => (skipped, Err(error)),
    }
}

/// Run every session through extract -> filter -> resample, in parallel.
///
/// Output order within each technology follows input order.
pub fn process_batch(
    sessions: &[RawSession],
    config: &Config,
) -> Result<(ProcessedData, BatchStats), ResampleError> {
    let outcomes: Vec<(usize, Result<SessionOutcome, ResampleError>)> = sessions
        .par_iter()
        .map(|raw| process_session(raw, config))
        .collect();

    let mut data = ProcessedData::new();
    let mut stats = BatchStats {
        sessions_in: sessions.len(),
        ..BatchStats::default()
    };
    for (skipped, outcome) in outcomes {
        stats.records_skipped += skipped;
        match outcome? {
            SessionOutcome::Pair(technology, pair) => {
                stats.sessions_out += 1;
                data.entry(technology).or_default().push(pair);
            }
            SessionOutcome::TooShort => stats.dropped_short += 1,
            SessionOutcome::NoOverlap => stats.dropped_no_overlap += 1,
        }
    }
    Ok((data, stats))
}
