//! Cumulative-counter differencing.

/// Turns the monotonically increasing delivered-byte counter into
/// per-record deltas.
///
/// The first observation establishes the baseline and yields a delta of
/// zero; every later observation yields `current - last` and moves the
/// baseline forward. If the device restarts mid-session the counter can go
/// backwards; the raw negative delta is emitted as-is and removed later by
/// the bandwidth validity filter.
///
/// One instance tracks exactly one session. Sharing an instance across
/// sessions leaks the previous session's baseline into the next one.
#[derive(Debug, Clone, Default)]
pub struct CounterDifferencer {
    last: Option<i64>,
}

impl CounterDifferencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a counter observation, returning the delta since the previous
    /// one.
    pub fn observe(&mut self, value: i64) -> i64 {
        match self.last.replace(value) {
            None => 0,
            Some(previous) => value - previous,
        }
    }
}
