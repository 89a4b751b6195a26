//! Cellular field-trial log preprocessing.
//!
//! Field trials record one diagnostic dump per trial session. Each dump is a
//! sequence of loosely structured text records carrying, among much else,
//! signal-strength measurements and a cumulative delivered-byte counter.
//! This crate turns those dumps into pairs of time-aligned, regularly-sampled
//! numeric series ready for statistical modeling.
//!
//! # Pipeline
//!
//! ```text
//! raw log text
//!   -> extract    classify records, recover timestamps and metric values,
//!                 difference the byte counter into per-record deltas
//!   -> series     two irregular time series per session (rsrp, bandwidth)
//!   -> resample   drop invalid bandwidth readings, restrict to the
//!                 overlapping window, sample both series on one regular grid
//!   -> pipeline   batch the above over independent sessions, collect
//!                 per-technology results and a summary of what was skipped
//! ```
//!
//! Sessions never share state, so the batch stage processes them in parallel.
//! Per-record extraction failures degrade to a skipped datapoint and a
//! warning; per-session failures (no overlapping window, too few points) drop
//! the session and leave the rest of the batch alone.

pub mod config;
pub mod extract;
pub mod pipeline;
pub mod resample;
pub mod series;
pub mod session;

pub use config::Config;
pub use session::{Session, Technology};
