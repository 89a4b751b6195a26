//! End-to-end tests over the library pipeline: raw text blocks in,
//! aligned numeric pairs out.

use cellprep::extract::{self, DELIVERY_MARKER, NR_MEAS_MARKER};
use cellprep::pipeline::{process_batch, RawSession};
use cellprep::resample::{resample, RegularPair};
use cellprep::series::TimeSeries;
use cellprep::{Config, Session, Technology};

fn time(ms: i64) -> String {
    format!(
        "{:02}:{:02}:{:02}.{:03}",
        ms / 3_600_000,
        ms / 60_000 % 60,
        ms / 1000 % 60,
        ms % 1000
    )
}

fn signal_record(ms: i64, rsrp: f64) -> String {
    format!("{}  {NR_MEAS_MARKER}\n  SS-RSRP : {rsrp} dBm", time(ms))
}

fn delivery_record(ms: i64, total: i64) -> String {
    format!("{}  {DELIVERY_MARKER}\n  | 0 | 1432 | {total} |", time(ms))
}

#[test]
fn two_cadences_align_onto_one_grid() {
    // 50 signal readings every 20 ms starting at t=0, and 50 delivery
    // totals every 20 ms starting at t=5: no shared timestamps at all.
    let rsrp = TimeSeries::from_points((0..50).map(|i| (20 * i, -90.0 - (i % 7) as f64)));
    let bandwidth = TimeSeries::from_points((0..50).map(|i| (5 + 20 * i, 100.0 + i as f64)));

    let session = Session {
        technology: Technology::Sa,
        rsrp,
        bandwidth,
    };
    let pair = resample(session, 50).unwrap();

    // Overlap [5, 980], so the grid is 5, 55, ..., 955.
    assert_eq!(pair.bandwidth.len(), (980 - 5) / 50 + 1);
    assert_eq!(pair.rsrp.len(), pair.bandwidth.len());
}

#[test]
fn full_pipeline_from_raw_text() {
    let mut blob = String::new();
    for i in 0..12i64 {
        blob.push_str(&signal_record(1000 * i, -88.0 - (i % 5) as f64));
        blob.push_str("\n\n");
        blob.push_str(&delivery_record(1000 * i + 500, 250_000 + 40_000 * i));
        blob.push_str("\n\n");
        // Interleaved noise the classifier must ignore.
        blob.push_str(&format!("{}  RRC OTA Packet\n  msg: Reconfiguration", time(1000 * i + 700)));
        blob.push_str("\n\n");
    }

    let records = extract::split_records(&blob);
    assert_eq!(records.len(), 36);

    let (session, report) = extract::extract_session(Technology::Nsa, &records);
    assert_eq!(report.skipped(), 0);
    assert_eq!(session.rsrp.len(), 12);
    assert_eq!(session.bandwidth.len(), 12);

    let pair = resample(session, 50).unwrap();
    // Bandwidth deltas: cold-start zero at t=500 is filtered, so the
    // overlap is [1500, 11000].
    assert_eq!(pair.bandwidth.len(), (11_000 - 1500) / 50 + 1);
    assert_eq!(pair.rsrp.len(), pair.bandwidth.len());
    // Steady 40 kB per second, sampled anywhere on the grid.
    assert!(pair.bandwidth.iter().all(|&b| b == 40_000));
}

#[test]
fn batch_output_is_grouped_by_technology() {
    let config = Config {
        interval_ms: 500,
        min_points: 5,
    };

    let make = |technology, offset_ms: i64| {
        let mut records = Vec::new();
        for i in 0..8i64 {
            records.push(match technology {
                Technology::Lte => format!(
                    "{}  LTE ML1 Connected Mode Meas\n  Inst RSRP : {}",
                    time(offset_ms + 1000 * i),
                    -95.0 + i as f64
                ),
                _ => signal_record(offset_ms + 1000 * i, -91.5),
            });
            records.push(delivery_record(offset_ms + 1000 * i + 300, 80_000 + 25_000 * i));
        }
        RawSession {
            technology,
            records,
            label: format!("{technology}-trial"),
        }
    };

    let sessions = vec![
        make(Technology::Lte, 0),
        make(Technology::Sa, 3_600_000),
        make(Technology::Lte, 7_200_000),
    ];
    let (data, stats) = process_batch(&sessions, &config).unwrap();

    assert_eq!(data[&Technology::Lte].len(), 2);
    assert_eq!(data[&Technology::Sa].len(), 1);
    assert!(!data.contains_key(&Technology::Nsa));
    assert_eq!(stats.sessions_in, 3);
    assert_eq!(stats.sessions_out, 3);
}

#[test]
fn regular_pair_serializes_without_timestamps() {
    let pair = RegularPair {
        bandwidth: vec![40_000, 41_000],
        rsrp: vec![-91.5, -92.0],
    };
    let json = serde_json::to_value(&pair).unwrap();

    assert_eq!(
        json,
        serde_json::json!({
            "bandwidth": [40_000, 41_000],
            "rsrp": [-91.5, -92.0],
        })
    );
}
