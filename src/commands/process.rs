//! Process subcommand: trial log files in, aligned JSON series out.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Args;

use cellprep::extract::split_records;
use cellprep::pipeline::{self, RawSession};
use cellprep::{Config, Technology};

#[derive(Debug, Args)]
pub struct ProcessArgs {
    /// Log files to process, one trial session per file
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Technology of all listed files (inferred from path components when omitted)
    #[arg(long, value_enum, ignore_case = true)]
    pub tech: Option<Technology>,

    /// Sampling interval in milliseconds
    #[arg(long)]
    pub interval: Option<i64>,

    /// Minimum raw points per series for a session to be kept
    #[arg(long)]
    pub min_points: Option<usize>,

    /// TOML config file with defaults for the flags above
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Write the processed JSON here instead of stdout
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pub pretty: bool,
}

#[cfg(not(tarpaulin_include))]
pub fn handle(args: ProcessArgs) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    if let Some(interval) = args.interval {
        config.interval_ms = interval;
    }
    if let Some(min_points) = args.min_points {
        config.min_points = min_points;
    }
    if config.interval_ms <= 0 {
        bail!("Sampling interval must be positive (got {})", config.interval_ms);
    }

    let mut sessions = Vec::with_capacity(args.files.len());
    for path in &args.files {
        sessions.push(load_session(path, args.tech)?);
    }

    let (data, stats) = pipeline::process_batch(&sessions, &config)?;

    let json = if args.pretty {
        serde_json::to_string_pretty(&data)?
    } else {
        serde_json::to_string(&data)?
    };
    match &args.output {
        Some(path) => fs::write(path, json)
            .with_context(|| format!("Failed to write output file: {}", path.display()))?,
        None => println!("{}", json),
    }

    eprintln!("{}", stats);
    Ok(())
}

fn load_session(path: &Path, tech: Option<Technology>) -> Result<RawSession> {
    let technology = match tech {
        Some(technology) => technology,
        None => technology_from_path(path).with_context(|| {
            format!(
                "Cannot infer technology from path {}; pass --tech",
                path.display()
            )
        })?,
    };
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read log file: {}", path.display()))?;
    Ok(RawSession {
        technology,
        records: split_records(&raw),
        label: path.display().to_string(),
    })
}

/// Trial dumps are organized in per-technology directories
/// (`LTE/run3.txt`, `logs/NSA/drive-test.txt`). Look for a matching token
/// in the path, nearest to the file name first.
fn technology_from_path(path: &Path) -> Option<Technology> {
    path.components().rev().find_map(|component| {
        let component = component.as_os_str().to_str()?;
        component
            .split(|c: char| !c.is_ascii_alphanumeric())
            .find_map(|token| match token.to_ascii_uppercase().as_str() {
                "LTE" => Some(Technology::Lte),
                "SA" => Some(Technology::Sa),
                "NSA" => Some(Technology::Nsa),
                _ => None,
            })
    })
}
