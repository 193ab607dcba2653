use std::{
    fs::File,
    io::{self, Read, Write},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use garmr_fit::{Activity, compute_hr_zones, decode_activity};
use serde::{Deserialize, Serialize};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Decode Garmin FIT activity files.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Decode activity files, printing one JSON object per file.
    Decode {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// Recompute heart-rate zones from a stored `offset_s,heart_rate` series.
    Zones {
        /// Maximum heart rate in beats per minute.
        #[arg(long, env = "GARMR_MAX_HR")]
        max_hr: u8,
        /// CSV file to read instead of standard input.
        csv: Option<PathBuf>,
    },
}

#[derive(Serialize)]
struct Decoded<'a> {
    path: &'a Path,
    activity: Option<Activity>,
}

#[derive(Deserialize)]
struct Sample {
    offset_s: i64,
    heart_rate: Option<u8>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("garmr_fit=info")),
        )
        .with_writer(io::stderr)
        .init();

    match Cli::parse().command {
        Command::Decode { files } => decode(&files),
        Command::Zones { max_hr, csv } => zones(max_hr, csv),
    }
}

fn decode(files: &[PathBuf]) -> Result<()> {
    let mut stdout = io::stdout().lock();

    for path in files {
        let activity =
            decode_activity(path).with_context(|| format!("decoding {}", path.display()))?;

        if activity.is_none() {
            info!(path = %path.display(), "no session in document");
        }

        serde_json::to_writer(&mut stdout, &Decoded { path, activity })?;
        writeln!(stdout)?;
    }

    Ok(())
}

fn zones(max_hr: u8, path: Option<PathBuf>) -> Result<()> {
    let input: Box<dyn Read> = match &path {
        Some(path) => {
            Box::new(File::open(path).with_context(|| format!("opening {}", path.display()))?)
        }
        None => Box::new(io::stdin().lock()),
    };

    let samples = csv::Reader::from_reader(input)
        .deserialize::<Sample>()
        .map(|row| row.map(|Sample { offset_s, heart_rate }| (offset_s, heart_rate)))
        .collect::<Result<Vec<_>, csv::Error>>()
        .context("reading heart-rate series")?;

    let zones = compute_hr_zones(samples, max_hr);

    let mut stdout = io::stdout().lock();
    serde_json::to_writer(&mut stdout, &zones)?;
    writeln!(stdout)?;

    Ok(())
}
