// src/main.rs
//
// Build a JSON index of the activities, orgs and sectors found at each location.
//
//     index-locations output/activities.json > output/location-index.json

use anyhow::{Context, Result};
use clap::Parser;
use location_index_lib::index::{load_activities, LocationIndex};
use location_index_lib::utils::constants::LOCATION_TYPES;
use location_index_lib::utils::env::load_env;
use location_index_lib::utils::progress_config::ProgressConfig;
use log::info;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// JSON array of processed activities
    activity_file: PathBuf,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    load_env();
    env_logger::init();
    info!("Starting location index build");

    let progress_config = ProgressConfig::from_env();
    let start = Instant::now();

    let activities = load_activities(&cli.activity_file)?;
    info!(
        "Loaded {} activities from {}",
        activities.len(),
        cli.activity_file.display()
    );

    let pb = progress_config.create_bar(activities.len() as u64, "Indexing activities");
    let mut index = LocationIndex::new();
    for activity in &activities {
        index.add_activity(activity);
        if let Some(pb) = &pb {
            pb.inc(1);
        }
    }
    if let Some(pb) = pb {
        pb.finish_and_clear();
    }

    for loctype in LOCATION_TYPES {
        let count = index.locations(loctype).map_or(0, |l| l.len());
        info!("{}: {} locations", loctype, count);
    }

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    index.write_pretty(&mut out)?;
    writeln!(out).context("Failed to write location index")?;
    out.flush().context("Failed to write location index")?;

    info!(
        "Indexed {} locations in {:.2?}",
        index.location_count(),
        start.elapsed()
    );
    Ok(())
}
