// src/bin/resolve_names.rs
//
// Resolve every distinct location and organization string in an activity file
// against the reference maps and print what each one resolved to. Organizations
// that are not in the map are reported on stderr as "Failed lookup |token|".

use anyhow::{Context, Result};
use clap::Parser;
use indexmap::IndexMap;
use location_index_lib::index::load_activities;
use location_index_lib::reference::{LocationEntry, OrgEntry, ReferenceContext};
use location_index_lib::utils::config::ReferenceConfig;
use location_index_lib::utils::constants::{LocationLevel, ROLES};
use location_index_lib::utils::env::load_env;
use location_index_lib::utils::text::{add_unique, flatten, title_case_location};
use log::info;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::Serializer;
use std::io::{self, Write};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// JSON array of processed activities
    activity_file: PathBuf,
}

/// A resolved location with a title-cased name for display.
#[derive(Serialize)]
struct ResolvedLocation {
    display: String,
    #[serde(flatten)]
    entry: LocationEntry,
}

impl From<LocationEntry> for ResolvedLocation {
    fn from(entry: LocationEntry) -> Self {
        Self {
            display: title_case_location(entry.name.as_deref()),
            entry,
        }
    }
}

#[derive(Serialize, Default)]
struct ResolutionReport {
    locations: IndexMap<String, IndexMap<String, ResolvedLocation>>,
    orgs: IndexMap<String, OrgEntry>,
    unresolved_orgs: usize,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    load_env();
    env_logger::init();

    let config = ReferenceConfig::from_env();
    config.log_config();
    let context = ReferenceContext::new(config);

    let activities = load_activities(&cli.activity_file)?;
    info!("Resolving names for {} activities", activities.len());

    let mut report = ResolutionReport::default();

    let locations = context.location_resolver();
    for level in LocationLevel::ALL {
        let mut seen = Vec::new();
        for activity in &activities {
            for name in flatten(&activity.locations, &[level.as_str()], &[]) {
                add_unique(&mut seen, name.trim());
            }
        }

        let resolved = report.locations.entry(level.to_string()).or_default();
        for name in &seen {
            if let Some(entry) = locations.resolve_as(Some(name.as_str()), level)? {
                resolved.insert(name.clone(), ResolvedLocation::from((*entry).clone()));
            }
        }
        info!("{}: {} distinct names", level, resolved.len());
    }

    let orgs = context.org_resolver();
    let mut seen = Vec::new();
    for activity in &activities {
        for name in flatten(&activity.orgs, &ROLES, &[]) {
            add_unique(&mut seen, name.trim());
        }
    }
    for name in &seen {
        if let Some(entry) = orgs.resolve(Some(name.as_str()))? {
            report.orgs.insert(name.clone(), (*entry).clone());
        }
    }
    report.unresolved_orgs = orgs.failures();
    info!(
        "Organizations: {} distinct names, {} unresolved",
        seen.len(),
        report.unresolved_orgs
    );

    let mut out = io::stdout().lock();
    let mut serializer = Serializer::with_formatter(&mut out, PrettyFormatter::with_indent(b"    "));
    report
        .serialize(&mut serializer)
        .context("Failed to serialize resolution report")?;
    writeln!(out).context("Failed to write resolution report")?;
    Ok(())
}
