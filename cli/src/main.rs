//! `benchy`: times the benchy containers against std over a size sweep
//!
//! Logging goes to stderr and honors `RUST_LOG` (default `info`); the report
//! goes to stdout.

mod cases;
mod config;
mod report;

use anyhow::Context;
use benchy::data;
use clap::Parser;
use config::{Args, Format};
use report::Row;
use std::io;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .init();

    let config = Args::parse().into_config()?;
    info!(
        sizes = ?config.sizes,
        iterations = config.iterations,
        cases = config.cases.len(),
        seed = ?config.seed,
        "starting sweep"
    );

    // One key set for the largest size; smaller sizes use a prefix of it.
    let mut rng = data::seeded_rng(config.seed);
    let largest = config.sizes.last().copied().unwrap_or(0);
    let keys = if config.cases.iter().any(|c| c.uses_keys()) {
        data::random_strings(largest, &mut rng)
    } else {
        Vec::new()
    };

    let mut rows = Vec::with_capacity(config.cases.len() * config.sizes.len());
    for &case in &config.cases {
        for &size in &config.sizes {
            let keys = keys.get(..size).unwrap_or(&[]);
            let elapsed = case
                .measure(size, config.iterations, keys)
                .with_context(|| format!("{case} at size {size}"))?;
            let row = Row::new(case, size, config.iterations, elapsed);
            debug!(?row, "measured");
            rows.push(row);
        }
        info!(%case, "case finished");
    }

    let mut out = io::stdout().lock();
    match config.format {
        Format::Table => report::write_table(&rows, &mut out).context("writing table")?,
        Format::Json => report::write_json(&rows, &mut out).context("writing json")?,
    }
    Ok(())
}
