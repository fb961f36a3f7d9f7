//! Headless scenario runner.
//!
//! Loads a scenario file, runs it for the requested number of ticks with a
//! naive distance-based collision pass, and prints every simulation event to
//! stdout as one JSON object per line.
//!
//! ```text
//! laserline-sim <scenario.json>
//! RUST_LOG=laserline_core=debug LOG_FORMAT=json laserline-sim scenario.json
//! ```

mod scenario;

use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use tracing::{info, info_span};

use scenario::{overlaps, Scenario};

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    // Logs go to stderr; stdout carries the event stream.
    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .json()
            .with_current_span(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .compact()
            .init();
    }
}

fn scenario_path() -> Result<PathBuf> {
    let mut args = std::env::args_os().skip(1);
    let Some(path) = args.next() else {
        bail!("usage: laserline-sim <scenario.json>");
    };
    if args.next().is_some() {
        bail!("usage: laserline-sim <scenario.json>");
    }
    Ok(PathBuf::from(path))
}

fn main() -> Result<()> {
    init_tracing();

    let path = scenario_path()?;
    let text = std::fs::read_to_string(&path)
        .with_context(|| format!("reading {}", path.display()))?;
    let scenario = Scenario::from_json(&text).with_context(|| format!("loading {}", path.display()))?;
    let mut sim = scenario.build()?;

    info!(
        path = %path.display(),
        entities = sim.arena().entity_count(),
        ticks = scenario.ticks,
        dt = scenario.dt,
        "scenario loaded"
    );

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let mut event_count = 0usize;

    for tick in 0..scenario.ticks {
        let _span = info_span!("tick", tick).entered();
        sim.step(scenario.dt);
        for (laser, other) in overlaps(&sim, scenario.overlap_radius) {
            sim.on_overlap(laser, other);
        }
        for record in sim.take_events() {
            serde_json::to_writer(&mut out, &record)?;
            writeln!(out)?;
            event_count += 1;
        }
    }
    out.flush()?;

    info!(
        events = event_count,
        survivors = sim.arena().entity_count(),
        time = sim.now(),
        "scenario finished"
    );
    Ok(())
}
