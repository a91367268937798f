//! Satellite Pointing CLI
//!
//! Lists the satellites above the elevation mask for an observer given as an
//! MGRS grid reference.
//!
//! Usage:
//!   satpoint --mgrs 53TLE --tle data/stations.tle \
//!            --at 2021-03-16T12:14:28Z --min-elevation 15
//!
//!   satpoint --mgrs "33U XP 04" --tle-json catalog.json --geo-only \
//!            --updates 10 --interval-s 2 --output json

use std::path::PathBuf;
use std::thread;

use anyhow::{bail, Context, Result};
use antenna_pointing::{PointingConfig, PointingSession};
use chrono::{DateTime, Duration, Utc};
use clap::{Parser, ValueEnum};
use orbital_mechanics::{filter_geostationary, parse_catalog};
use pointing_cli::config::{apply_overrides, load_config, tick_instant, Overrides};
use pointing_cli::render::{render_json, render_text};
use pointing_cli::{catalog, Report};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Parser, Debug)]
#[command(
    name = "satpoint",
    about = "Show which satellites are above the elevation mask for an MGRS observer"
)]
struct Args {
    /// Observer grid reference, e.g. 43UCR or "33U XP 0412"
    #[arg(short, long)]
    mgrs: String,

    /// Observer height above the spherical Earth in metres
    #[arg(long, allow_negative_numbers = true)]
    height_m: Option<f64>,

    /// TLE text catalog (name / line 1 / line 2), repeatable
    #[arg(long)]
    tle: Vec<PathBuf>,

    /// TLE JSON catalog ([{name, line1, line2}]), repeatable
    #[arg(long)]
    tle_json: Vec<PathBuf>,

    /// Evaluation instant (RFC 3339); defaults to now
    #[arg(long)]
    at: Option<DateTime<Utc>>,

    /// Elevation mask in degrees (clamped to 0-90)
    #[arg(long, allow_negative_numbers = true)]
    min_elevation: Option<f64>,

    /// JSON config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Keep only geostationary satellites
    #[arg(long)]
    geo_only: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    output: OutputFormat,

    /// Number of refresh ticks to print
    #[arg(long, default_value_t = 1)]
    updates: u32,

    /// Seconds between refresh ticks
    #[arg(long)]
    interval_s: Option<f64>,

    /// Preferred satellite id, kept while it stays visible
    #[arg(long)]
    select: Option<String>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging; RUST_LOG wins over --verbose
    let default_filter = if args.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    info!("{}", "=".repeat(60));
    info!("Satellite Pointing");
    info!("{}", "=".repeat(60));

    let config = match &args.config {
        Some(path) => load_config(path).with_context(|| format!("loading config {}", path.display()))?,
        None => PointingConfig::default(),
    };
    let config = apply_overrides(
        config,
        &Overrides {
            min_elevation_deg: args.min_elevation,
            refresh_interval_s: args.interval_s,
            height_m: args.height_m,
        },
    );
    debug!(?config, "Effective configuration");

    if args.tle.is_empty() && args.tle_json.is_empty() {
        bail!("no catalog given; pass --tle and/or --tle-json");
    }

    let mut entries = Vec::new();
    for path in &args.tle {
        entries.extend(catalog::load_tle_text(path).with_context(|| format!("reading {}", path.display()))?);
    }
    for path in &args.tle_json {
        entries.extend(catalog::load_tle_json(path).with_context(|| format!("reading {}", path.display()))?);
    }

    let mut elements = parse_catalog(&entries);
    if args.geo_only {
        elements = filter_geostationary(elements);
        info!("Kept {} geostationary satellites", elements.len());
    }

    let mut session = PointingSession::new(&config);
    session.load_catalog(elements);
    session
        .set_observer(&args.mgrs, config.default_height_m)
        .with_context(|| format!("decoding observer {:?}", args.mgrs))?;

    let interval = config.refresh_interval();
    let step = Duration::from_std(interval).context("refresh interval out of range")?;
    let start = args.at;

    for tick in 0..args.updates.max(1) {
        let at = match start {
            Some(t) => tick_instant(t, step, tick)
                .with_context(|| format!("tick {tick} at {}s steps falls outside the supported time range", step.num_seconds()))?,
            None => Utc::now(),
        };
        session.refresh(at);
        if let Some(id) = args.select.as_deref() {
            if session.selected() != Some(id) && !session.select(id) {
                debug!(id, "Requested satellite not visible");
            }
        }

        let report = Report::from_session(&session, at);
        match args.output {
            OutputFormat::Text => print!("{}", render_text(&report)),
            OutputFormat::Json => println!("{}", render_json(&report)?),
        }

        if start.is_none() && tick + 1 < args.updates {
            thread::sleep(interval);
        }
    }

    Ok(())
}
