//! drift — end-to-end run of the straight-line lost-person model.
//!
//! A hiker was last seen near a trailhead.  Sample paths start jittered
//! around that point and walk north-east on a night-resting schedule.  A path
//! that would enter one of two lakes stops at its last dry step.  One failed
//! hasty search near the trailhead is then applied and the shifted
//! containment summarized.
//!
//! Usage: `drift [params.json] [output.json]`
//!
//! `params.json` overrides the default `ModelParams`; without `output.json`
//! the model output is not written.  Set `RUST_LOG=debug` for detail.

use std::fs::File;
use std::io::{BufWriter, Cursor};
use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result, bail};

use sar_core::{Direction, EpochMs, GeoPoint, GeoRectangle, LpiId, MS_PER_HOUR, SampleRng};
use sar_geometry::{ExclusionZones, load_zones_reader};
use sar_grid::{ContainmentLevel, GridSpec, ProbabilityDistribution};
use sar_model::{DiskSearch, LogProgress, ModelBuilder, ModelOutput, ModelParams, Search};
use sar_schedule::{MovementSchedule, ScheduleRegistry, StandardSchedule, parse_zone};

// ── Constants ─────────────────────────────────────────────────────────────────

const SAMPLE_COUNT:     usize = 64;
const SEED:             u64   = 42;
const LAST_SEEN_LAT:    f64   = 44.270;
const LAST_SEEN_LON:    f64   = -71.303;
const JITTER_M:         f64   = 400.0;
const AREA_EXTENT_KM:   f64   = 24.0;
const START_TIME:       EpochMs = EpochMs(1_700_000_000_000); // 2023-11-14 22:13 UTC
const ZONE_ID:          &str  = "UTC-05:00";

// lat,lon,radius_m[,unknown]
const LAKES_CSV: &str = "\
44.300,-71.270,900\n\
44.320,-71.230,1200,1\n\
";

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let params = match args.first() {
        Some(path) => load_params(Path::new(path))?,
        None => ModelParams::new(Direction::NorthEast, 3.0, 12.0),
    };
    println!("drift: lost-person motion model");
    println!(
        "  params: {} at {} km/h for {} km, step {} min",
        params.direction,
        params.speed_kph,
        params.distance_km,
        params.time_delta_ms / 60_000,
    );

    // ── Inputs ────────────────────────────────────────────────────────────────

    let last_seen = GeoPoint::new(LAST_SEEN_LAT, LAST_SEEN_LON);
    let rect = GeoRectangle::around(last_seen, AREA_EXTENT_KM, AREA_EXTENT_KM)?;

    let Some(zone) = parse_zone(ZONE_ID) else {
        bail!("unrecognized zone id {ZONE_ID:?}");
    };
    let registry = ScheduleRegistry::new();
    let schedule = registry.get_or_create(StandardSchedule::Night, zone)?;
    println!("  schedule: {}", schedule.name());

    let zones = ExclusionZones::with_circles(load_zones_reader(Cursor::new(LAKES_CSV))?);
    println!("  {} exclusion zones", zones.len());

    let start_points: Vec<GeoPoint> = (0..SAMPLE_COUNT)
        .map(|i| SampleRng::new(SEED, i).point_in_disk(last_seen, JITTER_M))
        .collect();

    // ── Run ───────────────────────────────────────────────────────────────────

    let lpi = LpiId::new_v4();
    let model = ModelBuilder::new(lpi, START_TIME, rect, schedule, params)
        .start_points(start_points)
        .zones(zones)
        .grid_spec(GridSpec::new(900, 0.5))
        .name("drift-demo")
        .build()?;

    let started = Instant::now();
    let mut progress = LogProgress::new();
    let run = model.run(&mut progress)?;
    println!(
        "  {} paths, {} steps, {} hourly distributions in {:.2?}",
        run.samples.len(),
        progress.steps(),
        run.output.initial().len(),
        started.elapsed(),
    );

    let info = run.output.validate();
    if !info.is_valid() {
        bail!("model output failed validation:\n{info}");
    }

    let last_hour = run.output.initial().last_time().unwrap_or(START_TIME);
    let before = run.output.initial().at(last_hour)?;
    summarize("without searches", &before);

    // ── Search ────────────────────────────────────────────────────────────────

    let mut samples = run.samples;
    let search = DiskSearch::new(START_TIME + 2 * MS_PER_HOUR, 2 * MS_PER_HOUR, last_seen, 2_000.0, 0.7);
    let updated = samples.add_search(&search, &run.output)?;
    println!(
        "  search {}: cumulative pd {:.3}",
        search.id(),
        samples.cumulative_pd(&[search.id()]),
    );
    summarize("with searches", &updated.distribution_at(last_hour)?);

    if let Some(path) = args.get(1) {
        write_output(Path::new(path), &updated)?;
        println!("  output written to {path}");
    }
    Ok(())
}

fn load_params(path: &Path) -> Result<ModelParams> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let params = serde_json::from_reader(file).with_context(|| format!("parsing {}", path.display()))?;
    Ok(params)
}

fn write_output(path: &Path, output: &ModelOutput) -> Result<()> {
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    serde_json::to_writer_pretty(BufWriter::new(file), output)?;
    Ok(())
}

fn summarize(label: &str, d: &ProbabilityDistribution) {
    let map = d.map();
    println!(
        "  {label} at {}: {}x{} cells of {:.2} x {:.2} km",
        d.time(),
        map.num_lat(),
        map.num_lon(),
        map.ns_cell_extent_km(),
        map.ew_cell_extent_km(),
    );
    for level in ContainmentLevel::ALL {
        println!("    {level} region: {} cells", map.cells_at_level(level).len());
    }
}
