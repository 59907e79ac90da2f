//! courier: a small delivery shift driven by the job subsystem.
//!
//! Eight zones around a harbour town, one scripted courier, ten simulated
//! minutes.  Offers appear on the session's schedule; the courier accepts
//! most of them, declines some, lets the rest lapse, and drives between the
//! marked zones.  Every lifecycle event is written to
//! `output/courier/job_events.csv`.
//!
//! Usage: `courier [config.json]`.  Log verbosity follows `RUST_LOG`
//! (default `info`).

mod courier;
#[cfg(test)]
mod tests;

use std::fs::File;
use std::io::Cursor;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use dl_core::{JobConfig, SimRng, load_zones_reader};
use dl_events::EventKind;
use dl_jobs::ZoneIndicators;
use dl_output::{CsvEventLog, EventLogSubscriber};
use dl_sim::{SessionBuilder, SessionObserver};

use courier::Courier;

// ── Constants ─────────────────────────────────────────────────────────────────

const SEED:         u64      = 42;
const STEP:         Duration = Duration::from_millis(500);
const SHIFT:        Duration = Duration::from_secs(600);
const STATUS_EVERY: u64      = 120; // steps between status lines
const OUTPUT_DIR:   &str     = "output/courier";

// ── Zones CSV ─────────────────────────────────────────────────────────────────

const ZONES_CSV: &str = "\
zone_id,kind,display_name\n\
1,pickup,Harbour Warehouse\n\
2,pickup,Bakery\n\
3,pickup,Pharmacy\n\
4,pickup,Fish Market\n\
10,dropoff,Old Town\n\
11,dropoff,Station Square\n\
12,dropoff,Lighthouse\n\
13,dropoff,University\n\
";

// ── Config ────────────────────────────────────────────────────────────────────

fn load_config(path: Option<&str>) -> Result<JobConfig> {
    let Some(path) = path else {
        return Ok(JobConfig { seed: SEED, ..JobConfig::default() });
    };
    let file = File::open(path).with_context(|| format!("opening config {path}"))?;
    let config: JobConfig =
        serde_json::from_reader(file).with_context(|| format!("parsing config {path}"))?;
    Ok(config)
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let config_path = std::env::args().nth(1);
    let config = load_config(config_path.as_deref())?;
    println!("=== courier: delivery job lifecycle demo ===");
    println!(
        "Seed: {}  |  Shift: {} s  |  Step: {} ms  |  Countdown: {:?}",
        config.seed,
        SHIFT.as_secs(),
        STEP.as_millis(),
        config.countdown_start,
    );

    // 1. Zones.
    let catalog = load_zones_reader(Cursor::new(ZONES_CSV))?;
    println!(
        "Zones: {} pickups, {} dropoffs",
        catalog.pickups().len(),
        catalog.dropoffs().len()
    );

    // 2. Session.
    let courier_rng = SimRng::new(config.seed).child(1);
    let mut session = SessionBuilder::new(config, catalog).build()?;

    // 3. Subscribers: marker state, per-kind counts, event log.
    let (indicators, _) = ZoneIndicators::attach(session.bus());

    let counts: Arc<[AtomicUsize; 6]> = Arc::new(Default::default());
    {
        let counts = Arc::clone(&counts);
        session.bus().subscribe_all(move |e| {
            if let Some(i) = EventKind::ALL.iter().position(|k| *k == e.kind) {
                counts[i].fetch_add(1, Ordering::Relaxed);
            }
        });
    }

    std::fs::create_dir_all(OUTPUT_DIR)?;
    let writer = CsvEventLog::new(Path::new(OUTPUT_DIR))?;
    let (mut log, _) = EventLogSubscriber::attach(writer, session.bus());

    // 4. Run the shift.
    let mut courier = Courier::new(courier_rng);
    session.start();
    let t0 = Instant::now();
    let mut steps = 0u64;
    while session.now().0 < SHIFT {
        log.on_tick_start(session.now());
        let summary = session.advance(STEP);
        log.on_tick_end(session.now(), &summary);
        courier.step(&mut session, STEP);

        steps += 1;
        if steps % STATUS_EVERY == 0 {
            println!(
                "{:>10}  offers {:>2}  active {:>2}  marked {:?}",
                session.now().to_string(),
                session.available_offers().len(),
                session.active_jobs().len(),
                indicators.marked_zones().iter().map(|z| z.0).collect::<Vec<_>>(),
            );
        }
    }
    session.stop();
    log.on_session_end(session.now());
    let elapsed = t0.elapsed();

    if let Some(e) = log.take_error() {
        eprintln!("output error: {e}");
    }

    // 5. Summary.
    println!();
    println!("Shift complete in {:.3} s ({} steps)", elapsed.as_secs_f64(), steps);
    println!("  job_events.csv : {} rows", log.rows_written());
    println!();
    println!("{:<16} {:>6}", "Event", "Count");
    println!("{}", "-".repeat(23));
    for (kind, n) in EventKind::ALL.iter().zip(counts.iter()) {
        println!("{:<16} {:>6}", kind.as_str(), n.load(Ordering::Relaxed));
    }

    let tally = courier.tally();
    println!();
    println!(
        "Courier: accepted {}, declined {}, ignored {}, zone visits {}",
        tally.accepted, tally.denied, tally.ignored, tally.visits
    );

    println!();
    println!("{:<20} {:<16} {:>8}", "Open job", "State", "Left (s)");
    println!("{}", "-".repeat(46));
    for job in session.active_jobs() {
        println!(
            "{:<20} {:<16} {:>8}",
            job.route_label(),
            job.state().as_str(),
            job.seconds_left()
        );
    }

    Ok(())
}
