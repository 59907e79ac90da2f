//! CSV log backend.
//!
//! Creates two files in the configured output directory:
//! - `job_events.csv`
//! - `tick_summaries.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::EventLogWriter;
use crate::{EventRow, OutputResult, TickSummaryRow};

pub const EVENTS_FILE: &str = "job_events.csv";
pub const SUMMARIES_FILE: &str = "tick_summaries.csv";

/// Writes the event log to two CSV files.
pub struct CsvEventLog {
    events:    Writer<File>,
    summaries: Writer<File>,
}

impl CsvEventLog {
    /// Create the two CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut events = Writer::from_path(dir.join(EVENTS_FILE))?;
        events.write_record([
            "seq",
            "time_secs",
            "event",
            "job_id",
            "pickup_zone",
            "dropoff_zone",
            "route",
            "state",
            "time_remaining_secs",
        ])?;

        let mut summaries = Writer::from_path(dir.join(SUMMARIES_FILE))?;
        summaries.write_record([
            "tick",
            "time_millis",
            "offers_spawned",
            "spawn_skipped",
            "offers_expired",
            "stale_timers",
            "jobs_expired",
        ])?;

        Ok(Self { events, summaries })
    }
}

impl EventLogWriter for CsvEventLog {
    fn write_event(&mut self, row: &EventRow) -> OutputResult<()> {
        self.events.write_record(&[
            row.seq.to_string(),
            format!("{:.3}", row.time_secs),
            row.event.to_owned(),
            row.job_id.clone(),
            row.pickup_zone.to_string(),
            row.dropoff_zone.to_string(),
            row.route.clone(),
            row.state.to_owned(),
            format!("{:.3}", row.time_remaining_secs),
        ])?;
        Ok(())
    }

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        self.summaries.write_record(&[
            row.tick.to_string(),
            row.time_millis.to_string(),
            row.offers_spawned.to_string(),
            row.spawn_skipped.to_string(),
            row.offers_expired.to_string(),
            row.stale_timers.to_string(),
            row.jobs_expired.to_string(),
        ])?;
        Ok(())
    }

    /// Flushes both files.  A session may run in several stretches, so
    /// writing may continue afterwards.
    fn finish(&mut self) -> OutputResult<()> {
        self.events.flush()?;
        self.summaries.flush()?;
        Ok(())
    }
}
