//! `dl-output`: event log writers for the delivery-job subsystem.
//!
//! | Writer        | Files created                            |
//! |---------------|------------------------------------------|
//! | `CsvEventLog` | `job_events.csv`, `tick_summaries.csv`   |
//!
//! Writers implement [`EventLogWriter`] and are driven by
//! [`EventLogSubscriber`], which listens on the event bus for job events and
//! implements `dl_sim::SessionObserver` for per-step summaries.
//!
//! # Usage
//!
//! ```rust,ignore
//! use dl_output::{CsvEventLog, EventLogSubscriber};
//!
//! let writer = CsvEventLog::new(Path::new("./output"))?;
//! let (mut log, _sub) = EventLogSubscriber::attach(writer, session.bus());
//! session.run_for(Duration::from_secs(600), Duration::from_secs(1), &mut log)?;
//! if let Some(e) = log.take_error() {
//!     eprintln!("output error: {e}");
//! }
//! ```

pub mod csv;
pub mod error;
pub mod row;
pub mod subscriber;
pub mod writer;


pub use csv::CsvEventLog;
pub use error::{OutputError, OutputResult};
pub use row::{EventRow, TickSummaryRow};
pub use subscriber::EventLogSubscriber;
pub use writer::EventLogWriter;
