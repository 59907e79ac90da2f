//! `EventLogSubscriber<W>`: bridges the event bus and `SessionObserver` to an
//! `EventLogWriter`.

use std::sync::Arc;

use dl_core::SimTime;
use dl_events::{EventBus, JobEvent, SubscriptionId};
use dl_sim::{SessionObserver, TickSummary};
use parking_lot::Mutex;
use tracing::warn;

use crate::row::{EventRow, TickSummaryRow};
use crate::writer::EventLogWriter;
use crate::{OutputError, OutputResult};

struct LogState<W> {
    writer:     W,
    seq:        u64,
    ticks:      u64,
    now:        SimTime,
    last_error: Option<OutputError>,
}

impl<W: EventLogWriter> LogState<W> {
    fn record(&mut self, event: &JobEvent) {
        let row = EventRow::from_event(self.seq, self.now, event);
        self.seq += 1;
        let result = self.writer.write_event(&row);
        self.store_err(result);
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                warn!(error = %e, "event log write failed");
                self.last_error = Some(e);
            }
        }
    }
}

/// Writes every job event published on a bus, plus a summary row for each
/// session step that did something, to any [`EventLogWriter`].
///
/// Bus handlers and observer hooks cannot return errors, so the first write
/// error is stored and retrieved with [`take_error`][Self::take_error].
/// Event rows are stamped with the time of the most recent step boundary
/// the log has seen through its observer hooks.
pub struct EventLogSubscriber<W: EventLogWriter> {
    state: Arc<Mutex<LogState<W>>>,
}

impl<W: EventLogWriter + Send + 'static> EventLogSubscriber<W> {
    /// A log backed by `writer` that is not yet listening on any bus.
    pub fn new(writer: W) -> Self {
        Self {
            state: Arc::new(Mutex::new(LogState {
                writer,
                seq:        0,
                ticks:      0,
                now:        SimTime::ZERO,
                last_error: None,
            })),
        }
    }

    /// Create a log and subscribe it to every event on `bus`.
    pub fn attach(writer: W, bus: &EventBus) -> (Self, SubscriptionId) {
        let log = Self::new(writer);
        let id = log.listen(bus);
        (log, id)
    }

    /// Subscribe this log to every event on `bus`.
    pub fn listen(&self, bus: &EventBus) -> SubscriptionId {
        let state = Arc::clone(&self.state);
        bus.subscribe_all(move |e| state.lock().record(e))
    }

    /// Take the stored write error (if any).
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.state.lock().last_error.take()
    }

    /// Number of event rows handed to the writer so far.
    pub fn rows_written(&self) -> u64 {
        self.state.lock().seq
    }

    /// Flush the writer now.  Also done by `on_session_end`.
    pub fn finish(&mut self) -> OutputResult<()> {
        self.state.lock().writer.finish()
    }
}

impl<W: EventLogWriter + Send + 'static> SessionObserver for EventLogSubscriber<W> {
    fn on_tick_start(&mut self, now: SimTime) {
        self.state.lock().now = now;
    }

    fn on_tick_end(&mut self, now: SimTime, summary: &TickSummary) {
        let mut state = self.state.lock();
        state.now = now;
        state.ticks += 1;
        if summary.is_idle() {
            return;
        }
        let row = TickSummaryRow::new(state.ticks, now, summary);
        let result = state.writer.write_tick_summary(&row);
        state.store_err(result);
    }

    fn on_session_end(&mut self, _now: SimTime) {
        let mut state = self.state.lock();
        let result = state.writer.finish();
        state.store_err(result);
    }
}
