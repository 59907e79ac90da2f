//! The `EventLogWriter` trait implemented by log backends.

use crate::{EventRow, OutputResult, TickSummaryRow};

/// A sink for event rows and step summaries.
///
/// Called from inside bus dispatch, so implementations must not publish on
/// the bus themselves.  Errors are kept by [`EventLogSubscriber`] and
/// retrieved with [`take_error`][crate::EventLogSubscriber::take_error].
///
/// [`EventLogSubscriber`]: crate::EventLogSubscriber
pub trait EventLogWriter {
    fn write_event(&mut self, row: &EventRow) -> OutputResult<()>;

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()>;

    /// Flush and close all underlying handles.  Idempotent.
    fn finish(&mut self) -> OutputResult<()>;
}
