//! `RunOutputObserver<W>` — bridges `SimObserver` to an `OutputWriter`.

use ev_sim::{RunRecord, SimObserver};

use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`SimObserver`] that writes each finished run to any [`OutputWriter`]
/// backend (CSV, JSON).
///
/// Errors from the writer are stored internally because `SimObserver` methods
/// have no return value.  After `sim.run()` returns, check for errors with
/// [`take_error`][Self::take_error].
pub struct RunOutputObserver<W: OutputWriter> {
    writer:     W,
    runs:       usize,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> RunOutputObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, runs: 0, last_error: None }
    }

    /// Take the stored write error (if any) after `sim.run()` returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Number of runs handed to the writer.
    pub fn runs_written(&self) -> usize {
        self.runs
    }

    /// Unwrap the inner writer (e.g. to inspect files after the sim).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SimObserver for RunOutputObserver<W> {
    fn on_sim_end(&mut self, record: &RunRecord) {
        let result = self.writer.write_run(record).and_then(|()| self.writer.flush());
        self.runs += 1;
        self.store_err(result);
    }
}
