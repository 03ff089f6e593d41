//! The `OutputWriter` trait implemented by all backend writers.

use ev_sim::RunRecord;

use crate::OutputResult;

/// Trait implemented by the CSV and JSON writers.
///
/// When driven by [`RunOutputObserver`][crate::RunOutputObserver], errors are
/// stored by the observer and retrieved with
/// [`take_error`][crate::RunOutputObserver::take_error].
pub trait OutputWriter {
    /// Record one finished run.
    fn write_run(&mut self, record: &RunRecord) -> OutputResult<()>;

    /// Push everything written so far to disk.
    ///
    /// Safe to call more than once; later runs may still be written after.
    fn flush(&mut self) -> OutputResult<()>;
}

/// Write every record of a batch, then flush.
pub fn write_batch<W: OutputWriter>(writer: &mut W, records: &[RunRecord]) -> OutputResult<()> {
    for record in records {
        writer.write_run(record)?;
    }
    writer.flush()
}
