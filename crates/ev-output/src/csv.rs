//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `runs.csv`
//! - `evacuations.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use ev_sim::RunRecord;

use crate::writer::OutputWriter;
use crate::{EvacuationRow, OutputResult, RunSummaryRow};

/// Writes run output to two CSV files.
pub struct CsvWriter {
    runs:        Writer<File>,
    evacuations: Writer<File>,
}

impl CsvWriter {
    /// Open (or create) the two CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut runs = Writer::from_path(dir.join("runs.csv"))?;
        runs.write_record([
            "run_index",
            "seed",
            "termination",
            "total_ticks",
            "evacuated",
            "left_behind",
            "avg_evac_time",
        ])?;

        let mut evacuations = Writer::from_path(dir.join("evacuations.csv"))?;
        evacuations.write_record(["run_index", "occupant_id", "exit_x", "exit_y", "tick"])?;

        Ok(Self { runs, evacuations })
    }

    fn write_summary(&mut self, row: &RunSummaryRow) -> OutputResult<()> {
        self.runs.write_record(&[
            row.run_index.to_string(),
            row.seed.to_string(),
            row.termination.to_string(),
            row.total_ticks.to_string(),
            row.evacuated.to_string(),
            row.left_behind.to_string(),
            row.avg_evac_time.map(|t| format!("{t:.3}")).unwrap_or_default(),
        ])?;
        Ok(())
    }
}

impl OutputWriter for CsvWriter {
    fn write_run(&mut self, record: &RunRecord) -> OutputResult<()> {
        self.write_summary(&RunSummaryRow::from_record(record))?;
        for row in EvacuationRow::from_record(record) {
            self.evacuations.write_record(&[
                row.run_index.to_string(),
                row.occupant_id.to_string(),
                row.exit_x.to_string(),
                row.exit_y.to_string(),
                row.tick.to_string(),
            ])?;
        }
        Ok(())
    }

    fn flush(&mut self) -> OutputResult<()> {
        self.runs.flush()?;
        self.evacuations.flush()?;
        Ok(())
    }
}
