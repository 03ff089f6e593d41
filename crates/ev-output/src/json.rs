//! JSON run-log backend.
//!
//! The log is one pretty-printed document:
//!
//! ```json
//! {
//!   "settings": { "occupant_count": 250, "voting_method": "plurality", ... },
//!   "runs": [
//!     {
//!       "evac_times": [3, 5, 5, 8],
//!       "avg_evac_time": 5.25,
//!       "total_evac_time": 9,
//!       "num_agents_left": 0,
//!       "termination": "all_evacuated"
//!     }
//!   ]
//! }
//! ```
//!
//! `total_evac_time` is the number of ticks the run took.  The whole file is
//! rewritten on every flush, so it is always a complete document.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;

use ev_core::EvacConfig;
use ev_sim::RunRecord;

use crate::writer::OutputWriter;
use crate::OutputResult;

#[derive(Debug, Clone, PartialEq, Serialize)]
struct RunEntry {
    evac_times:      Vec<u64>,
    avg_evac_time:   Option<f64>,
    total_evac_time: u64,
    num_agents_left: usize,
    termination:     &'static str,
}

#[derive(Serialize)]
struct RunLog<'a> {
    settings: &'a EvacConfig,
    runs:     &'a [RunEntry],
}

/// Collects runs in memory and writes them as one JSON document.
pub struct JsonLogWriter {
    path:     PathBuf,
    settings: EvacConfig,
    runs:     Vec<RunEntry>,
}

impl JsonLogWriter {
    /// Log to `path`, recording `settings` as the run configuration.
    ///
    /// Nothing touches the file system until the first flush.
    pub fn new(path: &Path, settings: &EvacConfig) -> Self {
        Self {
            path:     path.to_path_buf(),
            settings: settings.clone(),
            runs:     Vec::new(),
        }
    }

    pub fn run_count(&self) -> usize {
        self.runs.len()
    }
}

impl OutputWriter for JsonLogWriter {
    fn write_run(&mut self, record: &RunRecord) -> OutputResult<()> {
        self.runs.push(RunEntry {
            evac_times:      record.evac_ticks(),
            avg_evac_time:   record.avg_evac_time(),
            total_evac_time: record.total_ticks,
            num_agents_left: record.left_behind,
            termination:     record.termination.as_str(),
        });
        Ok(())
    }

    fn flush(&mut self) -> OutputResult<()> {
        let log = RunLog { settings: &self.settings, runs: &self.runs };
        let mut out = BufWriter::new(File::create(&self.path)?);
        serde_json::to_writer_pretty(&mut out, &log)?;
        out.write_all(b"\n")?;
        out.flush()?;
        Ok(())
    }
}
