//! Plain data row types written by output backends.

use ev_sim::RunRecord;

/// One line per run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummaryRow {
    pub run_index:     usize,
    pub seed:          u64,
    pub termination:   &'static str,
    pub total_ticks:   u64,
    pub evacuated:     usize,
    pub left_behind:   usize,
    /// Mean evacuation tick; `None` if nobody got out.
    pub avg_evac_time: Option<f64>,
}

impl RunSummaryRow {
    pub fn from_record(record: &RunRecord) -> Self {
        Self {
            run_index:     record.run_index,
            seed:          record.seed,
            termination:   record.termination.as_str(),
            total_ticks:   record.total_ticks,
            evacuated:     record.evacuated(),
            left_behind:   record.left_behind,
            avg_evac_time: record.avg_evac_time(),
        }
    }
}

/// One line per evacuated occupant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvacuationRow {
    pub run_index:   usize,
    pub occupant_id: u32,
    pub exit_x:      u32,
    pub exit_y:      u32,
    pub tick:        u64,
}

impl EvacuationRow {
    pub fn from_record(record: &RunRecord) -> Vec<Self> {
        record
            .evacuations
            .iter()
            .map(|e| Self {
                run_index:   record.run_index,
                occupant_id: e.occupant.0,
                exit_x:      e.exit.x,
                exit_y:      e.exit.y,
                tick:        e.tick.0,
            })
            .collect()
    }
}
