//! hallway — small end-to-end run of the rust_evac simulator.
//!
//! Two offices and a meeting room open onto a hallway with an exit at each
//! end.  The demo first runs one simulation with an ASCII picture before and
//! after, then runs a batch and writes `runs.csv`, `evacuations.csv` and
//! `log.json` to `output/hallway`.
//!
//! ```text
//! cargo run -p hallway --release -- [config.json] [plan.txt]
//! RUST_LOG=debug cargo run -p hallway
//! ```
//!
//! Without arguments the built-in plan and the constants below are used.

use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};

use ev_core::{EvacConfig, GroupId, Tick, VotingMethod};
use ev_negotiate::Award;
use ev_output::{CsvWriter, JsonLogWriter, write_batch};
use ev_sim::{Evacuation, RunRecord, SimBuilder, SimObserver, render_ascii, run_batch};
use ev_spatial::FloorPlan;

// ── Constants ─────────────────────────────────────────────────────────────────

const OCCUPANTS:  usize = 60;
const BATCH_RUNS: usize = 20;
const SEED:       u64   = 42;
const OUTPUT_DIR: &str  = "output/hallway";

const PLAN: &str = "\
WWWWWWWWWWWWWWWWWWWWWWWW
Waaaaaaa.bbbbbbb.ccccccW
Waaaaaaa.bbbbbbb.ccccccW
Waaaaaaa.bbbbbbb.ccccccW
E......................E
E......................E
Wdddddddddd.eeeeeeeeeeeW
Wdddddddddd.eeeeeeeeeeeW
WWWWWWWWWWWWWWWWWWWWWWWW
";

// ── Progress observer ─────────────────────────────────────────────────────────

#[derive(Default)]
struct Progress {
    evacuated: usize,
    pairs:     usize,
    merges:    usize,
}

impl SimObserver for Progress {
    fn on_tick_end(&mut self, tick: Tick, remaining: usize) {
        if tick.0 % 10 == 0 {
            println!("  tick {:>4}: {remaining} inside", tick.0);
        }
    }

    fn on_evacuated(&mut self, _evacuation: &Evacuation) {
        self.evacuated += 1;
    }

    fn on_pair_formed(&mut self, _tick: Tick, _award: &Award) {
        self.pairs += 1;
    }

    fn on_merge(&mut self, _tick: Tick, _a: GroupId, _b: GroupId, _merged: GroupId) {
        self.merges += 1;
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => {
            let text = std::fs::read_to_string(&path).with_context(|| format!("reading {path}"))?;
            serde_json::from_str::<EvacConfig>(&text).with_context(|| format!("parsing {path}"))?
        }
        None => EvacConfig {
            occupant_count: OCCUPANTS,
            voting_method:  VotingMethod::Approval,
            batch_count:    BATCH_RUNS,
            seed:           SEED,
            ..Default::default()
        },
    };
    let plan = match args.next() {
        Some(path) => FloorPlan::from_path(Path::new(&path))?,
        None => FloorPlan::parse(PLAN)?,
    };

    println!("=== hallway — rust_evac ===");
    println!(
        "Plan {}x{}  |  occupants: {} ({} helpers)  |  voting: {}  |  seed: {}",
        plan.width,
        plan.height,
        config.occupant_count,
        config.helper_count(),
        config.voting_method,
        config.seed,
    );
    println!();

    // 1. One run, drawn before and after.
    let mut sim = SimBuilder::new(config.clone(), plan.clone()).build()?;
    print!("{}", render_ascii(&sim));
    println!();

    let mut progress = Progress::default();
    let record = sim.run(&mut progress)?;
    println!();
    print!("{}", render_ascii(&sim));
    println!();
    print_record(&record);
    println!(
        "  {} evacuated, {} pairs formed, {} group merges",
        progress.evacuated, progress.pairs, progress.merges
    );
    println!();

    // 2. The batch.
    let t0 = Instant::now();
    let records = run_batch(&config, &plan)?;
    println!(
        "Batch of {} runs in {:.3} s",
        records.len(),
        t0.elapsed().as_secs_f64()
    );

    std::fs::create_dir_all(OUTPUT_DIR)?;
    let dir = Path::new(OUTPUT_DIR);
    write_batch(&mut CsvWriter::new(dir)?, &records)?;
    write_batch(&mut JsonLogWriter::new(&dir.join("log.json"), &config), &records)?;
    log::info!("wrote {} runs to {OUTPUT_DIR}", records.len());

    println!();
    println!("{:<5} {:<14} {:>6} {:>10} {:>6}", "Run", "Termination", "Ticks", "Avg evac", "Left");
    println!("{}", "-".repeat(45));
    for r in &records {
        println!(
            "{:<5} {:<14} {:>6} {:>10} {:>6}",
            r.run_index,
            r.termination.as_str(),
            r.total_ticks,
            r.avg_evac_time().map(|t| format!("{t:.2}")).unwrap_or_else(|| "-".into()),
            r.left_behind,
        );
    }
    println!();
    println!("Output written to {OUTPUT_DIR}/");

    Ok(())
}

fn print_record(record: &RunRecord) {
    println!(
        "Run {} ended ({}) after {} ticks: {} out, {} left behind, average evacuation tick {}",
        record.run_index,
        record.termination,
        record.total_ticks,
        record.evacuated(),
        record.left_behind,
        record
            .avg_evac_time()
            .map(|t| format!("{t:.2}"))
            .unwrap_or_else(|| "-".into()),
    );
}
