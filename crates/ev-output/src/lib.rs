//! `ev-output` — run result writers for the `rust_evac` simulator.
//!
//! | Backend          | Files created                          |
//! |------------------|----------------------------------------|
//! | [`CsvWriter`]    | `runs.csv`, `evacuations.csv`          |
//! | [`JsonLogWriter`]| one JSON run log (settings + runs)     |
//!
//! Both implement [`OutputWriter`] and can be driven by
//! [`RunOutputObserver`], which implements `ev_sim::SimObserver`, or fed a
//! finished batch with [`write_batch`].
//!
//! # Usage
//!
//! ```rust,ignore
//! use ev_output::{CsvWriter, RunOutputObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output")).unwrap();
//! let mut obs = RunOutputObserver::new(writer);
//! sim.run(&mut obs).unwrap();
//! obs.take_error().map(|e| eprintln!("output error: {e}"));
//! ```

pub mod csv;
pub mod error;
pub mod json;
pub mod observer;
pub mod row;
pub mod writer;


pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use json::JsonLogWriter;
pub use observer::RunOutputObserver;
pub use row::{EvacuationRow, RunSummaryRow};
pub use writer::{OutputWriter, write_batch};
