//! `ev-vote` — turning members' exit preferences into one shared exit.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                |
//! |-----------------|---------------------------------------------------------|
//! | [`ballot`]      | `ExitBallot` (one voter's exits, nearest first), `VoteParams` |
//! | [`plurality`]   | One sampled vote per voter, weight ∝ (1/d)^α            |
//! | [`approval`]    | Approve every exit within `threshold × nearest`         |
//! | [`cumulative`]  | Spread a point budget proportionally to 1/d             |
//! | [`tally`]       | Score accumulation and the lowest-cell tie-break        |
//! | [`group`]       | `elect` dispatch and `vote_group` (writes the result)   |
//!
//! # Determinism
//!
//! Only plurality draws random numbers, and only from the `SimRng` passed in.
//! Scores are accumulated in a `BTreeMap<Cell, _>` so the winner among equal
//! scores is always the lowest cell.

pub mod approval;
pub mod ballot;
pub mod cumulative;
pub mod group;
pub mod plurality;
pub mod tally;


pub use ballot::{ExitBallot, VoteParams};
pub use group::{elect, vote_group};
