//! `ev-negotiate` — contract-net pairing of dependents with helpers.
//!
//! # Protocol (one round)
//!
//! For every dependent that is immobile and unpaired, in registry order:
//!
//! 1. **Choose an exit.**  The dependent samples one exit from its own ballot,
//!    exactly as a single plurality voter would.
//! 2. **Call for proposals.**  Every unpaired helper within `call_radius`
//!    walking steps of the dependent is a candidate.
//! 3. **Bid.**  A candidate bids its distance to the dependent (`Dm`) if it is
//!    willing:
//!
//!    ```text
//!    (1 − M) × (Dm / 2 + Dme) ≤ Dce / 2
//!    ```
//!
//!    `M` is the helper's willingness, `Dme` the dependent's distance to its
//!    exit, `Dce` the helper's distance to its own exit (its target if set,
//!    otherwise its nearest).
//! 4. **Award.**  The lowest bid wins, ties to the lowest occupant id.  The two
//!    become a pair heading for the dependent's exit at `paired_speed`.
//!
//! A dependent without an award stays where it is and calls again next round.
//! A helper paired earlier in the round is no longer a candidate.
//!
//! # Crate layout
//!
//! | Module         | Contents                                               |
//! |----------------|--------------------------------------------------------|
//! | [`contract`]   | `is_willing`, `call_for_proposals`, `Award`             |
//! | [`round`]      | `NegotiationParams`, `negotiate` (one full round)       |

pub mod contract;
pub mod round;

#[cfg(test)]
mod tests;

pub use contract::{Award, call_for_proposals, is_willing};
pub use round::{NegotiationParams, negotiate};
