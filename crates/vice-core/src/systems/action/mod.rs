//! Action Systems
//!
//! Systems for candidate pool generation, weighting, selection, and execution.
//!
//! Each turn a handful of catalog actions is offered to the agent. Actions are
//! scored by how much they help the vitals that are currently lowest, plus a
//! money term that fades as the agent approaches its wealth target.

pub mod generate;
pub mod utility;
pub mod select;
pub mod execute;

pub use generate::generate_pool;
pub use utility::{score_pool, weighted_score};
pub use select::{select_action, select_random, select_rational, Selection, SCORE_TIE_TOLERANCE};
pub use execute::{apply_delta, execute_action, ExecutionOutcome};
