//! Components
//!
//! Mutable per-run state owned by the turn loop.

pub mod agent;

pub use agent::{AgentState, ZeroTurnCounters, STARTING_VITALS};
