//! Shared data types for the vice simulation.
//!
//! This crate contains pure data structures with no simulation logic.
//! The engine (`vice-core`) produces these types and any analysis or
//! presentation layer consumes them.

pub mod addiction;
pub mod report;
pub mod snapshot;
pub mod vitals;

// Re-export addiction types
pub use addiction::{AddictionKind, AddictionMap, ToleranceZone};

// Re-export vital types
pub use vitals::{Vital, Vitals};

// Re-export snapshot types
pub use snapshot::{DecisionKind, FinalState, TurnSnapshot};

// Re-export report types
pub use report::{DebtSummary, RunState, SimulationReport};
