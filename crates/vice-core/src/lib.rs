//! Vice Simulation Engine
//!
//! A single agent in a turn-based survival economy, choosing actions under a
//! blend of rational optimization and random noise while developing and
//! recovering from addictions and debt.

pub mod actions;
pub mod batch;
pub mod components;
pub mod config;
pub mod events;
pub mod simulation;
pub mod systems;

pub use actions::{Action, ActionCatalog, ActionKind, CatalogError, RiskProfile, StatDelta};
pub use batch::{run_batch, seed_range};
pub use components::AgentState;
pub use config::{ConfigError, SimConfig};
pub use events::{EventContext, EventOutcome, EventRegistry, SimEvent};
pub use simulation::{run_simulation, Simulation, SimulationParams, TurnRecord};
pub use systems::DebtLedger;
