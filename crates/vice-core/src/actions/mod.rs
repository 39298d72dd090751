//! Actions
//!
//! The read-only action catalog and the risk adjustment of action effects.

pub mod catalog;
pub mod risk;

pub use catalog::{Action, ActionCatalog, ActionKind, CatalogError, RiskProfile};
pub use risk::{adjust, risk_factor, StatDelta};
