//! Snapshot Types
//!
//! Per-turn records of the agent's state, appended once per completed turn.

use serde::{Deserialize, Serialize};

use crate::{AddictionKind, Vitals};

/// How the turn's action was chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum DecisionKind {
    /// Highest weighted score in the pool
    Rational,
    /// Uniform pick from the pool
    Random,
    /// Forced by an addiction
    Override { addiction: AddictionKind },
}

impl DecisionKind {
    pub fn is_override(&self) -> bool {
        matches!(self, DecisionKind::Override { .. })
    }
}

/// Agent state after one completed turn
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurnSnapshot {
    /// 1-based turn number
    pub turn: u32,
    #[serde(flatten)]
    pub vitals: Vitals,
    pub money: i64,
    /// Name of the action taken this turn
    pub action: String,
    pub decision: DecisionKind,
}

/// Vitals and money at the end of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FinalState {
    #[serde(flatten)]
    pub vitals: Vitals,
    pub money: i64,
}
