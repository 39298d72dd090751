//! Run Report Types
//!
//! Everything a finished simulation hands to analysis and presentation layers.

use serde::{Deserialize, Serialize};

use crate::{AddictionMap, FinalState, TurnSnapshot};

/// Turn loop state. Every variant except `Running` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunState {
    Running,
    /// All vitals reached zero (including ruin and loan default)
    EndedByVitalCollapse,
    /// All vitals reached the ceiling in the same turn
    EndedByVitalCeiling,
    /// A terminal event fired
    EndedByEvent,
    /// The step budget ran out
    EndedByStepLimit,
}

impl RunState {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, RunState::Running)
    }
}

/// Debt ledger totals at the end of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DebtSummary {
    /// Outstanding repayable amount
    pub total_debt: i64,
    /// Cumulative principal ever borrowed
    pub total_borrowed: i64,
    /// Loans still on the ledger
    pub active_loans: u32,
    /// Loans ever issued
    pub loans_taken: u32,
    /// A loan came due without sufficient funds
    pub defaulted: bool,
    /// A loan was refused because a borrowing ceiling was reached
    pub refused: bool,
}

/// Complete result of one simulation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationReport {
    pub seed: u64,
    pub final_state: FinalState,
    pub outcome: RunState,
    /// One snapshot per completed turn
    pub history: Vec<TurnSnapshot>,
    pub rational_choices: u32,
    pub random_choices: u32,
    /// Chosen action names, present only when recording was requested
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chosen_actions: Option<Vec<String>>,
    pub override_counts: AddictionMap<u32>,
    /// One level sample per kind per completed turn
    pub addiction_levels: AddictionMap<Vec<f64>>,
    pub terminated_by_event: bool,
    /// Name of the event that ended the run, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub terminal_event: Option<String>,
    pub debt: DebtSummary,
}

impl SimulationReport {
    pub fn turns_played(&self) -> usize {
        self.history.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_states() {
        assert!(!RunState::Running.is_terminal());
        assert!(RunState::EndedByEvent.is_terminal());
        assert!(RunState::EndedByStepLimit.is_terminal());
    }

    #[test]
    fn test_run_state_serializes_snake_case() {
        let json = serde_json::to_string(&RunState::EndedByVitalCeiling).unwrap();
        assert_eq!(json, "\"ended_by_vital_ceiling\"");
    }
}
