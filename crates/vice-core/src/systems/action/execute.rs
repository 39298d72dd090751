//! Action Execution System
//!
//! Dispatches the chosen action to the gambling subsystem or to ordinary risk
//! adjustment, then applies the resulting delta with vitals and money clamped.

use rand::Rng;
use serde::{Deserialize, Serialize};
use vice_events::{AddictionKind, Vitals};

use crate::actions::{adjust, Action, StatDelta};
use crate::components::AgentState;
use crate::config::StatsConfig;
use crate::systems::debt::DebtLedger;
use crate::systems::gambling::{resolve_gamble, GambleOutcome};

/// What executing one action did to the agent
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExecutionOutcome {
    /// Delta applied before clamping
    pub delta: StatDelta,
    /// Present when the action was a gamble
    pub gamble: Option<GambleOutcome>,
    /// The agent was ruined by a refused loan
    pub ruined: bool,
}

/// Add `delta` to the agent, clamping vitals to the configured bounds and
/// money to zero from below
pub fn apply_delta(state: &mut AgentState, delta: &StatDelta, stats: &StatsConfig) {
    let vitals = &state.vitals;
    state.vitals = Vitals::new(
        vitals.energy.saturating_add(delta.energy),
        vitals.health.saturating_add(delta.health),
        vitals.happiness.saturating_add(delta.happiness),
    )
    .clamped(stats.min_value, stats.max_value);
    state.money = state.money.saturating_add(delta.money).max(0);
}

/// Execute `action` against the agent
pub fn execute_action<R: Rng + ?Sized>(
    action: &Action,
    state: &mut AgentState,
    ledger: &mut DebtLedger,
    risk_tolerance: f64,
    stats: &StatsConfig,
    rng: &mut R,
) -> ExecutionOutcome {
    if !action.is_gamble() {
        let delta = adjust(action, risk_tolerance);
        apply_delta(state, &delta, stats);
        return ExecutionOutcome {
            delta,
            gamble: None,
            ruined: false,
        };
    }

    let level = state.level(AddictionKind::Gambling);
    let outcome = resolve_gamble(state.money, risk_tolerance, level, ledger, rng);
    if outcome.is_ruin() {
        tracing::warn!(
            total_borrowed = ledger.total_borrowed(),
            total_debt = ledger.total_debt(),
            "Loan refused with an empty wallet; agent ruined"
        );
        state.ruin(stats);
    } else {
        apply_delta(state, &outcome.delta, stats);
    }

    ExecutionOutcome {
        delta: outcome.delta,
        gamble: Some(outcome),
        ruined: outcome.is_ruin(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::RiskProfile;
    use crate::systems::gambling::GambleResolution;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;
    use vice_events::AddictionMap;

    fn fresh_state(money: i64) -> AgentState {
        AgentState::new(money, &AddictionMap::default(), 1.0)
    }

    #[test]
    fn test_ordinary_action_applies_nominal_effects() {
        let mut state = fresh_state(100);
        let mut ledger = DebtLedger::new();
        let mut rng = SmallRng::seed_from_u64(1);
        let work = Action::new("Work", -4, -1, -2).with_money(300);

        let outcome = execute_action(&work, &mut state, &mut ledger, 0.0, &StatsConfig::default(), &mut rng);

        assert!(outcome.gamble.is_none());
        assert_eq!(state.vitals, Vitals::new(6, 4, 3));
        assert_eq!(state.money, 400);
    }

    #[test]
    fn test_vitals_and_money_clamped() {
        let mut state = fresh_state(10);
        let mut ledger = DebtLedger::new();
        let mut rng = SmallRng::seed_from_u64(1);
        let binge = Action::new("Binge", 100, -100, 0).with_money(-500);

        execute_action(&binge, &mut state, &mut ledger, 0.0, &StatsConfig::default(), &mut rng);

        assert_eq!(state.vitals, Vitals::new(50, 0, 5));
        assert_eq!(state.money, 0);
    }

    #[test]
    fn test_risk_profile_used_for_ordinary_actions() {
        let mut state = fresh_state(0);
        let mut ledger = DebtLedger::new();
        let mut rng = SmallRng::seed_from_u64(1);
        let invest = Action::new("Invest", 0, 0, 0).with_risk_profile(RiskProfile {
            base_money: -200,
            money_variance: 800,
            ..RiskProfile::default()
        });

        let outcome = execute_action(&invest, &mut state, &mut ledger, 1.0, &StatsConfig::default(), &mut rng);
        assert_eq!(outcome.delta.money, 600);
        assert_eq!(state.money, 600);
    }

    #[test]
    fn test_broke_gambler_borrows_instead_of_betting() {
        let mut state = fresh_state(0);
        let mut ledger = DebtLedger::new();
        let mut rng = SmallRng::seed_from_u64(1);
        let gamble = Action::new("Gamble", -2, 0, 4).as_gamble();

        let outcome = execute_action(&gamble, &mut state, &mut ledger, -1.0, &StatsConfig::default(), &mut rng);

        let Some(GambleOutcome { resolution: GambleResolution::LoanIssued { loan }, .. }) = outcome.gamble else {
            panic!("expected a loan");
        };
        assert_eq!(state.money, loan.principal);
        assert_eq!(state.vitals.happiness, 8);
        assert_eq!(state.vitals.energy, 10);
        assert_eq!(ledger.loan_count(), 1);
    }

    #[test]
    fn test_refused_loan_ruins_agent() {
        let mut state = fresh_state(0);
        let mut ledger = DebtLedger::new();
        ledger.issue(1.0);
        ledger.issue(1.0);
        let mut rng = SmallRng::seed_from_u64(1);
        let gamble = Action::new("Gamble", -2, 0, 4).as_gamble();

        let outcome = execute_action(&gamble, &mut state, &mut ledger, 1.0, &StatsConfig::default(), &mut rng);

        assert!(outcome.ruined);
        assert!(state.vitals.all_equal_to(0));
        assert_eq!(state.money, 0);
    }
}
