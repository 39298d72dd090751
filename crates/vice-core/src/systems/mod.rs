//! Simulation Systems
//!
//! Per-turn systems for action choice, economy weighting, breakdown penalties, addiction, gambling and debt.

pub mod action;
pub mod addiction;
pub mod debt;
pub mod economy;
pub mod gambling;
pub mod penalty;

// Re-export commonly used systems
pub use action::{
    apply_delta, execute_action, generate_pool, score_pool, select_action, select_random, select_rational,
    weighted_score, ExecutionOutcome, Selection,
};
pub use addiction::{
    apply_decay, bias_pool, bias_probability, check_overrides, record_choice, record_override, select_override,
    tolerance_increase, OverrideTrigger, PoolInjection,
};
pub use debt::{DebtLedger, Loan, LoanTier, ServicingReport};
pub use economy::{money_factor, money_weight};
pub use gambling::{bet_parameters, choose_tier, resolve_gamble, BetParameters, BetTier, GambleOutcome, GambleResolution};
pub use penalty::{apply_penalties, breakdown_penalty, BreakdownPenalty};
