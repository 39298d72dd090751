//! Risk Adjustment
//!
//! Maps an action's nominal effect and the agent's risk tolerance to concrete
//! stat deltas. Actions without a risk profile pass through unchanged.

use serde::{Deserialize, Serialize};

use super::catalog::Action;

/// Concrete change to vitals and money produced by one action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StatDelta {
    pub energy: i32,
    pub health: i32,
    pub happiness: i32,
    pub money: i64,
}

/// Convert a risk tolerance in [-1, 1] to a factor in [0, 1]
pub fn risk_factor(risk_tolerance: f64) -> f64 {
    ((risk_tolerance + 1.0) / 2.0).clamp(0.0, 1.0)
}

/// Risk-adjusted effect of `action` for an agent with `risk_tolerance`.
///
/// With a risk profile each field becomes `base + variance * risk_factor`,
/// truncated toward zero. Higher tolerance moves every field toward its
/// variance-extended value and never past it.
pub fn adjust(action: &Action, risk_tolerance: f64) -> StatDelta {
    let Some(profile) = &action.risk_profile else {
        return action.nominal_delta();
    };

    let factor = risk_factor(risk_tolerance);
    let spread = |base: i32, variance: i32| (base as f64 + variance as f64 * factor) as i32;

    StatDelta {
        energy: spread(profile.base_energy, profile.energy_variance),
        health: spread(profile.base_health, profile.health_variance),
        happiness: spread(profile.base_happiness, profile.happiness_variance),
        money: (profile.base_money as f64 + profile.money_variance as f64 * factor) as i64,
    }
}
