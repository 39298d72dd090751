//! Breakdown Penalties
//!
//! A vital stuck at zero damages the others, with severity growing
//! geometrically for every consecutive turn it stays there.

use serde::{Deserialize, Serialize};
use vice_events::{Vital, Vitals};

use crate::components::ZeroTurnCounters;
use crate::config::{BreakdownConfig, StatsConfig};

/// One penalty applied during a breakdown pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakdownPenalty {
    /// Vital sitting at zero
    pub source: Vital,
    pub turns_at_zero: u32,
    /// Amount subtracted from each affected vital
    pub amount: i32,
}

/// Vitals damaged when `source` is at zero
pub fn affected_vitals(source: Vital) -> &'static [Vital] {
    match source {
        Vital::Energy => &[Vital::Health, Vital::Happiness],
        Vital::Happiness => &[Vital::Health],
        Vital::Health => &[Vital::Energy, Vital::Happiness],
    }
}

/// `min(max_value, base * multiplier^(turns_at_zero - 1))`
pub fn breakdown_penalty(turns_at_zero: u32, breakdown: &BreakdownConfig, max_value: i32) -> i32 {
    let exponent = turns_at_zero.saturating_sub(1).min(i32::MAX as u32) as i32;
    let raw = breakdown.base_penalty as f64 * breakdown.multiplier.powi(exponent);
    raw.min(max_value as f64) as i32
}

/// Apply one pass of breakdown penalties.
///
/// Vitals are checked in energy, health, happiness order and each check sees
/// damage already dealt earlier in the pass. Counters of non-zero vitals reset.
pub fn apply_penalties(
    vitals: Vitals,
    counters: &mut ZeroTurnCounters,
    breakdown: &BreakdownConfig,
    stats: &StatsConfig,
) -> (Vitals, Vec<BreakdownPenalty>) {
    let mut result = vitals;
    let mut applied = Vec::new();

    for source in Vital::ALL {
        let counter = counters.get_mut(source);
        if result.get(source) != stats.min_value {
            *counter = 0;
            continue;
        }

        *counter += 1;
        let amount = breakdown_penalty(*counter, breakdown, stats.max_value);
        for &target in affected_vitals(source) {
            let reduced = (result.get(target) - amount).max(stats.min_value);
            result.set(target, reduced);
        }
        applied.push(BreakdownPenalty {
            source,
            turns_at_zero: *counter,
            amount,
        });
    }

    (result, applied)
}
