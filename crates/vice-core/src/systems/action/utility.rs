//! Action Utility Calculation
//!
//! Need-weighted scoring of candidate actions. Each vital contributes its
//! effect scaled by how depleted that vital is:
//! - A vital at zero weighs its effect fully
//! - A vital at the ceiling ignores its effect
//!
//! Money is weighted separately by the economy system.

use vice_events::{Vital, Vitals};

use crate::actions::Action;
use crate::config::{EconomyConfig, StatsConfig};
use crate::systems::economy::money_weight;

fn effect(action: &Action, vital: Vital) -> i32 {
    match vital {
        Vital::Energy => action.energy,
        Vital::Health => action.health,
        Vital::Happiness => action.happiness,
    }
}

/// `Σ (1 - v/max) * effect + money_weight` over the three vitals
pub fn weighted_score(
    action: &Action,
    vitals: &Vitals,
    money: i64,
    stats: &StatsConfig,
    economy: &EconomyConfig,
) -> f64 {
    let max = stats.max_value as f64;
    let need_score: f64 = Vital::ALL
        .iter()
        .map(|&vital| (1.0 - vitals.get(vital) as f64 / max) * effect(action, vital) as f64)
        .sum();

    need_score + money_weight(action, money, economy)
}

/// Score every action in the pool, in pool order
pub fn score_pool(
    pool: &[&Action],
    vitals: &Vitals,
    money: i64,
    stats: &StatsConfig,
    economy: &EconomyConfig,
) -> Vec<f64> {
    pool.iter()
        .map(|action| weighted_score(action, vitals, money, stats, economy))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_depleted_vitals_weigh_more() {
        let stats = StatsConfig::default();
        let economy = EconomyConfig::default();
        let sleep = Action::new("Sleep", 8, 2, 1);

        let tired = weighted_score(&sleep, &Vitals::new(0, 25, 25), 0, &stats, &economy);
        let rested = weighted_score(&sleep, &Vitals::new(50, 25, 25), 0, &stats, &economy);

        // 8 * 1.0 + 2 * 0.5 + 1 * 0.5
        assert!((tired - 9.5).abs() < 1e-12);
        // 8 * 0.0 + 2 * 0.5 + 1 * 0.5
        assert!((rested - 1.5).abs() < 1e-12);
    }

    #[test]
    fn test_money_term_included() {
        let stats = StatsConfig::default();
        let economy = EconomyConfig::default();
        let work = Action::new("Work", 0, 0, 0).with_money(300);

        let broke = weighted_score(&work, &Vitals::uniform(50), 0, &stats, &economy);
        let rich = weighted_score(&work, &Vitals::uniform(50), 10_000, &stats, &economy);

        assert!((broke - 120.0).abs() < 1e-9);
        assert!((rich - 12.0).abs() < 1e-9);
    }

    #[test]
    fn test_score_pool_preserves_order() {
        let stats = StatsConfig::default();
        let economy = EconomyConfig::default();
        let a = Action::new("A", 1, 0, 0);
        let b = Action::new("B", 0, 0, 10);
        let pool = vec![&a, &b];

        let scores = score_pool(&pool, &Vitals::uniform(0), 0, &stats, &economy);
        assert_eq!(scores, vec![1.0, 10.0]);
    }
}
