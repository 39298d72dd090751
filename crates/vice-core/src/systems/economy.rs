//! Economy Weighting
//!
//! How strongly money changes factor into decisions. The agent cares most
//! about earning when broke and becomes nearly indifferent near its target.

use crate::actions::Action;
use crate::config::EconomyConfig;

/// Floor of the money factor once wealth reaches the target
pub const MIN_MONEY_FACTOR: f64 = 0.1;

/// Interest in further earnings, from 1.0 at zero money down to 0.1 at the target
pub fn money_factor(current_money: i64, economy: &EconomyConfig) -> f64 {
    if economy.target_money <= 0.0 || current_money as f64 >= economy.target_money {
        return MIN_MONEY_FACTOR;
    }

    let factor = 1.0 - (current_money as f64 / economy.target_money) * 0.9;
    factor.max(MIN_MONEY_FACTOR)
}

/// Weighted contribution of the action's money effect to its score
pub fn money_weight(action: &Action, current_money: i64, economy: &EconomyConfig) -> f64 {
    money_factor(current_money, economy) * action.money as f64 * economy.money_weight
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_factor_endpoints() {
        let economy = EconomyConfig::default();
        assert_eq!(money_factor(0, &economy), 1.0);
        assert!((money_factor(5000, &economy) - 0.1).abs() < 1e-12);
        assert_eq!(money_factor(20_000, &economy), 0.1);
    }

    #[test]
    fn test_money_factor_decays_linearly() {
        let economy = EconomyConfig::default();
        // 1 - 0.5 * 0.9 = 0.55
        assert!((money_factor(2500, &economy) - 0.55).abs() < 1e-12);
        assert!(money_factor(1000, &economy) > money_factor(2000, &economy));
    }

    #[test]
    fn test_money_factor_is_pure() {
        let economy = EconomyConfig::default();
        assert_eq!(money_factor(1234, &economy), money_factor(1234, &economy));
    }

    #[test]
    fn test_money_weight_scales_with_delta() {
        let economy = EconomyConfig::default();
        let work = Action::new("Work", -4, -1, -2).with_money(300);
        // 1.0 * 300 * 0.4 = 120
        assert!((money_weight(&work, 0, &economy) - 120.0).abs() < 1e-9);
        // 0.1 * 300 * 0.4 = 12
        assert!((money_weight(&work, 10_000, &economy) - 12.0).abs() < 1e-9);

        let sleep = Action::new("Sleep", 8, 2, 1);
        assert_eq!(money_weight(&sleep, 0, &economy), 0.0);
    }
}
