//! Agent State
//!
//! The single agent's vitals, money, addiction levels and per-turn history.
//! Created once per run and owned exclusively by the turn loop.

use serde::{Deserialize, Serialize};
use vice_events::{AddictionKind, AddictionMap, FinalState, TurnSnapshot, Vital, Vitals};

use crate::config::StatsConfig;

/// Vitals every run starts from
pub const STARTING_VITALS: Vitals = Vitals {
    energy: 10,
    health: 5,
    happiness: 5,
};

/// Consecutive turns each vital has spent at exactly zero
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ZeroTurnCounters {
    pub energy: u32,
    pub health: u32,
    pub happiness: u32,
}

impl ZeroTurnCounters {
    pub fn get(&self, vital: Vital) -> u32 {
        match vital {
            Vital::Energy => self.energy,
            Vital::Health => self.health,
            Vital::Happiness => self.happiness,
        }
    }

    pub fn get_mut(&mut self, vital: Vital) -> &mut u32 {
        match vital {
            Vital::Energy => &mut self.energy,
            Vital::Health => &mut self.health,
            Vital::Happiness => &mut self.happiness,
        }
    }
}

/// Mutable state of the simulated agent
#[derive(Debug, Clone, PartialEq)]
pub struct AgentState {
    pub vitals: Vitals,
    pub money: i64,
    /// Current level per addiction, always within [0, 1]
    pub addictions: AddictionMap<f64>,
    /// Level each addiction decays toward
    pub baselines: AddictionMap<f64>,
    pub zero_turns: ZeroTurnCounters,
    /// Turns since an action tagged for each kind was chosen
    pub turns_since_use: AddictionMap<u32>,
    pub history: Vec<TurnSnapshot>,
    pub addiction_history: AddictionMap<Vec<f64>>,
    pub override_counts: AddictionMap<u32>,
    pub terminated_by_event: bool,
}

impl AgentState {
    /// Fresh agent with addiction levels set to `base * predisposition`
    pub fn new(initial_money: i64, base_levels: &AddictionMap<f64>, predisposition: f64) -> Self {
        let baselines = base_levels.map(|_, &base| (base * predisposition).clamp(0.0, 1.0));

        Self {
            vitals: STARTING_VITALS,
            money: initial_money.max(0),
            addictions: baselines.clone(),
            baselines,
            zero_turns: ZeroTurnCounters::default(),
            turns_since_use: AddictionMap::default(),
            history: Vec::new(),
            addiction_history: AddictionMap::default(),
            override_counts: AddictionMap::default(),
            terminated_by_event: false,
        }
    }

    pub fn level(&self, kind: AddictionKind) -> f64 {
        self.addictions.value(kind)
    }

    /// Force every vital to the floor and the balance to zero
    pub fn ruin(&mut self, stats: &StatsConfig) {
        self.vitals = Vitals::uniform(stats.min_value);
        self.money = 0;
    }

    /// Append one level sample per addiction kind
    pub fn sample_addictions(&mut self) {
        for kind in AddictionKind::ALL {
            let level = self.level(kind);
            self.addiction_history.get_mut(kind).push(level);
        }
    }

    pub fn final_state(&self) -> FinalState {
        FinalState {
            vitals: self.vitals,
            money: self.money,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_scales_base_levels() {
        let base = AddictionMap {
            gambling: 0.425,
            alcohol: 0.1,
            shopping: 0.0,
            junk_food: 0.6,
        };
        let state = AgentState::new(1000, &base, 2.0);

        assert_eq!(state.vitals, STARTING_VITALS);
        assert_eq!(state.money, 1000);
        assert!((state.level(AddictionKind::Gambling) - 0.85).abs() < 1e-12);
        assert!((state.level(AddictionKind::Alcohol) - 0.2).abs() < 1e-12);
        // Scaled levels are capped at 1
        assert_eq!(state.level(AddictionKind::JunkFood), 1.0);
        assert_eq!(state.baselines, state.addictions);
    }

    #[test]
    fn test_ruin_zeroes_vitals_and_money() {
        let mut state = AgentState::new(500, &AddictionMap::default(), 1.0);
        state.ruin(&StatsConfig::default());
        assert!(state.vitals.all_equal_to(0));
        assert_eq!(state.money, 0);
    }

    #[test]
    fn test_ruin_respects_configured_floor() {
        let stats = StatsConfig {
            max_value: 50,
            min_value: 3,
        };
        let mut state = AgentState::new(500, &AddictionMap::default(), 1.0);
        state.ruin(&stats);
        assert!(state.vitals.all_equal_to(3));
        assert_eq!(state.money, 0);
    }

    #[test]
    fn test_sample_addictions_appends_one_per_kind() {
        let mut state = AgentState::new(0, &AddictionMap::splat(0.3), 1.0);
        state.sample_addictions();
        state.sample_addictions();
        for kind in AddictionKind::ALL {
            assert_eq!(state.addiction_history.get(kind), &vec![0.3, 0.3]);
        }
    }
}
