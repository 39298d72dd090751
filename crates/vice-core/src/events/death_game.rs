//! Death Game
//!
//! A gamble can rarely turn into an all-or-nothing death game. A fair coin
//! decides between losing everything and a jackpot; either way the run ends.

use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};
use vice_events::Vitals;

use super::{EventContext, EventOutcome, SimEvent};
use crate::actions::risk_factor;
use crate::config::EventConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeathGameResult {
    TotalLoss,
    Jackpot,
}

/// Death game event, scaled by risk tolerance between `min_chance` and `max_chance`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeathGame {
    pub min_chance: f64,
    pub max_chance: f64,
}

impl DeathGame {
    pub const NAME: &'static str = "Death Game";

    pub fn from_config(config: &EventConfig) -> Self {
        Self {
            min_chance: config.death_game_min_chance,
            max_chance: config.death_game_max_chance,
        }
    }
}

impl Default for DeathGame {
    fn default() -> Self {
        Self::from_config(&EventConfig::default())
    }
}

impl SimEvent for DeathGame {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn matches(&self, ctx: &EventContext<'_>) -> bool {
        ctx.action.is_gamble()
    }

    fn trigger_probability(&self, ctx: &EventContext<'_>) -> f64 {
        self.min_chance + (self.max_chance - self.min_chance) * risk_factor(ctx.risk_tolerance)
    }

    fn execute(&self, ctx: &EventContext<'_>, rng: &mut dyn RngCore) -> EventOutcome {
        let result = if rng.gen_bool(0.5) {
            DeathGameResult::TotalLoss
        } else {
            DeathGameResult::Jackpot
        };

        let (vitals, description) = match result {
            DeathGameResult::TotalLoss => (
                Vitals::uniform(ctx.stats.min_value),
                "The death game ended in catastrophic loss",
            ),
            DeathGameResult::Jackpot => (
                Vitals::uniform(ctx.stats.max_value),
                "The death game ended in an incredible win",
            ),
        };

        EventOutcome {
            event: Self::NAME.to_string(),
            description: description.to_string(),
            vitals: Some(vitals),
            terminal: true,
        }
    }
}
