//! Rare Events
//!
//! Condition-gated stochastic events checked once per turn after the chosen
//! action has been applied. Events are trait objects held in a registry, so
//! new ones are added by registering them rather than by editing the turn loop.

pub mod death_game;

use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};
use vice_events::Vitals;

use crate::actions::Action;
use crate::config::{EventConfig, StatsConfig};

pub use death_game::{DeathGame, DeathGameResult};

/// Read-only view of the turn handed to events
#[derive(Debug, Clone, Copy)]
pub struct EventContext<'a> {
    pub turn: u32,
    /// Action taken this turn
    pub action: &'a Action,
    pub vitals: Vitals,
    pub money: i64,
    pub risk_tolerance: f64,
    pub stats: &'a StatsConfig,
}

/// What a fired event did
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventOutcome {
    pub event: String,
    pub description: String,
    /// Replacement vitals, if the event overrides them
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vitals: Option<Vitals>,
    /// Ends the run
    pub terminal: bool,
}

/// A rare event
pub trait SimEvent {
    fn name(&self) -> &str;

    /// Whether the event can fire this turn at all
    fn matches(&self, ctx: &EventContext<'_>) -> bool;

    /// Chance of firing on a matching turn
    fn trigger_probability(&self, ctx: &EventContext<'_>) -> f64;

    fn execute(&self, ctx: &EventContext<'_>, rng: &mut dyn RngCore) -> EventOutcome;
}

/// Ordered set of events checked each turn
#[derive(Default)]
pub struct EventRegistry {
    events: Vec<Box<dyn SimEvent + Send + Sync>>,
}

impl EventRegistry {
    /// Empty registry; no event ever fires
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every built-in event
    pub fn from_config(config: &EventConfig) -> Self {
        Self::new().with_event(DeathGame::from_config(config))
    }

    pub fn with_event(mut self, event: impl SimEvent + Send + Sync + 'static) -> Self {
        self.register(event);
        self
    }

    pub fn register(&mut self, event: impl SimEvent + Send + Sync + 'static) {
        self.events.push(Box::new(event));
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.events.iter().map(|e| e.name())
    }

    /// Check events in registration order and return every one that fired.
    ///
    /// Checking stops at the first terminal event.
    pub fn check<R: RngCore>(&self, ctx: &EventContext<'_>, rng: &mut R) -> Vec<EventOutcome> {
        let mut fired = Vec::new();

        for event in &self.events {
            if !event.matches(ctx) {
                continue;
            }
            let probability = event.trigger_probability(ctx).clamp(0.0, 1.0);
            if rng.gen::<f64>() >= probability {
                continue;
            }

            let outcome = event.execute(ctx, rng);
            tracing::info!(event = %outcome.event, turn = ctx.turn, "{}", outcome.description);
            let terminal = outcome.terminal;
            fired.push(outcome);
            if terminal {
                break;
            }
        }

        fired
    }
}

impl std::fmt::Debug for EventRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}
