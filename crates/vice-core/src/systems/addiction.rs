//! Addiction System
//!
//! Per-kind addiction levels in [0, 1]: biasing the candidate pool toward
//! addictive actions, compulsive overrides of the normal decision rule,
//! tolerance-damped growth, and decay back toward baseline.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use vice_events::{AddictionKind, AddictionMap, ToleranceZone};

use crate::actions::{Action, ActionCatalog};
use crate::components::AgentState;

/// Addiction constants
pub mod addiction_constants {
    /// Level above which the pool starts being biased
    pub const BIAS_THRESHOLD: f64 = 0.3;
    /// Width of the band over which bias probability ramps to 1
    pub const BIAS_RAMP: f64 = 0.4;
    /// Level at which an override fires whenever it can
    pub const COMPULSION_THRESHOLD: f64 = 0.95;
    /// Growth multiplier in the medium tolerance zone
    pub const MEDIUM_ZONE_DAMPING: f64 = 0.5;
    /// Growth multiplier in the high tolerance zone
    pub const HIGH_ZONE_DAMPING: f64 = 0.2;
    /// Fraction of the excess over baseline shed per decaying turn
    pub const DECAY_RATE: f64 = 0.1;
    /// Turns without use before decay begins
    pub const DECAY_GRACE_TURNS: u32 = 1;
}

use addiction_constants::*;

/// An addictive action forced into the pool
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoolInjection {
    pub kind: AddictionKind,
    pub action: String,
    /// Pool slot that was replaced
    pub slot: usize,
}

/// A kind whose override fired, paired with the action it would force
#[derive(Debug, Clone, Copy)]
pub struct OverrideTrigger<'a> {
    pub kind: AddictionKind,
    pub action: &'a Action,
}

/// Chance that a pool lacking an action for this addiction gets one injected
pub fn bias_probability(level: f64) -> f64 {
    if level <= BIAS_THRESHOLD {
        return 0.0;
    }
    ((level - BIAS_THRESHOLD) / BIAS_RAMP).min(1.0)
}

/// Bias the candidate pool toward addictions above the bias threshold.
///
/// For each such addiction with no tagged action in the pool, roll against
/// its bias probability and on success overwrite a random slot with a random
/// tagged action from the catalog.
pub fn bias_pool<'a, R: Rng + ?Sized>(
    pool: &mut [&'a Action],
    levels: &AddictionMap<f64>,
    catalog: &'a ActionCatalog,
    rng: &mut R,
) -> Vec<PoolInjection> {
    let mut injections = Vec::new();
    if pool.is_empty() {
        return injections;
    }

    for (kind, &level) in levels.iter() {
        if level <= BIAS_THRESHOLD {
            continue;
        }
        if pool.iter().any(|a| a.is_tagged(kind)) {
            continue;
        }
        if rng.gen::<f64>() >= bias_probability(level) {
            continue;
        }

        let candidates: Vec<&'a Action> = catalog.tagged(kind).collect();
        if let Some(&forced) = candidates.choose(rng) {
            let slot = rng.gen_range(0..pool.len());
            pool[slot] = forced;
            injections.push(PoolInjection {
                kind,
                action: forced.name.clone(),
                slot,
            });
        }
    }

    injections
}

/// Collect every addiction whose override fires this turn.
///
/// At or above the compulsion threshold an override fires whenever the pool
/// holds a tagged action; below it, with probability equal to the level. A
/// firing kind with no tagged action in the pool is dropped silently.
pub fn check_overrides<'a, R: Rng + ?Sized>(
    levels: &AddictionMap<f64>,
    pool: &[&'a Action],
    rng: &mut R,
) -> Vec<OverrideTrigger<'a>> {
    let mut triggered = Vec::new();

    for (kind, &level) in levels.iter() {
        let fires = level >= COMPULSION_THRESHOLD || rng.gen::<f64>() < level;
        if !fires {
            continue;
        }

        let addictive: Vec<&'a Action> = pool.iter().copied().filter(|a| a.is_tagged(kind)).collect();
        if let Some(&action) = addictive.choose(rng) {
            triggered.push(OverrideTrigger { kind, action });
        }
    }

    triggered
}

/// Pick one of several simultaneous overrides uniformly
pub fn select_override<'a, R: Rng + ?Sized>(
    triggered: &[OverrideTrigger<'a>],
    rng: &mut R,
) -> Option<OverrideTrigger<'a>> {
    triggered.choose(rng).copied()
}

/// Growth from an override, damped by the current tolerance zone
pub fn tolerance_increase(level: f64, base_increase: f64) -> f64 {
    let damping = match ToleranceZone::of(level) {
        ToleranceZone::High => (1.0 - (level - 0.7) / 0.3) * HIGH_ZONE_DAMPING,
        ToleranceZone::Medium => (1.0 - (level - 0.4) / 0.6) * MEDIUM_ZONE_DAMPING,
        ToleranceZone::Low => 1.0,
    };
    (base_increase * damping).max(0.0)
}

fn raise(state: &mut AgentState, kind: AddictionKind, increase: f64) {
    let level = state.addictions.get_mut(kind);
    *level = (*level + increase.max(0.0)).min(1.0);
}

/// Apply an override: tolerance-damped growth for the overriding kind, raw
/// growth for any other kind the action is tagged for. Returns the kinds used.
pub fn record_override(state: &mut AgentState, trigger: &OverrideTrigger<'_>) -> AddictionMap<bool> {
    *state.override_counts.get_mut(trigger.kind) += 1;

    let mut used = AddictionMap::splat(false);
    for kind in AddictionKind::ALL {
        let base_increase = trigger.action.addiction_increment(kind);
        if kind == trigger.kind {
            let increase = tolerance_increase(state.level(kind), base_increase);
            raise(state, kind, increase);
        } else if base_increase > 0.0 {
            raise(state, kind, base_increase);
        } else {
            continue;
        }
        *used.get_mut(kind) = true;
        *state.turns_since_use.get_mut(kind) = 0;
    }

    used
}

/// Apply a normally chosen action: raw growth for every tagged kind.
/// Returns the kinds used.
pub fn record_choice(state: &mut AgentState, action: &Action) -> AddictionMap<bool> {
    let mut used = AddictionMap::splat(false);
    for kind in AddictionKind::ALL {
        let increment = action.addiction_increment(kind);
        if increment > 0.0 {
            raise(state, kind, increment);
            *used.get_mut(kind) = true;
            *state.turns_since_use.get_mut(kind) = 0;
        }
    }
    used
}

/// Decay every addiction not used this turn toward its baseline
pub fn apply_decay(state: &mut AgentState, used: &AddictionMap<bool>) {
    for kind in AddictionKind::ALL {
        if used.value(kind) {
            continue;
        }

        let gap = state.turns_since_use.get_mut(kind);
        *gap = gap.saturating_add(1);
        if *gap <= DECAY_GRACE_TURNS {
            continue;
        }

        let baseline = state.baselines.value(kind);
        let level = state.addictions.get_mut(kind);
        if *level > baseline {
            *level = (*level - DECAY_RATE * (*level - baseline)).max(baseline);
        }
    }
}
