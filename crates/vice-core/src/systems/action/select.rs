//! Action Selection System
//!
//! Chooses between the highest-scoring candidate and a uniform pick, with the
//! agent's rationality as the probability of acting rationally.

use rand::Rng;
use vice_events::DecisionKind;

/// Scores closer than this are treated as tied
pub const SCORE_TIE_TOLERANCE: f64 = 1e-9;

/// Index into the pool and the rule that picked it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub index: usize,
    pub decision: DecisionKind,
}

/// Uniform pick among the candidates tied for the maximum score
pub fn select_rational<R: Rng + ?Sized>(scores: &[f64], rng: &mut R) -> Option<usize> {
    let best = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let tied: Vec<usize> = scores
        .iter()
        .enumerate()
        .filter(|&(_, &score)| best - score <= SCORE_TIE_TOLERANCE)
        .map(|(index, _)| index)
        .collect();

    if tied.is_empty() {
        return None;
    }
    Some(tied[rng.gen_range(0..tied.len())])
}

/// Uniform pick over the whole pool
pub fn select_random<R: Rng + ?Sized>(len: usize, rng: &mut R) -> Option<usize> {
    if len == 0 {
        return None;
    }
    Some(rng.gen_range(0..len))
}

/// Rational pick with probability `rationality`, random pick otherwise
pub fn select_action<R: Rng + ?Sized>(scores: &[f64], rationality: f64, rng: &mut R) -> Option<Selection> {
    if rng.gen::<f64>() < rationality {
        select_rational(scores, rng).map(|index| Selection {
            index,
            decision: DecisionKind::Rational,
        })
    } else {
        select_random(scores.len(), rng).map(|index| Selection {
            index,
            decision: DecisionKind::Random,
        })
    }
}
