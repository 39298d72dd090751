//! Gambling System
//!
//! Resolves the gamble action: bet profile selection, parameter interpolation,
//! payout, and falling back to the debt ledger when the agent is broke.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::actions::{risk_factor, StatDelta};

use super::debt::{DebtLedger, Loan};

/// Gambling constants
pub mod gambling_constants {
    /// Energy spent on every bet
    pub const BET_ENERGY_COST: i32 = 2;
    /// Happiness lost on every losing bet
    pub const LOSS_HAPPINESS_PENALTY: i32 = 2;
    /// Happiness granted for trying to gamble with an empty wallet
    pub const LOAN_ATTEMPT_HAPPINESS: i32 = 3;
    /// Below this balance a high-risk gambler goes all in
    pub const SMALL_STAKE_THRESHOLD: i64 = 100;
    /// How strongly addiction pushes toward riskier profiles
    pub const ADDICTION_RISK_WEIGHT: f64 = 0.5;
    /// Bets are rounded to this currency unit
    pub const BET_ROUNDING: f64 = 10.0;
}

use gambling_constants::*;

/// Named risk/reward template for a bet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BetTier {
    Low,
    Medium,
    High,
}

/// Parameter ranges for one bet tier
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BetProfile {
    pub min_chance: f64,
    pub max_chance: f64,
    pub min_payout: f64,
    pub max_payout: f64,
    pub min_bet_pct: f64,
    pub max_bet_pct: f64,
    /// Energy boost on a win
    pub win_energy: i32,
    /// Happiness boost on a win
    pub win_happiness: i32,
}

impl BetTier {
    pub fn profile(&self) -> BetProfile {
        match self {
            BetTier::Low => BetProfile {
                min_chance: 0.60,
                max_chance: 0.75,
                min_payout: 1.2,
                max_payout: 1.5,
                min_bet_pct: 0.02,
                max_bet_pct: 0.10,
                win_energy: 1,
                win_happiness: 4,
            },
            BetTier::Medium => BetProfile {
                min_chance: 0.25,
                max_chance: 0.40,
                min_payout: 2.0,
                max_payout: 3.0,
                min_bet_pct: 0.10,
                max_bet_pct: 0.30,
                win_energy: 2,
                win_happiness: 6,
            },
            BetTier::High => BetProfile {
                min_chance: 0.05,
                max_chance: 0.15,
                min_payout: 5.0,
                max_payout: 10.0,
                min_bet_pct: 0.30,
                max_bet_pct: 0.90,
                win_energy: 4,
                win_happiness: 10,
            },
        }
    }
}

/// Pick a bet tier; addiction pushes the agent toward bigger risks
pub fn choose_tier(risk_tolerance: f64, addiction_level: f64) -> BetTier {
    let effective = (risk_tolerance + addiction_level * ADDICTION_RISK_WEIGHT).clamp(-1.0, 1.0);

    if effective < -0.3 {
        BetTier::Low
    } else if effective < 0.3 {
        BetTier::Medium
    } else {
        BetTier::High
    }
}

/// Concrete terms of one bet
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BetParameters {
    pub tier: BetTier,
    pub win_chance: f64,
    pub payout: f64,
    pub bet: i64,
    /// All-in with a tiny balance
    pub desperate: bool,
}

/// Interpolate bet terms within the tier's ranges.
///
/// Higher risk tolerance lowers the win chance and raises the payout. Bet
/// size grows with both risk tolerance and addiction and is rounded to the
/// nearest 10 (halves to even), never exceeding the balance.
pub fn bet_parameters(tier: BetTier, risk_tolerance: f64, addiction_level: f64, money: i64) -> BetParameters {
    let profile = tier.profile();
    let money = money.max(0);

    if tier == BetTier::High && money < SMALL_STAKE_THRESHOLD {
        return BetParameters {
            tier,
            win_chance: profile.min_chance,
            payout: profile.max_payout,
            bet: money,
            desperate: true,
        };
    }

    let factor = risk_factor(risk_tolerance);
    let win_chance = profile.min_chance + (profile.max_chance - profile.min_chance) * (1.0 - factor);
    let payout = profile.min_payout + (profile.max_payout - profile.min_payout) * factor;

    let base_pct = profile.min_bet_pct + (profile.max_bet_pct - profile.min_bet_pct) * factor;
    let final_pct = (base_pct * (1.0 + addiction_level)).min(1.0);
    let bet = ((money as f64 * final_pct / BET_ROUNDING).round_ties_even() * BET_ROUNDING) as i64;

    BetParameters {
        tier,
        win_chance,
        payout,
        bet: bet.min(money),
        desperate: false,
    }
}

/// How a gamble turn was resolved
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "resolution", rename_all = "snake_case")]
pub enum GambleResolution {
    /// A bet was placed
    Bet {
        params: BetParameters,
        won: bool,
        /// Winnings minus stake
        net: i64,
    },
    /// The agent was broke and borrowed instead of betting
    LoanIssued { loan: Loan },
    /// The agent was broke and no lender would extend credit
    Ruined,
}

/// Result of a gamble turn
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GambleOutcome {
    pub delta: StatDelta,
    pub resolution: GambleResolution,
}

impl GambleOutcome {
    pub fn is_ruin(&self) -> bool {
        matches!(self.resolution, GambleResolution::Ruined)
    }
}

/// Resolve a gamble with the agent's current balance.
///
/// With exactly zero money no bet is placed: a loan is requested and the
/// attempt still grants a small happiness bonus. A refused loan is ruin.
pub fn resolve_gamble<R: Rng + ?Sized>(
    money: i64,
    risk_tolerance: f64,
    addiction_level: f64,
    ledger: &mut DebtLedger,
    rng: &mut R,
) -> GambleOutcome {
    if money <= 0 {
        return match ledger.issue(risk_factor(risk_tolerance)) {
            Some(loan) => GambleOutcome {
                delta: StatDelta {
                    happiness: LOAN_ATTEMPT_HAPPINESS,
                    money: loan.principal,
                    ..StatDelta::default()
                },
                resolution: GambleResolution::LoanIssued { loan },
            },
            None => GambleOutcome {
                delta: StatDelta::default(),
                resolution: GambleResolution::Ruined,
            },
        };
    }

    let tier = choose_tier(risk_tolerance, addiction_level);
    let params = bet_parameters(tier, risk_tolerance, addiction_level, money);
    let profile = tier.profile();

    let won = rng.gen::<f64>() < params.win_chance;
    let mut delta = StatDelta {
        energy: -BET_ENERGY_COST,
        ..StatDelta::default()
    };

    let net = if won {
        let winnings = (params.bet as f64 * params.payout).floor() as i64;
        delta.energy += profile.win_energy;
        delta.happiness += profile.win_happiness;
        winnings - params.bet
    } else {
        delta.happiness -= LOSS_HAPPINESS_PENALTY;
        -params.bet
    };
    delta.money = net;

    GambleOutcome {
        delta,
        resolution: GambleResolution::Bet { params, won, net },
    }
}
