//! Debt Ledger
//!
//! Multi-turn loans issued to a broke gambler. Each run owns exactly one
//! ledger; nothing is shared between runs.

use serde::{Deserialize, Serialize};
use vice_events::DebtSummary;

/// Lending limits and desperation tuning
pub mod loan_constants {
    /// Lending stops once cumulative principal reaches this amount
    pub const MAX_TOTAL_BORROWED: i64 = 20_000;
    /// Lending stops once outstanding repayable debt reaches this amount
    pub const MAX_OUTSTANDING_DEBT: i64 = 15_000;
    /// Desperation added per active loan
    pub const DESPERATION_PER_LOAN: f64 = 0.25;
}

use loan_constants::*;

/// Rung on the loan ladder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoanTier {
    Small,
    Medium,
    Large,
    Final,
}

impl LoanTier {
    /// Tier for a score in [0, 1]
    pub fn for_score(score: f64) -> Self {
        if score < 0.25 {
            LoanTier::Small
        } else if score < 0.5 {
            LoanTier::Medium
        } else if score < 0.75 {
            LoanTier::Large
        } else {
            LoanTier::Final
        }
    }

    pub fn principal(&self) -> i64 {
        match self {
            LoanTier::Small => 500,
            LoanTier::Medium => 1_000,
            LoanTier::Large => 2_500,
            LoanTier::Final => 5_000,
        }
    }

    /// Turns until repayment is due
    pub fn term(&self) -> u32 {
        match self {
            LoanTier::Small => 3,
            LoanTier::Medium => 5,
            LoanTier::Large => 7,
            LoanTier::Final => 10,
        }
    }

    pub fn interest(&self) -> f64 {
        match self {
            LoanTier::Small => 1.2,
            LoanTier::Medium => 1.3,
            LoanTier::Large => 1.5,
            LoanTier::Final => 2.0,
        }
    }
}

/// An outstanding loan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Loan {
    pub tier: LoanTier,
    pub principal: i64,
    pub turns_remaining: u32,
    pub total_repayable: i64,
}

impl Loan {
    pub fn from_tier(tier: LoanTier) -> Self {
        let principal = tier.principal();
        Self {
            tier,
            principal,
            turns_remaining: tier.term(),
            total_repayable: (principal as f64 * tier.interest()).round() as i64,
        }
    }
}

/// What happened to the ledger during one servicing pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServicingReport {
    /// Loans repaid in full this turn
    pub settled: Vec<Loan>,
    /// Loan that came due without sufficient funds
    pub defaulted: Option<Loan>,
}

impl ServicingReport {
    pub fn is_fatal(&self) -> bool {
        self.defaulted.is_some()
    }
}

/// Active loans and running totals for one run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DebtLedger {
    loans: Vec<Loan>,
    total_debt: i64,
    total_borrowed: i64,
    loans_taken: u32,
    defaulted: bool,
    refused: bool,
}

impl DebtLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn loans(&self) -> &[Loan] {
        &self.loans
    }

    /// Outstanding repayable amount across all loans
    pub fn total_debt(&self) -> i64 {
        self.total_debt
    }

    /// Cumulative principal ever issued
    pub fn total_borrowed(&self) -> i64 {
        self.total_borrowed
    }

    /// Loans currently on the ledger
    pub fn loan_count(&self) -> usize {
        self.loans.len()
    }

    pub fn has_defaulted(&self) -> bool {
        self.defaulted
    }

    /// Desperation grows with every outstanding loan, capped at 1
    pub fn desperation(&self) -> f64 {
        (DESPERATION_PER_LOAN * self.loans.len() as f64).min(1.0)
    }

    /// Whether a borrowing ceiling has been reached
    pub fn at_ceiling(&self) -> bool {
        self.total_borrowed >= MAX_TOTAL_BORROWED || self.total_debt >= MAX_OUTSTANDING_DEBT
    }

    /// Issue the next loan on the ladder, or `None` once a ceiling is reached.
    ///
    /// The tier is chosen by the greater of `risk_factor` and the current
    /// desperation score.
    pub fn issue(&mut self, risk_factor: f64) -> Option<Loan> {
        if self.defaulted || self.at_ceiling() {
            self.refused = true;
            return None;
        }

        let score = risk_factor.max(self.desperation()).clamp(0.0, 1.0);
        let loan = Loan::from_tier(LoanTier::for_score(score));

        self.total_debt += loan.total_repayable;
        self.total_borrowed += loan.principal;
        self.loans_taken += 1;
        self.loans.push(loan);
        Some(loan)
    }

    /// Count every loan down one turn and settle the ones that come due.
    ///
    /// A due loan is always deducted from `money` in full. If `money` could
    /// not cover it the ledger defaults: the loan stays on the ledger and no
    /// further loans are serviced.
    pub fn service(&mut self, money: &mut i64) -> ServicingReport {
        let mut report = ServicingReport::default();
        if self.defaulted {
            return report;
        }

        for loan in &mut self.loans {
            loan.turns_remaining = loan.turns_remaining.saturating_sub(1);
        }

        let mut index = 0;
        while index < self.loans.len() {
            let loan = self.loans[index];
            if loan.turns_remaining > 0 {
                index += 1;
                continue;
            }

            let sufficient = *money >= loan.total_repayable;
            *money -= loan.total_repayable;
            if !sufficient {
                self.defaulted = true;
                report.defaulted = Some(loan);
                break;
            }

            self.total_debt -= loan.total_repayable;
            self.loans.remove(index);
            report.settled.push(loan);
        }

        report
    }

    pub fn summary(&self) -> DebtSummary {
        DebtSummary {
            total_debt: self.total_debt,
            total_borrowed: self.total_borrowed,
            active_loans: self.loans.len() as u32,
            loans_taken: self.loans_taken,
            defaulted: self.defaulted,
            refused: self.refused,
        }
    }
}
