//! Turn Loop
//!
//! Drives one agent through a run. Each turn: draw and bias a candidate pool,
//! score it, resolve an addiction override or the rational/random rule,
//! service loans, execute the action, apply breakdown penalties, check rare
//! events, decay unused addictions and record a snapshot.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace, warn};
use vice_events::{DecisionKind, RunState, SimulationReport, TurnSnapshot};

use crate::actions::ActionCatalog;
use crate::components::AgentState;
use crate::config::{SimConfig, SimulationDefaults};
use crate::events::{EventContext, EventOutcome, EventRegistry};
use crate::systems::{
    apply_decay, apply_penalties, bias_pool, check_overrides, execute_action, generate_pool, record_choice,
    record_override, score_pool, select_action, select_override, BreakdownPenalty, DebtLedger, ExecutionOutcome,
    PoolInjection, Selection, ServicingReport,
};

/// Per-run parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationParams {
    /// Probability of a rational choice, in [0, 1]
    pub rationality: f64,
    pub initial_money: i64,
    /// In [-1, 1]
    pub risk_tolerance: f64,
    /// Maximum number of turns
    pub steps: u32,
    /// Multiplier on the base addiction levels
    pub predisposition: f64,
    /// Keep the name of every chosen action in the report
    pub record_actions: bool,
}

impl SimulationParams {
    pub fn new(rationality: f64, initial_money: i64, risk_tolerance: f64, steps: u32, predisposition: f64) -> Self {
        Self {
            rationality,
            initial_money,
            risk_tolerance,
            steps,
            predisposition,
            record_actions: false,
        }
    }

    pub fn from_defaults(defaults: &SimulationDefaults) -> Self {
        Self::new(
            defaults.default_rationality,
            defaults.default_money,
            defaults.default_risk_tolerance,
            defaults.default_steps,
            defaults.default_predisposition,
        )
    }

    pub fn with_record_actions(mut self, record: bool) -> Self {
        self.record_actions = record;
        self
    }

    /// Replace every out-of-range value with its configured default
    pub fn validated(mut self, defaults: &SimulationDefaults) -> Self {
        if !(0.0..=1.0).contains(&self.rationality) {
            warn!(
                value = self.rationality,
                default = defaults.default_rationality,
                "Rationality outside [0, 1]; using default"
            );
            self.rationality = defaults.default_rationality;
        }
        if !(-1.0..=1.0).contains(&self.risk_tolerance) {
            warn!(
                value = self.risk_tolerance,
                default = defaults.default_risk_tolerance,
                "Risk tolerance outside [-1, 1]; using default"
            );
            self.risk_tolerance = defaults.default_risk_tolerance;
        }
        if !self.predisposition.is_finite() || self.predisposition < 0.0 {
            warn!(
                value = self.predisposition,
                default = defaults.default_predisposition,
                "Invalid addiction predisposition; using default"
            );
            self.predisposition = defaults.default_predisposition;
        }
        if self.steps == 0 {
            warn!(default = defaults.default_steps, "Step count must be positive; using default");
            self.steps = defaults.default_steps;
        }
        if self.initial_money < 0 {
            warn!(
                value = self.initial_money,
                default = defaults.default_money,
                "Initial money must be non-negative; using default"
            );
            self.initial_money = defaults.default_money;
        }
        self
    }
}

/// Everything that happened during one turn
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurnRecord {
    pub turn: u32,
    /// Candidate pool after biasing
    pub pool: Vec<String>,
    /// Weighted score of each pool entry
    pub scores: Vec<f64>,
    pub injections: Vec<PoolInjection>,
    pub decision: DecisionKind,
    pub servicing: ServicingReport,
    /// Absent when a loan default ended the turn early
    pub execution: Option<ExecutionOutcome>,
    pub penalties: Vec<BreakdownPenalty>,
    pub events: Vec<EventOutcome>,
    pub snapshot: TurnSnapshot,
    /// Run state after this turn
    pub state: RunState,
}

/// A single simulation run
pub struct Simulation<'a> {
    catalog: &'a ActionCatalog,
    config: &'a SimConfig,
    params: SimulationParams,
    seed: u64,
    agent: AgentState,
    ledger: DebtLedger,
    events: EventRegistry,
    state: RunState,
    turn: u32,
    rational_choices: u32,
    random_choices: u32,
    chosen_actions: Option<Vec<String>>,
    terminal_event: Option<String>,
}

impl<'a> Simulation<'a> {
    pub fn new(catalog: &'a ActionCatalog, config: &'a SimConfig, params: SimulationParams) -> Self {
        let params = params.validated(&config.simulation);
        let agent = AgentState::new(
            params.initial_money,
            &config.addiction.base_levels,
            params.predisposition,
        );

        Self {
            catalog,
            config,
            seed: 0,
            agent,
            ledger: DebtLedger::new(),
            events: EventRegistry::from_config(&config.events),
            state: RunState::Running,
            turn: 0,
            rational_choices: 0,
            random_choices: 0,
            chosen_actions: params.record_actions.then(Vec::new),
            terminal_event: None,
            params,
        }
    }

    /// Seed recorded in the report and used by [`Simulation::run`]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Replace the built-in event registry
    pub fn with_events(mut self, events: EventRegistry) -> Self {
        self.events = events;
        self
    }

    pub fn params(&self) -> &SimulationParams {
        &self.params
    }

    pub fn agent(&self) -> &AgentState {
        &self.agent
    }

    /// Mutable access for setting up specific starting conditions
    pub fn agent_mut(&mut self) -> &mut AgentState {
        &mut self.agent
    }

    pub fn ledger(&self) -> &DebtLedger {
        &self.ledger
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    /// Turns played so far
    pub fn turn(&self) -> u32 {
        self.turn
    }

    /// Play one turn. Returns `None` once the run has ended.
    pub fn step<R: Rng>(&mut self, rng: &mut R) -> Option<TurnRecord> {
        if self.state.is_terminal() {
            return None;
        }
        self.turn += 1;
        let turn = self.turn;
        let catalog = self.catalog;
        let config = self.config;

        // Candidate pool
        let mut pool = generate_pool(catalog, config.simulation.pool_size.max(1), rng);
        let injections = bias_pool(&mut pool, &self.agent.addictions, catalog, rng);
        for injection in &injections {
            trace!(turn, kind = %injection.kind, action = %injection.action, "Pool biased");
        }
        let scores = score_pool(&pool, &self.agent.vitals, self.agent.money, &config.stats, &config.economy);

        // Decision
        let triggered = check_overrides(&self.agent.addictions, &pool, rng);
        let trigger = select_override(&triggered, rng);
        let (action, decision) = match trigger {
            Some(trigger) => (trigger.action, DecisionKind::Override { addiction: trigger.kind }),
            None => {
                let selection = select_action(&scores, self.params.rationality, rng).unwrap_or_else(|| {
                    warn!(turn, "No scored candidate; falling back to a random pick");
                    Selection {
                        index: rng.gen_range(0..pool.len()),
                        decision: DecisionKind::Random,
                    }
                });
                match selection.decision {
                    DecisionKind::Rational => self.rational_choices += 1,
                    DecisionKind::Random => self.random_choices += 1,
                    DecisionKind::Override { .. } => {}
                }
                (pool[selection.index], selection.decision)
            }
        };

        // Effects
        let servicing = self.ledger.service(&mut self.agent.money);
        for loan in &servicing.settled {
            debug!(turn, principal = loan.principal, repaid = loan.total_repayable, "Loan settled");
        }
        let execution = if servicing.is_fatal() {
            warn!(turn, total_debt = self.ledger.total_debt(), "Loan default; agent ruined");
            self.agent.ruin(&config.stats);
            None
        } else {
            Some(execute_action(
                action,
                &mut self.agent,
                &mut self.ledger,
                self.params.risk_tolerance,
                &config.stats,
                rng,
            ))
        };
        let used = match &trigger {
            Some(trigger) => record_override(&mut self.agent, trigger),
            None => record_choice(&mut self.agent, action),
        };

        let (vitals, penalties) = apply_penalties(
            self.agent.vitals,
            &mut self.agent.zero_turns,
            &config.breakdown,
            &config.stats,
        );
        self.agent.vitals = vitals;

        // Rare events
        let events = match execution {
            Some(outcome) if !outcome.ruined => {
                let ctx = EventContext {
                    turn,
                    action,
                    vitals: self.agent.vitals,
                    money: self.agent.money,
                    risk_tolerance: self.params.risk_tolerance,
                    stats: &config.stats,
                };
                self.events.check(&ctx, rng)
            }
            _ => Vec::new(),
        };
        for outcome in &events {
            if let Some(vitals) = outcome.vitals {
                self.agent.vitals = vitals;
            }
            if outcome.terminal {
                self.agent.terminated_by_event = true;
                self.terminal_event = Some(outcome.event.clone());
            }
        }

        let collapsed = self.agent.vitals.all_equal_to(config.stats.min_value);
        apply_decay(&mut self.agent, &used);

        // Record
        let snapshot = TurnSnapshot {
            turn,
            vitals: self.agent.vitals,
            money: self.agent.money,
            action: action.name.clone(),
            decision,
        };
        self.agent.history.push(snapshot.clone());
        self.agent.sample_addictions();
        if let Some(names) = &mut self.chosen_actions {
            names.push(action.name.clone());
        }

        let at_ceiling = self.agent.vitals.all_equal_to(config.stats.max_value);
        self.state = if self.agent.terminated_by_event {
            RunState::EndedByEvent
        } else if collapsed {
            RunState::EndedByVitalCollapse
        } else if at_ceiling {
            RunState::EndedByVitalCeiling
        } else if turn >= self.params.steps {
            RunState::EndedByStepLimit
        } else {
            RunState::Running
        };

        debug!(
            turn,
            action = %action.name,
            decision = ?decision,
            energy = self.agent.vitals.energy,
            health = self.agent.vitals.health,
            happiness = self.agent.vitals.happiness,
            money = self.agent.money,
            "Turn complete"
        );

        Some(TurnRecord {
            turn,
            pool: pool.iter().map(|a| a.name.clone()).collect(),
            scores,
            injections,
            decision,
            servicing,
            execution,
            penalties,
            events,
            snapshot,
            state: self.state,
        })
    }

    /// Play until the run ends, drawing randomness from `rng`
    pub fn run_with_rng<R: Rng>(mut self, rng: &mut R) -> SimulationReport {
        while self.step(rng).is_some() {}

        info!(
            seed = self.seed,
            outcome = ?self.state,
            turns = self.turn,
            money = self.agent.money,
            "Simulation finished"
        );
        self.into_report()
    }

    /// Play until the run ends with a `SmallRng` seeded from the run's seed
    pub fn run(self) -> SimulationReport {
        let mut rng = SmallRng::seed_from_u64(self.seed);
        self.run_with_rng(&mut rng)
    }

    pub fn into_report(self) -> SimulationReport {
        let agent = self.agent;
        SimulationReport {
            seed: self.seed,
            final_state: agent.final_state(),
            outcome: self.state,
            history: agent.history,
            rational_choices: self.rational_choices,
            random_choices: self.random_choices,
            chosen_actions: self.chosen_actions,
            override_counts: agent.override_counts,
            addiction_levels: agent.addiction_history,
            terminated_by_event: agent.terminated_by_event,
            terminal_event: self.terminal_event,
            debt: self.ledger.summary(),
        }
    }
}

/// Run one simulation with the built-in catalog and default configuration
pub fn run_simulation(
    rationality: f64,
    initial_money: i64,
    risk_tolerance: f64,
    steps: u32,
    predisposition: f64,
    seed: u64,
) -> SimulationReport {
    let catalog = ActionCatalog::default();
    let config = SimConfig::default();
    let params = SimulationParams::new(rationality, initial_money, risk_tolerance, steps, predisposition)
        .with_record_actions(true);

    Simulation::new(&catalog, &config, params).with_seed(seed).run()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::Action;
    use vice_events::{AddictionKind, AddictionMap};

    fn quiet_catalog() -> ActionCatalog {
        ActionCatalog::new(vec![
            Action::new("Sleep", 8, 2, 1),
            Action::new("Work", -4, -1, -2).with_money(300),
            Action::new("Exercise", -3, 6, 3),
            Action::new("Meditate", 2, 2, 3),
            Action::new("Watch TV", 1, 0, 2),
        ])
        .unwrap()
    }

    fn sober_config() -> SimConfig {
        let mut config = SimConfig::default();
        config.addiction.base_levels = AddictionMap::splat(0.0);
        config
    }

    #[test]
    fn test_invalid_params_replaced_by_defaults() {
        let defaults = SimulationDefaults::default();
        let params = SimulationParams::new(1.5, -10, -3.0, 0, f64::NAN).validated(&defaults);

        assert_eq!(params.rationality, defaults.default_rationality);
        assert_eq!(params.initial_money, defaults.default_money);
        assert_eq!(params.risk_tolerance, defaults.default_risk_tolerance);
        assert_eq!(params.steps, defaults.default_steps);
        assert_eq!(params.predisposition, defaults.default_predisposition);
    }

    #[test]
    fn test_valid_params_untouched() {
        let params = SimulationParams::new(0.2, 0, 1.0, 3, 2.5);
        assert_eq!(params.clone().validated(&SimulationDefaults::default()), params);
    }

    #[test]
    fn test_step_records_turn() {
        let catalog = quiet_catalog();
        let config = sober_config();
        let mut sim = Simulation::new(&catalog, &config, SimulationParams::new(1.0, 100, 0.0, 5, 1.0));
        let mut rng = SmallRng::seed_from_u64(42);

        let record = sim.step(&mut rng).unwrap();
        assert_eq!(record.turn, 1);
        assert_eq!(record.pool.len(), 5);
        assert_eq!(record.scores.len(), 5);
        assert_eq!(record.decision, DecisionKind::Rational);
        assert!(record.pool.contains(&record.snapshot.action));
        assert_eq!(record.state, RunState::Running);
        assert_eq!(sim.agent().history.len(), 1);
    }

    #[test]
    fn test_rational_agent_takes_best_scored_action() {
        let catalog = quiet_catalog();
        let config = sober_config();
        let mut sim = Simulation::new(&catalog, &config, SimulationParams::new(1.0, 100, 0.0, 30, 1.0));
        let mut rng = SmallRng::seed_from_u64(7);

        while let Some(record) = sim.step(&mut rng) {
            let best = record.scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            let chosen = record.pool.iter().position(|n| *n == record.snapshot.action).unwrap();
            assert!(best - record.scores[chosen] <= 1e-9);
        }
    }

    #[test]
    fn test_step_limit_ends_run() {
        let catalog = quiet_catalog();
        let config = sober_config();
        let mut sim = Simulation::new(&catalog, &config, SimulationParams::new(0.0, 100, 0.0, 3, 1.0));
        let mut rng = SmallRng::seed_from_u64(1);

        let mut turns = 0;
        while sim.step(&mut rng).is_some() {
            turns += 1;
        }
        assert!(turns <= 3);
        assert!(sim.state().is_terminal());
        assert!(sim.step(&mut rng).is_none());
    }

    #[test]
    fn test_choice_counters_sum_to_non_override_turns() {
        let report = run_simulation(0.5, 1000, 0.0, 40, 1.0, 99);
        let overrides = report.history.iter().filter(|s| s.decision.is_override()).count() as u32;

        assert_eq!(report.rational_choices + report.random_choices + overrides, report.turns_played() as u32);
        let counted: u32 = report.override_counts.iter().map(|(_, &c)| c).sum();
        assert_eq!(counted, overrides);
    }

    #[test]
    fn test_loan_default_ruins_agent() {
        let catalog = ActionCatalog::new(vec![Action::new("Sleep", 8, 2, 1), Action::new("Meditate", 2, 2, 3)]).unwrap();
        let config = sober_config();
        let mut sim = Simulation::new(&catalog, &config, SimulationParams::new(1.0, 0, -1.0, 10, 1.0));
        // Small loan: 600 due on the third turn with no way to earn it
        sim.ledger.issue(0.0);
        let mut rng = SmallRng::seed_from_u64(5);

        let records: Vec<TurnRecord> = std::iter::from_fn(|| sim.step(&mut rng)).collect();
        assert_eq!(records.len(), 3);

        let last = records.last().unwrap();
        assert!(last.servicing.is_fatal());
        assert!(last.execution.is_none());
        assert_eq!(last.state, RunState::EndedByVitalCollapse);
        assert!(last.snapshot.vitals.all_equal_to(0));
        assert_eq!(last.snapshot.money, 0);
        assert!(sim.ledger().has_defaulted());
        assert_eq!(sim.ledger().total_debt(), 600);
    }

    #[test]
    fn test_loan_default_collapses_at_raised_floor() {
        let catalog = ActionCatalog::new(vec![Action::new("Sleep", 8, 2, 1), Action::new("Meditate", 2, 2, 3)]).unwrap();
        let mut config = sober_config();
        config.stats.min_value = 1;
        let mut sim = Simulation::new(&catalog, &config, SimulationParams::new(1.0, 0, -1.0, 10, 1.0));
        sim.ledger.issue(0.0);
        let mut rng = SmallRng::seed_from_u64(5);

        let records: Vec<TurnRecord> = std::iter::from_fn(|| sim.step(&mut rng)).collect();
        assert_eq!(records.len(), 3);

        let last = records.last().unwrap();
        assert!(last.servicing.is_fatal());
        assert_eq!(last.state, RunState::EndedByVitalCollapse);
        assert!(last.snapshot.vitals.all_equal_to(1));
        assert_eq!(last.snapshot.money, 0);
    }

    #[test]
    fn test_unscorable_pool_still_picks_an_action() {
        let catalog = quiet_catalog();
        let mut config = sober_config();
        config.economy.money_weight = f64::NAN;
        let mut sim = Simulation::new(&catalog, &config, SimulationParams::new(1.0, 100, 0.0, 4, 1.0));
        let mut rng = SmallRng::seed_from_u64(8);

        let records: Vec<TurnRecord> = std::iter::from_fn(|| sim.step(&mut rng)).collect();
        assert!(!records.is_empty());
        assert!(records.iter().all(|r| r.decision == DecisionKind::Random));
        assert!(sim.state().is_terminal());
    }

    #[test]
    fn test_addiction_series_one_sample_per_turn() {
        let report = run_simulation(0.3, 500, 0.5, 25, 1.5, 11);
        for kind in AddictionKind::ALL {
            assert_eq!(report.addiction_levels.get(kind).len(), report.turns_played());
        }
        assert_eq!(report.chosen_actions.as_ref().unwrap().len(), report.turns_played());
    }

    #[test]
    fn test_report_final_state_matches_last_snapshot() {
        let report = run_simulation(0.7, 2000, -0.5, 20, 1.0, 3);
        let last = report.history.last().unwrap();
        assert_eq!(report.final_state.vitals, last.vitals);
        assert_eq!(report.final_state.money, last.money);
        assert!(report.outcome.is_terminal());
        assert_eq!(report.final_state.vitals.clamped(0, 50), report.final_state.vitals);
    }
}
