//! Configuration System
//!
//! Loads tuning parameters from a TOML file. Every section has defaults, so a
//! tuning file only needs to name the values it changes.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use vice_events::AddictionMap;

/// Default tuning file path
pub const DEFAULT_TUNING_PATH: &str = "tuning.toml";

/// Complete engine configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Baseline addiction levels
    pub addiction: AddictionConfig,
    /// Breakdown penalty curve
    pub breakdown: BreakdownConfig,
    /// Vital bounds
    pub stats: StatsConfig,
    /// Run defaults used when a parameter is missing or out of range
    pub simulation: SimulationDefaults,
    /// Money weighting
    pub economy: EconomyConfig,
    /// Rare event tuning
    pub events: EventConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            addiction: AddictionConfig::default(),
            breakdown: BreakdownConfig::default(),
            stats: StatsConfig::default(),
            simulation: SimulationDefaults::default(),
            economy: EconomyConfig::default(),
            events: EventConfig::default(),
        }
    }
}

/// Baseline addiction levels before the predisposition multiplier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AddictionConfig {
    pub base_levels: AddictionMap<f64>,
}

impl Default for AddictionConfig {
    fn default() -> Self {
        Self {
            base_levels: AddictionMap {
                gambling: 0.425,
                alcohol: 0.0,
                shopping: 0.0,
                junk_food: 0.0,
            },
        }
    }
}

/// Escalating penalty applied while a vital sits at zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BreakdownConfig {
    /// Penalty on the first turn at zero
    pub base_penalty: i32,
    /// Growth factor per additional turn at zero
    pub multiplier: f64,
}

impl Default for BreakdownConfig {
    fn default() -> Self {
        Self {
            base_penalty: 5,
            multiplier: 2.0,
        }
    }
}

/// Bounds for every vital.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatsConfig {
    pub max_value: i32,
    pub min_value: i32,
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            max_value: 50,
            min_value: 0,
        }
    }
}

/// Defaults substituted for missing or invalid run parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationDefaults {
    pub default_steps: u32,
    pub default_rationality: f64,
    pub default_money: i64,
    pub default_predisposition: f64,
    pub default_risk_tolerance: f64,
    /// Number of actions offered each turn
    pub pool_size: usize,
}

impl Default for SimulationDefaults {
    fn default() -> Self {
        Self {
            default_steps: 10,
            default_rationality: 0.5,
            default_money: 1000,
            default_predisposition: 1.0,
            default_risk_tolerance: 0.0,
            pool_size: 5,
        }
    }
}

/// How much money matters relative to the vitals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EconomyConfig {
    /// Wealth at which the agent stops caring about earning more
    pub target_money: f64,
    /// Base weight for money changes in the utility score
    pub money_weight: f64,
}

impl Default for EconomyConfig {
    fn default() -> Self {
        Self {
            target_money: 5000.0,
            money_weight: 0.4,
        }
    }
}

/// Rare event tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventConfig {
    /// Death game chance at risk tolerance -1
    pub death_game_min_chance: f64,
    /// Death game chance at risk tolerance 1
    pub death_game_max_chance: f64,
}

impl Default for EventConfig {
    fn default() -> Self {
        Self {
            death_game_min_chance: 0.005,
            death_game_max_chance: 0.03,
        }
    }
}

impl SimConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_str(&content)
    }

    /// Parses and validates configuration from a TOML string.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        let config: SimConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads the default tuning file, falling back to built-in defaults.
    pub fn load_or_default() -> Self {
        if !Path::new(DEFAULT_TUNING_PATH).exists() {
            tracing::debug!("No {} found. Using defaults.", DEFAULT_TUNING_PATH);
            return Self::default();
        }
        Self::from_file(DEFAULT_TUNING_PATH).unwrap_or_else(|e| {
            tracing::warn!("Could not load {}: {}. Using defaults.", DEFAULT_TUNING_PATH, e);
            Self::default()
        })
    }

    /// Serializes this configuration as a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Checks cross-field constraints that serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let floats = [
            ("breakdown.multiplier", self.breakdown.multiplier),
            ("economy.target_money", self.economy.target_money),
            ("economy.money_weight", self.economy.money_weight),
            ("simulation.default_rationality", self.simulation.default_rationality),
            ("simulation.default_predisposition", self.simulation.default_predisposition),
            ("simulation.default_risk_tolerance", self.simulation.default_risk_tolerance),
            ("events.death_game_min_chance", self.events.death_game_min_chance),
            ("events.death_game_max_chance", self.events.death_game_max_chance),
        ];
        if let Some((name, value)) = floats.iter().find(|(_, value)| !value.is_finite()) {
            return Err(ConfigError::Invalid(format!("{} must be finite, got {}", name, value)));
        }
        if self.stats.min_value >= self.stats.max_value {
            return Err(ConfigError::Invalid(format!(
                "stats.min_value ({}) must be below stats.max_value ({})",
                self.stats.min_value, self.stats.max_value
            )));
        }
        if self.breakdown.base_penalty < 0 || self.breakdown.multiplier < 1.0 {
            return Err(ConfigError::Invalid(
                "breakdown penalty must be non-negative with a multiplier of at least 1".to_string(),
            ));
        }
        for (kind, level) in self.addiction.base_levels.iter() {
            if !(0.0..=1.0).contains(level) {
                return Err(ConfigError::Invalid(format!(
                    "addiction.base_levels.{} must be within [0, 1], got {}",
                    kind, level
                )));
            }
        }
        if self.simulation.pool_size == 0 {
            return Err(ConfigError::Invalid("simulation.pool_size must be positive".to_string()));
        }
        if self.economy.target_money <= 0.0 {
            return Err(ConfigError::Invalid("economy.target_money must be positive".to_string()));
        }
        if self.economy.money_weight < 0.0 {
            return Err(ConfigError::Invalid("economy.money_weight must be non-negative".to_string()));
        }
        let events = &self.events;
        if !(0.0..=1.0).contains(&events.death_game_min_chance)
            || !(0.0..=1.0).contains(&events.death_game_max_chance)
            || events.death_game_min_chance > events.death_game_max_chance
        {
            return Err(ConfigError::Invalid(
                "death game chances must satisfy 0 <= min <= max <= 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Errors that can occur during configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("TOML serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}
