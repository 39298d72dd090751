//! Action Catalog
//!
//! Immutable action records shared by every run. The catalog is loaded once
//! (built in or from TOML) and only ever read by the engine.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use thiserror::Error;
use vice_events::{AddictionKind, AddictionMap};

use super::risk::StatDelta;

/// How an action is resolved once chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    /// Effects applied through risk adjustment
    #[default]
    Ordinary,
    /// Resolved by the gambling and debt subsystem
    Gamble,
}

/// Base values and variances for an action whose outcome depends on risk tolerance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskProfile {
    pub base_energy: i32,
    pub base_health: i32,
    pub base_happiness: i32,
    pub base_money: i64,
    pub energy_variance: i32,
    pub health_variance: i32,
    pub happiness_variance: i32,
    pub money_variance: i64,
}

/// A single catalog entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Action {
    pub name: String,
    #[serde(default)]
    pub kind: ActionKind,
    #[serde(default)]
    pub energy: i32,
    #[serde(default)]
    pub health: i32,
    #[serde(default)]
    pub happiness: i32,
    #[serde(default)]
    pub money: i64,
    /// Addiction increment per kind; zero means untagged
    #[serde(default)]
    pub addiction: AddictionMap<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risk_profile: Option<RiskProfile>,
}

impl Action {
    pub fn new(name: impl Into<String>, energy: i32, health: i32, happiness: i32) -> Self {
        Self {
            name: name.into(),
            kind: ActionKind::Ordinary,
            energy,
            health,
            happiness,
            money: 0,
            addiction: AddictionMap::default(),
            risk_profile: None,
        }
    }

    pub fn with_money(mut self, money: i64) -> Self {
        self.money = money;
        self
    }

    pub fn with_addiction(mut self, kind: AddictionKind, increment: f64) -> Self {
        *self.addiction.get_mut(kind) = increment;
        self
    }

    pub fn with_risk_profile(mut self, profile: RiskProfile) -> Self {
        self.risk_profile = Some(profile);
        self
    }

    pub fn as_gamble(mut self) -> Self {
        self.kind = ActionKind::Gamble;
        self
    }

    pub fn is_gamble(&self) -> bool {
        self.kind == ActionKind::Gamble
    }

    /// Tagged increment for `kind`, zero when untagged
    pub fn addiction_increment(&self, kind: AddictionKind) -> f64 {
        self.addiction.value(kind)
    }

    pub fn is_tagged(&self, kind: AddictionKind) -> bool {
        self.addiction_increment(kind) > 0.0
    }

    pub fn is_addictive(&self) -> bool {
        AddictionKind::ALL.iter().any(|&kind| self.is_tagged(kind))
    }

    /// Unadjusted effect of the action
    pub fn nominal_delta(&self) -> StatDelta {
        StatDelta {
            energy: self.energy,
            health: self.health,
            happiness: self.happiness,
            money: self.money,
        }
    }
}

/// Ordered, validated collection of actions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionCatalog {
    actions: Vec<Action>,
}

impl ActionCatalog {
    /// Build a catalog, rejecting empty lists, duplicate names and bad tags
    pub fn new(actions: Vec<Action>) -> Result<Self, CatalogError> {
        let catalog = Self { actions };
        catalog.validate()?;
        Ok(catalog)
    }

    /// Parses a catalog from a TOML string with an `[[actions]]` array.
    pub fn from_toml_str(content: &str) -> Result<Self, CatalogError> {
        let catalog: ActionCatalog = toml::from_str(content)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Loads a catalog from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    pub fn to_toml(&self) -> Result<String, CatalogError> {
        Ok(toml::to_string_pretty(self)?)
    }

    fn validate(&self) -> Result<(), CatalogError> {
        if self.actions.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut seen = HashSet::new();
        for action in &self.actions {
            if !seen.insert(action.name.as_str()) {
                return Err(CatalogError::DuplicateName(action.name.clone()));
            }
            for (kind, &increment) in action.addiction.iter() {
                if !(0.0..=1.0).contains(&increment) {
                    return Err(CatalogError::InvalidTag {
                        action: action.name.clone(),
                        kind,
                        increment,
                    });
                }
            }
        }
        Ok(())
    }

    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&Action> {
        self.actions.iter().find(|a| a.name == name)
    }

    /// Every action tagged for `kind`, in catalog order
    pub fn tagged(&self, kind: AddictionKind) -> impl Iterator<Item = &Action> {
        self.actions.iter().filter(move |a| a.is_tagged(kind))
    }
}

impl Default for ActionCatalog {
    /// The built-in survival economy catalog
    fn default() -> Self {
        Self {
            actions: default_actions(),
        }
    }
}

fn default_actions() -> Vec<Action> {
    vec![
        Action::new("Sleep", 8, 2, 1),
        Action::new("Work", -4, -1, -2).with_money(300),
        Action::new("Work overtime", -7, -3, -4)
            .with_money(500)
            .with_risk_profile(RiskProfile {
                base_energy: -6,
                base_health: -2,
                base_happiness: -3,
                base_money: 400,
                energy_variance: -4,
                health_variance: -3,
                happiness_variance: -3,
                money_variance: 400,
            }),
        Action::new("Exercise", -3, 6, 3),
        Action::new("Eat healthy meal", 4, 4, 1).with_money(-40),
        Action::new("Socialize", -1, 1, 6).with_money(-20),
        Action::new("Meditate", 2, 2, 3),
        Action::new("Watch TV", 1, 0, 2),
        Action::new("Invest", 0, 0, -1)
            .with_money(100)
            .with_risk_profile(RiskProfile {
                base_happiness: -1,
                base_money: -200,
                happiness_variance: 3,
                money_variance: 800,
                ..RiskProfile::default()
            }),
        Action::new("Extreme sports", -5, -2, 8).with_risk_profile(RiskProfile {
            base_energy: -5,
            base_health: 0,
            base_happiness: 4,
            energy_variance: -2,
            health_variance: -8,
            happiness_variance: 10,
            ..RiskProfile::default()
        }),
        Action::new("Drink", -1, -3, 5)
            .with_money(-30)
            .with_addiction(AddictionKind::Alcohol, 0.08),
        Action::new("Gamble", -2, 0, 4)
            .as_gamble()
            .with_addiction(AddictionKind::Gambling, 0.1),
        Action::new("Shop", 0, 0, 5)
            .with_money(-150)
            .with_addiction(AddictionKind::Shopping, 0.07),
        Action::new("Eat junk food", 3, -3, 4)
            .with_money(-15)
            .with_addiction(AddictionKind::JunkFood, 0.06),
    ]
}

/// Errors that can occur while loading an action catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("TOML serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("action catalog is empty")]
    Empty,
    #[error("duplicate action name: {0}")]
    DuplicateName(String),
    #[error("action {action} has {kind} increment {increment} outside [0, 1]")]
    InvalidTag {
        action: String,
        kind: AddictionKind,
        increment: f64,
    },
}
