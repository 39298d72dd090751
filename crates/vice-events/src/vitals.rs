//! Vital Types
//!
//! The three bounded survival stats every agent carries.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the three bounded survival stats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Vital {
    Energy,
    Health,
    Happiness,
}

impl Vital {
    /// All vitals in evaluation order
    pub const ALL: [Vital; 3] = [Vital::Energy, Vital::Health, Vital::Happiness];

    pub fn as_str(&self) -> &'static str {
        match self {
            Vital::Energy => "energy",
            Vital::Health => "health",
            Vital::Happiness => "happiness",
        }
    }
}

impl fmt::Display for Vital {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Energy, health and happiness values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Vitals {
    pub energy: i32,
    pub health: i32,
    pub happiness: i32,
}

impl Vitals {
    pub fn new(energy: i32, health: i32, happiness: i32) -> Self {
        Self {
            energy,
            health,
            happiness,
        }
    }

    /// All three vitals set to the same value
    pub fn uniform(value: i32) -> Self {
        Self::new(value, value, value)
    }

    pub fn get(&self, vital: Vital) -> i32 {
        match vital {
            Vital::Energy => self.energy,
            Vital::Health => self.health,
            Vital::Happiness => self.happiness,
        }
    }

    pub fn set(&mut self, vital: Vital, value: i32) {
        match vital {
            Vital::Energy => self.energy = value,
            Vital::Health => self.health = value,
            Vital::Happiness => self.happiness = value,
        }
    }

    /// Clamp every vital into `[min, max]`
    pub fn clamped(self, min: i32, max: i32) -> Self {
        Self {
            energy: self.energy.clamp(min, max),
            health: self.health.clamp(min, max),
            happiness: self.happiness.clamp(min, max),
        }
    }

    pub fn all_equal_to(&self, value: i32) -> bool {
        Vital::ALL.iter().all(|&v| self.get(v) == value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamped_bounds_every_vital() {
        let vitals = Vitals::new(-4, 72, 20).clamped(0, 50);
        assert_eq!(vitals, Vitals::new(0, 50, 20));
    }

    #[test]
    fn test_get_set() {
        let mut vitals = Vitals::default();
        vitals.set(Vital::Health, 12);
        assert_eq!(vitals.get(Vital::Health), 12);
        assert_eq!(vitals.get(Vital::Energy), 0);
    }

    #[test]
    fn test_all_equal_to() {
        assert!(Vitals::uniform(50).all_equal_to(50));
        assert!(!Vitals::new(50, 50, 49).all_equal_to(50));
    }
}
