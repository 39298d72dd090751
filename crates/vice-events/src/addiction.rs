//! Addiction Types
//!
//! Addiction kinds, per-kind value maps, and tolerance zone banding.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A behavioral addiction the agent can develop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AddictionKind {
    Gambling,
    Alcohol,
    Shopping,
    JunkFood,
}

impl AddictionKind {
    /// All kinds in a fixed order; every per-kind pass iterates in this order
    pub const ALL: [AddictionKind; 4] = [
        AddictionKind::Gambling,
        AddictionKind::Alcohol,
        AddictionKind::Shopping,
        AddictionKind::JunkFood,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AddictionKind::Gambling => "gambling",
            AddictionKind::Alcohol => "alcohol",
            AddictionKind::Shopping => "shopping",
            AddictionKind::JunkFood => "junk_food",
        }
    }
}

impl fmt::Display for AddictionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One value per addiction kind.
///
/// Serializes as a table keyed by kind name, so action catalogs and config
/// files can write `gambling = 0.1` directly.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AddictionMap<T> {
    pub gambling: T,
    pub alcohol: T,
    pub shopping: T,
    pub junk_food: T,
}

impl<T> AddictionMap<T> {
    /// Build a map by evaluating `f` for each kind
    pub fn from_fn(mut f: impl FnMut(AddictionKind) -> T) -> Self {
        Self {
            gambling: f(AddictionKind::Gambling),
            alcohol: f(AddictionKind::Alcohol),
            shopping: f(AddictionKind::Shopping),
            junk_food: f(AddictionKind::JunkFood),
        }
    }

    pub fn get(&self, kind: AddictionKind) -> &T {
        match kind {
            AddictionKind::Gambling => &self.gambling,
            AddictionKind::Alcohol => &self.alcohol,
            AddictionKind::Shopping => &self.shopping,
            AddictionKind::JunkFood => &self.junk_food,
        }
    }

    pub fn get_mut(&mut self, kind: AddictionKind) -> &mut T {
        match kind {
            AddictionKind::Gambling => &mut self.gambling,
            AddictionKind::Alcohol => &mut self.alcohol,
            AddictionKind::Shopping => &mut self.shopping,
            AddictionKind::JunkFood => &mut self.junk_food,
        }
    }

    /// Iterate `(kind, value)` pairs in `AddictionKind::ALL` order
    pub fn iter(&self) -> impl Iterator<Item = (AddictionKind, &T)> {
        AddictionKind::ALL.into_iter().map(move |kind| (kind, self.get(kind)))
    }

    pub fn map<U>(&self, mut f: impl FnMut(AddictionKind, &T) -> U) -> AddictionMap<U> {
        AddictionMap::from_fn(|kind| f(kind, self.get(kind)))
    }
}

impl<T: Copy> AddictionMap<T> {
    /// Map with the same value for every kind
    pub fn splat(value: T) -> Self {
        Self::from_fn(|_| value)
    }

    pub fn value(&self, kind: AddictionKind) -> T {
        *self.get(kind)
    }
}

/// Banding of an addiction level that governs growth damping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToleranceZone {
    /// Level at or below 0.4
    Low,
    /// Level in (0.4, 0.7]
    Medium,
    /// Level above 0.7
    High,
}

impl ToleranceZone {
    pub const LOW_CEILING: f64 = 0.4;
    pub const MEDIUM_CEILING: f64 = 0.7;

    pub fn of(level: f64) -> Self {
        if level > Self::MEDIUM_CEILING {
            ToleranceZone::High
        } else if level > Self::LOW_CEILING {
            ToleranceZone::Medium
        } else {
            ToleranceZone::Low
        }
    }
}
