//! Entity definitions: identifiers, levels, equipment, combatants, players.

mod combatant;
mod components;
mod equipment;
mod player;

pub use combatant::*;
pub use components::*;
pub use equipment::*;
pub use player::*;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{RulesError, RulesResult};

/// Hard level cap shared by characters and equipment.
pub const MAX_LEVEL: u32 = 100;

/// Opaque, unique key for a generated piece of equipment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EquipmentId(pub Uuid);

impl EquipmentId {
    /// Create a new random equipment ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create a nil/empty ID (useful for fixtures).
    pub fn nil() -> Self {
        Self(Uuid::nil())
    }
}

impl Default for EquipmentId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for EquipmentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a player record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub Uuid);

impl PlayerId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for PlayerId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A validated level in `1..=MAX_LEVEL`.
///
/// Construction is the boundary check: anything holding a `Level` may assume
/// it is in range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Level(u32);

impl Level {
    pub const MIN: Level = Level(1);
    pub const MAX: Level = Level(MAX_LEVEL);

    /// Validate a raw level.
    pub fn new(value: u32) -> RulesResult<Self> {
        if (1..=MAX_LEVEL).contains(&value) {
            Ok(Self(value))
        } else {
            Err(RulesError::InvalidLevel {
                level: value,
                max: MAX_LEVEL,
            })
        }
    }

    /// Clamp an arbitrary signed value into range. Only for values that are
    /// legitimately boundary cases, such as a drop rolled near level 1 or 100.
    pub fn clamped(value: i64) -> Self {
        Self(value.clamp(1, MAX_LEVEL as i64) as u32)
    }

    pub fn get(self) -> u32 {
        self.0
    }

    pub fn is_max(self) -> bool {
        self.0 == MAX_LEVEL
    }
}

impl TryFrom<u32> for Level {
    type Error = RulesError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Level::new(value)
    }
}

impl From<Level> for u32 {
    fn from(level: Level) -> Self {
        level.0
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
