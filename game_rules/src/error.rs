//! Error types for the rule book.

use thiserror::Error;

/// Errors raised when a value crosses into the rule book invalid.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RulesError {
    /// Character or equipment level outside `1..=max`.
    #[error("invalid level {level}: must be between 1 and {max}")]
    InvalidLevel { level: u32, max: u32 },

    #[error("unknown equipment slot: {0}")]
    UnknownSlot(String),

    #[error("unknown combat mode: {0}")]
    UnknownMode(String),

    #[error("unknown rarity: {0}")]
    UnknownRarity(String),

    /// A combatant view that breaks `0 <= hp <= max_hp` or has no health pool.
    #[error("invalid combatant {name}: {reason}")]
    InvalidCombatant { name: String, reason: String },

    #[error("no item named {0} in the inventory")]
    NotInInventory(String),

    #[error("nothing equipped in the {0} slot")]
    SlotEmpty(crate::mechanics::EquipmentSlot),

    /// An inventory entry with this name already exists.
    #[error("duplicate item name: {0}")]
    DuplicateItem(String),

    /// A persisted record failed validation at the storage boundary.
    #[error("invalid record: {0}")]
    InvalidRecord(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("failed to read configuration {path}: {reason}")]
    ConfigIo { path: String, reason: String },
}

/// Result type for rule book operations.
pub type RulesResult<T> = Result<T, RulesError>;

impl From<serde_json::Error> for RulesError {
    fn from(err: serde_json::Error) -> Self {
        RulesError::InvalidRecord(err.to_string())
    }
}

impl From<toml::de::Error> for RulesError {
    fn from(err: toml::de::Error) -> Self {
        RulesError::InvalidConfig(err.to_string())
    }
}
