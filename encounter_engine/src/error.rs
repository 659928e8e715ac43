//! Error types for the encounter engine.

use game_rules::{EquipmentId, PlayerId, RulesError};
use thiserror::Error;

/// Errors raised by engine operations and the orchestrator.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    /// Both combatants were already at zero hp when the encounter started.
    #[error("both {a} and {b} are already defeated")]
    BothDefeated { a: String, b: String },

    #[error("unknown player: {0}")]
    UnknownPlayer(PlayerId),

    #[error("unknown equipment: {0}")]
    UnknownEquipment(EquipmentId),

    #[error("nickname already registered: {0}")]
    NicknameTaken(String),

    #[error("unknown scene: {0}")]
    UnknownScene(String),

    /// The player tried to act while defeated.
    #[error("{0} is too wounded to fight")]
    Defeated(String),

    #[error("a player cannot duel themselves")]
    SelfDuel,

    #[error(transparent)]
    Rules(#[from] RulesError),
}

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;
