//! Combatant views - the normalized snapshot a fight operates on.

use serde::{Deserialize, Serialize};

use super::StatBlock;
use crate::error::{RulesError, RulesResult};
use crate::mechanics::CombatantKind;

/// A read-only-at-rest snapshot of a player or monster, built fresh for one
/// encounter and discarded afterwards.
///
/// `hp` is kept within `0..=max_hp` on every mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Combatant {
    pub display_name: String,
    pub level: u32,
    hp: i64,
    max_hp: i64,
    pub attack: i64,
    pub defense: i64,
    pub kind: CombatantKind,
}

impl Combatant {
    /// Build a view, rejecting inputs that break the store contract.
    pub fn new(
        display_name: impl Into<String>,
        level: u32,
        hp: i64,
        stats: StatBlock,
        kind: CombatantKind,
    ) -> RulesResult<Self> {
        let display_name = display_name.into();
        let reject = |reason: String| RulesError::InvalidCombatant {
            name: display_name.clone(),
            reason,
        };
        if level == 0 {
            return Err(reject("level must be at least 1".to_string()));
        }
        if stats.max_hp <= 0 {
            return Err(reject(format!("max hp {} is not positive", stats.max_hp)));
        }
        if hp < 0 || hp > stats.max_hp {
            return Err(reject(format!("hp {hp} outside 0..={}", stats.max_hp)));
        }
        if stats.attack < 0 || stats.defense < 0 {
            return Err(reject("attack and defense must be non-negative".to_string()));
        }
        Ok(Self {
            display_name,
            level,
            hp,
            max_hp: stats.max_hp,
            attack: stats.attack,
            defense: stats.defense,
            kind,
        })
    }

    pub fn hp(&self) -> i64 {
        self.hp
    }

    pub fn max_hp(&self) -> i64 {
        self.max_hp
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    pub fn is_monster(&self) -> bool {
        self.kind == CombatantKind::Monster
    }

    /// Remaining health as a fraction of the maximum.
    pub fn hp_ratio(&self) -> f64 {
        self.hp as f64 / self.max_hp as f64
    }

    /// Subtract damage, flooring at zero. Returns the hp actually lost.
    pub fn take_damage(&mut self, amount: i64) -> i64 {
        let lost = amount.max(0).min(self.hp);
        self.hp -= lost;
        lost
    }

    /// Restore hp, capped at the maximum. Returns the hp actually restored.
    pub fn heal(&mut self, amount: i64) -> i64 {
        let restored = amount.max(0).min(self.max_hp - self.hp);
        self.hp += restored;
        restored
    }
}
