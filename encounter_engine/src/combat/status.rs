//! Transient per-combatant status, owned by the engine for one encounter.

use game_rules::StatusEffectType;
use serde::{Deserialize, Serialize};

/// Flags and pools layered over a combatant view while a fight runs.
///
/// Enrage is one-way: once set it is never cleared within the encounter.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CombatStatus {
    pub enraged: bool,
    /// Multiplier applied to attack while enraged.
    pub enrage_attack_multiplier: f64,
    /// Fraction of each blow's mitigated damage returned as healing.
    pub life_steal_ratio: f64,
    /// Damage absorbed before hp.
    pub shield: i64,
}

impl CombatStatus {
    pub fn new() -> Self {
        Self {
            enrage_attack_multiplier: 1.0,
            ..Default::default()
        }
    }

    /// Enter the enraged state. Returns false if already enraged.
    pub fn enrage(&mut self, attack_multiplier: f64, life_steal_ratio: f64) -> bool {
        if self.enraged {
            return false;
        }
        self.enraged = true;
        self.enrage_attack_multiplier = attack_multiplier;
        self.life_steal_ratio = life_steal_ratio;
        true
    }

    /// Attack after the enrage multiplier, truncated.
    pub fn effective_attack(&self, attack: i64) -> i64 {
        (attack as f64 * self.enrage_attack_multiplier) as i64
    }

    /// Healing earned from a blow, truncated.
    ///
    /// `base` is the defense-mitigated damage of the blow before the
    /// crit/miss multiplier, so a critical hit steals no more than a normal
    /// one and a miss steals no less.
    pub fn life_steal(&self, base: i64) -> i64 {
        (base as f64 * self.life_steal_ratio) as i64
    }

    pub fn grant_shield(&mut self, amount: i64) {
        self.shield += amount.max(0);
    }

    /// Soak incoming damage with the shield. Returns the damage left for hp.
    pub fn absorb(&mut self, amount: i64) -> i64 {
        let soaked = amount.min(self.shield).max(0);
        self.shield -= soaked;
        amount - soaked
    }

    /// Effects currently active, in log order.
    pub fn active_effects(&self) -> Vec<StatusEffectType> {
        let mut effects = Vec::new();
        if self.enraged {
            effects.push(StatusEffectType::Enraged);
        }
        if self.life_steal_ratio > 0.0 {
            effects.push(StatusEffectType::LifeSteal);
        }
        if self.shield > 0 {
            effects.push(StatusEffectType::Shield);
        }
        effects
    }
}
