//! Damage calculation - the primitive every blow goes through.
//!
//! # Formula
//!
//! ```text
//! reduction = min(defense / defense_divisor, max_reduction)
//! base      = max(1, round(attack * (1 - reduction)))
//!
//! d100 > crit_threshold  => final = base * uniform(crit_min, crit_max)
//! d100 < miss_threshold  => final = base * uniform(miss_min, miss_max)
//! otherwise              => final = base
//!
//! final = max(1, floor(final))
//! ```
//!
//! With the shipped balance this caps mitigation at 80% and splits rolls
//! 20/60/20 between critical, normal, and miss.

use game_rules::CombatConfig;
use serde::{Deserialize, Serialize};

use crate::rng::GameRng;

/// Outcome class of a d100 roll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HitKind {
    Critical,
    Normal,
    Miss,
}

impl HitKind {
    /// Classify a d100 roll against the configured thresholds.
    pub fn classify(roll: u32, config: &CombatConfig) -> Self {
        if roll > config.crit_threshold {
            HitKind::Critical
        } else if roll < config.miss_threshold {
            HitKind::Miss
        } else {
            HitKind::Normal
        }
    }

    /// Prefix used in battle log lines.
    pub fn log_prefix(&self) -> &'static str {
        match self {
            HitKind::Critical => "Critical! ",
            HitKind::Normal => "",
            HitKind::Miss => "Miss! ",
        }
    }
}

/// A fully resolved blow.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DamageRoll {
    /// Mitigated damage before the crit/miss multiplier.
    pub base: i64,
    /// Damage actually dealt, always at least 1.
    pub amount: i64,
    pub kind: HitKind,
}

/// Defense mitigation as a fraction, capped at the configured maximum.
pub fn reduction(defense: i64, config: &CombatConfig) -> f64 {
    (defense.max(0) as f64 / config.defense_divisor).min(config.max_reduction)
}

/// Damage after defense, before any roll. Never below 1.
pub fn mitigated_damage(attack: i64, defense: i64, config: &CombatConfig) -> i64 {
    let raw = attack.max(0) as f64 * (1.0 - reduction(defense, config));
    (raw.round() as i64).max(1)
}

/// Deterministic core of the damage formula for a given roll and multiplier.
///
/// `multiplier` is only applied for critical and miss rolls; a normal roll
/// deals the mitigated damage unchanged.
pub fn resolve_damage(
    attack: i64,
    defense: i64,
    roll: u32,
    multiplier: f64,
    config: &CombatConfig,
) -> DamageRoll {
    let base = mitigated_damage(attack, defense, config);
    let kind = HitKind::classify(roll, config);
    let amount = match kind {
        HitKind::Normal => base,
        HitKind::Critical | HitKind::Miss => (base as f64 * multiplier) as i64,
    };
    DamageRoll {
        base,
        amount: amount.max(1),
        kind,
    }
}

/// Roll d100 and the matching multiplier, then resolve.
pub fn roll_damage(attack: i64, defense: i64, config: &CombatConfig, rng: &mut GameRng) -> DamageRoll {
    let roll = rng.d100();
    let multiplier = match HitKind::classify(roll, config) {
        HitKind::Critical => rng.uniform_range(config.crit_min, config.crit_max),
        HitKind::Miss => rng.uniform_range(config.miss_min, config.miss_max),
        HitKind::Normal => 1.0,
    };
    let damage = resolve_damage(attack, defense, roll, multiplier, config);
    tracing::debug!(attack, defense, roll, kind = ?damage.kind, amount = damage.amount, "damage rolled");
    damage
}
