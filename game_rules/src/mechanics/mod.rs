//! Game mechanics: rarity tiers, equipment slots, combat modes, skills.

mod skill;

pub use skill::*;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::RulesError;

/// Rarity tiers, ordered from most to least common.
///
/// The derived `Ord` is the comparison used by loot reconciliation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
}

impl Rarity {
    /// All tiers in ascending order.
    pub const ALL: [Rarity; 5] = [
        Rarity::Common,
        Rarity::Uncommon,
        Rarity::Rare,
        Rarity::Epic,
        Rarity::Legendary,
    ];

    /// Zero-based tier index.
    pub fn index(&self) -> usize {
        match self {
            Rarity::Common => 0,
            Rarity::Uncommon => 1,
            Rarity::Rare => 2,
            Rarity::Epic => 3,
            Rarity::Legendary => 4,
        }
    }

    /// Human-readable tier name.
    pub fn label(&self) -> &'static str {
        match self {
            Rarity::Common => "Common",
            Rarity::Uncommon => "Uncommon",
            Rarity::Rare => "Rare",
            Rarity::Epic => "Epic",
            Rarity::Legendary => "Legendary",
        }
    }

    /// Star rating shown on equipment cards (one star per tier, starting at one).
    pub fn stars(&self) -> String {
        "*".repeat(self.index() + 1)
    }
}

impl fmt::Display for Rarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Rarity {
    type Err = RulesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Rarity::ALL
            .into_iter()
            .find(|r| r.label().eq_ignore_ascii_case(s))
            .ok_or_else(|| RulesError::UnknownRarity(s.to_string()))
    }
}

/// Equipment slots. A character wears at most one item per slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EquipmentSlot {
    Weapon,
    Armor,
}

impl EquipmentSlot {
    pub fn as_str(&self) -> &'static str {
        match self {
            EquipmentSlot::Weapon => "weapon",
            EquipmentSlot::Armor => "armor",
        }
    }
}

impl fmt::Display for EquipmentSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EquipmentSlot {
    type Err = RulesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "weapon" => Ok(EquipmentSlot::Weapon),
            "armor" | "armour" => Ok(EquipmentSlot::Armor),
            _ => Err(RulesError::UnknownSlot(s.to_string())),
        }
    }
}

/// Encounter flavour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CombatMode {
    /// Player against monster: strict alternation, monster may enrage.
    Pve,
    /// Player against player: coin-flip initiative each round, round cap, compensation.
    Pvp,
}

impl FromStr for CombatMode {
    type Err = RulesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pve" => Ok(CombatMode::Pve),
            "pvp" => Ok(CombatMode::Pvp),
            _ => Err(RulesError::UnknownMode(s.to_string())),
        }
    }
}

/// Whether a combatant view was built from a player or a monster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CombatantKind {
    Player,
    /// Monsters may enrage once per encounter.
    Monster,
}

/// Transient status effects the combat engine tracks per combatant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatusEffectType {
    /// One-way attack boost with life-steal on every blow.
    Enraged,
    LifeSteal,
    /// Absorbs incoming damage before hp.
    Shield,
}

impl StatusEffectType {
    /// Label used in battle log lines.
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusEffectType::Enraged => "enraged",
            StatusEffectType::LifeSteal => "life steal",
            StatusEffectType::Shield => "shield",
        }
    }
}
