//! Balance configuration - every tunable constant of the encounter system.
//!
//! The defaults reproduce the shipped balance; `data/balance.toml` mirrors
//! them so designers can tweak numbers without a rebuild. Services receive
//! the section they need by value at construction time.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::entities::MAX_LEVEL;
use crate::error::{RulesError, RulesResult};
use crate::mechanics::Rarity;

/// Tolerance for the rarity probabilities summing to one.
const PROBABILITY_EPSILON: f64 = 1e-6;

/// Upper bound on skills per equipment.
pub const MAX_SKILLS_PER_ITEM: usize = 4;

/// Complete balance sheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct BalanceConfig {
    pub progression: ProgressionConfig,
    pub rarity: RarityTable,
    pub equipment: EquipmentConfig,
    pub combat: CombatConfig,
    pub loot: LootConfig,
    pub rewards: RewardConfig,
    pub monsters: MonsterConfig,
}

impl BalanceConfig {
    /// Parse and validate a TOML balance sheet. Missing sections fall back to defaults.
    pub fn from_toml_str(source: &str) -> RulesResult<Self> {
        let config: BalanceConfig = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Read a balance sheet from disk.
    pub fn load(path: impl AsRef<Path>) -> RulesResult<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|e| RulesError::ConfigIo {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        let config = Self::from_toml_str(&source)?;
        tracing::info!(path = %path.display(), "loaded balance configuration");
        Ok(config)
    }

    /// Check cross-field invariants that serde cannot express.
    pub fn validate(&self) -> RulesResult<()> {
        self.progression.validate()?;
        self.rarity.validate()?;
        self.combat.validate()?;
        if self.loot.liquidation_percent > 100 {
            return Err(RulesError::InvalidConfig(format!(
                "liquidation percent {} exceeds 100",
                self.loot.liquidation_percent
            )));
        }
        if self.loot.drop_chance_percent > 100 {
            return Err(RulesError::InvalidConfig(format!(
                "drop chance {} exceeds 100",
                self.loot.drop_chance_percent
            )));
        }
        if !(0.0..=1.0).contains(&self.monsters.mutation_chance) {
            return Err(RulesError::InvalidConfig(
                "mutation chance must be within 0..=1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Leveling curve and base character stats.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressionConfig {
    pub max_level: u32,
    /// Experience constant raised to the banded exponent.
    pub base_exp: u64,
    pub base_max_hp: i64,
    pub base_attack: i64,
    pub base_defense: i64,
    pub hp_per_level: i64,
    pub attack_per_level: i64,
    pub defense_per_level: i64,
    pub starting_gold: i64,
}

impl Default for ProgressionConfig {
    fn default() -> Self {
        Self {
            max_level: 100,
            base_exp: 200,
            base_max_hp: 200,
            base_attack: 20,
            base_defense: 20,
            hp_per_level: 50,
            attack_per_level: 10,
            defense_per_level: 10,
            starting_gold: 5000,
        }
    }
}

impl ProgressionConfig {
    fn validate(&self) -> RulesResult<()> {
        if self.max_level == 0 || self.max_level > MAX_LEVEL {
            return Err(RulesError::InvalidConfig(format!(
                "max level {} outside 1..={MAX_LEVEL}",
                self.max_level
            )));
        }
        if self.base_max_hp <= 0 {
            return Err(RulesError::InvalidConfig("base max hp must be positive".to_string()));
        }
        Ok(())
    }
}

/// One row of the rarity table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RarityTier {
    pub rarity: Rarity,
    /// Selection probability; all tiers sum to 1.0.
    pub probability: f64,
    pub skill_count: usize,
    /// Scales both base stats and skill magnitudes.
    pub power_factor: f64,
}

/// Weighted rarity table, walked cumulatively.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RarityTable {
    pub tiers: Vec<RarityTier>,
}

impl Default for RarityTable {
    fn default() -> Self {
        let tier = |rarity, probability, skill_count, power_factor| RarityTier {
            rarity,
            probability,
            skill_count,
            power_factor,
        };
        Self {
            tiers: vec![
                tier(Rarity::Common, 0.35, 0, 1.1),
                tier(Rarity::Uncommon, 0.30, 1, 1.4),
                tier(Rarity::Rare, 0.20, 2, 1.7),
                tier(Rarity::Epic, 0.10, 3, 2.0),
                tier(Rarity::Legendary, 0.05, 4, 3.0),
            ],
        }
    }
}

impl RarityTable {
    /// Map a uniform sample in `[0, 1)` onto a tier.
    ///
    /// Bands are half-open: with the default table `0.35` is the first
    /// Uncommon value. The last tier absorbs floating-point shortfall.
    /// Returns `None` only for an empty table.
    pub fn draw(&self, sample: f64) -> Option<&RarityTier> {
        let mut cumulative = 0.0;
        for tier in &self.tiers {
            cumulative += tier.probability;
            if sample < cumulative {
                return Some(tier);
            }
        }
        self.tiers.last()
    }

    /// Look up the row for a rarity.
    pub fn tier(&self, rarity: Rarity) -> Option<&RarityTier> {
        self.tiers.iter().find(|t| t.rarity == rarity)
    }

    fn validate(&self) -> RulesResult<()> {
        if self.tiers.is_empty() {
            return Err(RulesError::InvalidConfig("rarity table is empty".to_string()));
        }
        let total: f64 = self.tiers.iter().map(|t| t.probability).sum();
        if (total - 1.0).abs() > PROBABILITY_EPSILON {
            return Err(RulesError::InvalidConfig(format!(
                "rarity probabilities sum to {total}, expected 1.0"
            )));
        }
        for (i, tier) in self.tiers.iter().enumerate() {
            if tier.probability < 0.0 {
                return Err(RulesError::InvalidConfig(format!(
                    "{} has a negative probability",
                    tier.rarity
                )));
            }
            if tier.skill_count > MAX_SKILLS_PER_ITEM {
                return Err(RulesError::InvalidConfig(format!(
                    "{} grants {} skills, at most {MAX_SKILLS_PER_ITEM} allowed",
                    tier.rarity, tier.skill_count
                )));
            }
            if tier.power_factor <= 0.0 {
                return Err(RulesError::InvalidConfig(format!(
                    "{} has a non-positive power factor",
                    tier.rarity
                )));
            }
            if self.tiers[..i].iter().any(|t| t.rarity == tier.rarity) {
                return Err(RulesError::InvalidConfig(format!(
                    "{} appears twice in the rarity table",
                    tier.rarity
                )));
            }
        }
        Ok(())
    }
}

/// Base stat and price formulas for generated equipment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EquipmentConfig {
    /// Attack (weapons) and defense (armor): `stat_base + stat_per_level * level`.
    pub stat_base: f64,
    pub stat_per_level: f64,
    /// Armor max hp: `hp_base + hp_per_level * level`.
    pub hp_base: f64,
    pub hp_per_level: f64,
    /// Roll range applied as `1 + uniform(variance_min, variance_max)`.
    pub variance_min: f64,
    pub variance_max: f64,
    pub weapon_price_per_level: f64,
    pub armor_price_per_level: f64,
    pub price_multiplier: f64,
}

impl Default for EquipmentConfig {
    fn default() -> Self {
        Self {
            stat_base: 10.0,
            stat_per_level: 5.0,
            hp_base: 10.0,
            hp_per_level: 10.0,
            variance_min: -0.1,
            variance_max: 0.2,
            weapon_price_per_level: 100.0,
            armor_price_per_level: 150.0,
            price_multiplier: 5.0,
        }
    }
}

/// Damage formula, enrage behaviour, and PvP rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatConfig {
    /// Mitigation is `defense / defense_divisor`, capped at `max_reduction`.
    pub defense_divisor: f64,
    pub max_reduction: f64,
    /// d100 rolls strictly above this are critical.
    pub crit_threshold: u32,
    /// d100 rolls strictly below this miss.
    pub miss_threshold: u32,
    pub crit_min: f64,
    pub crit_max: f64,
    pub miss_min: f64,
    pub miss_max: f64,
    pub enrage_hp_ratio: f64,
    pub enrage_chance: f64,
    pub enrage_attack_multiplier: f64,
    pub enrage_life_steal_ratio: f64,
    pub pvp_round_cap: u32,
    pub compensation_start: f64,
    pub compensation_step: f64,
    pub compensation_floor: f64,
    /// Rounds written to the battle log verbatim.
    pub logged_rounds: u32,
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self {
            defense_divisor: 1000.0,
            max_reduction: 0.8,
            crit_threshold: 80,
            miss_threshold: 20,
            crit_min: 1.5,
            crit_max: 1.8,
            miss_min: 0.5,
            miss_max: 0.7,
            enrage_hp_ratio: 0.3,
            enrage_chance: 0.4,
            enrage_attack_multiplier: 1.5,
            enrage_life_steal_ratio: 0.3,
            pvp_round_cap: 10,
            compensation_start: 0.10,
            compensation_step: 0.01,
            compensation_floor: 0.01,
            logged_rounds: 4,
        }
    }
}

impl CombatConfig {
    fn validate(&self) -> RulesResult<()> {
        if self.defense_divisor <= 0.0 {
            return Err(RulesError::InvalidConfig("defense divisor must be positive".to_string()));
        }
        if !(0.0..1.0).contains(&self.max_reduction) {
            return Err(RulesError::InvalidConfig(
                "max reduction must be within 0..1".to_string(),
            ));
        }
        if self.miss_threshold > self.crit_threshold || self.crit_threshold > 100 {
            return Err(RulesError::InvalidConfig(format!(
                "roll thresholds out of order: miss {} crit {}",
                self.miss_threshold, self.crit_threshold
            )));
        }
        if self.crit_min > self.crit_max || self.miss_min > self.miss_max {
            return Err(RulesError::InvalidConfig("multiplier ranges are inverted".to_string()));
        }
        if self.pvp_round_cap == 0 {
            return Err(RulesError::InvalidConfig("pvp round cap must be at least 1".to_string()));
        }
        Ok(())
    }
}

/// Drop and liquidation rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LootConfig {
    pub drop_chance_percent: u32,
    /// Share of the price paid out when an item is liquidated, rounded down.
    pub liquidation_percent: i64,
    /// Drops roll a level within this many levels of the target.
    pub level_spread: u32,
}

impl Default for LootConfig {
    fn default() -> Self {
        Self {
            drop_chance_percent: 15,
            liquidation_percent: 80,
            level_spread: 10,
        }
    }
}

/// Victory rewards against monsters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RewardConfig {
    /// Extra experience per player level (0.04 = +4% per level).
    pub exp_bonus_per_level: f64,
    /// Gold share per player level, capped at the full bounty.
    pub gold_share_per_level: f64,
}

impl Default for RewardConfig {
    fn default() -> Self {
        Self {
            exp_bonus_per_level: 0.04,
            gold_share_per_level: 0.1,
        }
    }
}

/// Monster spawning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonsterConfig {
    pub level_spread: u32,
    pub growth_per_level: f64,
    pub mutation_chance: f64,
    pub mutant_hp: f64,
    pub mutant_attack: f64,
    pub mutant_defense: f64,
    pub mutant_bounty: f64,
}

impl Default for MonsterConfig {
    fn default() -> Self {
        Self {
            level_spread: 2,
            growth_per_level: 0.3,
            mutation_chance: 0.15,
            mutant_hp: 1.5,
            mutant_attack: 1.3,
            mutant_defense: 1.2,
            mutant_bounty: 1.5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(BalanceConfig::default().validate().is_ok());
    }

    #[test]
    fn test_shipped_balance_file_matches_defaults() {
        let source = include_str!("../data/balance.toml");
        let config = BalanceConfig::from_toml_str(source).unwrap();
        assert_eq!(config, BalanceConfig::default());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = BalanceConfig::from_toml_str("[loot]\ndrop_chance_percent = 40\n").unwrap();
        assert_eq!(config.loot.drop_chance_percent, 40);
        assert_eq!(config.loot.liquidation_percent, 80);
        assert_eq!(config.rarity, RarityTable::default());
    }

    #[test]
    fn test_rarity_draw_bands() {
        let table = RarityTable::default();
        assert_eq!(table.draw(0.0).unwrap().rarity, Rarity::Common);
        assert_eq!(table.draw(0.34).unwrap().rarity, Rarity::Common);

        let tier = table.draw(0.36).unwrap();
        assert_eq!(tier.rarity, Rarity::Uncommon);
        assert_eq!(tier.skill_count, 1);
        assert!((tier.power_factor - 1.4).abs() < 1e-9);

        assert_eq!(table.draw(0.70).unwrap().rarity, Rarity::Rare);
        assert_eq!(table.draw(0.90).unwrap().rarity, Rarity::Epic);
        assert_eq!(table.draw(0.99).unwrap().rarity, Rarity::Legendary);
    }

    #[test]
    fn test_rarity_draw_fallback() {
        let table = RarityTable::default();
        // Anything past the accumulated total lands on the last tier.
        assert_eq!(table.draw(1.5).unwrap().rarity, Rarity::Legendary);
    }

    #[test]
    fn test_empty_table_draws_nothing() {
        let table = RarityTable { tiers: Vec::new() };
        assert!(table.draw(0.2).is_none());
    }

    #[test]
    fn test_rejects_probabilities_not_summing_to_one() {
        let mut config = BalanceConfig::default();
        config.rarity.tiers[0].probability = 0.5;
        assert!(matches!(config.validate(), Err(RulesError::InvalidConfig(_))));
    }

    #[test]
    fn test_rejects_too_many_skills() {
        let mut config = BalanceConfig::default();
        config.rarity.tiers[4].skill_count = 5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_duplicate_rarity() {
        let mut config = BalanceConfig::default();
        config.rarity.tiers[1].rarity = Rarity::Common;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_inverted_thresholds() {
        let mut config = BalanceConfig::default();
        config.combat.miss_threshold = 90;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let err = BalanceConfig::load("/definitely/not/here.toml").unwrap_err();
        assert!(matches!(err, RulesError::ConfigIo { .. }));
    }
}
