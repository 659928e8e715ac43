//! Equipment Generator - procedural weapons and armor.
//!
//! Generation runs in a fixed order:
//! 1. **Rarity**: weighted draw from the rarity table (skill count, power factor)
//! 2. **Slot**: the requested slot, or a coin flip
//! 3. **Name**: prefix and base name once the item carries two or more skills
//! 4. **Level**: within the loot level spread of the target, clamped to `1..=100`
//! 5. **Stats**: linear in level, scaled by power factor and a variance roll
//! 6. **Skills**: distinct generators drawn from the slot's candidate pool

mod names;

pub use names::*;

use game_rules::{
    BalanceConfig, Equipment, EquipmentConfig, EquipmentId, EquipmentSlot, Level, RarityTable,
    RulesError, StatBlock,
};

use crate::catalog::SkillCatalog;
use crate::error::EngineResult;
use crate::rng::GameRng;

/// Rolled base stats and price before skills are attached.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BaseRoll {
    pub bonuses: StatBlock,
    pub price: i64,
}

/// Produces fully specified equipment instances.
#[derive(Debug, Clone)]
pub struct EquipmentGenerator {
    rarity: RarityTable,
    formulas: EquipmentConfig,
    level_spread: u32,
    catalog: SkillCatalog,
}

impl EquipmentGenerator {
    /// Build a generator with the standard skill catalog.
    pub fn new(config: &BalanceConfig) -> Self {
        Self::with_catalog(config, SkillCatalog::standard())
    }

    pub fn with_catalog(config: &BalanceConfig, catalog: SkillCatalog) -> Self {
        Self {
            rarity: config.rarity.clone(),
            formulas: config.equipment.clone(),
            level_spread: config.loot.level_spread,
            catalog,
        }
    }

    pub fn catalog(&self) -> &SkillCatalog {
        &self.catalog
    }

    /// Generate one item for a character at `target`. Fails only when the
    /// rarity table has no tiers.
    pub fn generate(
        &self,
        target: Level,
        slot: Option<EquipmentSlot>,
        rng: &mut GameRng,
    ) -> EngineResult<Equipment> {
        let tier = self
            .rarity
            .draw(rng.uniform())
            .cloned()
            .ok_or_else(|| RulesError::InvalidConfig("rarity table is empty".to_string()))?;
        let slot = slot.unwrap_or_else(|| {
            if rng.coin_flip() {
                EquipmentSlot::Weapon
            } else {
                EquipmentSlot::Armor
            }
        });
        let name = self.synthesize_name(slot, tier.skill_count, rng);
        let level = self.roll_level(target, rng);
        let base = self.roll_base(slot, level, tier.power_factor, rng);
        let skills = self
            .catalog
            .roll(slot, tier.skill_count, tier.power_factor, rng);

        let equipment = Equipment {
            id: EquipmentId::new(),
            slot,
            name,
            rarity: tier.rarity,
            level: level.get(),
            attack_bonus: base.bonuses.attack,
            defense_bonus: base.bonuses.defense,
            max_hp_bonus: base.bonuses.max_hp,
            price: base.price,
            skills,
        };
        tracing::info!(
            id = %equipment.id,
            name = %equipment.name,
            rarity = %equipment.rarity,
            level = equipment.level,
            %slot,
            "generated equipment"
        );
        Ok(equipment)
    }

    /// Generate from untyped request values, rejecting a level outside
    /// `1..=100` or an unknown slot name.
    pub fn generate_for(
        &self,
        target_level: u32,
        slot: Option<&str>,
        rng: &mut GameRng,
    ) -> EngineResult<Equipment> {
        let target = Level::new(target_level)?;
        let slot = slot.map(str::parse::<EquipmentSlot>).transpose()?;
        self.generate(target, slot, rng)
    }

    /// Bare base name below two skills, prefixed from two, and marked
    /// exceptional at four.
    pub fn synthesize_name(&self, slot: EquipmentSlot, skill_count: usize, rng: &mut GameRng) -> String {
        let (prefixes, bases) = match slot {
            EquipmentSlot::Weapon => (WEAPON_PREFIXES, WEAPON_NAMES),
            EquipmentSlot::Armor => (ARMOR_PREFIXES, ARMOR_NAMES),
        };
        let base = rng.choose(bases).copied().unwrap_or("Gear");
        if skill_count < 2 {
            return base.to_string();
        }
        let prefix = rng.choose(prefixes).copied().unwrap_or_default();
        let name = format!("{prefix} {base}");
        if skill_count >= 4 {
            format!("{EXCEPTIONAL} {name}")
        } else {
            name
        }
    }

    /// A level within the spread around `target`.
    pub fn roll_level(&self, target: Level, rng: &mut GameRng) -> Level {
        let spread = self.level_spread as i64;
        let lo = Level::clamped(target.get() as i64 - spread);
        let hi = Level::clamped(target.get() as i64 + spread);
        Level::clamped(rng.range_inclusive(lo.get() as i64, hi.get() as i64))
    }

    /// Slot-specific bonuses and price for an item of `level`.
    pub fn roll_base(
        &self,
        slot: EquipmentSlot,
        level: Level,
        power_factor: f64,
        rng: &mut GameRng,
    ) -> BaseRoll {
        let f = &self.formulas;
        let lvl = level.get() as f64;
        let linear = f.stat_base + f.stat_per_level * lvl;
        match slot {
            EquipmentSlot::Weapon => {
                let attack = (linear * power_factor * self.variance(rng)).round() as i64;
                BaseRoll {
                    bonuses: StatBlock::new(0, attack, 0),
                    price: (f.weapon_price_per_level * lvl * power_factor * f.price_multiplier).round()
                        as i64,
                }
            }
            EquipmentSlot::Armor => {
                let defense = (linear * power_factor * self.variance(rng)).round() as i64;
                let hp_linear = f.hp_base + f.hp_per_level * lvl;
                let max_hp = (hp_linear * power_factor * self.variance(rng)).round() as i64;
                BaseRoll {
                    bonuses: StatBlock::new(max_hp, 0, defense),
                    price: (f.armor_price_per_level * lvl * power_factor * f.price_multiplier).round()
                        as i64,
                }
            }
        }
    }

    fn variance(&self, rng: &mut GameRng) -> f64 {
        1.0 + rng.uniform_range(self.formulas.variance_min, self.formulas.variance_max)
    }
}
