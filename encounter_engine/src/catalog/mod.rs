//! Skill Catalog - registry of skill generators grouped by applicability.
//!
//! Weapons draw from the universal group plus the weapon group; armor draws
//! from the universal group plus the armor group. Generators are drawn
//! without replacement, so one item never carries two skills of the same
//! family and the `(family, name)` pairs on an item are always distinct.

mod families;
mod names;

pub use families::*;
pub use names::skill_names;

use game_rules::{EquipmentSlot, Skill, SkillFamily};
use std::fmt;

use crate::rng::GameRng;

/// Materializes a concrete skill from a power factor.
pub type SkillGenerator = fn(&mut GameRng, f64) -> Skill;

/// A registered generator and the family it produces.
#[derive(Clone, Copy)]
pub struct SkillEntry {
    pub family: SkillFamily,
    pub generate: SkillGenerator,
}

impl fmt::Debug for SkillEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SkillEntry").field("family", &self.family).finish_non_exhaustive()
    }
}

impl SkillEntry {
    pub const fn new(family: SkillFamily, generate: SkillGenerator) -> Self {
        Self { family, generate }
    }
}

/// The three generator groups.
#[derive(Debug, Clone)]
pub struct SkillCatalog {
    universal: Vec<SkillEntry>,
    weapon: Vec<SkillEntry>,
    armor: Vec<SkillEntry>,
}

impl Default for SkillCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

impl SkillCatalog {
    /// Build a catalog from explicit groups.
    pub fn new(universal: Vec<SkillEntry>, weapon: Vec<SkillEntry>, armor: Vec<SkillEntry>) -> Self {
        Self {
            universal,
            weapon,
            armor,
        }
    }

    /// All fifteen families in their shipped groups.
    pub fn standard() -> Self {
        use SkillFamily::*;
        Self::new(
            vec![
                SkillEntry::new(ActiveImmunity, active_immunity),
                SkillEntry::new(PrecedenceImmunity, precedence_immunity),
                SkillEntry::new(StatBuff, stat_buff),
                SkillEntry::new(StatDebuff, stat_debuff),
            ],
            vec![
                SkillEntry::new(OneShotDamage, one_shot_damage),
                SkillEntry::new(DamageOverTime, damage_over_time),
                SkillEntry::new(TrueDamage, true_damage),
                SkillEntry::new(LifeStealOnce, life_steal_once),
                SkillEntry::new(LifeStealOverTime, life_steal_over_time),
                SkillEntry::new(Paralysis, paralysis),
            ],
            vec![
                SkillEntry::new(Reflect, reflect),
                SkillEntry::new(DamageAssimilate, damage_assimilate),
                SkillEntry::new(Shield, shield),
                SkillEntry::new(HealOnce, heal_once),
                SkillEntry::new(HealOverTime, heal_over_time),
            ],
        )
    }

    pub fn universal(&self) -> &[SkillEntry] {
        &self.universal
    }

    /// Generators an item in `slot` may draw from.
    pub fn candidates(&self, slot: EquipmentSlot) -> Vec<SkillEntry> {
        let specific = match slot {
            EquipmentSlot::Weapon => &self.weapon,
            EquipmentSlot::Armor => &self.armor,
        };
        self.universal.iter().chain(specific).copied().collect()
    }

    /// Draw `count` distinct generators for `slot` and materialize them.
    ///
    /// Returns fewer skills than requested only if the candidate pool is
    /// smaller than `count`.
    pub fn roll(
        &self,
        slot: EquipmentSlot,
        count: usize,
        power_factor: f64,
        rng: &mut GameRng,
    ) -> Vec<Skill> {
        if count == 0 {
            return Vec::new();
        }
        let candidates = self.candidates(slot);
        rng.sample(candidates.len(), count)
            .into_iter()
            .map(|i| (candidates[i].generate)(rng, power_factor))
            .collect()
    }
}
