//! Generated equipment instances.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::{EquipmentId, StatBlock, MAX_LEVEL};
use crate::config::MAX_SKILLS_PER_ITEM;
use crate::error::{RulesError, RulesResult};
use crate::mechanics::{EquipmentSlot, Rarity, Skill};

/// A fully specified piece of equipment. Immutable once generated.
///
/// Weapons only ever carry an attack bonus; armor only defense and max hp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Equipment {
    pub id: EquipmentId,
    pub slot: EquipmentSlot,
    pub name: String,
    pub rarity: Rarity,
    /// Character level the item was rolled for.
    pub level: u32,
    pub attack_bonus: i64,
    pub defense_bonus: i64,
    pub max_hp_bonus: i64,
    /// Currency value before liquidation.
    pub price: i64,
    pub skills: Vec<Skill>,
}

impl Equipment {
    /// Stat bonuses granted while equipped.
    pub fn bonuses(&self) -> StatBlock {
        StatBlock {
            max_hp: self.max_hp_bonus,
            attack: self.attack_bonus,
            defense: self.defense_bonus,
        }
    }

    /// Currency paid when the item is liquidated: `percent` of the price, rounded down.
    pub fn liquidation_value(&self, percent: i64) -> i64 {
        self.price.max(0) * percent / 100
    }

    /// True when no two skills share a `(family, name)` pair.
    pub fn has_unique_skills(&self) -> bool {
        let mut seen = HashSet::new();
        self.skills.iter().all(|s| seen.insert(s.key()))
    }

    /// Check the construction invariants. Used when a record crosses the
    /// storage boundary.
    pub fn validate(&self) -> RulesResult<()> {
        if self.name.trim().is_empty() {
            return Err(RulesError::InvalidRecord(format!("equipment {} has no name", self.id)));
        }
        if !(1..=MAX_LEVEL).contains(&self.level) {
            return Err(RulesError::InvalidRecord(format!(
                "equipment {} has level {}",
                self.id, self.level
            )));
        }
        let slot_consistent = match self.slot {
            EquipmentSlot::Weapon => self.defense_bonus == 0 && self.max_hp_bonus == 0,
            EquipmentSlot::Armor => self.attack_bonus == 0,
        };
        if !slot_consistent {
            return Err(RulesError::InvalidRecord(format!(
                "{} {} carries bonuses of the other slot",
                self.slot, self.id
            )));
        }
        if self.skills.len() > MAX_SKILLS_PER_ITEM {
            return Err(RulesError::InvalidRecord(format!(
                "equipment {} has {} skills",
                self.id,
                self.skills.len()
            )));
        }
        if !self.has_unique_skills() {
            return Err(RulesError::InvalidRecord(format!(
                "equipment {} repeats a skill",
                self.id
            )));
        }
        if self.skills.iter().any(|s| s.trigger_probability > 100) {
            return Err(RulesError::InvalidRecord(format!(
                "equipment {} has a trigger probability above 100",
                self.id
            )));
        }
        Ok(())
    }

    pub fn to_json(&self) -> RulesResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Decode and validate a persisted equipment row.
    pub fn from_json(json: &str) -> RulesResult<Self> {
        let equipment: Equipment = serde_json::from_str(json)?;
        equipment.validate()?;
        Ok(equipment)
    }

    /// Plain-text equipment card.
    pub fn describe(&self) -> String {
        let mut lines = vec![
            format!("{} [{}] ({})", self.slot_label(), self.name, self.rarity),
            format!("  Level: {}", self.level),
            format!("  Rarity: {}", self.rarity.stars()),
            format!("  Value: {} gold", self.price),
        ];
        if self.attack_bonus != 0 {
            lines.push(format!("  Attack bonus: {}", self.attack_bonus));
        }
        if self.defense_bonus != 0 {
            lines.push(format!("  Defense bonus: {}", self.defense_bonus));
        }
        if self.max_hp_bonus != 0 {
            lines.push(format!("  Max HP bonus: {}", self.max_hp_bonus));
        }
        if !self.skills.is_empty() {
            lines.push("  Skills:".to_string());
            for skill in &self.skills {
                lines.push(format!("    - {}", skill.summary()));
            }
        }
        lines.join("\n")
    }

    fn slot_label(&self) -> &'static str {
        match self.slot {
            EquipmentSlot::Weapon => "Weapon",
            EquipmentSlot::Armor => "Armor",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mechanics::{DependentStat, SkillDuration, SkillFamily, TriggerLimit};

    fn reflect_skill(name: &str) -> Skill {
        Skill {
            name: name.to_string(),
            family: SkillFamily::Reflect,
            trigger_probability: 100,
            duration: SkillDuration::Instant,
            trigger_limit: TriggerLimit::Unlimited,
            dependent_stat: DependentStat::SelfDefense,
            magnitude: 12.0,
            description: "Returns 12% of your defense to attackers.".to_string(),
        }
    }

    fn armor() -> Equipment {
        Equipment {
            id: EquipmentId::nil(),
            slot: EquipmentSlot::Armor,
            name: "Frostwarden Mantle".to_string(),
            rarity: Rarity::Rare,
            level: 12,
            attack_bonus: 0,
            defense_bonus: 120,
            max_hp_bonus: 210,
            price: 15_300,
            skills: vec![reflect_skill("Riposte")],
        }
    }

    #[test]
    fn test_liquidation_rounds_down() {
        let mut item = armor();
        item.price = 1_001;
        assert_eq!(item.liquidation_value(80), 800);
        item.price = 5;
        assert_eq!(item.liquidation_value(80), 4);
    }

    #[test]
    fn test_bonuses() {
        assert_eq!(armor().bonuses(), StatBlock::new(210, 0, 120));
    }

    #[test]
    fn test_validate_rejects_cross_slot_bonus() {
        let mut item = armor();
        item.attack_bonus = 5;
        assert!(matches!(item.validate(), Err(RulesError::InvalidRecord(_))));
    }

    #[test]
    fn test_validate_rejects_duplicate_skill() {
        let mut item = armor();
        item.skills.push(reflect_skill("Riposte"));
        assert!(!item.has_unique_skills());
        assert!(item.validate().is_err());
    }

    #[test]
    fn test_same_name_different_family_is_unique() {
        let mut item = armor();
        let mut other = reflect_skill("Riposte");
        other.family = SkillFamily::DamageAssimilate;
        item.skills.push(other);
        assert!(item.has_unique_skills());
    }

    #[test]
    fn test_json_boundary() {
        let item = armor();
        let json = item.to_json().unwrap();
        assert_eq!(Equipment::from_json(&json).unwrap(), item);
        assert!(Equipment::from_json("{\"id\": 3}").is_err());
    }

    #[test]
    fn test_describe() {
        let card = armor().describe();
        assert!(card.starts_with("Armor [Frostwarden Mantle] (Rare)"));
        assert!(card.contains("  Rarity: ***"));
        assert!(card.contains("  Defense bonus: 120"));
        assert!(card.contains("  Max HP bonus: 210"));
        assert!(!card.contains("Attack bonus"));
        assert!(card.contains("    - [Riposte]: Returns 12% of your defense to attackers. 100% chance to trigger."));
    }
}
