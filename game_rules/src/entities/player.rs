//! Player records - the typed value object persisted by the record store.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{Combatant, Equipment, Level, PlayerId, StatBlock};
use crate::config::ProgressionConfig;
use crate::error::{RulesError, RulesResult};
use crate::mechanics::{CombatantKind, EquipmentSlot};
use crate::progression::ProgressionCurve;

/// A player's persistent progression.
///
/// Validated once when it crosses the storage boundary (`from_json`); the
/// engine only ever sees snapshots of it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub id: PlayerId,
    pub nickname: String,
    pub level: Level,
    pub exp: u64,
    pub hp: i64,
    pub max_hp: i64,
    pub attack: i64,
    pub defense: i64,
    pub gold: i64,

    /// Unequipped equipment, keyed by display name.
    #[serde(default)]
    pub inventory: BTreeMap<String, Equipment>,
    pub equipped_weapon: Option<Equipment>,
    pub equipped_armor: Option<Equipment>,
}

impl PlayerRecord {
    /// A fresh level-1 player at full health with starting gold.
    pub fn new(nickname: impl Into<String>, config: &ProgressionConfig) -> Self {
        Self {
            id: PlayerId::new(),
            nickname: nickname.into(),
            level: Level::MIN,
            exp: 0,
            hp: config.base_max_hp,
            max_hp: config.base_max_hp,
            attack: config.base_attack,
            defense: config.base_defense,
            gold: config.starting_gold,
            inventory: BTreeMap::new(),
            equipped_weapon: None,
            equipped_armor: None,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    pub fn stats(&self) -> StatBlock {
        StatBlock::new(self.max_hp, self.attack, self.defense)
    }

    /// Build the combat view for one encounter.
    pub fn combatant(&self) -> RulesResult<Combatant> {
        Combatant::new(
            self.nickname.clone(),
            self.level.get(),
            self.hp,
            self.stats(),
            CombatantKind::Player,
        )
    }

    /// The item currently worn in `slot`.
    pub fn equipped(&self, slot: EquipmentSlot) -> Option<&Equipment> {
        match slot {
            EquipmentSlot::Weapon => self.equipped_weapon.as_ref(),
            EquipmentSlot::Armor => self.equipped_armor.as_ref(),
        }
    }

    /// Replace the item in `slot`, returning whatever was there.
    pub fn set_equipped(&mut self, slot: EquipmentSlot, item: Option<Equipment>) -> Option<Equipment> {
        match slot {
            EquipmentSlot::Weapon => std::mem::replace(&mut self.equipped_weapon, item),
            EquipmentSlot::Armor => std::mem::replace(&mut self.equipped_armor, item),
        }
    }

    /// Wear the inventory item called `name`. Whatever the slot held goes
    /// back into the inventory. Returns the stat change.
    pub fn equip(&mut self, name: &str, curve: &ProgressionCurve) -> RulesResult<StatBlock> {
        let slot = self
            .inventory
            .get(name)
            .map(|item| item.slot)
            .ok_or_else(|| RulesError::NotInInventory(name.to_string()))?;
        if let Some(worn) = self.equipped(slot) {
            if worn.name != name && self.inventory.contains_key(&worn.name) {
                return Err(RulesError::DuplicateItem(worn.name.clone()));
            }
        }
        let Some(item) = self.inventory.remove(name) else {
            return Err(RulesError::NotInInventory(name.to_string()));
        };
        if let Some(previous) = self.set_equipped(slot, Some(item)) {
            self.inventory.insert(previous.name.clone(), previous);
        }
        Ok(self.recompute_stats(curve))
    }

    /// Move the item worn in `slot` back into the inventory. Current hp is
    /// clamped if max hp drops. Returns the stat change.
    pub fn unequip(&mut self, slot: EquipmentSlot, curve: &ProgressionCurve) -> RulesResult<StatBlock> {
        let worn = self.equipped(slot).ok_or(RulesError::SlotEmpty(slot))?;
        if self.inventory.contains_key(&worn.name) {
            return Err(RulesError::DuplicateItem(worn.name.clone()));
        }
        if let Some(item) = self.set_equipped(slot, None) {
            self.inventory.insert(item.name.clone(), item);
        }
        Ok(self.recompute_stats(curve))
    }

    /// Sum of the bonuses of everything equipped.
    pub fn equipment_bonuses(&self) -> StatBlock {
        [EquipmentSlot::Weapon, EquipmentSlot::Armor]
            .into_iter()
            .filter_map(|slot| self.equipped(slot))
            .fold(StatBlock::default(), |acc, item| acc + item.bonuses())
    }

    /// Recompute attack, defense, and max hp from the level-derived base
    /// plus equipped bonuses. Current hp is clamped to the new maximum.
    /// Returns the change applied.
    pub fn recompute_stats(&mut self, curve: &ProgressionCurve) -> StatBlock {
        let before = self.stats();
        let after = curve.base_stats(self.level) + self.equipment_bonuses();
        self.max_hp = after.max_hp;
        self.attack = after.attack;
        self.defense = after.defense;
        self.hp = self.hp.clamp(0, self.max_hp);
        after - before
    }

    /// Check the record invariants.
    pub fn validate(&self) -> RulesResult<()> {
        if self.nickname.trim().is_empty() {
            return Err(RulesError::InvalidRecord(format!("player {} has no nickname", self.id)));
        }
        if self.max_hp <= 0 || self.hp < 0 || self.hp > self.max_hp {
            return Err(RulesError::InvalidRecord(format!(
                "player {} has hp {}/{}",
                self.nickname, self.hp, self.max_hp
            )));
        }
        if self.attack < 0 || self.defense < 0 {
            return Err(RulesError::InvalidRecord(format!(
                "player {} has negative stats",
                self.nickname
            )));
        }
        for (name, item) in &self.inventory {
            if *name != item.name {
                return Err(RulesError::InvalidRecord(format!(
                    "inventory key {name} does not match item {}",
                    item.name
                )));
            }
            item.validate()?;
        }
        for slot in [EquipmentSlot::Weapon, EquipmentSlot::Armor] {
            if let Some(item) = self.equipped(slot) {
                if item.slot != slot {
                    return Err(RulesError::InvalidRecord(format!(
                        "{} equipped in the {slot} slot",
                        item.name
                    )));
                }
                item.validate()?;
            }
        }
        Ok(())
    }

    pub fn to_json(&self) -> RulesResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Decode and validate a persisted player row.
    pub fn from_json(json: &str) -> RulesResult<Self> {
        let record: PlayerRecord = serde_json::from_str(json)?;
        if let Err(err) = record.validate() {
            tracing::warn!(player = %record.id, %err, "rejected player record");
            return Err(err);
        }
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::EquipmentId;
    use crate::mechanics::Rarity;

    fn sword(attack: i64) -> Equipment {
        Equipment {
            id: EquipmentId::new(),
            slot: EquipmentSlot::Weapon,
            name: "Longsword".to_string(),
            rarity: Rarity::Common,
            level: 3,
            attack_bonus: attack,
            defense_bonus: 0,
            max_hp_bonus: 0,
            price: 1_650,
            skills: Vec::new(),
        }
    }

    #[test]
    fn test_new_player() {
        let player = PlayerRecord::new("Aria", &ProgressionConfig::default());
        assert_eq!(player.level, Level::MIN);
        assert_eq!(player.hp, 200);
        assert_eq!(player.gold, 5000);
        assert!(player.is_alive());
        assert!(player.inventory.is_empty());
    }

    #[test]
    fn test_combatant_view() {
        let player = PlayerRecord::new("Aria", &ProgressionConfig::default());
        let view = player.combatant().unwrap();
        assert_eq!(view.display_name, "Aria");
        assert_eq!(view.kind, CombatantKind::Player);
        assert_eq!(view.attack, 20);
    }

    #[test]
    fn test_recompute_with_weapon() {
        let curve = ProgressionCurve::default();
        let mut player = PlayerRecord::new("Aria", curve.config());
        player.equipped_weapon = Some(sword(35));
        let delta = player.recompute_stats(&curve);
        assert_eq!(delta, StatBlock::new(0, 35, 0));
        assert_eq!(player.attack, 55);
    }

    #[test]
    fn test_recompute_clamps_hp() {
        let curve = ProgressionCurve::default();
        let mut player = PlayerRecord::new("Aria", curve.config());
        player.max_hp = 500;
        player.hp = 450;
        player.recompute_stats(&curve);
        assert_eq!(player.max_hp, 200);
        assert_eq!(player.hp, 200);
    }

    #[test]
    fn test_set_equipped_returns_previous() {
        let mut player = PlayerRecord::new("Aria", &ProgressionConfig::default());
        assert!(player.set_equipped(EquipmentSlot::Weapon, Some(sword(10))).is_none());
        let old = player.set_equipped(EquipmentSlot::Weapon, Some(sword(20)));
        assert_eq!(old.map(|s| s.attack_bonus), Some(10));
    }

    fn plate(defense: i64, max_hp: i64) -> Equipment {
        Equipment {
            id: EquipmentId::new(),
            slot: EquipmentSlot::Armor,
            name: "Plate Mail".to_string(),
            rarity: Rarity::Rare,
            level: 3,
            attack_bonus: 0,
            defense_bonus: defense,
            max_hp_bonus: max_hp,
            price: 2_400,
            skills: Vec::new(),
        }
    }

    #[test]
    fn test_equip_swaps_with_worn_item() {
        let curve = ProgressionCurve::default();
        let mut player = PlayerRecord::new("Aria", curve.config());
        let mut dagger = sword(5);
        dagger.name = "Dagger".to_string();
        player.equipped_weapon = Some(dagger.clone());
        player.recompute_stats(&curve);
        player.inventory.insert("Longsword".to_string(), sword(35));

        let delta = player.equip("Longsword", &curve).unwrap();
        assert_eq!(delta, StatBlock::new(0, 30, 0));
        assert_eq!(player.attack, 55);
        assert_eq!(player.equipped(EquipmentSlot::Weapon).map(|i| i.name.as_str()), Some("Longsword"));
        assert_eq!(player.inventory.get("Dagger"), Some(&dagger));
        assert!(!player.inventory.contains_key("Longsword"));
    }

    #[test]
    fn test_equip_unknown_item() {
        let curve = ProgressionCurve::default();
        let mut player = PlayerRecord::new("Aria", curve.config());
        assert_eq!(
            player.equip("Excalibur", &curve),
            Err(RulesError::NotInInventory("Excalibur".to_string()))
        );
    }

    #[test]
    fn test_equip_refuses_name_collision() {
        let curve = ProgressionCurve::default();
        let mut player = PlayerRecord::new("Aria", curve.config());
        player.equipped_weapon = Some(sword(5));
        let mut spare = sword(9);
        spare.name = "Dagger".to_string();
        player.inventory.insert("Dagger".to_string(), spare);
        player.inventory.insert("Longsword".to_string(), sword(12));
        assert_eq!(
            player.equip("Dagger", &curve),
            Err(RulesError::DuplicateItem("Longsword".to_string()))
        );
        assert_eq!(player.inventory.len(), 2);
    }

    #[test]
    fn test_unequip_clamps_hp() {
        let curve = ProgressionCurve::default();
        let mut player = PlayerRecord::new("Aria", curve.config());
        player.equipped_armor = Some(plate(15, 100));
        player.recompute_stats(&curve);
        player.hp = player.max_hp;
        assert_eq!(player.max_hp, 300);

        let delta = player.unequip(EquipmentSlot::Armor, &curve).unwrap();
        assert_eq!(delta, StatBlock::new(-100, 0, -15));
        assert_eq!(player.hp, 200);
        assert!(player.equipped_armor.is_none());
        assert!(player.inventory.contains_key("Plate Mail"));
        assert_eq!(
            player.unequip(EquipmentSlot::Armor, &curve),
            Err(RulesError::SlotEmpty(EquipmentSlot::Armor))
        );
    }

    #[test]
    fn test_json_boundary_rejects_bad_hp() {
        let mut player = PlayerRecord::new("Aria", &ProgressionConfig::default());
        let json = player.to_json().unwrap();
        assert_eq!(PlayerRecord::from_json(&json).unwrap(), player);

        player.hp = player.max_hp + 1;
        let json = player.to_json().unwrap();
        assert!(matches!(PlayerRecord::from_json(&json), Err(RulesError::InvalidRecord(_))));
    }

    #[test]
    fn test_json_boundary_rejects_level_zero() {
        let player = PlayerRecord::new("Aria", &ProgressionConfig::default());
        let json = player.to_json().unwrap().replace("\"level\":1", "\"level\":0");
        assert!(PlayerRecord::from_json(&json).is_err());
    }

    #[test]
    fn test_validate_rejects_misplaced_equipment() {
        let mut player = PlayerRecord::new("Aria", &ProgressionConfig::default());
        player.equipped_armor = Some(sword(10));
        assert!(player.validate().is_err());
    }
}
