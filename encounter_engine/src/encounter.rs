//! Encounter orchestrator - the thin command layer over the engines.
//!
//! Every command runs under one lock guarding both stores: load snapshots,
//! run the engines, apply their deltas, persist. The engines themselves never
//! see the stores.

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use game_rules::{
    BalanceConfig, CombatMode, Equipment, EquipmentId, EquipmentSlot, LevelProgress, PlayerId,
    PlayerRecord, ProgressionCurve,
};

use crate::combat::{CombatEngine, CombatOutcome, RewardTable, Rewards, Side};
use crate::error::{EngineError, EngineResult};
use crate::generator::EquipmentGenerator;
use crate::loot::{LootOutcome, LootReconciler};
use crate::monster::{Bestiary, Monster};
use crate::rng::GameRng;
use crate::store::{EquipmentStore, PlayerStore};

/// Result of one adventure command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdventureReport {
    pub monster: Monster,
    pub outcome: CombatOutcome,
    /// Present only on victory.
    pub rewards: Option<Rewards>,
    pub progress: Option<LevelProgress>,
    pub loot: Option<LootOutcome>,
    /// The player as persisted after the command.
    pub player: PlayerRecord,
    pub text: String,
}

impl AdventureReport {
    pub fn victory(&self) -> bool {
        self.outcome.winner == Side::A
    }
}

/// Result of one duel command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DuelReport {
    pub outcome: CombatOutcome,
    pub winner: PlayerId,
    pub loser: PlayerId,
    /// Gold moved from loser to winner.
    pub compensation: i64,
    /// The loser's inventory item handed to the winner, reconciled against
    /// the winner's holdings. `None` when the loser carried nothing.
    pub forfeit: Option<LootOutcome>,
    pub text: String,
}

struct Stores<P, E> {
    players: P,
    equipment: E,
}

pub struct EncounterOrchestrator<P: PlayerStore, E: EquipmentStore> {
    stores: Mutex<Stores<P, E>>,
    curve: ProgressionCurve,
    generator: EquipmentGenerator,
    combat: CombatEngine,
    rewards: RewardTable,
    loot: LootReconciler,
    bestiary: Bestiary,
}

impl<P: PlayerStore, E: EquipmentStore> EncounterOrchestrator<P, E> {
    /// Orchestrator with the default balance.
    pub fn new(players: P, equipment: E) -> Self {
        Self::with_balance(&BalanceConfig::default(), players, equipment)
    }

    pub fn with_balance(config: &BalanceConfig, players: P, equipment: E) -> Self {
        let curve = ProgressionCurve::new(config.progression.clone());
        Self {
            stores: Mutex::new(Stores { players, equipment }),
            generator: EquipmentGenerator::new(config),
            combat: CombatEngine::new(config.combat.clone()),
            rewards: RewardTable::new(config.rewards.clone(), &config.loot),
            loot: LootReconciler::new(curve.clone(), config.loot.liquidation_percent),
            bestiary: Bestiary::new(config.monsters.clone()),
            curve,
        }
    }

    pub fn curve(&self) -> &ProgressionCurve {
        &self.curve
    }

    pub fn bestiary(&self) -> &Bestiary {
        &self.bestiary
    }

    /// Create a fresh level-1 player.
    pub fn register(&self, nickname: &str) -> EngineResult<PlayerRecord> {
        let nickname = nickname.trim();
        let mut stores = self.stores.lock();
        if stores.players.find_by_nickname(nickname).is_some() {
            return Err(EngineError::NicknameTaken(nickname.to_string()));
        }
        let record = PlayerRecord::new(nickname, self.curve.config());
        stores.players.save(&record)?;
        tracing::info!(player = %record.id, nickname, "player registered");
        Ok(record)
    }

    pub fn player(&self, id: PlayerId) -> EngineResult<PlayerRecord> {
        self.stores.lock().players.load(id)
    }

    pub fn find_player(&self, nickname: &str) -> EngineResult<Option<PlayerRecord>> {
        let stores = self.stores.lock();
        stores
            .players
            .find_by_nickname(nickname)
            .map(|id| stores.players.load(id))
            .transpose()
    }

    pub fn equipment(&self, id: EquipmentId) -> EngineResult<Equipment> {
        self.stores.lock().equipment.load(id)
    }

    /// Overwrite a player row, registering any held equipment that the
    /// equipment store does not know yet.
    pub fn save_player(&self, record: &PlayerRecord) -> EngineResult<()> {
        let mut stores = self.stores.lock();
        let held = record
            .inventory
            .values()
            .chain(record.equipped_weapon.iter())
            .chain(record.equipped_armor.iter());
        for item in held {
            if !stores.equipment.contains(item.id) {
                stores.equipment.insert(item)?;
            }
        }
        stores.players.save(record)
    }

    /// Wear an inventory item by name. Returns the updated record.
    pub fn equip(&self, player_id: PlayerId, name: &str) -> EngineResult<PlayerRecord> {
        let mut stores = self.stores.lock();
        let mut player = stores.players.load(player_id)?;
        let delta = player.equip(name, &self.curve)?;
        stores.players.save(&player)?;
        tracing::info!(player = %player.id, item = name, attack = delta.attack, defense = delta.defense, "item equipped");
        Ok(player)
    }

    /// Take off whatever is worn in `slot`. Returns the updated record.
    pub fn unequip(&self, player_id: PlayerId, slot: EquipmentSlot) -> EngineResult<PlayerRecord> {
        let mut stores = self.stores.lock();
        let mut player = stores.players.load(player_id)?;
        player.unequip(slot, &self.curve)?;
        stores.players.save(&player)?;
        tracing::info!(player = %player.id, %slot, "item unequipped");
        Ok(player)
    }

    /// Hunt a monster in `scene`: fight, collect rewards, level up, and
    /// reconcile any drop.
    pub fn adventure(&self, player_id: PlayerId, scene: &str, rng: &mut GameRng) -> EngineResult<AdventureReport> {
        let mut stores = self.stores.lock();
        let mut player = stores.players.load(player_id)?;
        if !player.is_alive() {
            return Err(EngineError::Defeated(player.nickname));
        }

        let monster = self.bestiary.spawn(player.level, scene, rng)?;
        let outcome = self
            .combat
            .resolve(player.combatant()?, monster.combatant()?, CombatMode::Pve, rng)?;
        player.hp = outcome.a.hp();
        let mut text = vec![outcome.log.clone(), String::new()];

        let (rewards, progress, loot) = if outcome.winner == Side::A {
            let fought_at = player.level;
            let rewards = self.rewards.victory(fought_at.get(), monster.bounty, rng);
            player.gold += rewards.gold;
            let progress = self.curve.apply_gain(player.level, player.exp, rewards.exp);
            player.level = progress.level;
            player.exp = progress.exp;

            text.push("Victory!".to_string());
            text.push(format!("Gained {} exp", rewards.exp));
            text.push(format!("Gained {} gold", rewards.gold));
            if progress.levels_gained > 0 {
                let growth = player.recompute_stats(&self.curve);
                text.push(format!("Level up! Now level {}", progress.level.get()));
                text.push(format!("Max HP +{}", growth.max_hp));
                text.push(format!("Attack +{}", growth.attack));
                text.push(format!("Defense +{}", growth.defense));
            }
            text.push(format!(
                "[{}] Lv.{}  Exp: {}/{}",
                player.nickname,
                player.level.get(),
                player.exp,
                self.curve.required_exp(player.level)
            ));

            let loot = if rewards.drop {
                let drop = self.generator.generate(fought_at, None, rng)?;
                stores.equipment.insert(&drop)?;
                text.push(String::new());
                text.push(format!("{} dropped an item!", monster.name));
                text.push(drop.describe());
                let loot = self.loot.reconcile(drop, &player);
                loot.apply_to(&mut player, &self.curve);
                for id in &loot.deltas.destroyed {
                    if stores.equipment.remove(*id)?.is_none() {
                        tracing::warn!(equipment = %id, "liquidated item was not in the equipment store");
                    }
                }
                text.push(loot.explanation.clone());
                Some(loot)
            } else {
                None
            };
            (Some(rewards), Some(progress), loot)
        } else {
            player.hp = 0;
            text.push("Defeat!".to_string());
            (None, None, None)
        };

        stores.players.save(&player)?;
        tracing::info!(
            player = %player.id,
            monster = %monster.name,
            victory = outcome.winner == Side::A,
            level = player.level.get(),
            "adventure finished"
        );
        Ok(AdventureReport {
            monster,
            outcome,
            rewards,
            progress,
            loot,
            player,
            text: text.join("\n"),
        })
    }

    /// Fight another player. The loser pays a round-dependent share of their
    /// gold to the winner and forfeits one random inventory item; both keep
    /// the hp they ended with.
    pub fn duel(&self, a_id: PlayerId, b_id: PlayerId, rng: &mut GameRng) -> EngineResult<DuelReport> {
        if a_id == b_id {
            return Err(EngineError::SelfDuel);
        }
        let mut stores = self.stores.lock();
        let mut a = stores.players.load(a_id)?;
        let mut b = stores.players.load(b_id)?;

        let outcome = self
            .combat
            .resolve(a.combatant()?, b.combatant()?, CombatMode::Pvp, rng)?;
        a.hp = outcome.a.hp();
        b.hp = outcome.b.hp();

        let rate = outcome
            .compensation_rate
            .unwrap_or_else(|| self.combat.compensation_rate(outcome.rounds));
        let (winner, loser) = match outcome.winner {
            Side::A => (&mut a, &mut b),
            Side::B => (&mut b, &mut a),
        };
        let compensation = (loser.gold.max(0) as f64 * rate) as i64;
        loser.gold -= compensation;
        winner.gold += compensation;
        let mut text = vec![
            outcome.log.clone(),
            String::new(),
            format!("{} wins and takes {compensation} gold from {}", winner.nickname, loser.nickname),
        ];

        let names: Vec<String> = loser.inventory.keys().cloned().collect();
        let forfeit = match rng.choose(&names).and_then(|name| loser.inventory.remove(name)) {
            Some(item) => {
                text.push(format!("{} claims {}'s {}!", winner.nickname, loser.nickname, item.name));
                let loot = self.loot.reconcile(item, winner);
                loot.apply_to(winner, &self.curve);
                for id in &loot.deltas.destroyed {
                    if stores.equipment.remove(*id)?.is_none() {
                        tracing::warn!(equipment = %id, "liquidated item was not in the equipment store");
                    }
                }
                text.push(loot.explanation.clone());
                Some(loot)
            }
            None => None,
        };
        let (winner_id, loser_id) = (winner.id, loser.id);

        stores.players.save(&a)?;
        stores.players.save(&b)?;
        tracing::info!(
            winner = %winner_id,
            loser = %loser_id,
            rounds = outcome.rounds,
            compensation,
            forfeit = forfeit.is_some(),
            "duel finished"
        );
        Ok(DuelReport {
            outcome,
            winner: winner_id,
            loser: loser_id,
            compensation,
            forfeit,
            text: text.join("\n"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loot::LootDecision;
    use crate::store::{MemoryEquipmentStore, MemoryPlayerStore};
    use game_rules::{Level, Rarity, RulesError};

    type Orchestrator = EncounterOrchestrator<MemoryPlayerStore, MemoryEquipmentStore>;

    fn orchestrator() -> Orchestrator {
        EncounterOrchestrator::new(MemoryPlayerStore::new(), MemoryEquipmentStore::new())
    }

    #[test]
    fn test_register_rejects_duplicate_nickname() {
        let orch = orchestrator();
        let aria = orch.register("Aria").unwrap();
        assert_eq!(orch.player(aria.id).unwrap(), aria);
        assert_eq!(orch.register(" Aria ").unwrap_err(), EngineError::NicknameTaken("Aria".to_string()));
        assert_eq!(orch.find_player("Aria").unwrap().map(|p| p.id), Some(aria.id));
        assert!(orch.find_player("Nobody").unwrap().is_none());
    }

    #[test]
    fn test_defeated_player_cannot_adventure() {
        let orch = orchestrator();
        let mut aria = orch.register("Aria").unwrap();
        aria.hp = 0;
        orch.save_player(&aria).unwrap();
        let mut rng = GameRng::seeded(81);
        assert_eq!(
            orch.adventure(aria.id, "Monster Den", &mut rng).unwrap_err(),
            EngineError::Defeated("Aria".to_string())
        );
    }

    #[test]
    fn test_unknown_scene_leaves_player_untouched() {
        let orch = orchestrator();
        let aria = orch.register("Aria").unwrap();
        let mut rng = GameRng::seeded(82);
        assert!(matches!(
            orch.adventure(aria.id, "Nowhere", &mut rng),
            Err(EngineError::UnknownScene(_))
        ));
        assert_eq!(orch.player(aria.id).unwrap(), aria);
    }

    #[test]
    fn test_strong_player_wins_and_is_rewarded() {
        let orch = orchestrator();
        let mut aria = orch.register("Aria").unwrap();
        aria.attack = 100_000;
        aria.defense = 100_000;
        orch.save_player(&aria).unwrap();
        let mut rng = GameRng::seeded(83);
        let report = orch.adventure(aria.id, "Monster Den", &mut rng).unwrap();
        assert!(report.victory());
        let rewards = report.rewards.unwrap();
        assert!(rewards.exp > 0);
        assert!(report.text.contains("Victory!"));
        let stored = orch.player(aria.id).unwrap();
        assert_eq!(stored, report.player);
        let loot_gold = report.loot.as_ref().map_or(0, |l| l.deltas.gold);
        assert_eq!(stored.gold, 5000 + rewards.gold + loot_gold);
    }

    #[test]
    fn test_weak_player_is_left_at_zero_hp() {
        let orch = orchestrator();
        let mut aria = orch.register("Aria").unwrap();
        aria.attack = 0;
        aria.defense = 0;
        aria.level = Level::new(30).unwrap();
        orch.save_player(&aria).unwrap();
        let mut rng = GameRng::seeded(84);
        let report = orch.adventure(aria.id, "Rotting Woods", &mut rng).unwrap();
        assert!(!report.victory());
        assert!(report.rewards.is_none());
        assert!(report.text.ends_with("Defeat!"));
        assert_eq!(orch.player(aria.id).unwrap().hp, 0);
    }

    #[test]
    fn test_self_duel_is_rejected() {
        let orch = orchestrator();
        let aria = orch.register("Aria").unwrap();
        let mut rng = GameRng::seeded(85);
        assert_eq!(orch.duel(aria.id, aria.id, &mut rng).unwrap_err(), EngineError::SelfDuel);
    }

    #[test]
    fn test_duel_moves_gold_to_winner() {
        let orch = orchestrator();
        let mut aria = orch.register("Aria").unwrap();
        aria.attack = 10_000;
        orch.save_player(&aria).unwrap();
        let bran = orch.register("Bran").unwrap();
        let mut rng = GameRng::seeded(86);
        let report = orch.duel(aria.id, bran.id, &mut rng).unwrap();
        assert_eq!(report.winner, aria.id);
        assert_eq!(report.outcome.rounds, 1);
        assert_eq!(report.compensation, 500);
        assert_eq!(orch.player(aria.id).unwrap().gold, 5500);
        let bran = orch.player(bran.id).unwrap();
        assert_eq!(bran.gold, 4500);
        assert_eq!(bran.hp, 0);
        assert!(report.forfeit.is_none());
    }

    fn item(slot: EquipmentSlot, name: &str, rarity: Rarity, bonus: i64) -> Equipment {
        Equipment {
            id: EquipmentId::new(),
            slot,
            name: name.to_string(),
            rarity,
            level: 1,
            attack_bonus: if slot == EquipmentSlot::Weapon { bonus } else { 0 },
            defense_bonus: if slot == EquipmentSlot::Armor { bonus } else { 0 },
            max_hp_bonus: 0,
            price: 1000,
            skills: Vec::new(),
        }
    }

    #[test]
    fn test_equip_and_unequip_persist() {
        let orch = orchestrator();
        let mut aria = orch.register("Aria").unwrap();
        let mace = item(EquipmentSlot::Weapon, "Mace", Rarity::Common, 25);
        aria.inventory.insert(mace.name.clone(), mace.clone());
        orch.save_player(&aria).unwrap();

        let worn = orch.equip(aria.id, "Mace").unwrap();
        assert_eq!(worn.attack, 45);
        assert_eq!(worn.equipped_weapon, Some(mace.clone()));
        assert!(worn.inventory.is_empty());
        assert_eq!(orch.player(aria.id).unwrap(), worn);

        let bare = orch.unequip(aria.id, EquipmentSlot::Weapon).unwrap();
        assert_eq!(bare.attack, 20);
        assert_eq!(bare.inventory.get("Mace"), Some(&mace));
        assert_eq!(orch.player(aria.id).unwrap(), bare);
        assert_eq!(orch.equipment(mace.id).unwrap(), mace);
    }

    #[test]
    fn test_equip_errors_leave_record_untouched() {
        let orch = orchestrator();
        let aria = orch.register("Aria").unwrap();
        assert_eq!(
            orch.equip(aria.id, "Mace").unwrap_err(),
            EngineError::Rules(RulesError::NotInInventory("Mace".to_string()))
        );
        assert_eq!(
            orch.unequip(aria.id, EquipmentSlot::Armor).unwrap_err(),
            EngineError::Rules(RulesError::SlotEmpty(EquipmentSlot::Armor))
        );
        assert_eq!(orch.player(aria.id).unwrap(), aria);
    }

    #[test]
    fn test_duel_loser_forfeits_an_inventory_item() {
        let orch = orchestrator();
        let mut aria = orch.register("Aria").unwrap();
        aria.attack = 10_000;
        orch.save_player(&aria).unwrap();
        let mut bran = orch.register("Bran").unwrap();
        let shield = item(EquipmentSlot::Armor, "Tower Shield", Rarity::Rare, 40);
        let club = item(EquipmentSlot::Weapon, "Club", Rarity::Common, 5);
        bran.inventory.insert(shield.name.clone(), shield.clone());
        bran.inventory.insert(club.name.clone(), club.clone());
        orch.save_player(&bran).unwrap();

        let mut rng = GameRng::seeded(87);
        let report = orch.duel(aria.id, bran.id, &mut rng).unwrap();
        assert_eq!(report.winner, aria.id);
        let forfeit = report.forfeit.as_ref().unwrap();
        assert_eq!(forfeit.decision, LootDecision::Stored);
        let taken = forfeit.deltas.inventory_add.clone().unwrap();
        assert!(taken == shield || taken == club);

        let aria = orch.player(aria.id).unwrap();
        let bran = orch.player(bran.id).unwrap();
        assert_eq!(aria.inventory.get(&taken.name), Some(&taken));
        assert!(!bran.inventory.contains_key(&taken.name));
        assert_eq!(bran.inventory.len(), 1);
        assert_eq!(orch.equipment(taken.id).unwrap(), taken);
        assert!(report.text.contains(&format!("Aria claims Bran's {}!", taken.name)));
    }

    #[test]
    fn test_forfeited_duplicate_is_liquidated_for_winner() {
        let orch = orchestrator();
        let mut aria = orch.register("Aria").unwrap();
        aria.attack = 10_000;
        let own = item(EquipmentSlot::Weapon, "Club", Rarity::Epic, 30);
        aria.inventory.insert(own.name.clone(), own.clone());
        orch.save_player(&aria).unwrap();
        let mut bran = orch.register("Bran").unwrap();
        let club = item(EquipmentSlot::Weapon, "Club", Rarity::Common, 5);
        bran.inventory.insert(club.name.clone(), club.clone());
        orch.save_player(&bran).unwrap();

        let mut rng = GameRng::seeded(88);
        let report = orch.duel(aria.id, bran.id, &mut rng).unwrap();
        let forfeit = report.forfeit.unwrap();
        assert_eq!(forfeit.decision, LootDecision::DropLiquidated);
        assert_eq!(forfeit.deltas.gold, 800);

        let aria = orch.player(aria.id).unwrap();
        assert_eq!(aria.gold, 5000 + report.compensation + 800);
        assert_eq!(aria.inventory.get("Club"), Some(&own));
        assert!(orch.player(bran.id).unwrap().inventory.is_empty());
        assert_eq!(orch.equipment(club.id).unwrap_err(), EngineError::UnknownEquipment(club.id));
    }
}
