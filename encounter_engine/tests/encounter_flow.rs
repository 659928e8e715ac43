use encounter_engine::{
    EncounterOrchestrator, EngineError, GameRng, LootDecision, LootReconciler, MemoryEquipmentStore,
    MemoryPlayerStore, Side,
};
use game_rules::{
    BalanceConfig, Equipment, EquipmentId, EquipmentSlot, Level, ProgressionCurve, Rarity, StatBlock,
};

type Orchestrator = EncounterOrchestrator<MemoryPlayerStore, MemoryEquipmentStore>;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn orchestrator() -> Orchestrator {
    EncounterOrchestrator::new(MemoryPlayerStore::new(), MemoryEquipmentStore::new())
}

fn warhammer(rarity: Rarity, attack: i64, price: i64) -> Equipment {
    Equipment {
        id: EquipmentId::new(),
        slot: EquipmentSlot::Weapon,
        name: "Warhammer".to_string(),
        rarity,
        level: 20,
        attack_bonus: attack,
        defense_bonus: 0,
        max_hp_bonus: 0,
        price,
        skills: Vec::new(),
    }
}

/// Repeated hunts keep the stored player and the equipment store consistent.
#[test]
fn test_adventure_campaign_keeps_stores_consistent() {
    init_tracing();
    let orch = orchestrator();
    let aria = orch.register("Aria").unwrap();
    let mut rng = GameRng::seeded(2024);
    let mut last_level = aria.level;
    let mut victories = 0;
    let mut drops = 0;

    for _ in 0..150 {
        let report = orch.adventure(aria.id, "Monster Den", &mut rng).unwrap();
        let player = orch.player(aria.id).unwrap();
        assert_eq!(player, report.player);
        assert!(player.level >= last_level);
        assert!(player.hp >= 0 && player.hp <= player.max_hp);
        assert!(player.gold >= 0);
        assert!(report.outcome.rounds >= 1);
        last_level = player.level;

        if report.victory() {
            victories += 1;
            assert!(player.is_alive());
        } else {
            assert_eq!(player.hp, 0);
        }

        if let Some(loot) = &report.loot {
            drops += 1;
            for id in &loot.deltas.destroyed {
                assert_eq!(orch.equipment(*id).unwrap_err(), EngineError::UnknownEquipment(*id));
            }
        }
        for (name, item) in &player.inventory {
            assert_eq!(*name, item.name);
            assert_eq!(&orch.equipment(item.id).unwrap(), item);
        }
        for slot in [EquipmentSlot::Weapon, EquipmentSlot::Armor] {
            if let Some(item) = player.equipped(slot) {
                assert_eq!(&orch.equipment(item.id).unwrap(), item);
            }
        }

        if !player.is_alive() {
            let mut healed = player.clone();
            healed.hp = healed.max_hp;
            orch.save_player(&healed).unwrap();
        }
    }

    assert!(victories > 0);
    assert!(drops > 0);
    assert!(last_level > Level::MIN);
}

#[test]
fn test_same_seed_replays_the_same_adventure() {
    init_tracing();
    let first = orchestrator();
    let second = orchestrator();
    let a = first.register("Aria").unwrap();
    let b = second.register("Aria").unwrap();

    for seed in [1u64, 7, 99] {
        let ra = first.adventure(a.id, "Misty Vale", &mut GameRng::seeded(seed)).unwrap();
        let rb = second.adventure(b.id, "Misty Vale", &mut GameRng::seeded(seed)).unwrap();
        assert_eq!(ra.text, rb.text);
        assert_eq!(ra.monster, rb.monster);
        assert_eq!(ra.rewards, rb.rewards);
        assert_eq!(ra.player.hp, rb.player.hp);
        assert_eq!(ra.player.gold, rb.player.gold);

        for (orch, id) in [(&first, a.id), (&second, b.id)] {
            let mut player = orch.player(id).unwrap();
            player.hp = player.max_hp;
            orch.save_player(&player).unwrap();
        }
    }
}

#[test]
fn test_level_twenty_drop_replaces_equipped_weapon() {
    init_tracing();
    let orch = orchestrator();
    let curve = ProgressionCurve::default();
    let mut player = orch.register("Aria").unwrap();
    player.level = Level::new(20).unwrap();
    player.equipped_weapon = Some(warhammer(Rarity::Uncommon, 100, 10_500));
    player.recompute_stats(&curve);
    player.hp = player.max_hp;
    orch.save_player(&player).unwrap();
    let worn = player.equipped_weapon.clone().unwrap();
    assert_eq!(orch.equipment(worn.id).unwrap(), worn);

    let drop = warhammer(Rarity::Epic, 180, 20_000);
    let reconciler = LootReconciler::new(curve.clone(), 80);
    let outcome = reconciler.reconcile(drop.clone(), &orch.player(player.id).unwrap());
    assert_eq!(outcome.decision, LootDecision::Equipped);
    assert_eq!(outcome.deltas.gold, 8_400);
    assert_eq!(outcome.deltas.stats, StatBlock::new(0, 80, 0));
    assert_eq!(outcome.deltas.destroyed, vec![worn.id]);

    outcome.apply_to(&mut player, &curve);
    orch.save_player(&player).unwrap();
    let stored = orch.player(player.id).unwrap();
    assert_eq!(stored.attack, 390);
    assert_eq!(stored.gold, 5000 + 8_400);
    assert_eq!(stored.equipped_weapon, Some(drop.clone()));
    assert_eq!(orch.equipment(drop.id).unwrap(), drop);
}

#[test]
fn test_duel_round_cap_compensation() {
    init_tracing();
    let orch = orchestrator();
    let mut aria = orch.register("Aria").unwrap();
    let mut bran = orch.register("Bran").unwrap();
    for (player, attack) in [(&mut aria, 10), (&mut bran, 100)] {
        player.max_hp = 100_000;
        player.hp = 100_000;
        player.attack = attack;
        player.defense = 0;
        orch.save_player(player).unwrap();
    }

    let report = orch.duel(aria.id, bran.id, &mut GameRng::seeded(5)).unwrap();
    assert!(report.outcome.round_cap_reached);
    // both still standing at the cap: the challenger holds the field
    assert_eq!(report.outcome.winner, Side::A);
    assert_eq!(report.winner, aria.id);
    assert_eq!(report.compensation, 50);
    assert!(report.forfeit.is_none());
    assert!(report.text.contains("Aria wins and takes 50 gold from Bran"));

    let aria = orch.player(aria.id).unwrap();
    let bran = orch.player(bran.id).unwrap();
    assert_eq!(aria.gold, 5050);
    assert_eq!(bran.gold, 4950);
    assert!(aria.hp < bran.hp);
    assert!(aria.is_alive());
}

#[test]
fn test_equip_round_trip_through_the_orchestrator() {
    init_tracing();
    let orch = orchestrator();
    let mut aria = orch.register("Aria").unwrap();
    let hammer = warhammer(Rarity::Rare, 60, 4_000);
    aria.inventory.insert(hammer.name.clone(), hammer.clone());
    orch.save_player(&aria).unwrap();

    let armed = orch.equip(aria.id, "Warhammer").unwrap();
    assert_eq!(armed.attack, 80);
    assert_eq!(armed.equipped(EquipmentSlot::Weapon), Some(&hammer));

    let spare = warhammer(Rarity::Common, 10, 500);
    let mut with_spare = armed.clone();
    with_spare.inventory.insert(spare.name.clone(), spare);
    orch.save_player(&with_spare).unwrap();
    assert!(matches!(
        orch.unequip(aria.id, EquipmentSlot::Weapon),
        Err(EngineError::Rules(game_rules::RulesError::DuplicateItem(_)))
    ));
    assert_eq!(orch.player(aria.id).unwrap(), with_spare);
}

#[test]
fn test_orchestrator_runs_on_the_shipped_balance_file() {
    init_tracing();
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/../game_rules/data/balance.toml");
    let config = BalanceConfig::load(path).unwrap();
    let orch = EncounterOrchestrator::with_balance(&config, MemoryPlayerStore::new(), MemoryEquipmentStore::new());
    let aria = orch.register("Aria").unwrap();
    let mut rng = GameRng::seeded(77);
    for scene in orch.bestiary().scene_names() {
        let mut player = orch.player(aria.id).unwrap();
        player.hp = player.max_hp;
        orch.save_player(&player).unwrap();
        let report = orch.adventure(aria.id, scene, &mut rng).unwrap();
        assert!(report.text.contains("The battle lasted"));
    }
}
