//! Monster bestiary - scenes, templates, and level-scaled spawning.
//!
//! A spawned monster's level floats around the player's level, and every
//! stat grows linearly with it. A small share of spawns are mutants with
//! boosted stats and bounty.

use game_rules::{Combatant, CombatantKind, Level, MonsterConfig, RulesResult, StatBlock};
use serde::{Deserialize, Serialize};

use crate::combat::Bounty;
use crate::error::{EngineError, EngineResult};
use crate::rng::GameRng;

/// Template attack is scaled by this before level growth.
const ATTACK_SCALE: f64 = 1.3;
/// Template gold is scaled by this before level growth.
const GOLD_SCALE: f64 = 10.0;

/// Level-1 stats of a monster kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonsterTemplate {
    pub name: &'static str,
    pub hp: f64,
    pub attack: f64,
    pub defense: f64,
    pub exp: f64,
    pub gold: f64,
}

const fn template(name: &'static str, hp: f64, attack: f64, defense: f64, exp: f64, gold: f64) -> MonsterTemplate {
    MonsterTemplate {
        name,
        hp,
        attack,
        defense,
        exp,
        gold,
    }
}

/// A named hunting ground and the monsters found there.
#[derive(Debug, Clone, Copy)]
pub struct Scene {
    pub name: &'static str,
    pub monsters: &'static [MonsterTemplate],
}

const MONSTER_DEN: &[MonsterTemplate] = &[
    template("Forest Slime", 60.0, 10.0, 6.0, 20.0, 30.0),
    template("Lurking Tarantula", 80.0, 15.0, 8.0, 25.0, 35.0),
    template("Den Bat", 50.0, 12.0, 5.0, 18.0, 28.0),
    template("Stinger Wasp", 70.0, 18.0, 7.0, 22.0, 32.0),
    template("Shadow Lurker", 100.0, 20.0, 10.0, 30.0, 40.0),
];

const ANCIENT_HEART: &[MonsterTemplate] = &[
    template("Treant Guard", 120.0, 25.0, 15.0, 35.0, 50.0),
    template("Corrupted Vine", 90.0, 20.0, 12.0, 28.0, 45.0),
    template("Dryad Shade", 80.0, 22.0, 10.0, 30.0, 42.0),
    template("Blighted Treant", 150.0, 30.0, 18.0, 40.0, 60.0),
    template("Spirit of the Elder Tree", 200.0, 35.0, 20.0, 50.0, 70.0),
];

const MISTY_VALE: &[MonsterTemplate] = &[
    template("Mist Wraith", 70.0, 18.0, 8.0, 25.0, 35.0),
    template("Fog Stalker", 90.0, 22.0, 10.0, 30.0, 45.0),
    template("Hidden Viper", 60.0, 20.0, 6.0, 22.0, 32.0),
    template("Mistwalker", 110.0, 28.0, 12.0, 35.0, 50.0),
    template("Fog Behemoth", 150.0, 32.0, 18.0, 45.0, 65.0),
];

const HAUNTED_CLEARING: &[MonsterTemplate] = &[
    template("Phantom Warrior", 100.0, 25.0, 12.0, 35.0, 50.0),
    template("Skeleton Archer", 80.0, 28.0, 10.0, 32.0, 48.0),
    template("Vengeful Mage", 90.0, 30.0, 8.0, 38.0, 52.0),
    template("Spectral Knight", 140.0, 35.0, 15.0, 45.0, 65.0),
    template("Revenant", 160.0, 40.0, 18.0, 50.0, 70.0),
];

const ROTTING_WOODS: &[MonsterTemplate] = &[
    template("Rotting Treant", 120.0, 20.0, 15.0, 35.0, 45.0),
    template("Venom Slime", 70.0, 18.0, 8.0, 25.0, 35.0),
    template("Blighted Tarantula", 80.0, 22.0, 10.0, 30.0, 40.0),
    template("Deadwood Golem", 150.0, 28.0, 18.0, 40.0, 55.0),
    template("Bone Warrior", 100.0, 28.0, 12.0, 38.0, 50.0),
    template("Swamp Skeleton", 90.0, 20.0, 10.0, 30.0, 45.0),
    template("Undead Sorcerer", 130.0, 35.0, 18.0, 50.0, 65.0),
    template("Undead Colossus", 160.0, 40.0, 20.0, 60.0, 75.0),
    template("Ossuary Horror", 200.0, 50.0, 25.0, 80.0, 100.0),
];

/// The shipped hunting grounds.
pub const SCENES: &[Scene] = &[
    Scene { name: "Monster Den", monsters: MONSTER_DEN },
    Scene { name: "Ancient Heart", monsters: ANCIENT_HEART },
    Scene { name: "Misty Vale", monsters: MISTY_VALE },
    Scene { name: "Haunted Clearing", monsters: HAUNTED_CLEARING },
    Scene { name: "Rotting Woods", monsters: ROTTING_WOODS },
];

/// A spawned monster, ready to be turned into a combatant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Monster {
    pub name: String,
    pub level: Level,
    pub hp: i64,
    pub attack: i64,
    pub defense: i64,
    pub bounty: Bounty,
    pub mutant: bool,
}

impl Monster {
    /// A full-health combat view.
    pub fn combatant(&self) -> RulesResult<Combatant> {
        Combatant::new(
            self.name.clone(),
            self.level.get(),
            self.hp,
            StatBlock::new(self.hp, self.attack, self.defense),
            CombatantKind::Monster,
        )
    }
}

#[derive(Debug, Clone)]
pub struct Bestiary {
    config: MonsterConfig,
    scenes: &'static [Scene],
}

impl Bestiary {
    pub fn new(config: MonsterConfig) -> Self {
        Self {
            config,
            scenes: SCENES,
        }
    }

    pub fn scene_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.scenes.iter().map(|s| s.name)
    }

    /// Look up a scene by name, ignoring ASCII case.
    pub fn scene(&self, name: &str) -> EngineResult<&Scene> {
        self.scenes
            .iter()
            .find(|s| s.name.eq_ignore_ascii_case(name.trim()))
            .ok_or_else(|| EngineError::UnknownScene(name.to_string()))
    }

    /// Spawn a random monster of `scene` for a player at `player_level`.
    pub fn spawn(&self, player_level: Level, scene: &str, rng: &mut GameRng) -> EngineResult<Monster> {
        let scene = self.scene(scene)?;
        let spread = self.config.level_spread as i64;
        let level = Level::clamped(player_level.get() as i64 + rng.range_inclusive(-spread, spread));
        let template = rng
            .choose(scene.monsters)
            .copied()
            .ok_or_else(|| EngineError::UnknownScene(scene.name.to_string()))?;
        let mut monster = self.scale(&template, level);
        if rng.chance(self.config.mutation_chance) {
            self.mutate(&mut monster);
        }
        tracing::debug!(
            scene = scene.name,
            monster = %monster.name,
            level = monster.level.get(),
            mutant = monster.mutant,
            "monster spawned"
        );
        Ok(monster)
    }

    /// Level-scaled stats of a template: `1 + (level - 1) * growth`.
    pub fn scale(&self, template: &MonsterTemplate, level: Level) -> Monster {
        let factor = 1.0 + (level.get() - 1) as f64 * self.config.growth_per_level;
        Monster {
            name: template.name.to_string(),
            level,
            hp: ((template.hp * factor) as i64).max(1),
            attack: (ATTACK_SCALE * template.attack * factor) as i64,
            defense: (template.defense * factor) as i64,
            bounty: Bounty {
                exp: (template.exp * factor) as u64,
                gold: (GOLD_SCALE * template.gold * factor) as i64,
            },
            mutant: false,
        }
    }

    pub fn mutate(&self, monster: &mut Monster) {
        let c = &self.config;
        monster.name = format!("Mutant {}", monster.name);
        monster.hp = ((monster.hp as f64 * c.mutant_hp) as i64).max(1);
        monster.attack = (monster.attack as f64 * c.mutant_attack) as i64;
        monster.defense = (monster.defense as f64 * c.mutant_defense) as i64;
        monster.bounty.exp = (monster.bounty.exp as f64 * c.mutant_bounty) as u64;
        monster.bounty.gold = (monster.bounty.gold as f64 * c.mutant_bounty) as i64;
        monster.mutant = true;
    }
}

impl Default for Bestiary {
    fn default() -> Self {
        Self::new(MonsterConfig::default())
    }
}
