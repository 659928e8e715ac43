//! Victory rewards against monsters.

use game_rules::{LootConfig, RewardConfig};
use serde::{Deserialize, Serialize};

use crate::rng::GameRng;

/// What a defeated monster is worth before player-level scaling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bounty {
    pub exp: u64,
    pub gold: i64,
}

/// Deltas the orchestrator applies after a won fight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rewards {
    pub exp: u64,
    pub gold: i64,
    /// Whether an equipment drop should be generated.
    pub drop: bool,
}

#[derive(Debug, Clone)]
pub struct RewardTable {
    rewards: RewardConfig,
    drop_chance_percent: u32,
}

impl RewardTable {
    pub fn new(rewards: RewardConfig, loot: &LootConfig) -> Self {
        Self {
            rewards,
            drop_chance_percent: loot.drop_chance_percent,
        }
    }

    /// Experience grows with the player's level: `exp * (1 + level * bonus)`.
    pub fn experience(&self, player_level: u32, bounty: Bounty) -> u64 {
        let multiplier = 1.0 + player_level as f64 * self.rewards.exp_bonus_per_level;
        (bounty.exp as f64 * multiplier) as u64
    }

    /// Low-level players receive only a share of the gold bounty.
    pub fn gold(&self, player_level: u32, bounty: Bounty) -> i64 {
        let share = (player_level as f64 * self.rewards.gold_share_per_level).min(1.0);
        (share * bounty.gold as f64) as i64
    }

    /// Rewards for beating a monster, including the drop roll.
    pub fn victory(&self, player_level: u32, bounty: Bounty, rng: &mut GameRng) -> Rewards {
        Rewards {
            exp: self.experience(player_level, bounty),
            gold: self.gold(player_level, bounty),
            drop: rng.percent(self.drop_chance_percent),
        }
    }
}
