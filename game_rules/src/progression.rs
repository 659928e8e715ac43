//! Progression curve - experience requirements and level-derived stats.
//!
//! The exponent applied to the base experience constant steps up by 0.1
//! every ten levels (1.1 for levels 1-10 through 2.0 for 91-100), so each
//! decade band costs noticeably more than the last.

use serde::{Deserialize, Serialize};

use crate::config::ProgressionConfig;
use crate::entities::{Level, StatBlock};

/// Result of feeding experience into the curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelProgress {
    pub level: Level,
    /// Experience carried towards the next level.
    pub exp: u64,
    pub levels_gained: u32,
}

/// Pure mapping from levels to experience costs and base stats.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressionCurve {
    config: ProgressionConfig,
}

impl Default for ProgressionCurve {
    fn default() -> Self {
        Self::new(ProgressionConfig::default())
    }
}

impl ProgressionCurve {
    pub fn new(config: ProgressionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ProgressionConfig {
        &self.config
    }

    /// The configured cap, never above the hard cap.
    pub fn max_level(&self) -> Level {
        Level::clamped(self.config.max_level as i64)
    }

    /// Exponent for the decade band containing `level`.
    pub fn exponent(level: Level) -> f64 {
        let band = (level.get() - 1) / 10 + 1;
        1.0 + band as f64 / 10.0
    }

    /// Experience needed to advance from `level` to the next one.
    pub fn required_exp(&self, level: Level) -> u64 {
        let raw = self.config.base_exp as f64 * (level.get() as f64).powf(Self::exponent(level));
        raw as u64
    }

    /// Feed `gained` experience into a character at `level` holding `exp`.
    ///
    /// Levels up while the running total covers the next requirement. Once
    /// the cap is reached any remainder is discarded; a character already at
    /// the cap keeps its experience unchanged.
    pub fn apply_gain(&self, level: Level, exp: u64, gained: u64) -> LevelProgress {
        let max = self.max_level();
        if level >= max {
            return LevelProgress {
                level,
                exp,
                levels_gained: 0,
            };
        }

        let mut current = level;
        let mut total = exp.saturating_add(gained);
        let mut levels_gained = 0;
        while current < max {
            let needed = self.required_exp(current);
            if total < needed {
                break;
            }
            total -= needed;
            current = Level::clamped(current.get() as i64 + 1);
            levels_gained += 1;
        }
        if current >= max {
            total = 0;
        }

        LevelProgress {
            level: current,
            exp: total,
            levels_gained,
        }
    }

    /// Fixed per-level growth multiplied by `level_delta`.
    pub fn stat_growth(&self, level_delta: u32) -> StatBlock {
        self.per_level().scaled(level_delta as i64)
    }

    /// Stats of an unequipped character at `level`.
    pub fn base_stats(&self, level: Level) -> StatBlock {
        let base = StatBlock::new(
            self.config.base_max_hp,
            self.config.base_attack,
            self.config.base_defense,
        );
        base + self.stat_growth(level.get() - 1)
    }

    fn per_level(&self) -> StatBlock {
        StatBlock::new(
            self.config.hp_per_level,
            self.config.attack_per_level,
            self.config.defense_per_level,
        )
    }
}
