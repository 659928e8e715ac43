//! Stat blocks shared by characters, equipment bonuses, and deltas.

use serde::{Deserialize, Serialize};
use std::ops::{Add, Sub};

/// The three combat stats that equipment and levels modify.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StatBlock {
    pub max_hp: i64,
    pub attack: i64,
    pub defense: i64,
}

impl StatBlock {
    pub fn new(max_hp: i64, attack: i64, defense: i64) -> Self {
        Self {
            max_hp,
            attack,
            defense,
        }
    }

    /// True when every stat is zero (a no-op delta).
    pub fn is_zero(&self) -> bool {
        *self == StatBlock::default()
    }

    /// Every stat multiplied by `factor`.
    pub fn scaled(&self, factor: i64) -> Self {
        Self {
            max_hp: self.max_hp * factor,
            attack: self.attack * factor,
            defense: self.defense * factor,
        }
    }
}

impl Add for StatBlock {
    type Output = StatBlock;

    fn add(self, rhs: StatBlock) -> StatBlock {
        StatBlock {
            max_hp: self.max_hp + rhs.max_hp,
            attack: self.attack + rhs.attack,
            defense: self.defense + rhs.defense,
        }
    }
}

impl Sub for StatBlock {
    type Output = StatBlock;

    fn sub(self, rhs: StatBlock) -> StatBlock {
        StatBlock {
            max_hp: self.max_hp - rhs.max_hp,
            attack: self.attack - rhs.attack,
            defense: self.defense - rhs.defense,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stat_arithmetic() {
        let base = StatBlock::new(200, 20, 20);
        let bonus = StatBlock::new(0, 35, 0);
        let total = base + bonus;
        assert_eq!(total, StatBlock::new(200, 55, 20));
        assert_eq!(total - base, bonus);
    }

    #[test]
    fn test_scaled_and_zero() {
        assert_eq!(StatBlock::new(50, 10, 10).scaled(3), StatBlock::new(150, 30, 30));
        assert!(StatBlock::default().is_zero());
        assert!(!StatBlock::new(0, 1, 0).is_zero());
    }
}
