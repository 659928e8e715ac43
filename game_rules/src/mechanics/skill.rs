//! Skill definitions carried by generated equipment.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Trigger probability that always fires.
pub const MUST_TRIGGER: u8 = 100;

/// The fifteen skill families. Each family has its own generator and
/// magnitude ranges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillFamily {
    OneShotDamage,
    /// Ignores defense.
    TrueDamage,
    DamageOverTime,
    Shield,
    HealOnce,
    HealOverTime,
    Paralysis,
    ActiveImmunity,
    /// Fires at the start of battle.
    PrecedenceImmunity,
    LifeStealOnce,
    LifeStealOverTime,
    StatBuff,
    StatDebuff,
    Reflect,
    DamageAssimilate,
}

impl SkillFamily {
    pub const ALL: [SkillFamily; 15] = [
        SkillFamily::OneShotDamage,
        SkillFamily::TrueDamage,
        SkillFamily::DamageOverTime,
        SkillFamily::Shield,
        SkillFamily::HealOnce,
        SkillFamily::HealOverTime,
        SkillFamily::Paralysis,
        SkillFamily::ActiveImmunity,
        SkillFamily::PrecedenceImmunity,
        SkillFamily::LifeStealOnce,
        SkillFamily::LifeStealOverTime,
        SkillFamily::StatBuff,
        SkillFamily::StatDebuff,
        SkillFamily::Reflect,
        SkillFamily::DamageAssimilate,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            SkillFamily::OneShotDamage => "one-shot damage",
            SkillFamily::TrueDamage => "true damage",
            SkillFamily::DamageOverTime => "damage over time",
            SkillFamily::Shield => "shield",
            SkillFamily::HealOnce => "heal",
            SkillFamily::HealOverTime => "regeneration",
            SkillFamily::Paralysis => "paralysis",
            SkillFamily::ActiveImmunity => "immunity",
            SkillFamily::PrecedenceImmunity => "foresight",
            SkillFamily::LifeStealOnce => "life steal",
            SkillFamily::LifeStealOverTime => "lasting life steal",
            SkillFamily::StatBuff => "empower",
            SkillFamily::StatDebuff => "weaken",
            SkillFamily::Reflect => "reflect",
            SkillFamily::DamageAssimilate => "absorb",
        }
    }
}

impl fmt::Display for SkillFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// How long a triggered skill stays in effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SkillDuration {
    Instant,
    Rounds(u32),
    UntilBattleEnds,
}

impl SkillDuration {
    pub fn is_instant(&self) -> bool {
        matches!(self, SkillDuration::Instant)
    }
}

/// How often a skill may fire within one encounter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TriggerLimit {
    Once,
    Unlimited,
}

/// The stat a skill's magnitude is read from or applied to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DependentStat {
    None,
    SelfHp,
    SelfAttack,
    SelfDefense,
    OpponentAttack,
    OpponentDefense,
}

impl DependentStat {
    pub fn label(&self) -> &'static str {
        match self {
            DependentStat::None => "none",
            DependentStat::SelfHp => "own max hp",
            DependentStat::SelfAttack => "own attack",
            DependentStat::SelfDefense => "own defense",
            DependentStat::OpponentAttack => "opponent attack",
            DependentStat::OpponentDefense => "opponent defense",
        }
    }
}

/// A concrete skill rolled onto a piece of equipment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    pub name: String,
    pub family: SkillFamily,
    /// Percent chance (0-100) that the skill fires when eligible.
    pub trigger_probability: u8,
    pub duration: SkillDuration,
    pub trigger_limit: TriggerLimit,
    pub dependent_stat: DependentStat,
    /// Multiplier for the damage families, percent for everything else.
    pub magnitude: f64,
    pub description: String,
}

impl Skill {
    /// The uniqueness key within one piece of equipment.
    pub fn key(&self) -> (SkillFamily, &str) {
        (self.family, self.name.as_str())
    }

    /// One-line summary used on equipment cards.
    pub fn summary(&self) -> String {
        format!(
            "[{}]: {} {}% chance to trigger.",
            self.name, self.description, self.trigger_probability
        )
    }
}
