//! One generator per skill family.
//!
//! Every generator takes the rarity power factor `f` and rolls magnitude,
//! trigger probability, and duration within the family's ranges. Integer
//! bonuses derived from `f` are truncated, and trigger probabilities are
//! clamped to `0..=100`.

use game_rules::{
    DependentStat, Skill, SkillDuration, SkillFamily, TriggerLimit, MUST_TRIGGER,
};

use super::names::skill_names;
use crate::rng::GameRng;

fn name(rng: &mut GameRng, family: SkillFamily) -> String {
    rng.choose(skill_names(family))
        .copied()
        .unwrap_or(family.label())
        .to_string()
}

/// `lo..=hi` plus a power bonus, clamped to a valid percentage.
fn trigger(rng: &mut GameRng, lo: i64, hi: i64, bonus: i64) -> u8 {
    (rng.range_inclusive(lo, hi) + bonus).clamp(0, 100) as u8
}

fn bonus(factor: f64, scale: f64) -> i64 {
    (factor * scale) as i64
}

fn rounds(rng: &mut GameRng, lo: i64, hi: i64) -> u32 {
    rng.range_inclusive(lo, hi) as u32
}

pub fn one_shot_damage(rng: &mut GameRng, factor: f64) -> Skill {
    let family = SkillFamily::OneShotDamage;
    let multiplier = rng.uniform_range(0.8, 2.5) + factor / 2.0;
    Skill {
        name: name(rng, family),
        family,
        trigger_probability: trigger(rng, 20, 50, bonus(factor, 5.0)),
        duration: SkillDuration::Instant,
        trigger_limit: TriggerLimit::Unlimited,
        dependent_stat: DependentStat::SelfAttack,
        magnitude: multiplier,
        description: format!("Deals {multiplier:.1}x your attack as damage."),
    }
}

pub fn true_damage(rng: &mut GameRng, factor: f64) -> Skill {
    let family = SkillFamily::TrueDamage;
    let multiplier = rng.uniform_range(0.5, 2.0) + factor / 2.0;
    Skill {
        name: name(rng, family),
        family,
        trigger_probability: trigger(rng, 20, 40, bonus(factor, 5.0)),
        duration: SkillDuration::Instant,
        trigger_limit: TriggerLimit::Unlimited,
        dependent_stat: DependentStat::SelfAttack,
        magnitude: multiplier,
        description: format!("Deals {multiplier:.1}x your attack as damage that ignores defense."),
    }
}

pub fn damage_over_time(rng: &mut GameRng, factor: f64) -> Skill {
    let family = SkillFamily::DamageOverTime;
    let percent = rng.range_inclusive(10, 30) + bonus(factor, 0.5);
    let turns = rounds(rng, 2, 4);
    Skill {
        name: name(rng, family),
        family,
        trigger_probability: trigger(rng, 20, 50, bonus(factor, 5.0)),
        duration: SkillDuration::Rounds(turns),
        trigger_limit: TriggerLimit::Unlimited,
        dependent_stat: DependentStat::SelfAttack,
        magnitude: percent as f64,
        description: format!("Deals {percent}% of your attack each round for {turns} rounds."),
    }
}

pub fn shield(rng: &mut GameRng, factor: f64) -> Skill {
    let family = SkillFamily::Shield;
    let percent = rng.range_inclusive(10, 20) + bonus(factor, 5.0);
    let turns = rounds(rng, 2, 4);
    Skill {
        name: name(rng, family),
        family,
        trigger_probability: trigger(rng, 10, 40, bonus(factor, 5.0)),
        duration: SkillDuration::Rounds(turns),
        trigger_limit: TriggerLimit::Unlimited,
        dependent_stat: DependentStat::SelfHp,
        magnitude: percent as f64,
        description: format!("Gains a shield of {percent}% max hp for {turns} rounds."),
    }
}

pub fn heal_once(rng: &mut GameRng, factor: f64) -> Skill {
    let family = SkillFamily::HealOnce;
    let percent = rng.range_inclusive(10, 30) + bonus(factor, 5.0);
    Skill {
        name: name(rng, family),
        family,
        trigger_probability: trigger(rng, 20, 40, bonus(factor, 5.0)),
        duration: SkillDuration::Instant,
        trigger_limit: TriggerLimit::Unlimited,
        dependent_stat: DependentStat::SelfHp,
        magnitude: percent as f64,
        description: format!("Restores {percent}% of max hp."),
    }
}

pub fn heal_over_time(rng: &mut GameRng, factor: f64) -> Skill {
    let family = SkillFamily::HealOverTime;
    let percent = rng.range_inclusive(1, 8) + bonus(factor, 2.0);
    Skill {
        name: name(rng, family),
        family,
        trigger_probability: MUST_TRIGGER,
        duration: SkillDuration::UntilBattleEnds,
        trigger_limit: TriggerLimit::Once,
        dependent_stat: DependentStat::SelfHp,
        magnitude: percent as f64,
        description: format!("Restores {percent}% of max hp every round."),
    }
}

pub fn paralysis(rng: &mut GameRng, factor: f64) -> Skill {
    let family = SkillFamily::Paralysis;
    let turns = rounds(rng, 1, 2);
    Skill {
        name: name(rng, family),
        family,
        trigger_probability: trigger(rng, 10, 30, bonus(factor, 5.0)),
        duration: SkillDuration::Rounds(turns),
        trigger_limit: TriggerLimit::Unlimited,
        dependent_stat: DependentStat::None,
        magnitude: 0.0,
        description: format!("The target cannot act for {turns} rounds."),
    }
}

pub fn active_immunity(rng: &mut GameRng, factor: f64) -> Skill {
    let family = SkillFamily::ActiveImmunity;
    let turns = rounds(rng, 1, 2);
    Skill {
        name: name(rng, family),
        family,
        trigger_probability: trigger(rng, 10, 40, bonus(factor, 5.0)),
        duration: SkillDuration::Rounds(turns),
        trigger_limit: TriggerLimit::Unlimited,
        dependent_stat: DependentStat::None,
        magnitude: 0.0,
        description: format!("Immune to status effects for {turns} rounds."),
    }
}

pub fn precedence_immunity(rng: &mut GameRng, factor: f64) -> Skill {
    let family = SkillFamily::PrecedenceImmunity;
    let turns = rounds(rng, 2, 4) + bonus(factor, 0.5) as u32;
    Skill {
        name: name(rng, family),
        family,
        trigger_probability: MUST_TRIGGER,
        duration: SkillDuration::Rounds(turns),
        trigger_limit: TriggerLimit::Once,
        dependent_stat: DependentStat::None,
        magnitude: 0.0,
        description: format!("Immune to status effects for the first {turns} rounds of battle."),
    }
}

pub fn life_steal_once(rng: &mut GameRng, factor: f64) -> Skill {
    let family = SkillFamily::LifeStealOnce;
    let percent = rng.range_inclusive(20, 30) + bonus(factor, 3.0);
    Skill {
        name: name(rng, family),
        family,
        trigger_probability: trigger(rng, 20, 50, bonus(factor, 5.0)),
        duration: SkillDuration::Instant,
        trigger_limit: TriggerLimit::Unlimited,
        dependent_stat: DependentStat::SelfAttack,
        magnitude: percent as f64,
        description: format!("Strikes once; {percent}% of the damage dealt heals you."),
    }
}

pub fn life_steal_over_time(rng: &mut GameRng, factor: f64) -> Skill {
    let family = SkillFamily::LifeStealOverTime;
    let percent = rng.range_inclusive(5, 20) + bonus(factor, 4.0);
    Skill {
        name: name(rng, family),
        family,
        trigger_probability: trigger(rng, 10, 50, bonus(factor, 5.0)),
        duration: SkillDuration::UntilBattleEnds,
        trigger_limit: TriggerLimit::Once,
        dependent_stat: DependentStat::SelfAttack,
        magnitude: percent as f64,
        description: format!("For the rest of the battle {percent}% of normal attack damage heals you."),
    }
}

pub fn stat_buff(rng: &mut GameRng, factor: f64) -> Skill {
    let family = SkillFamily::StatBuff;
    let stat = *rng
        .choose(&[DependentStat::SelfHp, DependentStat::SelfAttack, DependentStat::SelfDefense])
        .unwrap_or(&DependentStat::SelfAttack);
    let turns = rounds(rng, 2, 4);
    let percent = rng.range_inclusive(5, 15) + bonus(factor, 3.0);
    Skill {
        name: name(rng, family),
        family,
        trigger_probability: trigger(rng, 20, 30, bonus(factor, 3.0)),
        duration: SkillDuration::Rounds(turns),
        trigger_limit: TriggerLimit::Unlimited,
        dependent_stat: stat,
        magnitude: percent as f64,
        description: format!("Raises {} by {percent}% for {turns} rounds.", stat.label()),
    }
}

pub fn stat_debuff(rng: &mut GameRng, factor: f64) -> Skill {
    let family = SkillFamily::StatDebuff;
    let stat = *rng
        .choose(&[DependentStat::OpponentAttack, DependentStat::OpponentDefense])
        .unwrap_or(&DependentStat::OpponentAttack);
    let turns = rounds(rng, 2, 4);
    let percent = rng.range_inclusive(5, 15) + bonus(factor, 3.0);
    Skill {
        name: name(rng, family),
        family,
        trigger_probability: trigger(rng, 20, 30, bonus(factor, 10.0)),
        duration: SkillDuration::Rounds(turns),
        trigger_limit: TriggerLimit::Unlimited,
        dependent_stat: stat,
        magnitude: percent as f64,
        description: format!("Lowers {} by {percent}% for {turns} rounds.", stat.label()),
    }
}

pub fn reflect(rng: &mut GameRng, factor: f64) -> Skill {
    let family = SkillFamily::Reflect;
    let percent = rng.range_inclusive(5, 20) + bonus(factor, 8.0);
    Skill {
        name: name(rng, family),
        family,
        trigger_probability: MUST_TRIGGER,
        duration: SkillDuration::Instant,
        trigger_limit: TriggerLimit::Unlimited,
        dependent_stat: DependentStat::SelfDefense,
        magnitude: percent as f64,
        description: format!("Passive: attackers take {percent}% of your defense as damage."),
    }
}

pub fn damage_assimilate(rng: &mut GameRng, factor: f64) -> Skill {
    let family = SkillFamily::DamageAssimilate;
    let percent = rng.range_inclusive(5, 20) + bonus(factor, 4.0);
    Skill {
        name: name(rng, family),
        family,
        trigger_probability: MUST_TRIGGER,
        duration: SkillDuration::Instant,
        trigger_limit: TriggerLimit::Unlimited,
        dependent_stat: DependentStat::SelfDefense,
        magnitude: percent as f64,
        description: format!("Passive: absorbs {percent}% of all incoming damage."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_shot_damage_ranges() {
        let mut rng = GameRng::seeded(11);
        for _ in 0..500 {
            let skill = one_shot_damage(&mut rng, 3.0);
            assert!(skill.magnitude >= 0.8 + 1.5 && skill.magnitude < 2.5 + 1.5);
            assert!((35..=65).contains(&skill.trigger_probability));
            assert!(skill.duration.is_instant());
            assert_eq!(skill.trigger_limit, TriggerLimit::Unlimited);
        }
    }

    #[test]
    fn test_trigger_probability_is_clamped() {
        let mut rng = GameRng::seeded(12);
        for _ in 0..500 {
            // 50 + int(5 * 20) would exceed 100 without the clamp
            let skill = life_steal_once(&mut rng, 20.0);
            assert!(skill.trigger_probability <= 100);
        }
    }

    #[test]
    fn test_heal_over_time_always_triggers_once() {
        let mut rng = GameRng::seeded(13);
        let skill = heal_over_time(&mut rng, 1.1);
        assert_eq!(skill.trigger_probability, MUST_TRIGGER);
        assert_eq!(skill.duration, SkillDuration::UntilBattleEnds);
        assert_eq!(skill.trigger_limit, TriggerLimit::Once);
        assert!((3.0..=10.0).contains(&skill.magnitude));
    }

    #[test]
    fn test_precedence_immunity_duration_scales() {
        let mut rng = GameRng::seeded(14);
        for _ in 0..200 {
            let skill = precedence_immunity(&mut rng, 3.0);
            match skill.duration {
                SkillDuration::Rounds(n) => assert!((3..=5).contains(&n)),
                other => panic!("unexpected duration {other:?}"),
            }
        }
    }

    #[test]
    fn test_buff_and_debuff_targets() {
        let mut rng = GameRng::seeded(15);
        for _ in 0..200 {
            let buff = stat_buff(&mut rng, 1.4);
            assert!(matches!(
                buff.dependent_stat,
                DependentStat::SelfHp | DependentStat::SelfAttack | DependentStat::SelfDefense
            ));
            let debuff = stat_debuff(&mut rng, 1.4);
            assert!(matches!(
                debuff.dependent_stat,
                DependentStat::OpponentAttack | DependentStat::OpponentDefense
            ));
            // 20..=30 + int(14.0)
            assert!((34..=44).contains(&debuff.trigger_probability));
        }
    }

    #[test]
    fn test_names_come_from_family_table() {
        let mut rng = GameRng::seeded(16);
        let skill = reflect(&mut rng, 2.0);
        assert!(skill_names(SkillFamily::Reflect).contains(&skill.name.as_str()));
        assert!(skill.description.contains('%'));
    }
}
