//! Skill name tables, ten per family.

use game_rules::SkillFamily;

const ONE_SHOT_DAMAGE: &[&str] = &[
    "Flame Burst", "Thunder Cleave", "Skyrend", "Earthshaker", "Onslaught",
    "Meteor Fall", "Sunder", "Ironbreak", "Gale Strike", "Verdict",
];

const TRUE_DAMAGE: &[&str] = &[
    "Soul Pierce", "Void Lance", "Pure Edge", "Spirit Rend", "Null Strike",
    "Heartseeker", "Truth Blade", "Mind Spike", "Aether Cut", "Absolute",
];

const DAMAGE_OVER_TIME: &[&str] = &[
    "Venom Coat", "Searing Wound", "Bleed", "Corrode", "Frostbite",
    "Blight", "Lingering Flame", "Rot", "Scourge", "Wither",
];

const SHIELD: &[&str] = &[
    "Aegis", "Stoneskin", "Barrier", "Iron Wall", "Bulwark",
    "Mana Shell", "Guardian Ward", "Bastion", "Runic Shield", "Sanctuary",
];

const HEAL_ONCE: &[&str] = &[
    "Mending", "Second Wind", "Lifebloom", "Renewal", "Salve",
    "Restore", "Vital Surge", "Rally", "Grace", "Revive",
];

const HEAL_OVER_TIME: &[&str] = &[
    "Regrowth", "Rejuvenate", "Spring Tide", "Vigor", "Verdant Aura",
    "Blessed Rain", "Soothing Mist", "Evergreen", "Lifespring", "Moonwell",
];

const PARALYSIS: &[&str] = &[
    "Stun Bolt", "Petrify", "Shackle", "Numbing Touch", "Daze",
    "Frozen Grip", "Thunderclap", "Bind", "Hex Chain", "Stagger",
];

const ACTIVE_IMMUNITY: &[&str] = &[
    "Purify", "Cleanse", "Steadfast", "Unbroken", "Clarity",
    "Iron Will", "Resolve", "Ward Off", "Shrug Off", "Defiance",
];

const PRECEDENCE_IMMUNITY: &[&str] = &[
    "Foresight", "Premonition", "Vigilance", "First Light", "Warding Sigil",
    "Sixth Sense", "Preparation", "Alertness", "Oracle's Eye", "Omen",
];

const LIFE_STEAL_ONCE: &[&str] = &[
    "Bloodthirst", "Leech Strike", "Drain Life", "Crimson Bite", "Siphon",
    "Vampiric Edge", "Sanguine Blow", "Feast", "Reaper's Kiss", "Hemorrhage",
];

const LIFE_STEAL_OVER_TIME: &[&str] = &[
    "Blood Pact", "Hunger", "Vampirism", "Crimson Covenant", "Soul Feast",
    "Eternal Thirst", "Bloodbond", "Night Hunger", "Life Tap", "Dark Communion",
];

const STAT_BUFF: &[&str] = &[
    "Battle Cry", "Empower", "Fortify", "Berserk Focus", "Valor",
    "Warsong", "Might", "Inspire", "Bolster", "Ascend",
];

const STAT_DEBUFF: &[&str] = &[
    "Curse", "Enfeeble", "Armor Break", "Intimidate", "Sap",
    "Hamstring", "Dread", "Expose", "Crumble", "Malaise",
];

const REFLECT: &[&str] = &[
    "Thorns", "Riposte", "Spiked Guard", "Retaliate", "Mirror Plate",
    "Backlash", "Bramble Hide", "Counterweight", "Spite", "Vengeance",
];

const DAMAGE_ASSIMILATE: &[&str] = &[
    "Absorb", "Dampen", "Nullify", "Soak", "Deflect",
    "Siphon Ward", "Mana Sponge", "Cushion", "Ground", "Disperse",
];

/// Name table for one family.
pub fn skill_names(family: SkillFamily) -> &'static [&'static str] {
    match family {
        SkillFamily::OneShotDamage => ONE_SHOT_DAMAGE,
        SkillFamily::TrueDamage => TRUE_DAMAGE,
        SkillFamily::DamageOverTime => DAMAGE_OVER_TIME,
        SkillFamily::Shield => SHIELD,
        SkillFamily::HealOnce => HEAL_ONCE,
        SkillFamily::HealOverTime => HEAL_OVER_TIME,
        SkillFamily::Paralysis => PARALYSIS,
        SkillFamily::ActiveImmunity => ACTIVE_IMMUNITY,
        SkillFamily::PrecedenceImmunity => PRECEDENCE_IMMUNITY,
        SkillFamily::LifeStealOnce => LIFE_STEAL_ONCE,
        SkillFamily::LifeStealOverTime => LIFE_STEAL_OVER_TIME,
        SkillFamily::StatBuff => STAT_BUFF,
        SkillFamily::StatDebuff => STAT_DEBUFF,
        SkillFamily::Reflect => REFLECT,
        SkillFamily::DamageAssimilate => DAMAGE_ASSIMILATE,
    }
}
