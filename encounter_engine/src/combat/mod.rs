//! Combat Engine - resolves one encounter between two combatant views.
//!
//! The round loop works as follows:
//! 1. **Strike**: the acting side rolls damage against the other's defense
//! 2. **Apply**: shield soaks first, hp is clamped at zero, totals accumulate
//! 3. **Check**: a defeated defender ends the fight immediately
//! 4. **Enrage**: a surviving monster below the hp threshold may enrage once
//! 5. **Counter**: the other side strikes back the same way
//!
//! PvE alternates strictly, initiator first. PvP flips a coin each round for
//! who acts first and stops at a round cap, where the initiator holds the
//! field. Damage totals count every rolled blow in full, overkill included.
//! The engine never touches persistent records; it reports an outcome and
//! the orchestrator applies the deltas.

mod damage;
mod log;
mod rewards;
mod status;

pub use damage::*;
pub use log::*;
pub use rewards::*;
pub use status::*;

use game_rules::{CombatConfig, CombatMode, Combatant};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::rng::GameRng;

/// Which combatant of an encounter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// The initiator.
    A,
    B,
}

impl Side {
    pub fn other(self) -> Side {
        match self {
            Side::A => Side::B,
            Side::B => Side::A,
        }
    }
}

/// Everything a resolved encounter reports back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombatOutcome {
    pub mode: CombatMode,
    pub winner: Side,
    /// Rounds actually fought, at least one.
    pub rounds: u32,
    /// Total damage rolled by A, including overkill and shielded damage.
    pub damage_a: i64,
    /// Total damage dealt by B.
    pub damage_b: i64,
    /// Final state of both views.
    pub a: Combatant,
    pub b: Combatant,
    /// PvP only: share of the loser's gold owed to the winner.
    pub compensation_rate: Option<f64>,
    /// PvP only: the round cap ended the fight.
    pub round_cap_reached: bool,
    pub log: String,
}

impl CombatOutcome {
    pub fn loser(&self) -> Side {
        self.winner.other()
    }

    pub fn combatant(&self, side: Side) -> &Combatant {
        match side {
            Side::A => &self.a,
            Side::B => &self.b,
        }
    }

    pub fn damage_dealt(&self, side: Side) -> i64 {
        match side {
            Side::A => self.damage_a,
            Side::B => self.damage_b,
        }
    }
}

/// One side's mutable state for the duration of a fight.
struct Fighter {
    view: Combatant,
    status: CombatStatus,
    damage_dealt: i64,
}

impl Fighter {
    fn new(view: Combatant, status: CombatStatus) -> Self {
        Self {
            view,
            status,
            damage_dealt: 0,
        }
    }
}

/// Resolves encounters with the injected balance.
#[derive(Debug, Clone, Default)]
pub struct CombatEngine {
    config: CombatConfig,
}

impl CombatEngine {
    pub fn new(config: CombatConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CombatConfig {
        &self.config
    }

    /// Fight until one side falls (or the PvP cap). `a` is the initiator.
    ///
    /// Both views must be alive: a defeated combatant is rejected, and two
    /// defeated combatants are reported as `BothDefeated`.
    pub fn resolve(
        &self,
        a: Combatant,
        b: Combatant,
        mode: CombatMode,
        rng: &mut GameRng,
    ) -> EngineResult<CombatOutcome> {
        self.resolve_with_status(a, b, mode, [CombatStatus::new(), CombatStatus::new()], rng)
    }

    /// Like [`resolve`](Self::resolve), but each side enters the fight with
    /// the given status (a pre-granted shield, for instance).
    pub fn resolve_with_status(
        &self,
        a: Combatant,
        b: Combatant,
        mode: CombatMode,
        statuses: [CombatStatus; 2],
        rng: &mut GameRng,
    ) -> EngineResult<CombatOutcome> {
        match (a.is_alive(), b.is_alive()) {
            (false, false) => {
                return Err(EngineError::BothDefeated {
                    a: a.display_name,
                    b: b.display_name,
                })
            }
            (false, true) => return Err(EngineError::Defeated(a.display_name)),
            (true, false) => return Err(EngineError::Defeated(b.display_name)),
            (true, true) => {}
        }

        let mut log = BattleLog::new(self.config.logged_rounds);
        log.introduce(&a);
        if mode == CombatMode::Pvp {
            log.line("VS");
        }
        log.introduce(&b);

        let [status_a, status_b] = statuses;
        let mut fighters = [Fighter::new(a, status_a), Fighter::new(b, status_b)];
        for fighter in &fighters {
            if fighter.status.shield > 0 {
                log.line(format!(
                    "{} is protected by a {} hp shield",
                    fighter.view.display_name, fighter.status.shield
                ));
            }
        }
        let (winner, rounds, capped) = match mode {
            CombatMode::Pve => self.run_pve(&mut fighters, &mut log, rng),
            CombatMode::Pvp => self.run_pvp(&mut fighters, &mut log, rng),
        };
        if capped {
            log.line(format!(
                "Round limit reached; {} holds the field",
                fighters[index(winner)].view.display_name
            ));
        }

        let [fa, fb] = fighters;
        let (winner_view, loser_view) = match winner {
            Side::A => (&fa.view, &fb.view),
            Side::B => (&fb.view, &fa.view),
        };
        let text = log.finish(
            rounds,
            winner_view,
            loser_view,
            [
                (fa.view.display_name.as_str(), fa.damage_dealt),
                (fb.view.display_name.as_str(), fb.damage_dealt),
            ],
        );

        let outcome = CombatOutcome {
            mode,
            winner,
            rounds,
            damage_a: fa.damage_dealt,
            damage_b: fb.damage_dealt,
            compensation_rate: (mode == CombatMode::Pvp).then(|| self.compensation_rate(rounds)),
            round_cap_reached: capped,
            a: fa.view,
            b: fb.view,
            log: text,
        };
        tracing::info!(
            ?mode,
            winner = %outcome.combatant(winner).display_name,
            rounds,
            damage_a = outcome.damage_a,
            damage_b = outcome.damage_b,
            "encounter resolved"
        );
        Ok(outcome)
    }

    /// Loser's gold share owed after a PvP fight of `rounds` rounds.
    pub fn compensation_rate(&self, rounds: u32) -> f64 {
        let decay = self.config.compensation_step * rounds.saturating_sub(1) as f64;
        (self.config.compensation_start - decay).max(self.config.compensation_floor)
    }

    fn run_pve(&self, fighters: &mut [Fighter; 2], log: &mut BattleLog, rng: &mut GameRng) -> (Side, u32, bool) {
        let mut round = 1;
        loop {
            log.round_header(round);
            for attacker in [Side::A, Side::B] {
                if self.strike(fighters, attacker, round, log, rng) {
                    return (attacker, round, false);
                }
            }
            round += 1;
        }
    }

    fn run_pvp(&self, fighters: &mut [Fighter; 2], log: &mut BattleLog, rng: &mut GameRng) -> (Side, u32, bool) {
        let cap = self.config.pvp_round_cap.max(1);
        for round in 1..=cap {
            log.round_header(round);
            let first = if rng.coin_flip() { Side::A } else { Side::B };
            for attacker in [first, first.other()] {
                if self.strike(fighters, attacker, round, log, rng) {
                    return (attacker, round, false);
                }
            }
        }
        (Side::A, cap, true)
    }

    /// One blow from `attacker`. Returns true if the defender fell.
    fn strike(
        &self,
        fighters: &mut [Fighter; 2],
        attacker: Side,
        round: u32,
        log: &mut BattleLog,
        rng: &mut GameRng,
    ) -> bool {
        let (att, def) = pair_mut(fighters, attacker);
        let attack = att.status.effective_attack(att.view.attack);
        let damage = roll_damage(attack, def.view.defense, &self.config, rng);
        let through = def.status.absorb(damage.amount);
        let lost = def.view.take_damage(through);
        att.damage_dealt += damage.amount;

        let stolen = if att.status.enraged {
            att.view.heal(att.status.life_steal(damage.base))
        } else {
            0
        };
        log.blow(
            round,
            &att.view.display_name,
            &def.view.display_name,
            damage.kind,
            damage.amount,
            stolen,
        );
        tracing::debug!(
            round,
            attacker = %att.view.display_name,
            amount = damage.amount,
            lost,
            stolen,
            defender_hp = def.view.hp(),
            "blow landed"
        );

        if !def.view.is_alive() {
            return true;
        }
        if def.view.is_monster()
            && !def.status.enraged
            && def.view.hp_ratio() < self.config.enrage_hp_ratio
            && rng.chance(self.config.enrage_chance)
        {
            def.status.enrage(
                self.config.enrage_attack_multiplier,
                self.config.enrage_life_steal_ratio,
            );
            let effects: Vec<&str> = def.status.active_effects().iter().map(|e| e.as_str()).collect();
            log.event(
                round,
                format!("{} becomes enraged! ({})", def.view.display_name, effects.join(", ")),
            );
            tracing::debug!(round, monster = %def.view.display_name, "monster enraged");
        }
        false
    }
}

fn index(side: Side) -> usize {
    match side {
        Side::A => 0,
        Side::B => 1,
    }
}

/// Split the pair into (acting, receiving).
fn pair_mut(fighters: &mut [Fighter; 2], attacker: Side) -> (&mut Fighter, &mut Fighter) {
    let [a, b] = fighters;
    match attacker {
        Side::A => (a, b),
        Side::B => (b, a),
    }
}
