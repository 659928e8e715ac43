//! Battle log - bounded plain-text narration of an encounter.
//!
//! The first `logged_rounds` rounds are written verbatim. Past that only
//! important events (enrage transitions) are kept and appended after the
//! round count, so a long fight never produces an unbounded log.

use game_rules::Combatant;

use super::HitKind;

#[derive(Debug, Clone, Default)]
pub struct BattleLog {
    lines: Vec<String>,
    important_events: Vec<String>,
    logged_rounds: u32,
}

impl BattleLog {
    pub fn new(logged_rounds: u32) -> Self {
        Self {
            logged_rounds,
            ..Default::default()
        }
    }

    /// Whether round `round` is narrated verbatim.
    pub fn is_verbose(&self, round: u32) -> bool {
        round <= self.logged_rounds
    }

    pub fn line(&mut self, text: impl Into<String>) {
        self.lines.push(text.into());
    }

    /// Stat card for one side.
    pub fn introduce(&mut self, combatant: &Combatant) {
        self.line(format!(
            "{} Lv.{}  HP {}/{}  ATK {}  DEF {}",
            combatant.display_name,
            combatant.level,
            combatant.hp(),
            combatant.max_hp(),
            combatant.attack,
            combatant.defense
        ));
    }

    pub fn round_header(&mut self, round: u32) {
        if self.is_verbose(round) {
            self.line(format!("Round {round}"));
        }
    }

    pub fn blow(
        &mut self,
        round: u32,
        attacker: &str,
        defender: &str,
        kind: HitKind,
        amount: i64,
        stolen: i64,
    ) {
        if !self.is_verbose(round) {
            return;
        }
        let mut text = format!("{}{attacker} deals {amount} damage to {defender}", kind.log_prefix());
        if stolen > 0 {
            text.push_str(&format!(" and drains {stolen} hp"));
        }
        self.line(text);
    }

    /// A notable transition: narrated in place early, collected afterwards.
    pub fn event(&mut self, round: u32, text: impl Into<String>) {
        let text = text.into();
        if self.is_verbose(round) {
            self.line(text);
        } else {
            self.important_events.push(format!("Round {round}: {text}"));
        }
    }

    pub fn important_events(&self) -> &[String] {
        &self.important_events
    }

    /// Close the log with defeat line, round count, events, and damage totals.
    pub fn finish(
        mut self,
        rounds: u32,
        winner: &Combatant,
        loser: &Combatant,
        damage: [(&str, i64); 2],
    ) -> String {
        if !loser.is_alive() {
            self.line(format!("{} was defeated!", loser.display_name));
        }
        let plural = if rounds == 1 { "round" } else { "rounds" };
        self.line(format!("The battle lasted {rounds} {plural}"));
        if !self.important_events.is_empty() {
            self.line("Important events:");
            let events = std::mem::take(&mut self.important_events);
            self.lines.extend(events);
        }
        if rounds == 1 {
            self.line(format!("{}: One blow. Nothing more to say.", winner.display_name));
        }
        self.line("Damage dealt:");
        for (name, total) in damage {
            self.line(format!("{name}: {total}"));
        }
        self.lines.join("\n")
    }
}
