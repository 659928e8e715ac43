//! Loot reconciliation - merges a fresh drop into a player's holdings.
//!
//! Names are the collision key. An inventory collision is checked first,
//! then the equipped item of the drop's slot; without a collision the drop
//! is simply stored. On a collision the strictly rarer item is kept and the
//! other is liquidated for a fixed share of its price. The reconciler works
//! on a snapshot and returns deltas; it never writes to storage.

use game_rules::{Equipment, EquipmentId, PlayerRecord, ProgressionCurve, StatBlock};
use serde::{Deserialize, Serialize};

/// Which branch reconciliation took.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LootDecision {
    /// Same-named item held and at least as rare: the drop was liquidated.
    DropLiquidated,
    /// Same-named inventory item was weaker: it was liquidated, the drop stored.
    InventoryReplaced,
    /// Same-named equipped item was weaker: the drop was equipped, the old one liquidated.
    Equipped,
    /// No collision: the drop was stored unequipped.
    Stored,
}

/// State changes for the orchestrator to apply.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LootDeltas {
    pub gold: i64,
    pub inventory_add: Option<Equipment>,
    /// Inventory key to remove.
    pub inventory_remove: Option<String>,
    pub equip: Option<Equipment>,
    /// Liquidated items, to be deleted from equipment storage.
    pub destroyed: Vec<EquipmentId>,
    /// Change to max hp, attack, and defense after recomputation.
    pub stats: StatBlock,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LootOutcome {
    pub decision: LootDecision,
    pub explanation: String,
    pub deltas: LootDeltas,
}

impl LootOutcome {
    /// Apply the deltas to a player record.
    pub fn apply_to(&self, record: &mut PlayerRecord, curve: &ProgressionCurve) {
        let deltas = &self.deltas;
        record.gold += deltas.gold;
        if let Some(name) = &deltas.inventory_remove {
            record.inventory.remove(name);
        }
        if let Some(item) = &deltas.inventory_add {
            record.inventory.insert(item.name.clone(), item.clone());
        }
        if let Some(item) = &deltas.equip {
            record.set_equipped(item.slot, Some(item.clone()));
            record.recompute_stats(curve);
        }
    }
}

#[derive(Debug, Clone)]
pub struct LootReconciler {
    curve: ProgressionCurve,
    liquidation_percent: i64,
}

impl LootReconciler {
    pub fn new(curve: ProgressionCurve, liquidation_percent: i64) -> Self {
        Self {
            curve,
            liquidation_percent,
        }
    }

    pub fn liquidation_value(&self, item: &Equipment) -> i64 {
        item.liquidation_value(self.liquidation_percent)
    }

    /// Decide what happens to `drop` given the holder's current snapshot.
    pub fn reconcile(&self, drop: Equipment, holder: &PlayerRecord) -> LootOutcome {
        let outcome = if let Some(existing) = holder.inventory.get(&drop.name) {
            self.against_inventory(drop, existing)
        } else if let Some(worn) = holder.equipped(drop.slot).filter(|w| w.name == drop.name) {
            self.against_equipped(drop, worn, holder)
        } else {
            LootOutcome {
                decision: LootDecision::Stored,
                explanation: format!("{} ({}) was added to your inventory.", drop.name, drop.rarity),
                deltas: LootDeltas {
                    inventory_add: Some(drop),
                    ..Default::default()
                },
            }
        };
        tracing::info!(
            player = %holder.id,
            decision = ?outcome.decision,
            gold = outcome.deltas.gold,
            "loot reconciled"
        );
        outcome
    }

    fn against_inventory(&self, drop: Equipment, existing: &Equipment) -> LootOutcome {
        if drop.rarity <= existing.rarity {
            return self.liquidate_drop(drop, existing);
        }
        let gold = self.liquidation_value(existing);
        LootOutcome {
            decision: LootDecision::InventoryReplaced,
            explanation: format!(
                "Your {} {} was sold for {gold} gold to make room for the {} one.",
                existing.rarity, existing.name, drop.rarity
            ),
            deltas: LootDeltas {
                gold,
                inventory_remove: Some(existing.name.clone()),
                destroyed: vec![existing.id],
                inventory_add: Some(drop),
                ..Default::default()
            },
        }
    }

    fn against_equipped(&self, drop: Equipment, worn: &Equipment, holder: &PlayerRecord) -> LootOutcome {
        if drop.rarity <= worn.rarity {
            return self.liquidate_drop(drop, worn);
        }
        let gold = self.liquidation_value(worn);
        let mut preview = holder.clone();
        preview.set_equipped(drop.slot, Some(drop.clone()));
        let stats = preview.recompute_stats(&self.curve);
        LootOutcome {
            decision: LootDecision::Equipped,
            explanation: format!(
                "Equipped the {} {}; the old {} one was sold for {gold} gold.",
                drop.rarity, drop.name, worn.rarity
            ),
            deltas: LootDeltas {
                gold,
                destroyed: vec![worn.id],
                equip: Some(drop),
                stats,
                ..Default::default()
            },
        }
    }

    fn liquidate_drop(&self, drop: Equipment, kept: &Equipment) -> LootOutcome {
        let gold = self.liquidation_value(&drop);
        LootOutcome {
            decision: LootDecision::DropLiquidated,
            explanation: format!(
                "You already own a {} {}; the new {} copy was sold for {gold} gold.",
                kept.rarity, kept.name, drop.rarity
            ),
            deltas: LootDeltas {
                gold,
                destroyed: vec![drop.id],
                ..Default::default()
            },
        }
    }
}
