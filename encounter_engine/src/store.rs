//! Record stores - the persistence seam of the orchestrator.
//!
//! The in-memory backends keep every row as its JSON encoding, so each load
//! crosses the same validating boundary a database row would.

use std::collections::HashMap;

use game_rules::{Equipment, EquipmentId, PlayerId, PlayerRecord};

use crate::error::{EngineError, EngineResult};

/// Persistence for player records.
pub trait PlayerStore: Send {
    /// Load a validated snapshot of a player.
    fn load(&self, id: PlayerId) -> EngineResult<PlayerRecord>;

    /// Insert or overwrite a player row.
    fn save(&mut self, record: &PlayerRecord) -> EngineResult<()>;

    /// Look a player up by nickname.
    fn find_by_nickname(&self, nickname: &str) -> Option<PlayerId>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Persistence for equipment rows.
pub trait EquipmentStore: Send {
    fn load(&self, id: EquipmentId) -> EngineResult<Equipment>;

    fn insert(&mut self, item: &Equipment) -> EngineResult<()>;

    /// Delete a row, returning it if it existed.
    fn remove(&mut self, id: EquipmentId) -> EngineResult<Option<Equipment>>;

    fn contains(&self, id: EquipmentId) -> bool;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// In-memory player rows.
#[derive(Debug, Default)]
pub struct MemoryPlayerStore {
    rows: HashMap<PlayerId, String>,
    nicknames: HashMap<String, PlayerId>,
}

impl MemoryPlayerStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PlayerStore for MemoryPlayerStore {
    fn load(&self, id: PlayerId) -> EngineResult<PlayerRecord> {
        let row = self.rows.get(&id).ok_or(EngineError::UnknownPlayer(id))?;
        Ok(PlayerRecord::from_json(row)?)
    }

    fn save(&mut self, record: &PlayerRecord) -> EngineResult<()> {
        record.validate()?;
        let row = record.to_json()?;
        self.nicknames.retain(|_, id| *id != record.id);
        self.nicknames.insert(record.nickname.clone(), record.id);
        self.rows.insert(record.id, row);
        Ok(())
    }

    fn find_by_nickname(&self, nickname: &str) -> Option<PlayerId> {
        self.nicknames.get(nickname).copied()
    }

    fn len(&self) -> usize {
        self.rows.len()
    }
}

/// In-memory equipment rows.
#[derive(Debug, Default)]
pub struct MemoryEquipmentStore {
    rows: HashMap<EquipmentId, String>,
}

impl MemoryEquipmentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl EquipmentStore for MemoryEquipmentStore {
    fn load(&self, id: EquipmentId) -> EngineResult<Equipment> {
        let row = self.rows.get(&id).ok_or(EngineError::UnknownEquipment(id))?;
        Ok(Equipment::from_json(row)?)
    }

    fn insert(&mut self, item: &Equipment) -> EngineResult<()> {
        item.validate()?;
        self.rows.insert(item.id, item.to_json()?);
        Ok(())
    }

    fn remove(&mut self, id: EquipmentId) -> EngineResult<Option<Equipment>> {
        match self.rows.remove(&id) {
            Some(row) => Ok(Some(Equipment::from_json(&row)?)),
            None => Ok(None),
        }
    }

    fn contains(&self, id: EquipmentId) -> bool {
        self.rows.contains_key(&id)
    }

    fn len(&self) -> usize {
        self.rows.len()
    }
}
