use crate::sim::game::GameState;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use super::{PersistError, StateStore, load, save};

/// The save slot as a RON file on disk.
#[derive(Debug, Clone)]
pub struct RonFileStore {
    path: PathBuf,
}

impl RonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StateStore for RonFileStore {
    fn save(&self, state: &GameState) -> Result<(), PersistError> {
        save::save_state(&self.path, state)
    }

    fn load(&self) -> Result<Option<GameState>, PersistError> {
        load::load_state(&self.path)
    }
}

/// Keeps the serialized snapshot in memory. Clones share the same slot.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    slot: Arc<Mutex<Option<String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.slot
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .is_none()
    }
}

impl StateStore for MemoryStore {
    fn save(&self, state: &GameState) -> Result<(), PersistError> {
        let serialized = save::serialize(state)?;
        *self
            .slot
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(serialized);
        Ok(())
    }

    fn load(&self) -> Result<Option<GameState>, PersistError> {
        let slot = self
            .slot
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        slot.as_deref().map(load::deserialize).transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::resources::ResourceKind;
    use std::env;
    use std::fs;

    fn played_state() -> GameState {
        let mut state = GameState::default();
        state.ledger.get_mut(ResourceKind::Bits).amount = 1_234.5;
        state.factories[0].count = 3;
        state.factories[0].cost = 25.92;
        state.upgrades.remove(0);
        state.prestige_upgrades[1].bought = true;
        state.achievements[0].is_unlocked = true;
        state.prestige_points = 4;
        state.offline_efficiency = Some(0.75);
        state
    }

    #[test]
    fn memory_store_round_trips_catalogs() {
        let store = MemoryStore::new();
        assert!(store.load().expect("empty load").is_none());

        let state = played_state();
        store.save(&state).expect("save");
        let loaded = store.load().expect("load").expect("state present");
        assert_eq!(loaded, state);
    }

    #[test]
    fn file_store_round_trips_and_reports_missing_save() {
        let dir = env::temp_dir().join(format!("quantum-clicker-store-{}", std::process::id()));
        fs::create_dir_all(&dir).expect("temp dir");
        let store = RonFileStore::new(dir.join("save.ron"));
        assert!(store.load().expect("missing file is not an error").is_none());

        let state = played_state();
        store.save(&state).expect("save");
        let loaded = store.load().expect("load").expect("state present");
        assert_eq!(loaded, state);

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn corrupt_save_is_a_parse_error() {
        let dir = env::temp_dir().join(format!("quantum-clicker-corrupt-{}", std::process::id()));
        fs::create_dir_all(&dir).expect("temp dir");
        let path = dir.join("save.ron");
        fs::write(&path, "(not a save").expect("write");
        let store = RonFileStore::new(&path);
        assert!(matches!(store.load(), Err(PersistError::Deserialize(_))));
        fs::remove_dir_all(&dir).ok();
    }
}
