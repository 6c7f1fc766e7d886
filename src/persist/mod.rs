//! Durable storage for the single save slot.

mod load;
mod save;
mod store;

pub use load::load_state;
pub use save::save_state;
pub use store::{MemoryStore, RonFileStore};

use crate::sim::game::GameState;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("save file i/o failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to serialize state: {0}")]
    Serialize(#[from] ron::Error),
    #[error("failed to parse save: {0}")]
    Deserialize(#[from] ron::error::SpannedError),
}

/// Loads and saves the whole game snapshot, catalogs included.
pub trait StateStore: Send {
    fn save(&self, state: &GameState) -> Result<(), PersistError>;

    /// `Ok(None)` when nothing has been saved yet.
    fn load(&self) -> Result<Option<GameState>, PersistError>;
}
