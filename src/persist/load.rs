use crate::sim::game::GameState;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use super::PersistError;

pub fn load_state(path: &Path) -> Result<Option<GameState>, PersistError> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(Some(deserialize(&content)?)),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
        Err(err) => Err(err.into()),
    }
}

pub(super) fn deserialize(content: &str) -> Result<GameState, PersistError> {
    Ok(ron::from_str(content)?)
}
