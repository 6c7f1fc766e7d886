use crate::sim::game::GameState;
use ron::ser::PrettyConfig;
use std::fs;
use std::path::Path;

use super::PersistError;

pub fn save_state(path: &Path, state: &GameState) -> Result<(), PersistError> {
    let serialized = serialize(state)?;
    // Write beside the target first so a crash mid-write keeps the old save.
    let staging = path.with_extension("ron.tmp");
    fs::write(&staging, serialized)?;
    fs::rename(&staging, path)?;
    Ok(())
}

pub(super) fn serialize(state: &GameState) -> Result<String, PersistError> {
    let pretty = PrettyConfig::new();
    Ok(ron::ser::to_string_pretty(state, pretty)?)
}
