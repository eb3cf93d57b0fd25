use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::error::{Error, Result};
use crate::prompt::Choice;

/// File in each world folder holding the name shown in the game's world list.
pub const LEVEL_NAME_FILE: &str = "levelname.txt";

/// Subdirectory of each world folder holding the LevelDB database.
pub const DB_DIR: &str = "db";

/// List the worlds under `root` as menu choices. The message is the world's
/// display name and the name is its folder.
///
/// Folders without a readable `levelname.txt` are left out. An unreadable
/// `root` is an error.
pub fn world_choices(root: &Path) -> Result<Vec<Choice>> {
    let entries = fs::read_dir(root).map_err(|source| Error::SaveRoot {
        path: root.to_path_buf(),
        source,
    })?;

    let mut choices: Vec<Choice> = entries
        .flatten()
        .filter(|entry| entry.path().is_dir())
        .filter_map(|entry| {
            let folder = match entry.file_name().into_string() {
                Ok(folder) => folder,
                Err(name) => {
                    debug!("skipping non-unicode world folder {:?}", name);
                    return None;
                }
            };
            let label = match fs::read_to_string(entry.path().join(LEVEL_NAME_FILE)) {
                Ok(label) => label,
                Err(e) => {
                    debug!("skipping world folder {}: {}", folder, e);
                    return None;
                }
            };

            Some(Choice::new(label.trim(), folder))
        })
        .collect();

    choices.sort_by(|a, b| a.name.cmp(&b.name));
    info!("found {} worlds in {}", choices.len(), root.display());

    Ok(choices)
}

/// Directory of the database of the world in `folder`.
pub fn db_path(root: &Path, folder: &str) -> PathBuf {
    root.join(folder).join(DB_DIR)
}
