use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use eyre::{Result, WrapErr};
use tracing::{debug, warn};

use crate::SnapshotStore;

/// File-backed snapshot store: one JSON object holding the key→value
/// map, re-read on every access so concurrently running processes see
/// each other's writes under last-write-wins semantics.
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read_map(&self) -> Result<HashMap<String, String>> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(HashMap::new()),
            Err(err) => {
                return Err(err).wrap_err_with(|| {
                    format!("could not read snapshot file {}", self.path.display())
                });
            }
        };
        match serde_json::from_str(&contents) {
            Ok(map) => Ok(map),
            Err(err) => {
                // A corrupt snapshot must never take the session down;
                // treat it as absent.
                warn!(
                    path = %self.path.display(),
                    error = %err,
                    "discarding corrupt snapshot file"
                );
                Ok(HashMap::new())
            }
        }
    }

    fn write_map(&self, map: &HashMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).wrap_err_with(|| {
                format!("could not create snapshot directory {}", parent.display())
            })?;
        }
        let contents = serde_json::to_string_pretty(map)?;
        fs::write(&self.path, contents)
            .wrap_err_with(|| format!("could not write snapshot file {}", self.path.display()))
    }
}

impl SnapshotStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.read_map()?.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut map = self.read_map()?;
        map.insert(key.to_string(), value.to_string());
        self.write_map(&map)?;
        debug!(key, path = %self.path.display(), "snapshot entry written");
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        let mut map = self.read_map()?;
        if map.remove(key).is_some() {
            self.write_map(&map)?;
            debug!(key, path = %self.path.display(), "snapshot entry removed");
        }
        Ok(())
    }
}
