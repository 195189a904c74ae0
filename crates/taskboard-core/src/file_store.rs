use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, anyhow};
use tempfile::NamedTempFile;
use tracing::{debug, error, info};

use crate::storage::KeyValueStore;

pub const STORAGE_FILE: &str = "storage.json";

/// Key-value store kept as one JSON object in the data directory.
#[derive(Debug)]
pub struct FileStore {
    pub path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FileStore {
    #[tracing::instrument(skip(data_dir))]
    pub fn open(data_dir: &Path) -> anyhow::Result<Self> {
        fs::create_dir_all(data_dir)
            .with_context(|| format!("failed to create {}", data_dir.display()))?;

        let path = data_dir.join(STORAGE_FILE);
        let entries = if path.exists() {
            read_entries(&path)?
        } else {
            BTreeMap::new()
        };

        info!(
            path = %path.display(),
            keys = entries.len(),
            "opened storage file"
        );
        Ok(Self { path, entries })
    }
}

impl KeyValueStore for FileStore {
    fn load(&self, key: &str) -> anyhow::Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    #[tracing::instrument(skip(self, value))]
    fn save(&mut self, key: &str, value: &str) -> anyhow::Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        write_entries_atomic(&self.path, &self.entries)
    }
}

fn read_entries(path: &Path) -> anyhow::Result<BTreeMap<String, String>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed reading {}", path.display()))?;
    if raw.trim().is_empty() {
        return Ok(BTreeMap::new());
    }

    match serde_json::from_str(&raw) {
        Ok(entries) => Ok(entries),
        Err(err) => {
            error!(
                file = %path.display(),
                error = %err,
                "storage file is corrupt; starting empty"
            );
            Ok(BTreeMap::new())
        }
    }
}

fn write_entries_atomic(path: &Path, entries: &BTreeMap<String, String>) -> anyhow::Result<()> {
    debug!(file = %path.display(), keys = entries.len(), "saving storage file atomically");

    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let mut temp = NamedTempFile::new_in(dir)?;
    serde_json::to_writer_pretty(&mut temp, entries)?;
    writeln!(temp)?;
    temp.flush()?;

    temp.persist(path)
        .map_err(|err| anyhow!("failed to persist {}: {}", path.display(), err))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::tempdir;

    use super::{FileStore, STORAGE_FILE};
    use crate::storage::KeyValueStore;

    #[test]
    fn values_survive_reopen() {
        let dir = tempdir().expect("tempdir");
        let mut store = FileStore::open(dir.path()).expect("open store");
        store.save("darkMode", "true").expect("save");

        let reopened = FileStore::open(dir.path()).expect("reopen store");
        assert_eq!(
            reopened.load("darkMode").expect("load"),
            Some("true".to_string())
        );
        assert_eq!(reopened.load("todos").expect("load"), None);
    }

    #[test]
    fn corrupt_file_opens_empty() {
        let dir = tempdir().expect("tempdir");
        fs::write(dir.path().join(STORAGE_FILE), "[1, 2").expect("write");

        let store = FileStore::open(dir.path()).expect("open store");
        assert_eq!(store.load("todos").expect("load"), None);
    }
}
