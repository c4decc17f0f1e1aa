use super::traits::KeyValueStore;
use anyhow::{Context, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// One JSON document per key under a data directory: `<dir>/<key>.json`.
pub struct FileKeyValueStore {
    dir: PathBuf,
}

impl FileKeyValueStore {
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)
            .with_context(|| format!("failed creating data directory: {}", dir.display()))?;
        Ok(Self { dir })
    }

    fn path_for(&self, key: &str) -> Result<PathBuf> {
        anyhow::ensure!(
            !key.is_empty()
                && key
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
                && !key.starts_with('.'),
            "invalid storage key: {key:?}"
        );
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl KeyValueStore for FileKeyValueStore {
    fn name(&self) -> &str {
        "file"
    }

    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(None),
            Err(error) => {
                Err(error).with_context(|| format!("failed reading {}", path.display()))
            }
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key)?;
        write_atomic(&path, value)
    }

    fn remove(&self, key: &str) -> Result<()> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(()),
            Err(error) => {
                Err(error).with_context(|| format!("failed removing {}", path.display()))
            }
        }
    }
}

fn write_atomic(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed creating store parent: {}", parent.display()))?;
    }

    let temp_path = path.with_extension("json.tmp");
    fs::write(&temp_path, content)
        .with_context(|| format!("failed writing store temp file: {}", temp_path.display()))?;

    if let Err(rename_error) = fs::rename(&temp_path, path) {
        let _ = fs::remove_file(&temp_path);
        return Err(rename_error)
            .with_context(|| format!("failed replacing store file atomically: {}", path.display()));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_key_reads_as_none() {
        let tmp = TempDir::new().unwrap();
        let store = FileKeyValueStore::new(tmp.path()).unwrap();
        assert!(store.get("chat-kra-settings").unwrap().is_none());
    }

    #[test]
    fn set_persists_across_instances() {
        let tmp = TempDir::new().unwrap();
        FileKeyValueStore::new(tmp.path())
            .unwrap()
            .set("chat-kra-settings", "{\"a\":1}")
            .unwrap();

        let reopened = FileKeyValueStore::new(tmp.path()).unwrap();
        assert_eq!(
            reopened.get("chat-kra-settings").unwrap().as_deref(),
            Some("{\"a\":1}")
        );
        assert!(tmp.path().join("chat-kra-settings.json").exists());
        assert!(!tmp.path().join("chat-kra-settings.json.tmp").exists());
    }

    #[test]
    fn creates_nested_data_directory() {
        let tmp = TempDir::new().unwrap();
        let nested = tmp.path().join("a").join("b");
        let store = FileKeyValueStore::new(&nested).unwrap();
        store.set("k", "v").unwrap();
        assert!(nested.join("k.json").exists());
    }

    #[test]
    fn rejects_path_traversal_keys() {
        let tmp = TempDir::new().unwrap();
        let store = FileKeyValueStore::new(tmp.path()).unwrap();
        assert!(store.set("../escape", "x").is_err());
        assert!(store.get("a/b").is_err());
        assert!(store.set("", "x").is_err());
    }

    #[test]
    fn remove_missing_key_is_ok() {
        let tmp = TempDir::new().unwrap();
        let store = FileKeyValueStore::new(tmp.path()).unwrap();
        assert!(store.remove("never-written").is_ok());
    }
}
