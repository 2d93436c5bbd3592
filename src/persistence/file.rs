use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::{ScoreStore, StoreError};

/// A JSON object of string values in a single file.
///
/// Every read goes to disk so several processes sharing the file see each
/// other's records. Writes go to `<path>.tmp` and are renamed into place.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// `<path>.tmp`, keeping the original extension
    fn tmp_path(&self) -> PathBuf {
        let mut name = self.path.clone().into_os_string();
        name.push(".tmp");
        PathBuf::from(name)
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>, StoreError> {
        match fs::read_to_string(&self.path) {
            Ok(json) if json.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(json) => Ok(serde_json::from_str(&json)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }
}

impl ScoreStore for FileStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.read_all()?.remove(key))
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut items = self.read_all()?;
        items.insert(key.to_string(), value.to_string());

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let tmp = self.tmp_path();
        fs::write(&tmp, serde_json::to_string_pretty(&items)?)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_reads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("scores.json"));
        assert_eq!(store.get_item("snake_best_score").unwrap(), None);
    }

    #[test]
    fn test_write_then_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("scores.json");
        let mut store = FileStore::new(&path);
        store.set_item("snake_best_score", "12").unwrap();
        store.set_item("pong_best_total", "3").unwrap();

        let reopened = FileStore::new(&path);
        assert_eq!(reopened.get_item("snake_best_score").unwrap().as_deref(), Some("12"));
        assert_eq!(reopened.get_item("pong_best_total").unwrap().as_deref(), Some("3"));
        assert!(!dir.path().join("nested").join("scores.json.tmp").exists());
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scores.json");
        fs::write(&path, "not json").unwrap();
        let store = FileStore::new(&path);
        assert!(matches!(store.get_item("x"), Err(StoreError::Json(_))));
    }

    #[test]
    fn test_tmp_files_do_not_collide() {
        let dir = tempfile::tempdir().unwrap();
        let json = FileStore::new(dir.path().join("scores.json"));
        let txt = FileStore::new(dir.path().join("scores.txt"));
        assert_eq!(json.tmp_path(), dir.path().join("scores.json.tmp"));
        assert_ne!(json.tmp_path(), txt.tmp_path());
    }
}
