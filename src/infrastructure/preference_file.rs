// TOML file implementation of the preference store
use crate::application::error::PreferenceError;
use crate::application::preference_store::PreferenceStore;
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct FilePreferenceStore {
    path: PathBuf,
}

impl FilePreferenceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl PreferenceStore for FilePreferenceStore {
    fn load(&self) -> Result<BTreeMap<String, String>, PreferenceError> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let raw = fs::read_to_string(&self.path)?;
        Ok(toml::from_str(&raw)?)
    }

    fn save(&self, values: &BTreeMap<String, String>) -> Result<(), PreferenceError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, toml::to_string(values)?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FilePreferenceStore::new(dir.path().join("prefs.toml"));
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = FilePreferenceStore::new(dir.path().join("nested/prefs.toml"));
        let mut values = BTreeMap::new();
        values.insert("agrovision-theme".to_string(), "dark".to_string());

        store.save(&values).unwrap();

        assert_eq!(store.load().unwrap(), values);
        let raw = fs::read_to_string(dir.path().join("nested/prefs.toml")).unwrap();
        assert!(raw.contains("agrovision-theme = \"dark\""));
    }

    #[test]
    fn test_corrupt_file_is_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.toml");
        fs::write(&path, "agrovision-theme = [").unwrap();

        let err = FilePreferenceStore::new(path).load().unwrap_err();

        assert!(matches!(err, PreferenceError::Decode(_)));
    }
}
