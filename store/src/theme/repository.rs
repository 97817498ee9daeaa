use crate::error::{ThemeError, ThemeResult};
use crate::persist::write_atomic;
use crate::theme::defaults::default_themes;
use crate::theme::types::{LoadOutcome, ThemeConfig};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// File name of the persisted theme list inside the data directory
pub const CONFIG_FILE_NAME: &str = "themeConfig.json";

/// Ordered, name-unique list of saved themes backed by a JSON file.
///
/// Every structural change is written through to disk. The repository is
/// built once by the composition root with [`ConfigRepository::init`].
#[derive(Debug)]
pub struct ConfigRepository {
    path: PathBuf,
    configs: Vec<ThemeConfig>,
    outcome: LoadOutcome,
}

impl ConfigRepository {
    /// Load the list from `path`, falling back to `defaults` when the file is
    /// missing or unreadable. A corrupt file is left as it is.
    pub fn init(path: impl Into<PathBuf>, defaults: Vec<ThemeConfig>) -> Self {
        let path = path.into();

        let (configs, outcome) = match Self::read_file(&path) {
            Ok(Some(configs)) => (dedup_by_name(configs), LoadOutcome::Loaded),
            Ok(None) => (defaults, LoadOutcome::Missing),
            Err(e) => {
                log::warn!("Falling back to default themes: {e}");
                (defaults, LoadOutcome::Corrupt(e.to_string()))
            }
        };

        log::info!(
            "Theme list initialized from {} with {} entries ({:?})",
            path.display(),
            configs.len(),
            outcome
        );

        Self {
            path,
            configs,
            outcome,
        }
    }

    /// [`init`](Self::init) with the standard file name and the bundled presets.
    pub fn init_in_dir(data_dir: &Path) -> Self {
        Self::init(data_dir.join(CONFIG_FILE_NAME), default_themes())
    }

    /// Read the persisted list. `None` when the file is missing or corrupt.
    pub fn load(&self) -> Option<Vec<ThemeConfig>> {
        match Self::read_file(&self.path) {
            Ok(configs) => configs,
            Err(e) => {
                log::warn!("Could not load theme list: {e}");
                None
            }
        }
    }

    fn read_file(path: &Path) -> ThemeResult<Option<Vec<ThemeConfig>>> {
        if !path.exists() {
            return Ok(None);
        }

        let corrupt = |reason: String| ThemeError::PersistedDataCorrupt {
            path: path.display().to_string(),
            reason,
        };

        let json = fs::read_to_string(path).map_err(|e| corrupt(e.to_string()))?;
        serde_json::from_str(&json)
            .map(Some)
            .map_err(|e| corrupt(e.to_string()))
    }

    pub fn list(&self) -> &[ThemeConfig] {
        &self.configs
    }

    pub fn len(&self) -> usize {
        self.configs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.configs.is_empty()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load_outcome(&self) -> &LoadOutcome {
        &self.outcome
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.configs.iter().position(|c| c.theme_name == name)
    }

    pub fn find(&self, name: &str) -> Option<&ThemeConfig> {
        self.position(name).map(|i| &self.configs[i])
    }

    /// Write the whole list to disk, replacing the previous file atomically.
    pub fn save(&self) -> ThemeResult<()> {
        let json = serde_json::to_vec_pretty(&self.configs).map_err(|e| ThemeError::Serialize {
            what: "theme list",
            source: e,
        })?;
        write_atomic(&self.path, &json)?;
        log::debug!("Saved {} themes to {}", self.configs.len(), self.path.display());
        Ok(())
    }

    /// Replace the first entry with the same name in place, or append.
    fn merge(&mut self, config: ThemeConfig) -> bool {
        match self.configs.iter().position(|c| c.same_name(&config)) {
            Some(index) if self.configs[index] == config => false,
            Some(index) => {
                self.configs[index] = config;
                true
            }
            None => {
                self.configs.push(config);
                true
            }
        }
    }

    /// Insert or replace by exact name and persist.
    pub fn upsert(&mut self, config: ThemeConfig) -> ThemeResult<()> {
        log::info!("Saving theme '{}'", config.theme_name);
        self.merge(config);
        self.save()
    }

    /// Parse one theme from JSON and upsert it. Returns `false` when the JSON
    /// is not a theme; the list is then left unchanged.
    pub fn upsert_json(&mut self, json: &str) -> bool {
        let trimmed = json.trim_matches(|c: char| c < ' ');
        let config: ThemeConfig = match serde_json::from_str(trimmed) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("Rejected theme JSON: {e}");
                return false;
            }
        };

        if let Err(e) = self.upsert(config) {
            log::error!("Theme was added but the list could not be saved: {e}");
        }
        true
    }

    /// Remove the entry at `index` and persist.
    pub fn delete(&mut self, index: usize) -> ThemeResult<ThemeConfig> {
        if index >= self.configs.len() {
            return Err(ThemeError::IndexOutOfRange {
                index,
                len: self.configs.len(),
            });
        }

        let removed = self.configs.remove(index);
        log::info!("Deleted theme '{}'", removed.theme_name);
        self.save()?;
        Ok(removed)
    }

    /// Re-read the file and upsert every entry from it into this list.
    ///
    /// Only persists when something actually changed.
    pub fn refresh(&mut self) -> ThemeResult<()> {
        let Some(persisted) = self.load() else {
            return Ok(());
        };

        let mut changed = false;
        for config in persisted {
            changed |= self.merge(config);
        }

        if changed {
            log::info!("Theme list changed on disk, reconciled");
            self.save()?;
        }
        Ok(())
    }
}

fn dedup_by_name(configs: Vec<ThemeConfig>) -> Vec<ThemeConfig> {
    let mut seen = HashSet::new();
    let before = configs.len();
    let unique: Vec<_> = configs
        .into_iter()
        .filter(|c| seen.insert(c.theme_name.clone()))
        .collect();
    if unique.len() != before {
        log::warn!("Dropped {} duplicate theme names", before - unique.len());
    }
    unique
}

#[cfg(test)]
mod tests {
    use super::*;

    fn theme(name: &str, background: &str) -> ThemeConfig {
        ThemeConfig {
            theme_name: name.to_string(),
            primary_color: "#112233".to_string(),
            accent_color: "#445566".to_string(),
            background_color: background.to_string(),
            bottom_background: "#CCCCCC".to_string(),
        }
    }

    #[test]
    fn test_missing_file_uses_defaults_without_writing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);

        let repo = ConfigRepository::init(&path, vec![theme("Paper", "#FFFFFF")]);

        assert_eq!(repo.load_outcome(), &LoadOutcome::Missing);
        assert_eq!(repo.len(), 1);
        assert!(!path.exists());
    }

    #[test]
    fn test_corrupt_file_uses_defaults_and_is_kept() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "{\"themeName\": ").unwrap();

        let repo = ConfigRepository::init(&path, vec![theme("Paper", "#FFFFFF")]);

        assert!(matches!(repo.load_outcome(), LoadOutcome::Corrupt(_)));
        assert!(repo.load_outcome().used_defaults());
        assert_eq!(repo.list()[0].theme_name, "Paper");
        assert_eq!(fs::read_to_string(&path).unwrap(), "{\"themeName\": ");
    }

    #[test]
    fn test_schema_mismatch_counts_as_corrupt() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, r##"[{"themeName": "Paper", "primaryColor": "#FFFFFF"}]"##).unwrap();

        let repo = ConfigRepository::init(&path, Vec::new());

        assert!(matches!(repo.load_outcome(), LoadOutcome::Corrupt(_)));
        assert!(repo.is_empty());
        assert!(repo.load().is_none());
    }

    #[test]
    fn test_duplicate_names_on_disk_keep_first() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        let on_disk = vec![theme("Paper", "#FFFFFF"), theme("Paper", "#EEEEEE")];
        fs::write(&path, serde_json::to_string(&on_disk).unwrap()).unwrap();

        let repo = ConfigRepository::init(&path, Vec::new());

        assert_eq!(repo.list(), &[theme("Paper", "#FFFFFF")]);
    }

    #[test]
    fn test_upsert_json_trims_control_characters() {
        let dir = tempfile::tempdir().unwrap();
        let mut repo = ConfigRepository::init(dir.path().join(CONFIG_FILE_NAME), Vec::new());
        let body = serde_json::to_string(&theme("Paper", "#FFFFFF")).unwrap();

        // U+FEFF is not a control character, so it is not trimmed
        let json = format!("\u{feff}\n\t{body}\r\n");
        assert!(!repo.upsert_json(&json));

        let json = format!("\n\t{body}\r\n");
        assert!(repo.upsert_json(&json));
        assert_eq!(repo.find("Paper"), Some(&theme("Paper", "#FFFFFF")));
    }

    #[test]
    fn test_delete_out_of_range_is_rejected_without_mutation() {
        let dir = tempfile::tempdir().unwrap();
        let mut repo = ConfigRepository::init(
            dir.path().join(CONFIG_FILE_NAME),
            vec![theme("Paper", "#FFFFFF")],
        );

        let err = repo.delete(1).unwrap_err();
        assert!(matches!(err, ThemeError::IndexOutOfRange { index: 1, len: 1 }));
        assert_eq!(repo.len(), 1);
    }

    #[test]
    fn test_refresh_is_noop_without_external_change() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        let mut repo = ConfigRepository::init(&path, Vec::new());
        repo.upsert(theme("Paper", "#FFFFFF")).unwrap();
        let before = fs::metadata(&path).unwrap().modified().unwrap();

        repo.refresh().unwrap();

        assert_eq!(repo.list(), &[theme("Paper", "#FFFFFF")]);
        assert_eq!(fs::metadata(&path).unwrap().modified().unwrap(), before);
    }
}
