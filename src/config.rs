use anyhow::{bail, Context, Result};
use directories::ProjectDirs;
use serde::Deserialize;
use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Setting key (and environment variable) naming the database file
pub const DATABASE_FILE_NAME_KEY: &str = "SQLITE_DATABASE_FILE_NAME";

const SETTINGS_FILE: &str = "settings.json";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub sqlite_database_file_name: Option<String>,
    /// Directory searched recursively for the database file
    pub search_root: PathBuf,
    pub log_dir: PathBuf,
    pub log_file_prefix: String,
    pub log_max_files: usize,
    pub log_to_stdout: bool,
    /// Rows printed per table by the demonstration
    pub sample_rows: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sqlite_database_file_name: None,
            search_root: PathBuf::from("."),
            log_dir: PathBuf::from("logs"),
            log_file_prefix: "formatted_log.txt".to_string(),
            log_max_files: 5,
            log_to_stdout: true,
            sample_rows: 5,
        }
    }
}

impl Settings {
    /// Load settings from the first file found, then apply environment overrides.
    ///
    /// Looks at `explicit`, then `./settings.json`, then the per-user config
    /// directory. Defaults apply when no file exists.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        Self::resolve(
            explicit,
            &Self::candidate_files(),
            std::env::var(DATABASE_FILE_NAME_KEY).ok(),
        )
    }

    fn resolve(explicit: Option<&Path>, candidates: &[PathBuf], env_name: Option<String>) -> Result<Self> {
        let mut settings = match explicit {
            Some(path) => Self::from_file(path)?,
            None => match candidates.iter().find(|p| p.is_file()) {
                Some(path) => Self::from_file(path)?,
                None => Self::default(),
            },
        };

        if let Some(name) = env_name.filter(|n| !n.is_empty()) {
            settings.sqlite_database_file_name = Some(name);
        }

        Ok(settings)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file: {:?}", path))?;
        let settings = serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse settings file: {:?}", path))?;
        debug!(path = ?path, "Loaded settings");
        Ok(settings)
    }

    fn candidate_files() -> Vec<PathBuf> {
        let mut files = vec![PathBuf::from(SETTINGS_FILE)];
        if let Some(dirs) = ProjectDirs::from("", "", "sqlite-table-models") {
            files.push(dirs.config_dir().join(SETTINGS_FILE));
        }
        files
    }

    /// Look up a setting by its external key name
    pub fn get_setting(&self, key: &str) -> Option<String> {
        match key {
            DATABASE_FILE_NAME_KEY => self.sqlite_database_file_name.clone(),
            _ => None,
        }
    }

    pub fn database_file_name(&self) -> Result<String> {
        match self.get_setting(DATABASE_FILE_NAME_KEY) {
            Some(name) if !name.is_empty() => Ok(name),
            _ => bail!("{} is not configured", DATABASE_FILE_NAME_KEY),
        }
    }

    /// Find the configured database file under `search_root`
    pub fn locate_database(&self) -> Result<PathBuf> {
        let name = self.database_file_name()?;
        debug!(file = %name, root = ?self.search_root, "Searching for database file");

        find_file(&name, &self.search_root)
            .with_context(|| format!("Database file {:?} not found under {:?}", name, self.search_root))
    }
}

/// Breadth-first search for a file named `name` below `root`.
///
/// Entries are visited in name order and symlinked directories are not
/// followed. Directories that cannot be read are skipped.
pub fn find_file(name: &str, root: &Path) -> Option<PathBuf> {
    let mut queue = VecDeque::from([root.to_path_buf()]);

    while let Some(dir) = queue.pop_front() {
        let Ok(entries) = fs::read_dir(&dir) else {
            continue;
        };
        let mut entries: Vec<_> = entries.filter_map(|e| e.ok()).collect();
        entries.sort_by_key(|e| e.file_name());

        for entry in entries {
            let Ok(file_type) = entry.file_type() else {
                continue;
            };
            if file_type.is_dir() {
                queue.push_back(entry.path());
            } else if entry.file_name() == name {
                return Some(entry.path());
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_fill_missing_keys() {
        let settings: Settings =
            serde_json::from_str(r#"{ "sqlite_database_file_name": "hr.db" }"#).unwrap();
        assert_eq!(settings.database_file_name().unwrap(), "hr.db");
        assert_eq!(settings.log_max_files, 5);
        assert_eq!(settings.search_root, PathBuf::from("."));
    }

    #[test]
    fn test_get_setting() {
        let settings = Settings {
            sqlite_database_file_name: Some("hr.db".into()),
            ..Settings::default()
        };
        assert_eq!(settings.get_setting(DATABASE_FILE_NAME_KEY).as_deref(), Some("hr.db"));
        assert_eq!(settings.get_setting("UNKNOWN"), None);
        assert_eq!(settings.get_setting("SEARCH_ROOT"), None);
    }

    #[test]
    fn test_name_resolves_through_setting_key() {
        let settings = Settings {
            sqlite_database_file_name: Some(String::new()),
            ..Settings::default()
        };
        assert!(settings.database_file_name().is_err());

        let settings = Settings {
            sqlite_database_file_name: Some("hr.db".into()),
            ..Settings::default()
        };
        assert_eq!(settings.database_file_name().unwrap(), "hr.db");
    }

    fn write_settings(dir: &Path, file: &str, db_name: &str) -> PathBuf {
        let path = dir.join(file);
        fs::write(&path, format!(r#"{{ "sqlite_database_file_name": "{}" }}"#, db_name)).unwrap();
        path
    }

    #[test]
    fn test_resolve_explicit_file_wins() {
        let dir = tempfile::tempdir().unwrap();
        let explicit = write_settings(dir.path(), "explicit.json", "explicit.db");
        let local = write_settings(dir.path(), "settings.json", "local.db");

        let settings = Settings::resolve(Some(&explicit), &[local], None).unwrap();
        assert_eq!(settings.database_file_name().unwrap(), "explicit.db");
    }

    #[test]
    fn test_resolve_missing_explicit_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.json");
        assert!(Settings::resolve(Some(&missing), &[], None).is_err());
    }

    #[test]
    fn test_resolve_first_existing_candidate() {
        let dir = tempfile::tempdir().unwrap();
        let absent = dir.path().join("settings.json");
        let user = write_settings(dir.path(), "user.json", "user.db");
        let later = write_settings(dir.path(), "later.json", "later.db");

        let settings = Settings::resolve(None, &[absent, user, later], None).unwrap();
        assert_eq!(settings.database_file_name().unwrap(), "user.db");
    }

    #[test]
    fn test_resolve_defaults_without_files() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::resolve(None, &[dir.path().join("settings.json")], None).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_resolve_environment_override() {
        let dir = tempfile::tempdir().unwrap();
        let local = write_settings(dir.path(), "settings.json", "local.db");

        let settings = Settings::resolve(None, &[local.clone()], Some("env.db".into())).unwrap();
        assert_eq!(settings.database_file_name().unwrap(), "env.db");

        let settings = Settings::resolve(None, &[local], Some(String::new())).unwrap();
        assert_eq!(settings.database_file_name().unwrap(), "local.db");

        let settings = Settings::resolve(None, &[], Some("env.db".into())).unwrap();
        assert_eq!(settings.database_file_name().unwrap(), "env.db");
    }

    #[test]
    fn test_unconfigured_name_is_an_error() {
        assert!(Settings::default().database_file_name().is_err());
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, r#"{ "sqlite_database_file_name": "x.db", "sample_rows": 2 }"#).unwrap();

        let settings = Settings::from_file(&path).unwrap();
        assert_eq!(settings.sample_rows, 2);
        assert!(Settings::from_file(&dir.path().join("missing.json")).is_err());
    }

    #[test]
    fn test_find_file_prefers_shallow_match() {
        let dir = tempfile::tempdir().unwrap();
        let deep = dir.path().join("a").join("b");
        fs::create_dir_all(&deep).unwrap();
        fs::write(deep.join("hr.db"), b"").unwrap();
        fs::create_dir_all(dir.path().join("z")).unwrap();
        fs::write(dir.path().join("z").join("hr.db"), b"").unwrap();

        let found = find_file("hr.db", dir.path()).unwrap();
        assert_eq!(found, dir.path().join("z").join("hr.db"));
        assert!(find_file("other.db", dir.path()).is_none());
    }

    #[test]
    fn test_locate_database() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("hr.db"), b"").unwrap();
        let settings = Settings {
            sqlite_database_file_name: Some("hr.db".into()),
            search_root: dir.path().to_path_buf(),
            ..Settings::default()
        };
        assert_eq!(settings.locate_database().unwrap(), dir.path().join("hr.db"));
    }
}
