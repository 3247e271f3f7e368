//! UI preference persistence: a thin key-value shim over a JSON file.
//!
//! Preferences are read once at startup and written on change. They are
//! opaque to the alert engine; only the CLI layer touches them. The
//! file lives at `<root>/.omniboard/prefs.json`.

use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub const KEY_PLATFORM: &str = "selectedPlatform";
pub const KEY_TEAM_ID: &str = "selectedTeamId";
pub const KEY_SIDEBAR: &str = "sidebarCollapsed";
pub const KEY_THEME: &str = "theme";

/// All persisted keys, in display order.
pub const KEYS: [&str; 4] = [KEY_PLATFORM, KEY_TEAM_ID, KEY_SIDEBAR, KEY_THEME];

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
/// Persisted UI state. Every field is optional; a missing or unreadable
/// file is simply the default.
pub struct UiPreferences {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_platform: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_team_id: Option<u32>,
    #[serde(default)]
    pub sidebar_collapsed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
}

impl UiPreferences {
    /// Value for a key, rendered as a string; `None` when unset.
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            KEY_PLATFORM => self.selected_platform.clone(),
            KEY_TEAM_ID => self.selected_team_id.map(|id| id.to_string()),
            KEY_SIDEBAR => Some(self.sidebar_collapsed.to_string()),
            KEY_THEME => self.theme.clone(),
            _ => None,
        }
    }

    /// Set a key from its string form. Unknown keys and unparsable
    /// values are rejected with a message.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), String> {
        match key {
            KEY_PLATFORM => self.selected_platform = Some(value.to_string()),
            KEY_TEAM_ID => {
                let id: u32 = value
                    .parse()
                    .map_err(|_| format!("'{}' is not a team id", value))?;
                self.selected_team_id = Some(id);
            }
            KEY_SIDEBAR => {
                let flag: bool = value
                    .parse()
                    .map_err(|_| format!("'{}' is not true/false", value))?;
                self.sidebar_collapsed = flag;
            }
            KEY_THEME => self.theme = Some(value.to_string()),
            other => return Err(format!("unknown preference key '{}'", other)),
        }
        Ok(())
    }

    pub fn entries(&self) -> Vec<(&'static str, Option<String>)> {
        KEYS.iter().map(|k| (*k, self.get(k))).collect()
    }
}

/// Adapter interface over the preference store. The engine never sees
/// this; only the CLI layer loads and saves.
pub trait PrefsAdapter {
    fn load(&self) -> UiPreferences;
    fn save(&self, prefs: &UiPreferences) -> io::Result<()>;
}

/// JSON file store under the resolved root.
pub struct FilePrefs {
    path: PathBuf,
}

impl FilePrefs {
    pub fn new(root: &Path) -> Self {
        FilePrefs {
            path: root.join(".omniboard").join("prefs.json"),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PrefsAdapter for FilePrefs {
    fn load(&self) -> UiPreferences {
        match fs::read_to_string(&self.path) {
            Ok(s) => serde_json::from_str(&s).unwrap_or_default(),
            Err(_) => UiPreferences::default(),
        }
    }

    fn save(&self, prefs: &UiPreferences) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let body = serde_json::to_string_pretty(prefs)
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
        fs::write(&self.path, body)
    }
}

/// In-memory store for tests and embedding.
#[derive(Default)]
pub struct MemoryPrefs {
    state: RefCell<UiPreferences>,
}

impl PrefsAdapter for MemoryPrefs {
    fn load(&self) -> UiPreferences {
        self.state.borrow().clone()
    }

    fn save(&self, prefs: &UiPreferences) -> io::Result<()> {
        *self.state.borrow_mut() = prefs.clone();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_file_roundtrip() {
        let dir = tempdir().unwrap();
        let store = FilePrefs::new(dir.path());

        // Missing file loads as defaults.
        assert_eq!(store.load(), UiPreferences::default());

        let mut prefs = UiPreferences::default();
        prefs.set(KEY_PLATFORM, "iOS").unwrap();
        prefs.set(KEY_TEAM_ID, "11").unwrap();
        prefs.set(KEY_SIDEBAR, "true").unwrap();
        prefs.set(KEY_THEME, "dark").unwrap();
        store.save(&prefs).unwrap();

        let loaded = store.load();
        assert_eq!(loaded, prefs);
        assert_eq!(loaded.get(KEY_TEAM_ID).as_deref(), Some("11"));
        assert_eq!(loaded.get(KEY_THEME).as_deref(), Some("dark"));
    }

    #[test]
    fn test_corrupt_file_loads_as_defaults() {
        let dir = tempdir().unwrap();
        let store = FilePrefs::new(dir.path());
        fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        fs::write(store.path(), "not json").unwrap();
        assert_eq!(store.load(), UiPreferences::default());
    }

    #[test]
    fn test_set_rejects_bad_input() {
        let mut prefs = UiPreferences::default();
        assert!(prefs.set(KEY_TEAM_ID, "eleven").is_err());
        assert!(prefs.set(KEY_SIDEBAR, "maybe").is_err());
        assert!(prefs.set("fontSize", "12").is_err());
        assert!(prefs.get("fontSize").is_none());
    }

    #[test]
    fn test_memory_adapter() {
        let store = MemoryPrefs::default();
        let mut prefs = store.load();
        prefs.set(KEY_PLATFORM, "Web").unwrap();
        store.save(&prefs).unwrap();
        assert_eq!(store.load().get(KEY_PLATFORM).as_deref(), Some("Web"));
    }

    #[test]
    fn test_entries_cover_all_keys() {
        let prefs = UiPreferences::default();
        let entries = prefs.entries();
        assert_eq!(entries.len(), KEYS.len());
        assert_eq!(entries[2], (KEY_SIDEBAR, Some("false".to_string())));
    }
}
