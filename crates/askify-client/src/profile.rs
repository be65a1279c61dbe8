//! Locally persisted user profile and preferences.
//!
//! The login flow (external to this client) writes a user record; this module
//! reads it, carries the mute/theme preferences, and persists everything as
//! `~/.config/askify/config.toml`.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use thiserror::Error;

/// Errors from reading or writing the local config file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("could not determine home directory")]
    NoHomeDir,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),
}

/// The locally stored user identity, as handed over by the login flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Email identifying the user against the backend.
    pub email: String,
    /// Optional display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

impl UserProfile {
    /// Name shown in the welcome message: the username, else the local part
    /// of the email, else "User".
    pub fn display_name(&self) -> String {
        if let Some(name) = &self.username
            && !name.is_empty()
        {
            return name.clone();
        }
        match self.email.split('@').next() {
            Some(local) if !local.is_empty() => local.to_string(),
            _ => "User".to_string(),
        }
    }
}

/// Color theme preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    /// The other theme.
    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }
}

/// Persisted UI preferences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Prefs {
    /// Suppress audible feedback on bot replies.
    #[serde(default)]
    pub muted: bool,
    /// Color theme, dark by default.
    #[serde(default)]
    pub theme: Theme,
}

/// On-disk layout of the config file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct StoredConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    profile: Option<UserProfile>,
    #[serde(default)]
    prefs: Prefs,
}

/// Reads and writes the Askify config file.
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    /// Opens the store at the default location, `~/.config/askify/config.toml`.
    pub fn open_default() -> Result<Self, ConfigError> {
        let home = dirs::home_dir().ok_or(ConfigError::NoHomeDir)?;
        Ok(Self::at(home.join(".config").join("askify").join("config.toml")))
    }

    /// Opens the store at an explicit path (used by tests).
    pub fn at(path: PathBuf) -> Self {
        Self { path }
    }

    /// Loads the stored profile and preferences. A missing file yields no
    /// profile and default preferences.
    pub fn load(&self) -> Result<(Option<UserProfile>, Prefs), ConfigError> {
        if !self.path.exists() {
            return Ok((None, Prefs::default()));
        }
        let content = fs::read_to_string(&self.path)?;
        let stored: StoredConfig = toml::from_str(&content)?;
        Ok((stored.profile, stored.prefs))
    }

    /// Saves the profile and preferences, creating parent directories as
    /// needed.
    pub fn save(&self, profile: Option<&UserProfile>, prefs: Prefs) -> Result<(), ConfigError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let stored = StoredConfig {
            profile: profile.cloned(),
            prefs,
        };
        let content = toml::to_string_pretty(&stored)?;
        fs::write(&self.path, content)?;
        Ok(())
    }

    /// Logout: drops the stored profile, keeping the preferences.
    pub fn clear_profile(&self) -> Result<(), ConfigError> {
        let (_, prefs) = self.load()?;
        self.save(None, prefs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> ConfigStore {
        ConfigStore::at(dir.path().join("config.toml"))
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let (profile, prefs) = store_in(&dir).load().unwrap();
        assert!(profile.is_none());
        assert_eq!(prefs, Prefs::default());
        assert!(!prefs.muted);
        assert_eq!(prefs.theme, Theme::Dark);
    }

    #[test]
    fn profile_and_prefs_round_trip() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        let profile = UserProfile {
            email: "ada@example.com".to_string(),
            username: Some("Ada".to_string()),
        };
        let prefs = Prefs {
            muted: true,
            theme: Theme::Light,
        };

        store.save(Some(&profile), prefs).unwrap();
        let (loaded_profile, loaded_prefs) = store.load().unwrap();

        assert_eq!(loaded_profile, Some(profile));
        assert_eq!(loaded_prefs, prefs);
    }

    #[test]
    fn clear_profile_keeps_prefs() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        let profile = UserProfile {
            email: "ada@example.com".to_string(),
            username: None,
        };
        let prefs = Prefs {
            muted: true,
            theme: Theme::Dark,
        };
        store.save(Some(&profile), prefs).unwrap();

        store.clear_profile().unwrap();
        let (loaded_profile, loaded_prefs) = store.load().unwrap();

        assert!(loaded_profile.is_none());
        assert!(loaded_prefs.muted);
    }

    #[test]
    fn display_name_prefers_username_then_email_local_part() {
        let named = UserProfile {
            email: "ada@example.com".to_string(),
            username: Some("Ada".to_string()),
        };
        assert_eq!(named.display_name(), "Ada");

        let unnamed = UserProfile {
            email: "ada@example.com".to_string(),
            username: None,
        };
        assert_eq!(unnamed.display_name(), "ada");

        let empty = UserProfile {
            email: String::new(),
            username: None,
        };
        assert_eq!(empty.display_name(), "User");
    }

    #[test]
    fn theme_toggles_both_ways() {
        assert_eq!(Theme::Dark.toggled(), Theme::Light);
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
    }
}
