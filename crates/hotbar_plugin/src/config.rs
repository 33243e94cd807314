//! # Plugin Configuration
//!
//! A small versioned TOML document, loaded once at startup.
//!
//! ```toml
//! Version = "1.0.0"
//! "Reload Chat Command" = "reload"
//! "Unload Chat Command" = "unload"
//! ```
//!
//! Files written by an older plugin version are migrated in place: anything
//! older than 1.0.0 is reset to defaults, then the version is bumped. The
//! file is always written back after loading, so new keys show up for
//! server owners to edit.

use std::cmp::Ordering;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{PluginError, PluginResult};

/// Version of this plugin, stamped into config files.
pub const PLUGIN_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Oldest config layout that is migrated rather than reset.
const FIRST_STABLE_VERSION: &str = "1.0.0";

/// Default chat token for the reload command.
pub const DEFAULT_RELOAD_COMMAND: &str = "reload";

/// Default chat token for the unload command.
pub const DEFAULT_UNLOAD_COMMAND: &str = "unload";

fn default_reload_command() -> String {
    DEFAULT_RELOAD_COMMAND.to_string()
}

fn default_unload_command() -> String {
    DEFAULT_UNLOAD_COMMAND.to_string()
}

/// Plugin configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginConfig {
    /// Version that last wrote this file. Empty when missing.
    #[serde(rename = "Version", default)]
    pub version: String,
    /// Chat token bound to reload.
    #[serde(rename = "Reload Chat Command", default = "default_reload_command")]
    pub reload_chat_command: String,
    /// Chat token bound to unload.
    #[serde(rename = "Unload Chat Command", default = "default_unload_command")]
    pub unload_chat_command: String,
}

impl Default for PluginConfig {
    fn default() -> Self {
        Self {
            version: PLUGIN_VERSION.to_string(),
            reload_chat_command: default_reload_command(),
            unload_chat_command: default_unload_command(),
        }
    }
}

impl PluginConfig {
    /// Loads the config at `path`, creating it with defaults if missing.
    ///
    /// Migrates older files and saves the result back to `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, validated, or
    /// written.
    pub fn load(path: impl AsRef<Path>) -> PluginResult<Self> {
        let path = path.as_ref();

        let mut config = if path.exists() {
            let text = fs::read_to_string(path).map_err(|source| PluginError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            Self::from_toml_str(&text)?
        } else {
            info!(path = %path.display(), "creating default config");
            Self::default()
        };

        if config.is_outdated() {
            config.migrate();
        }
        config.validate()?;
        config.save(path)?;

        Ok(config)
    }

    /// Parses a config document without touching the filesystem.
    ///
    /// # Errors
    ///
    /// Returns `PluginError::Parse` on malformed TOML.
    pub fn from_toml_str(text: &str) -> PluginResult<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Serializes the config to TOML.
    ///
    /// # Errors
    ///
    /// Returns `PluginError::Serialize` if serialization fails.
    pub fn to_toml_string(&self) -> PluginResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Writes the config to `path`, creating missing parent directories.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub fn save(&self, path: impl AsRef<Path>) -> PluginResult<()> {
        let path = path.as_ref();
        let text = self.to_toml_string()?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| PluginError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        fs::write(path, text).map_err(|source| PluginError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Returns true if this config was written by an older version.
    #[must_use]
    pub fn is_outdated(&self) -> bool {
        compare_versions(&self.version, PLUGIN_VERSION) == Ordering::Less
    }

    /// Brings an outdated config up to the current version.
    pub fn migrate(&mut self) {
        warn!("Config changes detected! Updating...");

        let previous = std::mem::take(&mut self.version);
        if compare_versions(&previous, FIRST_STABLE_VERSION) == Ordering::Less {
            *self = Self::default();
        }

        warn!(
            "Config update complete! Updated from version {} to {}",
            if previous.is_empty() { "<none>" } else { previous.as_str() },
            PLUGIN_VERSION
        );
        self.version = PLUGIN_VERSION.to_string();
    }

    /// Checks that both command tokens are usable.
    ///
    /// # Errors
    ///
    /// Returns `PluginError::InvalidConfig` if a token is empty, contains
    /// whitespace, or both commands share a token.
    pub fn validate(&self) -> PluginResult<()> {
        for (key, token) in [
            ("Reload Chat Command", &self.reload_chat_command),
            ("Unload Chat Command", &self.unload_chat_command),
        ] {
            if token.is_empty() || token.chars().any(char::is_whitespace) {
                return Err(PluginError::InvalidConfig(format!(
                    "{key} must be a single word, got {token:?}"
                )));
            }
        }

        if self
            .reload_chat_command
            .eq_ignore_ascii_case(&self.unload_chat_command)
        {
            return Err(PluginError::InvalidConfig(format!(
                "reload and unload share the command {:?}",
                self.reload_chat_command
            )));
        }

        Ok(())
    }
}

/// Compares dotted numeric versions. Missing or non-numeric parts count as 0,
/// so `""` sorts before every real version.
#[must_use]
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    fn parts(v: &str) -> Vec<u64> {
        v.split('.')
            .map(|p| p.trim().parse().unwrap_or(0))
            .collect()
    }

    let (a, b) = (parts(a), parts(b));
    let len = a.len().max(b.len());
    (0..len)
        .map(|i| {
            let x = a.get(i).copied().unwrap_or(0);
            let y = b.get(i).copied().unwrap_or(0);
            x.cmp(&y)
        })
        .find(|o| o.is_ne())
        .unwrap_or(Ordering::Equal)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_config_path(tag: &str) -> std::path::PathBuf {
        let id = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        std::env::temp_dir().join(format!("test_hotbar_config_{tag}_{id}.toml"))
    }

    #[test]
    fn test_compare_versions() {
        assert_eq!(compare_versions("1.0.0", "1.0.0"), Ordering::Equal);
        assert_eq!(compare_versions("0.9.9", "1.0.0"), Ordering::Less);
        assert_eq!(compare_versions("1.10.0", "1.9.0"), Ordering::Greater);
        assert_eq!(compare_versions("", "1.0.0"), Ordering::Less);
        assert_eq!(compare_versions("1.0", "1.0.0"), Ordering::Equal);
    }

    #[test]
    fn test_parse_spaced_keys() {
        let config = PluginConfig::from_toml_str(
            r#"
            Version = "1.0.0"
            "Reload Chat Command" = "rl"
            "Unload Chat Command" = "ul"
            "#,
        )
        .unwrap();
        assert_eq!(config.reload_chat_command, "rl");
        assert_eq!(config.unload_chat_command, "ul");
        assert!(!config.is_outdated());
    }

    #[test]
    fn test_missing_version_is_outdated() {
        let config = PluginConfig::from_toml_str(r#""Reload Chat Command" = "rl""#).unwrap();
        assert!(config.is_outdated());
        assert_eq!(config.unload_chat_command, DEFAULT_UNLOAD_COMMAND);
    }

    #[test]
    fn test_migrate_pre_release_resets() {
        let mut config = PluginConfig {
            version: "0.1.0".to_string(),
            reload_chat_command: "old".to_string(),
            unload_chat_command: "older".to_string(),
        };
        config.migrate();
        assert_eq!(config, PluginConfig::default());
    }

    #[test]
    fn test_validate_rejects_bad_tokens() {
        let mut config = PluginConfig::default();
        config.reload_chat_command = "re load".to_string();
        assert!(matches!(config.validate(), Err(PluginError::InvalidConfig(_))));

        let mut config = PluginConfig::default();
        config.unload_chat_command = "RELOAD".to_string();
        assert!(matches!(config.validate(), Err(PluginError::InvalidConfig(_))));
    }

    #[test]
    fn test_load_creates_and_round_trips() {
        let path = temp_config_path("create");

        let created = PluginConfig::load(&path).unwrap();
        assert_eq!(created, PluginConfig::default());
        assert!(path.exists());

        let reloaded = PluginConfig::load(&path).unwrap();
        assert_eq!(reloaded, created);

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_load_creates_missing_dir() {
        let dir = temp_config_path("dir").with_extension("");
        let path = dir.join("config").join("ReloadHotbar.toml");

        let created = PluginConfig::load(&path).unwrap();
        assert_eq!(created, PluginConfig::default());
        assert!(path.exists());

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_load_malformed_file() {
        let path = temp_config_path("malformed");
        std::fs::write(&path, "Version = ").unwrap();

        assert!(matches!(PluginConfig::load(&path), Err(PluginError::Parse(_))));

        std::fs::remove_file(&path).ok();
    }
}
