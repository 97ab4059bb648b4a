use directories::{BaseDirs, ProjectDirs};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

pub const CONFIG_ENV: &str = "REALTIME_CHAT_CONFIG";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Profile {
    pub name: String,
    pub email: String,
    pub mobile: String,
    pub status: String,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            name: "Kishore Reddy".into(),
            email: "kishore@example.com".into(),
            mobile: "+91 98765 43210".into(),
            status: "Hey there! I'm using Realtime Chat".into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    pub dark_mode: bool,
    pub sound_notifications: bool,
    pub notifications: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            dark_mode: false,
            sound_notifications: true,
            notifications: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub profile: Profile,
    pub preferences: Preferences,
}

impl AppConfig {
    // TOML is read first; a JSON file in the project dir is still honoured
    pub fn toml_path() -> Result<PathBuf, ConfigError> {
        Self::resolve_toml_path(std::env::var_os(CONFIG_ENV).map(PathBuf::from))
    }

    fn resolve_toml_path(explicit: Option<PathBuf>) -> Result<PathBuf, ConfigError> {
        if let Some(explicit) = explicit {
            return Ok(explicit);
        }
        let base = BaseDirs::new().ok_or(ConfigError::NoConfigDir)?;
        Ok(base.config_dir().join("realtime-chat.toml"))
    }

    fn legacy_json_path() -> Option<PathBuf> {
        let proj = ProjectDirs::from("com", "example", "RealtimeChat")?;
        Some(proj.config_dir().join("config.json"))
    }

    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Ok(toml::from_str(&text)?)
    }

    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let bytes = fs::read(path)?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Loads the config, falling back to built-in defaults when no file is
    /// readable. Parse errors are logged, never fatal.
    pub fn load() -> Self {
        let explicit = std::env::var_os(CONFIG_ENV).map(PathBuf::from);
        Self::load_with(explicit, Self::legacy_json_path().as_deref())
    }

    fn load_with(explicit: Option<PathBuf>, legacy: Option<&Path>) -> Self {
        if let Some(path) = explicit.as_deref().filter(|p| !p.exists()) {
            warn!("{CONFIG_ENV} names {}, which does not exist", path.display());
        }
        let toml = match Self::resolve_toml_path(explicit) {
            Ok(path) => Some(path),
            Err(e) => {
                warn!("{e}");
                None
            }
        };
        Self::load_from(toml.as_deref(), legacy)
    }

    /// Tries the TOML file, then the legacy JSON file, then defaults.
    pub fn load_from(toml: Option<&Path>, legacy: Option<&Path>) -> Self {
        if let Some(path) = toml.filter(|p| p.exists()) {
            match Self::from_toml_file(path) {
                Ok(cfg) => {
                    info!("loaded config from {}", path.display());
                    return cfg;
                }
                Err(e) => warn!("ignoring {}: {e}", path.display()),
            }
        }

        if let Some(path) = legacy.filter(|p| p.exists()) {
            match Self::from_json_file(path) {
                Ok(cfg) => {
                    info!("loaded legacy config from {}", path.display());
                    return cfg;
                }
                Err(e) => warn!("ignoring {}: {e}", path.display()),
            }
        }

        Self::default()
    }
}

#[cfg(feature = "gtk")]
pub fn build_ui(app: &adw::Application) {
    use std::cell::RefCell;
    use std::rc::Rc;

    let config = AppConfig::load();
    let session = Rc::new(RefCell::new(crate::session::Session::new(config)));
    crate::ui::login::show_landing_window(app, session);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn partial_toml_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[profile]\nname = \"Ada Lovelace\"\n\n[preferences]\ndark_mode = true").unwrap();

        let cfg = AppConfig::from_toml_file(file.path()).unwrap();
        assert_eq!(cfg.profile.name, "Ada Lovelace");
        assert_eq!(cfg.profile.email, "kishore@example.com");
        assert!(cfg.preferences.dark_mode);
        assert!(cfg.preferences.sound_notifications);
    }

    #[test]
    fn legacy_json_is_readable() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"profile":{{"status":"busy"}}}}"#).unwrap();
        let cfg = AppConfig::from_json_file(file.path()).unwrap();
        assert_eq!(cfg.profile.status, "busy");
        assert_eq!(cfg.preferences, Preferences::default());
    }

    #[test]
    fn malformed_toml_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[profile\nname = 3").unwrap();
        assert!(matches!(
            AppConfig::from_toml_file(file.path()),
            Err(ConfigError::Toml(_))
        ));
    }

    #[test]
    fn explicit_override_is_read() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[profile]\nname = \"Grace Hopper\"").unwrap();

        assert_eq!(
            AppConfig::resolve_toml_path(Some(file.path().to_path_buf())).unwrap(),
            file.path()
        );
        let cfg = AppConfig::load_with(Some(file.path().to_path_buf()), None);
        assert_eq!(cfg.profile.name, "Grace Hopper");
    }

    #[test]
    fn malformed_toml_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let toml = dir.path().join("realtime-chat.toml");
        fs::write(&toml, "[profile\nname = 3").unwrap();
        assert_eq!(AppConfig::load_from(Some(&toml), None), AppConfig::default());

        let legacy = dir.path().join("config.json");
        fs::write(&legacy, r#"{"preferences":{"dark_mode":true}}"#).unwrap();
        let cfg = AppConfig::load_from(Some(&toml), Some(&legacy));
        assert!(cfg.preferences.dark_mode);
    }

    #[test]
    fn missing_files_give_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let toml = dir.path().join("absent.toml");
        let legacy = dir.path().join("absent.json");
        assert_eq!(AppConfig::load_from(Some(&toml), Some(&legacy)), AppConfig::default());
        assert_eq!(AppConfig::load_from(None, None), AppConfig::default());
    }

    #[test]
    fn missing_override_falls_through_to_legacy() {
        let dir = tempfile::tempdir().unwrap();
        let legacy = dir.path().join("config.json");
        fs::write(&legacy, r#"{"profile":{"status":"away"}}"#).unwrap();

        let cfg = AppConfig::load_with(Some(dir.path().join("nope.toml")), Some(&legacy));
        assert_eq!(cfg.profile.status, "away");
        let cfg = AppConfig::load_with(Some(dir.path().join("nope.toml")), None);
        assert_eq!(cfg, AppConfig::default());
    }
}
