//! Settings persistence.
//!
//! Settings are a single TOML document handled by `confy`. The store is a
//! trait so embedded hosts and tests can keep settings in memory instead.

use std::path::PathBuf;

use rezwatch_types::WatcherSettings;
use thiserror::Error;

/// Application name used for the per-user config directory
pub const APP_NAME: &str = "rezwatch";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load settings from {location}")]
    Load {
        location: String,
        #[source]
        source: confy::ConfyError,
    },
    #[error("failed to save settings to {location}")]
    Save {
        location: String,
        #[source]
        source: confy::ConfyError,
    },
}

/// Where settings are read from and written back to
pub trait SettingsStore {
    fn load(&mut self) -> Result<WatcherSettings, ConfigError>;
    fn save(&mut self, settings: &WatcherSettings) -> Result<(), ConfigError>;
}

// ═══════════════════════════════════════════════════════════════════════════
// confy-backed store
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, Eq)]
enum ConfyLocation {
    /// Per-user config directory, `<config>/<app>/<name>.toml`
    App {
        app_name: String,
        config_name: Option<String>,
    },
    /// Explicit file path
    Path(PathBuf),
}

/// TOML file store backed by `confy`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfyStore {
    location: ConfyLocation,
}

impl Default for ConfyStore {
    fn default() -> Self {
        Self::for_app(APP_NAME, None)
    }
}

impl ConfyStore {
    pub fn for_app(app_name: impl Into<String>, config_name: Option<&str>) -> Self {
        Self {
            location: ConfyLocation::App {
                app_name: app_name.into(),
                config_name: config_name.map(str::to_owned),
            },
        }
    }

    pub fn at_path(path: impl Into<PathBuf>) -> Self {
        Self {
            location: ConfyLocation::Path(path.into()),
        }
    }

    /// Human-readable location, for logs and errors
    pub fn describe(&self) -> String {
        match &self.location {
            ConfyLocation::App {
                app_name,
                config_name,
            } => confy::get_configuration_file_path(app_name, config_name.as_deref())
                .map(|p| p.display().to_string())
                .unwrap_or_else(|_| app_name.clone()),
            ConfyLocation::Path(path) => path.display().to_string(),
        }
    }
}

impl SettingsStore for ConfyStore {
    fn load(&mut self) -> Result<WatcherSettings, ConfigError> {
        let result = match &self.location {
            ConfyLocation::App {
                app_name,
                config_name,
            } => confy::load(app_name, config_name.as_deref()),
            ConfyLocation::Path(path) => confy::load_path(path),
        };
        result.map_err(|source| ConfigError::Load {
            location: self.describe(),
            source,
        })
    }

    fn save(&mut self, settings: &WatcherSettings) -> Result<(), ConfigError> {
        let result = match &self.location {
            ConfyLocation::App {
                app_name,
                config_name,
            } => confy::store(app_name, config_name.as_deref(), settings),
            ConfyLocation::Path(path) => confy::store_path(path, settings),
        };
        result.map_err(|source| ConfigError::Save {
            location: self.describe(),
            source,
        })
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// In-memory store
// ═══════════════════════════════════════════════════════════════════════════

/// Keeps settings in memory and counts writes
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    pub settings: WatcherSettings,
    pub saves: usize,
}

impl MemoryStore {
    pub fn new(settings: WatcherSettings) -> Self {
        Self { settings, saves: 0 }
    }
}

impl SettingsStore for MemoryStore {
    fn load(&mut self) -> Result<WatcherSettings, ConfigError> {
        Ok(self.settings.clone())
    }

    fn save(&mut self, settings: &WatcherSettings) -> Result<(), ConfigError> {
        self.settings = settings.clone();
        self.saves += 1;
        Ok(())
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Loaded settings
// ═══════════════════════════════════════════════════════════════════════════

/// Current settings together with the store they came from
#[derive(Debug)]
pub struct Config<S> {
    settings: WatcherSettings,
    store: S,
}

impl<S: SettingsStore> Config<S> {
    /// Load settings, falling back to defaults if the store cannot be read
    pub fn load(mut store: S) -> Self {
        let settings = store.load().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Failed to load settings, using defaults");
            WatcherSettings::default()
        });
        Self { settings, store }
    }

    pub fn settings(&self) -> &WatcherSettings {
        &self.settings
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Apply `f` to the settings and write them back
    pub fn update(&mut self, f: impl FnOnce(&mut WatcherSettings)) -> Result<(), ConfigError> {
        f(&mut self.settings);
        self.save()
    }

    pub fn save(&mut self) -> Result<(), ConfigError> {
        self.store.save(&self.settings)
    }
}
