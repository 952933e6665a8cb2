//! Configuration loading and management.

use std::path::{Path, PathBuf};
use std::time::Duration;

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};
use tp_core::{DecorationMode, DecorationProfile, ProfileError};

/// Application configuration.
///
/// Overrides are applied on top of the built-in profile for the selected
/// mode; the level tables themselves are not runtime-configurable.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Which visual channel to decorate.
    pub mode: DecorationMode,
    /// Tick interval override in milliseconds.
    pub tick_interval_ms: Option<u64>,
    /// Countdown length override.
    pub countdown: Option<u32>,
}

impl Config {
    /// Loads configuration from default locations.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load() -> Result<Self, figment::Error> {
        Self::load_from(None)
    }

    /// Loads configuration, optionally from a specific file.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Load from default config location
        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        // Load from specified config file
        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        // Load from environment variables (TP_*)
        figment = figment.merge(Env::prefixed("TP_"));

        figment.extract()
    }

    /// Resolves the decoration profile for this configuration.
    pub fn decoration_profile(&self) -> Result<DecorationProfile, ProfileError> {
        let mut profile = DecorationProfile::for_mode(self.mode);
        if let Some(ms) = self.tick_interval_ms {
            profile.tick_interval = Duration::from_millis(ms);
        }
        if let Some(countdown) = self.countdown {
            profile.countdown = countdown;
        }
        profile.validate()?;
        Ok(profile)
    }
}

/// Returns the platform-specific config directory for tabpulse.
fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("tabpulse"))
}
