//! Decoration profiles: per-mode timing and level tables.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{favicon, title};

/// Validation errors for decoration profiles.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProfileError {
    /// The countdown length was zero.
    #[error("countdown must be at least 1")]
    ZeroCountdown,

    /// The tick interval was zero.
    #[error("tick interval must be non-zero")]
    ZeroInterval,

    /// The visual-level table was empty.
    #[error("level table cannot be empty")]
    EmptyLevels,

    /// An unrecognized decoration mode string.
    #[error("invalid decoration mode: {value}")]
    InvalidMode { value: String },
}

/// Which visual channel a profile decorates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DecorationMode {
    /// Rewrite the tab title with a counting-down glyph prefix.
    #[default]
    Title,
    /// Swap the tab favicon for a counting-down icon asset.
    Favicon,
}

impl DecorationMode {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Favicon => "favicon",
        }
    }
}

impl fmt::Display for DecorationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for DecorationMode {
    type Err = ProfileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "title" => Ok(Self::Title),
            "favicon" => Ok(Self::Favicon),
            _ => Err(ProfileError::InvalidMode {
                value: s.to_string(),
            }),
        }
    }
}

/// Timing and rendering parameters for one decoration mode.
///
/// The engine treats the countdown length, tick interval, and level table as
/// opaque configuration; the built-in constructors carry the observed values
/// for each mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecorationProfile {
    pub mode: DecorationMode,
    /// Delay between countdown ticks.
    pub tick_interval: Duration,
    /// Countdown length N. The initial frame renders at level N (clamped),
    /// ticks then count seconds N-1 down to the terminal value.
    pub countdown: u32,
    /// Whether a terminal frame at level 0 is rendered before restoring.
    /// Favicon mode renders it; title mode restores at zero without one.
    pub renders_final_frame: bool,
    /// Ordered visual levels, least intense first. Title mode entries are
    /// glyphs composed into the title; favicon mode entries are asset paths.
    pub levels: Vec<String>,
}

impl DecorationProfile {
    /// The observed title profile: 10 ticks at 1000 ms over the glyph table.
    #[must_use]
    pub fn title() -> Self {
        Self {
            mode: DecorationMode::Title,
            tick_interval: Duration::from_millis(1000),
            countdown: 10,
            renders_final_frame: false,
            levels: title::EMOJI_DIGITS.iter().map(ToString::to_string).collect(),
        }
    }

    /// The observed favicon profile: 5 ticks at 2000 ms over the icon table,
    /// with a terminal frame at level 0.
    #[must_use]
    pub fn favicon() -> Self {
        Self {
            mode: DecorationMode::Favicon,
            tick_interval: Duration::from_millis(2000),
            countdown: 5,
            renders_final_frame: true,
            levels: favicon::ICON_ASSETS.iter().map(ToString::to_string).collect(),
        }
    }

    /// Returns the built-in profile for a mode.
    #[must_use]
    pub fn for_mode(mode: DecorationMode) -> Self {
        match mode {
            DecorationMode::Title => Self::title(),
            DecorationMode::Favicon => Self::favicon(),
        }
    }

    /// Checks the profile invariants the engine relies on.
    pub fn validate(&self) -> Result<(), ProfileError> {
        if self.countdown == 0 {
            return Err(ProfileError::ZeroCountdown);
        }
        if self.tick_interval.is_zero() {
            return Err(ProfileError::ZeroInterval);
        }
        if self.levels.is_empty() {
            return Err(ProfileError::EmptyLevels);
        }
        Ok(())
    }

    /// Maps remaining seconds to a level index, reusing the most intense
    /// entry for values beyond the table.
    #[must_use]
    pub fn clamp_level(&self, seconds_left: usize) -> usize {
        seconds_left.min(self.levels.len().saturating_sub(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_profiles_validate() {
        assert!(DecorationProfile::title().validate().is_ok());
        assert!(DecorationProfile::favicon().validate().is_ok());
    }

    #[test]
    fn title_profile_matches_observed_values() {
        let profile = DecorationProfile::title();
        assert_eq!(profile.countdown, 10);
        assert_eq!(profile.tick_interval, Duration::from_millis(1000));
        assert_eq!(profile.levels.len(), 11);
        assert!(!profile.renders_final_frame);
    }

    #[test]
    fn favicon_profile_matches_observed_values() {
        let profile = DecorationProfile::favicon();
        assert_eq!(profile.countdown, 5);
        assert_eq!(profile.tick_interval, Duration::from_millis(2000));
        assert_eq!(profile.levels.len(), 6);
        assert!(profile.renders_final_frame);
    }

    #[test]
    fn validate_rejects_zero_countdown() {
        let mut profile = DecorationProfile::title();
        profile.countdown = 0;
        assert_eq!(profile.validate(), Err(ProfileError::ZeroCountdown));
    }

    #[test]
    fn validate_rejects_zero_interval() {
        let mut profile = DecorationProfile::title();
        profile.tick_interval = Duration::ZERO;
        assert_eq!(profile.validate(), Err(ProfileError::ZeroInterval));
    }

    #[test]
    fn validate_rejects_empty_levels() {
        let mut profile = DecorationProfile::favicon();
        profile.levels.clear();
        assert_eq!(profile.validate(), Err(ProfileError::EmptyLevels));
    }

    #[test]
    fn clamp_reuses_most_intense_level_beyond_table() {
        let profile = DecorationProfile::favicon();
        assert_eq!(profile.clamp_level(0), 0);
        assert_eq!(profile.clamp_level(5), 5);
        assert_eq!(profile.clamp_level(99), 5);
    }

    #[test]
    fn mode_roundtrips_through_strings() {
        for mode in [DecorationMode::Title, DecorationMode::Favicon] {
            let parsed: DecorationMode = mode.as_str().parse().unwrap();
            assert_eq!(parsed, mode);
            assert_eq!(mode.to_string(), mode.as_str());
        }
    }

    #[test]
    fn mode_rejects_unknown_string() {
        let err = "badge".parse::<DecorationMode>().unwrap_err();
        assert_eq!(
            err,
            ProfileError::InvalidMode {
                value: "badge".to_string()
            }
        );
    }

    #[test]
    fn mode_serde_matches_as_str() {
        for mode in [DecorationMode::Title, DecorationMode::Favicon] {
            let value = serde_json::to_value(mode).unwrap();
            assert_eq!(value.as_str().unwrap(), mode.as_str());
        }
    }
}
