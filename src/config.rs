//! Page configuration.
//!
//! Every field has a default matching the stock page, so an empty JSON
//! object (or no config at all) gives the standard behavior.

use serde::{Deserialize, Serialize};

use crate::error::PortfolioError;
use crate::sound::{SampleBinding, SoundKind};

/// Top-level configuration, usually read from a
/// `<script type="application/json" id="portfolio-config">` element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    /// `EnvFilter` directive for the console log bridge.
    pub log_level: String,
    pub sound: SoundConfig,
    pub progress: ProgressConfig,
    pub timing: TimingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            log_level: "info".to_string(),
            sound: SoundConfig::default(),
            progress: ProgressConfig::default(),
            timing: TimingConfig::default(),
        }
    }
}

impl Config {
    /// Parse a JSON config. Missing fields take their defaults.
    pub fn from_json(source: &str) -> Result<Self, PortfolioError> {
        Ok(serde_json::from_str(source)?)
    }
}

/// Sound engine settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SoundConfig {
    /// Whether sound starts enabled. Browsers block audio before a user
    /// gesture, so the stock page starts muted.
    pub enabled: bool,
    /// Kinds played from pre-recorded samples before falling back to synthesis.
    pub samples: Vec<SampleBinding>,
}

impl Default for SoundConfig {
    fn default() -> Self {
        SoundConfig {
            enabled: false,
            samples: vec![
                SampleBinding::new(SoundKind::Hover, "assets/sounds/hover.wav", 0.2),
                SampleBinding::new(SoundKind::Click, "assets/sounds/click.wav", 0.3),
            ],
        }
    }
}

/// XP bar settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProgressConfig {
    pub xp_per_level: u32,
    /// Shown after the level number: `LEVEL 2 - <role>`.
    pub role_label: String,
    /// How long the `xp-shine` class stays on the bar.
    pub shine_ms: u32,
    /// How long the level-up notification and label animation stay up.
    pub level_up_ms: u32,
}

impl Default for ProgressConfig {
    fn default() -> Self {
        ProgressConfig {
            xp_per_level: 1000,
            role_label: "SOFTWARE DEVELOPER".to_string(),
            shine_ms: 1500,
            level_up_ms: 3000,
        }
    }
}

/// When the XP bar is recomputed, plus the other fixed UI delays.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TimingConfig {
    /// Recompute after each of these delays once the page has booted.
    pub startup_recompute_ms: Vec<u32>,
    /// Delay after the first click anywhere on the page.
    pub first_interaction_ms: u32,
    /// Quiet period before a resize triggers a recompute.
    pub resize_debounce_ms: u32,
    /// Flash class duration on the manual refresh control.
    pub refresh_flash_ms: u32,
    /// Whether to play the boot overlay animation.
    pub startup_overlay: bool,
}

impl Default for TimingConfig {
    fn default() -> Self {
        TimingConfig {
            startup_recompute_ms: vec![200, 500, 1000, 2000],
            first_interaction_ms: 100,
            resize_debounce_ms: 200,
            refresh_flash_ms: 500,
            startup_overlay: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_gives_defaults() {
        let cfg = Config::from_json("{}").unwrap();
        assert_eq!(cfg, Config::default());
        assert_eq!(cfg.progress.xp_per_level, 1000);
        assert_eq!(cfg.timing.startup_recompute_ms, vec![200, 500, 1000, 2000]);
        assert!(!cfg.sound.enabled, "sound should start muted");
    }

    #[test]
    fn partial_override_keeps_other_defaults() {
        let cfg = Config::from_json(
            r#"{ "progress": { "xpPerLevel": 500 }, "timing": { "resizeDebounceMs": 50 } }"#,
        )
        .unwrap();
        assert_eq!(cfg.progress.xp_per_level, 500);
        assert_eq!(cfg.progress.role_label, "SOFTWARE DEVELOPER");
        assert_eq!(cfg.timing.resize_debounce_ms, 50);
        assert_eq!(cfg.timing.first_interaction_ms, 100);
    }

    #[test]
    fn sample_bindings_parse_kebab_case_kinds() {
        let cfg = Config::from_json(
            r#"{ "sound": { "samples": [ { "kind": "level-up", "path": "fanfare.wav", "volume": 0.5 } ] } }"#,
        )
        .unwrap();
        assert_eq!(cfg.sound.samples.len(), 1);
        assert_eq!(cfg.sound.samples[0].kind, SoundKind::LevelUp);
        assert_eq!(cfg.sound.samples[0].path, "fanfare.wav");
    }

    #[test]
    fn default_samples_match_stock_volumes() {
        let cfg = SoundConfig::default();
        let hover = cfg.samples.iter().find(|s| s.kind == SoundKind::Hover).unwrap();
        let click = cfg.samples.iter().find(|s| s.kind == SoundKind::Click).unwrap();
        assert_eq!(hover.volume, 0.2);
        assert_eq!(click.volume, 0.3);
        assert_eq!(click.path, "assets/sounds/click.wav");
    }

    #[test]
    fn malformed_json_is_a_config_error() {
        let err = Config::from_json("{ not json").unwrap_err();
        assert!(matches!(err, PortfolioError::Config(_)));
    }
}
