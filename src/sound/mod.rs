//! Sound effects: sample playback with a synthesized fallback.
//!
//! Each `SoundKind` has a static `SoundProfile` describing an oscillator
//! graph. The `SoundEngine` plays a pre-recorded sample when one is bound
//! to the kind and synthesizes the profile otherwise (or when the sample
//! fails). The same profiles render offline to WAV for tests and asset
//! generation.

pub mod engine;
pub mod oscillator;
pub mod profile;
pub mod render;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PortfolioError;

pub use engine::{AudioBackend, SoundEngine};
pub use profile::{ParamEvent, SoundProfile, ToneProfile, profile};

/// A UI event that makes a noise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SoundKind {
    Hover,
    Click,
    Power,
    Jump,
    LevelUp,
}

impl SoundKind {
    pub const ALL: [SoundKind; 5] = [
        SoundKind::Hover,
        SoundKind::Click,
        SoundKind::Power,
        SoundKind::Jump,
        SoundKind::LevelUp,
    ];

    pub fn name(self) -> &'static str {
        match self {
            SoundKind::Hover => "hover",
            SoundKind::Click => "click",
            SoundKind::Power => "power",
            SoundKind::Jump => "jump",
            SoundKind::LevelUp => "level-up",
        }
    }
}

impl fmt::Display for SoundKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SoundKind {
    type Err = PortfolioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SoundKind::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| PortfolioError::UnknownSound(s.to_string()))
    }
}

/// Oscillator waveform shapes used by the profiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Waveform {
    Sine,
    Square,
    Triangle,
}

/// A pre-recorded sample bound to a sound kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleBinding {
    pub kind: SoundKind,
    /// URL relative to the page.
    pub path: String,
    /// Playback volume [0, 1].
    pub volume: f64,
}

impl SampleBinding {
    pub fn new(kind: SoundKind, path: &str, volume: f64) -> Self {
        SampleBinding {
            kind,
            path: path.to_string(),
            volume,
        }
    }
}

/// Anything that can be asked to make a sound.
///
/// Implementations never fail to the caller; a sound that cannot play is
/// simply not heard.
pub trait SoundPlayer {
    fn play(&self, kind: SoundKind);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip_through_from_str() {
        for kind in SoundKind::ALL {
            assert_eq!(kind.name().parse::<SoundKind>().unwrap(), kind);
        }
    }

    #[test]
    fn unknown_name_is_rejected() {
        let err = "explosion".parse::<SoundKind>().unwrap_err();
        assert_eq!(err, PortfolioError::UnknownSound("explosion".to_string()));
    }

    #[test]
    fn serde_uses_kebab_case() {
        let json = serde_json::to_string(&SoundKind::LevelUp).unwrap();
        assert_eq!(json, "\"level-up\"");
    }
}
