//! Progress aggregator: recomputes the XP bar from the visible quests.
//!
//! The aggregator keeps the last displayed level itself; the display is a
//! pure render target and is never read back.

use tracing::{debug, error, info};

use crate::config::ProgressConfig;
use crate::error::PortfolioError;
use crate::sound::{SoundKind, SoundPlayer};

use super::{ProgressState, QuestLog};

/// Where the XP bar is drawn.
pub trait ProgressDisplay {
    /// Snap the fill to zero width so the next width change animates.
    fn reset_fill(&mut self);
    fn set_fill(&mut self, percent: f64);
    fn set_labels(&mut self, xp_label: &str, level_label: &str);
    /// Show the transient shine cue for `duration_ms`.
    fn shine(&mut self, duration_ms: u32);
    /// Show the level-up label cue and a notification reading `message`.
    fn celebrate_level_up(&mut self, message: &str, duration_ms: u32);
}

/// Source of the quest log and the display, re-read on every recompute.
pub trait ProgressSurface {
    type Display: ProgressDisplay;

    /// Find every element the XP bar needs, or report the first one missing.
    fn locate_display(&self) -> Result<Self::Display, PortfolioError>;

    fn quest_log(&self) -> QuestLog;
}

/// What a recompute produced.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecomputeOutcome {
    pub state: ProgressState,
    pub previous_level: u32,
    pub leveled_up: bool,
}

/// Owns the level baseline used to detect level-ups between recomputes.
#[derive(Debug, Clone)]
pub struct ProgressAggregator {
    config: ProgressConfig,
    last_level: u32,
}

impl ProgressAggregator {
    pub fn new(config: ProgressConfig) -> Self {
        ProgressAggregator {
            config,
            last_level: 1,
        }
    }

    /// Level shown by the last successful recompute (1 before any).
    pub fn last_level(&self) -> u32 {
        self.last_level
    }

    /// Recompute from the surface's current state and redraw.
    ///
    /// If any display element is missing nothing is drawn and the level
    /// baseline is left alone.
    pub fn refresh<S: ProgressSurface>(
        &mut self,
        surface: &S,
        sound: &dyn SoundPlayer,
    ) -> Result<RecomputeOutcome, PortfolioError> {
        let mut display = surface.locate_display().inspect_err(|e| {
            error!(error = %e, "XP progress elements not found");
        })?;
        let log = surface.quest_log();
        Ok(self.apply(&log, &mut display, sound))
    }

    /// Recompute from `log` and draw onto an already located display.
    pub fn apply<D: ProgressDisplay + ?Sized>(
        &mut self,
        log: &QuestLog,
        display: &mut D,
        sound: &dyn SoundPlayer,
    ) -> RecomputeOutcome {
        let state = ProgressState::from_total(log.visible_xp(), self.config.xp_per_level);
        let previous_level = self.last_level;
        debug!(
            total_xp = state.total_xp,
            level = state.level,
            percent = state.percent,
            "XP progress recomputed"
        );

        display.reset_fill();
        display.set_fill(state.percent);
        display.set_labels(&state.xp_label(), &state.level_label(&self.config.role_label));
        self.last_level = state.level;
        display.shine(self.config.shine_ms);

        let leveled_up = state.level > previous_level;
        if leveled_up {
            info!(from = previous_level, to = state.level, "level up");
            sound.play(SoundKind::LevelUp);
            display.celebrate_level_up(
                &format!("LEVEL UP! → {}", state.level),
                self.config.level_up_ms,
            );
        }

        RecomputeOutcome {
            state,
            previous_level,
            leveled_up,
        }
    }
}
