//! Sound engine that decides between sample playback and synthesis.
//!
//! One engine lives for the whole page. It owns the global enable flag and
//! the lazily created audio context; every `play` builds its own nodes, so
//! overlapping sounds never share synthesis state.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use tracing::{debug, info, warn};

use crate::config::SoundConfig;
use crate::error::PortfolioError;

use super::profile::{SoundProfile, profile};
use super::{SampleBinding, SoundKind, SoundPlayer};

/// Called at most once when a sample that was accepted for playback
/// fails afterwards (e.g. a rejected `play()` promise).
pub type SampleFailure = Box<dyn FnOnce(PortfolioError)>;

/// Platform audio operations the engine needs.
pub trait AudioBackend {
    /// Handle to the platform audio context. Cloning must be cheap and
    /// refer to the same context.
    type Context: Clone + 'static;

    fn create_context(&self) -> Result<Self::Context, PortfolioError>;

    /// Resume a context the platform has auto-suspended.
    fn resume_if_suspended(&self, ctx: &Self::Context) -> Result<(), PortfolioError>;

    /// Start playing a pre-recorded sample.
    ///
    /// A synchronous failure is returned as `Err` and `on_failure` is
    /// dropped unused. A failure detected later is reported by calling
    /// `on_failure`.
    fn play_sample(
        &self,
        sample: &SampleBinding,
        on_failure: SampleFailure,
    ) -> Result<(), PortfolioError>;

    /// Build and schedule the oscillator graph for `profile`, starting now.
    fn synthesize(&self, ctx: &Self::Context, profile: &SoundProfile)
    -> Result<(), PortfolioError>;
}

/// Plays `SoundKind`s through an `AudioBackend`.
pub struct SoundEngine<B: AudioBackend> {
    backend: Rc<B>,
    enabled: Rc<Cell<bool>>,
    context: RefCell<Option<B::Context>>,
    samples: Vec<SampleBinding>,
}

impl<B: AudioBackend + 'static> SoundEngine<B> {
    pub fn new(backend: B, config: &SoundConfig) -> Self {
        SoundEngine {
            backend: Rc::new(backend),
            enabled: Rc::new(Cell::new(config.enabled)),
            context: RefCell::new(None),
            samples: config.samples.clone(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.get()
    }

    /// Whether the audio context has been created yet.
    pub fn has_context(&self) -> bool {
        self.context.borrow().is_some()
    }

    /// Switch all output on or off. Switching on creates the context and
    /// plays a synthesized click as confirmation.
    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.set(enabled);
        info!(enabled, "sound toggled");
        if enabled {
            let confirm = self
                .context()
                .and_then(|ctx| self.backend.synthesize(&ctx, profile(SoundKind::Click)));
            if let Err(e) = confirm {
                warn!(error = %e, "sound confirmation failed");
            }
        }
    }

    /// Flip the enable flag and return the new state.
    pub fn toggle(&self) -> bool {
        let enabled = !self.is_enabled();
        self.set_enabled(enabled);
        enabled
    }

    /// Sample binding for a kind, if any.
    pub fn sample_for(&self, kind: SoundKind) -> Option<&SampleBinding> {
        self.samples.iter().find(|s| s.kind == kind)
    }

    /// Return the shared context, creating it on first use and resuming it
    /// if the platform suspended it.
    fn context(&self) -> Result<B::Context, PortfolioError> {
        let mut slot = self.context.borrow_mut();
        let ctx = match slot.as_ref() {
            Some(ctx) => ctx.clone(),
            None => {
                let ctx = self.backend.create_context()?;
                debug!("audio context created");
                *slot = Some(ctx.clone());
                ctx
            }
        };
        self.backend.resume_if_suspended(&ctx)?;
        Ok(ctx)
    }

    fn try_play(&self, kind: SoundKind) -> Result<(), PortfolioError> {
        if !self.is_enabled() {
            return Ok(());
        }
        let ctx = self.context()?;

        let Some(binding) = self.sample_for(kind) else {
            return self.backend.synthesize(&ctx, profile(kind));
        };

        let backend = Rc::clone(&self.backend);
        let enabled = Rc::clone(&self.enabled);
        let fallback_ctx = ctx.clone();
        let on_failure: SampleFailure = Box::new(move |err| {
            warn!(%kind, error = %err, "sample playback failed, synthesizing");
            if !enabled.get() {
                return;
            }
            if let Err(e) = backend.synthesize(&fallback_ctx, profile(kind)) {
                warn!(%kind, error = %e, "synthesis fallback failed");
            }
        });

        match self.backend.play_sample(binding, on_failure) {
            Ok(()) => Ok(()),
            Err(err) => {
                warn!(%kind, error = %err, "sample playback failed, synthesizing");
                self.backend.synthesize(&ctx, profile(kind))
            }
        }
    }
}

impl<B: AudioBackend + 'static> SoundPlayer for SoundEngine<B> {
    fn play(&self, kind: SoundKind) {
        if let Err(e) = self.try_play(kind) {
            warn!(%kind, error = %e, "sound did not play");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sound::Waveform;

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        CreateContext,
        Resume,
        Sample(String, f64),
        Synth(SoundProfile),
    }

    #[derive(Clone, Copy, PartialEq)]
    enum SampleMode {
        Plays,
        FailsNow,
        FailsLater,
    }

    struct FakeBackend {
        calls: Rc<RefCell<Vec<Call>>>,
        pending: Rc<RefCell<Vec<SampleFailure>>>,
        sample_mode: SampleMode,
        context_fails: Cell<bool>,
    }

    impl FakeBackend {
        fn new(sample_mode: SampleMode) -> Self {
            FakeBackend {
                calls: Rc::new(RefCell::new(Vec::new())),
                pending: Rc::new(RefCell::new(Vec::new())),
                sample_mode,
                context_fails: Cell::new(false),
            }
        }
    }

    impl AudioBackend for FakeBackend {
        type Context = u32;

        fn create_context(&self) -> Result<u32, PortfolioError> {
            if self.context_fails.get() {
                return Err(PortfolioError::Audio("no audio device".to_string()));
            }
            self.calls.borrow_mut().push(Call::CreateContext);
            Ok(1)
        }

        fn resume_if_suspended(&self, _ctx: &u32) -> Result<(), PortfolioError> {
            self.calls.borrow_mut().push(Call::Resume);
            Ok(())
        }

        fn play_sample(
            &self,
            sample: &SampleBinding,
            on_failure: SampleFailure,
        ) -> Result<(), PortfolioError> {
            self.calls
                .borrow_mut()
                .push(Call::Sample(sample.path.clone(), sample.volume));
            match self.sample_mode {
                SampleMode::Plays => Ok(()),
                SampleMode::FailsNow => Err(PortfolioError::Audio("404".to_string())),
                SampleMode::FailsLater => {
                    self.pending.borrow_mut().push(on_failure);
                    Ok(())
                }
            }
        }

        fn synthesize(&self, _ctx: &u32, profile: &SoundProfile) -> Result<(), PortfolioError> {
            self.calls.borrow_mut().push(Call::Synth(*profile));
            Ok(())
        }
    }

    type Calls = Rc<RefCell<Vec<Call>>>;

    fn engine(mode: SampleMode, enabled: bool) -> (SoundEngine<FakeBackend>, Calls) {
        let backend = FakeBackend::new(mode);
        let calls = Rc::clone(&backend.calls);
        let config = SoundConfig {
            enabled,
            ..SoundConfig::default()
        };
        (SoundEngine::new(backend, &config), calls)
    }

    fn played(calls: &Rc<RefCell<Vec<Call>>>) -> Vec<Call> {
        calls
            .borrow()
            .iter()
            .filter(|c| !matches!(c, Call::Resume))
            .cloned()
            .collect()
    }

    #[test]
    fn muted_engine_never_touches_the_backend() {
        let (engine, calls) = engine(SampleMode::Plays, false);
        for kind in SoundKind::ALL {
            engine.play(kind);
        }
        assert!(calls.borrow().is_empty(), "got {:?}", calls.borrow());
        assert!(!engine.has_context());
    }

    #[test]
    fn context_is_created_once_and_reused() {
        let (engine, calls) = engine(SampleMode::Plays, true);
        engine.play(SoundKind::Power);
        engine.play(SoundKind::Jump);
        let creates = calls
            .borrow()
            .iter()
            .filter(|c| **c == Call::CreateContext)
            .count();
        assert_eq!(creates, 1);
        assert_eq!(
            played(&calls),
            vec![
                Call::CreateContext,
                Call::Synth(*profile(SoundKind::Power)),
                Call::Synth(*profile(SoundKind::Jump)),
            ]
        );
    }

    #[test]
    fn context_is_resumed_on_every_play() {
        let (engine, calls) = engine(SampleMode::Plays, true);
        engine.play(SoundKind::Power);
        engine.play(SoundKind::Power);
        let resumes = calls.borrow().iter().filter(|c| **c == Call::Resume).count();
        assert_eq!(resumes, 2);
    }

    #[test]
    fn sample_backed_kinds_play_their_sample() {
        let (engine, calls) = engine(SampleMode::Plays, true);
        engine.play(SoundKind::Hover);
        engine.play(SoundKind::Click);
        assert_eq!(
            played(&calls),
            vec![
                Call::CreateContext,
                Call::Sample("assets/sounds/hover.wav".to_string(), 0.2),
                Call::Sample("assets/sounds/click.wav".to_string(), 0.3),
            ]
        );
    }

    #[test]
    fn synchronous_sample_failure_falls_back_to_square_click() {
        let (engine, calls) = engine(SampleMode::FailsNow, true);
        engine.play(SoundKind::Click);

        let calls = played(&calls);
        assert_eq!(calls.len(), 3, "got {calls:?}");
        let Call::Synth(p) = &calls[2] else {
            panic!("expected synthesis after failed sample, got {:?}", calls[2]);
        };
        assert_eq!(p.tones[0].waveform, Waveform::Square);
        assert_eq!(p.tones[0].frequency_at(0.0), 330.0);
        assert_eq!(p.duration, 0.15);
    }

    #[test]
    fn late_sample_failure_falls_back_once() {
        let backend = FakeBackend::new(SampleMode::FailsLater);
        let calls = Rc::clone(&backend.calls);
        let pending = Rc::clone(&backend.pending);
        let engine = SoundEngine::new(
            backend,
            &SoundConfig {
                enabled: true,
                ..SoundConfig::default()
            },
        );

        engine.play(SoundKind::Hover);
        assert!(!played(&calls).iter().any(|c| matches!(c, Call::Synth(_))));

        let failures: Vec<SampleFailure> = pending.borrow_mut().drain(..).collect();
        assert_eq!(failures.len(), 1);
        for f in failures {
            f(PortfolioError::Audio("decode error".to_string()));
        }

        let synths: Vec<Call> = played(&calls)
            .into_iter()
            .filter(|c| matches!(c, Call::Synth(_)))
            .collect();
        assert_eq!(synths, vec![Call::Synth(*profile(SoundKind::Hover))]);
    }

    #[test]
    fn late_failure_after_muting_stays_silent() {
        let backend = FakeBackend::new(SampleMode::FailsLater);
        let calls = Rc::clone(&backend.calls);
        let pending = Rc::clone(&backend.pending);
        let engine = SoundEngine::new(
            backend,
            &SoundConfig {
                enabled: true,
                ..SoundConfig::default()
            },
        );

        engine.play(SoundKind::Click);
        engine.set_enabled(false);
        for f in pending.borrow_mut().drain(..) {
            f(PortfolioError::Audio("rejected".to_string()));
        }
        assert!(!played(&calls).iter().any(|c| matches!(c, Call::Synth(_))));
    }

    #[test]
    fn level_up_is_synthesized_directly() {
        let (engine, calls) = engine(SampleMode::Plays, true);
        engine.play(SoundKind::LevelUp);
        assert_eq!(
            played(&calls),
            vec![Call::CreateContext, Call::Synth(*profile(SoundKind::LevelUp))]
        );
    }

    #[test]
    fn toggle_on_plays_a_synthesized_confirmation() {
        let (engine, calls) = engine(SampleMode::Plays, false);
        assert!(engine.toggle());
        assert!(engine.has_context());
        assert_eq!(
            played(&calls),
            vec![Call::CreateContext, Call::Synth(*profile(SoundKind::Click))]
        );

        assert!(!engine.toggle());
        engine.play(SoundKind::Click);
        assert_eq!(played(&calls).len(), 2, "muted engine should stay quiet");
    }

    #[test]
    fn context_failure_is_swallowed_and_retried_next_time() {
        let (engine, calls) = engine(SampleMode::Plays, true);
        engine.backend.context_fails.set(true);
        engine.play(SoundKind::Jump);
        assert!(calls.borrow().is_empty());
        assert!(!engine.has_context());

        engine.backend.context_fails.set(false);
        engine.play(SoundKind::Jump);
        assert!(engine.has_context());
        assert_eq!(
            played(&calls),
            vec![Call::CreateContext, Call::Synth(*profile(SoundKind::Jump))]
        );
    }
}
