//! Web Audio backend for the sound engine.

use tracing::debug;
use wasm_bindgen_futures::{JsFuture, spawn_local};
use web_sys::{AudioContext, AudioContextState, AudioParam, HtmlAudioElement, OscillatorType};

use crate::error::PortfolioError;
use crate::sound::engine::{AudioBackend, SampleFailure};
use crate::sound::{ParamEvent, SampleBinding, SoundProfile, Waveform};

/// Plays samples through `<audio>` elements and synthesizes through one
/// shared `AudioContext`.
pub struct WebAudio;

fn oscillator_type(waveform: Waveform) -> OscillatorType {
    match waveform {
        Waveform::Sine => OscillatorType::Sine,
        Waveform::Square => OscillatorType::Square,
        Waveform::Triangle => OscillatorType::Triangle,
    }
}

/// Schedule `events` on `param`, offset from `now`.
fn schedule(param: &AudioParam, events: &[ParamEvent], now: f64) -> Result<(), PortfolioError> {
    for event in events {
        let at = now + event.at();
        let value = event.value() as f32;
        let scheduled = match event {
            ParamEvent::Set { .. } => param.set_value_at_time(value, at),
            ParamEvent::LinearRamp { .. } => param.linear_ramp_to_value_at_time(value, at),
            ParamEvent::ExponentialRamp { .. } => {
                param.exponential_ramp_to_value_at_time(value, at)
            }
        };
        scheduled.map_err(|e| PortfolioError::audio_js(&e))?;
    }
    Ok(())
}

impl AudioBackend for WebAudio {
    type Context = AudioContext;

    fn create_context(&self) -> Result<AudioContext, PortfolioError> {
        AudioContext::new().map_err(|e| PortfolioError::audio_js(&e))
    }

    fn resume_if_suspended(&self, ctx: &AudioContext) -> Result<(), PortfolioError> {
        if ctx.state() == AudioContextState::Suspended {
            debug!("resuming suspended audio context");
            ctx.resume().map_err(|e| PortfolioError::audio_js(&e))?;
        }
        Ok(())
    }

    fn play_sample(
        &self,
        sample: &SampleBinding,
        on_failure: SampleFailure,
    ) -> Result<(), PortfolioError> {
        let audio =
            HtmlAudioElement::new_with_src(&sample.path).map_err(|e| PortfolioError::audio_js(&e))?;
        audio.set_volume(sample.volume.clamp(0.0, 1.0));
        let promise = audio.play().map_err(|e| PortfolioError::audio_js(&e))?;
        spawn_local(async move {
            if let Err(e) = JsFuture::from(promise).await {
                on_failure(PortfolioError::audio_js(&e));
            }
        });
        Ok(())
    }

    fn synthesize(&self, ctx: &AudioContext, profile: &SoundProfile) -> Result<(), PortfolioError> {
        let js = |e: wasm_bindgen::JsValue| PortfolioError::audio_js(&e);
        let now = ctx.current_time();

        let gain = ctx.create_gain().map_err(js)?;
        schedule(&gain.gain(), profile.gain, now)?;
        gain.connect_with_audio_node(&ctx.destination()).map_err(js)?;

        for tone in profile.tones {
            let osc = ctx.create_oscillator().map_err(js)?;
            osc.set_type(oscillator_type(tone.waveform));
            schedule(&osc.frequency(), tone.frequency, now)?;
            osc.connect_with_audio_node(&gain).map_err(js)?;
            osc.start_with_when(now + tone.start).map_err(js)?;
            osc.stop_with_when(now + tone.stop).map_err(js)?;
        }
        Ok(())
    }
}
