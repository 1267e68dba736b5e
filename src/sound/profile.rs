//! Static synthesis parameters for each sound kind.
//!
//! Times are seconds relative to the moment playback is requested. The
//! automation events follow Web Audio `AudioParam` scheduling semantics so
//! the offline renderer and the browser produce the same envelope.

use super::{SoundKind, Waveform};

/// Intrinsic value of an oscillator's frequency param before any event.
pub const DEFAULT_FREQUENCY: f64 = 440.0;
/// Intrinsic value of a gain param before any event.
pub const DEFAULT_GAIN: f64 = 1.0;

/// One scheduled change of an audio parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParamEvent {
    /// Jump to `value` at `at`.
    Set { value: f64, at: f64 },
    /// Ramp linearly from the previous event to `value`, arriving at `at`.
    LinearRamp { value: f64, at: f64 },
    /// Ramp exponentially from the previous event to `value`, arriving at `at`.
    ExponentialRamp { value: f64, at: f64 },
}

impl ParamEvent {
    pub const fn set(value: f64, at: f64) -> Self {
        ParamEvent::Set { value, at }
    }

    pub const fn linear(value: f64, at: f64) -> Self {
        ParamEvent::LinearRamp { value, at }
    }

    pub const fn exponential(value: f64, at: f64) -> Self {
        ParamEvent::ExponentialRamp { value, at }
    }

    pub fn value(&self) -> f64 {
        match *self {
            ParamEvent::Set { value, .. }
            | ParamEvent::LinearRamp { value, .. }
            | ParamEvent::ExponentialRamp { value, .. } => value,
        }
    }

    pub fn at(&self) -> f64 {
        match *self {
            ParamEvent::Set { at, .. }
            | ParamEvent::LinearRamp { at, .. }
            | ParamEvent::ExponentialRamp { at, .. } => at,
        }
    }
}

/// Evaluate an automation timeline at time `t`.
///
/// `events` must be sorted by time. Before the first event the param sits
/// at `default`; after the last one it holds the last value.
pub fn automation_value(events: &[ParamEvent], default: f64, t: f64) -> f64 {
    let Some(next_idx) = events.iter().position(|e| e.at() > t) else {
        return events.last().map_or(default, |e| e.value());
    };
    let (prev_at, prev_value) = match next_idx.checked_sub(1) {
        Some(i) => (events[i].at(), events[i].value()),
        None => (0.0, default),
    };
    let next = events[next_idx];

    let span = next.at() - prev_at;
    if span <= 0.0 {
        return prev_value;
    }
    let frac = ((t - prev_at) / span).clamp(0.0, 1.0);

    match next {
        ParamEvent::Set { .. } => prev_value,
        ParamEvent::LinearRamp { value, .. } => prev_value + (value - prev_value) * frac,
        ParamEvent::ExponentialRamp { value, .. } => {
            // Exponential ramps are undefined through zero or across signs.
            if prev_value * value <= 0.0 {
                prev_value
            } else {
                prev_value * (value / prev_value).powf(frac)
            }
        }
    }
}

/// One oscillator in a sound.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToneProfile {
    pub waveform: Waveform,
    /// Offset at which the oscillator starts.
    pub start: f64,
    /// Offset at which the oscillator stops.
    pub stop: f64,
    pub frequency: &'static [ParamEvent],
}

impl ToneProfile {
    pub fn is_sounding(&self, t: f64) -> bool {
        t >= self.start && t < self.stop
    }

    pub fn frequency_at(&self, t: f64) -> f64 {
        automation_value(self.frequency, DEFAULT_FREQUENCY, t)
    }
}

/// Full description of a synthesized sound: its oscillators summed through
/// one shared gain envelope.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SoundProfile {
    pub tones: &'static [ToneProfile],
    pub gain: &'static [ParamEvent],
    /// Total length in seconds; every tone has stopped by then.
    pub duration: f64,
}

impl SoundProfile {
    pub fn gain_at(&self, t: f64) -> f64 {
        automation_value(self.gain, DEFAULT_GAIN, t)
    }
}

// ── Profiles ────────────────────────────────────────────────

static HOVER: SoundProfile = SoundProfile {
    tones: &[ToneProfile {
        waveform: Waveform::Sine,
        start: 0.0,
        stop: 0.1,
        frequency: &[ParamEvent::set(220.0, 0.0)],
    }],
    gain: &[ParamEvent::set(0.1, 0.0)],
    duration: 0.1,
};

static CLICK: SoundProfile = SoundProfile {
    tones: &[ToneProfile {
        waveform: Waveform::Square,
        start: 0.0,
        stop: 0.15,
        frequency: &[ParamEvent::set(330.0, 0.0)],
    }],
    gain: &[ParamEvent::set(0.2, 0.0)],
    duration: 0.15,
};

static POWER: SoundProfile = SoundProfile {
    tones: &[ToneProfile {
        waveform: Waveform::Sine,
        start: 0.0,
        stop: 0.3,
        frequency: &[
            ParamEvent::set(440.0, 0.0),
            ParamEvent::linear(880.0, 0.2),
        ],
    }],
    gain: &[ParamEvent::set(0.3, 0.0)],
    duration: 0.3,
};

static JUMP: SoundProfile = SoundProfile {
    tones: &[ToneProfile {
        waveform: Waveform::Triangle,
        start: 0.0,
        stop: 0.3,
        frequency: &[
            ParamEvent::set(150.0, 0.0),
            ParamEvent::exponential(500.0, 0.15),
        ],
    }],
    gain: &[
        ParamEvent::set(0.3, 0.0),
        ParamEvent::exponential(0.01, 0.3),
    ],
    duration: 0.3,
};

/// A4 → A5 sweep, C#5 → C#6 harmony, E5 → A5 fanfare, staggered by 100 ms.
static LEVEL_UP: SoundProfile = SoundProfile {
    tones: &[
        ToneProfile {
            waveform: Waveform::Sine,
            start: 0.0,
            stop: 0.2,
            frequency: &[
                ParamEvent::set(440.0, 0.0),
                ParamEvent::linear(880.0, 0.1),
            ],
        },
        ToneProfile {
            waveform: Waveform::Triangle,
            start: 0.1,
            stop: 0.4,
            frequency: &[
                ParamEvent::set(554.0, 0.1),
                ParamEvent::linear(1108.0, 0.2),
            ],
        },
        ToneProfile {
            waveform: Waveform::Square,
            start: 0.2,
            stop: 0.8,
            frequency: &[
                ParamEvent::set(659.0, 0.2),
                ParamEvent::set(880.0, 0.3),
            ],
        },
    ],
    gain: &[
        ParamEvent::set(0.3, 0.0),
        ParamEvent::linear(0.0, 0.8),
    ],
    duration: 0.8,
};

/// The synthesis profile for a sound kind.
pub fn profile(kind: SoundKind) -> &'static SoundProfile {
    match kind {
        SoundKind::Hover => &HOVER,
        SoundKind::Click => &CLICK,
        SoundKind::Power => &POWER,
        SoundKind::Jump => &JUMP,
        SoundKind::LevelUp => &LEVEL_UP,
    }
}
