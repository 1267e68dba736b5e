//! Offline renderer that turns a `SoundProfile` into PCM samples or WAV bytes.
//!
//! Used to verify the profiles without a browser and to produce the sample
//! assets the page plays before falling back to synthesis.

use crate::error::PortfolioError;

use super::oscillator::Oscillator;
use super::profile::SoundProfile;
use super::{SoundKind, profile};

/// Render a profile to mono samples: each tone is gated by its start/stop
/// window, tones are summed, and the sum is scaled by the shared gain.
pub fn render_profile(profile: &SoundProfile, sample_rate: u32) -> Vec<f64> {
    let sr = sample_rate as f64;
    let len = (profile.duration * sr).round() as usize;
    let mut oscillators: Vec<Oscillator> = profile
        .tones
        .iter()
        .map(|tone| Oscillator::new(tone.waveform, sr))
        .collect();

    (0..len)
        .map(|i| {
            let t = i as f64 / sr;
            let mut sum = 0.0;
            for (tone, osc) in profile.tones.iter().zip(oscillators.iter_mut()) {
                if tone.is_sounding(t) {
                    osc.frequency = tone.frequency_at(t);
                    sum += osc.next_sample();
                }
            }
            sum * profile.gain_at(t)
        })
        .collect()
}

/// Highest sample rate the offline renderer accepts.
pub const MAX_SAMPLE_RATE: u32 = 192_000;

/// Reject sample rates that are zero or above `MAX_SAMPLE_RATE`.
pub fn check_sample_rate(sample_rate: u32) -> Result<u32, PortfolioError> {
    if (1..=MAX_SAMPLE_RATE).contains(&sample_rate) {
        Ok(sample_rate)
    } else {
        Err(PortfolioError::InvalidSampleRate(sample_rate))
    }
}

/// Render a sound kind to a 16-bit mono WAV file.
pub fn render_wav(kind: SoundKind, sample_rate: u32) -> Result<Vec<u8>, PortfolioError> {
    let sample_rate = check_sample_rate(sample_rate)?;
    let samples = render_profile(profile(kind), sample_rate);
    let pcm: Vec<i16> = samples
        .iter()
        .map(|&s| (s.clamp(-1.0, 1.0) * i16::MAX as f64) as i16)
        .collect();
    Ok(encode_wav(&pcm, sample_rate, 1))
}

/// Encode interleaved i16 PCM samples to a WAV byte buffer.
fn encode_wav(samples: &[i16], sample_rate: u32, channels: u16) -> Vec<u8> {
    let bits_per_sample: u16 = 16;
    let byte_rate = sample_rate * channels as u32 * (bits_per_sample as u32 / 8);
    let block_align = channels * (bits_per_sample / 8);
    let data_size = (samples.len() * 2) as u32;
    let file_size = 36 + data_size;

    let mut buf = Vec::with_capacity(44 + data_size as usize);

    buf.extend_from_slice(b"RIFF");
    buf.extend_from_slice(&file_size.to_le_bytes());
    buf.extend_from_slice(b"WAVE");

    buf.extend_from_slice(b"fmt ");
    buf.extend_from_slice(&16u32.to_le_bytes());
    buf.extend_from_slice(&1u16.to_le_bytes()); // PCM
    buf.extend_from_slice(&channels.to_le_bytes());
    buf.extend_from_slice(&sample_rate.to_le_bytes());
    buf.extend_from_slice(&byte_rate.to_le_bytes());
    buf.extend_from_slice(&block_align.to_le_bytes());
    buf.extend_from_slice(&bits_per_sample.to_le_bytes());

    buf.extend_from_slice(b"data");
    buf.extend_from_slice(&data_size.to_le_bytes());
    for &sample in samples {
        buf.extend_from_slice(&sample.to_le_bytes());
    }

    buf
}

#[cfg(test)]
mod tests {
    use super::*;

    const SR: u32 = 44100;

    fn rising_crossings(samples: &[f64]) -> usize {
        samples.windows(2).filter(|w| w[0] < 0.0 && w[1] >= 0.0).count()
    }

    fn peak(samples: &[f64]) -> f64 {
        samples.iter().fold(0.0_f64, |m, s| m.max(s.abs()))
    }

    #[test]
    fn click_renders_330hz_square_for_150ms() {
        let samples = render_profile(profile(SoundKind::Click), SR);
        assert_eq!(samples.len(), 6615, "0.15s at 44.1kHz");

        // 330 Hz over 0.15 s is 49.5 cycles.
        let cycles = rising_crossings(&samples);
        assert!((48..=51).contains(&cycles), "expected ~49 cycles, got {cycles}");

        let p = peak(&samples);
        assert!((0.15..=0.2 + 1e-9).contains(&p), "click peak should sit at gain 0.2, got {p}");

        // A square wave spends most of its time at full amplitude.
        let at_full = samples.iter().filter(|s| (s.abs() - 0.2).abs() < 1e-9).count();
        assert!(at_full > samples.len() / 2, "square should mostly sit at ±gain");
    }

    #[test]
    fn power_sweeps_upward() {
        let samples = render_profile(profile(SoundKind::Power), SR);
        let tenth = SR as usize / 10;
        let early = rising_crossings(&samples[..tenth]);
        let late = rising_crossings(&samples[2 * tenth..3 * tenth]);
        // 440→660 Hz averages ~55 cycles in the first 100 ms, 880 Hz gives ~88 at the end.
        assert!(late > early + 20, "pitch should rise: early {early}, late {late}");
    }

    #[test]
    fn jump_decays_to_near_silence() {
        let samples = render_profile(profile(SoundKind::Jump), SR);
        let tail = &samples[samples.len() - 200..];
        assert!(peak(tail) < 0.02, "jump tail should be quiet, got {}", peak(tail));
        assert!(peak(&samples[..2000]) > 0.25, "jump should start loud");
    }

    #[test]
    fn level_up_spans_800ms_and_fades_out() {
        let samples = render_profile(profile(SoundKind::LevelUp), SR);
        assert_eq!(samples.len(), 35280);
        assert!(samples.iter().all(|s| s.is_finite()));
        let tail = &samples[samples.len() - 100..];
        assert!(peak(tail) < 0.005, "level-up should end silent, got {}", peak(tail));
        // Two oscillators overlap between 0.1 and 0.2 s.
        assert!(peak(&samples[5000..8000]) > 0.26, "overlapping tones should sum");
    }

    #[test]
    fn wav_header_valid() {
        let wav = render_wav(SoundKind::Hover, SR).unwrap();

        assert_eq!(&wav[0..4], b"RIFF");
        assert_eq!(&wav[8..12], b"WAVE");
        assert_eq!(&wav[12..16], b"fmt ");
        assert_eq!(&wav[36..40], b"data");

        let sr = u32::from_le_bytes([wav[24], wav[25], wav[26], wav[27]]);
        assert_eq!(sr, SR);
        let ch = u16::from_le_bytes([wav[22], wav[23]]);
        assert_eq!(ch, 1);

        // 0.1 s of mono 16-bit audio.
        let data_size = u32::from_le_bytes([wav[40], wav[41], wav[42], wav[43]]);
        assert_eq!(data_size, 4410 * 2);
        assert_eq!(wav.len(), 44 + 4410 * 2);
    }

    #[test]
    fn out_of_range_sample_rates_are_rejected() {
        assert_eq!(
            render_wav(SoundKind::Click, 0),
            Err(PortfolioError::InvalidSampleRate(0))
        );
        assert_eq!(
            render_wav(SoundKind::Click, u32::MAX),
            Err(PortfolioError::InvalidSampleRate(u32::MAX))
        );
        assert_eq!(
            check_sample_rate(MAX_SAMPLE_RATE + 1),
            Err(PortfolioError::InvalidSampleRate(192_001))
        );

        let wav = render_wav(SoundKind::Hover, MAX_SAMPLE_RATE).unwrap();
        assert_eq!(wav.len(), 44 + 19_200 * 2, "0.1 s at the highest rate");
    }
}
