pub mod config;
pub mod effects;
pub mod error;
pub mod progress;
pub mod sound;

#[cfg(target_arch = "wasm32")]
pub mod web;

use crate::sound::SoundKind;
use wasm_bindgen::prelude::*;

/// The crate version, read from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// WASM-exposed: return the arcade_portfolio version string.
#[wasm_bindgen]
pub fn core_version() -> String {
    VERSION.to_string()
}

/// WASM-exposed: render a sound kind's synthesized profile to a WAV byte array.
#[wasm_bindgen]
pub fn render_sound_wav(kind: &str, sample_rate: u32) -> Result<Vec<u8>, JsValue> {
    let kind: SoundKind = kind.parse().map_err(|e| JsValue::from_str(&format!("{e}")))?;
    sound::render::render_wav(kind, sample_rate).map_err(|e| JsValue::from_str(&format!("{e}")))
}
