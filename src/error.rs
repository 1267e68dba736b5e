use thiserror::Error;

/// Everything that can go wrong in the behavior layer.
///
/// None of these are fatal: callers log them and skip the affected feature.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PortfolioError {
    /// A required element is not in the document.
    #[error("missing element: {0}")]
    MissingElement(String),
    /// Audio context creation, sample playback or synthesis failed.
    #[error("audio error: {0}")]
    Audio(String),
    /// Writing to the clipboard was rejected.
    #[error("clipboard error: {0}")]
    Clipboard(String),
    /// The page configuration could not be parsed.
    #[error("config error: {0}")]
    Config(String),
    /// An offline render was asked for an unusable sample rate.
    #[error("sample rate {0} Hz is outside 1..=192000")]
    InvalidSampleRate(u32),
    /// A sound name that does not map to a `SoundKind`.
    #[error("unknown sound kind '{0}'")]
    UnknownSound(String),
}

impl PortfolioError {
    pub fn missing(selector: &str) -> Self {
        PortfolioError::MissingElement(selector.to_string())
    }

    /// The page is not allowed to use the clipboard (e.g. not a secure origin).
    pub fn clipboard_unavailable() -> Self {
        PortfolioError::Clipboard("clipboard API unavailable".to_string())
    }
}

impl From<serde_json::Error> for PortfolioError {
    fn from(e: serde_json::Error) -> Self {
        PortfolioError::Config(e.to_string())
    }
}

#[cfg(target_arch = "wasm32")]
impl PortfolioError {
    /// Describe a thrown JS value as an audio failure.
    pub fn audio_js(value: &wasm_bindgen::JsValue) -> Self {
        PortfolioError::Audio(describe_js(value))
    }

    /// Describe a thrown JS value as a clipboard failure.
    pub fn clipboard_js(value: &wasm_bindgen::JsValue) -> Self {
        PortfolioError::Clipboard(describe_js(value))
    }
}

#[cfg(target_arch = "wasm32")]
fn describe_js(value: &wasm_bindgen::JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}

#[cfg(target_arch = "wasm32")]
impl From<PortfolioError> for wasm_bindgen::JsValue {
    fn from(e: PortfolioError) -> Self {
        wasm_bindgen::JsValue::from_str(&e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_element() {
        let err = PortfolioError::missing(".xp-fill");
        assert_eq!(err.to_string(), "missing element: .xp-fill");
    }

    #[test]
    fn json_errors_become_config_errors() {
        let err: PortfolioError = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert!(matches!(err, PortfolioError::Config(_)), "got {err:?}");
    }

    #[test]
    fn unavailable_clipboard_is_a_clipboard_error() {
        let err = PortfolioError::clipboard_unavailable();
        assert!(matches!(err, PortfolioError::Clipboard(_)), "got {err:?}");
        assert_eq!(err.to_string(), "clipboard error: clipboard API unavailable");
    }

    #[test]
    fn sample_rate_error_shows_the_allowed_range() {
        let err = PortfolioError::InvalidSampleRate(0);
        assert_eq!(err.to_string(), "sample rate 0 Hz is outside 1..=192000");
    }
}
