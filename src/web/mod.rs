//! Browser entry point and the functions exported to page scripts.

pub mod audio;
pub mod dom;
pub mod logging;
pub mod page;
pub mod progress;

use std::cell::RefCell;
use std::rc::Rc;

use tracing::{error, info, warn};
use wasm_bindgen::prelude::*;

use crate::config::Config;
use crate::error::PortfolioError;
use crate::sound::SoundKind;

use self::page::Page;

const CONFIG_ELEMENT: &str = "#portfolio-config";

thread_local! {
    static PAGE: RefCell<Option<Rc<Page>>> = const { RefCell::new(None) };
}

fn with_page<T>(f: impl FnOnce(&Page) -> T) -> Option<T> {
    let page = PAGE.with(|p| p.borrow().clone());
    match page {
        Some(page) => Some(f(&page)),
        None => {
            warn!("portfolio page has not booted yet");
            None
        }
    }
}

/// Read the page's JSON config block, if it has one.
fn read_config() -> Result<Config, PortfolioError> {
    let doc = dom::document()?;
    match dom::query(&doc, CONFIG_ELEMENT).and_then(|el| el.text_content()) {
        Some(json) if !json.trim().is_empty() => Config::from_json(&json),
        _ => Ok(Config::default()),
    }
}

fn boot(config: Config) {
    let page = match Page::new(config) {
        Ok(page) => page,
        Err(e) => {
            error!(error = %e, "could not boot portfolio page");
            return;
        }
    };
    page.install();
    PAGE.with(|p| *p.borrow_mut() = Some(page));
}

#[wasm_bindgen(start)]
pub fn start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    let loaded = read_config();
    let config = loaded.clone().unwrap_or_default();
    logging::init(&config.log_level);
    if let Err(e) = loaded {
        warn!(error = %e, "ignoring page config, using defaults");
    }
    info!(version = crate::VERSION, "arcade portfolio starting");

    let Ok(doc) = dom::document() else {
        return;
    };
    if doc.ready_state() == "loading" {
        let pending = RefCell::new(Some(config));
        dom::listen(&doc, "DOMContentLoaded", move |_| {
            if let Some(config) = pending.borrow_mut().take() {
                boot(config);
            }
        });
    } else {
        boot(config);
    }
}

/// Play a sound by name (`"hover"`, `"click"`, `"power"`, `"jump"` or
/// `"level-up"`). Unknown names are logged and ignored.
#[wasm_bindgen]
pub fn play_sound(kind: &str) {
    match kind.parse::<SoundKind>() {
        Ok(kind) => {
            with_page(|page| page.play(kind));
        }
        Err(e) => warn!(error = %e, "play_sound ignored"),
    }
}

#[wasm_bindgen]
pub fn set_sound_enabled(enabled: bool) {
    with_page(|page| page.sound().set_enabled(enabled));
}

#[wasm_bindgen]
pub fn sound_enabled() -> bool {
    with_page(|page| page.sound().is_enabled()).unwrap_or(false)
}

/// Recompute the XP bar now.
#[wasm_bindgen]
pub fn refresh_progress() {
    with_page(|page| page.recompute());
}

/// The last drawn progress state as a plain object, or `null`.
#[wasm_bindgen]
pub fn progress_snapshot() -> Result<JsValue, JsValue> {
    match with_page(|page| page.last_state()).flatten() {
        Some(state) => {
            serde_wasm_bindgen::to_value(&state).map_err(|e| JsValue::from_str(&format!("{e}")))
        }
        None => Ok(JsValue::NULL),
    }
}
