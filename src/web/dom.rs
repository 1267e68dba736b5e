//! Small DOM helpers: lookups, listeners, timers and class flashes.

use std::cell::RefCell;

use tracing::warn;
use wasm_bindgen::JsCast as _;
use wasm_bindgen::JsValue;
use wasm_bindgen::closure::Closure;
use web_sys::{
    Document, Element, Event, EventTarget, HtmlElement, IntersectionObserver,
    IntersectionObserverEntry, IntersectionObserverInit, NodeList, Window,
};

use crate::error::PortfolioError;

pub fn window() -> Result<Window, PortfolioError> {
    web_sys::window().ok_or_else(|| PortfolioError::missing("window"))
}

pub fn document() -> Result<Document, PortfolioError> {
    window()?
        .document()
        .ok_or_else(|| PortfolioError::missing("document"))
}

/// First element matching `selector`, if it is an `HtmlElement`.
pub fn query(doc: &Document, selector: &str) -> Option<HtmlElement> {
    doc.query_selector(selector)
        .ok()
        .flatten()
        .and_then(|e| e.dyn_into::<HtmlElement>().ok())
}

pub fn require(doc: &Document, selector: &str) -> Result<HtmlElement, PortfolioError> {
    query(doc, selector).ok_or_else(|| PortfolioError::missing(selector))
}

pub fn query_all(doc: &Document, selector: &str) -> Vec<HtmlElement> {
    doc.query_selector_all(selector)
        .map(|list| html_elements(&list))
        .unwrap_or_default()
}

/// First descendant of `el` matching `selector`.
pub fn query_in(el: &Element, selector: &str) -> Option<HtmlElement> {
    el.query_selector(selector)
        .ok()
        .flatten()
        .and_then(|e| e.dyn_into::<HtmlElement>().ok())
}

pub fn query_all_in(el: &Element, selector: &str) -> Vec<HtmlElement> {
    el.query_selector_all(selector)
        .map(|list| html_elements(&list))
        .unwrap_or_default()
}

fn html_elements(list: &NodeList) -> Vec<HtmlElement> {
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|n| n.dyn_into::<HtmlElement>().ok())
        .collect()
}

pub fn create(doc: &Document, tag: &str) -> Result<HtmlElement, PortfolioError> {
    doc.create_element(tag)
        .map(|e| e.unchecked_into())
        .map_err(|_| PortfolioError::MissingElement(format!("<{tag}>")))
}

/// Attach `handler` for the page's lifetime.
pub fn listen<T, F>(target: &T, event: &str, handler: F)
where
    T: AsRef<EventTarget>,
    F: FnMut(Event) + 'static,
{
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
    if let Err(e) = target
        .as_ref()
        .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
    {
        warn!(event, error = ?e, "could not attach listener");
    }
    closure.forget();
}

/// Run `f` once after `ms`. The closure frees itself after it runs.
pub fn set_timeout(ms: u32, f: impl FnOnce() + 'static) {
    let callback = Closure::once_into_js(f);
    let scheduled = window().map_err(|e| format!("{e}")).and_then(|w| {
        w.set_timeout_with_callback_and_timeout_and_arguments_0(
            callback.unchecked_ref(),
            ms as i32,
        )
        .map_err(|e| format!("{e:?}"))
    });
    if let Err(e) = scheduled {
        warn!(ms, error = %e, "could not schedule timeout");
    }
}

/// Run `f` every `ms` for the page's lifetime.
pub fn set_interval(ms: u32, f: impl FnMut() + 'static) {
    let closure = Closure::wrap(Box::new(f) as Box<dyn FnMut()>);
    let scheduled = window().map_err(|e| format!("{e}")).and_then(|w| {
        w.set_interval_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            ms as i32,
        )
        .map_err(|e| format!("{e:?}"))
    });
    if let Err(e) = scheduled {
        warn!(ms, error = %e, "could not schedule interval");
    }
    closure.forget();
}

/// Call `on_enter` whenever one of `targets` becomes at least `threshold`
/// visible inside the viewport shrunk by `root_margin`. With `once`, each
/// target is dropped from the observer after its first entry.
pub fn on_intersect<F>(
    targets: &[HtmlElement],
    threshold: f64,
    root_margin: &str,
    once: bool,
    mut on_enter: F,
) where
    F: FnMut(&Element) + 'static,
{
    if targets.is_empty() {
        return;
    }
    let callback = Closure::wrap(Box::new(
        move |entries: js_sys::Array, observer: IntersectionObserver| {
            for entry in entries.iter() {
                let entry: IntersectionObserverEntry = entry.unchecked_into();
                if !entry.is_intersecting() {
                    continue;
                }
                let target = entry.target();
                on_enter(&target);
                if once {
                    observer.unobserve(&target);
                }
            }
        },
    ) as Box<dyn FnMut(js_sys::Array, IntersectionObserver)>);

    let options = IntersectionObserverInit::new();
    options.set_threshold(&JsValue::from_f64(threshold));
    options.set_root_margin(root_margin);
    match IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options) {
        Ok(observer) => {
            for target in targets {
                observer.observe(target);
            }
        }
        Err(e) => warn!(root_margin, error = ?e, "could not create intersection observer"),
    }
    callback.forget();
}

/// Add `class` now and remove it after `ms`.
pub fn flash_class(el: &Element, class: &str, ms: u32) {
    let _ = el.class_list().add_1(class);
    let el = el.clone();
    let class = class.to_string();
    set_timeout(ms, move || {
        let _ = el.class_list().remove_1(&class);
    });
}

pub fn set_style(el: &HtmlElement, property: &str, value: &str) {
    let _ = el.style().set_property(property, value);
}

/// Apply several style properties at once.
pub fn set_styles(el: &HtmlElement, properties: &[(&str, &str)]) {
    let style = el.style();
    for (property, value) in properties {
        let _ = style.set_property(property, value);
    }
}

/// Trailing-edge debounce: each `schedule` cancels the pending run.
pub struct Debounce {
    delay_ms: u32,
    pending: RefCell<Option<(i32, Closure<dyn FnMut()>)>>,
}

impl Debounce {
    pub fn new(delay_ms: u32) -> Self {
        Debounce {
            delay_ms,
            pending: RefCell::new(None),
        }
    }

    pub fn schedule(&self, f: impl FnMut() + 'static) {
        let Ok(w) = window() else {
            return;
        };
        if let Some((handle, _stale)) = self.pending.borrow_mut().take() {
            w.clear_timeout_with_handle(handle);
        }
        let closure = Closure::wrap(Box::new(f) as Box<dyn FnMut()>);
        match w.set_timeout_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            self.delay_ms as i32,
        ) {
            Ok(handle) => *self.pending.borrow_mut() = Some((handle, closure)),
            Err(e) => warn!(error = ?e, "could not schedule debounced call"),
        }
    }
}

/// Viewport height in CSS pixels.
pub fn inner_height(w: &Window) -> f64 {
    w.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0)
}

pub fn inner_width(w: &Window) -> f64 {
    w.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0)
}
