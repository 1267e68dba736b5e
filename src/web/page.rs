//! Page wiring: attaches every listener and timer the portfolio uses.
//!
//! Each `setup_*` step looks up its own elements and quietly skips itself
//! when they are not on the page.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use tracing::{debug, error, info};
use wasm_bindgen::{JsCast as _, JsValue};
use wasm_bindgen_futures::{JsFuture, spawn_local};
use web_sys::{
    Document, Element, Event, HtmlElement, MouseEvent, ScrollBehavior, ScrollIntoViewOptions,
    ScrollToOptions,
};

use crate::config::Config;
use crate::effects::{self, SectionBounds};
use crate::error::PortfolioError;
use crate::progress::{ProgressAggregator, ProgressState, QuestFilter, TimelineEntry};
use crate::sound::{SoundEngine, SoundKind, SoundPlayer};

use super::audio::WebAudio;
use super::dom::{
    Debounce, create, document, flash_class, inner_height, inner_width, listen, on_intersect, query,
    query_all, query_all_in, query_in, set_interval, set_style, set_styles, set_timeout, window,
};
use super::progress::{DomSurface, TIMELINE_ITEM};

const MUTED_ICON: &str = "🔇";
const UNMUTED_ICON: &str = "🔊";

/// Everything the page's callbacks share.
pub struct Page {
    config: Config,
    document: Document,
    sound: SoundEngine<WebAudio>,
    progress: RefCell<ProgressAggregator>,
    last_state: Cell<Option<ProgressState>>,
    filter: Rc<RefCell<QuestFilter>>,
    resize: Debounce,
}

impl Page {
    pub fn new(config: Config) -> Result<Rc<Self>, PortfolioError> {
        let document = document()?;
        Ok(Rc::new(Page {
            sound: SoundEngine::new(WebAudio, &config.sound),
            progress: RefCell::new(ProgressAggregator::new(config.progress.clone())),
            last_state: Cell::new(None),
            filter: Rc::new(RefCell::new(QuestFilter::All)),
            resize: Debounce::new(config.timing.resize_debounce_ms),
            document,
            config,
        }))
    }

    pub fn sound(&self) -> &SoundEngine<WebAudio> {
        &self.sound
    }

    pub fn play(&self, kind: SoundKind) {
        self.sound.play(kind);
    }

    /// State drawn by the last successful recompute.
    pub fn last_state(&self) -> Option<ProgressState> {
        self.last_state.get()
    }

    /// Recompute the XP bar. Missing elements are logged by the aggregator.
    pub fn recompute(&self) {
        let surface = DomSurface {
            document: self.document.clone(),
            filter: Rc::clone(&self.filter),
        };
        if let Ok(outcome) = self.progress.borrow_mut().refresh(&surface, &self.sound) {
            self.last_state.set(Some(outcome.state));
        }
    }

    /// Wire up the whole page.
    pub fn install(self: &Rc<Self>) {
        if self.config.timing.startup_overlay {
            self.setup_startup_overlay();
        }
        self.setup_sound_toggle();
        self.setup_navigation();
        self.setup_scroll_effects();
        self.start_typewriter(false);
        self.setup_button_sounds();
        self.setup_glitch_effects();
        self.setup_project_cards();
        self.setup_console();
        self.setup_quest_log();
        self.setup_character_info();
        self.setup_contact_items();
        self.setup_hero_buttons();
        self.add_scanlines();
        self.schedule_recomputes();
        self.setup_refresh_button();
        info!("portfolio page ready");
    }

    /// Wire `mouseenter` on each element to the hover sound.
    fn hover_sound(self: &Rc<Self>, elements: &[HtmlElement]) {
        for el in elements {
            let page = Rc::clone(self);
            listen(el, "mouseenter", move |_| page.play(SoundKind::Hover));
        }
    }

    // ── Boot overlay and typewriter ─────────────────────────

    fn setup_startup_overlay(&self) {
        let doc = &self.document;
        let Some(body) = doc.body() else {
            return;
        };
        let (Ok(overlay), Ok(logo), Ok(bar), Ok(fill), Ok(status)) = (
            create(doc, "div"),
            create(doc, "div"),
            create(doc, "div"),
            create(doc, "div"),
            create(doc, "div"),
        ) else {
            return;
        };

        set_styles(
            &overlay,
            &[
                ("position", "fixed"),
                ("inset", "0"),
                ("background-color", "#000"),
                ("z-index", "9999"),
                ("display", "flex"),
                ("flex-direction", "column"),
                ("justify-content", "center"),
                ("align-items", "center"),
                ("color", "#fff"),
                ("font-family", "'VT323', monospace"),
                ("font-size", "2rem"),
                ("transition", "opacity 1s ease"),
            ],
        );
        logo.set_text_content(Some(effects::STARTUP_TITLE));
        set_styles(
            &logo,
            &[
                ("margin-bottom", "2rem"),
                ("font-family", "'Press Start 2P', cursive"),
                ("font-size", "1.5rem"),
                ("color", "#ff6b6b"),
                ("text-shadow", "0 0 5px #ff6b6b"),
            ],
        );
        set_styles(
            &bar,
            &[
                ("width", "60%"),
                ("height", "20px"),
                ("border", "2px solid #ff6b6b"),
                ("position", "relative"),
                ("overflow", "hidden"),
            ],
        );
        set_styles(
            &fill,
            &[
                ("height", "100%"),
                ("width", "0%"),
                ("background-color", "#ff6b6b"),
                ("transition", "width 2s cubic-bezier(0.1, 0.5, 0.1, 1)"),
            ],
        );
        status.set_text_content(Some(effects::STARTUP_INITIAL_STATUS));
        set_styles(&status, &[("margin-top", "1rem"), ("color", "#4ecdc4")]);

        let _ = bar.append_child(&fill);
        let _ = overlay.append_child(&logo);
        let _ = overlay.append_child(&bar);
        let _ = overlay.append_child(&status);
        let _ = body.append_child(&overlay);
        set_style(&body, "overflow", "hidden");

        for step in effects::STARTUP_STEPS {
            let (fill, status) = (fill.clone(), status.clone());
            set_timeout(step.at_ms, move || {
                set_style(&fill, "width", &format!("{}%", step.fill_percent));
                status.set_text_content(Some(step.status));
            });
        }
        let fading = overlay.clone();
        set_timeout(effects::STARTUP_FADE_MS, move || {
            set_style(&fading, "opacity", "0");
            let _ = body.style().remove_property("overflow");
        });
        set_timeout(effects::STARTUP_REMOVE_MS, move || overlay.remove());
    }

    /// Type the hero subtitle one character at a time.
    fn start_typewriter(&self, immediate: bool) {
        let Some(subtitle) = query(&self.document, ".hero-subtitle") else {
            return;
        };
        subtitle.set_text_content(Some(""));
        let frames: Vec<String> = effects::typewriter_frames(effects::TYPEWRITER_TEXT)
            .into_iter()
            .map(str::to_string)
            .collect();
        let lead = if immediate { 0 } else { effects::TYPEWRITER_DELAY_MS };
        for (i, frame) in frames.into_iter().enumerate() {
            let subtitle = subtitle.clone();
            let at = effects::stagger_delay_ms(i, lead, effects::TYPEWRITER_CHAR_MS);
            set_timeout(at, move || subtitle.set_text_content(Some(&frame)));
        }
    }

    // ── Sound toggle ────────────────────────────────────────

    fn setup_sound_toggle(self: &Rc<Self>) {
        let doc = &self.document;
        let (Some(body), Ok(button)) = (doc.body(), create(doc, "button")) else {
            return;
        };
        let _ = button.class_list().add_1("sound-toggle");
        render_toggle(&button, self.sound.is_enabled());
        set_styles(
            &button,
            &[
                ("position", "fixed"),
                ("bottom", "20px"),
                ("right", "20px"),
                ("z-index", "9999"),
                ("background", "rgba(0, 0, 0, 0.7)"),
                ("color", "var(--accent)"),
                ("border", "2px solid var(--accent)"),
                ("border-radius", "4px"),
                ("padding", "8px 12px"),
                ("font-family", "'Press Start 2P', cursive"),
                ("font-size", "14px"),
                ("cursor", "pointer"),
                ("transition", "all 0.3s ease"),
            ],
        );

        let target = button.clone();
        listen(&button, "mouseover", move |_| set_style(&target, "transform", "scale(1.1)"));
        let target = button.clone();
        listen(&button, "mouseout", move |_| set_style(&target, "transform", "scale(1)"));

        let page = Rc::clone(self);
        let target = button.clone();
        listen(&button, "click", move |_| {
            let enabled = page.sound.toggle();
            render_toggle(&target, enabled);
        });

        let _ = body.append_child(&button);
    }

    // ── Navigation and scrolling ────────────────────────────

    fn header_height(&self) -> f64 {
        query(&self.document, "#header").map_or(0.0, |h| f64::from(h.offset_height()))
    }

    fn scroll_to(&self, section: &HtmlElement) {
        let Ok(w) = window() else {
            return;
        };
        let opts = ScrollToOptions::new();
        opts.set_top(f64::from(section.offset_top()) - self.header_height());
        opts.set_behavior(ScrollBehavior::Smooth);
        w.scroll_to_with_scroll_to_options(&opts);
    }

    fn setup_navigation(self: &Rc<Self>) {
        self.hover_sound(&query_all(&self.document, ".nav-item"));

        let links = Rc::new(query_all(&self.document, ".nav-links a"));
        for link in links.iter() {
            let page = Rc::clone(self);
            let links = Rc::clone(&links);
            let this = link.clone();
            listen(link, "click", move |event: Event| {
                event.prevent_default();
                page.play(SoundKind::Click);
                let Some(target) = this
                    .get_attribute("href")
                    .and_then(|href| query(&page.document, &href))
                else {
                    return;
                };
                page.scroll_to(&target);
                for l in links.iter() {
                    let _ = l.class_list().remove_1("active");
                }
                let _ = this.class_list().add_1("active");
            });
        }
    }

    /// Section reveal, plus header style, active nav link, hero parallax and
    /// timeline reveal on every scroll. Both also run for the initial
    /// viewport.
    fn setup_scroll_effects(self: &Rc<Self>) {
        on_intersect(
            &query_all(&self.document, ".section"),
            effects::SECTION_REVEAL_THRESHOLD,
            &effects::reveal_root_margin(self.header_height()),
            false,
            |section| {
                let _ = section.class_list().add_1("active");
            },
        );

        let Ok(w) = window() else {
            return;
        };
        let page = Rc::clone(self);
        let win = w.clone();
        listen(&w, "scroll", move |_| {
            let scroll_y = win.scroll_y().unwrap_or(0.0);
            page.on_scroll(scroll_y, inner_height(&win));
        });
        self.on_scroll(w.scroll_y().unwrap_or(0.0), inner_height(&w));
    }

    fn on_scroll(&self, scroll_y: f64, viewport_height: f64) {
        let doc = &self.document;

        if let Some(header) = query(doc, "#header") {
            let _ = if effects::header_scrolled(scroll_y) {
                header.class_list().add_1("scrolled")
            } else {
                header.class_list().remove_1("scrolled")
            };
        }

        let sections: Vec<SectionBounds> = query_all(doc, "section[id]")
            .iter()
            .map(|s| SectionBounds {
                id: s.id(),
                top: f64::from(s.offset_top()),
                height: f64::from(s.offset_height()),
            })
            .collect();
        if let Some(active) = effects::active_section(scroll_y, self.header_height(), &sections) {
            let href = format!("#{active}");
            for link in query_all(doc, ".nav-links a") {
                let _ = link.class_list().remove_1("active");
                if link.get_attribute("href").as_deref() == Some(href.as_str()) {
                    let _ = link.class_list().add_1("active");
                }
            }
        }

        if let (Some(title), Some(subtitle)) =
            (query(doc, ".hero-title"), query(doc, ".hero-subtitle"))
        {
            let (title_y, subtitle_y) = effects::hero_parallax(scroll_y);
            set_style(&title, "transform", &format!("translateY({title_y}px)"));
            set_style(&subtitle, "transform", &format!("translateY({subtitle_y}px)"));
        }
        for (i, decoration) in query_all(doc, ".pixel-decoration").iter().enumerate() {
            set_style(decoration, "transform", &effects::decoration_transform(i, scroll_y));
        }

        for item in query_all(doc, TIMELINE_ITEM) {
            if item.get_bounding_client_rect().top() > viewport_height * 0.8 {
                continue;
            }
            if item.class_list().contains("fade-in") {
                continue;
            }
            let _ = item.class_list().add_1("fade-in");
            for (i, li) in query_all_in(&item, ".quest-list li").into_iter().enumerate() {
                set_timeout(effects::stagger_delay_ms(i, 300, 100), move || {
                    set_styles(&li, &[("opacity", "1"), ("transform", "translateX(0)")]);
                });
            }
        }
    }

    fn setup_hero_buttons(self: &Rc<Self>) {
        for (selector, target) in [
            (".button-container .btn-primary", "#projects"),
            (".button-container .btn-outline", "#contact"),
        ] {
            let Some(button) = query(&self.document, selector) else {
                continue;
            };
            let page = Rc::clone(self);
            listen(&button, "click", move |event: Event| {
                event.prevent_default();
                page.play(SoundKind::Click);
                if let Some(section) = query(&page.document, target) {
                    let opts = ScrollIntoViewOptions::new();
                    opts.set_behavior(ScrollBehavior::Smooth);
                    section.scroll_into_view_with_scroll_into_view_options(&opts);
                }
            });
        }
    }

    // ── Decorative effects ──────────────────────────────────

    fn setup_button_sounds(self: &Rc<Self>) {
        for button in query_all(&self.document, ".btn, .btn-mini") {
            let page = Rc::clone(self);
            listen(&button, "mouseenter", move |_| page.play(SoundKind::Hover));
            let page = Rc::clone(self);
            listen(&button, "click", move |_| page.play(SoundKind::Click));
        }
    }

    fn setup_glitch_effects(&self) {
        for el in query_all(&self.document, ".glitch") {
            let every = effects::glitch_interval_ms(js_sys::Math::random());
            set_interval(every, move || flash_class(&el, "glitching", effects::GLITCH_MS));
        }

        if let Some(crt) = query(&self.document, ".crt-overlay") {
            let every = effects::flicker_interval_ms(js_sys::Math::random());
            set_interval(every, move || {
                set_style(&crt, "opacity", "0.5");
                let crt = crt.clone();
                set_timeout(effects::FLICKER_MS, move || set_style(&crt, "opacity", "0.3"));
            });
        }
    }

    fn add_scanlines(&self) {
        let Some(screen) = query(&self.document, ".quest-log-screen") else {
            return;
        };
        if let Ok(scanlines) = create(&self.document, "div") {
            let _ = scanlines.class_list().add_1("screen-scanlines");
            let _ = screen.append_child(&scanlines);
        }
    }

    // ── Project cards ───────────────────────────────────────

    fn setup_project_cards(self: &Rc<Self>) {
        for (i, card) in query_all(&self.document, ".project-card").into_iter().enumerate() {
            let delay = format!("{}s", i as f64 * 0.2);
            set_styles(
                &card,
                &[
                    ("animation-delay", delay.as_str()),
                    ("transition", "transform 0.3s ease, opacity 0.5s ease"),
                    ("opacity", "0"),
                    ("transform", "translateY(50px)"),
                ],
            );
            let shown = card.clone();
            set_timeout(effects::stagger_delay_ms(i, 300, 200), move || {
                set_styles(&shown, &[("opacity", "1"), ("transform", "translateY(0)")]);
            });

            let page = Rc::clone(self);
            let this = card.clone();
            listen(&card, "mouseenter", move |_| {
                page.play(SoundKind::Hover);
                show_loading(&page.document, &this);
            });
            let this = card.clone();
            listen(&card, "mouseleave", move |_| hide_loading(&this));
            let page = Rc::clone(self);
            listen(&card, "click", move |_| page.play(SoundKind::Click));
        }
    }

    // ── Retro console ───────────────────────────────────────

    fn setup_console(self: &Rc<Self>) {
        let doc = &self.document;
        if let (Some(power), Some(screen)) =
            (query(doc, ".power-button"), query(doc, ".screen-content"))
        {
            let page = Rc::clone(self);
            listen(&power, "click", move |_| {
                page.play(SoundKind::Power);
                let turned_off = screen.class_list().toggle("screen-off").unwrap_or(false);
                if turned_off {
                    let page = Rc::clone(&page);
                    let screen = screen.clone();
                    set_timeout(effects::POWER_CYCLE_MS, move || {
                        let _ = screen.class_list().remove_1("screen-off");
                        page.start_typewriter(true);
                    });
                }
            });
        }

        for button in query_all(doc, ".d-up, .d-right, .d-down, .d-left, .btn-a, .btn-b") {
            let page = Rc::clone(self);
            let this = button.clone();
            listen(&button, "mousedown", move |_| {
                let _ = this.class_list().add_1("pressed");
                page.play(SoundKind::Click);
            });
            for release in ["mouseup", "mouseleave"] {
                let this = button.clone();
                listen(&button, release, move |_| {
                    let _ = this.class_list().remove_1("pressed");
                });
            }
        }

        if let Some(meter) = query(doc, ".power-fill") {
            let declared = meter.style().get_property_value("width").unwrap_or_default();
            let target = effects::power_fill_target(&declared);
            set_style(&meter, "width", "0%");
            set_timeout(effects::POWER_FILL_DELAY_MS, move || {
                set_styles(
                    &meter,
                    &[
                        ("transition", "width 1.5s cubic-bezier(0.17, 0.67, 0.83, 0.67)"),
                        ("width", target.as_str()),
                    ],
                );
            });
        }

        if let Some(avatar) = query(doc, ".pixel-avatar") {
            let page = Rc::clone(self);
            let this = avatar.clone();
            listen(&avatar, "click", move |_| {
                flash_class(&this, "jump", effects::JUMP_MS);
                page.play(SoundKind::Jump);
            });
        }
    }

    // ── Quest log and XP ────────────────────────────────────

    fn setup_quest_log(self: &Rc<Self>) {
        let doc = &self.document;
        let tabs = Rc::new(query_all(doc, ".quest-tab"));
        if let Some(first) = tabs.first() {
            let _ = first.class_list().add_1("active");
        }

        self.recompute();

        for tab in tabs.iter() {
            let page = Rc::clone(self);
            let tabs = Rc::clone(&tabs);
            let this = tab.clone();
            listen(tab, "click", move |_| {
                page.play(SoundKind::Click);
                for t in tabs.iter() {
                    let _ = t.class_list().remove_1("active");
                }
                let _ = this.class_list().add_1("active");

                let filter = QuestFilter::from_tab(this.get_attribute("data-year").as_deref());
                page.apply_filter(&filter);
                *page.filter.borrow_mut() = filter;
                page.recompute();
            });
            let page = Rc::clone(self);
            listen(tab, "mouseenter", move |_| page.play(SoundKind::Hover));
        }

        for item in query_all(doc, TIMELINE_ITEM) {
            let page = Rc::clone(self);
            let this = item.clone();
            listen(&item, "mouseenter", move |_| {
                page.play(SoundKind::Hover);
                if let Some(dot) = query_in(&this, ".timeline-dot") {
                    set_styles(
                        &dot,
                        &[
                            ("transform", "translateX(-50%) scale(1.3)"),
                            ("box-shadow", "0 0 25px var(--accent)"),
                        ],
                    );
                }
            });
            let this = item.clone();
            listen(&item, "mouseleave", move |_| {
                if let Some(dot) = query_in(&this, ".timeline-dot") {
                    set_styles(
                        &dot,
                        &[
                            ("transform", "translateX(-50%) scale(1)"),
                            ("box-shadow", "0 0 15px var(--accent)"),
                        ],
                    );
                }
            });
        }

        let page = Rc::clone(self);
        listen(doc, "mousemove", move |event: Event| {
            let Some(mouse) = event.dyn_ref::<MouseEvent>() else {
                return;
            };
            let pointer = (f64::from(mouse.client_x()), f64::from(mouse.client_y()));
            let Ok(w) = window() else {
                return;
            };
            let (vw, vh) = (inner_width(&w), inner_height(&w));
            for card in query_all(&page.document, ".timeline-content") {
                let rect = card.get_bounding_client_rect();
                let in_view = rect.top() >= 0.0
                    && rect.left() >= 0.0
                    && rect.bottom() <= vh
                    && rect.right() <= vw;
                if in_view {
                    let transform = effects::quest_card_transform(
                        pointer,
                        rect.left(),
                        rect.top(),
                        rect.width(),
                        rect.height(),
                    );
                    set_style(&card, "transform", &transform);
                }
            }
        });
        let page = Rc::clone(self);
        listen(doc, "mouseleave", move |_| {
            for card in query_all(&page.document, ".timeline-content") {
                set_style(&card, "transform", "");
            }
        });
    }

    /// Show or hide timeline items for `filter`, with the slide animation.
    fn apply_filter(&self, filter: &QuestFilter) {
        for item in query_all(&self.document, TIMELINE_ITEM) {
            let entry = TimelineEntry::from_attributes(
                item.get_attribute("data-xp").as_deref(),
                item.get_attribute("data-year").as_deref(),
            );
            if filter.shows(&entry) {
                set_style(&item, "display", "flex");
                set_timeout(50, move || {
                    set_styles(&item, &[("opacity", "1"), ("transform", "translateX(0)")]);
                });
            } else {
                set_styles(&item, &[("opacity", "0"), ("transform", "translateX(-20px)")]);
                set_timeout(300, move || set_style(&item, "display", "none"));
            }
        }
    }

    fn setup_refresh_button(self: &Rc<Self>) {
        let Some(button) = query(&self.document, "#refresh-xp") else {
            return;
        };
        let page = Rc::clone(self);
        listen(&button, "mouseenter", move |_| page.play(SoundKind::Hover));
        let page = Rc::clone(self);
        let this = button.clone();
        listen(&button, "click", move |event: Event| {
            event.prevent_default();
            page.play(SoundKind::Click);
            flash_class(&this, "flash-animation", page.config.timing.refresh_flash_ms);
            page.recompute();
        });
    }

    /// Startup delays, first interaction and debounced resize.
    fn schedule_recomputes(self: &Rc<Self>) {
        for &delay in &self.config.timing.startup_recompute_ms {
            let page = Rc::clone(self);
            set_timeout(delay, move || page.recompute());
        }

        let page = Rc::clone(self);
        let fired = Cell::new(false);
        listen(&self.document, "click", move |_| {
            if fired.replace(true) {
                return;
            }
            let page = Rc::clone(&page);
            set_timeout(page.config.timing.first_interaction_ms, move || page.recompute());
        });

        let Ok(w) = window() else {
            return;
        };
        let page = Rc::clone(self);
        listen(&w, "resize", move |_| {
            let later = Rc::clone(&page);
            page.resize.schedule(move || {
                debug!("window resized, recomputing XP progress");
                later.recompute();
            });
        });
    }

    // ── Character card and contacts ─────────────────────────

    fn setup_character_info(self: &Rc<Self>) {
        let doc = &self.document;
        if let (Some(toggle), Some(backstory)) = (
            query(doc, ".backstory-toggle"),
            query(doc, ".character-backstory"),
        ) {
            let page = Rc::clone(self);
            let this = toggle.clone();
            listen(&toggle, "click", move |_| {
                page.play(SoundKind::Click);
                let _ = backstory.class_list().toggle("expanded");
                let _ = this.class_list().toggle("active");
            });
            let page = Rc::clone(self);
            listen(&toggle, "mouseenter", move |_| page.play(SoundKind::Hover));
        }

        self.hover_sound(&query_all(doc, ".skill-tag"));

        if let Some(stats) = query(doc, ".character-stats") {
            on_intersect(
                &[stats],
                effects::STATS_REVEAL_THRESHOLD,
                "0px",
                true,
                |stats| {
                    for (i, fill) in query_all_in(stats, ".stat-fill").into_iter().enumerate() {
                        animate_stat_fill(fill, i);
                    }
                },
            );
        }

        if let Some(card) = query(doc, ".character-card") {
            let this = card.clone();
            listen(&card, "mousemove", move |event: Event| {
                let Some(mouse) = event.dyn_ref::<MouseEvent>() else {
                    return;
                };
                let rect = this.get_bounding_client_rect();
                let (rx, ry) = effects::card_tilt(
                    f64::from(mouse.client_x()) - rect.left(),
                    f64::from(mouse.client_y()) - rect.top(),
                    rect.width(),
                    rect.height(),
                );
                set_style(&this, "transform", &effects::card_tilt_transform(rx, ry));
            });
            let this = card.clone();
            listen(&card, "mouseleave", move |_| {
                set_style(
                    &this,
                    "transform",
                    "perspective(1000px) rotateX(0) rotateY(0) scale3d(1, 1, 1)",
                );
            });
        }
    }

    fn setup_contact_items(self: &Rc<Self>) {
        for item in query_all(&self.document, ".contact-item") {
            let page = Rc::clone(self);
            let this = item.clone();
            listen(&item, "mouseenter", move |_| {
                page.play(SoundKind::Hover);
                if let Some(icon) = query_in(&this, ".contact-icon") {
                    set_styles(
                        &icon,
                        &[("box-shadow", "0 0 15px var(--accent)"), ("transform", "scale(1.1)")],
                    );
                }
            });
            let this = item.clone();
            listen(&item, "mouseleave", move |_| {
                if let Some(icon) = query_in(&this, ".contact-icon") {
                    set_styles(&icon, &[("box-shadow", ""), ("transform", "")]);
                }
            });

            let page = Rc::clone(self);
            let this = item.clone();
            listen(&item, "click", move |_| {
                page.play(SoundKind::Click);
                set_style(&this, "background-color", "rgba(78, 205, 196, 0.2)");
                let flashed = this.clone();
                set_timeout(effects::CONTACT_FLASH_MS, move || {
                    set_style(&flashed, "background-color", "");
                });
                if let Some(value) = query_in(&this, ".contact-value") {
                    copy_contact(value);
                }
            });
        }
    }
}

/// Grow one character stat bar from zero to its declared width.
fn animate_stat_fill(fill: HtmlElement, index: usize) {
    let computed = window()
        .ok()
        .and_then(|w| w.get_computed_style(&fill).ok().flatten())
        .and_then(|style| style.get_property_value("width").ok());
    let bar_width = fill
        .parent_element()
        .and_then(|p| p.dyn_into::<HtmlElement>().ok())
        .map_or(0.0, |p| f64::from(p.offset_width()));
    let data_width = fill.get_attribute("data-width");
    let inline_width = fill.style().get_property_value("width").ok();
    let target = effects::stat_fill_target(
        &[data_width.as_deref(), inline_width.as_deref(), computed.as_deref()],
        bar_width,
        fill.get_attribute("style").as_deref(),
    );

    let _ = fill.set_attribute("data-width", &target);
    set_style(&fill, "width", "0%");
    let delay =
        effects::stagger_delay_ms(index, effects::STAT_FILL_BASE_MS, effects::STAT_FILL_STEP_MS);
    set_timeout(delay, move || {
        set_styles(
            &fill,
            &[
                ("transition", "width 1s cubic-bezier(0.17, 0.67, 0.83, 0.67)"),
                ("width", target.as_str()),
            ],
        );
    });
}

fn render_toggle(button: &HtmlElement, enabled: bool) {
    if enabled {
        button.set_text_content(Some(UNMUTED_ICON));
        button.set_title("Disable Sound");
    } else {
        button.set_text_content(Some(MUTED_ICON));
        button.set_title("Enable Sound");
    }
}

/// Dim the card image and overlay a loading label.
fn show_loading(doc: &Document, card: &Element) {
    let (Some(img), Some(container)) = (
        query_in(card, ".project-img img"),
        query_in(card, ".project-img"),
    ) else {
        return;
    };
    set_style(&img, "opacity", "0.7");
    if query_in(&container, ".loading-text").is_some() {
        return;
    }
    let Ok(label) = create(doc, "div") else {
        return;
    };
    label.set_text_content(Some("LOADING..."));
    let _ = label.class_list().add_1("loading-text");
    set_styles(
        &label,
        &[
            ("position", "absolute"),
            ("top", "50%"),
            ("left", "50%"),
            ("transform", "translate(-50%, -50%)"),
            ("color", "#ffe66d"),
            ("font-family", "'Press Start 2P', cursive"),
            ("font-size", "0.8rem"),
            ("z-index", "2"),
        ],
    );
    let _ = container.append_child(&label);
}

fn hide_loading(card: &Element) {
    let Some(img) = query_in(card, ".project-img img") else {
        return;
    };
    set_style(&img, "opacity", "1");
    if let Some(label) = query_in(card, ".loading-text") {
        label.remove();
    }
}

/// Copy a contact value to the clipboard and briefly show `COPIED!`.
fn copy_contact(value: HtmlElement) {
    let Ok(w) = window() else {
        return;
    };
    let navigator = w.navigator();
    let available = js_sys::Reflect::get(&navigator, &JsValue::from_str("clipboard"))
        .is_ok_and(|clipboard| !clipboard.is_undefined() && !clipboard.is_null());
    if !available {
        error!(error = %PortfolioError::clipboard_unavailable(), "could not copy contact");
        return;
    }
    let text = value.text_content().unwrap_or_default().trim().to_string();
    let promise = navigator.clipboard().write_text(&text);
    spawn_local(async move {
        if let Err(e) = JsFuture::from(promise).await {
            error!(error = %PortfolioError::clipboard_js(&e), "could not copy contact");
            return;
        }
        let original = value.text_content();
        value.set_text_content(Some("COPIED!"));
        set_styles(&value, &[("font-size", "0.7rem"), ("color", "var(--accent)")]);
        set_timeout(effects::COPIED_FEEDBACK_MS, move || {
            value.set_text_content(original.as_deref());
            set_styles(&value, &[("font-size", ""), ("color", "")]);
        });
    });
}
