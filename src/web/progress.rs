//! DOM side of the XP bar: reading quest entries and drawing the bar.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::debug;
use web_sys::{Document, HtmlElement};

use crate::error::PortfolioError;
use crate::progress::{ProgressDisplay, ProgressSurface, QuestFilter, QuestLog, TimelineEntry};

use super::dom::{create, flash_class, query, query_all, require, set_style, set_timeout};

pub const TIMELINE_ITEM: &str = ".timeline-item";

/// The live document plus the quest-log filter the tabs control.
pub struct DomSurface {
    pub document: Document,
    pub filter: Rc<RefCell<QuestFilter>>,
}

impl ProgressSurface for DomSurface {
    type Display = DomProgressDisplay;

    fn locate_display(&self) -> Result<DomProgressDisplay, PortfolioError> {
        let doc = &self.document;
        Ok(DomProgressDisplay {
            fill: require(doc, ".xp-fill")?,
            xp_label: require(doc, ".xp-label")?,
            level_label: require(doc, ".player-level")?,
            bar: require(doc, ".xp-progress")?,
            container: query(doc, ".progress-bar-container"),
            document: doc.clone(),
        })
    }

    fn quest_log(&self) -> QuestLog {
        let entries = query_all(&self.document, TIMELINE_ITEM)
            .iter()
            .map(|item| {
                TimelineEntry::from_attributes(
                    item.get_attribute("data-xp").as_deref(),
                    item.get_attribute("data-year").as_deref(),
                )
            })
            .collect();
        QuestLog::new(entries, self.filter.borrow().clone())
    }
}

/// The XP bar's elements, located fresh for each recompute.
pub struct DomProgressDisplay {
    fill: HtmlElement,
    xp_label: HtmlElement,
    level_label: HtmlElement,
    bar: HtmlElement,
    container: Option<HtmlElement>,
    document: Document,
}

impl ProgressDisplay for DomProgressDisplay {
    fn reset_fill(&mut self) {
        set_style(&self.fill, "width", "0%");
        // Reading layout flushes the zero width so the next change animates.
        let height = self.fill.offset_height();
        debug!(height, "xp fill reflowed");
    }

    fn set_fill(&mut self, percent: f64) {
        let style = self.fill.style();
        let width = format!("{percent}%");
        let _ = style.set_property_with_priority("width", &width, "important");
        let _ = style.set_property_with_priority("display", "block", "important");
        let _ = style.set_property_with_priority("visibility", "visible", "important");
        let _ = style.set_property(
            "background",
            "linear-gradient(to right, var(--secondary), var(--accent))",
        );
    }

    fn set_labels(&mut self, xp_label: &str, level_label: &str) {
        self.xp_label.set_text_content(Some(xp_label));
        self.level_label.set_text_content(Some(level_label));
    }

    fn shine(&mut self, duration_ms: u32) {
        flash_class(&self.bar, "xp-shine", duration_ms);
    }

    fn celebrate_level_up(&mut self, message: &str, duration_ms: u32) {
        flash_class(&self.level_label, "level-up", duration_ms);

        let Ok(note) = create(&self.document, "div") else {
            return;
        };
        note.set_class_name("level-up-notification");
        note.set_text_content(Some(message));
        let host = self.container.as_ref().unwrap_or(&self.bar);
        if host.append_child(&note).is_ok() {
            set_timeout(duration_ms, move || note.remove());
        }
    }
}
