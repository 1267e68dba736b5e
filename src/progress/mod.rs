//! XP progress: quest-log entries, the active filter and level math.
//!
//! Progress is never stored: it is derived from whichever entries the
//! current filter shows, every time something may have changed.

pub mod aggregator;

use serde::{Deserialize, Serialize};

pub use aggregator::{ProgressAggregator, ProgressDisplay, ProgressSurface, RecomputeOutcome};

/// One quest-log entry and the experience it is worth.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineEntry {
    pub xp: u32,
    /// Tab category, e.g. a year.
    pub category: String,
}

impl TimelineEntry {
    pub fn new(xp: u32, category: &str) -> Self {
        TimelineEntry {
            xp,
            category: category.to_string(),
        }
    }

    /// Build an entry from raw `data-xp` / `data-year` attribute values.
    pub fn from_attributes(xp: Option<&str>, category: Option<&str>) -> Self {
        TimelineEntry {
            xp: xp.map_or(0, parse_xp),
            category: category.unwrap_or_default().to_string(),
        }
    }
}

/// Parse an XP attribute: leading decimal digits win, anything else is 0.
///
/// `"250"`, `"+250"` and `" 250xp"` are 250; `""`, `"abc"` and `"-40"` are 0.
pub fn parse_xp(raw: &str) -> u32 {
    let digits: &str = {
        let trimmed = raw.trim_start();
        let trimmed = trimmed.strip_prefix('+').unwrap_or(trimmed);
        let end = trimmed
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(trimmed.len());
        &trimmed[..end]
    };
    digits.parse().unwrap_or(0)
}

/// Which quest-log category is showing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuestFilter {
    #[default]
    All,
    Category(String),
}

impl QuestFilter {
    /// Interpret a tab's `data-year` value; `"all"` (or nothing) shows everything.
    pub fn from_tab(value: Option<&str>) -> Self {
        match value {
            None | Some("all") => QuestFilter::All,
            Some(category) => QuestFilter::Category(category.to_string()),
        }
    }

    pub fn shows(&self, entry: &TimelineEntry) -> bool {
        match self {
            QuestFilter::All => true,
            QuestFilter::Category(c) => entry.category == *c,
        }
    }
}

/// Entries plus the filter that decides which of them count.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuestLog {
    pub entries: Vec<TimelineEntry>,
    pub filter: QuestFilter,
}

impl QuestLog {
    pub fn new(entries: Vec<TimelineEntry>, filter: QuestFilter) -> Self {
        QuestLog { entries, filter }
    }

    pub fn visible(&self) -> impl Iterator<Item = &TimelineEntry> {
        self.entries.iter().filter(|e| self.filter.shows(e))
    }

    /// Sum of the visible entries' XP.
    pub fn visible_xp(&self) -> u64 {
        self.visible().map(|e| u64::from(e.xp)).sum()
    }
}

/// Level, bounds and fill percentage derived from a total.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressState {
    pub total_xp: u64,
    pub level: u32,
    pub prev_level_xp: u64,
    pub next_level_xp: u64,
    /// Progress within the current level, [0, 100].
    pub percent: f64,
}

impl ProgressState {
    /// Derive progress from a total. `xp_per_level` of 0 is treated as 1.
    pub fn from_total(total_xp: u64, xp_per_level: u32) -> Self {
        let per_level = u64::from(xp_per_level.max(1));
        let level = u32::try_from(total_xp / per_level + 1).unwrap_or(u32::MAX);
        let prev_level_xp = u64::from(level - 1) * per_level;
        let next_level_xp = u64::from(level) * per_level;
        let percent = (total_xp.saturating_sub(prev_level_xp)) as f64
            / (next_level_xp - prev_level_xp) as f64
            * 100.0;

        ProgressState {
            total_xp,
            level,
            prev_level_xp,
            next_level_xp,
            percent: percent.clamp(0.0, 100.0),
        }
    }

    /// `XP: 950 / 1000`
    pub fn xp_label(&self) -> String {
        format!("XP: {} / {}", self.total_xp, self.next_level_xp)
    }

    /// `LEVEL 2 - SOFTWARE DEVELOPER`
    pub fn level_label(&self, role: &str) -> String {
        format!("LEVEL {} - {}", self.level, role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_formula_holds_across_boundaries() {
        for total in [0, 1, 999, 1000, 1001, 1999, 2000, 12_345, 1_000_000] {
            let s = ProgressState::from_total(total, 1000);
            assert_eq!(u64::from(s.level), total / 1000 + 1, "total {total}");
            assert!(s.level >= 1);
            assert_eq!(s.prev_level_xp, u64::from(s.level - 1) * 1000);
            assert_eq!(s.next_level_xp, u64::from(s.level) * 1000);
            let expected = (total - s.prev_level_xp) as f64 / 1000.0 * 100.0;
            assert!((s.percent - expected).abs() < 1e-9, "total {total}");
            assert!((0.0..=100.0).contains(&s.percent), "total {total}: {}", s.percent);
        }
    }

    #[test]
    fn zero_xp_is_level_one_empty() {
        let s = ProgressState::from_total(0, 1000);
        assert_eq!(s.level, 1);
        assert_eq!(s.percent, 0.0);
        assert_eq!(s.xp_label(), "XP: 0 / 1000");
    }

    #[test]
    fn exact_boundary_starts_next_level() {
        let s = ProgressState::from_total(2000, 1000);
        assert_eq!(s.level, 3);
        assert_eq!(s.percent, 0.0);
        assert_eq!(s.xp_label(), "XP: 2000 / 3000");
    }

    #[test]
    fn labels_follow_page_format() {
        let s = ProgressState::from_total(950, 1000);
        assert_eq!(s.level, 1);
        assert!((s.percent - 95.0).abs() < 1e-9);
        assert_eq!(s.xp_label(), "XP: 950 / 1000");
        assert_eq!(s.level_label("SOFTWARE DEVELOPER"), "LEVEL 1 - SOFTWARE DEVELOPER");
    }

    #[test]
    fn custom_level_size() {
        let s = ProgressState::from_total(750, 500);
        assert_eq!(s.level, 2);
        assert!((s.percent - 50.0).abs() < 1e-9);
        assert_eq!(s.next_level_xp, 1000);
    }

    #[test]
    fn parse_xp_uses_integer_prefix() {
        assert_eq!(parse_xp("250"), 250);
        assert_eq!(parse_xp(" 250xp"), 250);
        assert_eq!(parse_xp("12.9"), 12);
        assert_eq!(parse_xp(""), 0);
        assert_eq!(parse_xp("abc"), 0);
        assert_eq!(parse_xp("-40"), 0);
        assert_eq!(parse_xp("99999999999999"), 0, "overflow is invalid");
    }

    #[test]
    fn parse_xp_accepts_explicit_plus_sign() {
        assert_eq!(parse_xp("+250"), 250);
        assert_eq!(parse_xp("  +40xp"), 40);
        assert_eq!(parse_xp("++5"), 0, "only one sign is allowed");
        assert_eq!(parse_xp("+"), 0);
    }

    #[test]
    fn missing_attributes_default() {
        let e = TimelineEntry::from_attributes(None, None);
        assert_eq!(e, TimelineEntry::new(0, ""));
    }

    #[test]
    fn filter_limits_visible_xp() {
        let log = QuestLog::new(
            vec![
                TimelineEntry::new(400, "2023"),
                TimelineEntry::new(300, "2022"),
                TimelineEntry::new(250, "2023"),
            ],
            QuestFilter::from_tab(Some("2023")),
        );
        assert_eq!(log.visible().count(), 2);
        assert_eq!(log.visible_xp(), 650);

        let all = QuestLog {
            filter: QuestFilter::from_tab(Some("all")),
            ..log
        };
        assert_eq!(all.visible_xp(), 950);
    }

    #[test]
    fn unknown_category_shows_nothing() {
        let log = QuestLog::new(
            vec![TimelineEntry::new(400, "2023")],
            QuestFilter::Category("1999".to_string()),
        );
        assert_eq!(log.visible_xp(), 0);
    }
}
