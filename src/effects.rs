//! Pure geometry and timing for the page's decorative effects.
//!
//! The DOM wiring reads positions and writes styles; everything in
//! between lives here so it can be checked without a browser.

/// Scroll offset past which the header switches to its compact style.
pub const HEADER_SCROLL_THRESHOLD: f64 = 50.0;
/// Extra slack above a section before it counts as active.
pub const SECTION_SLACK: f64 = 20.0;

pub const TYPEWRITER_TEXT: &str = "PLAYER 1 - PRESS START";
pub const TYPEWRITER_CHAR_MS: u32 = 100;
/// The typewriter waits for the boot overlay to finish.
pub const TYPEWRITER_DELAY_MS: u32 = 5000;

/// Screen-off time after pressing the console's power button.
pub const POWER_CYCLE_MS: u32 = 1500;
pub const JUMP_MS: u32 = 500;
pub const GLITCH_MS: u32 = 200;
pub const FLICKER_MS: u32 = 100;
pub const CONTACT_FLASH_MS: u32 = 200;
pub const COPIED_FEEDBACK_MS: u32 = 1000;

pub fn header_scrolled(scroll_y: f64) -> bool {
    scroll_y > HEADER_SCROLL_THRESHOLD
}

/// A page section's id and vertical extent.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionBounds {
    pub id: String,
    pub top: f64,
    pub height: f64,
}

/// The section the nav should highlight at `scroll_y`.
///
/// Sections are offset by the fixed header; when several match, the last
/// one in document order wins.
pub fn active_section(
    scroll_y: f64,
    header_height: f64,
    sections: &[SectionBounds],
) -> Option<&str> {
    sections
        .iter()
        .filter(|s| {
            let top = s.top - header_height - SECTION_SLACK;
            scroll_y >= top && scroll_y < top + s.height
        })
        .last()
        .map(|s| s.id.as_str())
}

/// `translateY` offsets for the hero title and subtitle.
pub fn hero_parallax(scroll_y: f64) -> (f64, f64) {
    (scroll_y * 0.1, scroll_y * 0.05)
}

/// Transform for the `index`-th pixel decoration: deeper ones move faster,
/// tilt further and render larger.
pub fn decoration_transform(index: usize, scroll_y: f64) -> String {
    let i = index as f64;
    let speed = 0.05 + i * 0.02;
    format!(
        "translateY({}px) rotate({}deg) scale({})",
        scroll_y * speed,
        i * 5.0,
        0.7 + i * 0.1
    )
}

/// `(rotateX, rotateY)` in degrees for a card tilted toward the pointer at
/// `(x, y)` relative to its `width × height` box; ±5° at the edges.
pub fn card_tilt(x: f64, y: f64, width: f64, height: f64) -> (f64, f64) {
    let cx = width / 2.0;
    let cy = height / 2.0;
    if cx <= 0.0 || cy <= 0.0 {
        return (0.0, 0.0);
    }
    ((cy - y) / cy * 5.0, (x - cx) / cx * 5.0)
}

pub fn card_tilt_transform(rotate_x: f64, rotate_y: f64) -> String {
    format!(
        "perspective(1000px) rotateX({rotate_x}deg) rotateY({rotate_y}deg) scale3d(1.03, 1.03, 1.03)"
    )
}

/// Transform for a quest card reacting to a pointer anywhere on screen:
/// the pointer's distance from the card center, in card sizes, times 5°.
pub fn quest_card_transform(
    pointer: (f64, f64),
    card_left: f64,
    card_top: f64,
    card_width: f64,
    card_height: f64,
) -> String {
    if card_width <= 0.0 || card_height <= 0.0 {
        return String::new();
    }
    let dist_x = (pointer.0 - (card_left + card_width / 2.0)) / card_width;
    let dist_y = (pointer.1 - (card_top + card_height / 2.0)) / card_height;
    format!(
        "perspective(1000px) rotateY({}deg) rotateX({}deg)",
        dist_x * 5.0,
        -dist_y * 5.0
    )
}

/// Random interval between glitch bursts; `r` is uniform in [0, 1).
pub fn glitch_interval_ms(r: f64) -> u32 {
    5000 + (r.clamp(0.0, 1.0) * 10_000.0) as u32
}

/// Random interval between CRT flickers; `r` is uniform in [0, 1).
pub fn flicker_interval_ms(r: f64) -> u32 {
    7000 + (r.clamp(0.0, 1.0) * 15_000.0) as u32
}

/// Delay for the `index`-th item of a staggered animation.
pub fn stagger_delay_ms(index: usize, base_ms: u32, step_ms: u32) -> u32 {
    base_ms.saturating_add(step_ms.saturating_mul(index as u32))
}

/// One step of the boot overlay's fake loading sequence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StartupStep {
    pub at_ms: u32,
    pub fill_percent: u32,
    pub status: &'static str,
}

impl StartupStep {
    pub const fn new(at_ms: u32, fill_percent: u32, status: &'static str) -> Self {
        StartupStep {
            at_ms,
            fill_percent,
            status,
        }
    }
}

pub const STARTUP_TITLE: &str = "JEMIN JOSEPH";
pub const STARTUP_INITIAL_STATUS: &str = "LOADING...";

pub const STARTUP_STEPS: [StartupStep; 4] = [
    StartupStep::new(500, 30, "LOADING ASSETS..."),
    StartupStep::new(1500, 60, "INITIALIZING MODULES..."),
    StartupStep::new(2500, 85, "PREPARING GAME DATA..."),
    StartupStep::new(3500, 100, "READY TO PLAY!"),
];

/// The overlay starts fading here...
pub const STARTUP_FADE_MS: u32 = 4000;
/// ...and is removed here.
pub const STARTUP_REMOVE_MS: u32 = 5000;

/// Visible fraction at which a section counts as revealed.
pub const SECTION_REVEAL_THRESHOLD: f64 = 0.2;

/// Observer root margin that keeps the fixed header out of the viewport.
pub fn reveal_root_margin(header_height: f64) -> String {
    format!("-{}px 0px 0px 0px", header_height.max(0.0))
}

/// Visible fraction of the character stats before their bars animate.
pub const STATS_REVEAL_THRESHOLD: f64 = 0.5;
/// Width used when a stat bar declares none.
pub const STAT_FILL_FALLBACK: &str = "90%";
/// First stat bar starts here; each later one `STAT_FILL_STEP_MS` after.
pub const STAT_FILL_BASE_MS: u32 = 300;
pub const STAT_FILL_STEP_MS: u32 = 150;

/// Where a character stat bar should end up.
///
/// `declared` holds the `data-width` attribute, the inline width and the
/// computed width, in that order; the first non-empty one is used. A
/// percentage is kept, a pixel width becomes a share of `bar_width`, and
/// anything else falls back to a `width:` in `style_attr`, then to
/// `STAT_FILL_FALLBACK`.
pub fn stat_fill_target(
    declared: &[Option<&str>],
    bar_width: f64,
    style_attr: Option<&str>,
) -> String {
    let width = declared
        .iter()
        .flatten()
        .map(|w| w.trim())
        .find(|w| !w.is_empty())
        .unwrap_or("");

    if width.contains('%') {
        return width.to_string();
    }
    let px = leading_number(width).filter(|_| width.contains("px") && bar_width > 0.0);
    if let Some(px) = px {
        return format!("{}%", px / bar_width * 100.0);
    }
    style_attr
        .and_then(|style| style.split("width:").nth(1))
        .and_then(|rest| rest.split(';').next())
        .map(str::trim)
        .filter(|w| !w.is_empty())
        .unwrap_or(STAT_FILL_FALLBACK)
        .to_string()
}

/// The numeric prefix of a CSS length such as `"120.5px"`.
fn leading_number(raw: &str) -> Option<f64> {
    let end = raw
        .char_indices()
        .find(|&(i, c)| !(c.is_ascii_digit() || c == '.' || (i == 0 && c == '-')))
        .map_or(raw.len(), |(i, _)| i);
    raw[..end].parse().ok()
}

/// The power meter fills this long after load.
pub const POWER_FILL_DELAY_MS: u32 = 500;
pub const POWER_FILL_DEFAULT_PERCENT: &str = "85";

/// Target width for the power meter from its inline width (`"70%"`),
/// defaulting to 85%.
pub fn power_fill_target(inline_width: &str) -> String {
    let percent = inline_width.split('%').next().unwrap_or("").trim();
    if percent.is_empty() {
        format!("{POWER_FILL_DEFAULT_PERCENT}%")
    } else {
        format!("{percent}%")
    }
}

/// Typewriter frames: the text revealed one character at a time.
pub fn typewriter_frames(text: &str) -> Vec<&str> {
    text.char_indices()
        .map(|(i, c)| &text[..i + c.len_utf8()])
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn section(id: &str, top: f64, height: f64) -> SectionBounds {
        SectionBounds {
            id: id.to_string(),
            top,
            height,
        }
    }

    fn sections() -> Vec<SectionBounds> {
        vec![
            section("hero", 0.0, 800.0),
            section("about", 800.0, 600.0),
            section("projects", 1400.0, 1000.0),
        ]
    }

    #[test]
    fn header_compacts_after_threshold() {
        assert!(!header_scrolled(0.0));
        assert!(!header_scrolled(50.0));
        assert!(header_scrolled(50.5));
    }

    #[test]
    fn active_section_accounts_for_header() {
        let s = sections();
        assert_eq!(active_section(0.0, 80.0, &s), Some("hero"));
        // about starts at 800 - 80 - 20 = 700.
        assert_eq!(active_section(699.0, 80.0, &s), Some("hero"));
        assert_eq!(active_section(700.0, 80.0, &s), Some("about"));
        assert_eq!(active_section(1350.0, 80.0, &s), Some("projects"));
        assert_eq!(active_section(5000.0, 80.0, &s), None);
    }

    #[test]
    fn overlapping_sections_prefer_the_later_one() {
        let s = vec![
            section("a", 0.0, 1000.0),
            section("b", 500.0, 1000.0),
        ];
        assert_eq!(active_section(600.0, 0.0, &s), Some("b"));
    }

    #[test]
    fn parallax_rates() {
        assert_eq!(hero_parallax(200.0), (20.0, 10.0));
        assert_eq!(
            decoration_transform(0, 100.0),
            "translateY(5px) rotate(0deg) scale(0.7)"
        );
        let third = decoration_transform(2, 100.0);
        assert!(third.starts_with("translateY(9"), "got {third}");
        assert!(third.contains("rotate(10deg)"), "got {third}");
    }

    #[test]
    fn tilt_is_zero_at_center_and_five_at_edges() {
        assert_eq!(card_tilt(100.0, 50.0, 200.0, 100.0), (0.0, 0.0));
        assert_eq!(card_tilt(200.0, 0.0, 200.0, 100.0), (5.0, 5.0));
        assert_eq!(card_tilt(0.0, 100.0, 200.0, 100.0), (-5.0, -5.0));
        assert_eq!(card_tilt(10.0, 10.0, 0.0, 0.0), (0.0, 0.0));
    }

    #[test]
    fn quest_card_tilts_toward_pointer() {
        let t = quest_card_transform((150.0, 50.0), 0.0, 0.0, 100.0, 100.0);
        assert_eq!(t, "perspective(1000px) rotateY(5deg) rotateX(-0deg)");
        assert!(quest_card_transform((0.0, 0.0), 0.0, 0.0, 0.0, 10.0).is_empty());
    }

    #[test]
    fn random_intervals_stay_in_range() {
        assert_eq!(glitch_interval_ms(0.0), 5000);
        assert!(glitch_interval_ms(0.999) < 15_000);
        assert_eq!(flicker_interval_ms(0.0), 7000);
        assert!(flicker_interval_ms(0.999) < 22_000);
    }

    #[test]
    fn startup_sequence_is_ordered_and_finishes_full() {
        assert!(STARTUP_STEPS.windows(2).all(|w| w[0].at_ms < w[1].at_ms));
        assert_eq!(STARTUP_STEPS[3].fill_percent, 100);
        assert!(STARTUP_STEPS[3].at_ms < STARTUP_FADE_MS);
        assert!(STARTUP_FADE_MS < STARTUP_REMOVE_MS);
    }

    #[test]
    fn typewriter_reveals_one_char_per_frame() {
        let frames = typewriter_frames("P1 →");
        assert_eq!(frames, vec!["P", "P1", "P1 ", "P1 →"]);
        assert_eq!(typewriter_frames(TYPEWRITER_TEXT).len(), TYPEWRITER_TEXT.len());
    }

    #[test]
    fn stagger_grows_linearly() {
        assert_eq!(stagger_delay_ms(0, 300, 200), 300);
        assert_eq!(stagger_delay_ms(3, 300, 200), 900);
    }

    #[test]
    fn reveal_margin_hides_the_header() {
        assert_eq!(reveal_root_margin(80.0), "-80px 0px 0px 0px");
        assert_eq!(reveal_root_margin(0.0), "-0px 0px 0px 0px");
    }

    #[test]
    fn stat_fill_prefers_the_first_declared_width() {
        assert_eq!(stat_fill_target(&[Some("75%"), Some("10%"), None], 200.0, None), "75%");
        assert_eq!(stat_fill_target(&[None, Some(""), Some("60%")], 200.0, None), "60%");
    }

    #[test]
    fn stat_fill_converts_pixels_to_a_share_of_the_bar() {
        assert_eq!(stat_fill_target(&[None, None, Some("150px")], 200.0, None), "75%");
        assert_eq!(stat_fill_target(&[Some("50.5px")], 101.0, None), "50%");
    }

    #[test]
    fn stat_fill_falls_back_to_style_attribute_then_default() {
        let style = Some("height: 8px; width: 40%;");
        assert_eq!(stat_fill_target(&[Some("auto")], 200.0, style), "40%");
        assert_eq!(stat_fill_target(&[Some("auto")], 200.0, Some("color: red")), "90%");
        assert_eq!(stat_fill_target(&[], 200.0, None), STAT_FILL_FALLBACK);
        // A pixel width on a bar with no layout cannot be converted.
        assert_eq!(stat_fill_target(&[Some("30px")], 0.0, None), "90%");
    }

    #[test]
    fn stat_bars_animate_in_sequence() {
        let delays: Vec<u32> = (0..3)
            .map(|i| stagger_delay_ms(i, STAT_FILL_BASE_MS, STAT_FILL_STEP_MS))
            .collect();
        assert_eq!(delays, vec![300, 450, 600]);
    }

    #[test]
    fn power_meter_keeps_its_inline_width_or_defaults() {
        assert_eq!(power_fill_target("70%"), "70%");
        assert_eq!(power_fill_target(""), "85%");
        assert_eq!(power_fill_target("%"), "85%");
    }
}
