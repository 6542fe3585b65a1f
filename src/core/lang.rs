//! Language tag inference from character-set detection.

/// Unicode Hebrew block.
const HEBREW_START: char = '\u{0590}';
const HEBREW_END: char = '\u{05FF}';

/// Infer the synthesis language tag for `text`.
///
/// Presence of any Hebrew-range code point selects the Hebrew language tag;
/// everything else falls back to US English. This mirrors the only two
/// languages the system speaks.
pub fn language_tag(text: &str) -> &'static str {
    if text.chars().any(|c| (HEBREW_START..=HEBREW_END).contains(&c)) {
        "he-IL"
    } else {
        "en-US"
    }
}
