//! Letter-width heuristic tables.
//!
//! A proportional character estimate assumes every glyph in a run has the
//! same advance. Runs dominated by wide glyphs need fewer characters to cover
//! a distance, runs dominated by slim glyphs need more. These tables drive
//! the rounding correction in [`crate::band`].

/// Glyphs noticeably wider than the average advance.
const WIDE: [char; 23] = [
    'w', 'm', 'W', 'M', 'D', 'O', 'Q', 'G', 'S', 'B', 'C', 'P', 'E', 'R', 'A', 'N', 'U', 'V', 'X',
    'Y', 'Z', 'K', 'H',
];

/// Glyphs noticeably narrower than the average advance.
const SLIM: [char; 14] = [
    'i', 'r', 'l', 't', 'f', 'j', 'I', '1', '.', ',', '(', ')', '"', '\'',
];

/// Whether `ch` belongs to the wide set.
pub fn is_wide(ch: char) -> bool {
    WIDE.contains(&ch)
}

/// Whether `ch` belongs to the slim set.
pub fn is_slim(ch: char) -> bool {
    SLIM.contains(&ch)
}

/// Number of wide characters in `text`.
pub fn count_wide(text: &str) -> usize {
    text.chars().filter(|&c| is_wide(c)).count()
}

/// Number of slim characters in `text`.
pub fn count_slim(text: &str) -> usize {
    text.chars().filter(|&c| is_slim(c)).count()
}
