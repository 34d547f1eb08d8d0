//! Highlight assembly across quads and lines.

use crate::band::search_band;
use crate::geometry::decompose_quad_points;
use crate::text::TextRun;

/// Text and display colour of one highlight annotation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct Highlight {
    /// Reconstructed text, possibly empty.
    pub text: String,
    /// CSS colour string, e.g. `rgba(255, 0, 0, 0.5)`.
    pub color_rgba: String,
}

/// Reconstruct the text under a highlight's `/QuadPoints`.
///
/// Each quad is searched independently against `runs` (which must be in
/// reading order) and the per-quad fragments are joined with
/// [`join_fragments`].
pub fn extract_highlight(quad_points: &[f64], runs: &[TextRun]) -> String {
    decompose_quad_points(quad_points)
        .iter()
        .fold(String::new(), |mut acc, quad| {
            let fragment = search_band(&quad.band(), runs);
            join_fragments(&mut acc, &fragment);
            acc
        })
}

/// Append one line fragment to the accumulated highlight text.
///
/// Fragments are separated by a single space. When the text so far ends in
/// `-` the fragment is glued on directly instead; the hyphen is dropped only
/// when it sits between two lowercase letters (`exam-` + `ple`), otherwise it
/// is kept (`CASE-` + `ful`, `3-` + `x`). Empty fragments are ignored.
pub fn join_fragments(acc: &mut String, fragment: &str) {
    if fragment.is_empty() {
        return;
    }
    if acc.is_empty() {
        acc.push_str(fragment);
        return;
    }
    if !acc.ends_with('-') {
        acc.push(' ');
        acc.push_str(fragment);
        return;
    }

    let before_hyphen = acc.chars().rev().nth(1);
    let soft_hyphen = before_hyphen.is_some_and(char::is_lowercase)
        && fragment.chars().next().is_some_and(char::is_lowercase);
    if soft_hyphen {
        acc.pop();
    }
    acc.push_str(fragment);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn joined(parts: &[&str]) -> String {
        let mut acc = String::new();
        for part in parts {
            join_fragments(&mut acc, part);
        }
        acc
    }

    /// Quad covering `[x0, x1] × [y_bottom, y_top]` in tL, tR, bL, bR order.
    fn quad(x0: f64, x1: f64, y_bottom: f64, y_top: f64) -> [f64; 8] {
        [x0, y_top, x1, y_top, x0, y_bottom, x1, y_bottom]
    }

    #[test]
    fn plain_fragments_are_space_joined() {
        assert_eq!(joined(&["first line", "second line"]), "first line second line");
    }

    #[test]
    fn lowercase_hyphen_is_removed() {
        assert_eq!(joined(&["a case-", "ful reading"]), "a caseful reading");
    }

    #[test]
    fn uppercase_before_hyphen_keeps_it() {
        assert_eq!(joined(&["CASE-", "ful"]), "CASE-ful");
    }

    #[test]
    fn uppercase_after_hyphen_keeps_it() {
        assert_eq!(joined(&["case-", "Ful"]), "case-Ful");
    }

    #[test]
    fn digit_before_hyphen_keeps_it() {
        assert_eq!(joined(&["covid-19 and 3-", "x"]), "covid-19 and 3-x");
    }

    #[test]
    fn lone_hyphen_keeps_it() {
        assert_eq!(joined(&["-", "x"]), "-x");
    }

    #[test]
    fn empty_fragments_are_ignored() {
        assert_eq!(joined(&["", "alpha", "", "beta"]), "alpha beta");
        assert_eq!(joined(&["", ""]), "");
    }

    #[test]
    fn single_quad_matches_band_search() {
        let runs = [TextRun::new("Hello world", 0.0, 100.0, 110.0)];
        assert_eq!(extract_highlight(&quad(0.0, 55.0, 95.0, 105.0), &runs), "Hello");
    }

    #[test]
    fn two_line_highlight_is_dehyphenated() {
        let runs = [
            TextRun::new("This is a wonder-", 0.0, 700.0, 170.0),
            TextRun::new("ful example", 0.0, 686.0, 110.0),
        ];
        let mut points = quad(0.0, 170.0, 695.0, 710.0).to_vec();
        points.extend(quad(0.0, 30.0, 680.0, 692.0));
        assert_eq!(extract_highlight(&points, &runs), "This is a wonderful");
    }

    #[test]
    fn quad_matching_nothing_adds_no_space() {
        let runs = [TextRun::new("only line", 0.0, 500.0, 90.0)];
        let mut points = quad(0.0, 100.0, 495.0, 505.0).to_vec();
        points.extend(quad(0.0, 100.0, 100.0, 110.0));
        assert_eq!(extract_highlight(&points, &runs), "only line");
    }

    #[test]
    fn no_quads_yield_empty_text() {
        let runs = [TextRun::new("text", 0.0, 100.0, 40.0)];
        assert_eq!(extract_highlight(&[], &runs), "");
    }
}
