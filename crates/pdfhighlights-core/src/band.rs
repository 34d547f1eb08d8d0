//! Band extraction: recover the characters a rectangular band covers.
//!
//! PDF text carries no per-character offsets here, only a run origin and a
//! total advance, so partially covered runs are cut with a proportional
//! estimate. When the band ends inside a run the estimate is nudged by the
//! letter-width heuristic in [`crate::letters`].

use crate::geometry::Band;
use crate::letters::{count_slim, count_wide};
use crate::text::TextRun;

/// Return the trimmed text covered by `band`.
///
/// `runs` must already be in reading order; fragments are concatenated in
/// iteration order without separators. A run contributes only when its
/// baseline lies inside the band's vertical range and it overlaps the band
/// horizontally.
pub fn search_band(band: &Band, runs: &[TextRun]) -> String {
    let mut out = String::new();

    for run in runs {
        if !(run.width.is_finite() && run.width > 0.0) {
            continue;
        }
        if !band.contains_y(run.origin_y) {
            continue;
        }
        if run.end_x() < band.min_x || run.origin_x > band.max_x {
            continue;
        }

        let len = run.char_len() as f64;
        let start = if run.origin_x >= band.min_x {
            0
        } else {
            to_offset((len * (band.min_x - run.origin_x) / run.width).round())
        };

        if run.end_x() <= band.max_x {
            out.extend(run.text.chars().skip(start));
        } else {
            let exact = len * (band.max_x - run.origin_x) / run.width;
            let end = corrected_end(&run.text, start, exact);
            out.extend(run.text.chars().skip(start).take(end.saturating_sub(start)));
        }
    }

    out.trim().to_string()
}

/// Round a proportional end offset using the letter-width heuristic.
///
/// The characters probed are the `round(exact)` characters starting at
/// `start`. Mostly wide letters round down, mostly slim letters round up.
fn corrected_end(text: &str, start: usize, exact: f64) -> usize {
    let rounded = exact.round();
    let probe: String = text.chars().skip(start).take(to_offset(rounded)).collect();
    let wide = count_wide(&probe);
    let slim = count_slim(&probe);

    let corrected = if wide > slim {
        exact.floor()
    } else if wide < slim {
        exact.ceil()
    } else {
        rounded
    };
    to_offset(corrected)
}

fn to_offset(value: f64) -> usize {
    if value.is_finite() && value > 0.0 {
        value as usize
    } else {
        0
    }
}
