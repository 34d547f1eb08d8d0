//! End-to-end reconstruction over hand-built pages.

use pdfhighlights_core::*;

fn highlight(quad_points: Vec<f64>, color: Rgb) -> RawAnnotation {
    let mut annot = RawAnnotation::new("Highlight");
    annot.quad_points = Some(quad_points);
    annot.color = Some(color);
    annot
}

#[test]
fn half_line_highlight_in_red() {
    let mut runs = vec![TextRun::new("Hello world", 0.0, 100.0, 110.0)];
    sort_reading_order(&mut runs);

    let annot = highlight(
        vec![0.0, 105.0, 55.0, 105.0, 0.0, 95.0, 55.0, 95.0],
        Rgb::new(255, 0, 0),
    );
    let text = extract_highlight(annot.quad_points.as_deref().unwrap_or_default(), &runs);
    let record = AnnotationRecord::from_annotation(&annot, text, 1);

    assert_eq!(record.highlight.text, "Hello");
    assert_eq!(record.highlight.color_rgba, "rgba(255, 0, 0, 0.5)");
}

#[test]
fn unsorted_runs_are_read_top_down() {
    let mut runs = vec![
        TextRun::new("second line", 0.0, 680.0, 110.0),
        TextRun::new("first line", 0.0, 700.0, 100.0),
    ];
    sort_reading_order(&mut runs);

    // One tall quad covering both baselines.
    let quads = [0.0, 710.0, 200.0, 710.0, 0.0, 675.0, 200.0, 675.0];
    assert_eq!(extract_highlight(&quads, &runs), "first linesecond line");
}

#[test]
fn per_line_quads_are_space_joined() {
    let mut runs = vec![
        TextRun::new("second line", 0.0, 680.0, 110.0),
        TextRun::new("first line", 0.0, 700.0, 100.0),
    ];
    sort_reading_order(&mut runs);

    let quads = [
        0.0, 710.0, 200.0, 710.0, 0.0, 695.0, 200.0, 695.0, //
        0.0, 690.0, 200.0, 690.0, 0.0, 675.0, 200.0, 675.0,
    ];
    assert_eq!(extract_highlight(&quads, &runs), "first line second line");
}

#[test]
fn normalisation_applies_after_assembly() {
    let runs = vec![TextRun::new("\u{fb01}ne print", 0.0, 100.0, 90.0)];
    let quads = [0.0, 105.0, 100.0, 105.0, 0.0, 95.0, 100.0, 95.0];
    let text = extract_highlight(&quads, &runs);
    assert_eq!(UnicodeNorm::Nfkc.normalize(&text), "fine print");
}
