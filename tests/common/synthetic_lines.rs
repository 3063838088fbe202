use page_detector::Line;

/// Deterministic per-edge jitter, mimicking the near-duplicate lines a
/// Hough-style extractor emits for one true document edge. Offsets average
/// to zero so the bundled representative lands on the true edge.
const OFFSETS: [f64; 3] = [-2.0, 0.5, 1.5];
const SLOPES: [f64; 3] = [0.002, -0.003, 0.001];

/// Noisy line evidence around an axis-aligned document rectangle with
/// horizontal edges at `top`/`bottom` and vertical edges at `left`/`right`:
/// three near-duplicate lines per edge, twelve in total.
pub fn noisy_document_lines(left: f64, top: f64, right: f64, bottom: f64) -> Vec<Line> {
    let mut lines = Vec::with_capacity(12);
    for (off, slope) in OFFSETS.iter().zip(SLOPES.iter()) {
        lines.push(Line::new(*slope, top + off));
    }
    for (off, slope) in OFFSETS.iter().zip(SLOPES.iter()) {
        lines.push(Line::new(*slope, bottom + off));
    }
    for off in OFFSETS {
        lines.push(Line::vertical(left + off));
    }
    for off in OFFSETS {
        lines.push(Line::vertical(right + off));
    }
    lines
}
