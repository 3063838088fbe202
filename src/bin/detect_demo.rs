use page_detector::config::load_config;
use page_detector::{plan_crop, DetectionParams, Line, PageDetector};
use std::path::Path;

fn main() {
    env_logger::init();

    // Optional JSON config as the first argument; defaults otherwise.
    let (width, height, params) = match std::env::args().nth(1) {
        Some(path) => match load_config(Path::new(&path)) {
            Ok(cfg) => (cfg.image_width, cfg.image_height, cfg.detection),
            Err(err) => {
                eprintln!("{err}");
                std::process::exit(1);
            }
        },
        None => (1000.0, 1200.0, DetectionParams::default()),
    };

    // Demo stub: synthetic noisy evidence around a 400x600 page, three
    // near-duplicate lines per true edge as a Hough extractor would emit.
    let raw_lines = vec![
        Line::new(0.002, 298.0),
        Line::new(-0.001, 300.0),
        Line::new(0.0, 301.5),
        Line::new(0.001, 899.0),
        Line::new(0.0, 900.0),
        Line::new(-0.002, 900.5),
        Line::vertical(299.0),
        Line::vertical(300.0),
        Line::vertical(301.0),
        Line::vertical(699.5),
        Line::vertical(700.0),
        Line::vertical(700.5),
    ];

    let detector = PageDetector::new(params);
    let report = detector.process(&raw_lines, width, height);
    match &report.boundary {
        Some(quad) => {
            let crop = plan_crop(quad);
            println!(
                "found page: tl=({:.1},{:.1}) br=({:.1},{:.1}) crop={:.0}x{:.0} latency_ms={:.3}",
                quad.top_left.x,
                quad.top_left.y,
                quad.bottom_right.x,
                quad.bottom_right.y,
                crop.width,
                crop.height,
                report.latency_ms
            );
        }
        None => println!(
            "no boundary ({} raw -> {} bundled lines), latency_ms={:.3}",
            report.raw_line_count, report.bundled_line_count, report.latency_ms
        ),
    }
}
