//! End-to-end pipeline tests: image file in, SVG documents out.

mod common;

use common::{fixtures, fixtures::threads, TestApp};
use crossstitch::error::AppError;
use crossstitch::models::{AppConfig, PatternVariant};
use pretty_assertions::assert_eq;

#[test]
fn test_uniform_image_single_color() {
    let app = TestApp::new();
    let image = app.write_file("red.png", &fixtures::png_bytes(&fixtures::solid(2, 2, threads::RED)));

    let report = app.run(&image, 1, "kmeans", 2).unwrap();

    assert_eq!((report.width, report.height), (2, 2));
    assert_eq!(report.smoothed, 0);
    assert_eq!(report.threads.len(), 1);
    assert_eq!(report.threads[0].id(), "321");
    assert_eq!(app.output_files(), vec!["key.svg", "pattern.svg"]);

    let pattern = app.read_output("pattern.svg");
    common::assert_svg_size(&pattern, 30.0, 30.0);
    assert_eq!(
        common::cell_fills(&pattern),
        vec!["rgb(199,43,59)"; 4],
        "four cells sharing one fill"
    );

    let key = app.read_output("key.svg");
    common::assert_svg_size(&key, 520.0, 40.0);
    assert_eq!(common::count(&key, "class=\"svg_txt\""), 2);
    assert!(key.contains(">Red<"));
    assert!(key.contains(">321<"));
}

#[test]
fn test_resize_keeps_aspect_ratio() {
    let app = TestApp::new();
    let image = app.write_file(
        "wide.png",
        &fixtures::png_bytes(&fixtures::solid(64, 48, threads::BLACK)),
    );

    let report = app.run(&image, 1, "kmeans", 16).unwrap();

    assert_eq!((report.width, report.height), (16, 12));
    // 16x12 cells of 10 plus the one-cell margin
    common::assert_svg_size(&app.read_output("pattern.svg"), 170.0, 130.0);
}

#[test]
fn test_stripes_match_their_threads() {
    let app = TestApp::new();
    let image = fixtures::stripes(30, 10, &[threads::BLACK, threads::RED, threads::BLUE]);
    let image = app.write_file("stripes.png", &fixtures::png_bytes(&image));

    let report = app.run(&image, 3, "kmeans", 30).unwrap();

    let mut ids: Vec<&str> = report.threads.iter().map(|t| t.id()).collect();
    ids.sort();
    assert_eq!(ids, vec!["310", "321", "797"]);
    assert_eq!(report.smoothed, 0);

    let fills = common::cell_fills(&app.read_output("pattern.svg"));
    assert_eq!(fills.len(), 300);
    assert_eq!(fills[0], "rgb(0,0,0)");
    assert_eq!(fills[29], "rgb(19,71,125)");
}

#[test]
fn test_every_method_produces_valid_documents() {
    let image = fixtures::stripes(24, 8, &[threads::BLACK, threads::RED, threads::BLUE]);

    for method in ["kmeans", "meanshift", "gmm"] {
        let app = TestApp::new();
        let path = app.write_file("stripes.png", &fixtures::png_bytes(&image));

        let report = app
            .run(&path, 3, method, 24)
            .unwrap_or_else(|e| panic!("{method} failed: {e}"));

        assert!(!report.threads.is_empty(), "{method} produced no threads");
        common::assert_svg_size(&app.read_output("pattern.svg"), 250.0, 90.0);
        common::parse_svg(&app.read_output("key.svg"));
    }
}

#[test]
fn test_all_variants_written() {
    let app = TestApp::with_config(AppConfig {
        variants: vec![
            PatternVariant::Color,
            PatternVariant::ColorSymbols,
            PatternVariant::Monochrome,
        ],
        center_marks: true,
        ..Default::default()
    });
    let image = fixtures::stripes(20, 20, &[threads::BLACK, threads::RED]);
    let image = app.write_file("stripes.png", &fixtures::png_bytes(&image));

    app.run(&image, 2, "kmeans", 20).unwrap();

    assert_eq!(
        app.output_files(),
        vec!["black_white.svg", "color_with_symbol.svg", "key.svg", "pattern.svg"]
    );

    let color = app.read_output("pattern.svg");
    assert_eq!(common::count(&color, "class=\"glyph\""), 0);

    let symbols = app.read_output("color_with_symbol.svg");
    assert_eq!(common::count(&symbols, "class=\"glyph\""), 400);

    let mono = app.read_output("black_white.svg");
    assert!(common::cell_fills(&mono).iter().all(|f| f == "rgb(255,255,255)"));

    for doc in [&color, &symbols, &mono] {
        common::assert_svg_size(doc, 210.0, 210.0);
        // One gridline each way at 10 cells
        assert_eq!(common::count(doc, "<line"), 2);
        // Two centre arrows
        assert_eq!(common::count(doc, "<path d="), 2);
    }
}

#[test]
fn test_existing_files_are_overwritten() {
    let app = TestApp::new();
    std::fs::create_dir_all(app.output_dir()).unwrap();
    std::fs::write(app.output_dir().join("pattern.svg"), "stale").unwrap();
    std::fs::write(app.output_dir().join("key.svg"), "stale").unwrap();

    let image = app.write_file("red.png", &fixtures::png_bytes(&fixtures::solid(4, 4, threads::RED)));
    app.run(&image, 1, "kmeans", 4).unwrap();

    assert!(app.read_output("pattern.svg").starts_with("<svg"));
    assert!(app.read_output("key.svg").starts_with("<svg"));
    assert_eq!(app.output_files(), vec!["key.svg", "pattern.svg"]);
}

#[test]
fn test_unsupported_method_writes_nothing() {
    let app = TestApp::new();
    let image = app.write_file("red.png", &fixtures::png_bytes(&fixtures::solid(2, 2, threads::RED)));

    let err = app.run(&image, 2, "dbscan", 2).unwrap_err();

    assert!(matches!(err, AppError::UnsupportedMethod(ref m) if m == "dbscan"));
    assert!(!app.output_dir().exists());
}

#[test]
fn test_zero_counts_are_config_errors() {
    let app = TestApp::new();
    let image = app.write_file("red.png", &fixtures::png_bytes(&fixtures::solid(2, 2, threads::RED)));

    assert!(matches!(app.run(&image, 0, "kmeans", 2), Err(AppError::Config(_))));
    assert!(matches!(app.run(&image, 2, "kmeans", 0), Err(AppError::Config(_))));
    assert!(!app.output_dir().exists());
}

#[test]
fn test_unreadable_image_writes_nothing() {
    let app = TestApp::new();
    let image = app.write_file("broken.png", b"definitely not a png");

    let err = app.run(&image, 2, "kmeans", 10).unwrap_err();

    assert!(matches!(err, AppError::ImageLoad(_)));
    assert!(!app.output_dir().exists());
}

#[test]
fn test_rendering_is_deterministic() {
    let image = fixtures::stripes(30, 15, &[threads::BLACK, threads::RED, threads::BLUE]);

    let first = TestApp::new();
    let path = first.write_file("stripes.png", &fixtures::png_bytes(&image));
    first.run(&path, 3, "kmeans", 15).unwrap();

    let second = TestApp::new();
    let path = second.write_file("stripes.png", &fixtures::png_bytes(&image));
    second.run(&path, 3, "kmeans", 15).unwrap();

    assert_eq!(first.read_output("pattern.svg"), second.read_output("pattern.svg"));
    assert_eq!(first.read_output("key.svg"), second.read_output("key.svg"));
}
