//! Command line behaviour of the crossstitch binary.

mod common;

use std::process::Command;

use common::{fixtures, fixtures::threads, TestApp};
use pretty_assertions::assert_eq;

fn crossstitch() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_crossstitch"));
    cmd.env_remove("CONFIG_FILE").env("RUST_LOG", "off");
    cmd
}

#[test]
fn test_no_subcommand_prints_usage() {
    let output = crossstitch().output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("crossstitch pattern <IMAGE> <COLORS> <METHOD> <COUNT>"));
}

#[test]
fn test_missing_arguments_exit_cleanly() {
    let output = crossstitch().args(["pattern", "cat.png"]).output().unwrap();
    assert!(output.status.success());
}

#[test]
fn test_pattern_command_writes_documents() {
    let app = TestApp::new();
    let image = app.write_file("red.png", &fixtures::png_bytes(&fixtures::solid(4, 4, threads::RED)));

    let output = crossstitch()
        .arg("pattern")
        .arg(&image)
        .args(["1", "kmeans", "4", "--variant", "monochrome", "--output-dir"])
        .arg(app.output_dir())
        .output()
        .unwrap();

    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    assert_eq!(app.output_files(), vec!["black_white.svg", "key.svg"]);
}

#[test]
fn test_unsupported_method_fails() {
    let app = TestApp::new();
    let image = app.write_file("red.png", &fixtures::png_bytes(&fixtures::solid(4, 4, threads::RED)));

    let output = crossstitch()
        .arg("pattern")
        .arg(&image)
        .args(["2", "dbscan", "4", "--output-dir"])
        .arg(app.output_dir())
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Unsupported quantization method"));
    assert!(!app.output_dir().exists());
}

#[test]
fn test_zero_colors_fails() {
    let output = crossstitch()
        .args(["pattern", "cat.png", "0", "kmeans", "10"])
        .output()
        .unwrap();
    assert!(!output.status.success());
}

#[test]
fn test_lookup_prints_nearest_thread() {
    let output = crossstitch().args(["lookup", "#c72b3b"]).output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("321  Red"), "{stdout}");
}
