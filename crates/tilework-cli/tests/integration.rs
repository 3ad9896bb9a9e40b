//! Integration tests for tilework CLI commands.
//!
//! These tests run the actual binary and verify end-to-end behavior.

use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};

fn tilework(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_tilework"))
        .args(args)
        .output()
        .expect("Failed to execute command")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

/// A scratch path unique to this test process.
fn scratch(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("tilework-{}-{}", std::process::id(), name))
}

#[test]
fn patterns_command_lists_every_selector() {
    let output = tilework(&["patterns"]);
    assert!(output.status.success());

    let text = stdout(&output);
    for name in ["checkerboard", "eac", "concentricSmith", "triangle", "alternating", "wrap", "cairo", "veins"] {
        assert!(text.contains(name), "Should list '{}'", name);
    }
}

#[test]
fn truchet_command_produces_svg() {
    let output = tilework(&["truchet", "--seed", "7", "--width", "400", "--height", "300"]);
    assert!(output.status.success());

    let svg = stdout(&output);
    assert!(svg.contains("<?xml"), "Should have XML declaration");
    assert!(svg.contains(r#"viewBox="0 0 400 300""#), "Should match the canvas");
    assert!(svg.contains("<path"), "Should have path elements");
    assert!(svg.contains("</svg>"), "Should close SVG element");
}

#[test]
fn truchet_seed_is_reproducible() {
    let args = ["truchet", "--seed", "42", "--tile", "smith", "--width", "500", "--height", "300"];
    let a = stdout(&tilework(&args));
    let b = stdout(&tilework(&args));
    assert_eq!(a, b);
}

#[test]
fn truchet_automaton_json() {
    let output = tilework(&[
        "truchet", "--pattern", "eac", "--rule", "90", "--edge", "wrap", "--tile", "diagonal", "--spacing", "50",
        "--width", "400", "--height", "200", "-f", "json",
    ]);
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).expect("Should be valid JSON");
    assert_eq!(json["width"], 400.0);
    assert_eq!(json["style"], "diagonal");
    // One diagonal per cell: 8 columns x 4 rows.
    assert_eq!(json["paths"].as_array().map(Vec::len), Some(32));
}

#[test]
fn truchet_invalid_tile_name_keeps_the_default() {
    let output = tilework(&["truchet", "--tile", "hexagon", "-f", "json", "--width", "200", "--height", "200"]);
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).expect("Should be valid JSON");
    assert_eq!(json["style"], "concentricSmith");
    assert!(String::from_utf8_lossy(&output.stderr).contains("hexagon"));
}

#[test]
fn truchet_config_file_is_applied() {
    let path = scratch("truchet.yaml");
    fs::write(&path, "grid:\n  width: 300\n  height: 100\n  pattern: checkerboard\ntile:\n  pattern: solid\n").unwrap();

    let output = tilework(&["truchet", "--config", path.to_str().unwrap(), "-f", "json"]);
    fs::remove_file(&path).ok();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).expect("Should be valid JSON");
    assert_eq!(json["height"], 100.0);
    assert_eq!(json["style"], "solid");
}

#[test]
fn voronoi_command_produces_svg() {
    let output = tilework(&["voronoi", "--seed", "3", "--width", "600", "--height", "400"]);
    assert!(output.status.success());

    let svg = stdout(&output);
    assert!(svg.contains(r#"viewBox="0 0 600 400""#));
    assert!(svg.contains(r#"id="seeds""#));
    assert!(svg.contains(r#"id="smooth-cells""#));
}

#[test]
fn voronoi_show_selects_layers() {
    let output = tilework(&[
        "voronoi", "--seed", "3", "--source", "grid", "--width", "400", "--height", "300", "--show", "veins,edges",
    ]);
    assert!(output.status.success());

    let svg = stdout(&output);
    assert!(svg.contains(r#"id="veins""#));
    assert!(svg.contains("<line"));
    assert!(!svg.contains(r#"id="seeds""#));
}

#[test]
fn voronoi_json_lists_cells() {
    let output = tilework(&["voronoi", "--seed", "5", "--source", "grid", "--width", "500", "--height", "400", "-f", "json"]);
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).expect("Should be valid JSON");
    let sites = json["sites"].as_array().expect("sites array").len();
    let cells = json["cells"].as_array().expect("cells array").len();
    assert!(sites > 0);
    assert_eq!(sites, cells);
}

#[test]
fn png_output_is_written() {
    let path = scratch("mosaic.png");
    let output = tilework(&[
        "truchet", "--seed", "1", "--width", "200", "--height", "100", "-f", "png", "-o", path.to_str().unwrap(),
    ]);
    assert!(output.status.success());

    let bytes = fs::read(&path).expect("PNG should exist");
    fs::remove_file(&path).ok();
    assert_eq!(&bytes[1..4], b"PNG");
}

#[test]
fn unknown_command_fails() {
    let output = tilework(&["tessellate"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Unknown command"));
}

#[test]
fn unknown_option_fails() {
    let output = tilework(&["voronoi", "--frobnicate"]);
    assert!(!output.status.success());
}

#[test]
fn missing_config_fails() {
    let output = tilework(&["truchet", "--config", "/nonexistent/tilework.yaml"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("could not read"));
}
