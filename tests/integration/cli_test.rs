//! Tests that drive the textimg binary.

use std::fs;

use predicates::prelude::*;

use crate::helpers::textimg;

// ============================================================================
// Rejected input
// ============================================================================

#[test]
fn unsupported_extension_fails_without_creating_a_file() {
    let home = tempfile::tempdir().unwrap();
    let out = home.path().join("out.bmp");

    let output = textimg(home.path())
        .arg("-o")
        .arg(&out)
        .arg("hello")
        .output()
        .unwrap();

    assert!(!output.status.success());
    insta::assert_snapshot!(String::from_utf8_lossy(&output.stderr), @"textimg: '.bmp' is not a supported output format (use .png, .jpg, .jpeg or .gif)");
    assert!(!out.exists());
}

#[test]
fn empty_arguments_are_rejected() {
    let home = tempfile::tempdir().unwrap();
    textimg(home.path())
        .args(["-o", "out.png", ""])
        .current_dir(home.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input text is empty"));
}

#[test]
fn empty_stdin_is_rejected() {
    let home = tempfile::tempdir().unwrap();
    textimg(home.path())
        .args(["-o", "out.png"])
        .current_dir(home.path())
        .write_stdin("\n\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input text is empty"));
}

#[test]
fn invalid_color_is_rejected() {
    let home = tempfile::tempdir().unwrap();
    textimg(home.path())
        .args(["-g", "1,2,3", "-o", "out.png", "hello"])
        .current_dir(home.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Illegal color format: 1,2,3"));
}

#[test]
fn malformed_extended_color_is_a_parse_error() {
    let home = tempfile::tempdir().unwrap();
    textimg(home.path())
        .args(["-o", "out.png", "\x1b[38;3;1mhello"])
        .current_dir(home.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Illegal extended color sequence"));
    assert!(!home.path().join("out.png").exists());
}

#[test]
fn malformed_config_file_is_reported() {
    let home = tempfile::tempdir().unwrap();
    let config = home.path().join("config.toml");
    fs::write(&config, "font_size = \"large\"").unwrap();

    textimg(home.path())
        .arg("--config")
        .arg(&config)
        .args(["-o", "out.png", "hello"])
        .current_dir(home.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid config file"));
}

// ============================================================================
// Informational flags
// ============================================================================

#[test]
fn environments_lists_variables() {
    let home = tempfile::tempdir().unwrap();
    let output = textimg(home.path())
        .env("TEXTIMG_OUTPUT_DIR", "/tmp/images")
        .env("TEXTIMG_EMOJI_DIR", "/opt/emoji")
        .arg("--environments")
        .output()
        .unwrap();

    assert!(output.status.success());
    insta::assert_snapshot!(String::from_utf8_lossy(&output.stdout), @r"
    TEXTIMG_OUTPUT_DIR=/tmp/images
    TEXTIMG_FONT_FILE=
    TEXTIMG_EMOJI_DIR=/opt/emoji
    TEXTIMG_EMOJI_FONT_FILE=
    ");
}

#[test]
fn completions_are_printed() {
    let home = tempfile::tempdir().unwrap();
    textimg(home.path())
        .args(["--completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("textimg"));
}

#[test]
fn version_is_printed() {
    let home = tempfile::tempdir().unwrap();
    textimg(home.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("textimg 0.1.0"));
}

// ============================================================================
// Rendering with the default font
// ============================================================================

#[test]
fn renders_png_and_gif_files() {
    let home = tempfile::tempdir().unwrap();

    textimg(home.path())
        .args(["-o", "still.png", "\x1b[31mRed\x1b[0m"])
        .current_dir(home.path())
        .assert()
        .success();
    let still = image::open(home.path().join("still.png")).unwrap();
    assert_eq!((still.width(), still.height()), (30, 22));

    textimg(home.path())
        .args(["-a", "-o", "anim.gif"])
        .current_dir(home.path())
        .write_stdin("1\n2\n3\n")
        .assert()
        .success();
    assert!(home.path().join("anim.gif").exists());
}

#[test]
fn numbering_keeps_existing_output() {
    let home = tempfile::tempdir().unwrap();
    fs::write(home.path().join("t.png"), b"keep").unwrap();

    textimg(home.path())
        .env("TEXTIMG_OUTPUT_DIR", home.path())
        .args(["-s", "-n", "hello"])
        .assert()
        .success();

    assert_eq!(fs::read(home.path().join("t.png")).unwrap(), b"keep");
    assert!(home.path().join("t_2.png").exists());
}
