//! Integration tests for the md2guide binary.

use std::fs;
use std::path::Path;
use std::process::Command;

fn run(args: &[&str], cwd: &Path) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_md2guide"))
        .args(args)
        .current_dir(cwd)
        .output()
        .expect("Failed to run md2guide")
}

#[test]
fn test_converts_directory_to_guide() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("main.md"),
        "# API Guide\n\nStart with [the intro](guide://intro).\n",
    )
    .unwrap();
    fs::write(
        dir.path().join("intro.md"),
        "# Introduction\n\nHello.\n",
    )
    .unwrap();

    let out = dir.path().join("api.guide");
    let output = run(&[".", "-o", "api.guide"], dir.path());
    assert!(output.status.success(), "stderr: {:?}", output.stderr);

    let text = String::from_utf8(fs::read(&out).unwrap()).unwrap();
    assert!(text.starts_with("@DATABASE\n@TOC TOC\n"));
    assert!(text.contains("@NODE MAIN \"API Guide\""));
    assert!(text.contains("@NODE INTRO \"Introduction\""));
    assert!(text.contains("@{\"the intro\" LINK INTRO}"));
    // "API Guide" sorts first in the TOC and starts with 'A', which the
    // letter tracker treats as already seen.
    assert!(!text.contains("@{b}A@{ub}"));
    assert!(text.contains("@{b}I@{ub}"));
}

#[test]
fn test_multiple_outputs_get_identical_bytes() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("main.md"), "# Top\n\nBody.\n").unwrap();

    let output = run(&[".", "-o", "one.guide", "-o", "two.guide"], dir.path());
    assert!(output.status.success(), "stderr: {:?}", output.stderr);

    let one = fs::read(dir.path().join("one.guide")).unwrap();
    let two = fs::read(dir.path().join("two.guide")).unwrap();
    assert!(!one.is_empty());
    assert_eq!(one, two);
}

#[test]
fn test_output_paths_from_config_file() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("main.md"), "# Top\n\nBody.\n").unwrap();
    fs::write(
        dir.path().join("_md2guide.toml"),
        "[output]\npaths = [\"configured.guide\"]\n",
    )
    .unwrap();

    let output = run(&["."], dir.path());
    assert!(output.status.success(), "stderr: {:?}", output.stderr);
    assert!(dir.path().join("configured.guide").exists());
}

#[test]
fn test_single_file_input() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("notes.md"), "# Notes\n\nText.\n").unwrap();

    let output = run(&["notes.md", "-o", "notes.guide"], dir.path());
    assert!(output.status.success(), "stderr: {:?}", output.stderr);

    let text = String::from_utf8(fs::read(dir.path().join("notes.guide")).unwrap()).unwrap();
    // A lone content file still yields the MAIN and TOC scaffolding.
    assert!(text.contains("@NODE MAIN \"Main\""));
    assert!(text.contains("@NODE NOTES \"Notes\""));
}

#[test]
fn test_missing_output_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("main.md"), "# Top\n").unwrap();

    let output = run(&["."], dir.path());
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("no output path"));
}

#[test]
fn test_missing_input_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let output = run(&["absent", "-o", "x.guide"], dir.path());
    assert!(!output.status.success());
}
