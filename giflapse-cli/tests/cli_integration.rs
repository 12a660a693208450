use assert_cmd::Command;
use predicates::str::contains;
use std::error::Error;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

// Helper function to get the path to the compiled binary
fn giflapse_cmd() -> Command {
    Command::cargo_bin("giflapse").expect("Failed to find giflapse binary")
}

fn create_dummy_file(dir: &Path, filename: &str) -> PathBuf {
    let path = dir.join(filename);
    std::fs::write(&path, "dummy content").expect("Failed to create dummy file");
    path
}

#[test]
fn test_help_exits_zero() {
    giflapse_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(contains("--output-dir"))
        .stdout(contains("--overwrite"));
}

#[test]
fn test_version_exits_zero() {
    giflapse_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_missing_input_argument_exits_one() {
    giflapse_cmd().assert().code(1);
}

#[test]
fn test_unparseable_option_exits_one() {
    giflapse_cmd()
        .args(["clip.mp4", "--fps", "fast"])
        .assert()
        .code(1);
}

#[test]
fn test_unsupported_extension() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    let input = create_dummy_file(dir.path(), "clip.avi");

    giflapse_cmd()
        .arg(&input)
        .assert()
        .code(1)
        .stderr(contains("Error:"))
        .stderr(contains("Unsupported input format"));
    Ok(())
}

#[test]
fn test_non_existent_input() {
    giflapse_cmd()
        .arg("surely/this/does/not/exist/input.mp4")
        .assert()
        .code(1)
        .stderr(contains("Input file not found"));
}

#[test]
fn test_fps_out_of_range() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    let input = create_dummy_file(dir.path(), "clip.mp4");

    for fps in ["0", "61"] {
        giflapse_cmd()
            .arg(&input)
            .args(["--fps", fps])
            .assert()
            .code(1)
            .stderr(contains("--fps must be between 1 and 60"));
    }
    Ok(())
}

#[test]
fn test_non_positive_duration() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    let input = create_dummy_file(dir.path(), "clip.mp4");

    giflapse_cmd()
        .arg(&input)
        .args(["--duration", "0"])
        .assert()
        .code(1)
        .stderr(contains("--duration must be a number greater than 0"));
    Ok(())
}

#[test]
fn test_zero_width() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    let input = create_dummy_file(dir.path(), "clip.mp4");

    giflapse_cmd()
        .arg(&input)
        .args(["--width", "0"])
        .assert()
        .code(1)
        .stderr(contains("--width must be greater than 0"));
    Ok(())
}

#[test]
fn test_unknown_quality() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    let input = create_dummy_file(dir.path(), "clip.mp4");

    giflapse_cmd()
        .arg(&input)
        .args(["--quality", "ultra"])
        .assert()
        .code(1)
        .stderr(contains("Unknown quality preset 'ultra'"));
    Ok(())
}

#[test]
fn test_invalid_start() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    let input = create_dummy_file(dir.path(), "clip.mp4");

    giflapse_cmd()
        .arg(&input)
        .args(["--start", "1:2:3:4"])
        .assert()
        .code(1)
        .stderr(contains("Invalid time format"));

    giflapse_cmd()
        .arg(&input)
        .args(["--start=-1:30"])
        .assert()
        .code(1)
        .stderr(contains("cannot be negative"));

    giflapse_cmd()
        .arg(&input)
        .args(["--start", "-1:30"])
        .assert()
        .code(1)
        .stderr(contains("Time cannot be negative: '-1:30'"));
    Ok(())
}

#[test]
fn test_existing_output_without_overwrite() -> Result<(), Box<dyn Error>> {
    let input_dir = tempdir()?;
    let output_dir = tempdir()?;
    let input = create_dummy_file(input_dir.path(), "clip.MOV");
    create_dummy_file(output_dir.path(), "preview.gif");

    giflapse_cmd()
        .arg(&input)
        .arg("--output-dir")
        .arg(output_dir.path())
        .args(["--name", "preview"])
        .assert()
        .code(1)
        .stderr(contains("Output file already exists"))
        .stderr(contains("--overwrite"));

    assert_eq!(
        std::fs::read_to_string(output_dir.path().join("preview.gif"))?,
        "dummy content"
    );
    Ok(())
}
