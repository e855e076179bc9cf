use assert_cmd::Command;
use predicates::str::contains;
use std::error::Error;
use tempfile::tempdir;

// Helper function to get the path to the compiled binary
fn spritegen_cmd() -> Command {
    Command::cargo_bin("spritegen").expect("Failed to find spritegen binary")
}

#[test]
fn test_help_lists_subcommands() -> Result<(), Box<dyn Error>> {
    spritegen_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(contains("generate"))
        .stdout(contains("info"));
    Ok(())
}

#[test]
fn test_generate_requires_input_and_output() {
    spritegen_cmd().arg("generate").assert().failure();
}

#[test]
fn test_generate_rejects_wrong_cue_extension() -> Result<(), Box<dyn Error>> {
    let output_dir = tempdir()?;

    // Configuration errors surface before any external tool is touched, so
    // this works without ffmpeg installed.
    spritegen_cmd()
        .arg("generate")
        .arg("--input")
        .arg("fake_input.mp4")
        .arg("--output")
        .arg(output_dir.path())
        .arg("--vtt")
        .arg(output_dir.path().join("out.txt"))
        .assert()
        .failure()
        .stderr(contains("must have a .vtt extension"));

    Ok(())
}

#[test]
fn test_generate_rejects_zero_interval() -> Result<(), Box<dyn Error>> {
    let output_dir = tempdir()?;

    spritegen_cmd()
        .arg("generate")
        .arg("--input")
        .arg("fake_input.mp4")
        .arg("--output")
        .arg(output_dir.path())
        .arg("--interval")
        .arg("0")
        .assert()
        .failure()
        .stderr(contains("sampling interval"));

    Ok(())
}

#[test]
fn test_generate_rejects_zero_grid() -> Result<(), Box<dyn Error>> {
    let output_dir = tempdir()?;

    spritegen_cmd()
        .arg("generate")
        .arg("--input")
        .arg("fake_input.mp4")
        .arg("--output")
        .arg(output_dir.path())
        .arg("--cols")
        .arg("0")
        .assert()
        .failure()
        .stderr(contains("grid dimensions"));

    Ok(())
}

#[test]
fn test_generate_non_existent_input_fails() -> Result<(), Box<dyn Error>> {
    let output_dir = tempdir()?;

    // Without ffmpeg/ffprobe this fails the dependency preflight; with them
    // installed the probe falls back to a zero duration, which single-sheet
    // mode rejects. Either way the run must fail.
    spritegen_cmd()
        .arg("generate")
        .arg("--input")
        .arg("surely/this/does/not/exist/input.mp4")
        .arg("--output")
        .arg(output_dir.path())
        .assert()
        .failure();

    Ok(())
}

#[test]
fn test_info_non_existent_input_fails() {
    spritegen_cmd()
        .arg("info")
        .arg("--input")
        .arg("surely/this/does/not/exist/input.mp4")
        .assert()
        .failure();
}
