// End-to-end tests for the `imgtag` binary.
// Run with: cargo test -p imgtag-cli --test run_tests -- --nocapture
//
// Each test runs the binary inside its own temp directory. Stdin is closed by
// `Command::output`, so the exit pause returns immediately.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use tempfile::tempdir;

fn imgtag(dir: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_imgtag"))
        .current_dir(dir)
        .env_remove("RUST_LOG")
        .output()
        .expect("run imgtag")
}

fn stdout_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

// ---------------------------------------------------------------------------
// Success path
// ---------------------------------------------------------------------------

#[test]
fn retags_and_replaces_input() {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join("images.txt"),
        "folder1,photo123,oldtag\n\"folder2\",\"catpic\",\"oldtag\"\nfolder3,onlyname\n",
    )
    .unwrap();

    let output = imgtag(dir.path());
    assert!(
        output.status.success(),
        "exit: {:?}\nstdout: {}",
        output.status,
        stdout_of(&output)
    );

    assert!(!dir.path().join("images.txt").exists(), "input should be removed");
    assert!(!dir.path().join("images_temp.csv").exists(), "temp should be renamed away");

    let csv = fs::read_to_string(dir.path().join("images.csv")).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines, [
        r#""folder","name","tags""#,
        r#""folder1","photo123","folder1 forsale""#,
        r#""folder2","catpic","folder2 sold""#,
    ]);

    let stdout = stdout_of(&output);
    assert!(stdout.contains("Skipping malformed row"), "skip should be reported");
    assert!(stdout.contains("Found 2 valid rows."));
    assert!(stdout.contains("images.csv has been created."));
    assert!(stdout.contains("Press Enter to finish..."));
}

#[test]
fn replaces_stale_output() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("images.txt"), "prints,lake7,x\n").unwrap();
    fs::write(dir.path().join("images.csv"), "stale").unwrap();

    let output = imgtag(dir.path());
    assert!(output.status.success());

    let csv = fs::read_to_string(dir.path().join("images.csv")).unwrap();
    assert!(!csv.contains("stale"));
    assert!(csv.contains(r#""prints","lake7","prints forsale""#));
}

#[test]
fn output_row_count_matches_well_formed_rows() {
    let dir = tempdir().unwrap();
    let mut input = String::new();
    for i in 0..50 {
        if i % 5 == 0 {
            input.push_str(&format!("bad{i}\n"));
        } else {
            input.push_str(&format!("f{i},name{i},t\n"));
        }
    }
    fs::write(dir.path().join("images.txt"), input).unwrap();

    let output = imgtag(dir.path());
    assert!(output.status.success());

    let csv = fs::read_to_string(dir.path().join("images.csv")).unwrap();
    assert_eq!(csv.lines().count(), 1 + 40);
    assert!(stdout_of(&output).contains("Skipped 10 malformed row(s)."));
}

// ---------------------------------------------------------------------------
// Failure paths
// ---------------------------------------------------------------------------

#[test]
fn missing_input_exits_one() {
    let dir = tempdir().unwrap();

    let output = imgtag(dir.path());
    assert_eq!(output.status.code(), Some(1));

    let stdout = stdout_of(&output);
    assert!(stdout.contains("Error: The file 'images.txt' was not found."), "stdout: {stdout}");
    assert!(stdout.contains("Press Enter to exit..."));
    assert!(!dir.path().join("images.csv").exists());
    assert!(!dir.path().join("images_temp.csv").exists());
}

#[test]
fn undecodable_input_exits_one_and_keeps_input() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("images.txt"), b"\xff\xfe,x1,y\n").unwrap();

    let output = imgtag(dir.path());
    assert_eq!(output.status.code(), Some(1));
    assert!(stdout_of(&output).contains("An error occurred while reading the file"));
    assert!(dir.path().join("images.txt").exists());
    assert!(!dir.path().join("images_temp.csv").exists());
}

#[test]
fn replacement_failure_reports_recovery_file() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("images.txt"), "a,b,c\n").unwrap();
    // A directory squatting on the output path makes the swap fail.
    fs::create_dir(dir.path().join("images.csv")).unwrap();

    let output = imgtag(dir.path());
    assert_eq!(output.status.code(), Some(1));

    let stdout = stdout_of(&output);
    assert!(stdout.contains("An error occurred while replacing the original file"));
    assert!(stdout.contains("The processed data is still available in images_temp.csv."));
    assert!(dir.path().join("images_temp.csv").exists());
}
