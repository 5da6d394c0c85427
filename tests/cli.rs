use assert_cmd::prelude::*;
use predicates::str::contains;
use std::io::Write;
use std::process::Command;
use tempfile::NamedTempFile;

fn write_panel(contents: &str) -> NamedTempFile {
    let mut tmp = NamedTempFile::new().expect("temp panel file");
    tmp.write_all(contents.as_bytes()).expect("write panel file");
    tmp
}

#[test]
fn cli_renders_markers_and_prints_frame_summary() {
    let panel = write_panel(
        "DetectionDistance=700\nScreenNumber=0\nPanelNameContains=GPS-Map\n\
         GPS:Base:700:0:0\nGPS:Relay:0:0:-350\nsome unrelated note\n",
    );
    let mut cmd = Command::cargo_bin("gps-radar").expect("binary exists");
    cmd.arg(panel.path()).arg("--no-flush");
    cmd.assert()
        .success()
        .stdout(contains("Loaded 2 waypoints (detection radius 700)"))
        .stdout(contains(" - Base (700.0, 0.0, 0.0)"))
        .stdout(contains("Submitted frame with 10 commands:"))
        .stdout(contains("text 'Base' at (512.0, 220.0)"))
        .stdout(contains("Drew 2 markers (cache flush: false)"));
}

#[test]
fn cli_reports_missing_waypoints_in_frame() {
    let panel = write_panel("DetectionDistance=700\n");
    let mut cmd = Command::cargo_bin("gps-radar").expect("binary exists");
    cmd.arg(panel.path()).arg("--no-flush").arg("--mobile");
    cmd.assert()
        .success()
        .stdout(contains("Loaded 0 waypoints"))
        .stdout(contains("text 'No GPS coordinates in custom data'"))
        .stdout(contains("Drew 0 markers"));
}

#[test]
fn cli_flush_flag_prepends_clear_sprite() {
    let panel = write_panel("GPS:Base:1:2:3\n");
    let mut cmd = Command::cargo_bin("gps-radar").expect("binary exists");
    cmd.arg(panel.path()).arg("--flush");
    cmd.assert()
        .success()
        .stdout(contains("Panel file is missing configuration keys"))
        .stdout(contains("Submitted frame with 8 commands:"))
        .stdout(contains("Drew 1 markers (cache flush: true)"));
}

#[test]
fn cli_rejects_non_positive_detection_radius() {
    let panel = write_panel("DetectionDistance=-5\nGPS:Base:1:2:3\n");
    let mut cmd = Command::cargo_bin("gps-radar").expect("binary exists");
    cmd.arg(panel.path());
    cmd.assert()
        .failure()
        .stderr(contains("detection radius must be positive, got -5"));
}

#[test]
fn cli_rejects_unknown_arguments() {
    let panel = write_panel("GPS:Base:1:2:3\n");
    let mut cmd = Command::cargo_bin("gps-radar").expect("binary exists");
    cmd.arg(panel.path()).arg("--sideways");
    cmd.assert()
        .failure()
        .stderr(contains("Unknown argument: --sideways"));
}
