use assert_cmd::prelude::*;
use assert_fs::prelude::*;
use predicates::prelude::*;
use std::process::Command;

#[test]
fn points_command_planar_grid() {
    let output = Command::cargo_bin("survey_grid_cli")
        .unwrap()
        .args(["--planar", "points", "--extent=-25,-25,25,25"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 25);
    assert_eq!(lines[0], "-20.000,-20.000");
    assert!(lines.contains(&"0.000,0.000"));
    assert_eq!(lines[24], "20.000,20.000");
}

#[test]
fn points_command_respects_budget() {
    Command::cargo_bin("survey_grid_cli")
        .unwrap()
        .args([
            "--planar",
            "points",
            "--extent=-500,-500,500,500",
            "--max-points",
            "4",
        ])
        .assert()
        .success()
        .stdout(predicate::function(|out: &str| out.lines().count() == 25))
        .stdout(predicate::str::contains("-250.000,0.000"))
        .stdout(predicate::str::contains("250.000,500.000"));
}

#[test]
fn points_command_writes_geojson() {
    let dir = assert_fs::TempDir::new().unwrap();
    let output = dir.child("grid.geojson");

    Command::cargo_bin("survey_grid_cli")
        .unwrap()
        .args([
            "--planar",
            "points",
            "--extent=0,0,20,20",
            "--geojson",
            output.path().to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote 9 points"));

    output.assert(predicate::str::contains("MultiPoint"));
    dir.close().unwrap();
}

#[test]
fn describe_command_reports_factors() {
    Command::cargo_bin("survey_grid_cli")
        .unwrap()
        .args(["--planar", "describe", "--origin", "0,0", "--anchor", "3,4"])
        .assert()
        .success()
        .stdout(predicate::str::contains("rise: 0.800000"))
        .stdout(predicate::str::contains("run: 0.600000"));
}

#[test]
fn describe_command_degenerate_anchor() {
    Command::cargo_bin("survey_grid_cli")
        .unwrap()
        .args(["--planar", "describe", "--origin", "1,1", "--anchor", "1,1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Grid not renderable"));
}

#[test]
fn snap_command() {
    Command::cargo_bin("survey_grid_cli")
        .unwrap()
        .args(["--planar", "snap", "14", "-26"])
        .assert()
        .success()
        .stdout(predicate::str::contains("10.000,-30.000"));
}

#[test]
fn init_config_then_use_it() {
    let dir = assert_fs::TempDir::new().unwrap();
    let config = dir.child("grid.json");

    Command::cargo_bin("survey_grid_cli")
        .unwrap()
        .args(["init-config", config.path().to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote default options"));

    config.assert(predicate::str::contains("max_points_per_side"));

    Command::cargo_bin("survey_grid_cli")
        .unwrap()
        .args([
            "--planar",
            "points",
            "--config",
            config.path().to_str().unwrap(),
            "--x-size",
            "5",
            "--extent=0,0,10,0",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("5.000,0.000"));
    dir.close().unwrap();
}

#[cfg(not(feature = "proj"))]
#[test]
fn unsupported_projection_fails() {
    Command::cargo_bin("survey_grid_cli")
        .unwrap()
        .args(["--crs", "EPSG:27700", "points", "--extent=0,0,100,100"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("projection error"));
}

#[cfg(feature = "proj")]
#[test]
fn proj_handles_utm_views() {
    Command::cargo_bin("survey_grid_cli")
        .unwrap()
        .args([
            "--crs",
            "EPSG:32612",
            "points",
            "--origin",
            "500000,5900000",
            "--extent=499975,5899975,500025,5900025",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("500000.000,5900000.000"));
}

#[test]
fn crs_flag_accepts_web_mercator_aliases() {
    Command::cargo_bin("survey_grid_cli")
        .unwrap()
        .args(["--crs", "EPSG:900913", "snap", "14", "-26"])
        .assert()
        .success()
        .stdout(predicate::str::contains(","));
}

#[test]
fn empty_crs_is_rejected() {
    Command::cargo_bin("survey_grid_cli")
        .unwrap()
        .args(["--crs", " ", "describe"])
        .assert()
        .failure();
}

#[test]
fn inverted_extent_is_rejected() {
    Command::cargo_bin("survey_grid_cli")
        .unwrap()
        .args(["--planar", "points", "--extent=10,10,0,0"])
        .assert()
        .failure();
}
