// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::io::Write;

use tempfile::TempDir;

use crate::{get_cmd_output, satrfi, scan_args, write_iss_catalog};

#[test]
fn test_scan_writes_outputs() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let catalog = write_iss_catalog(tmp_dir.path());
    let out_dir = tmp_dir.path().join("out");

    let cmd = satrfi().args(scan_args(&catalog, &out_dir)).ok();
    assert!(cmd.is_ok(), "scan failed: {}", cmd.err().unwrap());
    let (stdout, _) = get_cmd_output(cmd);
    assert!(stdout.contains("Wrote"), "{stdout}");

    for suffix in ["track.csv", "events.csv", "windows.csv"] {
        let file = out_dir.join(format!("test_{suffix}"));
        assert!(file.exists(), "{} wasn't written", file.display());
    }
    assert!(!out_dir.join("test_tracks.png").exists());

    let track = std::fs::read_to_string(out_dir.join("test_track.csv")).unwrap();
    let mut lines = track.lines();
    assert_eq!(
        lines.next(),
        Some("Time,Object,Altitude,Azimuth,Angular Separation")
    );
    assert_eq!(lines.filter(|l| l.contains(",Target,")).count(), 6);

    let events = std::fs::read_to_string(out_dir.join("test_events.csv")).unwrap();
    assert!(events.lines().next().is_some());
}

#[test]
fn test_scan_dry_run() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let catalog = write_iss_catalog(tmp_dir.path());
    let out_dir = tmp_dir.path().join("out");

    let cmd = satrfi()
        .args(scan_args(&catalog, &out_dir))
        .arg("--dry-run")
        .ok();
    assert!(cmd.is_ok(), "scan --dry-run failed: {}", cmd.err().unwrap());
    assert!(!out_dir.exists());
}

#[test]
fn test_scan_save_toml_then_reuse() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let catalog = write_iss_catalog(tmp_dir.path());
    let out_dir = tmp_dir.path().join("out");
    let toml = tmp_dir.path().join("args.toml");

    let cmd = satrfi()
        .args(scan_args(&catalog, &out_dir))
        .args(["--dry-run", "--save-toml", &toml.display().to_string()])
        .ok();
    assert!(cmd.is_ok(), "{}", cmd.err().unwrap());
    assert!(toml.exists());

    // The saved arguments are enough to run the scan again.
    let cmd = satrfi()
        .args(["scan", &toml.display().to_string(), "--no-progress-bars"])
        .ok();
    assert!(cmd.is_ok(), "scan from arg file failed: {}", cmd.err().unwrap());
    assert!(out_dir.join("test_track.csv").exists());
}

#[test]
fn test_scan_fixed_angle_from_json_arg_file() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let catalog = write_iss_catalog(tmp_dir.path());
    let out_dir = tmp_dir.path().join("out");
    let json = tmp_dir.path().join("args.json");
    let mut f = std::fs::File::create(&json).unwrap();
    write!(
        f,
        r#"{{
    "scan": {{
        "catalog": "{}",
        "target": "cygnus-a",
        "observer": "hcro",
        "start": "2020-07-12 21:00:00",
        "duration": "30s",
        "time_res": "10s",
        "policy": "fixed-angle",
        "threshold": 2.0,
        "output_dir": "{}",
        "output_prefix": "json",
        "no_plots": true
    }}
}}"#,
        catalog.display(),
        out_dir.display()
    )
    .unwrap();
    drop(f);

    let cmd = satrfi()
        .args(["scan", &json.display().to_string(), "--no-progress-bars"])
        .ok();
    assert!(cmd.is_ok(), "{}", cmd.err().unwrap());
    assert!(out_dir.join("json_windows.csv").exists());
}

#[test]
fn test_scan_bad_target() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let catalog = write_iss_catalog(tmp_dir.path());
    let out_dir = tmp_dir.path().join("out");
    let mut args = scan_args(&catalog, &out_dir);
    let i = args.iter().position(|a| a == "cygnus-a").unwrap();
    args[i] = "andromeda".to_string();

    let cmd = satrfi().args(args).ok();
    assert!(cmd.is_err());
    let (_, stderr) = get_cmd_output(cmd);
    assert!(stderr.starts_with("Error:"), "{stderr}");
    assert!(!out_dir.exists());
}

#[test]
fn test_scan_without_start_fails() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let catalog = write_iss_catalog(tmp_dir.path());

    #[rustfmt::skip]
    let cmd = satrfi()
        .args([
            "scan",
            "--catalog", &catalog.display().to_string(),
            "--target", "cygnus-a",
            "--no-progress-bars",
        ])
        .ok();
    assert!(cmd.is_err());
    let (_, stderr) = get_cmd_output(cmd);
    assert!(stderr.contains("Error:"), "{stderr}");
}

#[test]
fn test_scan_missing_catalog_file() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let out_dir = tmp_dir.path().join("out");
    let catalog = tmp_dir.path().join("does_not_exist.tle");

    let cmd = satrfi().args(scan_args(&catalog, &out_dir)).ok();
    assert!(cmd.is_err());
    let (_, stderr) = get_cmd_output(cmd);
    assert!(stderr.contains("Error:"), "{stderr}");
}
