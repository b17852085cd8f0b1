// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Integration tests.
//!
//! Some help for laying out these tests was taken from:
//! https://matklad.github.io/2021/02/27/delete-cargo-integration-tests.html

mod beam;
mod no_stderr;
mod scan;
mod window_stats;

use std::{
    fs::File,
    io::Write,
    path::{Path, PathBuf},
    process::Output,
    str::from_utf8,
};

use assert_cmd::{output::OutputError, Command};

/// The ISS on 2020-07-12.
const ISS_3LE: &str = "ISS (ZARYA)
1 25544U 98067A   20194.88612269 -.00002218  00000-0 -31515-4 0  9992
2 25544  51.6461 221.2784 0001413  89.1723 280.4612 15.49507896236008
";

fn satrfi() -> Command {
    Command::cargo_bin("satrfi").unwrap()
}

fn get_cmd_output(result: Result<Output, OutputError>) -> (String, String) {
    let output = match result {
        Ok(o) => o,
        Err(o) => o.as_output().unwrap().clone(),
    };
    (
        from_utf8(&output.stdout).unwrap().to_string(),
        from_utf8(&output.stderr).unwrap().to_string(),
    )
}

/// Write a single-satellite TLE catalog into the directory.
fn write_iss_catalog(tmp_dir: &Path) -> PathBuf {
    let file = tmp_dir.join("iss.tle");
    let mut f = File::create(&file).unwrap();
    f.write_all(ISS_3LE.as_bytes()).unwrap();
    file
}

/// Arguments for a short scan of Cygnus A from HCRO. Outputs are written into
/// `out_dir` with the prefix "test".
fn scan_args(catalog: &Path, out_dir: &Path) -> Vec<String> {
    [
        "scan",
        "--catalog",
        &catalog.display().to_string(),
        "--target",
        "cygnus-a",
        "--observer",
        "hcro",
        "--start",
        "2020-07-12 21:00:00",
        "--duration",
        "60s",
        "--time-res",
        "10s",
        "--output-dir",
        &out_dir.display().to_string(),
        "--output-prefix",
        "test",
        "--no-plots",
        "--no-progress-bars",
    ]
    .into_iter()
    .map(|s| s.to_string())
    .collect()
}

#[test]
fn test_help() {
    let cmd = satrfi().arg("--help").ok();
    assert!(cmd.is_ok(), "{}", cmd.err().unwrap());
    let (stdout, _) = get_cmd_output(cmd);
    assert!(stdout.contains("scan"));
    assert!(stdout.contains("window-stats"));
    assert!(stdout.contains("beam"));
}

#[test]
fn test_no_subcommand_fails() {
    let cmd = satrfi().ok();
    assert!(cmd.is_err());
}
