// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Tests to ensure there is no stderr output for successful commands.

use tempfile::TempDir;

use crate::{get_cmd_output, satrfi, scan_args, write_iss_catalog};

#[test]
fn test_scan_no_stderr() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let catalog = write_iss_catalog(tmp_dir.path());
    let out_dir = tmp_dir.path().join("out");

    let cmd = satrfi().args(scan_args(&catalog, &out_dir)).ok();
    assert!(
        cmd.is_ok(),
        "scan failed on simple test data: {}",
        cmd.err().unwrap()
    );
    let (_, stderr) = get_cmd_output(cmd);
    assert!(stderr.is_empty(), "stderr wasn't empty: {stderr}");
}

#[test]
fn test_beam_no_stderr() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let output = tmp_dir.path().join("gains.tsv");

    #[rustfmt::skip]
    let cmd = satrfi()
        .args([
            "beam",
            "--dish-diameter", "12",
            "--freq", "1.42GHz",
            "--output", &output.display().to_string(),
        ])
        .ok();
    assert!(cmd.is_ok(), "beam failed: {}", cmd.err().unwrap());
    let (_, stderr) = get_cmd_output(cmd);
    assert!(stderr.is_empty(), "stderr wasn't empty: {stderr}");
}
