// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use approx::assert_abs_diff_eq;
use tempfile::TempDir;

use crate::{get_cmd_output, satrfi};

#[test]
fn test_beam_airy() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let output = tmp_dir.path().join("gains.tsv");

    #[rustfmt::skip]
    let cmd = satrfi()
        .args([
            "beam",
            "--first-null", "2",
            "--max-separation", "4",
            "--step", "0.5",
            "--output", &output.display().to_string(),
        ])
        .ok();
    assert!(cmd.is_ok(), "beam failed: {}", cmd.err().unwrap());

    let text = std::fs::read_to_string(&output).unwrap();
    let rows: Vec<Vec<f64>> = text
        .lines()
        .map(|l| l.split('\t').map(|v| v.parse().unwrap()).collect())
        .collect();
    assert_eq!(rows.len(), 9);
    assert_abs_diff_eq!(rows[0][1], 1.0);
    // The gain at the first null is ~0, and the gain falls off from boresight.
    assert!(rows[4][1] < 1e-6);
    assert!(rows[1][1] < rows[0][1]);
    assert!(rows[2][1] < rows[1][1]);
}

#[test]
fn test_beam_gaussian() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let output = tmp_dir.path().join("gains.tsv");

    #[rustfmt::skip]
    let cmd = satrfi()
        .args([
            "beam",
            "--gain-model", "gaussian",
            "--fwhm", "2",
            "--max-separation", "1",
            "--step", "1",
            "--output", &output.display().to_string(),
        ])
        .ok();
    assert!(cmd.is_ok(), "beam failed: {}", cmd.err().unwrap());

    let text = std::fs::read_to_string(&output).unwrap();
    let last: Vec<f64> = text
        .lines()
        .last()
        .unwrap()
        .split('\t')
        .map(|v| v.parse().unwrap())
        .collect();
    // Half power at half the FWHM.
    assert_abs_diff_eq!(last[1], 0.5, epsilon = 1e-9);
    assert_abs_diff_eq!(last[2], -3.010, epsilon = 1e-3);
}

#[test]
fn test_beam_bad_model() {
    let cmd = satrfi().args(["beam", "--gain-model", "cosine"]).ok();
    assert!(cmd.is_err());
    let (_, stderr) = get_cmd_output(cmd);
    assert!(stderr.contains("Error:"), "{stderr}");
}
