// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use tempfile::TempDir;

use crate::{get_cmd_output, satrfi, scan_args, write_iss_catalog};

#[test]
fn test_window_stats_on_scan_output() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let catalog = write_iss_catalog(tmp_dir.path());
    let out_dir = tmp_dir.path().join("out");
    let cmd = satrfi().args(scan_args(&catalog, &out_dir)).ok();
    assert!(cmd.is_ok(), "scan failed: {}", cmd.err().unwrap());

    let windows = tmp_dir.path().join("windows.txt");
    std::fs::write(
        &windows,
        "# start,end\n21:00:00,21:00:30\n2020-07-12 21:00:30,2020-07-12 21:01:00\n",
    )
    .unwrap();
    let stats = tmp_dir.path().join("stats.csv");

    #[rustfmt::skip]
    let cmd = satrfi()
        .args([
            "window-stats",
            &out_dir.join("test_track.csv").display().to_string(),
            "--windows", &windows.display().to_string(),
            "--date", "2020-07-12",
            "--output", &stats.display().to_string(),
            "--no-progress-bars",
        ])
        .ok();
    assert!(cmd.is_ok(), "window-stats failed: {}", cmd.err().unwrap());

    let text = std::fs::read_to_string(&stats).unwrap();
    // A header and one line per window.
    assert_eq!(text.lines().count(), 3);
}

#[test]
fn test_window_stats_needs_a_date_for_times_of_day() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let track = tmp_dir.path().join("track.csv");
    std::fs::write(
        &track,
        "Time,Object,Altitude,Azimuth,Angular Separation\n2020-07-12 21:00:00,Target,40.0,300.0,0.0\n",
    )
    .unwrap();
    let windows = tmp_dir.path().join("windows.txt");
    std::fs::write(&windows, "21:00:00,21:00:30\n").unwrap();

    #[rustfmt::skip]
    let cmd = satrfi()
        .args([
            "window-stats",
            &track.display().to_string(),
            "--windows", &windows.display().to_string(),
            "--output", &tmp_dir.path().join("stats.csv").display().to_string(),
        ])
        .ok();
    assert!(cmd.is_err());
    let (_, stderr) = get_cmd_output(cmd);
    assert!(stderr.contains("Error:"), "{stderr}");
}
