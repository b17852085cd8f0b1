// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use approx::assert_abs_diff_eq;
use hifitime::Duration;
use indoc::indoc;
use marlu::AzEl;
use ndarray::prelude::*;
use tempfile::NamedTempFile;
use vec1::vec1;

use super::*;
use crate::{
    scan::Intersection,
    separation::SeparationMethod,
    target::ObserverPreset,
    tests::iss_satellites,
};

fn context() -> ObservationContext {
    let sats = iss_satellites();
    ObservationContext::new(ObserverPreset::Warkworth.position(), Duration::default(), sats)
}

/// Three timesteps; the ISS interferes at the second one.
fn results(has_gains: bool) -> ScanResults {
    let t0 = Epoch::from_gregorian_utc_hms(2024, 3, 1, 12, 0, 0);
    let target = AzEl::from_degrees(120.0, 30.0);
    let sat = AzEl::from_degrees(121.0, 30.5);
    ScanResults {
        timestamps: vec1![
            t0,
            t0 + Duration::from_seconds(1.0),
            t0 + Duration::from_seconds(2.0)
        ],
        target_positions: vec![target; 3],
        satellite_positions: Array2::from_elem((1, 3), sat),
        intersections: vec![
            vec![],
            vec![Intersection {
                satellite: 0,
                position: sat,
                separation_deg: 0.9,
                gain: has_gains.then_some(0.25),
            }],
            vec![],
        ],
        separation: SeparationMethod::GreatCircle,
        has_gains,
    }
}

#[test]
fn track_csv_layout() {
    let mut buf = vec![];
    write_track_csv(&mut buf, &results(false), &context()).unwrap();
    let text = String::from_utf8(buf).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "Time,Object,Altitude,Azimuth,Angular Separation");
    // One target row per timestamp plus one satellite row.
    assert_eq!(lines.len(), 1 + 3 + 1);
    assert_eq!(
        lines[1],
        "2024-03-01 12:00:00 UTC,Target,30.000000,120.000000,-"
    );
    assert!(lines[2].starts_with("2024-03-01 12:00:01 UTC,Target,"));
    assert_eq!(
        lines[3],
        "2024-03-01 12:00:01 UTC,ISS (ZARYA),30.500000,121.000000,0.900000"
    );
}

#[test]
fn events_csv_layout() {
    let mut buf = vec![];
    write_events_csv(&mut buf, &results(false), &context()).unwrap();
    let text = String::from_utf8(buf).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(
        lines[0],
        "time_utc,satellite,sat_alt_deg,sat_az_deg,target_alt_deg,target_az_deg,angular_sep_deg"
    );
    assert_eq!(lines.len(), 2);
    assert_eq!(
        lines[1],
        "2024-03-01T12:00:01Z,ISS (ZARYA),30.500000,121.000000,30.000000,120.000000,0.900000"
    );

    let mut buf = vec![];
    write_events_csv(&mut buf, &results(true), &context()).unwrap();
    let text = String::from_utf8(buf).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert!(lines[0].ends_with(",angular_sep_deg,gain_percent"));
    assert!(lines[1].ends_with(",0.900000,25.000000"));
}

#[test]
fn windows_csv_layout() {
    let results = results(true);
    let windows = results.windows();
    let mut buf = vec![];
    write_windows_csv(&mut buf, &windows, &context(), true).unwrap();
    let text = String::from_utf8(buf).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(
        lines[0],
        "satellite,start_utc,end_utc,duration_s,num_samples,max_sat_alt_deg,min_sep_deg,peak_gain_percent"
    );
    assert_eq!(
        lines[1],
        "ISS (ZARYA),2024-03-01T12:00:01Z,2024-03-01T12:00:01Z,0.000,1,30.500000,0.900000,25.000000"
    );
}

#[test]
fn track_csv_reads_back() {
    let results = results(false);
    let mut file = NamedTempFile::new().unwrap();
    write_track_csv(&mut file, &results, &context()).unwrap();

    let rows = read_track_file(file.path()).unwrap();
    assert_eq!(rows.len(), 4);
    assert!(rows[0].is_target());
    assert_eq!(rows[0].time, results.timestamps[0]);
    assert!(rows[0].separation_deg.is_none());
    assert_abs_diff_eq!(rows[0].altitude_deg, 30.0);

    assert_eq!(rows[2].object, "ISS (ZARYA)");
    assert!(!rows[2].is_target());
    assert_eq!(rows[2].time, results.timestamps[1]);
    assert_abs_diff_eq!(rows[2].azimuth_deg, 121.0);
    assert_abs_diff_eq!(rows[2].separation_deg.unwrap(), 0.9);
}

#[test]
fn track_csv_bad_rows() {
    let bad_time = indoc! {"
        Time,Object,Altitude,Azimuth,Angular Separation
        tomorrow,Target,30,120,-
    "};
    assert!(matches!(
        read_track_csv(bad_time.as_bytes()),
        Err(CsvReadError::BadTime { row: 2, .. })
    ));

    let bad_angle = indoc! {"
        Time,Object,Altitude,Azimuth,Angular Separation
        2024-03-01 12:00:00 UTC,Target,30,120,-
        2024-03-01 12:00:00 UTC,SAT,high,120,1.0
    "};
    assert!(matches!(
        read_track_csv(bad_angle.as_bytes()),
        Err(CsvReadError::BadAngle { row: 3, .. })
    ));

    assert!(matches!(
        read_track_file(Path::new("/does/not/exist.csv")),
        Err(CsvReadError::FileDoesntExist(_))
    ));
}
