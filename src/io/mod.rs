// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! CSV output (and input) for scan results.
//!
//! Three files can be written:
//! - a "track" file, with the target's position at every timestep followed by
//!   every interfering satellite at that timestep;
//! - an "events" file, with one row per interfering sample;
//! - a "windows" file, with one row per contiguous interference window.
//!
//! Track files can be read back in for [`crate::analysis`].

mod error;
#[cfg(test)]
mod tests;

pub use error::{CsvReadError, CsvWriteError};

use std::{
    fs::File,
    io::{BufReader, Read, Write},
    path::Path,
};

use hifitime::Epoch;
use log::trace;
use serde::Deserialize;

use crate::{
    context::ObservationContext,
    scan::ScanResults,
    time::{format_iso, format_utc, parse_utc},
    windows::InterferenceWindow,
};

pub const TRACK_HEADER: [&str; 5] = ["Time", "Object", "Altitude", "Azimuth", "Angular Separation"];
pub const EVENTS_HEADER: [&str; 7] = [
    "time_utc",
    "satellite",
    "sat_alt_deg",
    "sat_az_deg",
    "target_alt_deg",
    "target_az_deg",
    "angular_sep_deg",
];
pub const WINDOWS_HEADER: [&str; 7] = [
    "satellite",
    "start_utc",
    "end_utc",
    "duration_s",
    "num_samples",
    "max_sat_alt_deg",
    "min_sep_deg",
];

/// The "Object" of target rows in a track file.
pub const TARGET_OBJECT: &str = "Target";

fn deg(v: f64) -> String {
    format!("{v:.6}")
}

/// Write the target's position at every timestep, each followed by the
/// satellites interfering at that timestep. Target rows have a separation of
/// "-".
pub fn write_track_csv<W: Write>(
    writer: W,
    results: &ScanResults,
    context: &ObservationContext,
) -> Result<(), CsvWriteError> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(TRACK_HEADER)?;
    for ((&timestamp, target), inters) in results
        .timestamps
        .iter()
        .zip(results.target_positions.iter())
        .zip(results.intersections.iter())
    {
        let time = format_utc(timestamp);
        wtr.write_record([
            time.as_str(),
            TARGET_OBJECT,
            deg(target.el.to_degrees()).as_str(),
            deg(target.az.to_degrees()).as_str(),
            "-",
        ])?;
        for i in inters {
            wtr.write_record([
                time.as_str(),
                context.satellite_name(i.satellite),
                deg(i.position.el.to_degrees()).as_str(),
                deg(i.position.az.to_degrees()).as_str(),
                deg(i.separation_deg).as_str(),
            ])?;
        }
    }
    wtr.flush()?;
    Ok(())
}

/// Write one row per interfering sample. A "gain_percent" column is added if
/// the scan calculated gains.
pub fn write_events_csv<W: Write>(
    writer: W,
    results: &ScanResults,
    context: &ObservationContext,
) -> Result<(), CsvWriteError> {
    let mut wtr = csv::Writer::from_writer(writer);
    let mut header = EVENTS_HEADER.to_vec();
    if results.has_gains {
        header.push("gain_percent");
    }
    wtr.write_record(&header)?;

    for s in results.samples() {
        let mut record = vec![
            format_iso(s.timestamp),
            context.satellite_name(s.satellite).to_string(),
            deg(s.satellite_pos.el.to_degrees()),
            deg(s.satellite_pos.az.to_degrees()),
            deg(s.target.el.to_degrees()),
            deg(s.target.az.to_degrees()),
            deg(s.separation_deg),
        ];
        if results.has_gains {
            record.push(s.gain.map(|g| format!("{:.6}", g * 100.0)).unwrap_or_default());
        }
        wtr.write_record(&record)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write one row per interference window. A "peak_gain_percent" column is
/// added if `has_gains` is true.
pub fn write_windows_csv<W: Write>(
    writer: W,
    windows: &[InterferenceWindow],
    context: &ObservationContext,
    has_gains: bool,
) -> Result<(), CsvWriteError> {
    let mut wtr = csv::Writer::from_writer(writer);
    let mut header = WINDOWS_HEADER.to_vec();
    if has_gains {
        header.push("peak_gain_percent");
    }
    wtr.write_record(&header)?;

    for w in windows {
        let mut record = vec![
            context.satellite_name(w.satellite).to_string(),
            format_iso(w.start),
            format_iso(w.end),
            format!("{:.3}", w.duration().to_seconds()),
            w.num_samples.to_string(),
            deg(w.max_sat_alt_deg),
            deg(w.min_separation_deg),
        ];
        if has_gains {
            record.push(
                w.peak_gain
                    .map(|g| format!("{:.6}", g * 100.0))
                    .unwrap_or_default(),
            );
        }
        wtr.write_record(&record)?;
    }
    wtr.flush()?;
    Ok(())
}

/// A row of a track file.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackRow {
    pub time: Epoch,
    pub object: String,
    pub altitude_deg: f64,
    pub azimuth_deg: f64,

    /// `None` for target rows.
    pub separation_deg: Option<f64>,
}

impl TrackRow {
    pub fn is_target(&self) -> bool {
        self.object == TARGET_OBJECT
    }
}

#[derive(Deserialize)]
struct RawTrackRow {
    #[serde(rename = "Time")]
    time: String,
    #[serde(rename = "Object")]
    object: String,
    #[serde(rename = "Altitude")]
    altitude: String,
    #[serde(rename = "Azimuth")]
    azimuth: String,
    #[serde(rename = "Angular Separation")]
    separation: String,
}

fn parse_angle(row: usize, value: &str) -> Result<f64, CsvReadError> {
    value.parse().map_err(|_| CsvReadError::BadAngle {
        row,
        value: value.to_string(),
    })
}

/// Read a track file, e.g. one written by [`write_track_csv`]. Separations
/// that are empty or "-" are read as `None`.
pub fn read_track_csv<R: Read>(reader: R) -> Result<Vec<TrackRow>, CsvReadError> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut rows = vec![];
    for (i, raw) in rdr.deserialize::<RawTrackRow>().enumerate() {
        let raw = raw?;
        // Row numbers include the header.
        let row = i + 2;
        let time = parse_utc(&raw.time).map_err(|err| CsvReadError::BadTime { row, err })?;
        let separation_deg = match raw.separation.as_str() {
            "" | "-" => None,
            s => Some(parse_angle(row, s)?),
        };
        rows.push(TrackRow {
            time,
            object: raw.object,
            altitude_deg: parse_angle(row, &raw.altitude)?,
            azimuth_deg: parse_angle(row, &raw.azimuth)?,
            separation_deg,
        });
    }
    trace!("Read {} track rows", rows.len());
    Ok(rows)
}

/// Read a track file from disk.
pub fn read_track_file(path: &Path) -> Result<Vec<TrackRow>, CsvReadError> {
    if !path.exists() {
        return Err(CsvReadError::FileDoesntExist(path.to_path_buf()));
    }
    read_track_csv(BufReader::new(File::open(path)?))
}
