// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Beam-weighted statistics of the satellites in a track file during
//! user-supplied time windows (e.g. when something odd was seen in the data).

mod error;

pub use error::AnalysisError;

use std::io::Write;

use hifitime::Epoch;
use log::debug;

use crate::{
    beam::GainModel,
    io::{CsvWriteError, TrackRow},
    time::{format_utc, parse_utc},
};

/// An inclusive span of time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeWindow {
    pub start: Epoch,
    pub end: Epoch,
}

impl TimeWindow {
    pub fn contains(&self, t: Epoch) -> bool {
        self.start <= t && t <= self.end
    }
}

/// Parse time windows, one "START,END" pair per line. Blank lines and lines
/// starting with '#' are ignored. If `date` is given (e.g. "2026-01-21"),
/// times may also be given as a time of day only (e.g. "13:02:08").
pub fn parse_time_windows(text: &str, date: Option<&str>) -> Result<Vec<TimeWindow>, AnalysisError> {
    let parse = |line: usize, s: &str| {
        let s = s.trim();
        parse_utc(s)
            .or_else(|err| match date {
                Some(d) => parse_utc(&format!("{} {s}", d.trim())),
                None => Err(err),
            })
            .map_err(|err| AnalysisError::Time { line, err })
    };

    let mut windows = vec![];
    for (i, content) in text.lines().enumerate() {
        let line = i + 1;
        let trimmed = content.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let (start, end) = trimmed
            .split_once(',')
            .ok_or_else(|| AnalysisError::BadWindowLine {
                line,
                content: content.to_string(),
            })?;
        let window = TimeWindow {
            start: parse(line, start)?,
            end: parse(line, end)?,
        };
        if window.end < window.start {
            return Err(AnalysisError::EndBeforeStart { line });
        }
        windows.push(window);
    }

    if windows.is_empty() {
        return Err(AnalysisError::NoWindows);
    }
    Ok(windows)
}

/// Statistics of the satellites seen during a single time window.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowStats {
    /// 1-based.
    pub index: usize,
    pub window: TimeWindow,

    /// The number of satellite rows within the window.
    pub close_sat_count: usize,

    /// The sum of beam weights of all satellite rows; this is the
    /// beam-weighted satellite presence.
    pub beam_weight_sum: f64,

    /// NaN if there are no satellite rows (or all weights are zero).
    pub weighted_mean_separation_deg: f64,

    /// NaN if there are no satellite rows.
    pub mean_separation_deg: f64,

    /// NaN if there are no satellite rows.
    pub min_separation_deg: f64,
}

/// Calculate statistics for each window. Only satellite rows (rows with a
/// separation) are counted; each is weighted by the gain of `beam` at its
/// separation.
pub fn window_stats(
    rows: &[TrackRow],
    windows: &[TimeWindow],
    beam: &dyn GainModel,
) -> Vec<WindowStats> {
    windows
        .iter()
        .enumerate()
        .map(|(i, &window)| {
            let seps: Vec<f64> = rows
                .iter()
                .filter(|r| window.contains(r.time))
                .filter_map(|r| r.separation_deg)
                .collect();
            let weights: Vec<f64> = seps.iter().map(|s| beam.gain(s.to_radians())).collect();
            let beam_weight_sum: f64 = weights.iter().sum();

            let (weighted_mean_separation_deg, mean_separation_deg, min_separation_deg) =
                if seps.is_empty() {
                    (f64::NAN, f64::NAN, f64::NAN)
                } else {
                    let weighted = if beam_weight_sum > 0.0 {
                        seps.iter().zip(&weights).map(|(s, w)| s * w).sum::<f64>()
                            / beam_weight_sum
                    } else {
                        f64::NAN
                    };
                    (
                        weighted,
                        seps.iter().sum::<f64>() / seps.len() as f64,
                        seps.iter().copied().fold(f64::INFINITY, f64::min),
                    )
                };

            debug!(
                "Window {}: {} satellites, beam weight sum {beam_weight_sum:.3}",
                i + 1,
                seps.len()
            );
            WindowStats {
                index: i + 1,
                window,
                close_sat_count: seps.len(),
                beam_weight_sum,
                weighted_mean_separation_deg,
                mean_separation_deg,
                min_separation_deg,
            }
        })
        .collect()
}

/// Write window statistics as CSV.
pub fn write_window_stats_csv<W: Write>(writer: W, stats: &[WindowStats]) -> Result<(), CsvWriteError> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record([
        "window",
        "start",
        "end",
        "close_sat_count",
        "beam_weight_sum",
        "weighted_mean_sep_deg",
        "mean_sep_deg",
        "min_sep_deg",
    ])?;
    for s in stats {
        wtr.write_record(&[
            s.index.to_string(),
            format_utc(s.window.start),
            format_utc(s.window.end),
            s.close_sat_count.to_string(),
            format!("{:.6}", s.beam_weight_sum),
            format!("{:.6}", s.weighted_mean_separation_deg),
            format!("{:.6}", s.mean_separation_deg),
            format!("{:.6}", s.min_separation_deg),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}
