// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Grouping flagged samples into contiguous interference windows.

use hifitime::{Duration, Epoch};
use itertools::Itertools;

use crate::scan::Sample;

/// Split `values` into maximal runs where `mask` is `true`. A run is closed
/// when a `false` is encountered or the input ends. If the inputs have
/// different lengths, the extra elements of the longer one are ignored.
///
/// ```
/// # use satrfi::windows::split_contiguous;
/// let runs = split_contiguous(&[1, 2, 3, 4, 5], &[true, true, false, true, true]);
/// assert_eq!(runs, vec![vec![1, 2], vec![4, 5]]);
/// ```
pub fn split_contiguous<T: Clone>(values: &[T], mask: &[bool]) -> Vec<Vec<T>> {
    let mut runs = vec![];
    let mut current = vec![];
    for (v, &keep) in values.iter().zip(mask) {
        if keep {
            current.push(v.clone());
        } else if !current.is_empty() {
            runs.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        runs.push(current);
    }
    runs
}

/// A maximal contiguous run of samples in which a single satellite was
/// classified as interfering.
#[derive(Debug, Clone, PartialEq)]
pub struct InterferenceWindow {
    /// The index of the satellite in the catalog.
    pub satellite: usize,

    /// The first flagged timestamp.
    pub start: Epoch,

    /// The last flagged timestamp.
    pub end: Epoch,

    /// The number of flagged samples in this window.
    pub num_samples: usize,

    /// The highest altitude the satellite reached during the window
    /// \[degrees\].
    pub max_sat_alt_deg: f64,

    /// The closest the satellite got to the target during the window
    /// \[degrees\].
    pub min_separation_deg: f64,

    /// The largest gain seen during the window. Only available when gains were
    /// calculated.
    pub peak_gain: Option<f64>,
}

impl InterferenceWindow {
    /// The time between the first and last flagged samples. A window of a
    /// single sample has a duration of zero.
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    fn from_run(run: &[Sample]) -> Option<InterferenceWindow> {
        let first = run.first()?;
        let last = run.last()?;
        let max_sat_alt_deg = run
            .iter()
            .map(|s| s.satellite_pos.el.to_degrees())
            .fold(f64::NEG_INFINITY, f64::max);
        let min_separation_deg = run
            .iter()
            .map(|s| s.separation_deg)
            .fold(f64::INFINITY, f64::min);
        let peak_gain = run
            .iter()
            .filter_map(|s| s.gain)
            .fold(None, |acc: Option<f64>, g| Some(acc.map_or(g, |a| a.max(g))));
        Some(InterferenceWindow {
            satellite: first.satellite,
            start: first.timestamp,
            end: last.timestamp,
            num_samples: run.len(),
            max_sat_alt_deg,
            min_separation_deg,
            peak_gain,
        })
    }
}

/// Produce interference windows from time-ordered samples and a keep-mask.
/// Samples may belong to several satellites; each satellite's samples are
/// segmented independently (in the order they appear), so windows never
/// overlap for any one satellite. The output is ordered by satellite index
/// and then start time.
pub fn find_windows(samples: &[Sample], keep: &[bool]) -> Vec<InterferenceWindow> {
    let by_satellite = samples
        .iter()
        .zip(keep)
        .into_group_map_by(|(s, _)| s.satellite);

    by_satellite
        .into_iter()
        .sorted_by_key(|(sat, _)| *sat)
        .flat_map(|(_, pairs)| {
            let (sat_samples, sat_keep): (Vec<Sample>, Vec<bool>) =
                pairs.into_iter().map(|(s, &k)| (s.clone(), k)).unzip();
            split_contiguous(&sat_samples, &sat_keep)
        })
        .filter_map(|run| InterferenceWindow::from_run(&run))
        .collect()
}
