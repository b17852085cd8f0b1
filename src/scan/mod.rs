// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Scanning an observation for satellites that cross the beam.
//!
//! Target and satellite positions are computed for every timestep up front
//! (satellites in parallel), then each timestep is scanned for satellites
//! that the [`ClassificationPolicy`] deems to interfere.

mod error;

pub use error::ScanError;

use std::collections::BTreeMap;

use hifitime::{Duration, Epoch};
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use log::{debug, trace};
use marlu::AzEl;
use ndarray::prelude::*;
use rayon::prelude::*;
use vec1::Vec1;

use crate::{
    classify::ClassificationPolicy,
    context::ObservationContext,
    separation::{angular_separation, SeparationMethod},
    target::Target,
    windows::{find_windows, InterferenceWindow},
};

/// One evaluation instant for one satellite.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub timestamp: Epoch,

    /// The index of the satellite in the catalog.
    pub satellite: usize,

    /// The apparent position of the target.
    pub target: AzEl,

    /// The apparent position of the satellite.
    pub satellite_pos: AzEl,

    /// The angular separation between the target and the satellite
    /// \[degrees\].
    pub separation_deg: f64,

    /// The linear gain at `separation_deg`, if the policy calculates gains.
    pub gain: Option<f64>,
}

/// A satellite that interferes at a particular timestep.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Intersection {
    /// The index of the satellite in the catalog.
    pub satellite: usize,
    pub position: AzEl,
    pub separation_deg: f64,
    pub gain: Option<f64>,
}

/// How a scan classifies satellites.
#[derive(Debug)]
pub struct ScanSettings {
    pub policy: ClassificationPolicy,
    pub separation: SeparationMethod,

    /// Satellites below this elevation are never flagged \[degrees\].
    pub min_elevation_deg: f64,
}

/// Generate the timestamps `start`, `start + res`, ... up to but excluding
/// `start + duration`.
pub fn time_grid(
    start: Epoch,
    duration: Duration,
    resolution: Duration,
) -> Result<Vec1<Epoch>, ScanError> {
    let duration_s = duration.to_seconds();
    let res_s = resolution.to_seconds();
    if !(res_s.is_finite() && res_s > 0.0) {
        return Err(ScanError::BadTimeResolution(res_s));
    }
    if !(duration_s.is_finite() && duration_s > 0.0) {
        return Err(ScanError::BadDuration(duration_s));
    }

    // Guard against float noise making an exact multiple one step longer.
    let num_timesteps = (duration_s / res_s - 1e-9).ceil() as usize;
    let timestamps = (0..num_timesteps)
        .map(|i| start + resolution * i as i64)
        .collect();
    Vec1::try_from_vec(timestamps).map_err(|_| ScanError::NoTimesteps)
}

/// The apparent position of the target at each timestamp.
pub fn precompute_target_positions(
    context: &ObservationContext,
    target: &Target,
    timestamps: &[Epoch],
) -> Vec<AzEl> {
    timestamps
        .iter()
        .map(|&t| context.target_azel(target, t))
        .collect()
}

/// The apparent position of every satellite at every timestamp. The output
/// has shape (num. satellites, num. timestamps). Satellites that can't be
/// propagated have NaN positions.
pub fn precompute_satellite_positions(
    context: &ObservationContext,
    timestamps: &[Epoch],
    progress_bar: &ProgressBar,
) -> Array2<AzEl> {
    let nan = AzEl {
        az: f64::NAN,
        el: f64::NAN,
    };
    let mut positions = Array2::from_elem((context.num_satellites(), timestamps.len()), nan);
    positions
        .outer_iter_mut()
        .into_par_iter()
        .zip(context.satellites.par_iter())
        .for_each(|(mut sat_positions, sat)| {
            sat_positions
                .iter_mut()
                .zip(timestamps)
                .for_each(|(pos, &t)| *pos = sat.azel(t, context.observer, context.dut1));
            progress_bar.inc(1);
        });
    progress_bar.finish_with_message("Positions done");
    positions
}

/// Find the satellites that interfere at timestep `i_timestep`. The output is
/// in catalog order.
pub fn check_satellite_intersect(
    i_timestep: usize,
    target_pos: AzEl,
    sat_positions: ArrayView2<AzEl>,
    settings: &ScanSettings,
) -> Vec<Intersection> {
    let min_el = settings.min_elevation_deg.to_radians();
    sat_positions
        .column(i_timestep)
        .iter()
        .enumerate()
        .filter(|(_, pos)| pos.az.is_finite() && pos.el.is_finite() && pos.el >= min_el)
        .filter_map(|(i_sat, &pos)| {
            let separation_deg = angular_separation(target_pos, pos, settings.separation);
            let c = settings.policy.classify(separation_deg);
            c.interferes.then_some(Intersection {
                satellite: i_sat,
                position: pos,
                separation_deg,
                gain: c.gain,
            })
        })
        .collect()
}

/// Everything produced by a scan.
#[derive(Debug)]
pub struct ScanResults {
    pub timestamps: Vec1<Epoch>,

    /// The target's position at each timestamp.
    pub target_positions: Vec<AzEl>,

    /// Shape (num. satellites, num. timestamps).
    pub satellite_positions: Array2<AzEl>,

    /// The interfering satellites at each timestamp.
    pub intersections: Vec<Vec<Intersection>>,

    pub separation: SeparationMethod,
    pub has_gains: bool,
}

impl ScanResults {
    pub fn num_intersections(&self) -> usize {
        self.intersections.iter().map(|i| i.len()).sum()
    }

    /// The number of timesteps with at least one interfering satellite.
    pub fn num_flagged_timesteps(&self) -> usize {
        self.intersections.iter().filter(|i| !i.is_empty()).count()
    }

    /// Every interfering sample, in time order and then catalog order.
    pub fn samples(&self) -> Vec<Sample> {
        self.intersections
            .iter()
            .zip(self.timestamps.iter())
            .zip(self.target_positions.iter())
            .flat_map(|((inters, &timestamp), &target)| {
                inters.iter().map(move |i| Sample {
                    timestamp,
                    satellite: i.satellite,
                    target,
                    satellite_pos: i.position,
                    separation_deg: i.separation_deg,
                    gain: i.gain,
                })
            })
            .collect()
    }

    /// The contiguous runs of interference for each satellite that interfered
    /// at all, ordered by catalog index and then time.
    pub fn windows(&self) -> Vec<InterferenceWindow> {
        let num_timesteps = self.timestamps.len();
        let mut flagged: BTreeMap<usize, Vec<Option<&Intersection>>> = BTreeMap::new();
        for (i_timestep, inters) in self.intersections.iter().enumerate() {
            for inter in inters {
                flagged
                    .entry(inter.satellite)
                    .or_insert_with(|| vec![None; num_timesteps])[i_timestep] = Some(inter);
            }
        }

        let mut samples = Vec::with_capacity(flagged.len() * num_timesteps);
        let mut keep = Vec::with_capacity(samples.capacity());
        for (i_sat, per_timestep) in flagged {
            for (i_timestep, inter) in per_timestep.into_iter().enumerate() {
                let target = self.target_positions[i_timestep];
                let satellite_pos = self.satellite_positions[(i_sat, i_timestep)];
                samples.push(Sample {
                    timestamp: self.timestamps[i_timestep],
                    satellite: i_sat,
                    target,
                    satellite_pos,
                    separation_deg: inter
                        .map(|i| i.separation_deg)
                        .unwrap_or_else(|| angular_separation(target, satellite_pos, self.separation)),
                    gain: inter.and_then(|i| i.gain),
                });
                keep.push(inter.is_some());
            }
        }
        find_windows(&samples, &keep)
    }
}

/// Run the whole pipeline: precompute positions, then scan each timestep.
pub fn scan(
    context: &ObservationContext,
    target: &Target,
    timestamps: Vec1<Epoch>,
    settings: &ScanSettings,
    draw_progress_bar: bool,
) -> Result<ScanResults, ScanError> {
    if context.satellites.is_empty() {
        return Err(ScanError::NoSatellites);
    }

    debug!(
        "Scanning {} timesteps against {} satellites",
        timestamps.len(),
        context.num_satellites()
    );
    let target_positions = precompute_target_positions(context, target, &timestamps);

    let progress_bar = ProgressBar::with_draw_target(
        Some(context.num_satellites() as _),
        if draw_progress_bar {
            ProgressDrawTarget::stdout()
        } else {
            ProgressDrawTarget::hidden()
        },
    )
    .with_style(
        ProgressStyle::default_bar()
            .template("{msg:17}: [{wide_bar:.blue}] {pos:2}/{len:2} satellites ({elapsed_precise}<{eta_precise})")
            .unwrap()
            .progress_chars("=> "),
    )
    .with_position(0)
    .with_message("Propagating");
    let satellite_positions = precompute_satellite_positions(context, &timestamps, &progress_bar);

    let intersections: Vec<Vec<Intersection>> = target_positions
        .iter()
        .enumerate()
        .map(|(i_timestep, &target_pos)| {
            let inters = check_satellite_intersect(
                i_timestep,
                target_pos,
                satellite_positions.view(),
                settings,
            );
            trace!(
                "Timestep {i_timestep}: {} interfering satellites",
                inters.len()
            );
            inters
        })
        .collect();

    Ok(ScanResults {
        timestamps,
        target_positions,
        satellite_positions,
        intersections,
        separation: settings.separation,
        has_gains: settings.policy.has_gains(),
    })
}
