// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
Everything about an observing session that doesn't change between scans.
 */


use hifitime::{Duration, Epoch};
use marlu::{AzEl, LatLngHeight};

use crate::{satellites::Satellite, target::Target};

/// The observer, their timescale and the satellites that might get in the way.
///
/// This is built once (typically from command-line arguments) and then
/// borrowed by everything that needs it.
#[derive(Debug)]
pub struct ObservationContext {
    /// The position of the telescope on the WGS84 ellipsoid.
    pub observer: LatLngHeight,

    /// UT1 - UTC.
    pub dut1: Duration,

    /// Whether to use coordinates of date (i.e. precess J2000 target positions)
    /// when converting target positions to Az/El.
    pub precess: bool,

    /// The satellite catalog. Indices into this catalog identify satellites
    /// in scan results.
    pub satellites: Vec<Satellite>,
}

impl ObservationContext {
    pub fn new(observer: LatLngHeight, dut1: Duration, satellites: Vec<Satellite>) -> Self {
        Self {
            observer,
            dut1,
            precess: true,
            satellites,
        }
    }

    pub fn num_satellites(&self) -> usize {
        self.satellites.len()
    }

    /// The apparent position of a target at `t`.
    pub fn target_azel(&self, target: &Target, t: Epoch) -> AzEl {
        target.apparent_azel(t, self.observer, self.dut1, self.precess)
    }

    /// The apparent position of the satellite with catalog index `i_sat` at
    /// `t`. Positions are NaN if the satellite can't be propagated.
    pub fn satellite_azel(&self, i_sat: usize, t: Epoch) -> AzEl {
        self.satellites[i_sat].azel(t, self.observer, self.dut1)
    }

    /// The name of the satellite with catalog index `i_sat`.
    pub fn satellite_name(&self, i_sat: usize) -> &str {
        &self.satellites[i_sat].name
    }
}
