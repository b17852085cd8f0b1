// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Satellites and their apparent positions.
//!
//! Element sets are propagated with SGP4, which yields positions in the TEME
//! frame. These are rotated into an Earth-fixed frame with Greenwich mean
//! sidereal time, then made topocentric for an observer on the WGS84
//! ellipsoid. Polar motion is ignored.

mod catalog;
mod error;

pub use catalog::{
    celestrak_url, load_group, needs_refresh, parse_omm_csv, parse_omm_json, parse_tle_text,
    read_catalog_file, read_catalog_file_as, replace_cached_catalog, satellites_from_elements,
    CatalogFormat,
};
pub use error::CatalogError;

use hifitime::{Duration, Epoch};
use log::trace;
use marlu::{precession::get_lmst, AzEl, LatLngHeight};

use crate::{
    constants::{TAU, WGS84_A_KM, WGS84_F},
    time::epoch_from_naive,
};

/// A satellite with an initialised SGP4 propagator.
pub struct Satellite {
    pub name: String,
    pub norad_id: u64,

    /// The epoch of the element set.
    pub epoch: Epoch,

    constants: sgp4::Constants,
}

impl std::fmt::Debug for Satellite {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Satellite")
            .field("name", &self.name)
            .field("norad_id", &self.norad_id)
            .field("epoch", &self.epoch)
            .finish_non_exhaustive()
    }
}

impl Satellite {
    pub fn from_elements(elements: &sgp4::Elements) -> Result<Satellite, CatalogError> {
        let name = elements
            .object_name
            .clone()
            .unwrap_or_else(|| format!("NORAD {}", elements.norad_id));
        let epoch = epoch_from_naive(elements.datetime).ok_or_else(|| CatalogError::BadEpoch {
            name: name.clone(),
            epoch: elements.datetime.to_string(),
        })?;
        let constants =
            sgp4::Constants::from_elements(elements).map_err(|e| CatalogError::Sgp4 {
                name: name.clone(),
                norad_id: elements.norad_id,
                err: format!("{e:?}"),
            })?;

        Ok(Satellite {
            name,
            norad_id: elements.norad_id,
            epoch,
            constants,
        })
    }

    /// The satellite's position in the TEME frame at `t` \[km\]. `None` is
    /// returned if SGP4 fails, e.g. because the orbit has decayed.
    pub fn teme_position_km(&self, t: Epoch) -> Option<[f64; 3]> {
        let minutes = (t - self.epoch).to_seconds() / 60.0;
        match self.constants.propagate(sgp4::MinutesSinceEpoch(minutes)) {
            Ok(p) => Some(p.position),
            Err(e) => {
                trace!("SGP4 failed for {} at {t}: {e:?}", self.name);
                None
            }
        }
    }

    /// The apparent position of the satellite from `observer` at `t`. If the
    /// satellite can't be propagated, both angles are NaN.
    pub fn azel(&self, t: Epoch, observer: LatLngHeight, dut1: Duration) -> AzEl {
        match self.teme_position_km(t) {
            Some(teme) => {
                let gmst = get_lmst(0.0, t, dut1);
                teme_to_azel(teme, gmst, observer)
            }
            None => AzEl {
                az: f64::NAN,
                el: f64::NAN,
            },
        }
    }
}

/// The Earth-fixed position of an observer on the WGS84 ellipsoid \[km\].
pub(crate) fn observer_ecef_km(observer: LatLngHeight) -> [f64; 3] {
    let e2 = WGS84_F * (2.0 - WGS84_F);
    let (s_lat, c_lat) = observer.latitude_rad.sin_cos();
    let (s_lon, c_lon) = observer.longitude_rad.sin_cos();
    let n = WGS84_A_KM / (1.0 - e2 * s_lat * s_lat).sqrt();
    let h = observer.height_metres / 1000.0;
    [
        (n + h) * c_lat * c_lon,
        (n + h) * c_lat * s_lon,
        (n * (1.0 - e2) + h) * s_lat,
    ]
}

/// Convert a TEME position \[km\] into an apparent azimuth and elevation for
/// an observer, given Greenwich mean sidereal time \[radians\].
pub(crate) fn teme_to_azel(teme_km: [f64; 3], gmst_rad: f64, observer: LatLngHeight) -> AzEl {
    let [x, y, z] = teme_km;
    let (s_g, c_g) = gmst_rad.sin_cos();
    let ecef = [c_g * x + s_g * y, -s_g * x + c_g * y, z];

    let obs = observer_ecef_km(observer);
    let dx = ecef[0] - obs[0];
    let dy = ecef[1] - obs[1];
    let dz = ecef[2] - obs[2];

    let (s_lat, c_lat) = observer.latitude_rad.sin_cos();
    let (s_lon, c_lon) = observer.longitude_rad.sin_cos();
    let east = -s_lon * dx + c_lon * dy;
    let north = -s_lat * c_lon * dx - s_lat * s_lon * dy + c_lat * dz;
    let up = c_lat * c_lon * dx + c_lat * s_lon * dy + s_lat * dz;

    let range = (dx * dx + dy * dy + dz * dz).sqrt();
    AzEl {
        az: east.atan2(north).rem_euclid(TAU),
        el: (up / range).asin(),
    }
}
