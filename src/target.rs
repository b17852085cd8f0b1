// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Fixed celestial targets and observatories.

use hifitime::{Duration, Epoch};
use marlu::{
    erfa::{
        constants::{ERFA_DC, ERFA_DJM0},
        earth::position_velocity_00,
        prenut::pn_matrix_06a,
        time::{gmst06, gst06},
        transform::{cartesian_to_spherical, spherical_to_cartesian},
        vectors_and_matrices::{inner_product, mat_mul_pvec, modulus_and_unit_vector},
    },
    precession::get_lmst,
    AzEl, HADec, LatLngHeight, RADec,
};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};
use thiserror::Error;

use crate::{
    constants::*,
    sexagesimal::{
        parse_dec, parse_ra, sexagesimal_dms_to_degrees, sexagesimal_hms_to_float,
        SexagesimalError,
    },
};

/// A fixed celestial source, with J2000 coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct Target {
    pub name: String,
    pub radec: RADec,
}

impl Target {
    pub fn new(name: &str, ra_deg: f64, dec_deg: f64) -> Result<Target, TargetError> {
        if !(0.0..360.0).contains(&ra_deg) {
            return Err(TargetError::Sexagesimal(SexagesimalError::RaOutOfRange(ra_deg)));
        }
        if !(-90.0..=90.0).contains(&dec_deg) {
            return Err(TargetError::Sexagesimal(SexagesimalError::DecOutOfRange(
                dec_deg,
            )));
        }
        Ok(Target {
            name: name.to_string(),
            radec: RADec::from_degrees(ra_deg, dec_deg),
        })
    }

    /// Make a target from RA and Dec strings. See [`parse_ra`] and
    /// [`parse_dec`] for the accepted forms.
    pub fn from_strings(name: &str, ra: &str, dec: &str) -> Result<Target, TargetError> {
        Target::new(name, parse_ra(ra)?, parse_dec(dec)?)
    }

    /// The apparent position of the target from `observer` at `t`. If
    /// `precess` is true, the J2000 position is moved to the true equator and
    /// equinox of date (IAU 2006/2000A precession-nutation, plus annual
    /// aberration) so that it shares a frame with satellite positions.
    /// Otherwise the J2000 position is used as-is. Refraction is not
    /// modelled.
    pub fn apparent_azel(
        &self,
        t: Epoch,
        observer: LatLngHeight,
        dut1: Duration,
        precess: bool,
    ) -> AzEl {
        let lmst = get_lmst(observer.longitude_rad, t, dut1);
        let hadec = if precess {
            let (radec, eqeq) = self.radec_of_date(t, dut1);
            // Local apparent sidereal time minus the RA of date.
            HADec::from_radians(lmst + eqeq - radec.ra, radec.dec)
        } else {
            self.radec.to_hadec(lmst)
        };
        let azel = hadec.to_azel(observer.latitude_rad);
        AzEl {
            az: azel.az.rem_euclid(TAU),
            el: azel.el,
        }
    }

    /// The target's RA and Dec at `t` with respect to the true equator and
    /// equinox of date, including annual aberration. Also returned is the
    /// equation of the equinoxes \[radians\], which converts mean sidereal
    /// time to apparent sidereal time.
    pub fn radec_of_date(&self, t: Epoch, dut1: Duration) -> (RADec, f64) {
        let mjd_tt = t.to_mjd_tt_days();
        let mjd_ut1 = (t + dut1).to_mjd_utc_days();

        let npb = pn_matrix_06a(ERFA_DJM0, mjd_tt);
        let j2000 = spherical_to_cartesian(self.radec.ra, self.radec.dec);
        let of_date = mat_mul_pvec(npb, annual_aberration(j2000, mjd_tt));
        let (ra, dec) = cartesian_to_spherical(of_date);

        let gast = gst06(ERFA_DJM0, mjd_ut1, ERFA_DJM0, mjd_tt, npb);
        let gmst = gmst06(ERFA_DJM0, mjd_ut1, ERFA_DJM0, mjd_tt);
        let eqeq = (gast - gmst + PI).rem_euclid(TAU) - PI;

        (RADec::from_radians(ra.rem_euclid(TAU), dec), eqeq)
    }
}

/// Shift the GCRS unit vector `p` for the Earth's barycentric velocity at
/// `mjd_tt` (first order in v/c; good to a few milliarcseconds).
pub fn annual_aberration(p: [f64; 3], mjd_tt: f64) -> [f64; 3] {
    // TT stands in for TDB; they differ by under 2 ms.
    let (_, _, pv_bary) = position_velocity_00(ERFA_DJM0, mjd_tt);
    let v = pv_bary[1].map(|v| v / ERFA_DC);
    let p_dot_v = inner_product(p, v);
    let shifted = [
        p[0] + v[0] - p_dot_v * p[0],
        p[1] + v[1] - p_dot_v * p[1],
        p[2] + v[2] - p_dot_v * p[2],
    ];
    modulus_and_unit_vector(shifted).1
}

/// Targets that have been studied before.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum TargetPreset {
    /// The Vela pulsar.
    Vela,

    /// Cygnus A.
    CygnusA,
}

impl TargetPreset {
    pub fn target(self) -> Target {
        let (name, ra_deg, dec_deg) = match self {
            // 08h35m20.65525s -45d10m35.1545s
            TargetPreset::Vela => (
                "Vela",
                sexagesimal_hms_to_float(8.0, 35.0, 20.65525),
                -sexagesimal_dms_to_degrees(45.0, 10.0, 35.1545),
            ),
            // 19h59m +40d44m
            TargetPreset::CygnusA => (
                "Cygnus A",
                sexagesimal_hms_to_float(19.0, 59.0, 0.0),
                sexagesimal_dms_to_degrees(40.0, 44.0, 0.0),
            ),
        };
        Target {
            name: name.to_string(),
            radec: RADec::from_degrees(ra_deg, dec_deg),
        }
    }
}

/// Observatories with well-known positions.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumIter, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum ObserverPreset {
    /// Warkworth Radio Astronomical Observatory, New Zealand.
    #[default]
    Warkworth,

    /// Hat Creek Radio Observatory, California.
    Hcro,
}

impl ObserverPreset {
    pub fn position(self) -> LatLngHeight {
        let (lat, long, height) = match self {
            ObserverPreset::Warkworth => {
                (WARKWORTH_LAT_DEG, WARKWORTH_LONG_DEG, WARKWORTH_HEIGHT_M)
            }
            ObserverPreset::Hcro => (HCRO_LAT_DEG, HCRO_LONG_DEG, HCRO_HEIGHT_M),
        };
        LatLngHeight {
            longitude_rad: long.to_radians(),
            latitude_rad: lat.to_radians(),
            height_metres: height,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TargetError {
    #[error("Unknown target preset '{got}'; valid presets are: {valid}")]
    UnknownPreset { got: String, valid: String },

    #[error("Unknown observer preset '{got}'; valid presets are: {valid}")]
    UnknownObserver { got: String, valid: String },

    #[error("Only one of RA and Dec was specified; both are required")]
    OnlyOneRAOrDec,

    #[error("No target was specified; supply a preset or an RA and Dec")]
    NoTarget,

    #[error("Observer position must have 3 values (longitude, latitude, height); got {0:?}")]
    BadObserverPosition(Vec<f64>),

    #[error(transparent)]
    Sexagesimal(#[from] SexagesimalError),
}
