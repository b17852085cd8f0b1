// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Angular separations between two apparent (Az/El) positions.

use marlu::AzEl;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

/// How to calculate the angle between two apparent positions.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumIter, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum SeparationMethod {
    /// Treat (azimuth, altitude) as Cartesian coordinates in degrees. Azimuth
    /// differences are *not* wrapped, so positions either side of north
    /// appear ~360° apart. Only useful to reproduce old results.
    Planar,

    /// The true angular distance on the sphere.
    #[default]
    GreatCircle,
}

/// The angular separation between two positions \[degrees\].
pub fn angular_separation(a: AzEl, b: AzEl, method: SeparationMethod) -> f64 {
    match method {
        SeparationMethod::Planar => planar_separation_deg(
            a.el.to_degrees(),
            a.az.to_degrees(),
            b.el.to_degrees(),
            b.az.to_degrees(),
        ),
        SeparationMethod::GreatCircle => great_circle_separation(a, b).to_degrees(),
    }
}

/// `sqrt(Δaz² + Δalt²)` with all quantities in degrees.
pub fn planar_separation_deg(alt1_deg: f64, az1_deg: f64, alt2_deg: f64, az2_deg: f64) -> f64 {
    let d_az = az2_deg - az1_deg;
    let d_alt = alt2_deg - alt1_deg;
    d_az.hypot(d_alt)
}

/// The great-circle distance between two positions \[radians\]. Vincenty's
/// formula is used; it is well conditioned for both tiny and antipodal
/// separations.
pub fn great_circle_separation(a: AzEl, b: AzEl) -> f64 {
    let (s1, c1) = a.el.sin_cos();
    let (s2, c2) = b.el.sin_cos();
    let (s_daz, c_daz) = (b.az - a.az).sin_cos();

    let num = (c2 * s_daz).hypot(c1 * s2 - s1 * c2 * c_daz);
    let den = s1 * s2 + c1 * c2 * c_daz;
    num.atan2(den)
}
