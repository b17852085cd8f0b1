// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use super::{bessel_j1, BeamError, GainModel, GainModelType};
use crate::constants::{AIRY_FIRST_NULL_X, RAYLEIGH_FACTOR, VEL_C};

/// Normalised Airy power pattern.
///
/// `theta_rad` is the angular separation from boresight and `theta_null_rad`
/// is the angle to the first null. With `x = 3.8317 θ / θ_null`, the gain is 1
/// at `x == 0` and `(2 J1(x) / x)^2` otherwise. The result is always within
/// [0, 1].
///
/// # Examples
///
/// ```
/// # use satrfi::beam::airy_gain;
/// let g = airy_gain(0.0, 3.0_f64.to_radians()).unwrap();
/// assert_eq!(g, 1.0);
/// ```
pub fn airy_gain(theta_rad: f64, theta_null_rad: f64) -> Result<f64, BeamError> {
    if !(theta_null_rad.is_finite() && theta_null_rad > 0.0) {
        return Err(BeamError::InvalidFirstNull(theta_null_rad));
    }
    Ok(airy_gain_inner(theta_rad, theta_null_rad))
}

fn airy_gain_inner(theta_rad: f64, theta_null_rad: f64) -> f64 {
    let x = AIRY_FIRST_NULL_X * (theta_rad / theta_null_rad);
    if x == 0.0 {
        return 1.0;
    }
    let ratio = 2.0 * bessel_j1(x) / x;
    // The rational approximation of J1 overshoots 1 by ~1e-10 near boresight.
    (ratio * ratio).clamp(0.0, 1.0)
}

/// The angle to the first null of a uniformly illuminated circular aperture
/// (1.22 λ / D) \[radians\].
pub fn first_null_from_aperture(diameter_m: f64, freq_hz: f64) -> Result<f64, BeamError> {
    if !(diameter_m.is_finite() && diameter_m > 0.0) {
        return Err(BeamError::InvalidDiameter(diameter_m));
    }
    if !(freq_hz.is_finite() && freq_hz > 0.0) {
        return Err(BeamError::InvalidFrequency(freq_hz));
    }
    let wavelength_m = VEL_C / freq_hz;
    Ok(RAYLEIGH_FACTOR * wavelength_m / diameter_m)
}

/// An Airy-disk gain model with a fixed first-null angle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AiryBeam {
    first_null_rad: f64,
}

impl AiryBeam {
    pub fn new(first_null_rad: f64) -> Result<AiryBeam, BeamError> {
        if !(first_null_rad.is_finite() && first_null_rad > 0.0) {
            return Err(BeamError::InvalidFirstNull(first_null_rad));
        }
        Ok(AiryBeam { first_null_rad })
    }

    /// Derive the first null from a dish diameter and observing frequency.
    pub fn from_aperture(diameter_m: f64, freq_hz: f64) -> Result<AiryBeam, BeamError> {
        AiryBeam::new(first_null_from_aperture(diameter_m, freq_hz)?)
    }
}

impl GainModel for AiryBeam {
    fn get_gain_model_type(&self) -> GainModelType {
        GainModelType::Airy
    }

    fn get_scale_angle(&self) -> f64 {
        self.first_null_rad
    }

    fn gain(&self, separation_rad: f64) -> f64 {
        airy_gain_inner(separation_rad, self.first_null_rad)
    }
}
