// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use super::{BeamError, GainModel, GainModelType};
use crate::constants::FWHM_FACTOR;

/// A circularly-symmetric Gaussian main lobe.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GaussianBeam {
    fwhm_rad: f64,
    sigma_rad: f64,
}

impl GaussianBeam {
    pub fn from_fwhm(fwhm_rad: f64) -> Result<GaussianBeam, BeamError> {
        if !(fwhm_rad.is_finite() && fwhm_rad > 0.0) {
            return Err(BeamError::InvalidFwhm(fwhm_rad));
        }
        Ok(GaussianBeam {
            fwhm_rad,
            sigma_rad: fwhm_rad / FWHM_FACTOR,
        })
    }

    pub fn sigma(&self) -> f64 {
        self.sigma_rad
    }
}

impl GainModel for GaussianBeam {
    fn get_gain_model_type(&self) -> GainModelType {
        GainModelType::Gaussian
    }

    fn get_scale_angle(&self) -> f64 {
        self.fwhm_rad
    }

    fn gain(&self, separation_rad: f64) -> f64 {
        (-(separation_rad * separation_rad) / (2.0 * self.sigma_rad * self.sigma_rad)).exp()
    }
}
