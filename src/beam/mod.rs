// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Code to abstract antenna gain calculations.
//!
//! [`GainModel`] is a trait detailing how to turn an angular separation from
//! the beam boresight into a normalised power gain. By making this trait, we
//! can neatly abstract over the Airy disk (a uniformly illuminated circular
//! aperture) and a Gaussian main lobe.
//!
//! All gains are linear power gains normalised to 1 at boresight.

mod airy;
mod bessel;
mod error;
mod gaussian;
#[cfg(test)]
mod tests;

pub use airy::{airy_gain, first_null_from_aperture, AiryBeam};
pub(crate) use bessel::bessel_j1;
pub use error::BeamError;
pub use gaussian::GaussianBeam;

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

/// Supported gain models.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumIter, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum GainModelType {
    /// The diffraction pattern of a uniformly illuminated circular aperture.
    #[default]
    Airy,

    /// A Gaussian main lobe described by its full width at half maximum.
    Gaussian,
}

/// A trait abstracting gain-model functions.
pub trait GainModel: Sync + Send {
    /// Get the type of gain model.
    fn get_gain_model_type(&self) -> GainModelType;

    /// The characteristic angle of this model \[radians\]. For the Airy disk
    /// this is the angle to the first null; for the Gaussian it is the FWHM.
    fn get_scale_angle(&self) -> f64;

    /// Calculate the normalised power gain at an angular separation from
    /// boresight \[radians\].
    fn gain(&self, separation_rad: f64) -> f64;

    /// Calculate the normalised power gains for many angular separations
    /// \[radians\].
    fn gains(&self, separations_rad: &[f64]) -> Vec<f64> {
        separations_rad.iter().map(|&s| self.gain(s)).collect()
    }
}

impl std::fmt::Debug for dyn GainModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} gain model (scale angle {}°)",
            self.get_gain_model_type(),
            self.get_scale_angle().to_degrees()
        )
    }
}

/// Create a gain model. `scale_angle_rad` is interpreted as per
/// [`GainModel::get_scale_angle`].
pub fn create_gain_model(
    model_type: GainModelType,
    scale_angle_rad: f64,
) -> Result<Box<dyn GainModel>, BeamError> {
    let model: Box<dyn GainModel> = match model_type {
        GainModelType::Airy => Box::new(AiryBeam::new(scale_angle_rad)?),
        GainModelType::Gaussian => Box::new(GaussianBeam::from_fwhm(scale_angle_rad)?),
    };
    Ok(model)
}
