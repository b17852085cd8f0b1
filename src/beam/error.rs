// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Errors associated with gain calculations.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum BeamError {
    #[error("The Airy first-null angle must be positive and finite; got {0} radians")]
    InvalidFirstNull(f64),

    #[error("The Gaussian FWHM must be positive and finite; got {0} radians")]
    InvalidFwhm(f64),

    #[error("The aperture diameter must be positive and finite; got {0} m")]
    InvalidDiameter(f64),

    #[error("The observing frequency must be positive and finite; got {0} Hz")]
    InvalidFrequency(f64),
}
