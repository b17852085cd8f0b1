// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Errors associated with scanning for interfering satellites.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScanError {
    #[error("The scan time resolution must be positive; got {0} seconds")]
    BadTimeResolution(f64),

    #[error("The scan duration must be positive; got {0} seconds")]
    BadDuration(f64),

    #[error("The scan window contains no timesteps")]
    NoTimesteps,

    #[error("There are no satellites to scan against")]
    NoSatellites,
}
