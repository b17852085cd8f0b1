// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlotError {
    #[cfg(not(feature = "plotting"))]
    #[error("satrfi was not compiled with the \"plotting\" feature.\nYou need to compile satrfi from source with this feature to make plots.")]
    NoPlottingFeature,

    #[cfg(feature = "plotting")]
    #[error(transparent)]
    Draw(#[from] DrawError),
}

#[cfg(feature = "plotting")]
#[derive(Error, Debug)]
pub enum DrawError {
    #[error("While plotting tracks: {0}")]
    Tracks(String),

    #[error("While plotting window statistics: {0}")]
    WindowStats(String),

    #[error("Error from the plotters library: {0}")]
    Plotters(Box<dyn std::error::Error>),
}
