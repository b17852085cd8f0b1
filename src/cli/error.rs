// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Error type for all satrfi-related errors. This should be the *only* error
//! enum that is publicly visible.

use thiserror::Error;

use crate::{
    analysis::AnalysisError,
    beam::BeamError,
    cutoff::CutoffError,
    io::{CsvReadError, CsvWriteError},
    params::ScanRunError,
    plotting::PlotError,
    satellites::CatalogError,
    scan::ScanError,
    sexagesimal::SexagesimalError,
    target::TargetError,
    time::TimeParseError,
    unit_parsing::UnitParseError,
};

/// The *only* publicly visible error from satrfi.
#[derive(Error, Debug)]
pub enum SatRfiError {
    /// Missing, contradictory or invalid parameters.
    #[error("{0}\n\nRun with --help to see the valid options.")]
    Configuration(String),

    /// The satellite catalog couldn't be fetched or parsed, or a track file
    /// couldn't be read.
    #[error("{0}")]
    DataSource(String),

    /// Degenerate angles or beam parameters.
    #[error("{0}")]
    Geometry(String),

    /// An error when plotting.
    #[error("{0}")]
    Plot(String),

    /// An error related to argument files.
    #[error("{0}\n\nArgument files must be TOML or JSON; use --save-toml to generate one")]
    ArgFile(String),

    /// A generic error that can't be clarified further, e.g. IO errors.
    #[error("{0}")]
    Generic(String),
}

// When changing the error propagation below, ensure `Self::from(e)` uses the
// correct `e`!

impl From<BeamError> for SatRfiError {
    fn from(e: BeamError) -> Self {
        Self::Geometry(e.to_string())
    }
}

impl From<CutoffError> for SatRfiError {
    fn from(e: CutoffError) -> Self {
        Self::Configuration(e.to_string())
    }
}

impl From<CatalogError> for SatRfiError {
    fn from(e: CatalogError) -> Self {
        match e {
            CatalogError::IO(_) => Self::Generic(e.to_string()),
            _ => Self::DataSource(e.to_string()),
        }
    }
}

impl From<TargetError> for SatRfiError {
    fn from(e: TargetError) -> Self {
        match e {
            TargetError::Sexagesimal(e) => Self::from(e),
            _ => Self::Configuration(e.to_string()),
        }
    }
}

impl From<SexagesimalError> for SatRfiError {
    fn from(e: SexagesimalError) -> Self {
        match e {
            SexagesimalError::RaOutOfRange(_) | SexagesimalError::DecOutOfRange(_) => {
                Self::Geometry(e.to_string())
            }
            _ => Self::Configuration(e.to_string()),
        }
    }
}

impl From<ScanError> for SatRfiError {
    fn from(e: ScanError) -> Self {
        match e {
            ScanError::NoSatellites => Self::DataSource(e.to_string()),
            ScanError::BadTimeResolution(_)
            | ScanError::BadDuration(_)
            | ScanError::NoTimesteps => Self::Configuration(e.to_string()),
        }
    }
}

impl From<UnitParseError> for SatRfiError {
    fn from(e: UnitParseError) -> Self {
        Self::Configuration(e.to_string())
    }
}

impl From<TimeParseError> for SatRfiError {
    fn from(e: TimeParseError) -> Self {
        Self::Configuration(e.to_string())
    }
}

impl From<AnalysisError> for SatRfiError {
    fn from(e: AnalysisError) -> Self {
        Self::DataSource(e.to_string())
    }
}

impl From<CsvReadError> for SatRfiError {
    fn from(e: CsvReadError) -> Self {
        match e {
            CsvReadError::IO(_) => Self::Generic(e.to_string()),
            _ => Self::DataSource(e.to_string()),
        }
    }
}

impl From<CsvWriteError> for SatRfiError {
    fn from(e: CsvWriteError) -> Self {
        Self::Generic(e.to_string())
    }
}

impl From<PlotError> for SatRfiError {
    fn from(e: PlotError) -> Self {
        Self::Plot(e.to_string())
    }
}

impl From<ScanRunError> for SatRfiError {
    fn from(e: ScanRunError) -> Self {
        match e {
            ScanRunError::Scan(e) => Self::from(e),
            ScanRunError::CsvWrite(e) => Self::from(e),
            ScanRunError::Plot(e) => Self::from(e),
            ScanRunError::IO(e) => Self::from(e),
        }
    }
}

impl From<std::io::Error> for SatRfiError {
    fn from(e: std::io::Error) -> Self {
        Self::Generic(e.to_string())
    }
}
