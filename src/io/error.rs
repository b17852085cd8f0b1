// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Errors from reading and writing CSV files.

use std::path::PathBuf;

use thiserror::Error;

use crate::time::TimeParseError;

#[derive(Error, Debug)]
pub enum CsvWriteError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    IO(#[from] std::io::Error),
}

#[derive(Error, Debug)]
pub enum CsvReadError {
    #[error("Track file '{0}' does not exist")]
    FileDoesntExist(PathBuf),

    #[error("Row {row}: {err}")]
    BadTime { row: usize, err: TimeParseError },

    #[error("Row {row}: could not parse '{value}' as an angle in degrees")]
    BadAngle { row: usize, value: String },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    IO(#[from] std::io::Error),
}
