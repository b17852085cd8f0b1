// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Errors associated with satellite catalogs.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Satellite catalog file '{0}' doesn't exist")]
    FileDoesntExist(PathBuf),

    #[error("Couldn't parse TLEs in '{file}': {err}")]
    Tle { file: String, err: String },

    #[error("Couldn't parse OMM JSON in '{file}': {err}")]
    Json { file: String, err: String },

    #[error("Couldn't parse OMM CSV in '{file}': {err}")]
    Csv { file: String, err: String },

    #[error("Couldn't initialise SGP4 for satellite '{name}' (NORAD {norad_id}): {err}")]
    Sgp4 {
        name: String,
        norad_id: u64,
        err: String,
    },

    #[error("Satellite '{name}' has an invalid element set epoch: {epoch}")]
    BadEpoch { name: String, epoch: String },

    #[error("The satellite catalog '{0}' contains no satellites")]
    Empty(String),

    #[error("Couldn't download '{url}': {err}")]
    Download { url: String, err: String },

    #[error(transparent)]
    IO(#[from] std::io::Error),
}
