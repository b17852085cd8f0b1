// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Common arguments for command-line interfaces. e.g. the `scan` and `beam`
//! subcommands both need a gain model, so the same gain-model arguments are
//! shared between them.

mod gain_model;
mod printers;

pub(super) use gain_model::GainModelArgs;
pub(super) use printers::InfoPrinter;
pub(crate) use printers::{display_warnings, Warn};

use itertools::Itertools;
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};

use crate::{
    beam::GainModelType,
    constants::{
        DEFAULT_FIRST_NULL_DEG, DEFAULT_WEIGHTING_FWHM_DEG, WARKWORTH_HEIGHT_M,
        WARKWORTH_LAT_DEG, WARKWORTH_LONG_DEG,
    },
    target::{ObserverPreset, TargetPreset},
};

lazy_static::lazy_static! {
    pub(super) static ref ARG_FILE_TYPES_COMMA_SEPARATED: String = ArgFileTypes::iter().join(", ");

    pub(super) static ref ARG_FILE_HELP: String =
        format!("All arguments may be specified in a file. Any CLI arguments override arguments set in the file. Supported formats: {}", *ARG_FILE_TYPES_COMMA_SEPARATED);

    pub(super) static ref GAIN_MODEL_TYPES_COMMA_SEPARATED: String = GainModelType::iter().join(", ");

    pub(super) static ref GAIN_MODEL_HELP: String =
        format!("The gain model to use. Supported models: {}. Default: {}", *GAIN_MODEL_TYPES_COMMA_SEPARATED, GainModelType::default());

    pub(super) static ref FIRST_NULL_HELP: String =
        format!("The angle from boresight to the first null of the Airy disk [degrees]. If this isn't given, it is derived from --dish-diameter and --freq, if they are given. Default: {DEFAULT_FIRST_NULL_DEG}");

    pub(super) static ref FWHM_HELP: String =
        format!("The full width at half maximum of the Gaussian beam [degrees]. Default: {DEFAULT_WEIGHTING_FWHM_DEG}");

    pub(super) static ref TARGET_PRESETS_COMMA_SEPARATED: String = TargetPreset::iter().join(", ");

    pub(super) static ref OBSERVER_PRESETS_COMMA_SEPARATED: String = ObserverPreset::iter().join(", ");

    pub(super) static ref OBSERVER_HELP: String =
        format!("A well-known observatory to observe from. Supported: {}. Default: {}", *OBSERVER_PRESETS_COMMA_SEPARATED, ObserverPreset::default());

    pub(super) static ref OBSERVER_POSITION_HELP: String =
        format!("The Earth longitude, latitude, and height of the observer [degrees, degrees, meters]. Overrides --observer. Default (Warkworth): ({WARKWORTH_LONG_DEG}°, {WARKWORTH_LAT_DEG}°, {WARKWORTH_HEIGHT_M}m)");
}

#[derive(Debug, Display, EnumIter, EnumString)]
pub(super) enum ArgFileTypes {
    #[strum(serialize = "toml")]
    Toml,
    #[strum(serialize = "json")]
    Json,
}

macro_rules! unpack_arg_file {
    ($arg_file:expr) => ({
        use std::{fs::File, io::Read, str::FromStr};

        use crate::cli::common::{ArgFileTypes, ARG_FILE_TYPES_COMMA_SEPARATED};

        debug!("Attempting to parse argument file {}", $arg_file.display());

        let mut contents = String::new();
        let arg_file_type = $arg_file
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .and_then(|e| ArgFileTypes::from_str(&e).ok());

        match arg_file_type {
            Some(ArgFileTypes::Toml) => {
                debug!("Parsing toml file...");
                let mut fh = File::open(&$arg_file)?;
                fh.read_to_string(&mut contents)?;
                match toml::from_str(&contents) {
                    Ok(p) => p,
                    Err(err) => {
                        return Err(SatRfiError::ArgFile(format!(
                            "Couldn't decode toml structure from {:?}:\n{err}",
                            $arg_file
                        )))
                    }
                }
            }
            Some(ArgFileTypes::Json) => {
                debug!("Parsing json file...");
                let mut fh = File::open(&$arg_file)?;
                fh.read_to_string(&mut contents)?;
                match serde_json::from_str(&contents) {
                    Ok(p) => p,
                    Err(err) => {
                        return Err(SatRfiError::ArgFile(format!(
                            "Couldn't decode json structure from {:?}:\n{err}",
                            $arg_file
                        )))
                    }
                }
            }

            _ => {
                return Err(SatRfiError::ArgFile(format!(
                    "Argument file '{:?}' doesn't have a recognised file extension! Valid extensions are: {}", $arg_file, *ARG_FILE_TYPES_COMMA_SEPARATED)
                ))
            }
        }
    });
}
