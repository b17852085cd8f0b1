// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.


use std::str::FromStr;

use clap::Parser;
use log::debug;
use serde::{Deserialize, Serialize};

use super::{
    InfoPrinter, Warn, FIRST_NULL_HELP, FWHM_HELP, GAIN_MODEL_HELP,
    GAIN_MODEL_TYPES_COMMA_SEPARATED,
};
use crate::{
    beam::{create_gain_model, first_null_from_aperture, GainModel, GainModelType},
    constants::{DEFAULT_FIRST_NULL_DEG, DEFAULT_WEIGHTING_FWHM_DEG},
    unit_parsing::parse_freq_hz,
    SatRfiError,
};

#[derive(Parser, Debug, Clone, Default, Serialize, Deserialize)]
pub(crate) struct GainModelArgs {
    #[clap(long, help = GAIN_MODEL_HELP.as_str(), help_heading = "GAIN MODEL")]
    pub(crate) gain_model: Option<String>,

    #[clap(long, help = FIRST_NULL_HELP.as_str(), help_heading = "GAIN MODEL")]
    pub(crate) first_null: Option<f64>,

    /// The diameter of the dish [metres]. Used with --freq to derive the
    /// first null of the Airy disk (1.22 λ / D).
    #[clap(long, help_heading = "GAIN MODEL")]
    pub(crate) dish_diameter: Option<f64>,

    /// The observing frequency. Units may be given, e.g. 1.42GHz, 150MHz. A
    /// bare number is in MHz.
    #[clap(long, help_heading = "GAIN MODEL")]
    pub(crate) freq: Option<String>,

    #[clap(long, help = FWHM_HELP.as_str(), help_heading = "GAIN MODEL")]
    pub(crate) fwhm: Option<f64>,
}

impl GainModelArgs {
    pub(crate) fn merge(self, other: Self) -> Self {
        Self {
            gain_model: self.gain_model.or(other.gain_model),
            first_null: self.first_null.or(other.first_null),
            dish_diameter: self.dish_diameter.or(other.dish_diameter),
            freq: self.freq.or(other.freq),
            fwhm: self.fwhm.or(other.fwhm),
        }
    }

    pub(crate) fn parse(self) -> Result<Box<dyn GainModel>, SatRfiError> {
        let Self {
            gain_model,
            first_null,
            dish_diameter,
            freq,
            fwhm,
        } = self;

        let model_type = match gain_model {
            None => GainModelType::default(),
            Some(s) => GainModelType::from_str(&s.to_lowercase()).map_err(|_| {
                SatRfiError::Configuration(format!(
                    "Unrecognised gain model '{s}'; supported models are: {}",
                    *GAIN_MODEL_TYPES_COMMA_SEPARATED
                ))
            })?,
        };
        let freq_hz = freq.as_deref().map(parse_freq_hz).transpose()?;
        debug!("Gain model {model_type}, frequency {freq_hz:?} Hz, dish diameter {dish_diameter:?} m");

        let mut printer = InfoPrinter::new("Gain model".into());
        printer.push_line(format!("Type: {model_type}").into());

        let scale_angle_rad = match model_type {
            GainModelType::Airy => {
                if fwhm.is_some() {
                    "A FWHM was given, but it is only used by the gaussian gain model".warn();
                }
                match (first_null, dish_diameter, freq_hz) {
                    (Some(null), d, f) => {
                        if d.is_some() || f.is_some() {
                            "Using the given first null; ignoring the dish diameter and frequency"
                                .warn();
                        }
                        printer.push_line(format!("First null: {null}°").into());
                        null.to_radians()
                    }
                    (None, Some(d), Some(f)) => {
                        let null = first_null_from_aperture(d, f)?;
                        printer.push_block(vec![
                            format!("First null: {:.4}° (1.22 λ / D)", null.to_degrees()).into(),
                            format!("Dish diameter: {d} m").into(),
                            format!("Frequency: {:.3} MHz", f / 1e6).into(),
                        ]);
                        null
                    }
                    (None, Some(_), None) | (None, None, Some(_)) => {
                        return Err(SatRfiError::Configuration(
                            "Both a dish diameter and a frequency are needed to derive the first null"
                                .to_string(),
                        ))
                    }
                    (None, None, None) => {
                        printer.push_line(
                            format!("First null: {DEFAULT_FIRST_NULL_DEG}° (default)").into(),
                        );
                        DEFAULT_FIRST_NULL_DEG.to_radians()
                    }
                }
            }

            GainModelType::Gaussian => {
                if first_null.is_some() || dish_diameter.is_some() {
                    "Airy disk parameters were given, but the gaussian gain model only uses a FWHM"
                        .warn();
                }
                let fwhm = fwhm.unwrap_or(DEFAULT_WEIGHTING_FWHM_DEG);
                printer.push_line(format!("FWHM: {fwhm}°").into());
                fwhm.to_radians()
            }
        };

        let model = create_gain_model(model_type, scale_angle_rad)?;
        printer.display();
        Ok(model)
    }
}
