// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::PathBuf,
};

use clap::Parser;
use log::info;

use crate::SatRfiError;

/// Generate gain-model values.
#[derive(Parser, Debug)]
pub struct BeamArgs {
    #[clap(flatten)]
    gain_model_args: super::common::GainModelArgs,

    /// Get gains from boresight out to this separation [degrees].
    #[clap(long, default_value = "10.0")]
    max_separation: f64,

    /// The step in separation to use [degrees].
    #[clap(short, long, default_value = "0.01")]
    step: f64,

    /// The file to write the results to. The files are formatted as
    /// tab-separated, with each line (1) the separation in degrees, (2) the
    /// linear gain, and (3) the gain in dB.
    #[clap(short, long, default_value = "gains.tsv")]
    output: PathBuf,
}

impl BeamArgs {
    pub(super) fn run(&self) -> Result<(), SatRfiError> {
        let BeamArgs {
            gain_model_args,
            max_separation,
            step,
            output,
        } = self;

        if !(step.is_finite() && *step > 0.0) {
            return Err(SatRfiError::Configuration(format!(
                "The separation step must be positive; got {step}"
            )));
        }
        if !(max_separation.is_finite() && *max_separation >= 0.0) {
            return Err(SatRfiError::Configuration(format!(
                "The maximum separation must not be negative; got {max_separation}"
            )));
        }

        let model = gain_model_args.clone().parse()?;
        let separations_deg: Vec<f64> = gen_separations(*max_separation, *step).collect();
        let separations_rad: Vec<f64> = separations_deg.iter().map(|s| s.to_radians()).collect();
        let gains = model.gains(&separations_rad);

        let mut out = BufWriter::new(File::create(output)?);
        for (sep, gain) in separations_deg.into_iter().zip(gains) {
            writeln!(&mut out, "{sep}\t{gain:e}\t{:.3}", 10.0 * gain.log10())?;
        }
        out.flush()?;
        info!("Wrote {}", output.display());

        Ok(())
    }
}

/// Separations from 0 up to and including `max` (within a small tolerance).
fn gen_separations(max: f64, step: f64) -> impl Iterator<Item = f64> {
    (0..)
        .map(move |i| step * i as f64)
        .take_while(move |sep| *sep <= max + step * 1e-9)
}
