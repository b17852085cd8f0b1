// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Parameters for scanning an observation, and writing out the results.

use std::{fs::File, io::BufWriter, path::PathBuf};

use hifitime::{Duration, Epoch};
use log::{debug, info};
use thiserror::Error;
use vec1::Vec1;

use crate::{
    context::ObservationContext,
    io::{write_events_csv, write_track_csv, write_windows_csv, CsvWriteError},
    plotting::{plot_tracks, PlotError},
    scan::{scan, ScanError, ScanResults, ScanSettings},
    target::Target,
    time::format_utc,
    PROGRESS_BARS,
};

/// Where to write results.
#[derive(Debug, Clone)]
pub struct OutputParams {
    pub directory: PathBuf,

    /// Every output file name starts with this.
    pub prefix: String,

    /// Also write a PNG plot of the tracks.
    pub plot: bool,
}

impl OutputParams {
    fn path(&self, suffix: &str) -> PathBuf {
        self.directory.join(format!("{}_{suffix}", self.prefix))
    }
}

#[derive(Debug)]
pub struct ScanParams {
    pub context: ObservationContext,
    pub target: Target,

    /// The instants to evaluate.
    pub timestamps: Vec1<Epoch>,

    pub time_res: Duration,

    pub settings: ScanSettings,

    pub output: OutputParams,
}

impl ScanParams {
    /// Scan the observation and write out the results. The paths of all
    /// written files are returned.
    pub fn run(&self) -> Result<Vec<PathBuf>, ScanRunError> {
        let ScanParams {
            context,
            target,
            timestamps,
            time_res,
            settings,
            output,
        } = self;
        debug!(
            "Scanning {} timesteps at {} s resolution",
            timestamps.len(),
            time_res.to_seconds()
        );

        let results = scan(
            context,
            target,
            timestamps.clone(),
            settings,
            PROGRESS_BARS.load(),
        )?;
        report(&results, context);

        if !output.directory.exists() {
            debug!("Creating output directory {}", output.directory.display());
            std::fs::create_dir_all(&output.directory)?;
        }

        let mut written = vec![];
        let track = output.path("track.csv");
        write_track_csv(BufWriter::new(File::create(&track)?), &results, context)?;
        written.push(track);

        let events = output.path("events.csv");
        write_events_csv(BufWriter::new(File::create(&events)?), &results, context)?;
        written.push(events);

        let windows = output.path("windows.csv");
        write_windows_csv(
            BufWriter::new(File::create(&windows)?),
            &results.windows(),
            context,
            results.has_gains,
        )?;
        written.push(windows);

        if output.plot {
            let plot = output.path("tracks.png");
            let title = format!(
                "{} from {}",
                target.name,
                format_utc(*results.timestamps.first())
            );
            plot_tracks(&results, context, &title, &plot)?;
            written.push(plot);
        }

        for f in &written {
            info!("Wrote {}", f.display());
        }
        Ok(written)
    }
}

/// Log a summary of the scan.
fn report(results: &ScanResults, context: &ObservationContext) {
    let windows = results.windows();
    info!(
        "{} of {} timesteps had interference ({} satellite samples, {} windows)",
        results.num_flagged_timesteps(),
        results.timestamps.len(),
        results.num_intersections(),
        windows.len()
    );
    for w in &windows {
        let peak = match w.peak_gain {
            Some(g) => format!(", peak gain {:.3}%", g * 100.0),
            None => String::new(),
        };
        info!(
            "  {:<24} {} -> {} ({:.0} s), min. separation {:.3}°{peak}",
            context.satellite_name(w.satellite),
            format_utc(w.start),
            format_utc(w.end),
            w.duration().to_seconds(),
            w.min_separation_deg,
        );
    }
}

#[derive(Error, Debug)]
pub enum ScanRunError {
    #[error(transparent)]
    Scan(#[from] ScanError),

    #[error(transparent)]
    CsvWrite(#[from] CsvWriteError),

    #[error(transparent)]
    Plot(#[from] PlotError),

    #[error(transparent)]
    IO(#[from] std::io::Error),
}
