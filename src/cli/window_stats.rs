// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::{
    fs::File,
    io::{BufWriter, Read},
    path::PathBuf,
};

use clap::Parser;
use log::{debug, info};

use super::common::{display_warnings, InfoPrinter, Warn};
use crate::{
    analysis::{parse_time_windows, window_stats, write_window_stats_csv},
    beam::GaussianBeam,
    constants::DEFAULT_WEIGHTING_FWHM_DEG,
    io::read_track_file,
    plotting::plot_window_stats,
    time::format_utc,
    SatRfiError,
};

/// Summarise the satellites in a track file during time windows, weighting
/// each satellite by a Gaussian beam.
#[derive(Parser, Debug)]
pub struct WindowStatsArgs {
    /// The track CSV written by "scan".
    #[clap(name = "TRACK_FILE", parse(from_os_str))]
    track: PathBuf,

    /// A file of time windows, one "START,END" per line. Lines starting with
    /// '#' are ignored.
    #[clap(short, long, parse(from_os_str))]
    windows: PathBuf,

    /// The date of the windows (e.g. 2026-01-21), if they are only given as
    /// times of day.
    #[clap(long)]
    date: Option<String>,

    /// The full width at half maximum of the weighting beam [degrees].
    #[clap(long, default_value_t = DEFAULT_WEIGHTING_FWHM_DEG)]
    fwhm: f64,

    /// The file to write the statistics to.
    #[clap(short, long, default_value = "window_stats.csv")]
    output: PathBuf,

    /// Also plot the statistics to this PNG file. Only available if compiled
    /// with the "plotting" feature.
    #[clap(long, parse(from_os_str))]
    plot: Option<PathBuf>,
}

impl WindowStatsArgs {
    pub(super) fn run(&self) -> Result<(), SatRfiError> {
        let WindowStatsArgs {
            track,
            windows,
            date,
            fwhm,
            output,
            plot,
        } = self;

        let beam = GaussianBeam::from_fwhm(fwhm.to_radians())?;
        let rows = read_track_file(track)?;
        let num_sat_rows = rows.iter().filter(|r| !r.is_target()).count();
        debug!("Read {} rows ({num_sat_rows} satellite rows)", rows.len());

        let mut text = String::new();
        File::open(windows)?.read_to_string(&mut text)?;
        let windows = parse_time_windows(&text, date.as_deref())?;

        let mut printer = InfoPrinter::new("Window statistics".into());
        printer.push_block(vec![
            format!("Track file: {}", track.display()).into(),
            format!("{} rows, {num_sat_rows} satellite rows", rows.len()).into(),
        ]);
        printer.push_line(format!("{} windows", windows.len()).into());
        printer.push_line(format!("Gaussian weighting, FWHM {fwhm}°").into());
        printer.display();

        let stats = window_stats(&rows, &windows, &beam);
        for s in &stats {
            info!(
                "  {:>3}: {} -> {}: {} satellites, beam weight sum {:.3}, weighted mean sep. {:.3}°",
                s.index,
                format_utc(s.window.start),
                format_utc(s.window.end),
                s.close_sat_count,
                s.beam_weight_sum,
                s.weighted_mean_separation_deg
            );
        }
        if stats.iter().all(|s| s.close_sat_count == 0) {
            "No satellites were found in any window".warn();
        }

        write_window_stats_csv(BufWriter::new(File::create(output)?), &stats)?;
        info!("Wrote {}", output.display());

        if let Some(plot) = plot {
            let title = match date {
                Some(d) => format!("Satellites in windows on {d}"),
                None => "Satellites in windows".to_string(),
            };
            plot_window_stats(&stats, &title, plot)?;
            info!("Wrote {}", plot.display());
        }

        display_warnings();
        Ok(())
    }
}
