// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! PNG plots of scan results and window statistics. Only available if
//! compiled with the "plotting" feature; otherwise every function returns
//! [`PlotError::NoPlottingFeature`].

mod error;

pub use error::PlotError;
#[cfg(feature = "plotting")]
pub use error::DrawError;

use std::path::Path;

use crate::{analysis::WindowStats, context::ObservationContext, scan::ScanResults};

/// Plot the altitude and azimuth of the target over the scan, along with the
/// positions of every interfering satellite.
pub fn plot_tracks(
    results: &ScanResults,
    context: &ObservationContext,
    title: &str,
    output: &Path,
) -> Result<(), PlotError> {
    #[cfg(feature = "plotting")]
    {
        drawing::plot_tracks(results, context, title, output)?;
        Ok(())
    }

    #[cfg(not(feature = "plotting"))]
    {
        let _ = (results, context, title, output);
        Err(PlotError::NoPlottingFeature)
    }
}

/// Plot the satellite count and beam-weighted satellite presence of each
/// window.
pub fn plot_window_stats(stats: &[WindowStats], title: &str, output: &Path) -> Result<(), PlotError> {
    #[cfg(feature = "plotting")]
    {
        drawing::plot_window_stats(stats, title, output)?;
        Ok(())
    }

    #[cfg(not(feature = "plotting"))]
    {
        let _ = (stats, title, output);
        Err(PlotError::NoPlottingFeature)
    }
}

#[cfg(feature = "plotting")]
mod drawing {
    use std::collections::BTreeMap;

    use log::debug;
    use plotters::prelude::*;

    use super::*;

    const X_PIXELS: u32 = 1600;
    const Y_PIXELS: u32 = 1000;

    pub(super) fn plot_tracks(
        results: &ScanResults,
        context: &ObservationContext,
        title: &str,
        output: &Path,
    ) -> Result<(), DrawError> {
        let root = BitMapBackend::new(output, (X_PIXELS, Y_PIXELS)).into_drawing_area();
        root.fill(&WHITE)
            .map_err(|e| DrawError::Plotters(Box::new(e)))?;

        let mut cc = ChartBuilder::on(&root)
            .caption(title, ("sans-serif", 40))
            .margin(20)
            .x_label_area_size(50)
            .y_label_area_size(60)
            .build_cartesian_2d(0.0..360.0, 0.0..90.0)
            .map_err(|e| DrawError::Tracks(e.to_string()))?;
        cc.configure_mesh()
            .x_desc("Azimuth (deg)")
            .y_desc("Altitude (deg)")
            .draw()
            .map_err(|e| DrawError::Tracks(e.to_string()))?;

        cc.draw_series(PointSeries::of_element(
            results
                .target_positions
                .iter()
                .map(|p| (p.az.to_degrees(), p.el.to_degrees()))
                .filter(|(_, el)| *el >= 0.0),
            2,
            ShapeStyle::from(&BLACK).filled(),
            &|coord, size, style| EmptyElement::at(coord) + Circle::new((0, 0), size, style),
        ))
        .map_err(|e| DrawError::Tracks(e.to_string()))?
        .label("Target")
        .legend(|(x, y)| Circle::new((x, y), 4, BLACK.filled()));

        let mut by_satellite: BTreeMap<usize, Vec<(f64, f64)>> = BTreeMap::new();
        for i in results.intersections.iter().flatten() {
            by_satellite
                .entry(i.satellite)
                .or_default()
                .push((i.position.az.to_degrees(), i.position.el.to_degrees()));
        }
        debug!("Plotting {} interfering satellites", by_satellite.len());

        for (i_colour, (i_sat, points)) in by_satellite.into_iter().enumerate() {
            let colour = Palette99::pick(i_colour).to_rgba();
            cc.draw_series(PointSeries::of_element(
                points,
                3,
                ShapeStyle::from(&colour).filled(),
                &|coord, size, style| EmptyElement::at(coord) + Circle::new((0, 0), size, style),
            ))
            .map_err(|e| DrawError::Tracks(e.to_string()))?
            .label(context.satellite_name(i_sat))
            .legend(move |(x, y)| Circle::new((x, y), 4, colour.filled()));
        }

        cc.configure_series_labels()
            .background_style(&WHITE.mix(0.8))
            .border_style(&BLACK)
            .draw()
            .map_err(|e| DrawError::Tracks(e.to_string()))?;

        root.present()
            .map_err(|e| DrawError::Plotters(Box::new(e)))?;
        Ok(())
    }

    pub(super) fn plot_window_stats(
        stats: &[WindowStats],
        title: &str,
        output: &Path,
    ) -> Result<(), DrawError> {
        let root = BitMapBackend::new(output, (X_PIXELS, Y_PIXELS / 2)).into_drawing_area();
        root.fill(&WHITE)
            .map_err(|e| DrawError::Plotters(Box::new(e)))?;
        let root = root
            .titled(title, ("sans-serif", 40))
            .map_err(|e| DrawError::Plotters(Box::new(e)))?;
        let panels = root.split_evenly((1, 2));

        let num_windows = stats.len() as f64;
        let max_count = stats
            .iter()
            .map(|s| s.close_sat_count)
            .max()
            .unwrap_or(0)
            .max(1) as f64;
        let max_weight = stats
            .iter()
            .map(|s| s.beam_weight_sum)
            .fold(0.0, f64::max)
            .max(1.0);

        let mut counts = ChartBuilder::on(&panels[0])
            .caption("Satellites per window", ("sans-serif", 25))
            .margin(15)
            .x_label_area_size(40)
            .y_label_area_size(50)
            .build_cartesian_2d(0.5..num_windows + 0.5, 0.0..max_count * 1.1)
            .map_err(|e| DrawError::WindowStats(e.to_string()))?;
        counts
            .configure_mesh()
            .x_desc("Window")
            .y_desc("Satellite count")
            .draw()
            .map_err(|e| DrawError::WindowStats(e.to_string()))?;
        counts
            .draw_series(stats.iter().map(|s| {
                let x = s.index as f64;
                Rectangle::new(
                    [(x - 0.3, 0.0), (x + 0.3, s.close_sat_count as f64)],
                    BLUE.filled(),
                )
            }))
            .map_err(|e| DrawError::WindowStats(e.to_string()))?;

        let mut weights = ChartBuilder::on(&panels[1])
            .caption("Beam-weighted satellite presence", ("sans-serif", 25))
            .margin(15)
            .x_label_area_size(40)
            .y_label_area_size(50)
            .build_cartesian_2d(0.5..num_windows + 0.5, 0.0..max_weight * 1.1)
            .map_err(|e| DrawError::WindowStats(e.to_string()))?;
        weights
            .configure_mesh()
            .x_desc("Window")
            .y_desc("Beam weight sum")
            .draw()
            .map_err(|e| DrawError::WindowStats(e.to_string()))?;
        let points: Vec<(f64, f64)> = stats
            .iter()
            .map(|s| (s.index as f64, s.beam_weight_sum))
            .collect();
        weights
            .draw_series(LineSeries::new(points.iter().copied(), &RED))
            .map_err(|e| DrawError::WindowStats(e.to_string()))?;
        weights
            .draw_series(PointSeries::of_element(
                points,
                4,
                ShapeStyle::from(&RED).filled(),
                &|coord, size, style| EmptyElement::at(coord) + Circle::new((0, 0), size, style),
            ))
            .map_err(|e| DrawError::WindowStats(e.to_string()))?;

        root.present()
            .map_err(|e| DrawError::Plotters(Box::new(e)))?;
        Ok(())
    }
}
