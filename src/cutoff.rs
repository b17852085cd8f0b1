// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Gain cutoffs. Users may specify a cutoff as a percentage of the boresight
//! gain or in decibels; internally only linear power units are used.

use log::warn;
use thiserror::Error;

/// A gain threshold in linear power units. A satellite "interferes" when the
/// gain at its separation from the target is at least this value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GainCutoff(f64);

impl GainCutoff {
    pub fn from_percent(percent: f64) -> Result<GainCutoff, CutoffError> {
        if !percent.is_finite() || !(0.0..=100.0).contains(&percent) {
            return Err(CutoffError::InvalidPercent(percent));
        }
        Ok(GainCutoff(percent / 100.0))
    }

    pub fn from_db(db: f64) -> Result<GainCutoff, CutoffError> {
        if !db.is_finite() {
            return Err(CutoffError::InvalidDb(db));
        }
        Ok(GainCutoff(10_f64.powf(db / 10.0)))
    }

    /// Build a cutoff from user input. Exactly one of the two should be
    /// supplied; if both are, the percentage is used.
    pub fn new(percent: Option<f64>, db: Option<f64>) -> Result<GainCutoff, CutoffError> {
        match (percent, db) {
            (Some(p), Some(db)) => {
                warn!("Both a percentage ({p}%) and a dB ({db} dB) gain cutoff were given; using the percentage");
                GainCutoff::from_percent(p)
            }
            (Some(p), None) => GainCutoff::from_percent(p),
            (None, Some(db)) => GainCutoff::from_db(db),
            (None, None) => Err(CutoffError::Missing),
        }
    }

    pub fn linear(self) -> f64 {
        self.0
    }

    pub fn percent(self) -> f64 {
        self.0 * 100.0
    }

    pub fn db(self) -> f64 {
        10.0 * self.0.log10()
    }
}

/// Convert a user-specified gain cutoff into linear power units.
pub fn gain_cutoff_to_linear(percent: Option<f64>, db: Option<f64>) -> Result<f64, CutoffError> {
    GainCutoff::new(percent, db).map(GainCutoff::linear)
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CutoffError {
    #[error("No gain cutoff was supplied; one of a percentage or a dB value is required")]
    Missing,

    #[error("A percentage gain cutoff must be between 0 and 100; got {0}")]
    InvalidPercent(f64),

    #[error("A dB gain cutoff must be finite; got {0}")]
    InvalidDb(f64),
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn percent_is_divided_by_100() {
        assert_abs_diff_eq!(gain_cutoff_to_linear(Some(50.0), None).unwrap(), 0.5);
        assert_abs_diff_eq!(gain_cutoff_to_linear(Some(2.0), None).unwrap(), 0.02);
        assert_abs_diff_eq!(gain_cutoff_to_linear(Some(0.0), None).unwrap(), 0.0);
    }

    #[test]
    fn db_is_exponentiated() {
        assert_abs_diff_eq!(gain_cutoff_to_linear(None, Some(0.0)).unwrap(), 1.0);
        assert_abs_diff_eq!(
            gain_cutoff_to_linear(None, Some(-3.0)).unwrap(),
            0.501_187_233_6,
            epsilon = 1e-9
        );
        assert_abs_diff_eq!(gain_cutoff_to_linear(None, Some(-20.0)).unwrap(), 0.01, epsilon = 1e-15);
        assert!(gain_cutoff_to_linear(None, Some(3.0)).unwrap() > 1.0);
    }

    #[test]
    fn percent_wins() {
        assert_abs_diff_eq!(gain_cutoff_to_linear(Some(10.0), Some(0.0)).unwrap(), 0.1);
    }

    #[test]
    fn missing_or_bad_cutoffs_are_errors() {
        assert_eq!(gain_cutoff_to_linear(None, None), Err(CutoffError::Missing));
        assert_eq!(
            gain_cutoff_to_linear(Some(101.0), None),
            Err(CutoffError::InvalidPercent(101.0))
        );
        assert!(gain_cutoff_to_linear(Some(-1.0), None).is_err());
        assert!(gain_cutoff_to_linear(None, Some(f64::NAN)).is_err());
    }

    #[test]
    fn conversions_round_trip() {
        let c = GainCutoff::from_db(-10.0).unwrap();
        assert_abs_diff_eq!(c.percent(), 10.0, epsilon = 1e-12);
        assert_abs_diff_eq!(c.db(), -10.0, epsilon = 1e-12);
    }
}
