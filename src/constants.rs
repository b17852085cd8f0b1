// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
Useful constants.

All constants *must* be double precision.
 */

pub use std::f64::consts::{FRAC_PI_2, PI, TAU};

/// The first zero of the first-order Bessel function of the first kind, to
/// the precision used by the Airy gain model.
pub const AIRY_FIRST_NULL_X: f64 = 3.8317;

/// The Rayleigh-criterion factor relating the Airy first null to the
/// wavelength over the aperture diameter.
pub const RAYLEIGH_FACTOR: f64 = 1.22;

/// FWHM = 2 sqrt(2 ln 2) sigma.
pub const FWHM_FACTOR: f64 = 2.354_820_045_030_949_3;

/// Speed of light in a vacuum \[metres per second\].
pub const VEL_C: f64 = 299_792_458.0;

/// WGS84 semi-major axis \[kilometres\].
pub const WGS84_A_KM: f64 = 6378.137;

/// WGS84 flattening.
pub const WGS84_F: f64 = 1.0 / 298.257_223_563;

/// The default angular threshold used by the fixed-angle classification
/// policy \[degrees\].
pub const DEFAULT_THRESHOLD_DEG: f64 = 1.4;

/// The default radius around the target within which satellites are
/// considered by the gain classification policy \[degrees\].
pub const DEFAULT_SEARCH_RADIUS_DEG: f64 = 15.0;

/// The default Airy first-null angle \[degrees\].
pub const DEFAULT_FIRST_NULL_DEG: f64 = 3.0;

/// The default gain cutoff \[percent\].
pub const DEFAULT_GAIN_CUTOFF_PERCENT: f64 = 2.0;

/// The default scan time resolution \[seconds\].
pub const DEFAULT_TIME_RES_SECONDS: f64 = 1.0;

/// The default observation duration \[seconds\].
pub const DEFAULT_DURATION_SECONDS: f64 = 300.0;

/// Satellites below this elevation are not flagged \[degrees\]. -90 turns
/// the cut off, so that every satellite is classified on separation alone.
pub const DEFAULT_MIN_ELEVATION_DEG: f64 = 0.0;

/// The default FWHM used for beam-weighted window statistics \[degrees\].
pub const DEFAULT_WEIGHTING_FWHM_DEG: f64 = 60.0;

/// Cached satellite catalogs older than this are downloaded again \[days\].
pub const CATALOG_MAX_AGE_DAYS: f64 = 7.0;

/// The base URL of Celestrak's general-perturbations element sets.
pub const CELESTRAK_GP_URL: &str = "https://celestrak.org/NORAD/elements/gp.php";

/// The Celestrak group used when no catalog is specified.
pub const DEFAULT_CATALOG_GROUP: &str = "active";

/// Warkworth Radio Astronomical Observatory, New Zealand.
pub const WARKWORTH_LAT_DEG: f64 = -36.0;
pub const WARKWORTH_LONG_DEG: f64 = 174.0;
pub const WARKWORTH_HEIGHT_M: f64 = 128.0;

/// Hat Creek Radio Observatory, California.
pub const HCRO_LAT_DEG: f64 = 40.817_804_9;
pub const HCRO_LONG_DEG: f64 = -121.469_541_3;
pub const HCRO_HEIGHT_M: f64 = 986.0;
