// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Code to parse strings into plain numbers or some quantity with a unit.

mod error;

pub use error::UnitParseError;

use hifitime::Duration;
use strum::IntoEnumIterator;
use strum_macros::{EnumIter, EnumString, IntoStaticStr};

#[derive(Debug, Clone, Copy, PartialEq, EnumIter, EnumString, IntoStaticStr)]
pub(crate) enum TimeFormat {
    /// Seconds
    S,

    /// Minutes
    Min,

    /// Hours
    H,
}

impl TimeFormat {
    fn seconds(self) -> f64 {
        match self {
            TimeFormat::S => 1.0,
            TimeFormat::Min => 60.0,
            TimeFormat::H => 3600.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, EnumIter, EnumString, IntoStaticStr)]
#[allow(non_camel_case_types)]
pub(crate) enum FreqFormat {
    Hz,
    kHz,
    MHz,
    GHz,
}

impl FreqFormat {
    fn hz(self) -> f64 {
        match self {
            FreqFormat::Hz => 1.0,
            FreqFormat::kHz => 1e3,
            FreqFormat::MHz => 1e6,
            FreqFormat::GHz => 1e9,
        }
    }
}

/// Split a string like "1.5 min" into a number and a unit, trying each of
/// `units` (case insensitive). A naked number yields `None` for the unit.
fn parse_with_units<U, I>(
    s: &str,
    units: I,
    unit_type: &'static str,
) -> Result<(f64, Option<U>), UnitParseError>
where
    U: Copy + Into<&'static str>,
    I: Iterator<Item = U>,
{
    // Try to parse a naked number.
    let maybe_number: Option<f64> = s.trim().parse().ok();
    if let Some(number) = maybe_number {
        return Ok((number, None));
    };

    // That didn't work; let's search over our supported formats.
    let suffix = s
        .trim()
        .trim_start_matches(|c: char| c.is_numeric() || c == '.' || c == '-' || c == '+')
        .trim();
    for unit in units {
        let unit_str: &'static str = unit.into();
        if suffix.to_uppercase() == unit_str.to_uppercase() {
            let prefix = s.trim().trim_end_matches(char::is_alphabetic).trim();
            let number: f64 = match prefix.parse() {
                Ok(n) => n,
                Err(_) => {
                    return Err(UnitParseError::GotUnitButCantParse {
                        input: s.to_string(),
                        unit: unit_type,
                    })
                }
            };
            return Ok((number, Some(unit)));
        }
    }

    // If we made it this far, we don't know how to parse the string.
    Err(UnitParseError::Unknown {
        input: s.to_string(),
        unit_type,
    })
}

/// Parse a string that may have a unit of time attached to it.
pub(crate) fn parse_time(s: &str) -> Result<(f64, Option<TimeFormat>), UnitParseError> {
    parse_with_units(s, TimeFormat::iter(), "time")
}

/// Parse a positive duration, e.g. "300", "300s", "5min" or "0.5h". Naked
/// numbers are seconds.
pub fn parse_duration(s: &str) -> Result<Duration, UnitParseError> {
    let (number, unit) = parse_time(s)?;
    let seconds = number * unit.map(TimeFormat::seconds).unwrap_or(1.0);
    if !(seconds.is_finite() && seconds > 0.0) {
        return Err(UnitParseError::NotPositive {
            input: s.to_string(),
            unit_type: "time",
        });
    }
    Ok(Duration::from_seconds(seconds))
}

/// Parse a string that may have a unit of frequency attached to it.
pub(crate) fn parse_freq(s: &str) -> Result<(f64, Option<FreqFormat>), UnitParseError> {
    parse_with_units(s, FreqFormat::iter(), "frequency")
}

/// Parse a positive frequency into Hz, e.g. "1.4GHz" or "1420 MHz". Naked
/// numbers are MHz.
pub fn parse_freq_hz(s: &str) -> Result<f64, UnitParseError> {
    let (number, unit) = parse_freq(s)?;
    let hz = number * unit.unwrap_or(FreqFormat::MHz).hz();
    if !(hz.is_finite() && hz > 0.0) {
        return Err(UnitParseError::NotPositive {
            input: s.to_string(),
            unit_type: "frequency",
        });
    }
    Ok(hz)
}
