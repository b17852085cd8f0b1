// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
Code for handling conversion to and from sexagesimal.

Signs are handled on the whole string, so "-0d30m" is -0.5°. Trailing
fields may be omitted, e.g. "19h59m" or "40d".
 */

use thiserror::Error;

/// Split off a leading sign. Returns whether the value is negative and the
/// remaining (unsigned) string.
fn split_sign(s: &str) -> (bool, &str) {
    let s = s.trim();
    if let Some(rest) = s.strip_prefix('-') {
        (true, rest.trim_start())
    } else if let Some(rest) = s.strip_prefix('+') {
        (false, rest.trim_start())
    } else {
        (false, s)
    }
}

fn parse_field(field: &str, whole: &str) -> Result<f64, SexagesimalError> {
    let field = field.trim();
    if field.starts_with('-') || field.starts_with('+') {
        return Err(SexagesimalError::MisplacedSign(whole.to_string()));
    }
    Ok(field.parse()?)
}

/// Parse "<a><first>[<b>m[<c>s]]" where `first` is 'd' or 'h'. Returns the
/// sign and the three (unsigned) fields.
fn parse_unit_fields(s: &str, first: char) -> Result<(bool, f64, f64, f64), SexagesimalError> {
    let (negative, unsigned) = split_sign(s);
    let lower = unsigned.to_lowercase();

    let (a, rest) = match lower.split_once(first) {
        Some(pair) => pair,
        None if first == 'h' => return Err(SexagesimalError::MissingH(s.to_string())),
        None => return Err(SexagesimalError::MissingD(s.to_string())),
    };
    let a = parse_field(a, s)?;

    let rest = rest.trim();
    if rest.is_empty() {
        return Ok((negative, a, 0.0, 0.0));
    }
    let (b, rest) = match rest.split_once('m') {
        Some(pair) => pair,
        None => return Err(SexagesimalError::MissingM(s.to_string())),
    };
    let b = parse_field(b, s)?;

    let rest = rest.trim();
    if rest.is_empty() {
        return Ok((negative, a, b, 0.0));
    }
    let c = match rest.strip_suffix('s') {
        Some(c) => parse_field(c, s)?,
        None => return Err(SexagesimalError::MissingS(s.to_string())),
    };

    Ok((negative, a, b, c))
}

fn parse_colon_fields(s: &str) -> Result<(bool, f64, f64, f64), SexagesimalError> {
    let (negative, unsigned) = split_sign(s);
    let mut split = Vec::with_capacity(3);
    for elem in unsigned.split(':') {
        split.push(parse_field(elem, s)?);
    }
    if split.is_empty() || split.len() > 3 {
        return Err(SexagesimalError::WrongFieldCount(s.to_string()));
    }
    split.resize(3, 0.0);
    Ok((negative, split[0], split[1], split[2]))
}

fn signed(negative: bool, value: f64) -> f64 {
    if negative {
        -value
    } else {
        value
    }
}

/// Convert a sexagesimal-formatted string delimited by colons to a float
/// \[degrees\]. The input is assumed to be in "degrees minutes seconds".
///
/// # Examples
///
/// ```
/// # use satrfi::sexagesimal::*;
/// # use approx::*;
/// # fn main() -> Result<(), SexagesimalError> {
/// let f = sexagesimal_colon_str_to_degrees("-22:58:52.56")?;
/// assert_abs_diff_eq!(f, -22.981267, epsilon = 1e-6);
/// # Ok(())
/// # }
/// ```
pub fn sexagesimal_colon_str_to_degrees(s: &str) -> Result<f64, SexagesimalError> {
    let (negative, d, m, s) = parse_colon_fields(s)?;
    Ok(signed(negative, sexagesimal_dms_to_degrees(d, m, s)))
}

/// As with [`sexagesimal_colon_str_to_degrees`], but the first field is in
/// hours.
pub fn sexagesimal_colon_hours_str_to_degrees(s: &str) -> Result<f64, SexagesimalError> {
    let (negative, h, m, s) = parse_colon_fields(s)?;
    Ok(signed(negative, sexagesimal_hms_to_float(h, m, s)))
}

/// Combine unsigned fields. A negative `d` is honoured for compatibility, but
/// string parsers always handle the sign themselves.
pub fn sexagesimal_dms_to_degrees(d: f64, m: f64, s: f64) -> f64 {
    let num = d.abs() + m / 60.0 + s / 3600.0;
    if d.is_sign_negative() {
        -num
    } else {
        num
    }
}

/// Convert a sexagesimal-formatted string in "degrees minutes seconds" to a
/// float \[degrees\].
///
/// # Examples
///
/// ```
/// # use satrfi::sexagesimal::*;
/// # use approx::*;
/// # fn main() -> Result<(), SexagesimalError> {
/// let f = sexagesimal_dms_string_to_degrees("-11d49m01.062s")?;
/// assert_abs_diff_eq!(f, -11.81696167, epsilon = 1e-6);
/// # Ok(())
/// # }
/// ```
pub fn sexagesimal_dms_string_to_degrees(dms: &str) -> Result<f64, SexagesimalError> {
    let (negative, d, m, s) = parse_unit_fields(dms, 'd')?;
    Ok(signed(negative, sexagesimal_dms_to_degrees(d, m, s)))
}

/// Convert a sexagesimal-formatted string in "hours minutes seconds" to a
/// float \[degrees\].
///
/// # Examples
///
/// ```
/// # use satrfi::sexagesimal::*;
/// # use approx::*;
/// # fn main() -> Result<(), SexagesimalError> {
/// let f = sexagesimal_hms_string_to_degrees("19h59m")?;
/// assert_abs_diff_eq!(f, 299.75, epsilon = 1e-10);
/// # Ok(())
/// # }
/// ```
pub fn sexagesimal_hms_string_to_degrees(hms: &str) -> Result<f64, SexagesimalError> {
    let (negative, h, m, s) = parse_unit_fields(hms, 'h')?;
    Ok(signed(negative, sexagesimal_hms_to_float(h, m, s)))
}

pub fn sexagesimal_hms_to_float(h: f64, m: f64, s: f64) -> f64 {
    sexagesimal_dms_to_degrees(15.0 * h, 15.0 * m, 15.0 * s)
}

/// Parse a right ascension \[degrees\]. Accepts "19h59m28.3s", "19:59:28.3"
/// (hours) or a plain number of degrees.
pub fn parse_ra(s: &str) -> Result<f64, SexagesimalError> {
    let s = s.trim();
    let ra = if let Ok(deg) = s.parse::<f64>() {
        deg
    } else if s.contains(':') {
        sexagesimal_colon_hours_str_to_degrees(s)?
    } else {
        sexagesimal_hms_string_to_degrees(s)?
    };
    if !(0.0..360.0).contains(&ra) {
        return Err(SexagesimalError::RaOutOfRange(ra));
    }
    Ok(ra)
}

/// Parse a declination \[degrees\]. Accepts "-38d6m50.8s", "-38:06:50.8" or
/// a plain number of degrees.
pub fn parse_dec(s: &str) -> Result<f64, SexagesimalError> {
    let s = s.trim();
    let dec = if let Ok(deg) = s.parse::<f64>() {
        deg
    } else if s.contains(':') {
        sexagesimal_colon_str_to_degrees(s)?
    } else {
        sexagesimal_dms_string_to_degrees(s)?
    };
    if !(-90.0..=90.0).contains(&dec) {
        return Err(SexagesimalError::DecOutOfRange(dec));
    }
    Ok(dec)
}

/// Convert a number in degrees to a sexagesimal-formatted string in "degrees
/// minutes seconds".
///
/// # Examples
///
/// ```
/// # use satrfi::sexagesimal::*;
/// let dms = degrees_to_sexagesimal_dms(-165.0169619);
/// assert_eq!(dms, "-165d01m01.0628s");
/// ```
pub fn degrees_to_sexagesimal_dms(f: f64) -> String {
    let negative = f < 0.0;
    let f_abs = f.abs();
    let degrees = f_abs.floor();
    let minutes = (f_abs - degrees) * 60.0;
    let seconds = (minutes - minutes.floor()) * 60.0;

    format!(
        "{sign}{deg}d{min:02}m{sec:02}.{frac:04}s",
        sign = if negative { "-" } else { "" },
        deg = degrees as u16,
        min = minutes.floor() as u8,
        sec = seconds.floor() as u8,
        // The 4 in 1e4 gives that many decimal places.
        frac = ((seconds - seconds.floor()) * 1e4) as u32,
    )
}

/// Convert a number in degrees to a sexagesimal-formatted string in "hours
/// minutes seconds".
///
/// # Examples
///
/// ```
/// # use satrfi::sexagesimal::*;
/// let hms = degrees_to_sexagesimal_hms(128.836_063_5);
/// assert_eq!(hms, "8h35m20.6552s");
/// ```
pub fn degrees_to_sexagesimal_hms(f: f64) -> String {
    let negative = f < 0.0;
    let f_abs = f.abs();
    let hours = (f_abs / 15.0).floor();
    let minutes = ((f_abs / 15.0 - hours) * 60.0).floor();
    let seconds = (((f_abs / 15.0 - hours) * 60.0) - minutes) * 60.0;

    format!(
        "{sign}{hrs}h{min:02}m{sec:02}.{frac:04}s",
        sign = if negative { "-" } else { "" },
        hrs = hours as u8,
        min = minutes as u8,
        sec = seconds.floor() as u8,
        frac = ((seconds - seconds.floor()) * 1e4) as u32,
    )
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SexagesimalError {
    /// Between one and three numbers (fields) are expected.
    #[error("Did not get between one and three sexagesimal fields: {0}")]
    WrongFieldCount(String),

    #[error("Did not find 'h' when attempting to read sexagesimal string: {0}")]
    MissingH(String),

    #[error("Did not find 'd' when attempting to read sexagesimal string: {0}")]
    MissingD(String),

    #[error("Did not find 'm' when attempting to read sexagesimal string: {0}")]
    MissingM(String),

    #[error("Did not find 's' when attempting to read sexagesimal string: {0}")]
    MissingS(String),

    #[error("A sign may only lead a sexagesimal string: {0}")]
    MisplacedSign(String),

    #[error("Right ascension must be within [0, 360) degrees; got {0}")]
    RaOutOfRange(f64),

    #[error("Declination must be within [-90, 90] degrees; got {0}")]
    DecOutOfRange(f64),

    #[error("{0}")]
    ParseFloat(#[from] std::num::ParseFloatError),
}
