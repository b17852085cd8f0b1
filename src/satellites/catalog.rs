// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Reading satellite element sets from files, and keeping a local cache of
//! Celestrak's general-perturbations catalogs.

use std::{
    fs::File,
    io::{Read, Write},
    path::{Path, PathBuf},
    str::FromStr,
    time::Duration,
};

use log::{debug, info, trace, warn};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

use super::{CatalogError, Satellite};
use crate::constants::{CATALOG_MAX_AGE_DAYS, CELESTRAK_GP_URL};

/// Supported element-set file formats.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumIter, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum CatalogFormat {
    /// Two- or three-line element sets.
    #[default]
    #[strum(to_string = "tle", serialize = "3le", serialize = "txt")]
    Tle,

    /// Orbit Mean-Elements Messages as JSON.
    Json,

    /// Orbit Mean-Elements Messages as CSV, one element set per row under a
    /// header of OMM keywords (as served by Celestrak).
    Csv,
}

impl CatalogFormat {
    /// Guess the format of a catalog file from its extension. Unknown
    /// extensions are assumed to be TLEs.
    pub fn from_path(path: &Path) -> CatalogFormat {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .and_then(|e| CatalogFormat::from_str(&e).ok())
            .unwrap_or_default()
    }

    fn extension(self) -> &'static str {
        match self {
            CatalogFormat::Tle => "tle",
            CatalogFormat::Json => "json",
            CatalogFormat::Csv => "csv",
        }
    }
}

/// Parse two- or three-line element sets. `source` is only used for error
/// messages.
pub fn parse_tle_text(text: &str, source: &str) -> Result<Vec<sgp4::Elements>, CatalogError> {
    // Trailing whitespace and blank lines upset the sgp4 parser.
    let cleaned = text
        .lines()
        .map(|l| l.trim_end())
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>();
    let is_2le = cleaned.first().map(|l| l.starts_with("1 ")).unwrap_or(false);
    // A trailing partial element set would otherwise be dropped silently.
    let lines_per_set = if is_2le { 2 } else { 3 };
    if cleaned.len() % lines_per_set != 0 {
        return Err(CatalogError::Tle {
            file: source.to_string(),
            err: format!(
                "{} lines is not a whole number of {lines_per_set}-line element sets",
                cleaned.len()
            ),
        });
    }
    let cleaned = cleaned.join("\n");

    let result = if is_2le {
        sgp4::parse_2les(&cleaned)
    } else {
        sgp4::parse_3les(&cleaned)
    };
    result.map_err(|e| CatalogError::Tle {
        file: source.to_string(),
        err: format!("{e:?}"),
    })
}

/// Parse a JSON array of OMM records.
pub fn parse_omm_json(text: &str, source: &str) -> Result<Vec<sgp4::Elements>, CatalogError> {
    serde_json::from_str::<Vec<sgp4::Elements>>(text).map_err(|e| CatalogError::Json {
        file: source.to_string(),
        err: e.to_string(),
    })
}

/// Parse CSV OMM records. Columns are matched by their OMM keywords (e.g.
/// "OBJECT_NAME", "MEAN_MOTION"), so their order doesn't matter.
pub fn parse_omm_csv(text: &str, source: &str) -> Result<Vec<sgp4::Elements>, CatalogError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());
    reader
        .deserialize()
        .collect::<Result<Vec<sgp4::Elements>, _>>()
        .map_err(|e| CatalogError::Csv {
            file: source.to_string(),
            err: e.to_string(),
        })
}

/// Turn element sets into [`Satellite`]s. Element sets that SGP4 can't
/// initialise are skipped with a warning, rather than failing the whole
/// catalog.
pub fn satellites_from_elements(elements: &[sgp4::Elements]) -> Vec<Satellite> {
    let mut sats = Vec::with_capacity(elements.len());
    let mut num_skipped = 0;
    for e in elements {
        match Satellite::from_elements(e) {
            Ok(s) => sats.push(s),
            Err(err) => {
                trace!("{err}");
                num_skipped += 1;
            }
        }
    }
    if num_skipped > 0 {
        warn!("Skipped {num_skipped} element sets that couldn't be used with SGP4");
    }
    sats
}

/// Read a satellite catalog from a local file. The format is guessed from
/// the file's extension.
pub fn read_catalog_file(path: &Path) -> Result<Vec<Satellite>, CatalogError> {
    read_catalog_file_as(path, CatalogFormat::from_path(path))
}

/// Read a satellite catalog of a known format from a local file.
pub fn read_catalog_file_as(
    path: &Path,
    format: CatalogFormat,
) -> Result<Vec<Satellite>, CatalogError> {
    if !path.exists() {
        return Err(CatalogError::FileDoesntExist(path.to_path_buf()));
    }
    debug!("Reading {format} catalog '{}'", path.display());

    let mut contents = String::new();
    File::open(path)?.read_to_string(&mut contents)?;
    let source = path.display().to_string();
    let elements = match format {
        CatalogFormat::Tle => parse_tle_text(&contents, &source)?,
        CatalogFormat::Json => parse_omm_json(&contents, &source)?,
        CatalogFormat::Csv => parse_omm_csv(&contents, &source)?,
    };
    let sats = satellites_from_elements(&elements);
    if sats.is_empty() {
        return Err(CatalogError::Empty(source));
    }
    info!("Loaded {} satellites from '{}'", sats.len(), path.display());
    Ok(sats)
}

/// The Celestrak URL for a group of satellites.
pub fn celestrak_url(group: &str, format: CatalogFormat) -> String {
    format!(
        "{CELESTRAK_GP_URL}?GROUP={group}&FORMAT={}",
        format.extension()
    )
}

/// How old a file is \[days\]. A file with a modification time in the future
/// is considered brand new.
fn file_age_days(path: &Path) -> Result<f64, CatalogError> {
    let modified = std::fs::metadata(path)?.modified()?;
    let age = modified.elapsed().unwrap_or_default();
    Ok(age.as_secs_f64() / 86400.0)
}

/// Whether a cached catalog needs to be downloaded again.
pub fn needs_refresh(path: &Path, max_age_days: f64) -> Result<bool, CatalogError> {
    if !path.exists() {
        return Ok(true);
    }
    Ok(file_age_days(path)? >= max_age_days)
}

fn download(url: &str) -> Result<Vec<u8>, CatalogError> {
    info!("Downloading {url}");
    let map_err = |e: reqwest::Error| CatalogError::Download {
        url: url.to_string(),
        err: e.to_string(),
    };
    let client = reqwest::blocking::Client::builder()
        .timeout(Duration::from_secs(60))
        .build()
        .map_err(map_err)?;
    let response = client.get(url).send().map_err(map_err)?;
    if !response.status().is_success() {
        return Err(CatalogError::Download {
            url: url.to_string(),
            err: format!("HTTP {}", response.status()),
        });
    }
    let bytes = response.bytes().map_err(map_err)?;
    debug!("Downloaded {} bytes", bytes.len());
    Ok(bytes.to_vec())
}

/// Replace the cached catalog at `dest` with `contents`. The new catalog is
/// written next to `dest` with a ".download" suffix and only moved over
/// `dest` once it has been read back successfully; an interrupted write or a
/// payload that doesn't parse leaves `dest` untouched.
pub fn replace_cached_catalog(
    contents: &[u8],
    format: CatalogFormat,
    dest: &Path,
) -> Result<Vec<Satellite>, CatalogError> {
    if let Some(parent) = dest.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let mut partial = dest.as_os_str().to_owned();
    partial.push(".download");
    let partial = PathBuf::from(partial);

    let result = File::create(&partial)
        .and_then(|mut f| {
            f.write_all(contents)?;
            f.sync_all()
        })
        .map_err(CatalogError::from)
        .and_then(|()| read_catalog_file_as(&partial, format));
    match result {
        Ok(sats) => {
            std::fs::rename(&partial, dest)?;
            debug!("Wrote {} bytes to '{}'", contents.len(), dest.display());
            Ok(sats)
        }
        Err(e) => {
            if let Err(rm_err) = std::fs::remove_file(&partial) {
                trace!("Couldn't remove '{}': {rm_err}", partial.display());
            }
            Err(e)
        }
    }
}

/// Load a Celestrak group (e.g. "active", "starlink"), using a cached copy in
/// `cache_dir` unless it is older than 7 days. If a refresh fails but an
/// older cached copy exists, the older copy is used.
pub fn load_group(
    group: &str,
    format: CatalogFormat,
    cache_dir: &Path,
) -> Result<Vec<Satellite>, CatalogError> {
    let path: PathBuf = cache_dir.join(format!("{group}.{}", format.extension()));
    if !needs_refresh(&path, CATALOG_MAX_AGE_DAYS)? {
        debug!("Using cached catalog '{}'", path.display());
        return read_catalog_file_as(&path, format);
    }

    let refreshed = download(&celestrak_url(group, format))
        .and_then(|contents| replace_cached_catalog(&contents, format, &path));
    match refreshed {
        Err(e) if path.exists() => {
            warn!("Couldn't refresh the '{group}' catalog: {e}");
            warn!("Using the stale cached copy '{}'", path.display());
            read_catalog_file_as(&path, format)
        }
        r => r,
    }
}
