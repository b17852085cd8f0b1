// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Scan an observation for satellites crossing the beam.

#[cfg(test)]
mod tests;

use std::{path::PathBuf, str::FromStr};

use clap::Parser;
use hifitime::Duration;
use itertools::Itertools;
use log::{debug, info, trace};
use marlu::LatLngHeight;
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};

use super::common::{
    display_warnings, GainModelArgs, InfoPrinter, Warn, ARG_FILE_HELP, OBSERVER_HELP,
    OBSERVER_POSITION_HELP, OBSERVER_PRESETS_COMMA_SEPARATED, TARGET_PRESETS_COMMA_SEPARATED,
};
use crate::{
    classify::ClassificationPolicy,
    constants::{
        DEFAULT_CATALOG_GROUP, DEFAULT_DURATION_SECONDS, DEFAULT_GAIN_CUTOFF_PERCENT,
        DEFAULT_MIN_ELEVATION_DEG, DEFAULT_SEARCH_RADIUS_DEG, DEFAULT_THRESHOLD_DEG,
        DEFAULT_TIME_RES_SECONDS,
    },
    context::ObservationContext,
    cutoff::GainCutoff,
    params::{OutputParams, ScanParams},
    satellites::{load_group, read_catalog_file, CatalogFormat, Satellite},
    scan::{time_grid, ScanSettings},
    separation::SeparationMethod,
    sexagesimal::{degrees_to_sexagesimal_dms, degrees_to_sexagesimal_hms},
    target::{ObserverPreset, Target, TargetError, TargetPreset},
    time::{format_compact, format_utc, parse_utc},
    unit_parsing::parse_duration,
    SatRfiError,
};

/// How satellites are deemed to be interfering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumIter, EnumString)]
#[strum(serialize_all = "kebab-case")]
pub(super) enum PolicyType {
    /// A fixed separation threshold.
    FixedAngle,

    /// A gain-model threshold.
    #[default]
    Gain,
}

lazy_static::lazy_static! {
    static ref POLICY_HELP: String =
        format!("How satellites are deemed to be interfering. Supported: {}. Default: {}", PolicyType::iter().join(", "), PolicyType::default());

    static ref SEPARATION_HELP: String =
        format!("How separations are calculated. Supported: {}. Default: {}", SeparationMethod::iter().join(", "), SeparationMethod::default());

    static ref CATALOG_GROUP_HELP: String =
        format!("The Celestrak group to download if --catalog isn't given. Cached copies are used for up to a week. Default: {DEFAULT_CATALOG_GROUP}");

    static ref CATALOG_FORMAT_HELP: String =
        format!("The format to download the Celestrak group in. Supported: {}. Default: {}", CatalogFormat::iter().join(", "), CatalogFormat::default());

    static ref TARGET_HELP: String =
        format!("A well-known target. Supported: {}", *TARGET_PRESETS_COMMA_SEPARATED);

    static ref DURATION_HELP: String =
        format!("How long to scan for. Units may be given, e.g. 10min, 1h. Default: {DEFAULT_DURATION_SECONDS}s");

    static ref TIME_RES_HELP: String =
        format!("The time between evaluated instants. Units may be given. Default: {DEFAULT_TIME_RES_SECONDS}s");

    static ref THRESHOLD_HELP: String =
        format!("Satellites strictly closer than this to the target interfere, if using the fixed-angle policy [degrees]. Default: {DEFAULT_THRESHOLD_DEG}");

    static ref CUTOFF_PERCENT_HELP: String =
        format!("Satellites where the gain is at least this percentage of the peak interfere, if using the gain policy. Default: {DEFAULT_GAIN_CUTOFF_PERCENT}");

    static ref SEARCH_RADIUS_HELP: String =
        format!("Only satellites within this separation are considered by the gain policy [degrees]. Default: {DEFAULT_SEARCH_RADIUS_DEG}");

    static ref MIN_ELEVATION_HELP: String =
        format!("Satellites below this elevation are ignored [degrees]; -90 classifies every satellite on separation alone. Default: {DEFAULT_MIN_ELEVATION_DEG}");
}

#[derive(Parser, Debug, Clone, Default, Serialize, Deserialize)]
pub(super) struct ScanCliArgs {
    /// A local satellite catalog: TLE/3LE text (.tle, .txt, .3le), OMM JSON
    /// (.json) or OMM CSV (.csv).
    #[clap(short, long, parse(from_str), help_heading = "CATALOG")]
    pub(super) catalog: Option<PathBuf>,

    #[clap(long, help = CATALOG_GROUP_HELP.as_str(), help_heading = "CATALOG")]
    pub(super) catalog_group: Option<String>,

    #[clap(long, help = CATALOG_FORMAT_HELP.as_str(), help_heading = "CATALOG")]
    pub(super) catalog_format: Option<String>,

    /// Where downloaded catalogs are kept. Default: the current directory.
    #[clap(long, parse(from_str), help_heading = "CATALOG")]
    pub(super) cache_dir: Option<PathBuf>,

    /// Only use satellites whose names contain this text (case insensitive),
    /// e.g. STARLINK.
    #[clap(long, help_heading = "CATALOG")]
    pub(super) satellite_filter: Option<String>,

    #[clap(short, long, help = TARGET_HELP.as_str(), help_heading = "TARGET")]
    pub(super) target: Option<String>,

    /// The target right ascension (J2000). Accepts degrees, "19h59m28.3s" or
    /// "19:59:28.3".
    #[clap(short, long, help_heading = "TARGET")]
    pub(super) ra: Option<String>,

    /// The target declination (J2000). Accepts degrees, "+40d44m02s" or
    /// "+40:44:02".
    #[clap(short, long, allow_hyphen_values = true, help_heading = "TARGET")]
    pub(super) dec: Option<String>,

    /// A name for a target given by RA and Dec. Default: "Target"
    #[clap(long, help_heading = "TARGET")]
    pub(super) target_name: Option<String>,

    #[clap(long, help = OBSERVER_HELP.as_str(), help_heading = "OBSERVER")]
    pub(super) observer: Option<String>,

    #[clap(
        long, help = OBSERVER_POSITION_HELP.as_str(), help_heading = "OBSERVER",
        number_of_values = 3,
        allow_hyphen_values = true,
        value_names = &["LONG_DEG", "LAT_DEG", "HEIGHT_M"]
    )]
    pub(super) observer_position: Option<Vec<f64>>,

    /// UT1 - UTC [seconds]. Default: 0
    #[clap(long, allow_hyphen_values = true, help_heading = "OBSERVER")]
    pub(super) dut1: Option<f64>,

    /// Don't precess the target to the coordinates of date.
    #[clap(long, help_heading = "OBSERVER")]
    #[serde(default)]
    pub(super) no_precession: bool,

    /// The first instant to scan (UTC), e.g. "2026-01-21 13:00:00".
    #[clap(short, long, help_heading = "TIME")]
    pub(super) start: Option<String>,

    #[clap(long, help = DURATION_HELP.as_str(), help_heading = "TIME")]
    pub(super) duration: Option<String>,

    #[clap(long, help = TIME_RES_HELP.as_str(), help_heading = "TIME")]
    pub(super) time_res: Option<String>,

    #[clap(short, long, help = POLICY_HELP.as_str(), help_heading = "CLASSIFICATION")]
    pub(super) policy: Option<String>,

    #[clap(long, help = THRESHOLD_HELP.as_str(), help_heading = "CLASSIFICATION")]
    pub(super) threshold: Option<f64>,

    #[clap(long, help = CUTOFF_PERCENT_HELP.as_str(), help_heading = "CLASSIFICATION")]
    pub(super) cutoff_percent: Option<f64>,

    /// The gain cutoff as a power ratio [dB], e.g. -17. Ignored if
    /// --cutoff-percent is also given.
    #[clap(long, allow_hyphen_values = true, help_heading = "CLASSIFICATION")]
    pub(super) cutoff_db: Option<f64>,

    #[clap(long, help = SEARCH_RADIUS_HELP.as_str(), help_heading = "CLASSIFICATION")]
    pub(super) search_radius: Option<f64>,

    #[clap(long, help = SEPARATION_HELP.as_str(), help_heading = "CLASSIFICATION")]
    pub(super) separation: Option<String>,

    #[clap(long, allow_hyphen_values = true, help = MIN_ELEVATION_HELP.as_str(), help_heading = "CLASSIFICATION")]
    pub(super) min_elevation: Option<f64>,

    /// The directory to write results to. Default: the current directory.
    #[clap(short, long, parse(from_str), help_heading = "OUTPUT FILES")]
    pub(super) output_dir: Option<PathBuf>,

    /// Every output file name starts with this. Default: the target name and
    /// start time.
    #[clap(long, help_heading = "OUTPUT FILES")]
    pub(super) output_prefix: Option<String>,

    /// Don't write a plot of the tracks.
    #[clap(long, help_heading = "OUTPUT FILES")]
    #[serde(default)]
    pub(super) no_plots: bool,
}

impl ScanCliArgs {
    fn merge(self, other: Self) -> Self {
        Self {
            catalog: self.catalog.or(other.catalog),
            catalog_group: self.catalog_group.or(other.catalog_group),
            catalog_format: self.catalog_format.or(other.catalog_format),
            cache_dir: self.cache_dir.or(other.cache_dir),
            satellite_filter: self.satellite_filter.or(other.satellite_filter),
            target: self.target.or(other.target),
            ra: self.ra.or(other.ra),
            dec: self.dec.or(other.dec),
            target_name: self.target_name.or(other.target_name),
            observer: self.observer.or(other.observer),
            observer_position: self.observer_position.or(other.observer_position),
            dut1: self.dut1.or(other.dut1),
            no_precession: self.no_precession || other.no_precession,
            start: self.start.or(other.start),
            duration: self.duration.or(other.duration),
            time_res: self.time_res.or(other.time_res),
            policy: self.policy.or(other.policy),
            threshold: self.threshold.or(other.threshold),
            cutoff_percent: self.cutoff_percent.or(other.cutoff_percent),
            cutoff_db: self.cutoff_db.or(other.cutoff_db),
            search_radius: self.search_radius.or(other.search_radius),
            separation: self.separation.or(other.separation),
            min_elevation: self.min_elevation.or(other.min_elevation),
            output_dir: self.output_dir.or(other.output_dir),
            output_prefix: self.output_prefix.or(other.output_prefix),
            no_plots: self.no_plots || other.no_plots,
        }
    }
}

#[derive(Parser, Debug, Clone, Default, Serialize, Deserialize)]
pub(super) struct ScanArgs {
    #[clap(name = "ARGUMENTS_FILE", help = ARG_FILE_HELP.as_str(), parse(from_os_str))]
    pub(super) args_file: Option<PathBuf>,

    #[clap(flatten)]
    #[serde(rename = "gain-model")]
    #[serde(default)]
    pub(super) gain_model_args: GainModelArgs,

    #[clap(flatten)]
    #[serde(rename = "scan")]
    #[serde(default)]
    pub(super) scan_args: ScanCliArgs,
}

impl ScanArgs {
    /// Both command-line and file arguments overlap in terms of what is
    /// available; this function consolidates everything that was specified into
    /// a single struct. Where applicable, it will prefer CLI parameters over
    /// those in the file.
    ///
    /// This function should only ever merge arguments, and not try to make
    /// sense of them.
    pub(super) fn merge(self) -> Result<ScanArgs, SatRfiError> {
        debug!("Merging command-line arguments with the argument file");

        let cli_args = self;

        if let Some(arg_file) = cli_args.args_file {
            // Read in the file arguments. Ensure all of the file args are
            // accounted for by pattern matching.
            let ScanArgs {
                args_file: _,
                gain_model_args,
                scan_args,
            } = unpack_arg_file!(arg_file);

            // Merge all the arguments, preferring the CLI args when available.
            Ok(ScanArgs {
                args_file: None,
                gain_model_args: cli_args.gain_model_args.merge(gain_model_args),
                scan_args: cli_args.scan_args.merge(scan_args),
            })
        } else {
            Ok(cli_args)
        }
    }

    fn parse(self) -> Result<ScanParams, SatRfiError> {
        debug!("{:#?}", self);

        // Expose all the struct fields to ensure they're all used.
        let ScanArgs {
            args_file: _,
            gain_model_args,
            scan_args:
                ScanCliArgs {
                    catalog,
                    catalog_group,
                    catalog_format,
                    cache_dir,
                    satellite_filter,
                    target,
                    ra,
                    dec,
                    target_name,
                    observer,
                    observer_position,
                    dut1,
                    no_precession,
                    start,
                    duration,
                    time_res,
                    policy,
                    threshold,
                    cutoff_percent,
                    cutoff_db,
                    search_radius,
                    separation,
                    min_elevation,
                    output_dir,
                    output_prefix,
                    no_plots,
                },
        } = self;

        // Validate everything that's cheap before touching the catalog.
        let target = parse_target(target, ra, dec, target_name)?;
        let observer = parse_observer(observer, observer_position)?;
        let dut1 = Duration::from_seconds(dut1.unwrap_or(0.0));

        let start = match start {
            Some(s) => parse_utc(&s)?,
            None => {
                return Err(SatRfiError::Configuration(
                    "No start time was given (--start)".to_string(),
                ))
            }
        };
        let duration = match duration {
            Some(d) => parse_duration(&d)?,
            None => Duration::from_seconds(DEFAULT_DURATION_SECONDS),
        };
        let time_res = match time_res {
            Some(r) => parse_duration(&r)?,
            None => Duration::from_seconds(DEFAULT_TIME_RES_SECONDS),
        };
        let timestamps = time_grid(start, duration, time_res)?;

        let mut target_printer = InfoPrinter::new(format!("Target: {}", target.name).into());
        target_printer.push_block(vec![
            format!(
                "RA:  {:.6}° ({})",
                target.radec.ra.to_degrees(),
                degrees_to_sexagesimal_hms(target.radec.ra.to_degrees())
            )
            .into(),
            format!(
                "Dec: {:.6}° ({})",
                target.radec.dec.to_degrees(),
                degrees_to_sexagesimal_dms(target.radec.dec.to_degrees())
            )
            .into(),
        ]);
        target_printer.push_block(vec![
            format!(
                "Observer: {:.6}°, {:.6}°, {} m",
                observer.longitude_rad.to_degrees(),
                observer.latitude_rad.to_degrees(),
                observer.height_metres
            )
            .into(),
            format!("DUT1: {:.4} s", dut1.to_seconds()).into(),
        ]);
        if no_precession {
            target_printer.push_line("Not precessing to the coordinates of date".into());
        }
        target_printer.display();

        let mut time_printer = InfoPrinter::new("Time info".into());
        time_printer.push_block(vec![
            format!("First timestamp: {}", format_utc(*timestamps.first())).into(),
            format!("Last timestamp:  {}", format_utc(*timestamps.last())).into(),
        ]);
        time_printer.push_line(
            format!(
                "{} timesteps at {} s resolution",
                timestamps.len(),
                time_res.to_seconds()
            )
            .into(),
        );
        time_printer.display();

        let policy_type = match policy {
            None => PolicyType::default(),
            Some(s) => PolicyType::from_str(&s.to_lowercase()).map_err(|_| {
                SatRfiError::Configuration(format!(
                    "Unrecognised classification policy '{s}'; supported policies are: {}",
                    PolicyType::iter().join(", ")
                ))
            })?,
        };
        let policy = match policy_type {
            PolicyType::FixedAngle => {
                if cutoff_percent.is_some() || cutoff_db.is_some() {
                    "A gain cutoff was given, but the fixed-angle policy doesn't use it".warn();
                }
                let threshold_deg = threshold.unwrap_or(DEFAULT_THRESHOLD_DEG);
                if !(threshold_deg.is_finite() && threshold_deg > 0.0) {
                    return Err(SatRfiError::Configuration(format!(
                        "The separation threshold must be positive; got {threshold_deg}"
                    )));
                }
                ClassificationPolicy::FixedAngle { threshold_deg }
            }

            PolicyType::Gain => {
                if threshold.is_some() {
                    "A separation threshold was given, but the gain policy doesn't use it".warn();
                }
                let cutoff = match (cutoff_percent, cutoff_db) {
                    (None, None) => GainCutoff::from_percent(DEFAULT_GAIN_CUTOFF_PERCENT)?,
                    (p, d) => GainCutoff::new(p, d)?,
                };
                let search_radius_deg = search_radius.unwrap_or(DEFAULT_SEARCH_RADIUS_DEG);
                if !(search_radius_deg.is_finite() && search_radius_deg > 0.0) {
                    return Err(SatRfiError::Configuration(format!(
                        "The search radius must be positive; got {search_radius_deg}"
                    )));
                }
                ClassificationPolicy::Gain {
                    model: gain_model_args.parse()?,
                    cutoff,
                    search_radius_deg,
                }
            }
        };
        let separation = match separation {
            None => SeparationMethod::default(),
            Some(s) => SeparationMethod::from_str(&s.to_lowercase()).map_err(|_| {
                SatRfiError::Configuration(format!(
                    "Unrecognised separation method '{s}'; supported methods are: {}",
                    SeparationMethod::iter().join(", ")
                ))
            })?,
        };
        let min_elevation_deg = min_elevation.unwrap_or(DEFAULT_MIN_ELEVATION_DEG);
        if !(-90.0..=90.0).contains(&min_elevation_deg) {
            return Err(SatRfiError::Configuration(format!(
                "The minimum elevation must be between -90 and 90 degrees; got {min_elevation_deg}"
            )));
        }
        if separation == SeparationMethod::Planar {
            "Planar separations don't wrap azimuths; satellites near north may be missed".warn();
        }

        let mut class_printer = InfoPrinter::new("Classification".into());
        class_printer.push_line(policy.describe().into());
        class_printer.push_block(vec![
            format!("Separation: {separation}").into(),
            format!("Minimum satellite elevation: {min_elevation_deg}°").into(),
        ]);
        class_printer.display();

        let satellites = load_satellites(
            catalog,
            catalog_group,
            catalog_format,
            cache_dir,
            satellite_filter,
        )?;
        let mut context = ObservationContext::new(observer, dut1, satellites);
        context.precess = !no_precession;

        let prefix = output_prefix.unwrap_or_else(|| {
            format!(
                "{}_{}",
                slug(&target.name),
                format_compact(*timestamps.first())
            )
        });
        let plot = if no_plots {
            false
        } else if cfg!(feature = "plotting") {
            true
        } else {
            "satrfi wasn't compiled with the \"plotting\" feature; not writing a plot".warn();
            false
        };
        let output = OutputParams {
            directory: output_dir.unwrap_or_else(|| PathBuf::from(".")),
            prefix,
            plot,
        };
        let mut output_printer = InfoPrinter::new("Output files".into());
        output_printer.push_line(format!("Directory: {}", output.directory.display()).into());
        output_printer.push_line(format!("Prefix: {}", output.prefix).into());
        output_printer.display();

        display_warnings();

        Ok(ScanParams {
            context,
            target,
            timestamps,
            time_res,
            settings: ScanSettings {
                policy,
                separation,
                min_elevation_deg,
            },
            output,
        })
    }

    pub(super) fn run(self, dry_run: bool) -> Result<(), SatRfiError> {
        debug!("Converting arguments into parameters");
        trace!("{:#?}", self);
        let params = self.parse()?;

        if dry_run {
            info!("Dry run -- exiting now.");
            return Ok(());
        }

        params.run()?;
        Ok(())
    }
}

fn parse_target(
    preset: Option<String>,
    ra: Option<String>,
    dec: Option<String>,
    name: Option<String>,
) -> Result<Target, TargetError> {
    match (preset, ra, dec) {
        (preset, Some(ra), Some(dec)) => {
            if let Some(p) = preset {
                format!("Ignoring the target preset '{p}' as an RA and Dec were given").warn();
            }
            Target::from_strings(name.as_deref().unwrap_or("Target"), &ra, &dec)
        }
        (_, Some(_), None) | (_, None, Some(_)) => Err(TargetError::OnlyOneRAOrDec),
        (Some(p), None, None) => {
            let preset = TargetPreset::from_str(&p.to_lowercase()).map_err(|_| {
                TargetError::UnknownPreset {
                    got: p,
                    valid: TARGET_PRESETS_COMMA_SEPARATED.clone(),
                }
            })?;
            let mut target = preset.target();
            if let Some(name) = name {
                target.name = name;
            }
            Ok(target)
        }
        (None, None, None) => Err(TargetError::NoTarget),
    }
}

fn parse_observer(
    preset: Option<String>,
    position: Option<Vec<f64>>,
) -> Result<LatLngHeight, TargetError> {
    match (preset, position) {
        (preset, Some(pos)) => {
            if let Some(p) = preset {
                format!("Ignoring the observer preset '{p}' as a position was given").warn();
            }
            match pos.as_slice() {
                [long, lat, height]
                    if (-90.0..=90.0).contains(lat) && long.is_finite() && height.is_finite() =>
                {
                    Ok(LatLngHeight {
                        longitude_rad: long.to_radians(),
                        latitude_rad: lat.to_radians(),
                        height_metres: *height,
                    })
                }
                _ => Err(TargetError::BadObserverPosition(pos)),
            }
        }
        (Some(p), None) => ObserverPreset::from_str(&p.to_lowercase())
            .map(ObserverPreset::position)
            .map_err(|_| TargetError::UnknownObserver {
                got: p,
                valid: OBSERVER_PRESETS_COMMA_SEPARATED.clone(),
            }),
        (None, None) => Ok(ObserverPreset::default().position()),
    }
}

fn load_satellites(
    catalog: Option<PathBuf>,
    group: Option<String>,
    format: Option<String>,
    cache_dir: Option<PathBuf>,
    filter: Option<String>,
) -> Result<Vec<Satellite>, SatRfiError> {
    let mut printer = InfoPrinter::new("Satellite catalog".into());
    let satellites = match catalog {
        Some(catalog) => {
            if group.is_some() {
                "A catalog file was given; ignoring the Celestrak group".warn();
            }
            printer.push_line(format!("File: {}", catalog.display()).into());
            read_catalog_file(&catalog)?
        }
        None => {
            let group = group.unwrap_or_else(|| DEFAULT_CATALOG_GROUP.to_string());
            let format = match format {
                None => CatalogFormat::default(),
                Some(f) => CatalogFormat::from_str(&f.to_lowercase()).map_err(|_| {
                    SatRfiError::Configuration(format!(
                        "Unrecognised catalog format '{f}'; supported formats are: {}",
                        CatalogFormat::iter().join(", ")
                    ))
                })?,
            };
            let cache_dir = cache_dir.unwrap_or_else(|| PathBuf::from("."));
            printer.push_block(vec![
                format!("Celestrak group: {group} ({format})").into(),
                format!("Cache directory: {}", cache_dir.display()).into(),
            ]);
            load_group(&group, format, &cache_dir)?
        }
    };

    let satellites = match filter {
        Some(f) => {
            let needle = f.to_lowercase();
            let filtered: Vec<Satellite> = satellites
                .into_iter()
                .filter(|s| s.name.to_lowercase().contains(&needle))
                .collect();
            if filtered.is_empty() {
                return Err(SatRfiError::Configuration(format!(
                    "No satellites have names containing '{f}'"
                )));
            }
            printer.push_line(format!("Satellites containing '{f}': {}", filtered.len()).into());
            filtered
        }
        None => {
            printer.push_line(format!("Satellites: {}", satellites.len()).into());
            satellites
        }
    };
    printer.display();
    Ok(satellites)
}

/// Make a name suitable for file names, e.g. "Cygnus A" -> "cygnus_a".
fn slug(name: &str) -> String {
    let s: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect();
    s.split('_').filter(|p| !p.is_empty()).join("_")
}
