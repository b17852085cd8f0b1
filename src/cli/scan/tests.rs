// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Tests against scan arguments and converting arguments to parameters.

use std::io::Write;

use approx::assert_abs_diff_eq;
use clap::Parser;
use hifitime::Epoch;
use indoc::formatdoc;
use tempfile::{tempdir, Builder};

use super::*;
use crate::{
    constants::{DEFAULT_FIRST_NULL_DEG, HCRO_LAT_DEG},
    tests::iss_catalog_file,
};

fn get_args(catalog: &std::path::Path) -> ScanArgs {
    ScanArgs {
        args_file: None,
        gain_model_args: GainModelArgs::default(),
        scan_args: ScanCliArgs {
            catalog: Some(catalog.to_path_buf()),
            target: Some("cygnus-a".to_string()),
            observer: Some("hcro".to_string()),
            start: Some("2020-07-12 21:00:00".to_string()),
            ..Default::default()
        },
    }
}

#[test]
fn test_new_params_defaults() {
    let catalog = iss_catalog_file();
    let params = get_args(catalog.path()).parse().unwrap();

    assert_eq!(params.target.name, "Cygnus A");
    assert_eq!(params.context.num_satellites(), 1);
    assert!(params.context.precess);
    assert_abs_diff_eq!(
        params.context.observer.latitude_rad,
        HCRO_LAT_DEG.to_radians()
    );
    assert_eq!(
        *params.timestamps.first(),
        Epoch::from_gregorian_utc_hms(2020, 7, 12, 21, 0, 0)
    );
    assert_eq!(params.timestamps.len(), DEFAULT_DURATION_SECONDS as usize);
    assert_abs_diff_eq!(params.time_res.to_seconds(), DEFAULT_TIME_RES_SECONDS);

    let ScanSettings {
        policy,
        separation,
        min_elevation_deg,
    } = &params.settings;
    assert!(policy.has_gains());
    match policy {
        ClassificationPolicy::Gain {
            model,
            cutoff,
            search_radius_deg,
        } => {
            assert_abs_diff_eq!(
                model.get_scale_angle(),
                DEFAULT_FIRST_NULL_DEG.to_radians()
            );
            assert_abs_diff_eq!(cutoff.percent(), DEFAULT_GAIN_CUTOFF_PERCENT, epsilon = 1e-12);
            assert_abs_diff_eq!(*search_radius_deg, DEFAULT_SEARCH_RADIUS_DEG);
        }
        ClassificationPolicy::FixedAngle { .. } => unreachable!(),
    }
    assert_eq!(*separation, SeparationMethod::GreatCircle);
    assert_abs_diff_eq!(*min_elevation_deg, DEFAULT_MIN_ELEVATION_DEG);

    assert_eq!(params.output.prefix, "cygnus_a_20200712_210000");
    assert_eq!(params.output.directory, PathBuf::from("."));
}

#[test]
fn test_fixed_angle_policy() {
    let catalog = iss_catalog_file();
    let mut args = get_args(catalog.path());
    args.scan_args.policy = Some("fixed-angle".to_string());
    args.scan_args.threshold = Some(2.5);
    args.scan_args.separation = Some("planar".to_string());
    let params = args.parse().unwrap();
    match params.settings.policy {
        ClassificationPolicy::FixedAngle { threshold_deg } => {
            assert_abs_diff_eq!(threshold_deg, 2.5)
        }
        ClassificationPolicy::Gain { .. } => unreachable!(),
    }
    assert_eq!(params.settings.separation, SeparationMethod::Planar);

    let mut args = get_args(catalog.path());
    args.scan_args.policy = Some("fixed-angle".to_string());
    args.scan_args.threshold = Some(0.0);
    assert!(matches!(args.parse(), Err(SatRfiError::Configuration(_))));
}

#[test]
fn test_ra_dec_target() {
    let catalog = iss_catalog_file();
    let mut args = get_args(catalog.path());
    args.scan_args.target = None;
    args.scan_args.ra = Some("08h35m20.65525s".to_string());
    args.scan_args.dec = Some("-45d10m35.1545s".to_string());
    args.scan_args.target_name = Some("Vela pulsar".to_string());
    args.scan_args.output_prefix = Some("vela".to_string());
    let params = args.parse().unwrap();
    assert_eq!(params.target.name, "Vela pulsar");
    assert_abs_diff_eq!(
        params.target.radec.ra,
        TargetPreset::Vela.target().radec.ra,
        epsilon = 1e-12
    );
    assert_abs_diff_eq!(
        params.target.radec.dec,
        TargetPreset::Vela.target().radec.dec,
        epsilon = 1e-12
    );
    assert_eq!(params.output.prefix, "vela");
}

#[test]
fn test_observer_position() {
    let catalog = iss_catalog_file();
    let mut args = get_args(catalog.path());
    args.scan_args.observer_position = Some(vec![116.67, -26.70, 377.8]);
    let params = args.parse().unwrap();
    assert_abs_diff_eq!(params.context.observer.longitude_rad, 116.67f64.to_radians());
    assert_abs_diff_eq!(params.context.observer.latitude_rad, (-26.70f64).to_radians());
    assert_abs_diff_eq!(params.context.observer.height_metres, 377.8);
}

#[test]
fn test_bad_args() {
    let catalog = iss_catalog_file();

    let mut args = get_args(catalog.path());
    args.scan_args.start = None;
    assert!(matches!(args.parse(), Err(SatRfiError::Configuration(_))));

    let mut args = get_args(catalog.path());
    args.scan_args.target = None;
    args.scan_args.ra = Some("10.0".to_string());
    assert!(matches!(args.parse(), Err(SatRfiError::Configuration(_))));

    let mut args = get_args(catalog.path());
    args.scan_args.target = None;
    assert!(matches!(args.parse(), Err(SatRfiError::Configuration(_))));

    let mut args = get_args(catalog.path());
    args.scan_args.target = Some("crab".to_string());
    assert!(matches!(args.parse(), Err(SatRfiError::Configuration(_))));

    let mut args = get_args(catalog.path());
    args.scan_args.observer_position = Some(vec![116.67, -100.0, 377.8]);
    assert!(matches!(args.parse(), Err(SatRfiError::Configuration(_))));

    let mut args = get_args(catalog.path());
    args.scan_args.policy = Some("vibes".to_string());
    assert!(matches!(args.parse(), Err(SatRfiError::Configuration(_))));

    let mut args = get_args(catalog.path());
    args.scan_args.time_res = Some("0s".to_string());
    assert!(matches!(args.parse(), Err(SatRfiError::Configuration(_))));

    let mut args = get_args(catalog.path());
    args.scan_args.satellite_filter = Some("starlink".to_string());
    assert!(matches!(args.parse(), Err(SatRfiError::Configuration(_))));

    let mut args = get_args(catalog.path());
    args.scan_args.catalog = Some(PathBuf::from("/does/not/exist.tle"));
    assert!(matches!(args.parse(), Err(SatRfiError::DataSource(_))));

    let mut args = get_args(catalog.path());
    args.scan_args.dec = Some("-91".to_string());
    args.scan_args.ra = Some("10".to_string());
    assert!(matches!(args.parse(), Err(SatRfiError::Geometry(_))));
}

#[test]
fn test_satellite_filter_is_case_insensitive() {
    let catalog = iss_catalog_file();
    let mut args = get_args(catalog.path());
    args.scan_args.satellite_filter = Some("zarya".to_string());
    let params = args.parse().unwrap();
    assert_eq!(params.context.num_satellites(), 1);
}

#[test]
fn test_cli_parsing() {
    let args = ScanArgs::try_parse_from([
        "scan",
        "--catalog",
        "sats.tle",
        "--ra",
        "19h59m28.3s",
        "--dec",
        "-10d00m00s",
        "--start",
        "2026-01-21 13:00:00",
        "--duration",
        "10min",
        "--cutoff-db",
        "-17",
        "--gain-model",
        "gaussian",
        "--fwhm",
        "3",
        "--no-plots",
    ])
    .unwrap();
    assert!(args.args_file.is_none());
    assert_eq!(args.scan_args.catalog, Some(PathBuf::from("sats.tle")));
    assert_eq!(args.scan_args.dec.as_deref(), Some("-10d00m00s"));
    assert_eq!(args.scan_args.duration.as_deref(), Some("10min"));
    assert_eq!(args.scan_args.cutoff_db, Some(-17.0));
    assert_eq!(args.gain_model_args.gain_model.as_deref(), Some("gaussian"));
    assert_eq!(args.gain_model_args.fwhm, Some(3.0));
    assert!(args.scan_args.no_plots);
}

#[test]
fn test_arg_file_merging() {
    let catalog = iss_catalog_file();
    let mut arg_file = Builder::new().suffix(".toml").tempfile().unwrap();
    write!(
        arg_file,
        "{}",
        formatdoc! {r#"
            [gain-model]
            gain_model = "gaussian"
            fwhm = 10.0

            [scan]
            catalog = "{}"
            target = "vela"
            start = "2020-07-12 21:00:00"
            duration = "60s"
            no_precession = true
        "#, catalog.path().display()}
    )
    .unwrap();

    // The CLI target wins over the file's.
    let cli = ScanArgs {
        args_file: Some(arg_file.path().to_path_buf()),
        scan_args: ScanCliArgs {
            target: Some("cygnus-a".to_string()),
            ..Default::default()
        },
        ..Default::default()
    };
    let merged = cli.merge().unwrap();
    assert!(merged.args_file.is_none());
    assert_eq!(merged.scan_args.target.as_deref(), Some("cygnus-a"));
    assert_eq!(merged.scan_args.duration.as_deref(), Some("60s"));
    assert!(merged.scan_args.no_precession);
    assert_eq!(merged.gain_model_args.fwhm, Some(10.0));

    let params = merged.parse().unwrap();
    assert_eq!(params.target.name, "Cygnus A");
    assert_eq!(params.timestamps.len(), 60);
    assert!(!params.context.precess);

    // Merged arguments survive a trip through TOML, as with --save-toml.
    let toml_str = toml::to_string(&get_args(catalog.path())).unwrap();
    let round: ScanArgs = toml::from_str(&toml_str).unwrap();
    assert_eq!(round.scan_args.target.as_deref(), Some("cygnus-a"));
    assert_eq!(round.scan_args.start.as_deref(), Some("2020-07-12 21:00:00"));
}

#[test]
fn test_bad_arg_file() {
    let mut arg_file = Builder::new().suffix(".yaml").tempfile().unwrap();
    writeln!(arg_file, "target: vela").unwrap();
    let cli = ScanArgs {
        args_file: Some(arg_file.path().to_path_buf()),
        ..Default::default()
    };
    assert!(matches!(cli.merge(), Err(SatRfiError::ArgFile(_))));

    let mut arg_file = Builder::new().suffix(".json").tempfile().unwrap();
    writeln!(arg_file, "{{ not json").unwrap();
    let cli = ScanArgs {
        args_file: Some(arg_file.path().to_path_buf()),
        ..Default::default()
    };
    assert!(matches!(cli.merge(), Err(SatRfiError::ArgFile(_))));
}

#[test]
fn test_run_writes_outputs() {
    let catalog = iss_catalog_file();
    let out_dir = tempdir().unwrap();
    let mut args = get_args(catalog.path());
    args.scan_args.duration = Some("60s".to_string());
    args.scan_args.time_res = Some("10s".to_string());
    args.scan_args.output_dir = Some(out_dir.path().join("results"));
    args.scan_args.output_prefix = Some("test".to_string());
    args.scan_args.no_plots = true;
    let params = args.parse().unwrap();
    let written = params.run().unwrap();
    assert_eq!(written.len(), 3);
    for suffix in ["track.csv", "events.csv", "windows.csv"] {
        let path = out_dir.path().join("results").join(format!("test_{suffix}"));
        assert!(written.contains(&path));
        assert!(path.exists());
    }

    let track = std::fs::read_to_string(out_dir.path().join("results/test_track.csv")).unwrap();
    // A header, then at least one target row per timestep.
    assert!(track.starts_with("Time,Object,Altitude,Azimuth,Angular Separation"));
    assert_eq!(track.lines().filter(|l| l.contains(",Target,")).count(), 6);

    // A dry run doesn't write anything.
    let dry_dir = tempdir().unwrap();
    let mut args = get_args(catalog.path());
    args.scan_args.output_dir = Some(dry_dir.path().to_path_buf());
    args.run(true).unwrap();
    assert_eq!(std::fs::read_dir(dry_dir.path()).unwrap().count(), 0);
}

#[test]
fn test_slug() {
    assert_eq!(slug("Cygnus A"), "cygnus_a");
    assert_eq!(slug("  ISS (ZARYA) "), "iss_zarya");
    assert_eq!(slug("vela"), "vela");
}
