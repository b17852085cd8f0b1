// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use approx::assert_abs_diff_eq;

use super::*;

#[test]
fn bessel_j1_matches_tabulated_values() {
    assert_abs_diff_eq!(bessel_j1(0.0), 0.0);
    assert_abs_diff_eq!(bessel_j1(1.0), 0.440_050_585_74, epsilon = 1e-7);
    assert_abs_diff_eq!(bessel_j1(-1.0), -0.440_050_585_74, epsilon = 1e-7);
    assert_abs_diff_eq!(bessel_j1(10.0), 0.043_472_746_17, epsilon = 1e-7);
    // First zero.
    assert_abs_diff_eq!(bessel_j1(3.831_705_970_2), 0.0, epsilon = 1e-7);
}

#[test]
fn airy_gain_is_unity_at_boresight() {
    for null_deg in [0.5, 1.0, 3.0, 10.0] {
        let g = airy_gain(0.0, f64::to_radians(null_deg)).unwrap();
        assert_eq!(g, 1.0);
    }
}

#[test]
fn airy_gain_is_bounded() {
    let null = 3.0_f64.to_radians();
    for i in 0..2000 {
        let theta = (i as f64 * 0.01).to_radians();
        let g = airy_gain(theta, null).unwrap();
        assert!((0.0..=1.0).contains(&g), "gain {g} at {theta} rad");
    }
}

#[test]
fn airy_gain_vanishes_at_first_null() {
    let null = 3.0_f64.to_radians();
    let g = airy_gain(null, null).unwrap();
    assert_abs_diff_eq!(g, 0.0, epsilon = 1e-10);

    // Half way to the null, the main lobe is still strong.
    let g = airy_gain(null / 2.0, null).unwrap();
    assert!(g > 0.3 && g < 0.5, "{g}");
}

#[test]
fn airy_gain_is_symmetric() {
    let null = 2.0_f64.to_radians();
    let theta = 0.7_f64.to_radians();
    assert_abs_diff_eq!(
        airy_gain(theta, null).unwrap(),
        airy_gain(-theta, null).unwrap()
    );
}

#[test]
fn airy_gain_rejects_bad_first_null() {
    assert_eq!(airy_gain(0.1, 0.0), Err(BeamError::InvalidFirstNull(0.0)));
    assert_eq!(airy_gain(0.1, -1.0), Err(BeamError::InvalidFirstNull(-1.0)));
    assert!(airy_gain(0.1, f64::NAN).is_err());
    assert!(airy_gain(0.1, f64::INFINITY).is_err());
    assert!(AiryBeam::new(0.0).is_err());
}

#[test]
fn first_null_from_aperture_works() {
    // 12 m dish at 1.4 GHz.
    let null = first_null_from_aperture(12.0, 1.4e9).unwrap();
    let expected = 1.22 * (299_792_458.0 / 1.4e9) / 12.0;
    assert_abs_diff_eq!(null, expected, epsilon = 1e-15);
    assert_abs_diff_eq!(null.to_degrees(), 1.2474, epsilon = 1e-3);

    assert_eq!(
        first_null_from_aperture(0.0, 1.4e9),
        Err(BeamError::InvalidDiameter(0.0))
    );
    assert_eq!(
        first_null_from_aperture(12.0, -1.0),
        Err(BeamError::InvalidFrequency(-1.0))
    );
}

#[test]
fn gaussian_is_half_power_at_half_fwhm() {
    let fwhm = 60.0_f64.to_radians();
    let beam = GaussianBeam::from_fwhm(fwhm).unwrap();
    assert_abs_diff_eq!(beam.gain(0.0), 1.0);
    assert_abs_diff_eq!(beam.gain(fwhm / 2.0), 0.5, epsilon = 1e-12);
    assert_abs_diff_eq!(beam.sigma(), fwhm / 2.354_820_045, epsilon = 1e-9);
    assert!(GaussianBeam::from_fwhm(0.0).is_err());
}

#[test]
fn create_gain_model_dispatches() {
    let m = create_gain_model(GainModelType::Airy, 3.0_f64.to_radians()).unwrap();
    assert_eq!(m.get_gain_model_type(), GainModelType::Airy);
    assert_abs_diff_eq!(m.get_scale_angle().to_degrees(), 3.0, epsilon = 1e-12);

    let m = create_gain_model(GainModelType::Gaussian, 1.0_f64.to_radians()).unwrap();
    assert_eq!(m.get_gain_model_type(), GainModelType::Gaussian);
    let gains = m.gains(&[0.0, 0.5_f64.to_radians()]);
    assert_abs_diff_eq!(gains[0], 1.0);
    assert_abs_diff_eq!(gains[1], 0.5, epsilon = 1e-12);

    assert!(create_gain_model(GainModelType::Airy, -1.0).is_err());
}

#[test]
fn gain_model_type_parses() {
    use std::str::FromStr;

    assert_eq!(GainModelType::from_str("airy"), Ok(GainModelType::Airy));
    assert_eq!(
        GainModelType::from_str("gaussian"),
        Ok(GainModelType::Gaussian)
    );
    assert!(GainModelType::from_str("fee").is_err());
    assert_eq!(GainModelType::default(), GainModelType::Airy);
}
