// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Helpful functions and fixtures for tests.

use std::io::Write;

use indoc::indoc;
use tempfile::NamedTempFile;

use crate::satellites::{parse_tle_text, satellites_from_elements, Satellite};

/// The ISS on 2020-07-12.
pub(crate) const ISS_3LE: &str = indoc! {"
    ISS (ZARYA)
    1 25544U 98067A   20194.88612269 -.00002218  00000-0 -31515-4 0  9992
    2 25544  51.6461 221.2784 0001413  89.1723 280.4612 15.49507896236008
"};

pub(crate) fn iss_satellites() -> Vec<Satellite> {
    satellites_from_elements(&parse_tle_text(ISS_3LE, "test").unwrap())
}

/// Write [`ISS_3LE`] to a temporary ".tle" file.
pub(crate) fn iss_catalog_file() -> NamedTempFile {
    let mut f = tempfile::Builder::new().suffix(".tle").tempfile().unwrap();
    f.write_all(ISS_3LE.as_bytes()).unwrap();
    f.flush().unwrap();
    f
}
