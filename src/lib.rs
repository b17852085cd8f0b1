// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
Flag satellites crossing a radio-telescope beam during an observation.

A fixed celestial target is tracked from an observer over a time window. The
angular separation between the target and every satellite in a catalog is
calculated at each instant, and satellites are classified as interfering either
with a fixed separation threshold or with a gain model (e.g. an Airy disk) and
a gain cutoff. Flagged samples are grouped into contiguous interference
windows.
 */

pub mod analysis;
pub mod beam;
pub mod classify;
mod cli;
pub mod constants;
pub mod context;
pub mod cutoff;
pub mod io;
pub mod params;
pub mod plotting;
pub mod satellites;
pub mod scan;
pub mod separation;
pub mod sexagesimal;
pub mod target;
pub mod time;
pub mod unit_parsing;
pub mod windows;

#[cfg(test)]
mod tests;

use crossbeam_utils::atomic::AtomicCell;

lazy_static::lazy_static! {
    /// Are progress bars being drawn? This should only ever be enabled by CLI
    /// code.
    static ref PROGRESS_BARS: AtomicCell<bool> = AtomicCell::new(false);
}

// Re-exports.
pub use beam::{airy_gain, GainModel, GainModelType};
pub use classify::ClassificationPolicy;
pub use cli::{SatRfi, SatRfiError};
pub use context::ObservationContext;
pub use cutoff::{gain_cutoff_to_linear, GainCutoff};
pub use satellites::Satellite;
pub use scan::{scan, ScanResults, ScanSettings};
pub use separation::SeparationMethod;
pub use target::Target;
pub use windows::{split_contiguous, InterferenceWindow};
