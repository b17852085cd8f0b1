// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Deciding whether a satellite at some separation from the target
//! interferes.

use crate::{beam::GainModel, cutoff::GainCutoff};

/// How a satellite is deemed to be interfering with an observation.
#[derive(Debug)]
pub enum ClassificationPolicy {
    /// A satellite interferes if it is strictly closer than `threshold_deg` to
    /// the target.
    FixedAngle { threshold_deg: f64 },

    /// A satellite interferes if it is within `search_radius_deg` of the
    /// target and the gain of `model` at its separation is at least `cutoff`.
    Gain {
        model: Box<dyn GainModel>,
        cutoff: GainCutoff,
        search_radius_deg: f64,
    },
}

/// The result of classifying a single separation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Classification {
    pub interferes: bool,

    /// The linear gain at the separation. Only available for the gain policy.
    pub gain: Option<f64>,
}

impl ClassificationPolicy {
    /// Classify a satellite `separation_deg` degrees away from the target.
    pub fn classify(&self, separation_deg: f64) -> Classification {
        match self {
            ClassificationPolicy::FixedAngle { threshold_deg } => Classification {
                interferes: separation_deg < *threshold_deg,
                gain: None,
            },

            ClassificationPolicy::Gain {
                model,
                cutoff,
                search_radius_deg,
            } => {
                if separation_deg > *search_radius_deg {
                    return Classification {
                        interferes: false,
                        gain: None,
                    };
                }
                let gain = model.gain(separation_deg.to_radians());
                Classification {
                    interferes: gain >= cutoff.linear(),
                    gain: Some(gain),
                }
            }
        }
    }

    /// Whether this policy produces gains.
    pub fn has_gains(&self) -> bool {
        matches!(self, ClassificationPolicy::Gain { .. })
    }

    pub fn describe(&self) -> String {
        match self {
            ClassificationPolicy::FixedAngle { threshold_deg } => {
                format!("fixed angle: separation < {threshold_deg}°")
            }
            ClassificationPolicy::Gain {
                model,
                cutoff,
                search_radius_deg,
            } => format!(
                "{} gain >= {:.3}% ({:.2} dB) within {search_radius_deg}°",
                model.get_gain_model_type(),
                cutoff.percent(),
                cutoff.db()
            ),
        }
    }
}
