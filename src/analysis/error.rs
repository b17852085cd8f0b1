// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use thiserror::Error;

use crate::time::TimeParseError;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalysisError {
    #[error("Line {line}: expected 'START,END' but got '{content}'")]
    BadWindowLine { line: usize, content: String },

    #[error("Line {line}: {err}")]
    Time { line: usize, err: TimeParseError },

    #[error("Line {line}: the window ends before it starts")]
    EndBeforeStart { line: usize },

    #[error("No time windows were supplied")]
    NoWindows,
}
