// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur during domain validation.
///
/// Every variant here is a request-level validation failure: it is raised
/// before any registry call and aborts the whole request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The destination does not have exactly one of the two accepted shapes.
    InvalidDestination(String),
    /// A required field is missing or blank.
    EmptyField {
        /// The offending field, in wire notation.
        field: &'static str,
    },
    /// The examination date is not a valid `YYYY-MM-DD` calendar date.
    InvalidExaminationDate {
        /// The rejected input.
        value: String,
        /// The parser's description of the problem.
        error: String,
    },
    /// The same student appears more than once in a decision list.
    DuplicateDecision {
        /// The repeated student id.
        student_id: String,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidDestination(msg) => write!(f, "Invalid destination: {msg}"),
            Self::EmptyField { field } => write!(f, "Field '{field}' must not be empty"),
            Self::InvalidExaminationDate { value, error } => {
                write!(f, "Invalid examination date '{value}': {error}")
            }
            Self::DuplicateDecision { student_id } => {
                write!(
                    f,
                    "Student '{student_id}' appears more than once in the submission"
                )
            }
        }
    }
}

impl std::error::Error for DomainError {}
