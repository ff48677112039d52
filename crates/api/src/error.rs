// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use grade_transfer::TransferError;
use grade_transfer_domain::DomainError;

/// API-level errors.
///
/// These are distinct from domain/core errors and represent the API contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// The registry could not be read.
    UpstreamFailure {
        /// The registry operation that failed.
        operation: String,
        /// A human-readable description of the failure.
        message: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::UpstreamFailure { operation, message } => {
                write!(f, "Registry {operation} failed: {message}")
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match err {
        DomainError::InvalidDestination(msg) => ApiError::InvalidInput {
            field: String::from("destination"),
            message: msg,
        },
        DomainError::EmptyField { field } => ApiError::InvalidInput {
            field: field.to_string(),
            message: String::from("must not be empty"),
        },
        DomainError::InvalidExaminationDate { value, error } => ApiError::InvalidInput {
            field: String::from("draft.examinationDate"),
            message: format!("'{value}' is not a YYYY-MM-DD date: {error}"),
        },
        DomainError::DuplicateDecision { student_id } => ApiError::InvalidInput {
            field: String::from("studentId"),
            message: format!("Student '{student_id}' appears more than once"),
        },
    }
}

/// Translates a transfer error into an API error.
///
/// This translation is explicit and ensures core errors are not leaked directly.
#[must_use]
pub fn translate_transfer_error(err: TransferError) -> ApiError {
    match err {
        TransferError::Validation(domain_err) => translate_domain_error(domain_err),
        TransferError::Aggregation(source) => ApiError::UpstreamFailure {
            operation: String::from("search"),
            message: source.to_string(),
        },
        TransferError::PermissionCheck(source) => ApiError::UpstreamFailure {
            operation: String::from("permission check"),
            message: source.to_string(),
        },
        TransferError::Discovery {
            occasion_uid,
            source,
        } => ApiError::UpstreamFailure {
            operation: String::from("reporting instance lookup"),
            message: format!("course occasion {occasion_uid}: {source}"),
        },
        TransferError::Interrupted(msg) => ApiError::Internal { message: msg },
    }
}
