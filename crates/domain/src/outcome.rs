// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Per-student submission outcomes and their summary.

use crate::decision::GradeDecision;
use crate::types::iso_date;
use serde::{Deserialize, Serialize};
use time::Date;

/// Terminal status of one submitted decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeStatus {
    /// The registry accepted the write.
    Success,
    /// The decision was rejected locally or by the registry.
    Error,
}

impl OutcomeStatus {
    /// Returns the wire representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
        }
    }
}

impl std::fmt::Display for OutcomeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a single decision failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeErrorCode {
    /// The student is not in the gradeable set for the destination.
    StudentNotGradeable,
    /// The grade code is not on the student's scale.
    InvalidGrade,
    /// The reporter may not report for the student.
    PermissionError,
    /// The registry rejected the write with a structured error.
    RegistryError,
    /// The registry call failed without a structured error.
    UnknownRemoteError,
    /// Any other failure.
    UnknownError,
}

impl OutcomeErrorCode {
    /// Returns the wire representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::StudentNotGradeable => "student_not_gradeable",
            Self::InvalidGrade => "invalid_grade",
            Self::PermissionError => "permission_error",
            Self::RegistryError => "registry_error",
            Self::UnknownRemoteError => "unknown_remote_error",
            Self::UnknownError => "unknown_error",
        }
    }
}

impl std::fmt::Display for OutcomeErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error detail attached to a failed outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutcomeError {
    /// Machine-readable code.
    pub code: OutcomeErrorCode,
    /// Human-readable message.
    pub message: String,
}

/// The submitted draft, echoed back with every outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EchoedDraft {
    /// The grade code as submitted.
    pub grade: String,
    /// The examination date as submitted.
    #[serde(with = "iso_date")]
    pub examination_date: Date,
}

/// The result of submitting one decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionOutcome {
    /// The student the decision was for.
    pub student_id: String,
    /// Success or error.
    pub status: OutcomeStatus,
    /// The submitted draft.
    pub draft: EchoedDraft,
    /// Present only on error.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<OutcomeError>,
}

impl SubmissionOutcome {
    fn echo(decision: &GradeDecision) -> EchoedDraft {
        EchoedDraft {
            grade: decision.grade.clone(),
            examination_date: decision.examination_date,
        }
    }

    /// A successful outcome for `decision`.
    #[must_use]
    pub fn success(decision: &GradeDecision) -> Self {
        Self {
            student_id: decision.student_id.clone(),
            status: OutcomeStatus::Success,
            draft: Self::echo(decision),
            error: None,
        }
    }

    /// A failed outcome for `decision`.
    #[must_use]
    pub fn failure(decision: &GradeDecision, code: OutcomeErrorCode, message: &str) -> Self {
        Self {
            student_id: decision.student_id.clone(),
            status: OutcomeStatus::Error,
            draft: Self::echo(decision),
            error: Some(OutcomeError {
                code,
                message: message.to_string(),
            }),
        }
    }

    /// Returns `true` if the write succeeded.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status == OutcomeStatus::Success
    }

    /// Returns the error code, if any.
    #[must_use]
    pub fn error_code(&self) -> Option<OutcomeErrorCode> {
        self.error.as_ref().map(|error| error.code)
    }
}

/// Counts of outcomes by status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionSummary {
    /// Number of successful outcomes.
    pub success: usize,
    /// Number of failed outcomes.
    pub error: usize,
}

impl SubmissionSummary {
    /// Partitions `outcomes` by status.
    #[must_use]
    pub fn from_outcomes(outcomes: &[SubmissionOutcome]) -> Self {
        outcomes
            .iter()
            .fold(Self::default(), |mut summary, outcome| {
                match outcome.status {
                    OutcomeStatus::Success => summary.success += 1,
                    OutcomeStatus::Error => summary.error += 1,
                }
                summary
            })
    }
}

/// The aggregate result of a write pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionReport {
    /// Counts by status.
    pub summary: SubmissionSummary,
    /// One outcome per decision, in submitted order.
    pub results: Vec<SubmissionOutcome>,
}

impl SubmissionReport {
    /// Builds a report, deriving the summary from the outcomes.
    #[must_use]
    pub fn new(results: Vec<SubmissionOutcome>) -> Self {
        Self {
            summary: SubmissionSummary::from_outcomes(&results),
            results,
        }
    }
}
