// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod decision;
mod error;
mod grade_scale;
mod grading;
mod outcome;
mod permission;
mod section;
mod student_result;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use decision::{GradeDecision, ResultPayload, build_payload};
pub use error::DomainError;
pub use grade_scale::{
    GradeOption, LETTER_SCALE_ID, PASS_FAIL_SCALE_ID, code_for, internal_id_for, options_for,
};
pub use grading::{
    CertifiedView, GradingInformation, PendingView, belongs_to_instance, find_student,
    merge_grading_information, merge_student,
};
pub use outcome::{
    EchoedDraft, OutcomeError, OutcomeErrorCode, OutcomeStatus, SubmissionOutcome,
    SubmissionReport, SubmissionSummary,
};
pub use permission::{PermissionKey, PermissionRecord, PermissionSet, permission_keys};
pub use section::{
    ClassifiedSections, SectionClass, SectionRecord, classify_section, classify_sections,
};
pub use student_result::{
    CertifiedResult, PendingResult, PendingStatus, ReportingContext, StudentRecord, StudentResult,
};
pub use types::{ConcurrencyToken, Destination, ProjectTitle, Reporter, iso_date};
pub use validation::{parse_examination_date, require_non_empty, validate_decisions};
