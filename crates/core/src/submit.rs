// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::registry::{Registry, RegistryError, WrittenResult};
use grade_transfer_domain::{
    GradeDecision, GradingInformation, OutcomeErrorCode, ResultPayload, SubmissionOutcome,
    build_payload, find_student, internal_id_for,
};
use tracing::{debug, warn};

/// Maps a registry failure to the outcome code and message reported to the
/// caller.
#[must_use]
pub fn classify_registry_error(err: &RegistryError) -> (OutcomeErrorCode, String) {
    match err {
        RegistryError::Structured { message, .. } | RegistryError::Conflict { message, .. } => {
            (OutcomeErrorCode::RegistryError, message.clone())
        }
        RegistryError::Transport(message) => {
            (OutcomeErrorCode::UnknownRemoteError, message.clone())
        }
        RegistryError::Other(message) => (OutcomeErrorCode::UnknownError, message.clone()),
    }
}

/// Submits one decision against a freshly merged grading view.
///
/// An existing draft for the student is updated, carrying the draft's
/// concurrency token; otherwise a new draft is created. Local rejections
/// (unknown student, invalid grade, missing permission) issue no registry
/// call.
///
/// Never fails: every path produces exactly one outcome.
pub async fn submit_decision<R: Registry + ?Sized>(
    registry: &R,
    grading: &[GradingInformation],
    decision: &GradeDecision,
) -> SubmissionOutcome {
    let Some(info) = find_student(grading, &decision.student_id) else {
        debug!(student_id = %decision.student_id, "Student not in gradeable set");
        return SubmissionOutcome::failure(
            decision,
            OutcomeErrorCode::StudentNotGradeable,
            "Student is not in the gradeable set for this destination",
        );
    };

    let Some(grade_id) = internal_id_for(&info.scale_id, &decision.grade) else {
        debug!(
            student_id = %decision.student_id,
            grade = %decision.grade,
            scale_id = %info.scale_id,
            "Grade not on student's scale"
        );
        return SubmissionOutcome::failure(
            decision,
            OutcomeErrorCode::InvalidGrade,
            &format!(
                "Grade '{}' is not valid for this student's grade scale",
                decision.grade
            ),
        );
    };

    if !info.has_permission {
        return SubmissionOutcome::failure(
            decision,
            OutcomeErrorCode::PermissionError,
            "Not authorized to report results for this student",
        );
    }

    let payload: ResultPayload = build_payload(info, grade_id, decision);

    let written: Result<WrittenResult, RegistryError> = match &info.draft {
        Some(draft) => {
            debug!(
                student_id = %info.student_id,
                result_id = %draft.result_id,
                "Updating existing draft"
            );
            registry
                .update_result(&draft.result_id, &payload, &draft.concurrency_token)
                .await
        }
        None => {
            debug!(
                student_id = %info.student_id,
                instance_uid = %info.reporting_instance,
                "Creating new draft"
            );
            registry
                .create_result(&info.result_id, &info.reporting_instance, &payload)
                .await
        }
    };

    match written {
        Ok(result) => {
            debug!(
                student_id = %info.student_id,
                result_id = %result.result_id,
                "Result written"
            );
            SubmissionOutcome::success(decision)
        }
        Err(err) => {
            warn!(student_id = %info.student_id, error = %err, "Registry write failed");
            let (code, message): (OutcomeErrorCode, String) = classify_registry_error(&err);
            SubmissionOutcome::failure(decision, code, &message)
        }
    }
}
