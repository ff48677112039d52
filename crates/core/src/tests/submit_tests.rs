// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::helpers::{
    Call, INSTANCE, ScriptedRegistry, create_test_date, create_test_draft, create_test_student,
};
use crate::{RegistryError, classify_registry_error, submit_decision};
use grade_transfer_domain::{
    ConcurrencyToken, GradeDecision, GradingInformation, OutcomeError, OutcomeErrorCode,
    OutcomeStatus, PermissionRecord, PermissionSet, ProjectTitle, StudentResult,
    SubmissionOutcome, merge_grading_information,
};

fn merge_with_permission(students: &[StudentResult]) -> Vec<GradingInformation> {
    let records: Vec<PermissionRecord> = students
        .iter()
        .map(|student| PermissionRecord {
            result_id: student.result_id.clone(),
            instance_id: student.instance_uid().to_string(),
            granted: true,
        })
        .collect();
    merge_grading_information(students, &PermissionSet::from_records(&records))
}

fn create_pass_decision(student_id: &str) -> GradeDecision {
    GradeDecision::new(student_id, "P", create_test_date())
}

#[tokio::test]
async fn test_new_result_is_created() {
    let registry: ScriptedRegistry = ScriptedRegistry::default();
    let grading: Vec<GradingInformation> = merge_with_permission(&[create_test_student("S1")]);

    let outcome: SubmissionOutcome =
        submit_decision(&registry, &grading, &create_pass_decision("S1")).await;

    assert_eq!(outcome.status, OutcomeStatus::Success);
    assert_eq!(outcome.student_id, "S1");
    assert_eq!(outcome.draft.grade, "P");
    assert_eq!(outcome.draft.examination_date, create_test_date());
    assert!(outcome.error.is_none());

    let writes: Vec<Call> = registry.writes();
    assert_eq!(writes.len(), 1);
    match &writes[0] {
        Call::Create {
            result_parent_id,
            instance_uid,
            payload,
        } => {
            assert_eq!(result_parent_id, "result-S1");
            assert_eq!(instance_uid, INSTANCE);
            assert_eq!(payload.grade_id, 131_658);
            assert_eq!(payload.examination_date, create_test_date());
        }
        other => panic!("expected a create, got {other:?}"),
    }
}

#[tokio::test]
async fn test_unknown_student_is_not_gradeable() {
    let registry: ScriptedRegistry = ScriptedRegistry::default();
    let grading: Vec<GradingInformation> = merge_with_permission(&[create_test_student("S1")]);

    let outcome: SubmissionOutcome =
        submit_decision(&registry, &grading, &create_pass_decision("S2")).await;

    assert_eq!(outcome.status, OutcomeStatus::Error);
    assert_eq!(outcome.student_id, "S2");
    assert_eq!(
        outcome.error_code(),
        Some(OutcomeErrorCode::StudentNotGradeable)
    );
    assert!(registry.calls().is_empty());
}

#[tokio::test]
async fn test_grade_outside_scale_is_invalid() {
    let registry: ScriptedRegistry = ScriptedRegistry::default();
    let grading: Vec<GradingInformation> = merge_with_permission(&[create_test_student("S1")]);
    let decision: GradeDecision = GradeDecision::new("S1", "Z", create_test_date());

    let outcome: SubmissionOutcome = submit_decision(&registry, &grading, &decision).await;

    assert_eq!(outcome.error_code(), Some(OutcomeErrorCode::InvalidGrade));
    assert_eq!(outcome.draft.grade, "Z");
    assert!(registry.calls().is_empty());
}

#[tokio::test]
async fn test_grade_code_is_case_insensitive() {
    let registry: ScriptedRegistry = ScriptedRegistry::default();
    let grading: Vec<GradingInformation> = merge_with_permission(&[create_test_student("S1")]);
    let decision: GradeDecision = GradeDecision::new("S1", "p", create_test_date());

    let outcome: SubmissionOutcome = submit_decision(&registry, &grading, &decision).await;

    assert!(outcome.is_success());
    assert_eq!(outcome.draft.grade, "p");
}

#[tokio::test]
async fn test_missing_permission_is_rejected_locally() {
    let registry: ScriptedRegistry = ScriptedRegistry::default();
    let grading: Vec<GradingInformation> =
        merge_grading_information(&[create_test_student("S1")], &PermissionSet::empty());

    let outcome: SubmissionOutcome =
        submit_decision(&registry, &grading, &create_pass_decision("S1")).await;

    assert_eq!(outcome.error_code(), Some(OutcomeErrorCode::PermissionError));
    assert!(registry.calls().is_empty());
}

#[tokio::test]
async fn test_existing_draft_is_updated_with_its_token() {
    let registry: ScriptedRegistry = ScriptedRegistry::default();
    let mut student: StudentResult = create_test_student("S1");
    student.pending.push(create_test_draft("S1", "T"));
    let grading: Vec<GradingInformation> = merge_with_permission(&[student]);

    let outcome: SubmissionOutcome =
        submit_decision(&registry, &grading, &create_pass_decision("S1")).await;

    assert!(outcome.is_success());
    let writes: Vec<Call> = registry.writes();
    assert_eq!(writes.len(), 1);
    match &writes[0] {
        Call::Update {
            result_id,
            token,
            payload,
        } => {
            assert_eq!(result_id, "draft-S1");
            assert_eq!(token, &ConcurrencyToken::new("T"));
            assert_eq!(payload.grade_id, 131_658);
        }
        other => panic!("expected an update, got {other:?}"),
    }
}

#[tokio::test]
async fn test_create_failure_is_reported() {
    let registry: ScriptedRegistry = ScriptedRegistry {
        create_error: Some(RegistryError::Structured {
            code: String::from("resultat.finns"),
            message: String::from("A result already exists"),
        }),
        ..ScriptedRegistry::default()
    };
    let grading: Vec<GradingInformation> = merge_with_permission(&[create_test_student("S1")]);

    let outcome: SubmissionOutcome =
        submit_decision(&registry, &grading, &create_pass_decision("S1")).await;

    assert_eq!(outcome.status, OutcomeStatus::Error);
    let error: OutcomeError = outcome.error.unwrap();
    assert_eq!(error.code, OutcomeErrorCode::RegistryError);
    assert_eq!(error.message, "A result already exists");
}

#[tokio::test]
async fn test_concurrent_edit_conflict_is_surfaced() {
    let registry: ScriptedRegistry = ScriptedRegistry {
        update_error: Some(RegistryError::Conflict {
            result_id: String::from("draft-S1"),
            message: String::from("Result was modified by someone else"),
        }),
        ..ScriptedRegistry::default()
    };
    let mut student: StudentResult = create_test_student("S1");
    student.pending.push(create_test_draft("S1", "T"));
    let grading: Vec<GradingInformation> = merge_with_permission(&[student]);

    let outcome: SubmissionOutcome =
        submit_decision(&registry, &grading, &create_pass_decision("S1")).await;

    assert_eq!(outcome.error_code(), Some(OutcomeErrorCode::RegistryError));
}

#[tokio::test]
async fn test_transport_failure_is_unknown_remote_error() {
    let registry: ScriptedRegistry = ScriptedRegistry {
        create_error: Some(RegistryError::Transport(String::from("connection reset"))),
        ..ScriptedRegistry::default()
    };
    let grading: Vec<GradingInformation> = merge_with_permission(&[create_test_student("S1")]);

    let outcome: SubmissionOutcome =
        submit_decision(&registry, &grading, &create_pass_decision("S1")).await;

    assert_eq!(
        outcome.error_code(),
        Some(OutcomeErrorCode::UnknownRemoteError)
    );
}

#[test]
fn test_registry_error_classification() {
    assert_eq!(
        classify_registry_error(&RegistryError::Structured {
            code: String::from("x"),
            message: String::from("from registry"),
        }),
        (OutcomeErrorCode::RegistryError, String::from("from registry"))
    );
    assert_eq!(
        classify_registry_error(&RegistryError::Transport(String::from("reset"))).0,
        OutcomeErrorCode::UnknownRemoteError
    );
    assert_eq!(
        classify_registry_error(&RegistryError::Other(String::from("odd"))).0,
        OutcomeErrorCode::UnknownError
    );
}

#[tokio::test]
async fn test_project_title_sent_only_when_required() {
    let registry: ScriptedRegistry = ScriptedRegistry::default();
    let mut titled: StudentResult = create_test_student("S1");
    titled.reporting_context.requires_title = true;
    let grading: Vec<GradingInformation> =
        merge_with_permission(&[titled, create_test_student("S2")]);
    let title: ProjectTitle = ProjectTitle::new("Bridges", "Broar");

    for student_id in ["S1", "S2"] {
        let decision: GradeDecision =
            create_pass_decision(student_id).with_project_title(title.clone());
        let outcome: SubmissionOutcome = submit_decision(&registry, &grading, &decision).await;
        assert!(outcome.is_success());
    }

    let titles: Vec<Option<ProjectTitle>> = registry
        .writes()
        .into_iter()
        .map(|call| match call {
            Call::Create { payload, .. } => payload.project_title,
            other => panic!("expected a create, got {other:?}"),
        })
        .collect();
    assert_eq!(titles, vec![Some(title), None]);
}

#[tokio::test]
async fn test_permission_for_foreign_pair_does_not_authorize() {
    let registry: ScriptedRegistry = ScriptedRegistry::default();
    let student: StudentResult = create_test_student("S1");
    let permissions: PermissionSet = PermissionSet::from_records(&[PermissionRecord {
        result_id: student.result_id.clone(),
        instance_id: String::from("some-other-module"),
        granted: true,
    }]);
    let grading: Vec<GradingInformation> = merge_grading_information(&[student], &permissions);

    let outcome: SubmissionOutcome =
        submit_decision(&registry, &grading, &create_pass_decision("S1")).await;

    assert_eq!(outcome.error_code(), Some(OutcomeErrorCode::PermissionError));
    assert!(registry.writes().is_empty());
}
