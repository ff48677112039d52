// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use grade_transfer::{
    InMemoryRegistry, RegistrySnapshot, ReportingInstance, SnapshotEntry, TransferConfig,
    TransferOrchestrator,
};
use grade_transfer_domain::{
    LETTER_SCALE_ID, PASS_FAIL_SCALE_ID, PermissionKey, ReportingContext, Reporter,
    StudentRecord, StudentResult,
};
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::{DestinationRequest, DraftRequest, GradeDecisionRequest};

pub const OCCASION: &str = "occasion-1";
pub const INSTANCE: &str = "module-1";
pub const REPORTER: &str = "examiner-1";

fn create_test_entry(student_id: &str, last_name: &str, scale_id: &str) -> SnapshotEntry {
    SnapshotEntry {
        occasion_uid: String::from(OCCASION),
        activity_uids: Vec::new(),
        result: StudentResult {
            student: StudentRecord {
                uid: student_id.to_string(),
                first_name: String::from("Alex"),
                last_name: last_name.to_string(),
            },
            result_id: format!("result-{student_id}"),
            reporting_context: ReportingContext {
                instance_uid: String::from(INSTANCE),
                scale_id: scale_id.to_string(),
                requires_title: false,
            },
            pending: Vec::new(),
            certified: None,
        },
    }
}

/// Two pass/fail students and one letter-graded student, all permitted.
pub fn create_test_snapshot() -> RegistrySnapshot {
    let entries: Vec<SnapshotEntry> = vec![
        create_test_entry("S1", "Berg", PASS_FAIL_SCALE_ID),
        create_test_entry("S2", "Ek", PASS_FAIL_SCALE_ID),
        create_test_entry("S3", "Falk", LETTER_SCALE_ID),
    ];
    let granted: Vec<PermissionKey> = entries
        .iter()
        .map(|entry| PermissionKey::new(&entry.result.result_id, INSTANCE))
        .collect();

    RegistrySnapshot {
        entries,
        permissions: BTreeMap::from([(String::from(REPORTER), granted)]),
        reporting_instances: BTreeMap::from([(
            String::from(OCCASION),
            vec![ReportingInstance {
                instance_uid: String::from(INSTANCE),
                code: String::from("TEN1"),
                name: String::from("Written exam"),
            }],
        )]),
    }
}

pub fn create_test_orchestrator() -> (
    Arc<InMemoryRegistry>,
    TransferOrchestrator<InMemoryRegistry>,
) {
    let registry: Arc<InMemoryRegistry> = Arc::new(InMemoryRegistry::new(create_test_snapshot()));
    let orchestrator: TransferOrchestrator<InMemoryRegistry> = TransferOrchestrator::new(
        Arc::clone(&registry),
        Reporter::new(REPORTER),
        TransferConfig::default(),
    );
    (registry, orchestrator)
}

pub fn create_test_destination_request() -> DestinationRequest {
    DestinationRequest {
        activity_occasion: None,
        course_occasion: Some(String::from(OCCASION)),
        reporting_instance: Some(String::from(INSTANCE)),
    }
}

pub fn create_test_decision_request(student_id: &str, grade: &str) -> GradeDecisionRequest {
    GradeDecisionRequest {
        student_id: student_id.to_string(),
        draft: DraftRequest {
            grade: grade.to_string(),
            examination_date: String::from("2024-01-15"),
            project_title: None,
        },
    }
}
