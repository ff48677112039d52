// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    CertifiedResult, ConcurrencyToken, PASS_FAIL_SCALE_ID, PendingResult, PendingStatus,
    ReportingContext, StudentRecord, StudentResult,
};
use time::Date;
use time::macros::date;

pub const INSTANCE: &str = "instance-1";
pub const OTHER_INSTANCE: &str = "instance-other";

pub fn create_test_date() -> Date {
    date!(2023 - 06 - 01)
}

pub fn create_test_student_result(student_id: &str) -> StudentResult {
    StudentResult {
        student: StudentRecord {
            uid: student_id.to_string(),
            first_name: String::from("Ada"),
            last_name: String::from("Lovelace"),
        },
        result_id: format!("result-{student_id}"),
        reporting_context: ReportingContext {
            instance_uid: String::from(INSTANCE),
            scale_id: String::from(PASS_FAIL_SCALE_ID),
            requires_title: false,
        },
        pending: Vec::new(),
        certified: None,
    }
}

pub fn create_test_pending(
    result_id: &str,
    instance_uid: &str,
    status: PendingStatus,
    token: &str,
) -> PendingResult {
    PendingResult {
        result_id: result_id.to_string(),
        instance_uid: instance_uid.to_string(),
        status,
        grade_id: 131_658,
        scale_id: String::from(PASS_FAIL_SCALE_ID),
        examination_date: create_test_date(),
        project_title: None,
        last_modified: ConcurrencyToken::new(token),
    }
}

pub fn create_test_certified(instance_uid: &str) -> CertifiedResult {
    CertifiedResult {
        instance_uid: instance_uid.to_string(),
        grade_id: 131_659,
        scale_id: String::from(PASS_FAIL_SCALE_ID),
        examination_date: date!(2022 - 12 - 15),
    }
}
