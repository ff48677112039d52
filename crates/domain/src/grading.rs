// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The merged, per-student grading view.
//!
//! The registry search over-fetches: nested pending and certified results
//! may belong to other modules of the same course. The merge discards those,
//! and hides all result content from reporters without permission.

use crate::grade_scale::{GradeOption, code_for, options_for};
use crate::permission::PermissionSet;
use crate::student_result::{PendingResult, PendingStatus, ReportingContext, StudentResult};
use crate::types::{ConcurrencyToken, ProjectTitle, iso_date};
use serde::{Deserialize, Serialize};
use time::Date;

/// A pending result as presented to the reporter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingView {
    /// The result's own uid.
    pub result_id: String,
    /// The grade code, when the grade id is known on the student's scale.
    pub grade: Option<String>,
    /// The registry's internal grade id.
    pub grade_id: i64,
    /// The examination date.
    #[serde(with = "iso_date")]
    pub examination_date: Date,
    /// The project title, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_title: Option<ProjectTitle>,
    /// Token to pass back when updating this result.
    pub concurrency_token: ConcurrencyToken,
}

/// A certified result as presented to the reporter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CertifiedView {
    /// The grade code, when the grade id is known on its scale.
    pub grade: Option<String>,
    /// The registry's internal grade id.
    pub grade_id: i64,
    /// The examination date.
    #[serde(with = "iso_date")]
    pub examination_date: Date,
}

/// One student's authoritative grading view for a destination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradingInformation {
    /// The student's registry uid.
    pub student_id: String,
    /// The student's display name.
    pub display_name: String,
    /// The uid under which new results are created.
    pub result_id: String,
    /// The reporting instance results are written against.
    pub reporting_instance: String,
    /// The student's grade scale.
    pub scale_id: String,
    /// The grades acceptable for this student.
    pub scale_options: Vec<GradeOption>,
    /// Whether a project title is required.
    pub requires_title: bool,
    /// Whether the reporter may report for this student.
    pub has_permission: bool,
    /// Existing draft for this instance.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub draft: Option<PendingView>,
    /// Existing ready-marked result for this instance.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ready: Option<PendingView>,
    /// Latest certified result for this instance.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub certified: Option<CertifiedView>,
}

/// Returns `true` if a nested result's instance is the reporting instance.
///
/// Anything else is over-fetched data from an unrelated module.
#[must_use]
pub fn belongs_to_instance(nested_instance_uid: &str, reporting_instance_uid: &str) -> bool {
    !nested_instance_uid.is_empty() && nested_instance_uid == reporting_instance_uid
}

fn pending_view(pending: &PendingResult) -> PendingView {
    PendingView {
        result_id: pending.result_id.clone(),
        grade: code_for(&pending.scale_id, pending.grade_id).map(str::to_string),
        grade_id: pending.grade_id,
        examination_date: pending.examination_date,
        project_title: pending.project_title.clone(),
        concurrency_token: pending.last_modified.clone(),
    }
}

fn find_pending(result: &StudentResult, status: PendingStatus) -> Option<PendingView> {
    result
        .pending
        .iter()
        .filter(|pending| belongs_to_instance(&pending.instance_uid, result.instance_uid()))
        .find(|pending| pending.status == status)
        .map(pending_view)
}

/// Merges one raw record with the permission set.
#[must_use]
pub fn merge_student(result: &StudentResult, permissions: &PermissionSet) -> GradingInformation {
    let context: &ReportingContext = &result.reporting_context;
    let has_permission: bool = permissions.is_granted(&result.result_id, &context.instance_uid);

    let (draft, ready, certified) = if has_permission {
        let certified: Option<CertifiedView> = result
            .certified
            .as_ref()
            .filter(|certified| belongs_to_instance(&certified.instance_uid, &context.instance_uid))
            .map(|certified| CertifiedView {
                grade: code_for(&certified.scale_id, certified.grade_id).map(str::to_string),
                grade_id: certified.grade_id,
                examination_date: certified.examination_date,
            });
        (
            find_pending(result, PendingStatus::Draft),
            find_pending(result, PendingStatus::Ready),
            certified,
        )
    } else {
        (None, None, None)
    };

    GradingInformation {
        student_id: result.student.uid.clone(),
        display_name: result.student.display_name(),
        result_id: result.result_id.clone(),
        reporting_instance: context.instance_uid.clone(),
        scale_id: context.scale_id.clone(),
        scale_options: options_for(&context.scale_id),
        requires_title: context.requires_title,
        has_permission,
        draft,
        ready,
        certified,
    }
}

/// Merges every aggregated record, preserving order.
#[must_use]
pub fn merge_grading_information(
    results: &[StudentResult],
    permissions: &PermissionSet,
) -> Vec<GradingInformation> {
    results
        .iter()
        .map(|result| merge_student(result, permissions))
        .collect()
}

/// Finds a student in a merged set.
#[must_use]
pub fn find_student<'a>(
    grading: &'a [GradingInformation],
    student_id: &str,
) -> Option<&'a GradingInformation> {
    grading.iter().find(|info| info.student_id == student_id)
}
