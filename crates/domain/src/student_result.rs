// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Raw per-student records as returned by the registry search.
//!
//! These are untrusted: nested result states may belong to other reporting
//! instances than the one the record was fetched for. See
//! [`crate::merge_grading_information`] for how they are filtered.

use crate::types::{ConcurrencyToken, ProjectTitle, iso_date};
use serde::{Deserialize, Serialize};
use time::Date;

/// The student a record belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentRecord {
    /// The student's registry uid.
    pub uid: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
}

impl StudentRecord {
    /// Returns the name as shown to reporters.
    #[must_use]
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

/// Where and how a result for this student is reported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportingContext {
    /// The reporting instance results are written against.
    pub instance_uid: String,
    /// The grade scale results must use.
    pub scale_id: String,
    /// Whether results must carry a project title.
    #[serde(default)]
    pub requires_title: bool,
}

/// Discriminates the two kinds of not-yet-certified results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PendingStatus {
    /// Editable draft.
    Draft,
    /// Marked ready for certification.
    Ready,
}

/// A result that has been entered but not certified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingResult {
    /// The result's own uid, used as the update key.
    pub result_id: String,
    /// The reporting instance this result was entered against.
    pub instance_uid: String,
    /// Draft or ready.
    pub status: PendingStatus,
    /// The registry's internal grade id.
    pub grade_id: i64,
    /// The scale the grade id belongs to.
    pub scale_id: String,
    /// The examination date.
    #[serde(with = "iso_date")]
    pub examination_date: Date,
    /// The project title, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_title: Option<ProjectTitle>,
    /// The concurrency token of the last modification.
    pub last_modified: ConcurrencyToken,
}

/// The latest certified result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CertifiedResult {
    /// The reporting instance the result was certified against.
    pub instance_uid: String,
    /// The registry's internal grade id.
    pub grade_id: i64,
    /// The scale the grade id belongs to.
    pub scale_id: String,
    /// The examination date.
    #[serde(with = "iso_date")]
    pub examination_date: Date,
}

/// One student's raw registry record for a destination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentResult {
    /// The student.
    pub student: StudentRecord,
    /// The uid under which new results for this student are created.
    pub result_id: String,
    /// The reporting context.
    pub reporting_context: ReportingContext,
    /// Pending results, possibly spanning unrelated instances.
    #[serde(default)]
    pub pending: Vec<PendingResult>,
    /// The latest certified result, possibly for an unrelated instance.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub certified: Option<CertifiedResult>,
}

impl StudentResult {
    /// Returns the student's uid.
    #[must_use]
    pub fn student_id(&self) -> &str {
        &self.student.uid
    }

    /// Returns the instance results are reported against.
    #[must_use]
    pub fn instance_uid(&self) -> &str {
        &self.reporting_context.instance_uid
    }
}
