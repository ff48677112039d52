// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::grading::GradingInformation;
use crate::types::{ProjectTitle, iso_date};
use serde::{Deserialize, Serialize};
use time::Date;

/// A reporter's intent to set one student's grade.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeDecision {
    /// The student's registry uid.
    pub student_id: String,
    /// The grade code to report, e.g. `P` or `B`.
    pub grade: String,
    /// The examination date.
    #[serde(with = "iso_date")]
    pub examination_date: Date,
    /// The project title, for destinations that require one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_title: Option<ProjectTitle>,
}

impl GradeDecision {
    /// Creates a decision without a project title.
    #[must_use]
    pub fn new(student_id: &str, grade: &str, examination_date: Date) -> Self {
        Self {
            student_id: student_id.to_string(),
            grade: grade.to_string(),
            examination_date,
            project_title: None,
        }
    }

    /// Attaches a project title.
    #[must_use]
    pub fn with_project_title(mut self, project_title: ProjectTitle) -> Self {
        self.project_title = Some(project_title);
        self
    }
}

/// The body of a registry create or update call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultPayload {
    /// The registry's internal grade id.
    pub grade_id: i64,
    /// The scale the grade id belongs to.
    pub scale_id: String,
    /// The examination date.
    #[serde(with = "iso_date")]
    pub examination_date: Date,
    /// The project title, only when the reporting context requires one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_title: Option<ProjectTitle>,
}

/// Builds the registry payload for a decision already resolved to a grade id.
///
/// The project title is dropped unless the student's reporting context
/// requires one.
#[must_use]
pub fn build_payload(
    info: &GradingInformation,
    grade_id: i64,
    decision: &GradeDecision,
) -> ResultPayload {
    let project_title: Option<ProjectTitle> = if info.requires_title {
        decision.project_title.clone()
    } else {
        None
    };

    ResultPayload {
        grade_id,
        scale_id: info.scale_id.clone(),
        examination_date: decision.examination_date,
        project_title,
    }
}
