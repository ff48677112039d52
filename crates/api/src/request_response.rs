// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.
//!
//! Requests carry raw wire values; nothing here is trusted until it has been
//! parsed by the handlers.

use grade_transfer_domain::{
    Destination, GradingInformation, SectionRecord, SubmissionOutcome, SubmissionReport,
    SubmissionSummary,
};

/// A destination as sent by a client.
///
/// Valid requests carry either `activityOccasion` alone, or
/// `courseOccasion` together with `reportingInstance`.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DestinationRequest {
    /// The examination activity occasion uid.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activity_occasion: Option<String>,
    /// The course occasion uid.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub course_occasion: Option<String>,
    /// The reporting instance uid within the course occasion.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reporting_instance: Option<String>,
}

/// A degree project title as sent by a client.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectTitleRequest {
    /// The title.
    pub title: String,
    /// The title in the alternative language.
    #[serde(default)]
    pub alternative_title: String,
}

/// The grade a client wants to record.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftRequest {
    /// The grade code, e.g. `P` or `B`.
    pub grade: String,
    /// The examination date (`YYYY-MM-DD`).
    pub examination_date: String,
    /// The degree project title, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_title: Option<ProjectTitleRequest>,
}

/// One decision as sent by a client.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeDecisionRequest {
    /// The student's registry uid.
    pub student_id: String,
    /// The grade to record.
    pub draft: DraftRequest,
}

/// API request to submit grades for a destination.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitResultsRequest {
    /// Where the grades go.
    pub destination: DestinationRequest,
    /// The decisions, in the order outcomes should be reported.
    pub results: Vec<GradeDecisionRequest>,
}

/// API request to resolve the destinations of a set of LMS sections.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListDestinationsRequest {
    /// The sections of the LMS course room.
    pub sections: Vec<SectionRecord>,
}

/// API response listing reachable destinations.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListDestinationsResponse {
    /// One entry per activity occasion and per reporting instance.
    pub destinations: Vec<Destination>,
}

/// API response listing the gradeable students of a destination.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListGradeableResponse {
    /// The destination that was listed.
    pub destination: Destination,
    /// One entry per student found, in registry sort order.
    pub students: Vec<GradingInformation>,
}

/// API response for a submission.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitResultsResponse {
    /// Counts by outcome status.
    pub summary: SubmissionSummary,
    /// One outcome per submitted decision, in submitted order.
    pub results: Vec<SubmissionOutcome>,
}

impl From<SubmissionReport> for SubmitResultsResponse {
    fn from(report: SubmissionReport) -> Self {
        Self {
            summary: report.summary,
            results: report.results,
        }
    }
}
