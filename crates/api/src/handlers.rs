// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handler functions.
//!
//! Each handler parses its request completely before the orchestrator is
//! called, so malformed input never reaches the registry.

use grade_transfer::{Registry, TransferOrchestrator};
use grade_transfer_domain::{
    Destination, DomainError, GradeDecision, GradingInformation, ProjectTitle, SubmissionReport,
    parse_examination_date, require_non_empty, validate_decisions,
};
use tracing::info;

use crate::error::{ApiError, translate_domain_error, translate_transfer_error};
use crate::request_response::{
    DestinationRequest, GradeDecisionRequest, ListDestinationsRequest, ListDestinationsResponse,
    ListGradeableResponse, SubmitResultsRequest, SubmitResultsResponse,
};

/// Parses a destination request.
///
/// # Errors
///
/// Returns an error if the request carries neither shape, both shapes, a
/// partial course-occasion shape, or a blank identifier.
pub fn parse_destination(request: &DestinationRequest) -> Result<Destination, ApiError> {
    let destination: Result<Destination, DomainError> = match (
        request.activity_occasion.as_deref(),
        request.course_occasion.as_deref(),
        request.reporting_instance.as_deref(),
    ) {
        (Some(activity), None, None) => {
            require_non_empty("activityOccasion", activity)
                .map(|()| Destination::activity_occasion(activity))
        }
        (None, Some(occasion), Some(instance)) => require_non_empty("courseOccasion", occasion)
            .and_then(|()| require_non_empty("reportingInstance", instance))
            .map(|()| Destination::course_occasion_module(occasion, instance)),
        (None, None, None) => Err(DomainError::InvalidDestination(String::from(
            "no destination given",
        ))),
        (Some(_), _, _) => Err(DomainError::InvalidDestination(String::from(
            "activityOccasion cannot be combined with courseOccasion or reportingInstance",
        ))),
        (None, _, _) => Err(DomainError::InvalidDestination(String::from(
            "courseOccasion and reportingInstance must be given together",
        ))),
    };

    destination.map_err(translate_domain_error)
}

/// Parses one decision request.
///
/// # Errors
///
/// Returns an error if the student id or grade is blank, or the examination
/// date is not a `YYYY-MM-DD` date.
pub fn parse_decision(request: &GradeDecisionRequest) -> Result<GradeDecision, ApiError> {
    require_non_empty("studentId", &request.student_id).map_err(translate_domain_error)?;
    require_non_empty("draft.grade", &request.draft.grade).map_err(translate_domain_error)?;
    let examination_date: time::Date =
        parse_examination_date(&request.draft.examination_date).map_err(translate_domain_error)?;

    let decision: GradeDecision = GradeDecision::new(
        &request.student_id,
        &request.draft.grade,
        examination_date,
    );

    Ok(match &request.draft.project_title {
        Some(title) => decision.with_project_title(ProjectTitle::new(
            &title.title,
            &title.alternative_title,
        )),
        None => decision,
    })
}

/// Parses a list of decision requests.
///
/// # Errors
///
/// Returns the first invalid decision's error, or an error if a student
/// appears more than once.
pub fn parse_decisions(requests: &[GradeDecisionRequest]) -> Result<Vec<GradeDecision>, ApiError> {
    let decisions: Vec<GradeDecision> = requests
        .iter()
        .map(parse_decision)
        .collect::<Result<_, _>>()?;
    validate_decisions(&decisions).map_err(translate_domain_error)?;
    Ok(decisions)
}

/// Lists the gradeable students of a destination.
///
/// # Errors
///
/// Returns an error if:
/// - the destination request is malformed
/// - any registry search page fails
/// - the permission check fails
pub async fn list_gradeable<R: Registry + 'static>(
    orchestrator: &TransferOrchestrator<R>,
    request: &DestinationRequest,
) -> Result<ListGradeableResponse, ApiError> {
    let destination: Destination = parse_destination(request)?;

    let students: Vec<GradingInformation> = orchestrator
        .list_gradeable(&destination)
        .await
        .map_err(translate_transfer_error)?;

    Ok(ListGradeableResponse {
        destination,
        students,
    })
}

/// Submits grades for a destination.
///
/// Per-student failures are reported in the response, never as an error.
///
/// # Errors
///
/// Returns an error if:
/// - the destination or any decision is malformed
/// - the fresh read of the destination fails
pub async fn submit_results<R: Registry + 'static>(
    orchestrator: &TransferOrchestrator<R>,
    request: &SubmitResultsRequest,
) -> Result<SubmitResultsResponse, ApiError> {
    let destination: Destination = parse_destination(&request.destination)?;
    let decisions: Vec<GradeDecision> = parse_decisions(&request.results)?;

    info!(
        reporter = %orchestrator.reporter().uid,
        destination = %destination,
        decisions = decisions.len(),
        "Submitting results"
    );

    let report: SubmissionReport = orchestrator
        .submit(destination, decisions)
        .await
        .map_err(translate_transfer_error)?;

    Ok(SubmitResultsResponse::from(report))
}

/// Resolves the destinations reachable from a set of LMS sections.
///
/// Sections that are not registry-linked are ignored.
///
/// # Errors
///
/// Returns an error if reporting instances of a course occasion cannot be
/// listed.
pub async fn list_destinations<R: Registry + 'static>(
    orchestrator: &TransferOrchestrator<R>,
    request: &ListDestinationsRequest,
) -> Result<ListDestinationsResponse, ApiError> {
    let destinations: Vec<Destination> = orchestrator
        .destinations_for(&request.sections)
        .await
        .map_err(translate_transfer_error)?;

    Ok(ListDestinationsResponse { destinations })
}
