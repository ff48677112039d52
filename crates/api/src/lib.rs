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
    clippy::unwrap_used,
    clippy::expect_used
)]

mod error;
mod handlers;
mod request_response;

#[cfg(test)]
mod tests;

pub use error::{ApiError, translate_domain_error, translate_transfer_error};
pub use handlers::{
    list_destinations, list_gradeable, parse_decision, parse_decisions, parse_destination,
    submit_results,
};
pub use request_response::{
    DestinationRequest, DraftRequest, GradeDecisionRequest, ListDestinationsRequest,
    ListDestinationsResponse, ListGradeableResponse, ProjectTitleRequest, SubmitResultsRequest,
    SubmitResultsResponse,
};
