// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read and write passes over one destination.
//!
//! An orchestrator is built per request and holds no state between passes.
//! The write pass always re-reads the registry: drafts and permissions may
//! have changed since the reporter listed the destination.

use crate::error::TransferError;
use crate::pagination::aggregate_pages;
use crate::registry::{Registry, ReportingInstance, SearchQuery, SortKey};
use crate::submit::submit_decision;
use futures::stream::{self, StreamExt};
use grade_transfer_domain::{
    ClassifiedSections, Destination, GradeDecision, GradingInformation, PermissionKey,
    PermissionRecord, PermissionSet, Reporter, SectionRecord, StudentResult, SubmissionOutcome,
    SubmissionReport, classify_sections, merge_grading_information, permission_keys,
    validate_decisions,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info};

/// Default number of submissions in flight at once.
pub const DEFAULT_SUBMISSION_CONCURRENCY: usize = 5;
/// Default registry search page size.
pub const DEFAULT_PAGE_SIZE: u32 = 100;

/// Tuning for read and write passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferConfig {
    /// Upper bound on concurrent registry writes.
    pub submission_concurrency: usize,
    /// Registry search page size.
    pub page_size: u32,
    /// Ordering for registry searches.
    pub sort_key: SortKey,
}

impl Default for TransferConfig {
    fn default() -> Self {
        Self {
            submission_concurrency: DEFAULT_SUBMISSION_CONCURRENCY,
            page_size: DEFAULT_PAGE_SIZE,
            sort_key: SortKey::default(),
        }
    }
}

impl TransferConfig {
    /// Creates a configuration, raising zero values to one.
    #[must_use]
    pub fn new(submission_concurrency: usize, page_size: u32) -> Self {
        Self {
            submission_concurrency: submission_concurrency.max(1),
            page_size: page_size.max(1),
            sort_key: SortKey::default(),
        }
    }

    /// Returns the search parameters for registry searches.
    #[must_use]
    pub const fn search_query(&self) -> SearchQuery {
        SearchQuery::new(self.sort_key, self.page_size)
    }
}

/// Drives listing and submission for one reporter.
#[derive(Debug)]
pub struct TransferOrchestrator<R> {
    registry: Arc<R>,
    reporter: Reporter,
    config: TransferConfig,
}

impl<R: Registry + 'static> TransferOrchestrator<R> {
    /// Creates an orchestrator for one request.
    #[must_use]
    pub const fn new(registry: Arc<R>, reporter: Reporter, config: TransferConfig) -> Self {
        Self {
            registry,
            reporter,
            config,
        }
    }

    /// Returns the reporter this orchestrator acts for.
    #[must_use]
    pub const fn reporter(&self) -> &Reporter {
        &self.reporter
    }

    /// Lists the gradeable students of a destination.
    ///
    /// # Errors
    ///
    /// Returns an error if any search page or the permission check fails.
    pub async fn list_gradeable(
        &self,
        destination: &Destination,
    ) -> Result<Vec<GradingInformation>, TransferError> {
        read_pass(&*self.registry, &self.reporter, &self.config, destination).await
    }

    /// Submits decisions for a destination.
    ///
    /// The pass runs in its own task so that in-flight writes finish even if
    /// the caller stops waiting. Outcomes are returned in decision order.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - the decision list is invalid
    /// - the fresh read pass fails
    /// - the pass task ends abnormally
    pub async fn submit(
        &self,
        destination: Destination,
        decisions: Vec<GradeDecision>,
    ) -> Result<SubmissionReport, TransferError> {
        validate_decisions(&decisions)?;

        let registry: Arc<R> = Arc::clone(&self.registry);
        let reporter: Reporter = self.reporter.clone();
        let config: TransferConfig = self.config;

        let pass = tokio::spawn(async move {
            write_pass(&*registry, &reporter, &config, &destination, &decisions).await
        });

        pass.await
            .map_err(|err| TransferError::Interrupted(err.to_string()))?
    }

    /// Resolves the destinations reachable from a set of LMS sections.
    ///
    /// Activity sections map directly; course occasions are expanded into
    /// one destination per reporting instance.
    ///
    /// # Errors
    ///
    /// Returns an error if reporting instances of an occasion cannot be
    /// listed.
    pub async fn destinations_for(
        &self,
        sections: &[SectionRecord],
    ) -> Result<Vec<Destination>, TransferError> {
        let classified: ClassifiedSections = classify_sections(sections);
        debug!(
            sections = sections.len(),
            activities = classified.activity_occasions.len(),
            course_occasions = classified.course_occasions.len(),
            "Classified sections"
        );

        let mut destinations: Vec<Destination> = classified
            .activity_occasions
            .iter()
            .map(|uid| Destination::activity_occasion(uid))
            .collect();

        for occasion_uid in &classified.course_occasions {
            let instances: Vec<ReportingInstance> = self
                .registry
                .reporting_instances(occasion_uid)
                .await
                .map_err(|source| TransferError::Discovery {
                    occasion_uid: occasion_uid.clone(),
                    source,
                })?;

            destinations.extend(instances.iter().map(|instance| {
                Destination::course_occasion_module(occasion_uid, &instance.instance_uid)
            }));
        }

        Ok(destinations)
    }
}

async fn search_destination<R: Registry + ?Sized>(
    registry: &R,
    query: SearchQuery,
    destination: &Destination,
) -> Result<Vec<StudentResult>, TransferError> {
    let results: Result<Vec<StudentResult>, _> = match destination {
        Destination::ActivityOccasion { uid } => {
            let occasions: Vec<String> = Vec::new();
            aggregate_pages(query, |query, page| {
                registry.search_by_activity(uid, &occasions, query, page)
            })
            .await
        }
        Destination::CourseOccasionModule {
            occasion_uid,
            instance_uid,
        } => {
            let occasions: Vec<String> = vec![occasion_uid.clone()];
            aggregate_pages(query, |query, page| {
                registry.search_by_instance(instance_uid, &occasions, query, page)
            })
            .await
        }
    };

    results.map_err(TransferError::Aggregation)
}

async fn read_pass<R: Registry + ?Sized>(
    registry: &R,
    reporter: &Reporter,
    config: &TransferConfig,
    destination: &Destination,
) -> Result<Vec<GradingInformation>, TransferError> {
    let results: Vec<StudentResult> =
        search_destination(registry, config.search_query(), destination).await?;

    let keys: Vec<PermissionKey> = permission_keys(&results);
    let permissions: PermissionSet = if keys.is_empty() {
        PermissionSet::empty()
    } else {
        let records: Vec<PermissionRecord> = registry
            .permission_batch(reporter, &keys)
            .await
            .map_err(TransferError::PermissionCheck)?;
        PermissionSet::from_records(&records)
    };

    let grading: Vec<GradingInformation> = merge_grading_information(&results, &permissions);

    info!(
        destination = %destination,
        students = grading.len(),
        permitted = grading.iter().filter(|info| info.has_permission).count(),
        "Read pass complete"
    );

    Ok(grading)
}

async fn write_pass<R: Registry + ?Sized>(
    registry: &R,
    reporter: &Reporter,
    config: &TransferConfig,
    destination: &Destination,
    decisions: &[GradeDecision],
) -> Result<SubmissionReport, TransferError> {
    let grading: Vec<GradingInformation> =
        read_pass(registry, reporter, config, destination).await?;

    let submissions: Vec<_> = decisions
        .iter()
        .map(|decision| submit_decision(registry, &grading, decision))
        .collect();

    // `buffered` yields in input order regardless of completion order.
    let outcomes: Vec<SubmissionOutcome> = stream::iter(submissions)
        .buffered(config.submission_concurrency.max(1))
        .collect()
        .await;

    let report: SubmissionReport = SubmissionReport::new(outcomes);

    info!(
        destination = %destination,
        success = report.summary.success,
        error = report.summary.error,
        "Write pass complete"
    );

    Ok(report)
}
