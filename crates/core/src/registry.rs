// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The registry collaborator interface.

use grade_transfer_domain::{
    ConcurrencyToken, PermissionKey, PermissionRecord, Reporter, ResultPayload, StudentResult,
};
use serde::{Deserialize, Serialize};
use std::future::Future;

/// Deterministic ordering for paged searches.
///
/// Paged results are only stable across calls when the search is sorted, so
/// every search carries one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    /// Family name, then given name, then uid.
    #[default]
    FamilyName,
    /// Given name, then family name, then uid.
    GivenName,
    /// Student uid.
    StudentUid,
}

impl SortKey {
    /// Returns the registry's name for this ordering.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::FamilyName => "family_name",
            Self::GivenName => "given_name",
            Self::StudentUid => "student_uid",
        }
    }
}

/// Parameters shared by every page of one search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchQuery {
    sort_key: SortKey,
    page_size: u32,
}

impl SearchQuery {
    /// Creates a query. A page size of zero is raised to one.
    #[must_use]
    pub const fn new(sort_key: SortKey, page_size: u32) -> Self {
        Self {
            sort_key,
            page_size: if page_size == 0 { 1 } else { page_size },
        }
    }

    /// Returns the sort key.
    #[must_use]
    pub const fn sort_key(&self) -> SortKey {
        self.sort_key
    }

    /// Returns the page size.
    #[must_use]
    pub const fn page_size(&self) -> u32 {
        self.page_size
    }
}

/// One page of a search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    /// The total number of matches as reported with this page.
    pub total_count: usize,
    /// The items on this page.
    pub items: Vec<T>,
}

/// A reportable sub-unit of a course occasion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportingInstance {
    /// The reporting instance uid.
    pub instance_uid: String,
    /// Short code, e.g. `TEN1`.
    pub code: String,
    /// Display name.
    pub name: String,
}

/// A result as stored after a create or update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenResult {
    /// The result's uid.
    pub result_id: String,
    /// The token of this write.
    pub concurrency_token: ConcurrencyToken,
}

/// Failures reported by the registry.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    /// The registry answered with a structured error body.
    #[error("Registry rejected the request ({code}): {message}")]
    Structured {
        /// The registry's error code.
        code: String,
        /// The registry's message.
        message: String,
    },
    /// The result was modified since its token was read.
    #[error("Result {result_id} was modified concurrently: {message}")]
    Conflict {
        /// The result being updated.
        result_id: String,
        /// The registry's message.
        message: String,
    },
    /// The call failed without a usable response.
    #[error("Registry transport failure: {0}")]
    Transport(String),
    /// Anything else.
    #[error("{0}")]
    Other(String),
}

/// The registry operations the transfer engine consumes.
///
/// Implementations must be shareable across the submission fan-out.
pub trait Registry: Send + Sync {
    /// Searches the results of a reporting instance, optionally narrowed to
    /// course occasions. Pages are numbered from 1.
    fn search_by_instance(
        &self,
        instance_uid: &str,
        occasion_uids: &[String],
        query: SearchQuery,
        page: u32,
    ) -> impl Future<Output = Result<Page<StudentResult>, RegistryError>> + Send;

    /// Searches the results of an examination activity occasion.
    fn search_by_activity(
        &self,
        activity_uid: &str,
        occasion_uids: &[String],
        query: SearchQuery,
        page: u32,
    ) -> impl Future<Output = Result<Page<StudentResult>, RegistryError>> + Send;

    /// Checks the reporter's permission for each pair in one call.
    fn permission_batch(
        &self,
        reporter: &Reporter,
        keys: &[PermissionKey],
    ) -> impl Future<Output = Result<Vec<PermissionRecord>, RegistryError>> + Send;

    /// Creates a draft result under a student's result parent.
    fn create_result(
        &self,
        result_parent_id: &str,
        instance_uid: &str,
        payload: &ResultPayload,
    ) -> impl Future<Output = Result<WrittenResult, RegistryError>> + Send;

    /// Updates a draft, guarded by the token it was read with.
    fn update_result(
        &self,
        result_id: &str,
        payload: &ResultPayload,
        token: &ConcurrencyToken,
    ) -> impl Future<Output = Result<WrittenResult, RegistryError>> + Send;

    /// Lists the reportable instances of a course occasion.
    fn reporting_instances(
        &self,
        occasion_uid: &str,
    ) -> impl Future<Output = Result<Vec<ReportingInstance>, RegistryError>> + Send;
}
