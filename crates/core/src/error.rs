// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::registry::RegistryError;
use grade_transfer_domain::DomainError;

/// Errors that abort a whole read or write pass.
///
/// Per-student failures during submission are never reported here; they
/// become error outcomes instead.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransferError {
    /// The request was malformed.
    #[error("Invalid request: {0}")]
    Validation(#[from] DomainError),
    /// A registry search page could not be fetched.
    #[error("Failed to aggregate registry search results: {0}")]
    Aggregation(#[source] RegistryError),
    /// The permission batch call failed.
    #[error("Permission check failed: {0}")]
    PermissionCheck(#[source] RegistryError),
    /// Reporting instances of a course occasion could not be listed.
    #[error("Failed to list reporting instances of occasion {occasion_uid}: {source}")]
    Discovery {
        /// The course occasion being expanded.
        occasion_uid: String,
        /// The underlying registry failure.
        source: RegistryError,
    },
    /// The write pass task ended without producing a report.
    #[error("Write pass did not complete: {0}")]
    Interrupted(String),
}
