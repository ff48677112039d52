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
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod error;
mod memory;
mod orchestrator;
mod pagination;
mod registry;
mod submit;

#[cfg(test)]
mod tests;

// Re-export public types and functions
pub use error::TransferError;
pub use memory::{InMemoryRegistry, RegistrySnapshot, SnapshotEntry};
pub use orchestrator::{
    DEFAULT_PAGE_SIZE, DEFAULT_SUBMISSION_CONCURRENCY, TransferConfig, TransferOrchestrator,
};
pub use pagination::aggregate_pages;
pub use registry::{
    Page, Registry, RegistryError, ReportingInstance, SearchQuery, SortKey, WrittenResult,
};
pub use submit::{classify_registry_error, submit_decision};
