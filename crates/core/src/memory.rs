// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! An in-memory registry backed by a JSON snapshot.
//!
//! Used by the command-line driver to rehearse transfers offline, and by
//! tests that need a registry with real paging and token semantics.

use crate::registry::{
    Page, Registry, RegistryError, ReportingInstance, SearchQuery, SortKey, WrittenResult,
};
use grade_transfer_domain::{
    ConcurrencyToken, PendingResult, PendingStatus, PermissionKey, PermissionRecord, Reporter,
    ResultPayload, StudentResult,
};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use tokio::sync::{Mutex, MutexGuard};
use tracing::debug;

/// A student's record together with where it can be found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotEntry {
    /// The course occasion the student is registered on.
    pub occasion_uid: String,
    /// Examination activity occasions the student is signed up for.
    #[serde(default)]
    pub activity_uids: Vec<String>,
    /// The student's record.
    pub result: StudentResult,
}

/// The full contents of an in-memory registry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrySnapshot {
    /// Student records.
    #[serde(default)]
    pub entries: Vec<SnapshotEntry>,
    /// Granted permission pairs by reporter uid.
    #[serde(default)]
    pub permissions: BTreeMap<String, Vec<PermissionKey>>,
    /// Reporting instances by course occasion uid.
    #[serde(default)]
    pub reporting_instances: BTreeMap<String, Vec<ReportingInstance>>,
}

#[derive(Debug)]
struct MemoryState {
    snapshot: RegistrySnapshot,
    writes: u64,
}

impl MemoryState {
    fn search<P>(&self, query: SearchQuery, page: u32, matches: P) -> Page<StudentResult>
    where
        P: Fn(&SnapshotEntry) -> bool,
    {
        let mut found: Vec<&StudentResult> = self
            .snapshot
            .entries
            .iter()
            .filter(|entry| matches(entry))
            .map(|entry| &entry.result)
            .collect();
        found.sort_by(|a, b| compare(query.sort_key(), a, b));

        let page_size: usize = usize::try_from(query.page_size()).unwrap_or(usize::MAX);
        let skip: usize = usize::try_from(page.saturating_sub(1))
            .unwrap_or(usize::MAX)
            .saturating_mul(page_size);

        Page {
            total_count: found.len(),
            items: found
                .into_iter()
                .skip(skip)
                .take(page_size)
                .cloned()
                .collect(),
        }
    }
}

/// Issues the token of the next accepted write.
fn issue_token(writes: &mut u64) -> ConcurrencyToken {
    *writes += 1;
    ConcurrencyToken::new(&format!("v{writes}"))
}

fn find_pending_mut<'a>(
    snapshot: &'a mut RegistrySnapshot,
    result_id: &str,
) -> Option<&'a mut PendingResult> {
    snapshot
        .entries
        .iter_mut()
        .flat_map(|entry| entry.result.pending.iter_mut())
        .find(|pending| pending.result_id == result_id)
}

fn compare(sort_key: SortKey, a: &StudentResult, b: &StudentResult) -> Ordering {
    let (sa, sb) = (&a.student, &b.student);
    match sort_key {
        SortKey::FamilyName => (&sa.last_name, &sa.first_name, &sa.uid)
            .cmp(&(&sb.last_name, &sb.first_name, &sb.uid)),
        SortKey::GivenName => (&sa.first_name, &sa.last_name, &sa.uid)
            .cmp(&(&sb.first_name, &sb.last_name, &sb.uid)),
        SortKey::StudentUid => sa.uid.cmp(&sb.uid),
    }
}

fn occasion_matches(entry: &SnapshotEntry, occasion_uids: &[String]) -> bool {
    occasion_uids.is_empty() || occasion_uids.contains(&entry.occasion_uid)
}

fn not_found(what: &str) -> RegistryError {
    RegistryError::Structured {
        code: String::from("not_found"),
        message: format!("{what} does not exist"),
    }
}

/// A [`Registry`] held entirely in memory.
#[derive(Debug)]
pub struct InMemoryRegistry {
    state: Mutex<MemoryState>,
}

impl InMemoryRegistry {
    /// Creates a registry from a snapshot.
    #[must_use]
    pub fn new(snapshot: RegistrySnapshot) -> Self {
        Self {
            state: Mutex::new(MemoryState {
                snapshot,
                writes: 0,
            }),
        }
    }

    /// Parses a snapshot from JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON does not describe a snapshot.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json).map(Self::new)
    }

    /// Returns a copy of the current contents.
    pub async fn snapshot(&self) -> RegistrySnapshot {
        self.state.lock().await.snapshot.clone()
    }
}

impl Registry for InMemoryRegistry {
    async fn search_by_instance(
        &self,
        instance_uid: &str,
        occasion_uids: &[String],
        query: SearchQuery,
        page: u32,
    ) -> Result<Page<StudentResult>, RegistryError> {
        let state: MutexGuard<'_, MemoryState> = self.state.lock().await;
        Ok(state.search(query, page, |entry| {
            entry.result.instance_uid() == instance_uid && occasion_matches(entry, occasion_uids)
        }))
    }

    async fn search_by_activity(
        &self,
        activity_uid: &str,
        occasion_uids: &[String],
        query: SearchQuery,
        page: u32,
    ) -> Result<Page<StudentResult>, RegistryError> {
        let state: MutexGuard<'_, MemoryState> = self.state.lock().await;
        Ok(state.search(query, page, |entry| {
            entry.activity_uids.iter().any(|uid| uid == activity_uid)
                && occasion_matches(entry, occasion_uids)
        }))
    }

    async fn permission_batch(
        &self,
        reporter: &Reporter,
        keys: &[PermissionKey],
    ) -> Result<Vec<PermissionRecord>, RegistryError> {
        let state: MutexGuard<'_, MemoryState> = self.state.lock().await;
        let granted: &[PermissionKey] = state
            .snapshot
            .permissions
            .get(&reporter.uid)
            .map(Vec::as_slice)
            .unwrap_or_default();

        Ok(keys
            .iter()
            .map(|key| PermissionRecord {
                result_id: key.result_id.clone(),
                instance_id: key.instance_id.clone(),
                granted: granted.contains(key),
            })
            .collect())
    }

    async fn create_result(
        &self,
        result_parent_id: &str,
        instance_uid: &str,
        payload: &ResultPayload,
    ) -> Result<WrittenResult, RegistryError> {
        let mut guard: MutexGuard<'_, MemoryState> = self.state.lock().await;
        let state: &mut MemoryState = &mut guard;

        let entry: &mut SnapshotEntry = state
            .snapshot
            .entries
            .iter_mut()
            .find(|entry| {
                entry.result.result_id == result_parent_id
                    && entry.result.instance_uid() == instance_uid
            })
            .ok_or_else(|| not_found(&format!("Result parent {result_parent_id}")))?;

        if entry
            .result
            .pending
            .iter()
            .any(|pending| pending.instance_uid == instance_uid)
        {
            return Err(RegistryError::Structured {
                code: String::from("pending_result_exists"),
                message: format!(
                    "A pending result already exists for {result_parent_id} on {instance_uid}"
                ),
            });
        }

        let token: ConcurrencyToken = issue_token(&mut state.writes);
        let result_id: String = format!("{result_parent_id}.{}", token.as_str());

        entry.result.pending.push(PendingResult {
            result_id: result_id.clone(),
            instance_uid: instance_uid.to_string(),
            status: PendingStatus::Draft,
            grade_id: payload.grade_id,
            scale_id: payload.scale_id.clone(),
            examination_date: payload.examination_date,
            project_title: payload.project_title.clone(),
            last_modified: token.clone(),
        });

        debug!(result_id = %result_id, "Created draft in memory");
        Ok(WrittenResult {
            result_id,
            concurrency_token: token,
        })
    }

    async fn update_result(
        &self,
        result_id: &str,
        payload: &ResultPayload,
        token: &ConcurrencyToken,
    ) -> Result<WrittenResult, RegistryError> {
        let mut guard: MutexGuard<'_, MemoryState> = self.state.lock().await;
        let state: &mut MemoryState = &mut guard;

        let pending: &mut PendingResult = find_pending_mut(&mut state.snapshot, result_id)
            .ok_or_else(|| not_found(&format!("Result {result_id}")))?;

        if pending.status != PendingStatus::Draft {
            return Err(RegistryError::Structured {
                code: String::from("not_editable"),
                message: format!("Result {result_id} is not a draft"),
            });
        }

        if &pending.last_modified != token {
            return Err(RegistryError::Conflict {
                result_id: result_id.to_string(),
                message: format!(
                    "Result {result_id} was modified at {} after it was read at {token}",
                    pending.last_modified
                ),
            });
        }

        let next: ConcurrencyToken = issue_token(&mut state.writes);

        pending.grade_id = payload.grade_id;
        pending.scale_id.clone_from(&payload.scale_id);
        pending.examination_date = payload.examination_date;
        pending.project_title.clone_from(&payload.project_title);
        pending.last_modified = next.clone();

        debug!(result_id = %result_id, "Updated draft in memory");
        Ok(WrittenResult {
            result_id: result_id.to_string(),
            concurrency_token: next,
        })
    }

    async fn reporting_instances(
        &self,
        occasion_uid: &str,
    ) -> Result<Vec<ReportingInstance>, RegistryError> {
        let state: MutexGuard<'_, MemoryState> = self.state.lock().await;
        state
            .snapshot
            .reporting_instances
            .get(occasion_uid)
            .cloned()
            .ok_or_else(|| not_found(&format!("Course occasion {occasion_uid}")))
    }
}
