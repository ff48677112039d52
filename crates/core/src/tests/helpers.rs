// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! A scripted registry that records every call it receives.

use crate::{Page, Registry, RegistryError, ReportingInstance, SearchQuery, SortKey, WrittenResult};
use grade_transfer_domain::{
    ConcurrencyToken, PASS_FAIL_SCALE_ID, PendingResult, PendingStatus, PermissionKey,
    PermissionRecord, ReportingContext, Reporter, ResultPayload, StudentRecord, StudentResult,
};
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use time::Date;
use time::macros::date;
use tokio::sync::{Semaphore, SemaphorePermit};

pub const INSTANCE: &str = "instance-1";
pub const ACTIVITY: &str = "activity-1";
pub const OCCASION: &str = "occasion-1";
pub const REPORTER: &str = "reporter-1";

/// A registry call, as observed by [`ScriptedRegistry`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    SearchByInstance {
        instance_uid: String,
        occasion_uids: Vec<String>,
        sort_key: SortKey,
        page: u32,
    },
    SearchByActivity {
        activity_uid: String,
        occasion_uids: Vec<String>,
        sort_key: SortKey,
        page: u32,
    },
    PermissionBatch {
        reporter: String,
        keys: Vec<PermissionKey>,
    },
    Create {
        result_parent_id: String,
        instance_uid: String,
        payload: ResultPayload,
    },
    Update {
        result_id: String,
        token: ConcurrencyToken,
        payload: ResultPayload,
    },
    ReportingInstances {
        occasion_uid: String,
    },
}

impl Call {
    pub const fn is_write(&self) -> bool {
        matches!(self, Self::Create { .. } | Self::Update { .. })
    }

    pub const fn is_search(&self) -> bool {
        matches!(
            self,
            Self::SearchByInstance { .. } | Self::SearchByActivity { .. }
        )
    }
}

#[derive(Debug, Default)]
pub struct ScriptedRegistry {
    pub students: Vec<StudentResult>,
    pub failing_page: Option<u32>,
    pub granted: Vec<PermissionKey>,
    pub permission_error: Option<RegistryError>,
    pub create_error: Option<RegistryError>,
    pub update_error: Option<RegistryError>,
    pub instances: BTreeMap<String, Vec<ReportingInstance>>,
    /// Delay before answering a create, by result parent id.
    pub create_delays_ms: HashMap<String, u64>,
    /// Creates wait for a permit here before answering.
    pub create_gate: Option<Arc<Semaphore>>,
    pub calls: Mutex<Vec<Call>>,
    /// Result parent ids of creates that got past the gate.
    pub completed_creates: Mutex<Vec<String>>,
}

impl ScriptedRegistry {
    pub fn with_students(students: Vec<StudentResult>) -> Self {
        Self {
            students,
            ..Self::default()
        }
    }

    /// Grants permission for every student's own pair.
    pub fn grant_all(mut self) -> Self {
        self.granted = self
            .students
            .iter()
            .map(|result| PermissionKey::new(&result.result_id, result.instance_uid()))
            .collect();
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn writes(&self) -> Vec<Call> {
        self.calls().into_iter().filter(Call::is_write).collect()
    }

    pub fn completed_creates(&self) -> Vec<String> {
        self.completed_creates.lock().unwrap().clone()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn page(&self, query: SearchQuery, page: u32) -> Result<Page<StudentResult>, RegistryError> {
        if self.failing_page == Some(page) {
            return Err(RegistryError::Transport(format!("page {page} timed out")));
        }
        let size: usize = query.page_size() as usize;
        Ok(Page {
            total_count: self.students.len(),
            items: self
                .students
                .iter()
                .skip((page as usize - 1) * size)
                .take(size)
                .cloned()
                .collect(),
        })
    }
}

impl Registry for ScriptedRegistry {
    async fn search_by_instance(
        &self,
        instance_uid: &str,
        occasion_uids: &[String],
        query: SearchQuery,
        page: u32,
    ) -> Result<Page<StudentResult>, RegistryError> {
        self.record(Call::SearchByInstance {
            instance_uid: instance_uid.to_string(),
            occasion_uids: occasion_uids.to_vec(),
            sort_key: query.sort_key(),
            page,
        });
        self.page(query, page)
    }

    async fn search_by_activity(
        &self,
        activity_uid: &str,
        occasion_uids: &[String],
        query: SearchQuery,
        page: u32,
    ) -> Result<Page<StudentResult>, RegistryError> {
        self.record(Call::SearchByActivity {
            activity_uid: activity_uid.to_string(),
            occasion_uids: occasion_uids.to_vec(),
            sort_key: query.sort_key(),
            page,
        });
        self.page(query, page)
    }

    async fn permission_batch(
        &self,
        reporter: &Reporter,
        keys: &[PermissionKey],
    ) -> Result<Vec<PermissionRecord>, RegistryError> {
        self.record(Call::PermissionBatch {
            reporter: reporter.uid.clone(),
            keys: keys.to_vec(),
        });
        if let Some(err) = &self.permission_error {
            return Err(err.clone());
        }
        Ok(keys
            .iter()
            .map(|key| PermissionRecord {
                result_id: key.result_id.clone(),
                instance_id: key.instance_id.clone(),
                granted: self.granted.contains(key),
            })
            .collect())
    }

    async fn create_result(
        &self,
        result_parent_id: &str,
        instance_uid: &str,
        payload: &ResultPayload,
    ) -> Result<WrittenResult, RegistryError> {
        self.record(Call::Create {
            result_parent_id: result_parent_id.to_string(),
            instance_uid: instance_uid.to_string(),
            payload: payload.clone(),
        });
        if let Some(ms) = self.create_delays_ms.get(result_parent_id) {
            tokio::time::sleep(Duration::from_millis(*ms)).await;
        }
        if let Some(gate) = &self.create_gate {
            let _permit: SemaphorePermit<'_> = gate.acquire().await.unwrap();
        }
        self.completed_creates
            .lock()
            .unwrap()
            .push(result_parent_id.to_string());
        if let Some(err) = &self.create_error {
            return Err(err.clone());
        }
        Ok(WrittenResult {
            result_id: format!("{result_parent_id}.new"),
            concurrency_token: ConcurrencyToken::new("created"),
        })
    }

    async fn update_result(
        &self,
        result_id: &str,
        payload: &ResultPayload,
        token: &ConcurrencyToken,
    ) -> Result<WrittenResult, RegistryError> {
        self.record(Call::Update {
            result_id: result_id.to_string(),
            token: token.clone(),
            payload: payload.clone(),
        });
        if let Some(err) = &self.update_error {
            return Err(err.clone());
        }
        Ok(WrittenResult {
            result_id: result_id.to_string(),
            concurrency_token: ConcurrencyToken::new("updated"),
        })
    }

    async fn reporting_instances(
        &self,
        occasion_uid: &str,
    ) -> Result<Vec<ReportingInstance>, RegistryError> {
        self.record(Call::ReportingInstances {
            occasion_uid: occasion_uid.to_string(),
        });
        self.instances
            .get(occasion_uid)
            .cloned()
            .ok_or_else(|| RegistryError::Structured {
                code: String::from("not_found"),
                message: format!("Course occasion {occasion_uid} does not exist"),
            })
    }
}

pub fn create_test_date() -> Date {
    date!(2023 - 06 - 01)
}

pub fn create_test_reporter() -> Reporter {
    Reporter::new(REPORTER)
}

pub fn create_test_student(student_id: &str) -> StudentResult {
    StudentResult {
        student: StudentRecord {
            uid: student_id.to_string(),
            first_name: String::from("Test"),
            last_name: format!("Student {student_id}"),
        },
        result_id: format!("result-{student_id}"),
        reporting_context: ReportingContext {
            instance_uid: String::from(INSTANCE),
            scale_id: String::from(PASS_FAIL_SCALE_ID),
            requires_title: false,
        },
        pending: Vec::new(),
        certified: None,
    }
}

pub fn create_test_draft(student_id: &str, token: &str) -> PendingResult {
    PendingResult {
        result_id: format!("draft-{student_id}"),
        instance_uid: String::from(INSTANCE),
        status: PendingStatus::Draft,
        grade_id: 131_659,
        scale_id: String::from(PASS_FAIL_SCALE_ID),
        examination_date: date!(2023 - 05 - 20),
        project_title: None,
        last_modified: ConcurrencyToken::new(token),
    }
}
