// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::student_result::StudentResult;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// The pair a permission is checked for.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PermissionKey {
    /// The student's result uid.
    pub result_id: String,
    /// The reporting instance uid.
    pub instance_id: String,
}

impl PermissionKey {
    /// Creates a new key.
    #[must_use]
    pub fn new(result_id: &str, instance_id: &str) -> Self {
        Self {
            result_id: result_id.to_string(),
            instance_id: instance_id.to_string(),
        }
    }
}

/// One entry of a permission batch response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PermissionRecord {
    /// The student's result uid.
    pub result_id: String,
    /// The reporting instance uid.
    pub instance_id: String,
    /// Whether the reporter may report for this pair.
    pub granted: bool,
}

/// The granted pairs of a permission batch.
///
/// Only granted pairs are kept; absence means no permission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PermissionSet {
    granted: HashSet<PermissionKey>,
}

impl PermissionSet {
    /// Creates a set that grants nothing.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds a set from a batch response.
    ///
    /// The response may contain pairs nobody asked about; those are kept but
    /// can only match a student whose own pair is identical.
    #[must_use]
    pub fn from_records(records: &[PermissionRecord]) -> Self {
        let granted: HashSet<PermissionKey> = records
            .iter()
            .filter(|record| record.granted)
            .map(|record| PermissionKey::new(&record.result_id, &record.instance_id))
            .collect();
        Self { granted }
    }

    /// Returns `true` if the exact pair was granted.
    #[must_use]
    pub fn is_granted(&self, result_id: &str, instance_id: &str) -> bool {
        self.granted
            .contains(&PermissionKey::new(result_id, instance_id))
    }

    /// Returns the number of granted pairs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.granted.len()
    }

    /// Returns `true` if nothing was granted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.granted.is_empty()
    }
}

/// Collects the distinct permission pairs observed in a set of records, in
/// first-seen order.
#[must_use]
pub fn permission_keys(results: &[StudentResult]) -> Vec<PermissionKey> {
    let mut seen: HashSet<PermissionKey> = HashSet::new();
    results
        .iter()
        .map(|result| PermissionKey::new(&result.result_id, result.instance_uid()))
        .filter(|key| seen.insert(key.clone()))
        .collect()
}
