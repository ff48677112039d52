// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde::{Deserialize, Serialize};

time::serde::format_description!(pub iso_date, Date, "[year]-[month]-[day]");

/// The registry entity a set of grades is reported against.
///
/// A destination always resolves to exactly one reporting instance.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Destination {
    /// An examination activity occasion (an exam room booking).
    #[serde(rename_all = "camelCase")]
    ActivityOccasion {
        /// The activity occasion uid.
        uid: String,
    },
    /// A module, or the whole course, within a course occasion.
    #[serde(rename_all = "camelCase")]
    CourseOccasionModule {
        /// The course occasion uid.
        occasion_uid: String,
        /// The reporting instance uid of the module.
        instance_uid: String,
    },
}

impl Destination {
    /// Creates an activity occasion destination.
    #[must_use]
    pub fn activity_occasion(uid: &str) -> Self {
        Self::ActivityOccasion {
            uid: uid.to_string(),
        }
    }

    /// Creates a course occasion module destination.
    #[must_use]
    pub fn course_occasion_module(occasion_uid: &str, instance_uid: &str) -> Self {
        Self::CourseOccasionModule {
            occasion_uid: occasion_uid.to_string(),
            instance_uid: instance_uid.to_string(),
        }
    }

    /// Returns the single reporting-instance id this destination resolves to.
    #[must_use]
    pub fn reporting_instance(&self) -> &str {
        match self {
            Self::ActivityOccasion { uid } => uid,
            Self::CourseOccasionModule { instance_uid, .. } => instance_uid,
        }
    }

    /// Returns a short label for the destination kind, used in logs.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::ActivityOccasion { .. } => "activity_occasion",
            Self::CourseOccasionModule { .. } => "course_occasion_module",
        }
    }
}

impl std::fmt::Display for Destination {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ActivityOccasion { uid } => write!(f, "activity occasion {uid}"),
            Self::CourseOccasionModule {
                occasion_uid,
                instance_uid,
            } => write!(
                f,
                "course occasion {occasion_uid} (reporting instance {instance_uid})"
            ),
        }
    }
}

/// Opaque optimistic-concurrency token issued by the registry for a result.
///
/// The token is captured when a draft is read and handed back unchanged when
/// that draft is updated. It is never derived locally.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConcurrencyToken(String);

impl ConcurrencyToken {
    /// Wraps a token value received from the registry.
    #[must_use]
    pub fn new(value: &str) -> Self {
        Self(value.to_string())
    }

    /// Returns the raw token value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ConcurrencyToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// The identity of the person reporting grades.
///
/// Permission checks are always evaluated on behalf of a reporter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reporter {
    /// The reporter's registry uid.
    pub uid: String,
}

impl Reporter {
    /// Creates a new reporter identity.
    #[must_use]
    pub fn new(uid: &str) -> Self {
        Self {
            uid: uid.to_string(),
        }
    }
}

/// A degree project title, in the primary and the alternative language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectTitle {
    /// The title.
    pub title: String,
    /// The title in the alternative language.
    pub alternative_title: String,
}

impl ProjectTitle {
    /// Creates a new project title.
    #[must_use]
    pub fn new(title: &str, alternative_title: &str) -> Self {
        Self {
            title: title.to_string(),
            alternative_title: alternative_title.to_string(),
        }
    }
}
