// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Classification of LMS section identifiers into registry ids.
//!
//! LMS sections carry free-form identifiers. Only three shapes are linked to
//! the registry; everything else is ignored without error.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use uuid::Uuid;

const ACTIVITY_PREFIX: &str = "ACT.";
const HYPHENATED_UUID_LEN: usize = 36;

/// A section as reported by the LMS.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionRecord {
    /// The primary section identifier.
    #[serde(default)]
    pub sis_section_id: Option<String>,
    /// The alternate identifier carried by sections created from legacy
    /// course codes.
    #[serde(default)]
    pub integration_id: Option<String>,
}

impl SectionRecord {
    /// Creates a section with only a primary identifier.
    #[must_use]
    pub fn new(sis_section_id: &str) -> Self {
        Self {
            sis_section_id: Some(sis_section_id.to_string()),
            integration_id: None,
        }
    }

    /// Creates a section with both identifiers.
    #[must_use]
    pub fn with_integration_id(sis_section_id: &str, integration_id: &str) -> Self {
        Self {
            sis_section_id: Some(sis_section_id.to_string()),
            integration_id: Some(integration_id.to_string()),
        }
    }
}

/// The registry entity a single section points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SectionClass {
    /// An examination activity occasion uid.
    ActivityOccasion(String),
    /// A course occasion uid.
    CourseOccasion(String),
}

/// The result of classifying a set of sections.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassifiedSections {
    /// Distinct activity occasion uids.
    pub activity_occasions: BTreeSet<String>,
    /// Distinct course occasion uids, never overlapping the activity set.
    pub course_occasions: BTreeSet<String>,
}

impl ClassifiedSections {
    /// Returns `true` if no section was linked to the registry.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.activity_occasions.is_empty() && self.course_occasions.is_empty()
    }
}

/// Classifies one section.
///
/// Returns `None` for sections that are not registry-linked.
#[must_use]
pub fn classify_section(section: &SectionRecord) -> Option<SectionClass> {
    let sis_id: &str = section.sis_section_id.as_deref()?.trim();

    if let Some(rest) = sis_id.strip_prefix(ACTIVITY_PREFIX) {
        // Cross-listed rooms differ only by suffix.
        let uid_part: &str = match rest.split_once('.') {
            Some((uid, suffix)) if !suffix.is_empty() => uid,
            Some(_) => return None,
            None => rest,
        };
        return canonical_uuid(uid_part).map(SectionClass::ActivityOccasion);
    }

    if let Some(uid) = canonical_uuid(sis_id) {
        return Some(SectionClass::CourseOccasion(uid));
    }

    if is_legacy_course_code(sis_id) {
        return section
            .integration_id
            .as_deref()
            .and_then(|id| canonical_uuid(id.trim()))
            .map(SectionClass::CourseOccasion);
    }

    None
}

/// Classifies a list of sections into two disjoint, deduplicated id sets.
#[must_use]
pub fn classify_sections(sections: &[SectionRecord]) -> ClassifiedSections {
    let mut classified: ClassifiedSections = ClassifiedSections::default();

    for section in sections {
        match classify_section(section) {
            Some(SectionClass::ActivityOccasion(uid)) => {
                classified.activity_occasions.insert(uid);
            }
            Some(SectionClass::CourseOccasion(uid)) => {
                classified.course_occasions.insert(uid);
            }
            None => {}
        }
    }

    let activity_occasions: &BTreeSet<String> = &classified.activity_occasions;
    classified
        .course_occasions
        .retain(|uid| !activity_occasions.contains(uid));

    classified
}

/// Returns the lowercase hyphenated form of `value` if it is a bare uuid.
fn canonical_uuid(value: &str) -> Option<String> {
    if value.len() != HYPHENATED_UUID_LEN {
        return None;
    }
    Uuid::try_parse(value)
        .ok()
        .map(|uid| uid.hyphenated().to_string())
}

/// Matches compact course codes such as `SF1624HT211` or `DD2445XVT221`.
///
/// Shape: 2-3 uppercase letters, 3-4 digits, an optional uppercase letter,
/// the term tag `HT` or `VT`, a two-digit year and a one-digit round.
fn is_legacy_course_code(value: &str) -> bool {
    if !value.is_ascii() {
        return false;
    }

    let letters: usize = value
        .bytes()
        .take_while(u8::is_ascii_uppercase)
        .count();
    if !(2..=3).contains(&letters) {
        return false;
    }

    let rest: &str = &value[letters..];
    let digits: usize = rest.bytes().take_while(u8::is_ascii_digit).count();
    if !(3..=4).contains(&digits) {
        return false;
    }

    let rest: &str = &rest[digits..];
    let term_part: &str = match rest.len() {
        5 => rest,
        6 if rest.as_bytes()[0].is_ascii_uppercase() => &rest[1..],
        _ => return false,
    };

    let (term, tail): (&str, &str) = term_part.split_at(2);
    matches!(term, "HT" | "VT") && tail.bytes().all(|b| b.is_ascii_digit())
}
