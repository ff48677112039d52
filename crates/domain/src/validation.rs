// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::decision::GradeDecision;
use crate::error::DomainError;
use std::collections::HashSet;
use time::Date;
use time::macros::format_description;

/// Rejects blank values for a required field.
///
/// # Errors
///
/// Returns `DomainError::EmptyField` if `value` is empty or whitespace.
pub fn require_non_empty(field: &'static str, value: &str) -> Result<(), DomainError> {
    if value.trim().is_empty() {
        return Err(DomainError::EmptyField { field });
    }
    Ok(())
}

/// Parses an examination date in strict `YYYY-MM-DD` form.
///
/// # Errors
///
/// Returns `DomainError::InvalidExaminationDate` if the value is not a
/// zero-padded calendar date.
pub fn parse_examination_date(value: &str) -> Result<Date, DomainError> {
    Date::parse(value, format_description!("[year]-[month]-[day]")).map_err(|err| {
        DomainError::InvalidExaminationDate {
            value: value.to_string(),
            error: err.to_string(),
        }
    })
}

/// Validates a decision list as a whole.
///
/// # Errors
///
/// Returns an error if:
/// - a student id or grade is blank
/// - a student appears more than once
pub fn validate_decisions(decisions: &[GradeDecision]) -> Result<(), DomainError> {
    let mut seen: HashSet<&str> = HashSet::new();

    for decision in decisions {
        require_non_empty("studentId", &decision.student_id)?;
        require_non_empty("draft.grade", &decision.grade)?;

        // Two writes for one student would race each other.
        if !seen.insert(decision.student_id.as_str()) {
            return Err(DomainError::DuplicateDecision {
                student_id: decision.student_id.clone(),
            });
        }
    }

    Ok(())
}
