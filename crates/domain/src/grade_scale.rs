// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Translation between grade codes and registry grade ids.

use serde::{Deserialize, Serialize};

/// Registry id of the pass/fail scale.
pub const PASS_FAIL_SCALE_ID: &str = "131657";
/// Registry id of the six-level letter scale.
pub const LETTER_SCALE_ID: &str = "131656";

struct GradeScale {
    scale_id: &'static str,
    /// `(internal id, code)` in display order.
    grades: &'static [(i64, &'static str)],
}

const SCALES: &[GradeScale] = &[
    GradeScale {
        scale_id: PASS_FAIL_SCALE_ID,
        grades: &[(131_658, "P"), (131_659, "F")],
    },
    GradeScale {
        scale_id: LETTER_SCALE_ID,
        grades: &[
            (131_660, "A"),
            (131_661, "B"),
            (131_662, "C"),
            (131_663, "D"),
            (131_664, "E"),
            (131_665, "F"),
        ],
    },
];

/// A grade that can be reported on a scale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeOption {
    /// The grade code shown to reporters.
    pub code: String,
    /// The registry's internal grade id.
    pub internal_id: i64,
}

fn scale(scale_id: &str) -> Option<&'static GradeScale> {
    SCALES.iter().find(|scale| scale.scale_id == scale_id)
}

/// Returns the ordered grade options of a scale.
///
/// Unknown scales yield an empty list, meaning no grade is acceptable.
#[must_use]
pub fn options_for(scale_id: &str) -> Vec<GradeOption> {
    scale(scale_id)
        .map(|scale| {
            scale
                .grades
                .iter()
                .map(|&(internal_id, code)| GradeOption {
                    code: code.to_string(),
                    internal_id,
                })
                .collect()
        })
        .unwrap_or_default()
}

/// Looks up the internal grade id for a code, ignoring case.
#[must_use]
pub fn internal_id_for(scale_id: &str, code: &str) -> Option<i64> {
    let code: &str = code.trim();
    scale(scale_id)?
        .grades
        .iter()
        .find(|(_, candidate)| candidate.eq_ignore_ascii_case(code))
        .map(|&(internal_id, _)| internal_id)
}

/// Looks up the grade code for an internal grade id.
#[must_use]
pub fn code_for(scale_id: &str, internal_id: i64) -> Option<&'static str> {
    scale(scale_id)?
        .grades
        .iter()
        .find(|&&(candidate, _)| candidate == internal_id)
        .map(|&(_, code)| code)
}
