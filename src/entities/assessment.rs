//! Competency assessment records
//!
//! One `Assessment` per catalog competency per user, collected into an
//! `AssessmentSheet` persisted as a single JSON payload. Sheets carry a
//! schema version; `migrate` runs once at load and backfills fields that
//! newer schemas introduced, so an old payload never fails or drops data.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::catalog::{self, GradeTier};

/// Current sheet schema version
pub const SHEET_VERSION: u32 = 2;

/// Per-competency self-assessment state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assessment {
    /// Foreign key into the competency catalog
    pub competency_id: String,

    /// Selected level, 0 = not yet rated
    #[serde(default)]
    pub self_assessment: u8,

    /// Derived from the grade-expectation table; recomputed whenever the
    /// selected grade changes, never independently stored truth
    #[serde(default)]
    pub grade_expectation: u8,

    /// Legacy v1 single-field evidence text
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub demonstrated_by: String,

    /// Free-text evidence keyed by level (v2 schema)
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub level_demonstrated_by: BTreeMap<u8, String>,

    /// Optional secondary per-level rating map (v2 schema)
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub level_assessments: BTreeMap<u8, u8>,

    /// Unused in self-assessment flows
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manager_assessment: Option<u8>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manager_notes: Option<String>,
}

impl Assessment {
    pub fn new(competency_id: impl Into<String>) -> Self {
        Self {
            competency_id: competency_id.into(),
            self_assessment: 0,
            grade_expectation: 0,
            demonstrated_by: String::new(),
            level_demonstrated_by: BTreeMap::new(),
            level_assessments: BTreeMap::new(),
            manager_assessment: None,
            manager_notes: None,
        }
    }

    pub fn is_rated(&self) -> bool {
        self.self_assessment > 0
    }
}

/// A role's full worksheet state as persisted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentSheet {
    #[serde(default = "default_version")]
    pub version: u32,

    #[serde(default)]
    pub grade: GradeTier,

    #[serde(default)]
    pub assessments: Vec<Assessment>,
}

fn default_version() -> u32 {
    1
}

impl Default for AssessmentSheet {
    fn default() -> Self {
        Self {
            version: SHEET_VERSION,
            grade: GradeTier::default(),
            assessments: Vec::new(),
        }
    }
}

impl AssessmentSheet {
    /// Upgrade an old-shape payload in place. Returns true if anything
    /// changed. v1 kept a single evidence field per competency; v2 keys
    /// evidence by level, so the legacy text is folded into the entry
    /// for the first level of the competency's scale.
    pub fn migrate(&mut self) -> bool {
        if self.version >= SHEET_VERSION {
            return false;
        }

        for assessment in &mut self.assessments {
            if !assessment.demonstrated_by.is_empty()
                && assessment.level_demonstrated_by.is_empty()
            {
                if let Some(comp) = catalog::competency(&assessment.competency_id) {
                    assessment.level_demonstrated_by.insert(
                        comp.assessment_type.first_level(),
                        assessment.demonstrated_by.clone(),
                    );
                }
            }
        }

        self.version = SHEET_VERSION;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_assessment_is_unrated() {
        let a = Assessment::new("craft");
        assert!(!a.is_rated());
        assert_eq!(a.grade_expectation, 0);
    }

    #[test]
    fn test_old_payload_migrates_with_defaults() {
        // A v1 payload: no version, no level maps, single evidence field
        let json = r#"{
            "grade": "G6",
            "assessments": [{
                "competency_id": "craft",
                "self_assessment": 3,
                "grade_expectation": 2,
                "demonstrated_by": "Led the design system refresh"
            }]
        }"#;

        let mut sheet: AssessmentSheet = serde_json::from_str(json).unwrap();
        assert_eq!(sheet.version, 1);

        let changed = sheet.migrate();
        assert!(changed);
        assert_eq!(sheet.version, SHEET_VERSION);

        let a = &sheet.assessments[0];
        assert_eq!(a.self_assessment, 3);
        assert_eq!(
            a.level_demonstrated_by.get(&1).map(String::as_str),
            Some("Led the design system refresh")
        );
        assert!(a.level_assessments.is_empty());
    }

    #[test]
    fn test_migrate_is_idempotent() {
        let mut sheet = AssessmentSheet::default();
        sheet.assessments.push(Assessment::new("delivery"));
        assert!(!sheet.migrate());
        let snapshot = sheet.clone();
        sheet.migrate();
        assert_eq!(sheet, snapshot);
    }

    #[test]
    fn test_sheet_round_trips_through_json() {
        let mut sheet = AssessmentSheet::default();
        let mut a = Assessment::new("ownership");
        a.self_assessment = 4;
        a.level_demonstrated_by
            .insert(2, "Owned the quarterly platform migration".to_string());
        sheet.assessments.push(a);

        let json = serde_json::to_string(&sheet).unwrap();
        let parsed: AssessmentSheet = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, sheet);
    }
}
