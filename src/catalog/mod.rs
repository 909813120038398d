//! Competency catalog - the static career framework reference tables
//!
//! Pure data and lookup functions. The catalog is defined entirely at
//! build time and never mutated at runtime; "key not found" always means
//! "not applicable" (level 0), never a fault.

pub mod framework;
pub mod scales;

pub use framework::{
    all_competencies, catalog, competency, expectation, weekly_questions, Category,
    CheckInQuestion, Competency, GradeTier, Role, Theme,
};
pub use scales::AssessmentType;
