//! Persisted record types

pub mod assessment;
pub mod checkin;
pub mod chat;
pub mod profile;

pub use assessment::{Assessment, AssessmentSheet, SHEET_VERSION};
pub use checkin::{add_slot, remove_slot, update_slot, QuarterlyReview, WeeklyEntry};
pub use chat::{ChatHistory, ChatMessage, ChatRole};
pub use profile::{Preferences, ProgressCounters, ThemePreference};
