//! Weekly and quarterly check-in records
//!
//! Each cadence keeps one "current" draft record plus an append-only
//! history of finalized entries. List fields (goals, wins, blockers and
//! friends) always hold at least one slot so the input flow stays
//! stable; removing the last item resets to a single empty slot.

use chrono::{DateTime, Datelike, Local, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use ulid::Ulid;

fn one_empty_slot() -> Vec<String> {
    vec![String::new()]
}

/// Append an empty slot to a list field
pub fn add_slot(list: &mut Vec<String>) {
    list.push(String::new());
}

/// Overwrite a slot; out-of-range indexes are ignored
pub fn update_slot(list: &mut [String], index: usize, value: impl Into<String>) {
    if let Some(slot) = list.get_mut(index) {
        *slot = value.into();
    }
}

/// Remove a slot, resetting to a single empty slot rather than an empty
/// list when the last item goes away
pub fn remove_slot(list: &mut Vec<String>, index: usize) {
    if index < list.len() {
        list.remove(index);
    }
    if list.is_empty() {
        list.push(String::new());
    }
}

/// One week's check-in draft or finalized entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyEntry {
    pub id: String,
    pub date: DateTime<Utc>,
    /// Human-readable week range label
    pub week: String,
    /// Free-text responses keyed by question id
    #[serde(default)]
    pub responses: BTreeMap<String, String>,
    #[serde(default = "one_empty_slot")]
    pub goals: Vec<String>,
    #[serde(default = "one_empty_slot")]
    pub blockers: Vec<String>,
    #[serde(default = "one_empty_slot")]
    pub wins: Vec<String>,
}

impl WeeklyEntry {
    /// Fresh draft for the week containing `now` (weeks start Sunday)
    pub fn for_week(now: DateTime<Local>) -> Self {
        let start = now.date_naive()
            - chrono::Days::new(now.weekday().num_days_from_sunday() as u64);
        let end = start + chrono::Days::new(6);
        Self {
            id: Ulid::new().to_string(),
            date: now.with_timezone(&Utc),
            week: format!(
                "{} - {}",
                start.format("%m/%d/%Y"),
                end.format("%m/%d/%Y")
            ),
            responses: BTreeMap::new(),
            goals: one_empty_slot(),
            blockers: one_empty_slot(),
            wins: one_empty_slot(),
        }
    }
}

/// Quarterly review draft or finalized entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuarterlyReview {
    pub id: String,
    pub quarter: String,
    pub year: i32,
    #[serde(default = "one_empty_slot")]
    pub achievements: Vec<String>,
    #[serde(default = "one_empty_slot")]
    pub challenges: Vec<String>,
    #[serde(default = "one_empty_slot")]
    pub learnings: Vec<String>,
    #[serde(default = "one_empty_slot")]
    pub feedback_received: Vec<String>,
    #[serde(default = "one_empty_slot")]
    pub next_quarter_goals: Vec<String>,
    #[serde(default)]
    pub self_reflection: String,
    /// 0 = not rated
    #[serde(default)]
    pub overall_rating: u8,
}

impl QuarterlyReview {
    /// Fresh draft for the quarter containing `now`
    pub fn for_quarter(now: DateTime<Local>) -> Self {
        let quarter = (now.month() + 2) / 3;
        Self {
            id: Ulid::new().to_string(),
            quarter: format!("Q{}", quarter),
            year: now.year(),
            achievements: one_empty_slot(),
            challenges: one_empty_slot(),
            learnings: one_empty_slot(),
            feedback_received: one_empty_slot(),
            next_quarter_goals: one_empty_slot(),
            self_reflection: String::new(),
            overall_rating: 0,
        }
    }

    /// All list fields, for fragment scans and display
    pub fn lists(&self) -> [(&'static str, &Vec<String>); 5] {
        [
            ("achievements", &self.achievements),
            ("challenges", &self.challenges),
            ("learnings", &self.learnings),
            ("feedback_received", &self.feedback_received),
            ("next_quarter_goals", &self.next_quarter_goals),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_removing_last_item_keeps_one_empty_slot() {
        let mut goals = vec!["ship the redesign".to_string()];
        remove_slot(&mut goals, 0);
        assert_eq!(goals, vec![String::new()]);

        // Never an empty list, even on repeated removal
        remove_slot(&mut goals, 0);
        assert_eq!(goals, vec![String::new()]);
    }

    #[test]
    fn test_remove_middle_item() {
        let mut wins = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        remove_slot(&mut wins, 1);
        assert_eq!(wins, vec!["a".to_string(), "c".to_string()]);
    }

    #[test]
    fn test_update_out_of_range_is_ignored() {
        let mut blockers = vec![String::new()];
        update_slot(&mut blockers, 5, "nope");
        assert_eq!(blockers, vec![String::new()]);
    }

    #[test]
    fn test_weekly_draft_has_stable_shape() {
        let entry = WeeklyEntry::for_week(Local::now());
        assert_eq!(entry.goals.len(), 1);
        assert_eq!(entry.blockers.len(), 1);
        assert_eq!(entry.wins.len(), 1);
        assert!(entry.week.contains(" - "));
    }

    #[test]
    fn test_quarterly_draft_labels_quarter() {
        let review = QuarterlyReview::for_quarter(Local::now());
        assert!(review.quarter.starts_with('Q'));
        let n: u32 = review.quarter[1..].parse().unwrap();
        assert!((1..=4).contains(&n));
    }

    #[test]
    fn test_weekly_entry_round_trips() {
        let mut entry = WeeklyEntry::for_week(Local::now());
        entry
            .responses
            .insert("business-impact".into(), "Raised conversion by 15%".into());
        entry.wins[0] = "Launched navigation refresh".into();

        let json = serde_json::to_string(&entry).unwrap();
        let parsed: WeeklyEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, entry);
    }
}
