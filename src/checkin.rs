//! Check-in engine - weekly and quarterly reflection flows
//!
//! Each cadence runs the same cycle: load (or create) the current
//! draft, edit it in memory, persist the draft on demand, and submit.
//! Submitting appends the draft to the history key, bumps the aggregate
//! counters, deletes the draft key, and hands back a fresh draft. The
//! history write happens before the draft delete so an interrupted
//! submit can lose the draft cleanup but never the finalized entry.

use chrono::Local;
use thiserror::Error;

use crate::core::store::{Store, StoreError, StoreKey};
use crate::entities::checkin::{add_slot, remove_slot, update_slot, QuarterlyReview, WeeklyEntry};
use crate::entities::profile::ProgressCounters;

#[derive(Debug, Error)]
pub enum CheckInError {
    #[error("overall rating must be between 1 and 5, got {rating}")]
    InvalidRating { rating: u8 },

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Weekly list fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeeklyList {
    Goals,
    Blockers,
    Wins,
}

/// Quarterly list fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuarterlyList {
    Achievements,
    Challenges,
    Learnings,
    FeedbackReceived,
    NextQuarterGoals,
}

fn bump_counters(store: &Store, f: impl FnOnce(&mut ProgressCounters)) -> Result<(), StoreError> {
    let mut counters: ProgressCounters = store.load(StoreKey::Progress).unwrap_or_default();
    f(&mut counters);
    store.save(StoreKey::Progress, &counters)
}

/// Weekly check-in state
pub struct WeeklyCheckIn {
    draft: WeeklyEntry,
}

impl WeeklyCheckIn {
    /// Resume the stored draft, or start one for the current week
    pub fn load(store: &Store) -> Self {
        let draft = store
            .load(StoreKey::WeeklyDraft)
            .unwrap_or_else(|| WeeklyEntry::for_week(Local::now()));
        Self { draft }
    }

    pub fn draft(&self) -> &WeeklyEntry {
        &self.draft
    }

    pub fn set_response(&mut self, question_id: &str, text: impl Into<String>) {
        let text = text.into();
        if text.is_empty() {
            self.draft.responses.remove(question_id);
        } else {
            self.draft.responses.insert(question_id.to_string(), text);
        }
    }

    fn list_mut(&mut self, list: WeeklyList) -> &mut Vec<String> {
        match list {
            WeeklyList::Goals => &mut self.draft.goals,
            WeeklyList::Blockers => &mut self.draft.blockers,
            WeeklyList::Wins => &mut self.draft.wins,
        }
    }

    pub fn items(&self, list: WeeklyList) -> &[String] {
        match list {
            WeeklyList::Goals => &self.draft.goals,
            WeeklyList::Blockers => &self.draft.blockers,
            WeeklyList::Wins => &self.draft.wins,
        }
    }

    /// Write `text` into the trailing empty slot, or append a new one
    pub fn push_item(&mut self, list: WeeklyList, text: impl Into<String>) {
        let items = self.list_mut(list);
        match items.last() {
            Some(last) if last.is_empty() => {
                let index = items.len() - 1;
                update_slot(items, index, text);
            }
            _ => items.push(text.into()),
        }
    }

    pub fn add_item(&mut self, list: WeeklyList) {
        add_slot(self.list_mut(list));
    }

    pub fn update_item(&mut self, list: WeeklyList, index: usize, value: impl Into<String>) {
        update_slot(self.list_mut(list), index, value);
    }

    pub fn remove_item(&mut self, list: WeeklyList, index: usize) {
        remove_slot(self.list_mut(list), index);
    }

    /// Persist the draft for later resumption
    pub fn save_draft(&self, store: &Store) -> Result<(), CheckInError> {
        store.save(StoreKey::WeeklyDraft, &self.draft)?;
        Ok(())
    }

    /// Finalize the draft: append to history, count it, clear the draft
    pub fn submit(&mut self, store: &Store) -> Result<(), CheckInError> {
        let mut history: Vec<WeeklyEntry> =
            store.load(StoreKey::WeeklyHistory).unwrap_or_default();
        history.insert(0, self.draft.clone());
        store.save(StoreKey::WeeklyHistory, &history)?;

        bump_counters(store, |c| {
            c.weekly_check_ins += 1;
            c.touch();
        })?;

        store.remove(StoreKey::WeeklyDraft)?;
        self.draft = WeeklyEntry::for_week(Local::now());
        Ok(())
    }

    /// Finalized entries, newest first
    pub fn history(store: &Store) -> Vec<WeeklyEntry> {
        store.load(StoreKey::WeeklyHistory).unwrap_or_default()
    }
}

/// Quarterly review state
pub struct QuarterlyCheckIn {
    draft: QuarterlyReview,
}

impl QuarterlyCheckIn {
    pub fn load(store: &Store) -> Self {
        let draft = store
            .load(StoreKey::QuarterlyDraft)
            .unwrap_or_else(|| QuarterlyReview::for_quarter(Local::now()));
        Self { draft }
    }

    pub fn draft(&self) -> &QuarterlyReview {
        &self.draft
    }

    fn list_mut(&mut self, list: QuarterlyList) -> &mut Vec<String> {
        match list {
            QuarterlyList::Achievements => &mut self.draft.achievements,
            QuarterlyList::Challenges => &mut self.draft.challenges,
            QuarterlyList::Learnings => &mut self.draft.learnings,
            QuarterlyList::FeedbackReceived => &mut self.draft.feedback_received,
            QuarterlyList::NextQuarterGoals => &mut self.draft.next_quarter_goals,
        }
    }

    /// Write `text` into the trailing empty slot, or append a new one
    pub fn push_item(&mut self, list: QuarterlyList, text: impl Into<String>) {
        let items = self.list_mut(list);
        match items.last() {
            Some(last) if last.is_empty() => {
                let index = items.len() - 1;
                update_slot(items, index, text);
            }
            _ => items.push(text.into()),
        }
    }

    pub fn add_item(&mut self, list: QuarterlyList) {
        add_slot(self.list_mut(list));
    }

    pub fn update_item(&mut self, list: QuarterlyList, index: usize, value: impl Into<String>) {
        update_slot(self.list_mut(list), index, value);
    }

    pub fn remove_item(&mut self, list: QuarterlyList, index: usize) {
        remove_slot(self.list_mut(list), index);
    }

    pub fn set_reflection(&mut self, text: impl Into<String>) {
        self.draft.self_reflection = text.into();
    }

    /// 1-5 scale; anything else is rejected without touching the draft
    pub fn set_rating(&mut self, rating: u8) -> Result<(), CheckInError> {
        if !(1..=5).contains(&rating) {
            return Err(CheckInError::InvalidRating { rating });
        }
        self.draft.overall_rating = rating;
        Ok(())
    }

    pub fn save_draft(&self, store: &Store) -> Result<(), CheckInError> {
        store.save(StoreKey::QuarterlyDraft, &self.draft)?;
        Ok(())
    }

    pub fn submit(&mut self, store: &Store) -> Result<(), CheckInError> {
        let mut history: Vec<QuarterlyReview> =
            store.load(StoreKey::QuarterlyHistory).unwrap_or_default();
        history.insert(0, self.draft.clone());
        store.save(StoreKey::QuarterlyHistory, &history)?;

        bump_counters(store, |c| {
            c.quarterly_check_ins += 1;
            c.touch();
        })?;

        store.remove(StoreKey::QuarterlyDraft)?;
        self.draft = QuarterlyReview::for_quarter(Local::now());
        Ok(())
    }

    pub fn history(store: &Store) -> Vec<QuarterlyReview> {
        store.load(StoreKey::QuarterlyHistory).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::workspace::Workspace;
    use tempfile::tempdir;

    fn setup() -> (tempfile::TempDir, Store) {
        let tmp = tempdir().unwrap();
        let ws = Workspace::init(tmp.path()).unwrap();
        let store = Store::open(&ws).unwrap();
        (tmp, store)
    }

    #[test]
    fn test_draft_survives_reload() {
        let (_tmp, store) = setup();
        let mut checkin = WeeklyCheckIn::load(&store);
        checkin.set_response("business-impact", "Cut onboarding drop-off by 12%");
        checkin.update_item(WeeklyList::Wins, 0, "Shipped the settings redesign");
        checkin.save_draft(&store).unwrap();

        let resumed = WeeklyCheckIn::load(&store);
        assert_eq!(
            resumed.draft().responses.get("business-impact").unwrap(),
            "Cut onboarding drop-off by 12%"
        );
        assert_eq!(resumed.draft().wins[0], "Shipped the settings redesign");
    }

    #[test]
    fn test_submit_appends_history_and_clears_draft() {
        let (_tmp, store) = setup();
        let mut checkin = WeeklyCheckIn::load(&store);
        checkin.update_item(WeeklyList::Goals, 0, "Pair with research weekly");
        checkin.save_draft(&store).unwrap();
        checkin.submit(&store).unwrap();

        let history = WeeklyCheckIn::history(&store);
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].goals[0], "Pair with research weekly");

        assert!(!store.exists(StoreKey::WeeklyDraft));
        // In-memory draft is reset too
        assert_eq!(checkin.draft().goals, vec![String::new()]);

        let counters: ProgressCounters = store.load(StoreKey::Progress).unwrap();
        assert_eq!(counters.weekly_check_ins, 1);
        assert!(counters.last_activity.is_some());
    }

    #[test]
    fn test_submit_orders_newest_first() {
        let (_tmp, store) = setup();
        let mut checkin = WeeklyCheckIn::load(&store);
        checkin.update_item(WeeklyList::Wins, 0, "first");
        checkin.submit(&store).unwrap();
        checkin.update_item(WeeklyList::Wins, 0, "second");
        checkin.submit(&store).unwrap();

        let history = WeeklyCheckIn::history(&store);
        assert_eq!(history[0].wins[0], "second");
        assert_eq!(history[1].wins[0], "first");
    }

    #[test]
    fn test_empty_response_deletes_the_key() {
        let (_tmp, store) = setup();
        let mut checkin = WeeklyCheckIn::load(&store);
        checkin.set_response("learning", "Read up on service design");
        checkin.set_response("learning", "");
        assert!(!checkin.draft().responses.contains_key("learning"));
    }

    #[test]
    fn test_quarterly_rating_bounds() {
        let (_tmp, store) = setup();
        let mut review = QuarterlyCheckIn::load(&store);
        assert!(review.set_rating(0).is_err());
        assert!(review.set_rating(6).is_err());
        review.set_rating(4).unwrap();
        assert_eq!(review.draft().overall_rating, 4);
    }

    #[test]
    fn test_quarterly_submit_counts_separately() {
        let (_tmp, store) = setup();
        let mut weekly = WeeklyCheckIn::load(&store);
        weekly.submit(&store).unwrap();

        let mut quarterly = QuarterlyCheckIn::load(&store);
        quarterly.update_item(QuarterlyList::Achievements, 0, "Led the design system audit");
        quarterly.submit(&store).unwrap();

        let counters: ProgressCounters = store.load(StoreKey::Progress).unwrap();
        assert_eq!(counters.weekly_check_ins, 1);
        assert_eq!(counters.quarterly_check_ins, 1);
        assert_eq!(QuarterlyCheckIn::history(&store).len(), 1);
    }

    #[test]
    fn test_push_item_fills_trailing_empty_slot_first() {
        let (_tmp, store) = setup();
        let mut checkin = WeeklyCheckIn::load(&store);
        checkin.push_item(WeeklyList::Goals, "first goal");
        assert_eq!(checkin.items(WeeklyList::Goals), ["first goal"]);

        checkin.push_item(WeeklyList::Goals, "second goal");
        assert_eq!(
            checkin.items(WeeklyList::Goals),
            ["first goal", "second goal"]
        );
    }

    #[test]
    fn test_list_items_never_empty_after_removal() {
        let (_tmp, store) = setup();
        let mut checkin = WeeklyCheckIn::load(&store);
        checkin.add_item(WeeklyList::Blockers);
        checkin.remove_item(WeeklyList::Blockers, 0);
        checkin.remove_item(WeeklyList::Blockers, 0);
        assert_eq!(checkin.draft().blockers, vec![String::new()]);
    }
}
