//! Evidence synthesizer
//!
//! Drafts a "demonstrated by" statement for a competency from what the
//! user has already written elsewhere: coach conversations, weekly
//! check-ins, and quarterly reviews. Entirely deterministic - fragments
//! are scanned in a fixed order, scored against the competency's own
//! vocabulary, and stitched into one of a few fixed sentence frames.
//! Reads only; the caller decides where the draft lands.

use thiserror::Error;

use crate::catalog::{self, Competency};
use crate::core::store::{Store, StoreKey};
use crate::entities::chat::{ChatHistory, ChatMessage, ChatRole};
use crate::entities::checkin::{QuarterlyReview, WeeklyEntry};

/// Fragments shorter than this are too thin to quote
const MIN_FRAGMENT_LEN: usize = 20;

/// At most this many fragments are stitched into the draft
const MAX_FRAGMENTS: usize = 3;

/// Words that signal career-relevant content regardless of competency
const GENERIC_KEYWORDS: &[&str] = &[
    "project", "work", "team", "design", "user", "customer", "research",
    "delivered", "shipped", "launched", "achieved", "improved", "impact",
    "feedback", "stakeholder", "collaboration", "strategy", "goal",
];

#[derive(Debug, Error)]
pub enum SynthError {
    #[error("unknown competency '{id}'")]
    UnknownCompetency { id: String },

    #[error("no written content found to draw from; add check-in notes or coach conversations first")]
    NoContent,
}

/// Collect candidate fragments from every written source, in a fixed
/// order: chat first, then weekly entries, then quarterly reviews
fn collect_fragments(store: &Store) -> Vec<String> {
    let mut fragments = Vec::new();
    let mut push = |text: &str| {
        let trimmed = text.trim();
        if trimmed.chars().count() >= MIN_FRAGMENT_LEN {
            fragments.push(trimmed.to_string());
        }
    };

    let current: Vec<ChatMessage> = store.load(StoreKey::ChatCurrent).unwrap_or_default();
    for msg in current.iter().filter(|m| m.role == ChatRole::User) {
        push(&msg.content);
    }
    let histories: Vec<ChatHistory> = store.load(StoreKey::ChatHistories).unwrap_or_default();
    for history in &histories {
        for msg in history.messages.iter().filter(|m| m.role == ChatRole::User) {
            push(&msg.content);
        }
    }

    let mut weeklies: Vec<WeeklyEntry> = store.load(StoreKey::WeeklyHistory).unwrap_or_default();
    if let Some(draft) = store.load(StoreKey::WeeklyDraft) {
        weeklies.push(draft);
    }
    for entry in &weeklies {
        for response in entry.responses.values() {
            push(response);
        }
        for list in [&entry.goals, &entry.wins, &entry.blockers] {
            for item in list {
                push(item);
            }
        }
    }

    let mut quarterlies: Vec<QuarterlyReview> =
        store.load(StoreKey::QuarterlyHistory).unwrap_or_default();
    if let Some(draft) = store.load(StoreKey::QuarterlyDraft) {
        quarterlies.push(draft);
    }
    for review in &quarterlies {
        for (_, list) in review.lists() {
            for item in list {
                push(item);
            }
        }
        push(&review.self_reflection);
    }

    fragments
}

/// The competency's own vocabulary: name, pillar, theme, plus the
/// longer words of its description
fn competency_keywords(comp: &Competency) -> Vec<String> {
    let mut keywords: Vec<String> = vec![
        comp.name.to_lowercase(),
        comp.pillar.to_lowercase(),
        comp.theme.as_str().to_lowercase(),
    ];
    for word in comp.description.split_whitespace() {
        let word: String = word
            .chars()
            .filter(|c| c.is_alphanumeric())
            .collect::<String>()
            .to_lowercase();
        if word.chars().count() > 4 && !keywords.contains(&word) {
            keywords.push(word);
        }
    }
    keywords.extend(GENERIC_KEYWORDS.iter().map(|k| k.to_string()));
    keywords
}

fn matches_any(fragment: &str, keywords: &[String]) -> bool {
    let lower = fragment.to_lowercase();
    keywords.iter().any(|k| lower.contains(k.as_str()))
}

/// Pick the sentence frame from the dominant signal in the material
fn frame(material: &str, competency_name: &str) -> String {
    let lower = material.to_lowercase();
    if lower.contains("user") || lower.contains("customer") {
        format!(
            "Demonstrated {} through user-focused work: {}",
            competency_name, material
        )
    } else if lower.contains("measur")
        || lower.contains("impact")
        || lower.contains("achiev")
        || lower.contains('%')
    {
        format!(
            "Showed {} with measurable results: {}",
            competency_name, material
        )
    } else if lower.contains("feedback") || lower.contains("improv") || lower.contains("goal") {
        format!(
            "Grew {} by acting on feedback and goals: {}",
            competency_name, material
        )
    } else {
        format!("Demonstrated {}: {}", competency_name, material)
    }
}

/// Draft a demonstrated-by statement for `competency_id` from the
/// user's existing writing. Same store contents, same output.
pub fn synthesize(store: &Store, competency_id: &str) -> Result<String, SynthError> {
    let comp = catalog::competency(competency_id).ok_or_else(|| SynthError::UnknownCompetency {
        id: competency_id.to_string(),
    })?;

    let fragments = collect_fragments(store);
    if fragments.is_empty() {
        return Err(SynthError::NoContent);
    }

    let keywords = competency_keywords(comp);
    let mut relevant: Vec<&String> = fragments
        .iter()
        .filter(|f| matches_any(f, &keywords))
        .collect();
    // Nothing topical: fall back to the raw material rather than failing
    if relevant.is_empty() {
        relevant = fragments.iter().collect();
    }

    let material = relevant
        .into_iter()
        .take(MAX_FRAGMENTS)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(" ");

    Ok(frame(&material, comp.name))
}
