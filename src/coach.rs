//! Career coach - personas and conversation state
//!
//! Replies come from per-persona canned response tables, chosen at
//! random; there is no model behind this. One conversation is "current"
//! at a time. Starting a new chat snapshots the current transcript into
//! the saved-conversation list first, so nothing is lost, and loading a
//! saved conversation makes it current again.

use rand::Rng;
use thiserror::Error;

use crate::core::store::{Store, StoreError, StoreKey};
use crate::entities::chat::{ChatHistory, ChatMessage};

#[derive(Debug, Error)]
pub enum CoachError {
    #[error("unknown persona '{id}'; try one of: liz, lakrisha, madeline, margaret")]
    UnknownPersona { id: String },

    #[error("no saved conversation with id '{id}'")]
    UnknownHistory { id: String },

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// A selectable coach voice
pub struct Persona {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub avatar: &'static str,
    responses: &'static [&'static str],
}

static PERSONAS: &[Persona] = &[
    Persona {
        id: "liz",
        name: "Liz",
        description: "Direct and pragmatic; pushes for concrete next steps",
        avatar: "🎯",
        responses: &[
            "Let's get specific. What's one thing you shipped this month that moved a metric? Lead with that in your next check-in.",
            "That sounds like a growth area, not a weakness. Pick one project where you can practice it deliberately and tell your manager that's the plan.",
            "Write it down before you forget it. Evidence you can't point to later might as well not have happened.",
            "Good. Now, who else knows about this win? Impact nobody saw is only half the credit you've earned.",
            "Don't wait for the review cycle. Ask for feedback on this while the work is still fresh.",
            "Pick the smallest version of that goal you could finish in two weeks, and start there.",
        ],
    },
    Persona {
        id: "lakrisha",
        name: "Lakrisha",
        description: "Strategic and big-picture; connects work to career arcs",
        avatar: "🧭",
        responses: &[
            "Zoom out for a second. How does this work ladder up to where you want to be in two years?",
            "The pattern I'm hearing is scope. You're ready to influence beyond your immediate team - look for a problem that spans a few of them.",
            "Strong careers are built on a few legible bets. Which of your current projects is the one you'd want your name on?",
            "Consider who makes decisions about your growth, and what story they'd tell about your last quarter. Shape that story on purpose.",
            "That's a portfolio-level concern. Bring it to your skip-level; it's exactly what they should be hearing from you.",
            "You don't need more projects, you need a sharper narrative about the ones you have.",
        ],
    },
    Persona {
        id: "madeline",
        name: "Madeline",
        description: "Warm and reflective; focuses on sustainable growth",
        avatar: "🌱",
        responses: &[
            "Before we jump to fixes - how are you actually feeling about this? Burnout disguises itself as a skills gap all the time.",
            "It sounds like you've been carrying a lot. What would it look like to ask for help on one piece of it?",
            "Growth isn't linear. A quarter spent consolidating what you've learned counts just as much as one spent stretching.",
            "I hear real progress in what you just described. Take a moment to notice that before moving to the next worry.",
            "What energized you most this week? Your best growth usually lives near that feeling.",
            "You're allowed to want a quieter quarter. Pacing is a career skill too.",
        ],
    },
    Persona {
        id: "margaret",
        name: "Margaret",
        description: "Veteran operator; blunt stories and hard-won lessons",
        avatar: "📚",
        responses: &[
            "I've seen this movie before. The designers who got promoted weren't the busiest ones - they were the ones whose work other teams quoted.",
            "Early in my career I sat on a win for six months waiting to be noticed. Nobody noticed. Tell people what you did.",
            "Your manager is not a mind reader and their memory is worse than yours. Keep your own record; bring receipts.",
            "Hard disagree with the voice in your head saying you're behind. Everyone's timeline looks tidy from the outside only.",
            "When the org reshuffles - and it will - the people with documented impact land well. You're doing the right thing by writing this down.",
            "Make your manager's job easy. A crisp list of outcomes beats an hour of context every time.",
        ],
    },
];

/// All selectable personas, in display order
pub fn personas() -> &'static [Persona] {
    PERSONAS
}

pub fn persona(id: &str) -> Result<&'static Persona, CoachError> {
    PERSONAS
        .iter()
        .find(|p| p.id == id)
        .ok_or_else(|| CoachError::UnknownPersona { id: id.to_string() })
}

/// The current conversation plus the saved-conversation list
pub struct ChatSession {
    messages: Vec<ChatMessage>,
    /// Set when the current conversation was loaded from a saved one
    active_history_id: Option<String>,
    persona_id: String,
}

impl ChatSession {
    /// Resume the current conversation, if any
    pub fn load(store: &Store, persona_id: impl Into<String>) -> Self {
        Self {
            messages: store.load(StoreKey::ChatCurrent).unwrap_or_default(),
            active_history_id: store.load(StoreKey::ChatCurrentId),
            persona_id: persona_id.into(),
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn persona_id(&self) -> &str {
        &self.persona_id
    }

    /// Switch voices mid-conversation; the transcript is kept
    pub fn set_persona(&mut self, persona_id: impl Into<String>) -> Result<(), CoachError> {
        let id = persona_id.into();
        persona(&id)?;
        self.persona_id = id;
        Ok(())
    }

    /// Record the user's message and produce the coach's reply, then
    /// persist the transcript
    pub fn send(&mut self, store: &Store, text: impl Into<String>) -> Result<ChatMessage, CoachError> {
        let voice = persona(&self.persona_id)?;
        self.messages.push(ChatMessage::user(text));

        let mut rng = rand::rng();
        let reply = ChatMessage::assistant(
            voice.responses[rng.random_range(0..voice.responses.len())],
            voice.id,
        );
        self.messages.push(reply.clone());

        store.save(StoreKey::ChatCurrent, &self.messages)?;
        Ok(reply)
    }

    fn save_current(&self, store: &Store) -> Result<(), CoachError> {
        store.save(StoreKey::ChatCurrent, &self.messages)?;
        match &self.active_history_id {
            Some(id) => store.save(StoreKey::ChatCurrentId, id)?,
            None => store.remove(StoreKey::ChatCurrentId)?,
        }
        Ok(())
    }

    /// Snapshot the current transcript into the saved list. A
    /// conversation loaded from a saved entry updates that entry in
    /// place; a fresh one becomes a new entry at the top.
    fn snapshot(&self, store: &Store) -> Result<(), CoachError> {
        let mut histories: Vec<ChatHistory> =
            store.load(StoreKey::ChatHistories).unwrap_or_default();

        let existing = self
            .active_history_id
            .as_ref()
            .and_then(|id| histories.iter_mut().find(|h| &h.id == id));
        match existing {
            Some(history) => {
                history.messages = self.messages.clone();
                history.last_message = chrono::Utc::now();
            }
            None => histories.insert(0, ChatHistory::from_messages(self.messages.clone())),
        }
        store.save(StoreKey::ChatHistories, &histories)?;
        Ok(())
    }

    /// Archive the current conversation (if non-empty) and start fresh
    pub fn new_chat(&mut self, store: &Store) -> Result<(), CoachError> {
        if !self.messages.is_empty() {
            self.snapshot(store)?;
        }
        self.messages.clear();
        self.active_history_id = None;
        store.remove(StoreKey::ChatCurrent)?;
        store.remove(StoreKey::ChatCurrentId)?;
        Ok(())
    }

    /// Make a saved conversation current again
    pub fn load_history(&mut self, store: &Store, id: &str) -> Result<(), CoachError> {
        let histories: Vec<ChatHistory> = store.load(StoreKey::ChatHistories).unwrap_or_default();
        let history = histories
            .iter()
            .find(|h| h.id == id)
            .ok_or_else(|| CoachError::UnknownHistory { id: id.to_string() })?;

        self.messages = history.messages.clone();
        self.active_history_id = Some(history.id.clone());
        self.save_current(store)
    }

    /// Delete a saved conversation; if it is the one currently loaded,
    /// the current transcript is cleared too
    pub fn delete_history(&mut self, store: &Store, id: &str) -> Result<(), CoachError> {
        let mut histories: Vec<ChatHistory> =
            store.load(StoreKey::ChatHistories).unwrap_or_default();
        let before = histories.len();
        histories.retain(|h| h.id != id);
        if histories.len() == before {
            return Err(CoachError::UnknownHistory { id: id.to_string() });
        }
        store.save(StoreKey::ChatHistories, &histories)?;

        if self.active_history_id.as_deref() == Some(id) {
            self.messages.clear();
            self.active_history_id = None;
            store.remove(StoreKey::ChatCurrent)?;
            store.remove(StoreKey::ChatCurrentId)?;
        }
        Ok(())
    }

    /// Saved conversations, newest first
    pub fn histories(store: &Store) -> Vec<ChatHistory> {
        store.load(StoreKey::ChatHistories).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::workspace::Workspace;
    use crate::entities::chat::ChatRole;
    use tempfile::tempdir;

    fn setup() -> (tempfile::TempDir, Store) {
        let tmp = tempdir().unwrap();
        let ws = Workspace::init(tmp.path()).unwrap();
        let store = Store::open(&ws).unwrap();
        (tmp, store)
    }

    #[test]
    fn test_every_persona_has_a_voice() {
        assert_eq!(personas().len(), 4);
        for p in personas() {
            assert!(!p.responses.is_empty());
            assert!(persona(p.id).is_ok());
        }
        assert!(persona("clippy").is_err());
    }

    #[test]
    fn test_send_appends_user_then_reply() {
        let (_tmp, store) = setup();
        let mut session = ChatSession::load(&store, "liz");
        session.send(&store, "How do I prepare for promo?").unwrap();

        assert_eq!(session.messages().len(), 2);
        assert_eq!(session.messages()[0].role, ChatRole::User);
        assert_eq!(session.messages()[1].role, ChatRole::Assistant);
        assert_eq!(session.messages()[1].persona.as_deref(), Some("liz"));

        // Reply is one of the persona's canned lines
        let reply = &session.messages()[1].content;
        assert!(persona("liz").unwrap().responses.contains(&reply.as_str()));

        // Transcript was persisted
        let stored: Vec<ChatMessage> = store.load(StoreKey::ChatCurrent).unwrap();
        assert_eq!(stored.len(), 2);
    }

    #[test]
    fn test_persona_switch_keeps_transcript() {
        let (_tmp, store) = setup();
        let mut session = ChatSession::load(&store, "liz");
        session.send(&store, "What should I focus on this quarter?").unwrap();
        session.set_persona("margaret").unwrap();
        session.send(&store, "And how do I make it visible?").unwrap();

        assert_eq!(session.messages().len(), 4);
        assert_eq!(session.messages()[1].persona.as_deref(), Some("liz"));
        assert_eq!(session.messages()[3].persona.as_deref(), Some("margaret"));
    }

    #[test]
    fn test_new_chat_archives_then_clears() {
        let (_tmp, store) = setup();
        let mut session = ChatSession::load(&store, "liz");
        session.send(&store, "Thinking about switching to the manager track").unwrap();
        session.new_chat(&store).unwrap();

        assert!(session.messages().is_empty());
        assert!(!store.exists(StoreKey::ChatCurrent));

        let histories = ChatSession::histories(&store);
        assert_eq!(histories.len(), 1);
        assert!(histories[0].title.starts_with("Thinking about switching"));
    }

    #[test]
    fn test_new_chat_on_empty_conversation_saves_nothing() {
        let (_tmp, store) = setup();
        let mut session = ChatSession::load(&store, "liz");
        session.new_chat(&store).unwrap();
        assert!(ChatSession::histories(&store).is_empty());
    }

    #[test]
    fn test_load_history_resumes_and_updates_in_place() {
        let (_tmp, store) = setup();
        let mut session = ChatSession::load(&store, "liz");
        session.send(&store, "First conversation about craft growth").unwrap();
        session.new_chat(&store).unwrap();

        let id = ChatSession::histories(&store)[0].id.clone();
        session.load_history(&store, &id).unwrap();
        assert_eq!(session.messages().len(), 2);

        // Continuing a resumed conversation updates the same entry
        session.send(&store, "Following up on that craft discussion").unwrap();
        session.new_chat(&store).unwrap();
        let histories = ChatSession::histories(&store);
        assert_eq!(histories.len(), 1);
        assert_eq!(histories[0].messages.len(), 4);
    }

    #[test]
    fn test_delete_active_history_clears_current() {
        let (_tmp, store) = setup();
        let mut session = ChatSession::load(&store, "madeline");
        session.send(&store, "Feeling stretched thin across projects").unwrap();
        session.new_chat(&store).unwrap();

        let id = ChatSession::histories(&store)[0].id.clone();
        session.load_history(&store, &id).unwrap();
        session.delete_history(&store, &id).unwrap();

        assert!(session.messages().is_empty());
        assert!(ChatSession::histories(&store).is_empty());
        assert!(!store.exists(StoreKey::ChatCurrent));
        assert!(!store.exists(StoreKey::ChatCurrentId));
    }

    #[test]
    fn test_delete_other_history_leaves_current_alone() {
        let (_tmp, store) = setup();
        let mut session = ChatSession::load(&store, "liz");
        session.send(&store, "Old conversation to be archived now").unwrap();
        session.new_chat(&store).unwrap();
        let old_id = ChatSession::histories(&store)[0].id.clone();

        session.send(&store, "A brand new conversation, still active").unwrap();
        session.delete_history(&store, &old_id).unwrap();

        assert_eq!(session.messages().len(), 2);
        assert!(ChatSession::histories(&store).is_empty());
        assert!(session.delete_history(&store, "nope").is_err());
    }
}
