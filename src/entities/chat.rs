//! Chat transcript records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ulid::Ulid;

/// Who authored a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

/// A single message in a conversation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: String,
    pub role: ChatRole,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    /// Persona active when an assistant message was produced
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub persona: Option<String>,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            id: Ulid::new().to_string(),
            role: ChatRole::User,
            content: content.into(),
            timestamp: Utc::now(),
            persona: None,
        }
    }

    pub fn assistant(content: impl Into<String>, persona: impl Into<String>) -> Self {
        Self {
            id: Ulid::new().to_string(),
            role: ChatRole::Assistant,
            content: content.into(),
            timestamp: Utc::now(),
            persona: Some(persona.into()),
        }
    }
}

/// A named, dated bundle of finalized messages
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatHistory {
    pub id: String,
    pub title: String,
    pub messages: Vec<ChatMessage>,
    pub last_message: DateTime<Utc>,
}

impl ChatHistory {
    /// Snapshot a conversation; the title is the first message's prefix
    pub fn from_messages(messages: Vec<ChatMessage>) -> Self {
        let title = messages
            .first()
            .map(|m| m.content.chars().take(50).collect())
            .unwrap_or_else(|| "New Conversation".to_string());
        Self {
            id: Ulid::new().to_string(),
            title,
            messages,
            last_message: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_title_is_first_message_prefix() {
        let long = "How do I position myself for a promotion to the next grade this cycle?";
        let history = ChatHistory::from_messages(vec![ChatMessage::user(long)]);
        assert_eq!(history.title.chars().count(), 50);
        assert!(long.starts_with(&history.title));
    }

    #[test]
    fn test_message_round_trips() {
        let msg = ChatMessage::assistant("Focus on measurable impact.", "liz");
        let json = serde_json::to_string(&msg).unwrap();
        let parsed: ChatMessage = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, msg);
    }
}
