use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::models::{ChatMessage, MessageRole};

/// One exchange unit in a conversation. Immutable once created;
/// ordering is insertion order.
#[derive(Debug, Clone)]
pub struct ChatTurn {
    pub id: Uuid,
    pub role: MessageRole,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl ChatTurn {
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(MessageRole::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(MessageRole::Assistant, content)
    }

    fn new(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            role,
            content: content.into(),
            created_at: Utc::now(),
        }
    }
}

/// Ordered message log for one active session. Lives entirely in
/// memory; cleared when the session ends. Mirrors what a chat client
/// keeps between submissions: it appends the user question, then the
/// assistant answer (or the localized error standing in for one), and
/// hands back a bounded trailing window as history for the next turn.
#[derive(Debug, Default)]
pub struct ConversationLog {
    turns: Vec<ChatTurn>,
}

impl ConversationLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, turn: ChatTurn) {
        self.turns.push(turn);
    }

    pub fn clear(&mut self) {
        self.turns.clear();
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// The most recent user question, for the retry action that
    /// re-submits it unchanged after a failure.
    pub fn last_user_question(&self) -> Option<&str> {
        self.turns
            .iter()
            .rev()
            .find(|t| t.role == MessageRole::User)
            .map(|t| t.content.as_str())
    }

    /// Trailing window of at most `bound` turns, in original order,
    /// in the wire history shape.
    pub fn window(&self, bound: usize) -> ConversationWindow {
        let messages: Vec<ChatMessage> = self
            .turns
            .iter()
            .map(|t| ChatMessage {
                role: t.role,
                content: t.content.clone(),
            })
            .collect();
        ConversationWindow::from_messages(&messages, bound)
    }
}

/// Ordered, bounded sequence of the most recent turns used as model
/// context. Older turns are dropped, never reordered; holding more
/// than the bound is not representable.
#[derive(Debug, Clone)]
pub struct ConversationWindow {
    entries: Vec<ChatMessage>,
}

impl ConversationWindow {
    /// Keep the trailing `bound` messages in their original order.
    pub fn from_messages(messages: &[ChatMessage], bound: usize) -> Self {
        let skip = messages.len().saturating_sub(bound);
        Self {
            entries: messages[skip..].to_vec(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ChatMessage> {
        self.entries.iter()
    }
}
