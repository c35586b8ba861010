//! ConversationSession struct and turn history maintenance.

use std::sync::atomic::AtomicBool;

use parley_common::SessionId;

use crate::{Role, Turn};

/// A linear turn-taking conversation history.
///
/// Created explicitly per interaction context; there is no ambient global
/// session store. Only one turn is processed at a time, enforced by a busy
/// guard during reply production.
pub struct ConversationSession {
    pub(super) id: SessionId,
    pub(super) turns: Vec<Turn>,
    /// Set while a reply is being produced.
    pub(super) busy: AtomicBool,
}

impl ConversationSession {
    pub fn new() -> Self {
        Self::with_id(SessionId::new())
    }

    pub fn with_id(id: SessionId) -> Self {
        Self {
            id,
            turns: Vec::new(),
            busy: AtomicBool::new(false),
        }
    }

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    /// Append `text` as the next user turn.
    ///
    /// Pure append; callers must treat empty input as "no input" and skip
    /// the call.
    pub fn append_user(&mut self, text: impl Into<String>) -> &Turn {
        self.push(Role::User, text.into())
    }

    /// Append an already-produced reply as the next assistant turn.
    ///
    /// Used by the pipeline route stage; `produce_assistant_reply` appends
    /// its own turn.
    pub fn append_assistant(&mut self, text: impl Into<String>) -> &Turn {
        self.push(Role::Assistant, text.into())
    }

    fn push(&mut self, speaker: Role, text: String) -> &Turn {
        let sequence = self.turns.len();
        self.turns.push(Turn {
            speaker,
            text,
            sequence,
        });
        &self.turns[sequence]
    }

    /// Full turn history in insertion order.
    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn turn_count(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Most recent assistant turn, if any.
    pub fn last_assistant(&self) -> Option<&Turn> {
        self.turns.iter().rev().find(|t| t.speaker == Role::Assistant)
    }

    /// Clear the turn history. The session id is kept.
    pub fn clear(&mut self) {
        self.turns.clear();
    }
}

impl Default for ConversationSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_user_assigns_sequence_from_length() {
        let mut session = ConversationSession::new();
        let turn = session.append_user("Hello");
        assert_eq!(turn.speaker, Role::User);
        assert_eq!(turn.text, "Hello");
        assert_eq!(turn.sequence, 0);

        session.append_assistant("Hi there");
        let turn = session.append_user("Second");
        assert_eq!(turn.sequence, 2);
    }

    #[test]
    fn append_assistant_follows_user_sequence() {
        let mut session = ConversationSession::new();
        let user_seq = session.append_user("Hello").sequence;
        let assistant_seq = session.append_assistant("Hi there").sequence;
        assert_eq!(assistant_seq, user_seq + 1);
    }

    #[test]
    fn last_assistant_skips_trailing_user_turn() {
        let mut session = ConversationSession::new();
        assert!(session.last_assistant().is_none());

        session.append_user("one");
        session.append_assistant("reply one");
        session.append_user("two");
        assert_eq!(session.last_assistant().unwrap().text, "reply one");
    }

    #[test]
    fn clear_keeps_the_session_id() {
        let mut session = ConversationSession::new();
        let id = session.id().clone();
        session.append_user("Hello");
        session.clear();
        assert!(session.is_empty());
        assert_eq!(session.id(), &id);
    }
}
