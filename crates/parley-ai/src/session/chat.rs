//! Producing the assistant reply for the current turn.

use tracing::debug;

use crate::{AiError, ChatClient, Role, Turn};

use super::manager::ConversationSession;
use super::types::BusyGuard;

impl ConversationSession {
    /// Forward `input` to the chat collaborator and append its reply.
    ///
    /// `input` may differ from the stored user turn when the feature
    /// pipeline transformed it; the collaborator receives it in place of the
    /// trailing user turn. On failure nothing is appended and the prior user
    /// turn remains the most recent.
    pub async fn produce_assistant_reply(
        &mut self,
        client: &dyn ChatClient,
        input: &str,
    ) -> Result<Turn, AiError> {
        let _guard = BusyGuard::acquire(&self.busy)?;

        let prior = match self.turns.last() {
            Some(turn) if turn.speaker == Role::User => &self.turns[..self.turns.len() - 1],
            _ => &self.turns[..],
        };

        let reply = client.send_message(prior, input).await?;
        debug!(sequence = self.turns.len(), "assistant reply produced");

        let turn = Turn {
            speaker: Role::Assistant,
            text: reply,
            sequence: self.turns.len(),
        };
        self.turns.push(turn.clone());
        Ok(turn)
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::*;

    /// Echoes a canned reply and records what it was sent.
    struct StubChat {
        reply: String,
    }

    #[async_trait]
    impl ChatClient for StubChat {
        async fn send_message(&self, _history: &[Turn], _input: &str) -> Result<String, AiError> {
            Ok(self.reply.clone())
        }
    }

    struct FailingChat;

    #[async_trait]
    impl ChatClient for FailingChat {
        async fn send_message(&self, _history: &[Turn], _input: &str) -> Result<String, AiError> {
            Err(AiError::Upstream("HTTP 500: boom".into()))
        }
    }

    #[tokio::test]
    async fn reply_follows_user_turn() {
        let mut session = ConversationSession::new();
        let stub = StubChat {
            reply: "Hi there".into(),
        };

        let user_seq = session.append_user("Hello").sequence;
        let turn = session
            .produce_assistant_reply(&stub, "Hello")
            .await
            .unwrap();

        assert_eq!(turn.speaker, Role::Assistant);
        assert_eq!(turn.text, "Hi there");
        assert_eq!(turn.sequence, user_seq + 1);
        assert_eq!(session.turn_count(), 2);
    }

    #[tokio::test]
    async fn n_inputs_give_2n_alternating_turns() {
        let mut session = ConversationSession::new();
        let stub = StubChat { reply: "ok".into() };

        for i in 0..5 {
            session.append_user(format!("input {i}"));
            session
                .produce_assistant_reply(&stub, &format!("input {i}"))
                .await
                .unwrap();
        }

        assert_eq!(session.turn_count(), 10);
        for (i, turn) in session.turns().iter().enumerate() {
            assert_eq!(turn.sequence, i);
            let expected = if i % 2 == 0 { Role::User } else { Role::Assistant };
            assert_eq!(turn.speaker, expected);
        }
    }

    #[tokio::test]
    async fn failure_appends_nothing() {
        let mut session = ConversationSession::new();
        session.append_user("Hello");

        let err = session
            .produce_assistant_reply(&FailingChat, "Hello")
            .await
            .unwrap_err();

        assert!(matches!(err, AiError::Upstream(_)));
        assert_eq!(session.turn_count(), 1);
        assert_eq!(session.turns().last().unwrap().speaker, Role::User);
    }

    #[tokio::test]
    async fn history_sent_excludes_the_turn_being_answered() {
        /// Asserts the trailing user turn is not duplicated on the wire.
        struct HistoryCheck;

        #[async_trait]
        impl ChatClient for HistoryCheck {
            async fn send_message(&self, history: &[Turn], input: &str) -> Result<String, AiError> {
                assert_eq!(history.len(), 2);
                assert_eq!(input, "translated second");
                Ok("reply".into())
            }
        }

        let mut session = ConversationSession::new();
        session.append_user("first");
        session.append_assistant("first reply");
        session.append_user("second");

        session
            .produce_assistant_reply(&HistoryCheck, "translated second")
            .await
            .unwrap();
    }
}
