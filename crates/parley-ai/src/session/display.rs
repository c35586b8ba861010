//! Display projection and role-label mapping.

use crate::Turn;

use super::manager::ConversationSession;

/// Map a wire role label to its display label.
///
/// Total: the generative API's `"model"` becomes `"assistant"`; any other
/// label passes through unchanged rather than failing.
pub fn display_role(wire: &str) -> &str {
    if wire == "model" {
        "assistant"
    } else {
        wire
    }
}

/// The text a copy affordance places on the clipboard for `turn`.
///
/// Pure projection; the clipboard write itself belongs to the UI layer.
pub fn copy_text(turn: &Turn) -> &str {
    &turn.text
}

impl ConversationSession {
    /// Iterate turns in insertion order as `(display label, text)` pairs.
    ///
    /// Restartable: re-iterating yields the same sequence until a new turn
    /// is appended.
    pub fn project_for_display(&self) -> impl Iterator<Item = (&'static str, &str)> + '_ {
        self.turns
            .iter()
            .map(|t| (t.speaker.display_label(), t.text.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Role;

    #[test]
    fn model_maps_to_assistant() {
        assert_eq!(display_role("model"), "assistant");
    }

    #[test]
    fn other_labels_pass_through() {
        assert_eq!(display_role("user"), "user");
        assert_eq!(display_role("assistant"), "assistant");
        assert_eq!(display_role("tool"), "tool");
        assert_eq!(display_role(""), "");
    }

    #[test]
    fn projection_is_in_insertion_order() {
        let mut session = ConversationSession::new();
        session.append_user("Hello");
        session.append_assistant("Hi there");

        let projected: Vec<_> = session.project_for_display().collect();
        assert_eq!(projected, vec![("user", "Hello"), ("assistant", "Hi there")]);
    }

    #[test]
    fn projection_is_idempotent_between_appends() {
        let mut session = ConversationSession::new();
        session.append_user("one");
        session.append_assistant("two");

        let first: Vec<_> = session.project_for_display().collect();
        let second: Vec<_> = session.project_for_display().collect();
        assert_eq!(first, second);
    }

    #[test]
    fn copy_text_projects_the_turn_text() {
        let turn = Turn {
            speaker: Role::Assistant,
            text: "Hi there".into(),
            sequence: 1,
        };
        assert_eq!(copy_text(&turn), "Hi there");
    }
}
