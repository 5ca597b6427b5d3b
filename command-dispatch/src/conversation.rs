//! The per-session conversation transcript shown to the clinician.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Assistant,
}

/// One utterance or response in the conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub role: Role,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl ConversationTurn {
    fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            created_at: Utc::now(),
        }
    }
}

/// Append-only conversation transcript.
///
/// The one exception to immutability is the streaming placeholder: the
/// feedback loop appends an empty assistant turn at the start of a turn and
/// mutates it in place until the turn completes. Not persisted across
/// sessions.
#[derive(Debug, Default)]
pub struct Conversation {
    turns: Vec<ConversationTurn>,
    streaming: Option<usize>,
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn turns(&self) -> &[ConversationTurn] {
        &self.turns
    }

    pub fn push_user(&mut self, content: impl Into<String>) {
        self.turns.push(ConversationTurn::new(Role::User, content));
    }

    pub fn push_assistant(&mut self, content: impl Into<String>) {
        self.turns
            .push(ConversationTurn::new(Role::Assistant, content));
    }

    /// Append the placeholder assistant turn for an in-flight response.
    pub fn begin_assistant(&mut self) {
        self.turns.push(ConversationTurn::new(Role::Assistant, ""));
        self.streaming = Some(self.turns.len() - 1);
    }

    /// Replace the placeholder's content while the response streams in.
    pub fn update_assistant(&mut self, content: impl Into<String>) {
        match self.streaming.and_then(|index| self.turns.get_mut(index)) {
            Some(turn) => turn.content = content.into(),
            None => debug!("update_assistant with no streaming turn open"),
        }
    }

    /// Seal the placeholder; the turn is immutable from here on.
    pub fn end_assistant(&mut self) {
        self.streaming = None;
    }

    /// Content of the most recent assistant turn, if any.
    pub fn last_assistant(&self) -> Option<&str> {
        self.turns
            .iter()
            .rev()
            .find(|turn| turn.role == Role::Assistant)
            .map(|turn| turn.content.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_turns_append_in_order() {
        let mut conversation = Conversation::new();
        conversation.push_user("add an allergy to penicillin");
        conversation.push_assistant("Allergy added successfully.");

        let turns = conversation.turns();
        assert_eq!(turns.len(), 2);
        assert_eq!(turns[0].role, Role::User);
        assert_eq!(turns[1].role, Role::Assistant);
    }

    #[test]
    fn test_streaming_placeholder_mutates_in_place() {
        let mut conversation = Conversation::new();
        conversation.push_user("show the summary");
        conversation.begin_assistant();
        assert_eq!(conversation.turns().len(), 2);

        conversation.update_assistant("Opening");
        conversation.update_assistant("Opening the summary.");
        conversation.end_assistant();

        assert_eq!(conversation.turns().len(), 2);
        assert_eq!(conversation.last_assistant(), Some("Opening the summary."));
    }

    #[test]
    fn test_update_after_end_is_ignored() {
        let mut conversation = Conversation::new();
        conversation.begin_assistant();
        conversation.update_assistant("done");
        conversation.end_assistant();
        conversation.update_assistant("should not land");
        assert_eq!(conversation.last_assistant(), Some("done"));
    }
}
