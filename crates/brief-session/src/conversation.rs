//! Append-only conversation log.

use brief_core::types::ConversationTurn;

/// Ordered list of chat turns for the active session.
///
/// Append-only: prior entries are never mutated, and the order is the
/// dialogue history sent verbatim to the backend. `clear` exists solely
/// for session reset.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ConversationLog {
    turns: Vec<ConversationTurn>,
}

impl ConversationLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a turn, preserving order. Duplicate content is legal; a user
    /// repeating themselves produces distinct turns.
    pub fn append(&mut self, turn: ConversationTurn) {
        self.turns.push(turn);
    }

    /// Remove all turns. Used only by session reset.
    pub fn clear(&mut self) {
        self.turns.clear();
    }

    pub fn turns(&self) -> &[ConversationTurn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}
