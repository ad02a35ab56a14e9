//! Conversation adapter: history plus the new message as a turn sequence.

use tremitibot_core::message::Turn;

/// Copy `history` in order and append `message` as the final user turn.
///
/// No validation, deduplication or truncation happens here.
pub fn to_turns(history: &[Turn], message: &str) -> Vec<Turn> {
    let mut turns = Vec::with_capacity(history.len() + 1);
    turns.extend_from_slice(history);
    turns.push(Turn::user(message));
    turns
}
