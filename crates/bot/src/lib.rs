//! The TremitiBot request pipeline.
//!
//! Each message runs **classify → select context → assemble instructions →
//! invoke → normalize**:
//!
//! 1. A [`Classifier`] maps the message to at most one [`Category`](tremitibot_core::Category)
//! 2. The [`ContextSelector`](tremitibot_knowledge::ContextSelector) picks the relevant data slice
//! 3. The [`PromptAssembler`] builds the instruction block around it
//! 4. History plus the new message become the turn sequence
//! 5. One call to the generation service; failures become a fixed fallback reply
//!
//! [`BotFacade`] is the only entry point callers need.

pub mod classifier;
pub mod conversation;
pub mod dates;
pub mod facade;
pub mod prompt;
pub mod transcript;

#[cfg(test)]
pub(crate) mod test_helpers;

pub use classifier::{Classifier, KeywordClassifier, ModelClassifier, build_classifier};
pub use conversation::to_turns;
pub use facade::{BotFacade, BotReply, FALLBACK_MESSAGE, SendOutcome, TranscriptOutcome, TranscriptTask};
pub use prompt::{PromptAssembler, PromptBundle};
pub use transcript::{InMemoryTranscript, JsonlTranscript, TranscriptEntry};
