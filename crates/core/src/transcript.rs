//! Transcript sink: best-effort recording of answered questions.
//!
//! Recording happens after the reply has been decided. A sink failure is
//! logged by the caller and never changes the reply.

use async_trait::async_trait;
use crate::error::TranscriptError;

/// Records question/answer pairs somewhere outside the process.
///
/// Implementations: in-memory (tests, embedding), JSON-lines file.
#[async_trait]
pub trait TranscriptSink: Send + Sync {
    /// The sink name (e.g., "memory", "jsonl").
    fn name(&self) -> &str;

    /// Record one exchange.
    async fn record(&self, question: &str, answer: &str) -> std::result::Result<(), TranscriptError>;

    /// Release any external resource held by the sink.
    async fn close(&self) -> std::result::Result<(), TranscriptError> {
        Ok(())
    }
}
