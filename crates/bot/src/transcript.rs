//! Transcript sinks for best-effort recording of answered questions.
//!
//! - [`InMemoryTranscript`] keeps entries in a vector (tests, embedding)
//! - [`JsonlTranscript`] appends one JSON object per line to a file

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use tokio::sync::{Mutex, RwLock};
use tracing::debug;
use tremitibot_core::error::TranscriptError;
use tremitibot_core::transcript::TranscriptSink;
use uuid::Uuid;

/// One recorded exchange.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptEntry {
    pub id: String,
    pub question: String,
    pub answer: String,
    pub created_at: DateTime<Utc>,
}

impl TranscriptEntry {
    pub fn new(question: &str, answer: &str) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            question: question.to_string(),
            answer: answer.to_string(),
            created_at: Utc::now(),
        }
    }
}

/// Keeps entries in memory, oldest first.
#[derive(Default)]
pub struct InMemoryTranscript {
    entries: RwLock<Vec<TranscriptEntry>>,
}

impl InMemoryTranscript {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn entries(&self) -> Vec<TranscriptEntry> {
        self.entries.read().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl TranscriptSink for InMemoryTranscript {
    fn name(&self) -> &str {
        "memory"
    }

    async fn record(&self, question: &str, answer: &str) -> Result<(), TranscriptError> {
        self.entries
            .write()
            .await
            .push(TranscriptEntry::new(question, answer));
        Ok(())
    }
}

/// Appends entries to a JSON-lines file.
///
/// The file is opened lazily on the first write and released by `close()`.
/// Writes after `close()` fail with [`TranscriptError::Closed`].
pub struct JsonlTranscript {
    path: PathBuf,
    create_dirs: bool,
    state: Mutex<FileState>,
}

enum FileState {
    Idle,
    Open(tokio::fs::File),
    Closed,
}

impl JsonlTranscript {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            create_dirs: true,
            state: Mutex::new(FileState::Idle),
        }
    }

    /// Whether to create the parent directory when missing (default: true).
    pub fn with_create_dirs(mut self, create_dirs: bool) -> Self {
        self.create_dirs = create_dirs;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn open(&self) -> Result<tokio::fs::File, TranscriptError> {
        if self.create_dirs {
            if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
                tokio::fs::create_dir_all(parent)
                    .await
                    .map_err(|e| TranscriptError::Storage(e.to_string()))?;
            }
        }

        tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await
            .map_err(|e| TranscriptError::Storage(format!("{}: {e}", self.path.display())))
    }
}

#[async_trait]
impl TranscriptSink for JsonlTranscript {
    fn name(&self) -> &str {
        "jsonl"
    }

    async fn record(&self, question: &str, answer: &str) -> Result<(), TranscriptError> {
        let entry = TranscriptEntry::new(question, answer);
        let mut line = serde_json::to_string(&entry).map_err(|e| TranscriptError::Storage(e.to_string()))?;
        line.push('\n');

        let mut state = self.state.lock().await;
        if matches!(*state, FileState::Idle) {
            *state = FileState::Open(self.open().await?);
        }

        match &mut *state {
            FileState::Open(file) => {
                file.write_all(line.as_bytes())
                    .await
                    .map_err(|e| TranscriptError::Storage(e.to_string()))?;
                file.flush()
                    .await
                    .map_err(|e| TranscriptError::Storage(e.to_string()))?;
                debug!(path = %self.path.display(), id = %entry.id, "Transcript entry written");
                Ok(())
            }
            FileState::Closed => Err(TranscriptError::Closed),
            FileState::Idle => Err(TranscriptError::Storage("transcript file not open".into())),
        }
    }

    async fn close(&self) -> Result<(), TranscriptError> {
        let mut state = self.state.lock().await;
        if let FileState::Open(file) = &mut *state {
            file.sync_all()
                .await
                .map_err(|e| TranscriptError::Storage(e.to_string()))?;
        }
        *state = FileState::Closed;
        Ok(())
    }
}
