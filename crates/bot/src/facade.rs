//! The bot facade: one entry point for callers.
//!
//! `Idle → Classifying → SelectingContext → AssemblingPrompt → Invoking →
//! Normalizing → {Success, Failed}`. Classification happens exactly once per
//! message, the generation call is the only required suspension point, and
//! nothing is retried.
//!
//! Transcript recording runs after the reply is decided, on its own task.
//! [`SendOutcome`] keeps the reply and the recording outcome apart so the
//! latter can be observed without ever influencing the former.

use crate::classifier::Classifier;
use crate::conversation::to_turns;
use crate::dates;
use crate::prompt::{PromptAssembler, PromptBundle};
use chrono::NaiveDate;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::sync::Arc;
use tokio::sync::{Mutex, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};
use tremitibot_core::error::TranscriptError;
use tremitibot_core::message::Turn;
use tremitibot_core::provider::{ModelParameters, Provider, ProviderRequest, Usage};
use tremitibot_core::transcript::TranscriptSink;
use tremitibot_core::Category;
use tremitibot_knowledge::KnowledgeStore;

/// Shown to the user whenever a reply could not be produced.
pub const FALLBACK_MESSAGE: &str =
    "Mi dispiace, c'è stato un problema. Contatta [Fuffy](https://tremitinow.it/cGFnZS82Mw==) per assistenza.";

/// The caller-facing result of one message.
#[derive(Debug, Clone, PartialEq)]
pub enum BotReply {
    Success { message: String, usage: Usage },
    Failed { error: String, fallback_message: String },
}

impl BotReply {
    fn failed(error: impl Into<String>) -> Self {
        BotReply::Failed {
            error: error.into(),
            fallback_message: FALLBACK_MESSAGE.to_string(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, BotReply::Success { .. })
    }

    /// The text to show the user: the answer, or the fallback message.
    pub fn display_text(&self) -> &str {
        match self {
            BotReply::Success { message, .. } => message,
            BotReply::Failed { fallback_message, .. } => fallback_message,
        }
    }
}

impl Serialize for BotReply {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(3))?;
        match self {
            BotReply::Success { message, usage } => {
                map.serialize_entry("success", &true)?;
                map.serialize_entry("message", message)?;
                map.serialize_entry("usage", usage)?;
            }
            BotReply::Failed { error, fallback_message } => {
                map.serialize_entry("success", &false)?;
                map.serialize_entry("error", error)?;
                map.serialize_entry("fallbackMessage", fallback_message)?;
            }
        }
        map.end()
    }
}

/// How transcript recording ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranscriptOutcome {
    /// No sink configured
    NotConfigured,
    /// The reply failed, so there was nothing to record
    Skipped,
    Recorded,
    /// Recording failed; logged and otherwise ignored
    Failed(String),
}

/// The in-flight transcript side effect of one message.
#[derive(Debug)]
pub enum TranscriptTask {
    NotConfigured,
    Skipped,
    Spawned(oneshot::Receiver<TranscriptOutcome>),
}

impl TranscriptTask {
    /// Wait for the side effect to finish.
    pub async fn settle(self) -> TranscriptOutcome {
        match self {
            TranscriptTask::NotConfigured => TranscriptOutcome::NotConfigured,
            TranscriptTask::Skipped => TranscriptOutcome::Skipped,
            TranscriptTask::Spawned(outcome) => outcome
                .await
                .unwrap_or_else(|e| TranscriptOutcome::Failed(format!("transcript task aborted: {e}"))),
        }
    }
}

/// Everything `dispatch` produced for one message.
#[derive(Debug)]
pub struct SendOutcome {
    pub category: Option<Category>,
    pub reply: BotReply,
    pub transcript: TranscriptTask,
}

/// Orchestrates classification, context selection, prompt assembly and the
/// generation call.
pub struct BotFacade {
    assembler: PromptAssembler,
    provider: Arc<dyn Provider>,
    classifier: Arc<dyn Classifier>,
    params: ModelParameters,
    transcript: Option<Arc<dyn TranscriptSink>>,
    /// Recording tasks not yet awaited by `shutdown`
    in_flight: Mutex<Vec<JoinHandle<()>>>,
    clock: fn() -> NaiveDate,
}

impl BotFacade {
    pub fn new(
        store: Arc<KnowledgeStore>,
        provider: Arc<dyn Provider>,
        classifier: Arc<dyn Classifier>,
        params: ModelParameters,
    ) -> Self {
        Self {
            assembler: PromptAssembler::new(store),
            provider,
            classifier,
            params,
            transcript: None,
            in_flight: Mutex::new(Vec::new()),
            clock: dates::today_local,
        }
    }

    /// Record answered questions to `sink`.
    pub fn with_transcript(mut self, sink: Arc<dyn TranscriptSink>) -> Self {
        self.transcript = Some(sink);
        self
    }

    /// Override the source of "today" (tests, replays).
    pub fn with_clock(mut self, clock: fn() -> NaiveDate) -> Self {
        self.clock = clock;
        self
    }

    pub fn assembler(&self) -> &PromptAssembler {
        &self.assembler
    }

    pub fn classifier(&self) -> &dyn Classifier {
        self.classifier.as_ref()
    }

    /// Classify the message and build the bundle, without invoking anything.
    pub async fn prepare(&self, message: &str, history: &[Turn]) -> (Option<Category>, PromptBundle) {
        let category = self.classifier.classify(message).await;
        info!(
            classifier = %self.classifier.name(),
            category = category.map(|c| c.key()).unwrap_or("nessuna"),
            "Message classified"
        );

        let bundle = PromptBundle {
            system_instructions: self.assembler.build_instructions(category, (self.clock)()),
            turns: to_turns(history, message),
        };
        (category, bundle)
    }

    /// Handle one message and expose the transcript side effect.
    pub async fn dispatch(&self, message: &str, history: &[Turn]) -> SendOutcome {
        if message.trim().is_empty() {
            return SendOutcome {
                category: None,
                reply: BotReply::failed("message is required"),
                transcript: TranscriptTask::Skipped,
            };
        }

        let (category, bundle) = self.prepare(message, history).await;

        let request = ProviderRequest {
            system: bundle.system_instructions,
            turns: bundle.turns,
            params: self.params.clone(),
        };

        debug!(
            provider = %self.provider.name(),
            model = %self.params.model,
            turns = request.turns.len(),
            "Invoking generation service"
        );

        let reply = match self.provider.complete(request).await {
            Ok(response) => {
                info!(
                    input_tokens = response.usage.input_tokens,
                    output_tokens = response.usage.output_tokens,
                    "Reply generated"
                );
                BotReply::Success {
                    message: response.text,
                    usage: response.usage,
                }
            }
            Err(e) => {
                error!(provider = %self.provider.name(), error = %e, "Generation call failed");
                BotReply::failed(e.to_string())
            }
        };

        let transcript = self.spawn_transcript(message, &reply).await;
        SendOutcome {
            category,
            reply,
            transcript,
        }
    }

    /// Handle one message. Transcript recording continues in the background.
    pub async fn send_message(&self, message: &str, history: &[Turn]) -> BotReply {
        self.dispatch(message, history).await.reply
    }

    /// Wait for pending transcript writes, then release the sink.
    pub async fn shutdown(&self) -> Result<(), TranscriptError> {
        let pending = std::mem::take(&mut *self.in_flight.lock().await);
        if !pending.is_empty() {
            debug!(pending = pending.len(), "Waiting for transcript writes");
        }
        for handle in pending {
            if let Err(e) = handle.await {
                warn!(error = %e, "Transcript task did not complete");
            }
        }

        if let Some(sink) = &self.transcript {
            sink.close().await?;
            info!(sink = %sink.name(), "Transcript sink closed");
        }
        Ok(())
    }

    async fn spawn_transcript(&self, question: &str, reply: &BotReply) -> TranscriptTask {
        let Some(sink) = self.transcript.clone() else {
            return TranscriptTask::NotConfigured;
        };
        let BotReply::Success { message: answer, .. } = reply else {
            return TranscriptTask::Skipped;
        };

        let question = question.to_string();
        let answer = answer.clone();
        let (tx, rx) = oneshot::channel();
        let handle = tokio::spawn(async move {
            let outcome = match sink.record(&question, &answer).await {
                Ok(()) => {
                    debug!(sink = %sink.name(), "Exchange recorded");
                    TranscriptOutcome::Recorded
                }
                Err(e) => {
                    warn!(sink = %sink.name(), error = %e, "Transcript recording failed");
                    TranscriptOutcome::Failed(e.to_string())
                }
            };
            if tx.send(outcome).is_err() {
                // send_message drops the receiver
                debug!("Transcript outcome not observed");
            }
        });

        let mut in_flight = self.in_flight.lock().await;
        in_flight.retain(|h| !h.is_finished());
        in_flight.push(handle);

        TranscriptTask::Spawned(rx)
    }
}
