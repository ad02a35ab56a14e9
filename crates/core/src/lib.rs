//! # TremitiBot Core
//!
//! Domain types, traits, and error definitions for the TremitiBot assistant.
//! This crate has **zero framework dependencies**: it defines the domain model
//! that the knowledge, provider, and bot crates implement against.
//!
//! ## Design Philosophy
//!
//! Every external collaborator is a trait here:
//! - [`Provider`]: the text-generation service
//! - [`TranscriptSink`]: best-effort recording of question/answer pairs
//!
//! Implementations live in their respective crates, so tests can swap in
//! scripted providers and in-memory sinks.

pub mod category;
pub mod error;
pub mod message;
pub mod provider;
pub mod transcript;

// Re-export key types at crate root for ergonomics
pub use category::Category;
pub use error::{Error, Result};
pub use message::{Role, Turn};
pub use provider::{ModelParameters, Provider, ProviderRequest, ProviderResponse, Usage};
pub use transcript::TranscriptSink;
