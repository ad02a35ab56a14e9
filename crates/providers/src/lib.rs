//! Text-generation providers for TremitiBot.
//!
//! All providers implement the `tremitibot_core::Provider` trait.
//! `build_from_config` picks one based on configuration.

pub mod anthropic;
pub mod openai_compat;
pub mod router;

mod http;

pub use anthropic::AnthropicProvider;
pub use openai_compat::OpenAiCompatProvider;
pub use router::build_from_config;
