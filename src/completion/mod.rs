use std::pin::Pin;

use async_trait::async_trait;
use futures_util::Stream;
use serde::Serialize;

use crate::credential::Credential;
use crate::error::ChainError;

pub mod openai;
pub mod sse;

pub use openai::{ClientConfig, OpenAiClient, DEFAULT_BASE_URL, MODEL};
pub use sse::{decode_fragments, SseDecoder, SseFrame};

/// Text deltas of one completion, in arrival order. Consumed once.
pub type FragmentStream = Pin<Box<dyn Stream<Item = Result<String, ChainError>> + Send>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
}

#[derive(Debug, Serialize)]
pub struct ChatMessage<'a> {
    pub role: Role,
    pub content: &'a str,
}

/// Chat-completions payload. Sampling parameters are left to the service defaults.
#[derive(Debug, Serialize)]
pub struct ChatRequest<'a> {
    pub model: &'a str,
    pub messages: Vec<ChatMessage<'a>>,
    pub stream: bool,
}

impl<'a> ChatRequest<'a> {
    pub fn streaming_user_prompt(model: &'a str, prompt: &'a str) -> Self {
        Self {
            model,
            messages: vec![ChatMessage {
                role: Role::User,
                content: prompt,
            }],
            stream: true,
        }
    }
}

/// Opens a streaming chat completion for a single user prompt.
///
/// Implementors own transport and wire format; one call is one outbound
/// request with no retry and no caching.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn stream(
        &self,
        credential: &Credential,
        prompt: &str,
    ) -> Result<FragmentStream, ChainError>;
}
