//! # Writing Assistant
//!
//! Answers syntax questions for the current mode. Questions go to an
//! OpenAI-compatible chat-completions endpoint when one is configured;
//! otherwise, or when the upstream fails, a built-in offline responder
//! answers instead, so asking never fails.

pub mod client;
pub mod fallback;
pub mod history;

pub use client::AssistantClient;
pub use fallback::fallback_response;
pub use history::{ConversationHistory, Exchange};

use crate::config::AssistantSettings;
use crate::document::Mode;
use anyhow::Result;

pub struct Assistant {
    client: AssistantClient,
}

impl Assistant {
    pub fn new(settings: AssistantSettings) -> Result<Self> {
        Ok(Self {
            client: AssistantClient::new(settings)?,
        })
    }

    /// Answer `question` and return the reply with the extended history
    pub async fn answer(
        &self,
        question: &str,
        mode: Mode,
        mut history: ConversationHistory,
    ) -> (String, ConversationHistory) {
        let response = match self.client.complete(question, mode, &history).await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!("Assistant upstream unavailable, using fallback: {e:#}");
                fallback_response(question, mode)
            }
        };

        history.push(Exchange::new(question, &response));
        (response, history)
    }
}
