//! # Assistant Upstream Client
//!
//! Minimal OpenAI-compatible chat-completions client.

use super::ConversationHistory;
use crate::config::AssistantSettings;
use crate::document::Mode;
use anyhow::{anyhow, bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

const MAX_TOKENS: u32 = 200;
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    fn new(role: &str, content: impl Into<String>) -> Self {
        Self {
            role: role.to_string(),
            content: content.into(),
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

pub struct AssistantClient {
    http: reqwest::Client,
    settings: AssistantSettings,
}

impl AssistantClient {
    pub fn new(settings: AssistantSettings) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("Failed to build assistant HTTP client")?;
        Ok(Self { http, settings })
    }

    /// Whether an upstream model can be asked at all
    pub fn is_configured(&self) -> bool {
        self.settings.api_key.is_some()
    }

    /// System prompt, replayed history, then the new question
    pub fn build_messages(
        question: &str,
        mode: Mode,
        history: &ConversationHistory,
    ) -> Vec<ChatMessage> {
        let mut messages = Vec::with_capacity(history.len() * 2 + 2);
        messages.push(ChatMessage::new(
            "system",
            format!(
                "You are an assistant for a {} editor. Answer briefly and help with syntax.",
                mode.label()
            ),
        ));
        for exchange in history.exchanges() {
            messages.push(ChatMessage::new("user", exchange.question.as_str()));
            messages.push(ChatMessage::new("assistant", exchange.answer.as_str()));
        }
        messages.push(ChatMessage::new("user", question));
        messages
    }

    /// Ask the upstream model
    pub async fn complete(
        &self,
        question: &str,
        mode: Mode,
        history: &ConversationHistory,
    ) -> Result<String> {
        let Some(api_key) = self.settings.api_key.as_deref() else {
            bail!("no assistant API key configured");
        };

        let request = ChatRequest {
            model: &self.settings.model,
            messages: Self::build_messages(question, mode, history),
            max_tokens: MAX_TOKENS,
        };

        tracing::debug!(
            "Asking {} with {} messages",
            self.settings.api_url,
            request.messages.len()
        );
        let response = self
            .http
            .post(&self.settings.api_url)
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await
            .context("Assistant request failed")?;

        let status = response.status();
        if !status.is_success() {
            bail!("assistant upstream returned {status}");
        }

        let body: ChatResponse = response
            .json()
            .await
            .context("Malformed assistant response")?;

        body.choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| anyhow!("assistant response had no choices"))
    }
}
