use std::time::Duration;

use anyhow::Context;
use async_openai::{
    config::OpenAIConfig,
    types::{ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs},
    Client,
};
use async_trait::async_trait;
use backoff::ExponentialBackoffBuilder;

#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Sends a single user prompt and returns the first text segment of the reply.
    async fn complete(&self, prompt: &str) -> anyhow::Result<String>;
}

/// Chat-completion client for any OpenAI-compatible endpoint.
pub struct OpenaiClient {
    client: Client<OpenAIConfig>,
    model: String,
    max_tokens: u32,
}

impl OpenaiClient {
    pub fn new(api_key: String, api_base: String, model: String, max_tokens: u32) -> Self {
        let config = OpenAIConfig::new()
            .with_api_key(api_key)
            .with_api_base(api_base);
        // A failed completion is reported to the caller, never re-sent.
        let no_retry = ExponentialBackoffBuilder::new()
            .with_max_elapsed_time(Some(Duration::ZERO))
            .build();
        OpenaiClient {
            client: Client::with_config(config).with_backoff(no_retry),
            model,
            max_tokens,
        }
    }
}

#[async_trait]
impl CompletionProvider for OpenaiClient {
    async fn complete(&self, prompt: &str) -> anyhow::Result<String> {
        let request = CreateChatCompletionRequestArgs::default()
            .model(self.model.as_str())
            .messages([ChatCompletionRequestUserMessageArgs::default()
                .content(prompt)
                .build()?
                .into()])
            .max_tokens(self.max_tokens)
            .build()?;

        let response = self
            .client
            .chat()
            .create(request)
            .await
            .context("Completion request failed")?;
        log::debug!("Response: {:?}", response);

        let first_choice = response
            .choices
            .into_iter()
            .next()
            .context("No choices in completion response")?
            .message
            .content
            .context("No content in completion response")?;

        Ok(first_choice)
    }
}
