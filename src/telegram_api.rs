//! Telegram Bot API client
//!
//! Thin JSON-over-HTTP client for the three methods the relay uses:
//! `setWebhook`, `deleteWebhook`, `copyMessage`. The bot token is supplied
//! per call because it arrives in the request path, not from configuration.

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::Client;
use serde::Serialize;
use tracing::debug;

use crate::types::{ApiResponse, ReplyMarkup};

/// Telegram Bot API client
#[derive(Debug, Clone)]
pub struct BotApi {
    base_url: String,
    http_client: Client,
}

/// Parameters for `setWebhook`.
#[derive(Debug, Clone, Serialize)]
pub struct SetWebhookParams {
    /// Callback URL Telegram will deliver updates to
    pub url: String,
    /// Update categories to deliver; the relay only wants `message`
    pub allowed_updates: Vec<String>,
    /// Secret echoed back in the `X-Telegram-Bot-Api-Secret-Token` header
    pub secret_token: String,
}

/// Parameters for `copyMessage`.
#[derive(Debug, Clone, Serialize)]
pub struct CopyMessageParams {
    pub chat_id: i64,
    pub from_chat_id: i64,
    pub message_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_markup: Option<ReplyMarkup>,
}

impl BotApi {
    /// Create a client against the given API base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            http_client: Client::builder()
                .timeout(Duration::from_secs(10))
                .build()
                .unwrap(),
        }
    }

    /// Register a webhook callback URL for the bot.
    pub async fn set_webhook(
        &self,
        bot_token: &str,
        params: &SetWebhookParams,
    ) -> Result<ApiResponse> {
        self.call(bot_token, "setWebhook", params).await
    }

    /// Remove the bot's webhook registration.
    pub async fn delete_webhook(&self, bot_token: &str) -> Result<ApiResponse> {
        self.call(bot_token, "deleteWebhook", &serde_json::json!({}))
            .await
    }

    /// Copy a message into another chat, optionally attaching an inline
    /// keyboard.
    pub async fn copy_message(
        &self,
        bot_token: &str,
        params: &CopyMessageParams,
    ) -> Result<ApiResponse> {
        self.call(bot_token, "copyMessage", params).await
    }

    async fn call<B: Serialize + ?Sized>(
        &self,
        bot_token: &str,
        method: &str,
        body: &B,
    ) -> Result<ApiResponse> {
        let url = format!("{}/bot{}/{}", self.base_url, bot_token, method);

        debug!("Calling Bot API method {}", method);

        let response = self
            .http_client
            .post(&url)
            .json(body)
            .send()
            .await
            .with_context(|| format!("Failed to send {} request", method))?;

        let result: ApiResponse = response
            .json()
            .await
            .with_context(|| format!("Failed to parse {} response", method))?;

        if !result.ok {
            debug!(
                "Bot API {} returned ok=false: {}",
                method,
                result.description.as_deref().unwrap_or("no description")
            );
        }

        Ok(result)
    }
}
