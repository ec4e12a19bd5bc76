//! Webhook install/uninstall against the Bot API
//!
//! Both operations gate on the shared-secret strength policy before any
//! network traffic, and both are idempotent from the caller's perspective:
//! re-installing overwrites the prior registration, re-uninstalling an
//! already-bare bot still reports whatever the Bot API reports.

use axum::http::StatusCode;
use tracing::{info, warn};

use crate::secret;
use crate::telegram_api::{BotApi, SetWebhookParams};
use crate::types::OperationStatus;

/// Outcome of an install or uninstall request: the HTTP status to return
/// plus the operator-facing JSON body.
#[derive(Debug, Clone)]
pub struct Outcome {
    pub status: StatusCode,
    pub body: OperationStatus,
}

impl Outcome {
    fn ok(message: &str) -> Self {
        Self {
            status: StatusCode::OK,
            body: OperationStatus {
                success: true,
                message: message.to_string(),
            },
        }
    }

    fn failed(status: StatusCode, message: String) -> Self {
        Self {
            status,
            body: OperationStatus {
                success: false,
                message,
            },
        }
    }

    fn weak_secret() -> Self {
        Self::failed(StatusCode::BAD_REQUEST, secret::REQUIREMENTS.to_string())
    }
}

/// Register the relay's callback URL as the bot's webhook.
///
/// `origin` is the scheme-and-host of the inbound request
/// (e.g. `https://relay.example.com`); the callback URL embeds the owner id
/// and bot token so webhook deliveries carry their own routing context.
pub async fn install(
    api: &BotApi,
    owner: &str,
    bot_token: &str,
    origin: &str,
    prefix: &str,
    secret_token: &str,
) -> Outcome {
    if !secret::is_strong(secret_token) {
        return Outcome::weak_secret();
    }

    let webhook_url = format!("{}/{}/webhook/{}/{}", origin, prefix, owner, bot_token);
    let params = SetWebhookParams {
        url: webhook_url,
        allowed_updates: vec!["message".to_string()],
        secret_token: secret_token.to_string(),
    };

    match api.set_webhook(bot_token, &params).await {
        Ok(resp) if resp.ok => {
            info!("Webhook installed for owner {}", owner);
            Outcome::ok("Webhook successfully installed.")
        }
        Ok(resp) => {
            let description = resp
                .description
                .unwrap_or_else(|| "Unknown error".to_string());
            warn!("Webhook install rejected for owner {}: {}", owner, description);
            Outcome::failed(
                StatusCode::BAD_REQUEST,
                format!("Failed to install webhook: {}", description),
            )
        }
        Err(e) => Outcome::failed(
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Error installing webhook: {:#}", e),
        ),
    }
}

/// Deregister the bot's webhook.
pub async fn uninstall(api: &BotApi, bot_token: &str, secret_token: &str) -> Outcome {
    if !secret::is_strong(secret_token) {
        return Outcome::weak_secret();
    }

    match api.delete_webhook(bot_token).await {
        Ok(resp) if resp.ok => {
            info!("Webhook uninstalled");
            Outcome::ok("Webhook successfully uninstalled.")
        }
        Ok(resp) => {
            let description = resp
                .description
                .unwrap_or_else(|| "Unknown error".to_string());
            warn!("Webhook uninstall rejected: {}", description);
            Outcome::failed(
                StatusCode::BAD_REQUEST,
                format!("Failed to uninstall webhook: {}", description),
            )
        }
        Err(e) => Outcome::failed(
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Error uninstalling webhook: {:#}", e),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // A client pointed somewhere unroutable; the weak-secret gate must
    // return before any request could be attempted.
    fn dead_api() -> BotApi {
        BotApi::new("http://127.0.0.1:9")
    }

    #[tokio::test]
    async fn test_install_rejects_weak_secret_without_network() {
        let outcome = install(
            &dead_api(),
            "99",
            "123:ABC",
            "https://relay.example.com",
            "public",
            "short1A",
        )
        .await;

        assert_eq!(outcome.status, StatusCode::BAD_REQUEST);
        assert!(!outcome.body.success);
        assert!(outcome.body.message.contains("at least 16 characters"));
    }

    #[tokio::test]
    async fn test_uninstall_rejects_weak_secret_without_network() {
        let outcome = uninstall(&dead_api(), "123:ABC", "").await;

        assert_eq!(outcome.status, StatusCode::BAD_REQUEST);
        assert!(!outcome.body.success);
    }

    #[tokio::test]
    async fn test_install_transport_failure_is_structured() {
        let outcome = install(
            &dead_api(),
            "99",
            "123:ABC",
            "http://localhost:8080",
            "public",
            "Aa1aaaaaaaaaaaaaa",
        )
        .await;

        assert_eq!(outcome.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!outcome.body.success);
        assert!(outcome.body.message.starts_with("Error installing webhook:"));
    }
}
