//! Telegram Relay - Main Entry Point
//!
//! A stateless relay server that:
//! 1. Receives webhook deliveries from the Telegram Bot API
//! 2. Forwards user messages to the bot owner, tagged with sender identity
//! 3. Routes the owner's replies back to the original sender
//!
//! # Architecture
//!
//! ```text
//! Telegram ──webhook POST──▶ Relay (this) ──copyMessage──▶ Telegram
//!                              │
//!                              ├── Router (install / uninstall / webhook)
//!                              ├── Relay Engine (classify + forward)
//!                              └── Identity Envelope (inline keyboard)
//! ```

use anyhow::Result;
use std::net::SocketAddr;
use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use telegram_relay::config::RelayConfig;
use telegram_relay::webhook;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,telegram_relay=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("🚀 Telegram relay starting...");

    // Load configuration
    let config = RelayConfig::from_env()?;
    info!("📋 Configuration loaded (prefix: {})", config.prefix);

    // Spawn the webhook server
    let addr: SocketAddr = config.bind_addr.parse()?;
    let bind_addr = config.bind_addr.clone();
    let server = tokio::spawn(async move {
        if let Err(e) = webhook::run_server(addr, config).await {
            tracing::error!("Relay server error: {}", e);
        }
    });

    info!("🌐 Relay webhook server listening on {}", bind_addr);

    // Wait for shutdown signal
    match signal::ctrl_c().await {
        Ok(()) => info!("📢 Shutdown signal received"),
        Err(err) => tracing::error!("Unable to listen for shutdown signal: {}", err),
    }

    // Graceful shutdown
    info!("🛑 Shutting down server...");
    server.abort();

    info!("✅ Telegram relay stopped");
    Ok(())
}
