//! Telegram Relay Library
//!
//! A stateless relay that bridges an anonymous-messaging Telegram bot's
//! webhook events with its owner's chat. Inbound user messages are
//! copy-forwarded to the owner tagged with sender identity; the owner's
//! replies are routed back to the original sender by decoding that identity
//! out of the forwarded copy's inline keyboard.
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
//!
//! No conversation state is stored anywhere: the sender's chat id rides on
//! every forwarded copy, so each request is handled in isolation.
//!
//! # Usage
//!
//! ```bash
//! # Set environment variables
//! export SECRET_TOKEN=YourStrongSecret123   # >15 chars, upper+lower+digit
//! export PREFIX=public                      # optional, default "public"
//! export BIND_ADDR=0.0.0.0:8080             # optional
//!
//! # Run, then visit (any HTTP method):
//! #   /public/install/<owner_chat_id>/<bot_token>
//! #   /public/uninstall/<bot_token>
//! telegram-relay
//! ```

pub mod config;
pub mod envelope;
pub mod lifecycle;
pub mod relay;
pub mod secret;
pub mod telegram_api;
pub mod types;
pub mod webhook;

pub use config::RelayConfig;
pub use telegram_api::BotApi;
pub use types::*;

/// Prelude for common imports
pub mod prelude {
    pub use crate::config::RelayConfig;
    pub use crate::relay::RelayAction;
    pub use crate::telegram_api::BotApi;
    pub use crate::types::*;
}
