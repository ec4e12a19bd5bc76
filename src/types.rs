//! Typed views of Telegram updates and Bot API envelopes
//!
//! Only the fields the relay actually consumes are modeled. Every nested
//! level is optional: Telegram sends many update shapes, and an update
//! missing any expected field must decode cleanly rather than fail.

use serde::{Deserialize, Serialize};

// =============================================================================
// Inbound Update Types (from Telegram webhook deliveries)
// =============================================================================

/// One webhook delivery from the Bot API.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Update {
    #[serde(default)]
    pub message: Option<Message>,
}

/// A Telegram message, possibly a reply to an earlier one.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Message {
    #[serde(default)]
    pub message_id: Option<i64>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub chat: Option<Chat>,
    #[serde(default)]
    pub reply_to_message: Option<Box<Message>>,
    #[serde(default)]
    pub reply_markup: Option<ReplyMarkup>,
}

/// The chat a message arrived from. For the direct-message bot use case
/// this doubles as the sender: `id` is the sender's chat id.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Chat {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
}

/// Inline keyboard attached to a message. Built when forwarding a copy to
/// the owner, and read back out of `reply_to_message` when the owner replies
/// to that copy.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReplyMarkup {
    #[serde(default)]
    pub inline_keyboard: Vec<Vec<InlineKeyboardButton>>,
}

/// A single inline-keyboard button. Telegram requires exactly one of the
/// optional action fields to be set when sending.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InlineKeyboardButton {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub callback_data: Option<String>,
}

// =============================================================================
// Bot API Response Envelope
// =============================================================================

/// Response envelope common to every Bot API method.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiResponse {
    #[serde(default)]
    pub ok: bool,
    #[serde(default)]
    pub description: Option<String>,
}

// =============================================================================
// Operator-Facing Types
// =============================================================================

/// JSON body returned to the operator from install/uninstall requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperationStatus {
    pub success: bool,
    pub message: String,
}
