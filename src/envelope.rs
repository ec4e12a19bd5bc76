//! Sender-identity envelope carried on forwarded copies
//!
//! The relay is stateless: the only link between a forwarded copy and the
//! user who sent it is a one-button inline keyboard attached to the copy.
//! The button encodes the sender's chat id either in a `tg://user?id=` deep
//! link or, where Telegram refuses user links, in the button's callback
//! data. When the owner replies to a forwarded copy, decoding that keyboard
//! recovers the routing target with no other state consulted.

use crate::types::{Chat, InlineKeyboardButton, ReplyMarkup};

/// Deep-link scheme prefix understood by Telegram clients.
const USER_LINK_PREFIX: &str = "tg://user?id=";

/// Build the URL-form envelope: a deep link to the sender's profile.
pub fn url_form(sender: i64, label: &str) -> ReplyMarkup {
    single_button(InlineKeyboardButton {
        text: format!("🔓 From: {} ({})", label, sender),
        url: Some(format!("{}{}", USER_LINK_PREFIX, sender)),
        callback_data: None,
    })
}

/// Build the callback-form envelope: the id rides in the callback data.
///
/// Telegram caps callback data at 64 bytes; a decimal chat id fits, so the
/// id is stored as its plain decimal string.
pub fn callback_form(sender: i64, label: &str) -> ReplyMarkup {
    single_button(InlineKeyboardButton {
        text: format!("🔏 From: {} ({})", label, sender),
        url: None,
        callback_data: Some(sender.to_string()),
    })
}

fn single_button(button: InlineKeyboardButton) -> ReplyMarkup {
    ReplyMarkup {
        inline_keyboard: vec![vec![button]],
    }
}

/// Recover the sender id from a forwarded copy's keyboard.
///
/// Reads the first button of the first row, preferring callback data over
/// the deep-link URL. `None` means the keyboard carries no usable identity
/// (foreign keyboard, stripped markup, malformed id); the caller treats the
/// reply as non-actionable rather than an error.
pub fn decode(markup: &ReplyMarkup) -> Option<i64> {
    let button = markup.inline_keyboard.first()?.first()?;
    if let Some(data) = &button.callback_data {
        return data.parse().ok();
    }
    let url = button.url.as_deref()?;
    url.strip_prefix(USER_LINK_PREFIX)?.parse().ok()
}

/// Human-readable sender label: `@username` when set, otherwise first and
/// last name joined with a single space (either part may be absent).
pub fn display_label(chat: &Chat) -> String {
    if let Some(username) = &chat.username {
        return format!("@{}", username);
    }

    let mut parts = Vec::new();
    if let Some(first) = &chat.first_name {
        parts.push(first.as_str());
    }
    if let Some(last) = &chat.last_name {
        parts.push(last.as_str());
    }
    parts.join(" ")
}
