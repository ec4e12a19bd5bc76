//! Relay engine: classifies one inbound update and performs the forward
//!
//! Classification is pure; every network effect happens afterwards in
//! [`execute`]. Whatever the forwarding outcome, the webhook handler
//! acknowledges the delivery with a 2xx — a failure response here would
//! only trigger Telegram's redelivery and duplicate the forward.

use tracing::{debug, error, info, warn};

use crate::envelope;
use crate::telegram_api::{BotApi, CopyMessageParams};
use crate::types::Update;

/// What a single webhook update asks the relay to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelayAction {
    /// Nothing actionable; acknowledge and move on.
    Ack,
    /// The owner replied to a forwarded copy: route the reply back to the
    /// original sender recovered from the copy's envelope.
    ReplyToSender {
        sender: i64,
        from_chat: i64,
        message_id: i64,
    },
    /// A user wrote to the bot: forward the message to the owner.
    Forward {
        sender: i64,
        message_id: i64,
        label: String,
    },
}

/// Classify one update against the owner id. Pure; touches no network.
pub fn classify(update: &Update, owner: i64) -> RelayAction {
    let Some(message) = &update.message else {
        return RelayAction::Ack;
    };
    let Some(chat) = &message.chat else {
        return RelayAction::Ack;
    };
    let Some(chat_id) = chat.id else {
        return RelayAction::Ack;
    };

    // Owner replying to a forwarded copy: the replied-to message's keyboard
    // carries the original sender's id. A reply whose envelope does not
    // decode is acknowledged silently.
    if let Some(reply) = &message.reply_to_message {
        if chat_id == owner {
            let sender = reply.reply_markup.as_ref().and_then(envelope::decode);
            return match (sender, message.message_id) {
                (Some(sender), Some(message_id)) => RelayAction::ReplyToSender {
                    sender,
                    from_chat: chat_id,
                    message_id,
                },
                _ => RelayAction::Ack,
            };
        }
    }

    // /start gets no reply; answering would confirm the bot is live.
    if message.text.as_deref() == Some("/start") {
        return RelayAction::Ack;
    }

    let Some(message_id) = message.message_id else {
        return RelayAction::Ack;
    };

    RelayAction::Forward {
        sender: chat_id,
        message_id,
        label: envelope::display_label(chat),
    }
}

/// Execute the classified action. Forwarding failures are logged and
/// swallowed; the caller's acknowledgement never depends on them.
pub async fn execute(api: &BotApi, bot_token: &str, owner: i64, action: RelayAction) {
    match action {
        RelayAction::Ack => {}
        RelayAction::ReplyToSender {
            sender,
            from_chat,
            message_id,
        } => reply_to_sender(api, bot_token, sender, from_chat, message_id).await,
        RelayAction::Forward {
            sender,
            message_id,
            label,
        } => forward_to_owner(api, bot_token, owner, sender, message_id, &label).await,
    }
}

/// Best-effort: copy the owner's reply into the original sender's chat.
async fn reply_to_sender(api: &BotApi, bot_token: &str, sender: i64, from_chat: i64, message_id: i64) {
    let params = CopyMessageParams {
        chat_id: sender,
        from_chat_id: from_chat,
        message_id,
        reply_markup: None,
    };

    match api.copy_message(bot_token, &params).await {
        Ok(resp) if resp.ok => debug!("Routed owner reply to sender {}", sender),
        Ok(resp) => warn!(
            "Bot API rejected owner reply to {}: {}",
            sender,
            resp.description.as_deref().unwrap_or("no description")
        ),
        Err(e) => error!("Error forwarding owner reply to {}: {:#}", sender, e),
    }
}

/// Forward a fresh user message to the owner, tagged with the sender's
/// identity. The deep-link envelope goes first; Telegram refuses user links
/// in some chats, so a rejection is retried once with the callback-data
/// envelope. The second attempt's outcome is not checked further.
async fn forward_to_owner(
    api: &BotApi,
    bot_token: &str,
    owner: i64,
    sender: i64,
    message_id: i64,
    label: &str,
) {
    let primary = CopyMessageParams {
        chat_id: owner,
        from_chat_id: sender,
        message_id,
        reply_markup: Some(envelope::url_form(sender, label)),
    };

    let delivered = match api.copy_message(bot_token, &primary).await {
        Ok(resp) if resp.ok => true,
        Ok(resp) => {
            warn!(
                "Primary forward from {} rejected: {}",
                sender,
                resp.description.as_deref().unwrap_or("no description")
            );
            false
        }
        Err(e) => {
            warn!("Primary forward from {} failed: {:#}", sender, e);
            false
        }
    };

    if delivered {
        info!("Forwarded message from {} to owner", sender);
        return;
    }

    let fallback = CopyMessageParams {
        chat_id: owner,
        from_chat_id: sender,
        message_id,
        reply_markup: Some(envelope::callback_form(sender, label)),
    };

    if let Err(e) = api.copy_message(bot_token, &fallback).await {
        error!("Fallback forward from {} failed: {:#}", sender, e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Chat, Message};

    const OWNER: i64 = 99;

    fn fresh_message(chat: Chat, text: Option<&str>) -> Update {
        Update {
            message: Some(Message {
                message_id: Some(42),
                text: text.map(str::to_string),
                chat: Some(chat),
                ..Message::default()
            }),
        }
    }

    fn owner_reply(markup: Option<crate::types::ReplyMarkup>) -> Update {
        Update {
            message: Some(Message {
                message_id: Some(100),
                text: Some("got it, thanks".to_string()),
                chat: Some(Chat {
                    id: Some(OWNER),
                    ..Chat::default()
                }),
                reply_to_message: Some(Box::new(Message {
                    message_id: Some(90),
                    reply_markup: markup,
                    ..Message::default()
                })),
                ..Message::default()
            }),
        }
    }

    #[test]
    fn test_no_message_is_acked() {
        assert_eq!(classify(&Update::default(), OWNER), RelayAction::Ack);
    }

    #[test]
    fn test_message_without_chat_is_acked() {
        let update = Update {
            message: Some(Message {
                message_id: Some(1),
                text: Some("hi".to_string()),
                ..Message::default()
            }),
        };
        assert_eq!(classify(&update, OWNER), RelayAction::Ack);
    }

    #[test]
    fn test_start_command_is_acked() {
        let chat = Chat {
            id: Some(12345),
            username: Some("alice".to_string()),
            ..Chat::default()
        };
        assert_eq!(classify(&fresh_message(chat, Some("/start")), OWNER), RelayAction::Ack);
    }

    #[test]
    fn test_fresh_message_forwards_with_label() {
        let chat = Chat {
            id: Some(12345),
            username: Some("alice".to_string()),
            ..Chat::default()
        };

        assert_eq!(
            classify(&fresh_message(chat, Some("hello")), OWNER),
            RelayAction::Forward {
                sender: 12345,
                message_id: 42,
                label: "@alice".to_string(),
            }
        );
    }

    #[test]
    fn test_fresh_message_without_username_uses_names() {
        let chat = Chat {
            id: Some(555),
            first_name: Some("Bob".to_string()),
            last_name: Some("Smith".to_string()),
            ..Chat::default()
        };

        match classify(&fresh_message(chat, None), OWNER) {
            RelayAction::Forward { label, .. } => assert_eq!(label, "Bob Smith"),
            other => panic!("expected Forward, got {:?}", other),
        }
    }

    #[test]
    fn test_owner_reply_routes_to_decoded_sender() {
        let update = owner_reply(Some(envelope::url_form(67890, "@alice")));
        assert_eq!(
            classify(&update, OWNER),
            RelayAction::ReplyToSender {
                sender: 67890,
                from_chat: OWNER,
                message_id: 100,
            }
        );

        let update = owner_reply(Some(envelope::callback_form(67890, "@alice")));
        assert!(matches!(
            classify(&update, OWNER),
            RelayAction::ReplyToSender { sender: 67890, .. }
        ));
    }

    #[test]
    fn test_owner_reply_without_envelope_is_acked() {
        assert_eq!(classify(&owner_reply(None), OWNER), RelayAction::Ack);

        // Keyboard present but not one of ours
        let foreign = crate::types::ReplyMarkup {
            inline_keyboard: vec![vec![crate::types::InlineKeyboardButton {
                text: "visit".to_string(),
                url: Some("https://example.com".to_string()),
                callback_data: None,
            }]],
        };
        assert_eq!(classify(&owner_reply(Some(foreign)), OWNER), RelayAction::Ack);
    }

    #[test]
    fn test_non_owner_reply_is_forwarded_as_fresh() {
        // Someone other than the owner replying inside their own chat with
        // the bot is just a new message to relay.
        let update = Update {
            message: Some(Message {
                message_id: Some(7),
                text: Some("re: hi".to_string()),
                chat: Some(Chat {
                    id: Some(12345),
                    username: Some("alice".to_string()),
                    ..Chat::default()
                }),
                reply_to_message: Some(Box::new(Message {
                    reply_markup: Some(envelope::url_form(1, "x")),
                    ..Message::default()
                })),
                ..Message::default()
            }),
        };

        assert!(matches!(
            classify(&update, OWNER),
            RelayAction::Forward { sender: 12345, .. }
        ));
    }
}
