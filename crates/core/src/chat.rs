//! Chat channels and messages.

use businessos_shared::types::{ChannelId, MessageId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::validation::not_blank;

/// A chat channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatChannel {
    /// Channel ID.
    pub id: ChannelId,
    /// Display name.
    pub name: String,
}

/// A message in a channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Message ID.
    pub id: MessageId,
    /// Owning channel.
    pub channel_id: ChannelId,
    /// Author display name.
    pub author: String,
    /// Text.
    pub body: String,
    /// Send time.
    pub sent_at: DateTime<Utc>,
}

/// Body of a new message.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewMessage {
    /// Text.
    #[validate(
        custom(function = "not_blank", message = "Message cannot be empty"),
        length(max = 4000, message = "Message is too long")
    )]
    pub body: String,
}

/// Messages in send order. The sort is stable so equal timestamps keep the
/// order the backend returned.
#[must_use]
pub fn thread(messages: &[ChatMessage]) -> Vec<ChatMessage> {
    let mut out = messages.to_vec();
    out.sort_by_key(|m| m.sent_at);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::validate_input;
    use chrono::TimeZone;

    #[test]
    fn test_thread_orders_by_time() {
        let channel = ChannelId::new();
        let msg = |body: &str, minute: u32| ChatMessage {
            id: MessageId::new(),
            channel_id: channel,
            author: "Sam".into(),
            body: body.into(),
            sent_at: Utc.with_ymd_and_hms(2026, 2, 2, 9, minute, 0).unwrap(),
        };
        let out = thread(&[msg("second", 5), msg("first", 1), msg("third", 9)]);
        let bodies: Vec<_> = out.iter().map(|m| m.body.as_str()).collect();
        assert_eq!(bodies, ["first", "second", "third"]);
    }

    #[test]
    fn test_blank_message_rejected() {
        let err = validate_input(&NewMessage { body: "   ".into() }).unwrap_err();
        assert!(err.to_string().contains("Message cannot be empty"));
    }
}
