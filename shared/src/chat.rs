//! Display-oriented chat messages built from backend exchanges.
//!
//! [`ChatMessage`] is tagged by `type` (`"incoming"` / `"outgoing"`); callers
//! match on the variant instead of probing optional fields.
//! [`ChatMessageFields`] is the untagged-by-construction shape used where the
//! variant is not yet known, and converts into a [`ChatMessage`] only after
//! validation.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::format::date_label;
use crate::models::{MessageWithStatusResponse, StatusUpdate};
use crate::{Error, Result};

/// Sender value shown for our own outgoing messages.
pub const SELF_SENDER: &str = "You";

/// The fixed `from` of an outgoing message.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SelfSender {
    #[default]
    #[serde(rename = "You")]
    You,
}

/// Message received from a phone number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomingChatMessage {
    pub id: String,
    pub text: String,
    pub timestamp: DateTime<Utc>,
    /// Sender phone number
    pub from: String,
}

/// Message we sent, with its delivery statuses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutgoingChatMessage {
    pub id: String,
    pub text: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub from: SelfSender,
    pub statuses: Vec<StatusUpdate>,
}

/// Chat entry tagged by `type`; (de)serialized through [`ChatMessageFields`]
/// so the wire boundary applies the same validation as `TryFrom`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ChatMessageFields", into = "ChatMessageFields")]
pub enum ChatMessage {
    Incoming(IncomingChatMessage),
    Outgoing(OutgoingChatMessage),
}

/// Direction discriminant of [`ChatMessageFields`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Incoming,
    Outgoing,
}

/// Generic chat message shape whose variant is carried only by `type`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessageFields {
    pub id: String,
    pub from: String,
    pub text: String,
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "type")]
    pub direction: Direction,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub statuses: Option<Vec<StatusUpdate>>,
}

impl ChatMessage {
    pub fn id(&self) -> &str {
        match self {
            ChatMessage::Incoming(m) => &m.id,
            ChatMessage::Outgoing(m) => &m.id,
        }
    }

    pub fn text(&self) -> &str {
        match self {
            ChatMessage::Incoming(m) => &m.text,
            ChatMessage::Outgoing(m) => &m.text,
        }
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            ChatMessage::Incoming(m) => m.timestamp,
            ChatMessage::Outgoing(m) => m.timestamp,
        }
    }

    /// Sender shown in the chat view.
    pub fn sender(&self) -> &str {
        match self {
            ChatMessage::Incoming(m) => &m.from,
            ChatMessage::Outgoing(_) => SELF_SENDER,
        }
    }

    pub fn direction(&self) -> Direction {
        match self {
            ChatMessage::Incoming(_) => Direction::Incoming,
            ChatMessage::Outgoing(_) => Direction::Outgoing,
        }
    }

    /// Delivery statuses; always empty for incoming messages.
    pub fn statuses(&self) -> &[StatusUpdate] {
        match self {
            ChatMessage::Incoming(_) => &[],
            ChatMessage::Outgoing(m) => &m.statuses,
        }
    }
}

impl TryFrom<ChatMessageFields> for ChatMessage {
    type Error = Error;

    fn try_from(fields: ChatMessageFields) -> Result<Self> {
        match fields.direction {
            Direction::Incoming => {
                if fields.statuses.is_some() {
                    return Err(Error::Validation(format!(
                        "incoming message {} cannot carry statuses",
                        fields.id
                    )));
                }
                Ok(ChatMessage::Incoming(IncomingChatMessage {
                    id: fields.id,
                    text: fields.text,
                    timestamp: fields.timestamp,
                    from: fields.from,
                }))
            }
            Direction::Outgoing => {
                if fields.from != SELF_SENDER {
                    return Err(Error::Validation(format!(
                        "outgoing message {} must be from {:?}, got {:?}",
                        fields.id, SELF_SENDER, fields.from
                    )));
                }
                Ok(ChatMessage::Outgoing(OutgoingChatMessage {
                    id: fields.id,
                    text: fields.text,
                    timestamp: fields.timestamp,
                    from: SelfSender::You,
                    statuses: fields.statuses.unwrap_or_default(),
                }))
            }
        }
    }
}

impl From<ChatMessage> for ChatMessageFields {
    fn from(message: ChatMessage) -> Self {
        match message {
            ChatMessage::Incoming(m) => Self {
                id: m.id,
                from: m.from,
                text: m.text,
                timestamp: m.timestamp,
                direction: Direction::Incoming,
                statuses: None,
            },
            ChatMessage::Outgoing(m) => Self {
                id: m.id,
                from: SELF_SENDER.to_string(),
                text: m.text,
                timestamp: m.timestamp,
                direction: Direction::Outgoing,
                statuses: Some(m.statuses),
            },
        }
    }
}

/// Parse a backend timestamp: Unix epoch seconds or RFC 3339.
pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>> {
    let raw = raw.trim();

    if !raw.is_empty() && raw.bytes().all(|b| b.is_ascii_digit()) {
        return raw
            .parse::<i64>()
            .ok()
            .and_then(|secs| DateTime::from_timestamp(secs, 0))
            .ok_or_else(|| Error::Validation(format!("Timestamp out of range: {}", raw)));
    }

    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| Error::Validation(format!("Invalid timestamp {:?}: {}", raw, e)))
}

impl MessageWithStatusResponse {
    /// Most recent delivery status, if any.
    pub fn latest_status(&self) -> Option<&StatusUpdate> {
        self.statuses.last()
    }

    /// The incoming message and our reply as chat entries, in that order.
    pub fn to_chat_messages(&self) -> Result<Vec<ChatMessage>> {
        let incoming = &self.incoming_message;
        let reply = &self.reply_message;
        let received_at = parse_timestamp(&incoming.timestamp)?;

        // The reply carries no timestamp of its own; its first status is the
        // closest thing to a send time.
        let sent_at = self
            .statuses
            .iter()
            .filter_map(|s| parse_timestamp(&s.timestamp).ok())
            .min()
            .unwrap_or(received_at);

        Ok(vec![
            ChatMessage::Incoming(IncomingChatMessage {
                id: format!("{}:in", reply.message_id),
                text: incoming.incoming_message.clone(),
                timestamp: received_at,
                from: incoming.from_number.clone(),
            }),
            ChatMessage::Outgoing(OutgoingChatMessage {
                id: reply.message_id.clone(),
                text: reply.message.clone(),
                timestamp: sent_at,
                from: SelfSender::You,
                statuses: self.statuses.clone(),
            }),
        ])
    }
}

/// Flatten exchanges into a chat timeline, oldest first.
///
/// Pages may arrive newest-first; the sort is stable so an incoming message
/// and its reply sharing a timestamp keep their order.
pub fn chat_timeline(exchanges: &[MessageWithStatusResponse]) -> Result<Vec<ChatMessage>> {
    let mut timeline = Vec::with_capacity(exchanges.len() * 2);
    for exchange in exchanges {
        timeline.extend(exchange.to_chat_messages()?);
    }
    timeline.sort_by_key(|m| m.timestamp());
    Ok(timeline)
}

/// Group a timeline into consecutive runs sharing a date label.
///
/// `today` is the viewer's local date; message timestamps are converted to
/// local time before comparison.
pub fn group_by_date_label(
    messages: Vec<ChatMessage>,
    today: NaiveDate,
) -> Vec<(String, Vec<ChatMessage>)> {
    let mut groups: Vec<(String, Vec<ChatMessage>)> = Vec::new();

    for message in messages {
        let date = message.timestamp().with_timezone(&chrono::Local).date_naive();
        let label = date_label(date, today);
        match groups.last_mut() {
            Some((last, bucket)) if *last == label => bucket.push(message),
            _ => groups.push((label, vec![message])),
        }
    }

    groups
}
