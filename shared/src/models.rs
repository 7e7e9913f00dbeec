//! Wire models mirroring the messages backend contract.

use serde::{Deserialize, Serialize};

/// Discriminant of an [`IncomingMessage`]; only `"message"` is accepted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessageKind {
    #[default]
    #[serde(rename = "message")]
    Message,
}

/// Discriminant of a [`StatusUpdate`]; only `"status"` is accepted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatusKind {
    #[default]
    #[serde(rename = "status")]
    Status,
}

/// Message received from a phone number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomingMessage {
    /// Business phone number id that received the message
    pub phone_number_id: String,
    /// Opaque serialized instant, kept as sent by the backend
    pub timestamp: String,
    #[serde(rename = "type")]
    pub kind: MessageKind,
    /// Sender's phone number
    pub from_number: String,
    /// Message body
    pub incoming_message: String,
}

/// Outbound reply correlated to an incoming message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplyMessage {
    pub to_number: String,
    pub message_id: String,
    pub message: String,
}

/// Delivery-status transition for a previously sent reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusUpdate {
    pub phone_number_id: String,
    pub timestamp: String,
    #[serde(rename = "type")]
    pub kind: StatusKind,
    /// e.g. sent, delivered, read
    pub status: String,
    pub message_id: String,
    pub recipient_id: String,
}

/// One exchange: the incoming message, our reply, and the reply's statuses in
/// arrival order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageWithStatusResponse {
    pub incoming_message: IncomingMessage,
    pub reply_message: ReplyMessage,
    pub statuses: Vec<StatusUpdate>,
}

/// Page envelope returned by list endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    pub items: Vec<T>,
    /// Total number of matching records
    pub total: i64,
    pub page: i64,
    pub size: i64,
    /// Total number of pages
    pub pages: i64,
}

impl<T> PaginatedResponse<T> {
    /// Whether another page exists after this one.
    pub fn has_next(&self) -> bool {
        self.page < self.pages
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
