//! Shared library for the messages client.
//!
//! This crate provides the configuration, error type, wire models, chat view
//! model and date formatting used by the messages API client.

pub mod chat;
pub mod config;
pub mod error;
pub mod format;
pub mod logging;
pub mod models;

pub use chat::{
    chat_timeline, group_by_date_label, parse_timestamp, ChatMessage, ChatMessageFields, Direction,
    IncomingChatMessage, OutgoingChatMessage, SelfSender,
};
pub use config::ApiConfig;
pub use error::{Error, Result};
pub use format::{date_label, format_date_label, format_date_label_on};
pub use logging::init_tracing;
pub use models::{
    IncomingMessage, MessageKind, MessageWithStatusResponse, PaginatedResponse, ReplyMessage,
    StatusKind, StatusUpdate,
};
