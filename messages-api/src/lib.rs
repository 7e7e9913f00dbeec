//! Typed client for the chatbot messages backend.
//!
//! ```ignore
//! let client = MessagesClient::from_env()?;
//! let page = client
//!     .get_messages(&MessageQuery::new().phone_number("254712345678"))
//!     .await?;
//! ```

pub mod client;

#[cfg(test)]
mod test_server;

pub use client::{MessagePage, MessageQuery, MessagesClient, SortOrder};
pub use shared::{ApiConfig, Error, Result};
