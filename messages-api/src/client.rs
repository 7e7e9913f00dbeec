//! Client for the paginated `GET /messages` endpoint.

use serde::{Deserialize, Serialize};
use shared::{ApiConfig, MessageWithStatusResponse, PaginatedResponse, Result};
use tracing::{debug, info, warn};

/// Page returned by [`MessagesClient::get_messages`].
pub type MessagePage = PaginatedResponse<MessageWithStatusResponse>;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

/// Query parameters for listing messages.
///
/// Values are forwarded as-is; the backend rejects or clamps out-of-range
/// pages and sizes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageQuery {
    /// Only messages exchanged with this phone number
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    pub page: i64,
    pub size: i64,
    pub sort_order: SortOrder,
    /// Free text matched against phone numbers and message bodies
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

impl Default for MessageQuery {
    fn default() -> Self {
        Self {
            phone_number: None,
            page: 1,
            size: 20,
            sort_order: SortOrder::Desc,
            search: None,
        }
    }
}

impl MessageQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phone_number(mut self, phone_number: impl Into<String>) -> Self {
        self.phone_number = Some(phone_number.into());
        self
    }

    pub fn page(mut self, page: i64) -> Self {
        self.page = page;
        self
    }

    pub fn size(mut self, size: i64) -> Self {
        self.size = size;
        self
    }

    pub fn sort_order(mut self, sort_order: SortOrder) -> Self {
        self.sort_order = sort_order;
        self
    }

    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }
}

/// Client for the messages backend.
///
/// Every call is a single round trip: no retries, caching or deduplication.
/// Clones share the connection pool.
#[derive(Debug, Clone)]
pub struct MessagesClient {
    config: ApiConfig,
    http_client: reqwest::Client,
}

impl MessagesClient {
    /// Create a new client for the given backend.
    pub fn new(config: ApiConfig) -> Self {
        Self::with_http_client(config, reqwest::Client::new())
    }

    /// Create a client reusing an existing `reqwest` client.
    pub fn with_http_client(config: ApiConfig, http_client: reqwest::Client) -> Self {
        Self {
            config,
            http_client,
        }
    }

    /// Create a client configured from the environment.
    pub fn from_env() -> Result<Self> {
        Ok(Self::new(ApiConfig::from_env()?))
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// Build the `GET /messages` request without sending it.
    pub fn build_get_messages(&self, query: &MessageQuery) -> Result<reqwest::Request> {
        let request = self
            .http_client
            .get(self.config.endpoint("/messages"))
            .query(query)
            .build()?;
        Ok(request)
    }

    /// Fetch one page of messages with their delivery statuses.
    pub async fn get_messages(&self, query: &MessageQuery) -> Result<MessagePage> {
        let request = self.build_get_messages(query)?;
        debug!(url = %request.url(), "Fetching messages");

        let response = self.http_client.execute(request).await?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "Messages request failed");
        }
        let body = response.error_for_status()?.bytes().await?;

        let page: MessagePage = serde_json::from_slice(&body)?;

        info!(
            items = page.items.len(),
            total = page.total,
            page = page.page,
            "Fetched messages"
        );

        Ok(page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_server::TestServer;
    use shared::Error;

    const PAGE_BODY: &str = r#"{
        "items": [{
            "incoming_message": {
                "phone_number_id": "746599524843368",
                "timestamp": "1757340000",
                "type": "message",
                "from_number": "254712345678",
                "incoming_message": "Habari"
            },
            "reply_message": {
                "to_number": "254712345678",
                "message_id": "wamid.HBgM",
                "message": "Karibu!"
            },
            "statuses": []
        }],
        "total": 1,
        "page": 1,
        "size": 20,
        "pages": 1
    }"#;

    fn client() -> MessagesClient {
        MessagesClient::new(ApiConfig::new("http://localhost:8000"))
    }

    fn query_of(query: &MessageQuery) -> String {
        let request = client().build_get_messages(query).unwrap();
        assert_eq!(request.method(), reqwest::Method::GET);
        assert_eq!(request.url().path(), "/messages");
        request.url().query().unwrap_or_default().to_string()
    }

    #[test]
    fn test_default_query() {
        assert_eq!(query_of(&MessageQuery::new()), "page=1&size=20&sort_order=desc");
    }

    #[test]
    fn test_phone_number_wire_name() {
        let query = MessageQuery::new()
            .phone_number("254712345678")
            .page(3)
            .size(50)
            .sort_order(SortOrder::Asc);
        assert_eq!(
            query_of(&query),
            "phone_number=254712345678&page=3&size=50&sort_order=asc"
        );
    }

    #[test]
    fn test_search_is_forwarded() {
        let query = MessageQuery::new().search("opening hours");
        assert_eq!(
            query_of(&query),
            "page=1&size=20&sort_order=desc&search=opening+hours"
        );
    }

    #[test]
    fn test_out_of_range_values_pass_through() {
        let query = MessageQuery::new().page(-1).size(0);
        assert_eq!(query_of(&query), "page=-1&size=0&sort_order=desc");
    }

    #[test]
    fn test_base_url_is_injected() {
        let client = MessagesClient::new(ApiConfig::new("https://api.example.com/v2/"));
        assert_eq!(client.config().base_url(), "https://api.example.com/v2");
        let request = client.build_get_messages(&MessageQuery::new()).unwrap();
        assert_eq!(request.url().host_str(), Some("api.example.com"));
        assert_eq!(request.url().path(), "/v2/messages");
    }

    #[tokio::test]
    async fn test_get_messages_parses_page() {
        let server = TestServer::start(200, PAGE_BODY).await;
        let client = MessagesClient::new(ApiConfig::new(server.base_url()));

        let page = client
            .get_messages(&MessageQuery::new().phone_number("254712345678"))
            .await
            .unwrap();

        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].reply_message.message, "Karibu!");
        assert_eq!(page.items[0].incoming_message.timestamp, "1757340000");
        assert_eq!(
            server.request_targets(),
            vec!["/messages?phone_number=254712345678&page=1&size=20&sort_order=desc"]
        );
    }

    #[tokio::test]
    async fn test_error_status_propagates() {
        let server = TestServer::start(500, r#"{"error":"Failed to fetch messages"}"#).await;
        let client = MessagesClient::new(ApiConfig::new(server.base_url()));

        let err = client.get_messages(&MessageQuery::new()).await.unwrap_err();
        assert!(matches!(err, Error::Http(_)));
        assert_eq!(err.status_code(), Some(500));
    }

    #[tokio::test]
    async fn test_malformed_body_is_an_error() {
        let server = TestServer::start(200, r#"{"items":[{"nope":true}]}"#).await;
        let client = MessagesClient::new(ApiConfig::new(server.base_url()));

        let err = client.get_messages(&MessageQuery::new()).await.unwrap_err();
        assert!(matches!(err, Error::Serialization(_)));
    }

    #[tokio::test]
    async fn test_connection_refused_propagates() {
        let base_url = TestServer::unused_base_url().await;
        let client = MessagesClient::new(ApiConfig::new(base_url));

        let err = client.get_messages(&MessageQuery::new()).await.unwrap_err();
        assert!(matches!(err, Error::Http(_)));
        assert_eq!(err.status_code(), None);
    }

    #[tokio::test]
    async fn test_concurrent_identical_calls_are_independent() {
        let server = TestServer::start(200, PAGE_BODY).await;
        let client = MessagesClient::new(ApiConfig::new(server.base_url()));
        let query = MessageQuery::new();

        let (first, second) = tokio::join!(client.get_messages(&query), client.get_messages(&query));

        assert_eq!(first.unwrap(), second.unwrap());
        assert_eq!(server.request_targets().len(), 2);
    }
}
