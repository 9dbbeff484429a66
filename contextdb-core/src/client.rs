//! HTTP client for the ContextDB REST API.
//!
//! Every method maps to exactly one request: it builds the URL, query string
//! or JSON body, sends it, rejects non-2xx statuses and hands back the parsed
//! JSON body untouched. There is no caching, retry or backoff; failures go
//! straight to the caller.
//!
//! The client only holds its base URL and a `reqwest::Client`, whose
//! connection pool is shared between clones. It is `Send + Sync`, so callers
//! that want parallel requests can share one instance across tasks.

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::RequestBuilder;
use serde::Serialize;
use serde_json::Value;

use crate::error::{ClientError, ClientResult};
use crate::models::{ApiKeyRequest, ConversationRequest, MessageRequest, Operation};

/// Base URL used when none is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/api/v1";

const DEFAULT_LIST_LIMIT: u32 = 50;
const DEFAULT_SEARCH_LIMIT: u32 = 20;

/// Construction options for [`ContextDbClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    /// Sent as `Authorization: Bearer <key>` on every request
    pub api_key: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: None,
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }
}

/// Filters and paging for `GET /operations`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListOperationsQuery {
    pub document_id: Option<String>,
    pub author: Option<String>,
    pub limit: u32,
    pub offset: u32,
}

impl Default for ListOperationsQuery {
    fn default() -> Self {
        Self {
            document_id: None,
            author: None,
            limit: DEFAULT_LIST_LIMIT,
            offset: 0,
        }
    }
}

impl ListOperationsQuery {
    pub fn document_id(mut self, document_id: impl Into<String>) -> Self {
        self.document_id = Some(document_id.into());
        self
    }

    pub fn author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    pub fn offset(mut self, offset: u32) -> Self {
        self.offset = offset;
        self
    }

    fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("limit", self.limit.to_string()),
            ("offset", self.offset.to_string()),
        ];
        push_filter(&mut params, "document_id", &self.document_id);
        push_filter(&mut params, "author", &self.author);
        params
    }
}

/// Parameters for `GET /search`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub query: String,
    /// Sent as `type`
    pub content_type: Option<String>,
    pub limit: u32,
    pub offset: u32,
}

impl SearchQuery {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            content_type: None,
            limit: DEFAULT_SEARCH_LIMIT,
            offset: 0,
        }
    }

    pub fn content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    pub fn offset(mut self, offset: u32) -> Self {
        self.offset = offset;
        self
    }

    fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("q", self.query.clone()),
            ("limit", self.limit.to_string()),
            ("offset", self.offset.to_string()),
        ];
        push_filter(&mut params, "type", &self.content_type);
        params
    }
}

/// Empty filters are treated as absent.
fn push_filter(params: &mut Vec<(&'static str, String)>, key: &'static str, value: &Option<String>) {
    if let Some(value) = value.as_deref().filter(|v| !v.is_empty()) {
        params.push((key, value.to_string()));
    }
}

fn require_non_empty(value: &str, what: &str) -> ClientResult<()> {
    if value.is_empty() {
        return Err(ClientError::InvalidInput(format!("{} cannot be empty", what)));
    }
    Ok(())
}

/// Client for a ContextDB server.
#[derive(Debug, Clone)]
pub struct ContextDbClient {
    base_url: String,
    authenticated: bool,
    http: reqwest::Client,
}

impl ContextDbClient {
    /// Creates a client. No network I/O happens here.
    pub fn new(config: ClientConfig) -> ClientResult<Self> {
        let mut headers = HeaderMap::new();
        let api_key = config.api_key.as_deref().filter(|k| !k.is_empty());

        if let Some(key) = api_key {
            let mut auth = HeaderValue::from_str(&format!("Bearer {}", key))
                .map_err(|e| ClientError::InvalidApiKey(e.to_string()))?;
            auth.set_sensitive(true);
            headers.insert(AUTHORIZATION, auth);
            headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        }

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| ClientError::Build(e.to_string()))?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            authenticated: api_key.is_some(),
            http,
        })
    }

    /// Returns the base URL with trailing slashes stripped.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns true if requests carry a bearer token.
    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    /// `POST /operations`. The response carries the server-assigned id.
    pub async fn create_operation(&self, operation: &Operation) -> ClientResult<Value> {
        self.post("/operations", &operation.to_request()).await
    }

    /// `GET /operations/{id}`
    pub async fn get_operation(&self, operation_id: &str) -> ClientResult<Value> {
        require_non_empty(operation_id, "operation id")?;
        self.get(&format!("/operations/{}", segment(operation_id)), &[])
            .await
    }

    /// `GET /operations` with optional filters.
    pub async fn list_operations(&self, query: &ListOperationsQuery) -> ClientResult<Value> {
        self.get("/operations", &query.params()).await
    }

    /// `GET /search`
    pub async fn search(&self, query: &SearchQuery) -> ClientResult<Value> {
        require_non_empty(&query.query, "search query")?;
        self.get("/search", &query.params()).await
    }

    /// `POST /analyze/intent` for a batch of operations.
    pub async fn analyze_intent<S: AsRef<str>>(&self, operation_ids: &[S]) -> ClientResult<Value> {
        if operation_ids.is_empty() {
            return Err(ClientError::InvalidInput(
                "at least one operation id is required".to_string(),
            ));
        }
        let ids: Vec<&str> = operation_ids.iter().map(AsRef::as_ref).collect();
        for id in &ids {
            require_non_empty(id, "operation id")?;
        }
        self.post("/analyze/intent", &serde_json::json!({ "operations": ids }))
            .await
    }

    /// `GET /operations/{id}/intent`
    pub async fn get_operation_intent(&self, operation_id: &str) -> ClientResult<Value> {
        require_non_empty(operation_id, "operation id")?;
        self.get(&format!("/operations/{}/intent", segment(operation_id)), &[])
            .await
    }

    /// `GET /operations/{id}/context`
    pub async fn get_operation_context(&self, operation_id: &str) -> ClientResult<Value> {
        require_non_empty(operation_id, "operation id")?;
        self.get(&format!("/operations/{}/context", segment(operation_id)), &[])
            .await
    }

    /// `GET /documents/{path}`
    pub async fn get_document(&self, path: &str) -> ClientResult<Value> {
        require_non_empty(path, "document path")?;
        self.get(&format!("/documents/{}", segment(path)), &[]).await
    }

    /// `GET /documents/{path}/history`
    pub async fn get_document_history(&self, path: &str) -> ClientResult<Value> {
        require_non_empty(path, "document path")?;
        self.get(&format!("/documents/{}/history", segment(path)), &[])
            .await
    }

    /// `POST /conversations`
    pub async fn create_conversation(&self, request: &ConversationRequest) -> ClientResult<Value> {
        require_non_empty(&request.author_id, "author id")?;
        require_non_empty(&request.title, "conversation title")?;
        self.post("/conversations", request).await
    }

    /// `GET /conversations/{id}`
    pub async fn get_conversation(&self, conversation_id: &str) -> ClientResult<Value> {
        require_non_empty(conversation_id, "conversation id")?;
        self.get(&format!("/conversations/{}", segment(conversation_id)), &[])
            .await
    }

    /// `POST /conversations/{id}/messages`
    pub async fn add_message(
        &self,
        conversation_id: &str,
        message: &MessageRequest,
    ) -> ClientResult<Value> {
        require_non_empty(conversation_id, "conversation id")?;
        require_non_empty(&message.author_id, "author id")?;
        self.post(
            &format!("/conversations/{}/messages", segment(conversation_id)),
            message,
        )
        .await
    }

    /// `POST /addresses/resolve`. The address is the server's opaque stable address.
    pub async fn resolve_address(&self, address: &Value) -> ClientResult<Value> {
        self.post("/addresses/resolve", &serde_json::json!({ "address": address }))
            .await
    }

    /// `GET /addresses/{address}/history`. The server expects the address as
    /// JSON in the path, so it is serialized and sent as one encoded segment.
    pub async fn get_address_history(&self, address: &Value) -> ClientResult<Value> {
        let encoded = serde_json::to_string(address)?;
        self.get(&format!("/addresses/{}/history", segment(&encoded)), &[])
            .await
    }

    /// `POST /auth/keys`. Requires admin permission on the server.
    pub async fn create_api_key(&self, request: &ApiKeyRequest) -> ClientResult<Value> {
        require_non_empty(&request.name, "key name")?;
        require_non_empty(&request.author_id, "author id")?;
        self.post("/auth/keys", request).await
    }

    /// `GET /auth/keys`
    pub async fn list_api_keys(&self) -> ClientResult<Value> {
        self.get("/auth/keys", &[]).await
    }

    /// `DELETE /auth/keys/{id}`
    pub async fn revoke_api_key(&self, key_id: &str) -> ClientResult<Value> {
        require_non_empty(key_id, "key id")?;
        let url = self.url(&format!("/auth/keys/{}", segment(key_id)));
        tracing::debug!("DELETE {}", url);
        self.send(self.http.delete(&url)).await
    }

    /// `GET /auth/status`
    pub async fn auth_status(&self) -> ClientResult<Value> {
        self.get("/auth/status", &[]).await
    }

    /// `POST /auth/enable`. Requires admin permission on the server.
    pub async fn auth_enable(&self) -> ClientResult<Value> {
        self.post("/auth/enable", &serde_json::json!({})).await
    }

    /// `POST /auth/disable`. Requires admin permission on the server.
    pub async fn auth_disable(&self) -> ClientResult<Value> {
        self.post("/auth/disable", &serde_json::json!({})).await
    }

    /// `GET /health`. The payload is returned as the server sent it.
    pub async fn health_check(&self) -> ClientResult<Value> {
        self.get("/health", &[]).await
    }

    async fn get(&self, path: &str, params: &[(&'static str, String)]) -> ClientResult<Value> {
        let url = self.url(path);
        tracing::debug!("GET {} {:?}", url, params);

        let mut request = self.http.get(&url);
        if !params.is_empty() {
            request = request.query(params);
        }
        self.send(request).await
    }

    async fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> ClientResult<Value> {
        let url = self.url(path);
        tracing::debug!("POST {}", url);
        self.send(self.http.post(&url).json(body)).await
    }

    async fn send(&self, request: RequestBuilder) -> ClientResult<Value> {
        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let url = response.url().clone();
            let body = response.text().await.unwrap_or_default();
            tracing::warn!("{} returned status {}", url, status);
            return Err(ClientError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let text = response.text().await?;
        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&text)?)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// Percent-encodes a single path segment.
fn segment(value: &str) -> std::borrow::Cow<'_, str> {
    urlencoding::encode(value)
}
