//! ContextDB Core Library
//!
//! HTTP client, request models and error types for the ContextDB REST API.

pub mod client;
pub mod error;
pub mod models;
pub mod response;

pub use client::{ClientConfig, ContextDbClient, ListOperationsQuery, SearchQuery, DEFAULT_BASE_URL};
pub use error::{ClientError, ClientResult};
pub use models::{
    ApiKeyRequest, ConversationRequest, MessageRequest, NewOperation, Operation, Permission,
    Position, Segment,
};

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }
}
