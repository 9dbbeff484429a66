use serde::Serialize;
use serde_json::Value;

/// Message kind used when none is given.
pub const DEFAULT_MESSAGE_TYPE: &str = "comment";

/// Body of `POST /conversations`.
///
/// `anchor_address` is the server's stable address, passed through opaquely.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ConversationRequest {
    pub anchor_address: Value,
    pub author_id: String,
    pub title: String,
    pub content: String,
}

impl ConversationRequest {
    pub fn new(
        anchor_address: Value,
        author_id: impl Into<String>,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            anchor_address,
            author_id: author_id.into(),
            title: title.into(),
            content: content.into(),
        }
    }
}

/// Body of `POST /conversations/{id}/messages`.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct MessageRequest {
    pub author_id: String,
    pub content: String,
    /// e.g. `comment`, `question`, `answer`, `decision`, `suggestion`, `review`
    pub message_type: String,
}

impl MessageRequest {
    pub fn new(author_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            author_id: author_id.into(),
            content: content.into(),
            message_type: DEFAULT_MESSAGE_TYPE.to_string(),
        }
    }

    pub fn message_type(mut self, message_type: impl Into<String>) -> Self {
        self.message_type = message_type.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_conversation_body() {
        let anchor = json!({"document_path": "notes.md", "offset": 12});
        let request = ConversationRequest::new(anchor.clone(), "alice", "Naming", "Rename this?");
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "anchor_address": anchor,
                "author_id": "alice",
                "title": "Naming",
                "content": "Rename this?"
            })
        );
    }

    #[test]
    fn test_message_defaults_to_comment() {
        let request = MessageRequest::new("bob", "Agreed");
        assert_eq!(request.message_type, "comment");

        let body = serde_json::to_value(request.message_type("decision")).unwrap();
        assert_eq!(
            body,
            json!({"author_id": "bob", "content": "Agreed", "message_type": "decision"})
        );
    }
}
