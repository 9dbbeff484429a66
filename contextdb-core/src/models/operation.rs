use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::position::Position;

/// A proposed edit to a document.
///
/// `position` is passed through to the server untouched. `id` is assigned
/// by the server and stays `None` until the operation has been created.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Operation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "type")]
    pub op_type: String,
    pub position: Value,
    pub content: String,
    pub author: String,
    pub document_id: String,
}

impl Operation {
    pub fn new(
        op_type: impl Into<String>,
        position: Value,
        content: impl Into<String>,
        author: impl Into<String>,
        document_id: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            op_type: op_type.into(),
            position,
            content: content.into(),
            author: author.into(),
            document_id: document_id.into(),
        }
    }

    /// Insert at a single-segment position whose hash is `{author}-{value}`.
    pub fn insert(
        content: impl Into<String>,
        author: impl Into<String>,
        document_id: impl Into<String>,
        position_value: i64,
    ) -> Self {
        let author = author.into();
        let position = Position::single(position_value, author.clone());
        Self::new("insert", position.into(), content, author, document_id)
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// The creation body: every field except `id`.
    pub fn to_request(&self) -> NewOperation<'_> {
        NewOperation {
            op_type: &self.op_type,
            position: &self.position,
            content: &self.content,
            author: &self.author,
            document_id: &self.document_id,
        }
    }
}

/// Body of `POST /operations`.
#[derive(Debug, Serialize)]
pub struct NewOperation<'a> {
    #[serde(rename = "type")]
    pub op_type: &'a str,
    pub position: &'a Value,
    pub content: &'a str,
    pub author: &'a str,
    pub document_id: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_insert_builds_single_segment_position() {
        let op = Operation::insert("hello", "go-example", "main.go", 42);
        assert_eq!(op.op_type, "insert");
        assert_eq!(op.id, None);
        assert_eq!(
            op.position,
            json!({
                "segments": [{"value": 42, "author": "go-example"}],
                "hash": "go-example-42"
            })
        );
    }

    #[test]
    fn test_request_body_excludes_id() {
        let op = Operation::new("delete", json!({"hash": "h"}), "x", "alice", "doc.md")
            .with_id("op-1");

        let body = serde_json::to_value(op.to_request()).unwrap();
        assert_eq!(
            body,
            json!({
                "type": "delete",
                "position": {"hash": "h"},
                "content": "x",
                "author": "alice",
                "document_id": "doc.md"
            })
        );
    }

    #[test]
    fn test_deserialize_server_record() {
        let op: Operation = serde_json::from_value(json!({
            "id": "abc123",
            "type": "insert",
            "position": {"segments": [], "hash": "h"},
            "content": "text",
            "author": "bob",
            "document_id": "notes.md",
            "timestamp": "2024-01-01T00:00:00Z"
        }))
        .unwrap();

        assert_eq!(op.id.as_deref(), Some("abc123"));
        assert_eq!(op.author, "bob");
    }
}
