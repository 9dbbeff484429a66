use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One `{value, author}` element of a position.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Segment {
    pub value: i64,
    pub author: String,
}

/// Typed builder for the usual `position` payload.
///
/// The client never interprets positions; this only saves callers from
/// writing the JSON by hand.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Position {
    pub segments: Vec<Segment>,
    pub hash: String,
}

impl Position {
    pub fn new(segments: Vec<Segment>, hash: impl Into<String>) -> Self {
        Self {
            segments,
            hash: hash.into(),
        }
    }

    pub fn single(value: i64, author: impl Into<String>) -> Self {
        let author = author.into();
        let hash = format!("{}-{}", author, value);
        Self::new(vec![Segment { value, author }], hash)
    }
}

impl From<Position> for Value {
    fn from(position: Position) -> Self {
        // Integers and strings only, so serialization cannot fail.
        serde_json::to_value(position).unwrap_or(Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_into_value() {
        let position = Position::new(
            vec![
                Segment {
                    value: 1,
                    author: "a".to_string(),
                },
                Segment {
                    value: 7,
                    author: "b".to_string(),
                },
            ],
            "custom",
        );
        let value: Value = position.into();
        assert_eq!(value["hash"], "custom");
        assert_eq!(value["segments"][1]["value"], 7);
        assert_eq!(value["segments"][1]["author"], "b");
    }

    #[test]
    fn test_into_value_matches_serialize() {
        let position = Position::single(42, "alice");
        let expected = serde_json::to_value(&position).unwrap();
        let value: Value = position.into();
        assert_eq!(value, expected);
        assert_eq!(
            value,
            serde_json::json!({
                "segments": [{"value": 42, "author": "alice"}],
                "hash": "alice-42"
            })
        );
    }
}
