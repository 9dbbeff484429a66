//! Operation commands: create, fetch, list and inspect edits.

use clap::{Args, Subcommand};
use contextdb_core::{response, ListOperationsQuery, Operation, Position};
use serde_json::Value;

use super::{block_on, print_data, snippet, CommandError, Context};

/// Manage operations
#[derive(Args)]
pub struct OperationCommand {
    #[command(subcommand)]
    pub command: OperationSubcommand,
}

#[derive(Subcommand)]
pub enum OperationSubcommand {
    /// Submit a new operation
    Create {
        /// Operation type (insert, delete, ...)
        #[arg(long = "type", default_value = "insert")]
        op_type: String,

        /// Content of the edit
        #[arg(long)]
        content: String,

        /// Author identifier
        #[arg(long)]
        author: String,

        /// Document identifier
        #[arg(long)]
        document: String,

        /// Raw position JSON, passed through unchanged
        #[arg(long, conflicts_with = "position_value")]
        position: Option<String>,

        /// Build a single-segment position with this value
        #[arg(long)]
        position_value: Option<i64>,
    },

    /// Show an operation
    Get {
        /// Operation ID
        id: String,
    },

    /// List operations
    List {
        /// Filter by document
        #[arg(long)]
        document: Option<String>,

        /// Filter by author
        #[arg(long)]
        author: Option<String>,

        /// Maximum number of results
        #[arg(long, default_value_t = 50)]
        limit: u32,

        /// Number of results to skip
        #[arg(long, default_value_t = 0)]
        offset: u32,
    },

    /// Show intent analysis for an operation
    Intent {
        /// Operation ID
        id: String,
    },

    /// Show surrounding context for an operation
    Context {
        /// Operation ID
        id: String,
    },
}

impl OperationCommand {
    pub fn run(&self, ctx: &Context) -> Result<(), CommandError> {
        match &self.command {
            OperationSubcommand::Create {
                op_type,
                content,
                author,
                document,
                position,
                position_value,
            } => {
                let position = parse_position(position.as_deref(), *position_value, author)?;
                let operation = Operation::new(op_type, position, content, author, document);
                let created = block_on(ctx.client.create_operation(&operation))??;
                ctx.print(&created, |body| {
                    let id = response::lookup_str(body, &["data", "id"])?;
                    println!("Created operation: {}", id);
                    Ok(())
                })
            }
            OperationSubcommand::Get { id } => {
                let op = block_on(ctx.client.get_operation(id))??;
                ctx.print(&op, print_operation)
            }
            OperationSubcommand::List {
                document,
                author,
                limit,
                offset,
            } => {
                let query = ListOperationsQuery {
                    document_id: document.clone(),
                    author: author.clone(),
                    limit: *limit,
                    offset: *offset,
                };
                let ops = block_on(ctx.client.list_operations(&query))??;
                ctx.print(&ops, print_operation_list)
            }
            OperationSubcommand::Intent { id } => {
                let intent = block_on(ctx.client.get_operation_intent(id))??;
                ctx.print(&intent, |body| {
                    let basic = response::lookup_str(body, &["data", "basic_intent"])?;
                    println!("Operation intent: {}", basic);
                    Ok(())
                })
            }
            OperationSubcommand::Context { id } => {
                let context = block_on(ctx.client.get_operation_context(id))??;
                ctx.print(&context, print_data)
            }
        }
    }
}

/// Resolves `--position` / `--position-value` into the opaque payload.
///
/// With neither flag the position defaults to the current Unix time, so
/// repeated inserts from the CLI land in order.
fn parse_position(
    raw: Option<&str>,
    value: Option<i64>,
    author: &str,
) -> Result<Value, CommandError> {
    match (raw, value) {
        (Some(raw), _) => serde_json::from_str(raw)
            .map_err(|e| CommandError::InvalidInput(format!("Invalid --position JSON: {}", e))),
        (None, Some(value)) => Ok(Position::single(value, author).into()),
        (None, None) => Ok(Position::single(chrono::Utc::now().timestamp(), author).into()),
    }
}

fn print_operation(body: &Value) -> Result<(), CommandError> {
    let data = response::data(body)?;
    println!("ID:       {}", response::lookup_str(data, &["id"])?);
    if let Some(op_type) = data.get("type").and_then(Value::as_str) {
        println!("Type:     {}", op_type);
    }
    if let Some(author) = data.get("author").and_then(Value::as_str) {
        println!("Author:   {}", author);
    }
    if let Some(document) = data.get("document_id").and_then(Value::as_str) {
        println!("Document: {}", document);
    }
    if let Some(timestamp) = data.get("timestamp").and_then(Value::as_str) {
        println!("Time:     {}", timestamp);
    }
    println!();
    println!("{}", response::lookup_str(data, &["content"])?);
    Ok(())
}

fn print_operation_list(body: &Value) -> Result<(), CommandError> {
    let data = response::data(body)?;
    // Older servers wrap the page as {operations: [...]}.
    let ops = data
        .as_array()
        .or_else(|| data.get("operations").and_then(Value::as_array))
        .ok_or_else(|| contextdb_core::ClientError::MissingField("data".to_string()))?;

    println!("Found {} operation(s)", ops.len());
    for op in ops {
        println!(
            "  {}  {:<8} {:<16} {}",
            op.get("id").and_then(Value::as_str).unwrap_or("-"),
            op.get("type").and_then(Value::as_str).unwrap_or("-"),
            op.get("author").and_then(Value::as_str).unwrap_or("-"),
            snippet(op.get("content").and_then(Value::as_str).unwrap_or(""), 50),
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_position_raw_json() {
        let position = parse_position(Some(r#"{"hash":"h","segments":[]}"#), None, "a").unwrap();
        assert_eq!(position, json!({"hash": "h", "segments": []}));
    }

    #[test]
    fn test_parse_position_invalid_json() {
        let err = parse_position(Some("{not json"), None, "a").unwrap_err();
        assert!(err.to_string().contains("Invalid --position JSON"));
    }

    #[test]
    fn test_parse_position_value() {
        let position = parse_position(None, Some(3), "cli").unwrap();
        assert_eq!(position["hash"], "cli-3");
        assert_eq!(position["segments"][0]["value"], 3);
    }

    #[test]
    fn test_print_operation_requires_data() {
        let result = print_operation(&json!({"success": true}));
        assert!(matches!(
            result,
            Err(CommandError::Client(contextdb_core::ClientError::MissingField(_)))
        ));
    }

    #[test]
    fn test_print_operation_list_accepts_both_shapes() {
        assert!(print_operation_list(&json!({"data": [{"id": "1"}]})).is_ok());
        assert!(print_operation_list(&json!({"data": {"operations": []}})).is_ok());
        assert!(print_operation_list(&json!({"data": {"total": 0}})).is_err());
    }
}
