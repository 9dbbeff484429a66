use clap::{Args, Subcommand};
use contextdb_core::{response, ConversationRequest, MessageRequest};
use serde_json::Value;

use super::{block_on, parse_address, print_data, snippet, CommandError, Context};

/// Discuss a location in a document
#[derive(Args)]
pub struct ConversationCommand {
    #[command(subcommand)]
    command: ConversationSubcommand,
}

#[derive(Subcommand)]
enum ConversationSubcommand {
    /// Start a conversation anchored to an address
    Create {
        /// Anchor address as JSON
        #[arg(long)]
        anchor: String,

        /// Author starting the conversation
        #[arg(long)]
        author: String,

        /// Conversation title
        #[arg(long)]
        title: String,

        /// Opening message
        content: String,
    },

    /// Show a conversation and its messages
    Show {
        /// Conversation ID
        id: String,
    },

    /// Reply to a conversation
    Message {
        /// Conversation ID
        id: String,

        /// Message author
        #[arg(long)]
        author: String,

        /// Message kind (comment, question, answer, decision, suggestion, review)
        #[arg(long = "type", default_value = contextdb_core::models::DEFAULT_MESSAGE_TYPE)]
        message_type: String,

        /// Message text
        content: String,
    },
}

impl ConversationCommand {
    pub fn run(&self, ctx: &Context) -> Result<(), CommandError> {
        match &self.command {
            ConversationSubcommand::Create {
                anchor,
                author,
                title,
                content,
            } => {
                let request =
                    ConversationRequest::new(parse_address(anchor)?, author, title, content);
                let created = block_on(ctx.client.create_conversation(&request))??;
                ctx.print(&created, |body| {
                    println!(
                        "Created conversation: {}",
                        response::lookup_str(body, &["data", "id"])?
                    );
                    Ok(())
                })
            }
            ConversationSubcommand::Show { id } => {
                let conversation = block_on(ctx.client.get_conversation(id))??;
                ctx.print(&conversation, print_conversation)
            }
            ConversationSubcommand::Message {
                id,
                author,
                message_type,
                content,
            } => {
                let message = MessageRequest::new(author, content).message_type(message_type);
                let added = block_on(ctx.client.add_message(id, &message))??;
                ctx.print(&added, print_data)
            }
        }
    }
}

/// Title line followed by one line per message. Falls back to the raw
/// payload when the server sends no message list.
fn print_conversation(body: &Value) -> Result<(), CommandError> {
    let data = response::data(body)?;
    let Some(messages) = data.get("messages").and_then(Value::as_array) else {
        return print_data(body);
    };

    println!(
        "{} ({})",
        data.get("title").and_then(Value::as_str).unwrap_or("(untitled)"),
        data.get("id").and_then(Value::as_str).unwrap_or("-"),
    );
    for message in messages {
        println!(
            "  [{}] {}: {}",
            message.get("type").and_then(Value::as_str).unwrap_or("-"),
            message.get("author").and_then(Value::as_str).unwrap_or("-"),
            snippet(
                message.get("content").and_then(Value::as_str).unwrap_or(""),
                70
            ),
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_print_conversation_requires_data() {
        assert!(print_conversation(&json!({"error": "x"})).is_err());
    }

    #[test]
    fn test_print_conversation_with_and_without_messages() {
        let body = json!({"data": {
            "id": "t-1",
            "title": "Naming",
            "messages": [{"type": "comment", "author": "alice", "content": "hi"}]
        }});
        assert!(print_conversation(&body).is_ok());
        assert!(print_conversation(&json!({"data": {"id": "t-1"}})).is_ok());
    }
}
