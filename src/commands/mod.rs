mod address;
mod analyze;
mod auth;
mod config_cmd;
mod conversation;
mod demo;
mod document;
mod health;
mod key;
mod operation;
mod search;

pub use address::AddressCommand;
pub use analyze::AnalyzeCommand;
pub use auth::AuthCommand;
pub use config_cmd::ConfigCommand;
pub use conversation::ConversationCommand;
pub use demo::DemoCommand;
pub use document::DocumentCommand;
pub use health::HealthCommand;
pub use key::KeyCommand;
pub use operation::OperationCommand;
pub use search::SearchCommand;

use std::future::Future;

use clap::ValueEnum;
use contextdb_core::{response, ClientError, ContextDbClient};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::Config;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// Errors that can occur while running a command
#[derive(Debug)]
pub enum CommandError {
    /// Request failed or response had an unexpected shape
    Client(ClientError),
    /// Failed to start the async runtime
    Runtime(std::io::Error),
    /// I/O error
    Io(std::io::Error),
    /// JSON encoding error
    Json(serde_json::Error),
    /// Invalid command-line input
    InvalidInput(String),
}

impl std::fmt::Display for CommandError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CommandError::Client(e) => write!(f, "{}", e),
            CommandError::Runtime(e) => write!(f, "Failed to create runtime: {}", e),
            CommandError::Io(e) => write!(f, "I/O error: {}", e),
            CommandError::Json(e) => write!(f, "JSON error: {}", e),
            CommandError::InvalidInput(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for CommandError {}

impl From<ClientError> for CommandError {
    fn from(e: ClientError) -> Self {
        CommandError::Client(e)
    }
}

impl From<std::io::Error> for CommandError {
    fn from(e: std::io::Error) -> Self {
        CommandError::Io(e)
    }
}

impl From<serde_json::Error> for CommandError {
    fn from(e: serde_json::Error) -> Self {
        CommandError::Json(e)
    }
}

/// Shared state handed to every network command.
pub struct Context {
    pub client: ContextDbClient,
    pub format: OutputFormat,
}

impl Context {
    pub fn new(config: &Config, format: Option<OutputFormat>) -> Result<Self, CommandError> {
        let client = ContextDbClient::new(config.client_config())?;
        tracing::debug!(
            "Using {} (authenticated: {})",
            client.base_url(),
            client.is_authenticated()
        );
        Ok(Self {
            client,
            format: format.unwrap_or(config.output.value),
        })
    }

    /// Prints the full body as JSON, or hands it to `text` for a summary.
    pub fn print<F>(&self, body: &Value, text: F) -> Result<(), CommandError>
    where
        F: FnOnce(&Value) -> Result<(), CommandError>,
    {
        match self.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(body)?);
                Ok(())
            }
            OutputFormat::Text => text(body),
        }
    }
}

/// Runs a future to completion on a fresh runtime.
pub fn block_on<F: Future>(future: F) -> Result<F::Output, CommandError> {
    let rt = tokio::runtime::Runtime::new().map_err(CommandError::Runtime)?;
    Ok(rt.block_on(future))
}

/// Pretty-prints the `data` payload of a response.
pub fn print_data(body: &Value) -> Result<(), CommandError> {
    let data = response::data(body)?;
    println!("{}", serde_json::to_string_pretty(data)?);
    Ok(())
}

/// Parses an address given on the command line as JSON.
pub fn parse_address(text: &str) -> Result<Value, CommandError> {
    serde_json::from_str(text)
        .map_err(|e| CommandError::InvalidInput(format!("Invalid address JSON: {}", e)))
}

/// Shortens `text` to `max` characters for one-line listings.
pub fn snippet(text: &str, max: usize) -> String {
    let single_line = text.replace('\n', " ");
    if single_line.chars().count() <= max {
        single_line
    } else {
        let cut: String = single_line.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snippet_short_text_unchanged() {
        assert_eq!(snippet("hello", 10), "hello");
    }

    #[test]
    fn test_snippet_truncates_and_flattens() {
        assert_eq!(snippet("line one\nline two", 10), "line on...");
    }

    #[test]
    fn test_snippet_multibyte() {
        assert_eq!(snippet("ééééé", 4), "é...");
    }

    #[test]
    fn test_parse_address() {
        let address = parse_address(r#"{"document_path": "a.md", "offset": 3}"#).unwrap();
        assert_eq!(address["offset"], 3);

        match parse_address("a.md") {
            Err(CommandError::InvalidInput(msg)) => assert!(msg.starts_with("Invalid address JSON")),
            other => panic!("expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn test_output_format_from_yaml() {
        let format: OutputFormat = serde_yaml::from_str("json").unwrap();
        assert_eq!(format, OutputFormat::Json);
        assert_eq!(OutputFormat::default().to_string(), "text");
    }
}
