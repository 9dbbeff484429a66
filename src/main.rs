use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;

use commands::{
    AddressCommand, AnalyzeCommand, AuthCommand, ConfigCommand, Context, ConversationCommand,
    DemoCommand, DocumentCommand, HealthCommand, KeyCommand, OperationCommand, OutputFormat,
    SearchCommand,
};
use config::Config;

#[derive(Parser)]
#[command(name = "contextdb")]
#[command(version)]
#[command(about = "Command-line client for the ContextDB API", long_about = None)]
struct Cli {
    /// Path to config file
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    /// Server base URL (overrides config and CONTEXTDB_URL)
    #[arg(long, global = true)]
    url: Option<String>,

    /// API key (overrides config and CONTEXTDB_API_KEY)
    #[arg(long, global = true)]
    api_key: Option<String>,

    /// Output format for server responses
    #[arg(long, short, global = true, value_enum)]
    format: Option<OutputFormat>,

    /// Log requests to stderr
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Check server health
    Health(HealthCommand),

    /// Create, fetch and list operations
    #[command(name = "op")]
    Operation(OperationCommand),

    /// Search operations and documents
    Search(SearchCommand),

    /// Analyze intent across several operations
    Analyze(AnalyzeCommand),

    /// Inspect documents
    #[command(name = "doc")]
    Document(DocumentCommand),

    /// Discuss anchored locations in documents
    Conversation(ConversationCommand),

    /// Resolve stable addresses
    Address(AddressCommand),

    /// Manage API keys
    Key(KeyCommand),

    /// Inspect and toggle server authentication
    Auth(AuthCommand),

    /// Manage configuration
    Config(ConfigCommand),

    /// Run an example session against the server
    Demo(DemoCommand),
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    // Load configuration
    let config = Config::load(cli.config)?.with_overrides(cli.url, cli.api_key);

    let format = cli.format;
    let context = || Context::new(&config, format);

    match cli.command {
        Some(Commands::Health(cmd)) => cmd.run(&context()?)?,
        Some(Commands::Operation(cmd)) => cmd.run(&context()?)?,
        Some(Commands::Search(cmd)) => cmd.run(&context()?)?,
        Some(Commands::Analyze(cmd)) => cmd.run(&context()?)?,
        Some(Commands::Document(cmd)) => cmd.run(&context()?)?,
        Some(Commands::Conversation(cmd)) => cmd.run(&context()?)?,
        Some(Commands::Address(cmd)) => cmd.run(&context()?)?,
        Some(Commands::Key(cmd)) => cmd.run(&context()?)?,
        Some(Commands::Auth(cmd)) => cmd.run(&context()?)?,
        Some(Commands::Demo(cmd)) => cmd.run(&context()?)?,
        Some(Commands::Config(cmd)) => cmd.run(&config, format)?,
        None => {
            println!("Use --help to see available commands");
        }
    }

    Ok(())
}

/// Logs go to stderr so JSON output on stdout stays parseable.
fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "contextdb=debug,contextdb_core=debug"
    } else {
        "contextdb=warn,contextdb_core=warn"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_search_with_global_flags() {
        let cli = Cli::try_parse_from([
            "contextdb",
            "search",
            "Python",
            "--limit",
            "0",
            "--url",
            "http://example.com/api/v1",
            "-f",
            "json",
        ])
        .unwrap();
        assert_eq!(cli.url.as_deref(), Some("http://example.com/api/v1"));
        assert_eq!(cli.format, Some(OutputFormat::Json));
        assert!(matches!(cli.command, Some(Commands::Search(_))));
    }

    #[test]
    fn test_key_create_rejects_unknown_permission() {
        let result = Cli::try_parse_from([
            "contextdb",
            "key",
            "create",
            "--name",
            "ci",
            "--author",
            "bot",
            "--permission",
            "everything",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_conversation_message() {
        let cli = Cli::try_parse_from([
            "contextdb",
            "conversation",
            "message",
            "t-1",
            "--author",
            "bob",
            "Agreed",
        ])
        .unwrap();
        assert!(matches!(cli.command, Some(Commands::Conversation(_))));

        assert!(Cli::try_parse_from(["contextdb", "conversation", "create", "hi"]).is_err());
        assert!(Cli::try_parse_from(["contextdb", "auth", "enable"]).is_ok());
        assert!(Cli::try_parse_from(["contextdb", "address", "history", "{}"]).is_ok());
    }

    #[test]
    fn test_analyze_requires_ids() {
        assert!(Cli::try_parse_from(["contextdb", "analyze"]).is_err());
        assert!(Cli::try_parse_from(["contextdb", "analyze", "op-1", "op-2"]).is_ok());
    }
}
