//! Walks through a typical session against a live server.

use chrono::Utc;
use clap::Args;
use contextdb_core::{
    response, ClientError, ClientResult, ContextDbClient, ListOperationsQuery, Operation,
    SearchQuery,
};
use serde_json::json;

use super::{block_on, CommandError, Context};

/// Run an example session: health, create, fetch, search, intent, list
#[derive(Args)]
pub struct DemoCommand {
    /// Author recorded on the demo operation
    #[arg(long, default_value = "contextdb-example")]
    author: String,

    /// Document the demo operation targets
    #[arg(long, default_value = "contextdb-test.md")]
    document: String,

    /// Search query
    #[arg(long, default_value = "ContextDB")]
    query: String,
}

impl DemoCommand {
    pub fn run(&self, ctx: &Context) -> Result<(), CommandError> {
        block_on(self.session(&ctx.client))?
    }

    async fn session(&self, client: &ContextDbClient) -> Result<(), CommandError> {
        // A failed health check ends the demo with an error.
        let health = client.health_check().await?;
        println!("Server status: {}", health);

        match self.steps(client).await {
            Ok(()) => {}
            Err(e @ ClientError::MissingField(_)) => {
                println!("Unexpected response format: {}", e);
            }
            Err(e) => {
                tracing::debug!("demo step failed: {:?}", e);
                println!("API error: {}", e);
            }
        }
        Ok(())
    }

    async fn steps(&self, client: &ContextDbClient) -> ClientResult<()> {
        let now = Utc::now();
        let operation = Operation::new(
            "insert",
            json!({
                "segments": [{"value": 1, "author": self.author}],
                "hash": format!("{}-{}", self.author, now.to_rfc3339()),
            }),
            format!("{} integration test - {}", self.query, now),
            &self.author,
            &self.document,
        );

        let created = client.create_operation(&operation).await?;
        let operation_id = response::lookup_str(&created, &["data", "id"])?.to_string();
        println!("Created operation: {}", operation_id);

        let retrieved = client.get_operation(&operation_id).await?;
        println!(
            "Retrieved operation: {}",
            response::lookup_str(&retrieved, &["data", "content"])?
        );

        let results = client.search(&SearchQuery::new(&self.query)).await?;
        println!(
            "Search found {} results",
            response::lookup_len(&results, &["data", "results"])?
        );

        let intent = client.get_operation_intent(&operation_id).await?;
        println!(
            "Operation intent: {}",
            response::lookup_str(&intent, &["data", "basic_intent"])?
        );

        let ops = client
            .list_operations(&ListOperationsQuery::default().document_id(&self.document))
            .await?;
        println!(
            "Found {} operations for {}",
            response::lookup_len(&ops, &["data"])?,
            self.document
        );

        Ok(())
    }
}
