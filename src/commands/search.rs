use clap::Args;
use contextdb_core::{response, ClientError, SearchQuery};
use serde_json::Value;

use super::{block_on, snippet, CommandError, Context};

/// Search operations and documents
#[derive(Args)]
pub struct SearchCommand {
    /// Search query
    query: String,

    /// Restrict results to a content type (operation, conversation, code)
    #[arg(long = "type")]
    content_type: Option<String>,

    /// Maximum number of results
    #[arg(long, default_value_t = 20)]
    limit: u32,

    /// Number of results to skip
    #[arg(long, default_value_t = 0)]
    offset: u32,
}

impl SearchCommand {
    pub fn run(&self, ctx: &Context) -> Result<(), CommandError> {
        let query = SearchQuery {
            query: self.query.clone(),
            content_type: self.content_type.clone(),
            limit: self.limit,
            offset: self.offset,
        };
        let results = block_on(ctx.client.search(&query))??;
        ctx.print(&results, print_results)
    }
}

fn print_results(body: &Value) -> Result<(), CommandError> {
    let items = response::lookup(body, &["data", "results"])?
        .as_array()
        .ok_or_else(|| ClientError::MissingField("data.results".to_string()))?;

    println!("Search found {} result(s)", items.len());
    for item in items {
        let score = item
            .get("score")
            .or_else(|| item.get("relevance_score"))
            .and_then(Value::as_f64)
            .unwrap_or(0.0);
        println!(
            "  [{:.2}] {:<12} {}  {}",
            score,
            item.get("type").and_then(Value::as_str).unwrap_or("-"),
            item.get("id").and_then(Value::as_str).unwrap_or("-"),
            snippet(
                item.get("snippet")
                    .or_else(|| item.get("content"))
                    .and_then(Value::as_str)
                    .unwrap_or(""),
                60
            ),
        );
    }
    Ok(())
}
