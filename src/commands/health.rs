use clap::Args;
use serde_json::Value;

use super::{block_on, CommandError, Context};

/// Check server health
#[derive(Args)]
pub struct HealthCommand {}

impl HealthCommand {
    pub fn run(&self, ctx: &Context) -> Result<(), CommandError> {
        let health = block_on(ctx.client.health_check())??;
        ctx.print(&health, |body| {
            println!("Server status: {}", status_line(body));
            Ok(())
        })
    }
}

/// Prefers a `status` field at the top level or under `data`.
fn status_line(body: &Value) -> String {
    body.get("status")
        .or_else(|| body.get("data").and_then(|d| d.get("status")))
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| body.to_string())
}
