use clap::{Args, Subcommand};
use serde_json::Value;

use super::{block_on, CommandError, Context};

/// Inspect server authentication
#[derive(Args)]
pub struct AuthCommand {
    #[command(subcommand)]
    command: AuthSubcommand,
}

#[derive(Subcommand)]
enum AuthSubcommand {
    /// Show whether the server requires authentication
    Status,

    /// Require API keys on the server (admin)
    Enable,

    /// Stop requiring API keys on the server (admin)
    Disable,
}

impl AuthCommand {
    pub fn run(&self, ctx: &Context) -> Result<(), CommandError> {
        match &self.command {
            AuthSubcommand::Status => {
                let status = block_on(ctx.client.auth_status())??;
                ctx.print(&status, |body| {
                    println!(
                        "Client key: {}",
                        if ctx.client.is_authenticated() {
                            "configured"
                        } else {
                            "none"
                        }
                    );
                    let data = body.get("data").unwrap_or(body);
                    for (key, value) in data.as_object().into_iter().flatten() {
                        match value {
                            Value::String(s) => println!("{}: {}", key, s),
                            other => println!("{}: {}", key, other),
                        }
                    }
                    Ok(())
                })
            }
            AuthSubcommand::Enable => {
                let body = block_on(ctx.client.auth_enable())??;
                ctx.print(&body, |body| print_message(body, "Authentication enabled"))
            }
            AuthSubcommand::Disable => {
                let body = block_on(ctx.client.auth_disable())??;
                ctx.print(&body, |body| print_message(body, "Authentication disabled"))
            }
        }
    }
}

/// Prints the server's `message`, or `fallback` when it sent none.
fn print_message(body: &Value, fallback: &str) -> Result<(), CommandError> {
    println!(
        "{}",
        body.get("message").and_then(Value::as_str).unwrap_or(fallback)
    );
    Ok(())
}
