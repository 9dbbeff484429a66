//! API key management. Creating and revoking keys needs an admin key.

use clap::{Args, Subcommand};
use contextdb_core::{response, ApiKeyRequest, Permission};
use serde_json::Value;

use super::{block_on, CommandError, Context};

/// Manage API keys
#[derive(Args)]
pub struct KeyCommand {
    #[command(subcommand)]
    command: KeySubcommand,
}

#[derive(Subcommand)]
enum KeySubcommand {
    /// Create a new API key
    Create {
        /// Human-readable key name
        #[arg(long)]
        name: String,

        /// Author the key acts as
        #[arg(long)]
        author: String,

        /// Permission to grant (can be repeated)
        #[arg(long = "permission", value_name = "PERMISSION", required = true)]
        permissions: Vec<Permission>,

        /// Lifetime, e.g. "24h"
        #[arg(long)]
        expires_in: Option<String>,
    },

    /// List API keys
    List,

    /// Revoke an API key
    Revoke {
        /// Key ID
        id: String,
    },
}

impl KeyCommand {
    pub fn run(&self, ctx: &Context) -> Result<(), CommandError> {
        match &self.command {
            KeySubcommand::Create {
                name,
                author,
                permissions,
                expires_in,
            } => {
                let mut request = ApiKeyRequest::new(name, author)
                    .with_permissions(permissions.iter().map(Permission::to_string));
                request.expires_in = expires_in.clone();

                let created = block_on(ctx.client.create_api_key(&request))??;
                ctx.print(&created, print_created)
            }
            KeySubcommand::List => {
                let keys = block_on(ctx.client.list_api_keys())??;
                ctx.print(&keys, print_key_list)
            }
            KeySubcommand::Revoke { id } => {
                let revoked = block_on(ctx.client.revoke_api_key(id))??;
                ctx.print(&revoked, |_| {
                    println!("Revoked API key: {}", id);
                    Ok(())
                })
            }
        }
    }
}

fn print_created(body: &Value) -> Result<(), CommandError> {
    let data = response::data(body)?;
    if let Some(id) = data.get("id").and_then(Value::as_str) {
        println!("Created API key: {}", id);
    }
    // The secret is only ever returned once.
    if let Some(key) = data
        .get("key")
        .or_else(|| data.get("api_key"))
        .and_then(Value::as_str)
    {
        println!();
        println!("  {}", key);
        println!();
        println!("Store this key now; it cannot be shown again.");
    }
    Ok(())
}

fn print_key_list(body: &Value) -> Result<(), CommandError> {
    let data = response::data(body)?;
    let keys = data
        .as_array()
        .or_else(|| data.get("keys").and_then(Value::as_array))
        .map(Vec::as_slice)
        .unwrap_or(&[]);

    if keys.is_empty() {
        println!("No API keys.");
        return Ok(());
    }
    for key in keys {
        let permissions = key
            .get("permissions")
            .and_then(Value::as_array)
            .map(|p| {
                p.iter()
                    .filter_map(Value::as_str)
                    .collect::<Vec<_>>()
                    .join(",")
            })
            .unwrap_or_default();
        println!(
            "  {}  {:<20} {:<16} {}",
            key.get("id").and_then(Value::as_str).unwrap_or("-"),
            key.get("name").and_then(Value::as_str).unwrap_or("-"),
            key.get("author_id").and_then(Value::as_str).unwrap_or("-"),
            permissions,
        );
    }
    Ok(())
}
