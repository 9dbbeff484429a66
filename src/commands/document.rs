use clap::{Args, Subcommand};

use super::{block_on, print_data, CommandError, Context};

/// Inspect documents
#[derive(Args)]
pub struct DocumentCommand {
    #[command(subcommand)]
    command: DocumentSubcommand,
}

#[derive(Subcommand)]
enum DocumentSubcommand {
    /// Show a document's current state
    Show {
        /// Document path
        path: String,
    },

    /// Show a document's operation history
    History {
        /// Document path
        path: String,
    },
}

impl DocumentCommand {
    pub fn run(&self, ctx: &Context) -> Result<(), CommandError> {
        let body = match &self.command {
            DocumentSubcommand::Show { path } => block_on(ctx.client.get_document(path))??,
            DocumentSubcommand::History { path } => {
                block_on(ctx.client.get_document_history(path))??
            }
        };
        ctx.print(&body, print_data)
    }
}
