use clap::Args;

use super::{block_on, print_data, CommandError, Context};

/// Analyze intent across several operations
#[derive(Args)]
pub struct AnalyzeCommand {
    /// Operation IDs
    #[arg(required = true)]
    ids: Vec<String>,
}

impl AnalyzeCommand {
    pub fn run(&self, ctx: &Context) -> Result<(), CommandError> {
        let analysis = block_on(ctx.client.analyze_intent(&self.ids[..]))??;
        ctx.print(&analysis, print_data)
    }
}
