use clap::{Args, Subcommand};

use super::{block_on, parse_address, print_data, CommandError, Context};

/// Resolve stable addresses
#[derive(Args)]
pub struct AddressCommand {
    #[command(subcommand)]
    command: AddressSubcommand,
}

#[derive(Subcommand)]
enum AddressSubcommand {
    /// Resolve an address to its current location
    Resolve {
        /// Address as JSON
        address: String,
    },

    /// Show how an address moved over time
    History {
        /// Address as JSON
        address: String,
    },
}

impl AddressCommand {
    pub fn run(&self, ctx: &Context) -> Result<(), CommandError> {
        let body = match &self.command {
            AddressSubcommand::Resolve { address } => {
                block_on(ctx.client.resolve_address(&parse_address(address)?))??
            }
            AddressSubcommand::History { address } => {
                block_on(ctx.client.get_address_history(&parse_address(address)?))??
            }
        };
        ctx.print(&body, print_data)
    }
}
