mod commands;
mod terminal;

use commands::{CommandLine, Commands, net, owner};
use terminal::{logging, print};

fn main() -> anyhow::Result<()> {
    let commands = CommandLine::parse_args();

    logging::init_logging(commands.verbose);
    print::banner(commands.quiet);

    let cfg = commands.config();

    let result = match &commands.command {
        Commands::Net => net::net(&cfg),
        Commands::Owner { address } => owner::owner(address, &cfg),
    };
    print::fat_separator();
    result
}
