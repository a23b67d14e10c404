mod cli;
mod commands;
mod logger;

use cli::{Cli, Commands};
use commands::{apply, check, info};

pub fn run() -> anyhow::Result<()> {
    use clap::Parser;

    let cli = Cli::parse();
    logger::init(cli.verbose);
    match &cli.command {
        Commands::Info(args) => info::run(&cli, args),
        Commands::Check(args) => check::run(&cli, args),
        Commands::Apply(args) => apply::run(&cli, args),
    }
}

fn main() -> anyhow::Result<()> { run() }
