use anyhow::Result;
use clap::Parser;
use eatnsplit::cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    cli.run()
}
