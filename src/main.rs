use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod converter;
mod core;
mod counting;
mod parsing;
mod table;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    // Initialize logging based on verbosity flag
    let filter = if cli.verbose {
        EnvFilter::new("mapstats=debug,info")
    } else {
        EnvFilter::new("mapstats=warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();

    match cli.command {
        cli::Commands::Count(args) => {
            cli::count::run(&args)?;
        }
        cli::Commands::Table(args) => {
            cli::table::run(&args)?;
        }
    }

    Ok(())
}
