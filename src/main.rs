use clap::Parser;
use std::process;

use git_version_properties::cli;
use git_version_properties::cli::commands::{Cli, Commands};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli_args = Cli::parse();

    let exit_code = match &cli_args.command {
        Commands::Print => cli::print::run(&cli_args),
        Commands::Create { extra, no_apply } => cli::create::run(&cli_args, extra, *no_apply),
        Commands::Delete => cli::delete::run(&cli_args),
        Commands::Version => cli::version::run(&cli_args),
    };

    process::exit(exit_code);
}
