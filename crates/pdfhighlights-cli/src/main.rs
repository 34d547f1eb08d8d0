mod cli;
mod count_cmd;
mod file_cmd;
mod highlights_cmd;
mod list_cmd;
mod output;
mod page_range;
mod shared;

use std::io::IsTerminal;

use clap::Parser;
use cli::{Cli, Commands};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(std::io::stderr().is_terminal()),
        )
        .init();

    let result = match cli.command {
        Commands::Highlights {
            ref basename,
            ref root,
            format,
            unicode_norm,
        } => highlights_cmd::run(basename, root, format, unicode_norm).await,
        Commands::Count {
            ref basename,
            ref root,
        } => count_cmd::run(basename, root).await,
        Commands::File {
            ref file,
            ref pages,
            format,
            unicode_norm,
        } => file_cmd::run(file, pages.as_deref(), format, unicode_norm),
        Commands::List { ref root } => list_cmd::run(root).await,
    };

    if let Err(code) = result {
        std::process::exit(code);
    }
}
