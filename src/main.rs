use anyhow::Result;
use clap::Parser;
use subpro::cli::{
    handle_clean_command, handle_download_command, handle_info_command, Cli, CliCommand,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let log_level = if cli.verbose { "debug" } else { "info" };
    let env_filter = EnvFilter::try_new(log_level).unwrap_or_else(|_| EnvFilter::new("info"));

    // stdout is reserved for transcripts and command output
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        CliCommand::Version => {
            println!("subpro {}", env!("CARGO_PKG_VERSION"));
        }
        CliCommand::Info(args) => handle_info_command(args).await?,
        CliCommand::Download(args) => handle_download_command(args).await?,
        CliCommand::Clean(args) => handle_clean_command(args)?,
    }

    Ok(())
}
