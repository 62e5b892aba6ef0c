//! Library console entry point.

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use console::{Cli, Config, Console, Output};
use transport::HttpTransport;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    // 1. Load configuration, command-line flags winning over the environment
    let mut config = Config::from_env().context("invalid configuration")?;
    if let Some(api_url) = cli.api_url {
        config.api_url = api_url;
    }
    if cli.api_key.is_some() {
        config.api_key = cli.api_key;
    }
    if let Some(capabilities) = cli.capabilities {
        config.capabilities = capabilities;
    }

    // 2. Initialize tracing on stderr so it never mixes with command output
    tracing_subscriber::registry()
        .with(EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // 3. Build the client
    let transport =
        HttpTransport::new(&config.transport_config()).context("failed to build HTTP client")?;
    let sync_config = config.sync_config().context("invalid capabilities")?;
    tracing::debug!(api_url = %config.api_url, "client configured");

    // 4. Run the command
    let console = Console::new(transport, sync_config, Output::stdout()).assume_yes(cli.yes);
    let succeeded = console.run(cli.command).await?;

    Ok(if succeeded {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
