//! pizzadash CLI entry point.

use clap::Parser;
use pizzadash_client::cli::Cli;
use pizzadash_client::App;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pizzadash=info,pizzadash_client=info,pizzadash_auth=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let app = App::from_cli(&cli)?;
    let output = app.run(cli.command).await?;
    if !output.is_empty() {
        println!("{}", output);
    }

    Ok(())
}
