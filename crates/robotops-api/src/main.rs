use anyhow::Result;
use clap::{Parser, Subcommand};
use robotops_api::{ApiConfig, Overrides, serve};
use std::{net::IpAddr, path::PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "robotops-api", about = "Robot and mission record service")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    Serve {
        /// TOML config file; defaults to <config dir>/robotops/api.toml when present.
        #[arg(long)]
        config: Option<PathBuf>,
        #[arg(long)]
        host: Option<IpAddr>,
        #[arg(long)]
        port: Option<u16>,
        #[arg(long)]
        db_path: Option<PathBuf>,
        /// Origin allowed by CORS. Repeat for several; replaces the configured list.
        #[arg(long = "allowed-origin")]
        allowed_origins: Vec<String>,
        /// tracing filter used when RUST_LOG is unset.
        #[arg(long)]
        log_filter: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    match Cli::parse().command {
        Command::Serve { config, host, port, db_path, allowed_origins, log_filter } => {
            let mut settings = ApiConfig::load(config.as_deref())?;
            settings.apply(Overrides { host, port, db_path, allowed_origins, log_filter });
            init_tracing(&settings.log_filter);
            serve(settings).await?
        }
    }

    Ok(())
}

fn init_tracing(fallback: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
