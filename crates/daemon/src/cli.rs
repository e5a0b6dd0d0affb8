use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use url::Url;

use stash_daemon::http_server::api::client::ApiClient;
use stash_daemon::http_server::health::liveness::HealthRequest;
use stash_daemon::{process, ServiceConfig};

/// Multi-tenant key-path JSON storage over HTTP
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the storage daemon
    Serve {
        /// Address to listen on
        #[arg(long, default_value = "127.0.0.1:5800")]
        listen: SocketAddr,

        /// Hex-encoded 32-byte token signing key; generated if absent
        #[arg(long)]
        token_key: Option<String>,

        /// Token validity window in hours
        #[arg(long, default_value_t = 24)]
        token_ttl_hours: i64,

        /// Log level (error, warn, info, debug, trace)
        #[arg(long, default_value = "info")]
        log_level: String,

        /// Directory for rolling log files (stdout only if not set)
        #[arg(long)]
        log_dir: Option<PathBuf>,
    },
    /// Probe a running daemon's health endpoint
    Health {
        /// Base URL of the daemon
        #[arg(long, default_value = "http://127.0.0.1:5800")]
        remote: Url,
    },
    /// Print version information
    Version,
}

pub async fn run(args: Args) -> anyhow::Result<()> {
    match args.command {
        Command::Serve {
            listen,
            token_key,
            token_ttl_hours,
            log_level,
            log_dir,
        } => {
            let log_level = log_level.parse().unwrap_or(tracing::Level::INFO);
            let config = ServiceConfig {
                listen_addr: listen,
                token_key_hex: token_key,
                token_ttl_hours,
                log_level,
                log_dir,
            };
            process::spawn_service(&config).await;
            Ok(())
        }
        Command::Health { remote } => {
            let client = ApiClient::new(&remote)?;
            let health = client.call(HealthRequest {}).await?;
            println!("{} (version {})", health.status, health.version);
            Ok(())
        }
        Command::Version => {
            println!("stash {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}
