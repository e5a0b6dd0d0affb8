use std::net::SocketAddr;
use std::path::PathBuf;

/// Runtime configuration for the stash daemon.
#[derive(Debug, Clone)]
pub struct Config {
    /// Address the API server listens on.
    pub listen_addr: SocketAddr,

    /// Hex-encoded 32-byte token signing key. If not set, a fresh key is
    /// generated at startup and issued tokens do not survive a restart.
    pub token_key_hex: Option<String>,
    /// Token validity window in hours.
    pub token_ttl_hours: i64,

    // logging
    pub log_level: tracing::Level,
    /// Directory for log files (optional, logs to stdout only if not set)
    pub log_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: "127.0.0.1:5800".parse().expect("valid default addr"),
            token_key_hex: None,
            token_ttl_hours: 24,
            log_level: tracing::Level::INFO,
            log_dir: None,
        }
    }
}
