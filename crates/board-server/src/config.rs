use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::info;

pub struct Config {
    pub addr: SocketAddr,
    pub db_path: PathBuf,
    pub request_timeout: Duration,
}

impl Config {
    /// Read `BOARD_*` variables, falling back to defaults for anything unset.
    /// A set but unparsable value is an error.
    pub fn from_env() -> Result<Self> {
        let host = var_or("BOARD_HOST", "0.0.0.0");
        let port: u16 = parse_var("BOARD_PORT", "3000")?;
        let timeout_secs: u64 = parse_var("BOARD_REQUEST_TIMEOUT_SECS", "10")?;

        let addr = format!("{}:{}", host, port)
            .parse()
            .with_context(|| format!("invalid listen address {}:{}", host, port))?;

        Ok(Self {
            addr,
            db_path: var_or("BOARD_DB_PATH", "board.db").into(),
            request_timeout: Duration::from_secs(timeout_secs),
        })
    }
}

fn var_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    })
}

fn parse_var<T>(key: &str, default: &str) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    var_or(key, default)
        .parse()
        .with_context(|| format!("invalid value for {key}"))
}
