//! Environment-driven configuration

use std::net::SocketAddr;

const DEFAULT_API_BASE: &str = "http://127.0.0.1:8000/api/v1";
const DEFAULT_LISTEN: &str = "127.0.0.1:8787";

/// Runtime configuration for the shell
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the portfolio backend API
    pub api_base: String,
    /// Local address the shell server binds to
    pub listen: SocketAddr,
}

impl Config {
    /// Read configuration from `FOLIO_API_BASE` and `FOLIO_LISTEN`,
    /// falling back to local defaults
    pub fn from_env() -> anyhow::Result<Self> {
        let api_base = std::env::var("FOLIO_API_BASE")
            .unwrap_or_else(|_| DEFAULT_API_BASE.to_string())
            .trim_end_matches('/')
            .to_string();

        let listen_raw =
            std::env::var("FOLIO_LISTEN").unwrap_or_else(|_| DEFAULT_LISTEN.to_string());
        let listen: SocketAddr = listen_raw
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid FOLIO_LISTEN address '{}': {}", listen_raw, e))?;

        Ok(Self { api_base, listen })
    }
}
