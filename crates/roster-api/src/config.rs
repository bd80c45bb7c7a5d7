//! Server configuration.

use std::net::{IpAddr, Ipv4Addr};

/// Configuration for the RosterDB server.
///
/// The environment drives nothing beyond the listen address; store
/// selection is wired in `main`.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind.
    pub bind: IpAddr,
    /// Port to listen on. Default: 5000.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 5000,
        }
    }
}

impl ServerConfig {
    /// Builds a config from the environment (`PORT`), falling back to
    /// defaults for anything unset or unparseable.
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(port) = std::env::var("PORT")
            .ok()
            .and_then(|v| v.parse::<u16>().ok())
        {
            config.port = port;
        }
        config
    }
}
