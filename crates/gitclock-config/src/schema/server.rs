use std::net::{IpAddr, SocketAddr};

use serde::{Deserialize, Serialize};

/// Embedded HTTP editor endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Serve the browser editor. Flipping this at runtime starts or stops it.
    pub enabled: bool,
    /// Address to bind. The editor is meant for the local network only.
    pub bind: String,
    /// TCP port (valid range: 1-65535).
    pub port: u16,
}

impl ServerConfig {
    /// `bind:port` in the form accepted by `TcpListener::bind`.
    pub fn address(&self) -> String {
        format!("{}:{}", self.bind, self.port)
    }

    /// Parsed bind address, `None` if `bind` is not an IP address.
    pub fn socket_addr(&self) -> Option<SocketAddr> {
        let ip: IpAddr = self.bind.parse().ok()?;
        Some(SocketAddr::new(ip, self.port))
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            bind: "0.0.0.0".into(),
            port: 8080,
        }
    }
}
