//! Server configuration

use std::path::PathBuf;
use tracing::warn;

/// Configuration for the visualizer server
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address
    pub address: String,
    /// Port
    pub port: u16,
    /// Fixture directory
    pub data_dir: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            address: "127.0.0.1".to_string(),
            port: 7878,
            data_dir: PathBuf::from("./data"),
        }
    }
}

impl ServerConfig {
    /// Defaults overridden by `CHARKHA_ADDR`, `CHARKHA_PORT`, `CHARKHA_DATA`
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(addr) = std::env::var("CHARKHA_ADDR") {
            config.address = addr;
        }
        if let Ok(port) = std::env::var("CHARKHA_PORT") {
            match port.parse() {
                Ok(p) => config.port = p,
                Err(_) => warn!(port = %port, "invalid CHARKHA_PORT, using default"),
            }
        }
        if let Ok(data) = std::env::var("CHARKHA_DATA") {
            config.data_dir = PathBuf::from(data);
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.address, "127.0.0.1");
        assert_eq!(config.port, 7878);
        assert_eq!(config.data_dir, PathBuf::from("./data"));
    }
}
