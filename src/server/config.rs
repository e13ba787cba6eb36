/*!
# Server Configuration

Runtime configuration for the server binaries. Defaults are baked into each
flavor; a JSON file named by the `SPANTREE_CONFIG` environment variable
overrides them, and a port argument on the command line wins over both.
*/

use serde::{Deserialize, Serialize};
use tracing::warn;

fn default_workers() -> usize {
    4
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

/// Settings shared by both server flavors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address to bind.
    #[serde(default = "default_host")]
    pub host: String,
    /// TCP port to listen on.
    pub port: u16,
    /// Worker count for the Leader-Follower pool. Ignored by the pipeline
    /// flavor, whose stage count is fixed by its stage functions.
    #[serde(default = "default_workers")]
    pub workers: usize,
}

impl ServerConfig {
    /// Configuration with the given port and default host and worker count.
    pub fn with_port(port: u16) -> Self {
        Self {
            host: default_host(),
            port,
            workers: default_workers(),
        }
    }

    /// Loads configuration: defaults for the flavor, then the JSON file
    /// named by `SPANTREE_CONFIG` if it parses. A broken file is reported
    /// and skipped rather than aborting startup.
    pub fn load(default_port: u16) -> Self {
        let config = Self::with_port(default_port);
        let Ok(path) = std::env::var("SPANTREE_CONFIG") else {
            return config;
        };
        match std::fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(parsed) => parsed,
                Err(err) => {
                    warn!(%path, %err, "ignoring unparsable config file");
                    config
                }
            },
            Err(err) => {
                warn!(%path, %err, "ignoring unreadable config file");
                config
            }
        }
    }

    /// `host:port` string for binding.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ServerConfig::with_port(9036);
        assert_eq!(config.port, 9036);
        assert_eq!(config.workers, 4);
        assert_eq!(config.bind_addr(), "0.0.0.0:9036");
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config: ServerConfig = serde_json::from_str(r#"{"port": 8080}"#).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.workers, 4);
        assert_eq!(config.host, "0.0.0.0");
    }
}
