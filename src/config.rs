use anyhow::Context;
use serde::Deserialize;

/// Server configuration, loaded from YAML with env overrides.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub pool: PoolConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub listen_addr: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: "127.0.0.1:8080".to_string(),
        }
    }
}

/// Geometry of the per-connection memory pool.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PoolConfig {
    /// Chunk size in bytes; 0 selects the built-in default.
    pub chunk_size: usize,
    pub initial_chunks: usize,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            chunk_size: 0,
            initial_chunks: 1,
        }
    }
}

impl Config {
    /// Loads configuration: the YAML file named by `CONFIG` (if set), then
    /// the `LISTEN` env var overriding the listen address.
    pub fn load() -> anyhow::Result<Self> {
        let mut cfg = match std::env::var("CONFIG") {
            Ok(path) => {
                let text = std::fs::read_to_string(&path)
                    .with_context(|| format!("failed to read config file {path}"))?;
                Self::from_yaml(&text)?
            }
            Err(_) => Config::default(),
        };
        if let Ok(addr) = std::env::var("LISTEN") {
            cfg.server.listen_addr = addr;
        }
        Ok(cfg)
    }

    pub fn from_yaml(text: &str) -> anyhow::Result<Self> {
        serde_yaml::from_str(text).context("failed to parse config")
    }
}
