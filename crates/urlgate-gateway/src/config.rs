//! Gateway configuration

use anyhow::Context;
use std::net::SocketAddr;
use std::path::PathBuf;

/// Environment variable naming the listen address
pub const ENV_LISTEN: &str = "URLGATE_LISTEN";
/// Environment variable naming the labeled-dataset CSV path
pub const ENV_DATASET: &str = "URLGATE_DATASET";
/// Environment variable naming the persisted-model path
pub const ENV_MODEL: &str = "URLGATE_MODEL";

/// Gateway process configuration, read from the environment
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Socket address to bind
    pub listen: SocketAddr,
    /// Labeled URL dataset to train from at startup, if present
    pub dataset_path: Option<PathBuf>,
    /// Model artifact to load at startup and save after training
    pub model_path: Option<PathBuf>,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            listen: SocketAddr::from(([127, 0, 0, 1], 8080)),
            dataset_path: None,
            model_path: None,
        }
    }
}

impl GatewayConfig {
    /// Load configuration from environment variables, falling back to
    /// defaults for anything unset
    pub fn from_env() -> anyhow::Result<Self> {
        let mut config = Self::default();

        if let Ok(listen) = std::env::var(ENV_LISTEN) {
            config.listen = listen
                .parse()
                .with_context(|| format!("{ENV_LISTEN} is not a socket address: {listen:?}"))?;
        }
        if let Ok(path) = std::env::var(ENV_DATASET) {
            config.dataset_path = Some(PathBuf::from(path));
        }
        if let Ok(path) = std::env::var(ENV_MODEL) {
            config.model_path = Some(PathBuf::from(path));
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GatewayConfig::default();
        assert_eq!(config.listen.port(), 8080);
        assert!(config.dataset_path.is_none());
        assert!(config.model_path.is_none());
    }
}
