//! Process-wide service configuration read from the environment.
//!
//! | Variable            | Default              | Meaning                                   |
//! |---------------------|----------------------|-------------------------------------------|
//! | `PORT`              | `8080`               | TCP port, bound on all interfaces         |
//! | `MODEL_DIR`         | `models`             | Directory holding the three weight files  |
//! | `BERT_REPO`         | `bert-base-uncased`  | Hub repo for `config.json` and tokenizer  |
//! | `INFERENCE_DEVICE`  | `auto`               | `auto`, `cpu` or `cuda:<index>`           |
//! | `EMOTION_THRESHOLD` | `0.5`                | Default cutoff for predicted emotions     |

use super::error::ConfigError;
use crate::pipelines::utils::DeviceRequest;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_MODEL_DIR: &str = "models";
pub const DEFAULT_BERT_REPO: &str = "bert-base-uncased";
pub const DEFAULT_EMOTION_THRESHOLD: f64 = 0.5;

#[derive(Clone)]
pub struct ServiceConfig {
    pub port: u16,
    pub model_dir: PathBuf,
    pub bert_repo: String,
    pub device: DeviceRequest,
    pub emotion_threshold: f64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            model_dir: PathBuf::from(DEFAULT_MODEL_DIR),
            bert_repo: DEFAULT_BERT_REPO.to_string(),
            device: DeviceRequest::Default,
            emotion_threshold: DEFAULT_EMOTION_THRESHOLD,
        }
    }
}

impl ServiceConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup. Unset keys keep their default.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(port) = lookup("PORT") {
            config.port = port.trim().parse().map_err(|e: std::num::ParseIntError| {
                ConfigError::InvalidValue {
                    key: "PORT",
                    value: port.clone(),
                    reason: e.to_string(),
                }
            })?;
        }

        if let Some(dir) = lookup("MODEL_DIR") {
            config.model_dir = PathBuf::from(dir);
        }

        if let Some(repo) = lookup("BERT_REPO") {
            config.bert_repo = repo;
        }

        if let Some(device) = lookup("INFERENCE_DEVICE") {
            config.device = parse_device(&device)?;
        }

        if let Some(threshold) = lookup("EMOTION_THRESHOLD") {
            let invalid = |reason: String| ConfigError::InvalidValue {
                key: "EMOTION_THRESHOLD",
                value: threshold.clone(),
                reason,
            };
            let value: f64 = threshold
                .trim()
                .parse()
                .map_err(|e: std::num::ParseFloatError| invalid(e.to_string()))?;
            if !(0.0..=1.0).contains(&value) {
                return Err(invalid("must be within [0, 1]".to_string()));
            }
            config.emotion_threshold = value;
        }

        Ok(config)
    }

    /// The host part is fixed to all interfaces.
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), self.port)
    }
}

fn parse_device(value: &str) -> Result<DeviceRequest, ConfigError> {
    let normalized = value.trim().to_ascii_lowercase();
    match normalized.as_str() {
        "" | "auto" => Ok(DeviceRequest::Default),
        "cpu" => Ok(DeviceRequest::Cpu),
        "cuda" => Ok(DeviceRequest::Cuda(0)),
        other => other
            .strip_prefix("cuda:")
            .and_then(|index| index.parse().ok())
            .map(DeviceRequest::Cuda)
            .ok_or_else(|| ConfigError::InvalidValue {
                key: "INFERENCE_DEVICE",
                value: value.to_string(),
                reason: "expected `auto`, `cpu` or `cuda:<index>`".to_string(),
            }),
    }
}
