//! Loading of model components.
//!
//! The fine-tuned heads ship as local weight files, while the tokenizer and
//! the encoder configuration are fetched from the Hugging Face Hub repo the
//! heads were fine-tuned from.
//!
//! ## Main Types
//!
//! - [`HfLoader`] - Fetches a single file from a Hub repository
//! - [`TokenizerLoader`] - Loads a tokenizer configured for single-sentence inference
//! - [`BertConfigLoader`] - Loads the encoder `config.json`
//! - [`WeightsLoader`] - Opens a local PyTorch or safetensors weight file

use crate::models::bert::BertConfig;
use candle_core::{DType, Device};
use candle_nn::VarBuilder;
use hf_hub::api::sync::Api as HfApi;
use std::path::{Path, PathBuf};
use tokenizers::{Tokenizer, TruncationParams};

/// Longest input the BERT encoder accepts, special tokens included.
pub const MAX_SEQUENCE_LENGTH: usize = 512;

#[derive(Debug, Clone)]
pub struct HfLoader {
    pub repo: String,
    pub filename: String,
}

impl HfLoader {
    pub fn new(repo: &str, filename: &str) -> Self {
        Self {
            repo: repo.into(),
            filename: filename.into(),
        }
    }

    pub fn load(&self) -> anyhow::Result<PathBuf> {
        let hf_api = HfApi::new()?.model(self.repo.clone());
        let path = hf_api.get(self.filename.as_str())?;
        tracing::debug!(repo = %self.repo, file = %self.filename, path = ?path, "fetched hub file");
        Ok(path)
    }
}

#[derive(Clone)]
pub struct TokenizerLoader {
    pub tokenizer_file_loader: HfLoader,
}

impl TokenizerLoader {
    pub fn new(repo: &str) -> Self {
        Self {
            tokenizer_file_loader: HfLoader::new(repo, "tokenizer.json"),
        }
    }

    /// Load the tokenizer with truncation at [`MAX_SEQUENCE_LENGTH`] and no padding.
    pub fn load(&self) -> anyhow::Result<Tokenizer> {
        let tokenizer_file_path = self.tokenizer_file_loader.load()?;

        let mut tokenizer =
            Tokenizer::from_file(tokenizer_file_path).map_err(anyhow::Error::msg)?;
        tokenizer.with_padding(None);
        tokenizer
            .with_truncation(Some(TruncationParams {
                max_length: MAX_SEQUENCE_LENGTH,
                ..Default::default()
            }))
            .map_err(anyhow::Error::msg)?;

        Ok(tokenizer)
    }
}

pub struct BertConfigLoader {
    pub config_file_loader: HfLoader,
}

impl BertConfigLoader {
    pub fn new(repo: &str) -> Self {
        Self {
            config_file_loader: HfLoader::new(repo, "config.json"),
        }
    }

    pub fn load(&self) -> anyhow::Result<BertConfig> {
        let config_path = self.config_file_loader.load()?;
        let content = std::fs::read_to_string(&config_path).map_err(|e| {
            anyhow::anyhow!("Failed to read config file {:?}: {}", config_path, e)
        })?;
        let config = serde_json::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse encoder config: {}", e))?;
        Ok(config)
    }
}

/// Local weight file of a fine-tuned head.
#[derive(Debug, Clone)]
pub struct WeightsLoader {
    pub path: PathBuf,
}

impl WeightsLoader {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Open the file as a [`VarBuilder`]. `.safetensors` files are memory
    /// mapped; `.pt`, `.pth` and `.bin` are read as PyTorch state dicts.
    pub fn load(&self, dtype: DType, device: &Device) -> anyhow::Result<VarBuilder<'static>> {
        if !self.path.is_file() {
            anyhow::bail!("Model weights not found at {:?}", self.path);
        }

        let extension = self
            .path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default();

        let vb = match extension {
            "safetensors" => unsafe {
                VarBuilder::from_mmaped_safetensors(&[&self.path], dtype, device)?
            },
            "pt" | "pth" | "bin" => VarBuilder::from_pth(&self.path, dtype, device)?,
            _ => anyhow::bail!("Unsupported weight file format: {:?}", self.path),
        };

        tracing::info!(path = ?self.path, "loaded model weights");
        Ok(vb)
    }
}
