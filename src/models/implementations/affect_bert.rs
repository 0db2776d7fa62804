//! Fine-tuned BERT heads for mood, risk and emotion scoring.
//!
//! Each head is a full BERT encoder followed by a single linear layer over the
//! pooled output. The three heads were fine-tuned independently, so each one
//! carries its own encoder weights.

use crate::loaders::{BertConfigLoader, WeightsLoader};
use crate::models::bert::{BertConfig, BertModel};
use crate::pipelines::affect_pipeline::EMOTION_COUNT;
use anyhow::{Error as E, Result};
use candle_core::{DType, Device, Tensor};
use candle_nn::{linear, ops::sigmoid, Linear, Module, VarBuilder};
use std::path::PathBuf;
use tokenizers::Tokenizer;

/// Which task a fine-tuned head was trained for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AffectHead {
    /// Mood on a 1–5 scale, 3 being neutral.
    Mood,
    /// Risk probability in [0, 1].
    Risk,
    /// Independent probabilities for each of the emotion labels.
    Emotion,
}

impl AffectHead {
    /// Name of the head's linear layer in the state dict.
    pub fn layer_name(&self) -> &'static str {
        match self {
            AffectHead::Mood => "mood_head",
            AffectHead::Risk => "risk_head",
            AffectHead::Emotion => "classifier",
        }
    }

    pub fn num_outputs(&self) -> usize {
        match self {
            AffectHead::Mood | AffectHead::Risk => 1,
            AffectHead::Emotion => EMOTION_COUNT,
        }
    }

    /// Default weight file name inside the model directory.
    pub fn weights_file(&self) -> &'static str {
        match self {
            AffectHead::Mood => "mood_model.pt",
            AffectHead::Risk => "risk_model.pt",
            AffectHead::Emotion => "emotion_model.pt",
        }
    }

    /// Map raw logits to the head's output range.
    fn activate(&self, logits: &Tensor) -> candle_core::Result<Tensor> {
        let probs = sigmoid(logits)?;
        match self {
            AffectHead::Mood => probs.affine(4.0, 1.0),
            AffectHead::Risk | AffectHead::Emotion => Ok(probs),
        }
    }
}

impl std::fmt::Display for AffectHead {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            AffectHead::Mood => "mood",
            AffectHead::Risk => "risk",
            AffectHead::Emotion => "emotion",
        };
        write!(f, "{name}")
    }
}

/// Everything needed to load one head.
#[derive(Debug, Clone)]
pub struct AffectModelOptions {
    pub head: AffectHead,
    pub weights: PathBuf,
    /// Hub repo providing the encoder `config.json` and tokenizer.
    pub bert_repo: String,
}

impl crate::core::ModelOptions for AffectModelOptions {
    fn cache_key(&self) -> String {
        format!("{}-{}-{}", self.head, self.bert_repo, self.weights.display())
    }
}

#[derive(Debug, Clone)]
pub struct AffectBertModel {
    bert: BertModel,
    head: Linear,
    kind: AffectHead,
    device: Device,
}

impl AffectBertModel {
    pub fn new(options: AffectModelOptions, device: Device) -> Result<Self> {
        let vb = WeightsLoader::new(&options.weights).load(DType::F32, &device)?;
        let config = BertConfigLoader::new(&options.bert_repo).load()?;
        let model = Self::load(vb, &config, options.head)?;
        tracing::info!(head = %options.head, weights = ?options.weights, "affect head ready");
        Ok(model)
    }

    /// Build from an already opened state dict laid out as `bert.*` + head layer.
    pub fn load(vb: VarBuilder, config: &BertConfig, kind: AffectHead) -> Result<Self> {
        let bert = BertModel::load(vb.pp("bert"), config)?;
        let head = linear(config.hidden_size, kind.num_outputs(), vb.pp(kind.layer_name()))?;
        Ok(Self {
            bert,
            head,
            kind,
            device: vb.device().clone(),
        })
    }

    pub fn device(&self) -> &Device {
        &self.device
    }

    pub fn kind(&self) -> AffectHead {
        self.kind
    }

    /// Score a single text, returning one value per head output.
    pub fn predict(&self, tokenizer: &Tokenizer, text: &str) -> Result<Vec<f32>> {
        let encoding = tokenizer
            .encode(text, true)
            .map_err(|e| E::msg(format!("Tokenization error: {}", e)))?;

        let input_ids = Tensor::new(encoding.get_ids(), &self.device)?.unsqueeze(0)?;
        let attention_mask =
            Tensor::new(encoding.get_attention_mask(), &self.device)?.unsqueeze(0)?;

        let pooled = self.bert.forward(&input_ids, &attention_mask)?;
        let logits = self.head.forward(&pooled)?;
        let outputs = self
            .kind
            .activate(&logits)?
            .squeeze(0)?
            .to_dtype(DType::F32)?
            .to_vec1::<f32>()?;

        Ok(outputs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiny_config() -> BertConfig {
        BertConfig {
            vocab_size: 16,
            hidden_size: 4,
            num_hidden_layers: 1,
            num_attention_heads: 2,
            intermediate_size: 8,
            max_position_embeddings: 8,
            type_vocab_size: 2,
            layer_norm_eps: 1e-12,
        }
    }

    fn head_outputs(kind: AffectHead) -> Vec<f32> {
        let device = Device::Cpu;
        let vb = VarBuilder::zeros(DType::F32, &device);
        let model = AffectBertModel::load(vb, &tiny_config(), kind).unwrap();
        let pooled = Tensor::zeros((1, 4), DType::F32, &device).unwrap();
        let logits = model.head.forward(&pooled).unwrap();
        kind.activate(&logits)
            .unwrap()
            .squeeze(0)
            .unwrap()
            .to_vec1::<f32>()
            .unwrap()
    }

    #[test]
    fn zero_logits_land_on_each_scale_midpoint() {
        assert_eq!(head_outputs(AffectHead::Mood), vec![3.0]);
        assert_eq!(head_outputs(AffectHead::Risk), vec![0.5]);
        assert_eq!(head_outputs(AffectHead::Emotion), vec![0.5; EMOTION_COUNT]);
    }

    #[test]
    fn heads_map_to_state_dict_layers() {
        assert_eq!(AffectHead::Mood.layer_name(), "mood_head");
        assert_eq!(AffectHead::Risk.layer_name(), "risk_head");
        assert_eq!(AffectHead::Emotion.layer_name(), "classifier");
        assert_eq!(AffectHead::Emotion.num_outputs(), 12);
    }
}
