//! BERT encoder with pooler.
//!
//! The classic post-LayerNorm encoder from "BERT: Pre-training of Deep
//! Bidirectional Transformers" with:
//! - learned absolute position embeddings and token-type embeddings
//! - GELU feed-forward blocks
//! - a `tanh` pooler over the `[CLS]` position
//!
//! Weight names follow the Hugging Face `BertModel` layout, so a fine-tuned
//! PyTorch state dict can be loaded with `vb.pp("bert")`.

use candle_core::{DType, IndexOp, Result, Tensor, D};
use candle_nn::{embedding, layer_norm, linear, ops::softmax, Embedding, LayerNorm, Linear, VarBuilder};
use serde::Deserialize;
use std::sync::Arc;

const MASKED_SCORE: f64 = f32::MIN as f64;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BertConfig {
    pub vocab_size: usize,
    pub hidden_size: usize,
    pub num_hidden_layers: usize,
    pub num_attention_heads: usize,
    pub intermediate_size: usize,
    pub max_position_embeddings: usize,
    #[serde(default = "default_type_vocab_size")]
    pub type_vocab_size: usize,
    #[serde(default = "default_layer_norm_eps")]
    pub layer_norm_eps: f64,
}

fn default_type_vocab_size() -> usize {
    2
}

fn default_layer_norm_eps() -> f64 {
    1e-12
}

#[derive(Debug, Clone)]
struct Embeddings {
    word_embeddings: Embedding,
    position_embeddings: Embedding,
    token_type_embeddings: Embedding,
    layer_norm: LayerNorm,
}

impl Embeddings {
    fn load(vb: VarBuilder, config: &BertConfig) -> Result<Self> {
        Ok(Self {
            word_embeddings: embedding(
                config.vocab_size,
                config.hidden_size,
                vb.pp("word_embeddings"),
            )?,
            position_embeddings: embedding(
                config.max_position_embeddings,
                config.hidden_size,
                vb.pp("position_embeddings"),
            )?,
            token_type_embeddings: embedding(
                config.type_vocab_size,
                config.hidden_size,
                vb.pp("token_type_embeddings"),
            )?,
            layer_norm: layer_norm(config.hidden_size, config.layer_norm_eps, vb.pp("LayerNorm"))?,
        })
    }

    fn forward(&self, input_ids: &Tensor, token_type_ids: &Tensor) -> Result<Tensor> {
        let seq_len = input_ids.dim(1)?;
        let position_ids = Tensor::arange(0u32, seq_len as u32, input_ids.device())?.unsqueeze(0)?;

        let words = input_ids.apply(&self.word_embeddings)?;
        let positions = position_ids.apply(&self.position_embeddings)?;
        let token_types = token_type_ids.apply(&self.token_type_embeddings)?;

        words
            .broadcast_add(&positions)?
            .add(&token_types)?
            .apply(&self.layer_norm)
    }
}

#[derive(Debug, Clone)]
struct SelfAttention {
    query: Linear,
    key: Linear,
    value: Linear,
    output: Linear,
    output_norm: LayerNorm,
    num_attention_heads: usize,
    attention_head_size: usize,
}

impl SelfAttention {
    fn load(vb: VarBuilder, config: &BertConfig) -> Result<Self> {
        let hidden = config.hidden_size;
        let attention = vb.pp("self");
        let output = vb.pp("output");
        Ok(Self {
            query: linear(hidden, hidden, attention.pp("query"))?,
            key: linear(hidden, hidden, attention.pp("key"))?,
            value: linear(hidden, hidden, attention.pp("value"))?,
            output: linear(hidden, hidden, output.pp("dense"))?,
            output_norm: layer_norm(hidden, config.layer_norm_eps, output.pp("LayerNorm"))?,
            num_attention_heads: config.num_attention_heads,
            attention_head_size: hidden / config.num_attention_heads,
        })
    }

    /// `(batch, seq, hidden)` -> `(batch, heads, seq, head_size)`
    fn split_heads(&self, xs: &Tensor) -> Result<Tensor> {
        let (batch, seq_len, _) = xs.dims3()?;
        xs.reshape((batch, seq_len, self.num_attention_heads, self.attention_head_size))?
            .transpose(1, 2)?
            .contiguous()
    }

    fn forward(&self, hidden_states: &Tensor, attention_mask: &Tensor) -> Result<Tensor> {
        let (batch, seq_len, hidden_size) = hidden_states.dims3()?;

        let q = self.split_heads(&hidden_states.apply(&self.query)?)?;
        let k = self.split_heads(&hidden_states.apply(&self.key)?)?;
        let v = self.split_heads(&hidden_states.apply(&self.value)?)?;

        let scale = (self.attention_head_size as f64).powf(-0.5);
        let scores = (q.matmul(&k.t()?)? * scale)?.broadcast_add(attention_mask)?;
        let probs = softmax(&scores, D::Minus1)?;

        let context = probs
            .matmul(&v)?
            .transpose(1, 2)?
            .reshape((batch, seq_len, hidden_size))?;

        context
            .apply(&self.output)?
            .add(hidden_states)?
            .apply(&self.output_norm)
    }
}

#[derive(Debug, Clone)]
struct Layer {
    attention: SelfAttention,
    intermediate: Linear,
    output: Linear,
    output_norm: LayerNorm,
}

impl Layer {
    fn load(vb: VarBuilder, config: &BertConfig) -> Result<Self> {
        Ok(Self {
            attention: SelfAttention::load(vb.pp("attention"), config)?,
            intermediate: linear(
                config.hidden_size,
                config.intermediate_size,
                vb.pp("intermediate.dense"),
            )?,
            output: linear(
                config.intermediate_size,
                config.hidden_size,
                vb.pp("output.dense"),
            )?,
            output_norm: layer_norm(
                config.hidden_size,
                config.layer_norm_eps,
                vb.pp("output.LayerNorm"),
            )?,
        })
    }

    fn forward(&self, hidden_states: &Tensor, attention_mask: &Tensor) -> Result<Tensor> {
        let attended = self.attention.forward(hidden_states, attention_mask)?;
        attended
            .apply(&self.intermediate)?
            .gelu_erf()?
            .apply(&self.output)?
            .add(&attended)?
            .apply(&self.output_norm)
    }
}

#[derive(Debug, Clone)]
struct Pooler {
    dense: Linear,
}

impl Pooler {
    fn load(vb: VarBuilder, config: &BertConfig) -> Result<Self> {
        Ok(Self {
            dense: linear(config.hidden_size, config.hidden_size, vb.pp("dense"))?,
        })
    }

    fn forward(&self, hidden_states: &Tensor) -> Result<Tensor> {
        hidden_states.i((.., 0))?.apply(&self.dense)?.tanh()
    }
}

#[derive(Debug)]
struct ModelWeights {
    embeddings: Embeddings,
    layers: Vec<Layer>,
    pooler: Pooler,
    dtype: DType,
}

/// BERT encoder returning the pooled `[CLS]` representation.
///
/// Cloning is cheap; clones share the same weights.
#[derive(Debug, Clone)]
pub struct BertModel {
    weights: Arc<ModelWeights>,
}

impl BertModel {
    pub fn load(vb: VarBuilder, config: &BertConfig) -> Result<Self> {
        let embeddings = Embeddings::load(vb.pp("embeddings"), config)?;

        let mut layers = Vec::with_capacity(config.num_hidden_layers);
        for layer_idx in 0..config.num_hidden_layers {
            layers.push(Layer::load(
                vb.pp(format!("encoder.layer.{layer_idx}")),
                config,
            )?);
        }

        let pooler = Pooler::load(vb.pp("pooler"), config)?;

        Ok(Self {
            weights: Arc::new(ModelWeights {
                embeddings,
                layers,
                pooler,
                dtype: vb.dtype(),
            }),
        })
    }

    /// Turn a `(batch, seq)` padding mask into an additive `(batch, 1, 1, seq)` mask.
    fn extended_attention_mask(&self, attention_mask: &Tensor) -> Result<Tensor> {
        attention_mask
            .to_dtype(self.weights.dtype)?
            .affine(-1.0, 1.0)?
            .affine(MASKED_SCORE, 0.0)?
            .unsqueeze(1)?
            .unsqueeze(1)
    }

    /// Forward pass returning the pooled output.
    ///
    /// # Arguments
    /// * `input_ids` - Token IDs with shape `(batch_size, sequence_length)`
    /// * `attention_mask` - `(batch_size, sequence_length)`, 1 for real tokens and 0 for padding
    ///
    /// # Returns
    /// Pooled hidden state with shape `(batch_size, hidden_size)`
    pub fn forward(&self, input_ids: &Tensor, attention_mask: &Tensor) -> Result<Tensor> {
        let token_type_ids = input_ids.zeros_like()?;
        let mask = self.extended_attention_mask(attention_mask)?;

        let mut hidden_states = self.weights.embeddings.forward(input_ids, &token_type_ids)?;
        for layer in &self.weights.layers {
            hidden_states = layer.forward(&hidden_states, &mask)?;
        }

        self.weights.pooler.forward(&hidden_states)
    }
}
