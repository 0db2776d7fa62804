use super::pipeline::AffectPipeline;
use super::scorer::BertScorer;
use crate::core::config::{DEFAULT_BERT_REPO, DEFAULT_EMOTION_THRESHOLD};
use crate::core::{global_cache, ServiceConfig};
use crate::loaders::TokenizerLoader;
use crate::models::{AffectBertModel, AffectHead, AffectModelOptions};
use crate::pipelines::utils::{build_cache_key, DeviceRequest, DeviceSelectable};
use candle_core::Device;
use std::path::{Path, PathBuf};

pub struct AffectPipelineBuilder {
    model_dir: PathBuf,
    bert_repo: String,
    emotion_threshold: f64,
    device_request: DeviceRequest,
}

impl AffectPipelineBuilder {
    /// Expects `mood_model.pt`, `risk_model.pt` and `emotion_model.pt` in `model_dir`.
    pub fn new(model_dir: impl AsRef<Path>) -> Self {
        Self {
            model_dir: model_dir.as_ref().to_path_buf(),
            bert_repo: DEFAULT_BERT_REPO.to_string(),
            emotion_threshold: DEFAULT_EMOTION_THRESHOLD,
            device_request: DeviceRequest::Default,
        }
    }

    pub fn from_config(config: &ServiceConfig) -> Self {
        Self {
            model_dir: config.model_dir.clone(),
            bert_repo: config.bert_repo.clone(),
            emotion_threshold: config.emotion_threshold,
            device_request: config.device.clone(),
        }
    }

    /// Hub repo providing the encoder config and tokenizer.
    pub fn bert_repo(mut self, repo: impl Into<String>) -> Self {
        self.bert_repo = repo.into();
        self
    }

    pub fn emotion_threshold(mut self, threshold: f64) -> Self {
        self.emotion_threshold = threshold;
        self
    }

    fn options(&self, head: AffectHead) -> AffectModelOptions {
        AffectModelOptions {
            head,
            weights: self.model_dir.join(head.weights_file()),
            bert_repo: self.bert_repo.clone(),
        }
    }

    async fn load_head(&self, head: AffectHead, device: &Device) -> anyhow::Result<AffectBertModel> {
        let options = self.options(head);
        let key = build_cache_key(&options, device);
        global_cache()
            .get_or_create(&key, || AffectBertModel::new(options.clone(), device.clone()))
            .await
    }

    pub async fn build(self) -> anyhow::Result<AffectPipeline<BertScorer>> {
        let device = self.device_request.clone().resolve()?;
        tracing::info!(model_dir = ?self.model_dir, ?device, "loading affect models");

        let mood = self.load_head(AffectHead::Mood, &device).await?;
        let risk = self.load_head(AffectHead::Risk, &device).await?;
        let emotion = self.load_head(AffectHead::Emotion, &device).await?;
        let tokenizer = TokenizerLoader::new(&self.bert_repo).load()?;

        let scorer = BertScorer::new(mood, risk, emotion, tokenizer)?;
        Ok(AffectPipeline::new(scorer, self.emotion_threshold))
    }
}

impl DeviceSelectable for AffectPipelineBuilder {
    fn device_request_mut(&mut self) -> &mut DeviceRequest {
        &mut self.device_request
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weights_resolve_inside_model_dir() {
        let builder = AffectPipelineBuilder::new("/srv/models").bert_repo("bert-base-cased");
        let options = builder.options(AffectHead::Risk);
        assert_eq!(options.weights, PathBuf::from("/srv/models/risk_model.pt"));
        assert_eq!(options.bert_repo, "bert-base-cased");
    }

    #[test]
    fn config_carries_over() {
        let config = ServiceConfig {
            emotion_threshold: 0.7,
            device: DeviceRequest::Cpu,
            ..ServiceConfig::default()
        };
        let builder = AffectPipelineBuilder::from_config(&config);
        assert_eq!(builder.emotion_threshold, 0.7);
        assert!(matches!(builder.device_request, DeviceRequest::Cpu));
        assert_eq!(builder.model_dir, PathBuf::from("models"));
    }

    #[tokio::test]
    async fn missing_weights_fail_the_build() {
        let result = AffectPipelineBuilder::new("no/such/dir").cpu().build().await;
        assert!(result.is_err());
    }
}
