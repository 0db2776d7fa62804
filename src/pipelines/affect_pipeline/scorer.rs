use super::model::Scorer;
use crate::models::{AffectBertModel, AffectHead};
use tokenizers::Tokenizer;

/// [`Scorer`] backed by the three fine-tuned BERT heads and their shared tokenizer.
#[derive(Clone)]
pub struct BertScorer {
    pub(crate) mood: AffectBertModel,
    pub(crate) risk: AffectBertModel,
    pub(crate) emotion: AffectBertModel,
    pub(crate) tokenizer: Tokenizer,
}

impl BertScorer {
    pub fn new(
        mood: AffectBertModel,
        risk: AffectBertModel,
        emotion: AffectBertModel,
        tokenizer: Tokenizer,
    ) -> anyhow::Result<Self> {
        for (model, expected) in [
            (&mood, AffectHead::Mood),
            (&risk, AffectHead::Risk),
            (&emotion, AffectHead::Emotion),
        ] {
            if model.kind() != expected {
                anyhow::bail!("expected a {expected} head, got a {} head", model.kind());
            }
        }

        Ok(Self {
            mood,
            risk,
            emotion,
            tokenizer,
        })
    }

    pub fn device(&self) -> &candle_core::Device {
        self.mood.device()
    }

    fn single_output(&self, model: &AffectBertModel, text: &str) -> anyhow::Result<f32> {
        model
            .predict(&self.tokenizer, text)?
            .first()
            .copied()
            .ok_or_else(|| anyhow::anyhow!("{} head produced no output", model.kind()))
    }
}

impl Scorer for BertScorer {
    fn score_mood(&self, text: &str) -> anyhow::Result<f32> {
        self.single_output(&self.mood, text)
    }

    fn score_risk(&self, text: &str) -> anyhow::Result<f32> {
        self.single_output(&self.risk, text)
    }

    fn score_emotions(&self, text: &str) -> anyhow::Result<Vec<f32>> {
        self.emotion.predict(&self.tokenizer, text)
    }
}
