#![allow(dead_code)]

use mood_api::pipelines::affect_pipeline::{Emotion, EMOTION_COUNT};
use mood_api::{AffectPipeline, Scorer};

/// Keyword-driven scorer so expectations can be computed by hand.
///
/// - mood: "great" → 5.0, "awful" → 1.0, otherwise 3.0
/// - risk: "hopeless" → 0.9, "tired" → 0.3, otherwise 0.1
/// - emotions: 0.1 everywhere; "glad" puts joy at exactly 0.5, "alone"
///   puts loneliness at 0.8
pub struct KeywordScorer;

impl Scorer for KeywordScorer {
    fn score_mood(&self, text: &str) -> anyhow::Result<f32> {
        Ok(if text.contains("great") {
            5.0
        } else if text.contains("awful") {
            1.0
        } else {
            3.0
        })
    }

    fn score_risk(&self, text: &str) -> anyhow::Result<f32> {
        Ok(if text.contains("hopeless") {
            0.9
        } else if text.contains("tired") {
            0.3
        } else {
            0.1
        })
    }

    fn score_emotions(&self, text: &str) -> anyhow::Result<Vec<f32>> {
        let mut probs = vec![0.1; EMOTION_COUNT];
        if text.contains("glad") {
            probs[Emotion::Joy as usize] = 0.5;
        }
        if text.contains("alone") {
            probs[Emotion::Loneliness as usize] = 0.8;
        }
        Ok(probs)
    }
}

/// Scorer whose model always fails.
pub struct BrokenScorer;

impl Scorer for BrokenScorer {
    fn score_mood(&self, _text: &str) -> anyhow::Result<f32> {
        anyhow::bail!("mood model unavailable")
    }

    fn score_risk(&self, _text: &str) -> anyhow::Result<f32> {
        anyhow::bail!("risk model unavailable")
    }

    fn score_emotions(&self, _text: &str) -> anyhow::Result<Vec<f32>> {
        anyhow::bail!("emotion model unavailable")
    }
}

pub fn keyword_pipeline() -> AffectPipeline<KeywordScorer> {
    AffectPipeline::new(KeywordScorer, 0.5)
}
