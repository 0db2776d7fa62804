use super::emotion::{Emotion, EmotionCutoff, EmotionScores};
use super::model::Scorer;
use crate::core::PredictError;
use crate::paragraph::{self, round_to, MoodStats, RiskStats};
use serde::Serialize;

/// Emotion scores of one text plus the labels that passed the cutoff.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmotionPrediction {
    pub emotion_scores: EmotionScores,
    pub predicted_emotions: Vec<Emotion>,
}

/// Result of scoring a whole text as one unit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextPrediction {
    pub mood_score: f64,
    pub risk_score: f64,
    pub emotion_scores: EmotionScores,
    pub predicted_emotions: Vec<Emotion>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParagraphMood {
    pub sentences: Vec<String>,
    pub moods: Vec<f64>,
    #[serde(flatten)]
    pub stats: MoodStats,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParagraphRisk {
    pub sentences: Vec<String>,
    pub risk_scores: Vec<f64>,
    #[serde(flatten)]
    pub stats: RiskStats,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SentenceEmotion {
    pub sentence: String,
    #[serde(flatten)]
    pub prediction: EmotionPrediction,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParagraphEmotion {
    pub per_sentence: Vec<SentenceEmotion>,
}

/// Result of scoring a paragraph sentence by sentence.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParagraphPrediction {
    pub mood: ParagraphMood,
    pub risk: ParagraphRisk,
    pub emotion: ParagraphEmotion,
}

pub struct AffectPipeline<S: Scorer> {
    pub(crate) scorer: S,
    pub(crate) emotion_threshold: f64,
}

impl<S: Scorer> AffectPipeline<S> {
    pub fn new(scorer: S, emotion_threshold: f64) -> Self {
        Self {
            scorer,
            emotion_threshold,
        }
    }

    pub fn scorer(&self) -> &S {
        &self.scorer
    }

    pub fn emotion_threshold(&self) -> f64 {
        self.emotion_threshold
    }

    /// Mood of `text`, rounded to 2 decimals.
    pub fn predict_mood(&self, text: &str) -> anyhow::Result<f64> {
        let mood = self.scorer.score_mood(text)?;
        Ok(round_to(f64::from(mood), 2))
    }

    /// Risk of `text`, rounded to 4 decimals.
    pub fn predict_risk(&self, text: &str) -> anyhow::Result<f64> {
        let risk = self.scorer.score_risk(text)?;
        Ok(round_to(f64::from(risk), 4))
    }

    pub fn predict_emotions(
        &self,
        text: &str,
        cutoff: EmotionCutoff,
    ) -> anyhow::Result<EmotionPrediction> {
        let emotion_scores = EmotionScores::from_probabilities(&self.scorer.score_emotions(text)?)?;
        let predicted_emotions = emotion_scores.predicted(cutoff);
        Ok(EmotionPrediction {
            emotion_scores,
            predicted_emotions,
        })
    }

    /// Score `text` as a single unit. Emotions must exceed the threshold strictly.
    pub fn predict_text(&self, text: &str) -> Result<TextPrediction, PredictError> {
        let text = text.trim_matches(paragraph::is_space);
        let mood_score = self.predict_mood(text)?;
        let risk_score = self.predict_risk(text)?;
        let emotions = self.predict_emotions(text, EmotionCutoff::Above(self.emotion_threshold))?;

        Ok(TextPrediction {
            mood_score,
            risk_score,
            emotion_scores: emotions.emotion_scores,
            predicted_emotions: emotions.predicted_emotions,
        })
    }

    /// Score every sentence of `paragraph` and aggregate.
    pub fn predict_paragraph(&self, paragraph: &str) -> Result<ParagraphPrediction, PredictError> {
        let sentences = paragraph::split_sentences(paragraph);
        if sentences.is_empty() {
            return Err(PredictError::EmptyParagraph);
        }
        tracing::debug!(sentences = sentences.len(), "scoring paragraph");

        Ok(ParagraphPrediction {
            mood: self.paragraph_mood(&sentences)?,
            risk: self.paragraph_risk(&sentences)?,
            emotion: self.paragraph_emotion(&sentences, self.emotion_threshold)?,
        })
    }

    pub fn paragraph_mood(&self, sentences: &[String]) -> Result<ParagraphMood, PredictError> {
        let moods = sentences
            .iter()
            .map(|s| self.predict_mood(s))
            .collect::<anyhow::Result<Vec<_>>>()?;
        let stats = paragraph::mood_stats(&moods)?;

        Ok(ParagraphMood {
            sentences: sentences.to_vec(),
            moods,
            stats,
        })
    }

    pub fn paragraph_risk(&self, sentences: &[String]) -> Result<ParagraphRisk, PredictError> {
        let risk_scores = sentences
            .iter()
            .map(|s| self.predict_risk(s))
            .collect::<anyhow::Result<Vec<_>>>()?;
        let stats = paragraph::risk_stats(&risk_scores)?;

        Ok(ParagraphRisk {
            sentences: sentences.to_vec(),
            risk_scores,
            stats,
        })
    }

    /// Per-sentence emotions. A score equal to `threshold` counts as predicted.
    pub fn paragraph_emotion(
        &self,
        sentences: &[String],
        threshold: f64,
    ) -> Result<ParagraphEmotion, PredictError> {
        let per_sentence = sentences
            .iter()
            .map(|sentence| {
                Ok(SentenceEmotion {
                    sentence: sentence.clone(),
                    prediction: self.predict_emotions(sentence, EmotionCutoff::AtLeast(threshold))?,
                })
            })
            .collect::<anyhow::Result<Vec<_>>>()?;

        Ok(ParagraphEmotion { per_sentence })
    }
}
