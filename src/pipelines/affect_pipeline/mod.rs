//! Mood, risk and emotion prediction for single texts and whole paragraphs.
//!
//! ## Main Types
//!
//! - [`AffectPipeline`] - Scores texts and paragraphs, applies rounding and emotion cutoffs
//! - [`AffectPipelineBuilder`] - Loads the three fine-tuned heads and the tokenizer
//! - [`Scorer`] - Per-sentence scoring backend; [`BertScorer`] is the candle implementation
//! - [`EmotionScores`] / [`EmotionCutoff`] - Label-ordered probabilities and prediction rules
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use mood_api::pipelines::affect_pipeline::*;
//! use mood_api::pipelines::utils::DeviceSelectable;
//!
//! # async fn run() -> anyhow::Result<()> {
//! let pipeline = AffectPipelineBuilder::new("models").cpu().build().await?;
//!
//! let text = pipeline.predict_text("I finally feel hopeful again.")?;
//! println!("mood {} risk {}", text.mood_score, text.risk_score);
//!
//! let paragraph = pipeline.predict_paragraph("Rough morning. Lunch with a friend helped!")?;
//! println!("signed strength {}", paragraph.mood.stats.signed_strength);
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod emotion;
pub mod model;
pub mod pipeline;
pub mod scorer;

pub use builder::AffectPipelineBuilder;
pub use emotion::{Emotion, EmotionCutoff, EmotionScores, EMOTION_COUNT};
pub use model::Scorer;
pub use pipeline::{
    AffectPipeline, EmotionPrediction, ParagraphEmotion, ParagraphMood, ParagraphPrediction,
    ParagraphRisk, SentenceEmotion, TextPrediction,
};
pub use scorer::BertScorer;
