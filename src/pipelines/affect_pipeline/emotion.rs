use crate::paragraph::round_to;
use serde::ser::{Serialize, SerializeMap, Serializer};

pub const EMOTION_COUNT: usize = 12;

/// The fixed label set of the emotion head, in output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Emotion {
    Sadness,
    Anger,
    Fear,
    Shame,
    Guilt,
    Loneliness,
    Confusion,
    Joy,
    Love,
    Hope,
    Pride,
    Relief,
}

impl Emotion {
    pub const ALL: [Emotion; EMOTION_COUNT] = [
        Emotion::Sadness,
        Emotion::Anger,
        Emotion::Fear,
        Emotion::Shame,
        Emotion::Guilt,
        Emotion::Loneliness,
        Emotion::Confusion,
        Emotion::Joy,
        Emotion::Love,
        Emotion::Hope,
        Emotion::Pride,
        Emotion::Relief,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Emotion::Sadness => "sadness",
            Emotion::Anger => "anger",
            Emotion::Fear => "fear",
            Emotion::Shame => "shame",
            Emotion::Guilt => "guilt",
            Emotion::Loneliness => "loneliness",
            Emotion::Confusion => "confusion",
            Emotion::Joy => "joy",
            Emotion::Love => "love",
            Emotion::Hope => "hope",
            Emotion::Pride => "pride",
            Emotion::Relief => "relief",
        }
    }
}

impl std::fmt::Display for Emotion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rule deciding which emotions count as predicted.
///
/// Single-text requests use [`EmotionCutoff::Above`] while paragraph sentences
/// use [`EmotionCutoff::AtLeast`]; a score sitting exactly on the threshold is
/// therefore predicted for a paragraph sentence but not for a lone text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EmotionCutoff {
    /// `score > threshold`
    Above(f64),
    /// `score >= threshold`
    AtLeast(f64),
}

impl EmotionCutoff {
    pub fn admits(&self, score: f64) -> bool {
        match *self {
            EmotionCutoff::Above(threshold) => score > threshold,
            EmotionCutoff::AtLeast(threshold) => score >= threshold,
        }
    }
}

/// Label-ordered emotion probabilities, rounded to 3 decimals.
///
/// Serializes as a JSON object whose keys keep label order.
#[derive(Debug, Clone, PartialEq)]
pub struct EmotionScores {
    scores: [f64; EMOTION_COUNT],
}

impl EmotionScores {
    pub fn from_probabilities(probs: &[f32]) -> anyhow::Result<Self> {
        if probs.len() != EMOTION_COUNT {
            anyhow::bail!(
                "emotion head returned {} probabilities, expected {}",
                probs.len(),
                EMOTION_COUNT
            );
        }

        let mut scores = [0.0; EMOTION_COUNT];
        for (slot, prob) in scores.iter_mut().zip(probs) {
            *slot = round_to(f64::from(*prob), 3);
        }
        Ok(Self { scores })
    }

    pub fn get(&self, emotion: Emotion) -> f64 {
        self.scores[emotion as usize]
    }

    pub fn iter(&self) -> impl Iterator<Item = (Emotion, f64)> + '_ {
        Emotion::ALL.iter().copied().zip(self.scores.iter().copied())
    }

    /// Labels admitted by `cutoff`, judged on the rounded scores, in label order.
    pub fn predicted(&self, cutoff: EmotionCutoff) -> Vec<Emotion> {
        self.iter()
            .filter(|(_, score)| cutoff.admits(*score))
            .map(|(emotion, _)| emotion)
            .collect()
    }
}

impl Serialize for EmotionScores {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(EMOTION_COUNT))?;
        for (emotion, score) in self.iter() {
            map.serialize_entry(emotion.as_str(), &score)?;
        }
        map.end()
    }
}
