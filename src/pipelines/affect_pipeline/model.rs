/// Per-sentence scoring backend.
///
/// Implementations must be usable from several request threads at once; the
/// production implementation only reads model weights after construction.
pub trait Scorer {
    /// Mood in [1, 5], 3 being neutral.
    fn score_mood(&self, text: &str) -> anyhow::Result<f32>;

    /// Risk probability in [0, 1].
    fn score_risk(&self, text: &str) -> anyhow::Result<f32>;

    /// One probability per label of [`super::Emotion::ALL`], in that order.
    fn score_emotions(&self, text: &str) -> anyhow::Result<Vec<f32>>;
}
