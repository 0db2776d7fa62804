//! Paragraph-level aggregation of per-sentence predictions.
//!
//! Everything here is pure: a paragraph is split into sentences, each sentence
//! is scored elsewhere, and the scores are summarised into a handful of
//! statistics.
//!
//! ## Usage Example
//!
//! ```rust
//! use mood_api::paragraph::{mood_stats, risk_stats, split_sentences};
//!
//! let sentences = split_sentences("I feel great. Work was rough!");
//! assert_eq!(sentences, vec!["I feel great.", "Work was rough!"]);
//!
//! let mood = mood_stats(&[4.5, 2.0])?;
//! assert_eq!(mood.mean_polarity, 0.25);
//!
//! let risk = risk_stats(&[0.1, 0.3, 0.5])?;
//! assert_eq!(risk.std, 0.1633);
//! # Ok::<(), mood_api::core::EmptyInputError>(())
//! ```

pub mod splitter;
pub mod stats;

pub use splitter::{is_space, split_sentences};
pub use stats::{mood_stats, risk_stats, MoodStats, RiskStats, NEUTRAL_MOOD};

/// Round to `digits` decimal places; exact ties go to the even digit.
pub fn round_to(value: f64, digits: i32) -> f64 {
    let factor = 10f64.powi(digits);
    (value * factor).round_ties_even() / factor
}

#[cfg(test)]
mod tests {
    use super::round_to;

    #[test]
    fn rounds_to_requested_precision() {
        assert_eq!(round_to(0.123456, 4), 0.1235);
        assert_eq!(round_to(0.6669, 3), 0.667);
        assert_eq!(round_to(3.14159, 2), 3.14);
        assert_eq!(round_to(-0.66666, 4), -0.6667);
    }

    #[test]
    fn ties_round_to_even() {
        assert_eq!(round_to(0.5, 0), 0.0);
        assert_eq!(round_to(1.5, 0), 2.0);
        assert_eq!(round_to(2.5, 0), 2.0);
        assert_eq!(round_to(-2.5, 0), -2.0);
        assert_eq!(round_to(0.125, 2), 0.12);
    }
}
