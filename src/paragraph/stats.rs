use super::round_to;
use crate::core::EmptyInputError;
use serde::Serialize;

/// Neutral point of the 1–5 mood scale.
pub const NEUTRAL_MOOD: f64 = 3.0;

/// Paragraph-level summary of sentence mood scores.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MoodStats {
    /// Mean deviation from neutral, in [-2, 2].
    pub mean_polarity: f64,
    /// Root-mean-square deviation from neutral. Direction-agnostic intensity.
    pub mood_strength: f64,
    /// `mood_strength` carrying the sign of `mean_polarity`.
    pub signed_strength: f64,
}

/// Paragraph-level summary of sentence risk scores.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RiskStats {
    #[serde(rename = "mean_risk")]
    pub mean: f64,
    /// Population standard deviation.
    #[serde(rename = "std_risk")]
    pub std: f64,
    #[serde(rename = "max_risk")]
    pub max: f64,
    #[serde(rename = "min_risk")]
    pub min: f64,
}

pub fn mood_stats(moods: &[f64]) -> Result<MoodStats, EmptyInputError> {
    if moods.is_empty() {
        return Err(EmptyInputError);
    }

    let centered: Vec<f64> = moods.iter().map(|m| m - NEUTRAL_MOOD).collect();
    let mean_polarity = mean(&centered);
    let mood_strength = mean(&centered.iter().map(|c| c * c).collect::<Vec<_>>()).sqrt();
    let signed_strength = sign(mean_polarity) * mood_strength;

    Ok(MoodStats {
        mean_polarity: round_to(mean_polarity, 4),
        mood_strength: round_to(mood_strength, 4),
        signed_strength: round_to(signed_strength, 4),
    })
}

pub fn risk_stats(risks: &[f64]) -> Result<RiskStats, EmptyInputError> {
    if risks.is_empty() {
        return Err(EmptyInputError);
    }

    let mean_risk = mean(risks);
    let variance = mean(
        &risks
            .iter()
            .map(|r| (r - mean_risk).powi(2))
            .collect::<Vec<_>>(),
    );
    let max = risks.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let min = risks.iter().copied().fold(f64::INFINITY, f64::min);

    Ok(RiskStats {
        mean: round_to(mean_risk, 4),
        std: round_to(variance.sqrt(), 4),
        max: round_to(max, 4),
        min: round_to(min, 4),
    })
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

// f64::signum maps 0.0 to 1.0; a neutral paragraph must keep zero strength.
fn sign(value: f64) -> f64 {
    if value > 0.0 {
        1.0
    } else if value < 0.0 {
        -1.0
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn neutral_paragraph_has_no_polarity_or_strength() {
        let stats = mood_stats(&[3.0, 3.0, 3.0]).unwrap();
        assert_eq!(stats.mean_polarity, 0.0);
        assert_eq!(stats.mood_strength, 0.0);
        assert_eq!(stats.signed_strength, 0.0);
    }

    #[test]
    fn uniformly_positive_paragraph() {
        let stats = mood_stats(&[5.0, 5.0]).unwrap();
        assert_eq!(stats.mean_polarity, 2.0);
        assert_eq!(stats.mood_strength, 2.0);
        assert_eq!(stats.signed_strength, 2.0);
    }

    #[test]
    fn opposite_moods_cancel_direction_but_keep_strength() {
        let stats = mood_stats(&[1.0, 5.0]).unwrap();
        assert_eq!(stats.mean_polarity, 0.0);
        assert_eq!(stats.mood_strength, 2.0);
        assert_eq!(stats.signed_strength, 0.0);
    }

    #[test]
    fn negative_paragraph_keeps_negative_sign() {
        let stats = mood_stats(&[1.5, 2.0, 3.5]).unwrap();
        assert_eq!(stats.mean_polarity, -0.6667);
        assert_eq!(stats.mood_strength, 1.0801);
        assert_eq!(stats.signed_strength, -1.0801);
    }

    #[test]
    fn risk_summary() {
        let stats = risk_stats(&[0.1, 0.3, 0.5]).unwrap();
        assert_eq!(stats.mean, 0.3);
        assert_eq!(stats.min, 0.1);
        assert_eq!(stats.max, 0.5);
        assert_eq!(stats.std, 0.1633);
    }

    #[test]
    fn single_sentence_risk_has_zero_spread() {
        let stats = risk_stats(&[0.42]).unwrap();
        assert_eq!(stats.std, 0.0);
        assert_eq!(stats.max, stats.min);
    }

    #[test]
    fn empty_input_is_an_error() {
        assert_eq!(mood_stats(&[]), Err(EmptyInputError));
        assert_eq!(risk_stats(&[]), Err(EmptyInputError));
    }

    #[test]
    fn outputs_are_rounded_to_four_digits() {
        let stats = risk_stats(&[0.123456, 0.987654, 0.5]).unwrap();
        for value in [stats.mean, stats.std, stats.max, stats.min] {
            assert_eq!(value, round_to(value, 4));
        }
    }

    #[test]
    fn tied_means_round_to_even() {
        assert_eq!(risk_stats(&[0.0001, 0.0004]).unwrap().mean, 0.0002);
        assert_eq!(risk_stats(&[0.1234, 0.1235]).unwrap().mean, 0.1234);
    }

    #[test]
    fn aggregation_is_pure() {
        let moods = [2.31, 4.07, 3.9, 1.12];
        assert_eq!(mood_stats(&moods), mood_stats(&moods));
        assert_eq!(risk_stats(&moods), risk_stats(&moods));
    }
}
