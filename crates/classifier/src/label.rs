use serde::{Deserialize, Serialize};

/// Probability strictly above this is labelled phishing.
pub const DECISION_THRESHOLD: f64 = 0.5;

/// Decimal places kept in a reported confidence.
pub const CONFIDENCE_DECIMALS: usize = 4;

/// Binary label for an email.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Label {
    Phishing,
    NonPhishing,
}

impl Label {
    /// `Phishing` iff `probability > 0.5`; exactly `0.5` is `NonPhishing`.
    pub fn from_probability(probability: f64) -> Self {
        if probability > DECISION_THRESHOLD {
            Label::Phishing
        } else {
            Label::NonPhishing
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Label::Phishing => "phishing",
            Label::NonPhishing => "non-phishing",
        }
    }
}

impl std::fmt::Display for Label {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One classifier's answer: the thresholded label and its rounded confidence.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Verdict {
    pub prediction: Label,
    /// Positive-class probability rounded to 4 decimal places.
    pub confidence: f64,
}

impl Verdict {
    /// Labels the unrounded probability; rounding only affects the reported
    /// confidence. A probability just above 0.5 is `Phishing` even when its
    /// confidence reads `0.5`.
    pub fn from_probability(probability: f64) -> Self {
        let probability = probability.clamp(0.0, 1.0);
        Self {
            prediction: Label::from_probability(probability),
            confidence: round_confidence(probability),
        }
    }
}

/// Rounds to [`CONFIDENCE_DECIMALS`] places from the exact binary value, so
/// `0.50005` (stored just below the midpoint) becomes `0.5`.
pub fn round_confidence(probability: f64) -> f64 {
    format!("{probability:.prec$}", prec = CONFIDENCE_DECIMALS)
        .parse()
        .unwrap_or(probability)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn threshold_is_strict() {
        assert_eq!(Label::from_probability(0.5), Label::NonPhishing);
        assert_eq!(Label::from_probability(0.500_000_1), Label::Phishing);
        assert_eq!(Label::from_probability(0.0), Label::NonPhishing);
        assert_eq!(Label::from_probability(1.0), Label::Phishing);
    }

    #[test]
    fn rounding_keeps_four_decimals() {
        assert_eq!(round_confidence(0.268_941_421_369_995_1), 0.2689);
        assert_eq!(round_confidence(0.876_532_955_756_829_7), 0.8765);
        assert_eq!(round_confidence(0.300_000_000_000_000_04), 0.3);
        assert_eq!(round_confidence(1.0), 1.0);
        assert_eq!(round_confidence(0.0), 0.0);
        assert_eq!(round_confidence(0.475), 0.475);
    }

    #[test]
    fn rounding_uses_exact_binary_value() {
        // 0.50005 and 0.00015 are both stored below their decimal midpoint.
        assert_eq!(round_confidence(0.500_05), 0.5);
        assert_eq!(round_confidence(0.000_15), 0.0001);
        assert_eq!(round_confidence(0.500_06), 0.5001);
    }

    #[test]
    fn label_comes_from_unrounded_probability() {
        let v = Verdict::from_probability(0.500_04);
        assert_eq!(v.confidence, 0.5);
        assert_eq!(v.prediction, Label::Phishing);

        let v = Verdict::from_probability(0.5);
        assert_eq!(v.confidence, 0.5);
        assert_eq!(v.prediction, Label::NonPhishing);

        let v = Verdict::from_probability(0.499_96);
        assert_eq!(v.confidence, 0.5);
        assert_eq!(v.prediction, Label::NonPhishing);
    }

    #[test]
    fn confidence_clamped_into_unit_interval() {
        assert_eq!(Verdict::from_probability(1.000_000_1).confidence, 1.0);
        assert_eq!(Verdict::from_probability(-1e-12).confidence, 0.0);
    }

    #[test]
    fn labels_serialize_kebab_case() {
        assert_eq!(
            serde_json::to_string(&Label::NonPhishing).expect("json"),
            "\"non-phishing\""
        );
        assert_eq!(
            serde_json::to_string(&Label::Phishing).expect("json"),
            "\"phishing\""
        );
        assert_eq!(Label::NonPhishing.to_string(), "non-phishing");
    }

    #[test]
    fn verdict_serializes_as_response_fragment() {
        let v = Verdict::from_probability(0.825);
        assert_eq!(
            serde_json::to_value(v).expect("json"),
            serde_json::json!({"prediction": "phishing", "confidence": 0.825})
        );
    }
}
