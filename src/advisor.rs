//! Wizard-of-Oz advisor.
//!
//! There is no model behind the advice: the advisor reads the ground truth and
//! lies with probability [`ADVISOR_ERROR_PROBABILITY`], which makes it an
//! 85%-reliable classifier from the participant's point of view. Advice is
//! display-only and never feeds into scoring.

use rand::Rng;

use crate::constants::*;
use crate::types::{Advice, Prediction};

/// Advise on a bag using the default 15% error rate.
pub fn advise<R: Rng + ?Sized>(ground_truth: bool, rng: &mut R) -> Advice {
    advise_with_error_rate(ground_truth, ADVISOR_ERROR_PROBABILITY, rng)
}

/// Advise on a bag, inverting the truth with probability `error_probability`.
pub fn advise_with_error_rate<R: Rng + ?Sized>(
    ground_truth: bool,
    error_probability: f64,
    rng: &mut R,
) -> Advice {
    let prediction = predict(ground_truth, error_probability, rng);
    let confidence = rng.random_range(ADVISOR_CONFIDENCE_MIN..=ADVISOR_CONFIDENCE_MAX);
    Advice {
        prediction,
        confidence,
    }
}

/// The advisor's claim alone, without the cosmetic confidence draw.
#[inline]
pub fn predict<R: Rng + ?Sized>(ground_truth: bool, error_probability: f64, rng: &mut R) -> Prediction {
    let perfect = Prediction::from_threat(ground_truth);
    if rng.random_bool(error_probability) {
        perfect.inverted()
    } else {
        perfect
    }
}

/// Headline shown to the participant for a piece of advice.
pub fn advice_message(advice: &Advice) -> String {
    match advice.prediction {
        Prediction::Threat => format!(
            "AI ALERT: Suspicious Object Detected (Confidence: {}%)",
            advice.confidence
        ),
        Prediction::Clear => format!("AI SCAN: Bag Clear (Confidence: {}%)", advice.confidence),
    }
}

/// Shown instead of advice in manual sessions.
pub const OFFLINE_MESSAGE: &str = "AI SYSTEM OFFLINE: Manual Inspection Required";

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn test_disagreement_rate_converges() {
        let mut rng = SmallRng::seed_from_u64(42);
        let n = 100_000;
        let mut wrong = 0usize;
        for i in 0..n {
            let truth = i % 3 == 0;
            if advise(truth, &mut rng).prediction.is_threat() != truth {
                wrong += 1;
            }
        }
        let rate = wrong as f64 / n as f64;
        assert!(
            (rate - ADVISOR_ERROR_PROBABILITY).abs() < 0.01,
            "disagreement {rate:.4}"
        );
    }

    #[test]
    fn test_zero_error_rate_is_perfect() {
        let mut rng = SmallRng::seed_from_u64(3);
        for truth in [true, false] {
            for _ in 0..1000 {
                let advice = advise_with_error_rate(truth, 0.0, &mut rng);
                assert_eq!(advice.prediction.is_threat(), truth);
            }
        }
    }

    #[test]
    fn test_full_error_rate_always_inverts() {
        let mut rng = SmallRng::seed_from_u64(3);
        for _ in 0..1000 {
            let advice = advise_with_error_rate(true, 1.0, &mut rng);
            assert_eq!(advice.prediction, Prediction::Clear);
        }
    }

    #[test]
    fn test_confidence_range() {
        let mut rng = SmallRng::seed_from_u64(11);
        for _ in 0..5000 {
            let c = advise(false, &mut rng).confidence;
            assert!((ADVISOR_CONFIDENCE_MIN..=ADVISOR_CONFIDENCE_MAX).contains(&c));
        }
    }

    #[test]
    fn test_advice_message() {
        let threat = Advice {
            prediction: Prediction::Threat,
            confidence: 91,
        };
        assert_eq!(
            advice_message(&threat),
            "AI ALERT: Suspicious Object Detected (Confidence: 91%)"
        );
        let clear = Advice {
            prediction: Prediction::Clear,
            confidence: 80,
        };
        assert_eq!(advice_message(&clear), "AI SCAN: Bag Clear (Confidence: 80%)");
    }
}
