//! Experiment constants: item sets, probabilities, scoring, and the
//! verification band.
//!
//! The probabilities here are shared by the live session ([`crate::trial_generator`],
//! [`crate::advisor`]) and the self-test ([`crate::verification`]), so a drift in
//! either shows up as a failed verification run.

/// Items that may appear in any bag. Drawn without replacement within a trial.
pub const SAFE_ITEMS: [&str; 11] = [
    "👕", "👖", "👗", "👟", "🎩", "💻", "📷", "📚", "🧸", "🥪", "🕶️",
];

/// Prohibited items. At most one per bag, drawn with replacement across trials.
pub const THREAT_ITEMS: [&str; 6] = ["🔫", "🔪", "💣", "🧨", "🩸", "☠️"];

/// Minimum number of safe items in a bag.
pub const MIN_SAFE_ITEMS: usize = 4;

/// Maximum number of safe items in a bag.
pub const MAX_SAFE_ITEMS: usize = 8;

/// Probability that a generated bag contains a threat.
pub const THREAT_PROBABILITY: f64 = 0.30;

/// Probability that the advisor inverts the ground truth (85% reliable).
pub const ADVISOR_ERROR_PROBABILITY: f64 = 0.15;

/// Displayed advisor confidence range, in percent. Independent of correctness.
pub const ADVISOR_CONFIDENCE_MIN: u8 = 80;
pub const ADVISOR_CONFIDENCE_MAX: u8 = 99;

/// Points awarded for a correct decision.
pub const POINTS_PER_CORRECT: u32 = 10;

/// Rounds (bags) per session.
pub const ROUNDS_PER_SESSION: usize = 10;

/// Synthetic trials generated by one verification run.
pub const VERIFICATION_TRIALS: usize = 10_000;

/// Verification passes iff observed accuracy (percent) is strictly inside
/// `(VERIFICATION_ACCURACY_LOW, VERIFICATION_ACCURACY_HIGH)`.
pub const VERIFICATION_ACCURACY_LOW: f64 = 84.0;
pub const VERIFICATION_ACCURACY_HIGH: f64 = 86.0;

/// Default CSV export file name.
pub const EXPORT_FILE_NAME: &str = "skyguard_data.csv";

/// CSV column headers, in export order.
pub const CSV_COLUMNS: [&str; 6] = ["Round", "Mode", "Threat", "User_Reject", "Result", "Time"];

/// Whether `symbol` belongs to the threat set.
#[inline]
pub fn is_threat_item(symbol: &str) -> bool {
    THREAT_ITEMS.contains(&symbol)
}

/// Whether `symbol` belongs to the safe set.
#[inline]
pub fn is_safe_item(symbol: &str) -> bool {
    SAFE_ITEMS.contains(&symbol)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_sets_disjoint() {
        for s in &SAFE_ITEMS {
            assert!(!is_threat_item(s), "{s} is in both sets");
        }
        for t in &THREAT_ITEMS {
            assert!(!is_safe_item(t), "{t} is in both sets");
        }
    }

    #[test]
    fn test_safe_set_large_enough() {
        assert!(MAX_SAFE_ITEMS <= SAFE_ITEMS.len());
        assert!(MIN_SAFE_ITEMS <= MAX_SAFE_ITEMS);
    }
}
