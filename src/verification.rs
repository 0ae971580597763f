//! Monte Carlo self-test for the random parameters.
//!
//! Generates N synthetic trials (ground truth + advisor claim) with the same
//! probabilities the live session uses, then checks that observed advisor
//! accuracy lands strictly inside the (84%, 86%) band around the 85% design
//! value. With N = 10,000 the standard error of the accuracy is ~0.36 points,
//! so a correct configuration fails about once in 200 seeds.
//!
//! Each synthetic trial gets its own `SmallRng` seeded with `seed + i`, so a
//! run is reproducible and independent of the rayon thread count.

use std::time::{Duration, Instant};

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use serde::Serialize;
use tracing::{info, warn};

use crate::advisor::predict;
use crate::constants::*;
use crate::error::VerificationError;
use crate::types::Prediction;

/// Harness parameters. [`Default`] matches the live experiment.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct VerificationConfig {
    pub trials: usize,
    pub threat_probability: f64,
    pub advisor_error_probability: f64,
    /// Exclusive lower bound on accuracy, percent.
    pub accuracy_low: f64,
    /// Exclusive upper bound on accuracy, percent.
    pub accuracy_high: f64,
}

impl Default for VerificationConfig {
    fn default() -> Self {
        Self {
            trials: VERIFICATION_TRIALS,
            threat_probability: THREAT_PROBABILITY,
            advisor_error_probability: ADVISOR_ERROR_PROBABILITY,
            accuracy_low: VERIFICATION_ACCURACY_LOW,
            accuracy_high: VERIFICATION_ACCURACY_HIGH,
        }
    }
}

impl VerificationConfig {
    pub fn with_trials(trials: usize) -> Self {
        Self {
            trials,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), VerificationError> {
        if self.trials == 0 {
            return Err(VerificationError::NoTrials);
        }
        for (name, value) in [
            ("threat_probability", self.threat_probability),
            ("advisor_error_probability", self.advisor_error_probability),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(VerificationError::InvalidProbability { name, value });
            }
        }
        Ok(())
    }
}

/// One row of the verification log.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct SyntheticTrial {
    pub ground_truth: bool,
    pub advice: Prediction,
    pub correct: bool,
}

/// Summary of one harness run.
#[derive(Clone, Debug, Serialize)]
pub struct VerificationReport {
    pub config: VerificationConfig,
    pub seed: u64,
    pub trials: usize,
    pub correct: usize,
    pub threats: usize,
    /// Percent of synthetic trials where the advisor matched the ground truth.
    pub observed_accuracy: f64,
    /// Percent of synthetic trials containing a threat.
    pub observed_threat_rate: f64,
    pub passed: bool,
    #[serde(serialize_with = "serialize_millis")]
    pub elapsed: Duration,
}

fn serialize_millis<S: serde::Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_f64(d.as_secs_f64() * 1000.0)
}

impl VerificationReport {
    pub fn status(&self) -> &'static str {
        if self.passed {
            "PASS"
        } else {
            "FAIL"
        }
    }

    /// Multi-line, human-readable summary.
    pub fn summary(&self) -> String {
        format!(
            "Verification ({} synthetic trials, seed {})\n  \
             Advisor accuracy: {:.2}% (target {:.0}%, band {:.0}-{:.0}%)\n  \
             Threat rate:      {:.2}% (target {:.0}%)\n  \
             Result:           {}",
            self.trials,
            self.seed,
            self.observed_accuracy,
            (1.0 - self.config.advisor_error_probability) * 100.0,
            self.config.accuracy_low,
            self.config.accuracy_high,
            self.observed_threat_rate,
            self.config.threat_probability * 100.0,
            self.status(),
        )
    }
}

/// Draw a single synthetic trial.
#[inline]
pub fn synthetic_trial<R: Rng + ?Sized>(config: &VerificationConfig, rng: &mut R) -> SyntheticTrial {
    let ground_truth = rng.random_bool(config.threat_probability);
    let advice = predict(ground_truth, config.advisor_error_probability, rng);
    SyntheticTrial {
        ground_truth,
        advice,
        correct: advice.is_threat() == ground_truth,
    }
}

/// Generate the full verification log in parallel.
pub fn generate_log(config: &VerificationConfig, seed: u64) -> Vec<SyntheticTrial> {
    (0..config.trials)
        .into_par_iter()
        .map(|i| {
            let mut rng = SmallRng::seed_from_u64(seed.wrapping_add(i as u64));
            synthetic_trial(config, &mut rng)
        })
        .collect()
}

/// Aggregate a verification log against `config`'s band.
pub fn summarize(
    config: &VerificationConfig,
    seed: u64,
    log: &[SyntheticTrial],
    elapsed: Duration,
) -> VerificationReport {
    let trials = log.len();
    let correct = log.iter().filter(|t| t.correct).count();
    let threats = log.iter().filter(|t| t.ground_truth).count();
    let pct = |k: usize| {
        if trials == 0 {
            0.0
        } else {
            k as f64 * 100.0 / trials as f64
        }
    };
    let observed_accuracy = pct(correct);
    let observed_threat_rate = pct(threats);
    let passed = trials > 0
        && observed_accuracy > config.accuracy_low
        && observed_accuracy < config.accuracy_high;

    VerificationReport {
        config: *config,
        seed,
        trials,
        correct,
        threats,
        observed_accuracy,
        observed_threat_rate,
        passed,
        elapsed,
    }
}

/// Run the harness to completion and report. Blocks until every trial is drawn.
pub fn run_verification(
    config: &VerificationConfig,
    seed: u64,
) -> Result<VerificationReport, VerificationError> {
    config.validate()?;
    Ok(execute(config, seed))
}

/// Run the harness with the experiment's default parameters.
pub fn run_default_verification(seed: u64) -> VerificationReport {
    execute(&VerificationConfig::default(), seed)
}

fn execute(config: &VerificationConfig, seed: u64) -> VerificationReport {
    let start = Instant::now();
    let log = generate_log(config, seed);
    let report = summarize(config, seed, &log, start.elapsed());

    if report.passed {
        info!(
            trials = report.trials,
            accuracy = report.observed_accuracy,
            threat_rate = report.observed_threat_rate,
            "verification passed"
        );
    } else {
        warn!(
            trials = report.trials,
            accuracy = report.observed_accuracy,
            low = config.accuracy_low,
            high = config.accuracy_high,
            "verification failed: advisor accuracy outside band"
        );
    }
    report
}
