//! Core data structures: experimental mode, trial, advisor output, and the
//! per-decision record.
//!
//! [`Trial`] is produced by [`crate::trial_generator`] and is read-only once
//! created. [`DecisionRecord`] is produced by [`crate::session::Session`] and is
//! appended to the history, never mutated.

use std::fmt;
use std::time::Instant;

use serde::Serialize;

/// Experimental protocol for a session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Mode {
    #[default]
    Manual,
    #[serde(rename = "AI_Assist")]
    AiAssist,
}

impl Mode {
    /// Both modes, in display order.
    pub const ALL: [Mode; 2] = [Mode::Manual, Mode::AiAssist];

    /// Label used in exports and charts.
    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Manual => "Manual",
            Mode::AiAssist => "AI_Assist",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the advisor claims about a bag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Prediction {
    Threat,
    Clear,
}

impl Prediction {
    pub fn from_threat(threat: bool) -> Self {
        if threat {
            Prediction::Threat
        } else {
            Prediction::Clear
        }
    }

    pub fn is_threat(self) -> bool {
        matches!(self, Prediction::Threat)
    }

    pub fn inverted(self) -> Self {
        match self {
            Prediction::Threat => Prediction::Clear,
            Prediction::Clear => Prediction::Threat,
        }
    }
}

/// One advisor output: the claim plus a displayed confidence (80-99%).
///
/// The confidence is cosmetic; it is drawn independently of whether the
/// prediction is right.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Advice {
    pub prediction: Prediction,
    pub confidence: u8,
}

/// A generated bag.
#[derive(Clone, Debug)]
pub struct Trial {
    /// Displayed items, in display order.
    pub items: Vec<&'static str>,
    /// Ground truth: a threat item is present.
    pub has_threat: bool,
    /// When the bag was shown; reaction time is measured from here.
    pub started_at: Instant,
    /// Advisor output, present only in AI-assisted sessions.
    pub advice: Option<Advice>,
}

impl Trial {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Scored outcome of a single decision.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Outcome {
    Correct,
    Error,
}

impl Outcome {
    pub const ALL: [Outcome; 2] = [Outcome::Correct, Outcome::Error];

    pub fn from_correct(correct: bool) -> Self {
        if correct {
            Outcome::Correct
        } else {
            Outcome::Error
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Outcome::Correct => "CORRECT",
            Outcome::Error => "ERROR",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of the participant history. Field names match the CSV columns.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DecisionRecord {
    /// 1-based round index.
    #[serde(rename = "Round")]
    pub round: usize,
    #[serde(rename = "Mode")]
    pub mode: Mode,
    /// Ground truth of the trial.
    #[serde(rename = "Threat")]
    pub threat: bool,
    /// Participant pressed "report threat".
    #[serde(rename = "User_Reject")]
    pub user_reject: bool,
    #[serde(rename = "Result")]
    pub result: Outcome,
    /// Reaction time in seconds, rounded to 2 decimals.
    #[serde(rename = "Time")]
    pub time: f64,
}

impl DecisionRecord {
    pub fn is_correct(&self) -> bool {
        self.result == Outcome::Correct
    }
}
