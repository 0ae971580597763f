//! Aggregates for the end-of-session summary and the menu's session analytics.
//!
//! All functions take any slice of [`DecisionRecord`]s (one run's history or
//! the archive of earlier runs). Empty input produces empty aggregates, which
//! the front end treats as "nothing to chart".

use serde::Serialize;

use crate::types::{DecisionRecord, Mode, Outcome};

// ── Top-level summary ───────────────────────────────────────────────

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct SessionAnalytics {
    pub decisions: usize,
    pub score: u32,
    /// Percent correct across all decisions, `None` when empty.
    pub overall_accuracy: Option<f64>,
    pub reaction_time_by_mode: Vec<ModeReactionTime>,
    pub reaction_time_by_mode_result: Vec<ModeResultReactionTime>,
    pub accuracy_by_mode: Vec<ModeAccuracy>,
}

impl SessionAnalytics {
    pub fn is_empty(&self) -> bool {
        self.decisions == 0
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ModeReactionTime {
    pub mode: Mode,
    pub count: usize,
    pub mean_seconds: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ModeResultReactionTime {
    pub mode: Mode,
    pub result: Outcome,
    pub count: usize,
    pub mean_seconds: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ModeAccuracy {
    pub mode: Mode,
    pub count: usize,
    pub accuracy_pct: f64,
}

// ── Aggregation ─────────────────────────────────────────────────────

fn mean_time<'a>(records: impl Iterator<Item = &'a DecisionRecord>) -> Option<(usize, f64)> {
    let (n, sum) = records.fold((0usize, 0.0f64), |(n, sum), r| (n + 1, sum + r.time));
    (n > 0).then(|| (n, sum / n as f64))
}

/// Mean reaction time per mode. Modes with no decisions are omitted.
pub fn reaction_time_by_mode(records: &[DecisionRecord]) -> Vec<ModeReactionTime> {
    Mode::ALL
        .iter()
        .filter_map(|&mode| {
            mean_time(records.iter().filter(|r| r.mode == mode)).map(|(count, mean_seconds)| {
                ModeReactionTime {
                    mode,
                    count,
                    mean_seconds,
                }
            })
        })
        .collect()
}

/// Mean reaction time per (mode, result) pair. Empty pairs are omitted.
pub fn reaction_time_by_mode_result(records: &[DecisionRecord]) -> Vec<ModeResultReactionTime> {
    let mut out = Vec::new();
    for &mode in &Mode::ALL {
        for &result in &Outcome::ALL {
            let group = records
                .iter()
                .filter(|r| r.mode == mode && r.result == result);
            if let Some((count, mean_seconds)) = mean_time(group) {
                out.push(ModeResultReactionTime {
                    mode,
                    result,
                    count,
                    mean_seconds,
                });
            }
        }
    }
    out
}

/// Percent correct per mode. Modes with no decisions are omitted.
pub fn accuracy_by_mode(records: &[DecisionRecord]) -> Vec<ModeAccuracy> {
    Mode::ALL
        .iter()
        .filter_map(|&mode| {
            let group: Vec<&DecisionRecord> = records.iter().filter(|r| r.mode == mode).collect();
            accuracy_pct(group.iter().copied()).map(|accuracy_pct| ModeAccuracy {
                mode,
                count: group.len(),
                accuracy_pct,
            })
        })
        .collect()
}

fn accuracy_pct<'a>(records: impl Iterator<Item = &'a DecisionRecord>) -> Option<f64> {
    let (n, correct) = records.fold((0usize, 0usize), |(n, c), r| {
        (n + 1, c + usize::from(r.is_correct()))
    });
    (n > 0).then(|| correct as f64 * 100.0 / n as f64)
}

/// Build the full summary for `records`.
pub fn aggregate(records: &[DecisionRecord], score: u32) -> SessionAnalytics {
    SessionAnalytics {
        decisions: records.len(),
        score,
        overall_accuracy: accuracy_pct(records.iter()),
        reaction_time_by_mode: reaction_time_by_mode(records),
        reaction_time_by_mode_result: reaction_time_by_mode_result(records),
        accuracy_by_mode: accuracy_by_mode(records),
    }
}
