//! Participant session: scoring, history, and the Menu → ActiveTrial → Complete
//! state machine.
//!
//! The front end owns one [`Session`] and feeds it [`Event`]s. Every mutation
//! goes through `&mut self`, so there is exactly one writer and no locking.
//!
//! ## Invariants
//!
//! - A trial is current iff the phase is [`Phase::ActiveTrial`].
//! - `history().len() == rounds()` at all times.
//! - The session leaves `ActiveTrial` after exactly [`ROUNDS_PER_SESSION`] decisions.

use std::time::Instant;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use tracing::{debug, info};

use crate::advisor::advise;
use crate::constants::*;
use crate::error::SessionError;
use crate::trial_generator::generate_trial_at;
use crate::types::{DecisionRecord, Mode, Outcome, Trial};
use crate::verification::{run_default_verification, VerificationReport};

/// Session phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Phase {
    Menu,
    ActiveTrial,
    Complete,
}

/// Participant or developer action.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event {
    Start(Mode),
    RunVerification,
    ClearBag,
    ReportThreat,
    ReturnToMenu,
}

/// What an accepted event produced.
#[derive(Clone, Debug)]
pub enum Response {
    /// A session started; the first bag is current.
    Started,
    /// A decision was scored. `finished` is set on the last round.
    Decided {
        record: DecisionRecord,
        finished: bool,
    },
    Verified(VerificationReport),
    /// Back on the main menu.
    Menu,
}

/// Progress through the current session.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Progress {
    pub completed: usize,
    pub total: usize,
    pub fraction: f64,
    pub label: String,
}

pub struct Session {
    rng: SmallRng,
    seed: u64,
    phase: Phase,
    mode: Mode,
    score: u32,
    rounds: usize,
    current: Option<Trial>,
    history: Vec<DecisionRecord>,
    /// Records from earlier completed runs, shown on the menu.
    archive: Vec<DecisionRecord>,
}

impl Session {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
            seed,
            phase: Phase::Menu,
            mode: Mode::default(),
            score: 0,
            rounds: 0,
            current: None,
            history: Vec::with_capacity(ROUNDS_PER_SESSION),
            archive: Vec::new(),
        }
    }

    /// Session seeded from the OS entropy source.
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_active(&self) -> bool {
        self.phase == Phase::ActiveTrial
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn rounds(&self) -> usize {
        self.rounds
    }

    pub fn current_trial(&self) -> Option<&Trial> {
        self.current.as_ref()
    }

    pub fn history(&self) -> &[DecisionRecord] {
        &self.history
    }

    pub fn archive(&self) -> &[DecisionRecord] {
        &self.archive
    }

    /// Archived runs followed by the current run, in the order they were made.
    /// Feeds the results screen and the CSV export so both modes can be compared.
    pub fn all_records(&self) -> Vec<DecisionRecord> {
        self.archive.iter().chain(&self.history).cloned().collect()
    }

    pub fn progress(&self) -> Progress {
        let completed = self.rounds;
        let total = ROUNDS_PER_SESSION;
        Progress {
            completed,
            total,
            fraction: completed as f64 / total as f64,
            label: format!("Bag {}/{}", (completed + 1).min(total), total),
        }
    }

    /// Dispatch one event. Rejected events leave the session untouched.
    pub fn handle(&mut self, event: Event) -> Result<Response, SessionError> {
        self.handle_at(event, Instant::now())
    }

    /// [`Session::handle`] with an explicit clock reading.
    pub fn handle_at(&mut self, event: Event, now: Instant) -> Result<Response, SessionError> {
        match (self.phase, event) {
            (Phase::Menu, Event::Start(mode)) => {
                self.start_at(mode, now)?;
                Ok(Response::Started)
            }
            (Phase::Menu, Event::RunVerification) => {
                Ok(Response::Verified(self.run_verification()))
            }
            (Phase::ActiveTrial, Event::ClearBag) => self.decided(false, now),
            (Phase::ActiveTrial, Event::ReportThreat) => self.decided(true, now),
            (Phase::Complete, Event::ReturnToMenu) => {
                self.return_to_menu()?;
                Ok(Response::Menu)
            }
            (phase, event) => Err(SessionError::InvalidTransition { phase, event }),
        }
    }

    fn require_phase(&self, wanted: Phase, event: Event) -> Result<(), SessionError> {
        if self.phase == wanted {
            Ok(())
        } else {
            Err(SessionError::InvalidTransition {
                phase: self.phase,
                event,
            })
        }
    }

    fn decided(&mut self, reject: bool, now: Instant) -> Result<Response, SessionError> {
        let record = self.process_decision_at(reject, now)?;
        Ok(Response::Decided {
            record,
            finished: self.phase == Phase::Complete,
        })
    }

    /// Begin a fresh run in `mode` and show the first bag. Only valid on the menu.
    pub fn start(&mut self, mode: Mode) -> Result<(), SessionError> {
        self.start_at(mode, Instant::now())
    }

    pub fn start_at(&mut self, mode: Mode, now: Instant) -> Result<(), SessionError> {
        self.require_phase(Phase::Menu, Event::Start(mode))?;
        self.clear_run();
        self.mode = mode;
        self.phase = Phase::ActiveTrial;
        self.next_trial(now);
        info!(%mode, seed = self.seed, "session started");
        Ok(())
    }

    /// Score the participant's judgment on the current bag.
    pub fn process_decision(&mut self, reject: bool) -> Result<DecisionRecord, SessionError> {
        self.process_decision_at(reject, Instant::now())
    }

    /// [`Session::process_decision`] with an explicit clock reading. The next
    /// bag, if any, is stamped with `now`.
    pub fn process_decision_at(
        &mut self,
        reject: bool,
        now: Instant,
    ) -> Result<DecisionRecord, SessionError> {
        if self.phase != Phase::ActiveTrial {
            return Err(SessionError::NoActiveTrial);
        }
        let trial = self.current.take().ok_or(SessionError::NoActiveTrial)?;

        let elapsed = now.saturating_duration_since(trial.started_at);
        let time = round_to_hundredths(elapsed.as_secs_f64());
        let correct = reject == trial.has_threat;
        if correct {
            self.score += POINTS_PER_CORRECT;
        }

        let record = DecisionRecord {
            round: self.rounds + 1,
            mode: self.mode,
            threat: trial.has_threat,
            user_reject: reject,
            result: Outcome::from_correct(correct),
            time,
        };
        debug!(
            round = record.round,
            threat = record.threat,
            reject,
            correct,
            time,
            "decision"
        );
        self.history.push(record.clone());
        self.rounds += 1;

        if self.rounds < ROUNDS_PER_SESSION {
            self.next_trial(now);
        } else {
            self.phase = Phase::Complete;
            info!(mode = %self.mode, score = self.score, "session complete");
        }
        Ok(record)
    }

    /// Archive the finished run and return to the menu. Only valid once all
    /// rounds are done, so the archive never holds a partial run.
    pub fn return_to_menu(&mut self) -> Result<(), SessionError> {
        self.require_phase(Phase::Complete, Event::ReturnToMenu)?;
        self.archive.append(&mut self.history);
        self.clear_run();
        self.phase = Phase::Menu;
        Ok(())
    }

    /// Reset everything, archive included.
    pub fn reset(&mut self) {
        self.clear_run();
        self.archive.clear();
        self.mode = Mode::default();
        self.phase = Phase::Menu;
    }

    /// Run the self-test with a seed drawn from the session RNG.
    pub fn run_verification(&mut self) -> VerificationReport {
        let seed = self.rng.random();
        run_default_verification(seed)
    }

    fn clear_run(&mut self) {
        self.score = 0;
        self.rounds = 0;
        self.current = None;
        self.history.clear();
    }

    fn next_trial(&mut self, now: Instant) {
        let mut trial = generate_trial_at(&mut self.rng, now);
        if self.mode == Mode::AiAssist {
            trial.advice = Some(advise(trial.has_threat, &mut self.rng));
        }
        self.current = Some(trial);
    }
}

fn round_to_hundredths(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}
