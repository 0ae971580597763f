//! # SkyGuard — Baggage Screening Experiment
//!
//! A simulated X-ray screening task that measures how fast and how accurately a
//! participant spots prohibited items, with and without a (scripted) AI advisor.
//!
//! ## Pipeline
//!
//! | Step | Rust module | Description |
//! |------|-------------|-------------|
//! | Generate | [`trial_generator`] | 4-8 distinct safe items, 30% chance of one threat, shuffled |
//! | Advise | [`advisor`] | Wizard-of-Oz classifier: ground truth flipped with probability 0.15 |
//! | Decide | [`session`] | Score the judgment, record reaction time, advance 10 rounds |
//! | Report | [`analytics`], [`export`] | Per-mode accuracy and reaction time, CSV dataset |
//! | Self-test | [`verification`] | 10,000 synthetic trials, accuracy must land in (84%, 86%) |
//!
//! ## Session lifecycle
//!
//! A [`session::Session`] is a three-phase state machine driven by
//! [`session::Event`]s:
//!
//! ```text
//! Menu ──Start(mode)──▶ ActiveTrial ──10th decision──▶ Complete ──ReturnToMenu──▶ Menu
//!   └──RunVerification──┘
//! ```
//!
//! Everything lives in memory for one participant; the only artifact that leaves
//! the process is the CSV export.

pub mod advisor;
pub mod analytics;
pub mod constants;
pub mod display;
pub mod env_config;
pub mod error;
pub mod export;
pub mod session;
pub mod trial_generator;
pub mod types;
pub mod verification;
