//! Bag generation.
//!
//! A bag holds 4-8 distinct safe items. With probability
//! [`THREAT_PROBABILITY`] one threat item is appended, then the whole sequence
//! is shuffled so the threat position carries no information.

use std::time::Instant;

use rand::seq::{IndexedRandom, SliceRandom};
use rand::Rng;
use tracing::debug;

pub use crate::constants::is_threat_item;
use crate::constants::*;
use crate::types::Trial;

/// Generate a bag stamped with the current time.
pub fn generate_trial<R: Rng + ?Sized>(rng: &mut R) -> Trial {
    generate_trial_at(rng, Instant::now())
}

/// Generate a bag stamped with `started_at`.
pub fn generate_trial_at<R: Rng + ?Sized>(rng: &mut R, started_at: Instant) -> Trial {
    let (items, has_threat) = draw_items(rng);
    debug!(items = items.len(), has_threat, "generated trial");
    Trial {
        items,
        has_threat,
        started_at,
        advice: None,
    }
}

/// Draw the item sequence and its ground truth.
pub fn draw_items<R: Rng + ?Sized>(rng: &mut R) -> (Vec<&'static str>, bool) {
    let k = rng.random_range(MIN_SAFE_ITEMS..=MAX_SAFE_ITEMS);
    let mut items: Vec<&'static str> = SAFE_ITEMS.choose_multiple(rng, k).copied().collect();

    let has_threat = rng.random_bool(THREAT_PROBABILITY);
    if has_threat {
        // THREAT_ITEMS is non-empty
        if let Some(&threat) = THREAT_ITEMS.choose(rng) {
            items.push(threat);
        }
    }

    items.shuffle(rng);
    (items, has_threat)
}
