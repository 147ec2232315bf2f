//! Strain scorer.
//!
//! Scoring projects one chemical profile into effect space (its alignment
//! vector) and takes the dot product with the requested intent. Terpene
//! percentages are used as raw multipliers, not normalized, so richer
//! profiles produce proportionally larger alignment magnitudes.

use serde::{Deserialize, Serialize};

use crate::effects::effects_of;
use crate::intent::{Dimension, IntentVector};
use crate::profile::{descending, ChemicalProfile, TerpeneReading};

/// CBD is scored per 10 wt%.
const CBD_UNIT: f64 = 10.0;
const CBD_ANTI_ANXIETY: f64 = 0.2;
const CBD_PAIN_RELIEF: f64 = 0.2;
const CBD_ENERGY_DAMPING: f64 = 0.1;

/// A profile scored against one intent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredItem {
    /// The scored profile.
    pub profile: ChemicalProfile,
    /// The profile's own effect signature.
    pub alignment: IntentVector,
    /// Unnormalized dot product of `alignment` and the intent.
    pub match_score: f64,
}

/// Accumulates the effect vector of a terpene list.
///
/// Unknown terpenes contribute nothing.
#[must_use]
pub fn terpene_alignment(terpenes: &[TerpeneReading]) -> IntentVector {
    let mut alignment = IntentVector::zero();
    for reading in terpenes {
        let Some(entry) = effects_of(&reading.name) else {
            continue;
        };
        for (dim, weight) in entry.effects.present() {
            *alignment.get_mut(dim) += weight * reading.percent;
        }
    }
    alignment
}

/// Computes a profile's alignment vector: terpene contributions plus the
/// additive CBD modifiers (calming, analgesic, mildly energy-dampening).
#[must_use]
pub fn alignment_of(profile: &ChemicalProfile) -> IntentVector {
    let mut alignment = terpene_alignment(&profile.terpenes);

    let cbd_units = profile.cannabinoids.cbd / CBD_UNIT;
    *alignment.get_mut(Dimension::AntiAnxiety) += cbd_units * CBD_ANTI_ANXIETY;
    *alignment.get_mut(Dimension::PainRelief) += cbd_units * CBD_PAIN_RELIEF;
    *alignment.get_mut(Dimension::Energy) -= cbd_units * CBD_ENERGY_DAMPING;

    alignment
}

/// Scores one profile against an intent.
///
/// Pure: the result depends only on the arguments.
///
/// # Examples
///
/// ```
/// use blendmatch::{score, ChemicalProfile, IntentVector};
///
/// let item = ChemicalProfile::builder()
///     .name("Couch Lock")
///     .terpene("Myrcene", 1.0)
///     .build()
///     .unwrap();
/// let intent = IntentVector::new(1.0, 0.0, 0.0, 0.0, 0.0, 0.0);
/// let scored = score(&item, &intent);
/// assert!((scored.match_score - 0.8).abs() < 1e-9);
/// ```
#[must_use]
pub fn score(item: &ChemicalProfile, intent: &IntentVector) -> ScoredItem {
    let alignment = alignment_of(item);
    let match_score = alignment.dot(intent);
    ScoredItem {
        profile: item.clone(),
        alignment,
        match_score,
    }
}

/// Scores every profile against the same intent, preserving input order.
#[must_use]
pub fn score_all(items: &[ChemicalProfile], intent: &IntentVector) -> Vec<ScoredItem> {
    items.iter().map(|item| score(item, intent)).collect()
}

/// Orders scored items best-first by match score.
///
/// The sort is stable, so equal scores keep inventory order. NaN scores
/// sort last.
#[must_use]
pub fn rank(mut scored: Vec<ScoredItem>) -> Vec<ScoredItem> {
    scored.sort_by(|a, b| descending(a.match_score, b.match_score));
    scored
}
