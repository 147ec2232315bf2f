//! Intent vectors.
//!
//! An intent vector is a six-dimensional desired-effect profile. The same
//! shape doubles as an *alignment vector*: the effect profile of an item
//! or a blend, compared against an intent by dot product or cosine.

use std::fmt;
use std::ops::Sub;

use serde::{Deserialize, Serialize};

/// One of the six effect dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    /// Physical and mental relaxation.
    Relaxation,
    /// Mental clarity and concentration.
    Focus,
    /// Uplift and alertness.
    Energy,
    /// Divergent, creative thinking.
    Creativity,
    /// Analgesic effect.
    PainRelief,
    /// Anxiety reduction.
    AntiAnxiety,
}

impl Dimension {
    /// All dimensions in canonical order.
    pub const ALL: [Self; 6] = [
        Self::Relaxation,
        Self::Focus,
        Self::Energy,
        Self::Creativity,
        Self::PainRelief,
        Self::AntiAnxiety,
    ];

    /// The serialized key for this dimension.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Relaxation => "relaxation",
            Self::Focus => "focus",
            Self::Energy => "energy",
            Self::Creativity => "creativity",
            Self::PainRelief => "pain_relief",
            Self::AntiAnxiety => "anti_anxiety",
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// A six-dimensional effect profile.
///
/// Values are nominally in `[0.0, 1.0]` for intents; alignment vectors are
/// unbounded (they scale with terpene concentration). No range is enforced.
///
/// # Examples
///
/// ```
/// use blendmatch::{Dimension, IntentVector};
///
/// let intent = IntentVector::zero()
///     .with(Dimension::Relaxation, 0.9)
///     .with(Dimension::AntiAnxiety, 0.8);
/// assert_eq!(intent.get(Dimension::Focus), 0.0);
/// assert!((intent.dot(&intent) - 1.45).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct IntentVector {
    /// Desired relaxation.
    pub relaxation: f64,
    /// Desired focus.
    pub focus: f64,
    /// Desired energy.
    pub energy: f64,
    /// Desired creativity.
    pub creativity: f64,
    /// Desired pain relief.
    pub pain_relief: f64,
    /// Desired anxiety reduction.
    pub anti_anxiety: f64,
}

impl IntentVector {
    /// Creates an intent from the six values in canonical order.
    #[must_use]
    pub const fn new(
        relaxation: f64,
        focus: f64,
        energy: f64,
        creativity: f64,
        pain_relief: f64,
        anti_anxiety: f64,
    ) -> Self {
        Self {
            relaxation,
            focus,
            energy,
            creativity,
            pain_relief,
            anti_anxiety,
        }
    }

    /// The all-zero vector.
    #[must_use]
    pub const fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0, 0.0, 0.0, 0.0)
    }

    /// Every dimension set to `value`.
    #[must_use]
    pub const fn splat(value: f64) -> Self {
        Self::new(value, value, value, value, value, value)
    }

    /// Reads one dimension.
    #[must_use]
    pub const fn get(&self, dim: Dimension) -> f64 {
        match dim {
            Dimension::Relaxation => self.relaxation,
            Dimension::Focus => self.focus,
            Dimension::Energy => self.energy,
            Dimension::Creativity => self.creativity,
            Dimension::PainRelief => self.pain_relief,
            Dimension::AntiAnxiety => self.anti_anxiety,
        }
    }

    /// Mutable access to one dimension.
    pub fn get_mut(&mut self, dim: Dimension) -> &mut f64 {
        match dim {
            Dimension::Relaxation => &mut self.relaxation,
            Dimension::Focus => &mut self.focus,
            Dimension::Energy => &mut self.energy,
            Dimension::Creativity => &mut self.creativity,
            Dimension::PainRelief => &mut self.pain_relief,
            Dimension::AntiAnxiety => &mut self.anti_anxiety,
        }
    }

    /// Returns a copy with one dimension replaced.
    #[must_use]
    pub fn with(mut self, dim: Dimension, value: f64) -> Self {
        *self.get_mut(dim) = value;
        self
    }

    /// Unnormalized dot product.
    #[must_use]
    pub fn dot(&self, other: &Self) -> f64 {
        Dimension::ALL
            .iter()
            .map(|&d| self.get(d) * other.get(d))
            .sum()
    }

    /// Euclidean magnitude.
    #[must_use]
    pub fn magnitude(&self) -> f64 {
        self.dot(self).sqrt()
    }

    /// Cosine similarity in `[-1, 1]`, or `0.0` when either side has zero magnitude.
    #[must_use]
    pub fn cosine_similarity(&self, other: &Self) -> f64 {
        let denom = self.magnitude() * other.magnitude();
        if denom == 0.0 || !denom.is_finite() {
            return 0.0;
        }
        self.dot(other) / denom
    }

    /// Multiplies every dimension by `factor`.
    #[must_use]
    pub fn scaled(&self, factor: f64) -> Self {
        self.map(|v| v * factor)
    }

    /// Applies `f` to every dimension.
    #[must_use]
    pub fn map(&self, f: impl Fn(f64) -> f64) -> Self {
        let mut out = *self;
        for dim in Dimension::ALL {
            let v = out.get_mut(dim);
            *v = f(*v);
        }
        out
    }

    /// The dimension with the largest value (first wins on ties).
    #[must_use]
    pub fn dominant(&self) -> Dimension {
        let mut best = Dimension::Relaxation;
        for dim in Dimension::ALL {
            if self.get(dim) > self.get(best) {
                best = dim;
            }
        }
        best
    }
}

impl Sub for IntentVector {
    type Output = Self;

    fn sub(mut self, rhs: Self) -> Self {
        for dim in Dimension::ALL {
            *self.get_mut(dim) -= rhs.get(dim);
        }
        self
    }
}

impl fmt::Display for IntentVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "relax={:.2} focus={:.2} energy={:.2} create={:.2} pain={:.2} anxiety={:.2}",
            self.relaxation,
            self.focus,
            self.energy,
            self.creativity,
            self.pain_relief,
            self.anti_anxiety
        )
    }
}

/// An intent with possibly-missing dimensions.
///
/// Used both for effect-table entries (a missing dimension contributes
/// nothing) and for interpreter payloads (a missing dimension is filled
/// with the neutral midpoint, see [`crate::adapters::normalize_intent`]).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PartialIntent {
    /// Relaxation, if present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relaxation: Option<f64>,
    /// Focus, if present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub focus: Option<f64>,
    /// Energy, if present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub energy: Option<f64>,
    /// Creativity, if present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creativity: Option<f64>,
    /// Pain relief, if present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pain_relief: Option<f64>,
    /// Anxiety reduction, if present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anti_anxiety: Option<f64>,
}

impl PartialIntent {
    /// A partial intent with nothing set.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            relaxation: None,
            focus: None,
            energy: None,
            creativity: None,
            pain_relief: None,
            anti_anxiety: None,
        }
    }

    /// Reads one dimension, if present.
    #[must_use]
    pub const fn get(&self, dim: Dimension) -> Option<f64> {
        match dim {
            Dimension::Relaxation => self.relaxation,
            Dimension::Focus => self.focus,
            Dimension::Energy => self.energy,
            Dimension::Creativity => self.creativity,
            Dimension::PainRelief => self.pain_relief,
            Dimension::AntiAnxiety => self.anti_anxiety,
        }
    }

    /// Sets one dimension.
    #[must_use]
    pub fn with(mut self, dim: Dimension, value: f64) -> Self {
        let slot = match dim {
            Dimension::Relaxation => &mut self.relaxation,
            Dimension::Focus => &mut self.focus,
            Dimension::Energy => &mut self.energy,
            Dimension::Creativity => &mut self.creativity,
            Dimension::PainRelief => &mut self.pain_relief,
            Dimension::AntiAnxiety => &mut self.anti_anxiety,
        };
        *slot = Some(value);
        self
    }

    /// Iterates the dimensions that are present.
    pub fn present(&self) -> impl Iterator<Item = (Dimension, f64)> + '_ {
        Dimension::ALL
            .iter()
            .filter_map(move |&d| self.get(d).map(|v| (d, v)))
    }

    /// Fills every missing dimension with `default`.
    #[must_use]
    pub fn fill(&self, default: f64) -> IntentVector {
        let mut out = IntentVector::splat(default);
        for (dim, value) in self.present() {
            *out.get_mut(dim) = value;
        }
        out
    }
}

/// Quick-pick goals offered by the host application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntentPreset {
    /// Wind down for sleep.
    Sleep,
    /// Calm without sedation.
    Calm,
    /// Clear-headed concentration.
    Focus,
    /// Daytime uplift.
    Energize,
    /// Creative flow.
    Create,
    /// Body relief.
    Relief,
}

impl IntentPreset {
    /// All presets.
    pub const ALL: [Self; 6] = [
        Self::Sleep,
        Self::Calm,
        Self::Focus,
        Self::Energize,
        Self::Create,
        Self::Relief,
    ];

    /// The intent vector this preset stands for.
    #[must_use]
    pub const fn intent(self) -> IntentVector {
        match self {
            //                        relax focus energy create pain  anxiety
            Self::Sleep => IntentVector::new(0.95, 0.05, 0.0, 0.1, 0.4, 0.7),
            Self::Calm => IntentVector::new(0.7, 0.3, 0.2, 0.2, 0.2, 0.9),
            Self::Focus => IntentVector::new(0.2, 0.95, 0.5, 0.3, 0.1, 0.4),
            Self::Energize => IntentVector::new(0.1, 0.5, 0.95, 0.5, 0.1, 0.3),
            Self::Create => IntentVector::new(0.3, 0.4, 0.6, 0.95, 0.1, 0.3),
            Self::Relief => IntentVector::new(0.6, 0.2, 0.1, 0.1, 0.95, 0.5),
        }
    }

    /// Short label for display.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Sleep => "sleep",
            Self::Calm => "calm",
            Self::Focus => "focus",
            Self::Energize => "energize",
            Self::Create => "create",
            Self::Relief => "relief",
        }
    }
}

impl From<IntentPreset> for IntentVector {
    fn from(preset: IntentPreset) -> Self {
        preset.intent()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_and_with_cover_all_dimensions() {
        let mut v = IntentVector::zero();
        for (i, dim) in Dimension::ALL.iter().enumerate() {
            v = v.with(*dim, i as f64);
        }
        for (i, dim) in Dimension::ALL.iter().enumerate() {
            assert_eq!(v.get(*dim), i as f64);
        }
    }

    #[test]
    fn test_cosine_zero_magnitude_is_zero() {
        let v = IntentVector::splat(0.5);
        assert_eq!(IntentVector::zero().cosine_similarity(&v), 0.0);
        assert_eq!(v.cosine_similarity(&IntentVector::zero()), 0.0);
    }

    #[test]
    fn test_cosine_parallel_and_orthogonal() {
        let a = IntentVector::zero().with(Dimension::Focus, 2.0);
        let b = IntentVector::zero().with(Dimension::Focus, 0.3);
        let c = IntentVector::zero().with(Dimension::Energy, 1.0);
        assert!((a.cosine_similarity(&b) - 1.0).abs() < 1e-12);
        assert_eq!(a.cosine_similarity(&c), 0.0);
    }

    #[test]
    fn test_sub_and_scaled() {
        let a = IntentVector::splat(1.0);
        let b = IntentVector::splat(0.25);
        assert_eq!(a - b, IntentVector::splat(0.75));
        assert_eq!(b.scaled(4.0), a);
    }

    #[test]
    fn test_dominant_prefers_first_on_tie() {
        let v = IntentVector::new(0.5, 0.9, 0.9, 0.0, 0.0, 0.0);
        assert_eq!(v.dominant(), Dimension::Focus);
    }

    #[test]
    fn test_partial_fill() {
        let p = PartialIntent::empty().with(Dimension::Energy, 0.9);
        let v = p.fill(0.5);
        assert_eq!(v.energy, 0.9);
        assert_eq!(v.relaxation, 0.5);
        assert_eq!(v.anti_anxiety, 0.5);
    }

    #[test]
    fn test_serialized_keys() {
        let json = serde_json::to_value(IntentVector::splat(0.1)).unwrap();
        let obj = json.as_object().unwrap();
        let mut keys: Vec<&str> = obj.keys().map(String::as_str).collect();
        keys.sort_unstable();
        let mut expected: Vec<&str> = Dimension::ALL.iter().map(|d| d.key()).collect();
        expected.sort_unstable();
        assert_eq!(keys, expected);
    }

    #[test]
    fn test_presets_lead_with_their_goal() {
        assert_eq!(IntentPreset::Sleep.intent().dominant(), Dimension::Relaxation);
        assert_eq!(IntentPreset::Focus.intent().dominant(), Dimension::Focus);
        assert_eq!(IntentPreset::Energize.intent().dominant(), Dimension::Energy);
        assert_eq!(IntentPreset::Create.intent().dominant(), Dimension::Creativity);
        assert_eq!(IntentPreset::Relief.intent().dominant(), Dimension::PainRelief);
        assert_eq!(IntentPreset::Calm.intent().dominant(), Dimension::AntiAnxiety);
    }
}
