//! Chemical profiles (COA records).
//!
//! A profile is the lab-tested composition of one inventory item:
//! four cannabinoids plus an ordered terpene list. Profiles are immutable
//! for the duration of a scoring pass.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationError;

/// Namespace for deriving stable profile IDs from host record IDs.
const PROFILE_NAMESPACE: Uuid = Uuid::from_u128(0x6b1f_2c9e_8a44_4d0b_9f3e_5c71_a2d8_e610);

/// Stable identifier of a chemical profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProfileId(Uuid);

impl ProfileId {
    /// Derives the ID for a host record ID. The same input always maps to
    /// the same ID, so re-ingesting a COA does not change its identity.
    #[must_use]
    pub fn from_external(external_id: &str) -> Self {
        Self(Uuid::new_v5(&PROFILE_NAMESPACE, external_id.as_bytes()))
    }
}

impl fmt::Display for ProfileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Cannabinoid content in weight percent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Cannabinoids {
    /// THC wt%.
    pub thc: f64,
    /// CBD wt%.
    pub cbd: f64,
    /// CBN wt%.
    pub cbn: f64,
    /// CBG wt%.
    pub cbg: f64,
}

/// One measured terpene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TerpeneReading {
    /// Terpene name (canonical spelling once adapted).
    pub name: String,
    /// Weight percent.
    pub percent: f64,
}

impl TerpeneReading {
    /// Creates a reading.
    #[must_use]
    pub fn new(name: impl Into<String>, percent: f64) -> Self {
        Self {
            name: name.into(),
            percent,
        }
    }
}

/// A lab-tested chemical profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChemicalProfile {
    /// Stable identifier.
    pub id: ProfileId,
    /// Display name.
    pub name: String,
    /// Lab batch identifier.
    pub batch_id: String,
    /// Cannabinoid content.
    pub cannabinoids: Cannabinoids,
    /// Terpene readings, in report order.
    pub terpenes: Vec<TerpeneReading>,
    /// Sum of terpene percentages.
    pub total_terpene_percent: f64,
}

impl ChemicalProfile {
    /// Creates a builder.
    #[must_use]
    pub fn builder() -> ChemicalProfileBuilder {
        ChemicalProfileBuilder::default()
    }

    /// The `n` most prevalent terpenes, highest first. Ties keep report order
    /// and NaN readings sort last.
    #[must_use]
    pub fn top_terpenes(&self, n: usize) -> Vec<TerpeneReading> {
        let mut sorted: Vec<&TerpeneReading> = self.terpenes.iter().collect();
        sorted.sort_by(|a, b| descending(a.percent, b.percent));
        sorted.into_iter().take(n).cloned().collect()
    }

    /// The single most prevalent terpene.
    #[must_use]
    pub fn dominant_terpene(&self) -> Option<&TerpeneReading> {
        self.terpenes.iter().fold(None, |best, t| match best {
            Some(b) if b.percent >= t.percent => Some(b),
            _ => Some(t),
        })
    }
}

/// Highest-first order for measured values. NaN sorts after every number.
pub(crate) fn descending(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => b.total_cmp(&a),
    }
}

/// Builder for [`ChemicalProfile`].
///
/// # Example
/// ```
/// use blendmatch::ChemicalProfile;
///
/// let profile = ChemicalProfile::builder()
///     .external_id("coa-118")
///     .name("Blue Dream")
///     .batch_id("B-2291")
///     .thc(19.5)
///     .cbd(0.4)
///     .terpene("Myrcene", 0.9)
///     .terpene("Pinene", 0.4)
///     .build()
///     .unwrap();
/// assert!((profile.total_terpene_percent - 1.3).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ChemicalProfileBuilder {
    id: Option<ProfileId>,
    name: Option<String>,
    batch_id: Option<String>,
    cannabinoids: Cannabinoids,
    terpenes: Vec<TerpeneReading>,
    total_terpene_percent: Option<f64>,
}

impl ChemicalProfileBuilder {
    /// Derives the ID from a host record ID.
    #[must_use]
    pub fn external_id(mut self, external_id: &str) -> Self {
        self.id = Some(ProfileId::from_external(external_id));
        self
    }

    /// Sets the display name.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the batch ID.
    #[must_use]
    pub fn batch_id(mut self, batch_id: impl Into<String>) -> Self {
        self.batch_id = Some(batch_id.into());
        self
    }

    /// Sets all cannabinoids.
    #[must_use]
    pub fn cannabinoids(mut self, cannabinoids: Cannabinoids) -> Self {
        self.cannabinoids = cannabinoids;
        self
    }

    /// Sets THC wt%.
    #[must_use]
    pub fn thc(mut self, thc: f64) -> Self {
        self.cannabinoids.thc = thc;
        self
    }

    /// Sets CBD wt%.
    #[must_use]
    pub fn cbd(mut self, cbd: f64) -> Self {
        self.cannabinoids.cbd = cbd;
        self
    }

    /// Appends a terpene reading.
    #[must_use]
    pub fn terpene(mut self, name: impl Into<String>, percent: f64) -> Self {
        self.terpenes.push(TerpeneReading::new(name, percent));
        self
    }

    /// Replaces the terpene list.
    #[must_use]
    pub fn terpenes(mut self, terpenes: Vec<TerpeneReading>) -> Self {
        self.terpenes = terpenes;
        self
    }

    /// Overrides the reported terpene total (otherwise summed).
    #[must_use]
    pub fn total_terpene_percent(mut self, total: f64) -> Self {
        self.total_terpene_percent = Some(total);
        self
    }

    /// Builds the profile.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::EmptyProfileName` if the name is missing or blank.
    pub fn build(self) -> Result<ChemicalProfile, ValidationError> {
        let name = self
            .name
            .filter(|n| !n.trim().is_empty())
            .ok_or(ValidationError::EmptyProfileName)?;
        let id = self.id.unwrap_or_else(|| ProfileId::from_external(&name));
        let total = self
            .total_terpene_percent
            .unwrap_or_else(|| self.terpenes.iter().map(|t| t.percent).sum());

        Ok(ChemicalProfile {
            id,
            name,
            batch_id: self.batch_id.unwrap_or_default(),
            cannabinoids: self.cannabinoids,
            terpenes: self.terpenes,
            total_terpene_percent: total,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ChemicalProfile {
        ChemicalProfile::builder()
            .name("Sample")
            .terpene("Pinene", 0.3)
            .terpene("Myrcene", 1.1)
            .terpene("Limonene", 0.3)
            .terpene("Linalool", 0.6)
            .build()
            .unwrap()
    }

    #[test]
    fn test_profile_id_is_stable() {
        assert_eq!(ProfileId::from_external("coa-1"), ProfileId::from_external("coa-1"));
        assert_ne!(ProfileId::from_external("coa-1"), ProfileId::from_external("coa-2"));
    }

    #[test]
    fn test_builder_requires_name() {
        assert!(matches!(
            ChemicalProfile::builder().build(),
            Err(ValidationError::EmptyProfileName)
        ));
        assert!(ChemicalProfile::builder().name("  ").build().is_err());
    }

    #[test]
    fn test_total_is_summed_unless_overridden() {
        let p = sample();
        assert!((p.total_terpene_percent - 2.3).abs() < 1e-9);

        let p = ChemicalProfile::builder()
            .name("X")
            .terpene("Myrcene", 1.0)
            .total_terpene_percent(2.5)
            .build()
            .unwrap();
        assert!((p.total_terpene_percent - 2.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_top_terpenes_orders_and_keeps_ties_stable() {
        let top = sample().top_terpenes(3);
        let names: Vec<&str> = top.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["Myrcene", "Linalool", "Pinene"]);
    }

    #[test]
    fn test_top_terpenes_short_list() {
        let p = ChemicalProfile::builder().name("Empty").build().unwrap();
        assert!(p.top_terpenes(3).is_empty());
        assert!(p.dominant_terpene().is_none());
    }

    #[test]
    fn test_top_terpenes_puts_nan_last() {
        let p = ChemicalProfile::builder()
            .name("Noisy")
            .terpene("Pinene", f64::NAN)
            .terpene("Myrcene", 0.4)
            .terpene("Limonene", 0.9)
            .build()
            .unwrap();
        let names: Vec<String> = p.top_terpenes(3).into_iter().map(|t| t.name).collect();
        assert_eq!(names, vec!["Limonene", "Myrcene", "Pinene"]);
    }

    #[test]
    fn test_descending_is_total() {
        assert_eq!(descending(2.0, 1.0), Ordering::Less);
        assert_eq!(descending(f64::NAN, 1.0), Ordering::Greater);
        assert_eq!(descending(f64::NAN, f64::NAN), Ordering::Equal);
        assert_eq!(descending(-0.0, 0.0), Ordering::Greater);
    }

    #[test]
    fn test_dominant_terpene() {
        assert_eq!(sample().dominant_terpene().map(|t| t.name.as_str()), Some("Myrcene"));
    }
}
