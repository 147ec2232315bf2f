//! Blend types.
//!
//! A blend is exactly three components in fixed roles: the Driver sets
//! the character (50%), the Modulator shapes it (30%) and the Anchor
//! rounds it out (20%).

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::intent::IntentVector;
use crate::profile::{ProfileId, TerpeneReading};

/// Role of a component inside a blend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlendRole {
    /// Primary contributor, 50%.
    Driver,
    /// Secondary contributor, 30%.
    Modulator,
    /// Supporting contributor, 20%.
    Anchor,
}

impl BlendRole {
    /// Roles in assignment order.
    pub const ALL: [Self; 3] = [Self::Driver, Self::Modulator, Self::Anchor];

    /// Fixed share of the blend, in percent.
    #[must_use]
    pub const fn percentage(self) -> u8 {
        match self {
            Self::Driver => 50,
            Self::Modulator => 30,
            Self::Anchor => 20,
        }
    }

    /// Short description used in rationales.
    #[must_use]
    pub const fn duty(self) -> &'static str {
        match self {
            Self::Driver => "sets the core effect",
            Self::Modulator => "shapes and balances the driver",
            Self::Anchor => "grounds and extends the finish",
        }
    }
}

impl fmt::Display for BlendRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Driver => write!(f, "Driver"),
            Self::Modulator => write!(f, "Modulator"),
            Self::Anchor => write!(f, "Anchor"),
        }
    }
}

/// Numeric blend identifier (1-based slot number).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlendId(pub u32);

impl fmt::Display for BlendId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One component of a blend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlendComponent {
    /// Role in the blend.
    pub role: BlendRole,
    /// Contributing profile.
    pub profile_id: ProfileId,
    /// Contributing profile's display name.
    pub name: String,
    /// Share of the blend.
    pub percentage: u8,
    /// Most prevalent terpenes of the contributing profile.
    pub top_terpenes: Vec<TerpeneReading>,
    /// Human-readable reason for inclusion.
    pub rationale: String,
}

/// A three-component blend recommendation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlendCandidate {
    /// Slot identifier.
    pub id: BlendId,
    /// Display name.
    pub name: String,
    /// Short vibe description.
    pub vibe: String,
    /// Confidence range label, e.g. `"92-97%"`.
    pub confidence_range: String,
    /// Driver, Modulator, Anchor.
    pub components: [BlendComponent; 3],
    /// Nominal effect signature (the Driver's alignment vector).
    pub targets: IntentVector,
}

impl BlendCandidate {
    /// Creates a blend, checking the role and percentage invariants.
    ///
    /// # Errors
    ///
    /// - `ValidationError::DuplicateRole` if a role appears twice.
    /// - `ValidationError::PercentageSum` if percentages do not sum to 100.
    /// - `ValidationError::RoleShare` if a role does not hold its fixed share.
    pub fn new(
        id: BlendId,
        name: impl Into<String>,
        vibe: impl Into<String>,
        confidence_range: impl Into<String>,
        components: [BlendComponent; 3],
        targets: IntentVector,
    ) -> Result<Self, ValidationError> {
        validate_components(&components)?;
        Ok(Self {
            id,
            name: name.into(),
            vibe: vibe.into(),
            confidence_range: confidence_range.into(),
            components,
            targets,
        })
    }

    /// Looks up the component holding `role`.
    #[must_use]
    pub fn component(&self, role: BlendRole) -> Option<&BlendComponent> {
        self.components.iter().find(|c| c.role == role)
    }

    /// The Driver component.
    #[must_use]
    pub fn driver(&self) -> &BlendComponent {
        // Roles are validated unique, so all three are present.
        self.component(BlendRole::Driver)
            .unwrap_or(&self.components[0])
    }

    /// Sum of component percentages.
    #[must_use]
    pub fn total_percentage(&self) -> u32 {
        self.components.iter().map(|c| u32::from(c.percentage)).sum()
    }

    /// Distinct terpene names across all components, in first-seen order.
    #[must_use]
    pub fn terpene_names(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.components
            .iter()
            .flat_map(|c| c.top_terpenes.iter())
            .map(|t| t.name.as_str())
            .filter(|name| seen.insert(*name))
            .collect()
    }
}

fn validate_components(components: &[BlendComponent]) -> Result<(), ValidationError> {
    if components.len() != BlendRole::ALL.len() {
        return Err(ValidationError::ComponentCount {
            expected: BlendRole::ALL.len(),
            actual: components.len(),
        });
    }

    let mut roles = HashSet::with_capacity(components.len());
    for c in components {
        if !roles.insert(c.role) {
            return Err(ValidationError::DuplicateRole {
                role: c.role.to_string(),
            });
        }
    }

    let total: u32 = components.iter().map(|c| u32::from(c.percentage)).sum();
    if total != 100 {
        return Err(ValidationError::PercentageSum { total });
    }

    if let Some(c) = components.iter().find(|c| c.percentage != c.role.percentage()) {
        return Err(ValidationError::RoleShare {
            role: c.role.to_string(),
            expected: c.role.percentage(),
            actual: c.percentage,
        });
    }
    Ok(())
}

#[derive(Deserialize)]
struct RawBlendCandidate {
    id: BlendId,
    name: String,
    vibe: String,
    confidence_range: String,
    components: Vec<BlendComponent>,
    targets: IntentVector,
}

impl<'de> Deserialize<'de> for BlendCandidate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = RawBlendCandidate::deserialize(deserializer)?;
        validate_components(&raw.components).map_err(serde::de::Error::custom)?;
        let components: [BlendComponent; 3] = raw
            .components
            .try_into()
            .map_err(|_| serde::de::Error::custom("blend must have exactly 3 components"))?;
        Ok(Self {
            id: raw.id,
            name: raw.name,
            vibe: raw.vibe,
            confidence_range: raw.confidence_range,
            components,
            targets: raw.targets,
        })
    }
}
