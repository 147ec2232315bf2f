//! Confidence auditor.
//!
//! An audit checks a finished blend against the intent it was built for:
//!
//! - **alignment**: cosine similarity of the blend's targets and the intent, as 0-100.
//! - **stability**: how much alignment moves when each component is taken out.
//!   A blend where some component barely matters is structurally unstable.
//! - **conflicts**: known antagonisms between the requested outcome and the
//!   blend's terpenes (stimulants in a calm blend, sedatives in a focus blend).
//!
//! Audits are advisory. They never change the blend or its ranking.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::blend::{BlendCandidate, BlendComponent, BlendId, BlendRole};
use crate::config::AuditConfig;
use crate::effects::{canonical_name, lean_of, TerpeneLean};
use crate::intent::IntentVector;
use crate::scoring::terpene_alignment;

/// Kind of antagonism detected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictKind {
    /// Calm intent, stimulant-leaning terpenes.
    CalmVersusStimulant,
    /// Focus or energy intent, sedative-leaning terpenes.
    AlertVersusSedative,
}

impl fmt::Display for ConflictKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CalmVersusStimulant => write!(f, "calm_vs_stimulant"),
            Self::AlertVersusSedative => write!(f, "alert_vs_sedative"),
        }
    }
}

/// A detected contradiction between intent and composition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConflictFlag {
    /// Which rule fired.
    pub kind: ConflictKind,
    /// Offending terpenes (canonical names).
    pub terpenes: Vec<String>,
    /// Human-readable description.
    pub message: String,
}

/// Alignment sensitivity of one component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentSensitivity {
    /// The component's role.
    pub role: BlendRole,
    /// The component's profile name.
    pub name: String,
    /// Absolute change in alignment score when the component is removed.
    pub delta: f64,
}

/// Result of auditing one blend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceAudit {
    /// Audited blend.
    pub blend_id: BlendId,
    /// Cosine alignment, 0-100.
    pub alignment_score: f64,
    /// Counterfactual stability, 0-100.
    pub stability_score: f64,
    /// Component name to alignment delta.
    pub component_contributions: BTreeMap<String, f64>,
    /// Per-component deltas in role order.
    pub sensitivities: Vec<ComponentSensitivity>,
    /// True when `conflict_flags` is non-empty.
    pub has_conflicts: bool,
    /// Detected conflicts.
    pub conflict_flags: Vec<ConflictFlag>,
}

/// Cosine similarity of `targets` and `intent` scaled to `[0, 100]`.
///
/// Zero magnitude on either side yields `0.0`. Opposed vectors clamp to `0.0`.
#[must_use]
pub fn alignment_score(targets: &IntentVector, intent: &IntentVector) -> f64 {
    let score = targets.cosine_similarity(intent) * 100.0;
    if score.is_nan() {
        return 0.0;
    }
    score.clamp(0.0, 100.0)
}

/// Estimated effect vector of one component, from its listed terpenes.
fn component_effect(component: &BlendComponent) -> IntentVector {
    terpene_alignment(&component.top_terpenes)
}

/// Alignment delta for each component, in role order.
///
/// Removing component `i` with share `w` leaves the other two renormalized
/// to 100%. The counterfactual target is approximated as
/// `(targets - w * effect_i) / (1 - w)` rather than re-scored from raw
/// chemistry. Components holding the whole blend are skipped.
#[must_use]
pub fn component_sensitivities(
    blend: &BlendCandidate,
    intent: &IntentVector,
) -> Vec<ComponentSensitivity> {
    let baseline = alignment_score(&blend.targets, intent);

    blend
        .components
        .iter()
        .filter_map(|component| {
            let weight = f64::from(component.percentage) / 100.0;
            let remaining = 1.0 - weight;
            if remaining <= 0.0 {
                return None;
            }

            let removed = component_effect(component).scaled(weight);
            let counterfactual = (blend.targets - removed).scaled(1.0 / remaining);
            let delta = (alignment_score(&counterfactual, intent) - baseline).abs();

            Some(ComponentSensitivity {
                role: component.role,
                name: component.name.clone(),
                delta,
            })
        })
        .collect()
}

/// Mean sensitivity, capped when any component is negligible.
#[must_use]
pub fn stability_score(sensitivities: &[ComponentSensitivity], config: &AuditConfig) -> f64 {
    if sensitivities.is_empty() {
        return 0.0;
    }

    #[allow(clippy::cast_precision_loss)]
    let mean = sensitivities.iter().map(|s| s.delta).sum::<f64>() / sensitivities.len() as f64;
    let mut score = mean.clamp(0.0, 100.0);

    if sensitivities
        .iter()
        .any(|s| s.delta < config.negligible_delta)
    {
        score = score.min(config.unstable_cap);
    }
    score
}

/// Checks the blend's terpenes against the antagonism rules.
#[must_use]
pub fn detect_conflicts(
    blend: &BlendCandidate,
    intent: &IntentVector,
    config: &AuditConfig,
) -> Vec<ConflictFlag> {
    let threshold = config.intent_threshold;
    let terpenes = blend.terpene_names();
    let with_lean = |lean: TerpeneLean| -> Vec<String> {
        let mut found: Vec<String> = Vec::new();
        for name in &terpenes {
            if lean_of(name) == lean {
                let canonical = canonical_name(name);
                if !found.contains(&canonical) {
                    found.push(canonical);
                }
            }
        }
        found
    };

    let mut flags = Vec::new();

    if intent.relaxation >= threshold || intent.anti_anxiety >= threshold {
        let stimulants = with_lean(TerpeneLean::Stimulant);
        if !stimulants.is_empty() {
            flags.push(ConflictFlag {
                kind: ConflictKind::CalmVersusStimulant,
                message: format!(
                    "Calm intent conflicts with stimulating terpenes: {}",
                    stimulants.join(", ")
                ),
                terpenes: stimulants,
            });
        }
    }

    if intent.focus >= threshold || intent.energy >= threshold {
        let sedatives = with_lean(TerpeneLean::Sedative);
        if !sedatives.is_empty() {
            flags.push(ConflictFlag {
                kind: ConflictKind::AlertVersusSedative,
                message: format!(
                    "Focus/energy intent conflicts with sedating terpenes: {}",
                    sedatives.join(", ")
                ),
                terpenes: sedatives,
            });
        }
    }

    flags
}

/// Audits a blend with default thresholds.
#[must_use]
pub fn audit(blend: &BlendCandidate, intent: &IntentVector) -> ConfidenceAudit {
    audit_with(blend, intent, &AuditConfig::default())
}

/// Audits a blend with explicit thresholds.
#[must_use]
pub fn audit_with(
    blend: &BlendCandidate,
    intent: &IntentVector,
    config: &AuditConfig,
) -> ConfidenceAudit {
    let alignment = alignment_score(&blend.targets, intent);
    let sensitivities = component_sensitivities(blend, intent);
    let stability = stability_score(&sensitivities, config);

    // Names repeat only on degenerate inventories; the first role keeps its delta.
    let mut contributions = BTreeMap::new();
    for s in &sensitivities {
        contributions.entry(s.name.clone()).or_insert(s.delta);
    }

    let conflict_flags = detect_conflicts(blend, intent, config);
    if !conflict_flags.is_empty() {
        debug!(
            blend = %blend.id,
            conflicts = conflict_flags.len(),
            "blend conflicts with intent"
        );
    }

    ConfidenceAudit {
        blend_id: blend.id,
        alignment_score: alignment,
        stability_score: stability,
        component_contributions: contributions,
        sensitivities,
        has_conflicts: !conflict_flags.is_empty(),
        conflict_flags,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blend::tests::component;
    use crate::intent::Dimension;

    fn blend(parts: [BlendComponent; 3], targets: IntentVector) -> BlendCandidate {
        BlendCandidate::new(BlendId(1), "test", "vibe", "90-95%", parts, targets).unwrap()
    }

    fn calm() -> IntentVector {
        IntentVector::new(0.9, 0.1, 0.1, 0.1, 0.3, 0.9)
    }

    #[test]
    fn test_alignment_parallel_is_100() {
        let v = IntentVector::new(0.2, 0.4, 0.1, 0.0, 0.3, 0.5);
        assert!((alignment_score(&v.scaled(7.0), &v) - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_alignment_orthogonal_and_zero() {
        let a = IntentVector::zero().with(Dimension::Focus, 1.0);
        let b = IntentVector::zero().with(Dimension::Relaxation, 1.0);
        assert_eq!(alignment_score(&a, &b), 0.0);
        assert_eq!(alignment_score(&IntentVector::zero(), &b), 0.0);
    }

    #[test]
    fn test_alignment_opposed_clamps_to_zero() {
        let a = IntentVector::splat(1.0);
        assert_eq!(alignment_score(&a.scaled(-1.0), &a), 0.0);
    }

    #[test]
    fn test_empty_component_caps_stability() {
        let parts = [
            component(BlendRole::Driver, "A", &[("Myrcene", 1.2), ("Linalool", 0.5)]),
            component(BlendRole::Modulator, "B", &[("Caryophyllene", 0.8)]),
            component(BlendRole::Anchor, "Empty", &[]),
        ];
        let targets = terpene_alignment(&parts[0].top_terpenes);
        let result = audit(&blend(parts, targets), &calm());

        let empty = result.component_contributions["Empty"];
        assert!(empty < 1e-9);
        assert!(result.stability_score <= 60.0);
    }

    #[test]
    fn test_stability_cap_applies_only_when_negligible() {
        let config = AuditConfig::default();
        let strong = |d: f64| ComponentSensitivity {
            role: BlendRole::Driver,
            name: "x".into(),
            delta: d,
        };
        let all_strong = stability_score(&[strong(80.0), strong(70.0), strong(90.0)], &config);
        assert!((all_strong - 80.0).abs() < 1e-9);
        // Mean is already below the cap.
        let low_mean = stability_score(&[strong(80.0), strong(70.0), strong(4.0)], &config);
        assert!((low_mean - 51.333_333_333).abs() < 1e-6);
        let capped = stability_score(&[strong(95.0), strong(95.0), strong(1.0)], &config);
        assert!((capped - 60.0).abs() < 1e-9);
        assert_eq!(stability_score(&[], &config), 0.0);
    }

    #[test]
    fn test_removing_driver_moves_alignment() {
        let parts = [
            component(BlendRole::Driver, "Relaxer", &[("Myrcene", 1.5)]),
            component(BlendRole::Modulator, "Lifter", &[("Pinene", 0.4)]),
            component(BlendRole::Anchor, "Body", &[("Caryophyllene", 0.4)]),
        ];
        let targets = terpene_alignment(&parts[0].top_terpenes);
        let sens = component_sensitivities(&blend(parts, targets), &calm());
        assert_eq!(sens.len(), 3);
        assert_eq!(sens[0].role, BlendRole::Driver);
        // Targets are the driver's own signature, so backing it out keeps the direction.
        assert!(sens[0].delta < 1e-9);
        assert!(sens[1].delta > 0.0);
    }

    #[test]
    fn test_calm_vs_stimulant_conflict() {
        let parts = [
            component(BlendRole::Driver, "Jack", &[("Terpinolene", 0.9), ("alpha-Pinene", 0.4)]),
            component(BlendRole::Modulator, "B", &[("Limonene", 0.3)]),
            component(BlendRole::Anchor, "C", &[("Caryophyllene", 0.3)]),
        ];
        let result = audit(&blend(parts, IntentVector::splat(0.5)), &calm());
        assert!(result.has_conflicts);
        assert_eq!(result.conflict_flags.len(), 1);
        let flag = &result.conflict_flags[0];
        assert_eq!(flag.kind, ConflictKind::CalmVersusStimulant);
        assert_eq!(flag.terpenes, vec!["Terpinolene".to_string(), "Pinene".to_string()]);
        assert!(flag.message.contains("stimulating"));
    }

    #[test]
    fn test_alert_vs_sedative_conflict() {
        let parts = [
            component(BlendRole::Driver, "A", &[("Pinene", 0.9)]),
            component(BlendRole::Modulator, "B", &[("Myrcene", 0.3)]),
            component(BlendRole::Anchor, "C", &[("Linalool", 0.3), ("Myrcene", 0.1)]),
        ];
        let focus = IntentVector::new(0.1, 0.9, 0.4, 0.3, 0.0, 0.2);
        let b = blend(parts, IntentVector::splat(0.5));
        let flags = detect_conflicts(&b, &focus, &AuditConfig::default());
        assert_eq!(flags.len(), 1);
        assert_eq!(flags[0].kind, ConflictKind::AlertVersusSedative);
        assert_eq!(flags[0].terpenes, vec!["Myrcene".to_string(), "Linalool".to_string()]);
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let parts = [
            component(BlendRole::Driver, "A", &[("Pinene", 0.9)]),
            component(BlendRole::Modulator, "B", &[("Limonene", 0.3)]),
            component(BlendRole::Anchor, "C", &[("Humulene", 0.3)]),
        ];
        let b = blend(parts, IntentVector::splat(0.5));
        let at = IntentVector::zero().with(Dimension::AntiAnxiety, 0.7);
        let below = IntentVector::zero().with(Dimension::AntiAnxiety, 0.69);
        let config = AuditConfig::default();
        assert_eq!(detect_conflicts(&b, &at, &config).len(), 1);
        assert!(detect_conflicts(&b, &below, &config).is_empty());
    }

    #[test]
    fn test_no_conflicts_for_matching_blend() {
        let parts = [
            component(BlendRole::Driver, "A", &[("Myrcene", 0.9)]),
            component(BlendRole::Modulator, "B", &[("Linalool", 0.3)]),
            component(BlendRole::Anchor, "C", &[("Caryophyllene", 0.3)]),
        ];
        let result = audit(&blend(parts, IntentVector::splat(0.5)), &calm());
        assert!(!result.has_conflicts);
        assert!(result.conflict_flags.is_empty());
    }

    #[test]
    fn test_audit_is_repeatable_and_non_mutating() {
        let parts = [
            component(BlendRole::Driver, "A", &[("Myrcene", 0.9), ("Pinene", 0.2)]),
            component(BlendRole::Modulator, "B", &[("Limonene", 0.3)]),
            component(BlendRole::Anchor, "C", &[("Caryophyllene", 0.3)]),
        ];
        let b = blend(parts, IntentVector::new(0.7, 0.2, 0.1, 0.1, 0.4, 0.5));
        let before = b.clone();
        let first = audit(&b, &calm());
        let second = audit(&b, &calm());
        assert_eq!(first, second);
        assert_eq!(b, before);
    }

    #[test]
    fn test_duplicate_names_keep_first_delta() {
        let parts = [
            component(BlendRole::Driver, "Same", &[("Myrcene", 0.9)]),
            component(BlendRole::Modulator, "Same", &[("Myrcene", 0.9)]),
            component(BlendRole::Anchor, "Same", &[("Myrcene", 0.9)]),
        ];
        let targets = terpene_alignment(&parts[0].top_terpenes);
        let result = audit(&blend(parts, targets), &calm());
        assert_eq!(result.component_contributions.len(), 1);
        assert_eq!(result.sensitivities.len(), 3);
    }
}
