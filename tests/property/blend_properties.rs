use blendmatch::effects::{effects_of, TERPENE_EFFECTS};
use blendmatch::{
    assemble, audit, score, score_all, BlendRole, ChemicalProfile, IntentVector, TerpeneReading,
};
use proptest::prelude::*;

fn terpene_name() -> impl Strategy<Value = String> {
    let mut names: Vec<String> = TERPENE_EFFECTS.iter().map(|e| e.name.to_string()).collect();
    names.push("Eucalyptol".to_string());
    names.push("beta-Myrcene".to_string());
    prop::sample::select(names)
}

fn intent() -> impl Strategy<Value = IntentVector> {
    prop::array::uniform6(0.0f64..1.0)
        .prop_map(|v| IntentVector::new(v[0], v[1], v[2], v[3], v[4], v[5]))
}

fn profile() -> impl Strategy<Value = ChemicalProfile> {
    (
        "[A-Z][a-z]{2,8}",
        0.0f64..20.0,
        prop::collection::vec((terpene_name(), 0.0f64..3.0), 0..6),
    )
        .prop_map(|(name, cbd, terps)| {
            ChemicalProfile::builder()
                .name(name)
                .cbd(cbd)
                .terpenes(
                    terps
                        .into_iter()
                        .map(|(n, p)| TerpeneReading::new(n, p))
                        .collect(),
                )
                .build()
                .unwrap()
        })
}

/// How much one unit of a terpene moves the match score for `intent`.
fn unit_gain(name: &str, intent: &IntentVector) -> f64 {
    effects_of(name).map_or(0.0, |e| e.effects.fill(0.0).dot(intent))
}

proptest! {
    #[test]
    fn score_is_deterministic(p in profile(), i in intent()) {
        let a = score(&p, &i);
        let b = score(&p, &i);
        prop_assert_eq!(a.match_score.to_bits(), b.match_score.to_bits());
        prop_assert_eq!(a.alignment, b.alignment);
    }

    #[test]
    fn blends_are_zero_or_three_and_sum_to_100(
        inventory in prop::collection::vec(profile(), 0..9),
        i in intent(),
    ) {
        let blends = assemble(score_all(&inventory, &i));
        if inventory.is_empty() {
            prop_assert!(blends.is_empty());
        } else {
            prop_assert_eq!(blends.len(), 3);
        }
        for blend in &blends {
            prop_assert_eq!(blend.total_percentage(), 100);
            let roles: Vec<BlendRole> = blend.components.iter().map(|c| c.role).collect();
            prop_assert_eq!(roles, BlendRole::ALL.to_vec());
        }
    }

    #[test]
    fn alignment_and_stability_stay_in_bounds(
        inventory in prop::collection::vec(profile(), 1..7),
        i in intent(),
    ) {
        for blend in assemble(score_all(&inventory, &i)) {
            let report = audit(&blend, &i);
            prop_assert!((0.0..=100.0).contains(&report.alignment_score));
            prop_assert!((0.0..=100.0).contains(&report.stability_score));
            prop_assert_eq!(report.has_conflicts, !report.conflict_flags.is_empty());
        }
    }

    #[test]
    fn audit_is_repeatable(
        inventory in prop::collection::vec(profile(), 1..7),
        i in intent(),
    ) {
        for blend in assemble(score_all(&inventory, &i)) {
            prop_assert_eq!(audit(&blend, &i), audit(&blend, &i));
        }
    }

    #[test]
    fn dominating_profile_scores_at_least_as_high(
        base in profile(),
        bumps in prop::collection::vec(0.0f64..1.0, 6),
        cbd_bump in 0.0f64..5.0,
        i in intent(),
    ) {
        // Raise only terpenes (and CBD) that the intent rewards.
        let mut terpenes = base.terpenes.clone();
        for (t, bump) in terpenes.iter_mut().zip(bumps.iter()) {
            if unit_gain(&t.name, &i) >= 0.0 {
                t.percent += bump;
            }
        }
        let cbd_gain = 0.02 * i.anti_anxiety + 0.02 * i.pain_relief - 0.01 * i.energy;
        let cbd = if cbd_gain >= 0.0 {
            base.cannabinoids.cbd + cbd_bump
        } else {
            base.cannabinoids.cbd
        };
        let dominant = ChemicalProfile::builder()
            .name("Dominant")
            .cbd(cbd)
            .terpenes(terpenes)
            .build()
            .unwrap();

        let a = score(&dominant, &i).match_score;
        let b = score(&base, &i).match_score;
        prop_assert!(a >= b - 1e-9, "{} < {}", a, b);
    }
}
