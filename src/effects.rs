//! Terpene effect model.
//!
//! A static table mapping known terpenes to *partial* effect vectors: only
//! the dimensions a terpene moves are present, everything else contributes
//! zero. Each entry also carries a semantic lean that the auditor uses for
//! antagonism checks.
//!
//! Lab reports spell terpenes inconsistently (`beta-Myrcene`, `β-Myrcene`,
//! `myrcene`, `(-)-alpha-Bisabolol`). Lookups go through
//! [`canonical_name`] so all of those resolve to the same entry.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::intent::PartialIntent;

/// Semantic lean of a terpene, used for conflict detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TerpeneLean {
    /// Sedative-leaning (works against focus/energy intents).
    Sedative,
    /// Stimulant-leaning (works against calm intents).
    Stimulant,
    /// No antagonism rule applies.
    Neutral,
}

impl fmt::Display for TerpeneLean {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sedative => write!(f, "sedative"),
            Self::Stimulant => write!(f, "stimulant"),
            Self::Neutral => write!(f, "neutral"),
        }
    }
}

/// One row of the effect table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TerpeneEffect {
    /// Canonical display spelling.
    pub name: &'static str,
    /// Semantic lean.
    pub lean: TerpeneLean,
    /// Per-unit contribution to each affected dimension.
    pub effects: PartialIntent,
}

const fn effect(
    name: &'static str,
    lean: TerpeneLean,
    effects: PartialIntent,
) -> TerpeneEffect {
    TerpeneEffect { name, lean, effects }
}

const NONE: PartialIntent = PartialIntent::empty();

/// The effect table.
pub static TERPENE_EFFECTS: &[TerpeneEffect] = &[
    effect(
        "Myrcene",
        TerpeneLean::Sedative,
        PartialIntent {
            relaxation: Some(0.8),
            energy: Some(-0.4),
            pain_relief: Some(0.5),
            anti_anxiety: Some(0.3),
            ..NONE
        },
    ),
    effect(
        "Limonene",
        TerpeneLean::Neutral,
        PartialIntent {
            focus: Some(0.2),
            energy: Some(0.5),
            creativity: Some(0.4),
            anti_anxiety: Some(0.5),
            ..NONE
        },
    ),
    effect(
        "Caryophyllene",
        TerpeneLean::Neutral,
        PartialIntent {
            relaxation: Some(0.3),
            pain_relief: Some(0.7),
            anti_anxiety: Some(0.5),
            ..NONE
        },
    ),
    effect(
        "Linalool",
        TerpeneLean::Sedative,
        PartialIntent {
            relaxation: Some(0.7),
            energy: Some(-0.3),
            pain_relief: Some(0.2),
            anti_anxiety: Some(0.7),
            ..NONE
        },
    ),
    effect(
        "Pinene",
        TerpeneLean::Stimulant,
        PartialIntent {
            focus: Some(0.8),
            energy: Some(0.5),
            creativity: Some(0.2),
            ..NONE
        },
    ),
    effect(
        "Terpinolene",
        TerpeneLean::Stimulant,
        PartialIntent {
            focus: Some(0.3),
            energy: Some(0.7),
            creativity: Some(0.6),
            ..NONE
        },
    ),
    effect(
        "Humulene",
        TerpeneLean::Neutral,
        PartialIntent {
            relaxation: Some(0.2),
            focus: Some(0.2),
            pain_relief: Some(0.4),
            ..NONE
        },
    ),
    effect(
        "Ocimene",
        TerpeneLean::Neutral,
        PartialIntent {
            energy: Some(0.4),
            creativity: Some(0.3),
            anti_anxiety: Some(0.1),
            ..NONE
        },
    ),
    effect(
        "Bisabolol",
        TerpeneLean::Neutral,
        PartialIntent {
            relaxation: Some(0.4),
            pain_relief: Some(0.3),
            anti_anxiety: Some(0.5),
            ..NONE
        },
    ),
    effect(
        "Nerolidol",
        TerpeneLean::Neutral,
        PartialIntent {
            relaxation: Some(0.6),
            anti_anxiety: Some(0.3),
            ..NONE
        },
    ),
    effect(
        "Valencene",
        TerpeneLean::Neutral,
        PartialIntent {
            focus: Some(0.2),
            energy: Some(0.3),
            creativity: Some(0.3),
            ..NONE
        },
    ),
    effect(
        "Terpineol",
        TerpeneLean::Neutral,
        PartialIntent {
            relaxation: Some(0.5),
            anti_anxiety: Some(0.2),
            ..NONE
        },
    ),
    effect(
        "Guaiol",
        TerpeneLean::Neutral,
        PartialIntent {
            pain_relief: Some(0.4),
            anti_anxiety: Some(0.2),
            ..NONE
        },
    ),
];

/// Isomer and stereo prefixes stripped before lookup. Longest first.
const PREFIXES: &[&str] = &[
    "(+)-", "(-)-", "alpha-", "alpha ", "beta-", "beta ", "gamma-", "delta-", "trans-", "cis-",
    "α-", "β-", "γ-", "δ-", "a-", "b-", "d-", "l-",
];

fn strip_prefixes(raw: &str) -> &str {
    let mut s = raw.trim();
    // Prefixes can stack, e.g. "(-)-alpha-Bisabolol".
    'outer: loop {
        for prefix in PREFIXES {
            if s.len() > prefix.len()
                && s.is_char_boundary(prefix.len())
                && s[..prefix.len()].eq_ignore_ascii_case(prefix)
            {
                s = s[prefix.len()..].trim_start();
                continue 'outer;
            }
        }
        return s;
    }
}

/// Looks up the effect entry for a terpene name, tolerating isomer
/// prefixes and case differences. Unknown terpenes yield `None`.
///
/// # Examples
///
/// ```
/// use blendmatch::effects::effects_of;
///
/// let entry = effects_of("β-Caryophyllene").unwrap();
/// assert_eq!(entry.name, "Caryophyllene");
/// assert!(effects_of("Unobtainium").is_none());
/// ```
#[must_use]
pub fn effects_of(name: &str) -> Option<&'static TerpeneEffect> {
    let stripped = strip_prefixes(name);
    TERPENE_EFFECTS
        .iter()
        .find(|e| e.name.eq_ignore_ascii_case(stripped))
}

/// The canonical spelling of a terpene name: the table spelling when the
/// terpene is known, otherwise the input with prefixes and whitespace removed.
#[must_use]
pub fn canonical_name(raw: &str) -> String {
    effects_of(raw).map_or_else(|| strip_prefixes(raw).to_string(), |e| e.name.to_string())
}

/// Semantic lean of a terpene; unknown terpenes are neutral.
#[must_use]
pub fn lean_of(name: &str) -> TerpeneLean {
    effects_of(name).map_or(TerpeneLean::Neutral, |e| e.lean)
}
