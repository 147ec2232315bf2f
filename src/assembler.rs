//! Blend assembler.
//!
//! Turns a list of scored items into three-role blends. Which items go
//! into which blend is decided by a [`SelectionStrategy`]; the default
//! [`TopRankTriples`] draws three overlapping triples from the top of the
//! ranking so the outputs share a best item but still differ.
//!
//! Assembly never fails. An empty input produces no blends; inventories
//! smaller than the indices a strategy asks for wrap around and repeat items.

use tracing::{debug, warn};

use crate::blend::{BlendCandidate, BlendComponent, BlendId, BlendRole};
use crate::scoring::{rank, ScoredItem};

/// Terpenes copied onto each component for explanation.
pub const COMPONENT_TERPENES: usize = 3;

/// Presentation style of a blend slot: naming, vibe and confidence label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlotStyle {
    /// "Elite <X> Blend".
    Elite,
    /// "Focused <X> Mix".
    Focused,
    /// "<X> Balanced Cut".
    Balanced,
}

impl SlotStyle {
    /// Blend name for a slot whose driver is `driver`.
    #[must_use]
    pub fn name(self, driver: &str) -> String {
        match self {
            Self::Elite => format!("Elite {driver} Blend"),
            Self::Focused => format!("Focused {driver} Mix"),
            Self::Balanced => format!("{driver} Balanced Cut"),
        }
    }

    /// One-line vibe description.
    #[must_use]
    pub fn vibe(self, driver: &str, lead_terpene: &str) -> String {
        match self {
            Self::Elite => format!("Peak match, led by {lead_terpene}-forward {driver}."),
            Self::Focused => {
                format!("A tighter take built around {driver} and its {lead_terpene}.")
            }
            Self::Balanced => {
                format!("An evened-out profile carried by {driver}'s {lead_terpene}.")
            }
        }
    }

    /// Confidence range label shown next to the blend.
    #[must_use]
    pub const fn confidence_range(self) -> &'static str {
        match self {
            Self::Elite => "92-97%",
            Self::Focused => "86-92%",
            Self::Balanced => "80-88%",
        }
    }
}

/// One blend to build: ranking positions for Driver, Modulator, Anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlendSlot {
    /// Positions into the ranked list, in role order. Wrapped modulo the list length.
    pub indices: [usize; 3],
    /// Presentation style.
    pub style: SlotStyle,
}

/// Decides which ranked items form each blend.
///
/// Implementations only pick positions; scoring, role assignment and
/// auditing stay the same regardless of strategy.
pub trait SelectionStrategy: Send + Sync {
    /// Short stable identifier for logging.
    fn name(&self) -> &'static str;

    /// Slots to build from a ranking of `ranked_len` items (`ranked_len > 0`).
    fn slots(&self, ranked_len: usize) -> Vec<BlendSlot>;
}

/// Default strategy: `(0,1,2)`, `(0,3,4)`, `(1,2,5)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TopRankTriples;

impl SelectionStrategy for TopRankTriples {
    fn name(&self) -> &'static str {
        "top_rank_triples"
    }

    fn slots(&self, _ranked_len: usize) -> Vec<BlendSlot> {
        vec![
            BlendSlot {
                indices: [0, 1, 2],
                style: SlotStyle::Elite,
            },
            BlendSlot {
                indices: [0, 3, 4],
                style: SlotStyle::Focused,
            },
            BlendSlot {
                indices: [1, 2, 5],
                style: SlotStyle::Balanced,
            },
        ]
    }
}

/// Assembles blends with the default [`TopRankTriples`] strategy.
///
/// Returns an empty list for an empty input, otherwise exactly three blends.
#[must_use]
pub fn assemble(scored: Vec<ScoredItem>) -> Vec<BlendCandidate> {
    assemble_with(scored, &TopRankTriples)
}

/// Assembles blends with a custom selection strategy.
#[must_use]
pub fn assemble_with(
    scored: Vec<ScoredItem>,
    strategy: &dyn SelectionStrategy,
) -> Vec<BlendCandidate> {
    let ranked = rank(scored);
    if ranked.is_empty() {
        debug!(strategy = strategy.name(), "no scored items, no blends");
        return Vec::new();
    }
    if ranked.len() < BlendRole::ALL.len() {
        warn!(
            items = ranked.len(),
            "fewer ranked items than blend roles, components will repeat"
        );
    }

    let at = |index: usize| &ranked[index % ranked.len()];

    let blends: Vec<BlendCandidate> = strategy
        .slots(ranked.len())
        .into_iter()
        .zip(1u32..)
        .map(|(slot, id)| {
            let items = slot.indices.map(at);
            build_blend(BlendId(id), slot.style, items)
        })
        .collect();

    debug!(
        strategy = strategy.name(),
        items = ranked.len(),
        blends = blends.len(),
        "assembled blends"
    );
    blends
}

fn build_blend(id: BlendId, style: SlotStyle, items: [&ScoredItem; 3]) -> BlendCandidate {
    let [driver, modulator, anchor] = items;
    let lead = driver
        .profile
        .dominant_terpene()
        .map_or("full-spectrum", |t| t.name.as_str());

    let components = [
        component_for(BlendRole::Driver, driver),
        component_for(BlendRole::Modulator, modulator),
        component_for(BlendRole::Anchor, anchor),
    ];

    BlendCandidate {
        id,
        name: style.name(&driver.profile.name),
        vibe: style.vibe(&driver.profile.name, lead),
        confidence_range: style.confidence_range().to_string(),
        components,
        targets: driver.alignment,
    }
}

fn component_for(role: BlendRole, item: &ScoredItem) -> BlendComponent {
    let profile = &item.profile;
    let rationale = match profile.dominant_terpene() {
        Some(t) => format!(
            "{role}: {} {}, leading with {} ({:.2}%).",
            profile.name,
            role.duty(),
            t.name,
            t.percent
        ),
        None => format!(
            "{role}: {} {}, no dominant terpene reported.",
            profile.name,
            role.duty()
        ),
    };

    BlendComponent {
        role,
        profile_id: profile.id,
        name: profile.name.clone(),
        percentage: role.percentage(),
        top_terpenes: profile.top_terpenes(COMPONENT_TERPENES),
        rationale,
    }
}
