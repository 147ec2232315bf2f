//! Recommendation engine.
//!
//! A thin synchronous façade over score → assemble → audit. The engine holds
//! only immutable configuration, so one instance can serve any number of
//! concurrent callers.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::adapters::{build_inventory, RawStrainRow};
use crate::assembler::{assemble_with, SelectionStrategy, TopRankTriples};
use crate::audit::{audit_with, ConfidenceAudit};
use crate::blend::BlendCandidate;
use crate::config::EngineConfig;
use crate::error::BlendResult;
use crate::intent::IntentVector;
use crate::profile::ChemicalProfile;
use crate::scoring::score_all;

/// Output of one recommendation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    /// Unique identifier of this request (for logs and debugging).
    pub request_id: Uuid,
    /// When the recommendation was produced.
    pub generated_at: DateTime<Utc>,
    /// The intent the blends were built for.
    pub intent: IntentVector,
    /// Selection strategy used.
    pub strategy: String,
    /// Recommended blends; empty means "no recommendation available".
    pub blends: Vec<BlendCandidate>,
    /// One audit per blend in the same order; empty when auditing is off.
    #[serde(default)]
    pub audits: Vec<ConfidenceAudit>,
}

impl Recommendation {
    /// True when no blend could be produced.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.blends.is_empty()
    }

    /// The audit for a blend, if one was computed.
    #[must_use]
    pub fn audit_for(&self, blend: &BlendCandidate) -> Option<&ConfidenceAudit> {
        self.audits.iter().find(|a| a.blend_id == blend.id)
    }
}

/// Blend recommendation engine.
#[derive(Clone)]
pub struct BlendEngine {
    config: EngineConfig,
    strategy: Arc<dyn SelectionStrategy>,
}

impl fmt::Debug for BlendEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BlendEngine")
            .field("config", &self.config)
            .field("strategy", &self.strategy.name())
            .finish()
    }
}

impl Default for BlendEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl BlendEngine {
    /// Creates an engine with the default selection strategy.
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            strategy: Arc::new(TopRankTriples),
        }
    }

    /// Replaces the selection strategy.
    #[must_use]
    pub fn with_strategy(mut self, strategy: Arc<dyn SelectionStrategy>) -> Self {
        self.strategy = strategy;
        self
    }

    /// The active configuration.
    #[must_use]
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Scores, assembles and (optionally) audits blends for an inventory.
    ///
    /// Never fails: an empty inventory yields an empty recommendation. The
    /// minimum-inventory rule is enforced by [`BlendEngine::recommend_rows`].
    #[must_use]
    pub fn recommend(
        &self,
        intent: &IntentVector,
        inventory: &[ChemicalProfile],
    ) -> Recommendation {
        let request_id = Uuid::new_v4();
        debug!(%request_id, items = inventory.len(), %intent, "recommend");

        let scored = score_all(inventory, intent);
        let blends = assemble_with(scored, self.strategy.as_ref());

        let audits: Vec<ConfidenceAudit> = if self.config.audit_blends {
            blends
                .iter()
                .map(|b| audit_with(b, intent, &self.config.audit))
                .collect()
        } else {
            Vec::new()
        };

        let conflicted = audits.iter().filter(|a| a.has_conflicts).count();
        info!(
            %request_id,
            blends = blends.len(),
            audited = audits.len(),
            conflicted,
            "recommendation ready"
        );

        Recommendation {
            request_id,
            generated_at: Utc::now(),
            intent: *intent,
            strategy: self.strategy.name().to_string(),
            blends,
            audits,
        }
    }

    /// Adapts host rows, enforces the minimum inventory and recommends.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::InsufficientInventory` (wrapped) when fewer
    /// than `min_inventory` usable, available rows exist.
    pub fn recommend_rows(
        &self,
        intent: &IntentVector,
        rows: &[RawStrainRow],
    ) -> BlendResult<Recommendation> {
        let inventory = build_inventory(rows, self.config.min_inventory)?;
        Ok(self.recommend(intent, &inventory))
    }
}
