//! # blendmatch - deterministic terpene blend resolution
//!
//! blendmatch turns a desired outcome into concrete three-part blends drawn
//! from a lab-tested inventory, and explains how much to trust each one.
//!
//! ## Core Concepts
//!
//! - **IntentVector**: six-dimensional desired-effect profile
//! - **ChemicalProfile**: cannabinoid + terpene composition of one item (a COA)
//! - **ScoredItem**: a profile's effect signature and its match against an intent
//! - **BlendCandidate**: Driver (50%) / Modulator (30%) / Anchor (20%) blend
//! - **ConfidenceAudit**: alignment, counterfactual stability and conflict flags
//!
//! Every operation is a pure synchronous function. There is no shared
//! mutable state.
//!
//! ## Usage
//!
//! ```rust
//! use blendmatch::{assemble, audit, score_all, ChemicalProfile, IntentPreset};
//!
//! let inventory = vec![
//!     ChemicalProfile::builder().name("Granddaddy").terpene("Myrcene", 1.3).build()?,
//!     ChemicalProfile::builder().name("Lavender").terpene("Linalool", 0.8).build()?,
//!     ChemicalProfile::builder().name("Pepper").terpene("Caryophyllene", 0.9).build()?,
//! ];
//! let intent = IntentPreset::Sleep.intent();
//!
//! let blends = assemble(score_all(&inventory, &intent));
//! assert_eq!(blends.len(), 3);
//!
//! let report = audit(&blends[0], &intent);
//! assert!(report.alignment_score > 50.0);
//! # Ok::<(), blendmatch::ValidationError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod adapters;
pub mod assembler;
pub mod audit;
pub mod blend;
pub mod config;
pub mod effects;
pub mod engine;
pub mod error;
pub mod intent;
pub mod profile;
pub mod scoring;

// Re-export primary types at crate root for convenience
pub use adapters::{
    build_inventory, load_rows, normalize_intent, parse_interpretation, rows_from_json,
    Interpretation, RawStrainRow, RawTerpene,
};
pub use assembler::{
    assemble, assemble_with, BlendSlot, SelectionStrategy, SlotStyle, TopRankTriples,
};
pub use audit::{audit, audit_with, ConfidenceAudit, ConflictFlag, ConflictKind};
pub use blend::{BlendCandidate, BlendComponent, BlendId, BlendRole};
pub use config::{AuditConfig, EngineConfig};
pub use effects::{effects_of, TerpeneEffect, TerpeneLean};
pub use engine::{BlendEngine, Recommendation};
pub use error::{BlendError, BlendResult, ConfigError, DataError, ValidationError};
pub use intent::{Dimension, IntentPreset, IntentVector, PartialIntent};
pub use profile::{Cannabinoids, ChemicalProfile, ProfileId, TerpeneReading};
pub use scoring::{rank, score, score_all, ScoredItem};
