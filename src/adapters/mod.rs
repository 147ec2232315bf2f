//! Boundary adapters.
//!
//! These translate host-application records into engine types.
//! Input validation lives here: the engine proper accepts whatever it is
//! given and degrades gracefully, so anything the product must reject
//! (too few items, unreadable interpreter replies) is rejected before
//! the engine is called.

mod interpretation;
mod inventory;

pub use interpretation::{
    normalize_intent, parse_interpretation, Interpretation, NEUTRAL_INTENT_LEVEL,
};
pub use inventory::{
    build_inventory, load_rows, rows_from_json, to_profile, RawStrainRow, RawTerpene,
};
