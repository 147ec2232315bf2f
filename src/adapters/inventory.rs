//! Host strain rows to chemical profiles.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::effects::canonical_name;
use crate::error::{DataError, ValidationError};
use crate::profile::{descending, Cannabinoids, ChemicalProfile, TerpeneReading};

/// A terpene as reported in a host row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawTerpene {
    /// Name as printed on the lab report.
    pub name: String,
    /// Weight percent.
    pub percent: f64,
}

/// A strain record as the host application stores it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawStrainRow {
    /// Host record ID.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Lab batch ID.
    #[serde(default)]
    pub batch_id: Option<String>,
    /// THC wt%.
    #[serde(default)]
    pub thc: Option<f64>,
    /// CBD wt%.
    #[serde(default)]
    pub cbd: Option<f64>,
    /// CBN wt%.
    #[serde(default)]
    pub cbn: Option<f64>,
    /// CBG wt%.
    #[serde(default)]
    pub cbg: Option<f64>,
    /// Terpene readings.
    #[serde(default)]
    pub terpenes: Vec<RawTerpene>,
    /// Reported terpene total, if the lab printed one.
    #[serde(default)]
    pub total_terpenes: Option<f64>,
    /// Whether the item is currently in stock.
    #[serde(default = "default_available")]
    pub available: bool,
}

const fn default_available() -> bool {
    true
}

fn measured(value: Option<f64>) -> f64 {
    value.filter(|v| v.is_finite() && *v >= 0.0).unwrap_or(0.0)
}

/// Cleans a terpene list: drops blank names and unusable percentages,
/// canonicalizes spellings, merges isomers that map to the same name and
/// orders the result highest first.
fn clean_terpenes(raw: &[RawTerpene]) -> Vec<TerpeneReading> {
    let mut readings: Vec<TerpeneReading> = Vec::with_capacity(raw.len());
    for t in raw {
        if t.name.trim().is_empty() || !t.percent.is_finite() || t.percent < 0.0 {
            continue;
        }
        let name = canonical_name(&t.name);
        match readings.iter_mut().find(|r| r.name == name) {
            Some(existing) => existing.percent += t.percent,
            None => readings.push(TerpeneReading::new(name, t.percent)),
        }
    }
    readings.sort_by(|a, b| descending(a.percent, b.percent));
    readings
}

/// Converts one host row into a chemical profile.
///
/// # Errors
///
/// Returns `ValidationError::EmptyProfileName` for rows without a name and
/// `ValidationError::MissingField` for rows without an ID.
pub fn to_profile(row: &RawStrainRow) -> Result<ChemicalProfile, ValidationError> {
    if row.id.trim().is_empty() {
        return Err(ValidationError::MissingField {
            field: "id".to_string(),
        });
    }

    let terpenes = clean_terpenes(&row.terpenes);
    let mut builder = ChemicalProfile::builder()
        .external_id(&row.id)
        .name(row.name.trim())
        .batch_id(row.batch_id.clone().unwrap_or_default())
        .cannabinoids(Cannabinoids {
            thc: measured(row.thc),
            cbd: measured(row.cbd),
            cbn: measured(row.cbn),
            cbg: measured(row.cbg),
        })
        .terpenes(terpenes);

    if let Some(total) = row.total_terpenes.filter(|t| t.is_finite() && *t >= 0.0) {
        builder = builder.total_terpene_percent(total);
    }
    builder.build()
}

/// Builds the engine inventory from host rows.
///
/// Unavailable rows are left out and malformed rows are skipped with a
/// warning.
///
/// # Errors
///
/// Returns `ValidationError::InsufficientInventory` when fewer than
/// `min_items` usable profiles remain.
pub fn build_inventory(
    rows: &[RawStrainRow],
    min_items: usize,
) -> Result<Vec<ChemicalProfile>, ValidationError> {
    let mut inventory = Vec::with_capacity(rows.len());
    for row in rows.iter().filter(|r| r.available) {
        match to_profile(row) {
            Ok(profile) => inventory.push(profile),
            Err(e) => warn!(row = %row.id, error = %e, "skipping malformed strain row"),
        }
    }

    debug!(rows = rows.len(), usable = inventory.len(), "built inventory");
    if inventory.len() < min_items {
        return Err(ValidationError::InsufficientInventory {
            available: inventory.len(),
            required: min_items,
        });
    }
    Ok(inventory)
}

/// Parses a JSON array of host rows.
///
/// # Errors
///
/// Returns `DataError::Parse` when the text is not a JSON array of rows.
pub fn rows_from_json(source: &str) -> Result<Vec<RawStrainRow>, DataError> {
    serde_json::from_str(source).map_err(|e| DataError::Parse {
        what: "inventory".to_string(),
        message: e.to_string(),
    })
}

/// Reads and parses a JSON inventory file.
///
/// # Errors
///
/// `DataError::Read` when the file cannot be read, otherwise as
/// [`rows_from_json`].
pub fn load_rows(path: impl AsRef<Path>) -> Result<Vec<RawStrainRow>, DataError> {
    let path = path.as_ref();
    let source = std::fs::read_to_string(path).map_err(|e| DataError::Read {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    rows_from_json(&source)
}
