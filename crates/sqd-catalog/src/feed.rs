//! Catalog feed: raw wire rows → model types.
//!
//! Raw rows mirror the dataset columns. Unknown fields are ignored so that
//! dataset additions do not break loading.

use std::fmt;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use sqd_model::{is_flagged_mission_id, AttributeDelta, Attributes, Mission, Training};
use tracing::{info, warn};

use crate::Catalog;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// The dataset file could not be read.
    Io { path: String, message: String },
    /// The dataset is not valid YAML / JSON for the catalog schema.
    Parse { message: String },
    /// The file extension is neither `.yaml`/`.yml` nor `.json`.
    UnsupportedFormat { path: String },
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, message } => write!(f, "read catalog '{path}' failed: {message}"),
            Self::Parse { message } => write!(f, "catalog parse failed: {message}"),
            Self::UnsupportedFormat { path } => write!(
                f,
                "catalog '{path}' has unsupported extension (expected .yaml, .yml or .json)"
            ),
        }
    }
}

impl std::error::Error for CatalogError {}

// ---------------------------------------------------------------------------
// Raw rows
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct RawAttributeRow {
    pub physical: u32,
    pub mental: u32,
    pub tactical: u32,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct RawDeltaRow {
    #[serde(default)]
    pub physical: i32,
    #[serde(default)]
    pub mental: i32,
    #[serde(default)]
    pub tactical: i32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawMissionRow {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub level: u8,
    /// Explicit flagged-set membership; derived from the id when absent.
    #[serde(default)]
    pub flagged: Option<bool>,
    #[serde(default)]
    pub variants: Vec<RawAttributeRow>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawTrainingRow {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub gain: RawDeltaRow,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawCatalog {
    #[serde(default)]
    pub missions: Vec<RawMissionRow>,
    #[serde(default)]
    pub trainings: Vec<RawTrainingRow>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogFormat {
    Yaml,
    Json,
}

impl CatalogFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "yaml" | "yml" => Some(CatalogFormat::Yaml),
            "json" => Some(CatalogFormat::Json),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Normalization
// ---------------------------------------------------------------------------

fn normalize_mission(raw: RawMissionRow) -> Mission {
    let variants = raw
        .variants
        .into_iter()
        .map(|v| Attributes::new(v.physical, v.mental, v.tactical))
        .collect();
    Mission {
        is_flagged: raw.flagged.unwrap_or_else(|| is_flagged_mission_id(raw.id)),
        id: raw.id,
        name: raw.name,
        level: raw.level,
        variants,
    }
}

fn normalize_training(raw: RawTrainingRow) -> Training {
    Training::new(
        raw.id,
        raw.name,
        AttributeDelta::new(raw.gain.physical, raw.gain.mental, raw.gain.tactical),
    )
}

impl From<RawCatalog> for Catalog {
    fn from(raw: RawCatalog) -> Self {
        let missions: Vec<Mission> = raw.missions.into_iter().map(normalize_mission).collect();
        for m in missions.iter().filter(|m| m.id > 0 && !m.is_usable()) {
            warn!(mission_id = m.id, name = %m.name, "catalog mission has no variants");
        }
        Catalog::new(
            missions,
            raw.trainings.into_iter().map(normalize_training).collect(),
        )
    }
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

pub fn parse_catalog(raw: &str, format: CatalogFormat) -> Result<Catalog, CatalogError> {
    let parsed: RawCatalog = match format {
        CatalogFormat::Yaml => serde_yaml::from_str(raw).map_err(|e| CatalogError::Parse {
            message: e.to_string(),
        })?,
        CatalogFormat::Json => serde_json::from_str(raw).map_err(|e| CatalogError::Parse {
            message: e.to_string(),
        })?,
    };
    Ok(Catalog::from(parsed))
}

pub fn load_catalog(path: &Path) -> Result<Catalog, CatalogError> {
    let format = CatalogFormat::from_path(path).ok_or_else(|| CatalogError::UnsupportedFormat {
        path: path.display().to_string(),
    })?;
    let raw = fs::read_to_string(path).map_err(|e| CatalogError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    parse_catalog(&raw, format)
}

/// Load the catalog, degrading to an empty one on any failure.
pub fn load_catalog_or_empty(path: Option<&Path>) -> Catalog {
    let Some(path) = path else {
        warn!("no catalog path configured; using empty catalog");
        return Catalog::empty();
    };
    match load_catalog(path) {
        Ok(catalog) => {
            info!(
                path = %path.display(),
                missions = catalog.missions().len(),
                trainings = catalog.trainings().len(),
                "catalog loaded"
            );
            catalog
        }
        Err(e) => {
            warn!(error = %e, "catalog load failed; using empty catalog");
            Catalog::empty()
        }
    }
}
