//! sqd-catalog
//!
//! Static mission / training catalog feed.
//!
//! The catalog is read once at startup from a read-only dataset (YAML or
//! JSON) and is immutable afterwards. A missing or malformed dataset never
//! aborts initialisation: [`load_catalog_or_empty`] logs the failure and
//! returns an empty catalog.

mod feed;

use std::sync::Arc;

use sqd_model::{Mission, MissionId, Training};

pub use feed::{
    load_catalog, load_catalog_or_empty, parse_catalog, CatalogError, CatalogFormat,
    RawAttributeRow, RawCatalog, RawDeltaRow, RawMissionRow, RawTrainingRow,
};

/// Training row excluded from every catalog.
pub const EXCLUDED_TRAINING_ID: u32 = 7;

/// Immutable catalog. Clones share the underlying lists.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Catalog {
    missions: Arc<Vec<Mission>>,
    trainings: Arc<Vec<Training>>,
}

impl Catalog {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a catalog, dropping placeholder rows (mission id 0, training
    /// id 0) and the excluded training row.
    pub fn new(missions: Vec<Mission>, trainings: Vec<Training>) -> Self {
        let missions = missions.into_iter().filter(|m| m.id > 0).collect();
        let trainings = trainings
            .into_iter()
            .filter(|t| t.id > 0 && t.id != EXCLUDED_TRAINING_ID)
            .collect();
        Self {
            missions: Arc::new(missions),
            trainings: Arc::new(trainings),
        }
    }

    pub fn missions(&self) -> &[Mission] {
        &self.missions
    }

    pub fn trainings(&self) -> &[Training] {
        &self.trainings
    }

    /// Shared handle to the training list, for capture by background work.
    pub fn trainings_shared(&self) -> Arc<Vec<Training>> {
        Arc::clone(&self.trainings)
    }

    pub fn mission(&self, id: MissionId) -> Option<&Mission> {
        self.missions.iter().find(|m| m.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.missions.is_empty() && self.trainings.is_empty()
    }
}
