//! Engine configuration.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::Result;

/// Where the engine finds its routing data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Storage {
    /// Data already loaded into shared memory by another process.
    SharedMemory,
    /// Data files next to the given base path (e.g. `berlin.osrm`).
    Files(PathBuf),
}

/// Configuration an engine is constructed from.
///
/// An engine takes its own copy; changing a config after construction has no effect on
/// engines already built from it.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Data source.
    pub storage: Storage,

    /// Maximum coordinates in a route request (`None` = unlimited).
    pub max_locations_viaroute: Option<usize>,

    /// Maximum sources × destinations coordinates in a table request (`None` = unlimited).
    pub max_locations_distance_table: Option<usize>,

    /// Maximum coordinates in a match request (`None` = unlimited).
    pub max_locations_map_matching: Option<usize>,

    /// Maximum results of a nearest request (`None` = unlimited).
    pub max_results_nearest: Option<usize>,

    /// Maximum alternative routes.
    pub max_alternatives: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            storage: Storage::SharedMemory,
            max_locations_viaroute: None,
            max_locations_distance_table: None,
            max_locations_map_matching: None,
            max_results_nearest: None,
            max_alternatives: 3,
        }
    }
}

impl EngineConfig {
    /// Shared-memory configuration with default limits.
    pub fn shared_memory() -> Self {
        Self::default()
    }

    /// File-based configuration with default limits.
    pub fn with_base_path(path: impl Into<PathBuf>) -> Self {
        Self {
            storage: Storage::Files(path.into()),
            ..Self::default()
        }
    }

    /// `None` selects shared memory, a path selects file storage.
    pub fn from_base_path(path: Option<&Path>) -> Self {
        match path {
            Some(path) => Self::with_base_path(path),
            None => Self::shared_memory(),
        }
    }

    /// Returns true when the engine reads shared memory.
    pub fn use_shared_memory(&self) -> bool {
        self.storage == Storage::SharedMemory
    }

    /// Applies a JSON configuration update.
    pub fn update_from_str(&mut self, json: &str) -> Result<()> {
        let request: EngineConfigRequest = serde_json::from_str(json)?;
        request.apply_to(self);
        Ok(())
    }
}

/// Partial configuration update. Absent fields keep their value; a negative limit means
/// unlimited.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EngineConfigRequest {
    pub max_locations_viaroute: Option<i64>,
    pub max_locations_distance_table: Option<i64>,
    pub max_locations_map_matching: Option<i64>,
    pub max_results_nearest: Option<i64>,
    pub max_alternatives: Option<usize>,
}

impl EngineConfigRequest {
    /// Writes the present fields into `config`.
    pub fn apply_to(&self, config: &mut EngineConfig) {
        fn limit(value: i64) -> Option<usize> {
            usize::try_from(value).ok()
        }

        if let Some(v) = self.max_locations_viaroute {
            config.max_locations_viaroute = limit(v);
        }
        if let Some(v) = self.max_locations_distance_table {
            config.max_locations_distance_table = limit(v);
        }
        if let Some(v) = self.max_locations_map_matching {
            config.max_locations_map_matching = limit(v);
        }
        if let Some(v) = self.max_results_nearest {
            config.max_results_nearest = limit(v);
        }
        if let Some(v) = self.max_alternatives {
            config.max_alternatives = v;
        }
    }
}
