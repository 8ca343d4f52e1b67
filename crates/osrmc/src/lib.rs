//! # osrmc
//!
//! Routing engine boundary for Rust callers.
//!
//! This crate provides:
//! - **Requests**: typed route, table, nearest and match parameters, built field by field
//!   or in bulk from JSON
//! - **Responses**: typed accessors with `NoTable`/`NoRoute` errors, plus conversion of
//!   whole response trees into `serde_json` values
//! - **Engines**: the [`Engine`] seam and, with the `engine` feature, the great-circle
//!   reference engine
//!
//! ## Quick Start
//!
//! ```rust
//! # #[cfg(feature = "engine")]
//! # fn main() -> osrmc::Result<()> {
//! use osrmc::core::request::{self, TableRequest};
//! use osrmc::engine::CrowFly;
//! use osrmc::{EngineConfig, Osrm};
//!
//! let osrm = Osrm::new(CrowFly::new(&EngineConfig::shared_memory())?);
//!
//! let params = request::build::<TableRequest>(serde_json::json!({
//!     "coordinates": [[13.388, 52.517], [13.385, 52.520]],
//!     "sources": [0],
//!     "destinations": [1]
//! }))?;
//! let table = osrm.table(&params)?;
//!
//! assert!(table.duration(0, 0)?.is_finite());
//! assert_eq!(table.distance(0, 0).unwrap_err().code(), "NoTable");
//! # Ok(())
//! # }
//! # #[cfg(not(feature = "engine"))]
//! # fn main() {}
//! ```
//!
//! ## Feature Flags
//!
//! - `engine` (default): the great-circle reference engine

/// Core types and the engine seam.
pub use osrmc_core as core;

/// Reference engine.
#[cfg(feature = "engine")]
pub use osrmc_engine as engine;

// Re-export commonly used types at root level
pub use osrmc_core::{
    Engine, EngineConfig, Error, MatchParameters, NearestParameters, Osrm, Result,
    RouteParameters, TableParameters,
};
