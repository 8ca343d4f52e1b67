//! # osrmc Engine
//!
//! Reference routing engine for the osrmc boundary.
//!
//! [`CrowFly`] answers route, table, nearest and match queries along straight great-circle
//! segments. It needs no preprocessed road network, which makes the whole boundary usable
//! and testable end to end.
//!
//! ## Example
//!
//! ```rust
//! use osrmc_core::{Coordinate, EngineConfig, Osrm, RouteParameters};
//! use osrmc_engine::CrowFly;
//!
//! let engine = CrowFly::new(&EngineConfig::shared_memory()).unwrap();
//! let osrm = Osrm::new(engine);
//!
//! let mut params = RouteParameters::new();
//! params.base.add_coordinate(Coordinate::new(13.388, 52.517));
//! params.base.add_coordinate(Coordinate::new(13.385, 52.520));
//!
//! let response = osrm.route(&params).unwrap();
//! assert!(response.distance().unwrap() > 0.0);
//! ```

pub mod crow_fly;
pub mod geo;
pub mod polyline;
pub mod render;

// Re-exports
pub use crow_fly::CrowFly;
