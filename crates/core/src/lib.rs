//! # osrmc Core
//!
//! Typed model of the osrmc routing boundary.
//!
//! This crate holds everything between a caller and a routing engine that is not the
//! C ABI itself: the error channel, request parameters and their bulk builder, the engine
//! seam, response accessors and the conversion of engine value trees into host values.
//!
//! ## Core Components
//!
//! - **Errors**: [`Error`] with machine-readable codes (`Exception`, engine codes, `NoTable`, `NoRoute`)
//! - **Value tree**: [`json::Value`], the engine's response representation
//! - **Parameters**: [`RouteParameters`], [`TableParameters`], [`NearestParameters`], [`MatchParameters`]
//! - **Bulk builder**: [`request`], populating parameters from structured input
//! - **Engine seam**: [`Engine`] trait and the [`Osrm`] invocation facade
//! - **Responses**: typed accessors over response trees
//! - **Conversion**: [`convert::to_host`]

pub mod annotations;
pub mod config;
pub mod convert;
pub mod engine;
pub mod error;
pub mod json;
pub mod osrm;
pub mod params;
pub mod request;
pub mod response;
pub mod version;

// Re-exports
pub use annotations::{RouteAnnotations, TableAnnotations};
pub use config::{EngineConfig, EngineConfigRequest, Storage};
pub use engine::{Engine, Reply, Status};
pub use error::{Error, Result, TableKind};
pub use json::{Array, Object, Value};
pub use osrm::Osrm;
pub use params::{
    BaseParameters, Bearing, Coordinate, Geometries, Hint, MatchParameters, NearestParameters,
    Overview, Parameters, RouteParameters, TableParameters,
};
pub use request::{MatchRequest, NearestRequest, Request, RouteRequest, TableRequest};
pub use response::{MatchResponse, NearestResponse, RouteResponse, TableResponse, Waypoint};
