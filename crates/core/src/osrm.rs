//! Engine invocation.

use std::fmt;

use crate::engine::{Engine, Reply, Status};
use crate::error::{Error, Result};
use crate::json::Object;
use crate::params::{
    MatchParameters, NearestParameters, Parameters, RouteParameters, TableParameters,
};
use crate::response::{MatchResponse, NearestResponse, RouteResponse, TableResponse};

/// An engine instance owned by one handle.
///
/// Every call blocks until the engine answers. A failure status is turned into
/// [`Error::Engine`] from the reply's `code`/`message`; the reply tree is dropped either way.
pub struct Osrm {
    engine: Box<dyn Engine>,
}

impl fmt::Debug for Osrm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Osrm").finish_non_exhaustive()
    }
}

impl Osrm {
    /// Takes ownership of an engine.
    pub fn new(engine: impl Engine + 'static) -> Self {
        Self {
            engine: Box::new(engine),
        }
    }

    /// Takes ownership of a boxed engine.
    pub fn from_boxed(engine: Box<dyn Engine>) -> Self {
        Self { engine }
    }

    /// Computes a route.
    pub fn route(&self, params: &RouteParameters) -> Result<RouteResponse> {
        log::debug!("route: {} coordinates", params.base().coordinates.len());
        finish("route", self.engine.route(params)).map(RouteResponse::new)
    }

    /// Computes a route and calls `handler(name, longitude, latitude)` once per waypoint.
    pub fn route_with<F>(&self, params: &RouteParameters, mut handler: F) -> Result<()>
    where
        F: FnMut(&str, f64, f64),
    {
        let response = self.route(params)?;
        for waypoint in response.waypoints()? {
            handler(
                &waypoint.name,
                waypoint.location.longitude,
                waypoint.location.latitude,
            );
        }
        Ok(())
    }

    /// Computes a distance/duration table.
    pub fn table(&self, params: &TableParameters) -> Result<TableResponse> {
        log::debug!(
            "table: {} coordinates, {} sources, {} destinations",
            params.base().coordinates.len(),
            params.sources.len(),
            params.destinations.len()
        );
        finish("table", self.engine.table(params)).map(TableResponse::new)
    }

    /// Finds the nearest network positions.
    pub fn nearest(&self, params: &NearestParameters) -> Result<NearestResponse> {
        log::debug!("nearest: {} results", params.number_of_results);
        finish("nearest", self.engine.nearest(params)).map(NearestResponse::new)
    }

    /// Matches a trace.
    pub fn match_trace(&self, params: &MatchParameters) -> Result<MatchResponse> {
        log::debug!("match: {} coordinates", params.base().coordinates.len());
        finish("match", self.engine.match_trace(params)).map(MatchResponse::new)
    }
}

fn finish(operation: &str, reply: Result<Reply>) -> Result<Object> {
    match reply? {
        (Status::Ok, body) => Ok(body),
        (Status::Error, body) => {
            let err = Error::from_engine_payload(&body);
            log::warn!("{} failed: {} ({})", operation, err.code(), err.message());
            Err(err)
        }
    }
}
