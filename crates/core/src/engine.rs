//! The routing engine seam.

use crate::error::Result;
use crate::json::Object;
use crate::params::{MatchParameters, NearestParameters, RouteParameters, TableParameters};

/// Outcome status of an engine call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// The body holds the result.
    Ok,
    /// The body holds a `code`/`message` failure payload.
    Error,
}

/// Status plus response body, as returned by every engine entry point.
pub type Reply = (Status, Object);

/// A routing engine.
///
/// Implementations answer each request with a [`Status`] and a value tree. Returning
/// `Err` stands for an unexpected failure inside the engine rather than a rejected
/// request; rejected requests are `Status::Error` replies.
///
/// Queries take `&self` and may run concurrently against shared read-only data.
pub trait Engine: Send + Sync {
    /// Shortest route through the coordinates.
    fn route(&self, params: &RouteParameters) -> Result<Reply>;

    /// Duration/distance matrix between sources and destinations.
    fn table(&self, params: &TableParameters) -> Result<Reply>;

    /// Nearest network positions to a coordinate.
    fn nearest(&self, params: &NearestParameters) -> Result<Reply>;

    /// Snaps a trace to the network.
    fn match_trace(&self, params: &MatchParameters) -> Result<Reply>;
}

/// Builds the standard failure payload.
pub fn failure(code: &str, message: impl Into<String>) -> Reply {
    (
        Status::Error,
        Object::new().with("code", code).with("message", message.into()),
    )
}
